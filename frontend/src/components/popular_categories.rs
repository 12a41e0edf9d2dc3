use leptos::prelude::*;
use listaria_shared::catalog::CATEGORIES;

use crate::components::icons::{Car, ChevronLeft, ChevronRight, Laptop, Shirt, Smartphone, Tag};
use crate::services::use_listing;

const SCROLL_STEP: f64 = 200.0;

fn tile_image(id: &str) -> Option<&'static str> {
    match id {
        "electronics" => Some("https://images.unsplash.com/photo-1498049794561-7780e7231661?w=200&h=200&fit=crop"),
        "car" => Some("https://images.unsplash.com/photo-1494976388531-d1058494cdd8?w=200&h=200&fit=crop"),
        "mobile" => Some("https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=200&h=200&fit=crop"),
        "clothing" => Some("https://images.unsplash.com/photo-1445205170230-053b83016050?w=200&h=200&fit=crop"),
        _ => None,
    }
}

fn tile_icon(id: &str) -> AnyView {
    match id {
        "electronics" => view! { <Laptop attr:class="h-4 w-4" /> }.into_any(),
        "car" => view! { <Car attr:class="h-4 w-4" /> }.into_any(),
        "mobile" => view! { <Smartphone attr:class="h-4 w-4" /> }.into_any(),
        "clothing" => view! { <Shirt attr:class="h-4 w-4" /> }.into_any(),
        _ => view! { <Tag attr:class="h-4 w-4" /> }.into_any(),
    }
}

#[component]
pub fn PopularCategories() -> impl IntoView {
    let listing = use_listing();
    let container = NodeRef::<leptos::html::Div>::new();

    let scroll = move |delta: f64| {
        if let Some(el) = container.get() {
            el.scroll_by_with_x_and_y(delta, 0.0);
        }
    };

    view! {
        <section class="py-8">
            <div class="max-w-7xl mx-auto px-4 md:px-6 lg:px-8">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-2xl font-semibold">"Popular Categories"</h2>
                    <div class="flex gap-2">
                        <button class="btn btn-outline btn-circle btn-sm" aria-label="Scroll left" on:click=move |_| scroll(-SCROLL_STEP)>
                            <ChevronLeft attr:class="h-4 w-4" />
                        </button>
                        <button class="btn btn-primary btn-circle btn-sm" aria-label="Scroll right" on:click=move |_| scroll(SCROLL_STEP)>
                            <ChevronRight attr:class="h-4 w-4" />
                        </button>
                    </div>
                </div>

                <div node_ref=container class="flex gap-6 overflow-x-auto scroll-smooth pb-4">
                    {CATEGORIES
                        .iter()
                        .map(|category| {
                            let id = category.id;
                            view! {
                                <button
                                    class="flex flex-col items-center gap-3 min-w-[120px] group"
                                    on:click=move |_| listing.query.update(|q| q.category = Some(id.to_string()))
                                >
                                    <div class="w-28 h-28 rounded-full overflow-hidden bg-base-200 flex items-center justify-center group-hover:ring-2 ring-primary">
                                        {tile_image(id).map(|src| view! {
                                            <img src=src alt=category.name class="w-full h-full object-cover" />
                                        })}
                                    </div>
                                    <span class="flex items-center gap-1 text-sm font-medium">
                                        {tile_icon(id)}
                                        {category.name}
                                    </span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
