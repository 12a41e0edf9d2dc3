use leptos::prelude::*;
use listaria_shared::catalog::{self, CATEGORIES};

use super::wizard_state::WizardState;
use crate::components::icons::{Car, Laptop, Shirt, Smartphone, Tag};

fn category_icon(id: &str) -> AnyView {
    match id {
        "electronics" => view! { <Laptop attr:class="h-8 w-8" /> }.into_any(),
        "car" => view! { <Car attr:class="h-8 w-8" /> }.into_any(),
        "mobile" => view! { <Smartphone attr:class="h-8 w-8" /> }.into_any(),
        "clothing" => view! { <Shirt attr:class="h-8 w-8" /> }.into_any(),
        _ => view! { <Tag attr:class="h-8 w-8" /> }.into_any(),
    }
}

/// Picking a subcategory moves straight on to the details step.
#[component]
pub fn CategoryStep(state: WizardState) -> impl IntoView {
    let chosen = move || state.wizard.with(|w| w.draft().category.category.clone());
    let chosen_sub = move || state.wizard.with(|w| w.draft().category.subcategory.clone());

    view! {
        <div class="space-y-6">
            <div class="grid grid-cols-2 gap-4">
                {CATEGORIES
                    .iter()
                    .map(|category| {
                        let id = category.id;
                        let active = move || chosen() == id;
                        view! {
                            <button
                                type="button"
                                class="flex flex-col items-center gap-3 p-6 rounded-lg border-2"
                                class=("border-primary", active)
                                class=("bg-primary/5", active)
                                class=("border-base-300", move || !active())
                                on:click=move |_| state.select_category(id)
                            >
                                <span class="text-primary">{category_icon(id)}</span>
                                <span class="font-medium">{category.name}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {move || {
                catalog::find(&chosen()).map(|category| view! {
                    <div class="space-y-2">
                        <p class="label-text font-medium">"Select Subcategory"</p>
                        <div class="flex flex-wrap gap-2">
                            {category
                                .subcategories
                                .iter()
                                .copied()
                                .map(|name| {
                                    view! {
                                        <button
                                            type="button"
                                            class=move || if chosen_sub() == name {
                                                "btn btn-sm btn-primary"
                                            } else {
                                                "btn btn-sm btn-outline"
                                            }
                                            on:click=move |_| state.select_subcategory(name)
                                        >
                                            {name}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                })
            }}
        </div>
    }
}
