use leptos::prelude::*;
use listaria_shared::MAX_AD_IMAGES;
use web_sys::{File, FileList, HtmlInputElement};

use super::wizard_state::WizardState;
use crate::components::icons::{ImageIcon, Star, Upload, X};

fn collect_files(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn PhotosStep(state: WizardState) -> impl IntoView {
    let drag_active = RwSignal::new(false);
    let photos = move || state.wizard.with(|w| w.draft().photos.thumbnails());
    let count = move || state.wizard.with(|w| w.draft().photos.len());
    let cover_id = move || state.wizard.with(|w| w.draft().photos.cover().map(|p| p.id));

    let on_pick = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let files = collect_files(input.files());
        // Lets the same file be picked again after removal.
        input.set_value("");
        state.add_files(files);
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        drag_active.set(false);
        let files = collect_files(ev.data_transfer().and_then(|dt| dt.files()));
        state.add_files(files);
    };

    view! {
        <div class="space-y-4">
            <div
                class="border-2 border-dashed rounded-lg p-8 text-center"
                class=("border-primary", move || drag_active.get())
                class=("bg-primary/5", move || drag_active.get())
                class=("border-base-300", move || !drag_active.get())
                on:dragenter=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    drag_active.set(true);
                }
                on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
                on:dragleave=move |_| drag_active.set(false)
                on:drop=on_drop
            >
                <input
                    id="ad-images"
                    type="file"
                    multiple
                    accept="image/*"
                    class="hidden"
                    on:change=on_pick
                />
                <label for="ad-images" class="cursor-pointer flex flex-col items-center">
                    <div class="w-16 h-16 rounded-full bg-primary/10 text-primary flex items-center justify-center mb-4">
                        <ImageIcon attr:class="h-8 w-8" />
                    </div>
                    <p class="font-medium mb-1">"Drag & drop images here"</p>
                    <p class="text-sm opacity-60 mb-4">
                        {format!("or click to browse (up to {MAX_AD_IMAGES} images)")}
                    </p>
                    <span class="btn btn-outline btn-sm gap-2">
                        <Upload attr:class="h-4 w-4" />
                        "Upload Photos"
                    </span>
                </label>
            </div>

            <div class="flex items-center justify-between text-sm opacity-70">
                <span>{move || format!("{}/{} photos", count(), MAX_AD_IMAGES)}</span>
                <Show when=move || state.is_processing()>
                    <span class="flex items-center gap-2">
                        <span class="loading loading-spinner loading-xs"></span>
                        "Processing images..."
                    </span>
                </Show>
            </div>

            <Show when=move || { count() > 0 }>
                <div class="grid grid-cols-3 md:grid-cols-4 gap-3">
                    <For each=photos key=|thumb| thumb.id let:thumb>
                        {
                            let id = thumb.id;
                            let is_cover = move || cover_id() == Some(id);
                            view! {
                                <div class="relative aspect-square rounded-lg overflow-hidden group">
                                    <img src=thumb.preview alt=thumb.name class="w-full h-full object-cover" />
                                    <button
                                        type="button"
                                        class="btn btn-circle btn-xs absolute top-1 right-1 bg-base-100/80 border-none"
                                        aria-label="Remove photo"
                                        on:click=move |_| state.remove_photo(id)
                                    >
                                        <X attr:class="h-3 w-3" />
                                    </button>
                                    <Show
                                        when=is_cover
                                        fallback=move || view! {
                                            <button
                                                type="button"
                                                class="btn btn-xs absolute bottom-1 left-1 gap-1 opacity-0 group-hover:opacity-100"
                                                on:click=move |_| state.make_cover(id)
                                            >
                                                <Star attr:class="h-3 w-3" />
                                                "Set as cover"
                                            </button>
                                        }
                                    >
                                        <span class="badge badge-primary badge-sm absolute bottom-1 left-1">"Cover"</span>
                                    </Show>
                                </div>
                            }
                        }
                    </For>
                </div>
            </Show>
        </div>
    }
}
