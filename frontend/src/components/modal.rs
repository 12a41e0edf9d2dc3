use leptos::prelude::*;

use crate::components::icons::X;

/// `<dialog>` driven by an `open` signal.
///
/// Escape, the close button and a backdrop click all set `open` to false.
/// Children are rendered only while open, so closing drops their state.
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class=format!("modal-box {class}")>
                <button
                    type="button"
                    class="btn btn-sm btn-circle btn-ghost absolute right-3 top-3"
                    aria-label="Close"
                    on:click=move |_| open.set(false)
                >
                    <X attr:class="h-4 w-4" />
                </button>
                <h3 class="font-semibold text-xl mb-4 pr-8">{move || title.get()}</h3>
                <Show when=move || open.get()>
                    {children()}
                </Show>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
