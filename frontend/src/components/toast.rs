use leptos::prelude::*;

use crate::components::icons::X;
use crate::notify::use_toaster;

/// Top-right stack of the `Toaster`'s toasts.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast toast-top toast-end z-[1000]">
            <For each=move || toaster.toasts() key=|toast| toast.id let:toast>
                <div role="status" class=toast.kind.alert_class()>
                    <div>
                        <p class="font-semibold">{toast.title.clone()}</p>
                        <Show when={
                            let empty = toast.description.is_empty();
                            move || !empty
                        }>
                            <p class="text-sm opacity-80">{toast.description.clone()}</p>
                        </Show>
                    </div>
                    <button
                        class="btn btn-ghost btn-xs btn-circle"
                        aria-label="Dismiss"
                        on:click=move |_| toaster.dismiss(toast.id)
                    >
                        <X attr:class="h-3 w-3" />
                    </button>
                </div>
            </For>
        </div>
    }
}
