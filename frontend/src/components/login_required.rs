use leptos::prelude::*;

use crate::components::icons::Lock;
use crate::services::{AuthTab, use_modals};

/// Placeholder for guarded pages while signed out.
#[component]
pub fn LoginRequired(#[prop(into)] message: String) -> impl IntoView {
    let modals = use_modals();

    view! {
        <div class="flex items-center justify-center py-24 px-4">
            <div class="card bg-base-100 shadow-xl max-w-md w-full">
                <div class="card-body items-center text-center">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <Lock attr:class="h-8 w-8" />
                    </div>
                    <h2 class="card-title">"Login required"</h2>
                    <p class="text-base-content/70">{message}</p>
                    <div class="card-actions mt-4">
                        <button class="btn btn-primary" on:click=move |_| modals.open_auth(AuthTab::Login)>
                            "Log in"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
