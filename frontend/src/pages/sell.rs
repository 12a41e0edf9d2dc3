use leptos::prelude::*;
use listaria_shared::Ad;

use crate::components::sell_form::SellForm;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// `/sell`: the wizard as a full page.
#[component]
pub fn SellPage() -> impl IntoView {
    let router = use_router();
    let on_published = move |ad: Ad| router.go(AppRoute::AdDetails(ad.id));

    view! {
        <div class="max-w-2xl mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold mb-6">"Post an Ad"</h1>
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body">
                    <SellForm on_published=on_published show_title=true />
                </div>
            </div>
        </div>
    }
}
