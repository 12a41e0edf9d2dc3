use leptos::prelude::*;
use listaria_shared::Ad;

use crate::components::modal::Modal;
use crate::components::sell_form::SellForm;
use crate::services::use_modals;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// Closing the dialog unmounts the form and discards the draft.
#[component]
pub fn SellModal() -> impl IntoView {
    let modals = use_modals();
    let router = use_router();
    let open = modals.sell_open;

    let on_published = move |ad: Ad| {
        open.set(false);
        router.go(AppRoute::AdDetails(ad.id));
    };

    view! {
        <Modal open=open title="Post an Ad" class="max-w-2xl">
            <SellForm on_published=on_published show_title=true />
        </Modal>
    }
}
