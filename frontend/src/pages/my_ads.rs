use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::price::format_price;
use listaria_shared::{Ad, AdPatch, AdStatus, Condition, TITLE_MAX_CHARS};
use tracing::{debug, info};

use crate::components::empty_state::EmptyState;
use crate::components::icons::{Eye, ImageIcon, Pencil, Plus, Trash};
use crate::components::modal::Modal;
use crate::error::{FormField, ValidationError};
use crate::generation::ViewGeneration;
use crate::notify::use_toaster;
use crate::services::{use_modals, use_services};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::wizard::parse_price;

// =========================================================
// Edit form
// =========================================================

/// Editable fields of an existing ad, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub condition: Condition,
    pub status: AdStatus,
}

impl EditForm {
    pub fn from_ad(ad: &Ad) -> Self {
        Self {
            title: ad.title.clone(),
            description: ad.description.clone(),
            price: format!("{}", ad.price),
            condition: ad.condition,
            status: ad.status,
        }
    }

    /// Only the fields that differ from `original`.
    pub fn patch(&self, original: &Ad) -> Result<AdPatch, ValidationError> {
        let title: String = self.title.trim().chars().take(TITLE_MAX_CHARS).collect();
        if title.is_empty() {
            return Err(ValidationError::Missing(FormField::Title));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::Missing(FormField::Description));
        }
        let price = parse_price(&self.price)?;

        Ok(AdPatch {
            title: (title != original.title).then_some(title),
            description: (description != original.description).then(|| description.to_string()),
            price: (price != original.price).then_some(price),
            condition: (self.condition != original.condition).then_some(self.condition),
            status: (self.status != original.status).then_some(self.status),
            ..Default::default()
        })
    }
}

fn status_badge(status: AdStatus) -> &'static str {
    match status {
        AdStatus::Active => "badge badge-primary",
        AdStatus::Sold => "badge badge-success",
        AdStatus::Expired => "badge badge-ghost",
    }
}

// =========================================================
// Dialogs
// =========================================================

#[component]
fn EditAdForm(ad: Ad, open: RwSignal<bool>, ads: RwSignal<Vec<Ad>>) -> impl IntoView {
    let services = use_services();
    let toaster = use_toaster();
    let form = RwSignal::new(EditForm::from_ad(&ad));
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let original = StoredValue::new(ad);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let original = original.get_value();
        let patch = match form.with_untracked(|f| f.patch(&original)) {
            Ok(patch) => patch,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        if patch.is_empty() {
            open.set(false);
            return;
        }
        error.set(None);
        saving.set(true);
        let api = services.api();
        spawn_local(async move {
            match api.update_ad(&original.id, patch).await {
                Ok(updated) => {
                    ads.try_update(|list| {
                        if let Some(slot) = list.iter_mut().find(|a| a.id == updated.id) {
                            *slot = updated;
                        }
                    });
                    toaster.success("Ad updated", "Your changes have been saved.");
                    open.set(false);
                }
                Err(err) => {
                    error.try_set(Some(err.user_message()));
                    toaster.failure("Update failed", &err);
                }
            }
            saving.try_set(false);
        });
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <Show when=move || error.with(Option::is_some)>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error.get().unwrap_or_default()}</span>
                </div>
            </Show>
            <div class="form-control">
                <label class="label"><span class="label-text">"Title"</span></label>
                <input
                    type="text"
                    maxlength=TITLE_MAX_CHARS.to_string()
                    class="input input-bordered w-full"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Description"</span></label>
                <textarea
                    rows="4"
                    class="textarea textarea-bordered w-full"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </div>
            <div class="grid grid-cols-3 gap-3">
                <div class="form-control">
                    <label class="label"><span class="label-text">"Price"</span></label>
                    <input
                        type="text"
                        inputmode="decimal"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.price.clone())
                        on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">"Condition"</span></label>
                    <select
                        class="select select-bordered w-full"
                        prop:value=move || form.with(|f| f.condition.as_str())
                        on:change=move |ev| {
                            if let Some(c) = Condition::parse(&event_target_value(&ev)) {
                                form.update(|f| f.condition = c);
                            }
                        }
                    >
                        {Condition::ALL
                            .iter()
                            .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">"Status"</span></label>
                    <select
                        class="select select-bordered w-full"
                        prop:value=move || form.with(|f| f.status.as_str())
                        on:change=move |ev| {
                            if let Some(s) = AdStatus::parse(&event_target_value(&ev)) {
                                form.update(|f| f.status = s);
                            }
                        }
                    >
                        {AdStatus::ALL
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>
            <div class="modal-action">
                <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() {
                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                    } else {
                        "Save changes".into_any()
                    }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn DeleteConfirm(ad: Ad, open: RwSignal<bool>, ads: RwSignal<Vec<Ad>>) -> impl IntoView {
    let services = use_services();
    let toaster = use_toaster();
    let deleting = RwSignal::new(false);
    let id = StoredValue::new(ad.id.clone());

    let on_confirm = move |_| {
        deleting.set(true);
        let api = services.api();
        let id = id.get_value();
        spawn_local(async move {
            match api.delete_ad(&id).await {
                Ok(()) => {
                    info!(ad_id = %id, "ad deleted");
                    ads.try_update(|list| list.retain(|a| a.id != id));
                    toaster.success("Ad deleted", "Your advertisement has been deleted.");
                    open.set(false);
                }
                Err(err) => toaster.failure("Delete failed", &err),
            }
            deleting.try_set(false);
        });
    };

    view! {
        <p class="font-medium">{ad.title.clone()}</p>
        <p class="opacity-80 mt-2">
            "This action cannot be undone. This will permanently delete your advertisement."
        </p>
        <div class="modal-action">
            <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
            <button class="btn btn-error" disabled=move || deleting.get() on:click=on_confirm>
                {move || if deleting.get() {
                    view! { <span class="loading loading-spinner"></span> "Deleting..." }.into_any()
                } else {
                    "Delete".into_any()
                }}
            </button>
        </div>
    }
}

// =========================================================
// Page
// =========================================================

#[component]
fn MyAdRow(ad: Ad, on_edit: Callback<Ad>, on_delete: Callback<Ad>) -> impl IntoView {
    let router = use_router();
    let route = AppRoute::AdDetails(ad.id.clone());
    let cover = ad.cover_image().map(str::to_string);
    let edit_ad = StoredValue::new(ad.clone());

    view! {
        <div class="card card-side bg-base-100 shadow-sm">
            <figure class="w-32 h-24 m-4 rounded bg-base-200 shrink-0">
                {match cover {
                    Some(src) => view! { <img src=src alt=ad.title.clone() class="w-full h-full object-cover" /> }.into_any(),
                    None => view! { <ImageIcon attr:class="h-8 w-8 opacity-30" /> }.into_any(),
                }}
            </figure>
            <div class="flex-1 min-w-0 py-4 flex items-start justify-between gap-2">
                <div class="min-w-0">
                    <h3 class="font-semibold truncate">{ad.title.clone()}</h3>
                    <p class="text-lg font-bold text-primary">{format_price(ad.price, &ad.currency)}</p>
                    <p class="text-sm opacity-60">{ad.location.clone()}</p>
                </div>
                <span class=status_badge(ad.status)>{ad.status.label()}</span>
            </div>
            <div class="flex flex-col gap-2 p-4">
                <button class="btn btn-outline btn-sm" aria-label="View" on:click=move |_| router.go(route.clone())>
                    <Eye attr:class="h-4 w-4" />
                </button>
                <button class="btn btn-outline btn-sm" aria-label="Edit" on:click=move |_| on_edit.run(edit_ad.get_value())>
                    <Pencil attr:class="h-4 w-4" />
                </button>
                <button class="btn btn-outline btn-sm" aria-label="Delete" on:click=move |_| on_delete.run(edit_ad.get_value())>
                    <Trash attr:class="h-4 w-4 text-error" />
                </button>
            </div>
        </div>
    }
}

#[component]
fn RowSkeleton() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-sm p-4 flex flex-row gap-4">
            <div class="skeleton w-32 h-24"></div>
            <div class="flex-1 space-y-2">
                <div class="skeleton h-5 w-1/2"></div>
                <div class="skeleton h-4 w-1/4"></div>
                <div class="skeleton h-3 w-1/3"></div>
            </div>
        </div>
    }
}

#[component]
pub fn MyAdsPage() -> impl IntoView {
    let services = use_services();
    let toaster = use_toaster();
    let modals = use_modals();
    let router = use_router();

    let ads = RwSignal::new(Vec::<Ad>::new());
    let loading = RwSignal::new(true);
    let selected = RwSignal::new(None::<Ad>);
    let edit_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);

    let generation = ViewGeneration::new();
    let ticket = generation.next_ticket();
    on_cleanup(move || generation.invalidate());

    let api = services.api();
    spawn_local(async move {
        let Some(result) = ticket.accept(api.my_ads().await) else {
            debug!("dropping stale ads");
            return;
        };
        match result {
            Ok(list) => {
                ads.try_set(list);
            }
            Err(err) => toaster.failure("Could not load your ads", &err),
        }
        loading.try_set(false);
    });

    let on_edit = Callback::new(move |ad: Ad| {
        selected.set(Some(ad));
        edit_open.set(true);
    });
    let on_delete = Callback::new(move |ad: Ad| {
        selected.set(Some(ad));
        delete_open.set(true);
    });

    let post_new = move |_: leptos::ev::MouseEvent| modals.sell_open.set(true);

    view! {
        <div class="max-w-5xl mx-auto px-4 py-8">
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-semibold">"My Advertisements"</h1>
                <button class="btn btn-primary gap-2" on:click=post_new>
                    <Plus attr:class="h-4 w-4" />
                    "Post New Ad"
                </button>
            </div>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="grid gap-4">{(0..3).map(|_| view! { <RowSkeleton /> }).collect_view()}</div>
                    }
                    .into_any();
                }
                if ads.with(Vec::is_empty) {
                    return view! {
                        <EmptyState
                            title="No Advertisements Yet"
                            description="You haven't posted any advertisements yet. Start selling by posting your first ad!"
                        >
                            <button class="btn btn-primary gap-2" on:click=post_new>
                                <Plus attr:class="h-4 w-4" />
                                "Post Your First Ad"
                            </button>
                        </EmptyState>
                    }
                    .into_any();
                }
                view! {
                    <div class="grid gap-4">
                        <For each=move || ads.get() key=|ad| (ad.id.clone(), ad.updated_at) let:ad>
                            <MyAdRow ad=ad on_edit=on_edit on_delete=on_delete />
                        </For>
                    </div>
                }
                .into_any()
            }}

            <div class="text-center mt-8">
                <button class="btn btn-ghost btn-sm" on:click=move |_| router.go(AppRoute::Home)>
                    "Back to listings"
                </button>
            </div>
        </div>

        <Modal open=edit_open title="Edit Advertisement" class="max-w-xl">
            {move || selected.get().map(|ad| view! { <EditAdForm ad=ad open=edit_open ads=ads /> })}
        </Modal>
        <Modal open=delete_open title="Delete Advertisement?">
            {move || selected.get().map(|ad| view! { <DeleteConfirm ad=ad open=delete_open ads=ads /> })}
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ad() -> Ad {
        let at = Utc.with_ymd_and_hms(2026, 10, 1, 10, 0, 0).unwrap();
        Ad {
            id: "a1".into(),
            title: "Honda City 2021".into(),
            description: "Single owner".into(),
            price: 1150000.0,
            currency: "INR".into(),
            category: "car".into(),
            subcategory: "Cars".into(),
            condition: Condition::Used,
            images: vec![],
            location: "Pune, Maharashtra".into(),
            phone: "9876543210".into(),
            show_phone: true,
            user_id: "u1".into(),
            user_name: "Uma".into(),
            user_email: "u1@listaria.in".into(),
            is_featured: false,
            status: AdStatus::Active,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_unchanged_form_yields_empty_patch() {
        let original = ad();
        let patch = EditForm::from_ad(&original).patch(&original).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_carries_only_changed_fields() {
        let original = ad();
        let mut form = EditForm::from_ad(&original);
        form.price = "11,00,000".into();
        form.status = AdStatus::Sold;

        let patch = form.patch(&original).unwrap();
        assert_eq!(patch.price, Some(1100000.0));
        assert_eq!(patch.status, Some(AdStatus::Sold));
        assert_eq!(patch.title, None);
        assert_eq!(patch.condition, None);
    }

    #[test]
    fn test_whitespace_only_edits_are_ignored() {
        let original = ad();
        let mut form = EditForm::from_ad(&original);
        form.title = "  Honda City 2021 ".into();
        assert!(form.patch(&original).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_edits_are_rejected() {
        let original = ad();

        let mut form = EditForm::from_ad(&original);
        form.title = "   ".into();
        assert_eq!(
            form.patch(&original),
            Err(ValidationError::Missing(FormField::Title))
        );

        let mut form = EditForm::from_ad(&original);
        form.price = "-5".into();
        assert_eq!(form.patch(&original), Err(ValidationError::InvalidPrice));
    }
}
