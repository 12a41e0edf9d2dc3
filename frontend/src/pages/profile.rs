use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::date::full_date;
use listaria_shared::{ProfileUpdate, UserProfile};
use tracing::{debug, info};

use crate::auth::use_auth;
use crate::components::icons::{Calendar, Heart, Mail, MapPin, Package, Pencil, Phone};
use crate::error::{FormField, ValidationError};
use crate::generation::ViewGeneration;
use crate::notify::use_toaster;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// Profile fields as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub display_name: String,
    pub phone: String,
    pub location: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            display_name: profile.display_name.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
        }
    }

    /// Changed fields only. Clearing phone or location sends an empty string.
    pub fn update(&self, current: &UserProfile) -> Result<ProfileUpdate, ValidationError> {
        let name = self.display_name.trim();
        if name.is_empty() {
            return Err(ValidationError::Missing(FormField::Name));
        }
        let changed = |typed: &str, stored: Option<&str>| {
            let typed = typed.trim();
            (typed != stored.unwrap_or_default().trim()).then(|| typed.to_string())
        };
        Ok(ProfileUpdate {
            display_name: (name != current.display_name.trim()).then(|| name.to_string()),
            phone: changed(&self.phone, current.phone.as_deref()),
            location: changed(&self.location, current.location.as_deref()),
        })
    }
}

#[component]
fn InfoRow(label: &'static str, value: String, children: Children) -> impl IntoView {
    view! {
        <div class="flex items-center gap-3 py-2">
            <span class="opacity-60">{children()}</span>
            <div>
                <p class="text-xs opacity-60">{label}</p>
                <p class="font-medium">{value}</p>
            </div>
        </div>
    }
}

#[component]
fn ProfileEditor(profile: RwSignal<Option<UserProfile>>, editing: RwSignal<bool>) -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let toaster = use_toaster();

    let form = RwSignal::new(
        profile.with_untracked(|p| p.as_ref().map(ProfileForm::from_profile).unwrap_or_default()),
    );
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = profile.get_untracked() else {
            return;
        };
        let update = match form.with_untracked(|f| f.update(&current)) {
            Ok(update) => update,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        if update == ProfileUpdate::default() {
            editing.set(false);
            return;
        }
        error.set(None);
        saving.set(true);
        let api = services.api();
        spawn_local(async move {
            let result = api.update_profile(&update).await;
            let result = match (result, update.display_name) {
                (Ok(saved), Some(name)) => auth.update_display_name(name).await.map(|_| saved),
                (result, _) => result,
            };
            match result {
                Ok(saved) => {
                    info!("profile updated");
                    profile.try_set(Some(saved));
                    toaster.success("Profile updated", "Your profile has been updated successfully.");
                    editing.try_set(false);
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
                <label class="label"><span class="label-text">"Display name"</span></label>
                <input
                    type="text"
                    class="input input-bordered w-full"
                    prop:value=move || form.with(|f| f.display_name.clone())
                    on:input=move |ev| form.update(|f| f.display_name = event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Phone"</span></label>
                <input
                    type="tel"
                    placeholder="+91 98765 43210"
                    class="input input-bordered w-full"
                    prop:value=move || form.with(|f| f.phone.clone())
                    on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label"><span class="label-text">"Location"</span></label>
                <input
                    type="text"
                    placeholder="City, State"
                    class="input input-bordered w-full"
                    prop:value=move || form.with(|f| f.location.clone())
                    on:input=move |ev| form.update(|f| f.location = event_target_value(&ev))
                />
            </div>
            <div class="flex justify-end gap-2">
                <button type="button" class="btn btn-ghost" on:click=move |_| editing.set(false)>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() {
                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                    } else {
                        "Save".into_any()
                    }}
                </button>
            </div>
        </form>
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let services = use_services();
    let auth = use_auth();
    let toaster = use_toaster();

    let profile = RwSignal::new(None::<UserProfile>);
    let loading = RwSignal::new(true);
    let editing = RwSignal::new(false);

    let generation = ViewGeneration::new();
    let ticket = generation.next_ticket();
    on_cleanup(move || generation.invalidate());

    let api = services.api();
    spawn_local(async move {
        let Some(result) = ticket.accept(api.profile().await) else {
            debug!("dropping stale profile");
            return;
        };
        match result {
            Ok(p) => {
                profile.try_set(Some(p));
            }
            Err(err) => {
                debug!(error = %err, "profile unavailable");
                toaster.failure("Could not load profile", &err);
            }
        }
        loading.try_set(false);
    });

    let name = move || {
        profile
            .with(|p| p.as_ref().map(|p| p.display_name.trim().to_string()))
            .filter(|n| !n.is_empty())
            .or_else(|| auth.user().map(|u| u.label()))
            .unwrap_or_default()
    };
    let initial = move || name().chars().next().map(|c| c.to_ascii_uppercase()).unwrap_or('U');
    let email = move || auth.user().map(|u| u.email).unwrap_or_default();
    let field = move |pick: fn(&UserProfile) -> Option<String>| {
        profile
            .with(|p| p.as_ref().and_then(pick))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "Not provided".to_string())
    };

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8 space-y-6">
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body">
                    <div class="flex items-center gap-4">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content rounded-full w-20">
                                <span class="text-3xl">{initial}</span>
                            </div>
                        </div>
                        <div class="flex-1 min-w-0">
                            <h1 class="text-2xl font-semibold truncate">{name}</h1>
                            <p class="opacity-60 truncate">{email}</p>
                        </div>
                        <Show when=move || !editing.get() && profile.with(Option::is_some)>
                            <button class="btn btn-outline btn-sm gap-2" on:click=move |_| editing.set(true)>
                                <Pencil attr:class="h-4 w-4" />
                                "Edit Profile"
                            </button>
                        </Show>
                    </div>

                    <div class="divider"></div>

                    {move || {
                        if loading.get() {
                            return view! {
                                <div class="space-y-3">
                                    <div class="skeleton h-10 w-full"></div>
                                    <div class="skeleton h-10 w-full"></div>
                                    <div class="skeleton h-10 w-2/3"></div>
                                </div>
                            }
                            .into_any();
                        }
                        if editing.get() {
                            return view! { <ProfileEditor profile=profile editing=editing /> }.into_any();
                        }
                        view! {
                            <div class="grid sm:grid-cols-2 gap-x-6">
                                <InfoRow label="Email" value=email()>
                                    <Mail attr:class="h-5 w-5" />
                                </InfoRow>
                                <InfoRow label="Phone" value=field(|p| p.phone.clone())>
                                    <Phone attr:class="h-5 w-5" />
                                </InfoRow>
                                <InfoRow label="Location" value=field(|p| p.location.clone())>
                                    <MapPin attr:class="h-5 w-5" />
                                </InfoRow>
                                <InfoRow label="Member since" value=field(|p| p.created_at.map(full_date))>
                                    <Calendar attr:class="h-5 w-5" />
                                </InfoRow>
                            </div>
                        }
                        .into_any()
                    }}
                </div>
            </div>

            <div class="grid sm:grid-cols-2 gap-4">
                <Link route=AppRoute::MyAds class="card bg-base-100 shadow-sm hover:shadow-md transition-shadow">
                    <div class="card-body flex-row items-center gap-4">
                        <Package attr:class="h-8 w-8 text-primary" />
                        <div>
                            <h2 class="font-semibold">"My Ads"</h2>
                            <p class="text-sm opacity-60">"Manage your advertisements"</p>
                        </div>
                    </div>
                </Link>
                <Link route=AppRoute::Favorites class="card bg-base-100 shadow-sm hover:shadow-md transition-shadow">
                    <div class="card-body flex-row items-center gap-4">
                        <Heart attr:class="h-8 w-8 text-primary" />
                        <div>
                            <h2 class="font-semibold">"Favorites"</h2>
                            <p class="text-sm opacity-60">"Items you saved for later"</p>
                        </div>
                    </div>
                </Link>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> UserProfile {
        UserProfile {
            id: "p1".into(),
            uid: "u1".into(),
            email: "asha@listaria.in".into(),
            display_name: "Asha".into(),
            photo_url: None,
            phone: Some("9876543210".into()),
            location: None,
            created_at: None,
        }
    }

    #[test]
    fn test_untouched_form_sends_nothing() {
        let profile = stored();
        let update = ProfileForm::from_profile(&profile).update(&profile).unwrap();
        assert_eq!(update, ProfileUpdate::default());
    }

    #[test]
    fn test_only_changed_fields_are_sent() {
        let profile = stored();
        let mut form = ProfileForm::from_profile(&profile);
        form.display_name = " Asha Rao ".into();
        form.location = "Mumbai, Maharashtra".into();

        let update = form.update(&profile).unwrap();
        assert_eq!(update.display_name.as_deref(), Some("Asha Rao"));
        assert_eq!(update.location.as_deref(), Some("Mumbai, Maharashtra"));
        assert_eq!(update.phone, None);
    }

    #[test]
    fn test_clearing_phone_sends_empty_value() {
        let profile = stored();
        let mut form = ProfileForm::from_profile(&profile);
        form.phone = "  ".into();
        assert_eq!(form.update(&profile).unwrap().phone.as_deref(), Some(""));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let profile = stored();
        let mut form = ProfileForm::from_profile(&profile);
        form.display_name = String::new();
        assert_eq!(
            form.update(&profile),
            Err(ValidationError::Missing(FormField::Name))
        );
    }
}
