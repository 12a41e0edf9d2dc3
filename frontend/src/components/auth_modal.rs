//! Login / register dialog.
//!
//! Forms validate locally before anything is sent; the gate's own errors
//! (wrong password, email taken, network) land in the same banner. The
//! dialog closes only on success.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_auth;
use crate::components::icons::Eye;
use crate::components::modal::Modal;
use crate::error::{AppError, AppResult};
use crate::services::{AuthTab, use_modals, use_services};
use crate::session::{Registration, UserIdentity, validate_login, validate_registration};
use crate::web::BrowserStorage;
use crate::web::google;

/// Shows `err` in the banner unless it only means another request is running.
fn show_error(banner: RwSignal<Option<String>>, err: &AppError) {
    if !matches!(err, AppError::Busy) {
        banner.set(Some(err.user_message()));
    }
}

fn finish(result: AppResult<UserIdentity>, banner: RwSignal<Option<String>>, open: RwSignal<bool>) {
    match result {
        Ok(_) => open.set(false),
        Err(err) => show_error(banner, &err),
    }
}

#[component]
fn ErrorBanner(banner: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || banner.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || banner.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
fn PasswordInput(
    value: RwSignal<String>,
    #[prop(into)] placeholder: String,
    #[prop(into)] disabled: Signal<bool>,
    revealed: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <label class="input input-bordered flex items-center gap-2 w-full">
            <input
                type=move || if revealed.get() { "text" } else { "password" }
                class="grow"
                placeholder=placeholder
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="opacity-60 hover:opacity-100"
                aria-label="Show password"
                on:click=move |_| revealed.update(|r| *r = !*r)
            >
                <Eye attr:class="h-4 w-4" />
            </button>
        </label>
    }
}

#[component]
fn LoginForm(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let loading = auth.is_loading_signal();

    let email = RwSignal::new(BrowserStorage::last_email().unwrap_or_default());
    let password = RwSignal::new(String::new());
    let revealed = RwSignal::new(false);
    let banner = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        banner.set(None);
        let password = password.get_untracked();
        let email = match validate_login(&email.get_untracked(), &password) {
            Ok(email) => email,
            Err(err) => {
                banner.set(Some(err.to_string()));
                return;
            }
        };
        spawn_local(async move {
            finish(auth.login(email, password).await, banner, open);
        });
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <ErrorBanner banner=banner />
            <div class="form-control">
                <label class="label" for="login-email">
                    <span class="label-text">"Email"</span>
                </label>
                <input
                    id="login-email"
                    type="email"
                    placeholder="Enter your email"
                    class="input input-bordered w-full"
                    disabled=move || loading.get()
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Password"</span>
                </label>
                <PasswordInput
                    value=password
                    placeholder="Enter your password"
                    disabled=loading
                    revealed=revealed
                />
            </div>
            <button type="submit" class="btn btn-primary w-full" disabled=move || loading.get()>
                {move || if loading.get() {
                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                } else {
                    "Log In".into_any()
                }}
            </button>
        </form>
    }
}

#[component]
fn RegisterForm(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let loading = auth.is_loading_signal();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let revealed = RwSignal::new(false);
    let banner = RwSignal::new(None::<String>);

    let mismatch = move || {
        let (password, confirm) = (password.get(), confirm.get());
        !password.is_empty() && !confirm.is_empty() && password != confirm
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        banner.set(None);
        let form = Registration {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: Some(confirm.get_untracked()),
        };
        if let Err(err) = validate_registration(&form) {
            banner.set(Some(err.to_string()));
            return;
        }
        spawn_local(async move {
            finish(auth.register(form).await, banner, open);
        });
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <ErrorBanner banner=banner />
            <div class="form-control">
                <label class="label" for="register-name">
                    <span class="label-text">"Full Name"</span>
                </label>
                <input
                    id="register-name"
                    type="text"
                    placeholder="Enter your full name"
                    class="input input-bordered w-full"
                    disabled=move || loading.get()
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label" for="register-email">
                    <span class="label-text">"Email"</span>
                </label>
                <input
                    id="register-email"
                    type="email"
                    placeholder="Enter your email"
                    class="input input-bordered w-full"
                    disabled=move || loading.get()
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </div>
            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Password"</span>
                </label>
                <PasswordInput
                    value=password
                    placeholder="Create a password (min 6 characters)"
                    disabled=loading
                    revealed=revealed
                />
            </div>
            <div class="form-control">
                <label class="label">
                    <span class="label-text">"Confirm Password"</span>
                </label>
                <PasswordInput
                    value=confirm
                    placeholder="Confirm your password"
                    disabled=loading
                    revealed=revealed
                />
                <Show when=mismatch>
                    <p class="text-sm text-error mt-1">"Passwords do not match"</p>
                </Show>
            </div>
            <button
                type="submit"
                class="btn btn-primary w-full"
                disabled=move || loading.get() || mismatch()
            >
                {move || if loading.get() {
                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                } else {
                    "Create Account".into_any()
                }}
            </button>
        </form>
    }
}

/// "Continue with Google", rendered by the Google Identity Services script.
#[component]
fn GoogleButton(client_id: String, open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let container = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |rendered: Option<bool>| {
        if rendered == Some(true) {
            return true;
        }
        let Some(el) = container.get() else {
            return false;
        };
        google::render_button(&el, &client_id, move |token| {
            spawn_local(async move {
                if auth.login_google(token).await.is_ok() {
                    open.set(false);
                }
            });
        })
    });

    view! {
        <div class="divider text-sm opacity-60">"or"</div>
        <div class="flex justify-center" node_ref=container></div>
    }
}

#[component]
pub fn AuthModal() -> impl IntoView {
    let modals = use_modals();
    let services = use_services();
    let open = modals.auth_open;
    let tab = modals.auth_tab;

    let tab_class = move |t: AuthTab| {
        if tab.get() == t { "tab tab-active" } else { "tab" }
    };

    view! {
        <Modal open=open title="Welcome to Listaria" class="max-w-md">
            <p class="text-center text-sm opacity-70 -mt-2 mb-4">
                "Create an account or log in to start buying and selling"
            </p>
            <div role="tablist" class="tabs tabs-boxed mb-4">
                <button role="tab" class=move || tab_class(AuthTab::Login) on:click=move |_| tab.set(AuthTab::Login)>
                    "Log In"
                </button>
                <button role="tab" class=move || tab_class(AuthTab::Register) on:click=move |_| tab.set(AuthTab::Register)>
                    "Register"
                </button>
            </div>
            <Show
                when=move || tab.get() == AuthTab::Login
                fallback=move || view! { <RegisterForm open=open /> }
            >
                <LoginForm open=open />
            </Show>
            {services
                .google_client_id()
                .map(|client_id| view! { <GoogleButton client_id=client_id open=open /> })}
        </Modal>
    }
}
