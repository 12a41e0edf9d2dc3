//! Actions shared by several pages.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use crate::auth::{AuthContext, use_auth};
use crate::notify::{Toaster, use_toaster};
use crate::services::{AuthTab, ModalContext, ServicesContext, use_modals, use_services};

/// Favorite add/remove with the sign-in gate.
///
/// Build it during component setup; it is `Copy` and safe to move into
/// event handlers.
#[derive(Clone, Copy)]
pub struct FavoriteToggle {
    auth: AuthContext,
    modals: ModalContext,
    services: ServicesContext,
    toaster: Toaster,
}

impl FavoriteToggle {
    pub fn new() -> Self {
        Self {
            auth: use_auth(),
            modals: use_modals(),
            services: use_services(),
            toaster: use_toaster(),
        }
    }

    /// `false` while signed out, after opening the login dialog.
    pub fn require_sign_in(&self) -> bool {
        let signed_in = self.auth.state.with_untracked(|s| s.user.is_some());
        if !signed_in {
            self.modals.open_auth(AuthTab::Login);
        }
        signed_in
    }

    /// Flips `ad_id` away from `current`.
    ///
    /// `on_done` receives the state that holds afterwards: `!current` on
    /// success, `current` when the request failed.
    pub fn toggle(&self, ad_id: String, current: bool, on_done: impl FnOnce(bool) + 'static) {
        if !self.require_sign_in() {
            return;
        }
        let api = self.services.api();
        let toaster = self.toaster;
        spawn_local(async move {
            let result = if current {
                api.remove_favorite(&ad_id).await
            } else {
                api.add_favorite(&ad_id).await
            };
            match result {
                Ok(()) => {
                    if current {
                        toaster.success(
                            "Removed from favorites",
                            "Item removed from your favorites list.",
                        );
                    } else {
                        toaster.success("Added to favorites", "Item saved to your favorites list.");
                    }
                    on_done(!current);
                }
                Err(err) => {
                    debug!(ad_id = %ad_id, error = %err, "favorite toggle failed");
                    toaster.failure("Could not update favorites", &err);
                    on_done(current);
                }
            }
        });
    }
}

impl Default for FavoriteToggle {
    fn default() -> Self {
        Self::new()
    }
}
