//! Reactive wrapper around `SellWizard`.
//!
//! `WizardState` is `Copy` so every step component can take it as a prop.
//! It owns the side effects the pure wizard leaves out: decoding photos,
//! releasing preview URLs and publishing.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listaria_shared::{Ad, MAX_AD_IMAGES};
use tracing::debug;
use uuid::Uuid;
use web_sys::File;

use crate::error::AppError;
use crate::generation::ViewGeneration;
use crate::notify::Toaster;
use crate::services::ServicesContext;
use crate::wizard::{
    ContactInfo, GalleryImage, ImageCodec, ItemDetails, SellWizard, WizardStep, intake, publish,
};

#[derive(Clone, Copy)]
pub struct WizardState {
    pub wizard: RwSignal<SellWizard>,
    /// Why the last forward move was refused.
    pub error: RwSignal<Option<String>>,
    /// Photo batches still being decoded.
    pub pending_batches: RwSignal<u32>,
    pub publishing: RwSignal<bool>,
    generation: StoredValue<ViewGeneration>,
    services: ServicesContext,
    toaster: Toaster,
}

impl WizardState {
    pub fn new(services: ServicesContext, toaster: Toaster) -> Self {
        Self {
            wizard: RwSignal::new(SellWizard::new()),
            error: RwSignal::new(None),
            pending_batches: RwSignal::new(0),
            publishing: RwSignal::new(false),
            generation: StoredValue::new(ViewGeneration::new()),
            services,
            toaster,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.with(|w| w.step())
    }

    pub fn is_processing(&self) -> bool {
        self.pending_batches.get() > 0
    }

    fn release(&self, images: Vec<GalleryImage>) {
        let codec = self.services.codec();
        for image in images {
            codec.release_preview(&image.preview);
        }
    }

    // =========================================================
    // Navigation
    // =========================================================

    pub fn advance(&self) {
        let result = self.wizard.try_update(|w| w.advance());
        match result {
            Some(Err(err)) => self.error.set(Some(err.to_string())),
            Some(Ok(_)) => self.error.set(None),
            None => {}
        }
    }

    pub fn back(&self) {
        self.error.set(None);
        self.wizard.update(|w| {
            w.back();
        });
    }

    pub fn jump_back_to(&self, step: WizardStep) {
        self.error.set(None);
        self.wizard.update(|w| {
            w.jump_back_to(step);
        });
    }

    // =========================================================
    // Step data
    // =========================================================

    pub fn select_category(&self, id: &str) {
        self.error.set(None);
        self.wizard.update(|w| w.select_category(id));
    }

    pub fn select_subcategory(&self, name: &str) {
        if let Some(Err(err)) = self.wizard.try_update(|w| w.select_subcategory(name)) {
            self.error.set(Some(err.to_string()));
        } else {
            self.error.set(None);
        }
    }

    pub fn update_details(&self, f: impl FnOnce(&mut ItemDetails)) {
        self.wizard.update(|w| f(&mut w.draft_mut().details));
    }

    pub fn update_contact(&self, f: impl FnOnce(&mut ContactInfo)) {
        self.wizard.update(|w| f(&mut w.draft_mut().contact));
    }

    // =========================================================
    // Photos
    // =========================================================

    /// Decodes a picker or drop batch and appends what survives.
    pub fn add_files(&self, files: Vec<File>) {
        if files.is_empty() {
            return;
        }
        let full = self.wizard.with_untracked(|w| w.draft().photos.is_full());
        if full {
            self.toaster.error(
                "Too many photos",
                &format!("You can add up to {MAX_AD_IMAGES} photos."),
            );
            return;
        }

        let this = *self;
        let codec = self.services.codec();
        let ticket = self.generation.with_value(|g| g.ticket());
        self.pending_batches.update(|n| *n += 1);

        spawn_local(async move {
            let report = intake(&codec, &files).await;
            if !ticket.is_current() {
                debug!(count = report.accepted.len(), "wizard closed during intake");
                this.release(report.accepted);
                return;
            }
            this.pending_batches.update(|n| *n = n.saturating_sub(1));

            let overflow = this
                .wizard
                .try_update(|w| w.add_photos(report.accepted))
                .unwrap_or_default();
            if !overflow.is_empty() {
                this.toaster.info(
                    "Some photos were not added",
                    &format!("Only the first {MAX_AD_IMAGES} photos are kept."),
                );
                this.release(overflow);
            }
            if report.skipped > 0 {
                this.toaster.error(
                    "Unsupported file",
                    &format!("{} file(s) skipped: only images can be uploaded.", report.skipped),
                );
            }
            for failure in report.failures {
                this.toaster
                    .failure("Could not process photo", &AppError::from(failure));
            }
        });
    }

    pub fn remove_photo(&self, id: Uuid) {
        let removed = self
            .wizard
            .try_update(|w| w.draft_mut().photos.remove_by_id(id))
            .flatten();
        if let Some(image) = removed {
            self.release(vec![image]);
        }
    }

    pub fn make_cover(&self, id: Uuid) {
        self.wizard.update(|w| {
            let photos = &mut w.draft_mut().photos;
            if let Some(index) = photos.items().iter().position(|p| p.id == id) {
                photos.make_cover(index);
            }
        });
    }

    // =========================================================
    // Submit / teardown
    // =========================================================

    /// Validates every step, resets the wizard, then uploads and creates
    /// the ad. `on_published` runs only if the form is still open.
    pub fn submit(&self, on_published: impl FnOnce(Ad) + 'static) {
        if self.publishing.get_untracked() {
            return;
        }
        let submitted = match self.wizard.try_update(|w| w.submit(|ad| ad)) {
            Some(Ok(ad)) => ad,
            Some(Err(err)) => {
                self.error.set(Some(err.to_string()));
                return;
            }
            None => return,
        };
        self.error.set(None);
        self.publishing.set(true);

        let this = *self;
        let api = self.services.api();
        let codec = self.services.codec();
        let ticket = self.generation.with_value(|g| g.ticket());

        spawn_local(async move {
            let previews = submitted.previews();
            let result = publish(&api, submitted).await;
            for url in &previews {
                codec.release_preview(url);
            }

            match result {
                Ok(ad) => {
                    this.toaster.success(
                        "Ad published!",
                        "Your advertisement has been posted successfully.",
                    );
                    if ticket.is_current() {
                        this.publishing.set(false);
                        on_published(ad);
                    }
                }
                Err(err) => {
                    this.toaster.failure("Failed to post ad", &err);
                    if ticket.is_current() {
                        this.publishing.set(false);
                    }
                }
            }
        });
    }

    /// Drops the draft and stops pending work from touching it.
    pub fn dispose(&self) {
        if let Some(generation) = self.generation.try_get_value() {
            generation.invalidate();
        }
        if let Some(photos) = self.wizard.try_update(|w| w.cancel()) {
            self.release(photos);
        }
    }
}
