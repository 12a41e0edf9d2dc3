use listaria_shared::{Condition, CreateAdRequest, TITLE_MAX_CHARS, catalog};

use super::gallery::{Gallery, GalleryImage};
use crate::error::{FormField, ValidationError};
use crate::http::FilePart;

// =========================================================
// Steps
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    CategorySelect,
    Details,
    Photos,
    LocationContact,
    Submitted,
}

impl WizardStep {
    /// The four input steps, in order.
    pub const INPUT: [WizardStep; 4] = [
        WizardStep::CategorySelect,
        WizardStep::Details,
        WizardStep::Photos,
        WizardStep::LocationContact,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::CategorySelect => 0,
            WizardStep::Details => 1,
            WizardStep::Photos => 2,
            WizardStep::LocationContact => 3,
            WizardStep::Submitted => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::CategorySelect => "Select a Category",
            WizardStep::Details => "Add Item Details",
            WizardStep::Photos => "Upload Photos",
            WizardStep::LocationContact => "Location & Contact",
            WizardStep::Submitted => "Ad Posted",
        }
    }

    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CategorySelect => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Photos),
            WizardStep::Photos => Some(WizardStep::LocationContact),
            WizardStep::LocationContact | WizardStep::Submitted => None,
        }
    }

    fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CategorySelect | WizardStep::Submitted => None,
            WizardStep::Details => Some(WizardStep::CategorySelect),
            WizardStep::Photos => Some(WizardStep::Details),
            WizardStep::LocationContact => Some(WizardStep::Photos),
        }
    }
}

// =========================================================
// Per-step data
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChoice {
    pub category: String,
    pub subcategory: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDetails {
    pub title: String,
    pub description: String,
    /// Raw text of the price input.
    pub price: String,
    pub condition: Condition,
}

impl ItemDetails {
    /// Sets the title, keeping at most `TITLE_MAX_CHARS` characters.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.chars().take(TITLE_MAX_CHARS).collect();
    }

    pub fn parsed_price(&self) -> Result<f64, ValidationError> {
        parse_price(&self.price)
    }
}

/// Parses a price input. Thousands separators are accepted; negative and
/// non-numeric values are not.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing(FormField::Price));
    }
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidPrice),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInfo {
    pub location: String,
    pub phone: String,
    pub show_phone: bool,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            location: String::new(),
            phone: String::new(),
            show_phone: true,
        }
    }
}

fn require(value: &str, field: FormField) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

/// Everything collected so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdDraft {
    pub category: CategoryChoice,
    pub details: ItemDetails,
    pub photos: Gallery,
    pub contact: ContactInfo,
}

impl AdDraft {
    /// Whether the draft may leave `step` going forward.
    pub fn check(&self, step: WizardStep) -> Result<(), ValidationError> {
        match step {
            WizardStep::CategorySelect => {
                require(&self.category.category, FormField::Category)?;
                require(&self.category.subcategory, FormField::Subcategory)
            }
            WizardStep::Details => {
                require(&self.details.title, FormField::Title)?;
                require(&self.details.description, FormField::Description)?;
                self.details.parsed_price().map(|_| ())
            }
            WizardStep::Photos => {
                if self.photos.is_empty() {
                    Err(ValidationError::Missing(FormField::Images))
                } else {
                    Ok(())
                }
            }
            WizardStep::LocationContact => {
                require(&self.contact.location, FormField::Location)?;
                require(&self.contact.phone, FormField::Phone)
            }
            WizardStep::Submitted => Ok(()),
        }
    }

    pub fn can_leave(&self, step: WizardStep) -> bool {
        self.check(step).is_ok()
    }

    /// Checks every input step in order.
    pub fn check_all(&self) -> Result<(), ValidationError> {
        WizardStep::INPUT
            .iter()
            .try_for_each(|step| self.check(*step))
    }
}

// =========================================================
// Submission
// =========================================================

/// A completed draft handed to the submit callback.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedAd {
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub condition: Condition,
    /// Cover first.
    pub images: Vec<GalleryImage>,
    pub location: String,
    pub phone: String,
    pub show_phone: bool,
}

impl SubmittedAd {
    pub fn cover(&self) -> Option<&GalleryImage> {
        self.images.first()
    }

    pub fn upload_parts(&self) -> Vec<FilePart> {
        self.images.iter().map(|img| img.image.to_part()).collect()
    }

    pub fn previews(&self) -> Vec<String> {
        self.images.iter().map(|img| img.preview.clone()).collect()
    }

    /// Payload of `POST /ads`, with `image_urls` in gallery order.
    pub fn into_request(self, image_urls: Vec<String>) -> CreateAdRequest {
        CreateAdRequest {
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            subcategory: self.subcategory,
            condition: self.condition,
            images: image_urls,
            location: self.location,
            phone: self.phone,
            show_phone: self.show_phone,
        }
    }
}

// =========================================================
// Wizard
// =========================================================

/// Linear four-step form: category, details, photos, location/contact.
///
/// Forward moves are gated by `AdDraft::check`; backward moves never lose
/// data. `submit` is the only way into `Submitted` and resets the wizard
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct SellWizard {
    step: WizardStep,
    draft: AdDraft,
    submissions: u32,
}

impl SellWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &AdDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AdDraft {
        &mut self.draft
    }

    /// How many times this wizard reached `Submitted`.
    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    /// Moves to the next input step if the current one is complete.
    ///
    /// On `LocationContact` this is a no-op; use `submit`.
    pub fn advance(&mut self) -> Result<WizardStep, ValidationError> {
        self.draft.check(self.step)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Returns to an earlier step. Forward jumps are ignored.
    pub fn jump_back_to(&mut self, step: WizardStep) -> WizardStep {
        if step.index() < self.step.index() {
            self.step = step;
        }
        self.step
    }

    /// Picks a category; switching category clears the subcategory.
    pub fn select_category(&mut self, id: &str) {
        if self.draft.category.category != id {
            self.draft.category.subcategory.clear();
        }
        self.draft.category.category = id.to_string();
    }

    /// Picks a subcategory of the chosen category and moves on to details.
    pub fn select_subcategory(&mut self, name: &str) -> Result<WizardStep, ValidationError> {
        let known = catalog::find(&self.draft.category.category)
            .is_some_and(|category| category.has_subcategory(name));
        if !known {
            return Err(ValidationError::Missing(FormField::Subcategory));
        }
        self.draft.category.subcategory = name.to_string();
        self.advance()
    }

    /// Adds normalized photos; returns those beyond the cap.
    pub fn add_photos(&mut self, batch: Vec<GalleryImage>) -> Vec<GalleryImage> {
        self.draft.photos.append(batch)
    }

    /// Completes the walk: re-validates every step, enters `Submitted`,
    /// hands the draft to `on_submit` and resets.
    pub fn submit<R>(
        &mut self,
        on_submit: impl FnOnce(SubmittedAd) -> R,
    ) -> Result<R, ValidationError> {
        self.draft.check_all()?;
        let price = self.draft.details.parsed_price()?;

        self.step = WizardStep::Submitted;
        self.submissions += 1;

        let draft = std::mem::take(&mut self.draft);
        let submitted = SubmittedAd {
            category: draft.category.category,
            subcategory: draft.category.subcategory,
            title: draft.details.title.trim().to_string(),
            description: draft.details.description.trim().to_string(),
            price,
            condition: draft.details.condition,
            images: draft.photos.into_items(),
            location: draft.contact.location.trim().to_string(),
            phone: draft.contact.phone.trim().to_string(),
            show_phone: draft.contact.show_phone,
        };
        let result = on_submit(submitted);

        self.step = WizardStep::CategorySelect;
        Ok(result)
    }

    /// Discards the draft. Returns its photos so previews can be released.
    pub fn cancel(&mut self) -> Vec<GalleryImage> {
        let photos = self.draft.photos.clear();
        self.draft = AdDraft::default();
        self.step = WizardStep::CategorySelect;
        photos
    }
}
