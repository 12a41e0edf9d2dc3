use super::draft::{AdDraft, SubmittedAd};
use super::gallery::Gallery;
use super::image::{ImageSource, NormalizedImage};
use super::*;
use crate::api::MarketplaceApi;
use crate::error::{AppError, FormField, UploadError, ValidationError};
use crate::http::{HttpMethod, MockHttpClient};
use crate::session::SessionStore;
use async_trait::async_trait;
use listaria_shared::{Condition, MAX_AD_IMAGES};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// =========================================================
// Helpers
// =========================================================

struct FakeFile {
    name: String,
    mime: String,
    width: u32,
    height: u32,
    delay_ms: u64,
    corrupt: bool,
}

fn file(name: &str) -> FakeFile {
    FakeFile {
        name: name.to_string(),
        mime: "image/png".to_string(),
        width: 1600,
        height: 1200,
        delay_ms: 0,
        corrupt: false,
    }
}

impl ImageSource for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }
}

/// Codec that sleeps per file and records every decode.
#[derive(Default)]
struct ScriptedCodec {
    decoded: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl ImageCodec for ScriptedCodec {
    type Source = FakeFile;

    async fn normalize(&self, source: &FakeFile) -> Result<NormalizedImage, UploadError> {
        self.decoded.borrow_mut().push(source.name.clone());
        tokio::time::sleep(Duration::from_millis(source.delay_ms)).await;
        if source.corrupt {
            return Err(UploadError::new(&source.name, "could not decode image"));
        }
        let (width, height) = image::fit_within(source.width, source.height, image::MAX_DIMENSION);
        Ok(NormalizedImage {
            name: image::jpeg_name(&source.name),
            width,
            height,
            bytes: source.name.as_bytes().to_vec(),
        })
    }

    fn preview_url(&self, image: &NormalizedImage) -> Result<String, UploadError> {
        Ok(format!("blob:{}", image.name))
    }

    fn release_preview(&self, _url: &str) {}
}

fn photo(name: &str) -> GalleryImage {
    GalleryImage::new(
        NormalizedImage {
            name: name.to_string(),
            width: 800,
            height: 600,
            bytes: vec![1],
        },
        format!("blob:{name}"),
    )
}

fn photos(prefix: &str, count: usize) -> Vec<GalleryImage> {
    (0..count).map(|i| photo(&format!("{prefix}{i}"))).collect()
}

fn names(gallery: &Gallery) -> Vec<String> {
    gallery.items().iter().map(|g| g.image.name.clone()).collect()
}

fn wizard_at_details() -> SellWizard {
    let mut wizard = SellWizard::new();
    wizard.select_category("mobile");
    wizard.select_subcategory("Smartphones").unwrap();
    wizard
}

fn fill_details(wizard: &mut SellWizard) {
    let details = &mut wizard.draft_mut().details;
    details.set_title("iPhone 14 Pro Max");
    details.description = "Like new".into();
    details.price = "89999".into();
}

// =========================================================
// Step predicates
// =========================================================

#[test]
fn test_category_step_needs_both_selections() {
    let mut wizard = SellWizard::new();
    assert_eq!(
        wizard.advance(),
        Err(ValidationError::Missing(FormField::Category))
    );

    wizard.select_category("car");
    assert_eq!(
        wizard.advance(),
        Err(ValidationError::Missing(FormField::Subcategory))
    );
    assert_eq!(wizard.step(), WizardStep::CategorySelect);

    assert_eq!(wizard.select_subcategory("Cars"), Ok(WizardStep::Details));
}

#[test]
fn test_unknown_subcategory_is_rejected() {
    let mut wizard = SellWizard::new();
    wizard.select_category("car");
    assert!(wizard.select_subcategory("Smartphones").is_err());
    assert_eq!(wizard.step(), WizardStep::CategorySelect);
}

#[test]
fn test_switching_category_clears_subcategory() {
    let mut wizard = SellWizard::new();
    wizard.select_category("mobile");
    wizard.draft_mut().category.subcategory = "Tablets".into();

    wizard.select_category("mobile");
    assert_eq!(wizard.draft().category.subcategory, "Tablets");

    wizard.select_category("electronics");
    assert!(wizard.draft().category.subcategory.is_empty());
}

#[test]
fn test_details_rejected_when_any_field_missing() {
    let complete = ItemDetails {
        title: "iPhone 14 Pro Max".into(),
        description: "Like new".into(),
        price: "89999".into(),
        condition: Condition::LikeNew,
    };
    let cases = [
        (
            ItemDetails {
                title: String::new(),
                ..complete.clone()
            },
            FormField::Title,
        ),
        (
            ItemDetails {
                description: "  ".into(),
                ..complete.clone()
            },
            FormField::Description,
        ),
        (
            ItemDetails {
                price: String::new(),
                ..complete.clone()
            },
            FormField::Price,
        ),
    ];
    for (details, field) in cases {
        let draft = AdDraft {
            details,
            ..Default::default()
        };
        assert_eq!(
            draft.check(WizardStep::Details),
            Err(ValidationError::Missing(field))
        );
    }

    let draft = AdDraft {
        details: complete,
        ..Default::default()
    };
    assert!(draft.can_leave(WizardStep::Details));
}

#[test]
fn test_price_must_be_a_non_negative_number() {
    let mut details = ItemDetails {
        price: "abc".into(),
        ..Default::default()
    };
    assert_eq!(details.parsed_price(), Err(ValidationError::InvalidPrice));
    details.price = "-5".into();
    assert_eq!(details.parsed_price(), Err(ValidationError::InvalidPrice));
    details.price = "1,15,000".into();
    assert_eq!(details.parsed_price(), Ok(115000.0));
}

#[test]
fn test_title_is_truncated() {
    let mut details = ItemDetails::default();
    details.set_title(&"x".repeat(100));
    assert_eq!(details.title.chars().count(), listaria_shared::TITLE_MAX_CHARS);
}

#[test]
fn test_photos_step_needs_an_image() {
    let mut draft = AdDraft::default();
    assert_eq!(
        draft.check(WizardStep::Photos),
        Err(ValidationError::Missing(FormField::Images))
    );
    draft.photos.append(vec![photo("a")]);
    assert!(draft.can_leave(WizardStep::Photos));
}

#[test]
fn test_contact_defaults_show_phone() {
    let draft = AdDraft::default();
    assert!(draft.contact.show_phone);
    assert_eq!(draft.details.condition, Condition::Used);
}

#[test]
fn test_back_keeps_entered_data() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard);
    wizard.advance().unwrap();
    assert_eq!(wizard.step(), WizardStep::Photos);

    assert_eq!(wizard.back(), WizardStep::Details);
    assert_eq!(wizard.back(), WizardStep::CategorySelect);
    assert_eq!(wizard.back(), WizardStep::CategorySelect);
    assert_eq!(wizard.draft().details.title, "iPhone 14 Pro Max");
    assert_eq!(wizard.draft().category.subcategory, "Smartphones");
}

#[test]
fn test_jump_only_goes_backwards() {
    let mut wizard = wizard_at_details();
    assert_eq!(wizard.jump_back_to(WizardStep::LocationContact), WizardStep::Details);
    assert_eq!(wizard.jump_back_to(WizardStep::CategorySelect), WizardStep::CategorySelect);
}

// =========================================================
// Gallery
// =========================================================

#[test]
fn test_thumbnails_follow_gallery_order() {
    let mut gallery = Gallery::new();
    gallery.append(photos("p", 3));
    gallery.make_cover(2);

    let thumbs = gallery.thumbnails();

    let ids: Vec<_> = gallery.items().iter().map(|g| g.id).collect();
    assert_eq!(thumbs.iter().map(|t| t.id).collect::<Vec<_>>(), ids);
    assert_eq!(thumbs[0].name, "p2");
    assert_eq!(thumbs[0].preview, "blob:p2");
}

#[test]
fn test_append_to_full_gallery_stays_at_cap() {
    let mut gallery = Gallery::new();
    gallery.append(photos("old", MAX_AD_IMAGES));

    let dropped = gallery.append(photos("new", 3));

    assert_eq!(gallery.len(), MAX_AD_IMAGES);
    assert_eq!(dropped.len(), 3);
    assert!(names(&gallery).iter().all(|n| n.starts_with("old")));
}

#[test]
fn test_oversized_batch_keeps_earliest() {
    let mut gallery = Gallery::new();
    gallery.append(photos("old", 2));

    let dropped = gallery.append(photos("new", 15));

    let kept = names(&gallery);
    assert_eq!(kept.len(), MAX_AD_IMAGES);
    assert_eq!(&kept[..2], &["old0", "old1"]);
    assert_eq!(kept[2], "new0");
    assert_eq!(kept[11], "new9");
    assert_eq!(dropped.first().map(|d| d.image.name.as_str()), Some("new10"));
}

#[test]
fn test_remove_shifts_later_entries() {
    let mut gallery = Gallery::new();
    gallery.append(photos("p", 4));

    let removed = gallery.remove(1).unwrap();

    assert_eq!(removed.image.name, "p1");
    assert_eq!(removed.preview, "blob:p1");
    assert_eq!(names(&gallery), vec!["p0", "p2", "p3"]);
    assert!(gallery.items().iter().all(|g| g.preview == format!("blob:{}", g.image.name)));
    assert!(gallery.remove(9).is_none());
}

#[test]
fn test_removing_cover_promotes_next() {
    let mut gallery = Gallery::new();
    gallery.append(photos("p", 3));

    gallery.remove(0);

    assert_eq!(gallery.cover().map(|c| c.image.name.as_str()), Some("p1"));
}

#[test]
fn test_make_cover_moves_entry_to_front() {
    let mut gallery = Gallery::new();
    gallery.append(photos("p", 4));

    assert!(gallery.make_cover(2));
    assert_eq!(names(&gallery), vec!["p2", "p0", "p1", "p3"]);
    assert!(!gallery.make_cover(0));
    assert!(!gallery.make_cover(4));

    let id = gallery.items()[3].id;
    assert_eq!(gallery.remove_by_id(id).map(|g| g.image.name), Some("p3".to_string()));
}

// =========================================================
// Intake
// =========================================================

#[tokio::test]
async fn test_intake_keeps_input_order_when_finishing_out_of_order() {
    let codec = ScriptedCodec::default();
    let files = vec![
        FakeFile {
            delay_ms: 30,
            ..file("a.png")
        },
        FakeFile {
            delay_ms: 10,
            ..file("b.png")
        },
        FakeFile {
            delay_ms: 0,
            ..file("c.png")
        },
    ];

    let report = intake(&codec, &files).await;

    let accepted: Vec<_> = report.accepted.iter().map(|g| g.image.name.as_str()).collect();
    assert_eq!(accepted, vec!["a.jpg", "b.jpg", "c.jpg"]);
    assert!(report.accepted.iter().all(|g| g.image.width == 800 && g.image.height == 600));
}

#[tokio::test]
async fn test_intake_failure_does_not_block_others() {
    let codec = ScriptedCodec::default();
    let files = vec![
        file("a.png"),
        FakeFile {
            corrupt: true,
            ..file("broken.png")
        },
        file("c.png"),
    ];

    let report = intake(&codec, &files).await;

    assert_eq!(report.accepted.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "broken.png");
}

#[tokio::test]
async fn test_non_images_skipped_before_decode() {
    let codec = ScriptedCodec::default();
    let files = vec![
        FakeFile {
            mime: "application/pdf".into(),
            ..file("invoice.pdf")
        },
        file("a.png"),
    ];

    let report = intake(&codec, &files).await;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.accepted.len(), 1);
    assert_eq!(*codec.decoded.borrow(), vec!["a.png"]);
}

// =========================================================
// Full walk & publishing
// =========================================================

#[tokio::test]
async fn test_full_walk_submits_once_with_first_upload_as_cover() {
    let codec = ScriptedCodec::default();
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard);
    assert_eq!(wizard.advance(), Ok(WizardStep::Photos));

    let report = intake(&codec, &[file("front.png")]).await;
    assert!(wizard.add_photos(report.accepted).is_empty());
    assert_eq!(wizard.advance(), Ok(WizardStep::LocationContact));

    let contact = &mut wizard.draft_mut().contact;
    contact.location = "Mumbai, Maharashtra".into();
    contact.phone = "9876543210".into();

    let mut received = Vec::new();
    wizard.submit(|ad| received.push(ad)).unwrap();

    assert_eq!(received.len(), 1);
    assert_eq!(wizard.submissions(), 1);
    let ad = &received[0];
    assert_eq!(ad.cover().map(|c| c.image.name.as_str()), Some("front.jpg"));
    assert_eq!(ad.price, 89999.0);
    assert_eq!(ad.title, "iPhone 14 Pro Max");
    assert!(ad.show_phone);

    // Reset to the initial state; a second submit is rejected.
    assert_eq!(wizard.step(), WizardStep::CategorySelect);
    assert!(wizard.draft().photos.is_empty());
    assert!(wizard.submit(|_| ()).is_err());
    assert_eq!(wizard.submissions(), 1);
}

#[test]
fn test_submit_requires_contact() {
    let mut wizard = wizard_at_details();
    fill_details(&mut wizard);
    wizard.advance().unwrap();
    wizard.add_photos(vec![photo("a")]);
    wizard.advance().unwrap();

    let err = wizard.submit(|_| ()).unwrap_err();
    assert_eq!(err, ValidationError::Missing(FormField::Location));
    assert_eq!(wizard.step(), WizardStep::LocationContact);
    assert_eq!(wizard.submissions(), 0);
}

#[test]
fn test_cancel_returns_photos_and_resets() {
    let mut wizard = wizard_at_details();
    wizard.add_photos(photos("p", 2));

    let discarded = wizard.cancel();

    assert_eq!(discarded.len(), 2);
    assert_eq!(wizard.step(), WizardStep::CategorySelect);
    assert_eq!(*wizard.draft(), AdDraft::default());
}

fn submitted(images: Vec<GalleryImage>) -> SubmittedAd {
    SubmittedAd {
        category: "mobile".into(),
        subcategory: "Smartphones".into(),
        title: "iPhone 14 Pro Max".into(),
        description: "Like new".into(),
        price: 89999.0,
        condition: Condition::LikeNew,
        images,
        location: "Mumbai, Maharashtra".into(),
        phone: "9876543210".into(),
        show_phone: false,
    }
}

const BASE: &str = "/api";

#[tokio::test]
async fn test_publish_uploads_then_creates_with_urls_in_order() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(
        HttpMethod::Post,
        "/api/upload",
        200,
        json!({"urls": ["https://cdn/cover.jpg", "https://cdn/side.jpg"]}),
    );
    mock.mock_response(
        HttpMethod::Post,
        "/api/ads",
        201,
        json!({
            "_id": "new-ad",
            "title": "iPhone 14 Pro Max",
            "price": 89999,
            "category": "mobile",
            "images": ["https://cdn/cover.jpg", "https://cdn/side.jpg"],
            "createdAt": "2026-10-17T08:00:00Z",
            "updatedAt": "2026-10-17T08:00:00Z"
        }),
    );
    let api = MarketplaceApi::new(mock.clone(), BASE, SessionStore::new());

    let ad = publish(&api, submitted(vec![photo("cover"), photo("side")]))
        .await
        .unwrap();

    assert_eq!(ad.id, "new-ad");
    assert_eq!(mock.calls(), vec!["POST /api/upload", "POST /api/ads"]);
    let Some(crate::http::HttpBody::Json(body)) = mock.last_request().unwrap().body else {
        panic!("expected json body");
    };
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["images"], json!(["https://cdn/cover.jpg", "https://cdn/side.jpg"]));
    assert_eq!(body["showPhone"], false);
}

#[tokio::test]
async fn test_upload_failure_prevents_ad_creation() {
    let mock = Rc::new(MockHttpClient::new());
    mock.mock_response(HttpMethod::Post, "/api/upload", 500, json!({"error": "disk full"}));
    let api = MarketplaceApi::new(mock.clone(), BASE, SessionStore::new());

    let err = publish(&api, submitted(vec![photo("cover")])).await.unwrap_err();

    assert!(matches!(err, AppError::Upload(_)));
    assert_eq!(mock.calls(), vec!["POST /api/upload"]);
}
