use listaria_shared::MAX_AD_IMAGES;
use uuid::Uuid;

use super::image::NormalizedImage;

/// A normalized photo paired with its preview URL.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    /// Stable key for keyed rendering.
    pub id: Uuid,
    pub image: NormalizedImage,
    pub preview: String,
}

impl GalleryImage {
    pub fn new(image: NormalizedImage, preview: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            image,
            preview,
        }
    }
}

/// What the photo grid renders. The encoded bytes stay in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub id: Uuid,
    pub preview: String,
    pub name: String,
}

/// Ordered photos of a draft, at most `MAX_AD_IMAGES`. Index 0 is the cover.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    items: Vec<GalleryImage>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch, then truncates to the cap.
    ///
    /// Returns the entries that did not fit so their previews can be released.
    pub fn append(&mut self, batch: Vec<GalleryImage>) -> Vec<GalleryImage> {
        self.items.extend(batch);
        if self.items.len() > MAX_AD_IMAGES {
            self.items.split_off(MAX_AD_IMAGES)
        } else {
            Vec::new()
        }
    }

    /// Removes entry `index`; later entries shift left by one.
    pub fn remove(&mut self, index: usize) -> Option<GalleryImage> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Option<GalleryImage> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.remove(index)
    }

    /// Moves entry `index` to the front, keeping the others in order.
    pub fn make_cover(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        let item = self.items.remove(index);
        self.items.insert(0, item);
        true
    }

    pub fn cover(&self) -> Option<&GalleryImage> {
        self.items.first()
    }

    pub fn items(&self) -> &[GalleryImage] {
        &self.items
    }

    /// Cover first, in display order.
    pub fn thumbnails(&self) -> Vec<Thumbnail> {
        self.items
            .iter()
            .map(|item| Thumbnail {
                id: item.id,
                preview: item.preview.clone(),
                name: item.image.name.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_AD_IMAGES
    }

    pub fn remaining(&self) -> usize {
        MAX_AD_IMAGES.saturating_sub(self.items.len())
    }

    /// Empties the gallery, handing back every entry.
    pub fn clear(&mut self) -> Vec<GalleryImage> {
        std::mem::take(&mut self.items)
    }

    pub fn into_items(self) -> Vec<GalleryImage> {
        self.items
    }
}
