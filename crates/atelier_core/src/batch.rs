//! Batch splitting: images in submission order plus stem-keyed companions.

use crate::{ItemKind, UploadItem};
use std::collections::HashMap;

/// A submitted batch, split into the images to process and the companion
/// assets they may reference.
///
/// Images keep submission order; companions are keyed by stem so an image
/// named `brick.png` picks up `brick.zip` or `brick.sbsar` from the same
/// batch. When two companions share a stem the later submission wins, which
/// mirrors how the files would land in a directory listing.
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    images: Vec<UploadItem>,
    companions: HashMap<String, UploadItem>,
}

impl UploadBatch {
    /// Split a list of classified items into a batch.
    pub fn new(items: Vec<UploadItem>) -> Self {
        let mut images = Vec::new();
        let mut companions = HashMap::new();
        for item in items {
            match item.kind {
                ItemKind::Image => images.push(item),
                ItemKind::Asset => {
                    companions.insert(item.stem().to_string(), item);
                }
            }
        }
        Self { images, companions }
    }

    /// Images in submission order.
    pub fn images(&self) -> &[UploadItem] {
        &self.images
    }

    /// Companion asset for a stem, if one was submitted.
    pub fn companion(&self, stem: &str) -> Option<&UploadItem> {
        self.companions.get(stem)
    }

    /// True when the batch holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> UploadItem {
        UploadItem::classify(name, vec![0]).unwrap()
    }

    #[test]
    fn splits_images_and_companions() {
        let batch = UploadBatch::new(vec![item("a.png"), item("a.zip"), item("b.jpg")]);
        assert_eq!(batch.images().len(), 2);
        assert!(batch.companion("a").is_some());
        assert!(batch.companion("b").is_none());
    }

    #[test]
    fn preserves_image_order() {
        let batch = UploadBatch::new(vec![item("z.png"), item("a.png")]);
        let names: Vec<_> = batch.images().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["z.png", "a.png"]);
    }
}
