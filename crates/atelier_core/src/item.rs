//! Upload items and filename helpers.

/// Extensions recognized as images.
const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Extensions recognized as companion asset archives.
const ASSET_EXTENSIONS: [&str; 2] = ["zip", "sbsar"];

/// Classification of a submitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ItemKind {
    /// An image to be uploaded, thumbnailed and summarized
    #[display("image")]
    Image,
    /// A companion asset archive associated with an image by stem
    #[display("asset")]
    Asset,
}

/// A single user-submitted file: a name and its raw bytes.
///
/// Identity is the file name; the stem (name without extension) associates an
/// image with its same-named companion asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Original file name as submitted
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// Image or companion asset
    pub kind: ItemKind,
}

impl UploadItem {
    /// Classify a file by extension and wrap it as an upload item.
    ///
    /// Returns `None` for files that are neither images nor recognized
    /// companion archives.
    pub fn classify(name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let name = name.into();
        let ext = file_ext(&name).to_ascii_lowercase();
        let kind = if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            ItemKind::Image
        } else if ASSET_EXTENSIONS.contains(&ext.as_str()) {
            ItemKind::Asset
        } else {
            return None;
        };
        Some(Self { name, bytes, kind })
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }

    /// File extension without the leading dot.
    pub fn ext(&self) -> &str {
        file_ext(&self.name)
    }
}

/// Whether a file name carries an image extension.
pub fn is_image_name(name: &str) -> bool {
    let ext = file_ext(name).to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// File name without its final extension.
pub fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Final extension of a file name, without the leading dot.
///
/// Returns an empty string when the name has no extension.
pub fn file_ext(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        let img = UploadItem::classify("brick.JPG", vec![1]).unwrap();
        assert_eq!(img.kind, ItemKind::Image);
        let asset = UploadItem::classify("brick.sbsar", vec![2]).unwrap();
        assert_eq!(asset.kind, ItemKind::Asset);
        assert!(UploadItem::classify("notes.txt", vec![3]).is_none());
    }

    #[test]
    fn stem_and_ext_split() {
        assert_eq!(file_stem("brick_wall.png"), "brick_wall");
        assert_eq!(file_ext("brick_wall.png"), "png");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_ext("noext"), "");
        // hidden files keep their full name as the stem
        assert_eq!(file_stem(".env"), ".env");
        assert_eq!(file_ext(".env"), "");
    }

    #[test]
    fn image_name_check_is_case_insensitive() {
        assert!(is_image_name("a.JPeG"));
        assert!(!is_image_name("a.zip"));
    }
}
