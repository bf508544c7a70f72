//! Embedded image resources.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An image embedded in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    /// Relationship id, unique within the document (e.g. "rId7")
    pub id: String,

    /// Raw binary data
    #[serde(skip_serializing)]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/jpeg")
    pub mime_type: String,

    /// Part name inside the container, if known (e.g. "media/image1.png")
    pub filename: Option<String>,
}

impl ImageResource {
    /// Create a new image resource.
    pub fn new(id: impl Into<String>, data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data,
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    /// Create a PNG image resource.
    pub fn png(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(id, data, "image/png")
    }

    /// Create a JPEG image resource.
    pub fn jpeg(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(id, data, "image/jpeg")
    }

    /// Set filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Get the size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get the file extension based on MIME type.
    pub fn extension(&self) -> String {
        extension_for_mime(&self.mime_type)
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 8 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }

        // TIFF: 49 49 2A 00 (little-endian) or 4D 4D 00 2A (big-endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some("image/tiff");
        }

        // BMP: BM
        if data.starts_with(b"BM") {
            return Some("image/bmp");
        }

        // WEBP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some("image/webp");
        }

        // EMF: record type 1 followed by " EMF" signature at offset 40
        if data.len() >= 44 && data.starts_with(&[0x01, 0x00, 0x00, 0x00]) && &data[40..44] == b" EMF"
        {
            return Some("image/x-emf");
        }

        None
    }

    /// Guess a MIME type from a part name's extension.
    pub fn mime_from_path(path: &str) -> Option<&'static str> {
        let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "bmp" => Some("image/bmp"),
            "tif" | "tiff" => Some("image/tiff"),
            "webp" => Some("image/webp"),
            "svg" => Some("image/svg+xml"),
            "emf" => Some("image/x-emf"),
            "wmf" => Some("image/x-wmf"),
            _ => None,
        }
    }
}

/// File extension for a MIME type.
///
/// Well-known types map to their usual extension (`image/jpeg` → `jpg`);
/// anything else falls back to the MIME subtype, as in `image/x-emf` → `x-emf`.
pub fn extension_for_mime(mime_type: &str) -> String {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg".to_string(),
        "image/png" => "png".to_string(),
        "image/gif" => "gif".to_string(),
        "image/tiff" => "tiff".to_string(),
        "image/bmp" => "bmp".to_string(),
        "image/webp" => "webp".to_string(),
        "image/svg+xml" => "svg".to_string(),
        other => match other.rsplit('/').next() {
            Some(subtype) if !subtype.is_empty() && subtype != other => subtype.to_string(),
            _ => "bin".to_string(),
        },
    }
}

/// The document's image resources, in relationship order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceTable {
    images: Vec<ImageResource>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ResourceTable {
    /// Create an empty resource table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource. A later resource with the same id replaces the
    /// earlier one but keeps its position.
    pub fn insert(&mut self, resource: ImageResource) {
        if let Some(&pos) = self.index.get(&resource.id) {
            self.images[pos] = resource;
        } else {
            self.index.insert(resource.id.clone(), self.images.len());
            self.images.push(resource);
        }
    }

    /// Get a resource by id.
    pub fn get(&self, id: &str) -> Option<&ImageResource> {
        self.index.get(id).map(|&pos| &self.images[pos])
    }

    /// Check whether a resource with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate resources in relationship order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageResource> {
        self.images.iter()
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if there are no resources.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl FromIterator<ImageResource> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = ImageResource>>(iter: I) -> Self {
        let mut table = Self::new();
        for resource in iter {
            table.insert(resource);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_new() {
        let res = ImageResource::jpeg("rId1", vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(res.mime_type, "image/jpeg");
        assert_eq!(res.extension(), "jpg");
        assert_eq!(res.size(), 3);
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/x-emf"), "x-emf");
        assert_eq!(extension_for_mime("garbage"), "bin");
    }

    #[test]
    fn test_detect_mime_type() {
        let jpeg_data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(ImageResource::detect_mime_type(&jpeg_data), Some("image/jpeg"));

        let png_data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageResource::detect_mime_type(&png_data), Some("image/png"));

        let unknown = vec![0x00, 0x00, 0x00, 0x00];
        assert_eq!(ImageResource::detect_mime_type(&unknown), None);
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(ImageResource::mime_from_path("media/image1.JPEG"), Some("image/jpeg"));
        assert_eq!(ImageResource::mime_from_path("media/image2.png"), Some("image/png"));
        assert_eq!(ImageResource::mime_from_path("media/noext"), None);
    }

    #[test]
    fn test_resource_table_keeps_order() {
        let table: ResourceTable = vec![
            ImageResource::png("rId9", vec![1]),
            ImageResource::png("rId2", vec![2]),
            ImageResource::png("rId5", vec![3]),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = table.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rId9", "rId2", "rId5"]);
        assert_eq!(table.get("rId2").map(|r| r.data.clone()), Some(vec![2]));
        assert!(!table.contains("rId1"));
    }

    #[test]
    fn test_resource_table_replace_keeps_position() {
        let mut table = ResourceTable::new();
        table.insert(ImageResource::png("rId1", vec![1]));
        table.insert(ImageResource::png("rId2", vec![2]));
        table.insert(ImageResource::jpeg("rId1", vec![9]));

        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().map(|r| r.data.clone()), Some(vec![9]));
    }
}
