//! Image handling strategies.
//!
//! Newsletter platforms differ in what they accept: some take data URIs,
//! most want images uploaded separately. [`InlineImages`] embeds the bytes;
//! [`PlaceholderImages`] leaves numbered markers in the HTML and hands the
//! bytes back as [`ImageRecord`]s, numbered to match.

use super::fragment::RenderedFragment;
use super::options::ImageMode;
use super::style::{IMG_ALT, STYLE_IMG, STYLE_IMG_CONTAINER};
use crate::model::{extension_for_mime, ImageResource, ResourceTable};
use base64::Engine;
use serde::Serialize;
use std::collections::HashMap;

/// `src` of a placeholder `<img>`, to be replaced with the uploaded URL.
pub const PLACEHOLDER_SRC: &str = "請貼上圖片網址";

/// An image returned next to the HTML in placeholder mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// 1-based number shared with the placeholder in the HTML
    pub sequence_number: u32,

    /// Raw image bytes
    #[serde(skip_serializing)]
    pub data: Vec<u8>,

    /// MIME type
    pub mime_type: String,
}

impl ImageRecord {
    /// File extension, `jpg` for JPEG.
    pub fn extension(&self) -> String {
        extension_for_mime(&self.mime_type)
    }

    /// Suggested file name: `image_{n}.{ext}`.
    pub fn filename(&self) -> String {
        format!("image_{}.{}", self.sequence_number, self.extension())
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Turns image references into fragments.
pub trait ImageResolver {
    /// Render one reference. `None` when the resource does not exist.
    fn resolve(&mut self, resource_id: &str, resources: &ResourceTable)
        -> Option<RenderedFragment>;

    /// Images to return next to the HTML, after all references were resolved.
    fn finish(&mut self, resources: &ResourceTable) -> Vec<ImageRecord>;
}

/// Create the resolver for an image mode.
pub fn resolver_for(mode: ImageMode) -> Box<dyn ImageResolver + Send> {
    match mode {
        ImageMode::Inline => Box::new(InlineImages::new()),
        ImageMode::Placeholder => Box::new(PlaceholderImages::new()),
    }
}

/// Embeds images as base64 data URIs.
#[derive(Debug, Clone, Default)]
pub struct InlineImages;

impl InlineImages {
    /// Create an inline resolver.
    pub fn new() -> Self {
        Self
    }
}

impl ImageResolver for InlineImages {
    fn resolve(
        &mut self,
        resource_id: &str,
        resources: &ResourceTable,
    ) -> Option<RenderedFragment> {
        let Some(resource) = resources.get(resource_id) else {
            log::warn!("no image resource for reference {}", resource_id);
            return None;
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(&resource.data);
        Some(RenderedFragment::image(format!(
            r#"<div style="{STYLE_IMG_CONTAINER}"><img src="data:{};base64,{}" alt="{IMG_ALT}" style="{STYLE_IMG}"></div>"#,
            resource.mime_type, encoded
        )))
    }

    fn finish(&mut self, _resources: &ResourceTable) -> Vec<ImageRecord> {
        Vec::new()
    }
}

/// Emits numbered placeholder blocks and collects the images separately.
///
/// Numbers are per image: the first reference to an image takes the next
/// number and later references to it reuse that number, so placeholder `n`
/// always names `image_n`.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderImages {
    numbers: HashMap<String, u32>,
}

impl PlaceholderImages {
    /// Create a placeholder resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct images referenced so far.
    pub fn placeholder_count(&self) -> u32 {
        self.numbers.len() as u32
    }
}

/// Markup of placeholder `n`.
pub fn placeholder_markup(n: u32) -> String {
    format!(
        "<!-- ########## 請在此處插入第 {n} 張圖片 ########## -->\n\
         <!-- 步驟：(1)從下方下載圖片 (2)上傳到您的平台取得網址 (3)用網址替換掉下面的\"{PLACEHOLDER_SRC}\" -->\n\
         <img src=\"{PLACEHOLDER_SRC}\" alt=\"{IMG_ALT}\" style=\"{STYLE_IMG}\">\n\
         <!-- ########## 第 {n} 張圖片結束 ########## -->"
    )
}

impl ImageResolver for PlaceholderImages {
    fn resolve(
        &mut self,
        resource_id: &str,
        resources: &ResourceTable,
    ) -> Option<RenderedFragment> {
        if !resources.contains(resource_id) {
            log::warn!("no image resource for reference {}", resource_id);
            return None;
        }
        let next = self.numbers.len() as u32 + 1;
        let n = *self
            .numbers
            .entry(resource_id.to_string())
            .or_insert(next);
        Some(RenderedFragment::image(placeholder_markup(n)))
    }

    /// Every image in the table, once: first those referenced (numbered as
    /// their placeholders), then the rest in relationship order.
    fn finish(&mut self, resources: &ResourceTable) -> Vec<ImageRecord> {
        let mut referenced: Vec<(u32, &ImageResource)> = resources
            .iter()
            .filter_map(|r| self.numbers.get(&r.id).map(|&n| (n, r)))
            .collect();
        referenced.sort_by_key(|&(n, _)| n);

        let next = referenced.len() as u32 + 1;
        let unreferenced = resources
            .iter()
            .filter(|r| !self.numbers.contains_key(&r.id))
            .zip(next..)
            .map(|(r, n)| (n, r));

        referenced
            .into_iter()
            .chain(unreferenced)
            .map(|(n, resource)| ImageRecord {
                sequence_number: n,
                data: resource.data.clone(),
                mime_type: resource.mime_type.clone(),
            })
            .collect()
    }
}
