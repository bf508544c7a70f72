//! Fixed inline styles of the newsletter layout.
//!
//! Newsletter platforms strip `<style>` blocks, so every element carries its
//! own `style` attribute.

use crate::classify::HeadingTier;

/// Article title.
pub const STYLE_H1: &str = "font-size: 28px; font-weight: bold; line-height: 1.8; margin-bottom: 20px;";

/// Section heading.
pub const STYLE_H2: &str =
    "font-size: 22px; font-weight: bold; line-height: 2; margin-top: 25px; margin-bottom: 10px;";

/// Subheading.
pub const STYLE_H3: &str =
    "font-size: 20px; font-weight: bold; line-height: 2; margin-top: 20px; margin-bottom: 10px;";

/// Body paragraph.
pub const STYLE_P: &str = "font-size: 20px; line-height: 2; margin-bottom: 15px;";

/// `<img>` in both image modes.
pub const STYLE_IMG: &str = "display: block; margin-left: auto; margin-right: auto; max-width: 90%; height: auto; border-radius: 8px;";

/// `<div>` around an inline image.
pub const STYLE_IMG_CONTAINER: &str = "text-align: center; margin: 20px 0;";

/// Optional `<div>` around the whole body.
pub const STYLE_CONTAINER: &str = "max-width: 800px; margin: 0 auto; padding: 20px;";

/// Alt text of every article image.
pub const IMG_ALT: &str = "文章插圖";

/// Style for a text tier, `None` for [`HeadingTier::Blank`].
pub fn style_for(tier: HeadingTier) -> Option<&'static str> {
    match tier {
        HeadingTier::H1 => Some(STYLE_H1),
        HeadingTier::H2 => Some(STYLE_H2),
        HeadingTier::H3 => Some(STYLE_H3),
        HeadingTier::Paragraph => Some(STYLE_P),
        HeadingTier::Blank => None,
    }
}
