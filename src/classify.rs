//! Heading tier classification for single lines of text.
//!
//! Documents handed to the converter rarely carry reliable heading styles,
//! so structure is inferred from the text alone:
//!
//! 1. blank lines produce nothing
//! 2. the first non-blank line is the article title (H1)
//! 3. lines opening with a section marker (`一、`, `3.`, `(二)`, `第三章`) are H2
//! 4. short lines without closing punctuation are H3
//! 5. everything else is a body paragraph

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default character count below which an unpunctuated line is a subheading.
pub const DEFAULT_SHORT_LINE_THRESHOLD: usize = 35;

/// Characters that mark a line as a sentence rather than a subheading.
pub const DEFAULT_TERMINAL_PUNCTUATION: &[char] = &[
    '。', '．', '.', '，', ',', '？', '?', '！', '!', '；', ';', '：', ':', '）', ')', '”', '"',
    '」', '』', '’',
];

const SECTION_MARKER_PATTERN: &str = concat!(
    r"^(?:",
    r"[一二三四五六七八九十百零〇]+[、．.]",
    r"|\d+[.．]",
    r"|[(（][一二三四五六七八九十百零〇]+[)）]",
    r"|第[一二三四五六七八九十百零〇\d]+[章節节]",
    r")"
);

/// Structural tier of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingTier {
    /// Article title
    H1,
    /// Numbered section heading
    H2,
    /// Short unpunctuated subheading
    H3,
    /// Body text
    Paragraph,
    /// Blank line; renders nothing
    Blank,
}

impl HeadingTier {
    /// HTML tag for this tier, `None` for [`HeadingTier::Blank`].
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            HeadingTier::H1 => Some("h1"),
            HeadingTier::H2 => Some("h2"),
            HeadingTier::H3 => Some("h3"),
            HeadingTier::Paragraph => Some("p"),
            HeadingTier::Blank => None,
        }
    }

    /// Check if this tier is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, HeadingTier::H1 | HeadingTier::H2 | HeadingTier::H3)
    }
}

/// Tunable parts of the classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRules {
    /// Lines shorter than this (in characters) may be H3
    pub short_line_threshold: usize,

    /// A line ending in one of these is never H3
    pub terminal_punctuation: Vec<char>,
}

impl Default for HeadingRules {
    fn default() -> Self {
        Self {
            short_line_threshold: DEFAULT_SHORT_LINE_THRESHOLD,
            terminal_punctuation: DEFAULT_TERMINAL_PUNCTUATION.to_vec(),
        }
    }
}

impl HeadingRules {
    /// Create rules with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short-line threshold.
    pub fn with_short_line_threshold(mut self, threshold: usize) -> Self {
        self.short_line_threshold = threshold;
        self
    }

    /// Replace the terminal punctuation set.
    pub fn with_terminal_punctuation(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.terminal_punctuation = chars.into_iter().collect();
        self
    }
}

/// Classifies lines into heading tiers.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    rules: HeadingRules,
    section_marker: Regex,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(HeadingRules::default())
    }
}

impl HeadingClassifier {
    /// Create a classifier with the given rules.
    pub fn new(rules: HeadingRules) -> Self {
        Self {
            rules,
            section_marker: Regex::new(SECTION_MARKER_PATTERN)
                .expect("section marker pattern is valid"),
        }
    }

    /// The rules in use.
    pub fn rules(&self) -> &HeadingRules {
        &self.rules
    }

    /// Classify one line.
    ///
    /// `is_first_nonblank` must be true only for the first line of the
    /// document that has visible text.
    pub fn classify(&self, text: &str, is_first_nonblank: bool) -> HeadingTier {
        let text = text.trim();
        if text.is_empty() {
            return HeadingTier::Blank;
        }
        if is_first_nonblank {
            return HeadingTier::H1;
        }
        if self.section_marker.is_match(text) {
            return HeadingTier::H2;
        }
        if self.is_short_unpunctuated(text) {
            return HeadingTier::H3;
        }
        HeadingTier::Paragraph
    }

    fn is_short_unpunctuated(&self, text: &str) -> bool {
        text.chars().count() < self.rules.short_line_threshold
            && text
                .chars()
                .last()
                .is_some_and(|c| !self.rules.terminal_punctuation.contains(&c))
    }
}

/// Classify one line with the default rules.
///
/// # Example
/// ```
/// use enews::classify::{classify, HeadingTier};
///
/// assert_eq!(classify("一、前言", false), HeadingTier::H2);
/// assert_eq!(classify("結語", false), HeadingTier::H3);
/// assert_eq!(classify("   ", true), HeadingTier::Blank);
/// ```
pub fn classify(text: &str, is_first_nonblank: bool) -> HeadingTier {
    HeadingClassifier::default().classify(text, is_first_nonblank)
}
