//! ATF to TEI transformation
//!
//! - [`normalize`] - Transliteration normalization (digraphs, sign markup)
//! - [`render`] - TEI rendering of a parsed ATF tree

pub mod normalize;
pub mod render;

pub use normalize::{normalize_transliteration, normalize_word};
pub use render::{render_document, RenderOptions, TranslationBucket, DEFAULT_TEXTGROUP_URN};
