//! TEI rendering of parsed ATF documents
//!
//! A document is rendered in three steps: the edition pass (transliteration
//! with normalized sign markup), the translation pass (`@translation` blocks)
//! and a flush of inline `#tr.<lang>:` translations gathered during the
//! edition pass, one division per language.

use crate::adapters::atf::{ArtefactObject, Line, ParsedDocument, Section};
use crate::core::transform::normalize::normalize_transliteration;
use crate::domain::{CtsUrn, RenderError};
use once_cell::sync::Lazy;
use quick_xml::escape::{escape, partial_escape};
use regex::Regex;

/// Textgroup used when none is configured
pub const DEFAULT_TEXTGROUP_URN: &str = "urn:cts:cdli:test";

/// Language code CDLI uses for normalized transcriptions
const NORMALIZATION_LANGUAGE: &str = "ts";

static DOCUMENT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid document code regex"));

static LANGUAGE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("valid language tag regex")
});

/// Run-wide rendering settings
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Textgroup URN the document code is appended to
    pub textgroup_urn: String,
    /// Log every parsed document at info level
    pub verbose: bool,
}

impl RenderOptions {
    pub fn new(textgroup_urn: impl Into<String>, verbose: bool) -> Self {
        Self {
            textgroup_urn: textgroup_urn.into(),
            verbose,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TEXTGROUP_URN, false)
    }
}

/// Inline translations keyed by language, in discovery order
///
/// Both the languages and the entries within a language keep the order in
/// which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationBucket {
    languages: Vec<(String, Vec<(String, String)>)>,
}

impl TranslationBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `(label, text)` entry for `language`
    pub fn push(&mut self, language: &str, label: &str, text: &str) {
        let entry = (label.to_string(), text.to_string());
        match self.languages.iter_mut().find(|(lang, _)| lang == language) {
            Some((_, entries)) => entries.push(entry),
            None => self.languages.push((language.to_string(), vec![entry])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Iterates languages with their entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, String)])> {
        self.languages
            .iter()
            .map(|(lang, entries)| (lang.as_str(), entries.as_slice()))
    }
}

/// Renders a parsed document as a TEI XML string
///
/// # Errors
///
/// Returns a [`RenderError`] if the document code is empty or cannot be used
/// in a URN, if the textgroup is not a CTS URN, or if the declared language
/// is not a plain language tag.
///
/// # Examples
///
/// ```
/// use atf2cts::adapters::atf::{ArtefactObject, Line, ParsedDocument};
/// use atf2cts::core::transform::render::{render_document, RenderOptions};
///
/// let mut doc = ParsedDocument::new("P1", "A tablet");
/// doc.children.push(ArtefactObject::new("tablet").with(Line::new("1", ["lugal"])));
///
/// let xml = render_document(&doc, &RenderOptions::default()).unwrap();
/// assert!(xml.contains(r#"<text n="urn:cts:cdli:test.P1">"#));
/// assert!(xml.contains(r#"<l n="1">lugal</l>"#));
/// ```
pub fn render_document(
    doc: &ParsedDocument,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    validate(doc)?;

    if options.verbose {
        tracing::info!(code = %doc.code, description = %doc.description, "Parsed document");
    } else {
        tracing::debug!(code = %doc.code, description = %doc.description, "Parsed document");
    }

    let urn = CtsUrn::new(options.textgroup_urn.as_str())
        .and_then(|group| group.child(&doc.code))
        .map_err(RenderError::InvalidUrn)?;

    let mut tei = TeiWriter::new(doc.language.as_deref());
    tei.header(doc);

    match &doc.language {
        Some(lang) => tei.line(
            0,
            &format!(
                r#"<text n="{}" xml:lang="{}">"#,
                escape(urn.as_str()),
                escape(lang)
            ),
        ),
        None => tei.line(0, &format!(r#"<text n="{}">"#, escape(urn.as_str()))),
    }
    tei.line(0, "<body>");

    tei.line(1, r#"<div type="edition">"#);
    for object in &doc.children {
        tei.edition_object(object, 2);
    }
    tei.line(1, "</div>");

    tei.line(1, r#"<div type="translation">"#);
    for object in &doc.children {
        tei.translation_object(object, 2);
    }
    tei.line(1, "</div>");

    let bucket = std::mem::take(&mut tei.bucket);
    for (lang, entries) in bucket.iter() {
        tei.line(
            1,
            &format!(r#"<div type="translation" xml:lang="{}">"#, escape(lang)),
        );
        for (label, text) in entries {
            tei.line(
                2,
                &format!(r#"<l n="{}">{}</l>"#, escape(label), partial_escape(text)),
            );
        }
        tei.line(1, "</div>");
    }

    tei.line(0, "</body>");
    tei.line(0, "</text>");
    tei.line(0, "</TEI>");
    Ok(tei.out)
}

fn validate(doc: &ParsedDocument) -> Result<(), RenderError> {
    if doc.code.is_empty() {
        return Err(RenderError::MissingCode);
    }
    if !DOCUMENT_CODE.is_match(&doc.code) {
        return Err(RenderError::InvalidCode(doc.code.clone()));
    }
    if let Some(lang) = &doc.language {
        if !LANGUAGE_TAG.is_match(lang) {
            return Err(RenderError::InvalidLanguage(lang.clone()));
        }
    }
    Ok(())
}

fn has_translation(object: &ArtefactObject) -> bool {
    object.children.iter().any(|section| match section {
        Section::Translation(_) => true,
        Section::Object(child) => has_translation(child),
        _ => false,
    })
}

/// Makes text safe for an XML comment body
fn comment_safe(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    text
}

struct TeiWriter<'a> {
    out: String,
    language: Option<&'a str>,
    bucket: TranslationBucket,
}

impl<'a> TeiWriter<'a> {
    fn new(language: Option<&'a str>) -> Self {
        Self {
            out: String::new(),
            language,
            bucket: TranslationBucket::new(),
        }
    }

    fn line(&mut self, depth: usize, content: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(content);
        self.out.push('\n');
    }

    fn comment(&mut self, depth: usize, kind: &str, text: &str) {
        self.line(depth, &format!("<!-- {}: {} -->", kind, comment_safe(text)));
    }

    fn header(&mut self, doc: &ParsedDocument) {
        self.out.push_str(&format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0">

<teiHeader>
<fileDesc>
  <titleStmt>
    <title>{title}</title>
  </titleStmt>
  <publicationStmt>
    <p>Converted from ATF by atf2cts.</p>
  </publicationStmt>
  <sourceDesc>
    <idno type="CDLI">{code}</idno>
  </sourceDesc>
</fileDesc>
<encodingDesc>
  <refsDecl n="CTS">
    <cRefPattern n="line"
                 matchPattern="(\w+)\.(\w+)\.(\w+)"
                 replacementPattern="#xpath(/tei:TEI/tei:text/tei:body/tei:div/tei:div[@n='$1']/tei:div[@n='$2']/tei:l[@n='$3'])">
      <p>This pointer pattern extracts a specific line.</p>
    </cRefPattern>
    <cRefPattern n="surface"
                 matchPattern="(\w+)\.(\w+)"
                 replacementPattern="#xpath(/tei:TEI/tei:text/tei:body/tei:div/tei:div[@n='$1']/tei:div[@n='$2'])">
      <p>This pointer pattern extracts an inscribed surface.</p>
    </cRefPattern>
    <cRefPattern n="object"
                 matchPattern="(\w+)"
                 replacementPattern="#xpath(/tei:TEI/tei:text/tei:body/tei:div/tei:div[@n='$1'])">
      <p>This pointer pattern extracts a specific artefact,
         usually a tablet.</p>
    </cRefPattern>
  </refsDecl>
</encodingDesc>
</teiHeader>
"##,
            title = partial_escape(&doc.description),
            code = partial_escape(&doc.code),
        ));
    }

    fn open_textpart(&mut self, depth: usize, object: &ArtefactObject) {
        self.line(
            depth,
            &format!(
                r#"<div type="textpart" n="{}">"#,
                escape(&object.objecttype)
            ),
        );
    }

    fn edition_object(&mut self, object: &ArtefactObject, depth: usize) {
        self.open_textpart(depth, object);
        for section in &object.children {
            match section {
                Section::Object(child) => self.edition_object(child, depth + 1),
                Section::Line(line) => self.edition_line(line, depth + 1),
                // Rendered by the translation pass
                Section::Translation(_) => {}
                Section::State(state) => self.comment(depth + 1, section.kind_name(), &state.text),
                Section::Comment(comment) => {
                    self.comment(depth + 1, section.kind_name(), &comment.text)
                }
            }
        }
        self.line(depth, "</div>");
    }

    fn edition_line(&mut self, line: &Line, depth: usize) {
        self.line(
            depth,
            &format!(
                r#"<l n="{}">{}</l>"#,
                escape(&line.label),
                normalize_transliteration(&line.words)
            ),
        );
        for note in &line.notes {
            match note.inline_translation() {
                Some((lang, text)) => {
                    let lang = match (lang, self.language) {
                        (NORMALIZATION_LANGUAGE, Some(doc_lang)) => doc_lang,
                        _ => lang,
                    };
                    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                    self.bucket.push(lang, &line.label, &text);
                }
                None => self.comment(depth, "Note", &note.content),
            }
        }
    }

    fn translation_object(&mut self, object: &ArtefactObject, depth: usize) {
        self.open_textpart(depth, object);
        for section in &object.children {
            match section {
                Section::Translation(translation) => {
                    for child in &translation.children {
                        self.translation_section(child, depth + 1);
                    }
                }
                // Translations may also sit below a surface or column
                Section::Object(child) if has_translation(child) => {
                    self.translation_object(child, depth + 1)
                }
                _ => {}
            }
        }
        self.line(depth, "</div>");
    }

    fn translation_section(&mut self, section: &Section, depth: usize) {
        match section {
            Section::Object(object) => {
                self.open_textpart(depth, object);
                for child in &object.children {
                    self.translation_section(child, depth + 1);
                }
                self.line(depth, "</div>");
            }
            Section::Line(line) => self.line(
                depth,
                &format!(
                    r#"<l n="{}">{}</l>"#,
                    escape(&line.label),
                    partial_escape(&line.words.join(" "))
                ),
            ),
            Section::State(state) => self.comment(depth, section.kind_name(), &state.text),
            Section::Comment(comment) => self.comment(depth, section.kind_name(), &comment.text),
            Section::Translation(_) => {
                self.comment(depth, section.kind_name(), &section.to_string())
            }
        }
    }
}
