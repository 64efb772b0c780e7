//! Metadata extraction from rendered TEI
//!
//! The rendered string is re-parsed before anything is written. This doubles
//! as the well-formedness check: a document that does not parse, or does not
//! carry exactly one `<text>` with a CTS URN, is never written.

use crate::domain::{CtsUrn, ExportError, RenderedDocument};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parses `xml` and extracts the URN, language and title
///
/// # Errors
///
/// Returns an [`ExportError`] if the XML is ill-formed, does not contain
/// exactly one `<text>` element, or that element lacks a valid `n` URN.
///
/// # Examples
///
/// ```
/// use atf2cts::core::export::extract_metadata;
///
/// let xml = r#"<TEI><teiHeader><title>Letter</title></teiHeader>
///     <text n="urn:cts:cdli:test.P1" xml:lang="akk"/></TEI>"#;
/// let doc = extract_metadata(xml).unwrap();
/// assert_eq!(doc.urn.local_part(), "test.P1");
/// assert_eq!(doc.language.as_deref(), Some("akk"));
/// assert_eq!(doc.title, "Letter");
/// ```
pub fn extract_metadata(xml: &str) -> Result<RenderedDocument, ExportError> {
    let (urn, language, title) = {
        let dom = roxmltree::Document::parse(xml)
            .map_err(|e| ExportError::MalformedXml(e.to_string()))?;

        let texts: Vec<_> = dom
            .descendants()
            .filter(|node| node.is_element() && node.has_tag_name("text"))
            .collect();
        if texts.len() != 1 {
            return Err(ExportError::TextElementCount(texts.len()));
        }
        let text = texts[0];

        let n = text
            .attribute("n")
            .ok_or(ExportError::MissingAttribute("n"))?;
        let urn = CtsUrn::new(n).map_err(ExportError::InvalidUrn)?;

        let language = text
            .attribute((XML_NAMESPACE, "lang"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string);

        let title = dom
            .descendants()
            .find(|node| node.is_element() && node.has_tag_name("title"))
            .and_then(|node| node.text())
            .map(str::to_string)
            .unwrap_or_default();

        (urn, language, title)
    };

    Ok(RenderedDocument {
        xml: xml.to_string(),
        urn,
        language,
        title,
    })
}
