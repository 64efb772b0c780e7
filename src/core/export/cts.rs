//! CTS catalog descriptors
//!
//! Every CTS directory carries a `__cts__.xml` describing its contents: the
//! data root describes the textgroup, each document directory describes its
//! work and edition.

use crate::domain::{CtsUrn, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Namespace of CTS catalog files
pub const CTS_NAMESPACE: &str = "http://chs.harvard.edu/xmlns/cts";

/// File name of a CTS catalog descriptor
pub const DESCRIPTOR_FILE: &str = "__cts__.xml";

/// Language of catalog labels written by this tool
const CATALOG_LANGUAGE: &str = "eng";

/// Textgroup descriptor written at the data root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGroupDescriptor {
    pub urn: CtsUrn,
    pub name: String,
}

impl TextGroupDescriptor {
    pub fn new(urn: CtsUrn, name: impl Into<String>) -> Self {
        Self {
            urn,
            name: name.into(),
        }
    }

    /// Serializes the descriptor
    ///
    /// # Examples
    ///
    /// ```
    /// use atf2cts::core::export::TextGroupDescriptor;
    /// use atf2cts::domain::CtsUrn;
    ///
    /// let group = TextGroupDescriptor::new(CtsUrn::new("urn:cts:cdli:test").unwrap(), "Tests");
    /// let xml = group.to_xml().unwrap();
    /// assert!(xml.contains(r#"urn="urn:cts:cdli:test""#));
    /// assert!(xml.contains(r#"<ti:groupname xml:lang="eng">Tests</ti:groupname>"#));
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = descriptor_writer()?;
        writer.write_event(Event::Start(
            BytesStart::new("ti:textgroup")
                .with_attributes([("xmlns:ti", CTS_NAMESPACE), ("urn", self.urn.as_str())]),
        ))?;
        writer
            .create_element("ti:groupname")
            .with_attribute(("xml:lang", CATALOG_LANGUAGE))
            .write_text_content(BytesText::new(&self.name))?;
        writer.write_event(Event::End(BytesEnd::new("ti:textgroup")))?;
        finish(writer)
    }
}

/// Work descriptor written next to each converted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDescriptor {
    pub group_urn: CtsUrn,
    pub urn: CtsUrn,
    pub language: String,
    pub title: String,
    pub label: String,
    pub description: String,
}

impl WorkDescriptor {
    /// URN of the single edition of this work
    pub fn edition_urn(&self) -> String {
        format!("{}.{}", self.urn, self.language)
    }

    /// Serializes the descriptor
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = descriptor_writer()?;
        writer.write_event(Event::Start(BytesStart::new("ti:work").with_attributes([
            ("xmlns:ti", CTS_NAMESPACE),
            ("groupUrn", self.group_urn.as_str()),
            ("urn", self.urn.as_str()),
            ("xml:lang", self.language.as_str()),
        ])))?;
        writer
            .create_element("ti:title")
            .with_attribute(("xml:lang", CATALOG_LANGUAGE))
            .write_text_content(BytesText::new(&self.title))?;

        let edition_urn = self.edition_urn();
        writer.write_event(Event::Start(
            BytesStart::new("ti:edition")
                .with_attributes([("workUrn", self.urn.as_str()), ("urn", edition_urn.as_str())]),
        ))?;
        writer
            .create_element("ti:label")
            .with_attribute(("xml:lang", CATALOG_LANGUAGE))
            .write_text_content(BytesText::new(&self.label))?;
        writer
            .create_element("ti:description")
            .with_attribute(("xml:lang", CATALOG_LANGUAGE))
            .write_text_content(BytesText::new(&self.description))?;
        writer.write_event(Event::End(BytesEnd::new("ti:edition")))?;
        writer.write_event(Event::End(BytesEnd::new("ti:work")))?;
        finish(writer)
    }
}

fn descriptor_writer() -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| {
        crate::domain::Atf2CtsError::Serialization(format!("Descriptor is not UTF-8: {}", e))
    })
}
