//! Line-oriented parser for CDLI-flavoured ATF
//!
//! Recognises the text header, `#atf:`/`#project:` protocols, object, surface
//! and column directives, numbered and continuation lines, `$` state lines,
//! `#` comments, line attachments (`#note:`, `#tr.<lang>:`, `#lem:`) and
//! `@translation` blocks. Anything else is a [`ParseError`].

use super::model::{ArtefactObject, Comment, Line, Note, ParsedDocument, Section, State, Translation};
use crate::domain::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^&([^\s=]+)\s*=\s*(.*)$").expect("valid header regex"));

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\s.]+)\.\s*(.*)$").expect("valid line regex"));

/// Object type used when content appears before any object directive
const IMPLICIT_OBJECT: &str = "tablet";

/// Parses one ATF record into a document tree
pub fn parse_atf(text: &str) -> Result<ParsedDocument, ParseError> {
    let mut builder = TreeBuilder::default();
    let mut header_seen = false;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        if !header_seen {
            builder.read_header(line, number)?;
            header_seen = true;
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            let last = builder
                .last_line_mut()
                .ok_or(ParseError::OrphanContinuation { line: number })?;
            last.words.extend(line.split_whitespace().map(str::to_string));
            continue;
        }

        match line.chars().next() {
            Some('&') => return Err(ParseError::DuplicateHeader { line: number }),
            Some('@') => builder.directive(&line[1..], number)?,
            Some('$') => builder.push(Section::State(State::new(line[1..].trim()))),
            Some('#') => builder.hash_line(&line[1..], number)?,
            _ if line.starts_with(">>") || line.starts_with("<<") || line.starts_with("||") => {
                // Cross-text links carry nothing the TEI output uses.
            }
            _ => {
                let caps = NUMBERED_LINE
                    .captures(line)
                    .ok_or_else(|| ParseError::UnrecognizedLine {
                        line: number,
                        text: line.to_string(),
                    })?;
                let label = &caps[1];
                let words = caps[2].split_whitespace();
                builder.push(Section::Line(Line::new(label, words)));
            }
        }
    }

    if !header_seen {
        return Err(ParseError::MissingHeader);
    }
    Ok(builder.finish())
}

/// Incrementally assembles the tree, keeping the open containers
/// (object > translation > surface > column) as separate slots.
#[derive(Default)]
struct TreeBuilder {
    doc: ParsedDocument,
    object: Option<ArtefactObject>,
    translation: Option<Translation>,
    surface: Option<ArtefactObject>,
    column: Option<ArtefactObject>,
}

impl TreeBuilder {
    fn read_header(&mut self, line: &str, number: usize) -> Result<(), ParseError> {
        if !line.starts_with('&') {
            return Err(ParseError::MissingHeader);
        }
        let caps = HEADER.captures(line).ok_or_else(|| ParseError::MalformedHeader {
            line: number,
            text: line.to_string(),
        })?;
        self.doc.code = caps[1].to_string();
        self.doc.description = caps[2].trim().to_string();
        Ok(())
    }

    fn directive(&mut self, body: &str, number: usize) -> Result<(), ParseError> {
        let body = body.trim();
        let (name, arg) = match body.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (body, ""),
        };
        let labelled = |name: &str| {
            if arg.is_empty() {
                name.to_string()
            } else {
                format!("{name} {arg}")
            }
        };

        match name {
            "tablet" | "envelope" | "prism" | "bulla" | "fragment" | "object" => {
                self.close_object();
                self.object = Some(ArtefactObject::new(labelled(name)));
            }
            "obverse" | "reverse" | "left" | "right" | "top" | "bottom" | "edge" | "face"
            | "surface" | "seal" => {
                self.close_surface();
                self.surface = Some(ArtefactObject::new(labelled(name)));
            }
            "column" => {
                self.close_column();
                self.column = Some(ArtefactObject::new(labelled(name)));
            }
            "translation" => {
                let mut args = arg.split_whitespace();
                let style = args.next().unwrap_or("parallel");
                let language = args
                    .next()
                    .ok_or(ParseError::TranslationWithoutLanguage { line: number })?;
                self.close_translation();
                if self.object.is_none() {
                    self.object = Some(ArtefactObject::new(IMPLICIT_OBJECT));
                }
                self.translation = Some(Translation::new(style, Some(language.to_string())));
            }
            _ => {
                return Err(ParseError::UnknownDirective {
                    line: number,
                    directive: name.to_string(),
                })
            }
        }
        Ok(())
    }

    fn hash_line(&mut self, body: &str, number: usize) -> Result<(), ParseError> {
        if let Some(rest) = body.strip_prefix("atf:") {
            let mut args = rest.split_whitespace();
            if args.next() == Some("lang") {
                self.doc.language = args.next().map(str::to_string);
            }
            return Ok(());
        }
        if let Some(rest) = body.strip_prefix("project:") {
            self.doc.project = Some(rest.trim().to_string());
            return Ok(());
        }
        if body.starts_with("link:") {
            return Ok(());
        }
        if let Some(rest) = body.strip_prefix("lem:") {
            let last = self
                .last_line_mut()
                .ok_or(ParseError::OrphanNote { line: number })?;
            last.lemmas.push(rest.trim().to_string());
            return Ok(());
        }
        if let Some(rest) = body.strip_prefix("note:") {
            let last = self
                .last_line_mut()
                .ok_or(ParseError::OrphanNote { line: number })?;
            last.notes.push(Note::new(rest.trim()));
            return Ok(());
        }
        if body.starts_with("tr.") {
            let last = self
                .last_line_mut()
                .ok_or(ParseError::OrphanNote { line: number })?;
            last.notes.push(Note::new(body.trim()));
            return Ok(());
        }

        self.push(Section::Comment(Comment::new(body.trim())));
        Ok(())
    }

    /// Children of the innermost open container
    fn current_children(&mut self) -> &mut Vec<Section> {
        match (&mut self.column, &mut self.surface, &mut self.translation) {
            (Some(column), _, _) => &mut column.children,
            (None, Some(surface), _) => &mut surface.children,
            (None, None, Some(translation)) => &mut translation.children,
            (None, None, None) => {
                &mut self
                    .object
                    .get_or_insert_with(|| ArtefactObject::new(IMPLICIT_OBJECT))
                    .children
            }
        }
    }

    fn push(&mut self, section: Section) {
        self.current_children().push(section);
    }

    /// Most recent text line in the innermost open container
    fn last_line_mut(&mut self) -> Option<&mut Line> {
        self.current_children()
            .iter_mut()
            .rev()
            .find_map(|section| match section {
                Section::Line(line) => Some(line),
                _ => None,
            })
    }

    fn close_column(&mut self) {
        if let Some(column) = self.column.take() {
            self.push(Section::Object(column));
        }
    }

    fn close_surface(&mut self) {
        self.close_column();
        if let Some(surface) = self.surface.take() {
            self.push(Section::Object(surface));
        }
    }

    fn close_translation(&mut self) {
        self.close_surface();
        if let Some(translation) = self.translation.take() {
            self.push(Section::Translation(translation));
        }
    }

    fn close_object(&mut self) {
        self.close_translation();
        if let Some(object) = self.object.take() {
            self.doc.children.push(object);
        }
    }

    fn finish(mut self) -> ParsedDocument {
        self.close_object();
        self.doc
    }
}
