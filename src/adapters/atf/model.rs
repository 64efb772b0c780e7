//! ATF parse tree
//!
//! These types are what an [`AtfParser`](super::AtfParser) hands to the
//! renderer. Sections are a closed sum type so each rendering pass is a single
//! exhaustive match.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Root of a parsed ATF record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Document identifier from the `&` header (e.g. `P123456`)
    pub code: String,
    /// Free-text description from the `&` header
    pub description: String,
    /// Language declared with `#atf: lang <code>`
    pub language: Option<String>,
    /// Project declared with `#project: <name>`
    pub project: Option<String>,
    /// Inscribed objects in document order
    pub children: Vec<ArtefactObject>,
}

impl ParsedDocument {
    /// Creates an empty document with the given header fields
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

/// An inscribed object, surface or column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactObject {
    /// Object label, e.g. `tablet`, `obverse`, `column 2`
    pub objecttype: String,
    /// Content in document order
    pub children: Vec<Section>,
}

impl ArtefactObject {
    /// Creates an empty object of the given type
    pub fn new(objecttype: impl Into<String>) -> Self {
        Self {
            objecttype: objecttype.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style append used when assembling trees by hand
    pub fn with(mut self, section: impl Into<Section>) -> Self {
        self.children.push(section.into());
        self
    }
}

/// Content of an object or translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// A nested object such as a surface or column
    Object(ArtefactObject),
    /// A numbered text line
    Line(Line),
    /// A translation block
    Translation(Translation),
    /// A `$` state line (breakage, rulings)
    State(State),
    /// A `#` comment
    Comment(Comment),
}

impl Section {
    /// Variant name used in diagnostic output
    pub fn kind_name(&self) -> &'static str {
        match self {
            Section::Object(_) => "ArtefactObject",
            Section::Line(_) => "Line",
            Section::Translation(_) => "Translation",
            Section::State(_) => "State",
            Section::Comment(_) => "Comment",
        }
    }
}

impl From<ArtefactObject> for Section {
    fn from(object: ArtefactObject) -> Self {
        Section::Object(object)
    }
}

impl From<Line> for Section {
    fn from(line: Line) -> Self {
        Section::Line(line)
    }
}

impl From<Translation> for Section {
    fn from(translation: Translation) -> Self {
        Section::Translation(translation)
    }
}

impl From<State> for Section {
    fn from(state: State) -> Self {
        Section::State(state)
    }
}

impl From<Comment> for Section {
    fn from(comment: Comment) -> Self {
        Section::Comment(comment)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Object(object) => write!(f, "@{}", object.objecttype),
            Section::Line(line) => write!(f, "{}. {}", line.label, line.words.join(" ")),
            Section::Translation(translation) => write!(
                f,
                "@translation {} {}",
                translation.style,
                translation.language.as_deref().unwrap_or("")
            ),
            Section::State(state) => write!(f, "$ {}", state.text),
            Section::Comment(comment) => write!(f, "# {}", comment.text),
        }
    }
}

/// A numbered line of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Position label, e.g. `1` or `3'`
    pub label: String,
    /// Whitespace-separated tokens
    pub words: Vec<String>,
    /// `#note:` and `#tr.<lang>:` attachments
    pub notes: Vec<Note>,
    /// `#lem:` lemmatization attachments
    pub lemmas: Vec<String>,
}

impl Line {
    /// Creates a line from a label and tokens
    pub fn new<I, S>(label: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            words: words.into_iter().map(Into::into).collect(),
            notes: Vec::new(),
            lemmas: Vec::new(),
        }
    }

    /// Builder-style note attachment
    pub fn with_note(mut self, content: impl Into<String>) -> Self {
        self.notes.push(Note::new(content));
        self
    }
}

/// Inline translation pattern: `tr.<lang>:<text>`
static INLINE_TRANSLATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^tr\.([A-Za-z][A-Za-z0-9-]*):(.*)$").expect("valid inline translation regex")
});

/// Free-text annotation attached to a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Note text; inline translations keep their `tr.<lang>:` prefix
    pub content: String,
}

impl Note {
    /// Creates a note
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Splits an inline translation note into `(language, text)`
    ///
    /// Returns `None` for notes that do not follow the `tr.<lang>:<text>`
    /// convention. The text is returned untrimmed.
    ///
    /// ```
    /// use atf2cts::adapters::atf::Note;
    ///
    /// let note = Note::new("tr.en: the king");
    /// assert_eq!(note.inline_translation(), Some(("en", " the king")));
    /// assert_eq!(Note::new("collated").inline_translation(), None);
    /// ```
    pub fn inline_translation(&self) -> Option<(&str, &str)> {
        let caps = INLINE_TRANSLATION.captures(&self.content)?;
        let lang = caps.get(1)?.as_str();
        let text = caps.get(2)?.as_str();
        Some((lang, text))
    }
}

/// A translation block opened by `@translation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translation language
    pub language: Option<String>,
    /// Translation style, e.g. `parallel` or `labeled`
    pub style: String,
    /// Surfaces and lines of the translation
    pub children: Vec<Section>,
}

impl Translation {
    /// Creates an empty translation block
    pub fn new(style: impl Into<String>, language: Option<String>) -> Self {
        Self {
            language,
            style: style.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style append used when assembling trees by hand
    pub fn with(mut self, section: impl Into<Section>) -> Self {
        self.children.push(section.into());
        self
    }
}

/// A `$` state line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub text: String,
}

impl State {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A `#` comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
