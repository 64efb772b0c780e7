//! CTS directory writer
//!
//! Documents are placed at `<data_root>/<work segment>/<local part>.<lang>.xml`
//! next to a `__cts__.xml` work descriptor. Every file is written to a
//! temporary file in its target directory and renamed into place.

use crate::config::OutputConfig;
use crate::core::export::cts::{TextGroupDescriptor, WorkDescriptor, DESCRIPTOR_FILE};
use crate::domain::{
    Atf2CtsError, CtsUrn, DocumentMetadata, ExportError, RenderedDocument, Result,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Resolved on-disk location of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    /// Directory holding the document and its work descriptor
    pub dir: PathBuf,
    /// Path of the TEI file
    pub file: PathBuf,
    /// Language used in the file name
    pub language: String,
}

/// Writes converted documents and their descriptors under a data root
#[derive(Debug, Clone)]
pub struct OutputWriter {
    data_root: PathBuf,
    textgroup: CtsUrn,
    work_description: String,
    label_prefix: String,
    default_language: String,
}

impl OutputWriter {
    /// Creates a writer from the output configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the textgroup URN is invalid.
    pub fn new(config: &OutputConfig) -> Result<Self> {
        let textgroup = config.textgroup().map_err(Atf2CtsError::Configuration)?;
        Ok(Self {
            data_root: config.data_root.clone(),
            textgroup,
            work_description: config.work_description.clone(),
            label_prefix: config.label_prefix.clone(),
            default_language: config.default_language.clone(),
        })
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn textgroup(&self) -> &CtsUrn {
        &self.textgroup
    }

    /// Creates the data root and writes the textgroup descriptor
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the failing path.
    pub fn write_textgroup(&self, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_root)
            .map_err(|e| Atf2CtsError::io_at(&self.data_root, e))?;
        let descriptor = TextGroupDescriptor::new(self.textgroup.clone(), name);
        let path = self.data_root.join(DESCRIPTOR_FILE);
        write_atomic(&path, descriptor.to_xml()?.as_bytes())?;
        tracing::debug!(path = %path.display(), urn = %self.textgroup, "Wrote textgroup descriptor");
        Ok(path)
    }

    /// Computes where a document is written
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidUrn`] if the URN would not map to a
    /// single file name inside the data root.
    pub fn locate(&self, doc: &RenderedDocument) -> std::result::Result<DocumentLocation, ExportError> {
        let local = doc.urn.local_part();
        let segment = doc.urn.work_segment();
        let language = doc
            .language
            .clone()
            .unwrap_or_else(|| self.default_language.clone());

        if !is_path_safe(local) || !is_path_safe(segment) || !is_path_safe(&language) {
            return Err(ExportError::InvalidUrn(format!(
                "{} cannot be mapped to a file name",
                doc.urn
            )));
        }

        let dir = self.data_root.join(segment);
        let file = dir.join(format!("{}.{}.xml", local, language));
        Ok(DocumentLocation {
            dir,
            file,
            language,
        })
    }

    /// Builds the work descriptor for a document
    pub fn work_descriptor(&self, doc: &RenderedDocument, language: &str) -> WorkDescriptor {
        WorkDescriptor {
            group_urn: self.textgroup.clone(),
            urn: doc.urn.clone(),
            language: language.to_string(),
            title: doc.title.clone(),
            label: format!(
                "{} {} {}",
                self.label_prefix,
                doc.urn.work_segment(),
                doc.title
            ),
            description: self.work_description.clone(),
        }
    }

    /// Writes a document and its work descriptor
    ///
    /// # Errors
    ///
    /// Returns an I/O error naming the failing path. These are fatal to a run.
    pub fn write_document(
        &self,
        doc: &RenderedDocument,
        location: &DocumentLocation,
    ) -> Result<DocumentMetadata> {
        fs::create_dir_all(&location.dir).map_err(|e| Atf2CtsError::io_at(&location.dir, e))?;

        let work = self.work_descriptor(doc, &location.language);
        write_atomic(&location.dir.join(DESCRIPTOR_FILE), work.to_xml()?.as_bytes())?;
        write_atomic(&location.file, doc.xml.as_bytes())?;

        tracing::debug!(
            urn = %doc.urn,
            language = %location.language,
            path = %location.file.display(),
            "Wrote document"
        );

        Ok(DocumentMetadata {
            urn: doc.urn.clone(),
            language: location.language.clone(),
            title: doc.title.clone(),
            path: location.file.clone(),
        })
    }
}

fn is_path_safe(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains(['/', '\\', '\0'])
}

/// Writes `contents` to `path` through a temporary file in the same directory
///
/// # Errors
///
/// Returns an I/O error naming `path`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Atf2CtsError::io_at(dir, e))?;
    tmp.write_all(contents)
        .map_err(|e| Atf2CtsError::io_at(tmp.path(), e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| Atf2CtsError::io_at(tmp.path(), e))?;
    }

    tmp.persist(path)
        .map_err(|e| Atf2CtsError::io_at(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn writer(root: &Path) -> OutputWriter {
        let config = OutputConfig {
            data_root: root.to_path_buf(),
            ..OutputConfig::default()
        };
        OutputWriter::new(&config).unwrap()
    }

    fn document(language: Option<&str>) -> RenderedDocument {
        RenderedDocument {
            xml: "<TEI/>\n".to_string(),
            urn: CtsUrn::new("urn:cts:cdli:test.P100001").unwrap(),
            language: language.map(str::to_string),
            title: "Letter".to_string(),
        }
    }

    #[test]
    fn test_locate() {
        let dir = TempDir::new().unwrap();
        let writer = writer(dir.path());
        let location = writer.locate(&document(Some("akk"))).unwrap();
        assert_eq!(location.dir, dir.path().join("P100001"));
        assert_eq!(location.file, dir.path().join("P100001/test.P100001.akk.xml"));
        assert_eq!(location.language, "akk");
    }

    #[test]
    fn test_locate_uses_default_language() {
        let dir = TempDir::new().unwrap();
        let location = writer(dir.path()).locate(&document(None)).unwrap();
        assert_eq!(location.language, "und");
        assert!(location.file.ends_with("test.P100001.und.xml"));
    }

    #[test]
    fn test_locate_rejects_unsafe_language() {
        let dir = TempDir::new().unwrap();
        let result = writer(dir.path()).locate(&document(Some("../x")));
        assert!(matches!(result, Err(ExportError::InvalidUrn(_))));
    }

    #[test]
    fn test_work_descriptor_label() {
        let dir = TempDir::new().unwrap();
        let work = writer(dir.path()).work_descriptor(&document(None), "und");
        assert_eq!(work.label, "CDLI P100001 Letter");
        assert_eq!(work.description, "Test doc converted from atf.");
        assert_eq!(work.group_urn.as_str(), "urn:cts:cdli:test");
    }

    #[test]
    fn test_write_document_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let writer = writer(dir.path());
        let doc = document(Some("akk"));
        let location = writer.locate(&doc).unwrap();

        let first = writer.write_document(&doc, &location).unwrap();
        let xml = fs::read_to_string(&first.path).unwrap();
        let cts = fs::read_to_string(location.dir.join(DESCRIPTOR_FILE)).unwrap();

        let second = writer.write_document(&doc, &location).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second.path).unwrap(), xml);
        assert_eq!(fs::read_to_string(location.dir.join(DESCRIPTOR_FILE)).unwrap(), cts);
        assert_eq!(xml, "<TEI/>\n");

        let leftovers = fs::read_dir(&location.dir).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn test_write_textgroup() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested/root");
        let path = writer(&root).write_textgroup("atf2cts test examples").unwrap();
        assert_eq!(path, root.join(DESCRIPTOR_FILE));
        let xml = fs::read_to_string(path).unwrap();
        assert!(xml.contains("atf2cts test examples"));
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.xml");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_atomic_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/file.xml");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, Atf2CtsError::Io(_)));
    }
}
