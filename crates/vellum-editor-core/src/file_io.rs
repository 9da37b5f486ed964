//! File import and export, as plain data-in/data-out wrappers.
//!
//! The host owns the actual file picker and download mechanics; this module
//! only validates and converts.

/// Fixed filename for exported documents.
pub const DOWNLOAD_FILENAME: &str = "document.md";

/// Media type used for both import validation and export.
pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("`{name}` is not a markdown file")]
    UnsupportedFile { name: String },
    #[error("file is not valid UTF-8")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

/// Validate a user-selected file and decode it as the new buffer contents.
///
/// A file is accepted when its media type is `text/markdown` or its name
/// carries a markdown extension.
pub fn import_markdown(
    name: &str,
    media_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<String, ImportError> {
    let is_markdown = media_type == Some(MARKDOWN_MEDIA_TYPE)
        || name.ends_with(".md")
        || name.ends_with(".markdown");
    if !is_markdown {
        return Err(ImportError::UnsupportedFile {
            name: name.to_string(),
        });
    }
    let contents = String::from_utf8(bytes)?;
    tracing::debug!(file = name, bytes = contents.len(), "imported markdown file");
    Ok(contents)
}

/// An export payload for the host to hand to its download mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDownload {
    pub filename: &'static str,
    pub media_type: &'static str,
    pub contents: String,
}

pub fn export_markdown(contents: &str) -> MarkdownDownload {
    MarkdownDownload {
        filename: DOWNLOAD_FILENAME,
        media_type: MARKDOWN_MEDIA_TYPE,
        contents: contents.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_extensions_are_accepted() {
        assert!(import_markdown("notes.md", None, b"# hi".to_vec()).is_ok());
        assert!(import_markdown("notes.markdown", None, b"# hi".to_vec()).is_ok());
    }

    #[test]
    fn media_type_alone_is_enough() {
        let result = import_markdown("export", Some("text/markdown"), b"# hi".to_vec());
        assert_eq!(result.ok().as_deref(), Some("# hi"));
    }

    #[test]
    fn other_files_are_rejected() {
        let err = import_markdown("photo.png", Some("image/png"), vec![0xff]);
        assert!(matches!(err, Err(ImportError::UnsupportedFile { .. })));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = import_markdown("notes.md", None, vec![0xff, 0xfe]);
        assert!(matches!(err, Err(ImportError::InvalidEncoding(_))));
    }

    #[test]
    fn export_uses_the_fixed_filename_and_media_type() {
        let download = export_markdown("# doc");
        assert_eq!(download.filename, "document.md");
        assert_eq!(download.media_type, "text/markdown");
        assert_eq!(download.contents, "# doc");
    }
}
