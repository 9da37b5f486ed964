//! vellum-editor-core: editor shell logic without framework dependencies.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `EditorRope` - ropey-backed implementation
//! - `EditorDocument` - buffer + view mode + revision counter
//! - File import/export wrappers and the static markdown guide

pub mod document;
pub mod file_io;
pub mod guide;
pub mod text;

pub use document::{DocumentStats, EditorDocument, ViewMode};
pub use file_io::{
    DOWNLOAD_FILENAME, ImportError, MARKDOWN_MEDIA_TYPE, MarkdownDownload, export_markdown,
    import_markdown,
};
pub use guide::{GUIDE_INTRO, GuideSection, PRO_TIPS, QUICK_REFERENCE, QuickRef, sections};
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
