//! The editor document: buffer, view mode, and the revision counter that
//! orders parse passes.

use vellum_renderer::{DiagramDispatcher, RenderedDocument, render_document};

use crate::text::{EditorRope, TextBuffer};

/// Which pane is showing. The editor opens in source mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Source,
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Source => Self::Preview,
            Self::Preview => Self::Source,
        }
    }
}

/// Status-bar numbers, recomputed from the buffer on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

/// A markdown document under edit.
///
/// Every mutation bumps `revision`, so each edit produces a strictly newer
/// parse pass; the preview reconciler uses submission order to supersede the
/// previous pass's in-flight diagram renders.
#[derive(Debug, Clone, Default)]
pub struct EditorDocument<T = EditorRope> {
    buffer: T,
    mode: ViewMode,
    revision: u64,
}

impl EditorDocument<EditorRope> {
    pub fn from_text(text: &str) -> Self {
        Self::new(EditorRope::from_str(text))
    }
}

impl<T: TextBuffer> EditorDocument<T> {
    pub fn new(buffer: T) -> Self {
        Self {
            buffer,
            mode: ViewMode::default(),
            revision: 0,
        }
    }

    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.contents()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Replace the whole buffer (file import, programmatic reset).
    pub fn set_text(&mut self, text: &str) {
        let len = self.buffer.len_chars();
        self.buffer.replace(0..len, text);
        self.bump();
    }

    pub fn insert(&mut self, char_offset: usize, text: &str) {
        self.buffer.insert(char_offset, text);
        self.bump();
    }

    pub fn delete(&mut self, char_range: std::ops::Range<usize>) {
        self.buffer.delete(char_range);
        self.bump();
    }

    pub fn replace(&mut self, char_range: std::ops::Range<usize>, text: &str) {
        self.buffer.replace(char_range, text);
        self.bump();
    }

    pub fn stats(&self) -> DocumentStats {
        let contents = self.buffer.contents();
        DocumentStats {
            characters: self.buffer.len_chars(),
            words: contents.split_whitespace().count(),
            lines: self.buffer.len_lines(),
        }
    }

    /// Run one parse pass over the current buffer.
    pub fn render_preview(&self, dispatcher: &DiagramDispatcher) -> RenderedDocument {
        tracing::debug!(revision = self.revision, "rendering preview pass");
        render_document(&self.buffer.contents(), dispatcher)
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_renderer::DispatcherConfig;

    #[test]
    fn every_edit_bumps_the_revision() {
        let mut doc = EditorDocument::from_text("hello");
        assert_eq!(doc.revision(), 0);
        doc.insert(5, " world");
        assert_eq!(doc.revision(), 1);
        doc.delete(0..1);
        assert_eq!(doc.revision(), 2);
        doc.set_text("fresh");
        assert_eq!(doc.revision(), 3);
        assert_eq!(doc.text(), "fresh");
    }

    #[test]
    fn mode_toggles_between_source_and_preview() {
        let mut doc = EditorDocument::from_text("");
        assert_eq!(doc.mode(), ViewMode::Source);
        doc.toggle_mode();
        assert_eq!(doc.mode(), ViewMode::Preview);
        doc.toggle_mode();
        assert_eq!(doc.mode(), ViewMode::Source);
    }

    #[test]
    fn stats_match_the_status_bar() {
        let doc = EditorDocument::from_text("one two three\nfour");
        let stats = doc.stats();
        assert_eq!(stats.characters, 18);
        assert_eq!(stats.words, 4);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn empty_document_has_zero_words() {
        let doc = EditorDocument::from_text("");
        let stats = doc.stats();
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn preview_pass_reflects_the_buffer() {
        let dispatcher = DiagramDispatcher::new(DispatcherConfig::single("mermaid"));
        let mut doc = EditorDocument::from_text("# Hi\n");
        let pass = doc.render_preview(&dispatcher);
        assert!(pass.html.contains("<h1>Hi</h1>"));
        assert!(pass.diagrams.is_empty());

        doc.set_text("```mermaid\ngraph TD; A-->B;\n```\n");
        let pass = doc.render_preview(&dispatcher);
        assert_eq!(pass.diagrams.len(), 1);
    }
}
