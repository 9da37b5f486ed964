//! vellum-renderer: the document render pipeline.
//!
//! Converts markdown source into themed preview HTML. Fenced code blocks run
//! through the `DiagramDispatcher`: recognized diagram languages become
//! placeholder containers whose content arrives asynchronously through
//! `DocumentPreview`; everything else renders as a literal listing. Math
//! renders to MathML inline, GFM extensions are on, and the theme layer
//! generates the stylesheet for both presentation modes.

pub mod css;
pub mod dispatch;
#[cfg(feature = "syntax-highlighting")]
pub mod highlight;
pub mod math;
pub mod preview;
pub mod theme;
mod writer;

pub use dispatch::{BlockNode, CodeBlockDescriptor, DiagramDispatcher, DispatcherConfig};
#[cfg(feature = "syntax-highlighting")]
pub use highlight::Highlighter;
pub use preview::{DocumentPreview, PassSummary, RenderPass, container_html};
pub use theme::PreviewTheme;
pub use writer::{PendingDiagram, RenderedDocument, document_options, render_document};
#[cfg(feature = "syntax-highlighting")]
pub use writer::render_document_highlighted;
