//! vellum-diagram: asynchronous diagram rendering for the preview pipeline.
//!
//! This crate owns the boundary between the document pipeline and an external
//! diagram-rendering engine:
//! - `DiagramRequest` / `DiagramResult` - the render invocation model
//! - `DiagramEngine` - the engine trait, implemented by the host binding
//! - `DiagramRenderer` - theme resolution, engine configuration, and error
//!   containment around a single render call
//! - `DiagramContainer` - the latest-wins guard that keeps a superseded
//!   render from overwriting newer content

pub mod container;
pub mod engine;
pub mod renderer;
pub mod theme;

pub use container::{ApplyOutcome, ContainerState, DiagramContainer, RenderTicket};
pub use engine::{DiagramEngine, EngineError, EngineOptions, EngineTheme, Typography};
pub use renderer::DiagramRenderer;
pub use theme::{AmbientFlag, DiagramPalette, ThemeMode, ThemeProvider};

use smol_str::SmolStr;

/// One diagram render invocation.
///
/// `description` is the literal fenced-block content with one trailing newline
/// stripped. `identifier` namespaces the engine's internal DOM/SVG ids and
/// must be unique within a render pass; uniqueness is the caller's
/// responsibility (the dispatcher synthesizes fresh identifiers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRequest {
    pub description: String,
    pub identifier: SmolStr,
}

impl DiagramRequest {
    pub fn new(description: impl Into<String>, identifier: impl Into<SmolStr>) -> Self {
        Self {
            description: description.into(),
            identifier: identifier.into(),
        }
    }
}

/// Outcome of a diagram render.
///
/// `Failure` is an expected result for malformed descriptions, not a
/// programming error; nothing on the diagram path escapes as a panic or an
/// `Err` past this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramResult {
    /// Serialized vector-graphics markup, theme-resolved.
    Success { markup: String },
    /// Human-readable explanation of why the render failed.
    Failure { reason: String },
}

impl DiagramResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
