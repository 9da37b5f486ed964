//! The engine boundary.
//!
//! The actual diagram engine (a browser mermaid bundle behind a WASM binding,
//! or any other grammar implementation) is supplied by the host. Its
//! configuration is process-wide mutable state with no enforced lifecycle, so
//! the contract here is: `configure` is cheap, idempotent, and overwrites the
//! whole option set; the renderer calls it immediately before every render.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::theme::{DiagramPalette, ThemeMode};

/// The engine's built-in palette slot the variables are layered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineTheme {
    Default,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub font_family: SmolStr,
    pub font_size: u8,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: SmolStr::new(
                "-apple-system, BlinkMacSystemFont, \"Segoe UI\", \"Noto Sans\", Helvetica, Arial, sans-serif",
            ),
            font_size: 14,
        }
    }
}

/// Full engine configuration for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub theme: EngineTheme,
    pub variables: DiagramPalette,
    pub typography: Typography,
    /// Size diagrams to the content column instead of their natural width.
    pub fit_to_width: bool,
    /// Wrap long message labels in sequence diagrams.
    pub wrap_labels: bool,
}

impl EngineOptions {
    /// The option set for a presentation mode. Exactly two palettes exist;
    /// everything except the colors is shared.
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            theme: match mode {
                ThemeMode::Light => EngineTheme::Default,
                ThemeMode::Dark => EngineTheme::Dark,
            },
            variables: DiagramPalette::for_mode(mode),
            typography: Typography::default(),
            fit_to_width: true,
            wrap_labels: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The description is not valid diagram syntax.
    #[error("diagram syntax error: {message}")]
    Syntax { message: String },
    /// The engine failed to configure or render for environmental reasons.
    #[error("diagram engine unavailable: {message}")]
    Init { message: String },
}

/// An external diagram-rendering engine.
///
/// Implementations must not assume calls arrive in order: multiple renders
/// may be in flight at once, each namespaced by its identifier.
#[async_trait]
pub trait DiagramEngine: Send + Sync {
    /// Overwrite the engine's shared configuration. Safe to repeat.
    fn configure(&self, options: &EngineOptions);

    /// Render `description` to vector markup, using `identifier` to
    /// namespace any internal element ids so concurrent diagrams never
    /// collide. Errors are expected for malformed input.
    async fn render(&self, identifier: &str, description: &str) -> Result<String, EngineError>;
}
