//! Configure-then-render with error containment.

use std::sync::Arc;

use crate::engine::{DiagramEngine, EngineOptions};
use crate::theme::ThemeProvider;
use crate::{DiagramRequest, DiagramResult};

/// Renders one diagram description at a time against the shared engine.
///
/// The theme is re-read through the provider on every call and the engine is
/// reconfigured immediately before the render, so a mode flip between two
/// renders takes effect without remounting anything. No error from the engine
/// escapes this type; callers always get a `DiagramResult`.
#[derive(Clone)]
pub struct DiagramRenderer {
    engine: Arc<dyn DiagramEngine>,
    theme: Arc<dyn ThemeProvider>,
}

impl DiagramRenderer {
    pub fn new(engine: Arc<dyn DiagramEngine>, theme: Arc<dyn ThemeProvider>) -> Self {
        Self { engine, theme }
    }

    /// Renderer with the fixed light palette, for hosts without an ambient
    /// theme source.
    pub fn with_default_theme(engine: Arc<dyn DiagramEngine>) -> Self {
        Self::new(engine, Arc::new(()))
    }

    pub async fn render(&self, request: &DiagramRequest) -> DiagramResult {
        if request.description.trim().is_empty() {
            return DiagramResult::Failure {
                reason: "empty diagram description".to_string(),
            };
        }

        let mode = self.theme.current_mode();
        self.engine.configure(&EngineOptions::for_mode(mode));

        match self
            .engine
            .render(&request.identifier, &request.description)
            .await
        {
            Ok(markup) => DiagramResult::Success { markup },
            Err(err) => {
                tracing::debug!(
                    identifier = %request.identifier,
                    error = %err,
                    "diagram render failed",
                );
                DiagramResult::Failure {
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, EngineTheme};
    use crate::theme::{AmbientFlag, ThemeMode};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Engine double that renders the configured background color into the
    /// markup, and fails on descriptions starting with "bad".
    #[derive(Default)]
    struct StubEngine {
        configured: Mutex<Vec<EngineOptions>>,
    }

    #[async_trait]
    impl DiagramEngine for StubEngine {
        fn configure(&self, options: &EngineOptions) {
            self.configured
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(options.clone());
        }

        async fn render(
            &self,
            identifier: &str,
            description: &str,
        ) -> Result<String, EngineError> {
            if description.starts_with("bad") {
                return Err(EngineError::Syntax {
                    message: format!("unexpected token in `{description}`"),
                });
            }
            let background = {
                let configured = self.configured.lock().unwrap_or_else(|e| e.into_inner());
                configured
                    .last()
                    .map(|o| o.variables.background.to_string())
                    .unwrap_or_default()
            };
            Ok(format!(
                "<svg id=\"{identifier}\" style=\"background:{background}\"><g/></svg>"
            ))
        }
    }

    #[tokio::test]
    async fn valid_description_succeeds() {
        let renderer = DiagramRenderer::with_default_theme(Arc::new(StubEngine::default()));
        let request = DiagramRequest::new("graph TD; A-->B;", "diagram-1");
        let result = renderer.render(&request).await;
        match result {
            DiagramResult::Success { markup } => {
                assert!(markup.contains("<svg"));
                assert!(markup.contains("diagram-1"));
            }
            DiagramResult::Failure { reason } => panic!("unexpected failure: {reason}"),
        }
    }

    #[tokio::test]
    async fn malformed_description_is_contained() {
        let renderer = DiagramRenderer::with_default_theme(Arc::new(StubEngine::default()));
        let request = DiagramRequest::new("bad syntax here", "diagram-2");
        match renderer.render(&request).await {
            DiagramResult::Failure { reason } => {
                assert!(reason.contains("syntax"));
            }
            DiagramResult::Success { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn empty_description_is_a_failure() {
        let renderer = DiagramRenderer::with_default_theme(Arc::new(StubEngine::default()));
        let request = DiagramRequest::new("  \n", "diagram-3");
        assert!(!renderer.render(&request).await.is_success());
    }

    #[tokio::test]
    async fn engine_is_configured_before_every_render() {
        let engine = Arc::new(StubEngine::default());
        let renderer = DiagramRenderer::with_default_theme(engine.clone());
        let request = DiagramRequest::new("graph LR; A-->B;", "diagram-4");
        renderer.render(&request).await;
        renderer.render(&request).await;
        let configured = engine.configured.lock().unwrap();
        assert_eq!(configured.len(), 2);
        assert_eq!(configured[0], configured[1]);
    }

    #[tokio::test]
    async fn theme_switch_changes_rendered_tokens() {
        let engine = Arc::new(StubEngine::default());
        let flag = AmbientFlag::default();
        let renderer = DiagramRenderer::new(engine.clone(), Arc::new(flag.clone()));
        let request = DiagramRequest::new("graph TD; A-->B;", "diagram-5");

        let light = renderer.render(&request).await;
        flag.set_dark(true);
        let dark = renderer.render(&request).await;

        let (DiagramResult::Success { markup: light }, DiagramResult::Success { markup: dark }) =
            (light, dark)
        else {
            panic!("both renders should succeed");
        };
        assert!(light.contains("#ffffff"));
        assert!(dark.contains("#0d1117"));
        assert_ne!(light, dark);

        let configured = engine.configured.lock().unwrap();
        assert_eq!(configured[0].theme, EngineTheme::Default);
        assert_eq!(configured[1].theme, EngineTheme::Dark);
        assert_eq!(
            configured[1].variables,
            crate::DiagramPalette::for_mode(ThemeMode::Dark)
        );
    }
}
