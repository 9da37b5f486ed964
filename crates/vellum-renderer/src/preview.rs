//! Preview-side reconciliation of asynchronous diagram renders.
//!
//! The preview owns one container per diagram slot (ordinal position in the
//! document). Each parse pass re-submits every slot, superseding whatever was
//! in flight, then drives the new batch concurrently; completion order is
//! unconstrained because results only land through their tickets.

use std::collections::HashMap;
use std::sync::Arc;

use markdown_weaver_escape::escape_html;
use n0_future::join_all;
use smol_str::SmolStr;

use vellum_diagram::{
    ApplyOutcome, ContainerState, DiagramContainer, DiagramRenderer, DiagramRequest,
    DiagramResult, RenderTicket,
};

use crate::writer::RenderedDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Outcomes that landed in their containers.
    pub applied: usize,
    /// Outcomes dropped because a newer pass superseded them.
    pub discarded: usize,
}

struct RenderJob {
    renderer: DiagramRenderer,
    request: DiagramRequest,
    ticket: RenderTicket,
    container: Arc<DiagramContainer>,
}

/// One batch of in-flight renders. Dropping it without `run` abandons the
/// batch; the containers stay pending until the next pass.
#[must_use = "a render pass does nothing until run"]
pub struct RenderPass {
    jobs: Vec<RenderJob>,
}

impl RenderPass {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drive every render in the batch concurrently and apply the results.
    pub async fn run(self) -> PassSummary {
        let outcomes = join_all(self.jobs.into_iter().map(|job| async move {
            let result = job.renderer.render(&job.request).await;
            job.container.apply(&job.ticket, result)
        }))
        .await;

        let mut summary = PassSummary::default();
        for outcome in outcomes {
            match outcome {
                ApplyOutcome::Applied => summary.applied += 1,
                ApplyOutcome::Stale => summary.discarded += 1,
            }
        }
        tracing::debug!(
            applied = summary.applied,
            discarded = summary.discarded,
            "diagram render pass finished",
        );
        summary
    }
}

#[derive(Default)]
pub struct DocumentPreview {
    renderers: HashMap<SmolStr, DiagramRenderer>,
    slots: Vec<Arc<DiagramContainer>>,
}

impl DocumentPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the renderer driving blocks routed by `language`.
    pub fn register(&mut self, language: impl Into<SmolStr>, renderer: DiagramRenderer) {
        self.renderers.insert(language.into(), renderer);
    }

    /// Containers in document order, one per diagram slot of the last pass.
    pub fn containers(&self) -> &[Arc<DiagramContainer>] {
        &self.slots
    }

    /// Submit a pass's diagrams to their slots and return the batch to run.
    ///
    /// Submission happens here, synchronously, so that a later `begin_pass`
    /// supersedes this batch even if the caller has not awaited it yet.
    pub fn begin_pass(&mut self, document: &RenderedDocument) -> RenderPass {
        self.slots.truncate(document.diagrams.len());
        while self.slots.len() < document.diagrams.len() {
            self.slots.push(Arc::new(DiagramContainer::new()));
        }

        let mut jobs = Vec::with_capacity(document.diagrams.len());
        for (container, pending) in self.slots.iter().zip(&document.diagrams) {
            let ticket = container.submit(&pending.request);
            match self.renderers.get(&pending.language) {
                Some(renderer) => jobs.push(RenderJob {
                    renderer: renderer.clone(),
                    request: pending.request.clone(),
                    ticket,
                    container: container.clone(),
                }),
                None => {
                    container.apply(
                        &ticket,
                        DiagramResult::Failure {
                            reason: format!(
                                "no renderer registered for language `{}`",
                                pending.language
                            ),
                        },
                    );
                }
            }
        }
        RenderPass { jobs }
    }

    /// Convenience: begin a pass and run it to completion.
    pub async fn render_pass(&mut self, document: &RenderedDocument) -> PassSummary {
        self.begin_pass(document).run().await
    }
}

/// Inner HTML for a diagram container, swapped into its placeholder div.
///
/// Failures render as a visibly distinct panel rather than a blank container.
pub fn container_html(state: &ContainerState) -> String {
    match state {
        ContainerState::Empty | ContainerState::Pending { .. } => {
            r#"<span class="diagram-loading">Rendering diagram...</span>"#.to_string()
        }
        ContainerState::Rendered { markup, .. } => markup.clone(),
        ContainerState::Failed { reason, .. } => {
            let mut escaped = String::new();
            // Writing into a String cannot fail.
            let _ = escape_html(&mut escaped, reason);
            format!(
                "<div class=\"diagram-error\">\
                 <p class=\"diagram-error-title\">Diagram error</p>\
                 <p class=\"diagram-error-body\">{escaped}</p>\
                 </div>"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{DiagramDispatcher, DispatcherConfig};
    use crate::writer::render_document;
    use async_trait::async_trait;
    use vellum_diagram::{DiagramEngine, EngineError, EngineOptions};

    struct EchoEngine;

    #[async_trait]
    impl DiagramEngine for EchoEngine {
        fn configure(&self, _options: &EngineOptions) {}

        async fn render(
            &self,
            identifier: &str,
            description: &str,
        ) -> Result<String, EngineError> {
            if description.contains("boom") {
                return Err(EngineError::Syntax {
                    message: "boom".to_string(),
                });
            }
            Ok(format!("<svg id=\"{identifier}\"><desc>{}</desc></svg>", description.len()))
        }
    }

    fn preview() -> DocumentPreview {
        let mut preview = DocumentPreview::new();
        preview.register(
            "mermaid",
            DiagramRenderer::with_default_theme(Arc::new(EchoEngine)),
        );
        preview
    }

    fn dispatcher() -> DiagramDispatcher {
        DiagramDispatcher::new(DispatcherConfig::single("mermaid"))
    }

    #[tokio::test]
    async fn pass_fills_every_container() {
        let doc = render_document(
            "```mermaid\ngraph TD; A-->B;\n```\n\n```mermaid\nsequenceDiagram\n```\n",
            &dispatcher(),
        );
        let mut preview = preview();
        let summary = preview.render_pass(&doc).await;
        assert_eq!(summary, PassSummary { applied: 2, discarded: 0 });
        for container in preview.containers() {
            assert!(matches!(container.state(), ContainerState::Rendered { .. }));
        }
    }

    #[tokio::test]
    async fn failing_block_only_affects_its_own_container() {
        let doc = render_document(
            "```mermaid\nboom\n```\n\n```mermaid\ngraph TD; A-->B;\n```\n",
            &dispatcher(),
        );
        let mut preview = preview();
        preview.render_pass(&doc).await;
        let states: Vec<_> = preview.containers().iter().map(|c| c.state()).collect();
        assert!(matches!(states[0], ContainerState::Failed { .. }));
        assert!(matches!(states[1], ContainerState::Rendered { .. }));
    }

    #[tokio::test]
    async fn superseded_pass_is_discarded_even_when_it_finishes_last() {
        let source = "```mermaid\ngraph TD; A-->B;\n```\n";
        let doc_a = render_document(source, &dispatcher());
        let doc_b = render_document("```mermaid\ngraph LR; C-->D;\n```\n", &dispatcher());

        let mut preview = preview();
        let pass_a = preview.begin_pass(&doc_a);
        let pass_b = preview.begin_pass(&doc_b);

        // B resolves first; A's results arrive afterwards and must not land.
        let summary_b = pass_b.run().await;
        let summary_a = pass_a.run().await;
        assert_eq!(summary_b, PassSummary { applied: 1, discarded: 0 });
        assert_eq!(summary_a, PassSummary { applied: 0, discarded: 1 });

        let state = preview.containers()[0].state();
        let ContainerState::Rendered { identifier, .. } = state else {
            panic!("expected rendered container, got {state:?}");
        };
        assert_eq!(identifier, doc_b.diagrams[0].request.identifier);
    }

    #[tokio::test]
    async fn unregistered_language_fails_locally() {
        let dispatcher = DiagramDispatcher::new(
            DispatcherConfig::single("mermaid").with_language("plantuml"),
        );
        let doc = render_document("```plantuml\n@startuml\n@enduml\n```\n", &dispatcher);
        let mut preview = preview();
        preview.render_pass(&doc).await;
        let state = preview.containers()[0].state();
        let ContainerState::Failed { reason, .. } = state else {
            panic!("expected failure, got {state:?}");
        };
        assert!(reason.contains("plantuml"));
    }

    #[test]
    fn container_html_distinguishes_states() {
        let pending = container_html(&ContainerState::Pending {
            identifier: "d1".into(),
        });
        assert!(pending.contains("diagram-loading"));

        let rendered = container_html(&ContainerState::Rendered {
            identifier: "d1".into(),
            markup: "<svg/>".to_string(),
        });
        assert_eq!(rendered, "<svg/>");

        let failed = container_html(&ContainerState::Failed {
            identifier: "d1".into(),
            reason: "bad <input>".to_string(),
        });
        assert!(failed.contains("diagram-error"));
        assert!(failed.contains("bad &lt;input&gt;"));
        assert!(!failed.contains("bad <input>"));
    }
}
