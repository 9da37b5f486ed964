//! Render-override dispatch for code blocks.
//!
//! The document pipeline hands every code occurrence to the dispatcher, which
//! classifies it: fenced blocks tagged with a recognized diagram language are
//! replaced by a diagram placeholder, everything else passes through as a
//! literal listing. This is a pure classification + construction step - no
//! I/O, no failure path.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};

use vellum_diagram::DiagramRequest;

/// A code occurrence as the pipeline sees it. Created fresh per parse pass,
/// consumed by one `resolve` call, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlockDescriptor<'a> {
    /// First token of the fence info string, if any.
    pub language: Option<&'a str>,
    /// Inline `` `code` `` spans never carry a language and never route.
    pub inline: bool,
    pub content: &'a str,
}

/// The dispatcher's decision for one code occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    /// Replace the listing with a diagram container; the render itself is
    /// driven later by the preview reconciler.
    Diagram {
        /// The tag that routed the block, so hosts can pick the matching
        /// renderer when several grammars are configured.
        language: SmolStr,
        request: DiagramRequest,
    },
    /// Default path: a literal code listing, content and tag untouched.
    Listing {
        language: Option<SmolStr>,
        content: String,
    },
}

/// Which fence tags route to the diagram path.
///
/// The editor variants this grew out of routed two mutually incompatible
/// grammars (`mermaid`, `plantuml`) through the same override slot, so the
/// recognized set is host configuration rather than a built-in constant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    pub languages: Vec<SmolStr>,
}

impl DispatcherConfig {
    pub fn single(language: impl Into<SmolStr>) -> Self {
        Self {
            languages: vec![language.into()],
        }
    }

    pub fn with_language(mut self, language: impl Into<SmolStr>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn recognizes(&self, language: &str) -> bool {
        self.languages.iter().any(|tag| tag == language)
    }
}

/// Process-wide counter so two dispatcher instances can never hand out the
/// same identifier.
static NEXT_IDENTIFIER: AtomicU64 = AtomicU64::new(0);

fn next_identifier() -> SmolStr {
    let n = NEXT_IDENTIFIER.fetch_add(1, Ordering::Relaxed);
    format_smolstr!("diagram-{n}")
}

#[derive(Debug, Clone, Default)]
pub struct DiagramDispatcher {
    config: DispatcherConfig,
}

impl DiagramDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Classify one code occurrence.
    ///
    /// Resolving the same descriptor twice yields two different identifiers;
    /// duplicate diagram text in one document must still produce independent
    /// render invocations.
    pub fn resolve(&self, block: &CodeBlockDescriptor<'_>) -> BlockNode {
        if !block.inline {
            if let Some(language) = block.language {
                if self.config.recognizes(language) {
                    let description = block
                        .content
                        .strip_suffix('\n')
                        .unwrap_or(block.content)
                        .to_string();
                    return BlockNode::Diagram {
                        language: SmolStr::new(language),
                        request: DiagramRequest {
                            description,
                            identifier: next_identifier(),
                        },
                    };
                }
            }
        }
        BlockNode::Listing {
            language: block.language.map(SmolStr::new),
            content: block.content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> DiagramDispatcher {
        DiagramDispatcher::new(DispatcherConfig::single("mermaid"))
    }

    #[test]
    fn recognized_fence_routes_to_diagram() {
        let block = CodeBlockDescriptor {
            language: Some("mermaid"),
            inline: false,
            content: "graph TD; A-->B;\n",
        };
        match dispatcher().resolve(&block) {
            BlockNode::Diagram { language, request } => {
                assert_eq!(language, "mermaid");
                assert_eq!(request.description, "graph TD; A-->B;");
            }
            BlockNode::Listing { .. } => panic!("expected diagram"),
        }
    }

    #[test]
    fn only_one_trailing_newline_is_stripped() {
        let block = CodeBlockDescriptor {
            language: Some("mermaid"),
            inline: false,
            content: "graph TD;\n\n",
        };
        let BlockNode::Diagram { request, .. } = dispatcher().resolve(&block) else {
            panic!("expected diagram");
        };
        assert_eq!(request.description, "graph TD;\n");
    }

    #[test]
    fn other_languages_pass_through_unchanged() {
        let block = CodeBlockDescriptor {
            language: Some("javascript"),
            inline: false,
            content: "console.log(1);\n",
        };
        match dispatcher().resolve(&block) {
            BlockNode::Listing { language, content } => {
                assert_eq!(language.as_deref(), Some("javascript"));
                assert_eq!(content, "console.log(1);\n");
            }
            BlockNode::Diagram { .. } => panic!("expected listing"),
        }
    }

    #[test]
    fn inline_code_never_routes() {
        let block = CodeBlockDescriptor {
            language: None,
            inline: true,
            content: "graph TD; A-->B;",
        };
        assert!(matches!(
            dispatcher().resolve(&block),
            BlockNode::Listing { .. }
        ));
    }

    #[test]
    fn identical_descriptors_get_distinct_identifiers() {
        let block = CodeBlockDescriptor {
            language: Some("mermaid"),
            inline: false,
            content: "graph TD; A-->B;\n",
        };
        let d = dispatcher();
        let (BlockNode::Diagram { request: a, .. }, BlockNode::Diagram { request: b, .. }) =
            (d.resolve(&block), d.resolve(&block))
        else {
            panic!("expected diagrams");
        };
        assert_ne!(a.identifier, b.identifier);
        assert_eq!(a.description, b.description);
    }

    #[test]
    fn multiple_grammars_are_configurable() {
        let d = DiagramDispatcher::new(
            DispatcherConfig::single("mermaid").with_language("plantuml"),
        );
        let block = CodeBlockDescriptor {
            language: Some("plantuml"),
            inline: false,
            content: "@startuml\n@enduml\n",
        };
        assert!(matches!(d.resolve(&block), BlockNode::Diagram { .. }));
    }
}
