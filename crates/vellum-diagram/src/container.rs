//! Latest-wins application of asynchronous render results.
//!
//! A container is the stable slot a diagram occupies in the rendered view.
//! Requests are submitted to it in order; each submission supersedes the
//! previous one. A result is applied only if it carries the ticket of the
//! most recent submission - anything older is discarded without a trace in
//! the UI (`ApplyOutcome::Stale`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use smol_str::SmolStr;

use crate::{DiagramRequest, DiagramResult};

/// Proof of a submission. Applying a result requires the ticket returned by
/// the submission that initiated the render, so a late result cannot clobber
/// newer content.
#[derive(Debug)]
pub struct RenderTicket {
    generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContainerState {
    /// Nothing submitted yet.
    #[default]
    Empty,
    /// A render is in flight for `identifier`.
    Pending { identifier: SmolStr },
    Rendered { identifier: SmolStr, markup: String },
    Failed { identifier: SmolStr, reason: String },
}

impl ContainerState {
    pub fn identifier(&self) -> Option<&SmolStr> {
        match self {
            Self::Empty => None,
            Self::Pending { identifier }
            | Self::Rendered { identifier, .. }
            | Self::Failed { identifier, .. } => Some(identifier),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The result belonged to a superseded submission and was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct DiagramContainer {
    generation: AtomicU64,
    state: Mutex<ContainerState>,
}

impl DiagramContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `request` the container's current occupant. Any render still in
    /// flight for an earlier submission is superseded from this point on.
    pub fn submit(&self, request: &DiagramRequest) -> RenderTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = ContainerState::Pending {
            identifier: request.identifier.clone(),
        };
        RenderTicket { generation }
    }

    /// Apply a finished render if its submission is still current.
    pub fn apply(&self, ticket: &RenderTicket, result: DiagramResult) -> ApplyOutcome {
        if ticket.generation != self.generation.load(Ordering::Acquire) {
            tracing::trace!(generation = ticket.generation, "stale diagram result discarded");
            return ApplyOutcome::Stale;
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        // Re-check under the lock: a submit may have won the race above.
        if ticket.generation != self.generation.load(Ordering::Acquire) {
            return ApplyOutcome::Stale;
        }
        let identifier = state.identifier().cloned().unwrap_or_default();
        *state = match result {
            DiagramResult::Success { markup } => ContainerState::Rendered { identifier, markup },
            DiagramResult::Failure { reason } => ContainerState::Failed { identifier, reason },
        };
        ApplyOutcome::Applied
    }

    pub fn state(&self) -> ContainerState {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(identifier: &str) -> DiagramRequest {
        DiagramRequest::new("graph TD; A-->B;", identifier)
    }

    fn success(markup: &str) -> DiagramResult {
        DiagramResult::Success {
            markup: markup.to_string(),
        }
    }

    #[test]
    fn submission_marks_pending() {
        let container = DiagramContainer::new();
        let _ticket = container.submit(&request("a"));
        assert_eq!(
            container.state(),
            ContainerState::Pending {
                identifier: "a".into()
            }
        );
    }

    #[test]
    fn current_result_applies() {
        let container = DiagramContainer::new();
        let ticket = container.submit(&request("a"));
        assert_eq!(
            container.apply(&ticket, success("<svg/>")),
            ApplyOutcome::Applied
        );
        assert_eq!(
            container.state(),
            ContainerState::Rendered {
                identifier: "a".into(),
                markup: "<svg/>".to_string(),
            }
        );
    }

    #[test]
    fn late_result_for_superseded_request_is_discarded() {
        let container = DiagramContainer::new();
        let ticket_a = container.submit(&request("a"));
        let ticket_b = container.submit(&request("b"));

        // B resolves first, then A arrives late.
        assert_eq!(
            container.apply(&ticket_b, success("<svg>b</svg>")),
            ApplyOutcome::Applied
        );
        assert_eq!(
            container.apply(&ticket_a, success("<svg>a</svg>")),
            ApplyOutcome::Stale
        );
        assert_eq!(
            container.state(),
            ContainerState::Rendered {
                identifier: "b".into(),
                markup: "<svg>b</svg>".to_string(),
            }
        );
    }

    #[test]
    fn stale_discard_also_covers_failures() {
        let container = DiagramContainer::new();
        let ticket_a = container.submit(&request("a"));
        let ticket_b = container.submit(&request("b"));
        container.apply(
            &ticket_b,
            DiagramResult::Failure {
                reason: "bad input".to_string(),
            },
        );
        assert_eq!(
            container.apply(&ticket_a, success("<svg>a</svg>")),
            ApplyOutcome::Stale
        );
        assert!(matches!(container.state(), ContainerState::Failed { .. }));
    }
}
