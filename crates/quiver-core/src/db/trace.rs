//! Submission tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect submission semantics.

use crate::{error::ErrorKind, query::PlanFingerprint};

///
/// QueryTraceSink
///

pub trait QueryTraceSink: Send + Sync {
    fn on_event(&self, event: QueryTraceEvent);
}

///
/// QueryTraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryTraceEvent {
    Submit {
        collection: String,
        fingerprint: PlanFingerprint,
    },
    Finish {
        collection: String,
        fingerprint: PlanFingerprint,
        rows: u64,
    },
    Reject {
        collection: String,
        fingerprint: PlanFingerprint,
        kind: ErrorKind,
    },
}

impl QueryTraceEvent {
    #[must_use]
    pub const fn fingerprint(&self) -> PlanFingerprint {
        match self {
            Self::Submit { fingerprint, .. }
            | Self::Finish { fingerprint, .. }
            | Self::Reject { fingerprint, .. } => *fingerprint,
        }
    }
}
