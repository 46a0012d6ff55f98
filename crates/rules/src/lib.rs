//! Filter-matching engine for media-server webhooks.
//!
//! This crate provides:
//! - Filter schema (`FilterRule`, `FilterGroup`, `FilterSet`) tolerant of malformed config
//! - Rule normalizer collapsing no-op groups to the match-everything form
//! - OR-of-ANDs evaluator emitting a verbatim, replayable trace
//! - `VerboseLog` sink with tracing-backed and recording implementations

pub mod evaluator;
pub mod filters;
pub mod log;
pub mod normalize;

pub use evaluator::FilterEvaluator;
pub use filters::{FilterGroup, FilterRule, FilterSet, Operator};
pub use log::{RecordingLog, TracingLog, VerboseLog};
pub use normalize::normalize;
