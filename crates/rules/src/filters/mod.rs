//! Filter configuration types.
//!
//! Filters are user-authored, so deserialization never fails on shape:
//! - `FilterSet`: OR across groups; anything but an array becomes the empty set
//! - `FilterGroup`: AND across rules; anything but an array becomes `Malformed`
//! - `FilterRule`: path/value/operator; missing fields are kept as `None` and
//!   judged at evaluation time

mod group;
mod rule;

pub use group::*;
pub use rule::*;
