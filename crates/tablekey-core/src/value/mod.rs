//! Module: value
//! Responsibility: heuristics over opaque store values.
//! Does not own: value layouts; nothing here is a decoder.

mod handle;
mod strings;

pub use handle::{
    DEFAULT_HANDLE_UPPER_BOUND, HandleCandidate, HandleCandidates, HandleProbe, HandleProbeSet,
    HandleRange, probe_handles,
};
pub use strings::extract_ascii_strings;
