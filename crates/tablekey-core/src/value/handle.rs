//! Best-effort handle recovery from index values.
//!
//! Index entries usually embed the row handle somewhere in their value, but
//! the layout differs across store versions and nothing in the value says
//! which layout applies. This module probes a fixed, priority-ordered set of
//! 8-byte windows and keeps the ones that look like a row id. It can miss
//! real handles and it can accept false positives; callers must treat the
//! result as a hint, never as decoded structure.

use crate::codec::{I64_ENCODED_LEN, decode_i64};
use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use std::fmt;

/// Exclusive upper bound for a plausible row id.
pub const DEFAULT_HANDLE_UPPER_BOUND: i64 = 1_000_000_000;

///
/// HandleCandidate
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct HandleCandidate {
    pub offset: usize,
    pub value: i64,
}

impl fmt::Display for HandleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset={} value={}", self.offset, self.value)
    }
}

///
/// HandleCandidates
///
/// Accepted candidates in probe priority order.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct HandleCandidates(Vec<HandleCandidate>);

impl HandleCandidates {
    /// Highest-priority candidate.
    #[must_use]
    pub fn preferred(&self) -> Option<&HandleCandidate> {
        self.0.first()
    }
}

///
/// HandleRange
///
/// Plausibility predicate: `min_exclusive < value < max_exclusive`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HandleRange {
    pub min_exclusive: i64,
    pub max_exclusive: i64,
}

impl HandleRange {
    #[must_use]
    pub const fn accepts(self, value: i64) -> bool {
        self.min_exclusive < value && value < self.max_exclusive
    }
}

impl Default for HandleRange {
    fn default() -> Self {
        Self {
            min_exclusive: 0,
            max_exclusive: DEFAULT_HANDLE_UPPER_BOUND,
        }
    }
}

///
/// HandleProbe
///
/// One `(offset, predicate)` pair. `offset` maps the value length to the
/// window start, or `None` when the window does not apply.
///

#[derive(Clone, Copy, Debug)]
pub struct HandleProbe {
    pub label: &'static str,
    pub offset: fn(usize) -> Option<usize>,
    pub accept: HandleRange,
}

impl HandleProbe {
    fn candidate(&self, value: &[u8]) -> Option<HandleCandidate> {
        let offset = (self.offset)(value.len())?;
        let handle = decode_i64(value.get(offset..)?).ok()?;

        let candidate = HandleCandidate {
            offset,
            value: handle,
        };
        self.accept.accepts(handle).then_some(candidate)
    }
}

///
/// HandleProbeSet
///
/// Ordered probe list. Earlier probes win: when two probes land on the same
/// offset only the first is reported.
///

#[derive(Clone, Debug)]
pub struct HandleProbeSet {
    probes: Vec<HandleProbe>,
}

impl HandleProbeSet {
    #[must_use]
    pub const fn new(probes: Vec<HandleProbe>) -> Self {
        Self { probes }
    }

    /// Default windows with a custom plausibility bound.
    #[must_use]
    pub fn with_upper_bound(max_exclusive: i64) -> Self {
        let accept = HandleRange {
            min_exclusive: 0,
            max_exclusive,
        };

        Self::new(vec![
            HandleProbe {
                label: "after_flag",
                offset: after_flag_offset,
                accept,
            },
            HandleProbe {
                label: "tail",
                offset: tail_offset,
                accept,
            },
            HandleProbe {
                label: "after_header",
                offset: after_header_offset,
                accept,
            },
        ])
    }

    #[must_use]
    pub fn probes(&self) -> &[HandleProbe] {
        &self.probes
    }

    /// Run every probe over `value`.
    #[must_use]
    pub fn probe(&self, value: &[u8]) -> HandleCandidates {
        let mut found: Vec<HandleCandidate> = Vec::new();

        for probe in &self.probes {
            let Some(candidate) = probe.candidate(value) else {
                continue;
            };
            if found.iter().any(|c| c.offset == candidate.offset) {
                continue;
            }

            tracing::trace!(
                probe = probe.label,
                offset = candidate.offset,
                value = candidate.value,
                "handle candidate"
            );
            found.push(candidate);
        }

        HandleCandidates(found)
    }
}

impl Default for HandleProbeSet {
    fn default() -> Self {
        Self::with_upper_bound(DEFAULT_HANDLE_UPPER_BOUND)
    }
}

/// Probe `value` with the default windows and bound.
#[must_use]
pub fn probe_handles(value: &[u8]) -> HandleCandidates {
    HandleProbeSet::default().probe(value)
}

// Window after a one-byte flag.
const fn after_flag_offset(len: usize) -> Option<usize> {
    if len > I64_ENCODED_LEN { Some(1) } else { None }
}

// Last eight bytes.
const fn tail_offset(len: usize) -> Option<usize> {
    len.checked_sub(I64_ENCODED_LEN)
}

// Window after a flag byte plus an 8-byte header; newer value layouts.
const fn after_header_offset(len: usize) -> Option<usize> {
    if len >= 1 + 2 * I64_ENCODED_LEN {
        Some(1 + I64_ENCODED_LEN)
    } else {
        None
    }
}

///
/// TESTS
///
