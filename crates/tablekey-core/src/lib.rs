//! Byte-level codecs for a distributed SQL store's table keyspace: ordered
//! integers, chunked byte strings, table keys, index columns, and the
//! heuristics used to read index values, exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod codec;
pub mod column;
pub mod error;
pub mod key;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or hex helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        column::{ColumnValue, ColumnValues},
        key::{DecodedKey, EntityTag, KeyMode, KeyStructure, ScanRange},
        value::{HandleCandidate, HandleCandidates, HandleProbeSet},
    };
}
