//! Bulk edits built on top of [`EditSession`](crate::EditSession).
//!
//! Every operator reads and writes exclusively through the session, returns
//! the number of writes the world accepted, and propagates
//! [`EditError::ChangeLimitExceeded`](crate::EditError::ChangeLimitExceeded)
//! as soon as the session refuses a write. Nothing is rolled back on error;
//! callers undo the session instead.

pub mod fill;
pub mod flood;
pub mod nature;
pub mod shapes;
pub mod transfer;

use crate::error::{EditError, Result};
use rustc_hash::FxHashSet;

/// A set of block ids used as a match filter.
pub type BlockIdSet = FxHashSet<u16>;

/// Builds a [`BlockIdSet`] from a list of ids.
pub fn block_set<I: IntoIterator<Item = u16>>(ids: I) -> BlockIdSet {
    ids.into_iter().collect()
}

pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if radius < 0.0 || radius.is_nan() {
        return Err(EditError::InvalidArgument(format!(
            "radius {} must not be negative",
            radius
        )));
    }
    Ok(())
}
