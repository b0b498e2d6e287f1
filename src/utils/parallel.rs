//! Process-wide switch for batch parallelism.
//!
//! Batch encoding produces the same bytes with or without rayon; the switch
//! only exists so that a debugging session can force a single thread.

use std::sync::atomic::{AtomicBool, Ordering};

static BATCH_PARALLELISM: AtomicBool = AtomicBool::new(true);

/// Smallest number of witnesses handed to one rayon task.
const MIN_BATCH_CHUNK: usize = 16;

/// Minimum number of witnesses per rayon task for a batch of `batch_len`.
pub fn batch_chunk_len(batch_len: usize) -> usize {
    MIN_BATCH_CHUNK.min(batch_len.max(1))
}

/// Whether [`crate::FixedCodec::encode_batch`] fans out over rayon.
///
/// Always `false` without the `parallel` feature.
pub fn parallelism_enabled() -> bool {
    cfg!(feature = "parallel") && BATCH_PARALLELISM.load(Ordering::Acquire)
}

/// Turns parallel batch encoding on or off and returns the previous switch.
pub fn set_parallelism(enabled: bool) -> bool {
    BATCH_PARALLELISM.swap(enabled, Ordering::AcqRel)
}

/// Runs `f` with the switch set to `enabled`, restoring it afterwards.
pub fn with_parallelism<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    let previous = set_parallelism(enabled);
    let result = f();
    set_parallelism(previous);
    result
}
