mod parallel;

pub use parallel::{batch_chunk_len, parallelism_enabled, set_parallelism, with_parallelism};
