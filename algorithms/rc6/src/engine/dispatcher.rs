//! Dispatch Strategy
//!
//! Decides whether a CTR pass runs on the calling thread or fans out over the
//! worker pool.

/// Work unit per parallel task: 64 KB (a whole number of blocks for every
/// supported word width).
pub const CHUNK_SIZE: usize = 64 * 1024;

// =============================================================================
// DISPATCH
// =============================================================================

/// How a keystream pass is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// Always on the calling thread, blocks in buffer order.
    Sequential,
    /// Always split into chunks and run on the worker pool.
    Parallel,
    /// Parallel once the buffer spans at least two chunks.
    #[default]
    Auto,
}

impl Dispatch {
    /// Whether a buffer of `len` bytes takes the parallel path.
    #[must_use]
    pub const fn is_parallel(self, len: usize) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel => true,
            Self::Auto => len >= 2 * CHUNK_SIZE,
        }
    }
}

// =============================================================================
// BACKEND REPORTING
// =============================================================================

/// Number of workers the parallel path can use.
#[must_use]
pub fn worker_count() -> usize {
    #[cfg(feature = "multithread")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "multithread"))]
    {
        1
    }
}

/// Returns the name of the parallel backend compiled in.
#[must_use]
pub const fn get_active_backend_name() -> &'static str {
    if cfg!(feature = "multithread") {
        "Rayon"
    } else {
        "Serial"
    }
}
