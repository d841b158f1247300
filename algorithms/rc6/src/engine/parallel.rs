//! Parallel Execution Engine
//!
//! Splits a mutable buffer into fixed-size chunks and hands each chunk, along
//! with a seed computed up front, to a worker. Runs on Rayon's pool (sized to
//! the available hardware threads) when `multithread` is enabled, otherwise
//! serially. Every chunk is joined before returning.

/// Helper for feature-agnostic chunk processing.
pub trait ChunkProcessorMut {
    /// Call `f(seed, chunk)` for every `chunk_size` chunk, pairing chunks with
    /// `seeds` in order. The last chunk may be shorter.
    fn process_chunks_seeded<T, F>(self, chunk_size: usize, seeds: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(T, &mut [u8]) + Sync + Send;
}

impl ChunkProcessorMut for &mut [u8] {
    fn process_chunks_seeded<T, F>(self, chunk_size: usize, seeds: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(T, &mut [u8]) + Sync + Send,
    {
        debug_assert_eq!(seeds.len(), self.len().div_ceil(chunk_size));

        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.par_chunks_mut(chunk_size)
                .zip(seeds.into_par_iter())
                .for_each(|(chunk, seed)| f(seed, chunk));
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.chunks_mut(chunk_size)
                .zip(seeds)
                .for_each(|(chunk, seed)| f(seed, chunk));
        }
    }
}
