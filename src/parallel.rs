//! Per-pixel loops over interleaved and HSV buffers.
//!
//! With the `parallel` feature these run on the Rayon pool; without it they
//! fall back to plain iterators. Pixels never depend on each other, so both
//! paths produce identical output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map every whole pixel of an interleaved buffer, preserving order.
pub(crate) fn map_pixels<T, F>(bytes: &[u8], channels: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&[u8]) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        bytes.par_chunks_exact(channels).map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        bytes.chunks_exact(channels).map(f).collect()
    }
}

/// Mutate every whole pixel of an interleaved buffer in place.
pub(crate) fn for_each_pixel_mut<F>(bytes: &mut [u8], channels: usize, f: F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        bytes.par_chunks_exact_mut(channels).for_each(f);
    }
    #[cfg(not(feature = "parallel"))]
    {
        bytes.chunks_exact_mut(channels).for_each(f);
    }
}

/// Walk an interleaved buffer and a per-pixel slice in lockstep.
pub(crate) fn zip_pixels_mut<T, F>(bytes: &mut [u8], channels: usize, items: &[T], f: F)
where
    T: Sync,
    F: Fn(&mut [u8], &T) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        bytes
            .par_chunks_exact_mut(channels)
            .zip(items.par_iter())
            .for_each(|(pixel, item)| f(pixel, item));
    }
    #[cfg(not(feature = "parallel"))]
    {
        bytes
            .chunks_exact_mut(channels)
            .zip(items.iter())
            .for_each(|(pixel, item)| f(pixel, item));
    }
}

pub(crate) fn for_each_mut<T, F>(items: &mut [T], f: F)
where
    T: Send,
    F: Fn(&mut T) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        items.par_iter_mut().for_each(f);
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.iter_mut().for_each(f);
    }
}
