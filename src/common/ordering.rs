// src/common/ordering.rs

//! Acquisition order → wavelength order.
//!
//! Channels are read die by die, six at a time. Because the dies' passbands
//! overlap, that order is not monotonic in wavelength and has to be permuted.

use super::error::{As7265xError, Parameter};
use super::spectrum::CHANNEL_COUNT;
use core::fmt::Debug;

/// `(physical slot, logical slot)` pairs, both 1-based.
pub const PERMUTATION: [(u8, u8); CHANNEL_COUNT] = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (6, 6),
    (7, 7),
    (8, 8),
    (13, 9),
    (14, 11),
    (9, 10),
    (10, 12),
    (15, 13),
    (16, 14),
    (17, 15),
    (18, 16),
    (11, 17),
    (12, 18),
];

/// Reorders samples from acquisition order into wavelength order.
pub fn reorder<T: Copy>(samples: [T; CHANNEL_COUNT]) -> [T; CHANNEL_COUNT] {
    let mut sorted = samples;
    for (physical, logical) in PERMUTATION {
        sorted[logical as usize - 1] = samples[physical as usize - 1];
    }
    sorted
}

/// Inverse of [`reorder`].
pub fn restore_acquisition_order<T: Copy>(samples: [T; CHANNEL_COUNT]) -> [T; CHANNEL_COUNT] {
    let mut unsorted = samples;
    for (physical, logical) in PERMUTATION {
        unsorted[physical as usize - 1] = samples[logical as usize - 1];
    }
    unsorted
}

/// Like [`reorder`], for input whose length is only known at runtime.
pub fn reorder_slice<T: Copy, E: Debug>(
    samples: &[T],
) -> Result<[T; CHANNEL_COUNT], As7265xError<E>> {
    let samples: [T; CHANNEL_COUNT] =
        samples
            .try_into()
            .map_err(|_| As7265xError::InvalidParameter {
                parameter: Parameter::SampleCount,
                value: samples.len() as u32,
            })?;
    Ok(reorder(samples))
}
