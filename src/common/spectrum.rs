// src/common/spectrum.rs

use super::error::{As7265xError, Parameter};
use core::fmt::Debug;
use core::ops::Index;

/// Total channels across the three dies.
pub const CHANNEL_COUNT: usize = 18;

/// 1-based position of a sample in wavelength order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    pub const FIRST: ChannelIndex = ChannelIndex(1);
    pub const LAST: ChannelIndex = ChannelIndex(CHANNEL_COUNT as u8);

    pub fn new<E: Debug>(index: u8) -> Result<Self, As7265xError<E>> {
        if (1..=CHANNEL_COUNT as u8).contains(&index) {
            Ok(ChannelIndex(index))
        } else {
            Err(As7265xError::InvalidParameter {
                parameter: Parameter::ChannelIndex,
                value: index as u32,
            })
        }
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Zero-based array offset.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.0 as usize - 1
    }

    /// All indices, ascending.
    pub fn all() -> impl Iterator<Item = ChannelIndex> {
        (1..=CHANNEL_COUNT as u8).map(ChannelIndex)
    }
}

/// A full spectrum of 18 samples in wavelength order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spectrum<T>([T; CHANNEL_COUNT]);

impl<T: Copy> Spectrum<T> {
    /// Wraps samples that are already in wavelength order.
    pub const fn new(samples: [T; CHANNEL_COUNT]) -> Self {
        Spectrum(samples)
    }

    /// Builds a spectrum from samples in acquisition order.
    pub fn from_acquisition_order(samples: [T; CHANNEL_COUNT]) -> Self {
        Spectrum(super::ordering::reorder(samples))
    }

    #[inline]
    pub fn channel(&self, index: ChannelIndex) -> T {
        self.0[index.offset()]
    }

    #[inline]
    pub fn as_array(&self) -> &[T; CHANNEL_COUNT] {
        &self.0
    }

    #[inline]
    pub fn into_array(self) -> [T; CHANNEL_COUNT] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelIndex, T)> + '_ {
        ChannelIndex::all().map(move |i| (i, self.channel(i)))
    }
}

impl<T> Index<ChannelIndex> for Spectrum<T> {
    type Output = T;

    fn index(&self, index: ChannelIndex) -> &T {
        &self.0[index.offset()]
    }
}

#[cfg(feature = "defmt")]
impl<T: defmt::Format> defmt::Format for Spectrum<T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Spectrum({})", self.0)
    }
}
