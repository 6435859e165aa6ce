// src/fmt.rs

// Crate-internal logging macros. They forward to `defmt` or `log` depending on
// the enabled feature and expand to nothing otherwise. Format strings must stay
// within the subset both backends understand (`{}`, `{:?}`, `{:#x}`).

#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => {{
        ::defmt::trace!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => {{
        ::defmt::debug!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => {{
        ::defmt::warn!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)*) => {{
        ::log::trace!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($arg:tt)*) => {{
        ::log::debug!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! warn {
    ($($arg:tt)*) => {{
        ::log::warn!($($arg)*);
    }};
}

// No-op fallbacks. The arguments are still evaluated as a tuple so that values
// only used for logging do not trigger unused warnings.
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! warn {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}
