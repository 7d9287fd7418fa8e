//! Internal logging macros.
//!
//! `debug!` and `error!` forward to the `log` crate or to `defmt`, depending
//! on which feature is enabled. With neither feature they expand to nothing,
//! so the driver carries no logging cost on constrained targets.

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! debug {
            ($($arg:tt)*) => { defmt::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { defmt::error!($($arg)*) };
        }
    } else if #[cfg(feature = "log")] {
        macro_rules! debug {
            ($($arg:tt)*) => { log::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { log::error!($($arg)*) };
        }
    } else {
        macro_rules! debug {
            ($($arg:tt)*) => {{}};
        }
        macro_rules! error {
            ($($arg:tt)*) => {{}};
        }
    }
}
