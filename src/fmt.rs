//! Logging back-end selection
//!
//! Call sites use the re-exported macros. The `defmt` feature routes them to
//! `defmt`, the default `log` feature to the `log` facade. With neither
//! enabled the arguments are still type checked but nothing is emitted.

#[cfg(feature = "defmt")]
#[allow(unused_imports)]
pub(crate) use defmt::{debug, error, info, warn};

#[cfg(all(feature = "log", not(feature = "defmt")))]
#[allow(unused_imports)]
pub(crate) use log::{debug, error, info, warn};

#[cfg(not(any(feature = "log", feature = "defmt")))]
#[allow(unused_imports)]
mod silent {
    macro_rules! silent {
        ($($arg:tt)*) => {{
            if false {
                let _ = core::format_args!($($arg)*);
            }
        }};
    }

    pub(crate) use silent as debug;
    pub(crate) use silent as error;
    pub(crate) use silent as info;
    pub(crate) use silent as warn;
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
#[allow(unused_imports)]
pub(crate) use silent::{debug, error, info, warn};
