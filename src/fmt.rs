//! Logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled. Without it the
//! arguments are still evaluated by reference (so they type-check and do not
//! trigger unused warnings) but nothing is emitted, which keeps the host test
//! build free of a global logger. Unit tests record every diagnostic in
//! [`capture`] instead.

#![allow(unused_macros)]

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(test)]
            $crate::fmt::capture::record(
                $crate::fmt::capture::Level::Debug,
                $s,
                ::std::vec![$(::std::format!("{:?}", $x)),*],
            );
            #[cfg(not(any(feature = "defmt", test)))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(test)]
            $crate::fmt::capture::record(
                $crate::fmt::capture::Level::Info,
                $s,
                ::std::vec![$(::std::format!("{:?}", $x)),*],
            );
            #[cfg(not(any(feature = "defmt", test)))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(test)]
            $crate::fmt::capture::record(
                $crate::fmt::capture::Level::Warn,
                $s,
                ::std::vec![$(::std::format!("{:?}", $x)),*],
            );
            #[cfg(not(any(feature = "defmt", test)))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::error!($s $(, $x)*);
            #[cfg(test)]
            $crate::fmt::capture::record(
                $crate::fmt::capture::Level::Error,
                $s,
                ::std::vec![$(::std::format!("{:?}", $x)),*],
            );
            #[cfg(not(any(feature = "defmt", test)))]
            let _ = ($( & $x ),*);
        }
    };
}
