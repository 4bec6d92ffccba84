// Diagnostics go through the `log` facade only when the `logging` feature is
// enabled; otherwise every call site compiles to nothing.

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

/// Fail-soft substitutions: clamped components, FILETIME underflow, chrono range.
macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

/// Parser path decisions and rejected input.
macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}
