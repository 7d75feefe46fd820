//! Logging macros
//!
//! The backend is selected by features:
//! - `log`: forwards to the `log` facade
//! - `esp32-log`: prints through `esp_println` with a level prefix
//!
//! Without either feature the messages are compiled out, but the arguments
//! are still type-checked.

#![allow(unused_macros)]

macro_rules! __indicator_log {
    ($level:ident, $prefix:literal, $($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
        #[cfg(all(feature = "esp32-log", not(feature = "log")))]
        ::esp_println::println!("{} {}", $prefix, format_args!($($arg)*));
        #[cfg(not(any(feature = "log", feature = "esp32-log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => { __indicator_log!(debug, "[DEBUG]", $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { __indicator_log!(info, "[INFO]", $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { __indicator_log!(warn, "[WARN]", $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { __indicator_log!(error, "[ERROR]", $($arg)*) };
}
