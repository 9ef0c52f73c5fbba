//! Utilities - terminal styling and progress indicators

/// `println!` for decorative status output, routed by `set_status_to_stderr`
#[macro_export]
macro_rules! status {
    () => {
        $crate::utils::status_line(format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::utils::status_line(format_args!($($arg)*))
    };
}

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
