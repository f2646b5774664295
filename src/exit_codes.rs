/// Exit codes for fencefmt
///
/// These exit codes allow users and CI/CD systems to distinguish between
/// different types of failures.
/// Success - Run completed, or help/version was shown
pub const SUCCESS: i32 = 0;

/// Failure - Bad usage, bad configuration, or `format --check` found blocks to fix
pub const FAILURE: i32 = 1;

/// Tool error - I/O, formatter or editor failure during a run
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{FAILURE, SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with failure code (1)
    pub fn failure() -> ! {
        std::process::exit(FAILURE);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
