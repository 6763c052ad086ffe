//! Error types for watchdog operations.

use thiserror::Error;

/// Errors that can occur while configuring a watchdog.
///
/// `start` and `feed` never fail; everything here comes from timeout
/// configuration or from the register block refusing to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WatchdogError {
    /// The input clock frequency was zero.
    #[error("Input frequency must be non-zero")]
    ZeroInputFrequency,

    /// The requested timeout is shorter than the smallest representable period.
    #[error("Timeout of {requested_ms} ms is below the minimum of {min_ms} ms")]
    TimeoutTooShort {
        /// Requested timeout in milliseconds.
        requested_ms: u32,
        /// Shortest period the hardware can produce, in milliseconds.
        min_ms: u32,
    },

    /// The requested timeout is longer than the largest representable period.
    #[error("Timeout of {requested_ms} ms exceeds the maximum of {max_ms} ms")]
    TimeoutTooLong {
        /// Requested timeout in milliseconds.
        requested_ms: u32,
        /// Longest period the hardware can produce, in milliseconds.
        max_ms: u32,
    },

    /// A previous prescaler or reload update never finished.
    #[error("Register update still pending after {polls} status polls")]
    UpdatePending {
        /// Number of status reads performed before giving up.
        polls: u32,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The peripheral driver does not implement this operation.
    #[error("{peripheral} does not support {operation}")]
    Unsupported {
        /// Peripheral name, e.g. `"WWDG"`.
        peripheral: &'static str,
        /// Operation name.
        operation: &'static str,
    },
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(msg: &'static str) -> Self {
        Self::InvalidConfiguration(msg)
    }

    /// Create an unsupported operation error.
    #[must_use]
    pub fn unsupported(peripheral: &'static str, operation: &'static str) -> Self {
        Self::Unsupported {
            peripheral,
            operation,
        }
    }

    /// Returns true if the error came from a timeout outside the hardware range.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::TimeoutTooShort { .. } | Self::TimeoutTooLong { .. }
        )
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = core::result::Result<T, WatchdogError>;
