// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

/// Error returned when a [`Viewport`](crate::Viewport) would be invalid.
///
/// Both variants carry the rejected value. They are raised when the
/// configuration is set, so window computation itself never divides by zero
/// or produces a negative slice.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The row height was zero, negative, or not finite.
    #[error("row height must be positive and finite, got {0}")]
    InvalidRowHeight(f64),
    /// The viewport height was negative or not finite.
    #[error("viewport height must be non-negative and finite, got {0}")]
    InvalidViewportHeight(f64),
}

pub(crate) fn check_row_height(row_height: f64) -> Result<f64, ConfigError> {
    if row_height.is_finite() && row_height > 0.0 {
        Ok(row_height)
    } else {
        Err(ConfigError::InvalidRowHeight(row_height))
    }
}

pub(crate) fn check_viewport_height(viewport_height: f64) -> Result<f64, ConfigError> {
    if viewport_height.is_finite() && viewport_height >= 0.0 {
        // Normalizes -0.0.
        Ok(viewport_height + 0.0)
    } else {
        Err(ConfigError::InvalidViewportHeight(viewport_height))
    }
}
