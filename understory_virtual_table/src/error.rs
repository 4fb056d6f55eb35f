// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_row_window::ConfigError;

/// Errors surfaced by [`VirtualTable`](crate::VirtualTable).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TableError {
    /// A row height or viewport height was rejected.
    #[error("invalid table configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
