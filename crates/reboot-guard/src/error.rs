// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the agent core.

/// Errors that stop the agent or prevent it from starting.
///
/// Metric failures never appear here; they are degraded to defaults.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The reboot button line could not be opened or read.
    #[error("input line error: {detail}")]
    Input { detail: String },

    /// The display rejected a frame.
    #[error("display error: {0}")]
    Display(#[from] oled_display::DisplayError),

    /// The reboot command could not be started.
    #[error("reboot command '{command}' failed: {source}")]
    Reboot {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
