// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for frame output.

/// Errors raised while pushing a frame to a display.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The display bus could not be opened or a transfer failed.
    #[error("display bus error: {detail}")]
    Bus { detail: String },

    /// Rasterising the frame into the display buffer failed.
    #[error("failed to draw frame: {detail}")]
    Draw { detail: String },
}
