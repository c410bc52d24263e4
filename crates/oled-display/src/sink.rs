// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`RenderSink`] capability.

use crate::{DisplayError, Frame};

/// Accepts frames for display. Each frame fully replaces the previous one.
pub trait RenderSink {
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError>;
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        (**self).render(frame)
    }
}

/// Headless sink: writes each frame to the log instead of a panel.
#[derive(Debug, Default)]
pub struct LogSink {
    frames: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.frames += 1;
        if frame.is_message() {
            tracing::info!(frame = self.frames, "{}", frame.summary());
        } else {
            tracing::debug!(frame = self.frames, "{}", frame.summary());
        }
        Ok(())
    }
}
