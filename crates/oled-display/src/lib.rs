// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # oled-display
//!
//! Frames for a 128×32 monochrome status display and the sinks that show
//! them.
//!
//! - [`Frame`]: either a [`StatusFrame`] (hostname, temperature, IP,
//!   status text, CPU bar with rolling-peak tick) or a [`MessageFrame`]
//!   (up to three text lines).
//! - [`draw_frame`]: lays a frame out on any `embedded-graphics`
//!   `DrawTarget<Color = BinaryColor>`.
//! - [`RenderSink`]: the output capability. [`Ssd1306Sink`] drives a real
//!   panel over I²C (feature `ssd1306`); [`LogSink`] logs frames for
//!   headless runs.
//! - [`Canvas`]: an in-memory bitmap for previews and tests.
//!
//! # Example
//! ```
//! use oled_display::{draw_frame, Canvas, Frame, MessageFrame};
//!
//! let mut canvas = Canvas::new();
//! draw_frame(&mut canvas, &Frame::Message(MessageFrame::new(["Ready to Reboot"]))).unwrap();
//! assert!(canvas.lit_count() > 0);
//! ```

mod canvas;
mod error;
mod frame;
mod layout;
#[cfg(feature = "ssd1306")]
mod oled;
mod sink;

pub use canvas::Canvas;
pub use error::DisplayError;
pub use frame::{clamp_line, Frame, MessageFrame, StatusFrame, MAX_CHARS, MESSAGE_LINES, NOT_CONNECTED};
pub use layout::{draw_frame, scale_to_width, BAR_Y, HEIGHT, LINE_SPACING, PEAK_TOP_Y, WIDTH};
#[cfg(feature = "ssd1306")]
pub use oled::{Ssd1306Sink, DEFAULT_ADDRESS};
pub use sink::{LogSink, RenderSink};
