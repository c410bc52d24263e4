// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rasterises a [`Frame`] onto any 128×32 binary draw target.
//!
//! ```text
//! y= 0  hostname                 48.3C
//! y=10  IP: 192.168.1.42
//! y=20  Status: Running
//! y=29                  |            <- peak tick (3 px)
//! y=31  ==========      |            <- CPU bar (1 px)
//! ```

use crate::{Frame, MessageFrame, StatusFrame};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};

/// Display width in pixels.
pub const WIDTH: u32 = 128;
/// Display height in pixels.
pub const HEIGHT: u32 = 32;
/// Vertical distance between text lines.
pub const LINE_SPACING: i32 = 10;
/// Row of the single-pixel CPU bar.
pub const BAR_Y: i32 = 31;
/// Top row of the 3 px peak tick.
pub const PEAK_TOP_Y: i32 = 29;

const GLYPH_WIDTH: i32 = 6;

/// Maps a percentage to an x coordinate in `0..=WIDTH-1`.
pub fn scale_to_width(percent: f32) -> i32 {
    let pct = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    ((pct / 100.0) * (WIDTH - 1) as f32) as i32
}

/// Clears `target` and draws `frame` on it.
pub fn draw_frame<D>(target: &mut D, frame: &Frame) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    match frame {
        Frame::Status(status) => draw_status(target, status, style),
        Frame::Message(message) => draw_message(target, message, style),
    }
}

fn draw_status<D>(
    target: &mut D,
    status: &StatusFrame,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_text(target, status.host_text(), 0, 0, style)?;

    let temp = status.temperature_text();
    let temp_x = WIDTH as i32 - temp.chars().count() as i32 * GLYPH_WIDTH;
    draw_text(target, &temp, temp_x, 0, style)?;

    draw_text(target, &status.ip_line(), 0, LINE_SPACING, style)?;
    draw_text(target, &status.status_line(), 0, 2 * LINE_SPACING, style)?;

    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    let x_cur = scale_to_width(status.cpu_percent);
    if x_cur > 0 {
        Line::new(Point::new(0, BAR_Y), Point::new(x_cur, BAR_Y))
            .into_styled(stroke)
            .draw(target)?;
    }

    let x_peak = scale_to_width(status.peak_percent);
    Line::new(Point::new(x_peak, PEAK_TOP_Y), Point::new(x_peak, BAR_Y))
        .into_styled(stroke)
        .draw(target)?;

    Ok(())
}

fn draw_message<D>(
    target: &mut D,
    message: &MessageFrame,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for (i, line) in message.lines().iter().enumerate() {
        draw_text(target, line, 0, i as i32 * LINE_SPACING, style)?;
    }
    Ok(())
}

fn draw_text<D>(
    target: &mut D,
    text: &str,
    x: i32,
    y: i32,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(target)?;
    Ok(())
}
