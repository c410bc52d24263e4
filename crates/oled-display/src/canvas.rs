// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory 128×32 bitmap, used for previews and tests.

use crate::layout::{HEIGHT, WIDTH};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

const PIXELS: usize = (WIDTH * HEIGHT) as usize;

/// A monochrome frame buffer with the same geometry as the OLED.
#[derive(Clone)]
pub struct Canvas {
    pixels: Box<[bool; PIXELS]>,
}

impl Canvas {
    /// Creates a blank canvas.
    pub fn new() -> Self {
        Self {
            pixels: Box::new([false; PIXELS]),
        }
    }

    /// Returns `true` if the pixel at `(x, y)` is lit; out-of-range is unlit.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pixels[(y * WIDTH + x) as usize]
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Renders the canvas as text, one row per line (`#` lit, `.` unlit).
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(PIXELS + HEIGHT as usize);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                out.push(if self.pixel(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("lit", &self.lit_count())
            .finish()
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = std::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < WIDTH && y < HEIGHT {
                self.pixels[(y * WIDTH + x) as usize] = color.is_on();
            }
        }
        Ok(())
    }
}
