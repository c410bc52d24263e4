// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! SSD1306 128×32 panel on a Linux I²C bus.

use crate::{draw_frame, DisplayError, Frame, RenderSink};
use linux_embedded_hal::I2cdev;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};
use std::path::Path;

/// Default 7-bit address of SSD1306 modules.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

type Panel = Ssd1306<I2CInterface<I2cdev>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// Renders frames to an SSD1306 over I²C.
pub struct Ssd1306Sink {
    panel: Panel,
}

impl Ssd1306Sink {
    /// Opens `bus` (e.g. `/dev/i2c-1`), initialises the controller at
    /// `address` and clears the panel.
    pub fn open(bus: &Path, address: u8) -> Result<Self, DisplayError> {
        let i2c = I2cdev::new(bus).map_err(|e| DisplayError::Bus {
            detail: format!("cannot open {}: {e}", bus.display()),
        })?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let mut panel = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init().map_err(|e| DisplayError::Bus {
            detail: format!("init at {address:#04x} failed: {e:?}"),
        })?;
        panel.clear_buffer();
        panel.flush().map_err(bus_error)?;

        tracing::info!(bus = %bus.display(), address = format!("{address:#04x}"), "ssd1306 ready");
        Ok(Self { panel })
    }
}

impl RenderSink for Ssd1306Sink {
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        draw_frame(&mut self.panel, frame).map_err(|e| DisplayError::Draw {
            detail: format!("{e:?}"),
        })?;
        self.panel.flush().map_err(bus_error)
    }
}

fn bus_error<E: std::fmt::Debug>(e: E) -> DisplayError {
    DisplayError::Bus {
        detail: format!("{e:?}"),
    }
}
