// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reboot button on a sysfs GPIO line.
//!
//! The button shorts the line to ground, so a logical low reads as pressed.
//! sysfs cannot enable the SoC pull-up; configure it at boot (on Raspberry
//! Pi: `gpio=17=ip,pu` in `config.txt`) or fit an external resistor.

use crate::{AgentError, InputSource};
use linux_embedded_hal::sysfs_gpio::{Direction, Pin};

/// An active-low pushbutton.
#[derive(Debug)]
pub struct GpioButton {
    pin: Pin,
}

impl GpioButton {
    /// Exports `line` and configures it as an input.
    pub fn open(line: u64) -> Result<Self, AgentError> {
        let pin = Pin::new(line);
        pin.export().map_err(|e| AgentError::Input {
            detail: format!("cannot export gpio {line}: {e}"),
        })?;
        pin.set_direction(Direction::In).map_err(|e| AgentError::Input {
            detail: format!("cannot make gpio {line} an input: {e}"),
        })?;
        tracing::info!(line, "reboot button ready");
        Ok(Self { pin })
    }
}

impl InputSource for GpioButton {
    fn is_pressed(&mut self) -> Result<bool, AgentError> {
        self.pin
            .get_value()
            .map(|level| level == 0)
            .map_err(|e| AgentError::Input {
                detail: format!("cannot read gpio {}: {e}", self.pin.get_pin_num()),
            })
    }
}
