// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # reboot-guard
//!
//! The decision core of the OLED status agent: a pushbutton state machine
//! that only reboots after a deliberate hold → release → hold-through-
//! countdown sequence, and the single-threaded scheduler that multiplexes
//! button handling, IP probing and status refreshes on one 50 ms tick.
//!
//! # Components
//! - [`ButtonMachine`]: total transition function over [`ButtonState`];
//!   the only place that can request a reboot.
//! - [`IntervalTimer`] / [`ProbeTimer`]: absolute-deadline timers polled
//!   from the tick.
//! - [`Scheduler`]: owns every collaborator and runs the fixed
//!   sample → step → timers → render → reboot order.
//! - [`InputSource`] / [`RebootAction`]: capabilities, with [`GpioButton`]
//!   (feature `hardware`), [`ExecReboot`] and [`DryRunReboot`].
//! - [`AgentConfig`]: TOML configuration.
//!
//! # Example
//! ```no_run
//! use reboot_guard::{DryRunReboot, InputSource, AgentError, Scheduler, TICK_PERIOD};
//! use host_metrics::SysfsMetrics;
//! use oled_display::LogSink;
//! use std::time::{Duration, Instant};
//!
//! struct NeverPressed;
//! impl InputSource for NeverPressed {
//!     fn is_pressed(&mut self) -> Result<bool, AgentError> { Ok(false) }
//! }
//!
//! # async fn example() -> Result<(), AgentError> {
//! let mut scheduler = Scheduler::new(
//!     SysfsMetrics::new(),
//!     NeverPressed,
//!     LogSink::new(),
//!     DryRunReboot::new(),
//!     Duration::from_secs(1),
//!     Instant::now(),
//! );
//! scheduler.warm_up(Instant::now())?;
//! scheduler.run(TICK_PERIOD, std::future::pending()).await
//! # }
//! ```

pub mod button;
mod config;
mod error;
#[cfg(feature = "hardware")]
mod gpio;
mod io;
mod scheduler;
pub mod timers;

pub use button::{ButtonMachine, ButtonState, Step};
pub use config::AgentConfig;
pub use error::AgentError;
#[cfg(feature = "hardware")]
pub use gpio::GpioButton;
pub use io::{DryRunReboot, ExecReboot, InputSource, RebootAction};
pub use scheduler::{Scheduler, TickOutcome, STATUS_TEXT, TICK_PERIOD};
pub use timers::{IntervalTimer, ProbeTimer};
