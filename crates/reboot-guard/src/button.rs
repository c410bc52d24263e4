// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The reboot button state machine.
//!
//! ```text
//!            hold ≥ 5 s              release
//!  Normal ───────────────► Ready ────────────► Armed
//!    ▲                                           │ press
//!    │ 5 s elapsed                               ▼
//!  Cancelled ◄──────────────────────────── Countdown (5 → 0, 1 s steps)
//!                    release                     │ reaches 0 while held
//!                                                ▼
//!                                            Rebooting (terminal)
//! ```
//!
//! A single long press can never reboot: the qualifying hold must be
//! released and followed by a fresh press held through the whole countdown.
//! Countdown steps are anchored to an absolute deadline recomputed at each
//! step, so tick jitter cannot speed the countdown up.

use oled_display::MessageFrame;
use std::time::{Duration, Instant};

/// Continuous hold required in `Normal` before the machine becomes `Ready`.
pub const QUALIFY_HOLD: Duration = Duration::from_secs(5);
/// Countdown start value.
pub const COUNTDOWN_FROM: u8 = 5;
/// Time between countdown steps.
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);
/// How long the cancellation message stays up.
pub const CANCEL_HOLD: Duration = Duration::from_secs(5);

/// Button states. Data needed by a state lives inside its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Idle; tracks when the current continuous press began.
    Normal { press_started: Option<Instant> },
    /// Qualifying hold completed, waiting for release.
    Ready,
    /// Released after qualifying, waiting for a fresh press.
    Armed,
    /// Counting down while the button stays pressed.
    Countdown { remaining: u8, next_step: Instant },
    /// Showing the cancellation message until `until`.
    Cancelled { until: Instant },
    /// Reboot requested. Terminal.
    Rebooting,
}

impl ButtonState {
    /// Upper-case state name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ButtonState::Normal { .. } => "NORMAL",
            ButtonState::Ready => "READY",
            ButtonState::Armed => "ARMED",
            ButtonState::Countdown { .. } => "COUNTDOWN",
            ButtonState::Cancelled { .. } => "CANCELLED",
            ButtonState::Rebooting => "REBOOTING",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, ButtonState::Normal { .. })
    }

    /// Countdown value, if counting down.
    pub fn remaining(&self) -> Option<u8> {
        match self {
            ButtonState::Countdown { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    fn same_kind(&self, other: &ButtonState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        ButtonState::Normal {
            press_started: None,
        }
    }
}

/// What the scheduler must do after one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Message to display this tick.
    pub message: Option<MessageFrame>,
    /// `true` exactly once: on the step that completes the countdown.
    pub reboot: bool,
    /// The state kind changed on this step.
    pub changed: bool,
}

impl Step {
    fn stay() -> Self {
        Self::default()
    }

    fn show(message: MessageFrame) -> Self {
        Self {
            message: Some(message),
            ..Self::default()
        }
    }
}

/// Message texts shown by the machine.
pub mod messages {
    use oled_display::MessageFrame;

    pub const READY: &str = "Ready to Reboot";
    pub const CANCELLED: &str = "Reboot Cancelled";
    pub const REBOOTING: &str = "Rebooting...";

    pub fn ready() -> MessageFrame {
        MessageFrame::new([READY, "Release button"])
    }

    pub fn armed() -> MessageFrame {
        MessageFrame::new([READY, "Hold to confirm"])
    }

    pub fn countdown(remaining: u8) -> MessageFrame {
        MessageFrame::new([format!("Reboot in {remaining}").as_str(), "Release to cancel"])
    }

    pub fn cancelled() -> MessageFrame {
        MessageFrame::new([CANCELLED])
    }

    pub fn rebooting() -> MessageFrame {
        MessageFrame::new([REBOOTING])
    }
}

/// Pure transition function of `(state, pressed, now)`.
///
/// `Armed` is only entered on a released sample, so a press seen in
/// `Armed` is always a fresh press.
pub fn transition(state: ButtonState, pressed: bool, now: Instant) -> (ButtonState, Step) {
    match state {
        ButtonState::Normal { press_started } => {
            if !pressed {
                return (ButtonState::default(), Step::stay());
            }
            let started = press_started.unwrap_or(now);
            if now.saturating_duration_since(started) >= QUALIFY_HOLD {
                (ButtonState::Ready, Step::show(messages::ready()))
            } else {
                (
                    ButtonState::Normal {
                        press_started: Some(started),
                    },
                    Step::stay(),
                )
            }
        }

        ButtonState::Ready => {
            if pressed {
                (ButtonState::Ready, Step::stay())
            } else {
                (ButtonState::Armed, Step::show(messages::armed()))
            }
        }

        ButtonState::Armed => {
            if pressed {
                (
                    ButtonState::Countdown {
                        remaining: COUNTDOWN_FROM,
                        next_step: now + COUNTDOWN_STEP,
                    },
                    Step::show(messages::countdown(COUNTDOWN_FROM)),
                )
            } else {
                (ButtonState::Armed, Step::stay())
            }
        }

        ButtonState::Countdown {
            remaining,
            next_step,
        } => {
            if !pressed {
                return (
                    ButtonState::Cancelled {
                        until: now + CANCEL_HOLD,
                    },
                    Step::show(messages::cancelled()),
                );
            }
            if now < next_step {
                return (state, Step::stay());
            }
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                let step = Step {
                    message: Some(messages::rebooting()),
                    reboot: true,
                    changed: false,
                };
                (ButtonState::Rebooting, step)
            } else {
                (
                    ButtonState::Countdown {
                        remaining,
                        next_step: now + COUNTDOWN_STEP,
                    },
                    Step::show(messages::countdown(remaining)),
                )
            }
        }

        ButtonState::Cancelled { until } => {
            if now >= until {
                (ButtonState::default(), Step::stay())
            } else {
                (state, Step::stay())
            }
        }

        ButtonState::Rebooting => (ButtonState::Rebooting, Step::stay()),
    }
}

/// Owns the button state and logs its transitions.
#[derive(Debug, Default)]
pub struct ButtonMachine {
    state: ButtonState,
}

impl ButtonMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Advances the machine with this tick's input sample.
    pub fn step(&mut self, pressed: bool, now: Instant) -> Step {
        let (next, mut step) = transition(self.state, pressed, now);
        step.changed = !next.same_kind(&self.state);
        if step.changed {
            tracing::info!(from = self.state.name(), to = next.name(), "button state changed");
        } else if let (Some(before), Some(after)) = (self.state.remaining(), next.remaining()) {
            if before != after {
                tracing::info!(remaining = after, "reboot countdown");
            }
        }
        self.state = next;
        step
    }
}
