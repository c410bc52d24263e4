// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The cooperative scheduler that drives the whole agent.
//!
//! Every tick runs these stages in a fixed order:
//!
//! 1. sample the button once;
//! 2. step the [`ButtonMachine`] with that sample;
//! 3. poll the IP probe timer, then the status refresh timer (only in
//!    `Normal`);
//! 4. render at most one frame; a button message wins over a status frame;
//! 5. if the countdown completed, invoke the reboot and halt, even when
//!    the final frame failed to render.
//!
//! All state lives in [`Scheduler`] and is only touched from
//! [`Scheduler::tick`], so nothing needs locking.

use crate::button::{ButtonMachine, ButtonState};
use crate::timers::{IntervalTimer, ProbeTimer};
use crate::{AgentError, InputSource, RebootAction};
use host_metrics::{CpuTracker, MetricSource};
use oled_display::{Frame, RenderSink, StatusFrame};
use std::future::Future;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// Scheduler polling period (~20 Hz).
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Text on the third status line.
pub const STATUS_TEXT: &str = "Running";

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// The reboot was invoked; nothing further will happen.
    Halted,
}

/// Remembers whether a metric is currently failing so a persistent failure
/// is logged once rather than on every refresh.
#[derive(Debug, Default)]
struct Degraded(bool);

impl Degraded {
    fn failed(&mut self, metric: &str, err: &dyn std::fmt::Display) {
        if !self.0 {
            tracing::warn!("{metric} unavailable, showing 0: {err}");
        }
        self.0 = true;
    }

    fn ok(&mut self, metric: &str) {
        if self.0 {
            tracing::info!("{metric} readable again");
        }
        self.0 = false;
    }
}

/// The scheduler context: collaborators, button machine, timers and the
/// data shown on the status frame.
pub struct Scheduler<M, I, R, B> {
    metrics: M,
    input: I,
    sink: R,
    reboot: B,
    button: ButtonMachine,
    cpu: CpuTracker,
    refresh: IntervalTimer,
    probe: ProbeTimer,
    host: String,
    ip: Option<IpAddr>,
    halted: bool,
    cpu_degraded: Degraded,
    temp_degraded: Degraded,
}

impl<M, I, R, B> Scheduler<M, I, R, B>
where
    M: MetricSource,
    I: InputSource,
    R: RenderSink,
    B: RebootAction,
{
    /// Builds the scheduler, reading the hostname and a baseline CPU
    /// snapshot. The first status refresh is due one interval after `now`;
    /// the first IP probe is due immediately.
    pub fn new(
        mut metrics: M,
        input: I,
        sink: R,
        reboot: B,
        refresh_interval: Duration,
        now: Instant,
    ) -> Self {
        let host = metrics.hostname().unwrap_or_else(|e| {
            tracing::warn!("hostname unavailable: {e}");
            "unknown".to_string()
        });

        let mut cpu = CpuTracker::new();
        let mut cpu_degraded = Degraded::default();
        match metrics.cpu_times() {
            Ok(times) => cpu.prime(times),
            Err(e) => cpu_degraded.failed("cpu counters", &e),
        }

        tracing::info!(%host, ?refresh_interval, "scheduler created");

        Self {
            metrics,
            input,
            sink,
            reboot,
            button: ButtonMachine::new(),
            cpu,
            refresh: IntervalTimer::new(refresh_interval, now + refresh_interval),
            probe: ProbeTimer::new(now),
            host,
            ip: None,
            halted: false,
            cpu_degraded,
            temp_degraded: Degraded::default(),
        }
    }

    /// Seeds the CPU history, probes the IP and shows a first status frame.
    ///
    /// Call once, shortly (≈100 ms) after [`Scheduler::new`], so the first
    /// percentage covers a real sampling window.
    pub fn warm_up(&mut self, now: Instant) -> Result<(), AgentError> {
        self.probe_ip(now);
        let frame = self.refresh_status();
        self.sink.render(&Frame::Status(frame))?;
        self.refresh.rearm(self.refresh.interval(), now);
        Ok(())
    }

    /// Runs one scheduling tick at time `now`.
    ///
    /// Input and render failures are returned; metric failures are not.
    /// On the tick that completes the countdown the reboot is invoked
    /// before any render failure is returned.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, AgentError> {
        if self.halted {
            return Ok(TickOutcome::Halted);
        }

        let pressed = self.input.is_pressed()?;

        let step = self.button.step(pressed, now);
        if step.changed && self.button.state().is_normal() {
            self.refresh.expire(now);
        }

        if self.probe.is_due(now) {
            self.probe_ip(now);
        }

        let status = if self.button.state().is_normal() && self.refresh.poll(now) {
            Some(self.refresh_status())
        } else {
            None
        };

        let frame = match (step.message, status) {
            (Some(message), _) => Some(Frame::Message(message)),
            (None, Some(status)) => Some(Frame::Status(status)),
            (None, None) => None,
        };
        let rendered = match frame {
            Some(frame) => {
                tracing::trace!("render {}", frame.summary());
                self.sink.render(&frame)
            }
            None => Ok(()),
        };

        // A failed final frame must not cancel a completed countdown.
        if step.reboot {
            self.invoke_reboot();
            rendered?;
            return Ok(TickOutcome::Halted);
        }
        rendered?;
        Ok(TickOutcome::Continue)
    }

    /// Ticks every `period` (normally [`TICK_PERIOD`]) until `shutdown` resolves.
    ///
    /// After the reboot has been invoked the loop stops ticking and only
    /// waits for `shutdown`, so the countdown can never resume.
    pub async fn run<F>(&mut self, period: Duration, shutdown: F) -> Result<(), AgentError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let now = tokio::time::Instant::now().into_std();
                    if self.tick(now)? == TickOutcome::Halted {
                        break;
                    }
                }
            }
        }

        tracing::warn!("reboot invoked; idling until the system goes down");
        shutdown.await;
        Ok(())
    }

    pub fn button_state(&self) -> ButtonState {
        self.button.state()
    }

    pub fn cpu(&self) -> &CpuTracker {
        &self.cpu
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn probe_timer(&self) -> &ProbeTimer {
        &self.probe
    }

    /// Borrow the render sink (inspection in tests and diagnostics).
    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn reboot_action(&self) -> &B {
        &self.reboot
    }

    fn probe_ip(&mut self, now: Instant) {
        let ip = self.metrics.probe_ip();
        if ip != self.ip {
            match ip {
                Some(addr) => tracing::info!(%addr, "ip address acquired"),
                None => tracing::warn!("ip address lost"),
            }
        }
        self.ip = ip;
        self.probe.record(ip.is_some(), now);
    }

    fn refresh_status(&mut self) -> StatusFrame {
        match self.metrics.cpu_times() {
            Ok(times) => {
                self.cpu_degraded.ok("cpu counters");
                self.cpu.update(times);
            }
            Err(e) => {
                self.cpu_degraded.failed("cpu counters", &e);
                self.cpu.push(0.0);
            }
        }

        let temperature_celsius = match self.metrics.temperature() {
            Ok(t) => {
                self.temp_degraded.ok("temperature");
                t
            }
            Err(e) => {
                self.temp_degraded.failed("temperature", &e);
                0.0
            }
        };

        tracing::debug!(
            cpu = self.cpu.current(),
            peak = self.cpu.peak(),
            temperature_celsius,
            "status refresh"
        );

        StatusFrame {
            host: self.host.clone(),
            ip: self.ip,
            status: STATUS_TEXT.to_string(),
            cpu_percent: self.cpu.current(),
            peak_percent: self.cpu.peak(),
            temperature_celsius,
        }
    }

    fn invoke_reboot(&mut self) {
        self.halted = true;
        match self.reboot.reboot() {
            Ok(()) => tracing::warn!("reboot requested"),
            Err(e) => tracing::error!("reboot did not take effect: {e}"),
        }
    }
}
