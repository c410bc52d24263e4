// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: end-to-end button sequences through the scheduler.
//!
//! Every collaborator is a deterministic fake, so these tests exercise the
//! full sample → step → timers → render → reboot order without hardware.

use host_metrics::{CpuTimes, MetricSource, MonitorError};
use oled_display::{DisplayError, Frame, RenderSink};
use reboot_guard::button::messages;
use reboot_guard::{
    AgentError, ButtonState, DryRunReboot, InputSource, RebootAction, Scheduler, TickOutcome,
    TICK_PERIOD,
};
use std::cell::Cell;
use std::net::{IpAddr, Ipv4Addr};
use std::rc::Rc;
use std::time::{Duration, Instant};

// ── Fakes ──────────────────────────────────────────────────────

struct StaticHost {
    reads: u64,
}

impl MetricSource for StaticHost {
    fn hostname(&mut self) -> Result<String, MonitorError> {
        Ok("scenario-pi".into())
    }
    fn probe_ip(&mut self) -> Option<IpAddr> {
        Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 50)))
    }
    fn temperature(&mut self) -> Result<f32, MonitorError> {
        Ok(47.5)
    }
    fn cpu_times(&mut self) -> Result<CpuTimes, MonitorError> {
        self.reads += 1;
        Ok(CpuTimes::new(90 * self.reads, 100 * self.reads))
    }
}

/// Input whose level the test flips between ticks.
#[derive(Clone)]
struct Line(Rc<Cell<bool>>);

impl InputSource for Line {
    fn is_pressed(&mut self) -> Result<bool, AgentError> {
        Ok(self.0.get())
    }
}

/// Records frames; rejects message frames whose first line is `refuse`.
#[derive(Default)]
struct Recorder(Vec<Frame>, Option<&'static str>);

impl RenderSink for Recorder {
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if let (Frame::Message(m), Some(refuse)) = (frame, self.1) {
            if m.headline() == refuse {
                return Err(DisplayError::Bus {
                    detail: "nack".into(),
                });
            }
        }
        self.0.push(frame.clone());
        Ok(())
    }
}

/// A reboot that never takes effect.
#[derive(Default)]
struct Refused(u32);

impl RebootAction for Refused {
    fn reboot(&mut self) -> Result<(), AgentError> {
        self.0 += 1;
        Err(AgentError::Reboot {
            command: "/sbin/reboot".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
    }
}

struct DeadPanel;

impl RenderSink for DeadPanel {
    fn render(&mut self, _frame: &Frame) -> Result<(), DisplayError> {
        Err(DisplayError::Bus {
            detail: "nack".into(),
        })
    }
}

// ── Helpers ────────────────────────────────────────────────────

struct Rig<B = DryRunReboot> {
    scheduler: Scheduler<StaticHost, Line, Recorder, B>,
    line: Rc<Cell<bool>>,
    t0: Instant,
    t: Duration,
}

impl Rig {
    fn new() -> Self {
        Rig::with(Recorder::default(), DryRunReboot::new())
    }

    fn reboots(&self) -> u32 {
        self.scheduler.reboot_action().invocations()
    }
}

impl<B: RebootAction> Rig<B> {
    fn with(sink: Recorder, reboot: B) -> Self {
        let t0 = Instant::now();
        let line = Rc::new(Cell::new(false));
        let scheduler = Scheduler::new(
            StaticHost { reads: 0 },
            Line(line.clone()),
            sink,
            reboot,
            Duration::from_secs(1),
            t0,
        );
        Self {
            scheduler,
            line,
            t0,
            t: Duration::ZERO,
        }
    }

    /// Runs a single tick with the line at `pressed`.
    fn tick(&mut self, pressed: bool) -> Result<TickOutcome, AgentError> {
        self.line.set(pressed);
        let outcome = self.scheduler.tick(self.t0 + self.t);
        self.t += TICK_PERIOD;
        outcome
    }

    /// Ticks every 50 ms for `millis` with the line held at `pressed`.
    fn drive(&mut self, pressed: bool, millis: u64) {
        let end = self.t + Duration::from_millis(millis);
        while self.t < end {
            self.tick(pressed).unwrap();
        }
    }

    fn state(&self) -> ButtonState {
        self.scheduler.button_state()
    }

    fn messages(&self) -> Vec<String> {
        self.scheduler
            .sink()
            .0
            .iter()
            .filter_map(|f| match f {
                Frame::Message(m) => Some(m.headline().to_string()),
                Frame::Status(_) => None,
            })
            .collect()
    }

    /// Hold 5 s, release: ends in `Armed`.
    fn arm(&mut self) {
        self.drive(true, 5050);
        assert_eq!(self.state(), ButtonState::Ready);
        self.drive(false, 500);
        assert_eq!(self.state(), ButtonState::Armed);
    }
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn test_short_hold_stays_normal() {
    let mut rig = Rig::new();
    rig.drive(true, 4900);
    rig.drive(false, 2000);
    assert!(rig.state().is_normal());
    assert!(rig.messages().is_empty());
    assert_eq!(rig.reboots(), 0);
}

#[test]
fn test_full_sequence_reboots_once() {
    let mut rig = Rig::new();
    rig.arm();

    // Countdown starts at 5.55 s and steps at 6.55 … 10.55 s.
    rig.drive(true, 5000);
    assert_eq!(rig.state().remaining(), Some(1));
    assert_eq!(rig.reboots(), 0);

    rig.drive(true, 50);
    assert_eq!(rig.reboots(), 1);
    assert!(rig.scheduler.is_halted());
    assert_eq!(rig.state(), ButtonState::Rebooting);

    assert_eq!(
        rig.messages(),
        [
            "Ready to Reboot",
            "Ready to Reboot",
            "Reboot in 5",
            "Reboot in 4",
            "Reboot in 3",
            "Reboot in 2",
            "Reboot in 1",
            "Rebooting...",
        ]
    );

    // Nothing resumes after the reboot request.
    let frames = rig.scheduler.sink().0.len();
    rig.drive(false, 3000);
    rig.drive(true, 10_000);
    assert_eq!(rig.reboots(), 1);
    assert_eq!(rig.scheduler.sink().0.len(), frames);
    assert_eq!(
        rig.scheduler.tick(rig.t0 + rig.t).unwrap(),
        TickOutcome::Halted
    );
}

#[test]
fn test_reboot_fires_even_if_final_frame_fails() {
    let sink = Recorder(Vec::new(), Some(messages::REBOOTING));
    let mut rig = Rig::with(sink, DryRunReboot::new());
    rig.arm();
    rig.drive(true, 5000);
    assert_eq!(rig.state().remaining(), Some(1));

    // The 1 -> 0 tick: the panel rejects the frame, the reboot still happens.
    let err = rig.tick(true).unwrap_err();
    assert!(matches!(err, AgentError::Display(_)));
    assert_eq!(rig.reboots(), 1);
    assert!(rig.scheduler.is_halted());
    assert_eq!(rig.state(), ButtonState::Rebooting);

    assert_eq!(rig.tick(true).unwrap(), TickOutcome::Halted);
    assert_eq!(rig.reboots(), 1);
}

#[test]
fn test_failed_reboot_halts_without_resuming() {
    let mut rig = Rig::with(Recorder::default(), Refused::default());
    rig.arm();
    rig.drive(true, 5050);

    assert_eq!(rig.scheduler.reboot_action().0, 1);
    assert!(rig.scheduler.is_halted());
    assert_eq!(rig.state(), ButtonState::Rebooting);
    assert_eq!(
        rig.messages().last().map(String::as_str),
        Some(messages::REBOOTING)
    );

    // Another release and long press change nothing.
    let frames = rig.scheduler.sink().0.len();
    for pressed in [false, true] {
        for _ in 0..200 {
            assert_eq!(rig.tick(pressed).unwrap(), TickOutcome::Halted);
        }
    }
    assert_eq!(rig.scheduler.reboot_action().0, 1);
    assert_eq!(rig.scheduler.sink().0.len(), frames);
}

#[test]
fn test_single_long_press_never_reboots() {
    let mut rig = Rig::new();
    rig.drive(true, 60_000);
    assert_eq!(rig.state(), ButtonState::Ready);
    assert_eq!(rig.reboots(), 0);
    assert_eq!(rig.messages(), ["Ready to Reboot"]);
}

#[test]
fn test_release_mid_countdown_cancels_then_recovers() {
    let mut rig = Rig::new();
    rig.arm();

    rig.drive(true, 2000);
    assert_eq!(rig.state().remaining(), Some(4));
    rig.drive(false, 50);
    assert!(matches!(rig.state(), ButtonState::Cancelled { .. }));

    // Cancelled for 5 s (entered at 7.55 s).
    rig.drive(false, 4950);
    assert!(matches!(rig.state(), ButtonState::Cancelled { .. }));
    let before = rig.scheduler.sink().0.len();

    rig.drive(false, 50);
    assert!(rig.state().is_normal());
    // Status refresh resumes on the same tick.
    let frames = &rig.scheduler.sink().0;
    assert_eq!(frames.len(), before + 1);
    assert!(matches!(frames.last(), Some(Frame::Status(_))));

    assert_eq!(rig.reboots(), 0);
    assert_eq!(rig.messages().last().map(String::as_str), Some("Reboot Cancelled"));
}

#[test]
fn test_hold_through_cancel_expiry_needs_a_new_qualifying_hold() {
    let mut rig = Rig::new();
    rig.arm();
    rig.drive(true, 1000);
    rig.drive(false, 50);
    // Press again during the cancel message and keep holding.
    rig.drive(true, 5000);
    assert!(rig.state().is_normal());
    // Tracking restarted when Normal was re-entered; 4.9 s more is not enough.
    rig.drive(true, 4900);
    assert!(rig.state().is_normal());
    rig.drive(true, 200);
    assert_eq!(rig.state(), ButtonState::Ready);
    assert_eq!(rig.reboots(), 0);
}

#[test]
fn test_status_frames_carry_metrics() {
    let mut rig = Rig::new();
    rig.drive(false, 2100);
    let frames = &rig.scheduler.sink().0;
    assert_eq!(frames.len(), 2);
    match &frames[1] {
        Frame::Status(s) => {
            assert_eq!(s.host, "scenario-pi");
            assert_eq!(s.ip, Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 50))));
            assert!((s.cpu_percent - 10.0).abs() < 1e-3);
            assert!((s.peak_percent - 10.0).abs() < 1e-3);
            assert_eq!(s.temperature_celsius, 47.5);
        }
        other => panic!("expected status frame, got {other:?}"),
    }
}

#[test]
fn test_render_failure_is_fatal() {
    let t0 = Instant::now();
    let mut scheduler = Scheduler::new(
        StaticHost { reads: 0 },
        Line(Rc::new(Cell::new(false))),
        DeadPanel,
        DryRunReboot::new(),
        Duration::from_secs(1),
        t0,
    );
    assert!(scheduler.tick(t0).is_ok());
    let err = scheduler.tick(t0 + Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, AgentError::Display(_)));
}

// ── Async loop ─────────────────────────────────────────────────

/// Input driven by virtual time since `start`.
struct Timeline {
    start: tokio::time::Instant,
    pressed: fn(Duration) -> bool,
}

impl InputSource for Timeline {
    fn is_pressed(&mut self) -> Result<bool, AgentError> {
        Ok((self.pressed)(self.start.elapsed()))
    }
}

fn timeline_scheduler(
    pressed: fn(Duration) -> bool,
) -> Scheduler<StaticHost, Timeline, Recorder, DryRunReboot> {
    let start = tokio::time::Instant::now();
    Scheduler::new(
        StaticHost { reads: 0 },
        Timeline { start, pressed },
        Recorder::default(),
        DryRunReboot::new(),
        Duration::from_secs(1),
        start.into_std(),
    )
}

#[tokio::test(start_paused = true)]
async fn test_run_loop_reboots_then_idles_until_shutdown() {
    let mut scheduler = timeline_scheduler(|t| {
        let ms = t.as_millis();
        ms < 5200 || (6000..30_000).contains(&ms)
    });

    scheduler
        .run(TICK_PERIOD, tokio::time::sleep(Duration::from_secs(40)))
        .await
        .unwrap();

    assert!(scheduler.is_halted());
    assert_eq!(scheduler.reboot_action().invocations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_run_loop_stops_on_shutdown() {
    let mut scheduler = timeline_scheduler(|_| false);
    scheduler
        .run(TICK_PERIOD, tokio::time::sleep(Duration::from_millis(3500)))
        .await
        .unwrap();

    assert!(!scheduler.is_halted());
    assert!(scheduler.button_state().is_normal());
    assert_eq!(scheduler.sink().0.len(), 3);
}
