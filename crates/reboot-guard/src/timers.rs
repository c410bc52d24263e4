// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Deadline timers polled from the scheduler tick.

use std::time::{Duration, Instant};

/// IP re-probe cadence while no usable address is known.
pub const PROBE_FAST: Duration = Duration::from_millis(500);
/// IP re-probe cadence once connected.
pub const PROBE_SLOW: Duration = Duration::from_secs(5);

/// A single deadline plus the interval used to compute the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval: Duration,
    deadline: Instant,
}

impl IntervalTimer {
    /// First due at `first_due`.
    pub fn new(interval: Duration, first_due: Instant) -> Self {
        Self {
            interval,
            deadline: first_due,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Returns `true` and re-arms if due.
    ///
    /// The next deadline is `deadline + interval`, so the cadence does not
    /// drift with tick jitter. If that is already in the past (the timer was
    /// not polled for a while) it re-anchors to `now + interval` instead of
    /// firing a burst of catch-up events.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        let next = self.deadline + self.interval;
        self.deadline = if next <= now { now + self.interval } else { next };
        true
    }

    /// Makes the timer due at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.deadline = now;
    }

    /// Sets a new interval and schedules the next deadline from `now`.
    pub fn rearm(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.deadline = now + interval;
    }
}

/// IP probe timer: fast cadence until an address is seen, slow afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimer {
    timer: IntervalTimer,
}

impl ProbeTimer {
    /// Due immediately, at the fast cadence.
    pub fn new(now: Instant) -> Self {
        Self {
            timer: IntervalTimer::new(PROBE_FAST, now),
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.timer.is_due(now)
    }

    /// Schedules the next probe based on the outcome of the one just made.
    pub fn record(&mut self, connected: bool, now: Instant) {
        let interval = if connected { PROBE_SLOW } else { PROBE_FAST };
        if interval != self.timer.interval() {
            tracing::debug!(?interval, connected, "ip probe cadence changed");
        }
        self.timer.rearm(interval, now);
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    pub fn deadline(&self) -> Instant {
        self.timer.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_poll_fires_when_due() {
        let t0 = Instant::now();
        let mut t = IntervalTimer::new(ms(1000), t0 + ms(1000));
        assert!(!t.poll(t0 + ms(999)));
        assert!(t.poll(t0 + ms(1000)));
        assert!(!t.poll(t0 + ms(1000)));
        assert_eq!(t.deadline(), t0 + ms(2000));
    }

    #[test]
    fn test_no_drift_with_late_ticks() {
        let t0 = Instant::now();
        let mut t = IntervalTimer::new(ms(1000), t0);
        // Each poll lands 30 ms late; deadlines stay on the 1 s grid.
        for k in 0..10u64 {
            assert!(t.poll(t0 + ms(k * 1000 + 30)));
            assert_eq!(t.deadline(), t0 + ms((k + 1) * 1000));
        }
    }

    #[test]
    fn test_reanchors_after_long_gap() {
        let t0 = Instant::now();
        let mut t = IntervalTimer::new(ms(1000), t0);
        assert!(t.poll(t0 + ms(7300)));
        assert_eq!(t.deadline(), t0 + ms(8300));
        assert!(!t.poll(t0 + ms(7350)));
    }

    #[test]
    fn test_expire() {
        let t0 = Instant::now();
        let mut t = IntervalTimer::new(ms(10_000), t0 + ms(10_000));
        t.expire(t0 + ms(10));
        assert!(t.is_due(t0 + ms(10)));
    }

    #[test]
    fn test_probe_cadence_adapts() {
        let t0 = Instant::now();
        let mut p = ProbeTimer::new(t0);
        assert!(p.is_due(t0));

        p.record(false, t0);
        assert_eq!(p.interval(), PROBE_FAST);
        assert_eq!(p.deadline(), t0 + PROBE_FAST);

        p.record(true, t0 + ms(500));
        assert_eq!(p.interval(), PROBE_SLOW);
        assert!(!p.is_due(t0 + ms(5499)));
        assert!(p.is_due(t0 + ms(5500)));

        p.record(false, t0 + ms(5500));
        assert_eq!(p.interval(), PROBE_FAST);
    }
}
