// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CPU utilisation from `/proc/stat` counter deltas.
//!
//! The aggregate `cpu` line of `/proc/stat` holds cumulative jiffy counters:
//! `user nice system idle iowait irq softirq steal guest guest_nice`.
//! Two snapshots taken some time apart give utilisation as
//! `100 * (1 - Δidle / Δtotal)`, where idle includes iowait.
//!
//! [`CpuTracker`] keeps the latest snapshot and a 10-sample history whose
//! maximum is shown as the rolling peak.

use crate::thermal::read_sysfs_file;
use crate::MonitorError;
use std::collections::VecDeque;
use std::path::Path;

/// Default procfs path for kernel CPU counters.
pub(crate) const PROC_STAT_PATH: &str = "/proc/stat";

/// Number of samples retained for the rolling peak.
pub const HISTORY_CAPACITY: usize = 10;

/// One `(idle, total)` counter snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CpuTimes {
    /// Idle + iowait jiffies.
    pub idle: u64,
    /// Sum of all jiffy counters.
    pub total: u64,
}

impl CpuTimes {
    /// Creates a snapshot from raw counters.
    pub fn new(idle: u64, total: u64) -> Self {
        Self { idle, total }
    }

    /// Reads the aggregate counters from `/proc/stat`.
    pub fn read() -> Result<Self, MonitorError> {
        Self::read_from(Path::new(PROC_STAT_PATH))
    }

    pub(crate) fn read_from(path: &Path) -> Result<Self, MonitorError> {
        let content = read_sysfs_file(path)?;
        Self::parse(&content, path)
    }

    /// Parses the first (`cpu `) line of a `/proc/stat`-formatted string.
    pub(crate) fn parse(content: &str, source_path: &Path) -> Result<Self, MonitorError> {
        let parse_err = |detail: String| MonitorError::ParseError {
            path: source_path.display().to_string(),
            detail,
        };

        let line = content
            .lines()
            .next()
            .ok_or_else(|| parse_err("empty file".to_string()))?;
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("cpu") => {}
            other => {
                return Err(parse_err(format!(
                    "expected aggregate 'cpu' line, got '{}'",
                    other.unwrap_or("")
                )))
            }
        }

        let values = fields
            .map(|f| {
                f.parse::<u64>()
                    .map_err(|_| parse_err(format!("non-numeric counter '{f}'")))
            })
            .collect::<Result<Vec<u64>, _>>()?;

        // idle (4th) and iowait (5th) must both be present.
        if values.len() < 5 {
            return Err(parse_err(format!(
                "expected at least 5 counters, got {}",
                values.len()
            )));
        }

        Ok(Self {
            idle: values[3] + values[4],
            total: values.iter().sum(),
        })
    }
}

/// Computes utilisation in percent between two snapshots.
///
/// Returns exactly `0.0` when the total counter did not advance (or went
/// backwards); otherwise the result is clamped to `[0.0, 100.0]`.
pub fn utilization(prev: CpuTimes, cur: CpuTimes) -> f32 {
    let d_total = cur.total as i128 - prev.total as i128;
    if d_total <= 0 {
        return 0.0;
    }
    let d_idle = cur.idle as i128 - prev.idle as i128;
    let used = 100.0 * (1.0 - d_idle as f64 / d_total as f64);
    used.clamp(0.0, 100.0) as f32
}

/// Converts successive snapshots into percentages and tracks the rolling peak.
#[derive(Debug, Clone)]
pub struct CpuTracker {
    prev: Option<CpuTimes>,
    history: VecDeque<f32>,
    current: f32,
    peak: f32,
}

impl CpuTracker {
    /// Creates a tracker with no baseline and an empty history.
    pub fn new() -> Self {
        Self {
            prev: None,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            current: 0.0,
            peak: 0.0,
        }
    }

    /// Records a baseline snapshot without producing a sample.
    pub fn prime(&mut self, times: CpuTimes) {
        self.prev = Some(times);
    }

    /// Consumes a new snapshot, appends the resulting percentage and returns it.
    ///
    /// Without a baseline the sample is `0.0`. The new snapshot always
    /// replaces the baseline.
    pub fn update(&mut self, cur: CpuTimes) -> f32 {
        let pct = match self.prev {
            Some(prev) => utilization(prev, cur),
            None => 0.0,
        };
        self.prev = Some(cur);
        self.push(pct)
    }

    /// Appends a percentage directly (used when the counters could not be read).
    pub fn push(&mut self, pct: f32) -> f32 {
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(pct);
        self.current = pct;
        self.peak = self.history.iter().copied().fold(0.0, f32::max);
        pct
    }

    /// The most recent percentage.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Maximum of the retained history.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Retained samples, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().copied()
    }

    /// Number of retained samples (never more than [`HISTORY_CAPACITY`]).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if no sample has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for CpuTracker {
    fn default() -> Self {
        Self::new()
    }
}
