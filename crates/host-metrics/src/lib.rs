// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # host-metrics
//!
//! Reads the handful of host metrics a status display needs from `/proc`
//! and `/sys`, and turns raw CPU counters into a utilisation percentage with
//! a rolling peak.
//!
//! # Metrics
//! - **Hostname**: `/proc/sys/kernel/hostname`.
//! - **Outbound IP**: non-blocking UDP route lookup.
//! - **SoC temperature**: `/sys/class/thermal/thermal_zone0/temp`.
//! - **CPU counters**: aggregate `cpu` line of `/proc/stat`.
//!
//! # Graceful Degradation
//! Readers return [`MonitorError`] values; nothing here panics or blocks
//! on the network. Callers decide on fallbacks.
//!
//! # Example
//! ```no_run
//! use host_metrics::{CpuTracker, MetricSource, SysfsMetrics};
//!
//! let mut source = SysfsMetrics::new();
//! let mut tracker = CpuTracker::new();
//! tracker.prime(source.cpu_times().expect("no /proc/stat"));
//! std::thread::sleep(std::time::Duration::from_secs(1));
//! let pct = tracker.update(source.cpu_times().expect("no /proc/stat"));
//! println!("cpu {pct:.1}% (peak {:.1}%)", tracker.peak());
//! ```

mod cpu;
mod error;
mod network;
mod snapshot;
mod source;
pub(crate) mod thermal;

pub use cpu::{utilization, CpuTimes, CpuTracker, HISTORY_CAPACITY};
pub use error::MonitorError;
pub use network::{is_usable, probe_outbound_ip, read_hostname};
pub use snapshot::{HostSnapshot, SAMPLE_WINDOW};
pub use source::{MetricSource, SysfsMetrics};
pub use thermal::read_temperature;
