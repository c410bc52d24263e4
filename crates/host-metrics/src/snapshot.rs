// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One-shot host report for the `status` command.

use crate::{utilization, MetricSource};
use std::net::IpAddr;
use std::time::Duration;

/// Interval between the two CPU counter samples of a one-shot reading.
pub const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// A point-in-time reading of everything the status frame shows.
///
/// Unreadable metrics are already degraded: temperature and CPU to `0.0`,
/// hostname to `"unknown"`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HostSnapshot {
    pub hostname: String,
    pub ip: Option<IpAddr>,
    pub temperature_celsius: f32,
    pub cpu_percent: f32,
}

impl HostSnapshot {
    /// Captures a snapshot, sampling CPU counters [`SAMPLE_WINDOW`] apart.
    pub fn capture<M: MetricSource>(source: &mut M) -> Self {
        let hostname = source.hostname().unwrap_or_else(|e| {
            tracing::warn!("hostname unavailable: {e}");
            "unknown".to_string()
        });
        let ip = source.probe_ip();
        let temperature_celsius = source.temperature().unwrap_or_else(|e| {
            tracing::debug!("temperature unavailable: {e}");
            0.0
        });

        let cpu_percent = match source.cpu_times() {
            Ok(prev) => {
                std::thread::sleep(SAMPLE_WINDOW);
                source
                    .cpu_times()
                    .map(|cur| utilization(prev, cur))
                    .unwrap_or(0.0)
            }
            Err(e) => {
                tracing::debug!("cpu counters unavailable: {e}");
                0.0
            }
        };

        Self {
            hostname,
            ip,
            temperature_celsius,
            cpu_percent,
        }
    }

    /// Single-line summary for logging.
    ///
    /// ```text
    /// Host: raspberrypi, IP 192.168.1.42, CPU 12.5%, Temp 48.3°C
    /// ```
    pub fn summary(&self) -> String {
        let ip = match self.ip {
            Some(ip) => ip.to_string(),
            None => "not connected".to_string(),
        };
        format!(
            "Host: {}, IP {ip}, CPU {:.1}%, Temp {:.1}°C",
            self.hostname, self.cpu_percent, self.temperature_celsius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CpuTimes, MonitorError};
    use std::net::Ipv4Addr;

    struct Fixed {
        samples: Vec<CpuTimes>,
    }

    impl MetricSource for Fixed {
        fn hostname(&mut self) -> Result<String, MonitorError> {
            Ok("bench-pi".into())
        }
        fn probe_ip(&mut self) -> Option<IpAddr> {
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)))
        }
        fn temperature(&mut self) -> Result<f32, MonitorError> {
            Err(MonitorError::NotAvailable {
                path: "thermal".into(),
            })
        }
        fn cpu_times(&mut self) -> Result<CpuTimes, MonitorError> {
            Ok(self.samples.remove(0))
        }
    }

    #[test]
    fn test_capture_degrades_and_samples() {
        let mut src = Fixed {
            samples: vec![CpuTimes::new(0, 0), CpuTimes::new(60, 100)],
        };
        let snap = HostSnapshot::capture(&mut src);
        assert_eq!(snap.hostname, "bench-pi");
        assert_eq!(snap.temperature_celsius, 0.0);
        assert!((snap.cpu_percent - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_summary_format() {
        let snap = HostSnapshot {
            hostname: "raspberrypi".into(),
            ip: None,
            temperature_celsius: 48.26,
            cpu_percent: 12.5,
        };
        let s = snap.summary();
        assert!(s.contains("raspberrypi"));
        assert!(s.contains("not connected"));
        assert!(s.contains("48.3°C"));
        assert!(s.contains("12.5%"));
    }
}
