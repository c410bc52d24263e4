// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `oled-agent status`: print what the status frame would show.
//!
//! Reads hostname, IP, temperature and CPU load from procfs/sysfs. On
//! boards without a thermal zone the temperature reads 0.0 C.

use host_metrics::{HostSnapshot, SysfsMetrics};
use oled_display::NOT_CONNECTED;

pub fn execute() -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              oled-agent · Host Status               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let snapshot = HostSnapshot::capture(&mut SysfsMetrics::new());

    // ── Host ───────────────────────────────────────────────────
    println!("  Host");
    println!("   Hostname:     {}", snapshot.hostname);
    match snapshot.ip {
        Some(ip) => println!("   IP:           {ip}"),
        None => println!("   IP:           {NOT_CONNECTED}"),
    }
    println!();

    // ── Load ───────────────────────────────────────────────────
    println!("  Load");
    let temp = f64::from(snapshot.temperature_celsius);
    println!("   Temperature:  {temp:.1} C  {}", temp_bar(temp));
    let cpu = f64::from(snapshot.cpu_percent);
    println!("   CPU:          {cpu:.1}%  {}", usage_bar(cpu / 100.0));
    println!();
    println!("{}", snapshot.summary());

    Ok(())
}

/// Creates a visual temperature bar (0-100 C scale).
fn temp_bar(celsius: f64) -> String {
    let symbol = if celsius >= 80.0 {
        "#"
    } else if celsius >= 60.0 {
        "="
    } else {
        "-"
    };
    bar(celsius / 100.0, symbol)
}

/// Creates a visual usage bar (0.0-1.0 scale).
fn usage_bar(ratio: f64) -> String {
    let symbol = if ratio >= 0.9 {
        "#"
    } else if ratio >= 0.7 {
        "="
    } else {
        "-"
    };
    bar(ratio, symbol)
}

fn bar(ratio: f64, symbol: &str) -> String {
    let filled = ((ratio * 20.0).round().max(0.0) as usize).min(20);
    format!("[{}{}]", symbol.repeat(filled), ".".repeat(20 - filled))
}
