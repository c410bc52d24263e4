// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `oled-agent preview`: draw a frame onto an in-memory canvas and print it.

use host_metrics::{HostSnapshot, SysfsMetrics};
use oled_display::{draw_frame, Canvas, Frame, MessageFrame, StatusFrame, MESSAGE_LINES};
use reboot_guard::STATUS_TEXT;

pub fn execute(message: Vec<String>) -> anyhow::Result<()> {
    if message.len() > MESSAGE_LINES {
        anyhow::bail!("a message has at most {MESSAGE_LINES} lines, got {}", message.len());
    }

    let frame = if message.is_empty() {
        Frame::Status(live_status())
    } else {
        Frame::Message(MessageFrame::new(&message))
    };

    println!("{}", frame.summary());
    print!("{}", render(&frame));
    Ok(())
}

fn live_status() -> StatusFrame {
    let snapshot = HostSnapshot::capture(&mut SysfsMetrics::new());
    StatusFrame {
        host: snapshot.hostname,
        ip: snapshot.ip,
        status: STATUS_TEXT.to_string(),
        cpu_percent: snapshot.cpu_percent,
        peak_percent: snapshot.cpu_percent,
        temperature_celsius: snapshot.temperature_celsius,
    }
}

fn render(frame: &Frame) -> String {
    let mut canvas = Canvas::new();
    draw_frame(&mut canvas, frame).unwrap_or_else(|never| match never {});
    canvas.to_ascii()
}
