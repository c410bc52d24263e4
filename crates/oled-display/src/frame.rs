// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Frame contents, independent of any pixel format.

use std::net::IpAddr;

/// Maximum characters per text line (21 × 6 px glyphs fit in 128 px).
pub const MAX_CHARS: usize = 21;

/// Maximum number of lines a message frame can hold.
pub const MESSAGE_LINES: usize = 3;

/// Placeholder shown on the IP line until an address is known.
pub const NOT_CONNECTED: &str = "Not connected";

/// Truncates `text` to at most [`MAX_CHARS`] characters.
pub fn clamp_line(text: &str) -> &str {
    clamp_to(text, MAX_CHARS)
}

pub(crate) fn clamp_to(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Something the display can show; a new frame replaces the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Host status with CPU bar.
    Status(StatusFrame),
    /// Up to three plain text lines.
    Message(MessageFrame),
}

impl Frame {
    /// Short description for logs.
    pub fn summary(&self) -> String {
        match self {
            Frame::Status(s) => format!(
                "status[{} | {} | {} | cpu {:.1}% peak {:.1}% | {}]",
                s.host,
                s.ip_line(),
                s.status_line(),
                s.cpu_percent,
                s.peak_percent,
                s.temperature_text(),
            ),
            Frame::Message(m) => format!("message[{}]", m.lines().join(" / ")),
        }
    }

    /// Returns `true` for message frames.
    pub fn is_message(&self) -> bool {
        matches!(self, Frame::Message(_))
    }
}

/// Host status: hostname + temperature, IP, status text, CPU bar and peak tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusFrame {
    pub host: String,
    pub ip: Option<IpAddr>,
    pub status: String,
    pub cpu_percent: f32,
    pub peak_percent: f32,
    pub temperature_celsius: f32,
}

impl StatusFrame {
    /// Right-hand side of line 1, e.g. `"48.3C"`.
    pub fn temperature_text(&self) -> String {
        format!("{:.1}C", self.temperature_celsius)
    }

    /// Line 1 left-hand side, shortened so it never runs into the temperature.
    pub fn host_text(&self) -> &str {
        let reserved = self.temperature_text().chars().count() + 1;
        clamp_to(&self.host, MAX_CHARS.saturating_sub(reserved))
    }

    /// Line 2.
    pub fn ip_line(&self) -> String {
        let line = match self.ip {
            Some(ip) => format!("IP: {ip}"),
            None => format!("IP: {NOT_CONNECTED}"),
        };
        clamp_line(&line).to_string()
    }

    /// Line 3.
    pub fn status_line(&self) -> String {
        clamp_line(&format!("Status: {}", self.status)).to_string()
    }
}

/// A short message replacing the status view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFrame {
    lines: Vec<String>,
}

impl MessageFrame {
    /// Builds a message from up to [`MESSAGE_LINES`] lines; extra lines are
    /// dropped and each line is clamped to [`MAX_CHARS`].
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .take(MESSAGE_LINES)
                .map(|l| clamp_line(l.as_ref()).to_string())
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First line, or `""` for an empty message.
    pub fn headline(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }
}
