// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `oled-agent run`: the long-running agent.
//!
//! ```text
//! open button → open panel (cleared) → prime CPU → 100 ms → warm-up frame → tick loop
//! ```

use host_metrics::{SysfsMetrics, SAMPLE_WINDOW};
use oled_display::{LogSink, RenderSink};
use reboot_guard::{
    AgentConfig, DryRunReboot, ExecReboot, InputSource, RebootAction, Scheduler, TICK_PERIOD,
};
use std::time::Instant;

pub async fn execute(config: AgentConfig, no_display: bool, dry_run: bool) -> anyhow::Result<()> {
    let refresh_interval = config.refresh_interval()?;
    tracing::info!(
        gpio = config.button_gpio,
        bus = %config.i2c_bus.display(),
        ?refresh_interval,
        no_display,
        dry_run,
        "starting oled-agent"
    );

    let input = open_button(&config)?;
    let sink = open_sink(&config, no_display)?;
    let reboot: Box<dyn RebootAction> = if dry_run {
        Box::new(DryRunReboot::new())
    } else {
        let exec = ExecReboot::new(&config.reboot_command)?;
        tracing::info!(command = %exec.command_line(), "reboot command armed");
        Box::new(exec)
    };

    let mut scheduler = Scheduler::new(
        SysfsMetrics::new(),
        input,
        sink,
        reboot,
        refresh_interval,
        Instant::now(),
    );

    tokio::time::sleep(SAMPLE_WINDOW).await;
    scheduler.warm_up(Instant::now())?;

    scheduler.run(TICK_PERIOD, super::shutdown_signal()).await?;
    tracing::info!("oled-agent stopped");
    Ok(())
}

#[cfg(feature = "hardware")]
fn open_button(config: &AgentConfig) -> anyhow::Result<Box<dyn InputSource>> {
    let button = reboot_guard::GpioButton::open(config.button_gpio)?;
    Ok(Box::new(button))
}

#[cfg(not(feature = "hardware"))]
fn open_button(_config: &AgentConfig) -> anyhow::Result<Box<dyn InputSource>> {
    anyhow::bail!("built without the `hardware` feature; no button input available")
}

fn open_sink(config: &AgentConfig, no_display: bool) -> anyhow::Result<Box<dyn RenderSink>> {
    if no_display {
        tracing::info!("display disabled; frames go to the log");
        return Ok(Box::new(LogSink::new()));
    }
    open_panel(config)
}

#[cfg(feature = "hardware")]
fn open_panel(config: &AgentConfig) -> anyhow::Result<Box<dyn RenderSink>> {
    let panel = oled_display::Ssd1306Sink::open(&config.i2c_bus, config.i2c_address)?;
    Ok(Box::new(panel))
}

#[cfg(not(feature = "hardware"))]
fn open_panel(_config: &AgentConfig) -> anyhow::Result<Box<dyn RenderSink>> {
    anyhow::bail!("built without the `hardware` feature; use --no-display")
}
