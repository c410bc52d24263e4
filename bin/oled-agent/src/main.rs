// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # oled-agent
//!
//! Shows host status on a 128x32 OLED and reboots the board after a
//! deliberate two-stage press of a GPIO button.
//!
//! ## Usage
//! ```bash
//! # Run the agent (default command)
//! oled-agent run --config /etc/oled-agent.toml
//!
//! # Exercise the button logic without a panel or a real reboot
//! oled-agent run --no-display --dry-run
//!
//! # One-shot host status
//! oled-agent status
//!
//! # Render a frame as ASCII art
//! oled-agent preview --message "Ready to Reboot" --message "Release button"
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "oled-agent",
    about = "OLED status display and reboot button agent",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Status refresh interval in seconds (overrides the config file).
    #[arg(short, long, global = true)]
    interval: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the display and watch the reboot button (default).
    Run {
        /// Log frames instead of drawing them on the panel.
        #[arg(long)]
        no_display: bool,

        /// Log the reboot instead of executing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a one-shot host status summary.
    Status,

    /// Render a frame to the terminal as ASCII art.
    Preview {
        /// Message line to render instead of the live status (up to 3).
        #[arg(short, long)]
        message: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run {
        no_display: false,
        dry_run: false,
    });

    match command {
        Commands::Run {
            no_display,
            dry_run,
        } => {
            let config = commands::load_config(cli.config.as_deref(), cli.interval)?;
            commands::run::execute(config, no_display, dry_run).await
        }
        Commands::Status => commands::status::execute(),
        Commands::Preview { message } => commands::preview::execute(message),
    }
}
