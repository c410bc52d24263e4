// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Input and reboot capabilities.

use crate::AgentError;
use std::os::unix::process::CommandExt;
use std::process::Command;

/// Supplies the state of the reboot line. `true` means pressed.
///
/// Errors are fatal to the agent.
pub trait InputSource {
    fn is_pressed(&mut self) -> Result<bool, AgentError>;
}

/// The privileged, irreversible reboot.
///
/// A successful call normally never returns. `Ok(())` means the request was
/// handed off and the caller should wait for the system to go down.
pub trait RebootAction {
    fn reboot(&mut self) -> Result<(), AgentError>;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn is_pressed(&mut self) -> Result<bool, AgentError> {
        (**self).is_pressed()
    }
}

impl<T: RebootAction + ?Sized> RebootAction for Box<T> {
    fn reboot(&mut self) -> Result<(), AgentError> {
        (**self).reboot()
    }
}

/// Replaces the agent process with a reboot command (e.g. `/sbin/reboot`).
#[derive(Debug, Clone)]
pub struct ExecReboot {
    program: String,
    args: Vec<String>,
}

impl ExecReboot {
    /// `argv[0]` is the program, the rest are its arguments.
    pub fn new(argv: &[String]) -> Result<Self, AgentError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| AgentError::ConfigError("empty reboot command".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl RebootAction for ExecReboot {
    fn reboot(&mut self) -> Result<(), AgentError> {
        tracing::warn!(command = %self.command_line(), "executing reboot");
        // exec only returns on failure.
        let source = Command::new(&self.program).args(&self.args).exec();
        Err(AgentError::Reboot {
            command: self.command_line(),
            source,
        })
    }
}

/// Logs instead of rebooting; for bench testing the button sequence.
#[derive(Debug, Default)]
pub struct DryRunReboot {
    invocations: u32,
}

impl DryRunReboot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> u32 {
        self.invocations
    }
}

impl RebootAction for DryRunReboot {
    fn reboot(&mut self) -> Result<(), AgentError> {
        self.invocations += 1;
        tracing::warn!("dry run: reboot requested, not rebooting");
        Ok(())
    }
}
