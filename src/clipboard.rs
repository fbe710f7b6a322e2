//! Writing text to the system clipboard.
//!
//! A configured command always wins. Otherwise the first platform tool found
//! on `PATH` is used.

use std::path::PathBuf;
use std::process::Command;

use color_print::cformat;

use crate::config::ClipboardConfig;
use crate::shell_exec::{command_line, run_with_stdin};
use crate::styling::{error_message, format_with_gutter, hint_message};

/// Errors from copying to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No command configured and no known tool on `PATH`
    NoTool,
    Failed {
        command: String,
        error: String,
    },
}

impl std::error::Error for ClipboardError {}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::NoTool => write!(
                f,
                "{}\n{}",
                error_message("No clipboard tool found"),
                hint_message(cformat!(
                    "Install one of pbcopy, wl-copy, xclip or xsel, or set <bright-black>[clipboard] command</> in the config"
                ))
            ),

            ClipboardError::Failed { command, error } => {
                write!(
                    f,
                    "{}",
                    error_message(cformat!(
                        "Failed to copy to clipboard: <bright-black>{command}</>"
                    ))
                )?;
                if !error.trim().is_empty() {
                    write!(f, "\n{}", format_with_gutter(error))?;
                }
                Ok(())
            }
        }
    }
}

/// A clipboard program and the arguments that make it read stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Candidates in preference order: `(program, args)`.
fn candidates(wayland: bool) -> Vec<(&'static str, &'static [&'static str])> {
    let mut tools: Vec<(&'static str, &'static [&'static str])> = Vec::new();
    if cfg!(target_os = "macos") {
        tools.push(("pbcopy", &[]));
    }
    if cfg!(target_os = "windows") {
        tools.push(("clip", &[]));
    }
    if wayland {
        tools.push(("wl-copy", &[]));
    }
    tools.push(("xclip", &["-selection", "clipboard"]));
    tools.push(("xsel", &["--clipboard", "--input"]));
    tools
}

impl ClipboardTool {
    /// Pick the tool to use, or `None` if nothing is available.
    pub fn detect(config: &ClipboardConfig) -> Option<Self> {
        if let Some(program) = &config.command {
            return Some(Self {
                program: PathBuf::from(program),
                args: config.args.clone(),
            });
        }

        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        candidates(wayland)
            .into_iter()
            .find_map(|(name, args)| match which::which(name) {
                Ok(program) => Some(Self {
                    program,
                    args: args.iter().map(|a| a.to_string()).collect(),
                }),
                Err(_) => {
                    log::debug!("Clipboard tool {name} not found");
                    None
                }
            })
    }

    /// Feed `text` to the tool's stdin.
    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        let command = command_line(&cmd);

        let output = run_with_stdin(&mut cmd, text.as_bytes(), None).map_err(|e| {
            ClipboardError::Failed {
                command: command.clone(),
                error: e.to_string(),
            }
        })?;
        if !output.status.success() {
            return Err(ClipboardError::Failed {
                command,
                error: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Copy `text` with the configured or detected tool.
pub fn copy_to_clipboard(text: &str, config: &ClipboardConfig) -> Result<(), ClipboardError> {
    let tool = ClipboardTool::detect(config).ok_or(ClipboardError::NoTool)?;
    tool.copy(text)
}
