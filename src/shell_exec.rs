//! External command execution.
//!
//! Every subprocess (git, clipboard tools) is spawned through [`run`] or
//! [`run_with_stdin`] so command lines, durations and exit status show up in
//! the debug log the same way.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::time::Instant;

/// Render a command as `program arg1 arg2` for logs and error messages.
pub fn command_line(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Execute a command with timing and debug logging.
///
/// ```text
/// $ git rev-parse --verify HEAD [permalink]
/// [pl-trace] context=permalink cmd="..." dur=3.1ms ok=true
/// ```
///
/// The `context` parameter is typically the repository directory name for
/// git commands, or `None` for standalone tools.
pub fn run(cmd: &mut Command, context: Option<&str>) -> std::io::Result<Output> {
    let cmd_str = command_line(cmd);
    match context {
        Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
        None => log::debug!("$ {}", cmd_str),
    }

    let t0 = Instant::now();
    let result = cmd.output();
    trace(&cmd_str, context, t0, &result);
    result
}

/// Execute a command, feeding `input` to its stdin.
///
/// Stdout and stderr are captured; the child is waited on before returning.
pub fn run_with_stdin(
    cmd: &mut Command,
    input: &[u8],
    context: Option<&str>,
) -> std::io::Result<Output> {
    let cmd_str = command_line(cmd);
    match context {
        Some(ctx) => log::debug!("$ {} <stdin> [{}]", cmd_str, ctx),
        None => log::debug!("$ {} <stdin>", cmd_str),
    }

    let t0 = Instant::now();
    let result = spawn_and_feed(cmd, input);
    trace(&cmd_str, context, t0, &result);
    result
}

fn spawn_and_feed(cmd: &mut Command, input: &[u8]) -> std::io::Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input)?;
        // stdin drops here, closing the pipe so the tool sees EOF
    }
    child.wait_with_output()
}

fn trace(
    cmd_str: &str,
    context: Option<&str>,
    t0: Instant,
    result: &std::io::Result<Output>,
) {
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let ctx = context.map(|c| format!("context={c} ")).unwrap_or_default();
    match result {
        Ok(output) => log::debug!(
            "[pl-trace] {}cmd=\"{}\" dur={:.1}ms ok={}",
            ctx,
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[pl-trace] {}cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            ctx,
            cmd_str,
            duration_ms,
            e
        ),
    }
}
