use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{ArgAction, Parser, Subcommand};

/// Help colors
fn help_styles() -> Styles {
    let bold = |color| {
        anstyle::Style::new()
            .bold()
            .fg_color(Some(Color::Ansi(color)))
    };
    Styles::styled()
        .header(bold(AnsiColor::Green))
        .usage(bold(AnsiColor::Green))
        .literal(bold(AnsiColor::Cyan))
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Green))
        .invalid(bold(AnsiColor::Yellow))
}

#[derive(Parser)]
#[command(name = "permalink")]
#[command(about = "Link to lines of code at the nearest pushed commit", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(styles = help_styles())]
pub struct Cli {
    /// Change working directory
    #[arg(short = 'C', global = true, value_name = "path")]
    pub directory: Option<PathBuf>,

    /// Show commands and debug info (-vv for more)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// User config file
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// How many commits back to look for a pushed commit
    #[arg(long, global = true, value_name = "n")]
    pub max_depth: Option<u32>,

    /// Print the link without copying it
    #[arg(long, global = true)]
    pub no_copy: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Link to a line or range of lines
    ///
    /// Line numbers refer to the file as it is now; they are translated to the
    /// pushed commit the link points at.
    Range {
        file: PathBuf,
        /// First line (1-based)
        start: usize,
        /// Last line, defaults to START
        end: Option<usize>,
    },

    /// Link to the whole file
    File { file: PathBuf },
}
