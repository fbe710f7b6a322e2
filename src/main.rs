use std::io::Write;
use std::process;

use clap::Parser;
use color_print::cformat;
use permalink::clipboard::{ClipboardError, copy_to_clipboard};
use permalink::config::{UserConfig, set_config_path};
use permalink::git::{GitError, Repository, set_base_path};
use permalink::permalink::{LineSelection, resolve};
use permalink::styling::{
    eprintln, error_message, hint_message, println, success_message, warning_message,
};
use permalink::translate::LineRange;

mod cli;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(dir) = &cli.directory {
        set_base_path(dir.clone());
    }
    if let Some(path) = &cli.config {
        set_config_path(path.clone());
    }

    if let Err(e) = run(cli) {
        if let Some(git_err) = e.downcast_ref::<GitError>() {
            eprintln!("{git_err}");
        } else if let Some(clip_err) = e.downcast_ref::<ClipboardError>() {
            eprintln!("{clip_err}");
        } else {
            eprintln!("{}", error_message(format!("{e:#}")));
        }
        process::exit(1);
    }
}

/// `warn` by default, `-v` for info, `-vv` for debug. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = UserConfig::load()?;
    if let Some(depth) = cli.max_depth {
        config.max_depth = Some(depth);
    }
    if cli.no_copy {
        config.copy = Some(false);
    }

    let (file, selection) = match cli.command {
        Commands::Range { file, start, end } => {
            let range = LineRange::new(start, end.unwrap_or(start))?;
            (file, LineSelection::Lines(range))
        }
        Commands::File { file } => (file, LineSelection::WholeFile),
    };

    let repo = Repository::current();
    let link = resolve(&repo, &file, selection, config.search_limits())?;
    let short = link.published.commit.short();

    if !link.file_at_commit {
        eprintln!(
            "{}",
            warning_message(cformat!(
                "<bold>{}</> does not exist at <bold>{short}</>; the link won't resolve until it is pushed",
                link.path
            ))
        );
    }

    println!("{}", link.url);

    if config.copy() {
        match copy_to_clipboard(&link.url, &config.clipboard) {
            Ok(()) => eprintln!(
                "{}",
                success_message(cformat!(
                    "Copied link to <bold>{}</> at <bold>{short}</> ({})",
                    link.path,
                    link.published.branch
                ))
            ),
            Err(ClipboardError::NoTool) => {
                eprintln!(
                    "{}\n{}",
                    warning_message("No clipboard tool found; link not copied"),
                    hint_message(cformat!(
                        "Install wl-copy, xclip or xsel, or set <bright-black>[clipboard] command</> in the config"
                    ))
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
