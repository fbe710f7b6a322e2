//! Durable links to lines of code.
//!
//! A permalink points at the nearest ancestor of `HEAD` that a remote branch
//! already contains, with the requested line numbers translated from the
//! working tree back to that commit.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use permalink::git::{Repository, SearchLimits};
//! use permalink::permalink::{LineSelection, resolve};
//! use permalink::translate::LineRange;
//!
//! let repo = Repository::current();
//! let range = LineRange::new(10, 14)?;
//! let link = resolve(&repo, Path::new("src/lib.rs"), LineSelection::Lines(range), SearchLimits::default())?;
//! println!("{}", link.url);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod clipboard;
pub mod config;
pub mod git;
pub mod permalink;
pub mod shell_exec;
pub mod styling;
pub mod translate;
