// Integration tests drive real git and use `sh` as a stand-in clipboard
#![cfg(unix)]

pub mod cli;
pub mod translate;
