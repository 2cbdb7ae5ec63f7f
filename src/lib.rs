//! Installer for the benchtool benchmarking application.
//!
//! Resolves a small INI configuration into a table of managed paths, copies
//! the bundled application files into place, points the installed settings
//! and environment-module script at those paths, and hooks the module into
//! the user's shell.  The same binary uninstalls a loaded installation and
//! cleans up benchmark working directories.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse and resolve INI configuration into a [`config::paths::PathTable`]
//! - **[`resources`]**: idempotent filesystem primitives (copies, patches, appends)
//! - **[`tasks`]**: named, ordered units of work wired to resources
//! - **[`commands`]**: subcommand orchestration (`install`, `uninstall`, `clean`, `remove`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod logging;
pub mod resources;
pub mod tasks;
