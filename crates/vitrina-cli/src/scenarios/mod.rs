//! Scenarios the `api` and `ui` subcommands run

pub mod api;
pub mod ui;
