//! loanapps: browse loan applications from a paginated REST API
//!
//! The library holds the pagination state machine, the HTTP page source,
//! row formatting and the terminal UI. The `loanapps` binary wires them to
//! the command line.

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod models;
pub mod pagination;
pub mod tui;
