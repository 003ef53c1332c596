//! Commit message suggestions from a diff, served over HTTP.
//!
//! A request carries the diff plus some context (branch, recent history,
//! earlier suggestions, a convention name). The [`generator`] turns it into a
//! prompt, asks the model for four candidates and, for Gitmoji, renders the
//! leading emoji codes. [`server`] wraps that in a single `POST /ai` route.

pub mod cli_args;
pub mod config;
pub mod convention;
pub mod generator;
pub mod git;
pub mod gitmoji;
pub mod interactive;
pub mod llm;
pub mod logging;
pub mod server;
pub mod settings;
pub mod setup;

pub use cli_args::Cli;
