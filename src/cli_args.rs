use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "kommiter",
    version,
    about = "LLM-backed commit message suggestions over HTTP"
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Model name to use (e.g. meta-llama/llama-4-scout-17b-16e-instruct)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API (defaults to Groq)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// API key for the `generate` command (otherwise uses GROQ_API_KEY; the server
    /// takes keys from the X-Api-Key header)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Subcommand; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server exposing POST /ai
    Serve(ServeArgs),

    /// Suggest commit messages for the staged changes of the current repository
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Commit message convention (e.g. "Conventional Commits", "Gitmoji", or free text).
    /// Saved to kommitter.settings.json and reused when omitted.
    #[arg(long)]
    pub convention: Option<String>,

    /// Suggestions to avoid repeating
    #[arg(long)]
    pub last_suggests: Option<String>,

    /// Read the diff from a file ('-' for stdin) instead of `git diff --staged`
    #[arg(long)]
    pub diff_file: Option<PathBuf>,

    /// Pick one suggestion (or fetch more) and commit the staged changes with it
    #[arg(long)]
    pub commit: bool,
}
