use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use kommiter::cli_args::{Cli, Command, GenerateArgs};
use kommiter::config::Config;
use kommiter::convention::Convention;
use kommiter::generator::{GenerationRequest, MessageGenerator, DEFAULT_BRANCH};
use kommiter::interactive::{self, Choice};
use kommiter::{git, logging, server, settings, setup};

const DEFAULT_GENERATE_CONVENTION: &str = "Conventional Commits";

/// Server mode: expose POST /ai until interrupted.
async fn run_serve(cfg: &Config, generator: MessageGenerator) -> Result<()> {
    server::serve(&cfg.host, cfg.port, generator).await
}

/// Read the diff from `--diff-file` (or stdin for `-`), else from the staged changes.
fn read_diff(args: &GenerateArgs, repo: &Path) -> Result<String> {
    match &args.diff_file {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read diff from stdin")?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read diff from {:?}", path)),
        None => git::staged_diff(repo),
    }
}

/// `--convention`, else the one saved for this repository, else ask (with `--commit`).
fn resolve_convention<R: BufRead, W: Write>(
    args: &GenerateArgs,
    root: &Path,
    input: &mut R,
    out: &mut W,
) -> Result<String> {
    let chosen = match &args.convention {
        Some(name) => name.clone(),
        None => {
            if let Some(saved) = settings::saved_convention(root) {
                log::info!("Using saved convention {saved:?}");
                return Ok(saved);
            }
            if !args.commit {
                return Ok(DEFAULT_GENERATE_CONVENTION.to_string());
            }
            interactive::ask_convention(input, out)?
        }
    };

    if let Err(e) = settings::save_convention(root, &chosen) {
        log::warn!("Could not save convention: {e:#}");
    }
    Ok(chosen)
}

async fn ask_model(cfg: &Config, generator: &MessageGenerator, req: &GenerationRequest) -> Result<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Asking {} for suggestions...", cfg.model.model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = generator.generate(req).await;
    spinner.finish_and_clear();
    result
}

/// Standalone mode: suggestions for the current repository, optionally picked and committed.
async fn run_generate(cfg: &Config, generator: MessageGenerator, args: &GenerateArgs) -> Result<()> {
    let api_key = cfg.api_key.clone().ok_or_else(|| {
        anyhow!("GROQ_API_KEY (or --api-key) is required for generate")
    })?;

    let reads_stdin = args.diff_file.as_deref().is_some_and(|p| p.as_os_str() == "-");
    if args.commit && reads_stdin {
        bail!("--commit reads choices from stdin; stage the changes or pass --diff-file <path>");
    }

    let cwd = Path::new(".");
    let root = git::repo_root(cwd).unwrap_or_else(|e| {
        log::warn!("Not inside a git work tree, using the current directory: {e:#}");
        PathBuf::from(".")
    });

    let diff = read_diff(args, cwd)?;
    if diff.trim().is_empty() {
        println!("No changes to commit. Stage some changes first.");
        return Ok(());
    }

    let last_history = match git::recent_history(cwd) {
        Ok(history) => history,
        Err(e) => {
            log::warn!("Could not read git history, continuing without: {e:#}");
            String::new()
        }
    };

    let branch_name = match git::current_branch(cwd) {
        Ok(Some(branch)) => branch,
        Ok(None) => DEFAULT_BRANCH.to_string(),
        Err(e) => {
            log::warn!("Could not read current branch, continuing without: {e:#}");
            DEFAULT_BRANCH.to_string()
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let convention = resolve_convention(args, &root, &mut input, &mut out)?;

    let mut req = GenerationRequest::new(diff, api_key);
    req.branch_name = branch_name;
    req.last_history = last_history;
    req.convention = Convention::from_name(&convention);

    let mut seen: Vec<String> = Vec::new();
    loop {
        if let Some(previous) = interactive::previous_suggestions(args.last_suggests.as_deref(), &seen) {
            req.last_suggest = previous;
        }

        let candidates = interactive::split_candidates(&ask_model(cfg, &generator, &req).await?);

        if !args.commit {
            for candidate in &candidates {
                println!("{candidate}");
            }
            return Ok(());
        }

        seen.extend(candidates);
        if seen.is_empty() {
            println!("The model returned no suggestions.");
            return Ok(());
        }

        match interactive::ask_choice(&mut input, &mut out, &seen)? {
            Choice::Pick(idx) => {
                git::commit(cwd, &seen[idx])?;
                println!("Committed: {}", seen[idx]);
                return Ok(());
            }
            Choice::More => continue,
            Choice::Quit => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal; only standalone runs rely on it.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = Config::from_sources(&cli)?;
    let generator = setup::build_generator(&cfg)?;

    match &cli.command {
        Some(Command::Generate(args)) => run_generate(&cfg, generator, args).await,
        Some(Command::Serve(_)) | None => run_serve(&cfg, generator).await,
    }
}
