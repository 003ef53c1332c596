use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command as GitCommand;

/// How many one-line commits to send as history.
pub const HISTORY_DEPTH: usize = 10;

/// Run a git command in `repo` and capture stdout as String.
pub fn git_output(repo: &Path, args: &[&str]) -> Result<String> {
    let output = GitCommand::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .with_context(|| format!("failed to run git {:?}", args))?;

    if !output.status.success() {
        return Err(anyhow!(
            "git {:?} exited with status {:?}: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Top-level directory of the working tree containing `repo`.
pub fn repo_root(repo: &Path) -> Result<PathBuf> {
    let dir = git_output(repo, &["rev-parse", "--show-toplevel"])?
        .trim()
        .to_string();
    Ok(PathBuf::from(dir))
}

/// Get the current branch name, or `None` on a detached HEAD.
pub fn current_branch(repo: &Path) -> Result<Option<String>> {
    let name = git_output(repo, &["branch", "--show-current"])?
        .trim()
        .to_string();
    Ok(Some(name).filter(|n| !n.is_empty()))
}

/// Get the full staged diff.
pub fn staged_diff(repo: &Path) -> Result<String> {
    git_output(repo, &["diff", "--staged"])
}

/// The last few commits, one line each.
pub fn recent_history(repo: &Path) -> Result<String> {
    let depth = format!("-{HISTORY_DEPTH}");
    git_output(repo, &["log", &depth, "--oneline"])
}

/// Commit the staged changes with `message`.
pub fn commit(repo: &Path, message: &str) -> Result<()> {
    log::info!("Committing: {message}");
    git_output(repo, &["commit", "-m", message])?;
    Ok(())
}
