//! Best-effort preview of the finished animation in the platform viewer.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// What happened when a preview was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The viewer was launched.
    Opened,
    /// No interactive session; nothing was launched.
    Skipped,
}

/// Error type for preview launches.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to launch viewer: {0}")]
    Launch(#[from] io::Error),

    #[error("Viewer exited with {0}")]
    Exit(ExitStatus),
}

/// Command that opens `path` with the platform's default handler.
pub fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open the animation for viewing when running interactively.
pub fn show(path: &Path) -> Result<PreviewOutcome, PreviewError> {
    if !io::stdin().is_terminal() {
        log::debug!("Not an interactive session; skipping preview");
        return Ok(PreviewOutcome::Skipped);
    }

    let status = opener_command(path).status()?;
    if !status.success() {
        return Err(PreviewError::Exit(status));
    }
    Ok(PreviewOutcome::Opened)
}
