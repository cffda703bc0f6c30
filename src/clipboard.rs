/*!
 * Copying combined output to the system clipboard
 *
 * Pipes the text into whichever clipboard command the platform offers
 * (pbcopy, wl-copy, xsel, xclip, clip.exe, termux-clipboard-set), with tmux
 * buffers preferred inside a tmux session.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::debug;
use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to run or talk to the clipboard command
    #[error("{command} failed: {reason}")]
    CommandFailed { command: &'static str, reason: String },

    /// No suitable clipboard mechanism was found
    #[error("Could not access the clipboard: no clipboard command found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Anything that can receive the combined text
pub trait Clipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// External clipboard commands, in no particular order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Tmux,
    MacOS,
    Wayland,
    Xsel,
    Xclip,
    Windows,
    Termux,
}

impl ClipboardProvider {
    /// Executable name
    pub fn command(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::MacOS => "pbcopy",
            Self::Wayland => "wl-copy",
            Self::Xsel => "xsel",
            Self::Xclip => "xclip",
            Self::Windows => "clip.exe",
            Self::Termux => "termux-clipboard-set",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["load-buffer", "-w", "-"],
            Self::Xsel => &["-b", "-i"],
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::MacOS | Self::Wayland | Self::Windows | Self::Termux => &[],
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let command = self.command();
        let failed = |reason: String| ClipboardError::CommandFailed { command, reason };

        let mut child = Command::new(command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(format!("could not start: {}", e)))?;

        {
            let stdin = child
                .stdin
                .as_mut()
                .ok_or_else(|| failed("stdin unavailable".to_string()))?;
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| failed(format!("could not write: {}", e)))?;
        }
        // Close stdin so the command sees EOF
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with {}", status)))
        }
    }
}

/// Copy text using the first available clipboard command
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = detect_provider().ok_or(ClipboardError::NoClipboardFound)?;
    debug!("Copying {} bytes with {}", text.len(), provider.command());
    provider.copy_to_clipboard(text)
}

/// Pick the clipboard command for this machine, if any
pub fn detect_provider() -> Option<ClipboardProvider> {
    candidate_providers(env::var_os("TMUX").is_some())
        .into_iter()
        .find(|p| command_exists(p.command()))
}

/// Providers worth trying on this platform, most preferred first
fn candidate_providers(in_tmux: bool) -> Vec<ClipboardProvider> {
    let mut providers = Vec::new();
    if in_tmux {
        providers.push(ClipboardProvider::Tmux);
    }

    if cfg!(target_os = "macos") {
        providers.push(ClipboardProvider::MacOS);
    } else if cfg!(target_os = "windows") {
        providers.push(ClipboardProvider::Windows);
    } else if cfg!(target_os = "android") {
        providers.push(ClipboardProvider::Termux);
    } else {
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            providers.push(ClipboardProvider::Wayland);
        }
        providers.extend([ClipboardProvider::Xsel, ClipboardProvider::Xclip]);
        if env::var_os("WSL_DISTRO_NAME").is_some() {
            providers.push(ClipboardProvider::Windows);
        }
    }

    providers
}

/// Whether `command` resolves to a file on PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_tmux_is_preferred_inside_tmux() {
        let providers = candidate_providers(true);
        assert_eq!(providers.first(), Some(&ClipboardProvider::Tmux));
        assert!(providers.len() > 1);

        assert!(!candidate_providers(false).contains(&ClipboardProvider::Tmux));
    }

    #[test]
    fn test_provider_commands() {
        assert_eq!(ClipboardProvider::MacOS.command(), "pbcopy");
        assert_eq!(ClipboardProvider::Xclip.args(), &["-selection", "clipboard", "-in"]);
        assert!(ClipboardProvider::Wayland.args().is_empty());
    }

    #[test]
    #[ignore] // Needs a working clipboard command
    fn test_copy_to_clipboard() {
        copy_to_clipboard("codemerger clipboard test").expect("copy failed");
    }
}
