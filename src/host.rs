//! Optional host-environment integration.
//!
//! When the application runs inside a terminal multiplexer it can ask the
//! host for two favors: expand the hosting pane to full size at startup, and
//! confirm before the user closes the session. Standalone terminals get
//! no-op substitutes, and everything else behaves identically either way.

use std::env;
use std::process::Command;

use tracing::{debug, warn};

/// The detected host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Tmux,
    Zellij,
    Standalone,
}

impl Host {
    /// Detect the host from the environment variables the multiplexers set
    /// for their child processes.
    pub fn detect() -> Self {
        Self::from_env(env::var_os("TMUX").is_some(), env::var_os("ZELLIJ").is_some())
    }

    fn from_env(in_tmux: bool, in_zellij: bool) -> Self {
        // Zellij wins ties: nesting zellij inside tmux leaves $TMUX set, but
        // the innermost host owns the pane.
        if in_zellij {
            Host::Zellij
        } else if in_tmux {
            Host::Tmux
        } else {
            Host::Standalone
        }
    }

    /// Ask the host to give us the full pane. Best effort: a failure is
    /// logged and ignored, never surfaced to the user.
    pub fn expand(&self) {
        let result = match self {
            Host::Tmux => Command::new("tmux").args(["resize-pane", "-Z"]).status(),
            Host::Zellij => Command::new("zellij")
                .args(["action", "toggle-fullscreen"])
                .status(),
            Host::Standalone => {
                debug!("standalone terminal, nothing to expand");
                return;
            }
        };
        match result {
            Ok(status) if status.success() => debug!(host = ?self, "expanded hosting pane"),
            Ok(status) => warn!(host = ?self, %status, "host refused to expand pane"),
            Err(err) => warn!(host = ?self, %err, "could not reach host to expand pane"),
        }
    }

    /// Whether quitting should go through a confirmation dialog. Embedded
    /// sessions confirm, standalone runs exit immediately.
    pub fn closing_confirmation(&self) -> bool {
        !matches!(self, Host::Standalone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_when_no_multiplexer_vars() {
        assert_eq!(Host::from_env(false, false), Host::Standalone);
        assert!(!Host::Standalone.closing_confirmation());
    }

    #[test]
    fn detects_tmux_and_zellij() {
        assert_eq!(Host::from_env(true, false), Host::Tmux);
        assert_eq!(Host::from_env(false, true), Host::Zellij);
        assert!(Host::Tmux.closing_confirmation());
    }

    #[test]
    fn innermost_host_wins_when_nested() {
        assert_eq!(Host::from_env(true, true), Host::Zellij);
    }
}
