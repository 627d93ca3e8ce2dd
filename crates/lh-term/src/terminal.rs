// SPDX-License-Identifier: MIT
//
// Terminal detection.
//
// Safety: `isatty` is the standard POSIX query and has no safe std wrapper
// that takes a raw fd constant. The unsafe block is a single call.
#![allow(unsafe_code)]
//
// The renderer only writes escape sequences when a human is looking at the
// output. `ColorChoice::Auto` asks stdout; `Always`/`Never` override it.

/// Check whether stdout is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn stdout_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn stdout_is_tty() -> bool {
    false
}

/// When to emit escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Only when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve against the current process environment.
    #[must_use]
    pub fn enabled(self) -> bool {
        self.resolve(stdout_is_tty(), std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()))
    }

    /// Resolve given the facts `enabled` would look up.
    #[must_use]
    pub const fn resolve(self, is_tty: bool, no_color: bool) -> bool {
        match self {
            Self::Auto => is_tty && !no_color,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_follows_tty_and_no_color() {
        assert!(ColorChoice::Auto.resolve(true, false));
        assert!(!ColorChoice::Auto.resolve(false, false));
        assert!(!ColorChoice::Auto.resolve(true, true));
    }

    #[test]
    fn explicit_choices_ignore_environment() {
        assert!(ColorChoice::Always.resolve(false, true));
        assert!(!ColorChoice::Never.resolve(true, false));
    }
}
