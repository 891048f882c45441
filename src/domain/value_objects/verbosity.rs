/// How much the watch loop says on the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verbosity {
    /// Startup banner, a status line per poll, and change announcements.
    #[default]
    Normal,
    /// Only the journal destination at startup, no per-poll output.
    Quiet,
    /// Nothing on stdout at all.
    Silent,
}

impl Verbosity {
    /// Resolves the `--quiet`/`--silent` flag pair; `--silent` implies quiet.
    #[must_use]
    pub const fn from_flags(quiet: bool, silent: bool) -> Self {
        if silent {
            Self::Silent
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Whether per-poll status lines should be printed.
    #[must_use]
    pub const fn shows_status(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Whether the startup banner (journal destination) should be printed.
    #[must_use]
    pub const fn shows_banner(self) -> bool {
        !matches!(self, Self::Silent)
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Quiet => write!(f, "quiet"),
            Self::Silent => write!(f, "silent"),
        }
    }
}
