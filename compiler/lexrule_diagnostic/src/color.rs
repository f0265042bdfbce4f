//! ANSI colour selection for rendered diagnostics.

/// ANSI color codes for terminal output.
pub(crate) mod codes {
    pub(crate) const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub(crate) const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub(crate) const BOLD: &str = "\x1b[1m";
    pub(crate) const RESET: &str = "\x1b[0m";
}

/// Color output mode for rendered diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when writing to a terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean.
    ///
    /// `is_tty` is only consulted for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}
