//! Adapter preferences and log verbosity

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidChoiceError;

/// Which clipboard adapter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Wayland tools in a Wayland session, xclip under X11, native otherwise
    #[default]
    Auto,
    /// Native clipboard API (macOS pasteboard, Win32, X11)
    Native,
    /// wl-copy / wl-paste
    Wayland,
    /// xclip (X11)
    Xclip,
}

impl BackendPreference {
    pub const VALID: &'static str = "auto, native, wayland, xclip";
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Native => write!(f, "native"),
            Self::Wayland => write!(f, "wayland"),
            Self::Xclip => write!(f, "xclip"),
        }
    }
}

impl FromStr for BackendPreference {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "native" => Ok(Self::Native),
            "wayland" => Ok(Self::Wayland),
            "xclip" => Ok(Self::Xclip),
            _ => Err(InvalidChoiceError {
                kind: "backend",
                input: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

/// Which markdown to rich text renderer to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererPreference {
    /// In-process renderer
    #[default]
    Builtin,
    /// External `pandoc` binary
    Pandoc,
}

impl RendererPreference {
    pub const VALID: &'static str = "builtin, pandoc";
}

impl fmt::Display for RendererPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::Pandoc => write!(f, "pandoc"),
        }
    }
}

impl FromStr for RendererPreference {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "pandoc" => Ok(Self::Pandoc),
            _ => Err(InvalidChoiceError {
                kind: "renderer",
                input: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

/// Output verbosity, passed explicitly to whatever reports progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    /// `--debug` wins over `--verbose`
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Default tracing filter directive for this level
    pub const fn filter_directive(&self) -> &'static str {
        match self {
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }

    pub fn is_verbose(&self) -> bool {
        *self >= Self::Verbose
    }

    pub fn is_debug(&self) -> bool {
        *self >= Self::Debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_str() {
        assert_eq!("auto".parse::<BackendPreference>().unwrap(), BackendPreference::Auto);
        assert_eq!("NATIVE".parse::<BackendPreference>().unwrap(), BackendPreference::Native);
        assert_eq!(" wayland ".parse::<BackendPreference>().unwrap(), BackendPreference::Wayland);
        assert_eq!("xclip".parse::<BackendPreference>().unwrap(), BackendPreference::Xclip);
        let err = "x11".parse::<BackendPreference>().unwrap_err();
        assert_eq!(err.input, "x11");
        assert!(err.to_string().contains("auto, native, wayland, xclip"));
    }

    #[test]
    fn backend_display_round_trips() {
        for pref in [
            BackendPreference::Auto,
            BackendPreference::Native,
            BackendPreference::Wayland,
            BackendPreference::Xclip,
        ] {
            assert_eq!(pref.to_string().parse::<BackendPreference>().unwrap(), pref);
        }
    }

    #[test]
    fn renderer_from_str() {
        assert_eq!("builtin".parse::<RendererPreference>().unwrap(), RendererPreference::Builtin);
        assert_eq!("Pandoc".parse::<RendererPreference>().unwrap(), RendererPreference::Pandoc);
        assert!("textutil".parse::<RendererPreference>().is_err());
    }

    #[test]
    fn log_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
    }

    #[test]
    fn log_level_ordering() {
        assert!(!LogLevel::Normal.is_verbose());
        assert!(LogLevel::Verbose.is_verbose());
        assert!(!LogLevel::Verbose.is_debug());
        assert!(LogLevel::Debug.is_verbose());
        assert_eq!(LogLevel::Debug.filter_directive(), "debug");
    }
}
