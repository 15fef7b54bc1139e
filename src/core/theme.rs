use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual theme shared by every display surface.
///
/// Only these four identifiers exist; anything else coming from a model reply
/// or a config file is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Theme {
    #[default]
    Obsidian,
    TrustBlue,
    CyberpunkNeon,
    GlassWhite,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Obsidian,
        Theme::TrustBlue,
        Theme::CyberpunkNeon,
        Theme::GlassWhite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Obsidian => "obsidian",
            Theme::TrustBlue => "trust-blue",
            Theme::CyberpunkNeon => "cyberpunk-neon",
            Theme::GlassWhite => "glass-white",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Obsidian => "Obsidian",
            Theme::TrustBlue => "Trust Blue",
            Theme::CyberpunkNeon => "Cyberpunk Neon",
            Theme::GlassWhite => "Glass White",
        }
    }

    /// Parse an identifier, falling back to [`Theme::Obsidian`] for anything unknown.
    pub fn from_hint(hint: Option<&str>) -> Self {
        hint.and_then(|value| Theme::try_from(value).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("invalid theme: {value}"))
    }
}

impl TryFrom<String> for Theme {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Theme> for String {
    fn from(value: Theme) -> Self {
        value.as_str().to_string()
    }
}
