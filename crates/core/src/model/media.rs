use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("media reference cannot be empty")]
    Empty,
}

//
// ─── MEDIA SOURCE ──────────────────────────────────────────────────────────────
//

/// Reference to a playable clip: either a path relative to the dataset root
/// or an absolute URL.
///
/// The dataset ships relative paths (`videos/....mp4`); absolute URLs are
/// accepted so a dataset can point at remotely hosted clips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Path(PathBuf),
    Url(Url),
}

impl MediaSource {
    /// Parse a raw dataset string into a media source.
    ///
    /// Strings that parse as absolute `http(s)` URLs become [`MediaSource::Url`];
    /// everything else is treated as a file path.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Empty`] for blank input.
    pub fn parse(raw: &str) -> Result<Self, MediaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MediaError::Empty);
        }
        if let Ok(url) = Url::parse(trimmed) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(Self::Url(url));
            }
        }
        Ok(Self::Path(PathBuf::from(trimmed)))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p.as_path()),
            Self::Url(_) => None,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(u) => Some(u),
            Self::Path(_) => None,
        }
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => write!(f, "{u}"),
        }
    }
}

impl Serialize for MediaSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MediaSource {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
