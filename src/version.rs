// ABOUTME: Version parsing, normalisation and ordering for podman releases.
// ABOUTME: Accepts loose forms like "v4.9", "2.5.1-dev" or "1.0.0rc2".

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("invalid version '{0}': expected one to four numeric components")]
    InvalidCore(String),
}

/// Release stage of a version. Variant order is significant: earlier
/// variants sort lower, so `Dev < Alpha < Beta < Rc < Stable < Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Dev,
    Alpha(u64),
    Beta(u64),
    Rc(u64),
    Stable,
    Patch(u64),
}

/// A normalised version. Missing components are zero.
///
/// Ordering compares `major`, `minor`, `patch`, `build` numerically and then
/// the release stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: u64,
    pub pre: PreRelease,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            build: 0,
            pre: PreRelease::Stable,
        }
    }

    pub fn with_pre(mut self, pre: PreRelease) -> Self {
        self.pre = pre;
        self
    }

    /// Parse a loosely formatted version string.
    ///
    /// A leading `v` and any `+build` metadata are dropped. Suffixes that are
    /// not a known release stage (distribution tags such as `-rhel`) are
    /// ignored and the version counts as stable.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let s = trimmed
            .strip_prefix(['v', 'V'])
            .unwrap_or(trimmed);
        let s = s.split('+').next().unwrap_or(s);

        let core_len = s
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(s.len());
        let (core, rest) = s.split_at(core_len);
        let core = core.strip_suffix('.').unwrap_or(core);

        let components = core
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionError::InvalidCore(input.to_string()))?;

        if components.is_empty() || components.len() > 4 {
            return Err(VersionError::InvalidCore(input.to_string()));
        }

        let component = |i: usize| components.get(i).copied().unwrap_or(0);

        Ok(Self {
            major: component(0),
            minor: component(1),
            patch: component(2),
            build: component(3),
            pre: parse_pre_release(rest),
        })
    }

    /// Render `input` in canonical form, e.g. `"v2.1"` becomes `"2.1.0"`.
    pub fn normalize(input: &str) -> Result<String, VersionError> {
        Self::parse(input).map(|v| v.to_string())
    }

    /// Compare two version strings after normalisation.
    pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
        Ok(Self::parse(a)?.cmp(&Self::parse(b)?))
    }
}

/// Whether `current` is at least `required`.
///
/// An empty or unparseable `current` is older than everything. An
/// unparseable `required` is never satisfied.
pub fn satisfies(current: &str, required: &str) -> bool {
    let required = match Version::parse(required) {
        Ok(required) => required,
        Err(e) => {
            tracing::warn!("Ignoring version requirement '{}': {}", required, e);
            return false;
        }
    };
    Version::parse(current).is_ok_and(|current| current >= required)
}

fn parse_pre_release(rest: &str) -> PreRelease {
    let tag = rest
        .strip_prefix(['-', '.', '_'])
        .unwrap_or(rest)
        .to_ascii_lowercase();

    if tag.is_empty() {
        return PreRelease::Stable;
    }
    if tag == "dev" || ["-dev", ".dev", "_dev"].iter().any(|d| tag.ends_with(d)) {
        return PreRelease::Dev;
    }

    let name_len = tag
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(tag.len());
    let (name, number) = tag.split_at(name_len);
    let number = number.strip_prefix(['.', '-']).unwrap_or(number);
    let number = if number.is_empty() {
        Some(0)
    } else {
        number.parse::<u64>().ok()
    };

    match (name, number) {
        ("alpha" | "a", Some(n)) => PreRelease::Alpha(n),
        ("beta" | "b", Some(n)) => PreRelease::Beta(n),
        ("rc", Some(n)) => PreRelease::Rc(n),
        ("patch" | "pl" | "p", Some(n)) => PreRelease::Patch(n),
        _ => PreRelease::Stable,
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, number) = match self {
            PreRelease::Stable => return Ok(()),
            PreRelease::Dev => return f.write_str("-dev"),
            PreRelease::Alpha(n) => ("alpha", *n),
            PreRelease::Beta(n) => ("beta", *n),
            PreRelease::Rc(n) => ("rc", *n),
            PreRelease::Patch(n) => ("patch", *n),
        };
        if number == 0 {
            write!(f, "-{name}")
        } else {
            write!(f, "-{name}{number}")
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.build != 0 {
            write!(f, ".{}", self.build)?;
        }
        write!(f, "{}", self.pre)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
