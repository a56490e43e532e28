use crate::error::{Result, UpdateVersionError};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `X.Y.Z` version string.
    ///
    /// Exactly three unsigned base-10 segments are accepted; prefixes such as
    /// `v`, pre-release or build suffixes are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(UpdateVersionError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                input
            )));
        }

        let major = parse_segment(parts[0], "major")?;
        let minor = parse_segment(parts[1], "minor")?;
        let patch = parse_segment(parts[2], "patch")?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to bump type
    ///
    /// Fails only when the incremented segment would overflow.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || UpdateVersionError::version(format!("Cannot bump {}: overflow", self));

        let bumped = match bump_type {
            VersionBump::Major => Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            },
        };
        Ok(bumped)
    }
}

fn parse_segment(segment: &str, name: &str) -> Result<u64> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(UpdateVersionError::version(format!(
            "Invalid {} version: '{}'",
            name, segment
        )));
    }
    segment
        .parse::<u64>()
        .map_err(|_| UpdateVersionError::version(format!("Invalid {} version: {}", name, segment)))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = UpdateVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Which version segment to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    /// Parse an increment kind, case-insensitively
    pub fn parse(kind: &str) -> Result<Self> {
        match kind.trim().to_lowercase().as_str() {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            _ => Err(UpdateVersionError::increment(format!(
                "must be major, minor, or patch, got: {}",
                kind
            ))),
        }
    }
}

impl FromStr for VersionBump {
    type Err = UpdateVersionError;

    fn from_str(s: &str) -> Result<Self> {
        VersionBump::parse(s)
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Compute the next version string from `"X.Y.Z"` and an increment kind.
pub fn increment_version(version: &str, increment: &str) -> Result<String> {
    let bump = VersionBump::parse(increment)?;
    Ok(Version::parse(version)?.bump(bump)?.to_string())
}
