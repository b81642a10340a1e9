use std::fmt;

use crate::version::{ParseVersionError, Version, VersionConstraint};

/// A dependency on every version of `name` between two optional bounds.
///
/// Range strings in manifests use `~`:
///
/// | string  | min | max |
/// |---------|-----|-----|
/// | `X`     | X   | X   |
/// | `~X`    | -   | X   |
/// | `X~`    | X   | -   |
/// | `X~Y`   | X   | Y   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRange {
    pub name: String,
    pub min: Option<VersionConstraint>,
    pub max: Option<VersionConstraint>,
}

impl DependencyRange {
    pub fn new(
        name: impl Into<String>,
        min: Option<VersionConstraint>,
        max: Option<VersionConstraint>,
    ) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Parse the `~` range grammar for a dependency on `name`.
    pub fn parse(name: impl Into<String>, range: &str) -> Result<Self, ParseVersionError> {
        let s = range.trim();
        let (min, max) = if let Some(rest) = s.strip_prefix('~') {
            (None, Some(VersionConstraint::parse(rest)?))
        } else if let Some(rest) = s.strip_suffix('~') {
            (Some(VersionConstraint::parse(rest)?), None)
        } else if let Some((lo, hi)) = s.split_once('~') {
            if hi.contains('~') {
                return Err(ParseVersionError {
                    input: range.to_string(),
                    reason: "a range has at most one `~`".to_string(),
                });
            }
            (
                Some(VersionConstraint::parse(lo)?),
                Some(VersionConstraint::parse(hi)?),
            )
        } else {
            let exact = VersionConstraint::parse(s)?;
            (Some(exact), Some(exact))
        };
        Ok(Self {
            name: name.into(),
            min,
            max,
        })
    }

    /// Whether `version` falls within both bounds.
    pub fn contains(&self, version: &Version) -> bool {
        let above_min = self.min.map_or(true, |min| min.allows_as_lower(version));
        let below_max = self.max.map_or(true, |max| max.allows_as_upper(version));
        above_min && below_max
    }

    /// The bounds alone, in the same notation as the manifest.
    pub fn bounds(&self) -> String {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) if min == max => min.to_string(),
            (Some(min), Some(max)) => format!("{min} ~ {max}"),
            (Some(min), None) => format!("{min} ~"),
            (None, Some(max)) => format!("~ {max}"),
            (None, None) => "*".to_string(),
        }
    }
}

impl fmt::Display for DependencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.bounds())
    }
}
