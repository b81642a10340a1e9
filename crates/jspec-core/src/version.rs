//! Four-component package versions and the wildcard patterns used as
//! dependency range bounds.
//!
//! A [`Version`] is always concrete (`1.10.2.0`). A [`VersionConstraint`]
//! may leave trailing components open (`1.10.*.*`), which lets a bound such
//! as `1.5` mean "1.5 with any build and revision". Range membership is a
//! short-circuiting scan from the most significant component down: the first
//! concrete component that differs decides the comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

const COMPONENT_NAMES: [&str; 4] = ["major", "minor", "build", "revision"];

/// A version or constraint string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("invalid version format \"{input}\": {reason}")]
#[diagnostic(
    code(jspec::invalid_version_format),
    help("Use up to four dot-separated integers (e.g. 1.10.2); range bounds may end in `*` components")
)]
pub struct ParseVersionError {
    pub input: String,
    pub reason: String,
}

impl ParseVersionError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A concrete package version: `major.minor.build.revision`.
///
/// Ordering is lexicographic, major first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse one to four dot-separated integers. Missing trailing
    /// components are zero, so `"1.1"` is `1.1.0.0`.
    pub fn parse(input: &str) -> Result<Self, ParseVersionError> {
        let parts = split_components(input)?;
        let mut values = [0u32; 4];
        for (i, part) in parts.iter().enumerate() {
            if *part == "*" {
                return Err(ParseVersionError::new(
                    input,
                    format!("{} must be a number in a concrete version", COMPONENT_NAMES[i]),
                ));
            }
            values[i] = parse_number(input, COMPONENT_NAMES[i], part)?;
        }
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// The components in significance order.
    pub fn components(&self) -> [u32; 4] {
        [self.major, self.minor, self.build, self.revision]
    }
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// One component of a [`VersionConstraint`].
///
/// The derived ordering places `Wildcard` after every concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Concrete(u32),
    Wildcard,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Concrete(n) => write!(f, "{n}"),
            Component::Wildcard => f.write_str("*"),
        }
    }
}

/// A possibly partial version pattern used as one bound of a dependency range.
///
/// A component may only be concrete if every more significant component is
/// concrete too; `*.1` is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionConstraint {
    components: [Component; 4],
}

impl VersionConstraint {
    /// A constraint with every component open.
    pub const ANY: Self = Self {
        components: [Component::Wildcard; 4],
    };

    pub fn parse(input: &str) -> Result<Self, ParseVersionError> {
        let parts = split_components(input)?;
        let mut components = [Component::Wildcard; 4];
        for (i, part) in parts.iter().enumerate() {
            if *part == "*" {
                continue;
            }
            if i > 0 && components[i - 1] == Component::Wildcard {
                return Err(ParseVersionError::new(
                    input,
                    format!(
                        "{} has a value, so {} cannot be \"*\"",
                        COMPONENT_NAMES[i],
                        COMPONENT_NAMES[i - 1]
                    ),
                ));
            }
            components[i] = Component::Concrete(parse_number(input, COMPONENT_NAMES[i], part)?);
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> [Component; 4] {
        self.components
    }

    /// Whether every component is concrete.
    pub fn is_concrete(&self) -> bool {
        self.components
            .iter()
            .all(|c| matches!(c, Component::Concrete(_)))
    }

    /// `version >= self`, treating open components as unconstrained.
    pub fn allows_as_lower(&self, version: &Version) -> bool {
        self.scan(version, Ordering::Greater)
    }

    /// `version <= self`, treating open components as unconstrained.
    pub fn allows_as_upper(&self, version: &Version) -> bool {
        self.scan(version, Ordering::Less)
    }

    /// Walk the components from most to least significant. The first concrete
    /// component that differs from the version settles the test: `passing` is
    /// the direction that satisfies the bound.
    fn scan(&self, version: &Version, passing: Ordering) -> bool {
        for (bound, actual) in self.components.iter().zip(version.components()) {
            let Component::Concrete(bound) = *bound else {
                continue;
            };
            match actual.cmp(&bound) {
                Ordering::Equal => continue,
                ord => return ord == passing,
            }
        }
        true
    }
}

impl From<Version> for VersionConstraint {
    fn from(v: Version) -> Self {
        Self {
            components: v.components().map(Component::Concrete),
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.components;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

fn split_components(input: &str) -> Result<Vec<&str>, ParseVersionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseVersionError::new(input, "version is empty"));
    }
    let parts: Vec<&str> = trimmed.split('.').map(str::trim).collect();
    if parts.len() > 4 {
        return Err(ParseVersionError::new(
            input,
            format!("expected at most 4 components, found {}", parts.len()),
        ));
    }
    Ok(parts)
}

fn parse_number(input: &str, component: &str, part: &str) -> Result<u32, ParseVersionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseVersionError::new(
            input,
            format!("{component} \"{part}\" is not a non-negative integer"),
        ));
    }
    part.parse::<u32>().map_err(|e| {
        ParseVersionError::new(input, format!("{component} \"{part}\" is out of range: {e}"))
    })
}
