use std::collections::BTreeMap;

use jspec_util::errors::JspecError;

use crate::version::Version;

/// Root requirements: package name to an exact version, or `None` for the
/// latest registered version.
pub type Requirements = BTreeMap<String, Option<Version>>;

/// Parse a requirement list such as `jquery, jquery.ui.core 1.10.2; knockout-3.0`.
///
/// Items are separated by `,` or `;`. Each item is `name`, `name version` or
/// `name-version`. A trailing `-suffix` is only treated as a version when it
/// parses as one, so hyphenated names such as `date-fns` stay intact.
pub fn parse_requirements(input: &str) -> miette::Result<Requirements> {
    let mut requirements = Requirements::new();
    for item in input.split([',', ';']).map(str::trim).filter(|i| !i.is_empty()) {
        let (name, version) = parse_item(item)?;
        if requirements.insert(name.to_string(), version).is_some() {
            return Err(JspecError::Generic {
                message: format!("Package '{name}' is required more than once"),
            }
            .into());
        }
    }
    if requirements.is_empty() {
        return Err(JspecError::Generic {
            message: "No packages required".to_string(),
        }
        .into());
    }
    Ok(requirements)
}

fn parse_item(item: &str) -> miette::Result<(&str, Option<Version>)> {
    if let Some((name, version)) = item.split_once(char::is_whitespace) {
        return Ok((name, Some(Version::parse(version)?)));
    }
    if let Some((name, suffix)) = item.rsplit_once('-') {
        if !name.is_empty() {
            if let Ok(version) = Version::parse(suffix) {
                return Ok((name, Some(version)));
            }
        }
    }
    Ok((item, None))
}
