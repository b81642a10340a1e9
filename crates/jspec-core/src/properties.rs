/// Substitute `{name}` and `{version}` placeholders in a manifest string.
///
/// Placeholder keys match case-insensitively. Any other `{...}` text is left
/// untouched.
pub fn interpolate(input: &str, name: &str, version: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            result.push_str(tail);
            return result;
        };
        let key = &tail[1..end];
        if key.contains('{') {
            result.push('{');
            rest = &tail[1..];
            continue;
        }
        if key.eq_ignore_ascii_case("name") {
            result.push_str(name);
        } else if key.eq_ignore_ascii_case("version") {
            result.push_str(version);
        } else {
            result.push_str(&tail[..=end]);
        }
        rest = &tail[end + 1..];
    }
    result.push_str(rest);
    result
}
