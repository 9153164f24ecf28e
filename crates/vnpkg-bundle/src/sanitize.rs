//! Output file naming.

/// Characters rejected by common filesystem path syntax.
const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Make a plugin id safe to use as a file name component.
///
/// Forbidden path characters become `_`, each run of whitespace becomes a
/// single `_`, and leading and trailing dots are removed. An empty id stays
/// empty.
#[must_use]
pub fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_whitespace = false;

    for c in input.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }

        in_whitespace = false;
        if FORBIDDEN_CHARS.contains(&c) {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out.trim_start_matches('.').trim_end_matches('.').to_string()
}

/// Package file name for a plugin: `<sanitized-id>-<version>.<extension>`.
///
/// The version is used as given.
#[must_use]
pub fn package_file_name(id: &str, version: &str, extension: &str) -> String {
    format!("{}-{version}.{extension}", sanitize_filename(id))
}
