//! Go identifiers derived from arbitrary names.
use std::path::Path;

/// Name used for values read from standard input.
pub const STDIN_NAME: &str = "stdin";

/// Turns `name` into a Go identifier.
///
/// Letters are kept. The first letter is upper-cased when `export` is set and
/// lower-cased otherwise. Any run of other characters (digits included) after
/// the first letter becomes a single underscore; anything before it is dropped.
/// The result is empty if `name` has no letters.
#[must_use]
pub fn sanitize(name: &str, export: bool) -> String {
    let mut ident = String::with_capacity(name.len());
    let mut in_gap = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if in_gap {
                ident.push('_');
                in_gap = false;
            }
            if ident.is_empty() {
                if export {
                    ident.extend(c.to_uppercase());
                } else {
                    ident.extend(c.to_lowercase());
                }
            } else {
                ident.push(c);
            }
        } else if !ident.is_empty() {
            in_gap = true;
        }
    }
    if in_gap {
        ident.push('_');
    }
    ident
}

/// The unsanitized name for a value read from `path`: the file name without
/// its last extension, or [`STDIN_NAME`] when there is no file.
#[must_use]
pub fn default_name(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return STDIN_NAME.to_owned();
    };
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match base.rfind('.') {
        Some(dot) => base[..dot].to_owned(),
        None => base,
    }
}
