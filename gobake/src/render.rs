//! Assembly of a complete generated Go file.
use std::{collections::BTreeSet, fmt::Write as _};

use crate::{Error, Result, compress::Compression, decl::Declaration, ident::sanitize};

/// The default number of bytes per literal line.
pub const DEFAULT_WRAP: usize = 16;

/// Everything that decides the shape of the generated code, apart from the
/// value itself and the names around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub declaration: Declaration,
    pub compression: Compression,
    /// Export the declared identifier.
    pub export: bool,
    /// An extra package to import, usually the package defining `type_name`.
    pub import: Option<String>,
    /// Conversion applied to the literal. Only honored by `var` declarations.
    pub type_name: String,
    /// Bytes per literal line; `0` disables wrapping.
    pub wrap: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            declaration: Declaration::default(),
            compression: Compression::default(),
            export: false,
            import: None,
            type_name: "string".to_owned(),
            wrap: DEFAULT_WRAP,
        }
    }
}

impl Options {
    /// The packages the generated file must import.
    ///
    /// Compression imports are only needed when the declaration decodes the
    /// value.
    #[must_use]
    pub fn imports(&self) -> ImportSet {
        let mut imports = ImportSet::default();
        imports.extend(self.declaration.imports().iter().copied());
        if self.declaration.decodes() {
            imports.extend(self.compression.imports().iter().copied());
        }
        if let Some(import) = self.import.as_deref().filter(|i| !i.is_empty()) {
            imports.insert(import);
        }
        imports
    }

    /// The literal type actually applied, after the declaration's policy.
    #[must_use]
    pub fn effective_type(&self) -> &str {
        if self.declaration.honors_type() {
            &self.type_name
        } else {
            ""
        }
    }
}

/// A sorted set of distinct Go import paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet(BTreeSet<String>);

impl ImportSet {
    /// Adds `path`; a path already present is kept once.
    pub fn insert(&mut self, path: &str) {
        self.0.insert(path.to_owned());
    }

    /// Whether no imports are needed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The import paths in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Writes an `import ( ... )` block followed by a blank line, or nothing
    /// if the set is empty.
    fn write_block(&self, out: &mut String) {
        if self.is_empty() {
            return;
        }
        out.push_str("import (\n");
        for path in self.iter() {
            out.push('\t');
            out.push_str(&go_quote(path));
            out.push('\n');
        }
        out.push_str(")\n\n");
    }
}

impl<'a> Extend<&'a str> for ImportSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for path in iter {
            self.insert(path);
        }
    }
}

/// Generates a complete Go source file declaring `value`.
///
/// `name` is sanitized into the declared identifier. `args` are the tool's
/// command-line arguments, recorded in the header comment.
///
/// # Errors
/// Returns [`Error::EmptyName`] if `name` contains no letters, or an error if
/// the value cannot be compressed.
pub fn generate(
    value: &[u8],
    name: &str,
    package: &str,
    args: &[String],
    options: &Options,
) -> Result<String> {
    let ident = sanitize(name, options.export);
    if ident.is_empty() {
        return Err(Error::EmptyName(name.to_owned()));
    }
    log::debug!(
        "declaring {ident:?} as {:?} with {:?} compression",
        options.declaration,
        options.compression
    );

    let mut out = String::new();
    out.push_str("// File generated by \"gobake");
    for arg in args {
        let _ = write!(out, " {arg}");
    }
    out.push_str("\"\n// DO NOT EDIT!\n\npackage ");
    out.push_str(package);
    out.push_str("\n\n");
    options.imports().write_block(&mut out);
    out.push_str(&options.declaration.render(
        value,
        &ident,
        options.effective_type(),
        options.compression,
        options.wrap,
    )?);
    Ok(out)
}

/// Quotes `s` as a Go interpreted string literal.
fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\x7f' => {
                let _ = write!(quoted, "\\x{:02x}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
