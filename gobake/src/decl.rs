//! The top-level Go declarations a value can be baked into.
use crate::{Result, compress::Compression, literal::format_value};

/// How the baked value is declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Declaration {
    /// `const NAME = "..."`
    Const,
    /// `var NAME = TYPE("...")`
    Var,
    /// `func NAME() io.ReadCloser { ... }`
    #[default]
    Func,
}

impl Declaration {
    /// Parses a declaration name. Empty or unknown names select
    /// [`Declaration::Func`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "const" => Self::Const,
            "var" => Self::Var,
            "" | "func" => Self::Func,
            other => {
                log::warn!("unknown declaration {other:?}, declaring a func");
                Self::Func
            }
        }
    }

    /// Go packages referenced by the declaration itself.
    #[must_use]
    pub const fn imports(&self) -> &'static [&'static str] {
        match self {
            Self::Const | Self::Var => &[],
            Self::Func => &["io"],
        }
    }

    /// Whether the declaration calls the compression's decoder, and so needs
    /// its imports.
    #[must_use]
    pub const fn decodes(&self) -> bool {
        matches!(self, Self::Func)
    }

    /// Whether a configured literal type is applied. Constants and function
    /// bodies always hold an untyped string.
    #[must_use]
    pub const fn honors_type(&self) -> bool {
        matches!(self, Self::Var)
    }

    /// Renders the declaration of `name` holding `value`, followed by a newline.
    ///
    /// `value` is encoded with `compression` before formatting. Only
    /// [`Declaration::Func`] emits code to decode it again.
    ///
    /// # Errors
    /// Returns an error if the value cannot be compressed.
    pub fn render(
        &self,
        value: &[u8],
        name: &str,
        type_name: &str,
        compression: Compression,
        wrap: usize,
    ) -> Result<String> {
        let encoded = compression.encode(value)?;
        Ok(match self {
            Self::Const => format!("const {name} = {}\n", format_value(&encoded, wrap, 1, type_name)),
            Self::Var => format!("var {name} = {}\n", format_value(&encoded, wrap, 1, type_name)),
            Self::Func => format!(
                "func {name}() io.ReadCloser {{\n\tconst a = {}\n\t{}\n}}\n",
                format_value(&encoded, wrap, 2, ""),
                compression.decoder("a"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::tests::unescape;

    #[test]
    fn names() {
        assert_eq!(Declaration::from_name("const"), Declaration::Const);
        assert_eq!(Declaration::from_name("var"), Declaration::Var);
        assert_eq!(Declaration::from_name("func"), Declaration::Func);
        assert_eq!(Declaration::from_name(""), Declaration::Func);
        assert_eq!(Declaration::from_name("let"), Declaration::Func);
    }

    #[test]
    fn const_decl() {
        let s = Declaration::Const
            .render(b"hi", "hi", "", Compression::None, 16)
            .unwrap();
        assert_eq!(s, "const hi = \"\\x68\\x69\"\n");
    }

    #[test]
    fn empty_const() {
        let s = Declaration::Const
            .render(b"", "empty", "", Compression::None, 16)
            .unwrap();
        assert_eq!(s, "const empty = \"\"\n");
    }

    #[test]
    fn typed_var() {
        let s = Declaration::Var
            .render(b"hi", "data", "[]byte", Compression::None, 16)
            .unwrap();
        assert_eq!(s, "var data = []byte(\"\\x68\\x69\")\n");
    }

    #[test]
    fn plain_func() {
        let s = Declaration::Func
            .render(b"hi", "hi", "", Compression::None, 16)
            .unwrap();
        assert_eq!(
            s,
            "func hi() io.ReadCloser {\n\
             \tconst a = \"\\x68\\x69\"\n\
             \treturn ioutil.NopCloser(strings.NewReader(a))\n\
             }\n"
        );
    }

    #[test]
    fn gzip_func_indents_body() {
        let value = vec![b'x'; 200];
        let s = Declaration::Func
            .render(&value, "blob", "", Compression::Gzip, 16)
            .unwrap();
        assert!(s.starts_with("func blob() io.ReadCloser {\n\tconst a = \""));
        assert!(s.ends_with("\n\tgr, _ := gzip.NewReader(strings.NewReader(a))\n\treturn gr\n}\n"));
        for line in s.lines().skip(2).take_while(|l| l.starts_with("\t\t")) {
            assert!(line.starts_with("\t\t\"\\x"), "bad continuation: {line:?}");
        }

        let body = s
            .strip_prefix("func blob() io.ReadCloser {\n\tconst a = ")
            .and_then(|rest| rest.split("\n\tgr, _").next())
            .unwrap();
        let encoded = unescape(body);
        assert_eq!(Compression::Gzip.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn const_embeds_compressed_bytes_without_decoder() {
        let s = Declaration::Const
            .render(b"hello", "c", "", Compression::Gzip, 0)
            .unwrap();
        let literal = s.strip_prefix("const c = ").unwrap().trim_end();
        let encoded = unescape(literal);
        assert_eq!(&encoded[..2], &[0x1f, 0x8b]);
        assert!(!s.contains("gzip."));
    }

    #[test]
    fn imports() {
        assert!(Declaration::Const.imports().is_empty());
        assert!(Declaration::Var.imports().is_empty());
        assert_eq!(Declaration::Func.imports(), &["io"]);
        assert!(Declaration::Func.decodes());
        assert!(!Declaration::Var.decodes());
    }
}
