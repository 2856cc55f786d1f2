//! Compression applied to a value before it is formatted as a literal.
use std::{
    borrow::Cow,
    io::{Read, Write},
};

use flate2::{Compression as Level, read::GzDecoder, write::GzEncoder};

use crate::{Error, Result};

/// How the baked value is compressed.
///
/// Each variant pairs an encoding with the Go code that reverses it inside a
/// generated accessor function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// The value is embedded as-is.
    #[default]
    None,
    /// The value is gzip-compressed at the default level.
    Gzip,
}

impl Compression {
    /// Parses a compression name. `"gzip"` selects [`Compression::Gzip`];
    /// anything else selects [`Compression::None`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "gzip" => Self::Gzip,
            "" | "none" => Self::None,
            other => {
                log::warn!("unknown compression {other:?}, storing value uncompressed");
                Self::None
            }
        }
    }

    /// Encodes the value to be embedded.
    ///
    /// # Errors
    /// Returns [`Error::Compress`] if the gzip encoder fails.
    pub fn encode<'a>(&self, value: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        match self {
            Self::None => Ok(Cow::Borrowed(value)),
            Self::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Level::default());
                encoder.write_all(value).map_err(Error::Compress)?;
                let compressed = encoder.finish().map_err(Error::Compress)?;
                log::debug!(
                    "gzip: {} bytes compressed to {}",
                    value.len(),
                    compressed.len()
                );
                Ok(Cow::Owned(compressed))
            }
        }
    }

    /// Reverses [`Compression::encode`] the same way the generated decoder does.
    ///
    /// # Errors
    /// Returns [`Error::Decompress`] if `encoded` is not a valid gzip stream.
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::None => Ok(encoded.to_vec()),
            Self::Gzip => {
                let mut decoded = Vec::new();
                GzDecoder::new(encoded)
                    .read_to_end(&mut decoded)
                    .map_err(Error::Decompress)?;
                Ok(decoded)
            }
        }
    }

    /// Go packages referenced by [`Compression::decoder`].
    #[must_use]
    pub const fn imports(&self) -> &'static [&'static str] {
        match self {
            Self::None => &["io/ioutil", "strings"],
            Self::Gzip => &["compress/gzip", "strings"],
        }
    }

    /// Go statements that turn the constant `var` into an `io.ReadCloser` and
    /// return it.
    ///
    /// The gzip reader's construction error is discarded, so a corrupt value
    /// yields a nil reader at run time.
    #[must_use]
    pub fn decoder(&self, var: &str) -> String {
        match self {
            Self::None => format!("return ioutil.NopCloser(strings.NewReader({var}))"),
            Self::Gzip => format!("gr, _ := gzip.NewReader(strings.NewReader({var}))\n\treturn gr"),
        }
    }
}
