//! Bake arbitrary files into Go source code.
//!
//! `gobake` turns the bytes of a file into a Go string literal and wraps it in
//! a declaration, producing a complete `.go` file that can be compiled into a
//! program. It is meant to be run from `go generate` or a build script.
//!
//! ## How It Works
//!
//! 1.  **Compression:** The value is optionally gzip-compressed
//!     ([`Compression`]).
//! 2.  **Literal:** Every byte is written as a `\xHH` escape, wrapped over
//!     several lines joined with `+` ([`format_value`]).
//! 3.  **Declaration:** The literal becomes a `const`, a `var`, or the body of
//!     a `func NAME() io.ReadCloser` accessor that undoes the compression
//!     ([`Declaration`]).
//! 4.  **File:** A header, the package clause, and exactly the imports the
//!     declaration uses are prepended ([`generate`]).
//!
//! Generation is deterministic: the same input and options always produce
//! the same file.
//!
//! ## Usage
//!
//! From the command line:
//!
//! ```sh
//! gobake --compress gzip --output assets/logo.go assets/logo.png
//! ```
//!
//! From Rust:
//!
//! ```
//! use gobake::{Declaration, Options};
//!
//! let source = gobake::generate(
//!     b"hi",
//!     "greeting",
//!     "main",
//!     &[],
//!     &Options { declaration: Declaration::Const, ..Options::default() },
//! )
//! .unwrap();
//! assert!(source.ends_with("const greeting = \"\\x68\\x69\"\n"));
//! ```

mod compress;
mod decl;
mod error;
mod ident;
mod literal;
mod render;

pub use compress::Compression;
pub use decl::Declaration;
pub use error::{Error, Result};
pub use ident::{STDIN_NAME, default_name, sanitize};
pub use literal::format_value;
pub use render::{DEFAULT_WRAP, ImportSet, Options, generate};

//
// ===== FILE-LEVEL CODE =====
//

#[cfg(feature = "build")]
mod build;
#[cfg(feature = "build")]
pub mod package;
#[cfg(feature = "build")]
pub use build::Config;
