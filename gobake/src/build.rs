//! File-level helpers: reading the value, naming it, and writing the result.
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile};

use crate::{Error, Options, Result, generate, ident, package};

//
// ==================== PUBLIC BUILDER API ====================
//

/// A builder for baking one file into Go source.
///
/// # Example
/// ```no_run
/// use gobake::{Compression, Declaration, Options};
///
/// gobake::Config::new(Options {
///     declaration: Declaration::Func,
///     compression: Compression::Gzip,
///     ..Options::default()
/// })
/// .input("assets/logo.png")
/// .output("assets/logo.go")
/// .export(true)
/// .build()
/// .expect("Failed to bake logo");
/// ```
#[derive(Debug, Default)]
pub struct Config {
    options: Options,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    name: Option<String>,
    package: Option<String>,
    args: Vec<String>,
}

impl Config {
    /// Creates a configuration reading from standard input and writing to
    /// standard output.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Reads the value from `path` instead of standard input.
    #[must_use]
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Writes the generated file to `path` instead of standard output.
    #[must_use]
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Names the declaration. Defaults to the input file's name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the package. Defaults to the package of the output directory, or
    /// `main`.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Exports the declared identifier.
    #[must_use]
    pub const fn export(mut self, export: bool) -> Self {
        self.options.export = export;
        self
    }

    /// Records the invocation arguments in the generated header.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Reads the input and returns the generated source.
    ///
    /// # Errors
    /// Returns [`Error::Read`] if the input cannot be read, or an error from
    /// [`generate`].
    pub fn render(&self) -> Result<String> {
        let value = self.read_input()?;
        self.render_bytes(&value, &ident::default_name(self.input.as_deref()))
    }

    /// Generates source for `value`, which was read from elsewhere.
    /// `default_name` is used unless a name was configured.
    ///
    /// # Errors
    /// Returns an error from [`generate`].
    pub fn render_bytes(&self, value: &[u8], default_name: &str) -> Result<String> {
        let name = self.name.as_deref().unwrap_or(default_name);
        let package = self
            .package
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| package::resolve(self.output.as_deref()));
        generate(value, name, &package, &self.args, &self.options)
    }

    /// Generates the source and writes it out.
    ///
    /// A file target is replaced in one step, so a failed run never leaves a
    /// truncated file behind.
    ///
    /// # Errors
    /// Returns an [`Error`] if reading, compressing, or writing fails.
    pub fn build(self) -> Result<()> {
        let source = self.render()?;
        match &self.output {
            Some(path) => write_file(path, source.as_bytes()),
            None => write_stdout(source.as_bytes()),
        }
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        match &self.input {
            Some(path) => {
                let value = fs::read(path)
                    .map_err(|err| Error::Read(format!("file '{}'", path.display()), err))?;
                log::info!("read {} bytes from {}", value.len(), path.display());
                Ok(value)
            }
            None => {
                let mut value = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut value)
                    .map_err(|err| Error::Read("stdin".to_owned(), err))?;
                log::info!("read {} bytes from stdin", value.len());
                Ok(value)
            }
        }
    }
}

/// Writes `contents` to a temporary file next to `path`, then moves it into
/// place. An existing target keeps its permissions.
fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    let describe = || format!("file '{}'", path.display());
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    // New files get 0666 filtered by the umask, like any regular file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp: NamedTempFile = builder
        .tempfile_in(dir)
        .map_err(|err| Error::Write(describe(), err))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|err| Error::Write(describe(), err))?;
    }
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| Error::Write(describe(), err))?;
    tmp.persist(path)
        .map_err(|err| Error::Write(describe(), err.error))?;

    log::info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn write_stdout(contents: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(contents)
        .and_then(|()| stdout.flush())
        .map_err(|err| Error::Write("stdout".to_owned(), err))
}
