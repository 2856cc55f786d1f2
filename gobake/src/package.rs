//! Inference of the Go package a generated file belongs to.
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

/// Package used when nothing better can be determined.
pub const DEFAULT_PACKAGE: &str = "main";

/// Determines the package for a file written to `output`.
///
/// Looks at the Go files already in the output's directory. If they agree on
/// a single package name, that name is used. Otherwise, or when writing to
/// standard output, the result is [`DEFAULT_PACKAGE`].
#[must_use]
pub fn resolve(output: Option<&Path>) -> String {
    let Some(output) = output else {
        return DEFAULT_PACKAGE.to_owned();
    };
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match package_in_dir(&dir) {
        Ok(Some(name)) => {
            log::debug!("using package {name:?} from {}", dir.display());
            name
        }
        Ok(None) => {
            log::debug!(
                "no single package in {}, using {DEFAULT_PACKAGE:?}",
                dir.display()
            );
            DEFAULT_PACKAGE.to_owned()
        }
        Err(err) => {
            log::debug!(
                "could not inspect {}: {err}, using {DEFAULT_PACKAGE:?}",
                dir.display()
            );
            DEFAULT_PACKAGE.to_owned()
        }
    }
}

/// Returns the package shared by every buildable Go file in `dir`, if there is
/// exactly one.
fn package_in_dir(dir: &Path) -> io::Result<Option<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if !is_buildable_go_file(&file_name)
            || !matches_host(&file_name, host_os(), host_arch())
            || !entry.file_type()?.is_file()
        {
            continue;
        }
        let source = fs::read_to_string(entry.path())?;
        if is_ignored(&source) {
            log::debug!("skipping {file_name}, build constraint says ignore");
            continue;
        }
        if let Some(name) = package_clause(&source) {
            names.insert(name.to_owned());
        }
    }
    if names.len() == 1 {
        Ok(names.pop_first())
    } else {
        Ok(None)
    }
}

fn is_buildable_go_file(file_name: &str) -> bool {
    file_name.ends_with(".go")
        && !file_name.ends_with("_test.go")
        && !file_name.starts_with('_')
        && !file_name.starts_with('.')
}

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// The Go name of the operating system we run on.
fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

/// The Go name of the architecture we run on.
fn host_arch() -> &'static str {
    let little = cfg!(target_endian = "little");
    match std::env::consts::ARCH {
        "x86" => "386",
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" if little => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if little => "mipsle",
        "mips64" if little => "mips64le",
        "wasm32" => "wasm",
        arch => arch,
    }
}

fn os_matches(tag: &str, os: &str) -> bool {
    tag == os
        || (tag == "linux" && os == "android")
        || (tag == "solaris" && os == "illumos")
        || (tag == "darwin" && os == "ios")
}

/// Applies the `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name suffixes.
fn matches_host(file_name: &str, os: &str, arch: &str) -> bool {
    let stem = file_name.split('.').next().unwrap_or_default();
    // Everything before the first underscore is never a constraint.
    let Some(i) = stem.find('_') else {
        return true;
    };
    let mut parts: Vec<&str> = stem[i..].split('_').collect();
    if parts.last() == Some(&"test") {
        parts.pop();
    }
    match parts.as_slice() {
        [.., goos, goarch] if KNOWN_OS.contains(goos) && KNOWN_ARCH.contains(goarch) => {
            os_matches(goos, os) && *goarch == arch
        }
        [.., goos] if KNOWN_OS.contains(goos) => os_matches(goos, os),
        [.., goarch] if KNOWN_ARCH.contains(goarch) => *goarch == arch,
        _ => true,
    }
}

/// Whether a `//go:build` or `// +build` line above the package clause
/// carries the `ignore` tag.
fn is_ignored(source: &str) -> bool {
    for line in source.lines() {
        let line = line.trim();
        if line.starts_with("package") {
            break;
        }
        let Some(expr) = line
            .strip_prefix("//go:build")
            .or_else(|| line.strip_prefix("// +build"))
        else {
            continue;
        };
        if expr
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '!'))
            .any(|tag| tag == "ignore")
        {
            return true;
        }
    }
    false
}

/// Extracts the name from the `package` clause at the top of a Go file.
fn package_clause(source: &str) -> Option<&str> {
    let rest = skip_comments(source);
    let rest = rest.strip_prefix("package")?;
    if !rest.starts_with(|c: char| c.is_whitespace()) && !rest.starts_with("/*") {
        return None;
    }
    let rest = skip_comments(rest);
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    name.starts_with(|c: char| c.is_alphabetic() || c == '_')
        .then_some(name)
}

/// Skips leading whitespace and comments.
fn skip_comments(mut s: &str) -> &str {
    loop {
        s = s.trim_start();
        if let Some(rest) = s.strip_prefix("//") {
            s = rest.find('\n').map_or("", |i| &rest[i..]);
        } else if let Some(rest) = s.strip_prefix("/*") {
            s = rest.find("*/").map_or("", |i| &rest[i + 2..]);
        } else {
            return s;
        }
    }
}
