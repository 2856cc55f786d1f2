use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use gobake::{Compression, Config, DEFAULT_WRAP, Declaration, Options};

#[derive(Parser, Debug)]
#[command(name = "gobake")]
#[command(
    about = "Bake a file into Go source as a string literal.",
    long_about = "Bake a file into Go source as a string literal.\n\nReads from stdin if FILE is omitted."
)]
struct Cli {
    /// File to bake.
    file: Option<PathBuf>,
    /// How to declare the value: "func", "const", or "var".
    #[arg(long, default_value = "func")]
    decl: String,
    /// How to compress the value: "" (none) or "gzip".
    #[arg(long, default_value = "")]
    compress: String,
    /// Whether the declaration should be exported.
    #[arg(long, default_value_t = false)]
    export: bool,
    /// An optional package to import. Usually combined with --type.
    #[arg(long)]
    import: Option<String>,
    /// The name of the declared value. Defaults to the name of the input file.
    #[arg(long)]
    name: Option<String>,
    /// The name of the generated file. Writes to stdout if omitted.
    #[arg(long)]
    output: Option<PathBuf>,
    /// The name of the package. Determined by the output location if omitted,
    /// or "main" if all else fails.
    #[arg(long)]
    package: Option<String>,
    /// The type of the declared value. Must be convertible from a string.
    /// Only used with --decl var.
    #[arg(long = "type", default_value = "string")]
    type_name: String,
    /// Bytes per literal line; 0 disables wrapping.
    #[arg(long, default_value_t = DEFAULT_WRAP)]
    wrap: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GOBAKE_LOG", "warn")).init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gobake: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let options = Options {
        declaration: Declaration::from_name(&cli.decl),
        compression: Compression::from_name(&cli.compress),
        export: cli.export,
        import: cli.import,
        type_name: cli.type_name,
        wrap: cli.wrap,
    };

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let mut config = Config::new(options).args(args);
    if let Some(file) = &cli.file {
        config = config.input(file);
    }
    if let Some(output) = &cli.output {
        config = config.output(output);
    }
    if let Some(name) = cli.name {
        config = config.name(name);
    }
    if let Some(package) = cli.package {
        config = config.package(package);
    }

    let target = cli
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_owned(), |p| p.display().to_string());
    config
        .build()
        .with_context(|| format!("bake into {target}"))
}
