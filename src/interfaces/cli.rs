use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::{
    application::commands::SplitSqlDumpCommand,
    domain::{chunk_size::ChunkSize, compression::Compression},
};

const DEFAULT_CHUNK_SIZE: &str = "100M";

#[derive(Debug, Parser)]
#[command(
    name = "sql-dump-splitter",
    version,
    about = "Split a SQL dump into size-bounded files without breaking statements"
)]
struct CliArgs {
    #[arg(long, short = 'f', help = "File to split (mandatory)")]
    file: Option<PathBuf>,
    #[arg(
        long,
        short = 's',
        help = "Maximum filesize of output files (mandatory)",
        long_help = "Maximum filesize of output files (mandatory). \
                     Formats accepted are 2.5M for 2.5 Megabytes or 2.5MI for Mebibytes"
    )]
    size: Option<String>,
    #[arg(
        long,
        short = 'z',
        overrides_with = "plain",
        help = "Gzip compression for output files"
    )]
    gzip: bool,
    #[arg(
        long,
        short = 'p',
        overrides_with = "gzip",
        help = "No compression for output files (default)"
    )]
    plain: bool,
    #[arg(long, short = 'v', help = "Log every rollover decision")]
    verbose: bool,
}

impl CliArgs {
    fn compression(&self) -> Compression {
        if self.gzip && !self.plain {
            Compression::Gzip
        } else {
            Compression::Plain
        }
    }
}

#[derive(Debug)]
pub struct CliRequest {
    pub command: SplitSqlDumpCommand,
    pub verbose: bool,
}

pub fn collect_split_request() -> Result<CliRequest> {
    if env::args_os().len() == 1 {
        return collect_interactive_request();
    }
    collect_request_from_args(CliArgs::parse())
}

/// Rendered `--help` text, shown after configuration errors.
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}

fn collect_request_from_args(args: CliArgs) -> Result<CliRequest> {
    let compression = args.compression();
    let source_path = args.file.ok_or_else(|| anyhow!("no filename given"))?;
    ensure_readable(&source_path)?;

    let raw_size = args.size.ok_or_else(|| anyhow!("no filesize given"))?;
    let max_chunk_bytes = raw_size.parse::<ChunkSize>()?;

    Ok(CliRequest {
        command: SplitSqlDumpCommand {
            source_path,
            max_chunk_bytes,
            compression,
        },
        verbose: args.verbose,
    })
}

fn collect_interactive_request() -> Result<CliRequest> {
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{}",
        style(" SQL DUMP SPLITTER ")
            .black()
            .on_cyan()
            .bold()
            .underlined()
    );
    println!(
        "{}",
        style("Split a dump into chunks without breaking statements").dim()
    );
    println!();

    let source_path: String = Input::with_theme(&theme)
        .with_prompt("Dump file path")
        .validate_with(|value: &String| {
            ensure_readable(Path::new(value.trim())).map_err(|error| error.to_string())
        })
        .interact_text()?;

    let raw_size: String = Input::with_theme(&theme)
        .with_prompt("Maximum chunk size (e.g. 2.5M or 2.5MI)")
        .default(DEFAULT_CHUNK_SIZE.to_string())
        .validate_with(|value: &String| {
            value
                .parse::<ChunkSize>()
                .map(|_| ())
                .map_err(|error| error.to_string())
        })
        .interact_text()?;

    let selected_compression_index = Select::with_theme(&theme)
        .with_prompt("Output compression")
        .default(0)
        .items(&Compression::ALL)
        .interact()?;

    Ok(CliRequest {
        command: SplitSqlDumpCommand {
            source_path: PathBuf::from(source_path.trim()),
            max_chunk_bytes: raw_size.parse::<ChunkSize>()?,
            compression: Compression::ALL[selected_compression_index],
        },
        verbose: false,
    })
}

fn ensure_readable(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(anyhow!("file {} can't be read", path.display()));
    }
    File::open(path)
        .map(|_| ())
        .map_err(|error| anyhow!("file {} can't be read: {error}", path.display()))
}
