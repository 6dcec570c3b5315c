mod application;
mod domain;
mod infrastructure;
mod interfaces;

use std::process;

use anyhow::Result;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::split_sql_dump::SplitSqlDumpUseCase;
use crate::interfaces::cli::{collect_split_request, usage};

fn main() -> Result<()> {
    let request = match collect_split_request() {
        Ok(request) => request,
        Err(error) => {
            eprintln!("{} {error:#}", style("ERROR:").red().bold());
            eprintln!();
            eprintln!("{}", usage());
            process::exit(2);
        }
    };

    let default_level = if request.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let use_case = SplitSqlDumpUseCase;
    let compression = request.command.compression;

    println!("{}", style("Splitting SQL dump...").cyan());
    let result = use_case.execute(request.command)?;

    println!(
        "{} {} {} chunk(s), {} statement(s), {} skipped line(s)",
        style("Split finished:").green(),
        style(result.chunk_paths.len()).bold(),
        compression,
        result.statement_count,
        result.skipped_line_count,
    );
    for chunk_path in &result.chunk_paths {
        println!("  {}", chunk_path.display());
    }
    if result.dropped_trailing_bytes > 0 {
        println!(
            "{}",
            style(format!(
                "Discarded {} byte(s) of an unterminated statement at the end of the dump",
                result.dropped_trailing_bytes
            ))
            .yellow()
        );
    }
    Ok(())
}
