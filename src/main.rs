use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod format;
mod records;
mod script;

use config::Config;
use script::convert;

fn main() -> Result<()> {
    // stdout carries only the completion message; logs go to stderr.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        "converting sales csv to sql"
    );

    let summary = convert(&config).with_context(|| {
        format!(
            "converting {} to {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    info!(rows = summary.rows, "done");
    println!("SQL script generated: {}", summary.output.display());

    Ok(())
}
