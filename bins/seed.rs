use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use service::seed::{self, SeedDocument};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Load starter site content from a JSON document")]
struct SeedCli {
    /// JSON document with optional `services`, `caseStudies`, `testimonials` and `stats` arrays
    #[arg(long)]
    file: PathBuf,

    /// Config file; defaults to `CONFIG_PATH` or `config.toml`
    #[arg(long)]
    config: Option<String>,
}

fn load_config(path: Option<&str>) -> anyhow::Result<configs::AppConfig> {
    match path {
        Some(path) => {
            let mut cfg = configs::load_from_file(path).with_context(|| format!("reading config {path}"))?;
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
        None => configs::AppConfig::load_and_validate(),
    }
}

async fn run(cli: SeedCli) -> anyhow::Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    let raw = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("reading seed file {}", cli.file.display()))?;
    let doc: SeedDocument = serde_json::from_str(&raw).context("parsing seed document")?;

    let db = service::runtime::connect_and_migrate(&cfg.database).await?;
    let report = seed::seed(&db, doc).await?;

    info!(service = "seed", event = "done", report = ?report, "seed finished");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    let cli = SeedCli::parse();

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "seed", event = "failed", error = %e, "seeding failed");
            std::process::ExitCode::FAILURE
        }
    }
}
