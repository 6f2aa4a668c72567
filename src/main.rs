use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use lectern::core::config::{self, CliOverrides, LecternConfig};

#[derive(Parser)]
#[command(name = "lectern", about = "Terminal scripture reader")]
struct Args {
    /// Translation id to open, e.g. kjv
    #[arg(short, long)]
    translation: Option<String>,

    /// Base URL of the content API
    #[arg(long)]
    base_url: Option<String>,

    /// Log level written to lectern.log
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to lectern.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let level = args.log_level.parse().unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create("lectern.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using defaults");
        log::warn!("Failed to load config: {}", e);
        LecternConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            translation: args.translation,
            base_url: args.base_url,
        },
    );

    log::info!(
        "Lectern starting up with translation {} ({})",
        resolved.translation,
        resolved.base_url
    );

    lectern::tui::run(resolved)
}
