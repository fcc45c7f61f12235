use anyhow::Context;
use clap::Parser;
use job_classifier::config::toml_config::MonitoringConfig;
use job_classifier::core::ConfigProvider;
use job_classifier::utils::{logger, validation, validation::Validate};
use job_classifier::{
    ClassificationEngine, ClassifyError, CliConfig, LocalStorage, OpenAiClient, RunOutcome,
    TomlConfig,
};
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting job classification script...");

    let succeeded = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };

            // 命令列旗標覆蓋設定檔
            if cli.no_progress {
                config.run.show_progress = Some(false);
            }
            if cli.monitor {
                config.monitoring = Some(MonitoringConfig { enabled: true });
            }

            let input = cli
                .input
                .clone()
                .or_else(|| config.input().map(str::to_string));
            classify(config, input).await?
        }
        None => {
            let input = cli.input.clone();
            classify(cli, input).await?
        }
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}

async fn classify<P: ConfigProvider + Validate>(
    config: P,
    input: Option<String>,
) -> anyhow::Result<bool> {
    // 驗證配置
    if let Err(e) = config.validate() {
        report_error("Configuration validation failed", &e);
        return Ok(false);
    }

    let input = match input {
        Some(input) => input,
        None => prompt_for_input()?,
    };
    if let Err(e) = validation::validate_path("input", &input) {
        report_error("Invalid input path", &e);
        return Ok(false);
    }

    let bounds = config.run_bounds();
    tracing::info!(
        "📋 Model: {}, rows {}..={}, checkpoint every {} rows",
        config.model(),
        bounds.start_row,
        bounds.end_row,
        bounds.checkpoint_every
    );

    let storage = LocalStorage::default();
    let engine = match ClassificationEngine::<_, OpenAiClient>::from_config(storage, &config) {
        Ok(engine) => engine,
        Err(e) => {
            report_error("Could not set up the classification client", &e);
            return Ok(false);
        }
    };

    match engine.run(&input).await {
        Ok(RunOutcome::Completed { output_path, stats }) => {
            println!("✅ Processed file saved as: {}", output_path);
            if stats.fallback_rows > 0 {
                println!(
                    "⚠️  {} of {} rows could not be classified and were marked Unclassified",
                    stats.fallback_rows, stats.rows_processed
                );
            }
            Ok(true)
        }
        Ok(RunOutcome::Aborted {
            reason,
            last_row_index,
            ..
        }) => {
            eprintln!("❌ Stopped at row {}: {}", last_row_index, reason);
            eprintln!("💡 Run the same command again to resume from the checkpoint");
            Ok(false)
        }
        Err(e) => {
            report_error("Job classification failed", &e);
            Ok(false)
        }
    }
}

fn report_error(context: &str, e: &ClassifyError) {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn prompt_for_input() -> anyhow::Result<String> {
    print!("Enter the path to your CSV file: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read the input path")?;
    Ok(line.trim().to_string())
}
