use clap::Parser;
use shipment_contract::app::commands::{run_check, run_page, run_seed, SeedRequest};
use shipment_contract::utils::{logger, validation::Validate};
use shipment_contract::{CliConfig, ContractError, LocalStorage, PageRequest, SeedConfig};
use shipment_contract::config::Command;

fn fail(e: &ContractError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?})",
        e,
        e.category()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

async fn run(config: CliConfig) -> shipment_contract::Result<()> {
    let storage = LocalStorage::new(config.base_dir.clone());

    match config.command {
        Command::Check { kind, file } => {
            let report = run_check(&storage, kind, &file).await?;
            println!("✅ {}: {} record(s), {} warning(s)", file, report.records, report.warnings.len());
            for warning in &report.warnings {
                println!("⚠️  {}", warning);
            }
        }
        Command::Seed {
            config: seed_config,
            count,
            format,
            rng_seed,
            output,
        } => {
            // 載入 TOML 配置，未指定時使用預設值
            let mut seed_config = match seed_config {
                Some(path) => SeedConfig::from_file(storage.resolve(&path))?,
                None => SeedConfig::default(),
            };
            if let Some(count) = count {
                seed_config.count = count;
                tracing::info!("🔧 count overridden to: {}", count);
            }

            let request = SeedRequest {
                config: seed_config,
                format,
                rng_seed,
                output,
            };
            let output = run_seed(&storage, request, chrono::Utc::now()).await?;
            println!("📁 Output saved to: {}", storage.resolve(&output).display());
        }
        Command::Page { input, limit, offset } => {
            let list = run_page(&storage, &input, PageRequest::new(limit, offset)).await?;
            let json = serde_json::to_string_pretty(&list)?;
            println!("{}", json);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting shipment-contract CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    if let Err(e) = run(config).await {
        fail(&e);
    }

    Ok(())
}
