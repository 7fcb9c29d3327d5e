use clap::Parser;
use rangekit::core::ConfigProvider;
use rangekit::utils::{logger, validation::Validate};
use rangekit::{CliConfig, LocalStorage, RangeEngine, RangeError, TomlConfig};
use std::io::{self, BufWriter};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting rangekit");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ rangekit failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), RangeError> {
    config.validate()?;

    let Some(path) = &config.config else {
        let output_path = config.output_path.clone();
        return execute(RangeEngine::new(config.clone()), output_path, config.output_file());
    };

    tracing::info!("📁 Loading configuration from: {}", path);
    let mut toml_config = TomlConfig::from_file(path)?;

    config.apply_overrides(&mut toml_config);

    toml_config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let output_path = toml_config.output_path().map(str::to_string);
    let output_file = toml_config.output_file().to_string();
    execute(RangeEngine::new(toml_config), output_path, &output_file)
}

fn execute<C: ConfigProvider>(
    engine: RangeEngine<C>,
    output_path: Option<String>,
    output_file: &str,
) -> Result<(), RangeError> {
    match output_path {
        Some(path) => {
            let storage = LocalStorage::new(path);
            engine.run_to(&storage, output_file)?;
            println!(
                "📁 Output saved to: {}",
                std::path::Path::new(storage.base_path())
                    .join(output_file)
                    .display()
            );
        }
        None => {
            // 直接串流到 stdout，不在記憶體中組出整份輸出
            let mut stdout = BufWriter::new(io::stdout().lock());
            engine.run_into(&mut stdout)?;
        }
    }
    Ok(())
}
