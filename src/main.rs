use anyhow::Context;
use clap::Parser;
use course_planner::utils::error::ErrorSeverity;
use course_planner::utils::{logger, validation::Validate};
use course_planner::{
    open_store, CliConfig, ConfigProvider, CoursePlanner, LocalStorage, Menu, TomlConfig,
};
use std::io;

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting course planner");

    if let Some(path) = config.config.clone() {
        tracing::info!("Loading configuration from: {}", path);
        let file_config = match TomlConfig::from_file(&path) {
            Ok(file_config) => file_config,
            Err(e) => {
                eprintln!("Failed to load config file '{}': {}", path, e);
                eprintln!("Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        };
        if let Err(e) = file_config.validate() {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
        config.apply_file_config(&file_config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
    tracing::debug!("CLI config: {:?}", config);

    let store = match open_store(config.backend(), config.database_path()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(
                "Could not open the {} store: {} (Category: {:?}, Severity: {:?})",
                config.backend(),
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    let storage = LocalStorage::new(config.data_dir().to_string());
    let mut planner = CoursePlanner::new_with_monitoring(store, storage, config.monitor)
        .with_default_data_file(config.data_file.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut planner, stdin.lock(), stdout.lock())
        .with_format(config.output_format())
        .run()
        .context("Console I/O failed")?;

    planner.finish();
    tracing::info!("Course planner finished");
    Ok(())
}
