pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::{TomlConfig, DEFAULT_DATABASE_PATH};
#[cfg(feature = "cli")]
use crate::domain::model::{Backend, OutputFormat};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "course-planner")]
#[command(about = "Load a course catalog from CSV and look up courses and their prerequisites")]
pub struct CliConfig {
    /// Storage backend holding the loaded courses
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// File loaded when the file-name prompt is left empty
    #[arg(long)]
    pub data_file: Option<String>,

    /// Directory relative file names are resolved against
    #[arg(long)]
    pub data_dir: Option<String>,

    /// SQLite database file used by the sqlite backend
    #[arg(long)]
    pub database: Option<String>,

    /// How course lists and details are printed
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Log process memory and CPU after each load")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fill every option not given on the command line from the file config.
    pub fn apply_file_config(&mut self, file: &TomlConfig) {
        if self.backend.is_none() {
            self.backend = file.configured_backend();
        }
        if self.data_file.is_none() {
            self.data_file = file.planner.default_data_file.clone();
        }
        if self.data_dir.is_none() {
            self.data_dir = file.planner.data_dir.clone();
        }
        if self.database.is_none() {
            self.database = file.configured_database_path().map(str::to_string);
        }
        if self.format.is_none() {
            self.format = file.configured_format();
        }
        self.monitor = self.monitor || file.monitoring_enabled();
    }

    pub fn data_dir(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(".")
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    fn default_data_file(&self) -> Option<&str> {
        self.data_file.as_deref()
    }

    fn database_path(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", self.data_dir())?;
        if let Some(file) = &self.data_file {
            validation::validate_path("data_file", file)?;
        }
        if self.backend() == Backend::Sqlite {
            validation::validate_path("database", self.database_path())?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "course-planner",
            "--backend",
            "sqlite",
            "--database",
            "planner.db",
            "--format",
            "json",
            "--data-file",
            "courses.csv",
            "-v",
        ]);

        assert_eq!(config.backend(), Backend::Sqlite);
        assert_eq!(config.database_path(), "planner.db");
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.default_data_file(), Some("courses.csv"));
        assert!(config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["course-planner"]);
        assert_eq!(config.backend(), Backend::Bst);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.database_path(), DEFAULT_DATABASE_PATH);
        assert_eq!(config.data_dir(), ".");
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[planner]
backend = "sqlite"
default_data_file = "from-file.csv"
data_dir = "./data"

[sqlite]
path = "file.db"

[monitoring]
enabled = true
"#,
        )
        .unwrap();

        let mut config = CliConfig::parse_from(["course-planner", "--backend", "map"]);
        config.apply_file_config(&file);

        assert_eq!(config.backend(), Backend::Map);
        assert_eq!(config.default_data_file(), Some("from-file.csv"));
        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.database_path(), "file.db");
        assert!(config.monitor);
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(CliConfig::try_parse_from(["course-planner", "--backend", "btree"]).is_err());
    }
}
