use crate::domain::model::{Backend, OutputFormat};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_DATABASE_PATH: &str = "courses.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub planner: PlannerSection,
    pub sqlite: Option<SqliteConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerSection {
    pub backend: Option<String>,
    pub default_data_file: Option<String>,
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("valid env var pattern")
    })
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` and `${VAR:-default}` with the environment value, or the
    /// default when the variable is unset. `${VAR}` with no default stays as
    /// written and is rejected by validation.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                match (std::env::var(&caps[1]), caps.get(2)) {
                    (Ok(value), _) => value,
                    (Err(_), Some(default)) => default.as_str().to_string(),
                    (Err(_), None) => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn reject_unresolved(field: &str, value: &str) -> Result<()> {
        if value.contains("${") {
            return Err(PlannerError::ConfigError {
                message: format!(
                    "{} = '{}' refers to an environment variable that is not set",
                    field, value
                ),
            });
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(backend) = &self.planner.backend {
            validation::validate_one_of(
                "planner.backend",
                &backend.to_ascii_lowercase(),
                &Backend::NAMES,
            )?;
        }

        if let Some(file) = &self.planner.default_data_file {
            Self::reject_unresolved("planner.default_data_file", file)?;
            validation::validate_path("planner.default_data_file", file)?;
            validation::validate_file_extensions(
                "planner.default_data_file",
                std::slice::from_ref(file),
                &["csv", "txt"],
            )?;
        }

        if let Some(dir) = &self.planner.data_dir {
            Self::reject_unresolved("planner.data_dir", dir)?;
            validation::validate_path("planner.data_dir", dir)?;
        }

        if let Some(sqlite) = &self.sqlite {
            Self::reject_unresolved("sqlite.path", &sqlite.path)?;
            validation::validate_path("sqlite.path", &sqlite.path)?;
        }

        if let Some(output) = &self.output {
            validation::validate_one_of(
                "output.format",
                &output.format.to_ascii_lowercase(),
                &OutputFormat::NAMES,
            )?;
        }

        Ok(())
    }

    pub fn configured_backend(&self) -> Option<Backend> {
        self.planner.backend.as_deref().and_then(|b| b.parse().ok())
    }

    pub fn configured_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format.parse().ok())
    }

    pub fn configured_database_path(&self) -> Option<&str> {
        self.sqlite.as_ref().map(|s| s.path.as_str())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn backend(&self) -> Backend {
        self.configured_backend().unwrap_or_default()
    }

    fn default_data_file(&self) -> Option<&str> {
        self.planner.default_data_file.as_deref()
    }

    fn database_path(&self) -> &str {
        self.configured_database_path().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    fn output_format(&self) -> OutputFormat {
        self.configured_format().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[planner]
backend = "sqlite"
default_data_file = "ABCU_Advising_Program_Input.csv"
data_dir = "./data"

[sqlite]
path = "planner.db"

[output]
format = "json"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend(), Backend::Sqlite);
        assert_eq!(config.database_path(), "planner.db");
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(
            config.default_data_file(),
            Some("ABCU_Advising_Program_Input.csv")
        );
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend(), Backend::Bst);
        assert_eq!(config.database_path(), DEFAULT_DATABASE_PATH);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.default_data_file().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_PLANNER_TEST_DB", "/tmp/from-env.db");

        let toml_content = r#"
[planner]
backend = "sqlite"

[sqlite]
path = "${COURSE_PLANNER_TEST_DB}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database_path(), "/tmp/from-env.db");

        std::env::remove_var("COURSE_PLANNER_TEST_DB");
    }

    #[test]
    fn test_unset_env_var_is_rejected() {
        let config = TomlConfig::from_toml_str(
            "[sqlite]\npath = \"${COURSE_PLANNER_SURELY_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(config.database_path(), "${COURSE_PLANNER_SURELY_UNSET_VAR}");
        assert!(matches!(
            config.validate(),
            Err(PlannerError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_default_when_unset() {
        let toml_content = r#"
[planner]
backend = "sqlite"

[sqlite]
path = "${COURSE_PLANNER_UNSET_DB:-courses.db}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database_path(), "courses.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_wins_over_default() {
        std::env::set_var("COURSE_PLANNER_TEST_DEFAULTED_DB", "/tmp/set.db");

        let config = TomlConfig::from_toml_str(
            "[sqlite]\npath = \"${COURSE_PLANNER_TEST_DEFAULTED_DB:-courses.db}\"\n",
        )
        .unwrap();
        assert_eq!(config.database_path(), "/tmp/set.db");

        std::env::remove_var("COURSE_PLANNER_TEST_DEFAULTED_DB");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_backend = TomlConfig::from_toml_str("[planner]\nbackend = \"btree\"\n").unwrap();
        assert!(bad_backend.validate().is_err());

        let bad_file =
            TomlConfig::from_toml_str("[planner]\ndefault_data_file = \"courses.xlsx\"\n").unwrap();
        assert!(bad_file.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[output]\nformat = \"yaml\"\n").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_sqlite_backend_defaults_database_path() {
        let config = TomlConfig::from_toml_str("[planner]\nbackend = \"sqlite\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.database_path(), DEFAULT_DATABASE_PATH);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[planner\nbackend ="),
            Err(PlannerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[planner]\nbackend = \"map\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend(), Backend::Map);
    }
}
