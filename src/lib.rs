pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use app::menu::Menu;
pub use app::stores::{open_store, BstStore, MapStore, SqliteStore, VecStore};
pub use core::planner::CoursePlanner;
pub use domain::model::{Backend, Course, LoadReport, OutputFormat};
pub use domain::ports::{ConfigProvider, CourseStore, Storage};
pub use utils::error::{PlannerError, Result};
