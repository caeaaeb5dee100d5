use crate::core::loader;
use crate::domain::model::{normalize_course_number, Course, LoadReport};
use crate::domain::ports::{CourseStore, Storage};
use crate::utils::error::{PlannerError, Result};
use crate::utils::monitor::SystemMonitor;

/// Owns one course store and answers the three menu operations against it.
pub struct CoursePlanner<S: CourseStore, F: Storage> {
    store: S,
    storage: F,
    default_data_file: Option<String>,
    loaded: bool,
    monitor: SystemMonitor,
}

impl<S: CourseStore, F: Storage> CoursePlanner<S, F> {
    pub fn new(store: S, storage: F) -> Self {
        Self::new_with_monitoring(store, storage, false)
    }

    pub fn new_with_monitoring(store: S, storage: F, monitor_enabled: bool) -> Self {
        Self {
            store,
            storage,
            default_data_file: None,
            loaded: false,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// File loaded when the user leaves the file-name prompt empty.
    pub fn with_default_data_file(mut self, file_name: Option<String>) -> Self {
        self.default_data_file = file_name;
        self
    }

    pub fn default_data_file(&self) -> Option<&str> {
        self.default_data_file.as_deref()
    }

    /// Replace the dataset with the contents of `file_name`.
    ///
    /// On any error the previously loaded dataset is left as it was.
    pub fn load(&mut self, file_name: &str) -> Result<LoadReport> {
        let file_name = match (file_name.trim(), self.default_data_file.as_deref()) {
            ("", Some(default)) => default.to_string(),
            ("", None) => {
                return Err(PlannerError::MissingConfigError {
                    field: "data file".to_string(),
                })
            }
            (name, _) => name.to_string(),
        };

        tracing::info!("Loading courses from {}", file_name);
        let data = self.storage.read_file(&file_name)?;
        let (courses, report) = loader::load_courses(&file_name, data.as_slice())?;

        self.store.replace_all(courses)?;
        self.loaded = true;

        tracing::info!(
            "Loaded {} courses from {} into the {} store ({} skipped, {} duplicates)",
            report.accepted,
            report.source,
            self.store.backend(),
            report.skipped,
            report.duplicates
        );
        self.monitor.log_stats("Load");

        Ok(report)
    }

    /// Every loaded course, ascending by course number.
    pub fn course_list(&self) -> Result<Vec<Course>> {
        self.ensure_loaded()?;
        self.store.sorted_courses()
    }

    /// One course looked up by number; case and surrounding whitespace are ignored.
    pub fn course_details(&self, number: &str) -> Result<Course> {
        self.ensure_loaded()?;
        let number = normalize_course_number(number);
        tracing::debug!("Looking up course {}", number);
        self.store
            .find(&number)?
            .ok_or(PlannerError::CourseNotFound { number })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn finish(&mut self) {
        self.monitor.log_final_stats();
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(PlannerError::NotLoaded)
        }
    }
}
