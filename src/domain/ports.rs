use crate::domain::model::{Backend, Course, OutputFormat};
use crate::utils::error::Result;

/// Where course files are read from.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider {
    fn backend(&self) -> Backend;
    fn default_data_file(&self) -> Option<&str>;
    fn database_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

/// A backend holding one loaded dataset, keyed by normalized course number.
pub trait CourseStore {
    /// Drop the current dataset and store `courses`. Later duplicates win.
    fn replace_all(&mut self, courses: Vec<Course>) -> Result<()>;

    /// All courses, ascending by course number.
    fn sorted_courses(&self) -> Result<Vec<Course>>;

    /// Exact lookup; `number` must already be normalized.
    fn find(&self, number: &str) -> Result<Option<Course>>;

    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn backend(&self) -> Backend;
}

impl<T: CourseStore + ?Sized> CourseStore for Box<T> {
    fn replace_all(&mut self, courses: Vec<Course>) -> Result<()> {
        (**self).replace_all(courses)
    }

    fn sorted_courses(&self) -> Result<Vec<Course>> {
        (**self).sorted_courses()
    }

    fn find(&self, number: &str) -> Result<Option<Course>> {
        (**self).find(number)
    }

    fn len(&self) -> Result<usize> {
        (**self).len()
    }

    fn backend(&self) -> Backend {
        (**self).backend()
    }
}
