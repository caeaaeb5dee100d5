use crate::domain::model::{Backend, Course};
use crate::domain::ports::CourseStore;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Hash map keyed by course number; the listing sorts the keys on demand.
#[derive(Debug, Default)]
pub struct MapStore {
    courses: HashMap<String, Course>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CourseStore for MapStore {
    fn replace_all(&mut self, courses: Vec<Course>) -> Result<()> {
        let mut fresh = HashMap::with_capacity(courses.len());
        for course in courses {
            fresh.insert(course.number.clone(), course);
        }
        self.courses = fresh;
        tracing::debug!("Map store now holds {} courses", self.courses.len());
        Ok(())
    }

    fn sorted_courses(&self) -> Result<Vec<Course>> {
        let mut keys: Vec<&String> = self.courses.keys().collect();
        keys.sort();
        Ok(keys
            .into_iter()
            .filter_map(|key| self.courses.get(key).cloned())
            .collect())
    }

    fn find(&self, number: &str) -> Result<Option<Course>> {
        Ok(self.courses.get(number).cloned())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.courses.len())
    }

    fn backend(&self) -> Backend {
        Backend::Map
    }
}
