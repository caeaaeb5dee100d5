use crate::domain::model::{Backend, Course};
use crate::domain::ports::CourseStore;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Courses kept in load order. Lookup is a linear scan and the listing sorts a copy.
#[derive(Debug, Default)]
pub struct VecStore {
    courses: Vec<Course>,
}

impl VecStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CourseStore for VecStore {
    fn replace_all(&mut self, courses: Vec<Course>) -> Result<()> {
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(courses.len());
        let mut fresh: Vec<Course> = Vec::with_capacity(courses.len());
        for course in courses {
            match positions.get(&course.number) {
                Some(&index) => fresh[index] = course,
                None => {
                    positions.insert(course.number.clone(), fresh.len());
                    fresh.push(course);
                }
            }
        }
        self.courses = fresh;
        tracing::debug!("Vec store now holds {} courses", self.courses.len());
        Ok(())
    }

    fn sorted_courses(&self) -> Result<Vec<Course>> {
        let mut sorted = self.courses.clone();
        sorted.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(sorted)
    }

    fn find(&self, number: &str) -> Result<Option<Course>> {
        Ok(self.courses.iter().find(|c| c.number == number).cloned())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.courses.len())
    }

    fn backend(&self) -> Backend {
        Backend::Vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_in_place() {
        let mut store = VecStore::new();
        store
            .replace_all(vec![
                Course::new("CSCI200", "Old", &[]),
                Course::new("CSCI100", "Intro", &[]),
                Course::new("CSCI200", "Data Structures", &["CSCI100"]),
            ])
            .unwrap();

        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(store.courses[0].title, "Data Structures");
        assert_eq!(
            store.find("CSCI200").unwrap().unwrap().prerequisites,
            vec!["CSCI100"]
        );
    }

    #[test]
    fn test_sorted_copy_leaves_load_order() {
        let mut store = VecStore::new();
        store
            .replace_all(vec![
                Course::new("MATH201", "Discrete Mathematics", &[]),
                Course::new("CSCI100", "Intro", &[]),
            ])
            .unwrap();

        let sorted = store.sorted_courses().unwrap();
        assert_eq!(sorted[0].number, "CSCI100");
        assert_eq!(store.courses[0].number, "MATH201");
    }

    #[test]
    fn test_large_catalog_replace() {
        let catalog: Vec<Course> = (0..50_000)
            .rev()
            .map(|i| Course::new(&format!("C{:07}", i), "Filler", &[]))
            .collect();

        let mut store = VecStore::new();
        store.replace_all(catalog).unwrap();

        assert_eq!(store.len().unwrap(), 50_000);
        assert_eq!(store.courses[0].number, "C0049999");
        assert!(store.find("C0000000").unwrap().is_some());
    }
}
