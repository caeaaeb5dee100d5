pub mod bst_store;
pub mod map_store;
pub mod sqlite_store;
pub mod vec_store;

pub use bst_store::BstStore;
pub use map_store::MapStore;
pub use sqlite_store::SqliteStore;
pub use vec_store::VecStore;

use crate::domain::model::Backend;
use crate::domain::ports::CourseStore;
use crate::utils::error::Result;

/// Build the store for `backend`. `database_path` is only opened for SQLite.
pub fn open_store(backend: Backend, database_path: &str) -> Result<Box<dyn CourseStore>> {
    tracing::debug!("Using {} course store", backend);
    let store: Box<dyn CourseStore> = match backend {
        Backend::Map => Box::new(MapStore::new()),
        Backend::Vec => Box::new(VecStore::new()),
        Backend::Bst => Box::new(BstStore::new()),
        Backend::Sqlite => Box::new(SqliteStore::new(database_path)?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Course;

    fn sample() -> Vec<Course> {
        vec![
            Course::new("MATH201", "Discrete Mathematics", &[]),
            Course::new("CSCI300", "Introduction to Algorithms", &["CSCI200", "MATH201"]),
            Course::new("CSCI100", "Introduction to Computer Science", &[]),
            Course::new("CSCI200", "Data Structures", &["CSCI101"]),
            Course::new("CSCI101", "Introduction to Programming in C++", &["CSCI100"]),
        ]
    }

    fn stores() -> Vec<Box<dyn CourseStore>> {
        vec![
            Box::new(MapStore::new()),
            Box::new(VecStore::new()),
            Box::new(BstStore::new()),
            Box::new(SqliteStore::in_memory().unwrap()),
        ]
    }

    #[test]
    fn test_backends_agree() {
        for mut store in stores() {
            store.replace_all(sample()).unwrap();

            let numbers: Vec<String> = store
                .sorted_courses()
                .unwrap()
                .into_iter()
                .map(|c| c.number)
                .collect();
            assert_eq!(
                numbers,
                vec!["CSCI100", "CSCI101", "CSCI200", "CSCI300", "MATH201"],
                "backend {}",
                store.backend()
            );

            let course = store.find("CSCI300").unwrap().unwrap();
            assert_eq!(course.prerequisites, vec!["CSCI200", "MATH201"]);
            assert!(store.find("CSCI999").unwrap().is_none());
            assert_eq!(store.len().unwrap(), 5);
        }
    }

    #[test]
    fn test_backends_start_empty() {
        for store in stores() {
            assert!(store.is_empty().unwrap());
            assert!(store.sorted_courses().unwrap().is_empty());
        }
    }

    #[test]
    fn test_open_store_selects_backend() {
        for backend in [Backend::Map, Backend::Vec, Backend::Bst] {
            let store = open_store(backend, "unused.db").unwrap();
            assert_eq!(store.backend(), backend);
        }
    }
}
