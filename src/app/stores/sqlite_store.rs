use crate::domain::model::{Backend, Course};
use crate::domain::ports::CourseStore;
use crate::utils::error::{PlannerError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

pub struct Table {
    pub name: &'static str,
    pub schema: &'static str,
    pub columns: &'static [&'static str],
    pub indices: &'static [&'static str],
}

const COURSES_TABLE_V_0: Table = Table {
    name: "courses",
    schema: "CREATE TABLE courses (course_number TEXT PRIMARY KEY, title TEXT NOT NULL);",
    columns: &["course_number", "title"],
    indices: &[],
};
const PREREQUISITES_TABLE_V_0: Table = Table {
    name: "prerequisites",
    schema: "CREATE TABLE prerequisites (course_number TEXT NOT NULL, position INTEGER NOT NULL, prereq_number TEXT NOT NULL, PRIMARY KEY (course_number, position), FOREIGN KEY (course_number) REFERENCES courses (course_number) ON DELETE CASCADE);",
    columns: &["course_number", "position", "prereq_number"],
    indices: &["CREATE INDEX idx_prereq_course ON prerequisites (course_number);"],
};

const SCHEMA_TABLES: &[Table] = &[COURSES_TABLE_V_0, PREREQUISITES_TABLE_V_0];

const BASE_DB_VERSION: i64 = 300;
const CURRENT_DB_VERSION: i64 = 0;

/// Courses persisted in a SQLite file with a `courses` and a `prerequisites` table.
///
/// The file survives restarts, but the planner still requires an explicit
/// load before serving queries.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;
        tracing::debug!("Opened course database at {}", db_path.as_ref().display());
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )?;

        if version == 0 && table_count == 0 {
            tracing::info!(
                "Creating course db schema at version {}",
                CURRENT_DB_VERSION
            );
            Self::create_schema(&conn)?;
        } else if version == BASE_DB_VERSION + CURRENT_DB_VERSION {
            Self::validate_schema(&conn)?;
        } else {
            return Err(PlannerError::SchemaError {
                message: format!("Unknown database version {}", version),
            });
        }

        Ok(Self { conn })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        for table in SCHEMA_TABLES {
            conn.execute(table.schema, [])?;
            for index in table.indices {
                conn.execute(index, [])?;
            }
        }
        conn.pragma_update(None, "user_version", BASE_DB_VERSION + CURRENT_DB_VERSION)?;
        Ok(())
    }

    fn validate_schema(conn: &Connection) -> Result<()> {
        for table in SCHEMA_TABLES {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name))?;
            let columns: Vec<String> = stmt
                .query_map([], |row| row.get(1))?
                .collect::<std::result::Result<_, _>>()?;

            if columns != table.columns {
                return Err(PlannerError::SchemaError {
                    message: format!(
                        "Table {} has columns {:?}, expected {:?}",
                        table.name, columns, table.columns
                    ),
                });
            }
        }
        Ok(())
    }

    fn prerequisites_of(&self, number: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT prereq_number FROM prerequisites WHERE course_number = ?1 ORDER BY position",
        )?;
        let prerequisites = stmt
            .query_map(params![number], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(prerequisites)
    }
}

impl CourseStore for SqliteStore {
    fn replace_all(&mut self, courses: Vec<Course>) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM prerequisites", [])?;
        tx.execute("DELETE FROM courses", [])?;

        {
            let mut clear_prereqs =
                tx.prepare_cached("DELETE FROM prerequisites WHERE course_number = ?1")?;
            let mut insert_course = tx.prepare_cached(
                "INSERT OR REPLACE INTO courses (course_number, title) VALUES (?1, ?2)",
            )?;
            let mut insert_prereq = tx.prepare_cached(
                "INSERT INTO prerequisites (course_number, position, prereq_number) VALUES (?1, ?2, ?3)",
            )?;

            for course in &courses {
                clear_prereqs.execute(params![course.number])?;
                insert_course.execute(params![course.number, course.title])?;
                for (position, prereq) in course.prerequisites.iter().enumerate() {
                    insert_prereq.execute(params![course.number, position as i64, prereq])?;
                }
            }
        }

        tx.commit()?;
        tracing::debug!("SQLite store replaced with {} course rows", courses.len());
        Ok(())
    }

    fn sorted_courses(&self) -> Result<Vec<Course>> {
        let mut prereq_stmt = self.conn.prepare_cached(
            "SELECT course_number, prereq_number FROM prerequisites ORDER BY course_number, position",
        )?;
        let mut prerequisites: HashMap<String, Vec<String>> = HashMap::new();
        let rows = prereq_stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (number, prereq) = row?;
            prerequisites.entry(number).or_default().push(prereq);
        }

        let mut course_stmt = self
            .conn
            .prepare_cached("SELECT course_number, title FROM courses ORDER BY course_number")?;
        let courses = course_stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .map(|row| {
                row.map(|(number, title)| Course {
                    prerequisites: prerequisites.remove(&number).unwrap_or_default(),
                    number,
                    title,
                })
            })
            .collect::<std::result::Result<Vec<Course>, _>>()?;

        Ok(courses)
    }

    fn find(&self, number: &str) -> Result<Option<Course>> {
        let title: Option<String> = self
            .conn
            .prepare_cached("SELECT title FROM courses WHERE course_number = ?1")?
            .query_row(params![number], |row| row.get(0))
            .optional()?;

        match title {
            Some(title) => Ok(Some(Course {
                number: number.to_string(),
                title,
                prerequisites: self.prerequisites_of(number)?,
            })),
            None => Ok(None),
        }
    }

    fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn backend(&self) -> Backend {
        Backend::Sqlite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Course> {
        vec![
            Course::new("CSCI300", "Introduction to Algorithms", &["CSCI200", "MATH201"]),
            Course::new("CSCI100", "Introduction to Computer Science", &[]),
            Course::new("CSCI200", "Data Structures", &["CSCI101"]),
        ]
    }

    #[test]
    fn test_replace_and_query() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.replace_all(sample()).unwrap();

        assert_eq!(store.len().unwrap(), 3);
        let numbers: Vec<String> = store
            .sorted_courses()
            .unwrap()
            .into_iter()
            .map(|c| c.number)
            .collect();
        assert_eq!(numbers, vec!["CSCI100", "CSCI200", "CSCI300"]);

        let course = store.find("CSCI300").unwrap().unwrap();
        assert_eq!(course.title, "Introduction to Algorithms");
        assert_eq!(course.prerequisites, vec!["CSCI200", "MATH201"]);
        assert!(store.find("CSCI999").unwrap().is_none());
    }

    #[test]
    fn test_prerequisite_order_and_repeats_survive() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .replace_all(vec![Course::new(
                "CSCI400",
                "Capstone",
                &["MATH201", "CSCI300", "MATH201"],
            )])
            .unwrap();

        let course = store.find("CSCI400").unwrap().unwrap();
        assert_eq!(course.prerequisites, vec!["MATH201", "CSCI300", "MATH201"]);
    }

    #[test]
    fn test_duplicate_course_rows_keep_last() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .replace_all(vec![
                Course::new("CSCI100", "Old", &["MATH100", "MATH101"]),
                Course::new("CSCI100", "New", &["CSCI050"]),
            ])
            .unwrap();

        assert_eq!(store.len().unwrap(), 1);
        let course = store.find("CSCI100").unwrap().unwrap();
        assert_eq!(course.title, "New");
        assert_eq!(course.prerequisites, vec!["CSCI050"]);
    }

    #[test]
    fn test_reopen_existing_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.db");

        {
            let mut store = SqliteStore::new(&path).unwrap();
            store.replace_all(sample()).unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foreign.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute("CREATE TABLE other (id INTEGER)", []).unwrap();
            conn.pragma_update(None, "user_version", 7).unwrap();
        }

        assert!(matches!(
            SqliteStore::new(&path),
            Err(PlannerError::SchemaError { .. })
        ));
    }
}
