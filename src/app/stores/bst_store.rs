use crate::core::tree::CourseTree;
use crate::domain::model::{Backend, Course};
use crate::domain::ports::CourseStore;
use crate::utils::error::Result;

/// Courses held in a [`CourseTree`]; the listing is an in-order traversal.
#[derive(Debug, Default)]
pub struct BstStore {
    tree: CourseTree,
}

impl BstStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &CourseTree {
        &self.tree
    }
}

impl CourseStore for BstStore {
    fn replace_all(&mut self, courses: Vec<Course>) -> Result<()> {
        self.tree.clear();
        for course in courses {
            self.tree.insert(course);
        }
        tracing::debug!(
            "BST store now holds {} courses (height {})",
            self.tree.len(),
            self.tree.height()
        );
        Ok(())
    }

    fn sorted_courses(&self) -> Result<Vec<Course>> {
        Ok(self.tree.to_sorted_vec())
    }

    fn find(&self, number: &str) -> Result<Option<Course>> {
        Ok(self.tree.search(number).cloned())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.tree.len())
    }

    fn backend(&self) -> Backend {
        Backend::Bst
    }
}
