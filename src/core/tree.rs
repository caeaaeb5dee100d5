//! Unbalanced binary search tree keyed by course number.
//!
//! Keys compare byte-wise (`str::cmp`), which is the order the course list is
//! printed in. Insert, search and traversal are all recursive; there is no
//! rebalancing, so inserting already-sorted keys degrades the tree into a list.

use crate::domain::model::Course;
use std::cmp::Ordering;

#[derive(Debug)]
struct Node {
    course: Course,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CourseTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl CourseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course, placing it by comparison of course numbers.
    ///
    /// An existing course with the same number is overwritten (last write wins).
    ///
    /// # Returns
    /// * `true` if the number was not in the tree before.
    ///
    /// # Example
    /// ```
    /// use course_planner::core::tree::CourseTree;
    /// use course_planner::domain::model::Course;
    ///
    /// let mut tree = CourseTree::new();
    /// assert!(tree.insert(Course::new("CSCI200", "Data Structures", &["CSCI101"])));
    /// assert!(!tree.insert(Course::new("CSCI200", "Data Structures II", &[])));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.search("CSCI200").unwrap().title, "Data Structures II");
    /// ```
    pub fn insert(&mut self, course: Course) -> bool {
        fn insert_node(slot: &mut Option<Box<Node>>, course: Course) -> bool {
            match slot {
                None => {
                    *slot = Some(Box::new(Node::new(course)));
                    true
                }
                Some(node) => match course.number.as_str().cmp(node.course.number.as_str()) {
                    Ordering::Less => insert_node(&mut node.left, course),
                    Ordering::Greater => insert_node(&mut node.right, course),
                    Ordering::Equal => {
                        node.course = course;
                        false
                    }
                },
            }
        }

        let inserted = insert_node(&mut self.root, course);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Find a course by its (normalized) number.
    pub fn search(&self, number: &str) -> Option<&Course> {
        fn search_node<'a>(node: Option<&'a Node>, number: &str) -> Option<&'a Course> {
            let node = node?;
            match number.cmp(node.course.number.as_str()) {
                Ordering::Equal => Some(&node.course),
                Ordering::Less => search_node(node.left.as_deref(), number),
                Ordering::Greater => search_node(node.right.as_deref(), number),
            }
        }

        search_node(self.root.as_deref(), number)
    }

    /// Visit every course in ascending course-number order.
    pub fn in_order<F: FnMut(&Course)>(&self, mut visit: F) {
        fn walk<F: FnMut(&Course)>(node: Option<&Node>, visit: &mut F) {
            if let Some(node) = node {
                walk(node.left.as_deref(), visit);
                visit(&node.course);
                walk(node.right.as_deref(), visit);
            }
        }

        walk(self.root.as_deref(), &mut visit);
    }

    /// Owned copies of all courses in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<Course> {
        let mut courses = Vec::with_capacity(self.len);
        self.in_order(|course| courses.push(course.clone()));
        courses
    }

    /// Number of levels on the longest root-to-leaf path; 0 when empty.
    ///
    /// Walks with an explicit stack so a degenerate tree cannot exhaust the
    /// call stack.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            pending.push((root, 1));
        }

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()]
                .into_iter()
                .flatten()
            {
                pending.push((child, depth + 1));
            }
        }

        height
    }

    pub fn clear(&mut self) {
        free_nodes(self.root.take());
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for CourseTree {
    fn drop(&mut self) {
        free_nodes(self.root.take());
    }
}

/// Free a subtree one node at a time. The default recursive drop of
/// `Option<Box<Node>>` overflows the stack on a long sorted chain.
fn free_nodes(root: Option<Box<Node>>) {
    let mut pending: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}
