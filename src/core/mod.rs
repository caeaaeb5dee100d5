pub mod loader;
pub mod planner;
pub mod tree;

pub use crate::domain::model::{Course, LoadReport};
pub use crate::domain::ports::{ConfigProvider, CourseStore, Storage};
pub use crate::utils::error::Result;
