// Application layer: concrete stores plus the interactive menu.

pub mod menu;
pub mod render;
pub mod stores;
