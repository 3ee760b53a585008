// Re-export framework traits for convenience
pub use crate::framework::{Children, Component};

pub mod calendar;
pub mod calendar_service;
pub mod child_dynamic;
pub mod container;
pub mod counter;
pub mod input_child;
pub mod input_parent;
pub mod lazy;
pub mod parent_container;
pub mod post;
pub mod post_comments;
pub mod timer;
