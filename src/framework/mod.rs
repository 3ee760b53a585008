pub mod action;
pub mod children;
pub mod components;
pub mod host;
pub mod updater;
pub mod view_container;

// Re-export commonly used items
pub use action::Action;
pub use children::Children;
pub use components::Component;
pub use host::ComponentHost;
pub use updater::Updater;
pub use view_container::ViewContainer;
