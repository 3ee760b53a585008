//! Reactive primitives the demo components are built from.
//!
//! - [`Signal`]: shared value with change notification; [`ReadSignal`] is its
//!   read-only view used for one-way inputs.
//! - [`EventEmitter`]: output stream from a child to its owner.
//! - [`Subscription`]: RAII guard for a registered observer.
//! - [`DestroyRef`]: explicit teardown registry passed to components.
//!
//! Everything here is `Send + Sync` so spawned tasks (periodic ticks) can
//! write signals owned by a component.

pub mod destroy_ref;
pub mod emitter;
pub mod signal;
pub mod subscription;

pub use destroy_ref::DestroyRef;
pub use emitter::EventEmitter;
pub use signal::{ReadSignal, Signal};
pub use subscription::Subscription;
