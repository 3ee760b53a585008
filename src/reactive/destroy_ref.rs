use std::sync::{Arc, Mutex};

use tracing::debug;

use super::subscription::lock;

type Callback = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct DestroyState {
    destroyed: bool,
    callbacks: Vec<Callback>,
}

/// Teardown registry handed to a component at construction.
///
/// The owner calls [`DestroyRef::destroy`] when the component leaves the
/// tree; every registered callback runs once, in registration order.
/// Callbacks registered after destruction run immediately.
#[derive(Clone, Default)]
pub struct DestroyRef {
    state: Arc<Mutex<DestroyState>>,
}

impl DestroyRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_destroy(&self, callback: impl FnOnce() + Send + 'static) {
        let mut state = lock(&self.state);
        if state.destroyed {
            drop(state);
            callback();
            return;
        }
        state.callbacks.push(Box::new(callback));
    }

    pub fn destroy(&self) {
        let callbacks = {
            let mut state = lock(&self.state);
            if state.destroyed {
                return;
            }
            state.destroyed = true;
            std::mem::take(&mut state.callbacks)
        };
        debug!("DestroyRef::destroy - running {} callbacks", callbacks.len());
        for callback in callbacks {
            callback();
        }
    }

    pub fn is_destroyed(&self) -> bool {
        lock(&self.state).destroyed
    }
}

impl std::fmt::Debug for DestroyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("DestroyRef")
            .field("destroyed", &state.destroyed)
            .field("callbacks", &state.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn callbacks_run_once_in_order() {
        let destroy_ref = DestroyRef::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = Arc::clone(&order);
            destroy_ref.on_destroy(move || order.lock().unwrap().push(i));
        }

        destroy_ref.destroy();
        destroy_ref.destroy();

        assert!(destroy_ref.is_destroyed());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn late_registration_runs_immediately() {
        let destroy_ref = DestroyRef::new();
        destroy_ref.destroy();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        destroy_ref.on_destroy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_state() {
        let destroy_ref = DestroyRef::new();
        let handle = destroy_ref.clone();
        handle.destroy();
        assert!(destroy_ref.is_destroyed());
    }
}
