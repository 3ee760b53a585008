use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, Weak,
    atomic::{AtomicBool, Ordering},
};

/// A handle to a registered observer. When dropped, the observer is removed.
///
/// `unsubscribe` may be called any number of times; only the first call has
/// an effect.
#[must_use]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
    active: Arc<AtomicBool>,
}

impl Subscription {
    pub(crate) fn new(
        active: Arc<AtomicBool>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
            active,
        }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            self.active.store(false, Ordering::Release);
            unsubscribe();
        }
    }

    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some() && self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

struct ObserverListState<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

/// Registration-ordered list of callbacks shared by signals and emitters.
///
/// Notification snapshots the callbacks and releases the lock before calling
/// them, so a callback may freely set signals or subscribe further observers.
pub(crate) struct ObserverList<T> {
    state: Arc<Mutex<ObserverListState<T>>>,
}

impl<T> Clone for ObserverList<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: 'static> ObserverList<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ObserverListState {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub(crate) fn insert(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let id = {
            let mut state = lock(&self.state);
            let id = state.next_id;
            state.next_id += 1;
            state.entries.push(Entry {
                id,
                active: Arc::clone(&active),
                callback: Arc::new(callback),
            });
            id
        };

        let weak: Weak<Mutex<ObserverListState<T>>> = Arc::downgrade(&self.state);
        Subscription::new(active, move || {
            if let Some(state) = weak.upgrade() {
                lock(&state).entries.retain(|entry| entry.id != id);
            }
        })
    }

    pub(crate) fn notify(&self, value: &T) {
        let snapshot: Vec<(Arc<AtomicBool>, Callback<T>)> = lock(&self.state)
            .entries
            .iter()
            .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.callback)))
            .collect();
        for (active, callback) in snapshot {
            // skip observers released earlier in this same cycle
            if active.load(Ordering::Acquire) {
                callback(value);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
