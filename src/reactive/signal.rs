use std::sync::{
    Arc, RwLock,
    atomic::{AtomicU64, Ordering},
};

use super::subscription::{ObserverList, Subscription};

struct SignalInner<T> {
    value: RwLock<T>,
    version: AtomicU64,
    observers: ObserverList<T>,
}

/// A shared mutable cell whose changes can be observed.
///
/// Cloning a `Signal` creates a new handle to the **same** value.
///
/// # Invariants
///
/// 1. Setting a value equal to the current one is a no-op: no version bump,
///    no notification.
/// 2. Observers run after the new value is committed and the lock released,
///    in registration order, before `set` returns.
/// 3. `version` increments exactly once per committed change.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.inner.value.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("Signal")
            .field("value", &*value)
            .field("version", &self.inner.version.load(Ordering::Acquire))
            .finish()
    }
}

impl<T> Signal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                value: RwLock::new(value),
                version: AtomicU64::new(0),
                observers: ObserverList::new(),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.inner.value.read().unwrap_or_else(|e| e.into_inner());
        f(&value)
    }

    /// Replaces the value. Returns whether observers were notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.write().unwrap_or_else(|e| e.into_inner());
            if *current == value {
                return false;
            }
            *current = value;
            self.inner.version.fetch_add(1, Ordering::AcqRel);
        }
        // observers read the committed value, not the argument
        let committed = self.get();
        self.inner.observers.notify(&committed);
        true
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }

    /// Registers `observer` for future changes only.
    pub fn subscribe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.inner.observers.insert(observer)
    }

    /// Runs `observer` now with the current value, then again on every change.
    pub fn effect(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let observer = Arc::new(observer);
        let current = self.get();
        (*observer)(&current);
        self.inner.observers.insert(move |value| (*observer)(value))
    }

    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }

    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            signal: self.clone(),
        }
    }
}

/// A read-only view of a [`Signal`], handed to child components as a
/// one-way input. The holder can observe the value but never change it.
pub struct ReadSignal<T> {
    signal: Signal<T>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadSignal").field(&self.signal).finish()
    }
}

impl<T> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn get(&self) -> T {
        self.signal.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.signal.with(f)
    }

    pub fn effect(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.signal.effect(observer)
    }

    pub fn version(&self) -> u64 {
        self.signal.version()
    }
}

impl<T> From<&Signal<T>> for ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn from(signal: &Signal<T>) -> Self {
        signal.read_only()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_notifies_only_on_change() {
        let signal = Signal::new(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = Arc::clone(&seen);
            signal.subscribe(move |v| seen.lock().unwrap().push(*v))
        };

        assert!(signal.set(2));
        assert!(!signal.set(2));
        assert!(signal.update(|v| v + 1));

        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
        assert_eq!(signal.version(), 2);
    }

    #[test]
    fn effect_runs_immediately_then_on_change() {
        let signal = Signal::new(String::from("a"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut effect = {
            let seen = Arc::clone(&seen);
            signal.effect(move |v: &String| seen.lock().unwrap().push(v.clone()))
        };
        signal.set("b".into());
        effect.unsubscribe();
        signal.set("c".into());

        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(signal.observer_count(), 0);
    }

    #[test]
    fn observers_may_write_other_signals() {
        let source = Signal::new(0u32);
        let doubled = Signal::new(0u32);
        let _link = {
            let doubled = doubled.clone();
            source.effect(move |v| {
                doubled.set(v * 2);
            })
        };
        source.set(21);
        assert_eq!(doubled.get(), 42);
    }

    #[test]
    fn read_signal_follows_the_source() {
        let signal = Signal::new(5u32);
        let view = ReadSignal::from(&signal);
        signal.set(6);
        assert_eq!(view.get(), 6);
        assert_eq!(view.version(), signal.version());
    }
}
