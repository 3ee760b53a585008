use super::subscription::{ObserverList, Subscription};

/// Output stream a child component uses to report values to its owner.
///
/// Cloning an `EventEmitter` yields another handle to the same stream.
pub struct EventEmitter<T> {
    observers: ObserverList<T>,
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            observers: ObserverList::new(),
        }
    }

    pub fn emit(&self, value: T) {
        self.observers.notify(&value);
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.observers.insert(observer)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn emits_to_every_subscriber() {
        let emitter = EventEmitter::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _a = {
            let seen = Arc::clone(&seen);
            emitter.subscribe(move |v| seen.lock().unwrap().push(*v))
        };
        let _b = {
            let seen = Arc::clone(&seen);
            emitter.subscribe(move |v| seen.lock().unwrap().push(v * 10))
        };
        emitter.emit(3);
        assert_eq!(*seen.lock().unwrap(), vec![3, 30]);
        assert_eq!(emitter.subscriber_count(), 2);
    }

    #[test]
    fn emitting_without_subscribers_is_fine() {
        let emitter = EventEmitter::<u32>::default();
        emitter.emit(1);
        assert_eq!(emitter.subscriber_count(), 0);
    }
}
