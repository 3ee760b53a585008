use std::fmt::Display;

use tokio::sync::mpsc::UnboundedSender;

use super::action::Action;

/// Handle given to components at mount so they can request a re-render
/// from outside the event loop (timer ticks, finished module loads).
#[derive(Clone, Debug)]
pub struct Updater {
    tx: UnboundedSender<Action>,
}

impl Updater {
    pub fn new(tx: UnboundedSender<Action>) -> Self {
        Self { tx }
    }

    /// An updater with no event loop behind it; requests are dropped.
    pub fn detached() -> Self {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        Self { tx }
    }

    pub fn update(&self) {
        self.dispatch(Action::Render);
    }

    /// Queues any action for the next pass of the event loop.
    pub fn dispatch(&self, action: Action) {
        let _ = self.tx.send(action);
    }
}

impl Display for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Updater")
    }
}

impl PartialEq for Updater {
    fn eq(&self, other: &Self) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

impl Eq for Updater {}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[test]
    fn update_sends_render() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let updater = Updater::new(tx);
        updater.update();
        assert_eq!(rx.try_recv().ok(), Some(Action::Render));
    }

    #[test]
    fn dispatch_queues_the_given_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        Updater::new(tx).dispatch(Action::Increment);
        assert_eq!(rx.try_recv().ok(), Some(Action::Increment));
    }

    #[test]
    fn detached_updates_are_dropped() {
        let updater = Updater::detached();
        updater.update();
        assert_eq!(updater, updater.clone());
    }

    #[test]
    fn clones_share_a_channel() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (other_tx, _other_rx) = mpsc::unbounded_channel();
        let updater = Updater::new(tx);
        assert_eq!(updater, updater.clone());
        assert_ne!(updater, Updater::new(other_tx));
    }
}
