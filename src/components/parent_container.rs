use std::sync::{Arc, Mutex};

use futures::FutureExt;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Size},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::lazy::{CHILD_DYNAMIC, ChildFactory, DynamicChild, LazyModules, ModuleLoader};
use crate::{
    components::Component,
    config::Config,
    framework::{Action, Updater, ViewContainer},
    reactive::{Signal, Subscription},
};

type PendingLoad = JoinHandle<color_eyre::Result<ChildFactory>>;

/// Holds a counter and a container slot into which a [`ChildDynamic`] is
/// created at runtime.
///
/// At most one child lives in the slot and at most one output subscription
/// is live: every load clears the slot and releases the previous
/// subscription before resolving the next child. Only one resolution is in
/// flight; a new request aborts the previous one.
///
/// [`ChildDynamic`]: super::child_dynamic::ChildDynamic
pub struct ParentContainer {
    container: ViewContainer<dyn DynamicChild>,
    counter: Signal<u32>,
    loader: Arc<dyn ModuleLoader>,
    current_subscription: Option<Subscription>,
    pending: Option<PendingLoad>,
    received: Arc<Mutex<Vec<u32>>>,
    config: Config,
    mount: Option<(Size, Updater)>,
}

impl ParentContainer {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self {
            container: ViewContainer::new(),
            counter: Signal::new(0),
            loader,
            current_subscription: None,
            pending: None,
            received: Arc::new(Mutex::new(Vec::new())),
            config: Config::default(),
            mount: None,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter.get()
    }

    pub fn add(&mut self) {
        self.counter.update(|value| value.saturating_add(1));
    }

    /// Values the parent has received from the child's output, oldest first.
    pub fn received(&self) -> Vec<u32> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn live_subscriptions(&self) -> usize {
        usize::from(
            self.current_subscription
                .as_ref()
                .is_some_and(Subscription::is_active),
        )
    }

    pub fn child_count(&self) -> usize {
        self.container.len()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Output stream of the child currently in the slot.
    pub fn child_output(&self) -> Option<crate::reactive::EventEmitter<u32>> {
        self.container.get().map(|child| child.output())
    }

    /// Clears the slot and starts resolving a fresh child in the background.
    /// The child is attached by [`poll_load`](Self::poll_load) or
    /// [`load_component`](Self::load_component).
    pub fn request_load(&mut self) -> color_eyre::Result<()> {
        self.container.clear()?;
        self.remove_subscription();
        if let Some(previous) = self.pending.take() {
            debug!("ParentContainer::request_load - superseding in-flight load");
            previous.abort();
        }

        let resolution = self.loader.resolve(CHILD_DYNAMIC);
        let updater = self.mount.as_ref().map(|(_, updater)| updater.clone());
        self.pending = Some(tokio::spawn(async move {
            let factory = resolution.await;
            if let Some(updater) = updater {
                updater.update();
            }
            factory
        }));
        Ok(())
    }

    /// Attaches the resolved child if the in-flight load has finished.
    /// Returns whether a child was attached.
    pub fn poll_load(&mut self) -> color_eyre::Result<bool> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        if !pending.is_finished() {
            return Ok(false);
        }
        let Some(outcome) = pending.now_or_never() else {
            return Ok(false);
        };
        self.pending = None;
        let factory = outcome??;
        self.attach(factory)?;
        Ok(true)
    }

    /// Clears the slot, releases the old subscription, resolves the child
    /// and instantiates it with the counter as its live input.
    pub async fn load_component(&mut self) -> color_eyre::Result<()> {
        self.request_load()?;
        if let Some(pending) = self.pending.take() {
            let factory = pending.await??;
            self.attach(factory)?;
        }
        Ok(())
    }

    fn attach(&mut self, factory: ChildFactory) -> color_eyre::Result<()> {
        // a slot filled by an earlier attach is replaced along with its subscription
        self.remove_subscription();
        let child = self
            .container
            .create_component(factory(self.counter.read_only()))?;

        let received = Arc::clone(&self.received);
        self.current_subscription = Some(child.output().subscribe(move |data| {
            info!("Data received from child: {data}");
            received
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(*data);
        }));

        // an unmounted parent still mounts its child so the output flows
        let (area, updater) = self
            .mount
            .clone()
            .unwrap_or_else(|| (Size::default(), Updater::detached()));
        child.component_will_mount(self.config.clone())?;
        child.component_did_mount(area, updater)
    }

    fn remove_subscription(&mut self) {
        if let Some(mut subscription) = self.current_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Default for ParentContainer {
    fn default() -> Self {
        Self::new(Arc::new(LazyModules::default()))
    }
}

impl Component for ParentContainer {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        self.config = config;
        Ok(())
    }

    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        info!("ParentContainer::componentDidMount - loading {CHILD_DYNAMIC}");
        self.mount = Some((area, updater));
        self.request_load()
    }

    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        match action {
            Action::AddCounter => self.add(),
            Action::LoadComponent => self.request_load()?,
            Action::Tick | Action::Render => {
                if self.poll_load()? {
                    return Ok(Some(Action::Render));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.remove_subscription();
        self.container.clear()?;
        self.mount = None;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let [top, slot, log] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .areas(area);

        let status = if self.is_loading() { " (loading...)" } else { "" };
        let header = Paragraph::new(format!(
            "counter: {}{status}  (a: add, l: reload child)",
            self.counter()
        ))
        .block(Block::default().borders(Borders::ALL).title("ParentContainer"));
        frame.render_widget(header, top);

        let block = Block::default().borders(Borders::ALL).title("container");
        let inner = block.inner(slot);
        frame.render_widget(block, slot);
        if let Some(child) = self.container.get_mut() {
            child.render(frame, inner)?;
        }

        let lines: Vec<Line> = self
            .received()
            .iter()
            .rev()
            .take(log.height as usize)
            .map(|data| Line::from(format!("received from child: {data}")))
            .collect();
        frame.render_widget(Paragraph::new(lines), log);
        Ok(())
    }
}

impl Drop for ParentContainer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.remove_subscription();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    fn mounted() -> color_eyre::Result<(ParentContainer, mpsc::UnboundedReceiver<Action>)> {
        let mut parent = ParentContainer::default();
        let (tx, rx) = mpsc::unbounded_channel();
        parent.component_will_mount(Config::default())?;
        parent.component_did_mount(Size::new(40, 20), Updater::new(tx))?;
        Ok((parent, rx))
    }

    #[tokio::test]
    async fn loaded_child_reports_the_live_counter() -> color_eyre::Result<()> {
        let (mut parent, _rx) = mounted()?;
        parent.load_component().await?;
        assert_eq!(parent.child_count(), 1);
        assert_eq!(parent.received(), vec![0]);

        parent.add();
        parent.add();
        assert_eq!(parent.counter(), 2);
        assert_eq!(parent.received(), vec![0, 1, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn loading_twice_keeps_exactly_one_subscription() -> color_eyre::Result<()> {
        let (mut parent, _rx) = mounted()?;
        parent.load_component().await?;
        let first = parent.child_output().expect("first child");
        assert_eq!(first.subscriber_count(), 1);

        parent.load_component().await?;
        let second = parent.child_output().expect("second child");

        assert_eq!(first.subscriber_count(), 0);
        assert_eq!(second.subscriber_count(), 1);
        assert_eq!(parent.live_subscriptions(), 1);
        assert_eq!(parent.child_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn teardown_releases_the_last_subscription() -> color_eyre::Result<()> {
        let (mut parent, _rx) = mounted()?;
        parent.load_component().await?;
        let output = parent.child_output().expect("child");

        parent.component_will_unmount()?;
        parent.component_will_unmount()?;

        assert_eq!(output.subscriber_count(), 0);
        assert_eq!(parent.live_subscriptions(), 0);
        assert_eq!(parent.child_count(), 0);

        parent.add();
        assert_eq!(parent.received(), vec![0]);
        Ok(())
    }

    #[tokio::test]
    async fn rapid_requests_resolve_a_single_child() -> color_eyre::Result<()> {
        let (mut parent, _rx) = mounted()?;
        parent.request_load()?;
        parent.request_load()?;
        parent.load_component().await?;

        // later polls find nothing left in flight
        assert!(!parent.poll_load()?);
        assert_eq!(parent.child_count(), 1);
        assert_eq!(parent.live_subscriptions(), 1);
        assert_eq!(parent.received(), vec![0]);
        Ok(())
    }

    #[tokio::test]
    async fn event_loop_polling_attaches_the_child() -> color_eyre::Result<()> {
        let (mut parent, mut rx) = mounted()?;
        assert!(parent.is_loading());

        // the resolution task asks for a render once it has finished
        assert_eq!(rx.recv().await, Some(Action::Render));
        while !parent.poll_load()? {
            tokio::task::yield_now().await;
        }
        assert!(!parent.is_loading());
        assert_eq!(parent.live_subscriptions(), 1);
        assert_eq!(parent.component_did_update(Action::AddCounter)?, None);
        assert_eq!(parent.received(), vec![0, 1]);
        Ok(())
    }

    #[tokio::test]
    async fn loading_without_a_mounted_parent_still_reports_values() -> color_eyre::Result<()> {
        let mut parent = ParentContainer::default();
        parent.load_component().await?;
        parent.add();
        parent.add();
        assert_eq!(parent.live_subscriptions(), 1);
        assert_eq!(parent.child_count(), 1);
        assert_eq!(parent.received(), vec![0, 1, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_module_surfaces_an_error() {
        let mut parent = ParentContainer::new(Arc::new(LazyModules::empty()));
        let result = parent.load_component().await;
        assert!(result.is_err());
        assert_eq!(parent.child_count(), 0);
        assert_eq!(parent.live_subscriptions(), 0);
    }
}
