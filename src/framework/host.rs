use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::{Rect, Size},
};
use tracing::{debug, error};

use super::{action::Action, components::Component, updater::Updater};
use crate::{config::Config, reactive::DestroyRef, tui::Event};

/// Owns a component together with the [`DestroyRef`] it was built with.
///
/// Unmounting (or dropping a still-mounted host) runs the component's
/// `component_will_unmount` and then every teardown callback the component
/// registered. Both happen at most once.
pub struct ComponentHost {
    component: Box<dyn Component>,
    destroy_ref: DestroyRef,
    mounted: bool,
}

impl ComponentHost {
    /// Builds the component, handing it a fresh teardown registry.
    pub fn new<C: Component + 'static>(build: impl FnOnce(DestroyRef) -> C) -> Self {
        let destroy_ref = DestroyRef::new();
        Self {
            component: Box::new(build(destroy_ref.clone())),
            destroy_ref,
            mounted: false,
        }
    }

    pub fn destroy_ref(&self) -> &DestroyRef {
        &self.destroy_ref
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn teardown(&mut self) -> color_eyre::Result<()> {
        if self.destroy_ref.is_destroyed() {
            return Ok(());
        }
        self.mounted = false;
        let result = self.component.component_will_unmount();
        self.destroy_ref.destroy();
        result
    }
}

impl Component for ComponentHost {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        self.component.component_will_mount(config)
    }

    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        if !self.mounted {
            self.component.component_did_mount(area, updater)?;
            self.mounted = true;
            debug!("Component mounted");
        }
        Ok(())
    }

    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        self.component.component_did_update(action)
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        self.teardown()
    }

    fn handle_events(&mut self, event: Option<Event>) -> color_eyre::Result<Option<Action>> {
        self.component.handle_events(event)
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
        self.component.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> color_eyre::Result<Option<Action>> {
        self.component.handle_mouse_event(mouse)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        self.component.render(frame, area)
    }
}

impl Drop for ComponentHost {
    fn drop(&mut self) {
        if self.mounted {
            debug!("Component unmounting, running cleanup");
        }
        if let Err(e) = self.teardown() {
            error!("Error during component cleanup: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    struct Probe {
        unmounts: Arc<AtomicUsize>,
    }

    impl Component for Probe {
        fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
            self.unmounts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect) -> color_eyre::Result<()> {
            Ok(())
        }
    }

    fn probe_host(unmounts: &Arc<AtomicUsize>, destroyed: &Arc<AtomicUsize>) -> ComponentHost {
        let unmounts = Arc::clone(unmounts);
        let destroyed = Arc::clone(destroyed);
        ComponentHost::new(move |destroy_ref| {
            destroy_ref.on_destroy(move || {
                destroyed.fetch_add(1, Ordering::SeqCst);
            });
            Probe { unmounts }
        })
    }

    #[test]
    fn unmount_runs_teardown_once() -> color_eyre::Result<()> {
        let unmounts = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut host = probe_host(&unmounts, &destroyed);
        let (tx, _rx) = mpsc::unbounded_channel();
        host.component_did_mount(Size::new(10, 10), Updater::new(tx))?;
        assert!(host.is_mounted());

        host.component_will_unmount()?;
        host.component_will_unmount()?;
        drop(host);

        assert_eq!(unmounts.load(Ordering::SeqCst), 1);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn drop_tears_down_a_live_component() {
        let unmounts = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let host = probe_host(&unmounts, &destroyed);
        assert!(!host.destroy_ref().is_destroyed());
        drop(host);
        assert_eq!(unmounts.load(Ordering::SeqCst), 1);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }
}
