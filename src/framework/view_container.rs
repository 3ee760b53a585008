use tracing::debug;

use super::components::Component;

/// A slot in a parent's rendered output that holds at most one
/// imperatively created child.
pub struct ViewContainer<C: Component + ?Sized> {
    slot: Option<Box<C>>,
}

impl<C: Component + ?Sized> Default for ViewContainer<C> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<C: Component + ?Sized> ViewContainer<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unmounts and drops the current child, if any.
    pub fn clear(&mut self) -> color_eyre::Result<()> {
        if let Some(mut child) = self.slot.take() {
            debug!("ViewContainer::clear - unmounting child");
            child.component_will_unmount()?;
        }
        Ok(())
    }

    /// Places `child` in the slot, clearing whatever was there.
    pub fn create_component(&mut self, child: Box<C>) -> color_eyre::Result<&mut C> {
        self.clear()?;
        Ok(&mut **self.slot.insert(child))
    }

    pub fn get(&self) -> Option<&C> {
        self.slot.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut C> {
        self.slot.as_deref_mut()
    }

    pub fn len(&self) -> usize {
        usize::from(self.slot.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use pretty_assertions::assert_eq;
    use ratatui::{Frame, layout::Rect};

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

    #[test]
    fn creating_a_component_replaces_the_previous_one() -> color_eyre::Result<()> {
        let unmounts = Arc::new(AtomicUsize::new(0));
        let mut container: ViewContainer<dyn Component> = ViewContainer::new();
        assert!(container.is_empty());

        for _ in 0..3 {
            container.create_component(Box::new(Probe {
                unmounts: Arc::clone(&unmounts),
            }))?;
            assert_eq!(container.len(), 1);
        }
        assert_eq!(unmounts.load(Ordering::SeqCst), 2);

        container.clear()?;
        container.clear()?;
        assert!(container.is_empty());
        assert_eq!(unmounts.load(Ordering::SeqCst), 3);
        Ok(())
    }
}
