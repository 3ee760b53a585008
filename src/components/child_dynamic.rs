use ratatui::{
    Frame,
    layout::{Rect, Size},
    text::Line,
    widgets::Paragraph,
};
use tracing::debug;

use super::lazy::DynamicChild;
use crate::{
    components::Component,
    framework::Updater,
    reactive::{EventEmitter, ReadSignal, Subscription},
};

/// Re-emits its live input on its output every time the input changes.
pub struct ChildDynamic {
    value: ReadSignal<u32>,
    change_data: EventEmitter<u32>,
    effect: Option<Subscription>,
}

impl ChildDynamic {
    pub fn new(value: ReadSignal<u32>) -> Self {
        Self {
            value,
            change_data: EventEmitter::new(),
            effect: None,
        }
    }

    /// Factory registered with the module loader.
    pub fn boxed(value: ReadSignal<u32>) -> Box<dyn DynamicChild> {
        Box::new(Self::new(value))
    }
}

impl DynamicChild for ChildDynamic {
    fn output(&self) -> EventEmitter<u32> {
        self.change_data.clone()
    }
}

impl Component for ChildDynamic {
    fn component_did_mount(&mut self, _area: Size, _updater: Updater) -> color_eyre::Result<()> {
        if self.effect.is_none() {
            let change_data = self.change_data.clone();
            self.effect = Some(self.value.effect(move |value| {
                debug!("ChildDynamic - emitting {value}");
                change_data.emit(*value);
            }));
        }
        Ok(())
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        if let Some(mut effect) = self.effect.take() {
            effect.unsubscribe();
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let text = vec![
            Line::from(format!("ChildDynamic value: {}", self.value.get())),
            Line::from(format!("listeners: {}", self.change_data.subscriber_count())),
        ];
        frame.render_widget(Paragraph::new(text), area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;
    use crate::reactive::Signal;

    #[test]
    fn emits_the_number_on_every_change() -> color_eyre::Result<()> {
        let counter = Signal::new(0u32);
        let mut child = ChildDynamic::new(counter.read_only());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = Arc::clone(&seen);
            child.output().subscribe(move |v| seen.lock().unwrap().push(*v))
        };

        let (tx, _rx) = mpsc::unbounded_channel();
        child.component_did_mount(Size::new(10, 2), Updater::new(tx))?;
        counter.set(1);
        counter.set(2);
        child.component_will_unmount()?;
        counter.set(3);

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        Ok(())
    }
}
