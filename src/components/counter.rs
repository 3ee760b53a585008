use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, info};

use crate::{
    components::Component,
    framework::{Action, Updater},
    reactive::Signal,
};

/// Non-negative counter with increment and floor-at-zero decrement.
pub struct Counter {
    counter: Signal<u32>,
    updater: Option<Updater>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            counter: Signal::new(0),
            updater: None,
        }
    }

    pub fn value(&self) -> u32 {
        self.counter.get()
    }

    pub fn increment(&mut self) {
        self.counter.update(|value| value.saturating_add(1));
        self.request_render();
    }

    /// Decrements unless the counter is already zero.
    pub fn decrement(&mut self) {
        if self.counter.get() > 0 {
            self.counter.update(|value| value - 1);
            self.request_render();
        }
    }

    /// setState-like re-render request; a no-op before mount.
    fn request_render(&self) {
        if let Some(updater) = &self.updater {
            updater.update();
        }
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Counter {
    fn component_did_mount(
        &mut self,
        area: ratatui::layout::Size,
        updater: Updater,
    ) -> color_eyre::Result<()> {
        info!("Counter::componentDidMount - Component mounted with area: {:?}", area);
        self.updater = Some(updater);
        Ok(())
    }

    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        match action {
            Action::Increment => self.increment(),
            Action::Decrement => self.decrement(),
            _ => return Ok(None),
        }
        debug!("Counter::component_did_update - {action} -> {}", self.value());
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let lines = vec![
            Line::from(Span::from(format!("Count: {}", self.value()))),
            Line::from(""),
            Line::from("i to increment, d to decrement (never below zero)"),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        Ok(())
    }
}
