use std::sync::{Arc, Mutex};

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};
use tracing::info;

use crate::{
    components::Component,
    reactive::{ReadSignal, Subscription},
};

/// Receives a name from its parent and logs every value it sees.
///
/// The name is a required constructor argument and a read-only view:
/// the child can observe it but never write it back.
pub struct InputChild {
    name: ReadSignal<String>,
    observed: Arc<Mutex<Vec<String>>>,
    effect: Option<Subscription>,
}

impl InputChild {
    pub fn new(name: ReadSignal<String>) -> Self {
        let observed = Arc::new(Mutex::new(Vec::new()));
        let effect = {
            let observed = Arc::clone(&observed);
            name.effect(move |name: &String| {
                info!("name:{name}");
                observed
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(name.clone());
            })
        };
        Self {
            name,
            observed,
            effect: Some(effect),
        }
    }

    pub fn name(&self) -> String {
        self.name.get()
    }

    /// Every value the child's observer has run with, oldest first.
    pub fn observed(&self) -> Vec<String> {
        self.observed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Component for InputChild {
    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        if let Some(mut effect) = self.effect.take() {
            effect.unsubscribe();
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let mut lines = vec![self.name.with(|name| Line::from(format!("Child sees: {name}")))];
        lines.extend(
            self.observed()
                .into_iter()
                .map(|name| Line::from(format!("  name:{name}"))),
        );
        frame.render_widget(Paragraph::new(lines), area);
        Ok(())
    }
}
