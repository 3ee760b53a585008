use std::sync::Arc;

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{List, ListItem, ListState},
};

use crate::{components::Component, framework::Action};

/// Renders each post id as a comment row, scrollable with up/down.
pub struct PostComments {
    data: Arc<[u32]>,
    state: ListState,
}

impl PostComments {
    pub fn new(data: Arc<[u32]>) -> Self {
        let mut state = ListState::default();
        if !data.is_empty() {
            state.select(Some(0));
        }
        Self { data, state }
    }

    pub fn selected(&self) -> Option<u32> {
        self.state.selected().and_then(|i| self.data.get(i).copied())
    }
}

impl Component for PostComments {
    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        match action {
            Action::ScrollDown if !self.data.is_empty() => {
                let next = self
                    .state
                    .selected()
                    .map_or(0, |i| (i + 1).min(self.data.len() - 1));
                self.state.select(Some(next));
            }
            Action::ScrollUp => {
                let previous = self.state.selected().map_or(0, |i| i.saturating_sub(1));
                self.state.select(Some(previous));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let items: Vec<ListItem> = self
            .data
            .iter()
            .map(|id| ListItem::new(format!("comment #{id}")))
            .collect();
        let list = List::new(items).highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.state);
        Ok(())
    }
}
