use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Size},
    widgets::{Block, Borders, Paragraph},
};
use tokio::task::JoinHandle;
use tracing::info;

use super::input_child::InputChild;
use crate::{
    components::{Children, Component},
    config::Config,
    framework::{Action, Updater},
    reactive::Signal,
};

pub const DEFAULT_NAME: &str = "Pedro";
pub const UPDATED_NAME: &str = "Pedro Hurtado";

/// Owns a name and passes it one way to an [`InputChild`].
pub struct InputParent {
    name: Signal<String>,
    child: InputChild,
    updater: Option<Updater>,
}

impl InputParent {
    pub fn new() -> Self {
        let name = Signal::new(DEFAULT_NAME.to_string());
        let child = InputChild::new(name.read_only());
        Self {
            name,
            child,
            updater: None,
        }
    }

    pub fn name(&self) -> String {
        self.name.get()
    }

    pub fn child(&self) -> &InputChild {
        &self.child
    }

    pub fn handler_click(&mut self) {
        info!("InputParent::handler_click - renaming to {UPDATED_NAME}");
        self.name.set(UPDATED_NAME.to_string());
    }

    /// Same update, applied from a spawned task after the current one yields.
    pub fn handler_click_deferred(&self) -> JoinHandle<()> {
        let name = self.name.clone();
        let updater = self.updater.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            if name.set(UPDATED_NAME.to_string()) {
                if let Some(updater) = updater {
                    updater.update();
                }
            }
        })
    }
}

impl Default for InputParent {
    fn default() -> Self {
        Self::new()
    }
}

impl Children for InputParent {
    fn children(&mut self) -> Vec<&mut dyn Component> {
        vec![&mut self.child as &mut dyn Component]
    }
}

impl Component for InputParent {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        self.children_will_mount(config)
    }

    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        self.updater = Some(updater.clone());
        self.children_did_mount(area, updater)
    }

    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        match action {
            Action::Rename => self.handler_click(),
            Action::RenameDeferred => {
                self.handler_click_deferred();
            }
            _ => {}
        }
        Ok(None)
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        self.children_will_unmount()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let [top, bottom] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        let parent = Paragraph::new(format!(
            "Parent name: {}  (r: rename, e: rename later)",
            self.name()
        ))
        .block(Block::default().borders(Borders::ALL).title("InputParent"));
        frame.render_widget(parent, top);

        let block = Block::default().borders(Borders::ALL).title("InputChild");
        let inner = block.inner(bottom);
        frame.render_widget(block, bottom);
        self.child.render(frame, inner)
    }
}
