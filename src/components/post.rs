use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Rect, Size},
    widgets::{Block, Borders},
};

use super::post_comments::PostComments;
use crate::{
    components::{Children, Component},
    config::Config,
    framework::{Action, Updater},
};

pub const POST_COUNT: u32 = 100;

/// Materializes the post ids once and hands them to [`PostComments`].
pub struct Post {
    data: Arc<[u32]>,
    comments: PostComments,
    updater: Option<Updater>,
}

impl Post {
    pub fn new() -> Self {
        let data: Arc<[u32]> = (1..=POST_COUNT).collect();
        Self {
            comments: PostComments::new(Arc::clone(&data)),
            data,
            updater: None,
        }
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

impl Default for Post {
    fn default() -> Self {
        Self::new()
    }
}

impl Children for Post {
    fn children(&mut self) -> Vec<&mut dyn Component> {
        vec![&mut self.comments as &mut dyn Component]
    }
}

impl Component for Post {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        self.children_will_mount(config)
    }

    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        self.updater = Some(updater.clone());
        self.children_did_mount(area, updater)
    }

    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        let updater = self.updater.clone();
        self.forward_update(action, updater.as_ref())
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        self.children_will_unmount()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Post ({} comments, up/down to scroll)", self.data.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.comments.render(frame, inner)
    }
}
