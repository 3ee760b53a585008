use ratatui::{prelude::*, widgets::*};
use tracing::info;

use super::{Children, Component};
use crate::{
    app::Mode,
    config::Config,
    framework::{Action, Updater},
    tui::Event,
};

/// Root container: one tab per demo, only the active tab receives input.
/// Tick/Render/Resize actions reach every child so background work
/// (pending loads, timers) keeps flowing while a tab is hidden.
pub struct Container {
    title: String,
    tabs: Vec<(String, Box<dyn Component>)>,
    active: usize,
    active_style: Style,
    inactive_style: Style,
    updater: Option<Updater>,
}

impl Container {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tabs: Vec::new(),
            active: 0,
            active_style: Style::default().fg(Color::Cyan),
            inactive_style: Style::default(),
            updater: None,
        }
    }

    /// Appends a child under its own tab.
    pub fn with_tab(mut self, title: impl Into<String>, child: Box<dyn Component>) -> Self {
        self.tabs.push((title.into(), child));
        self
    }

    pub fn active(&self) -> usize {
        self.active
    }

    fn select(&mut self, index: usize) {
        if !self.tabs.is_empty() {
            self.active = index % self.tabs.len();
            info!("Container::select - '{}' is active", self.tabs[self.active].0);
        }
    }

    fn active_child(&mut self) -> Option<&mut Box<dyn Component>> {
        self.tabs.get_mut(self.active).map(|(_, child)| child)
    }
}

impl Children for Container {
    fn children(&mut self) -> Vec<&mut dyn Component> {
        self.tabs
            .iter_mut()
            .map(|(_, child)| child.as_mut() as &mut dyn Component)
            .collect()
    }
}

impl Component for Container {
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        info!("Container::constructor - Initializing container '{}'", self.title);
        self.active_style = config.style(Mode::Home, "tab_active");
        self.inactive_style = config.style(Mode::Home, "tab_inactive");
        self.children_will_mount(config)
    }

    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        info!(
            "Container::componentDidMount - Container '{}' mounted with area: {:?}",
            self.title, area
        );
        self.updater = Some(updater.clone());
        self.children_did_mount(area, updater)
    }

    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        match action {
            Action::NextTab => {
                self.select(self.active + 1);
                Ok(Some(Action::Render))
            }
            Action::PrevTab => {
                self.select(self.active + self.tabs.len().max(1) - 1);
                Ok(Some(Action::Render))
            }
            action if action.is_broadcast() => {
                let updater = self.updater.clone();
                self.forward_update(action, updater.as_ref())
            }
            action => match self.active_child() {
                Some(child) => child.component_did_update(action),
                None => Ok(None),
            },
        }
    }

    fn handle_events(&mut self, event: Option<Event>) -> color_eyre::Result<Option<Action>> {
        match self.active_child() {
            Some(child) => child.handle_events(event),
            None => Ok(None),
        }
    }

    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        info!("Container::componentWillUnmount - Cleaning up container '{}'", self.title);
        self.children_will_unmount()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        let titles: Vec<String> = self.tabs.iter().map(|(title, _)| title.clone()).collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .style(self.inactive_style)
            .highlight_style(self.active_style)
            .divider("|");
        frame.render_widget(tabs, header);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} (tab/shift-tab to switch, q to quit)", self.title));
        let inner = block.inner(body);
        frame.render_widget(block, body);

        if let Some(child) = self.active_child() {
            child.render(frame, inner)?;
        }
        Ok(())
    }
}
