use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    components::{
        Component, calendar::Calendar, container::Container, counter::Counter,
        input_parent::InputParent, parent_container::ParentContainer, post::Post, timer::Timer,
    },
    config::{Config, key_event_to_string},
    framework::{Action, ComponentHost, Updater},
    tui::{Event, Tui},
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    mouse: bool,
    components: Vec<Box<dyn Component>>,
    should_quit: bool,
    should_suspend: bool,
    mode: Mode,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Home,
}

/// One tab per demo, in display order.
pub fn demo_tabs() -> Container {
    Container::new("signal-lab")
        .with_tab("Counter", Box::new(Counter::new()))
        .with_tab("Timer", Box::new(ComponentHost::new(Timer::with_system_clock)))
        .with_tab("Calendar", Box::new(Calendar::new()))
        .with_tab("Input", Box::new(InputParent::new()))
        .with_tab("Dynamic", Box::new(ParentContainer::default()))
        .with_tab("Post", Box::new(Post::new()))
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64, mouse: bool) -> color_eyre::Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Ok(Self {
            config: Config::new()?,
            tick_rate,
            frame_rate,
            mouse,
            components: vec![Box::new(demo_tabs())],
            should_quit: false,
            should_suspend: false,
            mode: Mode::Home,
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .mouse(self.mouse);
        tui.enter()?;

        info!("Initializing components (constructor phase)");
        for component in self.components.iter_mut() {
            component.component_will_mount(self.config.clone())?;
        }

        info!("Mounting components (componentDidMount phase)");
        let size = tui.size()?;
        let updater = Updater::new(self.action_tx.clone());
        for component in self.components.iter_mut() {
            component.component_did_mount(size, updater.clone())?;
        }
        self.action_tx.send(Action::Render)?;

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.resume()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }

        info!("Unmounting components (componentWillUnmount phase)");
        for component in self.components.iter_mut().rev() {
            component.component_will_unmount()?;
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        match event {
            Event::Quit => action_tx.send(Action::Quit)?,
            Event::Tick => action_tx.send(Action::Tick)?,
            Event::Render => action_tx.send(Action::Render)?,
            Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            Event::Key(key) => self.handle_key_event(key)?,
            _ => {}
        }
        for component in self.components.iter_mut() {
            if let Some(action) = component.handle_events(Some(event.clone()))? {
                action_tx.send(action)?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        let Some(keymap) = self.config.keybindings.get(&self.mode) else {
            return Ok(());
        };
        match keymap.get(&vec![key]) {
            Some(action) => {
                info!("Got action: {action:?}");
                self.action_tx.send(action.clone())?;
            }
            None => debug!("Unbound key: {}", key_event_to_string(&key)),
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            }
            match action {
                Action::Quit => self.should_quit = true,
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, w, h)?,
                Action::Render => self.render(tui)?,
                Action::Error(ref message) => error!("{message}"),
                _ => {}
            }
            for component in self.components.iter_mut() {
                if let Some(action) = component.component_did_update(action.clone())? {
                    self.action_tx.send(action)?;
                }
            }
        }
        Ok(())
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> color_eyre::Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| {
            for component in self.components.iter_mut() {
                if let Err(err) = component.render(frame, frame.area()) {
                    let _ = self
                        .action_tx
                        .send(Action::Error(format!("Failed to render: {err:?}")));
                }
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend, layout::Size};

    use super::*;

    #[tokio::test]
    async fn demo_tabs_mount_render_and_unmount() -> color_eyre::Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tabs = demo_tabs();
        tabs.component_will_mount(Config::default())?;
        tabs.component_did_mount(Size::new(80, 24), Updater::new(tx))?;

        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        for _ in 0..6 {
            terminal.draw(|frame| {
                let area = frame.area();
                tabs.render(frame, area).unwrap();
            })?;
            assert_eq!(tabs.component_did_update(Action::NextTab)?, Some(Action::Render));
        }
        assert_eq!(tabs.active(), 0);

        tabs.component_will_unmount()?;
        Ok(())
    }
}
