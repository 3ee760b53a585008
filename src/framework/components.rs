use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    Frame,
    layout::{Rect, Size},
};

use super::{action::Action, updater::Updater};
use crate::{config::Config, tui::Event};

/// `Component` is a trait that represents a visual and interactive element of the user interface.
///
/// Implementors of this trait can be registered with the main application loop and will be able to
/// receive events, update state, and be rendered on the screen.
///
/// This trait follows React-like lifecycle methods for predictable component behavior.
/// Components are `Send` because periodic work they spawn may outlive a single event.
pub trait Component: Send {
    /// Called once when the component is first created, before mounting.
    /// Similar to React's constructor. Use this to read configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration settings.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - An Ok result or an error.
    fn component_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        let _ = config; // to appease clippy
        Ok(())
    }

    /// Called immediately after the component is mounted.
    /// Similar to React's componentDidMount. Use this to start periodic work or install effects.
    ///
    /// # Arguments
    ///
    /// * `area` - Rectangular area the component is mounted within.
    /// * `updater` - Handle used to request a re-render.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - An Ok result or an error.
    fn component_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        let _ = (area, updater); // to appease clippy
        Ok(())
    }

    /// Called with every action the runtime dispatches.
    /// Similar to a reducer: mutate state, optionally emit a follow-up action.
    ///
    /// # Arguments
    ///
    /// * `action` - An action that may modify the state of the component.
    ///
    /// # Returns
    ///
    /// * `Result<Option<Action>>` - An action to be processed or none.
    fn component_did_update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
        let _ = action; // to appease clippy
        Ok(None)
    }

    /// Called immediately before the component is unmounted and destroyed.
    /// Similar to React's componentWillUnmount. Release every resource held here.
    /// Calling it twice must be harmless.
    fn component_will_unmount(&mut self) -> color_eyre::Result<()> {
        Ok(())
    }

    /// Handle incoming events and produce actions if necessary.
    ///
    /// # Arguments
    ///
    /// * `event` - An optional event to be processed.
    ///
    /// # Returns
    ///
    /// * `Result<Option<Action>>` - An action to be processed or none.
    fn handle_events(&mut self, event: Option<Event>) -> color_eyre::Result<Option<Action>> {
        let action = match event {
            Some(Event::Key(key_event)) => self.handle_key_event(key_event)?,
            Some(Event::Mouse(mouse_event)) => self.handle_mouse_event(mouse_event)?,
            _ => None,
        };
        Ok(action)
    }

    /// Handle key events and produce actions if necessary.
    fn handle_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
        let _ = key; // to appease clippy
        Ok(None)
    }

    /// Handle mouse events and produce actions if necessary.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> color_eyre::Result<Option<Action>> {
        let _ = mouse; // to appease clippy
        Ok(None)
    }

    /// Render the component on the screen. (REQUIRED)
    /// Similar to React's render method.
    ///
    /// # Arguments
    ///
    /// * `frame` - A frame used for rendering.
    /// * `area` - The area in which the component should be drawn.
    ///
    /// # Returns
    ///
    /// * `Result<()>` - An Ok result or an error.
    fn render(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()>;
}
