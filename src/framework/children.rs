use ratatui::layout::Size;
use tracing::debug;

use super::{action::Action, components::Component};
use crate::{config::Config, framework::Updater};

/// `Children` trait provides React-like children functionality for components.
///
/// This trait allows components to contain and manage child components,
/// similar to how React components can have children through props.children.
pub trait Children {
    /// Get mutable references to children components.
    /// Similar to React's props.children. Override this to provide children.
    ///
    /// # Returns
    ///
    /// * `Vec<&mut dyn Component>` - Mutable references to child components.
    fn children(&mut self) -> Vec<&mut dyn Component> {
        Vec::new()
    }

    /// Helper method to propagate constructor to all children.
    /// Call this in your component_will_mount if you have children.
    fn children_will_mount(&mut self, config: Config) -> color_eyre::Result<()> {
        for child in self.children() {
            child.component_will_mount(config.clone())?;
        }
        Ok(())
    }

    /// Helper method to propagate mount to all children.
    /// Call this in your component_did_mount if you have children.
    fn children_did_mount(&mut self, area: Size, updater: Updater) -> color_eyre::Result<()> {
        for child in self.children() {
            child.component_did_mount(area, updater.clone())?;
        }
        Ok(())
    }

    /// Helper method to propagate an action to all children.
    /// Returns the follow-up actions the children emitted, in order.
    fn propagate_update(&mut self, action: Action) -> color_eyre::Result<Vec<Action>> {
        let mut actions = Vec::new();
        for child in self.children() {
            if let Some(next) = child.component_did_update(action.clone())? {
                actions.push(next);
            }
        }
        Ok(actions)
    }

    /// Propagates `action` and returns the first follow-up. Any further
    /// follow-ups are queued through `updater` rather than lost.
    fn forward_update(
        &mut self,
        action: Action,
        updater: Option<&Updater>,
    ) -> color_eyre::Result<Option<Action>> {
        let mut actions = self.propagate_update(action)?.into_iter();
        let first = actions.next();
        for rest in actions {
            match updater {
                Some(updater) => updater.dispatch(rest),
                None => debug!("Children::forward_update - no updater, dropping {rest}"),
            }
        }
        Ok(first)
    }

    /// Helper method to propagate unmount to all children.
    /// Children are torn down in reverse mount order.
    fn children_will_unmount(&mut self) -> color_eyre::Result<()> {
        for child in self.children().into_iter().rev() {
            child.component_will_unmount()?;
        }
        Ok(())
    }
}
