use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    NextTab,
    PrevTab,
    Increment,
    Decrement,
    Rename,
    RenameDeferred,
    AddCounter,
    LoadComponent,
    ScrollUp,
    ScrollDown,
}

impl Action {
    /// Actions every mounted component sees, regardless of which tab is active.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Action::Tick | Action::Render | Action::Resize(..))
    }
}
