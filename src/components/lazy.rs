use std::collections::HashMap;

use color_eyre::eyre::eyre;
use futures::{FutureExt, future::BoxFuture};
use tracing::debug;

use super::child_dynamic::ChildDynamic;
use crate::{
    components::Component,
    reactive::{EventEmitter, ReadSignal},
};

pub const CHILD_DYNAMIC: &str = "child-dynamic";

/// A component that can be created at runtime into a [`ViewContainer`]:
/// one required numeric input, one output stream.
///
/// [`ViewContainer`]: crate::framework::ViewContainer
pub trait DynamicChild: Component {
    fn output(&self) -> EventEmitter<u32>;
}

pub type ChildFactory = fn(ReadSignal<u32>) -> Box<dyn DynamicChild>;

/// Resolves a component implementation by logical id. Resolution may suspend.
pub trait ModuleLoader: Send + Sync {
    fn resolve(&self, id: &str) -> BoxFuture<'static, color_eyre::Result<ChildFactory>>;
}

/// In-process registry that resolves after yielding once, standing in for a
/// deferred module import.
#[derive(Clone)]
pub struct LazyModules {
    modules: HashMap<String, ChildFactory>,
}

impl LazyModules {
    pub fn empty() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    pub fn register(mut self, id: impl Into<String>, factory: ChildFactory) -> Self {
        self.modules.insert(id.into(), factory);
        self
    }
}

impl Default for LazyModules {
    fn default() -> Self {
        Self::empty().register(CHILD_DYNAMIC, ChildDynamic::boxed)
    }
}

impl ModuleLoader for LazyModules {
    fn resolve(&self, id: &str) -> BoxFuture<'static, color_eyre::Result<ChildFactory>> {
        let found = self.modules.get(id).copied();
        let id = id.to_string();
        async move {
            tokio::task::yield_now().await;
            debug!("LazyModules::resolve - {id} resolved: {}", found.is_some());
            found.ok_or_else(|| eyre!("no module registered as '{id}'"))
        }
        .boxed()
    }
}
