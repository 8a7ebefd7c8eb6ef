use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Point in a persistence operation at which listeners are notified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreSave,
    PostSave,
    PreDelete,
    PostDelete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PreSave => "pre-save",
            Phase::PostSave => "post-save",
            Phase::PreDelete => "pre-delete",
            Phase::PostDelete => "post-delete",
        };
        f.write_str(name)
    }
}

/// A listener refused an operation. The owning service must abort it
/// (pre phases) or roll it back (post phases).
#[derive(Error, Debug)]
#[error("listener '{listener}' failed during {phase}: {reason}")]
pub struct ListenerError {
    pub listener: String,
    pub phase: Phase,
    pub reason: String,
}

impl ListenerError {
    pub fn new(listener: impl Into<String>, phase: Phase, reason: impl Into<String>) -> Self {
        Self {
            listener: listener.into(),
            phase,
            reason: reason.into(),
        }
    }
}

/// Hooks around the persistence of an entity `E`. All hooks default to
/// accepting the operation; implement only the ones you need.
pub trait LifecycleListener<E>: Send + Sync {
    /// Name reported in `ListenerError`
    fn name(&self) -> &str;

    /// Before `entity` is written. `is_new` is true for an insert.
    fn pre_save(&self, _entity: &E, _is_new: bool) -> Result<(), ListenerError> {
        Ok(())
    }

    /// After `entity` is written but before the write is committed
    fn post_save(&self, _entity: &E, _is_new: bool) -> Result<(), ListenerError> {
        Ok(())
    }

    /// Before `entity` is removed
    fn pre_delete(&self, _entity: &E) -> Result<(), ListenerError> {
        Ok(())
    }

    /// After `entity` is removed but before the removal is committed
    fn post_delete(&self, _entity: &E) -> Result<(), ListenerError> {
        Ok(())
    }
}

/// Ordered set of listeners, invoked in registration order.
/// The first failure stops the chain and is returned to the caller.
pub struct ListenerChain<E> {
    listeners: Vec<Arc<dyn LifecycleListener<E>>>,
}

impl<E> ListenerChain<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener
    pub fn register(&mut self, listener: Arc<dyn LifecycleListener<E>>) {
        debug!("Registered lifecycle listener '{}'", listener.name());
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn fire_pre_save(&self, entity: &E, is_new: bool) -> Result<(), ListenerError> {
        self.fire(|l| l.pre_save(entity, is_new))
    }

    pub fn fire_post_save(&self, entity: &E, is_new: bool) -> Result<(), ListenerError> {
        self.fire(|l| l.post_save(entity, is_new))
    }

    pub fn fire_pre_delete(&self, entity: &E) -> Result<(), ListenerError> {
        self.fire(|l| l.pre_delete(entity))
    }

    pub fn fire_post_delete(&self, entity: &E) -> Result<(), ListenerError> {
        self.fire(|l| l.post_delete(entity))
    }

    fn fire<F>(&self, hook: F) -> Result<(), ListenerError>
    where
        F: Fn(&dyn LifecycleListener<E>) -> Result<(), ListenerError>,
    {
        for listener in &self.listeners {
            hook(listener.as_ref())?;
        }
        Ok(())
    }
}

impl<E> Default for ListenerChain<E> {
    fn default() -> Self {
        Self::new()
    }
}
