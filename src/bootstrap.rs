//! The one-shot restore → start → subscribe sequence.
//!
//! Runs once per page load: read the storage slot, construct the app with the
//! restored state as flags, then sit passively subscribed to its save-state
//! channel for the rest of the page's lifetime, writing each emission back to
//! the same slot.

use thiserror::Error;

use crate::app::{AppInstance, Application};
use crate::service_worker;
use crate::state::PersistedState;
use crate::storage::{StorageAdapter, StorageError};

/// Startup failures. All are fatal to the bootstrap; none corrupt stored
/// state (writes are atomic at key granularity).
#[derive(Debug, Error)]
pub enum BootError {
    /// The slot holds text that is not valid JSON. Startup aborts rather than
    /// silently discarding a user's saved state.
    #[error("stored state under {key:?} is unreadable: {source}")]
    CorruptState {
        key: String,
        source: serde_json::Error,
    },
    /// The document has no element with the expected mount id.
    #[error("mount point #{0} not found in document")]
    MountMissing(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("state failed to serialize: {0}")]
    Serialize(serde_json::Error),
}

/// Glue between the storage slot and the application instance.
pub struct Bootstrap<S> {
    storage: S,
    key: &'static str,
    mount_id: &'static str,
}

impl<S> Bootstrap<S>
where
    S: StorageAdapter + Clone + 'static,
{
    pub fn new(storage: S, key: &'static str, mount_id: &'static str) -> Self {
        Self {
            storage,
            key,
            mount_id,
        }
    }

    /// Read any previously saved state. An absent slot is a fresh start, not
    /// an error; a present but malformed slot is an error, not a fresh start.
    pub fn restore(&self) -> Result<Option<PersistedState>, BootError> {
        match self.storage.get(self.key)? {
            None => Ok(None),
            Some(text) => PersistedState::from_json(&text)
                .map(Some)
                .map_err(|source| BootError::CorruptState {
                    key: self.key.to_string(),
                    source,
                }),
        }
    }

    /// Construct the single application instance with `flags` as its initial
    /// configuration.
    pub fn start<A: Application>(
        &self,
        flags: Option<PersistedState>,
    ) -> Result<A::Instance, BootError> {
        A::init(self.mount_id, flags)
    }

    /// Subscribe the save handler: each emitted state is serialized and
    /// written to the slot, fully overwriting the previous value. Handler
    /// failures are logged and not retried; stored state is left as it was.
    pub fn persist_on_change<I: AppInstance>(&self, instance: &I) {
        let storage = self.storage.clone();
        let key = self.key;
        instance.on_save_state(Box::new(move |state| match state.to_json() {
            Ok(text) => {
                if let Err(e) = storage.set(key, &text) {
                    log::error!("save to {key:?} failed: {e}");
                } else {
                    log::debug!("saved state to {key:?} ({} bytes)", text.len());
                }
            }
            Err(e) => log::error!("emitted state failed to serialize: {e}"),
        }));
    }

    /// The full sequence. Ordering is structural: restoration completes
    /// before the instance exists, and the instance exists before the save
    /// subscription, so no save can precede construction.
    pub fn run<A: Application>(&self) -> Result<A::Instance, BootError> {
        let flags = self.restore()?;
        match &flags {
            Some(_) => log::info!("restored saved state from {:?}", self.key),
            None => log::info!("no saved state under {:?}, starting fresh", self.key),
        }

        let instance = self.start::<A>(flags)?;
        self.persist_on_change(&instance);
        service_worker::unregister();
        Ok(instance)
    }
}
