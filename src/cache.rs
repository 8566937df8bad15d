//! Single-slot cache for the expensive per-epoch dataset.
//!
//! Epochs change on a fixed height cadence and datasets are large, so the
//! cache keeps exactly one resident context and rebuilds it only when a
//! requested height lands in a different epoch. This trades one rebuild per
//! epoch transition against unbounded memory for multiple epochs, matching
//! the near-sequential height access pattern of mining and verification.
//!
//! Locking: one mutex serializes the slot check and the rebuild. Concurrent
//! callers crossing an epoch boundary together block on a single rebuild
//! instead of racing to build the dataset twice; callers inside the resident
//! epoch serialize only on the slot check and hash on their cloned `Arc`
//! outside the lock. A superseded context stays alive until the last
//! in-flight call drops its handle.

use crate::engine::{EpochContext, EpochEngine};
use crate::error::Error;
use std::sync::{Arc, Mutex};

/// Zero-or-one resident [`EpochContext`], rebuilt on epoch change.
pub struct EpochContextCache<E: EpochEngine> {
    engine: Arc<E>,
    slot: Mutex<Option<Arc<E::Context>>>,
}

impl<E: EpochEngine> EpochContextCache<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            slot: Mutex::new(None),
        }
    }

    /// Return a context whose epoch matches `height`, rebuilding if the
    /// resident one is missing or tagged with a different epoch.
    ///
    /// Replacement is all-or-nothing: a failed build surfaces as
    /// [`Error::EpochBuild`] and leaves the previously resident context
    /// untouched.
    pub fn ensure(&self, height: u64) -> Result<Arc<E::Context>, Error> {
        let wanted = self.engine.epoch_number_for(height);
        let mut slot = self.slot.lock().expect("epoch slot lock poisoned");

        if let Some(ctx) = slot.as_ref() {
            if ctx.epoch_number() == wanted {
                return Ok(Arc::clone(ctx));
            }
        }

        let built = self
            .engine
            .build_context(wanted)
            .map_err(|e| Error::EpochBuild {
                epoch: wanted,
                reason: e.to_string(),
            })?;
        debug_assert_eq!(built.epoch_number(), wanted);

        let ctx = Arc::new(built);
        *slot = Some(Arc::clone(&ctx));
        Ok(ctx)
    }

    /// Epoch number of the resident context, if any.
    pub fn cached_epoch(&self) -> Option<u64> {
        self.slot
            .lock()
            .expect("epoch slot lock poisoned")
            .as_ref()
            .map(|ctx| ctx.epoch_number())
    }
}
