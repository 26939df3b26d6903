//! Shared record of loaded assets.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Kind of external asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKind {
    Script,
    Style,
}

type Slot = Arc<OnceCell<()>>;

/// Page lifetime set of loaded scripts and stylesheets.
///
/// Cloning yields another handle to the same set. Each asset owns a slot
/// that is initialized at most once; concurrent loaders of the same asset
/// wait on the same slot instead of loading it again. Entries are never
/// removed.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    slots: Arc<Mutex<HashMap<(AssetKind, String), Slot>>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for an asset, creating it on first use.
    pub(super) fn slot(&self, kind: AssetKind, url: &str) -> Slot {
        self.slots
            .lock()
            .entry((kind, url.to_string()))
            .or_default()
            .clone()
    }

    /// Whether the asset finished loading.
    pub fn is_loaded(&self, kind: AssetKind, url: &str) -> bool {
        self.slots
            .lock()
            .get(&(kind, url.to_string()))
            .is_some_and(|slot| slot.initialized())
    }

    /// Records an asset as already present, e.g. linked by the page itself.
    ///
    /// Returns false if it was already recorded.
    pub fn mark_loaded(&self, kind: AssetKind, url: &str) -> bool {
        self.slot(kind, url).set(()).is_ok()
    }

    /// Loaded assets, sorted by kind then URL.
    pub fn loaded(&self) -> Vec<(AssetKind, String)> {
        let mut loaded: Vec<(AssetKind, String)> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(key, _)| key.clone())
            .collect();
        loaded.sort();
        loaded
    }
}
