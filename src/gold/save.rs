//! Gold Clicker save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current snapshot format. Bump it when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest snapshot that can still be restored.
//!   Only bump it for breaking changes (a field removed or its meaning changed).
//!
//! Snapshots at or above `MIN_COMPATIBLE_VERSION` are restored with missing
//! fields filled from defaults. Unknown fields are ignored.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{DisplayMode, GoldState};

const SAVE_VERSION: u32 = 1;

const MIN_COMPATIBLE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize save data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse save data: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("save version {saved} is older than the minimum supported {min}")]
    IncompatibleVersion { saved: u32, min: u32 },
}

/// Serialized snapshot. Transient UI state (log, flashes) is not included.
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GameSave {
    currency: u64,
    yield_per_tap: u64,
    /// Owned count per catalog id. Keyed by id so catalog reordering is harmless.
    owned: BTreeMap<String, u64>,
    display_mode: u8, // 0=Light, 1=Dark
    total_taps: u64,
    coins_earned_all_time: u64,
}

fn extract_save(state: &GoldState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            currency: state.economy.currency,
            yield_per_tap: state.economy.yield_per_tap,
            owned: state
                .catalog
                .entries()
                .iter()
                .filter(|e| e.owned > 0)
                .map(|e| (e.id().to_string(), e.owned))
                .collect(),
            display_mode: state.display_mode.index(),
            total_taps: state.total_taps,
            coins_earned_all_time: state.coins_earned_all_time,
        },
    }
}

/// Restore a snapshot. Ids the current catalog does not know are dropped.
fn apply_save(state: &mut GoldState, save: &GameSave) {
    state.economy.currency = save.currency;
    state.economy.yield_per_tap = save.yield_per_tap.max(1);
    state.catalog.clear_owned();
    for (id, &count) in &save.owned {
        match state.catalog.find_mut(id) {
            Some(entry) => entry.owned = count,
            None => warn!("save references unknown shop entry '{id}', dropping it"),
        }
    }
    state.display_mode = DisplayMode::from_index(save.display_mode);
    state.total_taps = save.total_taps;
    state.coins_earned_all_time = save.coins_earned_all_time;
    state.dirty = false;
}

/// Serialize the persistent part of `state` to JSON.
pub fn to_json(state: &GoldState) -> Result<String, SaveError> {
    serde_json::to_string(&extract_save(state)).map_err(SaveError::Serialize)
}

/// Restore `state` from JSON produced by [`to_json`] (or an older compatible version).
pub fn restore_from_json(state: &mut GoldState, json: &str) -> Result<(), SaveError> {
    let save_data: SaveData = serde_json::from_str(json).map_err(SaveError::Parse)?;

    if save_data.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::IncompatibleVersion {
            saved: save_data.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    if save_data.version < SAVE_VERSION {
        info!(
            "migrating save data (saved={}, current={})",
            save_data.version, SAVE_VERSION
        );
    }

    apply_save(state, &save_data.game);
    Ok(())
}

/// Counts ticks and fires once per interval.
pub struct AutosaveTimer {
    interval: u32,
    elapsed: u32,
}

impl AutosaveTimer {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            elapsed: 0,
        }
    }

    /// Returns true when an interval boundary was crossed.
    pub fn advance(&mut self, ticks: u32) -> bool {
        self.elapsed = self.elapsed.saturating_add(ticks);
        if self.elapsed >= self.interval {
            self.elapsed %= self.interval;
            true
        } else {
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Write the snapshot to localStorage. Failures are logged, not raised.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &GoldState, key: &str) -> bool {
    let json = match to_json(state) {
        Ok(j) => j,
        Err(e) => {
            warn!("{e}");
            return false;
        }
    };

    match get_storage() {
        Some(storage) => match storage.set_item(key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to write save to localStorage: {e:?}");
                false
            }
        },
        None => false,
    }
}

/// Restore from localStorage. Broken or incompatible snapshots are discarded.
#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut GoldState, key: &str) -> bool {
    let Some(storage) = get_storage() else {
        return false;
    };
    let json = match storage.get_item(key) {
        Ok(Some(j)) => j,
        _ => return false,
    };

    match restore_from_json(state, &json) {
        Ok(()) => true,
        Err(e) => {
            warn!("discarding save data: {e}");
            let _ = storage.remove_item(key);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn delete_save(key: &str) {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(key);
    }
}
