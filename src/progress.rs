//! Unlock progression
//!
//! One persisted integer: how many levels are unlocked. Minimum 1,
//! monotonically non-decreasing, advanced by exactly one when the frontier
//! level is completed.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;

/// Persisted unlock frontier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockState {
    unlocked: u32,
}

impl Default for UnlockState {
    fn default() -> Self {
        Self { unlocked: 1 }
    }
}

impl UnlockState {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tap_rush_progress";

    /// Create with an explicit count, clamped to `[1, LEVEL_COUNT]`.
    pub fn new(unlocked: u32) -> Self {
        Self {
            unlocked: unlocked.clamp(1, LEVEL_COUNT),
        }
    }

    /// Current unlock count.
    pub fn count(&self) -> u32 {
        self.unlocked
    }

    /// Advance the frontier by one level and persist. Saturates at the
    /// catalog size. Returns true if the count actually grew.
    pub fn advance(&mut self) -> bool {
        if self.unlocked >= LEVEL_COUNT {
            return false;
        }
        self.unlocked += 1;
        self.save();
        log::info!("Unlocked level {}", self.unlocked);
        true
    }

    /// Reset progress back to level 1 and persist.
    pub fn reset(&mut self) {
        self.unlocked = 1;
        self.save();
        log::info!("Progress reset");
    }

    /// Load progress from LocalStorage (WASM only). Corrupt or missing
    /// payloads fall back to the default; out-of-range counts are clamped.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(state) = serde_json::from_str::<UnlockState>(&json) {
                    let state = Self::new(state.unlocked);
                    log::info!("Loaded progress: {} levels unlocked", state.unlocked);
                    return state;
                }
                log::warn!("Corrupt progress payload, starting fresh");
            }
        }

        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to persist progress");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
