//! Persisted best score.
//!
//! A single numeric value in LocalStorage, stored as a decimal string under
//! a fixed key. Malformed or missing values read as zero.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "snake-high-score";

/// Load the high score from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(score) => {
                    log::info!("Loaded high score {}", score);
                    return score;
                }
                Err(_) => log::warn!("Ignoring corrupt high score {:?}", raw),
            }
        }
    }

    0
}

/// Save the high score to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &score.to_string());
        log::info!("High score saved ({})", score);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
