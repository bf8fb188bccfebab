//! Semantic action IDs for Gold Clicker click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const TAP_COIN: u16 = 0;
pub const TOGGLE_THEME: u16 = 1;
pub const RESET_GAME: u16 = 2;

// ── Shop purchase (base + catalog index) ────────────────────────
pub const BUY_ENTRY_BASE: u16 = 100;
