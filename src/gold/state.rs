//! Gold Clicker state definitions.

use super::catalog::Catalog;

/// Balance and per-tap yield. Everything the economy rules touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EconomyState {
    pub currency: u64,
    /// Never below 1.
    pub yield_per_tap: u64,
}

impl EconomyState {
    pub fn new() -> Self {
        Self {
            currency: 0,
            yield_per_tap: 1,
        }
    }

    pub fn can_afford(&self, price: u64) -> bool {
        self.currency >= price
    }

    /// Coins still missing before `price` becomes affordable.
    pub fn shortfall(&self, price: u64) -> u64 {
        price.saturating_sub(self.currency)
    }
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Light/dark colour scheme. Cosmetic only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    /// Label for the button that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            DisplayMode::Light => "Switch to Dark Mode",
            DisplayMode::Dark => "Switch to Light Mode",
        }
    }

    pub fn index(self) -> u8 {
        match self {
            DisplayMode::Light => 0,
            DisplayMode::Dark => 1,
        }
    }

    pub fn from_index(idx: u8) -> Self {
        match idx {
            1 => DisplayMode::Dark,
            _ => DisplayMode::Light,
        }
    }
}

/// Log entry shown in the message panel.
#[derive(Clone, Debug)]
pub struct GoldLogEntry {
    pub text: String,
    pub is_important: bool,
}

const MAX_LOG: usize = 50;

/// Full state of a Gold Clicker session.
pub struct GoldState {
    pub economy: EconomyState,
    pub catalog: Catalog,
    pub display_mode: DisplayMode,
    /// Manual taps this run.
    pub total_taps: u64,
    /// Coins earned by tapping this run (spending does not reduce it).
    pub coins_earned_all_time: u64,
    /// Message log.
    pub log: Vec<GoldLogEntry>,
    /// Ticks of visual feedback left after a tap.
    pub tap_flash: u32,
    /// Ticks of visual feedback left after a purchase.
    pub purchase_flash: u32,
    /// Set by every persisted mutation, cleared after a save.
    pub dirty: bool,
}

impl GoldState {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::default())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            economy: EconomyState::new(),
            catalog,
            display_mode: DisplayMode::Light,
            total_taps: 0,
            coins_earned_all_time: 0,
            log: vec![GoldLogEntry {
                text: "Welcome to Gold Clicker!".into(),
                is_important: true,
            }],
            tap_flash: 0,
            purchase_flash: 0,
            dirty: false,
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(GoldLogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn can_afford_index(&self, index: usize) -> bool {
        self.catalog
            .get(index)
            .is_some_and(|e| self.economy.can_afford(e.price()))
    }
}

impl Default for GoldState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economy_starts_at_zero_with_yield_one() {
        let e = EconomyState::new();
        assert_eq!(e.currency, 0);
        assert_eq!(e.yield_per_tap, 1);
    }

    #[test]
    fn can_afford_is_inclusive() {
        let e = EconomyState {
            currency: 15,
            yield_per_tap: 1,
        };
        assert!(e.can_afford(15));
        assert!(!e.can_afford(16));
    }

    #[test]
    fn shortfall_never_underflows() {
        let e = EconomyState {
            currency: 10,
            yield_per_tap: 1,
        };
        assert_eq!(e.shortfall(15), 5);
        assert_eq!(e.shortfall(3), 0);
    }

    #[test]
    fn display_mode_toggle_roundtrip() {
        let m = DisplayMode::Light;
        assert_eq!(m.toggled(), DisplayMode::Dark);
        assert_eq!(m.toggled().toggled(), DisplayMode::Light);
    }

    #[test]
    fn display_mode_index_mapping() {
        assert_eq!(DisplayMode::from_index(DisplayMode::Dark.index()), DisplayMode::Dark);
        assert_eq!(DisplayMode::from_index(DisplayMode::Light.index()), DisplayMode::Light);
        assert_eq!(DisplayMode::from_index(200), DisplayMode::Light);
    }

    #[test]
    fn toggle_label_names_the_other_mode() {
        assert_eq!(DisplayMode::Light.toggle_label(), "Switch to Dark Mode");
        assert_eq!(DisplayMode::Dark.toggle_label(), "Switch to Light Mode");
    }

    #[test]
    fn new_state_is_clean() {
        let state = GoldState::new();
        assert_eq!(state.economy, EconomyState::new());
        assert_eq!(state.display_mode, DisplayMode::Light);
        assert!(!state.dirty);
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn log_truncation() {
        let mut state = GoldState::new();
        for i in 0..60 {
            state.add_log(&format!("msg {}", i), false);
        }
        assert_eq!(state.log.len(), 50);
        assert_eq!(state.log.last().unwrap().text, "msg 59");
    }

    #[test]
    fn can_afford_index_checks_price() {
        let mut state = GoldState::new();
        state.economy.currency = 20;
        assert!(state.can_afford_index(0));
        assert!(!state.can_afford_index(1));
        assert!(!state.can_afford_index(99));
    }
}
