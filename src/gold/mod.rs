//! Gold Clicker: tap the coin, buy upgrades, tap harder.

pub mod actions;
pub mod catalog;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
#[cfg(target_arch = "wasm32")]
use log::info;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::{ConfigError, GameConfig};
use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::Catalog;
use save::AutosaveTimer;
use state::GoldState;

pub struct GoldGame {
    pub state: GoldState,
    storage_key: String,
    autosave: AutosaveTimer,
}

impl GoldGame {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let catalog = Catalog::from_defs(config.catalog.clone())?;
        let state = GoldState::with_catalog(catalog);

        #[cfg(target_arch = "wasm32")]
        let state = {
            let mut s = state;
            if save::load_game(&mut s, &config.storage_key) {
                s.add_log("Save data loaded.", false);
                info!(
                    "restored save: {} coins, {} per click, {} upgrades",
                    s.economy.currency,
                    s.economy.yield_per_tap,
                    s.catalog.total_owned()
                );
            }
            s
        };

        Ok(Self {
            state,
            storage_key: config.storage_key.clone(),
            autosave: AutosaveTimer::new(config.autosave_interval_ticks),
        })
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let shop_len = self.state.catalog.len() as u16;
        match action_id {
            TAP_COIN => {
                logic::tap(&mut self.state);
                true
            }
            TOGGLE_THEME => {
                logic::toggle_display_mode(&mut self.state);
                true
            }
            RESET_GAME => {
                self.reset();
                true
            }
            id if (BUY_ENTRY_BASE..BUY_ENTRY_BASE + shop_len).contains(&id) => {
                logic::purchase_index(&mut self.state, (id - BUY_ENTRY_BASE) as usize);
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' | ' ' => {
                logic::tap(&mut self.state);
                true
            }
            't' => {
                logic::toggle_display_mode(&mut self.state);
                true
            }
            'R' => {
                self.reset();
                true
            }
            '1'..='9' => {
                let index = (key as u8 - b'1') as usize;
                if index < self.state.catalog.len() {
                    logic::purchase_index(&mut self.state, index);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Dispatch one input event. Returns true if it was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    /// Advance timers by `delta_ticks` and autosave when due.
    pub fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
        if self.autosave.advance(delta_ticks) && self.state.dirty {
            self.save();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    fn reset(&mut self) {
        logic::reset(&mut self.state);
        #[cfg(target_arch = "wasm32")]
        save::delete_save(&self.storage_key);
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&mut self) {
        if save::save_game(&self.state, &self.storage_key) {
            self.state.dirty = false;
            debug!("autosaved to '{}'", self.storage_key);
        }
    }

    /// No browser storage off wasm32; the snapshot is only serialized to check it.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&mut self) {
        match save::to_json(&self.state) {
            Ok(json) => {
                debug!("skipping save to '{}' ({} bytes)", self.storage_key, json.len());
                self.state.dirty = false;
            }
            Err(e) => log::warn!("{e}"),
        }
    }
}
