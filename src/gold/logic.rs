//! Gold Clicker game logic. Pure functions over `GoldState`, fully testable.

use log::{debug, info};
use thiserror::Error;

use super::state::GoldState;

/// Ticks of flash feedback after a tap (0.3s at 10 ticks/sec).
const TAP_FLASH_TICKS: u32 = 3;
/// Ticks of flash feedback after a purchase (0.5s).
const PURCHASE_FLASH_TICKS: u32 = 5;

/// Why a purchase was rejected. Returning one never changes the economy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("not enough coins: need {price}, have {balance}")]
    InsufficientFunds { price: u64, balance: u64 },

    #[error("no shop entry with id '{0}'")]
    UnknownEntry(String),
}

/// What a successful purchase did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub price: u64,
    pub yield_increase: u64,
    pub owned: u64,
    pub yield_per_tap: u64,
}

/// Manual tap: credit the current yield. Returns the amount credited.
pub fn tap(state: &mut GoldState) -> u64 {
    let amount = state.economy.yield_per_tap;
    state.economy.currency = state.economy.currency.saturating_add(amount);
    state.coins_earned_all_time = state.coins_earned_all_time.saturating_add(amount);
    state.total_taps += 1;
    state.tap_flash = TAP_FLASH_TICKS;
    state.dirty = true;
    amount
}

/// Buy one unit of the entry with `id`.
///
/// Unaffordable or unknown entries leave economy and catalog untouched.
pub fn purchase(state: &mut GoldState, id: &str) -> Result<PurchaseReceipt, PurchaseError> {
    let balance = state.economy.currency;
    let entry = state
        .catalog
        .find_mut(id)
        .ok_or_else(|| PurchaseError::UnknownEntry(id.to_string()))?;

    let price = entry.def.price;
    if balance < price {
        return Err(PurchaseError::InsufficientFunds { price, balance });
    }

    let yield_increase = entry.def.yield_increase;
    entry.owned += 1;
    let owned = entry.owned;

    state.economy.currency = balance - price;
    state.economy.yield_per_tap = state.economy.yield_per_tap.saturating_add(yield_increase);
    state.purchase_flash = PURCHASE_FLASH_TICKS;
    state.dirty = true;

    debug!("purchased {id} for {price}, yield now {}", state.economy.yield_per_tap);

    Ok(PurchaseReceipt {
        price,
        yield_increase,
        owned,
        yield_per_tap: state.economy.yield_per_tap,
    })
}

/// Buy by display position and report the outcome in the message log.
/// Returns true if the purchase went through.
pub fn purchase_index(state: &mut GoldState, index: usize) -> bool {
    let Some(entry) = state.catalog.get(index) else {
        return false;
    };
    let id = entry.id().to_string();
    let name = entry.name().to_string();

    match purchase(state, &id) {
        Ok(receipt) => {
            state.add_log(
                &format!(
                    "Bought {} for {} coins (+{}, owned {}), per click now {}",
                    name,
                    format_number(receipt.price),
                    format_number(receipt.yield_increase),
                    receipt.owned,
                    format_number(receipt.yield_per_tap)
                ),
                false,
            );
            true
        }
        Err(PurchaseError::InsufficientFunds { price, .. }) => {
            let missing = state.economy.shortfall(price);
            state.add_log(
                &format!(
                    "{} costs {} coins, {} more needed",
                    name,
                    format_number(price),
                    format_number(missing)
                ),
                false,
            );
            false
        }
        Err(e) => {
            debug!("purchase rejected: {e}");
            false
        }
    }
}

/// Flip light/dark mode. Does not touch the economy.
pub fn toggle_display_mode(state: &mut GoldState) {
    state.display_mode = state.display_mode.toggled();
    state.dirty = true;
}

/// Start over: zero balance, yield 1, nothing owned. Display mode is kept.
pub fn reset(state: &mut GoldState) {
    state.economy.currency = 0;
    state.economy.yield_per_tap = 1;
    state.catalog.clear_owned();
    state.total_taps = 0;
    state.coins_earned_all_time = 0;
    state.tap_flash = 0;
    state.purchase_flash = 0;
    state.dirty = true;
    state.add_log("New game started.", true);
    info!("game reset");
}

/// Advance visual timers by `delta_ticks`. The economy never changes here.
pub fn tick(state: &mut GoldState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    state.tap_flash = state.tap_flash.saturating_sub(delta_ticks);
    state.purchase_flash = state.purchase_flash.saturating_sub(delta_ticks);
}

/// Format a coin amount with thousands separators, e.g. `12500` → `12,500`.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Tap,
        Buy(usize),
        Toggle,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Tap),
            2 => (0usize..7).prop_map(Op::Buy),
            1 => Just(Op::Toggle),
        ]
    }

    proptest! {
        #[test]
        fn prop_n_taps_credit_n_times_yield(n in 0u64..500, yield_per_tap in 1u64..1_000) {
            let mut state = GoldState::new();
            state.economy.yield_per_tap = yield_per_tap;
            for _ in 0..n {
                tap(&mut state);
            }
            prop_assert_eq!(state.economy.currency, n * yield_per_tap);
            prop_assert_eq!(state.economy.yield_per_tap, yield_per_tap);
        }

        #[test]
        fn prop_invariants_hold_for_any_sequence(
            ops in proptest::collection::vec(arb_op(), 0..300),
            start in 0u64..400_000,
        ) {
            let mut state = GoldState::new();
            state.economy.currency = start;
            for op in ops {
                match op {
                    Op::Tap => { tap(&mut state); }
                    Op::Buy(i) => { purchase_index(&mut state, i); }
                    Op::Toggle => toggle_display_mode(&mut state),
                }
                prop_assert!(state.economy.yield_per_tap >= 1);
            }
            let bought: u64 = state.catalog.entries().iter().map(|e| e.total_yield()).sum();
            prop_assert_eq!(state.economy.yield_per_tap, 1 + bought);
        }

        #[test]
        fn prop_purchase_outcome_is_exact(
            currency in 0u64..400_000,
            yield_per_tap in 1u64..500,
            index in 0usize..7,
        ) {
            let mut state = GoldState::new();
            state.economy.currency = currency;
            state.economy.yield_per_tap = yield_per_tap;
            let entry = state.catalog.get(index).unwrap().clone();

            match purchase(&mut state, entry.id()) {
                Ok(receipt) => {
                    prop_assert!(currency >= entry.price());
                    prop_assert_eq!(state.economy.currency, currency - entry.price());
                    prop_assert_eq!(state.economy.yield_per_tap, yield_per_tap + entry.yield_increase());
                    prop_assert_eq!(receipt.owned, 1);
                }
                Err(_) => {
                    prop_assert!(currency < entry.price());
                    prop_assert_eq!(state.economy.currency, currency);
                    prop_assert_eq!(state.economy.yield_per_tap, yield_per_tap);
                    prop_assert_eq!(state.catalog.get(index).unwrap().owned, 0);
                }
            }
        }

        #[test]
        fn prop_format_number_strips_to_digits(n in 0u64..10_000_000_000) {
            let s = format_number(n);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }
    }
}
