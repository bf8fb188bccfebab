mod config;
mod gold;
mod input;
mod logging;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use log::{debug, info, LevelFilter};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use config::GameConfig;
use gold::GoldGame;
use input::{ClickState, InputEvent};
use time::GameClock;

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    // Install early so config warnings are visible.
    if let Err(e) = logging::init(LevelFilter::Info) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
    let config = GameConfig::load();
    log::set_max_level(config.level_filter());

    let game = GoldGame::new(&config).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    info!(
        "Gold Clicker starting: {} shop entries, {} ticks/sec",
        game.state.catalog.len(),
        config.ticks_per_sec
    );

    let game = Rc::new(RefCell::new(game));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(GameClock::new(config.ticks_per_sec)));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch: the backend reports grid cells, hit-test them against targets.
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let (col, row) = (mouse_event.col, mouse_event.row);
            let action = click_state.borrow().hit_test(col, row);

            if let Some(action_id) = action {
                debug!("click at col={col} row={row} -> action {action_id}");
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    })?;

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    })?;

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut game = game.borrow_mut();
            let ticks = clock.borrow_mut().update(js_sys::Date::now());
            game.tick(ticks);

            click_state.borrow_mut().clear_targets();
            let size = f.area();
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
