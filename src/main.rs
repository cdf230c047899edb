mod config;
mod duel;
mod input;
mod logging;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use duel::DuelGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use time::FrameClock;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = config::load();
    logging::init(&config.log_filter);
    tracing::info!(rules = ?config.rules, turn_period = config.turn_period, "loop-duel starting");

    let game = Rc::new(RefCell::new(DuelGame::new(config)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch: presses become clicks, movement becomes hover.
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let target = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            let event = match mouse_event.event {
                MouseEventKind::Pressed if mouse_event.button == MouseButton::Left => {
                    match target {
                        Some(id) => InputEvent::Click(id),
                        None => return,
                    }
                }
                MouseEventKind::Moved => InputEvent::Hover(target),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let ch = match key_event.code {
                KeyCode::Char(c) => c,
                KeyCode::Enter => '\n',
                KeyCode::Backspace => '\x08',
                _ => return,
            };
            game.borrow_mut().handle_input(&InputEvent::Key(ch));
        }
    });

    let clock = RefCell::new(FrameClock::new());
    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let dt = clock.borrow_mut().delta(now_ms());
            let mut game = game.borrow_mut();
            game.update(dt);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
