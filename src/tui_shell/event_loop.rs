use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::App;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.drain_results();
        if app.auto_refresh_due() {
            app.refresh();
        }

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.quit = true;
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.refresh();
            return;
        }
        KeyCode::F(5) => {
            app.refresh();
            return;
        }
        _ => {}
    }

    if app.desk.gate().is_locked() {
        handle_gate_key(app, key);
    } else {
        handle_digest_key(app, key);
    }
}

fn handle_gate_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit = true,
        KeyCode::Enter => {
            app.submit_password();
        }
        KeyCode::Backspace => app.password.backspace(),
        KeyCode::Delete => app.password.delete(),
        KeyCode::Left => app.password.move_left(),
        KeyCode::Right => app.password.move_right(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.password.insert_char(c);
        }
        _ => {}
    }
}

fn handle_digest_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            if app.filter.buf.is_empty() {
                app.quit = true;
            } else {
                app.filter.clear();
                app.apply_filter();
            }
        }

        KeyCode::Char('s') if ctrl => app.toggle_summaries(),
        KeyCode::F(2) => app.toggle_summaries(),

        KeyCode::Char('u') if ctrl => {
            app.filter.clear();
            app.apply_filter();
        }

        KeyCode::Up => app.scroll_by(-1),
        KeyCode::Down => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_by(-10),
        KeyCode::PageDown => app.scroll_by(10),
        KeyCode::Home => app.scroll = 0,

        KeyCode::Left => app.filter.move_left(),
        KeyCode::Right => app.filter.move_right(),
        KeyCode::Backspace => {
            app.filter.backspace();
            app.apply_filter();
        }
        KeyCode::Delete => {
            app.filter.delete();
            app.apply_filter();
        }

        KeyCode::Char(c) if !ctrl => {
            app.filter.insert_char(c);
            app.apply_filter();
        }

        _ => {}
    }
}
