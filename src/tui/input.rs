//! Keyboard and paste input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::extract_link;
use crate::media::Platform;

use super::app::App;
use super::fetch::{start_download, start_fetch};

pub fn handle_input(app: &mut App, key: KeyEvent) {
    // Global quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // The notice is modal: any key dismisses it and does nothing else.
    if app.notice.take().is_some() {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_control_key(app, key.code);
        return;
    }

    match key.code {
        KeyCode::Enter => start_fetch(app),
        KeyCode::Tab => switch_platform(app),
        KeyCode::Up => app.select_prev_format(),
        KeyCode::Down => app.select_next_format(),
        KeyCode::Left => app.controller.carousel_prev(),
        KeyCode::Right => app.controller.carousel_next(),
        KeyCode::Esc => {
            if app.controller.link().is_empty() {
                app.should_quit = true;
            } else {
                app.controller.clear_link();
            }
        }
        KeyCode::Char(c) => app.controller.push_link(c),
        KeyCode::Backspace => app.controller.pop_link(),
        _ => {}
    }
}

fn handle_control_key(app: &mut App, code: KeyCode) {
    match code {
        // Toggle which encoding list is shown (YouTube variant only).
        KeyCode::Char('t') if app.controller.platform() == Platform::YouTube => {
            app.controller.toggle_media_kind();
            app.sync_format_selection();
        }
        // Cycle post -> reel -> story (Instagram variant only).
        KeyCode::Char('s') if app.controller.platform() == Platform::Instagram => {
            app.controller.cycle_sub_kind();
        }
        KeyCode::Char('d') => start_download(app),
        _ => {}
    }
}

/// Switches to the other platform. The controller hard-resets everything
/// downstream; the app-level display state follows suit.
fn switch_platform(app: &mut App) {
    let next = app.controller.platform().other();
    app.controller.switch_platform(next);
    app.format_list.select(None);
    app.status.clear();
    app.downloading = false;
}

pub fn handle_paste(app: &mut App, text: &str) {
    if app.notice.take().is_some() {
        return;
    }
    // A pasted paragraph still yields a usable link; raw text without any
    // URL is appended as typed.
    if let Some(link) = extract_link(text) {
        app.controller.set_link(link);
    } else {
        app.controller.push_link_str(text.trim());
    }
}
