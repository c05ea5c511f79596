//! Key input handlers.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    input::InputBox,
    schema::{Button, Screen},
    shortcuts,
    store::ScreensAction,
    worker::WorkerCmd,
};

use super::App;

/// Handle one key event; returns true when the app should quit.
pub async fn handle_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    // An open input box takes priority over everything else.
    if app.input_box.is_some() {
        return handle_input_box_key(app, k).await;
    }
    handle_main_key(app, k).await
}

/// Whether the event is Ctrl+C.
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}

/// Actionable buttons of a screen, in render order.
fn actionable(screen: &Screen) -> impl Iterator<Item = &Button> {
    screen.ui.iter().filter(|b| !b.label.is_empty())
}

/// Main view key handling.
async fn handle_main_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let sc = &app.shortcuts.main;

    if shortcuts::matches_shortcut(&k, &sc.quit) {
        return Ok(true);
    } else if shortcuts::matches_shortcut(&k, &sc.import) {
        app.input_box = Some(InputBox::new("Configuration URL:", ""));
    } else if shortcuts::matches_shortcut(&k, &sc.delete) {
        // Delete the current screen; the store re-clamps the cursor.
        if let Some(screen) = app.store.current_screen() {
            let id = screen.id.clone();
            let title = screen.title.clone();
            app.dispatch(ScreensAction::RemoveScreen { id });
            app.ui.selected = 0;
            app.ui.note(format!("Deleted screen '{title}'"));
        }
    } else if shortcuts::matches_shortcut(&k, &sc.next_screen) {
        let state = app.store.state();
        if !state.screens.is_empty() {
            let next = (state.current_screen_index + 1) % state.screens.len();
            app.dispatch(ScreensAction::SetCurrentScreen(next));
            app.ui.selected = 0;
        }
    } else if shortcuts::matches_shortcut(&k, &sc.prev_screen) {
        let state = app.store.state();
        if !state.screens.is_empty() {
            let prev = state
                .current_screen_index
                .checked_sub(1)
                .unwrap_or(state.screens.len() - 1);
            app.dispatch(ScreensAction::SetCurrentScreen(prev));
            app.ui.selected = 0;
        }
    } else if shortcuts::matches_shortcut(&k, &sc.down) {
        let count = app.store.current_screen().map_or(0, |s| actionable(s).count());
        if app.ui.selected + 1 < count {
            app.ui.selected += 1;
        }
    } else if shortcuts::matches_shortcut(&k, &sc.up) {
        if app.ui.selected > 0 {
            app.ui.selected -= 1;
        }
    } else if shortcuts::matches_shortcut(&k, &sc.press) {
        press_selected(app).await?;
    }

    Ok(false)
}

/// Fire the currently selected button.
async fn press_selected(app: &mut App) -> Result<()> {
    let Some(screen) = app.store.current_screen() else {
        return Ok(());
    };
    let Some(button) = actionable(screen).nth(app.ui.selected) else {
        return Ok(());
    };

    if button.url.is_empty() {
        // Inert button: valid configuration, nothing to call.
        app.ui.status = format!("{}: no URL configured", button.label);
        return Ok(());
    }

    let label = button.label.clone();
    let url = button.url.clone();
    app.ui.status = format!("{label}: sending...");
    app.worker_tx.send(WorkerCmd::Trigger { label, url }).await?;
    Ok(())
}

/// Input box key handling.
async fn handle_input_box_key(app: &mut App, k: KeyEvent) -> Result<bool> {
    let Some(input) = &mut app.input_box else {
        return Ok(false);
    };

    let sc = &app.shortcuts.input_box;

    if shortcuts::matches_shortcut(&k, &sc.confirm) {
        let url = input.value.trim().to_string();
        app.input_box = None;
        if !url.is_empty() {
            app.ui.note(format!("Importing {url}..."));
            app.worker_tx.send(WorkerCmd::Import { url }).await?;
        }
    } else if shortcuts::matches_shortcut(&k, &sc.cancel) {
        app.input_box = None;
    } else if shortcuts::matches_shortcut(&k, &sc.backspace) {
        input.backspace();
    } else if shortcuts::matches_shortcut(&k, &sc.delete) {
        input.delete();
    } else if shortcuts::matches_shortcut(&k, &sc.left) {
        input.move_left();
    } else if shortcuts::matches_shortcut(&k, &sc.right) {
        input.move_right();
    } else if shortcuts::matches_shortcut(&k, &sc.home) {
        input.move_home();
    } else if shortcuts::matches_shortcut(&k, &sc.end) {
        input.move_end();
    } else if shortcuts::matches_shortcut(&k, &sc.clear_line) {
        input.clear_line();
    } else if let KeyCode::Char(c) = k.code {
        if !k.modifiers.contains(KeyModifiers::CONTROL) {
            input.insert_char(c);
        }
    }

    Ok(false)
}
