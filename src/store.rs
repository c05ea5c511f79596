//! Ordered screen collection with a current-screen cursor.

use crate::schema::Screen;

/// Full store state. `screens` insertion order is tab order and persisted
/// order; `current_screen_index` stays within `[0, max(0, len - 1)]` after
/// every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreensState {
    pub screens: Vec<Screen>,
    pub current_screen_index: usize,
}

/// Store mutations. Screens are only ever created by the import pipeline, so
/// there is no per-button edit action.
#[derive(Debug, Clone)]
pub enum ScreensAction {
    /// Append to the end of the list; the cursor does not move.
    AddScreen(Screen),
    /// Remove the first screen with this id and re-clamp the cursor.
    RemoveScreen { id: String },
    /// Move the cursor. Out-of-range input is clamped here rather than at
    /// the call sites.
    SetCurrentScreen(usize),
    /// Wholesale replacement, with the same cursor re-clamp as removal.
    SetScreens(Vec<Screen>),
}

/// Pure reducer: applies one action to the state and returns the next state.
pub fn reduce(mut state: ScreensState, action: ScreensAction) -> ScreensState {
    match action {
        ScreensAction::AddScreen(screen) => {
            state.screens.push(screen);
        }
        ScreensAction::RemoveScreen { id } => {
            if let Some(pos) = state.screens.iter().position(|s| s.id == id) {
                state.screens.remove(pos);
            }
            state.current_screen_index = clamp_index(state.current_screen_index, state.screens.len());
        }
        ScreensAction::SetCurrentScreen(index) => {
            state.current_screen_index = clamp_index(index, state.screens.len());
        }
        ScreensAction::SetScreens(screens) => {
            state.screens = screens;
            state.current_screen_index = clamp_index(state.current_screen_index, state.screens.len());
        }
    }
    state
}

/// Clamp a cursor into `[0, max(0, len - 1)]`.
fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Store object owning the state. Rendering reads it every frame through
/// `state()`; persistence is scheduled by the dispatch sites so the reducer
/// stays pure.
#[derive(Debug, Default)]
pub struct ScreenStore {
    state: ScreensState,
}

impl ScreenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScreensState {
        &self.state
    }

    /// The screen under the cursor, if any screen exists.
    pub fn current_screen(&self) -> Option<&Screen> {
        self.state.screens.get(self.state.current_screen_index)
    }

    /// Apply an action through the reducer.
    pub fn dispatch(&mut self, action: ScreensAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }
}
