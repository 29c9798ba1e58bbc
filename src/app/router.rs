use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error};

use crate::app::state::{AppState, Focus};
use crate::toast::{ToastLevel, ToastSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Online,
    Offline,
}

/// Everything the host environment can feed into the router: keystrokes,
/// connectivity transitions, and errors surfaced by a catch-all handler.
#[derive(Debug, Clone)]
pub enum UiEvent {
    Key(KeyEvent),
    Network(NetworkStatus),
    ScriptError(String),
}

/// Outcome the host loop acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Reload odds data.
    Refresh,
    /// Consumed; state is already up to date.
    Handled,
    /// Not a global binding; the screen may handle it locally.
    Ignored,
}

/// Global bindings shared by every screen. Each handler is idempotent, so
/// replayed events are harmless.
pub fn route(state: &mut AppState, event: UiEvent, toasts: &mut dyn ToastSink) -> Routed {
    match event {
        UiEvent::Key(key) => route_key(state, key),
        UiEvent::ScriptError(message) => {
            error!("script error: {message}");
            toasts.toast("An unexpected error occurred", ToastLevel::Error);
            Routed::Handled
        }
        UiEvent::Network(NetworkStatus::Online) => {
            debug!("event: network online");
            toasts.toast("Connection restored", ToastLevel::Success);
            if state.auto_refresh() {
                Routed::Refresh
            } else {
                Routed::Handled
            }
        }
        UiEvent::Network(NetworkStatus::Offline) => {
            debug!("event: network offline");
            toasts.toast("Connection lost - working offline", ToastLevel::Warning);
            Routed::Handled
        }
    }
}

fn route_key(state: &mut AppState, key: KeyEvent) -> Routed {
    // Ctrl on most terminals, Super where the emulator forwards the command key.
    let chord = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

    match key.code {
        // Consumed here so the screen never sees the chord as a plain 'r'.
        KeyCode::Char('r') if chord => {
            debug!("event: keyboard refresh");
            Routed::Refresh
        }
        KeyCode::Char('f') if chord => {
            debug!("event: keyboard focus-search");
            state.set_focus(Focus::Search);
            Routed::Handled
        }
        KeyCode::Esc => {
            if !state.search().is_empty() {
                debug!("event: keyboard clear-search");
                state.clear_search();
            }
            Routed::Handled
        }
        _ => Routed::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Match, OddsRecord};
    use crate::toast::{MemorySink, ToastLevel};
    use chrono::{TimeZone, Utc};

    fn record(home: &str, away: &str, league: &str) -> OddsRecord {
        OddsRecord {
            match_info: Match {
                id: format!("{home}_vs_{away}"),
                home_team: home.to_string(),
                away_team: away.to_string(),
                sport: "football".to_string(),
                league: league.to_string(),
                match_time: Utc.with_ymd_and_hms(2026, 8, 8, 15, 0, 0).unwrap(),
                status: "upcoming".to_string(),
            },
            best_home_win: None,
            best_draw: None,
            best_away_win: None,
            all_odds: Vec::new(),
            updated_at: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        }
    }

    fn state() -> AppState {
        AppState::new(
            vec![
                record("Arsenal", "Chelsea", "Premier League"),
                record("Barcelona", "Real Madrid", "La Liga"),
            ],
            true,
        )
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_r_requests_refresh() {
        let mut state = state();
        let mut toasts = MemorySink::new();

        let routed = route(
            &mut state,
            key(KeyCode::Char('r'), KeyModifiers::CONTROL),
            &mut toasts,
        );
        assert_eq!(routed, Routed::Refresh);

        let routed = route(
            &mut state,
            key(KeyCode::Char('r'), KeyModifiers::SUPER),
            &mut toasts,
        );
        assert_eq!(routed, Routed::Refresh);
    }

    #[test]
    fn plain_r_is_left_to_the_screen() {
        let mut state = state();
        let mut toasts = MemorySink::new();

        let routed = route(
            &mut state,
            key(KeyCode::Char('r'), KeyModifiers::NONE),
            &mut toasts,
        );
        assert_eq!(routed, Routed::Ignored);
    }

    #[test]
    fn escape_clears_search_and_refilters_exactly_once() {
        let mut state = state();
        let mut toasts = MemorySink::new();
        for ch in "Arsenal".chars() {
            state.push_search_char(ch);
        }
        assert_eq!(state.board().visible().len(), 1);

        let generation = state.filter_generation();
        let routed = route(&mut state, key(KeyCode::Esc, KeyModifiers::NONE), &mut toasts);

        assert_eq!(routed, Routed::Handled);
        assert_eq!(state.search(), "");
        assert_eq!(state.filter_generation(), generation + 1);
        assert_eq!(state.board().visible().len(), 2);
    }

    #[test]
    fn escape_with_empty_search_does_not_refilter() {
        let mut state = state();
        let mut toasts = MemorySink::new();

        let generation = state.filter_generation();
        let routed = route(&mut state, key(KeyCode::Esc, KeyModifiers::NONE), &mut toasts);

        assert_eq!(routed, Routed::Handled);
        assert_eq!(state.filter_generation(), generation);
    }

    #[test]
    fn ctrl_f_moves_focus_to_search() {
        let mut state = state();
        let mut toasts = MemorySink::new();

        let routed = route(
            &mut state,
            key(KeyCode::Char('f'), KeyModifiers::CONTROL),
            &mut toasts,
        );
        assert_eq!(routed, Routed::Handled);
        assert_eq!(state.focus(), Focus::Search);
    }

    #[test]
    fn offline_then_online_reloads_once_and_toasts_in_order() {
        let mut state = state();
        let mut toasts = MemorySink::new();

        let mut reloads = 0;
        for event in [
            UiEvent::Network(NetworkStatus::Offline),
            UiEvent::Network(NetworkStatus::Online),
        ] {
            if route(&mut state, event, &mut toasts) == Routed::Refresh {
                reloads += 1;
            }
        }

        assert_eq!(reloads, 1);
        assert_eq!(
            toasts.entries,
            vec![
                (
                    "Connection lost - working offline".to_string(),
                    ToastLevel::Warning
                ),
                ("Connection restored".to_string(), ToastLevel::Success),
            ]
        );
    }

    #[test]
    fn online_without_auto_refresh_does_not_reload() {
        let mut state = AppState::new(Vec::new(), false);
        let mut toasts = MemorySink::new();

        let routed = route(
            &mut state,
            UiEvent::Network(NetworkStatus::Online),
            &mut toasts,
        );
        assert_eq!(routed, Routed::Handled);
        assert_eq!(toasts.entries.len(), 1);
    }

    #[test]
    fn script_errors_surface_a_generic_toast() {
        let mut state = state();
        let mut toasts = MemorySink::new();

        let routed = route(
            &mut state,
            UiEvent::ScriptError("boom".to_string()),
            &mut toasts,
        );
        assert_eq!(routed, Routed::Handled);
        assert_eq!(
            toasts.entries,
            vec![(
                "An unexpected error occurred".to_string(),
                ToastLevel::Error
            )]
        );
    }
}
