use log::debug;
use tokio::time::sleep;

use crate::app::state::AppState;
use crate::config::AppConfig;
use crate::notifications::{NotificationHub, PermissionPrompt};
use crate::prefs::{PreferenceStore, PREF_AUTO_REFRESH, PREF_SELECTED_LEAGUE};
use crate::toast::ToastSink;

/// One-shot startup reconciliation between stored preferences and live UI
/// state. Runs after the initial dataset is in place; both delayed steps
/// are idempotent, so there is no cancellation path.
pub struct Bootstrapper<'a> {
    store: &'a PreferenceStore,
    config: &'a AppConfig,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(store: &'a PreferenceStore, config: &'a AppConfig) -> Self {
        Self { store, config }
    }

    pub async fn run(
        &self,
        state: &mut AppState,
        hub: &mut NotificationHub,
        prompt: &mut dyn PermissionPrompt,
        toasts: &mut dyn ToastSink,
    ) {
        let saved = self
            .store
            .load(PREF_AUTO_REFRESH, self.config.auto_refresh_default);
        if saved != state.auto_refresh() {
            state.set_auto_refresh(saved);
        }

        let league: String = self.store.load(PREF_SELECTED_LEAGUE, "all".to_string());

        tokio::join!(
            async {
                if league != "all" {
                    // The tab list needs a moment to exist before a stored
                    // league can be re-activated.
                    sleep(self.config.league_restore_delay).await;
                    if state.board().leagues().iter().any(|known| *known == league) {
                        state.select_league(league.clone());
                    } else {
                        debug!("stored league {league} no longer present; skipping restore");
                    }
                }
            },
            async {
                sleep(self.config.permission_request_delay).await;
                hub.request_permission(prompt, toasts);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Permission;
    use crate::records::{Match, OddsRecord};
    use crate::toast::MemorySink;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

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

    fn quick_config() -> AppConfig {
        let mut config = AppConfig::builtin();
        config.league_restore_delay = Duration::ZERO;
        config.permission_request_delay = Duration::ZERO;
        config
    }

    struct GrantOnce;

    impl PermissionPrompt for GrantOnce {
        fn request(&mut self) -> Permission {
            Permission::Granted
        }
    }

    async fn run_bootstrap(store: &PreferenceStore, state: &mut AppState) -> NotificationHub {
        let config = quick_config();
        let mut hub = NotificationHub::new();
        let mut prompt = GrantOnce;
        let mut toasts = MemorySink::new();
        Bootstrapper::new(store, &config)
            .run(state, &mut hub, &mut prompt, &mut toasts)
            .await;
        hub
    }

    #[tokio::test]
    async fn restores_persisted_auto_refresh_without_user_action() {
        let mut store = PreferenceStore::in_memory();
        store.save(PREF_AUTO_REFRESH, &false);

        let mut state = AppState::new(Vec::new(), true);
        run_bootstrap(&store, &mut state).await;

        assert!(!state.auto_refresh());
    }

    #[tokio::test]
    async fn auto_refresh_defaults_to_enabled() {
        let store = PreferenceStore::in_memory();
        let mut state = AppState::new(Vec::new(), true);
        run_bootstrap(&store, &mut state).await;

        assert!(state.auto_refresh());
    }

    #[tokio::test]
    async fn reactivates_the_stored_league_filter() {
        let mut store = PreferenceStore::in_memory();
        store.save(PREF_SELECTED_LEAGUE, &"La Liga".to_string());

        let mut state = AppState::new(
            vec![
                record("Arsenal", "Chelsea", "Premier League"),
                record("Barcelona", "Real Madrid", "La Liga"),
            ],
            true,
        );
        run_bootstrap(&store, &mut state).await;

        assert_eq!(state.selected_league(), "La Liga");
        assert_eq!(state.board().visible().len(), 1);
    }

    #[tokio::test]
    async fn skips_restore_when_league_is_gone() {
        let mut store = PreferenceStore::in_memory();
        store.save(PREF_SELECTED_LEAGUE, &"Ligue 1".to_string());

        let mut state = AppState::new(vec![record("Arsenal", "Chelsea", "Premier League")], true);
        run_bootstrap(&store, &mut state).await;

        assert_eq!(state.selected_league(), "all");
        assert_eq!(state.board().visible().len(), 1);
    }

    #[tokio::test]
    async fn requests_notification_permission() {
        let store = PreferenceStore::in_memory();
        let mut state = AppState::new(Vec::new(), true);
        let hub = run_bootstrap(&store, &mut state).await;

        assert_eq!(hub.permission(), Permission::Granted);
    }
}
