use crate::app::bootstrap::Bootstrapper;
use crate::app::state::AppState;
use crate::config::AppConfig;
use crate::error::Result;
use crate::export::{ExportFormat, Exporter};
use crate::feed::{DemoFeed, OddsFeed};
use crate::notifications::{AutoGrantPrompt, NotificationHub};
use crate::prefs::PreferenceStore;
use crate::toast::{MemorySink, StatusLine};
use crate::ui;

/// Wires the preference store, odds feed, and exporter together and drives
/// the requested entry point.
pub struct AppController {
    config: AppConfig,
    store: PreferenceStore,
    feed: Box<dyn OddsFeed>,
    exporter: Exporter,
    hub: NotificationHub,
}

impl AppController {
    pub fn new(config: AppConfig) -> Self {
        let store = PreferenceStore::with_file(&config.prefs_path);
        let feed = Box::new(DemoFeed::new(config.sites.clone()));
        let exporter = Exporter::new(&config.export_dir);
        Self {
            config,
            store,
            feed,
            exporter,
            hub: NotificationHub::new(),
        }
    }

    pub async fn run_dashboard(&mut self) -> Result<()> {
        let records = self.feed.fetch_best_odds()?;
        let mut state = AppState::new(records, self.config.auto_refresh_default);
        let mut toasts = StatusLine::new();
        let mut prompt = AutoGrantPrompt;

        Bootstrapper::new(&self.store, &self.config)
            .run(&mut state, &mut self.hub, &mut prompt, &mut toasts)
            .await;

        ui::run_dashboard(
            &mut state,
            &mut self.store,
            self.feed.as_mut(),
            &self.exporter,
            &self.hub,
            &mut toasts,
        )
    }

    /// Headless export for scripting; toasts become stdout lines.
    pub fn run_export(&mut self, format: ExportFormat) -> Result<()> {
        let records = self.feed.fetch_best_odds()?;
        let mut toasts = MemorySink::new();
        let written = self.exporter.export(&records, format, &mut toasts)?;

        for (message, level) in &toasts.entries {
            println!("[{}] {message}", level.label());
        }
        if let Some(path) = written {
            println!("Wrote {}", path.display());
        }
        Ok(())
    }

    pub fn list_sites(&self) {
        for site in &self.config.sites {
            let status = if site.active { "active" } else { "inactive" };
            println!("{:<12} {:<10} {}", site.id, status, site.url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_export_writes_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::builtin();
        config.prefs_path = dir.path().join("prefs.json");
        config.export_dir = dir.path().join("exports");

        let mut controller = AppController::new(config);
        controller.run_export(ExportFormat::Json).unwrap();

        let path = dir.path().join("exports").join("betting-odds.json");
        assert!(path.exists());
    }
}
