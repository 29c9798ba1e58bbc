use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Context, Result};
use crate::records::{BestPrice, OddsRecord};
use crate::toast::{ToastLevel, ToastSink};
use crate::utils::format_local_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

/// A finished export: contents plus the filename and MIME type a download
/// would carry. Written once, then forgotten.
pub struct Artifact {
    pub filename: &'static str,
    pub mime: &'static str,
    pub content: String,
}

const CSV_HEADER: [&str; 10] = [
    "Home Team",
    "Away Team",
    "League",
    "Home Odds",
    "Home Site",
    "Draw Odds",
    "Draw Site",
    "Away Odds",
    "Away Site",
    "Updated",
];

pub fn build_artifact(records: &[OddsRecord], format: ExportFormat) -> Result<Artifact> {
    match format {
        ExportFormat::Json => Ok(Artifact {
            filename: "betting-odds.json",
            mime: "application/json",
            content: serde_json::to_string_pretty(records)?,
        }),
        ExportFormat::Csv => Ok(Artifact {
            filename: "betting-odds.csv",
            mime: "text/csv",
            content: records_to_csv(records)?,
        }),
    }
}

/// Project each record to the fixed 10-column layout. Every field is
/// quoted; missing best prices render as empty strings.
fn records_to_csv(records: &[OddsRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record(&[
            record.match_info.home_team.clone(),
            record.match_info.away_team.clone(),
            record.match_info.league.clone(),
            price_value(record.best_home_win.as_ref()),
            price_site(record.best_home_win.as_ref()),
            price_value(record.best_draw.as_ref()),
            price_site(record.best_draw.as_ref()),
            price_value(record.best_away_win.as_ref()),
            price_site(record.best_away_win.as_ref()),
            format_local_timestamp(record.updated_at),
        ])?;
    }

    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::message(format!("Failed to finish CSV export: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| AppError::message(format!("CSV export was not valid UTF-8: {err}")))
}

fn price_value(price: Option<&BestPrice>) -> String {
    price.map(|p| p.value.to_string()).unwrap_or_default()
}

fn price_site(price: Option<&BestPrice>) -> String {
    price.map(|p| p.site_name.clone()).unwrap_or_default()
}

/// Builds artifacts and drops them into the export directory.
pub struct Exporter {
    export_dir: PathBuf,
}

impl Exporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Export the dataset, or emit a warning toast and produce nothing when
    /// it is empty. Success emits a toast naming the chosen format.
    pub fn export(
        &self,
        records: &[OddsRecord],
        format: ExportFormat,
        toasts: &mut dyn ToastSink,
    ) -> Result<Option<PathBuf>> {
        if records.is_empty() {
            toasts.toast("No data to export", ToastLevel::Warning);
            return Ok(None);
        }

        let artifact = build_artifact(records, format)?;

        fs::create_dir_all(&self.export_dir).with_context(|| {
            format!(
                "Failed to create export directory {}",
                self.export_dir.display()
            )
        })?;
        let path = self.export_dir.join(artifact.filename);
        fs::write(&path, &artifact.content)
            .with_context(|| format!("Failed to write export file {}", path.display()))?;

        toasts.toast(&format!("Data exported as {format}"), ToastLevel::Success);
        Ok(Some(path))
    }
}
