use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub sport: String,
    pub league: String,
    pub match_time: DateTime<Utc>,
    pub status: String,
}

/// One bookmaker's quote for a match. A zero draw means the market is not offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteOdds {
    pub id: String,
    pub match_id: String,
    pub site_id: String,
    pub site_name: String,
    pub home_win: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub draw: f64,
    pub away_win: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_2_5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under_2_5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btts: Option<f64>,
    pub scraped_at: DateTime<Utc>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

/// The most favorable price found for one outcome, and where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPrice {
    pub value: f64,
    pub site_id: String,
    pub site_name: String,
}

/// One match's betting-line summary across every tracked site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsRecord {
    #[serde(rename = "match")]
    pub match_info: Match,
    pub best_home_win: Option<BestPrice>,
    pub best_draw: Option<BestPrice>,
    pub best_away_win: Option<BestPrice>,
    pub all_odds: Vec<SiteOdds>,
    pub updated_at: DateTime<Utc>,
}

/// Fold per-site quotes into one record per match, keeping the maximum
/// price per outcome. Quotes whose match id is unknown are dropped.
pub fn aggregate_best_odds(matches: &[Match], quotes: &[SiteOdds]) -> Vec<OddsRecord> {
    let by_id: HashMap<&str, &Match> = matches
        .iter()
        .map(|m| (m.id.as_str(), m))
        .collect();

    let mut records: HashMap<String, OddsRecord> = HashMap::new();

    for quote in quotes {
        let Some(matched) = by_id.get(quote.match_id.as_str()) else {
            continue;
        };

        let record = records
            .entry(quote.match_id.clone())
            .or_insert_with(|| OddsRecord {
                match_info: (*matched).clone(),
                best_home_win: None,
                best_draw: None,
                best_away_win: None,
                all_odds: Vec::new(),
                updated_at: quote.scraped_at,
            });

        record.all_odds.push(quote.clone());
        if quote.scraped_at > record.updated_at {
            record.updated_at = quote.scraped_at;
        }

        upgrade(&mut record.best_home_win, quote.home_win, quote);
        if quote.draw > 0.0 {
            upgrade(&mut record.best_draw, quote.draw, quote);
        }
        upgrade(&mut record.best_away_win, quote.away_win, quote);
    }

    let mut result: Vec<OddsRecord> = records.into_values().collect();
    result.sort_by(|a, b| {
        a.match_info
            .match_time
            .cmp(&b.match_info.match_time)
            .then_with(|| a.match_info.id.cmp(&b.match_info.id))
    });
    result
}

fn upgrade(slot: &mut Option<BestPrice>, value: f64, quote: &SiteOdds) {
    let better = slot.as_ref().map(|best| value > best.value).unwrap_or(true);
    if better {
        *slot = Some(BestPrice {
            value,
            site_id: quote.site_id.clone(),
            site_name: quote.site_name.clone(),
        });
    }
}
