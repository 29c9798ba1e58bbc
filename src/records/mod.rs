pub mod model;

pub use model::{aggregate_best_odds, BestPrice, Match, OddsRecord, SiteOdds};

/// In-memory odds dataset plus the filtered view the dashboard renders.
pub struct OddsBoard {
    records: Vec<OddsRecord>,
    visible: Vec<usize>,
}

impl OddsBoard {
    pub fn new(records: Vec<OddsRecord>) -> Self {
        let visible = (0..records.len()).collect();
        Self { records, visible }
    }

    pub fn records(&self) -> &[OddsRecord] {
        &self.records
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &OddsRecord> {
        self.visible.iter().map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a fresh dataset. The caller re-applies its filter afterwards.
    pub fn replace(&mut self, records: Vec<OddsRecord>) {
        self.visible = (0..records.len()).collect();
        self.records = records;
    }

    /// Distinct league names across the dataset, sorted.
    pub fn leagues(&self) -> Vec<String> {
        let mut leagues: Vec<String> = self
            .records
            .iter()
            .map(|record| record.match_info.league.clone())
            .collect();
        leagues.sort();
        leagues.dedup();
        leagues
    }

    /// Recompute the visible rows for a search needle and league selection.
    /// The needle matches team or league names case-insensitively; a league
    /// of "all" disables the league restriction.
    pub fn apply_filter(&mut self, search: &str, league: &str) {
        let needle = search.trim().to_lowercase();
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                let info = &record.match_info;
                let league_ok = league == "all" || info.league == league;
                let search_ok = needle.is_empty()
                    || info.home_team.to_lowercase().contains(&needle)
                    || info.away_team.to_lowercase().contains(&needle)
                    || info.league.to_lowercase().contains(&needle);
                league_ok && search_ok
            })
            .map(|(idx, _)| idx)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, home: &str, away: &str, league: &str) -> OddsRecord {
        OddsRecord {
            match_info: Match {
                id: id.to_string(),
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

    fn board() -> OddsBoard {
        OddsBoard::new(vec![
            record("m1", "Arsenal", "Chelsea", "Premier League"),
            record("m2", "Barcelona", "Real Madrid", "La Liga"),
            record("m3", "Tottenham", "Manchester City", "Premier League"),
        ])
    }

    #[test]
    fn search_matches_either_team() {
        let mut board = board();
        board.apply_filter("arsenal", "all");
        assert_eq!(board.visible(), &[0]);

        board.apply_filter("madrid", "all");
        assert_eq!(board.visible(), &[1]);
    }

    #[test]
    fn league_filter_restricts_rows() {
        let mut board = board();
        board.apply_filter("", "Premier League");
        assert_eq!(board.visible(), &[0, 2]);

        board.apply_filter("", "all");
        assert_eq!(board.visible().len(), 3);
    }

    #[test]
    fn search_and_league_compose() {
        let mut board = board();
        board.apply_filter("tottenham", "La Liga");
        assert!(board.visible().is_empty());

        board.apply_filter("tottenham", "Premier League");
        assert_eq!(board.visible(), &[2]);
    }

    #[test]
    fn leagues_are_sorted_and_distinct() {
        let board = board();
        assert_eq!(board.leagues(), vec!["La Liga", "Premier League"]);
    }

    #[test]
    fn replace_resets_visible_rows() {
        let mut board = board();
        board.apply_filter("arsenal", "all");
        board.replace(vec![record("m9", "PSG", "Marseille", "Ligue 1")]);
        assert_eq!(board.visible(), &[0]);
        assert_eq!(board.len(), 1);
    }
}
