use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use log::error;
use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::app::{route, AppState, Focus, Routed, UiEvent};
use crate::error::Result;
use crate::export::{ExportFormat, Exporter};
use crate::feed::OddsFeed;
use crate::notifications::NotificationHub;
use crate::prefs::{PreferenceStore, PREF_AUTO_REFRESH, PREF_SELECTED_LEAGUE};
use crate::records::{BestPrice, OddsRecord};
use crate::toast::{StatusLine, ToastLevel, ToastSink};
use crate::ui::TerminalGuard;
use crate::utils::{format_kickoff, format_local_timestamp};

/// Interactive odds dashboard: search box, league tabs, best-price table,
/// per-site comparison overlay, and a status line fed by toasts. Global
/// bindings go through the router first; everything else is local.
pub fn run_dashboard(
    state: &mut AppState,
    store: &mut PreferenceStore,
    feed: &mut dyn OddsFeed,
    exporter: &Exporter,
    hub: &NotificationHub,
    toasts: &mut StatusLine,
) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let source = feed.label().to_string();

    let mut selected = 0usize;
    let mut offset = 0usize;
    let mut capacity = 1usize;
    let mut compare_open = false;
    let mut seen_generation = state.filter_generation();

    loop {
        if seen_generation != state.filter_generation() {
            // The visible rows changed underneath the cursor.
            selected = 0;
            offset = 0;
            compare_open = false;
            seen_generation = state.filter_generation();
        }

        guard.terminal_mut().draw(|f| {
            draw(
                f,
                state,
                toasts,
                &source,
                selected,
                &mut offset,
                &mut capacity,
                compare_open,
            );
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        if compare_open {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x')) {
                compare_open = false;
            }
            continue;
        }

        match route(state, UiEvent::Key(key), toasts) {
            Routed::Refresh => {
                refresh(state, feed, hub, toasts);
                continue;
            }
            Routed::Handled => continue,
            Routed::Ignored => {}
        }

        match state.focus() {
            Focus::Search => handle_search_key(state, key),
            Focus::Table => {
                let total = state.board().visible().len();
                match key.code {
                    KeyCode::Char('q') => {
                        guard.restore()?;
                        return Ok(());
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        guard.restore()?;
                        return Ok(());
                    }
                    KeyCode::Char('a') => {
                        let enabled = state.toggle_auto_refresh();
                        store.save(PREF_AUTO_REFRESH, &enabled);
                        let message = if enabled {
                            "Auto-refresh enabled"
                        } else {
                            "Auto-refresh disabled"
                        };
                        toasts.toast(message, ToastLevel::Info);
                    }
                    KeyCode::Char('e') => export(state, exporter, ExportFormat::Csv, toasts),
                    KeyCode::Char('j') => export(state, exporter, ExportFormat::Json, toasts),
                    KeyCode::Tab | KeyCode::Right => cycle_league(state, store, 1),
                    KeyCode::Left => cycle_league(state, store, -1),
                    KeyCode::Enter => {
                        let visible = state.board().visible();
                        if let Some(&idx) = visible.get(selected) {
                            if state.board().records()[idx].all_odds.len() < 2 {
                                toasts
                                    .toast("Not enough data for comparison", ToastLevel::Warning);
                            } else {
                                compare_open = true;
                            }
                        }
                    }
                    KeyCode::Down => {
                        if total > 0 {
                            selected = (selected + 1) % total;
                            if selected >= offset + capacity {
                                offset = selected + 1 - capacity;
                            } else if selected < offset {
                                offset = selected;
                            }
                        }
                    }
                    KeyCode::Up => {
                        if total > 0 {
                            selected = selected.checked_sub(1).unwrap_or(total - 1);
                            if selected < offset {
                                offset = selected;
                            } else if selected >= offset + capacity {
                                offset = selected + 1 - capacity;
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.push_search_char(ch);
        }
        KeyCode::Backspace => state.pop_search_char(),
        KeyCode::Enter | KeyCode::Tab | KeyCode::Down => state.set_focus(Focus::Table),
        _ => {}
    }
}

fn cycle_league(state: &mut AppState, store: &mut PreferenceStore, step: isize) {
    let mut leagues = vec!["all".to_string()];
    leagues.extend(state.board().leagues());

    let current = leagues
        .iter()
        .position(|league| league == state.selected_league())
        .unwrap_or(0);
    let next = (current as isize + step).rem_euclid(leagues.len() as isize) as usize;

    let league = leagues[next].clone();
    store.save(PREF_SELECTED_LEAGUE, &league);
    state.select_league(league);
}

fn refresh(
    state: &mut AppState,
    feed: &mut dyn OddsFeed,
    hub: &NotificationHub,
    toasts: &mut dyn ToastSink,
) {
    match feed.fetch_best_odds() {
        Ok(records) => {
            let count = records.len();
            state.replace_records(records);
            hub.notify("Odds updated", &format!("{count} matches tracked"));
            toasts.toast("Odds data refreshed", ToastLevel::Success);
        }
        Err(err) => {
            error!("refresh failed: {err}");
            toasts.toast("Failed to refresh odds", ToastLevel::Error);
        }
    }
}

fn export(
    state: &mut AppState,
    exporter: &Exporter,
    format: ExportFormat,
    toasts: &mut StatusLine,
) {
    if let Err(err) = exporter.export(state.board().records(), format, toasts) {
        route(state, UiEvent::ScriptError(err.to_string()), toasts);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw(
    f: &mut Frame,
    state: &AppState,
    toasts: &StatusLine,
    source: &str,
    selected: usize,
    offset: &mut usize,
    capacity: &mut usize,
    compare_open: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(f.size());

    draw_header(f, chunks[0], state, source);
    draw_search(f, chunks[1], state);
    draw_tabs(f, chunks[2], state);
    draw_table(f, chunks[3], state, selected, offset, capacity);
    draw_footer(f, chunks[4], toasts);

    if compare_open {
        if let Some(&idx) = state.board().visible().get(selected) {
            draw_comparison(f, &state.board().records()[idx]);
        }
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &AppState, source: &str) {
    let updated = state
        .board()
        .records()
        .iter()
        .map(|record| record.updated_at)
        .max()
        .map(format_local_timestamp)
        .unwrap_or_else(|| "never".to_string());
    let auto = if state.auto_refresh() { "on" } else { "off" };

    let header = Paragraph::new(format!(
        "Betting Odds Dashboard\nUpdated: {updated} • Auto-refresh: {auto} • Source: {source}"
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn draw_search(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus() == Focus::Search;
    let cursor = if focused { "▌" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Paragraph::new(format!("Search: {}{cursor}", state.search())).style(style);
    f.render_widget(line, area);
}

fn draw_tabs(f: &mut Frame, area: Rect, state: &AppState) {
    let mut leagues = vec!["all".to_string()];
    leagues.extend(state.board().leagues());
    let current = leagues
        .iter()
        .position(|league| league == state.selected_league())
        .unwrap_or(0);

    let tabs = Tabs::new(leagues)
        .select(current)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_table(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    mut selected: usize,
    offset: &mut usize,
    capacity: &mut usize,
) {
    let rows_data: Vec<&OddsRecord> = state.board().visible_records().collect();
    let total = rows_data.len();

    *capacity = (area.height.saturating_sub(3) as usize).max(1);
    if total == 0 {
        selected = 0;
    } else if selected >= total {
        selected = total - 1;
    }
    let max_offset = total.saturating_sub(*capacity);
    if *offset > max_offset {
        *offset = max_offset;
    }
    let visible_end = (*offset + *capacity).min(total);

    let rows = rows_data[*offset..visible_end]
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells = vec![
                Cell::from(record.match_info.home_team.clone()),
                Cell::from(record.match_info.away_team.clone()),
                Cell::from(record.match_info.league.clone()),
                Cell::from(format_price(record.best_home_win.as_ref())),
                Cell::from(format_price(record.best_draw.as_ref())),
                Cell::from(format_price(record.best_away_win.as_ref())),
                Cell::from(format_kickoff(record.match_info.match_time)),
            ];
            let mut row = Row::new(cells);
            if *offset + i == selected {
                row = row.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            row
        })
        .collect::<Vec<_>>();

    let header = Row::new(
        ["Home", "Away", "League", "1", "X", "2", "Kickoff"]
            .iter()
            .map(|label| Cell::from(*label).style(Style::default().fg(Color::Yellow))),
    );

    let home_width = column_width(&rows_data, "Home", |record| &record.match_info.home_team);
    let away_width = column_width(&rows_data, "Away", |record| &record.match_info.away_team);
    let league_width = column_width(&rows_data, "League", |record| &record.match_info.league);

    let widths = vec![
        Constraint::Length(home_width),
        Constraint::Length(away_width),
        Constraint::Length(league_width),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Matches ({} of {})",
            total,
            state.board().len()
        )))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame, area: Rect, toasts: &StatusLine) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some((message, level)) = toasts.last() {
        let style = Style::default().fg(match level {
            ToastLevel::Error => Color::Red,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Success => Color::Green,
            ToastLevel::Info => Color::White,
        });
        f.render_widget(Paragraph::new(message.to_string()).style(style), chunks[0]);
    }

    let help = Paragraph::new(
        "Ctrl+R refresh • Ctrl+F search • Esc clear • Tab league • a auto-refresh • e/j export CSV/JSON • Enter compare • q quit",
    )
    .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[1]);
}

fn draw_comparison(f: &mut Frame, record: &OddsRecord) {
    let area = centered_rect(f.size(), 60, 60);
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = record
        .all_odds
        .iter()
        .map(|quote| {
            let draw = if quote.draw > 0.0 {
                format!("{:.2}", quote.draw)
            } else {
                "-".to_string()
            };
            ListItem::new(format!(
                "{:<12} 1: {:<6.2} X: {:<6} 2: {:<6.2}",
                quote.site_name, quote.home_win, draw, quote.away_win
            ))
        })
        .collect();

    let title = format!(
        "{} vs {} • odds by site",
        record.match_info.home_team, record.match_info.away_team
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn format_price(price: Option<&BestPrice>) -> String {
    match price {
        Some(price) => format!("{:.2} ({})", price.value, price.site_name),
        None => "-".to_string(),
    }
}

fn column_width(rows: &[&OddsRecord], header: &str, field: impl Fn(&OddsRecord) -> &String) -> u16 {
    let data_width = rows
        .iter()
        .map(|record| UnicodeWidthStr::width(field(record).as_str()))
        .max()
        .unwrap_or(0);
    u16::try_from(UnicodeWidthStr::width(header).max(data_width) + 2).unwrap_or(u16::MAX)
}
