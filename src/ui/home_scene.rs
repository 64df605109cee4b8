//! Home screen: leaderboard table plus start/logout controls.

use crate::leaderboard::ScoreRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Where the background leaderboard fetch currently stands.
pub enum LeaderboardState {
    Loading,
    Loaded(Vec<ScoreRecord>),
    Failed(String),
}

pub struct HomeScreen {
    pub leaderboard: LeaderboardState,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            leaderboard: LeaderboardState::Loading,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, player_name: Option<&str>) {
        let block = Block::default()
            .title(" Skyflap ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Greeting
                Constraint::Length(1), // Table header
                Constraint::Min(3),    // Leaderboard rows
                Constraint::Length(2), // Controls
            ])
            .split(inner);

        let greeting = match player_name {
            Some(name) => Line::from(vec![
                Span::styled("Pilot: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    name.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                "Playing as guest — scores are not saved",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(greeting), chunks[0]);

        let header = Line::from(Span::styled(
            format!("{:<4} {:<18} {:>6}", "#", "Name", "Score"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(header), chunks[1]);

        let rows = self.leaderboard_lines(chunks[2].height as usize);
        f.render_widget(Paragraph::new(rows), chunks[2]);

        let controls = Paragraph::new("[Enter] Play    [R] Refresh    [L] Logout    [Q] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[3]);
    }

    fn leaderboard_lines(&self, max_rows: usize) -> Vec<Line<'_>> {
        match &self.leaderboard {
            LeaderboardState::Loading => vec![Line::from(Span::styled(
                "Loading leaderboard...",
                Style::default().fg(Color::DarkGray),
            ))],
            LeaderboardState::Failed(error) => vec![Line::from(Span::styled(
                format!("Leaderboard unavailable: {}", error),
                Style::default().fg(Color::Red),
            ))],
            LeaderboardState::Loaded(scores) if scores.is_empty() => {
                vec![Line::from(Span::styled(
                    "No scores yet — be the first!",
                    Style::default().fg(Color::DarkGray),
                ))]
            }
            LeaderboardState::Loaded(scores) => scores
                .iter()
                .take(max_rows)
                .enumerate()
                .map(|(rank, record)| {
                    let style = match rank {
                        0 => Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                        1 | 2 => Style::default().fg(Color::White),
                        _ => Style::default().fg(Color::Gray),
                    };
                    Line::from(Span::styled(
                        format!(
                            "{:<4} {:<18} {:>6}",
                            rank + 1,
                            truncate(&record.name, 18),
                            record.score
                        ),
                        style,
                    ))
                })
                .collect(),
        }
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_name_unchanged() {
        assert_eq!(truncate("Ada", 18), "Ada");
    }

    #[test]
    fn test_truncate_long_name_ellipsized() {
        let long = "a".repeat(30);
        let out = truncate(&long, 18);
        assert_eq!(out.chars().count(), 18);
        assert!(out.ends_with('…'));
    }
}
