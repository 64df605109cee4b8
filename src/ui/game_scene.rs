//! Game scene: the scaled play area, status bar, and game-over overlay.

use crate::constants::{BIRD_SIZE, BIRD_X, PIPE_GAP, PIPE_WIDTH};
use crate::game::{RunPhase, RunState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Outcome of the score submission kicked off at game over.
pub enum SubmitStatus {
    /// No profile: nothing is sent.
    Guest,
    /// Submission thread still running.
    Pending,
    /// Server accepted; holds the score now on record.
    Accepted(i64),
    Failed(String),
}

/// Render the full game scene for the current run phase.
pub fn render_game(frame: &mut Frame, area: Rect, run: &RunState, submit: &SubmitStatus) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Skyflap ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(inner);

    render_play_area(frame, chunks[0], run);
    render_status_bar(frame, chunks[1], run);

    if run.phase == RunPhase::Over {
        render_game_over(frame, inner, run, submit);
    }
}

/// Draw the world scaled onto the cell grid: each cell samples the world
/// point at its center.
fn render_play_area(frame: &mut Frame, area: Rect, run: &RunState) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let cell_w = run.width / width as f64;
    let cell_h = run.height / height as f64;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let world_y = (row as f64 + 0.5) * cell_h;
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            let world_x = (col as f64 + 0.5) * cell_w;
            spans.push(glyph_at(run, world_x, world_y));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn glyph_at(run: &RunState, world_x: f64, world_y: f64) -> Span<'static> {
    // Bird on top of everything else
    if world_x >= BIRD_X
        && world_x < BIRD_X + BIRD_SIZE
        && world_y >= run.bird.y
        && world_y < run.bird.y + BIRD_SIZE
    {
        let glyph = if run.bird.velocity < -1.5 {
            "▲"
        } else if run.bird.velocity > 3.0 {
            "▼"
        } else {
            "►"
        };
        return Span::styled(
            glyph,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    }

    for pipe in &run.pipes {
        if world_x >= pipe.x && world_x < pipe.x + PIPE_WIDTH {
            let in_top = world_y < pipe.top_height;
            let in_bottom = world_y >= pipe.top_height + PIPE_GAP;
            if in_top || in_bottom {
                return Span::styled("█", Style::default().fg(Color::Green));
            }
        }
    }

    Span::raw(" ")
}

fn render_status_bar(frame: &mut Frame, area: Rect, run: &RunState) {
    let (message, color) = match run.phase {
        RunPhase::NotStarted => ("Press Space to start!".to_string(), Color::Yellow),
        _ => (format!("Score: {}", run.score), Color::Green),
    };

    let line = Line::from(vec![
        Span::styled(message, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("    "),
        Span::styled("[Space]", Style::default().fg(Color::Cyan)),
        Span::styled(" Flap  ", Style::default().fg(Color::Gray)),
        Span::styled("[Esc]", Style::default().fg(Color::Cyan)),
        Span::styled(" Home", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_game_over(frame: &mut Frame, area: Rect, run: &RunState, submit: &SubmitStatus) {
    let overlay = centered_rect(area, 40, 9);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let submit_line = match submit {
        SubmitStatus::Guest => Line::from(Span::styled(
            "Guest run — score not saved",
            Style::default().fg(Color::DarkGray),
        )),
        SubmitStatus::Pending => Line::from(Span::styled(
            "Submitting score...",
            Style::default().fg(Color::Yellow),
        )),
        SubmitStatus::Accepted(score) => Line::from(Span::styled(
            format!("Score submitted: {} on record", score),
            Style::default().fg(Color::Green),
        )),
        SubmitStatus::Failed(error) => Line::from(Span::styled(
            format!("Submit failed: {}", error),
            Style::default().fg(Color::Red),
        )),
    };

    let text = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Final Score: {}", run.score)),
        Line::from(""),
        submit_line,
        Line::from(""),
        Line::from(Span::styled(
            "[Space] Play Again    [Esc] Home",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
