use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::EndReason;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_scores: &[u32]) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = vec![Line::from("High scores")];
    body.extend(score_lines(high_scores));
    body.push(Line::from(""));
    body.push(Line::from("[Space] Start"));
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD to move"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_scores: &[u32],
    end_reason: Option<EndReason>,
) {
    let popup = centered_popup(area, 80, 80);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER"),
        Line::from(format!("Your score: {score}")),
        Line::from(match end_reason {
            Some(EndReason::WallCollision) => "Cause: hit wall",
            Some(EndReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
    ];
    lines.extend(score_lines(high_scores));
    lines.push(Line::from(""));
    lines.push(Line::from("[Enter] Play Again"));
    lines.push(Line::from("[Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn score_lines(high_scores: &[u32]) -> Vec<Line<'static>> {
    if high_scores.is_empty() {
        return vec![Line::from("no scores yet")];
    }

    high_scores
        .iter()
        .enumerate()
        .map(|(rank, score)| Line::from(format!("{}. {score}", rank + 1)))
        .collect()
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
