use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::RunState;
use crate::ui::view::ShellView;

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &ShellView, state: RunState) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let [score_left, score_right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(score_area);

    frame.render_widget(
        Paragraph::new(score_line(view)).alignment(Alignment::Left),
        score_left,
    );
    frame.render_widget(
        Paragraph::new(best_line(&view.high_scores)).alignment(Alignment::Right),
        score_right,
    );
    frame.render_widget(
        Paragraph::new(status_line(view, state))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn score_line(view: &ShellView) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" Score: {}", view.score),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];

    if view.eat_cue_ticks > 0 {
        spans.push(Span::styled(
            format!("  *{}*", view.fruit.name()),
            Style::default().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

fn best_line(high_scores: &[u32]) -> Line<'static> {
    if high_scores.is_empty() {
        return Line::from(Span::styled(
            "Best: - ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let joined = high_scores
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Line::from(vec![
        Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{joined} "), Style::default().fg(Color::Green)),
    ])
}

fn status_line(view: &ShellView, state: RunState) -> String {
    if view.intro_ticks > 0 {
        return "~ theme tune ~".to_owned();
    }

    match state {
        RunState::Ended => "[Enter] Play again  [Q] Quit".to_owned(),
        other => format!("[Space] {}  [Q] Quit", other.control_label()),
    }
}
