use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::{EndReason, RunState};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};
use crate::ui::view::{Fruit, ShellView};

/// Terminal columns per logical cell, so the board looks square.
const CELL_WIDTH: u16 = 2;

const GLYPH_HEAD: &str = "██";
const GLYPH_BODY: &str = "▓▓";
const GLYPH_ITEM: &str = "()";

const BOARD_BG: Color = Color::Rgb(0, 17, 0);

/// Immutable inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo<'a> {
    pub view: &'a ShellView,
    pub grid: GridSize,
    pub state: RunState,
    pub end_reason: Option<EndReason>,
}

/// Renders the full game frame from the shell view.
pub fn render(frame: &mut Frame<'_>, info: FrameInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, info.view, info.state);
    let board_area = board_rect(play_area, info.grid);

    let block = Block::bordered().style(Style::new().bg(BOARD_BG));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_item(frame, inner, info);
    render_body(frame, inner, info);

    if let Some(score) = info.view.final_score {
        render_game_over_menu(
            frame,
            board_area,
            score,
            &info.view.high_scores,
            info.end_reason,
        );
        return;
    }

    match info.state {
        RunState::NotStarted => render_start_menu(frame, board_area, &info.view.high_scores),
        RunState::Paused => render_pause_menu(frame, board_area),
        RunState::Running | RunState::Ended => {}
    }
}

fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    board
}

fn render_item(frame: &mut Frame<'_>, inner: Rect, info: FrameInfo<'_>) {
    let Some((x, y)) = logical_to_terminal(inner, info.grid, info.view.item) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_ITEM,
        Style::new()
            .fg(fruit_color(info.view.fruit))
            .add_modifier(Modifier::BOLD),
    );
}

fn render_body(frame: &mut Frame<'_>, inner: Rect, info: FrameInfo<'_>) {
    let buffer = frame.buffer_mut();
    for (index, segment) in info.view.body.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, info.grid, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (GLYPH_HEAD, Style::new().fg(Color::LightGreen))
        } else {
            (GLYPH_BODY, Style::new().fg(Color::Green))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn fruit_color(fruit: Fruit) -> Color {
    match fruit {
        Fruit::Cherry => Color::Red,
        Fruit::Banana => Color::Yellow,
        Fruit::Apple => Color::LightRed,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
