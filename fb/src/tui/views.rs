//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the last
//! projection the board rendered (not the live store), so a card that is
//! mid completion animation stays where it was until the deferred
//! re-render. The only state it writes is the hit map for mouse input.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, HitMap, InteractionMode, OverlayButton};
use crate::board::{ColumnView, FocusState};
use crate::domain::Status;
use crate::notify::Notification;

/// Board colors (90s arcade-inspired)
mod colors {
    use ratatui::style::Color;

    pub const TODO: Color = Color::Rgb(255, 215, 0); // Gold
    pub const IN_PROGRESS: Color = Color::Rgb(0, 191, 255); // Deep sky blue
    pub const DONE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const DROP_TARGET: Color = Color::Rgb(255, 0, 255); // Magenta
    pub const CELEBRATE: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}

/// Height of one task card including its border
const CARD_HEIGHT: u16 = 3;

/// Get color for a status column
fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => colors::TODO,
        Status::InProgress => colors::IN_PROGRESS,
        Status::Done => colors::DONE,
    }
}

/// Get status icon
fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Todo => "○",
        Status::InProgress => "●",
        Status::Done => "✓",
    }
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!("render: called");
    let mut hits = HitMap::default();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Columns
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(state, frame, chunks[0]);
    render_columns(state, frame, chunks[1], &mut hits);
    render_footer(state, frame, chunks[2]);

    if state.board.focus().is_overlay_visible() {
        render_focus_overlay(state, frame, chunks[1], &mut hits);
    }
    if matches!(state.interaction_mode, InteractionMode::Help) {
        render_help_overlay(frame, area);
    }

    state.hits = hits;
}

/// Render header with title and column counts
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let snapshot = state.board.view().snapshot();

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            "focusboard",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
    ];
    for (i, column) in snapshot.columns().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(colors::DIM)));
        }
        spans.push(Span::styled(
            format!("{} {} {}", status_icon(column.status), column.status.title(), column.cards.len()),
            Style::default().fg(status_color(column.status)),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::DIM)),
    );
    frame.render_widget(header, area);
}

/// Render the three status columns and their cards
fn render_columns(state: &AppState, frame: &mut Frame, area: Rect, hits: &mut HitMap) {
    trace!("render_columns: called");
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    for column in state.board.view().snapshot().columns() {
        let column_area = areas[column.status.index()];
        hits.columns[column.status.index()] = column_area;
        render_column(state, column, frame, column_area, hits);
    }
}

fn render_column(state: &AppState, column: &ColumnView, frame: &mut Frame, area: Rect, hits: &mut HitMap) {
    let is_drop_target = state.board.drag().hover() == Some(column.status);
    let is_selected = state.selection.column == column.status;

    let border_style = if is_drop_target {
        Style::default().fg(colors::DROP_TARGET).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(status_color(column.status))
    } else {
        Style::default().fg(colors::DIM)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if is_drop_target {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ({}) ", column.status.title(), column.cards.len()),
            Style::default()
                .fg(status_color(column.status))
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if column.cards.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "drop tasks here",
            Style::default().fg(colors::DIM),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(hint, Rect { height: 1, ..inner });
        return;
    }

    let dragged = state.board.drag().dragged();
    let overlay_visible = state.board.focus().is_overlay_visible();

    for (row, card) in column.cards.iter().enumerate() {
        let y = inner.y + row as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.y + inner.height {
            // No room left; show how many are hidden
            let hidden = column.cards.len() - row;
            let more = Paragraph::new(Span::styled(
                format!("… {} more", hidden),
                Style::default().fg(colors::DIM),
            ))
            .alignment(Alignment::Center);
            let last_line = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            frame.render_widget(Clear, last_line);
            frame.render_widget(more, last_line);
            break;
        }

        let card_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: CARD_HEIGHT,
        };
        hits.cards.push((card_area, card.id));

        let animating = state.board.view().is_animating(card.id);
        let selected = is_selected && state.selection.row == row && !overlay_visible;

        let (style, text) = if animating {
            (
                Style::default().fg(colors::CELEBRATE).add_modifier(Modifier::BOLD),
                format!("✨ {} ✓", card.text),
            )
        } else if dragged == Some(card.id) {
            (
                Style::default().fg(colors::DIM).add_modifier(Modifier::ITALIC),
                card.text.clone(),
            )
        } else {
            (Style::default(), card.text.clone())
        };
        let style = if selected { style.bg(colors::SELECTED_BG) } else { style };

        let border = if animating {
            Style::default().fg(colors::CELEBRATE)
        } else if selected {
            Style::default().fg(colors::KEYBIND)
        } else {
            Style::default().fg(colors::DIM)
        };

        let card_widget = Paragraph::new(Line::from(vec![
            Span::styled(format!("#{} ", card.id), Style::default().fg(colors::DIM)),
            Span::styled(text, style),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(card_widget, card_area);
    }
}

/// Render footer: input line, error, toast or keybinds
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let line = if let Some(error) = &state.error_message {
        Line::from(Span::styled(format!(" {}", error), Style::default().fg(colors::ERROR)))
    } else {
        match &state.interaction_mode {
            InteractionMode::TaskInput(buffer) => Line::from(vec![
                Span::styled(" New task: ", Style::default().fg(colors::KEYBIND)),
                Span::raw(buffer.as_str()),
                Span::styled("█", Style::default().fg(colors::KEYBIND)),
                Span::styled("   Enter add · Esc done", Style::default().fg(colors::DIM)),
            ]),
            InteractionMode::Command(buffer) => Line::from(vec![
                Span::styled(" :", Style::default().fg(colors::KEYBIND)),
                Span::raw(buffer.as_str()),
                Span::styled("█", Style::default().fg(colors::KEYBIND)),
            ]),
            _ => {
                let mut spans = if state.board.focus().is_overlay_visible() {
                    vec![
                        key_span("c"),
                        desc_span("complete"),
                        key_span("n"),
                        desc_span("next"),
                        key_span("b"),
                        desc_span("back"),
                    ]
                } else {
                    vec![
                        key_span("a"),
                        desc_span("add"),
                        key_span("⏎"),
                        desc_span("focus"),
                        key_span("H/L"),
                        desc_span("move"),
                        key_span("d"),
                        desc_span("done"),
                        key_span(":"),
                        desc_span("cmd"),
                        key_span("?"),
                        desc_span("help"),
                        key_span("q"),
                        desc_span("quit"),
                    ]
                };
                if let Some(toast) = &state.toast {
                    let color = match toast.kind {
                        Notification::Complete => colors::CELEBRATE,
                        Notification::Denied => colors::ERROR,
                        _ => colors::HEADER,
                    };
                    spans.push(Span::raw("│ "));
                    spans.push(Span::styled(
                        toast.text.clone(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ));
                }
                Line::from(spans)
            }
        }
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::DIM)),
    );
    frame.render_widget(footer, area);
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(format!(" <{}>", key), Style::default().fg(colors::KEYBIND))
}

fn desc_span(desc: &str) -> Span<'_> {
    Span::styled(format!(" {} ", desc), Style::default().fg(colors::DIM))
}

/// Render the focus overlay, scaled by transition state
fn render_focus_overlay(state: &AppState, frame: &mut Frame, area: Rect, hits: &mut HitMap) {
    trace!(state = ?state.board.focus().state(), "render_focus_overlay: called");
    let focus_state = state.board.focus().state();
    let stable = matches!(focus_state, FocusState::Open(_));

    // Entrance and exit are drawn zoomed out
    let overlay_area = if stable {
        centered_rect(60, 50, area)
    } else {
        centered_rect(25, 20, area)
    };
    hits.overlay = Some(overlay_area);

    frame.render_widget(Clear, overlay_area);
    let border_color = if stable { colors::HEADER } else { colors::DIM };
    let block = Block::default()
        .title(" Focus ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let Some(task) = state.board.focused_task() else {
        let gone = Paragraph::new("(task no longer exists)")
            .style(Style::default().fg(colors::DIM))
            .alignment(Alignment::Center);
        frame.render_widget(gone, inner);
        return;
    };

    if !stable {
        let title = Paragraph::new(Span::styled(task.text.as_str(), Style::default().fg(colors::DIM)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(title, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Title
            Constraint::Length(1), // Status
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    let title = Paragraph::new(Span::styled(
        task.text.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(title, rows[1]);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!("#{} · ", task.id), Style::default().fg(colors::DIM)),
        Span::styled(
            format!("{} {}", status_icon(task.status), task.status.title()),
            Style::default().fg(status_color(task.status)),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(status, rows[2]);

    let buttons = [
        (OverlayButton::Complete, "[c] Complete", colors::DONE),
        (OverlayButton::Next, "[n] Next", colors::IN_PROGRESS),
        (OverlayButton::Back, "[b] Back", colors::DIM),
    ];
    let button_areas = Layout::horizontal(buttons.map(|(_, label, _)| Constraint::Length(label.chars().count() as u16)))
        .flex(Flex::Center)
        .spacing(3)
        .split(rows[4]);
    for ((button, label, color), button_area) in buttons.into_iter().zip(button_areas.iter()) {
        hits.buttons.push((*button_area, button));
        let widget = Paragraph::new(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(widget, *button_area);
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let help_area = centered_rect(50, 70, area);
    frame.render_widget(Clear, help_area);

    let lines = vec![
        Line::from(Span::styled(
            "Board",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )),
        key_line("h/l ←/→", "Switch column"),
        key_line("j/k ↑/↓", "Switch task"),
        key_line("Enter", "Focus mode on task"),
        key_line("H / L", "Move task left / right"),
        key_line("d", "Move task to done"),
        key_line("a", "Add tasks (Esc to stop)"),
        key_line(":", "Command: add, move, focus, quit"),
        key_line("mouse", "Drag cards between columns, click to focus"),
        Line::from(""),
        Line::from(Span::styled(
            "Focus mode",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )),
        key_line("c", "Complete task"),
        key_line("n", "Next task in column"),
        key_line("b / Esc", "Back to board"),
        Line::from(""),
        key_line("q / Ctrl+C", "Quit"),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help (any key to close) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::HEADER)),
    );
    frame.render_widget(help, help_area);
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Create a centered rect using percentage of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
