//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. The board
//! itself lives inside [`AppState`]; everything else is cursor, input mode
//! and the hit areas the last frame drew.

use std::time::Duration;

use rand::seq::IndexedRandom;
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::board::{Board, SnapshotView};
use crate::domain::{Status, TaskId};
use crate::notify::{Notification, NotificationBus};

/// The board as driven by the terminal UI
pub type TermBoard = Board<SnapshotView, NotificationBus>;

/// Cheers shown in the status line when a task completes
pub const CELEBRATIONS: &[&str] = &["Radical", "Tubular", "Booyah", "Nailed it", "Da bomb", "All that", "Sweet"];

/// Interaction mode (modal)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Add-task input (a key)
    TaskInput(String),
    /// Command mode (: key)
    Command(String),
    /// Help overlay
    Help,
}

/// Which focus overlay control was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayButton {
    Complete,
    Next,
    Back,
}

/// Cursor position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub column: Status,
    pub row: usize,
}

/// Status-line message with an expiry on the board clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub kind: Notification,
    pub expires_at: Duration,
}

/// Screen regions drawn in the last frame, used for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub columns: [Rect; 3],
    pub cards: Vec<(Rect, TaskId)>,
    pub overlay: Option<Rect>,
    pub buttons: Vec<(Rect, OverlayButton)>,
}

impl HitMap {
    pub fn column_at(&self, x: u16, y: u16) -> Option<Status> {
        let pos = Position::new(x, y);
        Status::ALL
            .into_iter()
            .find(|status| self.columns[status.index()].contains(pos))
    }

    pub fn card_at(&self, x: u16, y: u16) -> Option<TaskId> {
        let pos = Position::new(x, y);
        self.cards.iter().find(|(rect, _)| rect.contains(pos)).map(|(_, id)| *id)
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<OverlayButton> {
        let pos = Position::new(x, y);
        self.buttons
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, button)| *button)
    }

    pub fn in_overlay(&self, x: u16, y: u16) -> bool {
        self.overlay.is_some_and(|rect| rect.contains(Position::new(x, y)))
    }
}

/// A mouse press on a card that may turn into a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerGesture {
    pub task: TaskId,
    pub origin: (u16, u16),
    pub dragging: bool,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub board: TermBoard,
    pub selection: Selection,
    pub interaction_mode: InteractionMode,
    pub toast: Option<Toast>,
    pub toast_duration: Duration,
    pub error_message: Option<String>,
    pub should_quit: bool,
    pub hits: HitMap,
    pub gesture: Option<PointerGesture>,
}

impl AppState {
    pub fn new(board: TermBoard, toast_duration: Duration) -> Self {
        debug!("AppState::new: called");
        Self {
            board,
            selection: Selection::default(),
            interaction_mode: InteractionMode::Normal,
            toast: None,
            toast_duration,
            error_message: None,
            should_quit: false,
            hits: HitMap::default(),
            gesture: None,
        }
    }

    /// Task under the cursor, as currently displayed
    pub fn selected_task(&self) -> Option<TaskId> {
        self.board
            .view()
            .snapshot()
            .column(self.selection.column)
            .cards
            .get(self.selection.row)
            .map(|c| c.id)
    }

    fn column_len(&self, status: Status) -> usize {
        self.board.view().snapshot().column(status).cards.len()
    }

    /// Keep the cursor inside its column after the board changed
    pub fn clamp_selection(&mut self) {
        let len = self.column_len(self.selection.column);
        self.selection.row = self.selection.row.min(len.saturating_sub(1));
    }

    pub fn select_column(&mut self, status: Status) {
        debug!(%status, "AppState::select_column: called");
        self.selection.column = status;
        self.clamp_selection();
    }

    pub fn select_prev(&mut self) {
        self.selection.row = self.selection.row.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let len = self.column_len(self.selection.column);
        if self.selection.row + 1 < len {
            self.selection.row += 1;
        }
    }

    /// Put the cursor on a task if it is displayed
    pub fn select_task(&mut self, id: TaskId) {
        if let Some((column, row)) = self.board.view().snapshot().locate(id) {
            self.selection = Selection { column, row };
        } else {
            self.clamp_selection();
        }
    }

    /// Show a notification in the status line
    pub fn show_toast(&mut self, kind: Notification) {
        let text = match kind {
            Notification::Add => "Task added".to_string(),
            Notification::Drag => "Grabbed".to_string(),
            Notification::Drop => "Moved".to_string(),
            Notification::Complete => {
                let cheer = CELEBRATIONS.choose(&mut rand::rng()).copied().unwrap_or("Done");
                format!("✨ {}! Task complete ✨", cheer)
            }
            Notification::Focus => "Focus".to_string(),
            Notification::Denied => "No more tasks in this column".to_string(),
        };
        debug!(%kind, %text, "AppState::show_toast: called");
        self.toast = Some(Toast {
            text,
            kind,
            expires_at: self.board.now() + self.toast_duration,
        });
    }

    /// Drop the toast once its time on the board clock is up
    pub fn expire_toast(&mut self) {
        let now = self.board.now();
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Timing;
    use crate::config::BoardConfig;

    fn state() -> AppState {
        let board = Board::new(
            BoardConfig::default().initial_store(),
            SnapshotView::new(),
            NotificationBus::with_default_capacity(),
            Timing::default(),
        );
        AppState::new(board, Duration::from_millis(1000))
    }

    #[test]
    fn test_selection_moves_within_column() {
        let mut state = state();
        assert_eq!(state.selected_task(), Some(TaskId(3)));

        state.select_next();
        assert_eq!(state.selected_task(), Some(TaskId(4)));
        state.select_next();
        assert_eq!(state.selected_task(), Some(TaskId(4)));

        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected_task(), Some(TaskId(3)));
    }

    #[test]
    fn test_select_column_clamps_row() {
        let mut state = state();
        state.select_next();
        state.select_column(Status::Done);
        assert_eq!(state.selection.row, 0);
        assert_eq!(state.selected_task(), Some(TaskId(1)));
    }

    #[test]
    fn test_toast_expires_on_board_clock() {
        let mut state = state();
        state.show_toast(Notification::Denied);
        assert!(state.toast.is_some());

        state.board.advance(Duration::from_millis(999));
        state.expire_toast();
        assert!(state.toast.is_some());

        state.board.advance(Duration::from_millis(1));
        state.expire_toast();
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_hit_map_lookups() {
        let hits = HitMap {
            columns: [Rect::new(0, 0, 10, 10), Rect::new(10, 0, 10, 10), Rect::new(20, 0, 10, 10)],
            cards: vec![(Rect::new(11, 1, 8, 3), TaskId(2))],
            overlay: Some(Rect::new(5, 5, 10, 4)),
            buttons: vec![(Rect::new(6, 7, 4, 1), OverlayButton::Next)],
        };
        assert_eq!(hits.column_at(15, 5), Some(Status::InProgress));
        assert_eq!(hits.column_at(40, 5), None);
        assert_eq!(hits.card_at(12, 2), Some(TaskId(2)));
        assert_eq!(hits.card_at(2, 2), None);
        assert_eq!(hits.button_at(7, 7), Some(OverlayButton::Next));
        assert!(hits.in_overlay(6, 6));
        assert!(!hits.in_overlay(0, 0));
    }
}
