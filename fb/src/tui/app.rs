//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard and mouse
//! events by turning them into board inputs. It does not do any rendering -
//! that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, trace};

use super::command::BoardCommand;
use super::state::{AppState, InteractionMode, OverlayButton, PointerGesture};
use crate::board::{DropOutcome, FocusOutcome};
use crate::domain::Status;

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(state: AppState) -> Self {
        debug!("App::new: called");
        Self { state }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Clear any transient error message on key press
        self.state.clear_error();

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        match &self.state.interaction_mode {
            InteractionMode::Normal if self.state.board.focus().is_overlay_visible() => {
                debug!("App::handle_key: focus overlay");
                self.handle_focus_key(key);
            }
            InteractionMode::Normal => {
                debug!("App::handle_key: Normal mode");
                self.handle_normal_key(key);
            }
            InteractionMode::TaskInput(_) => {
                debug!("App::handle_key: TaskInput mode");
                self.handle_task_input_key(key);
            }
            InteractionMode::Command(_) => {
                debug!("App::handle_key: Command mode");
                self.handle_command_key(key);
            }
            InteractionMode::Help => {
                debug!("App::handle_key: Help mode, closing");
                self.state.interaction_mode = InteractionMode::Normal;
            }
        }

        self.state.should_quit
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                debug!("App::handle_normal_key: quit requested");
                self.state.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.state.interaction_mode = InteractionMode::TaskInput(String::new());
            }
            KeyCode::Char(':') => {
                self.state.interaction_mode = InteractionMode::Command(String::new());
            }

            // === Cursor ===
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(left) = self.state.selection.column.left() {
                    self.state.select_column(left);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(right) = self.state.selection.column.right() {
                    self.state.select_column(right);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(),

            // === Board actions ===
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.state.selected_task() {
                    let outcome = self.state.board.select_task(id);
                    debug!(?outcome, "App::handle_normal_key: select task");
                }
            }
            KeyCode::Char('H') => self.move_selected(self.state.selection.column.left()),
            KeyCode::Char('L') => self.move_selected(self.state.selection.column.right()),
            KeyCode::Char('d') => self.move_selected(Some(Status::Done)),
            _ => {
                trace!(?key, "App::handle_normal_key: unbound key");
            }
        }
    }

    /// Keyboard drag of the selected card onto another column
    fn move_selected(&mut self, target: Option<Status>) {
        let (Some(id), Some(target)) = (self.state.selected_task(), target) else {
            debug!("App::move_selected: nothing to move");
            return;
        };
        let outcome = self.state.board.move_task(id, target);
        debug!(?outcome, "App::move_selected: moved");
        if let DropOutcome::Moved { to, .. } = outcome {
            self.state.select_column(to);
            self.state.select_task(id);
        } else {
            self.state.clamp_selection();
        }
    }

    /// Handle key while the focus overlay is visible
    fn handle_focus_key(&mut self, key: KeyEvent) {
        let outcome = match key.code {
            KeyCode::Char('c') | KeyCode::Enter => self.state.board.focus_complete(),
            KeyCode::Char('n') | KeyCode::Tab => self.state.board.focus_next(),
            KeyCode::Char('b') | KeyCode::Char('q') | KeyCode::Esc => self.state.board.focus_back(),
            _ => return,
        };
        debug!(?outcome, "App::handle_focus_key: handled");
    }

    /// Handle key in add-task input mode
    fn handle_task_input_key(&mut self, key: KeyEvent) {
        let InteractionMode::TaskInput(buffer) = &mut self.state.interaction_mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                let text = std::mem::take(buffer);
                if let Some(id) = self.state.board.add_task(&text) {
                    info!(%id, "Task added from input");
                    self.state.clamp_selection();
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    /// Handle key in command mode
    fn handle_command_key(&mut self, key: KeyEvent) {
        let InteractionMode::Command(buffer) = &mut self.state.interaction_mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                let line = std::mem::take(buffer);
                self.state.interaction_mode = InteractionMode::Normal;
                self.execute_command(&line);
            }
            KeyCode::Backspace => {
                if buffer.pop().is_none() {
                    self.state.interaction_mode = InteractionMode::Normal;
                }
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    /// Run a command-mode line against the board
    pub fn execute_command(&mut self, line: &str) {
        debug!(%line, "App::execute_command: called");
        let command = match BoardCommand::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.state.set_error(e.to_string());
                return;
            }
        };

        match command {
            BoardCommand::Add(text) => {
                self.state.board.add_task(&text);
                self.state.clamp_selection();
            }
            BoardCommand::Move { id, status } => match self.state.board.move_task(id, status) {
                DropOutcome::NotFound(id) => self.state.set_error(format!("No task #{}", id)),
                DropOutcome::Unchanged(id) => self.state.set_error(format!("Task #{} is already in {}", id, status)),
                _ => self.state.clamp_selection(),
            },
            BoardCommand::Focus(id) => match self.state.board.select_task(id) {
                FocusOutcome::NotFound(id) => self.state.set_error(format!("No task #{}", id)),
                FocusOutcome::Busy => self.state.set_error("Focus mode is busy"),
                _ => self.state.select_task(id),
            },
            BoardCommand::Quit => self.state.should_quit = true,
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        trace!(?mouse, "App::handle_mouse: called");
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.mouse_down(x, y),
            MouseEventKind::Drag(MouseButton::Left) => self.mouse_drag(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(x, y),
            _ => {}
        }
    }

    fn mouse_down(&mut self, x: u16, y: u16) {
        if self.state.board.focus().is_overlay_visible() {
            let outcome = match self.state.hits.button_at(x, y) {
                Some(OverlayButton::Complete) => self.state.board.focus_complete(),
                Some(OverlayButton::Next) => self.state.board.focus_next(),
                Some(OverlayButton::Back) => self.state.board.focus_back(),
                None if self.state.hits.in_overlay(x, y) => return,
                None => self.state.board.overlay_background_click(),
            };
            debug!(?outcome, "App::mouse_down: overlay click");
            return;
        }

        if !matches!(self.state.interaction_mode, InteractionMode::Normal) {
            return;
        }

        if let Some(task) = self.state.hits.card_at(x, y) {
            debug!(%task, "App::mouse_down: pressed on card");
            self.state.select_task(task);
            self.state.gesture = Some(PointerGesture {
                task,
                origin: (x, y),
                dragging: false,
            });
        }
    }

    fn mouse_drag(&mut self, x: u16, y: u16) {
        let Some(gesture) = self.state.gesture.as_mut() else {
            return;
        };
        if !gesture.dragging {
            if gesture.origin == (x, y) {
                return;
            }
            gesture.dragging = true;
            let task = gesture.task;
            self.state.board.drag_start(task);
        }

        match self.state.hits.column_at(x, y) {
            Some(status) => {
                self.state.board.drag_over(status);
            }
            None => self.state.board.drag_leave(),
        }
    }

    fn mouse_up(&mut self, x: u16, y: u16) {
        let Some(gesture) = self.state.gesture.take() else {
            return;
        };

        if gesture.dragging {
            match self.state.hits.column_at(x, y) {
                Some(status) => {
                    let outcome = self.state.board.drop(status);
                    debug!(?outcome, "App::mouse_up: dropped");
                    if outcome.changed() {
                        self.state.select_task(gesture.task);
                    }
                }
                None => self.state.board.drop_outside(),
            }
            self.state.board.drag_end();
            self.state.clamp_selection();
        } else if self.state.hits.card_at(x, y) == Some(gesture.task) {
            let outcome = self.state.board.select_task(gesture.task);
            debug!(?outcome, "App::mouse_up: card clicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::layout::Rect;

    use crate::board::{Board, FocusState, SnapshotView, Timing};
    use crate::config::BoardConfig;
    use crate::domain::TaskId;
    use crate::notify::NotificationBus;

    fn app() -> App {
        let board = Board::new(
            BoardConfig::default().initial_store(),
            SnapshotView::new(),
            NotificationBus::with_default_capacity(),
            Timing::default(),
        );
        App::new(AppState::new(board, Duration::from_millis(1500)))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));

        let mut app = self::app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_add_task_via_input_mode() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Buy tapes");
        app.handle_key(key(KeyCode::Enter));

        let store = app.state().board.store();
        assert_eq!(store.find_task(TaskId(5)).unwrap().text, "Buy tapes");
        assert_eq!(app.state().interaction_mode, InteractionMode::TaskInput(String::new()));

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }

    #[test]
    fn test_shift_l_moves_card_right() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('L')));

        let board = &app.state().board;
        assert_eq!(board.store().find_task(TaskId(3)).unwrap().status, Status::InProgress);
        assert_eq!(app.state().selection.column, Status::InProgress);
        assert_eq!(app.state().selected_task(), Some(TaskId(3)));
    }

    #[test]
    fn test_enter_opens_focus_and_keys_drive_overlay() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.state_mut().board.advance(Duration::from_millis(50));
        assert_eq!(app.state().board.focus().state(), FocusState::Open(TaskId(3)));

        app.handle_key(key(KeyCode::Char('n')));
        app.state_mut().board.advance(Duration::from_millis(450));
        assert_eq!(app.state().board.focus().state(), FocusState::Open(TaskId(4)));

        app.handle_key(key(KeyCode::Char('c')));
        app.state_mut().board.advance(Duration::from_millis(500));
        assert_eq!(app.state().board.focus().state(), FocusState::Closed);
        assert_eq!(
            app.state().board.store().find_task(TaskId(4)).unwrap().status,
            Status::Done
        );
    }

    #[test]
    fn test_command_mode_errors_are_shown() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "move 42 done");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().error_message.as_deref(), Some("No task #42"));

        app.execute_command("frobnicate");
        assert!(app.state().error_message.as_deref().unwrap().contains("frobnicate"));
    }

    #[test]
    fn test_command_mode_move_and_focus() {
        let mut app = app();
        app.execute_command("move 2 todo");
        assert_eq!(app.state().board.store().find_task(TaskId(2)).unwrap().status, Status::Todo);

        app.execute_command("focus 2");
        assert_eq!(app.state().board.focus().state(), FocusState::Opening(TaskId(2)));
        app.execute_command("focus 3");
        assert_eq!(app.state().error_message.as_deref(), Some("Focus mode is busy"));
    }

    #[test]
    fn test_mouse_drag_between_columns() {
        let mut app = app();
        app.state_mut().hits.columns = [
            Rect::new(0, 0, 20, 20),
            Rect::new(20, 0, 20, 20),
            Rect::new(40, 0, 20, 20),
        ];
        app.state_mut().hits.cards = vec![(Rect::new(1, 1, 18, 3), TaskId(3))];

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 5));
        assert_eq!(app.state().board.drag().dragged(), Some(TaskId(3)));
        assert_eq!(app.state().board.drag().hover(), Some(Status::InProgress));

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 25, 5));
        assert_eq!(
            app.state().board.store().find_task(TaskId(3)).unwrap().status,
            Status::InProgress
        );
        assert!(!app.state().board.drag().is_dragging());
        assert_eq!(app.state().board.focus().state(), FocusState::Closed);
    }

    #[test]
    fn test_mouse_click_opens_focus_and_background_closes() {
        let mut app = app();
        app.state_mut().hits.cards = vec![(Rect::new(1, 1, 18, 3), TaskId(4))];

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 2));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 2));
        app.state_mut().board.advance(Duration::from_millis(50));
        assert_eq!(app.state().board.focus().state(), FocusState::Open(TaskId(4)));

        app.state_mut().hits.overlay = Some(Rect::new(10, 10, 20, 8));
        // Inside the overlay box: nothing happens
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 15, 12));
        assert_eq!(app.state().board.focus().state(), FocusState::Open(TaskId(4)));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(matches!(app.state().board.focus().state(), FocusState::Closing { .. }));
    }

    #[test]
    fn test_help_mode_closes_on_any_key() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.state().interaction_mode, InteractionMode::Help);
        assert!(!app.handle_key(key(KeyCode::Char('x'))));
        assert_eq!(app.state().interaction_mode, InteractionMode::Normal);
    }
}
