//! Key mapping.
//!
//! Terminal keys are translated into a closed set of commands before they
//! reach a presenter. Presenters never see raw key events except inside the
//! action-input modal, which captures free text.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use trackdash_core::model::CriterionOutcome;

/// Navigation commands understood by every presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Up,
    Down,
    PageUp,
    PageDown,
    Tab,
    Enter,
    JumpStart,
    JumpEnd,
}

/// Everything a key can mean outside the action-input modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Nav(NavCommand),
    StartAction(CriterionOutcome),
    Back,
    Retry,
    Quit,
    GoTracks,
    GoDocuments,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMap {
    vim_keys: bool,
}

impl KeyMap {
    pub fn new(vim_keys: bool) -> Self {
        Self { vim_keys }
    }

    pub fn action(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let action = match key.code {
            KeyCode::Char('c') if ctrl => KeyAction::Quit,
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => KeyAction::Back,
            KeyCode::Up => KeyAction::Nav(NavCommand::Up),
            KeyCode::Down => KeyAction::Nav(NavCommand::Down),
            KeyCode::PageUp => KeyAction::Nav(NavCommand::PageUp),
            KeyCode::PageDown => KeyAction::Nav(NavCommand::PageDown),
            KeyCode::Home => KeyAction::Nav(NavCommand::JumpStart),
            KeyCode::End => KeyAction::Nav(NavCommand::JumpEnd),
            KeyCode::Tab | KeyCode::BackTab => KeyAction::Nav(NavCommand::Tab),
            KeyCode::Enter | KeyCode::Right => KeyAction::Nav(NavCommand::Enter),
            KeyCode::Char('b') if ctrl => KeyAction::Nav(NavCommand::PageUp),
            KeyCode::Char('f') if ctrl => KeyAction::Nav(NavCommand::PageDown),
            KeyCode::Char(' ') => KeyAction::Nav(NavCommand::PageDown),
            KeyCode::Char('v') => KeyAction::StartAction(CriterionOutcome::Verify),
            KeyCode::Char('s') => KeyAction::StartAction(CriterionOutcome::Skip),
            KeyCode::Char('f') => KeyAction::StartAction(CriterionOutcome::Fail),
            KeyCode::Char('r') => KeyAction::Retry,
            KeyCode::Char('t') => KeyAction::GoTracks,
            KeyCode::Char('d') => KeyAction::GoDocuments,
            KeyCode::Char(c) if self.vim_keys => match c {
                'k' => KeyAction::Nav(NavCommand::Up),
                'j' => KeyAction::Nav(NavCommand::Down),
                'g' => KeyAction::Nav(NavCommand::JumpStart),
                'G' => KeyAction::Nav(NavCommand::JumpEnd),
                'h' => KeyAction::Back,
                'l' => KeyAction::Nav(NavCommand::Enter),
                _ => return None,
            },
            _ => return None,
        };
        Some(action)
    }
}
