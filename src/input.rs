use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::direction::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NextGame,
    PrevGame,
    SelectPlay,
    SelectQuit,
    Confirm,
    Quit,
}

/// In-game key table. Unknown keys map to `None` and are dropped.
pub fn action(ev: &KeyEvent) -> Option<Action> {
    if is_ctrl_c(ev) {
        return Some(Action::Quit);
    }

    match ev.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Action::Move(Up)),
            'a' => Some(Action::Move(Left)),
            's' => Some(Action::Move(Down)),
            'd' => Some(Action::Move(Right)),
            'q' => Some(Action::Quit),
            _ => None,
        },
        KeyCode::Up => Some(Action::Move(Up)),
        KeyCode::Left => Some(Action::Move(Left)),
        KeyCode::Down => Some(Action::Move(Down)),
        KeyCode::Right => Some(Action::Move(Right)),
        _ => None,
    }
}

/// Launcher key table.
pub fn menu_action(ev: &KeyEvent) -> Option<MenuAction> {
    if is_ctrl_c(ev) {
        return Some(MenuAction::Quit);
    }

    match ev.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(MenuAction::NextGame),
            's' => Some(MenuAction::PrevGame),
            'a' => Some(MenuAction::SelectPlay),
            'd' => Some(MenuAction::SelectQuit),
            'q' => Some(MenuAction::Quit),
            _ => None,
        },
        KeyCode::Enter => Some(MenuAction::Confirm),
        _ => None,
    }
}

// Raw mode turns Ctrl+C into an ordinary key press instead of SIGINT
fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::key;

    #[test]
    fn wasd_is_case_insensitive() {
        for &(c, dir) in [('w', Up), ('a', Left), ('s', Down), ('d', Right)].iter() {
            assert_eq!(action(&key(KeyCode::Char(c))), Some(Action::Move(dir)));
            assert_eq!(action(&key(KeyCode::Char(c.to_ascii_uppercase()))), Some(Action::Move(dir)));
        }
    }

    #[test]
    fn quit_keys() {
        assert_eq!(action(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action(&key(KeyCode::Char('Q'))), Some(Action::Quit));

        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(action(&ctrl_c), Some(Action::Quit));
        assert_eq!(menu_action(&ctrl_c), Some(MenuAction::Quit));
    }

    #[test]
    fn arrows_move_too() {
        assert_eq!(action(&key(KeyCode::Up)), Some(Action::Move(Up)));
        assert_eq!(action(&key(KeyCode::Left)), Some(Action::Move(Left)));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(action(&key(KeyCode::Char('x'))), None);
        assert_eq!(action(&key(KeyCode::Char('c'))), None);
        assert_eq!(action(&key(KeyCode::Enter)), None);
        assert_eq!(menu_action(&key(KeyCode::Up)), None);
    }

    #[test]
    fn menu_keys() {
        assert_eq!(menu_action(&key(KeyCode::Char('W'))), Some(MenuAction::NextGame));
        assert_eq!(menu_action(&key(KeyCode::Char('s'))), Some(MenuAction::PrevGame));
        assert_eq!(menu_action(&key(KeyCode::Char('a'))), Some(MenuAction::SelectPlay));
        assert_eq!(menu_action(&key(KeyCode::Char('d'))), Some(MenuAction::SelectQuit));
        assert_eq!(menu_action(&key(KeyCode::Enter)), Some(MenuAction::Confirm));
        assert_eq!(menu_action(&key(KeyCode::Char('q'))), Some(MenuAction::Quit));
    }
}
