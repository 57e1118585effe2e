use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::domain::{Message, StvError, ViewerConfig};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &ViewerConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self) -> Result<Option<Message>, StvError> {
        if event::poll(Duration::from_millis(self.event_poll_time))? {
            return Ok(match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => self.handle_key(key),
                Event::Resize(width, height) => {
                    Some(Message::Resize(width as usize, height as usize))
                }
                _ => None,
            });
        }
        Ok(None)
    }

    /// Navigation keys map to their own messages, everything else goes to
    /// the search box.
    pub fn handle_key(&self, key: event::KeyEvent) -> Option<Message> {
        let message = match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Message::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Message::Quit,
            (KeyCode::F(1), _) => Message::Help,
            (KeyCode::Up, _) => Message::ScrollUp(1),
            (KeyCode::Down, _) => Message::ScrollDown(1),
            (KeyCode::PageUp, _) => Message::PageUp,
            (KeyCode::PageDown, _) => Message::PageDown,
            _ => Message::Keystroke(key),
        };
        trace!("Mapped: {key:?} => {message:?}");
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn map(code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
        Controller::new(&ViewerConfig::default()).handle_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys() {
        assert!(matches!(map(KeyCode::Esc, KeyModifiers::NONE), Some(Message::Quit)));
        assert!(matches!(
            map(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Message::Quit)
        ));
    }

    #[test]
    fn letters_go_to_the_search_box() {
        assert!(matches!(
            map(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Message::Keystroke(k)) if k.code == KeyCode::Char('q')
        ));
        assert!(matches!(
            map(KeyCode::Backspace, KeyModifiers::NONE),
            Some(Message::Keystroke(_))
        ));
    }

    #[test]
    fn navigation_keys() {
        assert!(matches!(map(KeyCode::Down, KeyModifiers::NONE), Some(Message::ScrollDown(1))));
        assert!(matches!(map(KeyCode::PageUp, KeyModifiers::NONE), Some(Message::PageUp)));
        assert!(matches!(map(KeyCode::F(1), KeyModifiers::NONE), Some(Message::Help)));
    }
}
