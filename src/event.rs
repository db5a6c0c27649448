use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Terminal-side inputs to the main loop
#[derive(Debug, Clone)]
pub enum Event {
    Init,
    Tick,
    Render,
    Key(KeyEvent),
    /// Bracketed paste, delivered as one string
    Paste(String),
}

impl Event {
    /// Ctrl+C quits from anywhere, including while typing in the input
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
        )
    }
}
