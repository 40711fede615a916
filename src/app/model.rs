//! Application model types: `App`, `Prompt` and `Action`.
//!
//! `App` only holds what the terminal front end needs on top of the
//! controller: the cursor, the open prompt and two-key prefixes. Key presses
//! are turned into `Action`s which the runtime applies to the controller.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

/// One-line input prompt shown above the controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Import,
    Rename(Uuid),
}

impl Prompt {
    pub fn label(&self) -> &'static str {
        match self {
            Prompt::Import => "add file or folder",
            Prompt::Rename(_) => "rename",
        }
    }
}

/// Something the runtime should do with the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    PlaySelected,
    PlayPause,
    Next,
    Prev,
    SeekForward,
    SeekBack,
    /// Move the track at `from` before the track currently at `to`.
    Reorder { from: usize, to: usize },
    Delete(usize),
    /// Open the rename prompt for the track at this index.
    BeginRename(usize),
    Import(String),
    Rename { id: Uuid, title: String },
    CyclePlayMode,
    ClearError,
}

/// The main application model.
pub struct App {
    pub selected: usize,
    /// Move the cursor along when the controller changes track.
    pub follow_playback: bool,
    prompt: Option<Prompt>,
    input: String,
    pending: Option<char>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            selected: 0,
            follow_playback: true,
            prompt: None,
            input: String::new(),
            pending: None,
        }
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Open `prompt` with `initial` already typed.
    pub fn open_prompt(&mut self, prompt: Prompt, initial: &str) {
        self.pending = None;
        self.prompt = Some(prompt);
        self.input = initial.to_string();
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.input.clear();
    }

    /// Keep the cursor inside a playlist of `len` tracks.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Follow the playing track, unless the user moved the cursor away.
    pub fn follow(&mut self, index: Option<usize>) {
        if let (true, Some(i)) = (self.follow_playback, index) {
            self.selected = i;
        }
    }

    /// Move selection to the next track, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous track, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    /// Translate a key press for a playlist of `len` tracks.
    pub fn on_key(&mut self, key: KeyEvent, len: usize) -> Option<Action> {
        if self.prompt.is_some() {
            return self.on_prompt_key(key);
        }

        let pending = self.pending.take();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('g') => {
                if pending == Some('g') {
                    self.follow_playback = false;
                    self.selected = 0;
                } else {
                    self.pending = Some('g');
                }
                None
            }
            KeyCode::Char('G') => {
                self.follow_playback = false;
                self.selected = len.saturating_sub(1);
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.follow_playback = false;
                self.next(len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.follow_playback = false;
                self.prev(len);
                None
            }
            KeyCode::Char('d') => {
                if pending == Some('d') && self.selected < len {
                    Some(Action::Delete(self.selected))
                } else {
                    self.pending = Some('d');
                    None
                }
            }
            KeyCode::Char('J') => {
                if self.selected + 1 >= len {
                    return None;
                }
                let from = self.selected;
                self.selected += 1;
                Some(Action::Reorder { from, to: from + 2 })
            }
            KeyCode::Char('K') => {
                if self.selected == 0 || self.selected >= len {
                    return None;
                }
                let from = self.selected;
                self.selected -= 1;
                Some(Action::Reorder { from, to: from - 1 })
            }
            KeyCode::Enter => {
                if self.selected >= len {
                    return None;
                }
                self.follow_playback = true;
                Some(Action::PlaySelected)
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => Some(Action::PlayPause),
            KeyCode::Char('l') => {
                self.follow_playback = true;
                Some(Action::Next)
            }
            KeyCode::Char('h') => {
                self.follow_playback = true;
                Some(Action::Prev)
            }
            KeyCode::Char('L') => Some(Action::SeekForward),
            KeyCode::Char('H') => Some(Action::SeekBack),
            KeyCode::Char('m') => Some(Action::CyclePlayMode),
            KeyCode::Char('a') => {
                self.open_prompt(Prompt::Import, "");
                None
            }
            KeyCode::Char('R') => (self.selected < len).then_some(Action::BeginRename(self.selected)),
            KeyCode::Esc => Some(Action::ClearError),
            _ => None,
        }
    }

    fn on_prompt_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.cancel_prompt();
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => {
                let prompt = self.prompt.take()?;
                let text = std::mem::take(&mut self.input);
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(match prompt {
                    Prompt::Import => Action::Import(text.to_string()),
                    Prompt::Rename(id) => Action::Rename {
                        id,
                        title: text.to_string(),
                    },
                })
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }
}
