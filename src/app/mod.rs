//! The interactive terminal menu.
//!
//! All UI state lives in one explicit [`App`] value. Each view has an
//! update function over key events and a render function producing
//! ratatui text, so the whole state machine is testable without a
//! terminal. The event loop is synchronous: draw, block on the next
//! event, update.

pub mod articles;
pub mod hyperpaths_menu;
pub mod manager;
pub mod prompt;
pub mod start;
pub mod style;

use crate::bytemark::Bytemark;
use crate::hackernews::Article;
use crate::output::{self, OutputTarget};
use crate::services::clipboard::Clipboard;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use std::collections::HashSet;
use std::path::PathBuf;

/// Which screen is active. Prompt-style views reuse the shared
/// [`PromptMenu`] or [`TextPrompt`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Start,
    Articles,
    ArticlesAdded,
    BytemarkFiles,
    Manager,
    DeleteBytemark,
    SaveChanges,
    SendBytemark,
    SentConfirmation,
    Hyperpaths,
    EditHyperpath,
    AddHyperpath,
    CreateFile,
    InvalidFilepath,
}

/// How this invocation routes output; fixed at startup except for the
/// registry-default file, which is re-resolved after hyperpath edits.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub explicit: Option<String>,
    pub to_stdout: bool,
    pub to_clipboard: bool,
    pub registry: PathBuf,
}

#[derive(Debug, Default)]
pub struct StartMenu {
    pub cursor: usize,
}

impl StartMenu {
    pub const CHOICES: [&'static str; 3] = [
        "View hackernews articles",
        "Manage bytemarks",
        "Edit hyperpaths",
    ];
}

#[derive(Debug, Default)]
pub struct ArticleMenu {
    pub articles: Vec<Article>,
    pub selected: HashSet<usize>,
    pub cursor: usize,
    pub page: usize,
}

/// Generic option-list prompt ("Save / Cancel" and friends).
#[derive(Debug, Default)]
pub struct PromptMenu {
    pub prompt: String,
    pub options: Vec<String>,
    pub cursor: usize,
}

impl PromptMenu {
    pub fn set(&mut self, prompt: impl Into<String>, options: &[&str]) {
        self.prompt = prompt.into();
        self.options = options.iter().map(|s| s.to_string()).collect();
        self.cursor = 0;
    }

    pub fn wipe(&mut self) {
        *self = PromptMenu::default();
    }
}

/// Single-line text input with a prompt and footer.
#[derive(Debug, Default)]
pub struct TextPrompt {
    pub prompt: String,
    pub placeholder: String,
    pub footer: String,
    pub value: String,
}

impl TextPrompt {
    pub fn init(&mut self, placeholder: &str, prompt: &str, footer: &str) {
        self.placeholder = placeholder.to_string();
        self.prompt = prompt.to_string();
        self.footer = footer.to_string();
        self.value.clear();
    }
}

#[derive(Debug, Default)]
pub struct HyperpathsMenu {
    pub hyperpaths: Vec<String>,
    pub cursor: usize,
    pub move_mode: bool,
    /// Registry slot being edited or added.
    pub edit_index: usize,
    /// Path awaiting create-on-demand confirmation.
    pub pending_path: String,
}

#[derive(Debug, Default)]
pub struct ManagerState {
    pub bytemarks: Vec<Bytemark>,
    pub cursor: usize,
    pub move_mode: bool,
    /// The open hyperpath file.
    pub hyperpath: String,
    /// The other registry entries, as (registry index, path).
    pub others: Vec<(usize, String)>,
    /// Cursor into `others` for the send-to prompt.
    pub send_cursor: usize,
}

pub struct App {
    pub view: View,
    pub output: OutputConfig,
    /// Resolved destination for article/url writes.
    pub target: OutputTarget,
    pub start: StartMenu,
    pub articles: ArticleMenu,
    pub prompt: PromptMenu,
    pub input: TextPrompt,
    pub hyperpaths: HyperpathsMenu,
    pub manager: ManagerState,
    pub clipboard: Clipboard,
    pub should_quit: bool,
}

impl App {
    pub fn new(output: OutputConfig, target: OutputTarget, clipboard: Clipboard) -> Self {
        App {
            view: View::Start,
            output,
            target,
            start: StartMenu::default(),
            articles: ArticleMenu::default(),
            prompt: PromptMenu::default(),
            input: TextPrompt::default(),
            hyperpaths: HyperpathsMenu::default(),
            manager: ManagerState::default(),
            clipboard,
            should_quit: false,
        }
    }

    /// Draw/read/update loop. Returns when the user quits; I/O failures
    /// propagate and abort the session.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key)?;
                }
            }
        }
        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(Paragraph::new(self.view_text()), frame.area());
    }

    /// Render the active view.
    pub fn view_text(&self) -> Text<'static> {
        match self.view {
            View::Start => start::view(self),
            View::Articles => articles::view(self),
            View::BytemarkFiles => manager::files_view(self),
            View::Manager => manager::view(self),
            View::SendBytemark => manager::send_view(self),
            View::Hyperpaths => hyperpaths_menu::view(self),
            View::EditHyperpath | View::AddHyperpath => prompt::text_input_view(self),
            View::ArticlesAdded
            | View::DeleteBytemark
            | View::SaveChanges
            | View::SentConfirmation
            | View::CreateFile
            | View::InvalidFilepath => prompt::menu_view(self),
        }
    }

    /// Route a key press to the active view's update function.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.view {
            View::Start => start::update(self, key),
            View::Articles => articles::update(self, key),
            View::ArticlesAdded => articles::update_added(self, key),
            View::BytemarkFiles => manager::update_files(self, key),
            View::Manager => manager::update(self, key),
            View::DeleteBytemark => manager::update_delete(self, key),
            View::SaveChanges => manager::update_save(self, key),
            View::SendBytemark => manager::update_send(self, key),
            View::SentConfirmation => manager::update_sent(self, key),
            View::Hyperpaths => hyperpaths_menu::update(self, key),
            View::EditHyperpath | View::AddHyperpath => hyperpaths_menu::update_edit(self, key),
            View::CreateFile => hyperpaths_menu::update_create_file(self, key),
            View::InvalidFilepath => hyperpaths_menu::update_invalid(self, key),
        }
    }

    /// Reload the registry into menu state.
    pub fn load_hyperpaths(&mut self) -> Result<()> {
        self.hyperpaths.hyperpaths = crate::hyperpaths::load(&self.output.registry)?;
        if self.hyperpaths.cursor >= self.hyperpaths.hyperpaths.len() {
            self.hyperpaths.cursor = self.hyperpaths.hyperpaths.len().saturating_sub(1);
        }
        Ok(())
    }

    /// Re-resolve the output target after the registry changed. Only the
    /// registry-default target can move; explicit/stdout/clipboard
    /// targets are pinned for the session.
    pub fn sync_output(&mut self) -> Result<()> {
        if self.output.explicit.is_some() || self.output.to_stdout || self.output.to_clipboard {
            return Ok(());
        }
        let paths = crate::hyperpaths::load(&self.output.registry)?;
        if let Some(first) = paths.first() {
            self.target = OutputTarget::File(PathBuf::from(first));
        }
        Ok(())
    }

    /// Write `text` to the session target, returning the destination.
    pub fn write_output(&mut self, text: &str) -> Result<String> {
        Ok(output::write(&self.target, text, &mut self.clipboard)?)
    }

    /// Reset per-session article/prompt state after a checkout.
    pub fn wipe(&mut self) {
        self.articles = ArticleMenu::default();
        self.prompt.wipe();
    }
}

/// `q` or ctrl+c quits from any non-text view.
pub(crate) fn is_quit(key: &KeyEvent) -> bool {
    use crossterm::event::{KeyCode, KeyModifiers};
    key.code == KeyCode::Char('q')
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
