//! Terminal (TUI) mode implementation.
//!
//! A one-pane caption editor: the caption text on top, live suggestions
//! under it. Key handling lives in [`Editor`] so it can be driven without
//! a terminal.

use std::error::Error;
use std::io;
use std::path::Path;

use crossterm::event::{self, Event};
use tagedit::config::Config;
use tagedit::core::buffer::Buffer;
use tagedit::core::dispatcher::{DispatchResult, InputEvent, Keymap, dispatch};
use tagedit::core::pairs::Gallery;
use tagedit::core::view::TextView;
use tagedit::terminal::keys::{Edit, KeyAction, translate};
use tagedit::terminal::raw::RawMode;
use tagedit::terminal::render::{self, Screen};
use tagedit::{CompletionSession, Corpus};
use tracing::{debug, warn};

use super::{load_corpus, load_state, remember_folder, resolve_folder};

const HELP: &str = "^S save  ^Q quit  ^N/^P next/prev image  Tab cycle  Alt-1..0 pick";

/// Whether the event loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Editor state behind the terminal
pub struct Editor<'a> {
    corpus: &'a Corpus,
    keymap: Keymap,
    session: CompletionSession,
    view: TextView,
    gallery: Gallery,
    message: String,
    /// Destructive action waiting for a repeat to confirm
    pending: Option<KeyAction>,
}

impl<'a> Editor<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config, gallery: Gallery, buffer: Buffer) -> Self {
        Self {
            corpus,
            keymap: Keymap::from_config(config),
            session: CompletionSession::with_limit(config.max_suggestions()),
            view: TextView::new(buffer),
            gallery,
            message: HELP.to_string(),
            pending: None,
        }
    }

    pub fn view(&self) -> &TextView {
        &self.view
    }

    pub fn session(&self) -> &CompletionSession {
        &self.session
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle one key. Failures are reported in the status row.
    pub fn handle(&mut self, action: KeyAction) -> Flow {
        match self.apply(action) {
            Ok(flow) => flow,
            Err(e) => {
                warn!(error = %e, "editor action failed");
                self.message = e.to_string();
                Flow::Continue
            }
        }
    }

    fn apply(&mut self, action: KeyAction) -> tagedit::Result<Flow> {
        let confirmed = self.pending.take().as_ref() == Some(&action);
        match action {
            KeyAction::Quit => {
                if self.view.buffer.modified && !confirmed {
                    return Ok(self.ask_confirm(action, "quit"));
                }
                return Ok(Flow::Quit);
            }
            KeyAction::Save => {
                self.view.buffer.save()?;
                self.message = format!("Saved {}", self.view.buffer.display_name());
            }
            KeyAction::NextPair | KeyAction::PrevPair => {
                if self.view.buffer.modified && !confirmed {
                    return Ok(self.ask_confirm(action, "switch image"));
                }
                self.switch_pair(action == KeyAction::NextPair)?;
            }
            KeyAction::Choose(index) => {
                let result = dispatch(
                    &mut self.session,
                    self.corpus,
                    &mut self.view,
                    InputEvent::SuggestionChosen(index),
                )?;
                self.report(result);
            }
            KeyAction::Key { edit, name } => {
                if let Some(edit) = edit {
                    self.apply_edit(edit)?;
                }
                let event = self.keymap.event_for_key(&name);
                let result = dispatch(&mut self.session, self.corpus, &mut self.view, event)?;
                self.report(result);
            }
        }
        Ok(Flow::Continue)
    }

    fn ask_confirm(&mut self, action: KeyAction, what: &str) -> Flow {
        self.message = format!("Unsaved changes: ^S to save, or repeat to {} anyway", what);
        self.pending = Some(action);
        Flow::Continue
    }

    fn apply_edit(&mut self, edit: Edit) -> tagedit::Result<()> {
        match edit {
            Edit::Insert(c) => self.view.type_char(c)?,
            Edit::Backspace => self.view.backspace()?,
            Edit::Left => self.view.move_left(),
            Edit::Right => self.view.move_right(),
            Edit::Up => self.view.move_vertical(false),
            Edit::Down => self.view.move_vertical(true),
            Edit::Home => self.view.move_line_start(),
            Edit::End => self.view.move_line_end(),
        }
        Ok(())
    }

    fn report(&mut self, result: DispatchResult) {
        match result {
            DispatchResult::Committed(record) => {
                self.message = format!("Inserted {}", record.text);
            }
            DispatchResult::Cycled(index) => {
                let total = self.session.suggestions().len();
                self.message = format!("Suggestion {} of {}", index + 1, total);
            }
            DispatchResult::Suggestions(_) | DispatchResult::Cleared => {
                self.message = HELP.to_string();
            }
            DispatchResult::NotHandled => {}
        }
    }

    fn switch_pair(&mut self, forward: bool) -> tagedit::Result<()> {
        let before = self.gallery.index();
        if forward {
            self.gallery.next_pair();
        } else {
            self.gallery.prev_pair();
        }
        if self.gallery.index() == before {
            self.message = self.gallery.status();
            return Ok(());
        }
        if let Some(buffer) = self.gallery.load_text()? {
            self.view = TextView::new(buffer);
        }
        self.session.clear();
        self.message = self.gallery.status();
        Ok(())
    }

    fn title(&self) -> String {
        match self.gallery.current() {
            Some(pair) => pair.file_name(),
            None => self.view.buffer.display_name(),
        }
    }

    fn position(&self) -> String {
        if self.gallery.pairs().is_empty() {
            String::new()
        } else {
            self.gallery.status()
        }
    }
}

/// Open `path` (a caption file, a folder, or the remembered folder) and
/// run the editor until the user quits. `image` picks the starting pair of a
/// folder, counting from 1.
pub fn run_terminal_mode(
    config: &Config,
    path: Option<&Path>,
    image: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    let (gallery, buffer) = open_target(config, path, image)?;
    let corpus = load_corpus(config);
    let mut editor = Editor::new(&corpus, config, gallery, buffer);

    let _raw_mode = RawMode::new()?;
    let mut stdout = io::stdout();
    loop {
        let title = editor.title();
        let position = editor.position();
        let screen = Screen {
            title: &title,
            position: &position,
            view: editor.view(),
            session: editor.session(),
            message: editor.message(),
        };
        render::draw(&mut stdout, &screen, crossterm::terminal::size()?)?;

        // Resizes and other events just trigger the redraw above
        if let Event::Key(key) = event::read()? {
            if let Some(action) = translate(key) {
                if editor.handle(action) == Flow::Quit {
                    break;
                }
            }
        }
    }
    debug!("editor closed");
    Ok(())
}

fn open_target(
    config: &Config,
    path: Option<&Path>,
    image: Option<usize>,
) -> Result<(Gallery, Buffer), Box<dyn Error>> {
    if let Some(file) = path.filter(|p| !p.is_dir()) {
        let buffer = if file.exists() {
            Buffer::from_file(file)?
        } else {
            let mut buffer = Buffer::new();
            buffer.filename = Some(file.to_path_buf());
            buffer
        };
        return Ok((Gallery::default(), buffer));
    }

    let mut state = load_state(config);
    let Some(folder) = resolve_folder(path, &state) else {
        return Err("no caption file or folder given and none remembered".into());
    };
    let mut gallery = Gallery::open(&folder)?;
    if let Some(n) = image {
        if n == 0 || gallery.select(n - 1).is_none() {
            return Err(format!(
                "no image {} in {} ({} pairs)",
                n,
                folder.display(),
                gallery.pairs().len()
            )
            .into());
        }
    }
    let Some(buffer) = gallery.load_text()? else {
        return Err(format!("no image/caption pairs in {}", folder.display()).into());
    };
    remember_folder(config, &mut state, &folder);
    Ok((gallery, buffer))
}
