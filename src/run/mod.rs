//! Command runners for tagedit.
//!
//! - `suggest` and `complete` answer one-shot queries against the corpus
//! - `pairs` lists a caption folder
//! - `edit` is the interactive terminal editor

mod pairs;
mod suggest;
mod tui;

use std::path::{Path, PathBuf};

use tagedit::Corpus;
use tagedit::config::Config;
use tagedit::core::source::{FsReader, default_sources};
use tagedit::state::AppState;
use tracing::{info, warn};

pub use pairs::run_pairs;
pub use suggest::{run_complete, run_suggest};
pub use tui::run_terminal_mode;

/// Load every stock source from the configured tags directory.
///
/// Sources that fail are logged and skipped; the corpus may be empty.
pub fn load_corpus(config: &Config) -> Corpus {
    let load = Corpus::load(default_sources(config.tags_dir()), &FsReader);
    if load.corpus.is_empty() {
        warn!(
            dir = %config.tags_dir().display(),
            failed = load.warnings.len(),
            "no tags loaded"
        );
    } else {
        info!(
            tags = load.corpus.len(),
            sources = load.corpus.sources().len(),
            failed = load.warnings.len(),
            "corpus ready"
        );
    }
    load.corpus
}

/// `dir`, or the remembered folder when none was given
pub fn resolve_folder(dir: Option<&Path>, state: &AppState) -> Option<PathBuf> {
    dir.map(Path::to_path_buf)
        .or_else(|| state.last_folder.clone())
        .filter(|p| !p.as_os_str().is_empty())
}

/// Remember `folder` as the last one opened. Failure only costs the memory.
pub fn remember_folder(config: &Config, state: &mut AppState, folder: &Path) {
    let folder = folder.canonicalize().unwrap_or_else(|_| folder.to_path_buf());
    if state.last_folder.as_deref() == Some(folder.as_path()) {
        return;
    }
    state.last_folder = Some(folder);
    if let Err(e) = state.save(&config.state_file()) {
        warn!(error = %e, "could not save state");
    }
}

/// Saved state, or the default when it can't be read
pub fn load_state(config: &Config) -> AppState {
    AppState::load(&config.state_file()).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable state file");
        AppState::default()
    })
}
