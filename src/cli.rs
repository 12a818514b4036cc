//! Command-line argument parsing for tagedit.
//!
//! Global options override settings from `user_config`; the subcommand
//! picks which runner in `run` gets control.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tagedit::config::Config;

#[derive(Debug, Parser)]
#[command(name = "tagedit")]
#[command(version, about = "Tag autocomplete for image caption files", long_about = None)]
pub struct Cli {
    /// Directory holding the tag vocabulary files
    #[arg(long, global = true)]
    pub tags_dir: Option<PathBuf>,

    /// Maximum number of suggestions
    #[arg(short = 'n', long, global = true)]
    pub limit: Option<usize>,

    /// File remembering the last caption folder
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List completions for a word
    Suggest {
        word: String,
    },

    /// Complete the word at a column of a caption line
    Complete {
        line: String,

        /// Cursor column in chars; defaults to the end of the line
        #[arg(short, long)]
        column: Option<usize>,

        /// Commit the suggestion at this index and print the new line
        #[arg(short, long)]
        pick: Option<usize>,
    },

    /// List image/caption pairs in a folder
    Pairs {
        /// Folder to scan; defaults to the last one opened
        dir: Option<PathBuf>,
    },

    /// Edit captions interactively with live suggestions
    Edit {
        /// Caption file or folder of image/caption pairs; defaults to the
        /// last folder opened
        path: Option<PathBuf>,

        /// Start at this image of the folder, counting from 1
        #[arg(short, long, value_name = "N")]
        image: Option<usize>,
    },
}

impl Cli {
    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(dir) = &self.tags_dir {
            config.set("tags_dir", dir.display().to_string());
        }
        if let Some(limit) = self.limit {
            config.set("max_suggestions", i64::try_from(limit).unwrap_or(i64::MAX));
        }
        if let Some(path) = &self.state_file {
            config.set("state_file", path.display().to_string());
        }
    }
}
