// tagedit Configuration
// Edit this file to change the default key bindings and settings

use crate::config::{Config, DEFAULT_STATE_FILE, DEFAULT_TAGS_DIR};
use crate::core::dispatcher::{CMD_CYCLE, CMD_DELIMITER};
use crate::core::suggest::SUGGESTION_LIMIT;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Completion
    config.bind("Tab", CMD_CYCLE);

    // Keys that close a tag
    config.bind("space", CMD_DELIMITER);
    config.bind("comma", CMD_DELIMITER);
    config.bind("Return", CMD_DELIMITER);

    // Every other key is an ordinary edit and refreshes suggestions

    config.set("tags_dir", DEFAULT_TAGS_DIR);
    config.set("state_file", DEFAULT_STATE_FILE);
    config.set("max_suggestions", SUGGESTION_LIMIT as i64);
}
