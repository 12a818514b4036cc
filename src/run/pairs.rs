//! Caption folder listing.

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

use tagedit::config::Config;
use tagedit::core::pairs::Gallery;

use super::{load_state, remember_folder, resolve_folder};

/// Run `pairs`: list image/caption pairs and remember the folder.
pub fn run_pairs(config: &Config, dir: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut state = load_state(config);
    let Some(folder) = resolve_folder(dir, &state) else {
        return Err("no folder given and none remembered".into());
    };

    let gallery = Gallery::open(&folder)?;
    write_listing(&mut io::stdout().lock(), &gallery)?;
    remember_folder(config, &mut state, &folder);
    Ok(())
}

fn write_listing(out: &mut impl Write, gallery: &Gallery) -> io::Result<()> {
    for pair in gallery.pairs() {
        let caption = pair
            .text
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(out, "{}\t{}", pair.file_name(), caption)?;
    }
    writeln!(out, "{}", gallery.status())
}
