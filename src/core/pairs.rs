//! Image/caption pairs
//!
//! A caption folder holds images with a sibling `.txt` of the same stem.
//! [`scan_pairs`] finds them; [`Gallery`] steps through them and moves
//! caption text in and out of a [`Buffer`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::buffer::Buffer;
use crate::error::Result;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// An image and the caption file that describes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTextPair {
    pub image: PathBuf,
    pub text: PathBuf,
}

impl ImageTextPair {
    pub fn file_name(&self) -> String {
        self.image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// List image/caption pairs in `dir`, sorted by image file name.
///
/// Images without a caption file are ignored.
pub fn scan_pairs(dir: &Path) -> Result<Vec<ImageTextPair>> {
    let mut pairs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let image = entry?.path();
        if !image.is_file() || !is_image(&image) {
            continue;
        }
        let text = image.with_extension("txt");
        if text.is_file() {
            pairs.push(ImageTextPair { image, text });
        }
    }
    pairs.sort_by(|a, b| a.image.file_name().cmp(&b.image.file_name()));
    debug!(dir = %dir.display(), count = pairs.len(), "scanned caption folder");
    Ok(pairs)
}

/// Cursor over a folder's pairs
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    pairs: Vec<ImageTextPair>,
    index: usize,
}

impl Gallery {
    pub fn new(pairs: Vec<ImageTextPair>) -> Self {
        Self { pairs, index: 0 }
    }

    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self::new(scan_pairs(dir)?))
    }

    pub fn pairs(&self) -> &[ImageTextPair] {
        &self.pairs
    }

    pub fn current(&self) -> Option<&ImageTextPair> {
        self.pairs.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step forward; stays on the last pair
    pub fn next_pair(&mut self) -> Option<&ImageTextPair> {
        if self.index + 1 < self.pairs.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Step back; stays on the first pair
    pub fn prev_pair(&mut self) -> Option<&ImageTextPair> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Jump to pair `index`; out of range leaves the position alone
    pub fn select(&mut self, index: usize) -> Option<&ImageTextPair> {
        if index < self.pairs.len() {
            self.index = index;
            self.current()
        } else {
            None
        }
    }

    /// Status line text, e.g. `Image 2 of 10`
    pub fn status(&self) -> String {
        if self.pairs.is_empty() {
            return "No images".to_string();
        }
        format!("Image {} of {}", self.index + 1, self.pairs.len())
    }

    /// Load the current caption into a buffer
    pub fn load_text(&self) -> Result<Option<Buffer>> {
        self.current()
            .map(|pair| Buffer::from_file(&pair.text))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn folder() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [
            ("b.png", ""),
            ("b.txt", "1girl, solo"),
            ("a.JPG", ""),
            ("a.txt", "landscape"),
            ("orphan.jpg", ""),
            ("notes.txt", "not a caption"),
            ("c.gif", ""),
            ("c.txt", "gif caption"),
        ] {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_scan_pairs() {
        let dir = folder();
        let pairs = scan_pairs(dir.path()).unwrap();
        let names: Vec<String> = pairs.iter().map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
        assert_eq!(pairs[1].text, dir.path().join("b.txt"));
    }

    #[test]
    fn test_navigation_and_status() {
        let dir = folder();
        let mut gallery = Gallery::open(dir.path()).unwrap();
        assert_eq!(gallery.status(), "Image 1 of 2");
        assert!(gallery.prev_pair().is_some());
        assert_eq!(gallery.index(), 0);
        gallery.next_pair();
        gallery.next_pair();
        assert_eq!(gallery.status(), "Image 2 of 2");
        assert!(gallery.select(5).is_none());
        assert_eq!(gallery.select(0).map(|p| p.file_name()), Some("a.JPG".into()));
    }

    #[test]
    fn test_load_and_save_caption() {
        let dir = folder();
        let mut gallery = Gallery::open(dir.path()).unwrap();
        gallery.next_pair();
        let mut buffer = gallery.load_text().unwrap().unwrap();
        assert_eq!(buffer.to_string(), "1girl, solo");

        buffer.insert_at(0, 11, ", smile").unwrap();
        buffer.save().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("b.txt")).unwrap(),
            "1girl, solo, smile"
        );
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = Gallery::default();
        assert_eq!(gallery.status(), "No images");
        assert!(gallery.load_text().unwrap().is_none());
    }
}
