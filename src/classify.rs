//! Filesystem entry classification.
//!
//! JPEG detection is a content sniff, not an extension check: the first line
//! of the file (everything before the first `\n` byte) must contain the ASCII
//! bytes `JFIF`. This is the JFIF APP0 marker, which a JFIF encoder writes at
//! byte offset 6, well before any newline byte.
//!
//! The heuristic is line-based. A text file whose first line
//! mentions `JFIF` is classified as JPEG, and an Exif-only JPEG (no APP0
//! segment) is not. Raster transforms that are not about conversion use
//! [`image_format`] instead, which goes by extension.

use crate::error::{Error, Result};
use image::ImageFormat;
use std::cell::OnceCell;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const JFIF_MARKER: &[u8] = b"JFIF";

/// Classification of one filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    JpegFile,
    OtherFile,
}

/// A path discovered during a traversal.
///
/// The first line of the file is read at most once, on first use.
#[derive(Debug)]
pub struct FileEntry {
    path: PathBuf,
    is_dir: bool,
    first_line: OnceCell<Vec<u8>>,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            is_dir,
            first_line: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// File name as a lossy string, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Raw bytes of the first line, without the trailing newline.
    pub fn first_line(&self) -> Result<&[u8]> {
        if let Some(line) = self.first_line.get() {
            return Ok(line);
        }
        let line = read_first_line(&self.path)?;
        Ok(self.first_line.get_or_init(|| line))
    }
}

fn read_first_line(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(Error::fs(path))?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(Error::fs(path))?;
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    Ok(line)
}

/// Classify an entry as directory, JPEG (sniffed) or other file.
pub fn classify(entry: &FileEntry) -> Result<EntryKind> {
    if entry.is_dir() {
        return Ok(EntryKind::Directory);
    }
    if is_jpeg(entry)? {
        Ok(EntryKind::JpegFile)
    } else {
        Ok(EntryKind::OtherFile)
    }
}

/// `true` if the entry's first line contains the `JFIF` marker.
///
/// An empty file has no marker and is not a JPEG.
pub fn is_jpeg(entry: &FileEntry) -> Result<bool> {
    let line = entry.first_line()?;
    Ok(line.windows(JFIF_MARKER.len()).any(|w| w == JFIF_MARKER))
}

/// Image formats the raster transforms operate on, keyed by extension.
const IMAGE_EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Image format of a file, judged by its (case-insensitive) extension.
///
/// Returns `None` for files the raster transforms should leave alone.
pub fn image_format(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?;
    IMAGE_EXTENSIONS
        .iter()
        .find(|(candidate, _)| ext.eq_ignore_ascii_case(candidate))
        .map(|(_, format)| *format)
}

/// Verify a root path exists and is a file or a directory.
pub fn ensure_valid_root(path: &Path) -> Result<()> {
    if path.is_file() || path.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidPath(path.to_path_buf()))
    }
}
