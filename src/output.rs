//! CLI output formatting.
//!
//! A run prints one block per transform: a header, the walked tree with each
//! directory in brackets and each file indented under it, then a summary.
//!
//! ```text
//! ==> convert: photos
//! [photos]
//!     cover.jpg -> cover.png (converted) (old file deleted)
//!     [holiday]
//!         beach.jpg -> beach.png (converted) (old file deleted)
//!         notes.txt
//! Converted 2 of 3 files in 2 directories
//! ```
//!
//! Each event has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and [`print_run_event`] writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::pipeline::RunEvent;
use crate::transform::{Action, TransformKind};
use crate::walk::{WalkEvent, WalkSummary};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

fn past_tense(kind: TransformKind) -> &'static str {
    match kind {
        TransformKind::Convert => "Converted",
        TransformKind::Rename => "Renamed",
        TransformKind::Resize => "Resized",
        TransformKind::RoundCorners => "Rounded",
    }
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// `==> convert: photos`
pub fn format_stage_header(kind: TransformKind, root: &Path) -> String {
    format!("==> {}: {}", kind, root.display())
}

/// Describe what happened to a file, after its name.
fn describe_action(path: &Path, action: &Action) -> String {
    match action {
        Action::Converted {
            target,
            removed_original,
        } => {
            let mut line = format!(" -> {} (converted)", display_name(target));
            if *removed_original {
                line.push_str(" (old file deleted)");
            }
            line
        }
        Action::Renamed { target } => format!(" -> {} (renamed)", display_name(target)),
        Action::Resized {
            target,
            width,
            height,
        } => {
            if target == path {
                format!(" (resized to {width}x{height})")
            } else {
                format!(" -> {} (resized to {width}x{height})", display_name(target))
            }
        }
        Action::CornersRounded => " (corners rounded)".to_string(),
    }
}

/// One line per walked entry, indented by depth.
///
/// ```text
///     [holiday]
///         beach.jpg -> beach.png (converted) (old file deleted)
/// ```
pub fn format_walk_event(event: &WalkEvent<'_>) -> String {
    match event {
        WalkEvent::Directory { path, depth } => {
            format!("{}[{}]", indent(*depth), display_name(path))
        }
        WalkEvent::File {
            path,
            depth,
            action,
        } => {
            let detail = action
                .map(|a| describe_action(path, a))
                .unwrap_or_default();
            format!("{}{}{}", indent(*depth), display_name(path), detail)
        }
    }
}

/// `Converted 2 of 5 files in 3 directories`
pub fn format_summary(kind: TransformKind, summary: &WalkSummary) -> String {
    let mut line = format!(
        "{} {} of {}",
        past_tense(kind),
        summary.changed,
        count(summary.files, "file", "files")
    );
    if summary.directories > 0 {
        let directories = count(summary.directories, "directory", "directories");
        line.push_str(&format!(" in {directories}"));
    }
    line
}

/// Lines for one run event.
pub fn format_run_event(event: &RunEvent<'_>) -> Vec<String> {
    match event {
        RunEvent::Started { kind, root } => vec![format_stage_header(*kind, root)],
        RunEvent::Walk(walk_event) => vec![format_walk_event(walk_event)],
        RunEvent::Finished { kind, summary } => vec![format_summary(*kind, summary)],
    }
}

pub fn print_run_event(event: &RunEvent<'_>) {
    for line in format_run_event(event) {
        println!("{}", line);
    }
}
