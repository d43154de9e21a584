//! # Image Manager
//!
//! Batch maintenance for a directory tree of pictures. Point it at a folder
//! and it walks every file below it, applying one or more transforms:
//!
//! - **convert** JPEG files to PNG, optionally deleting the originals,
//! - **rename** files to sanitized, identifier-like names,
//! - **resize** images by ratio or to a fixed width and/or height,
//! - **round corners** of images that have an alpha channel.
//!
//! # Architecture
//!
//! ```text
//! config  ──►  pipeline::RunPlan  ──►  pipeline::run
//!                                        │  one walk per selected transform
//!                                        ▼
//!                         walk::walk  ──►  FileTransform::apply  ──►  imaging
//! ```
//!
//! The walker knows nothing about images and the transforms know nothing
//! about recursion. Each transform is a [`transform::FileTransform`] strategy
//! that decides per file whether to act, and reports what it did as an
//! [`transform::Action`]. All pixel work goes through the
//! [`imaging::ImageCodec`] trait so transforms can be tested against a
//! recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | `FileEntry`, JPEG sniffing by the `JFIF` marker, image formats by extension |
//! | [`naming`] | Sanitized-name rules and collision-free target paths |
//! | [`walk`] | Snapshot-then-transform depth-first traversal |
//! | [`transform`] | The four per-file transforms |
//! | [`imaging`] | Codec trait, `image`-crate backend, resize maths, corner masks |
//! | [`pipeline`] | Turns a config into a run plan and runs it |
//! | [`config`] | TOML config: stock defaults, file overlay, validation |
//! | [`output`] | Tree-style CLI output |
//! | [`error`] | Crate-wide error type |
//!
//! # Design Decisions
//!
//! ## Content Sniffing for JPEG
//!
//! A file is treated as a JPEG when the bytes before its first newline contain
//! `JFIF`. Extensions lie (camera exports named `.JPG`, `.jpeg`, or nothing at
//! all), so conversion looks at the content. Resize and corner rounding only
//! need to know what to *encode back* to, so they go by extension.
//!
//! ## Fail Fast
//!
//! The first error aborts the run. A half-processed tree is easier to reason
//! about than one where some unknown subset of files failed. Within one file,
//! the new file is always written before the old one is deleted.

pub mod classify;
pub mod config;
pub mod error;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod transform;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
