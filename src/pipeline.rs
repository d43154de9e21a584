//! Running the selected transforms over a tree.
//!
//! A run is described by a [`RunPlan`]: the operations to perform plus every
//! parameter they need, already validated. [`run`] performs one full walk per
//! selected operation, always in the order convert, rename, resize, round
//! corners, so later transforms see the files earlier ones produced (a JPEG
//! converted to PNG can then have its corners rounded).
//!
//! The plan is plain data. Nothing in here prompts or reads flags; the CLI
//! builds the plan from [`ManagerConfig`] and passes it in.

use crate::classify::ensure_valid_root;
use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::imaging::{CornerRadius, ImageCodec, ResizeSpec};
use crate::naming::NamingRules;
use crate::transform::{
    ConvertTransform, FileTransform, RenameTransform, ResizeTransform, RoundCornerTransform,
    TransformKind,
};
use crate::walk::{WalkEvent, WalkSummary, walk};
use std::path::Path;
use tracing::info;

/// Which transforms a run performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operations {
    pub convert: bool,
    pub rename: bool,
    pub resize: bool,
    pub round_corners: bool,
}

impl Operations {
    pub fn any(&self) -> bool {
        self.convert || self.rename || self.resize || self.round_corners
    }

    /// Selected transforms in execution order.
    pub fn kinds(&self) -> Vec<TransformKind> {
        TransformKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                TransformKind::Convert => self.convert,
                TransformKind::Rename => self.rename,
                TransformKind::Resize => self.resize,
                TransformKind::RoundCorners => self.round_corners,
            })
            .collect()
    }
}

/// Everything a run needs, resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub operations: Operations,
    pub keep_originals: bool,
    pub naming: NamingRules,
    pub sanitize_on_convert: bool,
    /// Required when resizing.
    pub resize: Option<ResizeSpec>,
    pub resize_suffix: String,
    /// Required when rounding corners.
    pub corner_radius: Option<CornerRadius>,
}

impl RunPlan {
    /// Build a plan for `operations` from a validated config.
    ///
    /// Resize parameters are only required when resizing is selected; asking
    /// for a resize without a ratio, width or height is an
    /// [`Error::InvalidArgument`].
    ///
    /// Converting while keeping originals and rounding corners in the same run
    /// is rejected too: the kept JPEGs would reach the corner walk and fail it,
    /// after the tree had already been converted.
    pub fn from_config(config: &ManagerConfig, operations: Operations) -> Result<Self> {
        if operations.convert && operations.round_corners && config.keep_originals {
            return Err(Error::invalid_argument(
                "cannot round corners while keeping converted JPEG originals \
                 (JPEG has no alpha channel)",
            ));
        }
        let resize = if operations.resize {
            let r = &config.resize;
            Some(ResizeSpec::from_parts(r.ratio, r.width, r.height)?)
        } else {
            None
        };
        let corner_radius = if operations.round_corners {
            Some(CornerRadius::new(config.corners.radius)?)
        } else {
            None
        };

        Ok(Self {
            operations,
            keep_originals: config.keep_originals,
            naming: config.naming.rules(),
            sanitize_on_convert: config.convert.sanitize_names,
            resize,
            resize_suffix: config.resize.suffix.clone(),
            corner_radius,
        })
    }

    fn transform<'a, C: ImageCodec>(
        &self,
        kind: TransformKind,
        codec: &'a C,
    ) -> Result<Box<dyn FileTransform + 'a>> {
        Ok(match kind {
            TransformKind::Convert => {
                let convert = ConvertTransform::new(codec, self.keep_originals);
                if self.sanitize_on_convert {
                    Box::new(convert.with_sanitized_names(self.naming.clone()))
                } else {
                    Box::new(convert)
                }
            }
            TransformKind::Rename => Box::new(RenameTransform::new(self.naming.clone())),
            TransformKind::Resize => {
                let spec = self
                    .resize
                    .ok_or_else(|| Error::invalid_argument("resize requires a ratio, width or height"))?;
                Box::new(
                    ResizeTransform::new(codec, spec, self.keep_originals)
                        .with_suffix(self.resize_suffix.clone()),
                )
            }
            TransformKind::RoundCorners => {
                let radius = self
                    .corner_radius
                    .ok_or_else(|| Error::invalid_argument("corner rounding requires a radius"))?;
                Box::new(RoundCornerTransform::new(codec, radius))
            }
        })
    }
}

/// Progress of a run, in the order it happens.
#[derive(Debug)]
pub enum RunEvent<'a> {
    Started { kind: TransformKind, root: &'a Path },
    Walk(WalkEvent<'a>),
    Finished {
        kind: TransformKind,
        summary: WalkSummary,
    },
}

/// Perform every operation of `plan` on the tree at `root`.
///
/// Returns one summary per performed transform. The first error aborts the
/// run: the current walk stops and later transforms do not start.
pub fn run<C: ImageCodec>(
    root: &Path,
    plan: &RunPlan,
    codec: &C,
    mut on_event: impl FnMut(RunEvent<'_>),
) -> Result<Vec<(TransformKind, WalkSummary)>> {
    ensure_valid_root(root)?;

    let kinds = plan.operations.kinds();
    if kinds.is_empty() {
        return Err(Error::invalid_argument("no operation selected"));
    }

    let mut summaries = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let transform = plan.transform(kind, codec)?;
        info!(transform = %kind, root = %root.display(), "starting");
        on_event(RunEvent::Started { kind, root });

        let summary = walk(root, transform.as_ref(), |event| {
            on_event(RunEvent::Walk(event))
        })?;

        info!(
            transform = %kind,
            files = summary.files,
            changed = summary.changed,
            "finished"
        );
        on_event(RunEvent::Finished { kind, summary });
        summaries.push((kind, summary));
    }
    Ok(summaries)
}
