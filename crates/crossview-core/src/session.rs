//! The editing session: one source, one set of slider values, one composite.
//!
//! Every UI handler goes through a [`Session`]. Operations build their new
//! buffers to completion before swapping them in, and a failed operation
//! leaves the session exactly as it was.
//!
//! ## States
//! ```text
//! NoImage --load ok--> Ready(composite)
//! Ready   --parameters changed--> Ready(new composite)
//! Ready   --save--> Ready (unchanged)
//! any     --load fails--> unchanged
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument};

use crate::composite::{CompositeImage, MAX_CANVAS_PIXELS};
use crate::decode::{decode_image, load_image, DecodeError, DecodedImage};
use crate::export::{save_composite, ExportError};
use crate::pipeline::{render_composite_within, PipelineError};
use crate::preview::render_preview;
use crate::{ChannelOffsets, CompositeParameters, Side};

/// Everything that can go wrong in a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The selected file could not be read or decoded.
    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    /// The composite could not be built.
    #[error("Failed to process image: {0}")]
    Pipeline(#[from] PipelineError),

    /// The composite could not be written.
    #[error("Failed to save image: {0}")]
    Export(#[from] ExportError),

    /// Save was requested before any composite existed.
    #[error("No image to save")]
    NothingToSave,
}

/// Owner of the current source image, slider state and composite.
#[derive(Debug)]
pub struct Session {
    source: Option<DecodedImage>,
    source_path: Option<PathBuf>,
    params: CompositeParameters,
    composite: Option<CompositeImage>,
    revision: u64,
    max_canvas_pixels: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_canvas_limit(MAX_CANVAS_PIXELS)
    }
}

impl Session {
    /// Create an empty session with default slider values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session whose composites may not exceed `max_pixels`.
    pub fn with_canvas_limit(max_pixels: u64) -> Self {
        Self {
            source: None,
            source_path: None,
            params: CompositeParameters::default(),
            composite: None,
            revision: 0,
            max_canvas_pixels: max_pixels,
        }
    }

    fn render(
        &self,
        source: &DecodedImage,
        params: &CompositeParameters,
    ) -> Result<CompositeImage, PipelineError> {
        render_composite_within(source, params, self.max_canvas_pixels)
    }

    /// Load a file from disk and rebuild the composite.
    ///
    /// On failure the previous source and composite are kept.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let source = load_image(path)?;
        self.replace_source(source, Some(path.to_path_buf()))
    }

    /// Decode in-memory bytes and rebuild the composite.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let source = decode_image(bytes)?;
        self.replace_source(source, None)
    }

    fn replace_source(
        &mut self,
        source: DecodedImage,
        path: Option<PathBuf>,
    ) -> Result<(), SessionError> {
        let composite = self.render(&source, &self.params)?;

        info!(
            width = source.width,
            height = source.height,
            "source image loaded"
        );
        self.source = Some(source);
        self.source_path = path;
        self.publish(composite);
        Ok(())
    }

    /// Replace the whole slider state and rebuild the composite.
    ///
    /// Values are clamped into their slider ranges. Without a source the new
    /// values are stored and nothing is rendered. If rendering fails, the
    /// previous values and composite stay in place.
    pub fn set_parameters(&mut self, params: CompositeParameters) -> Result<(), SessionError> {
        let params = params.clamped();

        if let Some(source) = &self.source {
            let composite = self.render(source, &params)?;
            self.params = params;
            self.publish(composite);
        } else {
            self.params = params;
        }
        Ok(())
    }

    /// Change the gap between the two copies.
    pub fn set_spacing(&mut self, spacing: u32) -> Result<(), SessionError> {
        let mut params = self.params;
        params.spacing = spacing;
        self.set_parameters(params)
    }

    /// Change one side's scale percentage.
    pub fn set_scale(&mut self, side: Side, percent: u8) -> Result<(), SessionError> {
        let mut params = self.params;
        params.side_mut(side).scale_percent = percent;
        self.set_parameters(params)
    }

    /// Change one side's channel offsets.
    pub fn set_offsets(&mut self, side: Side, offsets: ChannelOffsets) -> Result<(), SessionError> {
        let mut params = self.params;
        params.side_mut(side).offsets = offsets;
        self.set_parameters(params)
    }

    /// Rebuild the composite from the current source and parameters.
    ///
    /// Does nothing when no image is loaded.
    pub fn recompute(&mut self) -> Result<(), SessionError> {
        if let Some(source) = &self.source {
            let composite = self.render(source, &self.params)?;
            self.publish(composite);
        }
        Ok(())
    }

    fn publish(&mut self, composite: CompositeImage) {
        self.composite = Some(composite);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Current slider state.
    pub fn parameters(&self) -> &CompositeParameters {
        &self.params
    }

    /// The loaded photograph, if any.
    pub fn source(&self) -> Option<&DecodedImage> {
        self.source.as_ref()
    }

    /// Where the loaded photograph came from, if it was loaded from disk.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The full-resolution composite, if one has been rendered.
    pub fn composite(&self) -> Option<&CompositeImage> {
        self.composite.as_ref()
    }

    /// Bumped every time a new composite replaces the old one.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a save would have something to write.
    pub fn can_save(&self) -> bool {
        self.composite.is_some()
    }

    /// A display-sized copy of the composite.
    pub fn preview(&self) -> Option<CompositeImage> {
        self.composite.as_ref().map(render_preview)
    }

    /// Write the full-resolution composite and return the path written.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<PathBuf, SessionError> {
        let composite = self.composite.as_ref().ok_or(SessionError::NothingToSave)?;
        Ok(save_composite(composite, path)?)
    }
}
