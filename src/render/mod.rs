//! The renderer boundary.
//!
//! Rendering pixels is out of scope for the core; everything downstream of
//! a [`DashboardFrame`] is an external collaborator behind the [`Renderer`]
//! trait. The JSON renderer ships as the reference implementation of the
//! contract and backs the CLI's headless mode.

use crate::core::error::Result;
use crate::dashboard::DashboardFrame;
use std::io::Write;

/// Consumes composed frames. Implementations own all drawing technology
/// choices; the core only promises the declarative frame structure.
pub trait Renderer {
    fn render(&mut self, frame: &DashboardFrame) -> Result<()>;
}

/// Writes each frame as a pretty-printed JSON document.
pub struct JsonRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        JsonRenderer { writer }
    }

    /// Consumes the renderer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &DashboardFrame) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Logs a one-line frame summary. Useful when the frames themselves are
/// not wanted on stdout.
#[derive(Debug, Default)]
pub struct SummaryRenderer {
    frames: u64,
}

impl SummaryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for SummaryRenderer {
    fn render(&mut self, frame: &DashboardFrame) -> Result<()> {
        self.frames += 1;
        tracing::info!(
            frame = self.frames,
            generated_at = %frame.generated_at,
            failed_panels = frame.failed_panels(),
            pipelines = frame.pipelines.as_ready().map_or(0, Vec::len),
            "rendered frame"
        );
        Ok(())
    }
}
