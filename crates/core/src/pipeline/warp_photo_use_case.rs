use std::path::Path;
use std::time::Instant;

use crate::imaging::domain::photo_reader::PhotoReader;
use crate::imaging::domain::photo_writer::PhotoWriter;
use crate::landmarks::domain::face::Face;
use crate::landmarks::domain::landmark_detector::LandmarkDetector;
use crate::shared::photo::Photo;

use super::compose_error::ComposeError;
use super::feature_scales::FeatureScales;
use super::pipeline_logger::PipelineLogger;
use super::warp_compositor::{WarpCompositor, WarpStep};

/// Single-photo pipeline: read → detect → compose → write.
///
/// Nothing is written when any stage fails.
pub struct WarpPhotoUseCase {
    reader: Box<dyn PhotoReader>,
    writer: Box<dyn PhotoWriter>,
    detector: Box<dyn LandmarkDetector>,
    compositor: WarpCompositor,
    logger: Box<dyn PipelineLogger>,
    output_size: Option<(u32, u32)>,
}

impl WarpPhotoUseCase {
    pub fn new(
        reader: Box<dyn PhotoReader>,
        writer: Box<dyn PhotoWriter>,
        detector: Box<dyn LandmarkDetector>,
        compositor: WarpCompositor,
        logger: Box<dyn PipelineLogger>,
        output_size: Option<(u32, u32)>,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            compositor,
            logger,
            output_size,
        }
    }

    /// Warps the photo at `input_path` and writes the result to `output_path`.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
        scales: &FeatureScales,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (photo, faces) = self.read_and_detect(input_path)?;

        let start = Instant::now();
        let rendered = self.compositor.compose(&photo, &faces, scales)?;
        self.logger.timing("compose", elapsed_ms(start));

        let start = Instant::now();
        self.writer.write(output_path, &rendered, self.output_size)?;
        self.logger.timing("write", elapsed_ms(start));

        self.logger
            .info(&format!("Output written to {}", output_path.display()));
        self.logger.summary();
        Ok(())
    }

    /// Reads and detects, then returns the warp steps `execute` would run.
    pub fn plan(
        &mut self,
        input_path: &Path,
        scales: &FeatureScales,
    ) -> Result<Vec<WarpStep>, Box<dyn std::error::Error>> {
        let (photo, faces) = self.read_and_detect(input_path)?;
        let steps = self.compositor.plan(&faces, photo.extent(), scales)?;
        self.logger.metric("warp_steps", steps.len() as f64);
        Ok(steps)
    }

    fn read_and_detect(
        &mut self,
        input_path: &Path,
    ) -> Result<(Photo, Vec<Face>), Box<dyn std::error::Error>> {
        let start = Instant::now();
        let photo = self.reader.read(input_path)?;
        self.logger.timing("read", elapsed_ms(start));

        let start = Instant::now();
        let faces = self
            .detector
            .detect(&photo)
            .map_err(|e| ComposeError::DetectorFailure(e.to_string()))?;
        self.logger.timing("detect", elapsed_ms(start));
        self.logger.metric("faces", faces.len() as f64);

        Ok((photo, faces))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
