//! Ordered transform pipeline
//!
//! Stages always run in the same order: brightness, contrast, blur,
//! grayscale, edge. A stage is present only when its parameter is not
//! neutral, and each stage consumes the previous stage's output.

use crate::params::TransformParams;
use crate::raster::Raster;
use crate::transform::{normalize_kernel_size, RasterTransforms};

/// A single enabled transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformStage {
    Brightness(i32),
    Contrast(f32),
    /// Odd kernel size greater than 1.
    Blur(u32),
    Grayscale,
    Edge,
}

impl TransformStage {
    pub fn name(&self) -> &'static str {
        match self {
            TransformStage::Brightness(_) => "brightness",
            TransformStage::Contrast(_) => "contrast",
            TransformStage::Blur(_) => "blur",
            TransformStage::Grayscale => "grayscale",
            TransformStage::Edge => "edge",
        }
    }

    pub fn apply(&self, raster: &Raster) -> Raster {
        match *self {
            TransformStage::Brightness(delta) => RasterTransforms::brightness(raster, delta),
            TransformStage::Contrast(factor) => RasterTransforms::contrast(raster, factor),
            TransformStage::Blur(size) => {
                RasterTransforms::blur(raster, i32::try_from(size).unwrap_or(i32::MAX))
            }
            TransformStage::Grayscale => RasterTransforms::grayscale(raster, true),
            TransformStage::Edge => RasterTransforms::edges(raster, true),
        }
    }
}

/// Transform pipeline built from request parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformPipeline {
    stages: Vec<TransformStage>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add a stage at the end of the pipeline
    fn push(&mut self, stage: TransformStage) {
        self.stages.push(stage);
    }

    pub fn from_params(params: &TransformParams) -> Self {
        let mut pipeline = Self::new();

        if params.brightness != 0 {
            pipeline.push(TransformStage::Brightness(params.brightness));
        }
        if params.contrast != 1.0 {
            pipeline.push(TransformStage::Contrast(params.contrast));
        }
        if params.blur > 1 {
            pipeline.push(TransformStage::Blur(normalize_kernel_size(params.blur)));
        }
        if params.grayscale {
            pipeline.push(TransformStage::Grayscale);
        }
        if params.edge {
            pipeline.push(TransformStage::Edge);
        }

        pipeline
    }

    pub fn stages(&self) -> &[TransformStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage left to right. The input is left untouched.
    pub fn run(&self, input: &Raster) -> Raster {
        let mut current = input.clone();
        for stage in &self.stages {
            tracing::debug!(
                stage = stage.name(),
                channels = current.channels(),
                "Applying transform stage"
            );
            current = stage.apply(&current);
        }
        current
    }
}
