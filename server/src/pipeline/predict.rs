//! The two-stage decision pipeline
//!
//! Classification first; segmentation only when the classifier reports a
//! tumor. Raw model outputs are turned into a cleaned binary mask and an
//! overlay image through fixed, deterministic post-processing.

use std::time::Instant;

use image::{GrayImage, RgbImage};
use metrics::{counter, histogram};
use ndarray::Array2;
use tracing::debug;

use crate::model::ModelGateway;

use super::morphology;
use super::overlay;
use super::prep;
use super::types::{MASK_THRESHOLD, Prediction, PipelineError};

/// Bring a segmentation map into probability space.
///
/// Some exported models emit raw logits instead of sigmoid outputs; if any
/// value falls outside [0, 1] the whole map is passed through a sigmoid.
/// Documented policy carried over from the trained model's serving code.
fn normalize_map(mut map: Array2<f32>) -> Array2<f32> {
    let out_of_range = map.iter().any(|&v| !(0.0..=1.0).contains(&v));
    if out_of_range {
        debug!("Segmentation output outside [0,1], applying sigmoid");
        map.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp()));
    }
    map
}

/// Binarize a probability map at the fixed threshold (inclusive)
fn threshold_map(map: &Array2<f32>) -> GrayImage {
    let (height, width) = map.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        if map[[y as usize, x as usize]] >= MASK_THRESHOLD {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    })
}

/// Run the full pipeline on a decoded 256x256 image.
///
/// Returns the tumor decision, the classifier's tumor probability, and the
/// three images (original, cleaned mask, overlay). The mask is all-zero and
/// the overlay equals the original whenever no tumor is detected or the
/// cleaned mask comes out empty.
pub async fn predict_tumor(
    gateway: &dyn ModelGateway,
    original: RgbImage,
) -> Result<Prediction, PipelineError> {
    counter!("neuroscan_predictions_total").increment(1);
    let start = Instant::now();

    let result = run_pipeline(gateway, original).await;

    histogram!("neuroscan_prediction_duration_seconds").record(start.elapsed());
    if result.is_err() {
        counter!("neuroscan_prediction_errors_total").increment(1);
    }
    result
}

async fn run_pipeline(
    gateway: &dyn ModelGateway,
    original: RgbImage,
) -> Result<Prediction, PipelineError> {
    let input = prep::normalize(&original);

    let classify_start = Instant::now();
    let scores = gateway.classify(input.clone()).await?;
    histogram!("neuroscan_phase_duration_seconds", "phase" => "classify")
        .record(classify_start.elapsed());

    let has_tumor = scores.has_tumor();
    let tumor_probability = scores.tumor_probability();
    debug!(
        has_tumor,
        tumor_probability, "Classification scores: {:?}", scores
    );

    let mut mask = GrayImage::new(original.width(), original.height());

    if has_tumor {
        let segment_start = Instant::now();
        let map = gateway.segment(input).await?;
        histogram!("neuroscan_phase_duration_seconds", "phase" => "segment")
            .record(segment_start.elapsed());

        let post_start = Instant::now();
        let map = normalize_map(map);
        mask = morphology::cleanup(&threshold_map(&map));
        histogram!("neuroscan_phase_duration_seconds", "phase" => "postprocess")
            .record(post_start.elapsed());
    }

    // Empty mask despite a tumor flag leaves the overlay untouched
    let overlay = if has_tumor && mask.pixels().any(|p| p.0[0] > 0) {
        overlay::compose(&original, &mask)
    } else {
        original.clone()
    };

    Ok(Prediction {
        has_tumor,
        tumor_probability,
        original,
        mask,
        overlay,
    })
}
