//! Upload decoding and model-input normalization

use image::RgbImage;
use image::imageops::FilterType;
use ndarray::Array4;

use crate::model::INPUT_SIZE;

use super::types::{NORM_EPSILON, PipelineError};

/// Decode arbitrary upload bytes into a 256x256 RGB image.
///
/// This is the 8-bit display copy; the model input is derived from it
/// separately by [`normalize`].
pub fn decode_upload(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PipelineError::InvalidImage(e.to_string()))?;

    let rgb = img.to_rgb8();
    if rgb.dimensions() == (INPUT_SIZE, INPUT_SIZE) {
        return Ok(rgb);
    }

    Ok(image::imageops::resize(
        &rgb,
        INPUT_SIZE,
        INPUT_SIZE,
        FilterType::Triangle,
    ))
}

/// Normalize an image for model input: scale to [0,1], then standardize
/// per-image (subtract mean, divide by std + epsilon). Output shape is
/// [1, 256, 256, 3] (NHWC), the fixed contract both models were trained with.
pub fn normalize(image: &RgbImage) -> Array4<f32> {
    let side = INPUT_SIZE as usize;
    let mut batch = Array4::<f32>::zeros((1, side, side, 3));

    for (x, y, pixel) in image.enumerate_pixels() {
        for c in 0..3 {
            batch[[0, y as usize, x as usize, c]] = pixel.0[c] as f32 / 255.0;
        }
    }

    let n = (side * side * 3) as f32;
    let mean = batch.iter().sum::<f32>() / n;
    let variance = batch.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    let std = variance.sqrt();

    batch.mapv_inplace(|v| (v - mean) / (std + NORM_EPSILON));
    batch
}
