use image::{DynamicImage, GrayImage, RgbImage};

use crate::constants::MOSAIC_SCALE;
use crate::errors::EditError;
use crate::ops::{ImageOps, Interpolation};
use crate::transform::dimensions::scaled_dimensions;

/// 画像全体をピクセル化する
///
/// バイリニアで縮小した後、最近傍補間で元のサイズに戻す
pub fn pixelate(ops: &dyn ImageOps, img: &RgbImage, scale: f64) -> Result<RgbImage, EditError> {
    let (width, height) = img.dimensions();
    let (small_w, small_h) = scaled_dimensions(width, height, scale);

    let source = DynamicImage::ImageRgb8(img.clone());
    let small = ops.resize(&source, small_w, small_h, Interpolation::Bilinear)?;
    let restored = ops.resize(&small, width, height, Interpolation::Nearest)?;

    Ok(restored.to_rgb8())
}

/// マスクが非 0 の画素だけ `effect` の画素に差し替える
pub fn composite(
    original: &RgbImage,
    effect: &RgbImage,
    mask: &GrayImage,
) -> Result<RgbImage, EditError> {
    if original.dimensions() != effect.dimensions() || original.dimensions() != mask.dimensions()
    {
        return Err(EditError::ProcessingFailed(
            "composite inputs differ in size".to_string(),
        ));
    }

    let mut out = original.clone();
    for ((pixel, effect_pixel), m) in out
        .pixels_mut()
        .zip(effect.pixels())
        .zip(mask.as_raw().iter())
    {
        if *m != 0 {
            *pixel = *effect_pixel;
        }
    }

    Ok(out)
}

/// マスク領域にモザイクを掛ける
pub fn apply_mosaic(
    ops: &dyn ImageOps,
    img: &RgbImage,
    mask: &GrayImage,
) -> Result<RgbImage, EditError> {
    let pixelated = pixelate(ops, img, MOSAIC_SCALE)?;
    composite(img, &pixelated, mask)
}
