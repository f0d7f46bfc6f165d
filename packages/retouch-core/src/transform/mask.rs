use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::constants::{DILATE_KERNEL_SIZE, MASK_THRESHOLD};
use crate::errors::EditError;
use crate::ops::{ImageOps, Interpolation};
use crate::transform::params::RectSpec;

/// 矩形指定からマスクを作成する
///
/// 画像範囲外の部分は切り捨てる。範囲と重ならなければ全て 0
pub fn rect_mask(width: u32, height: u32, rect: &RectSpec) -> GrayImage {
    let mut mask = GrayImage::new(width, height);

    if let Some((x0, y0, x1, y1)) = rect.clip_to(width, height) {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0),
            Luma([255]),
        );
    }

    mask
}

/// マスク画像から二値化の対象となるプレーンを取り出す
///
/// アルファを持つ場合はアルファ、持たない場合は BT.601 の輝度（四捨五入）
fn source_plane(mask: &DynamicImage) -> GrayImage {
    if mask.color().has_alpha() {
        let gray_alpha = mask.to_luma_alpha8();
        GrayImage::from_fn(gray_alpha.width(), gray_alpha.height(), |x, y| {
            Luma([gray_alpha.get_pixel(x, y)[1]])
        })
    } else {
        let rgb = mask.to_rgb8();
        GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
            let [r, g, b] = rgb.get_pixel(x, y).0.map(u32::from);
            Luma([((299 * r + 587 * g + 114 * b + 500) / 1000) as u8])
        })
    }
}

/// アップロードされたマスク画像から二値マスクを作成する
///
/// 1. アルファ（なければグレースケール）を取り出す
/// 2. サイズが異なる場合は最近傍補間で画像サイズに合わせる
/// 3. 0 より大きい画素を 255 にする
/// 4. 5x5 カーネルで 1 回膨張し、ブラシの縁の取りこぼしを防ぐ
pub fn mask_from_image(
    ops: &dyn ImageOps,
    mask: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<GrayImage, EditError> {
    let mut plane = source_plane(mask);

    if plane.dimensions() != (width, height) {
        tracing::debug!(
            mask_w = plane.width(),
            mask_h = plane.height(),
            width,
            height,
            "resizing mask to image size"
        );
        plane = ops
            .resize(
                &DynamicImage::ImageLuma8(plane),
                width,
                height,
                Interpolation::Nearest,
            )?
            .to_luma8();
    }

    let binary = ops.threshold(&plane, MASK_THRESHOLD);
    Ok(ops.dilate(&binary, DILATE_KERNEL_SIZE))
}

/// マスク内の選択画素数
pub fn selected_pixels(mask: &GrayImage) -> usize {
    mask.as_raw().iter().filter(|&&v| v != 0).count()
}
