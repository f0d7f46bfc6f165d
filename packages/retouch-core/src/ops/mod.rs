//! 画素処理の呼び出し口
//!
//! 編集フローはこのトレイト越しにのみ画素処理を呼び出す。
//! テストでは差し替え可能で、実装は [`StandardOps`] が標準。

use image::{DynamicImage, GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use inpaint::prelude::*;

use crate::errors::EditError;
use crate::transform::resize::resize_image;

/// リサイズ時の補間方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    Bilinear,
}

/// 編集に必要な画素処理
pub trait ImageOps: Send + Sync {
    /// マスクが非 0 の画素を周囲から補完する
    fn inpaint(
        &self,
        image: &RgbImage,
        mask: &GrayImage,
        radius: u32,
    ) -> Result<RgbImage, EditError>;

    /// 画像を指定サイズにリサイズする（チャンネル構成は保持）
    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        method: Interpolation,
    ) -> Result<DynamicImage, EditError>;

    /// `level` より大きい画素を 255、それ以外を 0 にする
    fn threshold(&self, plane: &GrayImage, level: u8) -> GrayImage;

    /// 一辺 `kernel_size` の正方形構造要素で 1 回膨張する
    fn dilate(&self, mask: &GrayImage, kernel_size: u8) -> GrayImage;
}

/// fast_image_resize / imageproc / inpaint（Telea 法）による標準実装
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOps;

impl ImageOps for StandardOps {
    fn inpaint(
        &self,
        image: &RgbImage,
        mask: &GrayImage,
        radius: u32,
    ) -> Result<RgbImage, EditError> {
        if image.dimensions() != mask.dimensions() {
            return Err(EditError::ProcessingFailed(format!(
                "mask size {}x{} does not match image size {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }

        let mut out = image.clone();
        if mask.as_raw().iter().all(|&v| v == 0) {
            return Ok(out);
        }

        out.telea_inpaint(mask, radius as i32)
            .map_err(|e| EditError::ProcessingFailed(format!("inpaint failed: {e}")))?;
        Ok(out)
    }

    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        method: Interpolation,
    ) -> Result<DynamicImage, EditError> {
        resize_image(image, width, height, method)
    }

    fn threshold(&self, plane: &GrayImage, level: u8) -> GrayImage {
        let mut out = plane.clone();
        for pixel in out.pixels_mut() {
            *pixel = if pixel[0] > level { Luma([255]) } else { Luma([0]) };
        }
        out
    }

    fn dilate(&self, mask: &GrayImage, kernel_size: u8) -> GrayImage {
        // L∞ ノルムで半径 k の膨張 = (2k+1)x(2k+1) の全1カーネル
        let k = kernel_size / 2;
        if k == 0 {
            return mask.clone();
        }
        imageproc::morphology::dilate(mask, Norm::LInf, k)
    }
}
