use crate::constants::MAX_PIXELS;
use crate::errors::EditError;
use crate::ops::Interpolation;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

/// 画像をリサイズする
///
/// fast_image_resize を使用する。8bit の Luma / LumaA / RGB / RGBA はそのまま、
/// それ以外は RGB8 または RGBA8 に変換してから処理する。
/// アルファは乗算せず各チャンネル独立に補間する
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
    method: Interpolation,
) -> Result<DynamicImage, EditError> {
    if target_w == 0 || target_h == 0 {
        return Err(EditError::ProcessingFailed(format!(
            "invalid resize target {target_w}x{target_h}"
        )));
    }

    // ピクセル数チェック
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(EditError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let (width, height) = (img.width(), img.height());
    let (pixel_type, buffer) = match img {
        DynamicImage::ImageLuma8(buf) => (PixelType::U8, buf.as_raw().clone()),
        DynamicImage::ImageLumaA8(buf) => (PixelType::U8x2, buf.as_raw().clone()),
        DynamicImage::ImageRgb8(buf) => (PixelType::U8x3, buf.as_raw().clone()),
        DynamicImage::ImageRgba8(buf) => (PixelType::U8x4, buf.as_raw().clone()),
        other if other.color().has_alpha() => (PixelType::U8x4, other.to_rgba8().into_raw()),
        other => (PixelType::U8x3, other.to_rgb8().into_raw()),
    };

    let src_image = Image::from_vec_u8(width, height, buffer, pixel_type).map_err(|e| {
        EditError::ProcessingFailed(format!("failed to create source image: {e}"))
    })?;
    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    let algorithm = match method {
        Interpolation::Nearest => ResizeAlg::Nearest,
        // 縮小時も 2x2 の近傍だけを使う
        Interpolation::Bilinear => ResizeAlg::Interpolation(FilterType::Bilinear),
    };

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(algorithm).use_alpha(false),
        )
        .map_err(|e| EditError::ProcessingFailed(format!("resize failed: {e}")))?;

    let raw = dst_image.into_vec();
    let resized = match pixel_type {
        PixelType::U8 => GrayImage::from_raw(target_w, target_h, raw).map(DynamicImage::ImageLuma8),
        PixelType::U8x2 => {
            GrayAlphaImage::from_raw(target_w, target_h, raw).map(DynamicImage::ImageLumaA8)
        }
        PixelType::U8x4 => RgbaImage::from_raw(target_w, target_h, raw).map(DynamicImage::ImageRgba8),
        _ => RgbImage::from_raw(target_w, target_h, raw).map(DynamicImage::ImageRgb8),
    };

    resized.ok_or_else(|| EditError::ProcessingFailed("failed to convert resized image".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, Rgba};

    #[test]
    fn test_resize_image() {
        let img = DynamicImage::new_rgb8(1000, 1000);
        let resized = resize_image(&img, 50, 50, Interpolation::Bilinear).unwrap();
        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 50);
        assert!(matches!(resized, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_resize_exceeds_max_pixels() {
        let img = DynamicImage::new_rgb8(100, 100);
        let result = resize_image(&img, 100000, 100000, Interpolation::Nearest);

        match result.unwrap_err() {
            EditError::ResolutionTooLarge { width, height } => {
                assert_eq!(width, 100000);
                assert_eq!(height, 100000);
            }
            _ => panic!("expected ResolutionTooLarge error"),
        }
    }

    #[test]
    fn test_resize_zero_target() {
        let img = DynamicImage::new_rgb8(10, 10);
        assert!(resize_image(&img, 0, 10, Interpolation::Nearest).is_err());
    }

    #[test]
    fn test_nearest_upscale_keeps_hard_edges() {
        // 左半分 0、右半分 255 の 2x1 マスクを拡大しても中間値が出ない
        let mask = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
        let resized = resize_image(
            &DynamicImage::ImageLuma8(mask),
            20,
            10,
            Interpolation::Nearest,
        )
        .unwrap()
        .to_luma8();

        assert!(resized.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(resized.get_pixel(0, 0), &Luma([0]));
        assert_eq!(resized.get_pixel(19, 9), &Luma([255]));
    }

    #[test]
    fn test_resize_rgba_keeps_alpha() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        let resized = resize_image(&DynamicImage::ImageRgba8(img), 4, 4, Interpolation::Nearest)
            .unwrap()
            .to_rgba8();
        assert_eq!(resized.get_pixel(2, 2), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_bilinear_downscale_uses_two_taps() {
        // 列が 0,100,100,0 の繰り返し。4 分の 1 に縮小すると各出力画素の中心は
        // 100 の 2 列の間に来るので、2 タップなら周囲の 0 は混ざらない
        let img = GrayImage::from_fn(8, 8, |x, _| {
            Luma([if x % 4 == 1 || x % 4 == 2 { 100 } else { 0 }])
        });
        let resized = resize_image(&DynamicImage::ImageLuma8(img), 2, 2, Interpolation::Bilinear)
            .unwrap()
            .to_luma8();

        for p in resized.pixels() {
            assert!(p[0].abs_diff(100) <= 1, "got {}", p[0]);
        }
    }

    #[test]
    fn test_bilinear_uniform_color_preserved() {
        let img = RgbImage::from_pixel(100, 60, Rgb([200, 100, 50]));
        let resized = resize_image(&DynamicImage::ImageRgb8(img), 5, 3, Interpolation::Bilinear)
            .unwrap()
            .to_rgb8();
        assert!(resized.pixels().all(|p| *p == Rgb([200, 100, 50])));
    }
}
