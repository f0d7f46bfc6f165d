use std::io::Cursor;

use image::{DynamicImage, ImageReader, RgbImage};

use crate::errors::EditError;
use crate::transform::orientation::read_orientation;
use crate::validation::validate_source_dimensions;

fn guessed_reader<'a>(
    data: &'a [u8],
    what: &str,
) -> Result<ImageReader<Cursor<&'a [u8]>>, EditError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| EditError::Decode(format!("failed to guess {what} format: {e}")))?;

    if reader.format().is_none() {
        return Err(EditError::Decode(format!("unrecognized {what} format")));
    }
    Ok(reader)
}

/// アップロードされたバイト列をデコードする（フォーマットは内容から推測）
///
/// 画素数の上限はヘッダーから読んだサイズで、本体のデコード前に確認する
fn decode_dynamic(data: &[u8], what: &str) -> Result<DynamicImage, EditError> {
    if data.is_empty() {
        return Err(EditError::Decode(format!("{what} is empty")));
    }

    let (width, height) = guessed_reader(data, what)?
        .into_dimensions()
        .map_err(|e| EditError::Decode(format!("{what} header read failed: {e}")))?;
    validate_source_dimensions(width, height)?;

    guessed_reader(data, what)?
        .decode()
        .map_err(|e| EditError::Decode(format!("{what} decode failed: {e}")))
}

/// ソース画像をカラー (RGB8) でデコードする
///
/// 元のチャンネル数に関係なく 3 チャンネルにする（アルファは合成せず破棄）。
/// EXIF Orientation がある場合は表示上の向きに補正する
pub fn decode_image(data: &[u8]) -> Result<RgbImage, EditError> {
    let img = decode_dynamic(data, "image")?;

    let img = match read_orientation(data) {
        Some(orientation) => orientation.apply(img),
        None => img,
    };

    Ok(img.to_rgb8())
}

/// マスク画像をデコードする（アルファチャンネルを保持、向き補正なし）
pub fn decode_mask(data: &[u8]) -> Result<DynamicImage, EditError> {
    decode_dynamic(data, "mask")
}
