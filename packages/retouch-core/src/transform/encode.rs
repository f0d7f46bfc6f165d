use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbImage};

use crate::errors::EditError;

/// データ URL の接頭辞
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// 画像を PNG にエンコードする
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, EditError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| EditError::ProcessingFailed(format!("PNG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// PNG バイト列を base64 のデータ URL にする
pub fn to_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// 画像を PNG データ URL にエンコードする
pub fn encode_data_url(img: &RgbImage) -> Result<String, EditError> {
    Ok(to_data_url(&encode_png(img)?))
}
