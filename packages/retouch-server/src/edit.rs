use bytes::Bytes;

use retouch_core::{
    Action, EditError, INPAINT_RADIUS, ImageOps, Region, apply_mosaic, decode_image, decode_mask,
    encode_data_url, mask_from_image, rect_mask, selected_pixels,
};

/// 検証済みの編集リクエスト
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub image: Bytes,
    pub region: Region,
    pub action: Action,
}

/// 編集結果
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    pub selected_pixels: usize,
}

/// 画像をデコードし、マスクを作成してアクションを適用する。
///
/// 結果は PNG の data URL として返す。
pub fn edit(ops: &dyn ImageOps, request: &EditRequest) -> Result<EditOutcome, EditError> {
    let img = decode_image(&request.image)?;
    let (width, height) = img.dimensions();

    let mask = match &request.region {
        Region::Mask(data) => {
            let mask_img = decode_mask(data)?;
            mask_from_image(ops, &mask_img, width, height)?
        }
        Region::Rect(rect) => rect_mask(width, height, rect),
    };
    let selected = selected_pixels(&mask);

    tracing::debug!(
        width,
        height,
        mode = request.region.mode(),
        action = request.action.as_str(),
        selected,
        "mask ready"
    );

    let result = match request.action {
        Action::Mosaic => apply_mosaic(ops, &img, &mask)?,
        Action::Remove => ops.inpaint(&img, &mask, INPAINT_RADIUS)?,
    };

    Ok(EditOutcome {
        data_url: encode_data_url(&result)?,
        width,
        height,
        selected_pixels: selected,
    })
}
