pub mod constants;
pub mod errors;
pub mod ops;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{DILATE_KERNEL_SIZE, INPAINT_RADIUS, MASK_THRESHOLD, MAX_PIXELS, MOSAIC_SCALE};
pub use errors::EditError;
pub use ops::{ImageOps, Interpolation, StandardOps};
pub use transform::{
    Action, Orientation, PNG_DATA_URL_PREFIX, RectSpec, Region, apply_mosaic, composite,
    decode_image, decode_mask, encode_data_url, encode_png, mask_from_image, pixelate,
    read_orientation, rect_mask, resize_image, scaled_dimensions, selected_pixels, to_data_url,
};
pub use validation::{parse_coordinate, parse_rect, validate_source_dimensions};
