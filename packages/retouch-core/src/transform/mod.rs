pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod mask;
pub mod mosaic;
pub mod orientation;
pub mod params;
pub mod resize;

pub use decode::{decode_image, decode_mask};
pub use dimensions::scaled_dimensions;
pub use encode::{PNG_DATA_URL_PREFIX, encode_data_url, encode_png, to_data_url};
pub use mask::{mask_from_image, rect_mask, selected_pixels};
pub use mosaic::{apply_mosaic, composite, pixelate};
pub use orientation::{Orientation, read_orientation};
pub use params::{Action, RectSpec, Region};
pub use resize::resize_image;
