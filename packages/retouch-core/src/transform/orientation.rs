use image::DynamicImage;

/// EXIF Orientation タグの値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// タグ値から Orientation を作成（範囲外は None）
    pub fn from_tag(value: u32) -> Option<Self> {
        let orientation = match value {
            1 => Self::Normal,
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => return None,
        };
        Some(orientation)
    }

    /// 表示上の向きになるよう画像を回転・反転させる
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Normal => img,
            Self::FlipHorizontal => img.fliph(),
            Self::Rotate180 => img.rotate180(),
            Self::FlipVertical => img.flipv(),
            Self::Transpose => img.rotate90().fliph(),
            Self::Rotate90 => img.rotate90(),
            Self::Transverse => img.rotate270().fliph(),
            Self::Rotate270 => img.rotate270(),
        }
    }
}

/// バイト列から EXIF Orientation タグを読み取る
///
/// EXIF を持たない形式や読み取り失敗時は None
pub fn read_orientation(data: &[u8]) -> Option<Orientation> {
    let mut cursor = std::io::Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;

    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    Orientation::from_tag(field.value.get_uint(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_tag() {
        assert_eq!(Orientation::from_tag(1), Some(Orientation::Normal));
        assert_eq!(Orientation::from_tag(6), Some(Orientation::Rotate90));
        assert_eq!(Orientation::from_tag(8), Some(Orientation::Rotate270));
        assert_eq!(Orientation::from_tag(0), None);
        assert_eq!(Orientation::from_tag(9), None);
    }

    #[test]
    fn test_apply_dimensions_per_tag() {
        // 5〜8 は 90 度回転を含むので幅と高さが入れ替わる
        let expected = [
            (1, (10, 20)),
            (2, (10, 20)),
            (3, (10, 20)),
            (4, (10, 20)),
            (5, (20, 10)),
            (6, (20, 10)),
            (7, (20, 10)),
            (8, (20, 10)),
        ];
        for (tag, dims) in expected {
            let orientation = Orientation::from_tag(tag).unwrap();
            let result = orientation.apply(DynamicImage::new_rgb8(10, 20));
            assert_eq!((result.width(), result.height()), dims, "tag {tag}");
        }
    }

    #[test]
    fn test_read_orientation_without_exif() {
        // EXIF を含まない PNG
        let mut buf = std::io::Cursor::new(Vec::new());
        DynamicImage::new_rgb8(4, 4)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        assert_eq!(read_orientation(buf.get_ref()), None);
        assert_eq!(read_orientation(b"not an image"), None);
    }
}
