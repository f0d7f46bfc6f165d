use crate::constants::MAX_PIXELS;
use crate::errors::EditError;
use crate::transform::params::RectSpec;

/// 座標フィールドを解析する
///
/// 浮動小数点として解釈した後、0 方向に切り捨てて整数にする。
/// 未指定・非数値・非有限値はエラー
pub fn parse_coordinate(name: &str, value: Option<&str>) -> Result<i64, EditError> {
    let raw = value.ok_or_else(|| EditError::InvalidParams(format!("{name} is missing")))?;

    let parsed: f64 = raw
        .trim()
        .parse()
        .map_err(|_| EditError::InvalidParams(format!("{name} is not a number: {raw:?}")))?;

    if !parsed.is_finite() {
        return Err(EditError::InvalidParams(format!(
            "{name} must be finite, got {raw:?}"
        )));
    }

    // f64 -> i64 の as 変換は切り捨て（範囲外は飽和）
    Ok(parsed.trunc() as i64)
}

/// x, y, w, h の 4 フィールドから矩形指定を作成する
pub fn parse_rect(
    x: Option<&str>,
    y: Option<&str>,
    w: Option<&str>,
    h: Option<&str>,
) -> Result<RectSpec, EditError> {
    Ok(RectSpec::new(
        parse_coordinate("x", x)?,
        parse_coordinate("y", y)?,
        parse_coordinate("w", w)?,
        parse_coordinate("h", h)?,
    ))
}

/// ソース画像の総ピクセル数を検証し、メモリ枯渇を防ぐ
pub fn validate_source_dimensions(width: u32, height: u32) -> Result<(), EditError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(EditError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_truncates() {
        assert_eq!(parse_coordinate("x", Some("10")).unwrap(), 10);
        assert_eq!(parse_coordinate("x", Some("10.9")).unwrap(), 10);
        assert_eq!(parse_coordinate("x", Some(" 42.0 ")).unwrap(), 42);
        // 0 方向への切り捨て
        assert_eq!(parse_coordinate("x", Some("-3.7")).unwrap(), -3);
        assert_eq!(parse_coordinate("x", Some("1e2")).unwrap(), 100);
    }

    #[test]
    fn test_parse_coordinate_invalid() {
        assert!(parse_coordinate("x", None).is_err());
        assert!(parse_coordinate("x", Some("")).is_err());
        assert!(parse_coordinate("x", Some("abc")).is_err());
        assert!(parse_coordinate("x", Some("inf")).is_err());
        assert!(parse_coordinate("x", Some("NaN")).is_err());
    }

    #[test]
    fn test_parse_rect() {
        let rect = parse_rect(Some("10"), Some("20.5"), Some("30"), Some("40")).unwrap();
        assert_eq!(rect, RectSpec::new(10, 20, 30, 40));

        let result = parse_rect(Some("10"), Some("20"), None, Some("40"));
        match result.unwrap_err() {
            EditError::InvalidParams(msg) => assert!(msg.contains('w')),
            _ => panic!("expected InvalidParams error"),
        }
    }

    #[test]
    fn test_validate_source_dimensions() {
        assert!(validate_source_dimensions(4000, 3000).is_ok());
        assert!(validate_source_dimensions(20000, 20000).is_err());
    }
}
