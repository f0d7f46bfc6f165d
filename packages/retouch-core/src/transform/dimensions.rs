/// 縮小率を適用した寸法を計算する（切り捨て、最小1px）
pub fn scaled_dimensions(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let new_w = (src_w as f64 * scale).floor() as u32;
    let new_h = (src_h as f64 * scale).floor() as u32;

    (new_w.max(1), new_h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(200, 200, 0.05), (10, 10));
        assert_eq!(scaled_dimensions(1920, 1080, 0.05), (96, 54));
        // 切り捨て
        assert_eq!(scaled_dimensions(39, 59, 0.05), (1, 2));
    }

    #[test]
    fn test_scaled_dimensions_minimum() {
        // 最小1pxを保証
        assert_eq!(scaled_dimensions(10, 10, 0.05), (1, 1));
        assert_eq!(scaled_dimensions(1, 1000, 0.05), (1, 50));
    }
}
