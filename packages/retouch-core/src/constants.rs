/// 入力画像の最大ピクセル数（100MP、極端な入力によるメモリ枯渇のみ防止）
pub const MAX_PIXELS: u64 = 100_000_000;

/// モザイクの縮小率（幅・高さ共通）
pub const MOSAIC_SCALE: f64 = 0.05;

/// インペイントの参照半径（px）
pub const INPAINT_RADIUS: u32 = 3;

/// マスク膨張の構造要素サイズ（5x5 全1カーネル）
pub const DILATE_KERNEL_SIZE: u8 = 5;

/// マスク二値化のしきい値（これより大きい値を 255 にする）
pub const MASK_THRESHOLD: u8 = 0;
