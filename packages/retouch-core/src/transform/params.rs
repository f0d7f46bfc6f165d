use bytes::Bytes;

/// 編集アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// インペイントによる除去
    #[default]
    Remove,
    /// モザイク（ピクセル化）
    Mosaic,
}

impl Action {
    /// `action_type` フィールドから Action を決定する
    ///
    /// 未指定および未知の値はすべて Remove 扱い
    pub fn from_field(value: Option<&str>) -> Self {
        match value {
            Some("mosaic") => Self::Mosaic,
            _ => Self::Remove,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remove => "remove",
            Self::Mosaic => "mosaic",
        }
    }
}

/// 矩形指定（左上座標と幅・高さ、整数に切り捨て済み）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectSpec {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl RectSpec {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// 画像範囲に収めた半開区間 (x0, y0, x1, y1) を返す
    ///
    /// 負の幅・高さは (x, y) から左・上方向に広がるものとして正規化する。
    /// 画像と重ならない場合は None
    pub fn clip_to(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let (x0, x1) = ordered(self.x, self.x.saturating_add(self.w));
        let (y0, y1) = ordered(self.y, self.y.saturating_add(self.h));

        let x0 = x0.clamp(0, width as i64);
        let x1 = x1.clamp(0, width as i64);
        let y0 = y0.clamp(0, height as i64);
        let y1 = y1.clamp(0, height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// 編集領域の指定方法
#[derive(Debug, Clone)]
pub enum Region {
    /// 矩形モード
    Rect(RectSpec),
    /// マスク画像モード（アップロードされたマスクのバイト列）
    Mask(Bytes),
}

impl Region {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Mask(_) => "mask",
        }
    }
}
