use thiserror::Error;

/// 編集リクエスト処理のエラー型
#[derive(Debug, Error)]
pub enum EditError {
    #[error("no image file found")]
    MissingImage,

    #[error("no selected file")]
    EmptyFilename,

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
