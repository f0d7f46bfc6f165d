use std::collections::HashMap;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use crate::AppState;
use crate::edit::{EditRequest, edit};
use retouch_core::{Action, EditError, MAX_PIXELS, Region, parse_rect};

const INDEX_HTML: &str = include_str!("../static/index.html");

pub const MSG_NO_IMAGE: &str = "No image file found";
pub const MSG_NO_SELECTED_FILE: &str = "No selected file";
pub const MSG_INVALID_PARAMS: &str = "Invalid parameters: provide mask or coordinates";
pub const MSG_UNKNOWN_ERROR: &str = "An unknown error occurred or inputs were invalid";

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn remove_watermark(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SuccessResponse>, AppError> {
    let form = EditForm::read(multipart).await?;
    let request = form.into_request()?;

    tracing::info!(
        mode = request.region.mode(),
        action = request.action.as_str(),
        image_bytes = request.image.len(),
        "processing edit request"
    );

    // デコード・画素処理は CPU を占有するためブロッキングスレッドで実行
    let ops = state.ops.clone();
    let outcome = tokio::task::spawn_blocking(move || edit(ops.as_ref(), &request))
        .await
        .map_err(|e| AppError::Internal(format!("edit task failed: {e}")))??;

    tracing::info!(
        width = outcome.width,
        height = outcome.height,
        selected = outcome.selected_pixels,
        "edit completed"
    );

    Ok(Json(SuccessResponse {
        status: "success",
        image: outcome.data_url,
    }))
}

/// アップロードされたファイルパート
#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    data: Bytes,
}

/// multipart フォームの内容（同名パートは先勝ち）
#[derive(Debug, Default)]
struct EditForm {
    image: Option<UploadedFile>,
    mask: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

impl EditForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            // filename 付きのパートのみファイルとして扱う
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let slot = match name.as_str() {
                        "image" => &mut form.image,
                        "mask" => &mut form.mask,
                        _ => continue,
                    };
                    if slot.is_none() {
                        let data = field.bytes().await?;
                        *slot = Some(UploadedFile { file_name, data });
                    }
                }
                None => {
                    let text = field.text().await?;
                    form.fields.entry(name).or_insert(text);
                }
            }
        }

        Ok(form)
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 入力を検証して EditRequest にする
    ///
    /// マスクファイルがあればマスクモード（矩形パラメータは無視）、
    /// なければ x, y, w, h が必須
    fn into_request(self) -> Result<EditRequest, EditError> {
        let image = self.image.as_ref().ok_or(EditError::MissingImage)?;
        if image.file_name.is_empty() {
            return Err(EditError::EmptyFilename);
        }

        let region = match self.mask.as_ref().filter(|m| !m.file_name.is_empty()) {
            Some(mask) => Region::Mask(mask.data.clone()),
            None => Region::Rect(parse_rect(
                self.field("x"),
                self.field("y"),
                self.field("w"),
                self.field("h"),
            )?),
        };

        Ok(EditRequest {
            image: image.data.clone(),
            region,
            action: Action::from_field(self.field("action_type")),
        })
    }
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    PayloadTooLarge(String),
    EditFailed(String),
    Internal(String),
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::MissingImage => {
                tracing::warn!("request has no image file");
                AppError::BadRequest(MSG_NO_IMAGE.to_string())
            }
            EditError::EmptyFilename => {
                tracing::warn!("image file has empty filename");
                AppError::BadRequest(MSG_NO_SELECTED_FILE.to_string())
            }
            EditError::InvalidParams(msg) => {
                tracing::warn!(error = %msg, "invalid rectangle parameters");
                AppError::BadRequest(MSG_INVALID_PARAMS.to_string())
            }
            EditError::ResolutionTooLarge { width, height } => {
                tracing::warn!(width = %width, height = %height, "image resolution too large");
                AppError::BadRequest(format!(
                    "image resolution {width}x{height} exceeds maximum of {MAX_PIXELS} pixels"
                ))
            }
            EditError::Decode(msg) => {
                tracing::warn!(error = %msg, "failed to decode upload");
                AppError::EditFailed(msg)
            }
            EditError::ProcessingFailed(msg) => {
                tracing::error!(error = %msg, "image processing failed");
                AppError::EditFailed(msg)
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        let message = err.body_text();
        tracing::warn!(status = %status, error = %message, "malformed multipart request");

        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            // From<EditError> でログ出力済み
            AppError::EditFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MSG_UNKNOWN_ERROR.to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MSG_UNKNOWN_ERROR.to_string(),
                )
            }
        };

        let body = ErrorResponse {
            status: "error",
            message,
        };
        (status, Json(body)).into_response()
    }
}
