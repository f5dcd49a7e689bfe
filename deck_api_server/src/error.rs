use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use deck_api_core::DeckError;
use thiserror::Error;
use tracing::warn;

/// 请求处理过程中的错误，负责映射为 HTTP 状态码和纯文本消息
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid shuffle value")]
    InvalidShuffle,

    #[error("error: {0}")]
    InvalidDeckId(#[from] uuid::Error),

    #[error("error: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("error: {0}")]
    Deck(#[from] DeckError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidShuffle | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidDeckId(_) => StatusCode::NOT_FOUND,
            ApiError::Deck(err) => match err {
                DeckError::InvalidCardCode(_) | DeckError::EmptyDeck { .. } => StatusCode::BAD_REQUEST,
                DeckError::DeckNotFound(_) => StatusCode::NOT_FOUND,
                DeckError::VersionConflict { .. } => StatusCode::CONFLICT,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, "请求失败: {}", self);
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidShuffle.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(DeckError::InvalidCardCode("11".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(DeckError::DeckNotFound(Uuid::nil())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(DeckError::EmptyDeck { remaining: 0 }).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(DeckError::VersionConflict { expected: 0, actual: 1 }).status(),
            StatusCode::CONFLICT
        );
        let bad_id = Uuid::parse_str("id123").unwrap_err();
        assert_eq!(ApiError::from(bad_id).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_message_prefix() {
        let err = ApiError::from(DeckError::InvalidCardCode("ZZ".into()));
        assert_eq!(err.to_string(), "error: invalid card code 'ZZ'");
        assert_eq!(ApiError::InvalidShuffle.to_string(), "invalid shuffle value");
    }
}
