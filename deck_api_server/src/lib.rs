//! 牌组服务的 HTTP 适配层
//!
//! 只负责把请求参数翻译成 [`DeckService`] 调用，再把结果翻译成状态码和 JSON，
//! 不包含任何牌组规则。

mod config;
mod error;

pub use config::Config;
pub use error::ApiError;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use deck_api_core::{Card, CreateDeckResponse, Deck, DeckId, DeckService, DrawRequest, InMemoryDeckStore};
use serde::Deserialize;
use tracing::info;

// 服务器全局状态，所有请求共享同一个牌组服务
pub struct AppState {
    pub decks: DeckService,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(decks: DeckService) -> Self {
        AppState { decks }
    }

    /// 按配置创建使用内存存储的状态
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(InMemoryDeckStore::new());
        let decks = match config.seed {
            Some(seed) => DeckService::with_seed(store, seed),
            None => DeckService::new(store),
        };
        AppState { decks }
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/decks/create", post(create_deck_handler))
        .route("/decks/{id}", get(open_deck_handler).patch(draw_cards_handler))
        .with_state(state)
}

#[derive(Deserialize, Debug, Default)]
struct CreateDeckParams {
    shuffle: Option<String>,
    cards: Option<String>,
}

/// POST /decks/create?shuffle=<bool>&cards=<AS,KD,...>
async fn create_deck_handler(
    State(state): State<SharedState>,
    Query(params): Query<CreateDeckParams>,
) -> Result<Json<CreateDeckResponse>, ApiError> {
    let shuffle = match params.shuffle.as_deref() {
        None | Some("") => false,
        Some(s) => parse_bool(s).ok_or(ApiError::InvalidShuffle)?,
    };
    let cards = match params.cards.as_deref() {
        None | Some("") => Vec::new(),
        Some(c) => split_card_codes(c),
    };

    let deck = state.decks.create_deck(&cards, shuffle)?;
    Ok(Json(CreateDeckResponse::from(&deck)))
}

/// GET /decks/{id}
async fn open_deck_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Deck>, ApiError> {
    let id = parse_deck_id(&id)?;
    Ok(Json(state.decks.open_deck(&id)?))
}

/// PATCH /decks/{id}，请求体为 `{"draw": n, "version": v}`
async fn draw_cards_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Vec<Card>>, ApiError> {
    let id = parse_deck_id(&id)?;
    let req: DrawRequest = serde_json::from_slice(&body)?;
    let cards = state.decks.draw_cards(&id, req.draw, req.version)?;
    info!(deck_id = %id, drawn = cards.len(), "玩家抽牌");
    Ok(Json(cards))
}

// --- 请求参数解析 ---

fn parse_deck_id(id: &str) -> Result<DeckId, ApiError> {
    Ok(DeckId::parse_str(id)?)
}

/// 与 Go 的 strconv.ParseBool 接受相同的写法
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// 牌码统一转为大写后按逗号切分
fn split_card_codes(raw: &str) -> Vec<String> {
    raw.to_uppercase().split(',').map(str::to_string).collect()
}
