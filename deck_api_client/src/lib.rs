//! 牌组服务的 HTTP 客户端

mod command;

pub use command::{parse_command, Command};

use deck_api_core::{Card, CreateDeckResponse, Deck, DeckId, DrawRequest};
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务器返回了非 2xx 状态码，message 为响应体原文
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct DeckClient {
    base: Url,
    http: reqwest::Client,
}

impl DeckClient {
    /// `base` 形如 `http://127.0.0.1:8080`
    pub fn new(base: &str) -> Result<Self> {
        Ok(DeckClient { base: Url::parse(base)?, http: reqwest::Client::new() })
    }

    /// 创建牌组；`cards` 为空时服务器创建完整的 52 张牌
    pub async fn create_deck(&self, cards: &[&str], shuffle: bool) -> Result<CreateDeckResponse> {
        let url = self.base.join("decks/create")?;
        let mut query = vec![("shuffle", shuffle.to_string())];
        if !cards.is_empty() {
            query.push(("cards", cards.join(",")));
        }
        let resp = self.http.post(url).query(&query).send().await?;
        parse_response(resp).await
    }

    pub async fn open_deck(&self, id: DeckId) -> Result<Deck> {
        let url = self.base.join(&format!("decks/{}", id))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// 抽牌，`version` 必须是最近一次看到的牌组版本号
    pub async fn draw_cards(&self, id: DeckId, count: usize, version: u64) -> Result<Vec<Card>> {
        let url = self.base.join(&format!("decks/{}", id))?;
        let body = DrawRequest { draw: count, version };
        let resp = self.http.patch(url).json(&body).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await?;
        return Err(ClientError::Api { status: status.as_u16(), message });
    }
    Ok(resp.json().await?)
}
