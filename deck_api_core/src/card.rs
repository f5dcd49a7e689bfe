use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- 核心数据结构定义 ---

/// 花色 (Suit)
/// 变体顺序即标准牌组中的花色顺序
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    Spades,   // 黑桃 ♠️
    Diamonds, // 方块 ♦️
    Clubs,    // 梅花 ♣️
    Hearts,   // 红心 ♥️
}

/// 点数 (Rank)
/// 序列化为 "ACE"、"2" ... "10"、"JACK"、"QUEEN"、"KING"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "ACE")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "JACK")]
    Jack,
    #[serde(rename = "QUEEN")]
    Queen,
    #[serde(rename = "KING")]
    King,
}

/// 单张扑克牌 (Card)
///
/// 牌码 (code) 由点数和花色推导而来，不单独存储。
/// JSON 形式为 `{"value": "ACE", "suit": "SPADES", "code": "AS"}`。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "CardJson", try_from = "CardJson")]
pub struct Card {
    pub value: Rank,
    pub suit: Suit,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "SPADES",
            Suit::Diamonds => "DIAMONDS",
            Suit::Clubs => "CLUBS",
            Suit::Hearts => "HEARTS",
        }
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
    ];

    pub const fn to_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Rank::Ace => "ACE",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = DeckError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'S' => Ok(Suit::Spades),
            'D' => Ok(Suit::Diamonds),
            'C' => Ok(Suit::Clubs),
            'H' => Ok(Suit::Hearts),
            _ => Err(DeckError::InvalidCardCode(c.to_string())),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = DeckError;

    fn try_from(c: char) -> Result<Self> {
        Rank::ALL
            .into_iter()
            .find(|r| r.to_char() == c)
            .ok_or_else(|| DeckError::InvalidCardCode(c.to_string()))
    }
}

// --- 牌码编解码 ---

/// 把 (点数, 花色) 编码为两个字符的牌码，例如 (ACE, SPADES) -> "AS"
pub fn encode(value: Rank, suit: Suit) -> String {
    let mut code = String::with_capacity(2);
    code.push(value.to_char());
    code.push(suit.to_char());
    code
}

/// 把两个字符的牌码解码为 (点数, 花色)
///
/// 区分大小写：调用方负责在此之前统一转为大写。
pub fn decode(code: &str) -> Result<(Rank, Suit)> {
    let mut chars = code.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(r), Some(s), None) => {
            let invalid = |_| DeckError::InvalidCardCode(code.to_string());
            Ok((Rank::try_from(r).map_err(invalid)?, Suit::try_from(s).map_err(invalid)?))
        }
        _ => Err(DeckError::InvalidCardCode(code.to_string())),
    }
}

impl Card {
    pub fn new(value: Rank, suit: Suit) -> Card {
        Card { value, suit }
    }

    pub fn code(&self) -> String {
        encode(self.value, self.suit)
    }
}

impl FromStr for Card {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        let (value, suit) = decode(s)?;
        Ok(Card { value, suit })
    }
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// 牌在网络上传输的形式，多带一个冗余的 code 字段
#[derive(Serialize, Deserialize)]
struct CardJson {
    value: Rank,
    suit: Suit,
    code: String,
}

impl From<Card> for CardJson {
    fn from(card: Card) -> Self {
        CardJson { value: card.value, suit: card.suit, code: card.code() }
    }
}

impl TryFrom<CardJson> for Card {
    type Error = DeckError;

    // code 必须与 value/suit 一致
    fn try_from(json: CardJson) -> Result<Self> {
        let card = json.code.parse::<Card>()?;
        if card.value != json.value || card.suit != json.suit {
            return Err(DeckError::InvalidCardCode(json.code));
        }
        Ok(card)
    }
}

// --- 标准牌组生成 ---

/// 按标准顺序创建一副完整的 52 张牌：
/// 外层按花色 SPADES, DIAMONDS, CLUBS, HEARTS，内层按点数 ACE..KING
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(Suit::ALL.len() * Rank::ALL.len());
    for &suit in &Suit::ALL {
        for &value in &Rank::ALL {
            deck.push(Card { value, suit });
        }
    }
    deck
}

// --- 单元测试 ---
