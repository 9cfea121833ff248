//! 리뷰 분류 도메인 엔티티/값 객체.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 한 번의 분류 실행 옵션.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// 리뷰 본문(미지정 시 대화형 입력)
    pub review: Option<String>,
    /// CLI에서 직접 받은 API key
    pub api_key: Option<String>,
    /// provider 코드(openai/anthropic/gemini)
    pub provider: Option<String>,
    /// 모델 override
    pub model: Option<String>,
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductQuality {
    Good,
    Average,
    Poor,
}

impl ProductQuality {
    pub const ALL: [ProductQuality; 3] = [Self::Good, Self::Average, Self::Poor];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for ProductQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 외부 모델이 채워 주는 5개 필드 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub sentiment: Sentiment,
    pub intensity: String,
    pub quality: ProductQuality,
    #[serde(default)]
    pub price: Option<String>,
    pub category: String,
}

impl ReviewRecord {
    /// 공백뿐인 가격 언급은 "언급 없음"으로 본다.
    pub fn normalized(mut self) -> Self {
        self.intensity = self.intensity.trim().to_string();
        self.category = self.category.trim().to_string();
        self.price = self
            .price
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }
}

/// 추출 대상 필드 한 개의 이름/의미.
#[derive(Debug, Clone, Copy)]
pub struct RecordField {
    pub name: &'static str,
    pub description: &'static str,
}

/// 프롬프트와 provider 스키마가 공유하는 필드 정의(출력 순서 고정).
pub const RECORD_FIELDS: [RecordField; 5] = [
    RecordField {
        name: "sentiment",
        description: "Overall sentiment of the product review: Positive, Negative or Neutral.",
    },
    RecordField {
        name: "intensity",
        description: "How strongly the sentiment is expressed in the review (for example Low, Medium, High).",
    },
    RecordField {
        name: "quality",
        description: "What the review says about the quality of the product: Good, Average or Poor.",
    },
    RecordField {
        name: "price",
        description: "What the review says about the price of the product, including whether it is considered too expensive or too cheap. Null when the price is not mentioned.",
    },
    RecordField {
        name: "category",
        description: "Name of the product category.",
    },
];

/// 지원하는 structured-completion 제공자.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAi, Self::Anthropic, Self::Gemini];

    /// 설정/CLI 문자열을 provider로 변환한다.
    /// 지원값: openai, anthropic/claude, gemini/google
    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" | "gpt" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "gemini" | "google" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Claude",
            Self::Gemini => "Gemini",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-7-sonnet-latest",
            Self::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn default_api_base(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// provider 인증 키. Debug 출력에서 값을 숨긴다.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 공백 제거 후 비어 있으면 None.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    /// total이 없으면 prompt + completion으로 보완한다.
    pub fn from_parts(prompt: Option<u64>, completion: Option<u64>, total: Option<u64>) -> Self {
        Self {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: total.or_else(|| sum_optional(prompt, completion)),
        }
    }
}

/// provider가 반환하는 분류 결과.
#[derive(Debug, Clone)]
pub struct Classification {
    pub record: ReviewRecord,
    pub usage: TokenUsage,
}

/// 유스케이스 최종 결과.
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    pub provider_name: String,
    pub model: String,
    pub record: ReviewRecord,
    pub report: String,
    pub usage: TokenUsage,
}

fn sum_optional(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x + y),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}
