use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Image,
}

impl InputKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(InputKind::Text),
            "image" => Some(InputKind::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Image => "image",
        }
    }
}

/// One conversation excerpt handed to the model. For `Image`, `content` is
/// the base64 payload of the screenshot.
#[derive(Debug, Clone)]
pub struct AnalysisInput<'a> {
    pub kind: InputKind,
    pub content: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Red,
    Green,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub kind: FlagKind,
    pub label: String,
}

/// The model's scored read of one input, already clamped and defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaVerdict {
    /// 0 (smooth) to 100 (unbearable).
    pub cringe_score: u8,
    /// 0 (ghosting territory) to 100 (very into you).
    pub interest_level: u8,
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub suggested_replies: Vec<String>,
    pub summary: String,
}
