use serde::{Deserialize, Serialize};

/// The front-end stage that produced an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lex,
    Parse,
}

/// A lex or parse error, positioned by byte offset in the input line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LangError {
    pub stage: Stage,
    pub pos: usize,
    pub message: String,
}

impl LangError {
    pub fn lex(pos: usize, message: impl Into<String>) -> Self {
        LangError {
            stage: Stage::Lex,
            pos,
            message: message.into(),
        }
    }

    pub fn parse(pos: usize, message: impl Into<String>) -> Self {
        LangError {
            stage: Stage::Parse,
            pos,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LangError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self.stage {
            Stage::Lex => "invalid input",
            Stage::Parse => "syntax error",
        };
        write!(f, "{} at position {}: {}", stage, self.pos, self.message)
    }
}

impl std::error::Error for LangError {}
