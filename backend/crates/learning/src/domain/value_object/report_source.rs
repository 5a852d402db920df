use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Who produced a weakness analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ReportSource {
    /// Language model response
    #[display("llm")]
    Llm = 0,
    /// Deterministic statistics, used when the model is unavailable
    #[display("fallback")]
    Fallback = 1,
}

impl ReportSource {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(ReportSource::Llm),
            1 => Some(ReportSource::Fallback),
            _ => None,
        }
    }
}
