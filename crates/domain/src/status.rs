//! Engine completion vocabulary: the transport-level callback tag and the
//! application-level response status embedded in a completed payload.

use std::fmt;

/// How the engine finished a transaction's transport interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Complete,
    Cancel,
    Timeout,
    Error,
}

impl CallbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackKind::Complete => "COMPLETE",
            CallbackKind::Cancel => "CANCEL",
            CallbackKind::Timeout => "TIMEOUT",
            CallbackKind::Error => "ERROR",
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            CallbackKind::Complete => 700,
            CallbackKind::Cancel => 701,
            CallbackKind::Timeout => 702,
            CallbackKind::Error => 703,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            700 => Some(CallbackKind::Complete),
            701 => Some(CallbackKind::Cancel),
            702 => Some(CallbackKind::Timeout),
            703 => Some(CallbackKind::Error),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome code carried in the `status` field of a completed response
/// payload, distinct from the callback tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Good,
    NoName,
    AllTimeout,
    NoSecureAnswers,
    AllBogusAnswers,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Good => "GOOD",
            ResponseStatus::NoName => "NO_NAME",
            ResponseStatus::AllTimeout => "ALL_TIMEOUT",
            ResponseStatus::NoSecureAnswers => "NO_SECURE_ANSWERS",
            ResponseStatus::AllBogusAnswers => "ALL_BOGUS_ANSWERS",
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ResponseStatus::Good => 900,
            ResponseStatus::NoName => 901,
            ResponseStatus::AllTimeout => 902,
            ResponseStatus::NoSecureAnswers => 903,
            ResponseStatus::AllBogusAnswers => 904,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            900 => Some(ResponseStatus::Good),
            901 => Some(ResponseStatus::NoName),
            902 => Some(ResponseStatus::AllTimeout),
            903 => Some(ResponseStatus::NoSecureAnswers),
            904 => Some(ResponseStatus::AllBogusAnswers),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
