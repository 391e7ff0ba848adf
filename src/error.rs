use thiserror::Error;

use crate::stream::Platform;

/// Why a piece of user input could not be turned into a stream reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid stream input. Please enter a valid Twitch/Kick channel or YouTube video URL/ID.")]
    InvalidInput,
    #[error("Kick VODs (recorded videos) cannot be embedded. Only live Kick channels are supported.")]
    KickVodUnsupported,
}

/// Rejections from the stream list. The list is left untouched whenever one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Stream already added: {platform}/{id}")]
    DuplicateEntry { platform: Platform, id: String },
    #[error("Index {index} out of range for {len} streams")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Malformed persisted streams: {0}")]
    MalformedPersistedState(String),
    #[error("Malformed share payload: {0}")]
    MalformedShareState(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    List(#[from] ListError),
}

