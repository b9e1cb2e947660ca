use thiserror::Error;

/// Errors produced anywhere in the solving pipeline, from facelet parsing
/// through table loading to the search itself.
#[derive(Error, Debug)]
pub enum Error {
    #[error("table I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("table encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("table decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("facelet string must contain exactly 54 characters")]
    BadFaceletCount,
    #[error("facelet string contains a character outside U/R/F/D/L/B")]
    BadFaceletChar,
    #[error("no corner cubie matches the colors at this corner position")]
    CornerNotFound,
    #[error("no edge cubie matches the colors at this edge position")]
    EdgeNotFound,
    #[error("not all 12 edges exist exactly once")]
    InvalidEdge,
    #[error("one edge has to be flipped")]
    FlipError,
    #[error("not all corners exist exactly once")]
    InvalidCorner,
    #[error("one corner has to be twisted")]
    TwistError,
    #[error("sum of edge or corner orientations is not a multiple of 2 or 3")]
    OrientationSum,
    #[error("two corners or two edges have to be exchanged")]
    ParityError,
    #[error("invalid scramble or solution move token")]
    InvalidScramble,
    #[error("invalid cubie representation")]
    InvalidCubieValue,
    #[error("table unavailable: {0}")]
    TableUnavailable(String),
    #[error("search exceeded the configured time budget")]
    Timeout,
    #[error("no solution found within max_depth")]
    NoSolution,
    #[error("internal error: {0}")]
    InternalError(String),
}
