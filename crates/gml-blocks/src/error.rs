//! Error types for gml-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Anchor index {index} is beyond the end of the text ({len} characters)")]
    AnchorOutOfRange { index: usize, len: usize },
}
