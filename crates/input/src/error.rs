use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    #[error("malformed input event: {0:?}")]
    Malformed(String),
}
