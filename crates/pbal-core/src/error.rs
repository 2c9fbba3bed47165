use thiserror::Error;

pub type PbalResult<T> = Result<T, PbalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PbalError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
