use thiserror::Error;

pub type NlResult<T> = Result<T, NlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative numeric value for {what}: {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
