//! pbal-case: balance case file format, validation and evaluation.

pub mod schema;
pub mod validate;

pub use schema::BalanceCase;
pub use validate::{ValidationError, validate_case};

use pbal_balance::{ProcessValidation, validate_process_balances};

pub const LATEST_VERSION: u32 = 1;

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> CaseResult<BalanceCase> {
    let case: BalanceCase = serde_yaml::from_str(content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn from_json_str(content: &str) -> CaseResult<BalanceCase> {
    let case: BalanceCase = serde_json::from_str(content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn load_yaml(path: &std::path::Path) -> CaseResult<BalanceCase> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, case: &BalanceCase) -> CaseResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> CaseResult<BalanceCase> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, case: &BalanceCase) -> CaseResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Validate a case and run every balance on it.
pub fn evaluate_case(case: &BalanceCase) -> CaseResult<ProcessValidation> {
    validate_case(case)?;
    tracing::debug!(
        case = %case.name,
        streams = case.streams.len(),
        "evaluating balance case"
    );
    Ok(validate_process_balances(
        &case.streams,
        &case.auxiliary,
        &case.config,
    ))
}
