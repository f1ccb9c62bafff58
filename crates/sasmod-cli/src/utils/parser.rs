use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid assignment '{0}'. Expected KEY=VALUE (e.g., 'volfraction=0.3').")]
    MissingSeparator(String),

    #[error("Key cannot be empty in assignment '{0}'.")]
    EmptyKey(String),

    #[error("Invalid numeric value for '{key}': '{value}'.")]
    InvalidNumber { key: String, value: String },
}

/// Splits `KEY=VALUE` at the first `=`, trimming both sides.
pub fn split_assignment(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(input.to_string()));
    }
    Ok((key, value.trim()))
}

/// Parses `NAME=VALUE` where the value is a floating point number.
pub fn parse_parameter_assignment(input: &str) -> Result<(String, f64), ParseError> {
    let (key, value) = split_assignment(input)?;
    let number = value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    Ok((key.to_string(), number))
}
