//! Integer request values that may arrive as JSON numbers or digit strings.
//!
//! Browser forms frequently post `"2"` where a number is meant, so request
//! bodies keep the raw value and validation decides what it means.

use serde::{Deserialize, Serialize};

/// Raw integer input as sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

/// Failure to read a [`NumericInput`] as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericInputError {
    /// Text was blank once trimmed.
    Blank,
    /// Not an integer at all.
    NotAnInteger,
}

impl NumericInput {
    /// Interpret the value as a signed integer.
    pub fn to_i64(&self) -> Result<i64, NumericInputError> {
        match self {
            Self::Number(number) => number.as_i64().ok_or(NumericInputError::NotAnInteger),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(NumericInputError::Blank);
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| NumericInputError::NotAnInteger)
            }
        }
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(3), Ok(3))]
    #[case(json!("3"), Ok(3))]
    #[case(json!(" 12 "), Ok(12))]
    #[case(json!(-1), Ok(-1))]
    #[case(json!(""), Err(NumericInputError::Blank))]
    #[case(json!("two"), Err(NumericInputError::NotAnInteger))]
    #[case(json!(2.5), Err(NumericInputError::NotAnInteger))]
    fn reads_integers(#[case] raw: serde_json::Value, #[case] expected: Result<i64, NumericInputError>) {
        let input: NumericInput = serde_json::from_value(raw).expect("number or string");
        assert_eq!(input.to_i64(), expected);
    }

    #[rstest]
    fn rejects_other_json_types() {
        assert!(serde_json::from_value::<NumericInput>(json!(true)).is_err());
        assert!(serde_json::from_value::<NumericInput>(json!([1])).is_err());
    }
}
