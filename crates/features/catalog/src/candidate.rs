use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use stagehand_domain::catalog::{CatalogKind, OptionValue, ValueType};

/// A value submitted for addition, before validation.
///
/// Amounts may arrive as JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum Candidate {
    Number(f64),
    Text(String),
}

impl Candidate {
    /// Trims and checks the candidate against the value type of `kind`.
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidInput`] for blank strings, numbers sent to a
    /// string kind, and amounts that are not finite numbers greater than zero.
    pub fn validate(self, kind: CatalogKind) -> Result<OptionValue, CatalogError> {
        match (kind.value_type(), self) {
            (ValueType::Text, Self::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(CatalogError::invalid(format!("{kind} value must not be empty")));
                }
                Ok(OptionValue::Text(trimmed.to_owned()))
            }
            (ValueType::Text, Self::Number(number)) => Err(CatalogError::invalid(format!(
                "{kind} expects a text value, got number {number}"
            ))),
            (ValueType::Number, candidate) => parse_amount(candidate).map(OptionValue::Amount),
        }
    }
}

fn parse_amount(candidate: Candidate) -> Result<f64, CatalogError> {
    let amount = match candidate {
        Candidate::Number(number) => number,
        Candidate::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| CatalogError::invalid(format!("'{text}' is not a number")))?,
    };

    if !amount.is_finite() || amount <= 0.0 {
        return Err(CatalogError::invalid(format!(
            "Amount must be a finite number greater than zero, got {amount}"
        )));
    }

    Ok(amount)
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Candidate {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed() {
        let value = Candidate::from("  Makati ").validate(CatalogKind::Location).unwrap();
        assert_eq!(value, OptionValue::Text("Makati".to_owned()));
    }

    #[test]
    fn amounts_accept_numeric_strings() {
        let value = Candidate::from(" 1500 ").validate(CatalogKind::Amount).unwrap();
        assert_eq!(value.as_amount(), Some(1500.0));
    }

    #[test]
    fn rejects_invalid_candidates() {
        let cases = [
            (CatalogKind::Location, Candidate::from("   ")),
            (CatalogKind::Location, Candidate::from(12.0)),
            (CatalogKind::Amount, Candidate::from(0.0)),
            (CatalogKind::Amount, Candidate::from(-5.0)),
            (CatalogKind::Amount, Candidate::from(f64::NAN)),
            (CatalogKind::Amount, Candidate::from("abc")),
            (CatalogKind::Amount, Candidate::from("inf")),
        ];
        for (kind, candidate) in cases {
            let err = candidate.clone().validate(kind).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidInput { .. }), "{kind}: {candidate:?}");
        }
    }
}
