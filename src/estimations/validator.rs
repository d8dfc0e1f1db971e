use serde_json::Value;

use crate::error::{ FieldIssue, Result, ValidationError };
use crate::estimations::Estimation;
use crate::providers::{ RawEstimationData, Validator };

/// Shape check for estimations returned by a transaction service.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimationsValidator;

impl EstimationsValidator {
    pub fn new() -> Self {
        Self
    }

    fn numeric_string(value: &Value) -> std::result::Result<String, &'static str> {
        match value {
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(s.clone())
            }
            Value::String(_) => Err("expected numeric string"),
            _ => Err("expected string"),
        }
    }
}

impl Validator<Estimation> for EstimationsValidator {
    fn validate(&self, data: RawEstimationData) -> Result<Estimation> {
        let object = data
            .as_object()
            .ok_or_else(|| ValidationError::single("$", "expected object"))?;

        let mut issues = Vec::new();
        let mut check = |field: &str, required: bool| -> Option<String> {
            match object.get(field) {
                None | Some(Value::Null) => {
                    if required {
                        issues.push(FieldIssue {
                            field: field.to_string(),
                            message: "missing required field".to_string(),
                        });
                    }
                    None
                }
                Some(value) =>
                    match Self::numeric_string(value) {
                        Ok(s) => Some(s),
                        Err(message) => {
                            issues.push(FieldIssue {
                                field: field.to_string(),
                                message: message.to_string(),
                            });
                            None
                        }
                    }
            }
        };

        let fee = check("fee", true);
        let gas_price = check("gasPrice", true);
        let gas_limit = check("gasLimit", false);

        match (fee, gas_price) {
            (Some(fee), Some(gas_price)) if issues.is_empty() =>
                Ok(Estimation { fee, gas_price, gas_limit }),
            _ => {
                tracing::debug!("Rejected estimation payload: {} issue(s)", issues.len());
                Err(ValidationError::new(issues).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    fn validate(data: Value) -> Result<Estimation> {
        EstimationsValidator::new().validate(data)
    }

    fn issue_fields(result: Result<Estimation>) -> Vec<String> {
        match result {
            Err(AppError::Validation(e)) =>
                e
                    .fields()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_well_formed_payload() {
        let estimation = validate(json!({ "fee": "21000", "gasPrice": "5" })).unwrap();
        assert_eq!(estimation, Estimation {
            fee: "21000".to_string(),
            gas_price: "5".to_string(),
            gas_limit: None,
        });
    }

    #[test]
    fn test_optional_gas_limit() {
        let estimation = validate(
            json!({ "fee": "1", "gasPrice": "2", "gasLimit": "3" })
        ).unwrap();
        assert_eq!(estimation.gas_limit.as_deref(), Some("3"));

        let estimation = validate(json!({ "fee": "1", "gasPrice": "2", "gasLimit": null })).unwrap();
        assert_eq!(estimation.gas_limit, None);
    }

    #[test]
    fn test_drops_unknown_fields() {
        let estimation = validate(
            json!({ "fee": "1", "gasPrice": "2", "safeTxGas": "77", "extra": { "x": 1 } })
        ).unwrap();
        assert_eq!(serde_json::to_value(&estimation).unwrap(), json!({ "fee": "1", "gasPrice": "2" }));
    }

    #[test]
    fn test_missing_field_is_named() {
        assert_eq!(issue_fields(validate(json!({ "gasPrice": "5" }))), vec!["fee"]);
    }

    #[test]
    fn test_collects_every_issue() {
        let fields = issue_fields(validate(json!({ "fee": 21000, "gasLimit": "-1" })));
        assert_eq!(fields, vec!["fee", "gasPrice", "gasLimit"]);
    }

    #[test]
    fn test_rejects_non_integer_strings() {
        for bad in ["", "1.5", "-3", "0x10", " 7"] {
            assert_eq!(issue_fields(validate(json!({ "fee": bad, "gasPrice": "1" }))), vec!["fee"]);
        }
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(issue_fields(validate(json!("21000"))), vec!["$"]);
        assert_eq!(issue_fields(validate(Value::Null)), vec!["$"]);
    }
}
