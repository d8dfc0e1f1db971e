use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };

/// Request fields forwarded untouched to the transaction service
/// (`to`, `value`, `data`, `operation`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimationParams(Map<String, Value>);

impl EstimationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimationRequest {
    pub chain_id: String,
    pub address: String,
    pub params: EstimationParams,
}

impl EstimationRequest {
    pub fn new(chain_id: &str, address: &str, params: EstimationParams) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            address: address.to_string(),
            params,
        }
    }
}

/// Validated fee estimation. Amounts are base-10 integer strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimation {
    pub fee: String,
    pub gas_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_serialize_as_plain_object() {
        let params = EstimationParams::new().with("op", "transfer").with("value", "100");
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({ "op": "transfer", "value": "100" }));
    }

    #[test]
    fn test_params_reject_non_object() {
        assert!(serde_json::from_value::<EstimationParams>(json!(["to", "value"])).is_err());
    }

    #[test]
    fn test_estimation_wire_names() {
        let estimation = Estimation {
            fee: "21000".to_string(),
            gas_price: "5".to_string(),
            gas_limit: None,
        };
        assert_eq!(serde_json::to_value(&estimation).unwrap(), json!({ "fee": "21000", "gasPrice": "5" }));
    }
}
