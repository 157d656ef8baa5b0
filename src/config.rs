use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Merchant credentials and product texts that go into every tokenize request.
///
/// Defaults describe the demo shop. A JSON file with any subset of the
/// fields overrides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantConfig {
    pub client_application_key: String,
    pub shop_id: String,
    pub gateway_id: String,
    pub auth_center_client_id: String,
    pub product_name: String,
    pub product_description: String,
    pub return_url: String,
    pub test_phone_number: String,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            client_application_key: "test_sample_application_key".to_string(),
            shop_id: "193856".to_string(),
            gateway_id: "gatewayId".to_string(),
            auth_center_client_id: "demo-client-id".to_string(),
            product_name: "Astronaut suit".to_string(),
            product_description: "Made for space walks, certified for one owner".to_string(),
            return_url: "https://custom.redirect.url".to_string(),
            test_phone_number: "+79041234567".to_string(),
        }
    }
}

impl MerchantConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"shop_id": "42", "gateway_id": "gw"}}"#).unwrap();

        let config = MerchantConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.shop_id, "42");
        assert_eq!(config.gateway_id, "gw");
        assert_eq!(config.product_name, MerchantConfig::default().product_name);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(MerchantConfig::from_json_file("no/such/merchant.json").is_err());
    }
}
