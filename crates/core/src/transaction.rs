//! Transactions submitted for evaluation
//!
//! The engine evaluates one transaction in isolation. Velocity and behaviour
//! facts (`frequency`, `driftScore`, `attributes`) are precomputed by the
//! caller and attached here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::parameter::ParameterValue;

/// Transaction payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier
    pub id: String,

    /// Transaction amount
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// When the transaction happened
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,

    /// Count of recent transactions in the caller's velocity window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,

    /// Behavioural drift score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_score: Option<f64>,

    /// Extra named facts, read by `other` parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, ParameterValue>,
}

impl Transaction {
    /// Create a transaction stamped with the current time
    pub fn new(id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            amount,
            timestamp: Utc::now(),
            device_id: None,
            payment_method: None,
            ip_address: None,
            location: None,
            user_id: None,
            merchant_id: None,
            frequency: None,
            drift_score: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_merchant(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    pub fn with_frequency(mut self, count: u32) -> Self {
        self.frequency = Some(count);
        self
    }

    pub fn with_drift_score(mut self, score: f64) -> Self {
        self.drift_score = Some(score);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder() {
        let tx = Transaction::new("tx-1", dec!(1000))
            .with_device("device-123")
            .with_location("US")
            .with_frequency(4)
            .with_attribute("is_vpn", true);

        assert_eq!(tx.amount, dec!(1000));
        assert_eq!(tx.device_id.as_deref(), Some("device-123"));
        assert_eq!(tx.frequency, Some(4));
        assert_eq!(tx.attributes.get("is_vpn"), Some(&ParameterValue::Bool(true)));
        assert!(tx.user_id.is_none());
    }

    #[test]
    fn test_json_payload() {
        let json = r#"{
            "id": "tx-42",
            "amount": 7000,
            "timestamp": "2024-05-01T03:15:00Z",
            "deviceId": "device-123",
            "paymentMethod": "credit_card",
            "ipAddress": "192.168.1.1",
            "location": "US",
            "userId": "user-123",
            "merchantId": "merchant-123",
            "attributes": { "accountsPerDevice": 3 }
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.amount, dec!(7000));
        assert_eq!(tx.payment_method.as_deref(), Some("credit_card"));
        assert_eq!(tx.frequency, None);
        assert_eq!(
            tx.attributes.get("accountsPerDevice"),
            Some(&ParameterValue::Number(3.0))
        );

        let out = serde_json::to_string(&tx).unwrap();
        assert!(out.contains("\"deviceId\":\"device-123\""));
        assert!(!out.contains("driftScore"));
    }

    #[test]
    fn test_minimal_payload() {
        let json = r#"{ "id": "tx-1", "amount": 12.5, "timestamp": "2024-05-01T00:00:00Z" }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.amount, dec!(12.5));
        assert!(tx.device_id.is_none());
        assert!(tx.attributes.is_empty());
    }
}
