//! Bearer records

use crate::repository::Entity;
use crate::types::{BearerType, ConfigValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Guaranteed and maximum bit rates in kbps, both positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qos {
    /// Guaranteed bit rate
    pub gbr: u32,
    /// Maximum bit rate
    pub mbr: u32,
}

impl Qos {
    /// Create a QoS pair, rejecting zero rates
    pub fn new(gbr: u32, mbr: u32) -> Result<Self, ConfigValidationError> {
        if gbr == 0 {
            return Err(ConfigValidationError::InvalidQos { field: "gbr".to_string(), value: gbr });
        }
        if mbr == 0 {
            return Err(ConfigValidationError::InvalidQos { field: "mbr".to_string(), value: mbr });
        }
        Ok(Self { gbr, mbr })
    }
}

/// An EPS bearer used to decorate packet-switched CDRs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bearer {
    /// Six-digit bearer id, unique within a catalog
    pub id: u32,
    /// Default or dedicated
    pub bearer_type: BearerType,
    /// Bit rates
    pub qos: Qos,
}

impl Bearer {
    /// Create a bearer
    pub fn new(id: u32, bearer_type: BearerType, qos: Qos) -> Self {
        Self { id, bearer_type, qos }
    }

    /// Descriptor carried in CDRs: `"{bearer_type} {gbr} {mbr}"`
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Bearer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.bearer_type, self.qos.gbr, self.qos.mbr)
    }
}

impl Entity for Bearer {
    type Kind = BearerType;

    const COLLECTION: &'static str = "bearers";
    const KEY_PREFIX: &'static str = "BEA";

    fn kind(&self) -> BearerType {
        self.bearer_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qos_rejects_zero_rates() {
        assert!(Qos::new(64, 128).is_ok());
        assert_eq!(
            Qos::new(0, 128),
            Err(ConfigValidationError::InvalidQos { field: "gbr".to_string(), value: 0 })
        );
        assert!(Qos::new(64, 0).is_err());
    }

    #[test]
    fn test_descriptor() {
        let bearer = Bearer::new(123456, BearerType::Dedicated, Qos::new(256, 512).unwrap());
        assert_eq!(bearer.descriptor(), "Dedicated 256 512");
    }

    #[test]
    fn test_flat_map() {
        let bearer = Bearer::new(123456, BearerType::Default, Qos::new(64, 100).unwrap());
        let flat = bearer.to_flat_map().unwrap();

        assert_eq!(flat["id"], serde_json::json!(123456));
        assert_eq!(flat["bearer_type"], serde_json::json!("Default"));
        assert_eq!(flat["qos_gbr"], serde_json::json!(64));
        assert_eq!(flat["qos_mbr"], serde_json::json!(100));
    }
}
