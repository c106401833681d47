//! Call detail records

use crate::repository::Entity;
use crate::types::{CallDirection, CallType, NetworkType, SubscriberId, SubscriberType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Radio and core network context of a CDR, by access path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NetworkContext {
    /// Circuit-switched 3G path
    #[serde(rename = "3G")]
    Umts {
        /// Serving radio-access element
        element_id: u32,
        /// Region the serving element is placed in
        region_id: u32,
        /// Controlling RNC, if the topology has one
        rnc: Option<u32>,
        /// Location area code of the serving element
        lac: u32,
        /// Cell of the serving element
        cell_id: u16,
        /// MSC address
        msc_address: Option<Ipv4Addr>,
        /// SGSN address
        sgsn_address: Option<Ipv4Addr>,
        /// GGSN address
        ggsn_address: Option<Ipv4Addr>,
    },
    /// Packet-switched 4G path
    #[serde(rename = "4G")]
    Lte {
        /// Serving eNodeB
        element_id: u32,
        /// Region the serving element is placed in
        region_id: u32,
        /// Tracking area code of the serving element
        tac: u32,
        /// Serving gateway address
        sgw_address: Option<Ipv4Addr>,
        /// PDN gateway address
        pgw_address: Option<Ipv4Addr>,
        /// MME address
        mme_address: Option<Ipv4Addr>,
        /// Bearer the session runs on
        bearer_id: u32,
        /// Bearer descriptor, `"{bearer_type} {gbr} {mbr}"`
        bearer: String,
    },
}

impl NetworkContext {
    /// Access generation of this path
    pub fn network_type(&self) -> NetworkType {
        match self {
            NetworkContext::Umts { .. } => NetworkType::Umts,
            NetworkContext::Lte { .. } => NetworkType::Lte,
        }
    }

    /// Serving radio-access element id
    pub fn element_id(&self) -> u32 {
        match self {
            NetworkContext::Umts { element_id, .. } | NetworkContext::Lte { element_id, .. } => {
                *element_id
            }
        }
    }

    /// Region of the serving element
    pub fn region_id(&self) -> u32 {
        match self {
            NetworkContext::Umts { region_id, .. } | NetworkContext::Lte { region_id, .. } => {
                *region_id
            }
        }
    }
}

/// A single synthesized call activity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDetailRecord {
    /// Strictly increasing call identifier
    pub call_id: u64,
    /// Voice, SMS or data
    pub call_type: CallType,
    /// Always outgoing, only home subscribers originate
    pub direction: CallDirection,
    /// Category of the called party
    pub destination_type: SubscriberType,
    /// Call setup instant
    pub start_time: DateTime<Utc>,
    /// Call release instant
    pub end_time: DateTime<Utc>,
    /// `end_time - start_time` in seconds
    pub duration_seconds: u32,
    /// Originating subscriber
    pub calling_subscriber_id: SubscriberId,
    /// Terminating subscriber
    pub called_subscriber_id: SubscriberId,
    /// Originating MSISDN
    pub msisdn: String,
    /// Terminating MSISDN
    pub called_msisdn: String,
    /// Originating IMSI
    pub imsi: String,
    /// Originating IMEI
    pub imei: String,
    /// Access path context
    pub network: NetworkContext,
}

impl Entity for CallDetailRecord {
    type Kind = CallType;

    const COLLECTION: &'static str = "cdrs";
    const KEY_PREFIX: &'static str = "CDR";

    fn kind(&self) -> CallType {
        self.call_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record(network: NetworkContext) -> CallDetailRecord {
        let end_time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        CallDetailRecord {
            call_id: 1_714_564_800,
            call_type: CallType::Voice,
            direction: CallDirection::Outgoing,
            destination_type: SubscriberType::National,
            start_time: end_time - chrono::Duration::seconds(90),
            end_time,
            duration_seconds: 90,
            calling_subscriber_id: SubscriberId::new(),
            called_subscriber_id: SubscriberId::new(),
            msisdn: "+21620123456".to_string(),
            called_msisdn: "+21640123456".to_string(),
            imsi: "605002123456789".to_string(),
            imei: "490154203237518".to_string(),
            network,
        }
    }

    #[test]
    fn test_umts_flat_map() {
        let record = sample_record(NetworkContext::Umts {
            element_id: 12,
            region_id: 3001,
            rnc: Some(10),
            lac: 3001,
            cell_id: 4242,
            msc_address: Some(Ipv4Addr::new(192, 168, 1, 1)),
            sgsn_address: None,
            ggsn_address: Some(Ipv4Addr::new(192, 168, 2, 2)),
        });
        let flat = record.to_flat_map().unwrap();

        assert_eq!(flat["network_type"], serde_json::json!("3G"));
        assert_eq!(flat["network_lac"], serde_json::json!(3001));
        assert_eq!(flat["network_msc_address"], serde_json::json!("192.168.1.1"));
        assert_eq!(flat["network_sgsn_address"], serde_json::Value::Null);
        assert_eq!(flat["call_type"], serde_json::json!("Voice"));
        assert_eq!(flat["destination_type"], serde_json::json!("national"));
        assert!(flat["calling_subscriber_id"].as_str().unwrap().starts_with("SUB_"));
    }

    #[test]
    fn test_lte_context_accessors() {
        let context = NetworkContext::Lte {
            element_id: 80,
            region_id: 4003,
            tac: 4003,
            sgw_address: None,
            pgw_address: None,
            mme_address: None,
            bearer_id: 123456,
            bearer: "Default 64 128".to_string(),
        };

        assert_eq!(context.network_type(), NetworkType::Lte);
        assert_eq!(context.element_id(), 80);
        assert_eq!(context.region_id(), 4003);
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = sample_record(NetworkContext::Lte {
            element_id: 80,
            region_id: 4003,
            tac: 4003,
            sgw_address: Some(Ipv4Addr::new(192, 168, 0, 7)),
            pgw_address: None,
            mme_address: None,
            bearer_id: 123456,
            bearer: "Dedicated 256 512".to_string(),
        });

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"4G\""));
        let parsed: CallDetailRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
