//! Enumeration types for the telecom data synthesizer
//!
//! This module contains all enumeration types used throughout the synthesizer,
//! including access-network generations, network element types, subscriber
//! categories, bearer types, call types and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access-network generation a region or network element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkType {
    /// GSM access network
    #[serde(rename = "2G")]
    Gsm,
    /// UMTS access network
    #[serde(rename = "3G")]
    Umts,
    /// LTE access network
    #[serde(rename = "4G")]
    Lte,
    /// 5G New Radio access network
    #[serde(rename = "5G")]
    Nr,
}

impl NetworkType {
    /// All generations in partitioning order
    pub const ALL: [NetworkType; 4] =
        [NetworkType::Gsm, NetworkType::Umts, NetworkType::Lte, NetworkType::Nr];

    /// First region id handed out for this generation
    pub fn region_id_base(&self) -> u32 {
        match self {
            NetworkType::Gsm => 2000,
            NetworkType::Umts => 3000,
            NetworkType::Lte => 4000,
            NetworkType::Nr => 5000,
        }
    }

    /// Whether radio cells of this generation report a location area (LAC)
    /// rather than a tracking area (TAC)
    pub fn uses_location_area(&self) -> bool {
        matches!(self, NetworkType::Gsm | NetworkType::Umts)
    }

    /// Short label used in configuration files and element names
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Gsm => "2G",
            NetworkType::Umts => "3G",
            NetworkType::Lte => "4G",
            NetworkType::Nr => "5G",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2g" | "gsm" => Ok(NetworkType::Gsm),
            "3g" | "umts" => Ok(NetworkType::Umts),
            "4g" | "lte" => Ok(NetworkType::Lte),
            "5g" | "nr" => Ok(NetworkType::Nr),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Network element types across all generations
///
/// The serialized names match the keys used in topology configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementType {
    /// Base Station Controller
    #[serde(rename = "BSC")]
    Bsc,
    /// Base Transceiver Station
    #[serde(rename = "BTS")]
    Bts,
    /// Mobile Switching Center
    #[serde(rename = "MSC")]
    Msc,
    /// Short Message Service Center
    #[serde(rename = "SMSC")]
    Smsc,
    /// Home Location Register
    #[serde(rename = "HLR")]
    Hlr,
    /// Serving GPRS Support Node
    #[serde(rename = "SGSN")]
    Sgsn,
    /// Gateway GPRS Support Node
    #[serde(rename = "GGSN")]
    Ggsn,
    /// Home Subscriber Server
    #[serde(rename = "HSS")]
    Hss,
    /// Radio Network Controller
    #[serde(rename = "RNC")]
    Rnc,
    /// 3G base stations
    #[serde(rename = "NodeBs")]
    NodeB,
    /// Mobility Management Entity
    #[serde(rename = "MME")]
    Mme,
    /// Serving Gateway
    #[serde(rename = "SGW")]
    Sgw,
    /// PDN Gateway
    #[serde(rename = "PGW")]
    Pgw,
    /// 4G base stations
    #[serde(rename = "eNodeBs")]
    ENodeB,
    /// Policy and Charging Rules Function
    #[serde(rename = "PCRF")]
    Pcrf,
    /// Access and Mobility Management Function
    #[serde(rename = "AMF")]
    Amf,
    /// Session Management Function
    #[serde(rename = "SMF")]
    Smf,
    /// User Plane Function
    #[serde(rename = "UPF")]
    Upf,
    /// Network Slice Selection Function
    #[serde(rename = "NSSF")]
    Nssf,
    /// Policy Control Function
    #[serde(rename = "PCF")]
    Pcf,
    /// Unified Data Management
    #[serde(rename = "UDM")]
    Udm,
    /// 5G base station
    #[serde(rename = "gNodeB")]
    GNodeB,
    /// 5G RAN central unit
    #[serde(rename = "CU")]
    Cu,
    /// 5G RAN distributed unit
    #[serde(rename = "DU")]
    Du,
}

impl ElementType {
    /// Whether this element sits in the radio access network and therefore
    /// carries an area code
    pub fn is_radio_access(&self) -> bool {
        matches!(
            self,
            ElementType::Bsc
                | ElementType::Bts
                | ElementType::Rnc
                | ElementType::NodeB
                | ElementType::ENodeB
                | ElementType::GNodeB
                | ElementType::Cu
                | ElementType::Du
        )
    }

    /// Configuration key for this element type
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Bsc => "BSC",
            ElementType::Bts => "BTS",
            ElementType::Msc => "MSC",
            ElementType::Smsc => "SMSC",
            ElementType::Hlr => "HLR",
            ElementType::Sgsn => "SGSN",
            ElementType::Ggsn => "GGSN",
            ElementType::Hss => "HSS",
            ElementType::Rnc => "RNC",
            ElementType::NodeB => "NodeBs",
            ElementType::Mme => "MME",
            ElementType::Sgw => "SGW",
            ElementType::Pgw => "PGW",
            ElementType::ENodeB => "eNodeBs",
            ElementType::Pcrf => "PCRF",
            ElementType::Amf => "AMF",
            ElementType::Smf => "SMF",
            ElementType::Upf => "UPF",
            ElementType::Nssf => "NSSF",
            ElementType::Pcf => "PCF",
            ElementType::Udm => "UDM",
            ElementType::GNodeB => "gNodeB",
            ElementType::Cu => "CU",
            ElementType::Du => "DU",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bsc" => Ok(ElementType::Bsc),
            "bts" => Ok(ElementType::Bts),
            "msc" => Ok(ElementType::Msc),
            "smsc" => Ok(ElementType::Smsc),
            "hlr" => Ok(ElementType::Hlr),
            "sgsn" => Ok(ElementType::Sgsn),
            "ggsn" => Ok(ElementType::Ggsn),
            "hss" => Ok(ElementType::Hss),
            "rnc" => Ok(ElementType::Rnc),
            "nodeb" | "nodebs" => Ok(ElementType::NodeB),
            "mme" => Ok(ElementType::Mme),
            "sgw" => Ok(ElementType::Sgw),
            "pgw" => Ok(ElementType::Pgw),
            "enodeb" | "enodebs" => Ok(ElementType::ENodeB),
            "pcrf" => Ok(ElementType::Pcrf),
            "amf" => Ok(ElementType::Amf),
            "smf" => Ok(ElementType::Smf),
            "upf" => Ok(ElementType::Upf),
            "nssf" => Ok(ElementType::Nssf),
            "pcf" => Ok(ElementType::Pcf),
            "udm" => Ok(ElementType::Udm),
            "gnodeb" | "gnodebs" => Ok(ElementType::GNodeB),
            "cu" => Ok(ElementType::Cu),
            "du" => Ok(ElementType::Du),
            _ => Err(format!("Unknown element type: {}", s)),
        }
    }
}

/// Operational status of a network element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementStatus {
    /// Element is carrying traffic
    Active,
    /// Element is provisioned but out of service
    Inactive,
}

impl fmt::Display for ElementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementStatus::Active => write!(f, "Active"),
            ElementStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Subscriber category relative to the home network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberType {
    /// Subscriber of the home operator
    Home,
    /// Subscriber of another operator in the same country
    National,
    /// Subscriber of a foreign operator
    International,
}

impl SubscriberType {
    /// All subscriber categories in generation order
    pub const ALL: [SubscriberType; 3] =
        [SubscriberType::Home, SubscriberType::National, SubscriberType::International];

    /// Lowercase label used in configuration and record keys
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriberType::Home => "home",
            SubscriberType::National => "national",
            SubscriberType::International => "international",
        }
    }
}

impl fmt::Display for SubscriberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" | "local" => Ok(SubscriberType::Home),
            "national" => Ok(SubscriberType::National),
            "international" => Ok(SubscriberType::International),
            _ => Err(format!("Unknown subscriber type: {}", s)),
        }
    }
}

/// Billing arrangement of a subscriber account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Pay-as-you-go account
    Prepaid,
    /// Monthly billed account
    Postpaid,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Prepaid => write!(f, "prepaid"),
            AccountType::Postpaid => write!(f, "postpaid"),
        }
    }
}

/// Lifecycle status of a subscriber account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account in good standing
    Active,
    /// Account not currently in use
    Inactive,
    /// Account barred by the operator
    Suspended,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Inactive => write!(f, "inactive"),
            AccountStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// EPS bearer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BearerType {
    /// Default bearer established at attach
    Default,
    /// Dedicated bearer with its own QoS
    Dedicated,
}

impl fmt::Display for BearerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BearerType::Default => write!(f, "Default"),
            BearerType::Dedicated => write!(f, "Dedicated"),
        }
    }
}

impl FromStr for BearerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "default bearer" => Ok(BearerType::Default),
            "dedicated" | "dedicated bearer" => Ok(BearerType::Dedicated),
            _ => Err(format!("Unknown bearer type: {}", s)),
        }
    }
}

/// Kind of activity a CDR describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CallType {
    /// Circuit or VoLTE voice call
    Voice,
    /// Short message
    #[serde(rename = "SMS")]
    Sms,
    /// Packet data session
    Data,
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallType::Voice => write!(f, "Voice"),
            CallType::Sms => write!(f, "SMS"),
            CallType::Data => write!(f, "Data"),
        }
    }
}

/// Direction of a call relative to the recording subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallDirection {
    /// Mobile originated
    Outgoing,
    /// Mobile terminated
    Incoming,
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallDirection::Outgoing => write!(f, "Outgoing"),
            CallDirection::Incoming => write!(f, "Incoming"),
        }
    }
}

/// Output format options for generated records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JSON lines
    Json,
    /// CSV with one column per flattened field
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
