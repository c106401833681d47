//! Configuration structures for the telecom data synthesizer
//!
//! This module contains the synthesis configuration, its per-stage sections and
//! the validation logic that runs before any data is generated.

use super::{ElementType, NetworkType, OutputFormat, SubscriberType};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Bounds applied while validating configuration values
pub mod limits {
    /// Largest number of cells a single grid may hold before its region ids
    /// would collide with the next network type's id base
    pub const MAX_GRID_CELLS: usize = 1000;

    /// Shortest allowed subscriber number
    pub const MIN_SUBSCRIBER_DIGITS: usize = 1;
    /// Longest allowed subscriber number
    pub const MAX_SUBSCRIBER_DIGITS: usize = 12;

    /// Shortest allowed MSISDN, not counting a leading `+`
    pub const MIN_MSISDN_DIGITS: usize = 6;
    /// Longest allowed MSISDN, not counting a leading `+`
    pub const MAX_MSISDN_DIGITS: usize = 15;

    /// Default subscriber-number digit count
    pub const DEFAULT_SUBSCRIBER_DIGITS: usize = 6;
}

/// Grid layout of one network type's regions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridSpec {
    /// Number of latitude bands
    pub rows: usize,
    /// Number of longitude bands
    pub cols: usize,
    /// One name per cell in row-major order
    pub region_names: Vec<String>,
}

impl GridSpec {
    /// Create a grid spec from string slices
    pub fn new(rows: usize, cols: usize, region_names: &[&str]) -> Self {
        Self {
            rows,
            cols,
            region_names: region_names.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Validate the grid layout for the given network type
    pub fn validate(&self, network_type: NetworkType) -> Result<(), ConfigValidationError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigValidationError::InvalidGridDimensions {
                network_type,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let cells = match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= limits::MAX_GRID_CELLS => cells,
            cells => {
                return Err(ConfigValidationError::GridTooLarge {
                    network_type,
                    cells: cells.unwrap_or(usize::MAX),
                })
            }
        };

        if self.region_names.len() != cells {
            return Err(ConfigValidationError::RegionNameMismatch {
                network_type,
                expected: cells,
                actual: self.region_names.len(),
            });
        }

        Ok(())
    }
}

/// Country bounding box and per-network-type grids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoConfig {
    /// Country the bounding box describes
    pub country: String,
    /// Latitude range as `[min, max]`
    pub latitude: [f64; 2],
    /// Longitude range as `[min, max]`
    pub longitude: [f64; 2],
    /// Grid per network type; missing network types get no regions
    pub grids: BTreeMap<NetworkType, GridSpec>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        let three_bands = GridSpec::new(3, 1, &["Nord", "Centre", "Sud"]);
        let six_cells = GridSpec::new(
            3,
            2,
            &["Nord-Est", "Nord-West", "Centre-Est", "Centre-West", "Sud-Est", "Sud-West"],
        );

        let mut grids = BTreeMap::new();
        grids.insert(NetworkType::Gsm, three_bands.clone());
        grids.insert(NetworkType::Umts, three_bands);
        grids.insert(NetworkType::Lte, six_cells.clone());
        grids.insert(NetworkType::Nr, six_cells);

        Self {
            country: "Tunisia".to_string(),
            latitude: [30.24, 37.54],
            longitude: [7.52, 11.60],
            grids,
        }
    }
}

impl GeoConfig {
    /// Validate the bounding box and every grid
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_axis("latitude", self.latitude, 90.0)?;
        validate_axis("longitude", self.longitude, 180.0)?;

        for (network_type, grid) in &self.grids {
            grid.validate(*network_type)?;
        }

        Ok(())
    }
}

fn validate_axis(axis: &str, range: [f64; 2], limit: f64) -> Result<(), ConfigValidationError> {
    let [min, max] = range;
    let in_limits = |v: f64| v.is_finite() && (-limit..=limit).contains(&v);

    if !in_limits(min) || !in_limits(max) || min >= max {
        return Err(ConfigValidationError::InvalidBoundingBox {
            axis: axis.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// Element counts per network type and element type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopologyConfig {
    /// Element type -> count, per network type; missing entries mean zero
    pub element_counts: BTreeMap<NetworkType, BTreeMap<ElementType, usize>>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        use ElementType::*;

        let counts = |entries: &[(ElementType, usize)]| -> BTreeMap<ElementType, usize> {
            entries.iter().copied().collect()
        };

        let mut element_counts = BTreeMap::new();
        element_counts.insert(
            NetworkType::Gsm,
            counts(&[(Bsc, 20), (Bts, 20), (Msc, 1), (Smsc, 1), (Hlr, 1)]),
        );
        element_counts.insert(
            NetworkType::Umts,
            counts(&[(Sgsn, 1), (Ggsn, 1), (Msc, 1), (Hss, 1), (Rnc, 1), (NodeB, 20)]),
        );
        element_counts.insert(
            NetworkType::Lte,
            counts(&[(Mme, 1), (Sgw, 1), (Pgw, 1), (Hss, 1), (ENodeB, 20), (Pcrf, 1)]),
        );
        element_counts.insert(
            NetworkType::Nr,
            counts(&[
                (Amf, 1),
                (Smf, 1),
                (Upf, 1),
                (Nssf, 1),
                (Pcf, 1),
                (Udm, 1),
                (GNodeB, 20),
                (Cu, 1),
                (Du, 1),
            ]),
        );

        Self { element_counts }
    }
}

/// National destination code specification
///
/// Either a single code or a list of inclusive `[low, high]` ranges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NdcSpec {
    /// Always use this code
    Single(u32),
    /// Pick a range uniformly, then a code uniformly within it
    Ranges(Vec<[u32; 2]>),
}

/// MSISDN numbering plan and head count for one subscriber type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MsisdnPlan {
    /// Number of subscribers of this type to generate
    pub count: usize,

    /// Country code, optionally with a leading `+` (home and national)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// National destination codes (home and national)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndc: Option<NdcSpec>,

    /// International prefixes, optionally with a leading `+` (international)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<Vec<String>>,

    /// Length of the subscriber number that follows the code or prefix
    #[serde(default = "default_subscriber_digits")]
    pub digits: usize,
}

fn default_subscriber_digits() -> usize {
    limits::DEFAULT_SUBSCRIBER_DIGITS
}

impl MsisdnPlan {
    /// National-style plan: country code + NDC + subscriber number
    pub fn national(count: usize, country_code: &str, ndc: NdcSpec) -> Self {
        Self {
            count,
            country_code: Some(country_code.to_string()),
            ndc: Some(ndc),
            prefixes: None,
            digits: limits::DEFAULT_SUBSCRIBER_DIGITS,
        }
    }

    /// International plan: one of the prefixes + subscriber number
    pub fn international(count: usize, prefixes: &[&str], digits: usize) -> Self {
        Self {
            count,
            country_code: None,
            ndc: None,
            prefixes: Some(prefixes.iter().map(|p| p.to_string()).collect()),
            digits,
        }
    }

    /// Validate the plan for the given subscriber type
    pub fn validate(&self, subscriber_type: SubscriberType) -> Result<(), ConfigValidationError> {
        let digits = self.digits;
        if !(limits::MIN_SUBSCRIBER_DIGITS..=limits::MAX_SUBSCRIBER_DIGITS).contains(&digits) {
            return Err(ConfigValidationError::InvalidDigitCount { subscriber_type, digits });
        }

        match subscriber_type {
            SubscriberType::Home | SubscriberType::National => {
                let country_code = self.country_code.as_deref().ok_or_else(|| {
                    ConfigValidationError::MissingParameter {
                        subscriber_type,
                        parameter: "country_code".to_string(),
                    }
                })?;
                validate_numeric(subscriber_type, "country_code", country_code)?;

                match &self.ndc {
                    None => {
                        return Err(ConfigValidationError::MissingParameter {
                            subscriber_type,
                            parameter: "ndc".to_string(),
                        })
                    }
                    Some(NdcSpec::Single(_)) => {}
                    Some(NdcSpec::Ranges(ranges)) => {
                        if ranges.is_empty() {
                            return Err(ConfigValidationError::InvalidParameter {
                                subscriber_type,
                                parameter: "ndc".to_string(),
                                reason: "range list is empty".to_string(),
                            });
                        }
                        if let Some([low, high]) = ranges.iter().find(|[low, high]| low > high) {
                            return Err(ConfigValidationError::InvalidParameter {
                                subscriber_type,
                                parameter: "ndc".to_string(),
                                reason: format!("range [{}, {}] has low > high", low, high),
                            });
                        }
                    }
                }
            }
            SubscriberType::International => {
                let prefixes = match &self.prefixes {
                    Some(prefixes) if !prefixes.is_empty() => prefixes,
                    _ => {
                        return Err(ConfigValidationError::MissingParameter {
                            subscriber_type,
                            parameter: "prefixes".to_string(),
                        })
                    }
                };
                for prefix in prefixes {
                    validate_numeric(subscriber_type, "prefixes", prefix)?;
                }
            }
        }

        Ok(())
    }
}

fn validate_numeric(
    subscriber_type: SubscriberType,
    parameter: &str,
    value: &str,
) -> Result<(), ConfigValidationError> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigValidationError::InvalidParameter {
            subscriber_type,
            parameter: parameter.to_string(),
            reason: format!("'{}' is not numeric", value),
        });
    }
    Ok(())
}

/// Mobile country code and mobile network code of the home operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plmn {
    /// Mobile country code (3 digits)
    pub mcc: u16,
    /// Mobile network code (up to 3 digits)
    pub mnc: u16,
}

/// Subscriber identity generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfig {
    /// Home operator PLMN used for home subscriber IMSIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_plmn: Option<Plmn>,

    /// Numbering plan per subscriber type; missing types get no subscribers
    pub subscribers: BTreeMap<SubscriberType, MsisdnPlan>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        let mut subscribers = BTreeMap::new();
        subscribers.insert(
            SubscriberType::Home,
            MsisdnPlan::national(
                100,
                "+216",
                NdcSpec::Ranges(vec![[20, 29], [50, 59], [90, 99]]),
            ),
        );
        subscribers.insert(
            SubscriberType::National,
            MsisdnPlan::national(50, "+216", NdcSpec::Ranges(vec![[40, 49]])),
        );
        subscribers.insert(
            SubscriberType::International,
            MsisdnPlan::international(20, &["+33", "+39", "+49", "+213"], 9),
        );

        Self {
            home_plmn: Some(Plmn { mcc: 605, mnc: 2 }),
            subscribers,
        }
    }
}

impl IdentityConfig {
    /// Validate every numbering plan and the home PLMN
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(plmn) = self.home_plmn {
            if !(100..=999).contains(&plmn.mcc) || plmn.mnc > 999 {
                return Err(ConfigValidationError::InvalidPlmn { mcc: plmn.mcc, mnc: plmn.mnc });
            }
        }

        for (subscriber_type, plan) in &self.subscribers {
            plan.validate(*subscriber_type)?;
        }

        Ok(())
    }

    /// Total number of subscribers across all types
    pub fn total_subscribers(&self) -> usize {
        self.subscribers.values().map(|plan| plan.count).sum()
    }

    /// Number of subscribers configured for one type, zero without a plan
    pub fn count_for(&self, subscriber_type: SubscriberType) -> usize {
        self.subscribers
            .get(&subscriber_type)
            .map_or(0, |plan| plan.count)
    }

    /// Check that every CDR destination pool can be drawn from
    ///
    /// Calls originate from home subscribers and home destinations exclude
    /// the caller, so two home subscribers are needed.
    pub fn validate_for_cdrs(&self) -> Result<(), ConfigValidationError> {
        for subscriber_type in SubscriberType::ALL {
            let required = match subscriber_type {
                SubscriberType::Home => 2,
                SubscriberType::National | SubscriberType::International => 1,
            };
            let actual = self.count_for(subscriber_type);
            if actual < required {
                return Err(ConfigValidationError::InsufficientSubscribers {
                    subscriber_type,
                    required,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Guaranteed and maximum bit rates in kbps
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QosConfig {
    /// Guaranteed bit rate
    pub gbr: u32,
    /// Maximum bit rate
    pub mbr: u32,
}

/// Bearer catalog settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BearerConfig {
    /// Number of bearers to generate
    pub count: usize,

    /// Probability that a bearer is dedicated rather than default (0.0-1.0)
    pub dedicated_probability: f64,

    /// Fixed QoS for every bearer; generated per bearer when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qos: Option<QosConfig>,
}

impl Default for BearerConfig {
    fn default() -> Self {
        Self {
            count: 20,
            dedicated_probability: 0.5,
            qos: None,
        }
    }
}

impl BearerConfig {
    /// Validate the bearer settings
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_percentage("bearers.dedicated_probability", self.dedicated_probability)?;

        if let Some(qos) = self.qos {
            if qos.gbr == 0 {
                return Err(ConfigValidationError::InvalidQos {
                    field: "gbr".to_string(),
                    value: qos.gbr,
                });
            }
            if qos.mbr == 0 {
                return Err(ConfigValidationError::InvalidQos {
                    field: "mbr".to_string(),
                    value: qos.mbr,
                });
            }
        }

        // 900000 distinct ids exist
        if self.count > 900_000 {
            return Err(ConfigValidationError::TooManyBearers(self.count));
        }

        Ok(())
    }
}

/// CDR batch settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CdrConfig {
    /// Number of CDRs to generate
    pub count: usize,

    /// Switch dump window in minutes (at least 1)
    pub window_minutes: u32,

    /// Instant the records are generated relative to; the current time when
    /// omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for CdrConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            window_minutes: 15,
            reference_time: None,
        }
    }
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "telco-synth",
    version = "0.1.0",
    about = "Telco Synth - Generates synthetic mobile network reference data and CDRs",
    long_about = "Generates a fake but internally consistent mobile network: geographic regions, network elements, subscribers and bearers, then synthesizes call detail records that tie them together. No real subscriber data is involved.

EXAMPLES:
    # Run with default settings (Tunisia reference setup)
    telco-synth

    # Use a configuration file
    telco-synth --config config.json

    # Override specific settings
    telco-synth --cdr-count 50000 --window-minutes 30 --seed 42

    # Write CDRs as CSV and dump the reference data next to them
    telco-synth --output-format csv --output cdrs.csv --reference-output reference.jsonl

    # Generate configuration template
    telco-synth --print-config > my-config.json

    # Validate configuration without running
    telco-synth --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of CDRs to generate
    #[arg(
        long,
        help = "Number of CDRs to generate",
        long_help = "Number of call detail records in the batch. Default: 1000"
    )]
    pub cdr_count: Option<usize>,

    /// Switch dump window in minutes
    #[arg(
        long,
        help = "Switch dump window in minutes",
        long_help = "CDR end times fall between 1 and this many minutes before the reference time. Must be at least 1. Default: 15"
    )]
    pub window_minutes: Option<u32>,

    /// Reference instant for CDR timestamps (RFC 3339)
    #[arg(
        long,
        help = "Reference time for CDRs (RFC 3339)",
        long_help = "Pin the instant CDR timestamps are computed from, e.g. 2024-05-01T12:00:00Z. Defaults to the current time."
    )]
    pub reference_time: Option<String>,

    /// Number of home subscribers
    #[arg(long, help = "Number of home subscribers")]
    pub home_subscribers: Option<usize>,

    /// Number of national subscribers
    #[arg(long, help = "Number of national subscribers")]
    pub national_subscribers: Option<usize>,

    /// Number of international subscribers
    #[arg(long, help = "Number of international subscribers")]
    pub international_subscribers: Option<usize>,

    /// Number of bearers
    #[arg(long, help = "Number of bearers in the catalog")]
    pub bearer_count: Option<usize>,

    /// Output format for generated CDRs
    #[arg(
        long,
        help = "Output format (json or csv)",
        long_help = "Output format for generated CDRs. Supported formats: json, csv. Default: json"
    )]
    pub output_format: Option<String>,

    /// Output path for CDRs
    #[arg(short, long, help = "Output path for CDRs (default: stdout)")]
    pub output: Option<String>,

    /// Output path for the reference data snapshot
    #[arg(long, help = "Output path for the reference data JSONL snapshot")]
    pub reference_output: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without generating data
    #[arg(long, help = "Validate configuration without generating data")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
///
/// Each present section replaces the corresponding default section whole.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Country bounding box and grids
    pub geography: Option<GeoConfig>,

    /// Element counts
    pub topology: Option<TopologyConfig>,

    /// Subscriber numbering plans
    pub identity: Option<IdentityConfig>,

    /// Bearer catalog settings
    pub bearers: Option<BearerConfig>,

    /// CDR batch settings
    pub cdr: Option<CdrConfig>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for generated CDRs
    pub output_format: Option<String>,

    /// Output path for CDRs
    pub output: Option<String>,

    /// Output path for the reference data snapshot
    pub reference_output: Option<String>,
}

/// Configuration for a synthesis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisConfig {
    /// Country bounding box and grids
    pub geography: GeoConfig,

    /// Element counts
    pub topology: TopologyConfig,

    /// Subscriber numbering plans
    pub identity: IdentityConfig,

    /// Bearer catalog settings
    pub bearers: BearerConfig,

    /// CDR batch settings
    pub cdr: CdrConfig,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for generated CDRs
    pub output_format: String,

    /// Output path for CDRs (stdout when absent)
    pub output: Option<String>,

    /// Output path for the reference data snapshot
    pub reference_output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// Command line argument could not be interpreted
    #[error("Invalid value for --{argument}: {reason}")]
    InvalidArgument {
        /// Name of the argument
        argument: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Validation errors for synthesis configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Bounding box is outside geographic limits or empty
    #[error("Invalid {axis} range [{min}, {max}]: values must be within geographic limits and min < max")]
    InvalidBoundingBox {
        /// Either "latitude" or "longitude"
        axis: String,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Grid has a zero dimension
    #[error("Grid for {network_type} must have at least one row and column, got {rows}x{cols}")]
    InvalidGridDimensions {
        /// Network type of the grid
        network_type: NetworkType,
        /// Configured rows
        rows: usize,
        /// Configured columns
        cols: usize,
    },

    /// Grid has more cells than its id range allows
    #[error("Grid for {network_type} has {cells} cells, at most 1000 are allowed")]
    GridTooLarge {
        /// Network type of the grid
        network_type: NetworkType,
        /// rows * cols
        cells: usize,
    },

    /// Region name count does not match the grid size
    #[error("Grid for {network_type} needs {expected} region names, got {actual}")]
    RegionNameMismatch {
        /// Network type of the grid
        network_type: NetworkType,
        /// rows * cols
        expected: usize,
        /// Number of names given
        actual: usize,
    },

    /// Required numbering parameter is missing
    #[error("Missing '{parameter}' for {subscriber_type} subscribers")]
    MissingParameter {
        /// Subscriber type the plan belongs to
        subscriber_type: SubscriberType,
        /// Name of the missing parameter
        parameter: String,
    },

    /// Numbering parameter has an unusable value
    #[error("Invalid '{parameter}' for {subscriber_type} subscribers: {reason}")]
    InvalidParameter {
        /// Subscriber type the plan belongs to
        subscriber_type: SubscriberType,
        /// Name of the parameter
        parameter: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Subscriber number length is out of range
    #[error("Invalid 'digits' for {subscriber_type} subscribers: {digits} (must be between 1 and 12)")]
    InvalidDigitCount {
        /// Subscriber type the plan belongs to
        subscriber_type: SubscriberType,
        /// Configured digit count
        digits: usize,
    },

    /// Generated MSISDN length is out of range
    #[error("MSISDN {msisdn} for {subscriber_type} subscribers must have 6 to 15 digits")]
    InvalidMsisdnLength {
        /// Subscriber type the plan belongs to
        subscriber_type: SubscriberType,
        /// Offending MSISDN
        msisdn: String,
    },

    /// Too few subscribers of a type to synthesize CDRs
    #[error("CDR synthesis needs at least {required} {subscriber_type} subscribers, got {actual}")]
    InsufficientSubscribers {
        /// Subscriber type with too few subscribers
        subscriber_type: SubscriberType,
        /// Minimum count
        required: usize,
        /// Configured count
        actual: usize,
    },

    /// Home PLMN is out of range
    #[error("Invalid home PLMN: mcc {mcc} must be 100-999 and mnc {mnc} must be 0-999")]
    InvalidPlmn {
        /// Mobile country code
        mcc: u16,
        /// Mobile network code
        mnc: u16,
    },

    /// QoS rate is not positive
    #[error("Invalid QoS {field}: {value} (must be greater than 0)")]
    InvalidQos {
        /// Either "gbr" or "mbr"
        field: String,
        /// The rejected rate
        value: u32,
    },

    /// Bearer count exceeds the id space
    #[error("Bearer count {0} exceeds the 900000 available bearer ids")]
    TooManyBearers(usize),

    /// Switch dump window is too short
    #[error("Switch dump window must be at least 1 minute, got {0}")]
    InvalidWindow(u32),

    /// Percentage value is out of range
    #[error("Invalid percentage for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidPercentage {
        /// Name of the field with invalid percentage
        field: String,
        /// The invalid percentage value
        value: f64,
    },

    /// Output format is not supported
    #[error("Unknown output format: {0} (supported: json, csv)")]
    InvalidOutputFormat(String),
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            geography: GeoConfig::default(),
            topology: TopologyConfig::default(),
            identity: IdentityConfig::default(),
            bearers: BearerConfig::default(),
            cdr: CdrConfig::default(),
            seed: None,
            output_format: "json".to_string(),
            output: None,
            reference_output: None,
        }
    }
}

impl SynthesisConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            geography: config_file.geography.unwrap_or(defaults.geography),
            topology: config_file.topology.unwrap_or(defaults.topology),
            identity: config_file.identity.unwrap_or(defaults.identity),
            bearers: config_file.bearers.unwrap_or(defaults.bearers),
            cdr: config_file.cdr.unwrap_or(defaults.cdr),
            seed: config_file.seed.or(defaults.seed),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            output: config_file.output.or(defaults.output),
            reference_output: config_file.reference_output.or(defaults.reference_output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.cdr_count {
            config.cdr.count = value;
        }
        if let Some(value) = args.window_minutes {
            config.cdr.window_minutes = value;
        }
        if let Some(value) = args.reference_time {
            let parsed = DateTime::parse_from_rfc3339(&value).map_err(|e| {
                ConfigError::InvalidArgument {
                    argument: "reference-time".to_string(),
                    reason: e.to_string(),
                }
            })?;
            config.cdr.reference_time = Some(parsed.with_timezone(&Utc));
        }

        let subscriber_overrides = [
            (SubscriberType::Home, args.home_subscribers),
            (SubscriberType::National, args.national_subscribers),
            (SubscriberType::International, args.international_subscribers),
        ];
        for (subscriber_type, count) in subscriber_overrides {
            if let Some(count) = count {
                match config.identity.subscribers.get_mut(&subscriber_type) {
                    Some(plan) => plan.count = count,
                    None => {
                        return Err(ConfigError::InvalidArgument {
                            argument: format!("{}-subscribers", subscriber_type),
                            reason: format!(
                                "no numbering plan configured for {} subscribers",
                                subscriber_type
                            ),
                        })
                    }
                }
            }
        }

        if let Some(value) = args.bearer_count {
            config.bearers.count = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }
        if let Some(value) = args.reference_output {
            config.reference_output = Some(value);
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }

        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.geography.validate()?;
        self.identity.validate()?;
        if self.cdr.count > 0 {
            self.identity.validate_for_cdrs()?;
        }
        self.bearers.validate()?;

        if self.cdr.window_minutes == 0 {
            return Err(ConfigValidationError::InvalidWindow(self.cdr.window_minutes));
        }

        if self.get_output_format().is_err() {
            return Err(ConfigValidationError::InvalidOutputFormat(self.output_format.clone()));
        }

        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}

fn validate_percentage(field: &str, value: f64) -> Result<(), ConfigValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigValidationError::InvalidPercentage {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
