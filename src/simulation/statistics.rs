//! Statistics collection and reporting
//!
//! This module contains the run statistics collected by the orchestrator.

use crate::bearer::Bearer;
use crate::cdr::CallDetailRecord;
use crate::geography::Region;
use crate::subscriber::Subscriber;
use crate::topology::NetworkElement;
use crate::types::{BearerType, CallType, ElementType, NetworkType, SubscriberType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Counts of everything a synthesis run produced
///
/// Reference data counts are replaced each time a pool is rebuilt; CDR counts
/// accumulate over every batch generated from the same pools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SynthesisStatistics {
    /// Regions per network type
    pub regions_by_network_type: BTreeMap<NetworkType, usize>,
    /// Network elements per network type
    pub elements_by_network_type: BTreeMap<NetworkType, usize>,
    /// Network elements per element type
    pub elements_by_element_type: BTreeMap<ElementType, usize>,
    /// Number of active network elements
    pub active_elements: usize,
    /// Subscribers per subscriber type
    pub subscribers_by_type: BTreeMap<SubscriberType, usize>,
    /// Bearers per bearer type
    pub bearers_by_type: BTreeMap<BearerType, usize>,

    /// Total CDRs generated
    pub total_cdrs: usize,
    /// CDRs per call type
    pub cdrs_by_call_type: BTreeMap<CallType, usize>,
    /// CDRs per destination subscriber type
    pub cdrs_by_destination_type: BTreeMap<SubscriberType, usize>,
    /// CDRs per access path
    pub cdrs_by_network_path: BTreeMap<NetworkType, usize>,

    /// Wall-clock time spent generating
    pub generation_duration: Duration,
}

impl SynthesisStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace region counts
    pub fn record_regions(&mut self, regions: &[Region]) {
        self.regions_by_network_type = count_by(regions, |r| r.network_type);
    }

    /// Replace network element counts
    pub fn record_elements(&mut self, elements: &[NetworkElement]) {
        self.elements_by_network_type = count_by(elements, |e| e.network_type);
        self.elements_by_element_type = count_by(elements, |e| e.element_type);
        self.active_elements = elements.iter().filter(|e| e.is_active()).count();
    }

    /// Replace subscriber counts
    pub fn record_subscribers(&mut self, subscribers: &[Subscriber]) {
        self.subscribers_by_type = count_by(subscribers, |s| s.subscriber_type);
    }

    /// Replace bearer counts
    pub fn record_bearers(&mut self, bearers: &[Bearer]) {
        self.bearers_by_type = count_by(bearers, |b| b.bearer_type);
    }

    /// Add a CDR batch to the running counts
    pub fn record_cdrs(&mut self, records: &[CallDetailRecord]) {
        for record in records {
            self.total_cdrs += 1;
            *self.cdrs_by_call_type.entry(record.call_type).or_default() += 1;
            *self.cdrs_by_destination_type.entry(record.destination_type).or_default() += 1;
            *self.cdrs_by_network_path.entry(record.network.network_type()).or_default() += 1;
        }
    }

    /// Add time spent generating
    pub fn add_generation_duration(&mut self, duration: Duration) {
        self.generation_duration += duration;
    }

    /// Total regions
    pub fn total_regions(&self) -> usize {
        self.regions_by_network_type.values().sum()
    }

    /// Total network elements
    pub fn total_elements(&self) -> usize {
        self.elements_by_network_type.values().sum()
    }

    /// Total subscribers
    pub fn total_subscribers(&self) -> usize {
        self.subscribers_by_type.values().sum()
    }

    /// Total bearers
    pub fn total_bearers(&self) -> usize {
        self.bearers_by_type.values().sum()
    }

    /// Percentage of CDRs with the given call type
    pub fn call_type_percentage(&self, call_type: CallType) -> f64 {
        self.percentage(self.cdrs_by_call_type.get(&call_type).copied().unwrap_or(0))
    }

    /// Percentage of CDRs terminating on the given subscriber type
    pub fn destination_percentage(&self, destination_type: SubscriberType) -> f64 {
        self.percentage(
            self.cdrs_by_destination_type
                .get(&destination_type)
                .copied()
                .unwrap_or(0),
        )
    }

    /// Percentage of CDRs on the given access path
    pub fn network_path_percentage(&self, network_type: NetworkType) -> f64 {
        self.percentage(self.cdrs_by_network_path.get(&network_type).copied().unwrap_or(0))
    }

    /// CDRs per second of generation time
    pub fn cdrs_per_second(&self) -> f64 {
        let seconds = self.generation_duration.as_secs_f64();
        if seconds > 0.0 {
            self.total_cdrs as f64 / seconds
        } else {
            0.0
        }
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_cdrs == 0 {
            0.0
        } else {
            (count as f64 / self.total_cdrs as f64) * 100.0
        }
    }

    /// Multi-line human-readable report
    pub fn generate_summary_report(&self) -> String {
        let mut output = String::new();

        output.push_str("Reference Data:\n");
        output.push_str(&format!("   Regions: {}\n", self.total_regions()));
        output.push_str(&format!(
            "   Network Elements: {} ({} active)\n",
            self.total_elements(),
            self.active_elements
        ));
        for (network_type, count) in &self.elements_by_network_type {
            output.push_str(&format!("     {}: {}\n", network_type, count));
        }
        output.push_str(&format!("   Subscribers: {}\n", self.total_subscribers()));
        for (subscriber_type, count) in &self.subscribers_by_type {
            output.push_str(&format!("     {}: {}\n", subscriber_type, count));
        }
        output.push_str(&format!("   Bearers: {}\n\n", self.total_bearers()));

        output.push_str("Call Detail Records:\n");
        output.push_str(&format!("   Total CDRs: {}\n", self.total_cdrs));
        for (call_type, count) in &self.cdrs_by_call_type {
            output.push_str(&format!(
                "     {}: {} ({:.1}%)\n",
                call_type,
                count,
                self.call_type_percentage(*call_type)
            ));
        }
        output.push_str("   Destinations:\n");
        for (destination_type, count) in &self.cdrs_by_destination_type {
            output.push_str(&format!(
                "     {}: {} ({:.1}%)\n",
                destination_type,
                count,
                self.destination_percentage(*destination_type)
            ));
        }
        output.push_str("   Access Paths:\n");
        for (network_type, count) in &self.cdrs_by_network_path {
            output.push_str(&format!(
                "     {}: {} ({:.1}%)\n",
                network_type,
                count,
                self.network_path_percentage(*network_type)
            ));
        }
        output.push_str(&format!(
            "   Duration: {:.2} seconds ({:.0} CDRs/s)\n",
            self.generation_duration.as_secs_f64(),
            self.cdrs_per_second()
        ));

        output
    }
}

impl fmt::Display for SynthesisStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

fn count_by<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bearer::Qos;

    #[test]
    fn test_empty_statistics() {
        let stats = SynthesisStatistics::new();

        assert_eq!(stats.total_cdrs, 0);
        assert_eq!(stats.total_elements(), 0);
        assert_eq!(stats.call_type_percentage(CallType::Voice), 0.0);
        assert_eq!(stats.cdrs_per_second(), 0.0);
    }

    #[test]
    fn test_reference_counts_are_replaced() {
        let mut stats = SynthesisStatistics::new();
        let bearers = vec![
            Bearer::new(100001, BearerType::Default, Qos::new(64, 128).unwrap()),
            Bearer::new(100002, BearerType::Dedicated, Qos::new(64, 128).unwrap()),
            Bearer::new(100003, BearerType::Dedicated, Qos::new(64, 128).unwrap()),
        ];

        stats.record_bearers(&bearers);
        assert_eq!(stats.total_bearers(), 3);
        assert_eq!(stats.bearers_by_type[&BearerType::Dedicated], 2);

        stats.record_bearers(&bearers[..1]);
        assert_eq!(stats.total_bearers(), 1);
        assert!(!stats.bearers_by_type.contains_key(&BearerType::Dedicated));
    }

    #[test]
    fn test_region_counts() {
        let mut stats = SynthesisStatistics::new();
        let regions = vec![
            Region::new(2000, "Nord", NetworkType::Gsm, (30.0, 31.0), (7.0, 8.0)).unwrap(),
            Region::new(2001, "Sud", NetworkType::Gsm, (31.0, 32.0), (7.0, 8.0)).unwrap(),
            Region::new(4000, "Nord-Est", NetworkType::Lte, (30.0, 31.0), (7.0, 8.0)).unwrap(),
        ];

        stats.record_regions(&regions);
        assert_eq!(stats.total_regions(), 3);
        assert_eq!(stats.regions_by_network_type[&NetworkType::Gsm], 2);
    }

    #[test]
    fn test_percentages() {
        let mut stats = SynthesisStatistics::new();
        stats.total_cdrs = 200;
        stats.cdrs_by_call_type.insert(CallType::Voice, 150);
        stats.cdrs_by_call_type.insert(CallType::Sms, 50);
        stats.cdrs_by_destination_type.insert(SubscriberType::Home, 140);

        assert_eq!(stats.call_type_percentage(CallType::Voice), 75.0);
        assert_eq!(stats.call_type_percentage(CallType::Data), 0.0);
        assert_eq!(stats.destination_percentage(SubscriberType::Home), 70.0);
    }

    #[test]
    fn test_summary_report() {
        let mut stats = SynthesisStatistics::new();
        stats.total_cdrs = 10;
        stats.cdrs_by_network_path.insert(NetworkType::Umts, 4);
        stats.cdrs_by_network_path.insert(NetworkType::Lte, 6);
        stats.add_generation_duration(Duration::from_secs(2));

        let report = stats.to_string();
        assert!(report.contains("Total CDRs: 10"));
        assert!(report.contains("3G: 4 (40.0%)"));
        assert!(report.contains("4G: 6 (60.0%)"));
        assert!(report.contains("(5 CDRs/s)"));
    }
}
