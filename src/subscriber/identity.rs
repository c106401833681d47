//! Subscriber identity generation
//!
//! This module generates MSISDNs from numbering plans, IMSIs, Luhn-valid
//! IMEIs and SIM identifiers, and assembles them into subscribers.

use crate::simulation::SynthesisResult;
use crate::subscriber::Subscriber;
use crate::types::{
    limits, AccountStatus, AccountType, ConfigValidationError, IdentityConfig, MsisdnPlan,
    NdcSpec, Plmn, SubscriberId, SubscriberType,
};
use rand::{prelude::*, rngs::StdRng, RngCore, SeedableRng};
use std::fmt;
use tracing::{debug, instrument};

/// Probability that an account is prepaid
const PREPAID_PROBABILITY: f64 = 0.8;

/// Compute the Luhn check digit for a string of decimal digits
///
/// Returns `None` if the payload contains anything but ASCII digits.
pub fn luhn_check_digit(payload: &str) -> Option<u8> {
    let mut sum = 0u32;
    // Doubling starts at the rightmost payload digit
    for (i, c) in payload.chars().rev().enumerate() {
        let mut digit = c.to_digit(10)?;
        if i % 2 == 0 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    Some(((10 - sum % 10) % 10) as u8)
}

/// Whether a digit string (check digit included) passes the Luhn check
pub fn is_luhn_valid(number: &str) -> bool {
    if number.len() < 2 {
        return false;
    }
    let (payload, check) = number.split_at(number.len() - 1);
    match (luhn_check_digit(payload), check.chars().next().and_then(|c| c.to_digit(10))) {
        (Some(expected), Some(actual)) => u32::from(expected) == actual,
        _ => false,
    }
}

/// Generator for subscriber identities
pub struct IdentityFactory {
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for IdentityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityFactory").finish_non_exhaustive()
    }
}

impl Default for IdentityFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityFactory {
    /// Create a new identity factory
    pub fn new() -> Self {
        Self { rng: Box::new(thread_rng()) }
    }

    /// Create a new identity factory with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Box::new(StdRng::seed_from_u64(seed)) }
    }

    /// Generate every configured subscriber
    ///
    /// The whole configuration is validated before anything is generated.
    #[instrument(skip(self, config), fields(total = config.total_subscribers()))]
    pub fn generate_subscribers(&mut self, config: &IdentityConfig) -> SynthesisResult<Vec<Subscriber>> {
        config.validate()?;

        let mut subscribers = Vec::with_capacity(config.total_subscribers());
        for (&subscriber_type, plan) in &config.subscribers {
            for _ in 0..plan.count {
                subscribers.push(self.generate_subscriber(subscriber_type, plan, config.home_plmn)?);
            }
            debug!(%subscriber_type, count = plan.count, "Subscribers generated");
        }

        crate::sim_event!(info, "Subscribers generated", count = subscribers.len());
        Ok(subscribers)
    }

    /// Generate one subscriber of the given type
    pub fn generate_subscriber(
        &mut self,
        subscriber_type: SubscriberType,
        plan: &MsisdnPlan,
        home_plmn: Option<Plmn>,
    ) -> SynthesisResult<Subscriber> {
        let msisdn = self.generate_msisdn(subscriber_type, plan)?;
        let plmn = match subscriber_type {
            SubscriberType::Home => home_plmn,
            SubscriberType::National | SubscriberType::International => None,
        };

        Ok(Subscriber {
            id: SubscriberId::from_rng(&mut self.rng),
            subscriber_type,
            msisdn,
            imsi: self.generate_imsi(plmn),
            imei: self.generate_imei(),
            sim_id: self.generate_sim_id(),
            account_type: self.generate_account_type(),
            account_status: self.generate_account_status(),
        })
    }

    /// Generate an MSISDN following the subscriber type's numbering plan
    pub fn generate_msisdn(
        &mut self,
        subscriber_type: SubscriberType,
        plan: &MsisdnPlan,
    ) -> SynthesisResult<String> {
        plan.validate(subscriber_type)?;

        let head = match subscriber_type {
            SubscriberType::Home | SubscriberType::National => {
                let country_code = plan.country_code.as_deref().unwrap_or_default();
                let ndc = match &plan.ndc {
                    Some(NdcSpec::Single(ndc)) => *ndc,
                    Some(NdcSpec::Ranges(ranges)) => {
                        let [low, high] = ranges[self.rng.gen_range(0..ranges.len())];
                        self.rng.gen_range(low..=high)
                    }
                    None => 0,
                };
                format!("{}{}", country_code, ndc)
            }
            SubscriberType::International => {
                let prefixes = plan.prefixes.as_deref().unwrap_or_default();
                prefixes[self.rng.gen_range(0..prefixes.len())].clone()
            }
        };

        let msisdn = format!("{}{}", head, self.generate_subscriber_number(plan.digits));
        let digit_count = msisdn.strip_prefix('+').unwrap_or(&msisdn).len();
        if !(limits::MIN_MSISDN_DIGITS..=limits::MAX_MSISDN_DIGITS).contains(&digit_count) {
            return Err(ConfigValidationError::InvalidMsisdnLength { subscriber_type, msisdn }.into());
        }

        Ok(msisdn)
    }

    /// N-digit number without a leading zero
    fn generate_subscriber_number(&mut self, digits: usize) -> u64 {
        let low = 10u64.pow(digits as u32 - 1);
        let high = 10u64.pow(digits as u32) - 1;
        self.rng.gen_range(low..=high)
    }

    /// Generate a 15-digit IMSI
    ///
    /// Uses the PLMN when given, otherwise a random MCC and MNC.
    pub fn generate_imsi(&mut self, plmn: Option<Plmn>) -> String {
        let (mcc, mnc) = match plmn {
            Some(plmn) => (plmn.mcc, plmn.mnc),
            None => (self.rng.gen_range(100..=999), self.rng.gen_range(0..=999)),
        };
        let msin: u32 = self.rng.gen_range(0..=999_999_999);
        format!("{:03}{:03}{:09}", mcc, mnc, msin)
    }

    /// Generate a 15-digit IMEI ending in a Luhn check digit
    pub fn generate_imei(&mut self) -> String {
        let mut imei: String = (0..14)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect();
        // payload is all digits
        let check = luhn_check_digit(&imei).unwrap_or(0);
        imei.push(char::from(b'0' + check));
        imei
    }

    /// Generate an ICCID-style SIM id: `89` followed by 18 digits
    pub fn generate_sim_id(&mut self) -> String {
        let digits: String = (0..18)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect();
        format!("89{}", digits)
    }

    fn generate_account_type(&mut self) -> AccountType {
        if self.rng.gen::<f64>() < PREPAID_PROBABILITY {
            AccountType::Prepaid
        } else {
            AccountType::Postpaid
        }
    }

    fn generate_account_status(&mut self) -> AccountStatus {
        let rand_val: f64 = self.rng.gen();
        match rand_val {
            x if x < 0.90 => AccountStatus::Active,
            x if x < 0.95 => AccountStatus::Inactive,
            _ => AccountStatus::Suspended,
        }
    }
}
