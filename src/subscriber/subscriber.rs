//! Subscriber records

use crate::repository::Entity;
use crate::types::{AccountStatus, AccountType, SubscriberId, SubscriberType};
use serde::{Deserialize, Serialize};

/// A synthetic mobile subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Unique identifier
    pub id: SubscriberId,
    /// Category relative to the home network
    pub subscriber_type: SubscriberType,
    /// Phone number; may start with `+`
    pub msisdn: String,
    /// 15-digit subscriber identity (MCC + MNC + MSIN)
    pub imsi: String,
    /// 15-digit Luhn-valid equipment identity
    pub imei: String,
    /// ICCID-style SIM identifier
    pub sim_id: String,
    /// Billing arrangement
    pub account_type: AccountType,
    /// Account lifecycle status
    pub account_status: AccountStatus,
}

impl Subscriber {
    /// MSISDN digits without a leading `+`
    pub fn msisdn_digits(&self) -> &str {
        self.msisdn.strip_prefix('+').unwrap_or(&self.msisdn)
    }
}

impl Entity for Subscriber {
    type Kind = SubscriberType;

    const COLLECTION: &'static str = "customers";
    const KEY_PREFIX: &'static str = "CUS";

    fn kind(&self) -> SubscriberType {
        self.subscriber_type
    }
}
