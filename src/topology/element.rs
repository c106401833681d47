//! Network element records
//!
//! A network element is either a core node or a radio-access node. Radio
//! access nodes carry exactly one area code whose value is the id of the
//! region they were placed in.

use crate::repository::{Entity, NetworkScoped};
use crate::types::{ElementStatus, ElementType, NetworkType};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Area code reported by a radio-access element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AreaCode {
    /// 2G/3G location area with a cell inside it
    LocationArea {
        /// Cell identity (1-65535)
        cell_id: u16,
        /// Location area code
        lac: u32,
    },
    /// 4G/5G tracking area
    TrackingArea {
        /// Tracking area code
        tac: u32,
    },
}

/// Position of an element in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum ElementRole {
    /// Core network node without an area code
    Core,
    /// Radio access node
    RadioAccess {
        /// Area the node serves
        area_code: AreaCode,
    },
}

/// Human-readable description of an element's function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// Function name, e.g. "MSC Function"
    pub name: String,
    /// What the element does
    pub description: String,
}

/// A node placed in one region of the synthetic network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkElement {
    /// Sequential element id, unique within a topology
    pub id: u32,
    /// `{network_type}_{element_type}_{id:04}`
    pub name: String,
    /// Generation the element belongs to
    pub network_type: NetworkType,
    /// Kind of node
    pub element_type: ElementType,
    /// Management address in 192.168.0.0/16
    pub ip_address: Ipv4Addr,
    /// Operational status
    pub status: ElementStatus,
    /// Function metadata
    pub function: FunctionInfo,
    /// Id of the region the element is placed in
    pub location_id: u32,
    /// Core or radio-access role
    #[serde(flatten)]
    pub role: ElementRole,
}

impl NetworkElement {
    /// Whether the element is a radio-access node
    pub fn is_radio_access(&self) -> bool {
        matches!(self.role, ElementRole::RadioAccess { .. })
    }

    /// Area code, if this is a radio-access node
    pub fn area_code(&self) -> Option<AreaCode> {
        match self.role {
            ElementRole::RadioAccess { area_code } => Some(area_code),
            ElementRole::Core => None,
        }
    }

    /// Location area code of a 2G/3G radio-access node
    pub fn lac(&self) -> Option<u32> {
        match self.area_code()? {
            AreaCode::LocationArea { lac, .. } => Some(lac),
            AreaCode::TrackingArea { .. } => None,
        }
    }

    /// Cell id of a 2G/3G radio-access node
    pub fn cell_id(&self) -> Option<u16> {
        match self.area_code()? {
            AreaCode::LocationArea { cell_id, .. } => Some(cell_id),
            AreaCode::TrackingArea { .. } => None,
        }
    }

    /// Tracking area code of a 4G/5G radio-access node
    pub fn tac(&self) -> Option<u32> {
        match self.area_code()? {
            AreaCode::TrackingArea { tac } => Some(tac),
            AreaCode::LocationArea { .. } => None,
        }
    }

    /// Whether the element is active
    pub fn is_active(&self) -> bool {
        self.status == ElementStatus::Active
    }
}

impl Entity for NetworkElement {
    type Kind = ElementType;

    const COLLECTION: &'static str = "network_elements";
    const KEY_PREFIX: &'static str = "NE";

    fn kind(&self) -> ElementType {
        self.element_type
    }
}

impl NetworkScoped for NetworkElement {
    fn network_type(&self) -> NetworkType {
        self.network_type
    }
}
