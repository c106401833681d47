//! Geographic regions
//!
//! A region is one cell of a network type's grid over the country bounding box.

use crate::repository::{Entity, NetworkScoped};
use crate::types::NetworkType;
use serde::{Deserialize, Serialize};

/// One named cell of a network type's grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Network-type base (2000/3000/4000/5000) plus the cell's row-major index
    pub id: u32,
    /// Human-readable region name
    pub name: String,
    /// Generation whose grid this region belongs to
    pub network_type: NetworkType,
    /// Southern boundary
    pub lat_min: f64,
    /// Northern boundary
    pub lat_max: f64,
    /// Western boundary
    pub lon_min: f64,
    /// Eastern boundary
    pub lon_max: f64,
}

impl Region {
    /// Create a region, checking its boundaries
    pub fn new(
        id: u32,
        name: impl Into<String>,
        network_type: NetworkType,
        latitude: (f64, f64),
        longitude: (f64, f64),
    ) -> Result<Self, String> {
        let region = Self {
            id,
            name: name.into(),
            network_type,
            lat_min: latitude.0,
            lat_max: latitude.1,
            lon_min: longitude.0,
            lon_max: longitude.1,
        };
        region.validate()?;
        Ok(region)
    }

    /// Validate that the boundaries are geographic and ordered
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat_min) || !(-90.0..=90.0).contains(&self.lat_max) {
            return Err(format!(
                "Region {} latitude [{}, {}] is outside -90..90",
                self.id, self.lat_min, self.lat_max
            ));
        }
        if !(-180.0..=180.0).contains(&self.lon_min) || !(-180.0..=180.0).contains(&self.lon_max) {
            return Err(format!(
                "Region {} longitude [{}, {}] is outside -180..180",
                self.id, self.lon_min, self.lon_max
            ));
        }
        if self.lat_min > self.lat_max || self.lon_min > self.lon_max {
            return Err(format!("Region {} has min boundary above max boundary", self.id));
        }
        Ok(())
    }

    /// Whether the point lies inside the region, edges included
    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

impl Entity for Region {
    type Kind = NetworkType;

    const COLLECTION: &'static str = "locations";
    const KEY_PREFIX: &'static str = "LOC";

    fn kind(&self) -> NetworkType {
        self.network_type
    }
}

impl NetworkScoped for Region {
    fn network_type(&self) -> NetworkType {
        self.network_type
    }
}
