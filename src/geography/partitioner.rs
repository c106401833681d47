//! Grid partitioning of a country bounding box
//!
//! Each network type gets its own `rows x cols` grid over the same bounding
//! box. Cells are emitted row-major starting at the southern-western corner,
//! with boundaries rounded to two decimals.

use crate::geography::Region;
use crate::simulation::SynthesisResult;
use crate::types::{GeoConfig, GridSpec, NetworkType};
use tracing::{debug, instrument};

/// Splits a bounding box into named regions per network type
#[derive(Debug, Clone, Copy, Default)]
pub struct GeographicPartitioner;

impl GeographicPartitioner {
    /// Create a new partitioner
    pub fn new() -> Self {
        Self
    }

    /// Partition the bounding box for every configured network type
    ///
    /// Network types are processed in 2G, 3G, 4G, 5G order. The whole
    /// configuration is validated first, so an error yields no regions at all.
    #[instrument(skip(self, config), fields(country = %config.country, grids = config.grids.len()))]
    pub fn partition(&self, config: &GeoConfig) -> SynthesisResult<Vec<Region>> {
        config.validate()?;

        let mut regions = Vec::new();
        for network_type in NetworkType::ALL {
            if let Some(grid) = config.grids.get(&network_type) {
                regions.extend(self.partition_grid(config, network_type, grid)?);
            }
        }

        crate::sim_event!(info, "Regions generated", count = regions.len());
        Ok(regions)
    }

    /// Partition the bounding box with one network type's grid
    pub fn partition_grid(
        &self,
        config: &GeoConfig,
        network_type: NetworkType,
        grid: &GridSpec,
    ) -> SynthesisResult<Vec<Region>> {
        grid.validate(network_type)?;

        let [lat_min, lat_max] = config.latitude;
        let [lon_min, lon_max] = config.longitude;
        let lat_step = (lat_max - lat_min) / grid.rows as f64;
        let lon_step = (lon_max - lon_min) / grid.cols as f64;
        let base = network_type.region_id_base();

        let mut regions = Vec::with_capacity(grid.rows * grid.cols);
        for row in 0..grid.rows {
            let lat_start = round2(lat_min + row as f64 * lat_step);
            let lat_end = round2(lat_min + (row + 1) as f64 * lat_step);

            for col in 0..grid.cols {
                let lon_start = round2(lon_min + col as f64 * lon_step);
                let lon_end = round2(lon_min + (col + 1) as f64 * lon_step);
                let index = row * grid.cols + col;

                let region = Region {
                    id: base + index as u32,
                    name: grid.region_names[index].clone(),
                    network_type,
                    lat_min: lat_start,
                    lat_max: lat_end,
                    lon_min: lon_start,
                    lon_max: lon_end,
                };
                debug!(id = region.id, name = %region.name, "Region created");
                regions.push(region);
            }
        }

        Ok(regions)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
