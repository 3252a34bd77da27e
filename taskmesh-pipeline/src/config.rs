//! Mesher configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use taskmesh_core::{Error, Result};

/// Highest number of simplified levels the cascade can produce
pub const MAX_MIP_COUNT: u8 = 4;

/// Options for one meshing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Simplified levels to compute after the raw mesh (0..=4)
    pub mip_count: u8,
    /// Seal enclosed cavities instead of meshing them as holes
    pub fill_holes: bool,
    /// Per-axis (x, y, z) factors applied to every level's positions
    pub scale: Option<[f32; 3]>,
    /// Keep each level's indexed face list next to its packed strip
    pub retain_face_lists: bool,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            mip_count: MAX_MIP_COUNT,
            fill_holes: false,
            scale: None,
            retain_face_lists: false,
        }
    }
}

impl MesherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mip_count(mut self, mip_count: u8) -> Self {
        self.mip_count = mip_count;
        self
    }

    pub fn with_fill_holes(mut self, fill_holes: bool) -> Self {
        self.fill_holes = fill_holes;
        self
    }

    pub fn with_scale(mut self, factors: [f32; 3]) -> Self {
        self.scale = Some(factors);
        self
    }

    pub fn with_face_lists(mut self, retain: bool) -> Self {
        self.retain_face_lists = retain;
        self
    }

    /// Reject values the pipeline cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.mip_count > MAX_MIP_COUNT {
            return Err(Error::InvalidData(format!(
                "mip_count must be at most {}, got {}",
                MAX_MIP_COUNT, self.mip_count
            )));
        }
        if let Some(factors) = self.scale {
            if factors.iter().any(|f| !f.is_finite()) {
                return Err(Error::InvalidData(format!(
                    "Scale factors must be finite, got {:?}",
                    factors
                )));
            }
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidData(format!("Invalid mesher config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidData(format!("Cannot serialize mesher config: {}", e)))
    }
}
