//! Configuration for the proportional symbol map
//!
//! Every field has a default matching the deposit map, so a config file only
//! needs to name what it changes. Symbol sizing goes through a preset that is
//! resolved to a concrete scale factor, the same way performance profiles
//! resolve to options.

use crate::{
    core::{constants, geo::LatLng},
    layers::style::MarkerStyle,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Symbol size preset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolScale {
    /// Scale factor 5
    Compact,
    /// Scale factor 50
    Expanded,
    Custom(f64),
}

impl SymbolScale {
    pub fn resolve(&self) -> f64 {
        match self {
            Self::Compact => constants::COMPACT_SCALE_FACTOR,
            Self::Expanded => constants::EXPANDED_SCALE_FACTOR,
            Self::Custom(factor) => *factor,
        }
    }
}

impl Default for SymbolScale {
    fn default() -> Self {
        Self::Compact
    }
}

/// Geometry of the legend canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub width: f64,
    pub height: f64,
    /// Circles are drawn with `cy = baseline - r`
    pub baseline: f64,
    pub circle_x: f64,
    pub text_x: f64,
    /// Label rows for max, mean and min
    pub text_y: [f64; 3],
    pub style: MarkerStyle,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: constants::LEGEND_SIZE.0,
            height: constants::LEGEND_SIZE.1,
            baseline: constants::LEGEND_BASELINE,
            circle_x: constants::LEGEND_CIRCLE_X,
            text_x: constants::LEGEND_TEXT_X,
            text_y: constants::LEGEND_TEXT_Y,
            style: MarkerStyle::legend(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    /// Substring selecting the year-keyed fields
    pub attribute_marker: String,
    /// Property shown as the record's name
    pub identity_field: String,
    pub identity_label: String,
    /// Unit appended to displayed values
    pub value_unit: String,
    pub scale: SymbolScale,
    pub marker_style: MarkerStyle,
    pub highlight_style: MarkerStyle,
    pub legend: LegendConfig,
    /// Dataset location, a path or an http(s) URL
    pub data_source: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_center: LatLng::new(constants::DEFAULT_CENTER.0, constants::DEFAULT_CENTER.1),
            initial_zoom: constants::DEFAULT_ZOOM,
            attribute_marker: constants::DEFAULT_ATTRIBUTE_MARKER.to_string(),
            identity_field: constants::DEFAULT_IDENTITY_FIELD.to_string(),
            identity_label: constants::DEFAULT_IDENTITY_FIELD.to_string(),
            value_unit: constants::DEFAULT_VALUE_UNIT.to_string(),
            scale: SymbolScale::default(),
            marker_style: MarkerStyle::default(),
            highlight_style: MarkerStyle::highlight(),
            legend: LegendConfig::default(),
            data_source: None,
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale.resolve()
    }

    fn validate(&self) -> Result<()> {
        let factor = self.scale_factor();
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MapError::Config(format!(
                "scale factor must be positive, got {factor}"
            )));
        }
        if self.attribute_marker.is_empty() {
            return Err(MapError::Config("attribute_marker is empty".to_string()));
        }
        if !self.initial_center.is_valid() {
            return Err(MapError::Config(format!(
                "initial_center out of range: {:?}",
                self.initial_center
            )));
        }
        Ok(())
    }
}
