//! Material density table and linear density derivation.

use super::rounding::round_up;
use crate::config::{FALLBACK_DENSITY, FILAMENT_DIAMETER_MM};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Known filament materials and their density in g/cm³.
pub const MATERIAL_DENSITIES: &[(&str, f64)] = &[
    ("pla", 1.24),
    ("abs", 1.04),
    ("petg", 1.27),
    ("tpu", 1.21),
    ("pa", 1.14),
    ("asa", 1.07),
    ("pc", 1.20),
];

/// Where a job's linear density comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensitySource {
    /// User supplied `customDensity`.
    Custom,
    /// Looked up from a preset material.
    Preset,
    /// Empty or unrecognized material, PLA assumed.
    Default,
}

fn lookup(material: &str) -> Option<f64> {
    let key = material.trim().to_lowercase();
    MATERIAL_DENSITIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, density)| *density)
}

/// Whether `material` names a preset (case-insensitive).
pub fn is_preset(material: &str) -> bool {
    lookup(material).is_some()
}

/// Volumetric density of `material` in g/cm³, PLA when unknown.
pub fn material_density(material: &str) -> f64 {
    lookup(material).unwrap_or(FALLBACK_DENSITY)
}

/// Cross-section of the filament in cm².
pub fn filament_cross_section_cm2() -> f64 {
    let radius_mm = FILAMENT_DIAMETER_MM / 2.0;
    PI * radius_mm * radius_mm / 100.0
}

/// Positive override, if any.
fn custom_override(custom_density: Option<f64>) -> Option<f64> {
    custom_density.filter(|d| *d > 0.0)
}

/// Linear density in g/m.
///
/// A positive `custom_density` is returned as is. Otherwise the material
/// density is converted using the filament cross-section and rounded up to
/// two decimals.
pub fn linear_density(material: &str, custom_density: Option<f64>) -> f64 {
    if let Some(density) = custom_override(custom_density) {
        return density;
    }
    // cm² * 100 cm/m
    round_up(material_density(material) * filament_cross_section_cm2() * 100.0, 2)
}

/// Classify the density used for a job.
pub fn density_source(material: &str, custom_density: Option<f64>) -> DensitySource {
    if custom_override(custom_density).is_some() {
        DensitySource::Custom
    } else if is_preset(material) {
        DensitySource::Preset
    } else {
        DensitySource::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_case_insensitive() {
        assert!(is_preset("PLA"));
        assert!(is_preset("PetG"));
        assert!(!is_preset("wood fill"));
        assert!(!is_preset(""));
    }

    #[test]
    fn test_material_density() {
        assert_eq!(material_density("abs"), 1.04);
        assert_eq!(material_density("PC"), 1.20);
        assert_eq!(material_density("mystery"), FALLBACK_DENSITY);
        assert_eq!(material_density(""), FALLBACK_DENSITY);
    }

    #[test]
    fn test_linear_density_pla() {
        assert_eq!(linear_density("pla", None), 2.99);
    }

    #[test]
    fn test_linear_density_empty_material_uses_pla() {
        assert_eq!(linear_density("", None), linear_density("pla", None));
        assert_eq!(linear_density("carbon blend", None), linear_density("pla", None));
    }

    #[test]
    fn test_linear_density_abs() {
        // 1.04 * 0.024053 * 100 = 2.5015
        assert_eq!(linear_density("ABS", None), 2.51);
    }

    #[test]
    fn test_custom_density_overrides() {
        assert_eq!(linear_density("abs", Some(3.333)), 3.333);
        assert_eq!(linear_density("abs", Some(0.0)), 2.51);
        assert_eq!(linear_density("abs", Some(-1.0)), 2.51);
    }

    #[test]
    fn test_density_source() {
        assert_eq!(density_source("pla", Some(3.0)), DensitySource::Custom);
        assert_eq!(density_source("Pla", None), DensitySource::Preset);
        assert_eq!(density_source("", None), DensitySource::Default);
        assert_eq!(density_source("nylon-cf", Some(0.0)), DensitySource::Default);
    }
}
