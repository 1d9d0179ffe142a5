//! Job - one print cost estimation record.

use super::input::{coerce_amount, field_key};
use super::time::{format_print_time, is_well_formed};
use crate::config::DEFAULT_PRINT_TIME;
use crate::error::LedgerError;
use crate::pricing::{density_source, linear_density, round_up, DensitySource};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_print_time() -> String {
    DEFAULT_PRINT_TIME.to_string()
}

/// One print job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique, immutable identifier.
    pub id: u64,
    /// Free text label.
    #[serde(default)]
    pub name: String,
    /// Preset key, custom text, or empty.
    #[serde(default)]
    pub material: String,
    /// Filament price per kilogram.
    #[serde(default)]
    pub price_kg: f64,
    /// Filament consumed, in grams.
    #[serde(default)]
    pub weight_g: f64,
    /// Print duration as `H:MM`.
    #[serde(default = "default_print_time")]
    pub print_time: String,
    /// Linear density override in g/m.
    #[serde(default)]
    pub custom_density: Option<f64>,
}

impl Job {
    /// Create an empty job.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            material: String::new(),
            price_kg: 0.0,
            weight_g: 0.0,
            print_time: default_print_time(),
            custom_density: None,
        }
    }

    /// Copy of this job under a new id.
    pub fn duplicate(&self, id: u64) -> Self {
        Self { id, ..self.clone() }
    }

    /// Reset the editable fields, keeping id and density override.
    pub fn clear(&mut self) {
        self.name.clear();
        self.material.clear();
        self.price_kg = 0.0;
        self.weight_g = 0.0;
        self.print_time = default_print_time();
    }

    /// Apply one edit.
    pub fn apply(&mut self, update: JobUpdate) {
        match update {
            JobUpdate::Name(name) => self.name = name,
            JobUpdate::Material(material) => self.material = material,
            JobUpdate::PriceKg(price) => self.price_kg = round_up(price, 1),
            JobUpdate::WeightG(weight) => self.weight_g = round_up(weight, 1),
            JobUpdate::PrintTimeDraft(text) => self.print_time = text,
            JobUpdate::PrintTime(text) => {
                let formatted = format_print_time(&text);
                if !is_well_formed(&text) {
                    tracing::debug!("Job {}: print time '{}' stored as '{}'", self.id, text, formatted);
                }
                self.print_time = formatted;
            }
            JobUpdate::CustomDensity(density) => {
                self.custom_density = density.filter(|d| d.is_finite() && *d > 0.0)
            }
        }
    }

    /// Linear density (g/m) used for this job.
    pub fn linear_density(&self) -> f64 {
        linear_density(&self.material, self.custom_density)
    }

    /// Where this job's density comes from.
    pub fn density_source(&self) -> DensitySource {
        density_source(&self.material, self.custom_density)
    }
}

/// Editable job fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Name,
    Material,
    PriceKg,
    WeightG,
    PrintTime,
    CustomDensity,
}

impl FromStr for JobField {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match field_key(s).as_str() {
            "name" => Ok(JobField::Name),
            "material" => Ok(JobField::Material),
            "pricekg" | "price" => Ok(JobField::PriceKg),
            "weightg" | "weight" => Ok(JobField::WeightG),
            "printtime" | "time" => Ok(JobField::PrintTime),
            "customdensity" | "density" => Ok(JobField::CustomDensity),
            _ => Err(LedgerError::UnknownField {
                field: s.to_string(),
            }),
        }
    }
}

/// A single typed job edit.
#[derive(Debug, Clone, PartialEq)]
pub enum JobUpdate {
    Name(String),
    Material(String),
    /// Rounded up to one decimal when applied.
    PriceKg(f64),
    /// Rounded up to one decimal when applied.
    WeightG(f64),
    /// Print time while it is still being typed, stored verbatim.
    PrintTimeDraft(String),
    /// Print time once editing is finished, normalized to `H:MM`.
    PrintTime(String),
    /// `None` or a non-positive value removes the override.
    CustomDensity(Option<f64>),
}

impl JobUpdate {
    /// Build a committed update from raw form text.
    ///
    /// Invalid numbers become 0; an empty or invalid density clears the override.
    pub fn from_input(field: JobField, raw: &str) -> Self {
        match field {
            JobField::Name => JobUpdate::Name(raw.to_string()),
            JobField::Material => JobUpdate::Material(raw.trim().to_string()),
            JobField::PriceKg => JobUpdate::PriceKg(coerce_amount(raw)),
            JobField::WeightG => JobUpdate::WeightG(coerce_amount(raw)),
            JobField::PrintTime => JobUpdate::PrintTime(raw.to_string()),
            JobField::CustomDensity => {
                let density = coerce_amount(raw);
                JobUpdate::CustomDensity((density > 0.0).then_some(density))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_job_defaults() {
        let job = Job::new(7);
        assert_eq!(job.id, 7);
        assert_eq!(job.print_time, "0:00");
        assert_eq!(job.custom_density, None);
    }

    #[test]
    fn test_numeric_edits_round_up() {
        let mut job = Job::new(1);
        job.apply(JobUpdate::from_input(JobField::WeightG, "12.31"));
        job.apply(JobUpdate::from_input(JobField::PriceKg, "19.99"));
        assert_eq!(job.weight_g, 12.4);
        assert_eq!(job.price_kg, 20.0);
    }

    #[test]
    fn test_invalid_numeric_edit_becomes_zero() {
        let mut job = Job::new(1);
        job.weight_g = 40.0;
        job.apply(JobUpdate::from_input(JobField::WeightG, "forty"));
        assert_eq!(job.weight_g, 0.0);
    }

    #[test]
    fn test_print_time_draft_is_verbatim() {
        let mut job = Job::new(1);
        job.apply(JobUpdate::PrintTimeDraft("2:".into()));
        assert_eq!(job.print_time, "2:");
        job.apply(JobUpdate::PrintTime("2:".into()));
        assert_eq!(job.print_time, "2:00");
    }

    #[test]
    fn test_custom_density_cleared() {
        let mut job = Job::new(1);
        job.apply(JobUpdate::from_input(JobField::CustomDensity, "3.1"));
        assert_eq!(job.custom_density, Some(3.1));
        job.apply(JobUpdate::from_input(JobField::CustomDensity, ""));
        assert_eq!(job.custom_density, None);
        job.apply(JobUpdate::CustomDensity(Some(-2.0)));
        assert_eq!(job.custom_density, None);
    }

    #[test]
    fn test_clear_keeps_id() {
        let mut job = Job::new(4);
        job.name = "Benchy".into();
        job.material = "petg".into();
        job.price_kg = 25.0;
        job.weight_g = 15.0;
        job.print_time = "1:10".into();
        job.clear();

        let mut expected = Job::new(4);
        expected.custom_density = job.custom_density;
        assert_eq!(job, expected);
    }

    #[test]
    fn test_duplicate_copies_fields() {
        let mut job = Job::new(1);
        job.name = "Bracket".into();
        job.custom_density = Some(2.5);
        let copy = job.duplicate(9);
        assert_eq!(copy.id, 9);
        assert_eq!(copy.name, "Bracket");
        assert_eq!(copy.custom_density, Some(2.5));
    }

    #[test]
    fn test_json_shape() {
        let mut job = Job::new(3);
        job.price_kg = 20.0;
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["priceKg"], 20.0);
        assert_eq!(json["printTime"], "0:00");
        assert!(json["customDensity"].is_null());
    }

    #[test]
    fn test_missing_fields_default() {
        let job: Job = serde_json::from_str(r#"{"id": 5, "name": "Vase"}"#).unwrap();
        assert_eq!(job.print_time, "0:00");
        assert_eq!(job.weight_g, 0.0);
    }

    #[test]
    fn test_field_names() {
        assert_eq!("weightG".parse::<JobField>().unwrap(), JobField::WeightG);
        assert_eq!("print-time".parse::<JobField>().unwrap(), JobField::PrintTime);
        assert!("colour".parse::<JobField>().is_err());
    }
}
