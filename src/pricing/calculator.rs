//! Cost and selling price derivation for a single job.

use super::rounding::{ceiling_to_multiple, round_up};
use crate::config::{MARKUP_RATIO, PRICE_STEP};
use crate::model::{parse_print_time, GlobalSettings, Job};
use serde::Serialize;

/// Values derived from a job and the global settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCosts {
    /// Print duration in minutes.
    pub time_minutes: i64,
    /// Print duration in hours.
    pub time_hours: f64,
    /// Filament length in meters; `None` when there is no weight to convert.
    pub filament_length: Option<f64>,
    /// Filament cost.
    pub material_price: f64,
    /// Energy cost of the print.
    pub electricity_cost: f64,
    /// Material plus electricity.
    pub total_cost: f64,
    /// Suggested price, a multiple of the price step.
    pub selling_price: f64,
}

/// Derive costs for `job`. Never fails, whatever the job contains.
pub fn calculate_job(job: &Job, settings: &GlobalSettings) -> JobCosts {
    let duration = parse_print_time(&job.print_time);
    let time_minutes = duration.total_minutes();
    let time_hours = duration.total_hours();

    let linear_density = job.linear_density();
    let filament_length = (job.weight_g > 0.0 && linear_density > 0.0)
        .then(|| round_up(job.weight_g / linear_density, 1));

    let material_price = round_up(job.price_kg / 1000.0 * job.weight_g, 1);
    let electricity_cost = round_up(
        settings.printer_power / 1000.0 * time_hours * settings.electricity_price,
        1,
    );
    let total_cost = round_up(material_price + electricity_cost, 1);
    let selling_price = ceiling_to_multiple(total_cost * MARKUP_RATIO, PRICE_STEP);

    JobCosts {
        time_minutes,
        time_hours,
        filament_length,
        material_price,
        electricity_cost,
        total_cost,
        selling_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobUpdate;
    use pretty_assertions::assert_eq;

    fn job(material: &str, price_kg: f64, weight_g: f64, print_time: &str) -> Job {
        let mut job = Job::new(1);
        job.material = material.to_string();
        job.price_kg = price_kg;
        job.weight_g = weight_g;
        job.print_time = print_time.to_string();
        job
    }

    #[test]
    fn test_reference_pla_job() {
        let costs = calculate_job(&job("pla", 20.0, 50.0, "2:30"), &GlobalSettings::default());
        assert_eq!(
            costs,
            JobCosts {
                time_minutes: 150,
                time_hours: 2.5,
                filament_length: Some(16.8),
                material_price: 1.0,
                electricity_cost: 0.1,
                total_cost: 1.1,
                selling_price: 5.0,
            }
        );
    }

    #[test]
    fn test_no_weight_has_no_length() {
        let costs = calculate_job(&job("pla", 20.0, 0.0, "1:00"), &GlobalSettings::default());
        assert_eq!(costs.filament_length, None);
        assert_eq!(costs.material_price, 0.0);
    }

    #[test]
    fn test_malformed_time_counts_as_zero() {
        let costs = calculate_job(&job("", 0.0, 0.0, "soon"), &GlobalSettings::default());
        assert_eq!(costs.time_minutes, 0);
        assert_eq!(costs.electricity_cost, 0.0);
        assert_eq!(costs.selling_price, 0.0);
    }

    #[test]
    fn test_partial_time() {
        let costs = calculate_job(&job("", 0.0, 0.0, "abc:12"), &GlobalSettings::default());
        assert_eq!(costs.time_minutes, 12);
        assert_eq!(costs.time_hours, 0.2);
    }

    #[test]
    fn test_custom_density_changes_length() {
        let mut j = job("pla", 20.0, 30.0, "0:00");
        j.apply(JobUpdate::CustomDensity(Some(3.0)));
        assert_eq!(calculate_job(&j, &GlobalSettings::default()).filament_length, Some(10.0));
    }

    #[test]
    fn test_selling_price_steps_of_five() {
        // 30 * 1000 / 1000 = 30.0 total, 18.0 after markup
        let costs = calculate_job(&job("petg", 30.0, 1000.0, "0:00"), &GlobalSettings::default());
        assert_eq!(costs.total_cost, 30.0);
        assert_eq!(costs.selling_price, 20.0);
    }

    #[test]
    fn test_long_print_electricity() {
        let settings = GlobalSettings {
            printer_power: 400.0,
            electricity_price: 0.35,
            ..Default::default()
        };
        // 0.4 kW * 10 h * 0.35 = 1.4
        let costs = calculate_job(&job("abs", 0.0, 0.0, "10:00"), &settings);
        assert_eq!(costs.electricity_cost, 1.4);
        assert_eq!(costs.total_cost, 1.4);
        assert_eq!(costs.selling_price, 5.0);
    }

    #[test]
    fn test_cost_just_above_a_step_rounds_up() {
        let settings = GlobalSettings {
            printer_power: 350.0,
            electricity_price: 0.4,
            ..Default::default()
        };
        // 0.35 * 10.0 * 0.4 evaluates to 1.4000000000000001
        let costs = calculate_job(&job("abs", 0.0, 0.0, "10:00"), &settings);
        assert_eq!(costs.electricity_cost, 1.5);
    }

    #[test]
    fn test_huge_print_time_does_not_panic() {
        let costs = calculate_job(
            &job("pla", 20.0, 50.0, "99999999999999999999:00"),
            &GlobalSettings::default(),
        );
        assert_eq!(costs.time_minutes, i64::MAX);
        assert!(costs.electricity_cost > 0.0);
        assert!(costs.selling_price >= costs.total_cost * MARKUP_RATIO);
    }

    #[test]
    fn test_negative_input_does_not_panic() {
        let costs = calculate_job(&job("pla", -20.0, 10.0, "-1:00"), &GlobalSettings::default());
        assert!(costs.material_price <= 0.0);
        assert!(costs.electricity_cost <= 0.0);
    }
}
