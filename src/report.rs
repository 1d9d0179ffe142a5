//! Plain-text rendering of jobs and their costs.

use crate::model::Job;
use crate::pricing::{material_density, DensitySource, JobCosts, MATERIAL_DENSITIES};
use crate::store::AppState;
use std::fmt::Write;

/// Money cell: empty for zero, otherwise value and symbol.
pub fn money(value: f64, symbol: &str) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{} {}", value, symbol)
    }
}

/// Filament length cell, marked by where the density came from.
pub fn filament_cell(job: &Job, costs: &JobCosts) -> String {
    let Some(length) = costs.filament_length else {
        return String::new();
    };
    let marker = match job.density_source() {
        DensitySource::Custom => "*",
        DensitySource::Preset => "",
        DensitySource::Default => "?",
    };
    format!("{}{}", length, marker)
}

/// Hint describing the linear density used for `job`.
pub fn density_hint(job: &Job) -> String {
    format!("Material density: {:.2} g/m", job.linear_density())
}

/// Placeholder for the density override input.
pub fn density_placeholder(job: &Job) -> String {
    format!("{:.2}", material_density(&job.material))
}

const HEADERS: [&str; 11] = [
    "ID", "Name", "Material", "Price/kg", "Weight g", "Time", "Length m", "Filament", "Power",
    "Total", "Price",
];

/// Table of every job with its costs and selling price.
pub fn render_table(state: &AppState) -> String {
    let symbol = &state.settings().currency_symbol;
    let mut rows: Vec<[String; 11]> = Vec::new();

    for (job, costs) in state.rows() {
        rows.push([
            job.id.to_string(),
            job.name.clone(),
            job.material.clone(),
            job.price_kg.to_string(),
            job.weight_g.to_string(),
            job.print_time.clone(),
            filament_cell(job, &costs),
            money(costs.material_price, symbol),
            money(costs.electricity_cost, symbol),
            money(costs.total_cost, symbol),
            money(costs.selling_price, symbol),
        ]);
    }

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };

    line(&header);
    for row in &rows {
        line(row);
    }
    out
}

/// Preset materials with their densities.
pub fn render_materials() -> String {
    let mut out = String::new();
    for (name, density) in MATERIAL_DENSITIES {
        let job = Job {
            material: name.to_string(),
            ..Job::new(0)
        };
        let _ = writeln!(
            out,
            "{:<6}{:.2} g/cm³  {:.2} g/m",
            name.to_uppercase(),
            density,
            job.linear_density()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobUpdate, SettingsUpdate};

    #[test]
    fn test_money_cell() {
        assert_eq!(money(0.0, "€"), "");
        assert_eq!(money(1.0, "€"), "1 €");
        assert_eq!(money(12.5, "$"), "12.5 $");
    }

    #[test]
    fn test_density_hints() {
        let mut job = Job::new(1);
        assert_eq!(density_hint(&job), "Material density: 2.99 g/m");
        assert_eq!(density_placeholder(&job), "1.24");
        job.apply(JobUpdate::Material("ABS".into()));
        assert_eq!(density_placeholder(&job), "1.04");
    }

    #[test]
    fn test_table_contains_costs() {
        let mut state = AppState::new();
        state.update_settings(SettingsUpdate::CurrencySymbol("$".into()));
        let id = state.jobs_mut().add_job().id;
        let store = state.jobs_mut();
        store.update_job(id, JobUpdate::Name("Benchy".into()));
        store.update_job(id, JobUpdate::Material("pla".into()));
        store.update_job(id, JobUpdate::PriceKg(20.0));
        store.update_job(id, JobUpdate::WeightG(50.0));
        store.update_job(id, JobUpdate::PrintTime("2:30".into()));

        let table = render_table(&state);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Benchy"));
        assert!(lines[1].contains("16.8"));
        assert!(lines[1].contains("1.1 $"));
        assert!(lines[1].ends_with("5 $"));
    }

    #[test]
    fn test_materials_listing() {
        let listing = render_materials();
        assert_eq!(listing.lines().count(), MATERIAL_DENSITIES.len());
        assert!(listing.starts_with("PLA"));
    }
}
