//! Pricing engine: rounding rules, material densities, and job costs.

mod calculator;
mod material;
mod rounding;

pub use calculator::{calculate_job, JobCosts};
pub use material::{
    density_source, filament_cross_section_cm2, is_preset, linear_density, material_density,
    DensitySource, MATERIAL_DENSITIES,
};
pub use rounding::{ceiling_to_multiple, round_up};
