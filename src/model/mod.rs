//! Data model types for print jobs and settings.

mod input;
mod job;
mod settings;
mod snapshot;
mod time;

pub use input::coerce_amount;
pub use job::{Job, JobField, JobUpdate};
pub use settings::{GlobalSettings, SettingsField, SettingsUpdate};
pub use snapshot::StoreData;
pub use time::{format_print_time, is_well_formed, parse_leading_int, parse_print_time, PrintDuration};
