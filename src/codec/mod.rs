//! Import/export codec for manual data transfer.

mod transfer;

pub use transfer::{export_state, import_into, parse_import, ImportDocument};
