//! GlobalSettings - values shared by every job's calculation.

use super::input::{coerce_amount, field_key};
use crate::config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_ELECTRICITY_PRICE, DEFAULT_PRINTER_POWER};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// Printer power draw in watts.
    pub printer_power: f64,
    /// Electricity price per kWh.
    pub electricity_price: f64,
    /// Symbol appended to money values.
    pub currency_symbol: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            printer_power: DEFAULT_PRINTER_POWER,
            electricity_price: DEFAULT_ELECTRICITY_PRICE,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl GlobalSettings {
    /// Replace an empty currency symbol by the default.
    pub fn normalized(mut self) -> Self {
        if self.currency_symbol.trim().is_empty() {
            self.currency_symbol = DEFAULT_CURRENCY_SYMBOL.to_string();
        }
        self
    }

    /// Apply one edit.
    pub fn apply(&mut self, update: SettingsUpdate) {
        match update {
            SettingsUpdate::PrinterPower(watts) => self.printer_power = watts,
            SettingsUpdate::ElectricityPrice(price) => self.electricity_price = price,
            SettingsUpdate::CurrencySymbol(symbol) => {
                let symbol = symbol.trim();
                self.currency_symbol = if symbol.is_empty() {
                    DEFAULT_CURRENCY_SYMBOL.to_string()
                } else {
                    symbol.to_string()
                };
            }
        }
    }
}

/// Editable settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    PrinterPower,
    ElectricityPrice,
    CurrencySymbol,
}

impl FromStr for SettingsField {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match field_key(s).as_str() {
            "printerpower" | "power" => Ok(SettingsField::PrinterPower),
            "electricityprice" | "electricity" => Ok(SettingsField::ElectricityPrice),
            "currencysymbol" | "currency" => Ok(SettingsField::CurrencySymbol),
            _ => Err(LedgerError::UnknownField {
                field: s.to_string(),
            }),
        }
    }
}

/// A single typed settings edit.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    PrinterPower(f64),
    ElectricityPrice(f64),
    CurrencySymbol(String),
}

impl SettingsUpdate {
    /// Build an update from raw form text; invalid numbers become 0.
    pub fn from_input(field: SettingsField, raw: &str) -> Self {
        match field {
            SettingsField::PrinterPower => SettingsUpdate::PrinterPower(coerce_amount(raw)),
            SettingsField::ElectricityPrice => {
                SettingsUpdate::ElectricityPrice(coerce_amount(raw))
            }
            SettingsField::CurrencySymbol => SettingsUpdate::CurrencySymbol(raw.to_string()),
        }
    }
}
