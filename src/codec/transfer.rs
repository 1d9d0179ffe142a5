//! Export and import of settings plus jobs as JSON text.

use crate::error::{LedgerError, Result};
use crate::model::{GlobalSettings, Job};
use crate::store::AppState;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    global_settings: &'a GlobalSettings,
    jobs: &'a [Job],
}

/// Parsed import text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    /// `None` keeps the current settings.
    #[serde(default)]
    pub global_settings: Option<GlobalSettings>,
    /// `None` imports an empty job list.
    #[serde(default)]
    pub jobs: Option<Vec<Job>>,
}

/// Pretty-printed settings and jobs. The id counter is not exported.
pub fn export_state(state: &AppState) -> Result<String> {
    let document = ExportDocument {
        global_settings: state.settings(),
        jobs: state.jobs().jobs(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse import text without applying it.
pub fn parse_import(text: &str) -> Result<ImportDocument> {
    serde_json::from_str(text).map_err(|e| LedgerError::InvalidImport {
        message: e.to_string(),
    })
}

/// Parse `text` and replace the state with it.
///
/// Malformed text leaves `state` untouched.
pub fn import_into(state: &mut AppState, text: &str) -> Result<()> {
    let document = parse_import(text)?;
    state.set_from_import(document.global_settings, document.jobs.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobUpdate, SettingsUpdate};
    use pretty_assertions::assert_eq;

    fn sample_state() -> AppState {
        let mut state = AppState::new();
        let id = state.jobs_mut().add_job().id;
        let store = state.jobs_mut();
        store.update_job(id, JobUpdate::Name("Benchy".into()));
        store.update_job(id, JobUpdate::Material("pla".into()));
        store.update_job(id, JobUpdate::PriceKg(20.0));
        store.update_job(id, JobUpdate::WeightG(50.0));
        store.update_job(id, JobUpdate::PrintTime("2:30".into()));
        state.update_settings(SettingsUpdate::CurrencySymbol("€".into()));
        state
    }

    #[test]
    fn test_export_format() {
        let text = export_state(&sample_state()).unwrap();
        insta::assert_snapshot!(text, @r#"
        {
          "globalSettings": {
            "printerPower": 100.0,
            "electricityPrice": 0.12,
            "currencySymbol": "€"
          },
          "jobs": [
            {
              "id": 1,
              "name": "Benchy",
              "material": "pla",
              "priceKg": 20.0,
              "weightG": 50.0,
              "printTime": "2:30",
              "customDensity": null
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_round_trip() {
        let original = sample_state();
        let text = export_state(&original).unwrap();

        let mut restored = AppState::new();
        import_into(&mut restored, &text).unwrap();

        assert_eq!(restored.settings(), original.settings());
        assert_eq!(restored.jobs().jobs(), original.jobs().jobs());
        assert!(restored.jobs().next_id() >= 2);
    }

    #[test]
    fn test_invalid_text_changes_nothing() {
        let mut state = sample_state();
        let before = state.clone();

        for text in ["{not json", "", "null", r#"{"jobs": "many"}"#, r#"{"jobs": [{"name": "no id"}]}"#] {
            let err = import_into(&mut state, text).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidImport { .. }), "{}", text);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_missing_jobs_clears_store() {
        let mut state = sample_state();
        import_into(&mut state, r#"{"globalSettings": {"printerPower": 60}}"#).unwrap();
        assert!(state.jobs().is_empty());
        assert_eq!(state.jobs().next_id(), 1);
        assert_eq!(state.settings().printer_power, 60.0);
    }

    #[test]
    fn test_import_recomputes_next_id() {
        let mut state = AppState::new();
        import_into(&mut state, r#"{"jobs": [{"id": 12}, {"id": 3}], "nextId": 1}"#).unwrap();
        assert_eq!(state.jobs().next_id(), 13);
        assert_eq!(state.jobs_mut().add_job().id, 13);
    }

    #[test]
    fn test_import_rejects_largest_id() {
        let mut state = sample_state();
        let before = state.clone();
        let err = import_into(&mut state, r#"{"jobs": [{"id": 18446744073709551615}]}"#).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidJobId { id: u64::MAX }));
        assert_eq!(state, before);
    }
}
