//! Submitted form answers and the answer-summary catalog.
//!
//! The types in this module form a serialization-friendly model of the
//! calculator submission.  They intentionally avoid referencing the rendering
//! backend so the values can be produced by frontends, persisted, or exchanged
//! over the network without pulling in heavy dependencies.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A single submitted field value.
///
/// The wizard serializes everything it collects into a flat JSON object, so a
/// value may arrive as a string (`"40"`, `"Ja"`), a number, or a boolean
/// checkbox state.  The accessors on [`FormAnswers`] normalize across these
/// shapes; nothing downstream ever sees the raw variant.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Boolean checkbox state.
    Flag(bool),
    /// Numeric input.
    Number(f64),
    /// Free-text or categorical input.
    Text(String),
}

/// Pre-computed figures the embed widget attaches to its submission.
///
/// The engine accepts this block for payload compatibility but always
/// recomputes the metrics from the raw fields; see [`crate::metrics::derive`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[allow(dead_code)]
pub struct CalculatedSnapshot {
    #[serde(default, rename = "noShowRate")]
    pub no_show_rate: f64,
    #[serde(default, rename = "loss30")]
    pub loss_30: f64,
    #[serde(default, rename = "totalRevenue30")]
    pub total_revenue_30: f64,
    #[serde(default)]
    pub upsell: f64,
    #[serde(default)]
    pub roi: f64,
    #[serde(default, rename = "totalReservations30")]
    pub total_reservations_30: f64,
    #[serde(default, rename = "totalGuests30")]
    pub total_guests_30: f64,
    #[serde(default, rename = "noShowGuests30")]
    pub no_show_guests_30: f64,
}

/// The full set of answers collected across the wizard steps.
///
/// Immutable once handed to the engine; no field is mutated downstream.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FormAnswers {
    /// Optional pre-computed figures from the upstream step.
    #[serde(default)]
    pub calculated: Option<CalculatedSnapshot>,
    #[serde(flatten)]
    fields: BTreeMap<String, AnswerValue>,
}

impl FormAnswers {
    /// Parses a submission payload as sent by the embed widget.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Sets a field value, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.fields.insert(key.into(), value);
    }

    /// Builder-style variant of [`FormAnswers::set`].
    pub fn with(mut self, key: impl Into<String>, value: AnswerValue) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style shorthand for a text field.
    pub fn with_text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, AnswerValue::Text(value.into()))
    }

    /// Builder-style shorthand for a numeric field.
    pub fn with_number(self, key: impl Into<String>, value: f64) -> Self {
        self.with(key, AnswerValue::Number(value))
    }

    /// Returns the numeric interpretation of a field.
    ///
    /// Absent fields, empty strings, and non-numeric text all yield `0.0`;
    /// numeric strings are parsed with a decimal comma accepted alongside the
    /// decimal point.  This accessor never fails.
    pub fn number(&self, key: &str) -> f64 {
        match self.fields.get(key) {
            Some(AnswerValue::Number(value)) => *value,
            Some(AnswerValue::Text(text)) => {
                text.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
            }
            Some(AnswerValue::Flag(flag)) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }

    /// Returns the textual interpretation of a field, or `""` when absent.
    pub fn text(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(AnswerValue::Text(text)) => text.trim(),
            _ => "",
        }
    }

    /// Whether a categorical yes/no field was answered affirmatively.
    pub fn is_yes(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(AnswerValue::Flag(flag)) => *flag,
            Some(AnswerValue::Text(text)) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("ja") || text.eq_ignore_ascii_case("yes")
            }
            _ => false,
        }
    }

    /// Human-readable value for the answers summary, or `None` when the field
    /// was left unanswered.
    pub fn display_value(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            AnswerValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            }
            AnswerValue::Number(value) => {
                if value.fract() == 0.0 {
                    Some(format!("{}", *value as i64))
                } else {
                    Some(format!("{}", value).replace('.', ","))
                }
            }
            AnswerValue::Flag(flag) => Some(if *flag { "Ja" } else { "Nein" }.to_string()),
        }
    }

    /// The question/answer pairs for the summary section, in catalog order.
    ///
    /// Unanswered fields are skipped, contact fields are never part of the
    /// catalog, and the fee-amount row is only included when the fee flag was
    /// answered "Ja".
    pub fn summary_rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        for field in SUMMARY_FIELDS {
            if field.key == "noShowFee" && !self.is_yes("feeForNoShow") {
                continue;
            }
            if let Some(value) = self.display_value(field.key) {
                rows.push((field.label.to_string(), value));
            }
        }
        rows
    }
}

struct SummaryField {
    key: &'static str,
    label: &'static str,
}

/// The answer catalog, in the order the original report prints it.  Contact
/// fields (name, e-mail, mobile) are deliberately absent.
const SUMMARY_FIELDS: &[SummaryField] = &[
    SummaryField {
        key: "country",
        label: "Land",
    },
    SummaryField {
        key: "restaurantType",
        label: "Restaurant-Typ",
    },
    SummaryField {
        key: "seats",
        label: "Anzahl Sitzplätze",
    },
    SummaryField {
        key: "reservationsPerDay",
        label: "Ø Reservierungen pro Öffnungstag",
    },
    SummaryField {
        key: "avgGuestsPerReservation",
        label: "Ø Gäste pro Reservierung",
    },
    SummaryField {
        key: "openDays",
        label: "Tage pro Woche geöffnet",
    },
    SummaryField {
        key: "averageSpend",
        label: "Ø Umsatz pro Gast",
    },
    SummaryField {
        key: "noShowGuestsLast30Days",
        label: "No-Shows (letzte 30 Tage)",
    },
    SummaryField {
        key: "hasOnlineReservation",
        label: "Online-Reservierungssystem im Einsatz",
    },
    SummaryField {
        key: "reservationTool",
        label: "Reservierungssystem",
    },
    SummaryField {
        key: "feeForNoShow",
        label: "No-Show-Gebühren erhoben",
    },
    SummaryField {
        key: "noShowFee",
        label: "No-Show-Gebühr pro Gast",
    },
    SummaryField {
        key: "waitlist",
        label: "Warteliste vorhanden",
    },
];
