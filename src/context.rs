//! The combined data the page composer reads.

use crate::form::FormAnswers;
use crate::metrics::{self, DerivedMetrics};

/// Derived metrics plus the raw fields needed for narrative text.
///
/// Built once per report and read-only afterwards; the composer never writes
/// back into it.
#[derive(Clone, Debug)]
pub struct ReportContext {
    metrics: DerivedMetrics,
    restaurant_name: String,
    first_name: String,
    currency: &'static str,
    reservation_tool: String,
    has_online_reservation: bool,
    charges_no_show_fee: bool,
}

impl ReportContext {
    /// Builds the context from raw answers, deriving the metrics once.
    pub fn from_answers(answers: &FormAnswers) -> Self {
        let currency = if answers.text("country") == "Schweiz" {
            "CHF"
        } else {
            "€"
        };
        Self {
            metrics: metrics::derive(answers),
            restaurant_name: answers.text("restaurantName").to_string(),
            first_name: answers.text("firstName").to_string(),
            currency,
            reservation_tool: answers.text("reservationTool").to_string(),
            has_online_reservation: answers.is_yes("hasOnlineReservation"),
            charges_no_show_fee: answers.is_yes("feeForNoShow"),
        }
    }

    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// One of the two supported currency symbols; no live FX.
    pub fn currency(&self) -> &'static str {
        self.currency
    }

    pub fn reservation_tool(&self) -> &str {
        &self.reservation_tool
    }

    pub fn charges_no_show_fee(&self) -> bool {
        self.charges_no_show_fee
    }

    /// Whether the optimization-potential page is emitted.
    ///
    /// True when no online system is in use, when a competing tool is in use,
    /// and also when aleno itself runs without no-show fees enabled.  Only
    /// aleno with fees enabled suppresses the page.  Evaluated once per
    /// report, never re-evaluated mid-page.
    pub fn wants_potential_page(&self) -> bool {
        if !self.has_online_reservation {
            return true;
        }
        if !self.reservation_tool.eq_ignore_ascii_case("aleno") {
            return true;
        }
        !self.charges_no_show_fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormAnswers;

    #[test]
    fn currency_follows_the_country_field() {
        let swiss = ReportContext::from_answers(&FormAnswers::default().with_text("country", "Schweiz"));
        assert_eq!(swiss.currency(), "CHF");

        let german = ReportContext::from_answers(&FormAnswers::default().with_text("country", "Deutschland"));
        assert_eq!(german.currency(), "€");

        let absent = ReportContext::from_answers(&FormAnswers::default());
        assert_eq!(absent.currency(), "€");
    }

    #[test]
    fn potential_page_rule() {
        let no_system = ReportContext::from_answers(
            &FormAnswers::default().with_text("hasOnlineReservation", "Nein"),
        );
        assert!(no_system.wants_potential_page());

        let competitor = ReportContext::from_answers(
            &FormAnswers::default()
                .with_text("hasOnlineReservation", "Ja")
                .with_text("reservationTool", "OpenTable"),
        );
        assert!(competitor.wants_potential_page());

        let aleno_without_fees = ReportContext::from_answers(
            &FormAnswers::default()
                .with_text("hasOnlineReservation", "Ja")
                .with_text("reservationTool", "aleno")
                .with_text("feeForNoShow", "Nein"),
        );
        assert!(aleno_without_fees.wants_potential_page());

        let aleno_with_fees = ReportContext::from_answers(
            &FormAnswers::default()
                .with_text("hasOnlineReservation", "Ja")
                .with_text("reservationTool", "aleno")
                .with_text("feeForNoShow", "Ja"),
        );
        assert!(!aleno_with_fees.wants_potential_page());
    }
}
