//! Derivation of the business figures shown in the report.
//!
//! Everything here is a pure function of [`FormAnswers`]: no I/O, no hidden
//! state, bit-identical output for identical input.  All figures are
//! normalized to a 30-day window on a guest basis (the number of persons, not
//! the number of reservations).

use crate::form::FormAnswers;

/// The no-show rate the target scenario assumes, in percent.
pub const TARGET_NO_SHOW_RATE: f64 = 0.3;

/// Share of total revenue assumed recoverable through personalized upselling.
const UPSELL_SHARE: f64 = 0.05;

/// Monthly product cost the ROI factor is measured against.
const ROI_MONTHLY_COST: f64 = 350.0;

/// Hypothetical figures at the fixed [`TARGET_NO_SHOW_RATE`].
///
/// Computed independently from the actual-state figures; used only by the
/// comparison tile and never fed back into [`DerivedMetrics`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetScenario {
    /// The assumed no-show rate in percent.
    pub no_show_rate: f64,
    /// Guests still lost to no-shows at the target rate.
    pub no_show_guests_30: f64,
    /// Revenue still lost at the target rate.
    pub gross_loss_30: f64,
    /// Additional revenue compared to the actual state.
    pub regained_revenue_30: f64,
}

/// The derived business figures, all clamped to be non-negative.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedMetrics {
    /// Open days projected onto a 30-day window.
    pub open_days_30: f64,
    /// Reservations over 30 days.
    pub total_reservations_30: f64,
    /// Guests over 30 days.
    pub total_guests_30: f64,
    /// No-show guests as reported for the last 30 days.
    pub no_show_guests_30: f64,
    /// No-show rate in percent, 0 when there were no guests.
    pub no_show_rate: f64,
    /// Projected total revenue over 30 days.
    pub total_revenue_30: f64,
    /// Revenue lost to no-shows before fee recovery.
    pub gross_loss_30: f64,
    /// Revenue recovered through charged no-show fees.
    pub recovered_by_fees_30: f64,
    /// Net revenue lost to no-shows.
    pub net_loss_30: f64,
    /// Upselling potential over 30 days.
    pub upsell_30: f64,
    /// Return-on-investment multiple, floored to a whole number.
    pub roi_factor: f64,
    /// The comparison scenario at the target rate.
    pub target: TargetScenario,
}

/// Computes all derived figures from the raw answers.
///
/// Numeric fields are read through the defensive [`FormAnswers`] accessors, so
/// absent or malformed input degrades to zero instead of failing.  A rate is
/// only computed when its denominator is strictly positive; otherwise it is
/// defined as 0.
pub fn derive(answers: &FormAnswers) -> DerivedMetrics {
    let reservations_per_day = answers.number("reservationsPerDay").max(0.0);
    let guests_per_reservation = answers.number("avgGuestsPerReservation").max(0.0);
    let open_days_per_week = answers.number("openDays").max(0.0);
    let average_spend = answers.number("averageSpend").max(0.0);
    let no_show_guests_30 = answers.number("noShowGuestsLast30Days").max(0.0);

    let fee_per_guest = if answers.is_yes("feeForNoShow") {
        answers.number("noShowFee").max(0.0)
    } else {
        0.0
    };

    let open_days_30 = if open_days_per_week > 0.0 {
        open_days_per_week / 7.0 * 30.0
    } else {
        0.0
    };
    let total_reservations_30 = reservations_per_day * open_days_30;
    let total_guests_30 = total_reservations_30 * guests_per_reservation;

    let no_show_rate = if total_guests_30 > 0.0 {
        no_show_guests_30 / total_guests_30 * 100.0
    } else {
        0.0
    };

    let total_revenue_30 = total_guests_30 * average_spend;
    let gross_loss_30 = no_show_guests_30 * average_spend;
    let recovered_by_fees_30 = no_show_guests_30 * fee_per_guest;
    let net_loss_30 = (gross_loss_30 - recovered_by_fees_30).max(0.0);

    let upsell_30 = total_revenue_30 * UPSELL_SHARE;
    let roi_factor = ((net_loss_30 + upsell_30) / ROI_MONTHLY_COST).floor().max(0.0);

    let target = target_scenario(total_guests_30, average_spend, gross_loss_30);

    DerivedMetrics {
        open_days_30,
        total_reservations_30,
        total_guests_30,
        no_show_guests_30,
        no_show_rate,
        total_revenue_30,
        gross_loss_30,
        recovered_by_fees_30,
        net_loss_30,
        upsell_30,
        roi_factor,
        target,
    }
}

fn target_scenario(total_guests_30: f64, average_spend: f64, actual_gross_loss_30: f64) -> TargetScenario {
    let no_show_guests_30 = total_guests_30 * TARGET_NO_SHOW_RATE / 100.0;
    let gross_loss_30 = no_show_guests_30 * average_spend;
    TargetScenario {
        no_show_rate: TARGET_NO_SHOW_RATE,
        no_show_guests_30,
        gross_loss_30,
        regained_revenue_30: (actual_gross_loss_30 - gross_loss_30).max(0.0),
    }
}

/// Formats a currency amount: rounded to whole units, `.`-grouped (de-DE).
pub fn format_amount(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a percentage with one decimal and a decimal comma (de-DE).
pub fn format_rate(value: f64) -> String {
    format!("{:.1}", value.max(0.0)).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormAnswers;

    fn sample_answers() -> FormAnswers {
        FormAnswers::default()
            .with_number("reservationsPerDay", 40.0)
            .with_number("avgGuestsPerReservation", 2.0)
            .with_number("openDays", 7.0)
            .with_number("averageSpend", 50.0)
            .with_number("noShowGuestsLast30Days", 12.0)
    }

    #[test]
    fn thirty_day_projection_matches_the_reference_scenario() {
        let metrics = derive(&sample_answers());
        assert_eq!(metrics.open_days_30, 30.0);
        assert_eq!(metrics.total_reservations_30, 1200.0);
        assert_eq!(metrics.total_guests_30, 2400.0);
        assert_eq!(metrics.no_show_rate, 0.5);
        assert_eq!(metrics.gross_loss_30, 600.0);
        assert_eq!(metrics.total_revenue_30, 120_000.0);
    }

    #[test]
    fn zero_open_days_yields_zero_rate_not_nan() {
        let answers = sample_answers().with_number("openDays", 0.0);
        let metrics = derive(&answers);
        assert_eq!(metrics.total_reservations_30, 0.0);
        assert_eq!(metrics.total_guests_30, 0.0);
        assert_eq!(metrics.no_show_rate, 0.0);
        assert!(metrics.no_show_rate.is_finite());
    }

    #[test]
    fn fee_recovery_requires_the_explicit_flag() {
        let without_flag = derive(&sample_answers().with_number("noShowFee", 20.0));
        assert_eq!(without_flag.recovered_by_fees_30, 0.0);
        assert_eq!(without_flag.net_loss_30, 600.0);

        let with_flag = derive(
            &sample_answers()
                .with_text("feeForNoShow", "Ja")
                .with_number("noShowFee", 20.0),
        );
        assert_eq!(with_flag.recovered_by_fees_30, 240.0);
        assert_eq!(with_flag.net_loss_30, 360.0);
    }

    #[test]
    fn net_loss_is_clamped_to_zero() {
        let answers = sample_answers()
            .with_text("feeForNoShow", "Ja")
            .with_number("noShowFee", 500.0);
        let metrics = derive(&answers);
        assert_eq!(metrics.net_loss_30, 0.0);
    }

    #[test]
    fn derivation_is_idempotent() {
        let answers = sample_answers().with_text("feeForNoShow", "Ja");
        assert_eq!(derive(&answers), derive(&answers));
    }

    #[test]
    fn target_scenario_does_not_disturb_actual_figures() {
        let metrics = derive(&sample_answers());
        assert_eq!(metrics.target.no_show_rate, TARGET_NO_SHOW_RATE);
        assert_eq!(metrics.target.no_show_guests_30, 2400.0 * 0.003);
        assert_eq!(metrics.no_show_guests_30, 12.0);
        assert_eq!(metrics.gross_loss_30, 600.0);
    }

    #[test]
    fn amount_formatting_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.4), "999");
        assert_eq!(format_amount(1_234.0), "1.234");
        assert_eq!(format_amount(1_234_567.0), "1.234.567");
    }

    #[test]
    fn rate_formatting_uses_a_decimal_comma() {
        assert_eq!(format_rate(0.5), "0,5");
        assert_eq!(format_rate(12.25), "12,2");
    }
}
