//! Lease payment calculator
//!
//! Standard closed-end lease: monthly payment is the depreciation fee plus
//! the rent charge, taxed at the flat rate. Negative trade equity is never
//! rolled into the capitalized cost; it is reported back so the customer can
//! cover it in cash.

use log::debug;
use serde::{Deserialize, Serialize};

use super::vehicle::VehiclePricing;
use crate::assumptions::{LeaseTerms, ResidualSource};
use crate::money::{round_money, Money};

/// Result of a lease calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaseQuote {
    pub term_months: u32,
    /// Published monthly payment including tax. May be negative when the
    /// down payment and trade equity exceed the depreciation.
    pub monthly: Money,
    pub due_at_signing: Money,
    pub total_cost: Money,
    pub capitalized_cost: Money,
    pub residual_value: Money,
    pub residual_percent: f64,
    pub residual_source: ResidualSource,
    pub depreciation_fee: Money,
    pub rent_charge: Money,
    /// Trade equity actually applied to the capitalized cost
    pub trade_equity_applied: Money,
    /// Negative trade equity left for the customer to cover in cash
    pub negative_equity: Money,
}

/// Calculate a lease payment.
///
/// # Arguments
/// * `pricing` - Sale price and MSRP of the vehicle
/// * `terms` - Term, residual table, money factor, fees and tax
/// * `down_payment` - Cash down, expected to be >= 0
/// * `trade_equity` - Trade value less payoff; negative when upside down
pub fn calculate_lease(
    pricing: &VehiclePricing,
    terms: &LeaseTerms,
    down_payment: Money,
    trade_equity: Money,
) -> LeaseQuote {
    let term = terms.term_months as f64;
    let equity_applied = trade_equity.max(0);
    let negative_equity = (-trade_equity).max(0);

    let capitalized_cost = pricing.gross_amount() - down_payment as f64 - equity_applied as f64;

    let residual = terms.residuals.residual_for(terms.term_months);
    let residual_value = pricing.msrp as f64 * residual.percent;

    let depreciation_fee = (capitalized_cost - residual_value) / term;
    let rent_charge = (capitalized_cost + residual_value) * terms.money_factor;
    let monthly_pre_tax = depreciation_fee + rent_charge;
    let monthly = round_money(monthly_pre_tax * (1.0 + terms.tax_rate));

    let due_at_signing = down_payment + monthly + terms.acquisition_fee;
    let total_cost = monthly * terms.term_months as Money + down_payment;

    debug!(
        "lease {}mo: cap_cost={:.2} residual={:.2} ({:.2}, {:?}) depreciation={:.2} rent={:.2} monthly={}",
        terms.term_months, capitalized_cost, residual_value, residual.percent,
        residual.source, depreciation_fee, rent_charge, monthly
    );

    LeaseQuote {
        term_months: terms.term_months,
        monthly,
        due_at_signing,
        total_cost,
        capitalized_cost: round_money(capitalized_cost),
        residual_value: round_money(residual_value),
        residual_percent: residual.percent,
        residual_source: residual.source,
        depreciation_fee: round_money(depreciation_fee),
        rent_charge: round_money(rent_charge),
        trade_equity_applied: equity_applied,
        negative_equity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{LeaseProgram, ResidualTable};

    fn showroom_terms(term_months: u32) -> LeaseTerms {
        LeaseProgram::default().terms_for(term_months, 0.0625)
    }

    fn pricing() -> VehiclePricing {
        VehiclePricing::new(47_495, 52_995)
    }

    #[test]
    fn test_reference_lease() {
        let quote = calculate_lease(&pricing(), &showroom_terms(39), 3_000, 0);

        assert_eq!(quote.capitalized_cost, 44_495);
        assert_eq!(quote.residual_value, 30_737);
        assert_eq!(quote.residual_source, ResidualSource::Table);
        assert_eq!(quote.depreciation_fee, 353);
        assert_eq!(quote.rent_charge, 94);
        assert_eq!(quote.monthly, 475);
        assert_eq!(quote.due_at_signing, 4_370);
        assert_eq!(quote.total_cost, 21_525);
    }

    #[test]
    fn test_term_missing_from_table_uses_default_residual() {
        let terms = LeaseTerms {
            residuals: ResidualTable::from_loaded(&[(24, 0.66), (36, 0.60)]),
            ..showroom_terms(48)
        };
        let quote = calculate_lease(&pricing(), &terms, 3_000, 0);

        assert_eq!(quote.residual_percent, 0.58);
        assert_eq!(quote.residual_source, ResidualSource::Default);
        assert_eq!(quote.residual_value, 30_737);
    }

    #[test]
    fn test_monthly_decreases_with_down_payment() {
        let terms = showroom_terms(36);
        let mut previous = calculate_lease(&pricing(), &terms, 0, 0).monthly;

        for down in (500..=10_000).step_by(500) {
            let monthly = calculate_lease(&pricing(), &terms, down, 0).monthly;
            assert!(monthly < previous, "down={} monthly={} previous={}", down, monthly, previous);
            previous = monthly;
        }
    }

    #[test]
    fn test_positive_trade_equity_reduces_cap_cost() {
        let with_cash = calculate_lease(&pricing(), &showroom_terms(39), 5_000, 0);
        let with_trade = calculate_lease(&pricing(), &showroom_terms(39), 0, 5_000);

        assert_eq!(with_cash.capitalized_cost, with_trade.capitalized_cost);
        assert_eq!(with_cash.monthly, with_trade.monthly);
        assert_eq!(with_trade.trade_equity_applied, 5_000);
        // Trade equity is not cash due at signing
        assert_eq!(with_trade.due_at_signing, with_trade.monthly + 895);
    }

    #[test]
    fn test_negative_equity_is_not_capitalized() {
        let clean = calculate_lease(&pricing(), &showroom_terms(39), 3_000, 0);
        let upside_down = calculate_lease(&pricing(), &showroom_terms(39), 3_000, -4_200);

        assert_eq!(upside_down.capitalized_cost, clean.capitalized_cost);
        assert_eq!(upside_down.monthly, clean.monthly);
        assert_eq!(upside_down.trade_equity_applied, 0);
        assert_eq!(upside_down.negative_equity, 4_200);
    }

    #[test]
    fn test_large_down_payment_yields_negative_monthly() {
        let quote = calculate_lease(&pricing(), &showroom_terms(39), 25_000, 0);

        // cap cost 22,495 is below the 30,737 residual
        assert!(quote.monthly < 0);
        assert_eq!(quote.total_cost, quote.monthly * 39 + 25_000);
    }

    #[test]
    fn test_capitalized_addons_raise_payment_not_residual() {
        let base = calculate_lease(&pricing(), &showroom_terms(39), 3_000, 0);
        let with_addons = calculate_lease(
            &pricing().with_capitalized_addons(2_190),
            &showroom_terms(39),
            3_000,
            0,
        );

        assert_eq!(with_addons.capitalized_cost, base.capitalized_cost + 2_190);
        assert_eq!(with_addons.residual_value, base.residual_value);
        assert!(with_addons.monthly > base.monthly);
    }
}
