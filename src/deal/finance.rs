//! Finance (retail installment) payment calculator
//!
//! Tax is charged on the full sale price and financed with the principal.
//! Payment uses the standard amortizing-loan formula
//! `P × r(1+r)^n / ((1+r)^n - 1)` with `r = APR / 1200`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::vehicle::VehiclePricing;
use crate::assumptions::FinanceTerms;
use crate::money::{round_money, Money};

/// Result of a finance calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinanceQuote {
    pub term_months: u32,
    pub apr: f64,
    pub monthly: Money,
    pub total_cost: Money,
    pub total_interest: Money,
    /// Principal plus tax, before interest
    pub amount_financed: Money,
    pub tax_amount: Money,
    pub trade_equity_applied: Money,
    pub negative_equity: Money,
}

/// Monthly rates below this are treated as zero; `(1 + r)^n - 1` loses all precision there
const MIN_MONTHLY_RATE: f64 = 1e-12;

/// Whether an APR (percent) takes the even-split branch of [`amortized_payment`]
pub fn is_zero_rate(annual_rate_percent: f64) -> bool {
    (annual_rate_percent / 100.0 / 12.0).abs() < MIN_MONTHLY_RATE
}

/// Level monthly payment for a fully amortizing loan.
///
/// Zero rate divides the balance evenly; the general formula would divide by zero.
pub fn amortized_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let n = term_months as f64;
    let r = annual_rate_percent / 100.0 / 12.0;

    if is_zero_rate(annual_rate_percent) {
        return principal / n;
    }

    let growth = (1.0 + r).powi(term_months as i32);
    principal * (r * growth) / (growth - 1.0)
}

/// Calculate a finance payment.
///
/// # Arguments
/// * `pricing` - Sale price of the vehicle (MSRP unused)
/// * `terms` - Term, APR in percent and tax rate
/// * `down_payment` - Cash down, expected to be >= 0
/// * `trade_equity` - Trade value less payoff; negative when upside down
pub fn calculate_finance(
    pricing: &VehiclePricing,
    terms: &FinanceTerms,
    down_payment: Money,
    trade_equity: Money,
) -> FinanceQuote {
    let equity_applied = trade_equity.max(0);
    let negative_equity = (-trade_equity).max(0);

    let principal = pricing.gross_amount() - down_payment as f64 - equity_applied as f64;
    let tax_amount = pricing.sale_price as f64 * terms.tax_rate;
    let total_principal = principal + tax_amount;

    let zero_rate = is_zero_rate(terms.apr);
    let payment = amortized_payment(total_principal, terms.apr, terms.term_months);
    let monthly = round_money(payment);

    let total_cost = monthly * terms.term_months as Money + down_payment;
    // Trade equity paid down principal without passing through total_cost
    let total_interest = if zero_rate {
        0
    } else {
        let interest = total_cost as f64 + equity_applied as f64
            - pricing.sale_price as f64
            - pricing.capitalized_addons as f64
            - tax_amount;
        // Rounding the payment can undershoot by at most half a unit per month
        if interest < -(terms.term_months as f64) / 2.0 - 1.0 {
            warn!("finance interest {:.2} below rounding tolerance", interest);
        }
        round_money(interest).max(0)
    };

    debug!(
        "finance {}mo @ {:.2}%: principal={:.2} tax={:.2} payment={:.4} monthly={} interest={}",
        terms.term_months, terms.apr, principal, tax_amount, payment, monthly, total_interest
    );

    FinanceQuote {
        term_months: terms.term_months,
        apr: terms.apr,
        monthly,
        total_cost,
        total_interest,
        amount_financed: round_money(total_principal),
        tax_amount: round_money(tax_amount),
        trade_equity_applied: equity_applied,
        negative_equity,
    }
}
