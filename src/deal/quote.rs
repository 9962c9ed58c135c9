//! Deal quote orchestration
//!
//! Combines trade-in valuation, protection totals and the lease or finance
//! calculator into a single [`DealQuote`]. Every call builds a fresh quote
//! from its inputs; nothing is cached between calls.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::finance::calculate_finance;
use super::lease::calculate_lease;
use super::protection::{ProtectionSelection, ProtectionSummary};
use super::trade_in::{BaseValueLookup, TradeInDescription, TradeInEstimate, TradeInValuator};
use super::vehicle::VehiclePricing;
use crate::assumptions::{DealAssumptions, ResidualSource};
use crate::error::{QuoteError, Result};
use crate::money::Money;

/// Lease or finance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingMethod {
    Lease,
    Finance,
}

impl fmt::Display for FinancingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinancingMethod::Lease => f.write_str("lease"),
            FinancingMethod::Finance => f.write_str("finance"),
        }
    }
}

impl FromStr for FinancingMethod {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lease" => Ok(FinancingMethod::Lease),
            "finance" | "buy" => Ok(FinancingMethod::Finance),
            other => Err(QuoteError::Config(format!("unknown financing method: {}", other))),
        }
    }
}

/// How selected protection packages are paid for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionTreatment {
    /// Rolled into the capitalized cost (lease) or amount financed (finance)
    #[default]
    Capitalized,
    /// Billed as a separate line: added to total cost (and due at signing
    /// for leases), never to the monthly payment
    Itemized,
}

/// Business-rule toggles for quote construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub protection_treatment: ProtectionTreatment,
}

/// Trade-in attached to a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIn {
    pub description: TradeInDescription,

    /// Outstanding loan balance on the trade; zero when absent
    #[serde(default)]
    pub payoff_amount: Option<Money>,

    /// Estimate already obtained for this description. Valued on demand when absent.
    #[serde(default)]
    pub estimate: Option<TradeInEstimate>,
}

impl TradeIn {
    pub fn new(description: TradeInDescription) -> Self {
        Self {
            description,
            payoff_amount: None,
            estimate: None,
        }
    }
}

/// Inputs for one quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub pricing: VehiclePricing,
    pub financing_method: FinancingMethod,

    /// Requested term; program default when absent
    #[serde(default)]
    pub term_months: Option<u32>,

    /// Requested APR in percent (finance only); program default when absent
    #[serde(default)]
    pub apr: Option<f64>,

    #[serde(default)]
    pub down_payment: Money,

    #[serde(default)]
    pub trade_in: Option<TradeIn>,

    #[serde(default)]
    pub protection: ProtectionSelection,
}

/// Whether the quote is complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuoteStatus {
    Final,
    /// Computed without a failed input (trade equity taken as zero)
    Provisional { reason: String },
}

impl QuoteStatus {
    pub fn is_provisional(&self) -> bool {
        matches!(self, QuoteStatus::Provisional { .. })
    }
}

/// Adjustments made while building a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteWarning {
    /// Requested term is not offered; the nearest offered term was used
    TermAdjusted { requested: u32, applied: u32 },
    /// Term has no residual entry; the table default was used
    DefaultResidualApplied { term_months: u32, residual_percent: f64 },
    /// Requested APR outside the program range
    AprClamped { requested: f64, applied: f64 },
    /// Negative down payment treated as zero
    DownPaymentClamped { requested: Money },
    /// Trade payoff exceeds its value; the difference needs a cash contribution
    NegativeEquityUnresolved { amount: Money },
    /// Lease payment came out negative
    NegativeMonthlyPayment { monthly: Money },
}

/// Unified quote for the payment screen and lead submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealQuote {
    pub financing_method: FinancingMethod,
    pub term_months: u32,
    pub monthly: Money,
    /// Lease only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at_signing: Option<Money>,
    pub total_cost: Money,
    /// Finance only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_interest: Option<Money>,
    /// Lease only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual: Option<Money>,
    /// Finance only, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    pub protection_total: Money,
    pub protection_monthly_estimate: Money,
    pub protection_treatment: ProtectionTreatment,
    pub trade_equity_applied: Money,
    pub negative_equity: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_in_estimate: Option<TradeInEstimate>,
    pub status: QuoteStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<QuoteWarning>,
}

/// Compact record of the chosen terms, attached to a lead submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadQuoteSummary {
    pub financing_method: FinancingMethod,
    pub term_months: u32,
    pub monthly: Money,
    pub down_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at_signing: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    pub trade_equity_applied: Money,
    pub protection_ids: Vec<String>,
    pub provisional: bool,
}

impl LeadQuoteSummary {
    pub fn new(request: &QuoteRequest, quote: &DealQuote) -> Self {
        Self {
            financing_method: quote.financing_method,
            term_months: quote.term_months,
            monthly: quote.monthly,
            down_payment: request.down_payment.max(0),
            due_at_signing: quote.due_at_signing,
            apr: quote.apr,
            trade_equity_applied: quote.trade_equity_applied,
            protection_ids: request.protection.iter().map(|p| p.id.clone()).collect(),
            provisional: quote.status.is_provisional(),
        }
    }
}

struct TradeResolution {
    equity: Money,
    estimate: Option<TradeInEstimate>,
    status: QuoteStatus,
}

/// Builds quotes against one deal program
#[derive(Debug, Clone)]
pub struct QuoteEngine<L: BaseValueLookup> {
    assumptions: DealAssumptions,
    config: QuoteConfig,
    base_values: L,
}

impl<L: BaseValueLookup> QuoteEngine<L> {
    pub fn new(assumptions: DealAssumptions, config: QuoteConfig, base_values: L) -> Self {
        Self {
            assumptions,
            config,
            base_values,
        }
    }

    pub fn assumptions(&self) -> &DealAssumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Value a trade-in with this engine's base values and appraisal assumptions
    pub fn appraise(&self, description: &TradeInDescription) -> Result<TradeInEstimate> {
        TradeInValuator::new(&self.assumptions.trade_in, &self.base_values).estimate(description)
    }

    /// Build a quote. Never fails: unusable inputs are adjusted and reported
    /// through `warnings`, and a failed trade-in valuation yields a provisional quote.
    pub fn build_quote(&self, request: &QuoteRequest) -> DealQuote {
        let mut warnings = Vec::new();

        let down_payment = if request.down_payment < 0 {
            warn!("negative down payment {} treated as zero", request.down_payment);
            warnings.push(QuoteWarning::DownPaymentClamped {
                requested: request.down_payment,
            });
            0
        } else {
            request.down_payment
        };

        let trade = self.resolve_trade(request.trade_in.as_ref());
        let protection = request.protection.aggregate();
        let pricing = match self.config.protection_treatment {
            ProtectionTreatment::Capitalized => {
                request.pricing.with_capitalized_addons(protection.total)
            }
            ProtectionTreatment::Itemized => request.pricing,
        };
        let tax_rate = self.assumptions.tax.rate;

        let mut quote = match request.financing_method {
            FinancingMethod::Lease => {
                let program = &self.assumptions.lease;
                let term = resolve_term(
                    request.term_months,
                    program.default_term,
                    |t| program.validate_term(t),
                    |t| program.nearest_term(t),
                    &mut warnings,
                );
                let terms = program.terms_for(term, tax_rate);
                let lease = calculate_lease(&pricing, &terms, down_payment, trade.equity);

                if lease.residual_source == ResidualSource::Default {
                    warnings.push(QuoteWarning::DefaultResidualApplied {
                        term_months: term,
                        residual_percent: lease.residual_percent,
                    });
                }
                if lease.monthly < 0 {
                    warn!("lease payment is negative: {}", lease.monthly);
                    warnings.push(QuoteWarning::NegativeMonthlyPayment {
                        monthly: lease.monthly,
                    });
                }

                DealQuote {
                    financing_method: FinancingMethod::Lease,
                    term_months: term,
                    monthly: lease.monthly,
                    due_at_signing: Some(lease.due_at_signing),
                    total_cost: lease.total_cost,
                    total_interest: None,
                    residual: Some(lease.residual_value),
                    apr: None,
                    protection_total: protection.total,
                    protection_monthly_estimate: protection.monthly_total,
                    protection_treatment: self.config.protection_treatment,
                    trade_equity_applied: lease.trade_equity_applied,
                    negative_equity: lease.negative_equity,
                    trade_in_estimate: trade.estimate,
                    status: trade.status,
                    warnings: Vec::new(),
                }
            }
            FinancingMethod::Finance => {
                let program = &self.assumptions.finance;
                let term = resolve_term(
                    request.term_months,
                    program.default_term,
                    |t| program.validate_term(t),
                    |t| program.nearest_term(t),
                    &mut warnings,
                );
                let requested_apr = request.apr.unwrap_or(program.default_apr);
                let apr = program.clamp_apr(requested_apr);
                if apr != requested_apr {
                    warn!("APR {} outside program range, using {}", requested_apr, apr);
                    warnings.push(QuoteWarning::AprClamped {
                        requested: requested_apr,
                        applied: apr,
                    });
                }
                let terms = program.terms_for(term, apr, tax_rate);
                let finance = calculate_finance(&pricing, &terms, down_payment, trade.equity);

                DealQuote {
                    financing_method: FinancingMethod::Finance,
                    term_months: term,
                    monthly: finance.monthly,
                    due_at_signing: None,
                    total_cost: finance.total_cost,
                    total_interest: Some(finance.total_interest),
                    residual: None,
                    apr: Some(apr),
                    protection_total: protection.total,
                    protection_monthly_estimate: protection.monthly_total,
                    protection_treatment: self.config.protection_treatment,
                    trade_equity_applied: finance.trade_equity_applied,
                    negative_equity: finance.negative_equity,
                    trade_in_estimate: trade.estimate,
                    status: trade.status,
                    warnings: Vec::new(),
                }
            }
        };

        if self.config.protection_treatment == ProtectionTreatment::Itemized {
            apply_itemized_protection(&mut quote, &protection);
        }
        if quote.negative_equity > 0 {
            warnings.push(QuoteWarning::NegativeEquityUnresolved {
                amount: quote.negative_equity,
            });
        }
        quote.warnings = warnings;

        debug!(
            "{} quote: {}mo monthly={} total={} status={:?}",
            quote.financing_method, quote.term_months, quote.monthly, quote.total_cost, quote.status
        );
        quote
    }

    fn resolve_trade(&self, trade_in: Option<&TradeIn>) -> TradeResolution {
        let Some(trade_in) = trade_in else {
            return TradeResolution {
                equity: 0,
                estimate: None,
                status: QuoteStatus::Final,
            };
        };

        let estimate = match trade_in.estimate {
            Some(estimate) => Ok(estimate),
            None => self.appraise(&trade_in.description),
        };

        match estimate {
            Ok(estimate) => TradeResolution {
                equity: estimate.mid - trade_in.payoff_amount.unwrap_or(0),
                estimate: Some(estimate),
                status: QuoteStatus::Final,
            },
            Err(err) => {
                let incomplete = QuoteError::QuoteIncomplete(err.to_string());
                warn!("{}; quoting without trade equity", incomplete);
                TradeResolution {
                    equity: 0,
                    estimate: None,
                    status: QuoteStatus::Provisional {
                        reason: incomplete.to_string(),
                    },
                }
            }
        }
    }
}

fn resolve_term<V, N>(
    requested: Option<u32>,
    default_term: u32,
    validate: V,
    nearest: N,
    warnings: &mut Vec<QuoteWarning>,
) -> u32
where
    V: Fn(u32) -> Result<u32>,
    N: Fn(u32) -> u32,
{
    let Some(requested) = requested else {
        return default_term;
    };
    match validate(requested) {
        Ok(term) => term,
        Err(err) => {
            let applied = nearest(requested);
            warn!("{}; using {} months", err, applied);
            warnings.push(QuoteWarning::TermAdjusted { requested, applied });
            applied
        }
    }
}

fn apply_itemized_protection(quote: &mut DealQuote, protection: &ProtectionSummary) {
    quote.total_cost += protection.total;
    if let Some(due) = quote.due_at_signing.as_mut() {
        *due += protection.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::BaseValueTable;
    use crate::deal::protection::ProtectionPackage;
    use crate::deal::trade_in::Condition;

    fn assumptions() -> DealAssumptions {
        let mut assumptions = DealAssumptions::default_showroom();
        assumptions.trade_in.valuation_year = Some(2026);
        assumptions
    }

    fn base_values() -> BaseValueTable {
        let mut table = BaseValueTable::default();
        table.insert(2022, "Honda", "Accord", 20_000.0);
        table
    }

    fn engine() -> QuoteEngine<BaseValueTable> {
        QuoteEngine::new(assumptions(), QuoteConfig::default(), base_values())
    }

    fn request(method: FinancingMethod, term: u32) -> QuoteRequest {
        QuoteRequest {
            pricing: VehiclePricing::new(47_495, 52_995),
            financing_method: method,
            term_months: Some(term),
            apr: None,
            down_payment: 3_000,
            trade_in: None,
            protection: ProtectionSelection::new(),
        }
    }

    fn accord_trade(payoff: Option<Money>) -> TradeIn {
        TradeIn {
            description: TradeInDescription {
                year: 2022,
                make: "Honda".to_string(),
                model: "Accord".to_string(),
                trim: None,
                mileage_miles: 48_000,
                condition: Condition::Good,
                vin: None,
            },
            payoff_amount: payoff,
            estimate: None,
        }
    }

    fn unknown_trade() -> TradeIn {
        TradeIn::new(TradeInDescription {
            year: 1991,
            make: "Geo".to_string(),
            model: "Metro".to_string(),
            trim: None,
            mileage_miles: 180_000,
            condition: Condition::Poor,
            vin: None,
        })
    }

    #[test]
    fn test_reference_lease_quote() {
        let quote = engine().build_quote(&request(FinancingMethod::Lease, 39));

        assert_eq!(quote.monthly, 475);
        assert_eq!(quote.due_at_signing, Some(4_370));
        assert_eq!(quote.total_cost, 21_525);
        assert_eq!(quote.residual, Some(30_737));
        assert_eq!(quote.total_interest, None);
        assert_eq!(quote.status, QuoteStatus::Final);
        assert!(quote.warnings.is_empty());
    }

    #[test]
    fn test_reference_finance_quote() {
        let quote = engine().build_quote(&request(FinancingMethod::Finance, 72));

        assert_eq!(quote.apr, Some(6.9));
        assert_eq!(quote.monthly, 807);
        assert_eq!(quote.total_cost, 61_104);
        assert_eq!(quote.total_interest, Some(10_641));
        assert_eq!(quote.due_at_signing, None);
        assert_eq!(quote.residual, None);
    }

    #[test]
    fn test_default_terms_when_unspecified() {
        let mut req = request(FinancingMethod::Lease, 39);
        req.term_months = None;
        assert_eq!(engine().build_quote(&req).term_months, 39);

        req.financing_method = FinancingMethod::Finance;
        assert_eq!(engine().build_quote(&req).term_months, 72);
    }

    #[test]
    fn test_invalid_term_snaps_to_nearest() {
        let quote = engine().build_quote(&request(FinancingMethod::Lease, 48));

        assert_eq!(quote.term_months, 39);
        assert_eq!(quote.monthly, 475);
        assert_eq!(
            quote.warnings,
            vec![QuoteWarning::TermAdjusted { requested: 48, applied: 39 }]
        );
    }

    #[test]
    fn test_offered_term_without_residual_uses_default() {
        let mut assumptions = assumptions();
        assumptions.lease.terms.push(48);
        let engine = QuoteEngine::new(assumptions, QuoteConfig::default(), base_values());

        let quote = engine.build_quote(&request(FinancingMethod::Lease, 48));
        assert_eq!(quote.term_months, 48);
        assert_eq!(quote.residual, Some(30_737));
        assert!(quote.warnings.contains(&QuoteWarning::DefaultResidualApplied {
            term_months: 48,
            residual_percent: 0.58,
        }));
    }

    #[test]
    fn test_trade_equity_from_estimate_less_payoff() {
        let mut req = request(FinancingMethod::Finance, 72);
        req.trade_in = Some(accord_trade(Some(6_500)));

        let quote = engine().build_quote(&req);
        assert_eq!(quote.trade_in_estimate.map(|e| e.mid), Some(20_000));
        assert_eq!(quote.trade_equity_applied, 13_500);
        assert_eq!(quote.negative_equity, 0);
        assert_eq!(quote.status, QuoteStatus::Final);
    }

    #[test]
    fn test_upside_down_trade_is_flagged() {
        let mut req = request(FinancingMethod::Lease, 39);
        req.trade_in = Some(accord_trade(Some(23_000)));

        let quote = engine().build_quote(&req);
        assert_eq!(quote.trade_equity_applied, 0);
        assert_eq!(quote.negative_equity, 3_000);
        assert_eq!(quote.monthly, 475);
        assert!(quote
            .warnings
            .contains(&QuoteWarning::NegativeEquityUnresolved { amount: 3_000 }));
    }

    #[test]
    fn test_supplied_estimate_skips_lookup() {
        let mut trade = unknown_trade();
        trade.estimate = Some(TradeInEstimate { low: 900, mid: 1_000, high: 1_100 });
        let mut req = request(FinancingMethod::Finance, 60);
        req.trade_in = Some(trade);

        let quote = engine().build_quote(&req);
        assert_eq!(quote.trade_equity_applied, 1_000);
        assert_eq!(quote.status, QuoteStatus::Final);
    }

    #[test]
    fn test_tiny_apr_quote_does_not_overflow() {
        let mut req = request(FinancingMethod::Finance, 72);
        req.apr = Some(1e-17);

        let quote = engine().build_quote(&req);
        let total_principal = 44_495.0 + 47_495.0 * 0.0625;
        assert_eq!(quote.monthly, (total_principal / 72.0_f64).round() as Money);
        assert_eq!(quote.total_interest, Some(0));
    }

    #[test]
    fn test_finance_interest_with_trade_in() {
        let mut req = request(FinancingMethod::Finance, 72);
        req.trade_in = Some(accord_trade(None));

        let quote = engine().build_quote(&req);
        assert_eq!(quote.trade_equity_applied, 20_000);
        assert_eq!(quote.monthly, 467);
        assert_eq!(quote.total_cost, 36_624);
        assert_eq!(quote.total_interest, Some(6_161));
    }

    #[test]
    fn test_lookup_failure_yields_provisional_quote() {
        let engine = engine();
        let trade = unknown_trade();

        assert!(matches!(
            engine.appraise(&trade.description),
            Err(QuoteError::LookupFailure { .. })
        ));

        let mut req = request(FinancingMethod::Lease, 39);
        req.trade_in = Some(trade);
        let quote = engine.build_quote(&req);

        assert!(quote.status.is_provisional());
        assert_eq!(quote.trade_equity_applied, 0);
        assert_eq!(quote.trade_in_estimate, None);
        assert_eq!(quote.monthly, 475);
    }

    #[test]
    fn test_capitalized_protection_raises_monthly() {
        let mut req = request(FinancingMethod::Finance, 72);
        let base = engine().build_quote(&req);

        req.protection.insert(ProtectionPackage::new("gap", "GAP Coverage", 895, 17));
        req.protection.insert(ProtectionPackage::new("tire-wheel", "Tire & Wheel", 1_295, 25));
        let quote = engine().build_quote(&req);

        assert_eq!(quote.protection_total, 2_190);
        assert_eq!(quote.protection_monthly_estimate, 42);
        assert_eq!(quote.protection_treatment, ProtectionTreatment::Capitalized);
        assert!(quote.monthly > base.monthly);
    }

    #[test]
    fn test_itemized_protection_keeps_monthly() {
        let config = QuoteConfig {
            protection_treatment: ProtectionTreatment::Itemized,
        };
        let engine = QuoteEngine::new(assumptions(), config, base_values());
        let mut req = request(FinancingMethod::Lease, 39);
        req.protection.insert(ProtectionPackage::new("gap", "GAP Coverage", 895, 17));

        let quote = engine.build_quote(&req);
        assert_eq!(quote.monthly, 475);
        assert_eq!(quote.due_at_signing, Some(4_370 + 895));
        assert_eq!(quote.total_cost, 21_525 + 895);
    }

    #[test]
    fn test_apr_clamped_to_program_range() {
        let mut req = request(FinancingMethod::Finance, 60);
        req.apr = Some(-2.0);

        let quote = engine().build_quote(&req);
        assert_eq!(quote.apr, Some(0.0));
        assert_eq!(quote.total_interest, Some(0));
        assert!(quote.warnings.contains(&QuoteWarning::AprClamped {
            requested: -2.0,
            applied: 0.0,
        }));
    }

    #[test]
    fn test_negative_lease_payment_is_surfaced() {
        let mut req = request(FinancingMethod::Lease, 39);
        req.down_payment = 25_000;

        let quote = engine().build_quote(&req);
        assert!(quote.monthly < 0);
        assert!(quote
            .warnings
            .iter()
            .any(|w| matches!(w, QuoteWarning::NegativeMonthlyPayment { .. })));
    }

    #[test]
    fn test_negative_down_payment_clamped() {
        let mut req = request(FinancingMethod::Lease, 39);
        req.down_payment = -500;

        let quote = engine().build_quote(&req);
        let zero_down = {
            let mut r = request(FinancingMethod::Lease, 39);
            r.down_payment = 0;
            engine().build_quote(&r)
        };
        assert_eq!(quote.monthly, zero_down.monthly);
        assert_eq!(quote.warnings[0], QuoteWarning::DownPaymentClamped { requested: -500 });
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let engine = engine();
        let mut req = request(FinancingMethod::Lease, 36);
        req.trade_in = Some(accord_trade(None));

        assert_eq!(engine.build_quote(&req), engine.build_quote(&req));
    }

    #[test]
    fn test_request_json_round_trip_defaults() {
        let json = r#"{
            "pricing": { "sale_price": 47495, "msrp": 52995 },
            "financing_method": "lease",
            "down_payment": 3000
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        let quote = engine().build_quote(&req);

        assert_eq!(quote.term_months, 39);
        assert_eq!(quote.monthly, 475);

        let out = serde_json::to_value(&quote).unwrap();
        assert_eq!(out["financing_method"], "lease");
        assert_eq!(out["status"]["state"], "final");
        assert!(out.get("total_interest").is_none());
    }

    #[test]
    fn test_lead_summary() {
        let mut req = request(FinancingMethod::Finance, 72);
        req.protection.insert(ProtectionPackage::new("gap", "GAP Coverage", 895, 17));
        req.trade_in = Some(unknown_trade());
        let quote = engine().build_quote(&req);

        let lead = LeadQuoteSummary::new(&req, &quote);
        assert_eq!(lead.financing_method, FinancingMethod::Finance);
        assert_eq!(lead.term_months, 72);
        assert_eq!(lead.protection_ids, vec!["gap".to_string()]);
        assert!(lead.provisional);
    }

    #[test]
    fn test_financing_method_parsing() {
        assert_eq!("Lease".parse::<FinancingMethod>().unwrap(), FinancingMethod::Lease);
        assert_eq!("buy".parse::<FinancingMethod>().unwrap(), FinancingMethod::Finance);
        assert!("rent".parse::<FinancingMethod>().is_err());
    }
}
