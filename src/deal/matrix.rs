//! Payment grid across every offered term and a set of down payments
//!
//! Feeds the term-comparison table on the payment screen. Cells are
//! independent quotes and are computed in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::quote::{FinancingMethod, QuoteEngine, QuoteRequest, QuoteStatus};
use super::trade_in::BaseValueLookup;
use crate::money::Money;

/// One term / down payment combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub term_months: u32,
    pub down_payment: Money,
    pub monthly: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at_signing: Option<Money>,
    pub total_cost: Money,
    pub provisional: bool,
}

impl<L: BaseValueLookup + Sync> QuoteEngine<L> {
    /// Quote every offered term for each down payment, ordered by term then down payment.
    ///
    /// The trade-in is appraised once up front rather than per cell.
    pub fn payment_matrix(&self, request: &QuoteRequest, down_payments: &[Money]) -> Vec<MatrixCell> {
        let terms = match request.financing_method {
            FinancingMethod::Lease => &self.assumptions().lease.terms,
            FinancingMethod::Finance => &self.assumptions().finance.terms,
        };

        let mut base = request.clone();
        if let Some(trade_in) = base.trade_in.as_mut() {
            if trade_in.estimate.is_none() {
                trade_in.estimate = self.appraise(&trade_in.description).ok();
            }
        }
        let base = base;

        let combos: Vec<(u32, Money)> = terms
            .iter()
            .flat_map(|&term| down_payments.iter().map(move |&down| (term, down)))
            .collect();

        combos
            .par_iter()
            .map(|&(term, down)| {
                let cell_request = QuoteRequest {
                    term_months: Some(term),
                    down_payment: down,
                    ..base.clone()
                };
                let quote = self.build_quote(&cell_request);
                MatrixCell {
                    term_months: quote.term_months,
                    down_payment: down,
                    monthly: quote.monthly,
                    due_at_signing: quote.due_at_signing,
                    total_cost: quote.total_cost,
                    provisional: matches!(quote.status, QuoteStatus::Provisional { .. }),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{BaseValueTable, DealAssumptions};
    use crate::deal::protection::ProtectionSelection;
    use crate::deal::quote::QuoteConfig;
    use crate::deal::vehicle::VehiclePricing;

    fn engine() -> QuoteEngine<BaseValueTable> {
        QuoteEngine::new(
            DealAssumptions::default_showroom(),
            QuoteConfig::default(),
            BaseValueTable::default(),
        )
    }

    fn request(method: FinancingMethod) -> QuoteRequest {
        QuoteRequest {
            pricing: VehiclePricing::new(47_495, 52_995),
            financing_method: method,
            term_months: None,
            apr: None,
            down_payment: 0,
            trade_in: None,
            protection: ProtectionSelection::new(),
        }
    }

    #[test]
    fn test_lease_matrix_shape_and_order() {
        let cells = engine().payment_matrix(&request(FinancingMethod::Lease), &[0, 3_000, 5_000]);

        assert_eq!(cells.len(), 9);
        let terms: Vec<u32> = cells.iter().map(|c| c.term_months).collect();
        assert_eq!(terms, vec![24, 24, 24, 36, 36, 36, 39, 39, 39]);

        let reference = cells
            .iter()
            .find(|c| c.term_months == 39 && c.down_payment == 3_000)
            .unwrap();
        assert_eq!(reference.monthly, 475);
        assert_eq!(reference.due_at_signing, Some(4_370));
    }

    #[test]
    fn test_finance_matrix_longer_term_lower_payment() {
        let cells = engine().payment_matrix(&request(FinancingMethod::Finance), &[3_000]);

        assert_eq!(cells.len(), 4);
        for pair in cells.windows(2) {
            assert!(pair[1].monthly < pair[0].monthly);
            assert!(pair[1].total_cost > pair[0].total_cost);
        }
    }
}
