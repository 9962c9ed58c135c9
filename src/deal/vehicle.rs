//! Vehicle pricing as supplied by the inventory lookup

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Price points for the selected vehicle.
///
/// `msrp >= sale_price` is expected but not enforced; lease residuals are
/// always taken from MSRP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePricing {
    pub sale_price: Money,
    pub msrp: Money,

    /// Add-ons rolled into the capitalized cost or amount financed.
    /// Not taxed and not part of the residual base.
    #[serde(default)]
    pub capitalized_addons: Money,
}

impl VehiclePricing {
    pub fn new(sale_price: Money, msrp: Money) -> Self {
        Self {
            sale_price,
            msrp,
            capitalized_addons: 0,
        }
    }

    /// Copy with additional amounts rolled into the deal
    pub fn with_capitalized_addons(self, addons: Money) -> Self {
        Self {
            capitalized_addons: self.capitalized_addons + addons,
            ..self
        }
    }

    /// Sale price plus capitalized add-ons
    pub fn gross_amount(&self) -> f64 {
        (self.sale_price + self.capitalized_addons) as f64
    }
}
