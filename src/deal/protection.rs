//! Protection package selection and totals

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// An add-on product offered alongside the vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionPackage {
    pub id: String,
    pub name: String,
    /// Retail price of the package
    pub price: Money,
    /// Approximate monthly cost when rolled into the payment
    pub monthly_estimate: Money,
}

impl ProtectionPackage {
    pub fn new(id: &str, name: &str, price: Money, monthly_estimate: Money) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            monthly_estimate,
        }
    }
}

/// Totals over the selected packages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionSummary {
    pub total: Money,
    pub monthly_total: Money,
    pub count: usize,
}

/// Customer's selected packages, unique by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProtectionPackage>", into = "Vec<ProtectionPackage>")]
pub struct ProtectionSelection {
    packages: BTreeMap<String, ProtectionPackage>,
}

impl ProtectionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package, replacing any earlier selection with the same id
    pub fn insert(&mut self, package: ProtectionPackage) {
        self.packages.insert(package.id.clone(), package);
    }

    pub fn remove(&mut self, id: &str) -> Option<ProtectionPackage> {
        self.packages.remove(id)
    }

    /// Select the package if absent, deselect it if present.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, package: &ProtectionPackage) -> bool {
        if self.packages.remove(&package.id).is_some() {
            false
        } else {
            self.insert(package.clone());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.packages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProtectionPackage> {
        self.packages.values()
    }

    pub fn aggregate(&self) -> ProtectionSummary {
        aggregate(self.iter())
    }
}

impl From<Vec<ProtectionPackage>> for ProtectionSelection {
    fn from(packages: Vec<ProtectionPackage>) -> Self {
        let mut selection = Self::new();
        for package in packages {
            selection.insert(package);
        }
        selection
    }
}

impl From<ProtectionSelection> for Vec<ProtectionPackage> {
    fn from(selection: ProtectionSelection) -> Self {
        selection.packages.into_values().collect()
    }
}

/// Sum price and monthly estimate over a set of packages
pub fn aggregate<'a, I>(packages: I) -> ProtectionSummary
where
    I: IntoIterator<Item = &'a ProtectionPackage>,
{
    packages
        .into_iter()
        .fold(ProtectionSummary::default(), |acc, p| ProtectionSummary {
            total: acc.total + p.price,
            monthly_total: acc.monthly_total + p.monthly_estimate,
            count: acc.count + 1,
        })
}
