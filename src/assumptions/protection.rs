//! Protection packages offered on the F&I screen

use serde::{Deserialize, Serialize};

use crate::deal::protection::ProtectionPackage;

/// Packages the kiosk can offer, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionCatalog {
    pub packages: Vec<ProtectionPackage>,
}

impl Default for ProtectionCatalog {
    fn default() -> Self {
        Self {
            packages: vec![
                ProtectionPackage::new("service-contract", "Extended Service Contract", 2_895, 55),
                ProtectionPackage::new("gap", "GAP Coverage", 895, 17),
                ProtectionPackage::new("tire-wheel", "Tire & Wheel Protection", 1_295, 25),
                ProtectionPackage::new("maintenance", "Prepaid Maintenance", 1_195, 23),
                ProtectionPackage::new("appearance", "Paint & Fabric Protection", 695, 13),
            ],
        }
    }
}

impl ProtectionCatalog {
    pub fn get(&self, id: &str) -> Option<&ProtectionPackage> {
        self.packages.iter().find(|p| p.id == id)
    }
}
