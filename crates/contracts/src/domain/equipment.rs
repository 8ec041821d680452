use serde::{Deserialize, Serialize};

/// A piece of equipment installed at a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    /// Free-text category as entered by the property manager ("HVAC", "HVAC / Boiler")
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<EquipmentStatus>,
    #[serde(rename = "propertyName", default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "serialNumber", default)]
    pub serial_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    Inactive,
    UnderRepair,
}

impl EquipmentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Inactive => "inactive",
            EquipmentStatus::UnderRepair => "under_repair",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "Active",
            EquipmentStatus::Inactive => "Inactive",
            EquipmentStatus::UnderRepair => "Under repair",
        }
    }

    pub fn all() -> Vec<EquipmentStatus> {
        vec![
            EquipmentStatus::Active,
            EquipmentStatus::Inactive,
            EquipmentStatus::UnderRepair,
        ]
    }
}
