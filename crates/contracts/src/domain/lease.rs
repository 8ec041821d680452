use serde::{Deserialize, Serialize};

/// A lease agreement for a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    pub id: String,
    #[serde(rename = "tenantName")]
    pub tenant_name: String,
    #[serde(rename = "propertyName", default)]
    pub property_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    pub status: LeaseStatus,
    /// ISO date, "2024-03-15"
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(rename = "monthlyRent", default)]
    pub monthly_rent: f64,
    #[serde(default)]
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Active,
    Pending,
    Expired,
    Terminated,
}

impl LeaseStatus {
    pub fn code(&self) -> &'static str {
        match self {
            LeaseStatus::Active => "active",
            LeaseStatus::Pending => "pending",
            LeaseStatus::Expired => "expired",
            LeaseStatus::Terminated => "terminated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LeaseStatus::Active => "Active",
            LeaseStatus::Pending => "Pending",
            LeaseStatus::Expired => "Expired",
            LeaseStatus::Terminated => "Terminated",
        }
    }

    pub fn all() -> Vec<LeaseStatus> {
        vec![
            LeaseStatus::Active,
            LeaseStatus::Pending,
            LeaseStatus::Expired,
            LeaseStatus::Terminated,
        ]
    }
}

/// Balance tiers used as a discrete filter category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceTier {
    Paid,
    Owing,
    Overdue,
}

impl BalanceTier {
    /// Anything above one month of rent counts as overdue
    pub fn of(lease: &Lease) -> Self {
        if lease.balance <= 0.0 {
            BalanceTier::Paid
        } else if lease.monthly_rent > 0.0 && lease.balance > lease.monthly_rent {
            BalanceTier::Overdue
        } else {
            BalanceTier::Owing
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BalanceTier::Paid => "paid",
            BalanceTier::Owing => "owing",
            BalanceTier::Overdue => "overdue",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BalanceTier::Paid => "Paid up",
            BalanceTier::Owing => "Owing",
            BalanceTier::Overdue => "Overdue",
        }
    }

    pub fn all() -> Vec<BalanceTier> {
        vec![BalanceTier::Paid, BalanceTier::Owing, BalanceTier::Overdue]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lease(balance: f64, rent: f64) -> Lease {
        Lease {
            id: "l1".to_string(),
            tenant_name: "Jane Doe".to_string(),
            property_name: None,
            unit: None,
            status: LeaseStatus::Active,
            start_date: None,
            end_date: None,
            monthly_rent: rent,
            balance,
        }
    }

    #[test]
    fn test_balance_tiers() {
        assert_eq!(BalanceTier::of(&lease(0.0, 1200.0)), BalanceTier::Paid);
        assert_eq!(BalanceTier::of(&lease(-50.0, 1200.0)), BalanceTier::Paid);
        assert_eq!(BalanceTier::of(&lease(600.0, 1200.0)), BalanceTier::Owing);
        assert_eq!(BalanceTier::of(&lease(1500.0, 1200.0)), BalanceTier::Overdue);
    }
}
