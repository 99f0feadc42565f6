//! Money management adapters.

mod fixed_risk;

pub use fixed_risk::FixedRiskMoneyManagement;
