//! sea-orm models for the dashboard schema. Table and column names match the
//! existing database; see the `migration` crate for the DDL.

pub mod ai_decisions;
pub mod crops;
pub mod farmers;
pub mod irrigators;
pub mod learned_patterns;
pub mod measurements;
pub mod productivity_history;
pub mod properties;
pub mod sectors;
pub mod sensors;
pub mod zones;

pub use ai_decisions::DecisionType;
pub use irrigators::IrrigatorStatus;
pub use sensors::SensorType;
