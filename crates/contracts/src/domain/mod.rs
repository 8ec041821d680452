pub mod equipment;
pub mod lease;
