pub mod equipment;
pub mod leases;
