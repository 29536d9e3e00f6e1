pub mod inspector;
pub mod setup;
pub mod stats;
