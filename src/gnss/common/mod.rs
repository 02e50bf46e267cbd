
pub mod correlation;
pub mod tracking;
