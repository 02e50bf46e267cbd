
pub mod gps;
