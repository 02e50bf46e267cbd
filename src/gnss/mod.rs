
/// Functionality shared by every signal: tracking discriminators and code correlation
pub mod common;

/// GPS L1 C/A ranging codes, replicas, and the tracking channel adapter
pub mod gps_l1_ca;

pub mod telemetry_decode;
