
pub mod signal_modulation;
pub mod tracking;

pub const CODE_LENGTH:usize = 1023;
pub const CHIP_RATE_HZ:usize = 1_023_000;
pub const CODE_PERIOD_SEC:f64 = 1.0e-3;
pub const SEC_PER_CHIP:f64 = 1.0 / (CHIP_RATE_HZ as f64);

pub const L1_FREQ_HZ:f64 = 1.57542e9;

/// PRNs of the GPS constellation
pub const GPS_PRN_RANGE:std::ops::RangeInclusive<usize> = 1..=32;

/// PRNs of the SBAS geostationary satellites broadcasting L1 C/A codes
pub const SBAS_PRN_RANGE:std::ops::RangeInclusive<usize> = 120..=138;

/// Number of symbols per navigation bit (one symbol per code period)
pub const SYMBOLS_PER_BIT:usize = 20;

pub fn is_valid_prn(prn:usize) -> bool { GPS_PRN_RANGE.contains(&prn) || SBAS_PRN_RANGE.contains(&prn) }
