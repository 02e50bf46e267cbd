
use log::warn;
use serde::{Serialize, Deserialize};

use crate::DigSigProcErr;
use crate::gnss::gps_l1_ca::{self, signal_modulation};

pub const DEFAULT_FS_HZ:u32 = 4_000_000;
pub const DEFAULT_EARLY_LATE_SPACE_CHIPS:f64 = 0.5;
pub const DEFAULT_PDI_SEC:f64 = gps_l1_ca::CODE_PERIOD_SEC;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicaOutput {
	/// One sample per chip
	Chips,
	/// Complex samples at `fs_hz` over one code period
	Sampled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaConfig {
	pub prn: usize,
	#[serde(default)]
	pub chip_shift: u32,
	#[serde(default = "default_fs_hz")]
	pub fs_hz: u32,
	#[serde(default = "default_output")]
	pub output: ReplicaOutput,
}

fn default_fs_hz() -> u32 { DEFAULT_FS_HZ }
fn default_output() -> ReplicaOutput { ReplicaOutput::Chips }

impl ReplicaConfig {

	pub fn from_json(s:&str) -> Result<Self, DigSigProcErr> {
		let cfg:Self = serde_json::from_str(s).map_err(|e| {
			warn!("Unable to parse replica configuration: {}", e);
			DigSigProcErr::InvalidConfig("unable to parse replica configuration")
		})?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn validate(&self) -> Result<(), DigSigProcErr> {
		if !gps_l1_ca::is_valid_prn(self.prn) {
			return Err(DigSigProcErr::InvalidPrn(self.prn));
		}
		if self.output == ReplicaOutput::Sampled && signal_modulation::samples_per_code(self.fs_hz) == 0 {
			return Err(DigSigProcErr::InvalidConfig("sampling frequency too low for one sample per code period"));
		}
		Ok(())
	}

}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
	pub channel: usize,
	pub prn: usize,
	pub fs_hz: u32,
	pub early_late_space_chips: f64,
	pub pdi_sec: f64,
}

impl Default for TrackingConfig {
	fn default() -> Self {
		Self { channel: 0, prn: 1, fs_hz: DEFAULT_FS_HZ,
			early_late_space_chips: DEFAULT_EARLY_LATE_SPACE_CHIPS, pdi_sec: DEFAULT_PDI_SEC }
	}
}

impl TrackingConfig {

	pub fn from_json(s:&str) -> Result<Self, DigSigProcErr> {
		let cfg:Self = serde_json::from_str(s).map_err(|e| {
			warn!("Unable to parse tracking configuration: {}", e);
			DigSigProcErr::InvalidConfig("unable to parse tracking configuration")
		})?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn validate(&self) -> Result<(), DigSigProcErr> {
		if !(self.early_late_space_chips > 0.0 && self.early_late_space_chips <= 1.0) {
			return Err(DigSigProcErr::InvalidConfig("early-late spacing must be in (0, 1] chips"));
		}
		if !(self.pdi_sec > 0.0) {
			return Err(DigSigProcErr::InvalidConfig("PDI must be positive"));
		}
		if signal_modulation::samples_per_code(self.fs_hz) == 0 {
			return Err(DigSigProcErr::InvalidConfig("sampling frequency too low for one sample per code period"));
		}
		Ok(())
	}

}
