
use serde::{Serialize, Deserialize};

use crate::DigSigProcErr;

pub mod discriminators;

/// Capabilities a tracking loop exposes to the channel that hands it an acquisition
pub trait TrackingInterface {
	fn start_tracking(&mut self) -> Result<(), DigSigProcErr>;
	fn set_satellite(&mut self, prn:usize);
	fn set_channel(&mut self, channel:usize);
	fn set_prn_code_phase(&mut self, phase_samples:i32);
	fn set_doppler_freq_shift(&mut self, doppler_freq_hz:f64);
	fn set_acq_sample_stamp(&mut self, sample_stamp:u64);
}

/// Discriminator outputs for one coherent integration interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscriminatorOutputs {
	pub code_error_chips: f64,
	pub carrier_phase_error_rad: f64,
	pub carrier_freq_error_rad_per_sec: Option<f64>,
}
