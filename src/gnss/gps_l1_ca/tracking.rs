
use log::{debug, warn};
use rustfft::num_complex::Complex;

use crate::DigSigProcErr;
use crate::config::TrackingConfig;
use crate::gnss::common::tracking::{TrackingInterface, DiscriminatorOutputs};
use crate::gnss::common::tracking::discriminators;
use crate::gnss::gps_l1_ca::{self, CODE_LENGTH, CHIP_RATE_HZ, L1_FREQ_HZ, signal_modulation};

const ZERO:Complex<f64> = Complex{ re: 0.0, im: 0.0 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingState {
	Idle,
	Tracking,
}

/// Code DLL + carrier PLL front end for one GPS L1 C/A channel.
///
/// Holds the acquisition hand-over and the local replica, correlates carrier-wiped samples
/// into early/prompt/late sums and turns them into discriminator outputs.  Loop filtering and
/// NCO updates are left to the caller.
pub struct DllPllTracking {
	pub cfg: TrackingConfig,
	pub state: TrackingState,

	code_phase_samples: i32,
	doppler_hz: f64,
	acq_sample_stamp: u64,

	local_code: Vec<f64>,
	local_replica: Vec<Complex<f64>>,

	prev_prompt: Option<(Complex<f64>, f64)>,
	num_intervals: u64,
}

impl DllPllTracking {

	pub fn new(cfg:TrackingConfig) -> Result<Self, DigSigProcErr> {
		cfg.validate()?;
		Ok(Self { cfg, state: TrackingState::Idle,
			code_phase_samples: 0, doppler_hz: 0.0, acq_sample_stamp: 0,
			local_code: vec![], local_replica: vec![],
			prev_prompt: None, num_intervals: 0 })
	}

	pub fn prn(&self) -> usize { self.cfg.prn }
	pub fn channel(&self) -> usize { self.cfg.channel }
	pub fn doppler_hz(&self) -> f64 { self.doppler_hz }
	pub fn acq_sample_stamp(&self) -> u64 { self.acq_sample_stamp }

	/// Complex replica sampled at `fs_hz`, chip values in the imaginary part.  Empty until tracking starts.
	pub fn local_replica(&self) -> &[Complex<f64>] { &self.local_replica }

	/// Code phase handed over by acquisition, converted from samples to chips
	pub fn initial_code_phase_chips(&self) -> f64 {
		(self.code_phase_samples as f64) * (CHIP_RATE_HZ as f64) / (self.cfg.fs_hz as f64)
	}

	/// Code phase advance per sample, including code Doppler
	pub fn code_dphase(&self) -> f64 {
		let radial_velocity_factor:f64 = (L1_FREQ_HZ + self.doppler_hz) / L1_FREQ_HZ;
		(radial_velocity_factor * (CHIP_RATE_HZ as f64)) / (self.cfg.fs_hz as f64)
	}

	/// Early, prompt, and late sums over a block of carrier-wiped samples, with the prompt replica
	/// at `code_phase_chips` on the first sample.  Early and late sit `early_late_space_chips`
	/// either side of prompt.
	pub fn early_prompt_late(&self, xin:&[Complex<f64>], code_phase_chips:f64) -> Result<(Complex<f64>, Complex<f64>, Complex<f64>), DigSigProcErr> {
		if self.state != TrackingState::Tracking {
			return Err(DigSigProcErr::Other("tracking has not been started"));
		}

		let space:f64 = self.cfg.early_late_space_chips;
		let code_dphase:f64 = self.code_dphase();

		let mut early:Complex<f64>  = ZERO;
		let mut prompt:Complex<f64> = ZERO;
		let mut late:Complex<f64>   = ZERO;
		for (k, x) in xin.iter().enumerate() {
			let code_phase:f64 = code_phase_chips + (k as f64) * code_dphase;
			early  += *x * self.chip(code_phase - space);
			prompt += *x * self.chip(code_phase);
			late   += *x * self.chip(code_phase + space);
		}

		Ok((early, prompt, late))
	}

	fn chip(&self, code_phase:f64) -> f64 {
		self.local_code[(code_phase.floor() as i64).rem_euclid(CODE_LENGTH as i64) as usize]
	}

	/// Discriminator outputs for one coherent interval.  The FLL term needs the prompt from the
	/// previous interval, so it's `None` on the first call after `start_tracking`.
	pub fn discriminate(&mut self, early:Complex<f64>, prompt:Complex<f64>, late:Complex<f64>) -> DiscriminatorOutputs {
		let t:f64 = (self.num_intervals as f64) * self.cfg.pdi_sec;

		let carrier_freq_error_rad_per_sec:Option<f64> = self.prev_prompt
			.map(|(prev, t_prev)| discriminators::fll_four_quadrant_atan(prev, prompt, t_prev, t));

		self.prev_prompt = Some((prompt, t));
		self.num_intervals += 1;

		DiscriminatorOutputs {
			code_error_chips: discriminators::dll_nc_e_minus_l_normalized(early, late),
			carrier_phase_error_rad: discriminators::pll_cloop_two_quadrant_atan(prompt),
			carrier_freq_error_rad_per_sec,
		}
	}

}

impl TrackingInterface for DllPllTracking {

	fn start_tracking(&mut self) -> Result<(), DigSigProcErr> {
		let prn:usize = self.cfg.prn;
		if !gps_l1_ca::is_valid_prn(prn) {
			warn!("Channel {} can't start tracking PRN {}", self.cfg.channel, prn);
			return Err(DigSigProcErr::InvalidPrn(prn));
		}

		let mut code:[f64; CODE_LENGTH] = [0.0; CODE_LENGTH];
		signal_modulation::l1_ca_code_real(&mut code, prn, 0)?;
		self.local_replica = signal_modulation::prn_complex_sampled(prn, self.cfg.fs_hz, 0)?;
		self.local_code = code.to_vec();

		self.prev_prompt = None;
		self.num_intervals = 0;
		self.state = TrackingState::Tracking;

		debug!("Channel {} tracking PRN {} from sample {}, code phase {} [samples], Doppler {:.1} [Hz]",
			self.cfg.channel, prn, self.acq_sample_stamp, self.code_phase_samples, self.doppler_hz);
		Ok(())
	}

	fn set_satellite(&mut self, prn:usize) {
		if prn != self.cfg.prn {
			self.state = TrackingState::Idle;
		}
		self.cfg.prn = prn;
	}

	fn set_channel(&mut self, channel:usize) { self.cfg.channel = channel; }
	fn set_prn_code_phase(&mut self, phase_samples:i32) { self.code_phase_samples = phase_samples; }
	fn set_doppler_freq_shift(&mut self, doppler_freq_hz:f64) { self.doppler_hz = doppler_freq_hz; }
	fn set_acq_sample_stamp(&mut self, sample_stamp:u64) { self.acq_sample_stamp = sample_stamp; }

}

#[cfg(test)]
mod tests {

	use crate::test_utils::init_logger;

	use super::*;

	fn signal(prn:usize, fs_hz:u32, carrier_phase_rad:f64) -> Vec<Complex<f64>> {
		let mut code:[i32; CODE_LENGTH] = [0; CODE_LENGTH];
		signal_modulation::l1_ca_code_int(&mut code, prn, 0).unwrap();

		let carrier = Complex{ re: carrier_phase_rad.cos(), im: carrier_phase_rad.sin() };
		let dphase:f64 = (CHIP_RATE_HZ as f64) / (fs_hz as f64);
		(0..signal_modulation::samples_per_code(fs_hz))
			.map(|k| carrier * (code[((k as f64) * dphase).floor() as usize % CODE_LENGTH] as f64))
			.collect()
	}

	fn started(prn:usize) -> DllPllTracking {
		init_logger();
		let mut trk = DllPllTracking::new(TrackingConfig{ prn, ..Default::default() }).unwrap();
		trk.set_channel(2);
		trk.set_prn_code_phase(0);
		trk.set_doppler_freq_shift(0.0);
		trk.set_acq_sample_stamp(123_456);
		trk.start_tracking().unwrap();
		trk
	}

	#[test]
	fn start_requires_valid_prn() {
		let mut trk = DllPllTracking::new(TrackingConfig{ prn: 0, ..Default::default() }).unwrap();
		assert_eq!(trk.start_tracking(), Err(DigSigProcErr::InvalidPrn(0)));
		assert_eq!(trk.state, TrackingState::Idle);
		assert!(trk.early_prompt_late(&[ZERO; 10], 0.0).is_err());

		trk.set_satellite(14);
		assert!(trk.start_tracking().is_ok());
		assert_eq!(trk.state, TrackingState::Tracking);
		assert_eq!(trk.local_replica().len(), 4000);

		trk.set_satellite(15);
		assert_eq!(trk.state, TrackingState::Idle);
	}

	#[test]
	fn acquisition_hand_over() {
		let mut trk = started(3);
		trk.set_prn_code_phase(400);
		trk.set_doppler_freq_shift(-1575.42);
		assert_eq!(trk.channel(), 2);
		assert_eq!(trk.acq_sample_stamp(), 123_456);
		assert!((trk.initial_code_phase_chips() - 102.3).abs() < 1.0e-9);
		assert!((trk.code_dphase() - 0.25575 * (1.0 - 1.0e-6)).abs() < 1.0e-12);
	}

	#[test]
	fn aligned_replica() {
		let trk = started(3);
		let (early, prompt, late) = trk.early_prompt_late(&signal(3, 4_000_000, 0.0), 0.0).unwrap();
		assert_eq!(prompt, Complex{ re: 4000.0, im: 0.0 });

		let mut trk = trk;
		let out = trk.discriminate(early, prompt, late);
		assert!(out.code_error_chips.abs() < 0.01);
		assert_eq!(out.carrier_phase_error_rad, 0.0);
		assert_eq!(out.carrier_freq_error_rad_per_sec, None);
	}

	#[test]
	fn code_error_sign() {
		let mut trk = started(3);
		let x = signal(3, 4_000_000, 0.0);

		let (e, p, l) = trk.early_prompt_late(&x, 0.2).unwrap();
		let ahead = trk.discriminate(e, p, l).code_error_chips;
		assert!(ahead > 0.35 && ahead < 0.45, "{}", ahead);

		let (e, p, l) = trk.early_prompt_late(&x, -0.2).unwrap();
		let behind = trk.discriminate(e, p, l).code_error_chips;
		assert!(behind < -0.35 && behind > -0.45, "{}", behind);
	}

	#[test]
	fn carrier_phase_and_frequency() {
		let mut trk = started(8);
		let pdi:f64 = trk.cfg.pdi_sec;

		let (e, p, l) = trk.early_prompt_late(&signal(8, 4_000_000, 0.3), 0.0).unwrap();
		let first = trk.discriminate(e, p, l);
		assert!((first.carrier_phase_error_rad - 0.3).abs() < 1.0e-9);

		let (e, p, l) = trk.early_prompt_late(&signal(8, 4_000_000, 0.4), 0.0).unwrap();
		let second = trk.discriminate(e, p, l);
		assert!((second.carrier_phase_error_rad - 0.4).abs() < 1.0e-9);

		// t1 - t2 is negative, so an advancing phase reads as a negative rate
		let freq = second.carrier_freq_error_rad_per_sec.unwrap();
		assert!((freq + 0.1 / pdi).abs() < 1.0e-6, "{}", freq);
	}

	#[test]
	fn restart_clears_fll_history() {
		let mut trk = started(8);
		let x = signal(8, 4_000_000, 0.0);
		let (e, p, l) = trk.early_prompt_late(&x, 0.0).unwrap();
		trk.discriminate(e, p, l);
		assert!(trk.discriminate(e, p, l).carrier_freq_error_rad_per_sec.is_some());

		trk.start_tracking().unwrap();
		assert!(trk.discriminate(e, p, l).carrier_freq_error_rad_per_sec.is_none());
	}

}
