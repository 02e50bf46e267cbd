
use log::warn;
use num_traits::Float;
use rustfft::num_complex::Complex;

use crate::DigSigProcErr;
use crate::gnss::gps_l1_ca::{CODE_LENGTH, CHIP_RATE_HZ, GPS_PRN_RANGE, SBAS_PRN_RANGE};


// G2 delays in chips as given in IS-GPS-200, Table 3-Ia, followed by the SBAS codes
pub const G2_DELAYS:[usize; 51] = [
	  5,   6,   7,   8,  17,  18, 139, 140, 141, 251, 252, 254, 255, 256, 257, 258,	// PRN 01-16
	469, 470, 471, 472, 473, 474, 509, 512, 513, 514, 515, 516, 859, 860, 861, 862,	// PRN 17-32
	145, 175,  52,  21, 237, 235, 886, 657, 634, 762, 355,1012, 176, 603, 130, 359,	// PRN 120-135
	595,  68, 386																	// PRN 136-138
];

const G1_TAPS:[usize; 2] = [7, 0];
const G2_TAPS:[usize; 6] = [8, 7, 4, 2, 1, 0];

/// Ten-stage register; stage 0 is the output and the feedback enters at stage 9
pub struct FibonacciShiftRegister {
	pub state: [bool; 10],
	taps: &'static [usize],
}

impl FibonacciShiftRegister {

	pub fn new(taps:&'static [usize]) -> Self { Self { state: [true; 10], taps } }

	pub fn shift(&mut self) -> bool {
		let current_output:bool = self.state[0];
		let feedback:bool = self.taps.iter().fold(false, |acc, idx| acc ^ self.state[*idx]);

		self.state.copy_within(1.., 0);
		self.state[9] = feedback;

		current_output
	}

}

/// Index into G2_DELAYS for a PRN, or an error if the PRN has no L1 C/A code assigned.
///
/// Only 1-32 and 120-138 are accepted. PRNs 33-51 would otherwise alias onto SBAS entries
/// of the table, so they are rejected along with everything else outside the two ranges.
pub fn delay_index(prn:usize) -> Result<usize, DigSigProcErr> {
	if SBAS_PRN_RANGE.contains(&prn) {
		Ok(prn - 88)
	} else if GPS_PRN_RANGE.contains(&prn) {
		Ok(prn - 1)
	} else {
		warn!("No L1 C/A code for PRN {}, leaving destination untouched", prn);
		Err(DigSigProcErr::InvalidPrn(prn))
	}
}

fn g1_g2_sequences() -> ([bool; CODE_LENGTH], [bool; CODE_LENGTH]) {
	let mut g1:[bool; CODE_LENGTH] = [false; CODE_LENGTH];
	let mut g2:[bool; CODE_LENGTH] = [false; CODE_LENGTH];
	let mut g1_register = FibonacciShiftRegister::new(&G1_TAPS);
	let mut g2_register = FibonacciShiftRegister::new(&G2_TAPS);

	for idx in 0..CODE_LENGTH {
		g1[idx] = g1_register.shift();
		g2[idx] = g2_register.shift();
	}

	(g1, g2)
}

/// Writes the +/-1 C/A code for `prn`, rotated left by `chip_shift` chips.  On error the
/// destination is not modified.
pub fn l1_ca_code_int(dest:&mut [i32; CODE_LENGTH], prn:usize, chip_shift:u32) -> Result<(), DigSigProcErr> {
	let prn_idx:usize = delay_index(prn)?;
	let (g1, g2) = g1_g2_sequences();

	let shift:usize = (chip_shift as usize) % CODE_LENGTH;
	let mut delay:usize = (CODE_LENGTH - G2_DELAYS[prn_idx] + shift) % CODE_LENGTH;

	for (idx, chip) in dest.iter_mut().enumerate() {
		*chip = if g1[(idx + shift) % CODE_LENGTH] ^ g2[delay] { 1 } else { -1 };
		delay = (delay + 1) % CODE_LENGTH;
	}

	Ok(())
}

pub fn l1_ca_code_real<T: Float>(dest:&mut [T; CODE_LENGTH], prn:usize, chip_shift:u32) -> Result<(), DigSigProcErr> {
	let mut code_int:[i32; CODE_LENGTH] = [0; CODE_LENGTH];
	l1_ca_code_int(&mut code_int, prn, chip_shift)?;

	for (x, chip) in dest.iter_mut().zip(code_int.iter()) {
		*x = chip_value(*chip);
	}

	Ok(())
}

/// Complex form of the code.  The chip goes in the imaginary part and the real part is zero,
/// which is the layout the correlators downstream expect.
pub fn l1_ca_code_complex<T: Float>(dest:&mut [Complex<T>; CODE_LENGTH], prn:usize, chip_shift:u32) -> Result<(), DigSigProcErr> {
	let mut code_int:[i32; CODE_LENGTH] = [0; CODE_LENGTH];
	l1_ca_code_int(&mut code_int, prn, chip_shift)?;

	for (x, chip) in dest.iter_mut().zip(code_int.iter()) {
		*x = Complex{ re: T::zero(), im: chip_value(*chip) };
	}

	Ok(())
}

/// Number of samples in one code period, rounded towards zero
pub fn samples_per_code(fs_hz:u32) -> usize {
	((fs_hz as u64 * CODE_LENGTH as u64) / CHIP_RATE_HZ as u64) as usize
}

/// Source chip for output sample `i`, ceil(ts*(i+1)/tc) - 1, computed in integers so that
/// sample instants landing exactly on a chip edge don't pick up floating point drift.
fn code_value_idx(i:usize, fs_hz:u32) -> usize {
	let num:u64 = (i as u64 + 1) * CHIP_RATE_HZ as u64;
	let fs:u64 = fs_hz as u64;
	let ceil:u64 = (num + fs - 1) / fs;
	(ceil.saturating_sub(1) as usize).min(CODE_LENGTH - 1)
}

/// Fills `dest` with the complex C/A code sampled at `fs_hz` over one code period (1 ms).
///
/// Each output sample repeats the chip in force at its sample instant.  The last sample is
/// always chip 1022 to absorb rounding over the period.  `dest` must hold at least
/// `samples_per_code(fs_hz)` samples; only that many are written and the count is returned.
pub fn l1_ca_code_complex_sampled<T: Float>(dest:&mut [Complex<T>], prn:usize, fs_hz:u32, chip_shift:u32) -> Result<usize, DigSigProcErr> {
	let samples_per_code:usize = samples_per_code(fs_hz);
	if dest.len() < samples_per_code {
		return Err(DigSigProcErr::InvalidBufferLength{ expected: samples_per_code, actual: dest.len() });
	}

	let mut code:[Complex<T>; CODE_LENGTH] = [Complex{ re: T::zero(), im: T::zero() }; CODE_LENGTH];
	l1_ca_code_complex(&mut code, prn, chip_shift)?;

	for (i, x) in dest[..samples_per_code].iter_mut().enumerate() {
		*x = if i == samples_per_code - 1 { code[CODE_LENGTH - 1] } else { code[code_value_idx(i, fs_hz)] };
	}

	Ok(samples_per_code)
}

pub fn prn_int(prn:usize) -> Result<Vec<i32>, DigSigProcErr> {
	let mut code:[i32; CODE_LENGTH] = [0; CODE_LENGTH];
	l1_ca_code_int(&mut code, prn, 0)?;
	Ok(code.to_vec())
}

pub fn prn_complex_sampled<T: Float>(prn:usize, fs_hz:u32, chip_shift:u32) -> Result<Vec<Complex<T>>, DigSigProcErr> {
	let mut ans:Vec<Complex<T>> = vec![Complex{ re: T::zero(), im: T::zero() }; samples_per_code(fs_hz)];
	l1_ca_code_complex_sampled(&mut ans, prn, fs_hz, chip_shift)?;
	Ok(ans)
}

fn chip_value<T: Float>(chip:i32) -> T { if chip > 0 { T::one() } else { -T::one() } }
