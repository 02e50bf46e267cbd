//! Closed-form code and carrier discriminators.
//!
//! Each takes correlator outputs (in-phase in `re`, quadrature in `im`) and returns the error
//! fed to a loop filter.  Degenerate inputs are not special-cased: a zero in-phase prompt or a
//! zero early plus late envelope yields an IEEE infinity or NaN and it's up to the loop filter
//! to reject it.

use rustfft::num_complex::Complex;

/// FLL four quadrant arctan discriminator, in [rad/sec].
///
/// atan2(cross, dot) / (t1 - t2) where cross = I1*Q2 - I2*Q1 and dot = I1*I2 + Q1*Q2 for prompt
/// outputs taken at t1 and t2.  Note the denominator is t1 - t2.
pub fn fll_four_quadrant_atan(prompt_s1:Complex<f64>, prompt_s2:Complex<f64>, t1:f64, t2:f64) -> f64 {
	let cross:f64 = prompt_s1.re * prompt_s2.im - prompt_s2.re * prompt_s1.im;
	let dot:f64   = prompt_s1.re * prompt_s2.re + prompt_s1.im * prompt_s2.im;
	cross.atan2(dot) / (t1 - t2)
}

/// PLL four quadrant arctan discriminator, atan2(Q, I) in [rad]
pub fn pll_four_quadrant_atan(prompt_s1:Complex<f64>) -> f64 { prompt_s1.im.atan2(prompt_s1.re) }

/// PLL Costas loop two quadrant arctan discriminator, atan(Q / I) in [rad].  Insensitive to
/// data bit transitions.
pub fn pll_cloop_two_quadrant_atan(prompt_s1:Complex<f64>) -> f64 { (prompt_s1.im / prompt_s1.re).atan() }

/// DLL noncoherent early minus late envelope normalized discriminator, (E - L) / (E + L) in [chips]
pub fn dll_nc_e_minus_l_normalized(early_s1:Complex<f64>, late_s1:Complex<f64>) -> f64 {
	let e:f64 = early_s1.norm();
	let l:f64 = late_s1.norm();
	(e - l) / (e + l)
}
