
use std::sync::Arc;

use rustfft::{FFT, FFTplanner};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::DigSigProcErr;

/// Circular correlation against a fixed reference code, done in the frequency domain.
///
/// `apply(x)[k]` is the sum over i of `reference[i] * x[(i + k) % n]`, so a peak at lag k means
/// `x` is the reference delayed by k, i.e. `x[i] == reference[(i - k) % n]`.
pub struct CodeCorrelator {
	len: usize,
	fft: Arc<dyn FFT<f64>>,
	ifft: Arc<dyn FFT<f64>>,
	reference_freq_domain: Vec<Complex<f64>>,
}

impl CodeCorrelator {

	pub fn new(reference:&[f64]) -> Self {
		let len:usize = reference.len();

		let mut planner = FFTplanner::new(false);
		let fft = planner.plan_fft(len);
		let mut inv_planner = FFTplanner::new(true);
		let ifft = inv_planner.plan_fft(len);

		let mut time_domain:Vec<Complex<f64>> = reference.iter().map(|x| Complex{ re: *x, im: 0.0 }).collect();
		let mut fft_out:Vec<Complex<f64>> = vec![Complex::zero(); len];
		fft.process(&mut time_domain, &mut fft_out);

		let reference_freq_domain:Vec<Complex<f64>> = fft_out.into_iter().map(|p| p.conj()).collect();

		Self { len, fft, ifft, reference_freq_domain }
	}

	pub fn len(&self) -> usize { self.len }

	pub fn apply(&self, x:&[f64]) -> Result<Vec<f64>, DigSigProcErr> {
		if x.len() != self.len {
			return Err(DigSigProcErr::InvalidBufferLength{ expected: self.len, actual: x.len() });
		}

		let mut time_domain:Vec<Complex<f64>> = x.iter().map(|x| Complex{ re: *x, im: 0.0 }).collect();
		let mut fft_out:Vec<Complex<f64>> = vec![Complex::zero(); self.len];
		self.fft.process(&mut time_domain, &mut fft_out);

		for (y, r) in fft_out.iter_mut().zip(self.reference_freq_domain.iter()) {
			*y = *y * r;
		}

		let mut ifft_out:Vec<Complex<f64>> = vec![Complex::zero(); self.len];
		self.ifft.process(&mut fft_out, &mut ifft_out);

		// rustfft leaves the inverse unnormalized
		let n:f64 = self.len as f64;
		Ok(ifft_out.into_iter().map(|c| c.re / n).collect())
	}

}

pub fn circular_xcorr(reference:&[f64], x:&[f64]) -> Result<Vec<f64>, DigSigProcErr> {
	CodeCorrelator::new(reference).apply(x)
}
