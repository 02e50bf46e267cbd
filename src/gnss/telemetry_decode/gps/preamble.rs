
use log::debug;
use num_traits::Float;

use crate::DigSigProcErr;
use crate::gnss::gps_l1_ca::SYMBOLS_PER_BIT;

pub const GPS_CA_PREAMBLE:&str = "10001011";
pub const PREAMBLE_LENGTH_BITS:usize = 8;
pub const PREAMBLE_LENGTH_SYMBOLS:usize = PREAMBLE_LENGTH_BITS * SYMBOLS_PER_BIT;

pub const PREAMBLE_PATTERN:[bool; PREAMBLE_LENGTH_BITS] = [true, false, false, false, true, false, true, true];

/// +/-1 reference, one entry per bit
pub const PREAMBLE_SAMPLES:[i32; PREAMBLE_LENGTH_BITS] = expand::<PREAMBLE_LENGTH_BITS>(1);

/// +/-1 reference, one entry per 1-ms symbol
pub const PREAMBLE_SYMBOLS:[i32; PREAMBLE_LENGTH_SYMBOLS] = expand::<PREAMBLE_LENGTH_SYMBOLS>(SYMBOLS_PER_BIT);

const fn expand<const N:usize>(repeat:usize) -> [i32; N] {
	let mut ans:[i32; N] = [0; N];
	let mut idx:usize = 0;
	while idx < N {
		ans[idx] = if PREAMBLE_PATTERN[idx / repeat] { 1 } else { -1 };
		idx += 1;
	}
	ans
}

/// Sign correlation of the first `reference.len()` entries of `symbol_history` against `reference`.
/// Only the sign of each soft value counts; zero is treated as positive.
pub fn correlate_with<T: Float>(reference:&[i32], symbol_history:&[T]) -> Result<i32, DigSigProcErr> {
	check_len(reference, symbol_history)?;

	let mut corr_value:i32 = 0;
	for (symbol, sample) in symbol_history.iter().zip(reference.iter()) {
		if *symbol < T::zero() {
			corr_value -= sample;
		} else {
			corr_value += sample;
		}
	}

	Ok(corr_value)
}

/// Same result as `correlate_with`, written as a fold
pub fn correlate_with_fold<T: Float>(reference:&[i32], symbol_history:&[T]) -> Result<i32, DigSigProcErr> {
	check_len(reference, symbol_history)?;

	Ok(symbol_history.iter().zip(reference.iter())
		.fold(0, |acc, (symbol, sample)| if *symbol < T::zero() { acc - sample } else { acc + sample }))
}

fn check_len<T>(reference:&[i32], symbol_history:&[T]) -> Result<(), DigSigProcErr> {
	if symbol_history.len() < reference.len() {
		Err(DigSigProcErr::InsufficientSymbols{ needed: reference.len(), actual: symbol_history.len() })
	} else {
		Ok(())
	}
}

/// Correlates soft bit decisions against the 8-bit preamble
pub fn correlate<T: Float>(bit_history:&[T]) -> Result<i32, DigSigProcErr> { correlate_with(&PREAMBLE_SAMPLES, bit_history) }

/// Correlates 1-ms prompt outputs against the preamble spread over 160 symbols
pub fn correlate_symbols<T: Float>(symbol_history:&[T]) -> Result<i32, DigSigProcErr> { correlate_with(&PREAMBLE_SYMBOLS, symbol_history) }

/// Every offset into `bit_history` where all eight bits agree with the preamble, with +1 for
/// upright and -1 for inverted polarity
pub fn find_preamble<T: Float>(bit_history:&[T]) -> Vec<(usize, i8)> {
	let full_scale:i32 = PREAMBLE_LENGTH_BITS as i32;

	let ans:Vec<(usize, i8)> = bit_history.windows(PREAMBLE_LENGTH_BITS).enumerate().filter_map(|(idx, window)| {
		match correlate(window) {
			Ok(x) if x ==  full_scale => Some((idx,  1)),
			Ok(x) if x == -full_scale => Some((idx, -1)),
			_ => None,
		}
	}).collect();

	debug!("Preamble search over {} bits found {} candidate(s)", bit_history.len(), ans.len());
	ans
}

#[cfg(test)]
mod tests {

	use rand::prelude::*;
	use rand_distr::Uniform;

	use crate::test_utils::init_logger;

	use super::*;

	fn soft(bits:&str) -> Vec<f64> { bits.chars().map(|c| if c == '1' { 0.7 } else { -0.3 }).collect() }

	#[test]
	fn reference_matches_pattern() {
		assert_eq!(PREAMBLE_SAMPLES, [1, -1, -1, -1, 1, -1, 1, 1]);

		let from_str:Vec<bool> = GPS_CA_PREAMBLE.chars().map(|c| c == '1').collect();
		assert_eq!(&from_str[..], &PREAMBLE_PATTERN[..]);

		assert_eq!(PREAMBLE_LENGTH_SYMBOLS, 160);
		assert!(PREAMBLE_SYMBOLS[..20].iter().all(|x| *x == 1));
		assert!(PREAMBLE_SYMBOLS[20..80].iter().all(|x| *x == -1));
		assert!(PREAMBLE_SYMBOLS[140..].iter().all(|x| *x == 1));
	}

	#[test]
	fn full_scale_upright_and_inverted() {
		assert_eq!(correlate(&soft("10001011")), Ok(8));
		assert_eq!(correlate(&soft("01110100")), Ok(-8));
		assert_eq!(correlate(&soft("10001010")), Ok(6));
	}

	#[test]
	fn magnitude_is_ignored() {
		let small:Vec<f32> = vec![ 1.0e-6, -5.0, -1.0e-3, -0.1,  9.0, -2.0, 3.0, 1.0e-9];
		let large:Vec<f32> = vec![ 100.0, -1.0,   -1.0,   -1.0,  1.0, -1.0, 1.0, 1.0];
		assert_eq!(correlate(&small), Ok(8));
		assert_eq!(correlate(&small), correlate(&large));
	}

	#[test]
	fn zero_counts_as_positive() {
		let history:Vec<f64> = vec![0.0; 8];
		assert_eq!(correlate(&history), Ok(0));
		assert_eq!(correlate_with(&[1, 1, -1], &[0.0_f64, -0.0, 0.0]), Ok(1));
		assert_eq!(correlate_with_fold(&[1, 1, -1], &[0.0_f64, -0.0, 0.0]), Ok(1));
	}

	#[test]
	fn only_leading_window_is_used() {
		let mut history = soft("10001011");
		history.extend(soft("0000000000"));
		assert_eq!(correlate(&history), Ok(8));
	}

	#[test]
	fn too_few_symbols() {
		assert_eq!(correlate(&soft("1000101")), Err(DigSigProcErr::InsufficientSymbols{ needed: 8, actual: 7 }));
		assert_eq!(correlate_symbols(&[1.0_f64; 159]), Err(DigSigProcErr::InsufficientSymbols{ needed: 160, actual: 159 }));
	}

	#[test]
	fn symbol_level() {
		let history:Vec<f64> = PREAMBLE_SYMBOLS.iter().map(|x| *x as f64 * 0.25).collect();
		assert_eq!(correlate_symbols(&history), Ok(160));

		// One bit flipped over its whole 20 ms
		let mut history = history;
		for x in history[40..60].iter_mut() { *x = -*x; }
		assert_eq!(correlate_symbols(&history), Ok(120));
	}

	#[test]
	fn loop_and_fold_agree() {
		let mut rng = rand::thread_rng();
		let dist = Uniform::new(-1.0_f32, 1.0_f32);

		let mut sum_corr1:i64 = 0;
		let mut sum_corr2:i64 = 0;

		for _ in 0..10000 {
			let history:Vec<f32> = (0..PREAMBLE_LENGTH_SYMBOLS).map(|_| dist.sample(&mut rng)).collect();

			let corr_value  = correlate_with(&PREAMBLE_SAMPLES, &history).unwrap();
			let corr_value2 = correlate_with_fold(&PREAMBLE_SAMPLES, &history).unwrap();
			assert_eq!(corr_value, corr_value2);

			sum_corr1 += corr_value as i64;
			sum_corr2 += corr_value2 as i64;

			assert_eq!(correlate_with(&PREAMBLE_SYMBOLS, &history), correlate_with_fold(&PREAMBLE_SYMBOLS, &history));
		}

		assert_eq!(sum_corr1, sum_corr2);
	}

	#[test]
	fn finds_upright_and_inverted() {
		init_logger();

		let upright = soft("111111111111100010111111111");
		assert_eq!(find_preamble(&upright), vec![(12, 1)]);

		let inverted:Vec<f64> = upright.iter().map(|x| -x).collect();
		assert_eq!(find_preamble(&inverted), vec![(12, -1)]);

		assert!(find_preamble(&soft("1111")).is_empty());
	}

}
