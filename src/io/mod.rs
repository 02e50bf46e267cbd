
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use rustfft::num_complex::Complex;

/// Writes samples as interleaved little-endian f32 I/Q pairs
pub fn write_iq_f32_le<W: Write>(dest:&mut W, samples:&[Complex<f32>]) -> io::Result<()> {
	for s in samples {
		dest.write_f32::<LittleEndian>(s.re)?;
		dest.write_f32::<LittleEndian>(s.im)?;
	}
	dest.flush()
}

/// Iterator over interleaved little-endian f32 I/Q pairs, yielding each sample with its index.
/// Stops at end of input; a trailing half sample is dropped.
pub struct IqSource<R: Read> {
	src: R,
	idx: usize,
}

impl<R: Read> IqSource<R> {

	pub fn new(src:R) -> Self { Self { src, idx: 0 } }

}

impl<R: Read> Iterator for IqSource<R> {
	type Item = (Complex<f32>, usize);

	fn next(&mut self) -> Option<(Complex<f32>, usize)> {
		let re:f32 = self.src.read_f32::<LittleEndian>().ok()?;
		let im:f32 = self.src.read_f32::<LittleEndian>().ok()?;

		let ans = (Complex{ re, im }, self.idx);
		self.idx += 1;
		Some(ans)
	}
}

pub fn read_iq_f32_le<R: Read>(src:R) -> IqSource<R> { IqSource::new(src) }
