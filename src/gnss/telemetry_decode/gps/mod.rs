
/*	GPS L1 C/A telemetry decoding starts by locating the TLM preamble in the
	stream of prompt correlator outputs.  Subframe assembly and decoding happen
	downstream of this crate.
*/

pub mod preamble;
