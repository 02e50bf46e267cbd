extern crate clap;
extern crate colored;
extern crate gnss_replica;
extern crate rustfft;
extern crate serde;

use std::fs::File;
use std::io::BufWriter;
use std::process;

use clap::{Arg, App};
use colored::*;
use gnss_replica::config::{ReplicaConfig, ReplicaOutput};
use gnss_replica::gnss::gps_l1_ca::{CODE_LENGTH, signal_modulation};
use gnss_replica::io;
use rustfft::num_complex::Complex;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ChipsOutput {
	prn: usize,
	chip_shift: u32,
	chips: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct SampledOutput {
	prn: usize,
	chip_shift: u32,
	fs_hz: u32,
	samples: Vec<Complex<f32>>,
}

fn fail(msg:String) -> ! {
	eprintln!("{}", msg.red());
	process::exit(1);
}

fn main() {

	env_logger::init();

	let matches = App::new("GPS L1 C/A Replica")
		.version("0.1.0")
		.author("John Stanford (johnwstanford@gmail.com)")
		.about("Generates the L1 C/A code for one satellite, either one sample per chip or sampled over one code period")
		.arg(Arg::with_name("config")
			.long("config")
			.help("JSON replica configuration; overrides the other options")
			.takes_value(true))
		.arg(Arg::with_name("prn")
			.short("p").long("prn")
			.takes_value(true).required_unless("config"))
		.arg(Arg::with_name("chip_shift")
			.short("c").long("chip_shift")
			.takes_value(true))
		.arg(Arg::with_name("sample_rate_sps")
			.short("s").long("sample_rate_sps")
			.help("Produce a sampled replica at this rate instead of one sample per chip")
			.takes_value(true))
		.arg(Arg::with_name("output")
			.short("o").long("output")
			.help("Write sampled replicas as interleaved little-endian f32 IQ to this file instead of JSON to stdout")
			.takes_value(true))
		.get_matches();

	let cfg:ReplicaConfig = match matches.value_of("config") {
		Some(fname) => {
			let s = std::fs::read_to_string(fname).unwrap_or_else(|e| fail(format!("Unable to read {}: {}", fname, e)));
			ReplicaConfig::from_json(&s).unwrap_or_else(|e| fail(format!("{}", e)))
		},
		None => {
			let prn:usize = matches.value_of("prn").unwrap_or_default().parse()
				.unwrap_or_else(|_| fail("PRN must be a non-negative integer".to_string()));
			let chip_shift:u32 = matches.value_of("chip_shift").map(|s| s.parse()).unwrap_or(Ok(0))
				.unwrap_or_else(|_| fail("Chip shift must be a non-negative integer".to_string()));
			let opt_fs:Option<u32> = matches.value_of("sample_rate_sps")
				.map(|s| s.parse().unwrap_or_else(|_| fail("Sample rate must be an integer number of samples/sec".to_string())));

			let cfg = match opt_fs {
				Some(fs_hz) => ReplicaConfig{ prn, chip_shift, fs_hz, output: ReplicaOutput::Sampled },
				None        => ReplicaConfig{ prn, chip_shift, fs_hz: 0, output: ReplicaOutput::Chips },
			};
			cfg.validate().unwrap_or_else(|e| fail(format!("{}", e)));
			cfg
		},
	};

	match cfg.output {
		ReplicaOutput::Chips => {
			let mut chips:[i32; CODE_LENGTH] = [0; CODE_LENGTH];
			signal_modulation::l1_ca_code_int(&mut chips, cfg.prn, cfg.chip_shift).unwrap_or_else(|e| fail(format!("{}", e)));
			eprintln!("{}", format!("PRN {} code, chip shift {}", cfg.prn, cfg.chip_shift).green());

			let out = ChipsOutput{ prn: cfg.prn, chip_shift: cfg.chip_shift, chips: chips.to_vec() };
			println!("{}", serde_json::to_string_pretty(&out).unwrap());
		},
		ReplicaOutput::Sampled => {
			let samples:Vec<Complex<f32>> = signal_modulation::prn_complex_sampled(cfg.prn, cfg.fs_hz, cfg.chip_shift)
				.unwrap_or_else(|e| fail(format!("{}", e)));
			eprintln!("{}", format!("PRN {} replica, {} samples at {} [samples/sec]", cfg.prn, samples.len(), cfg.fs_hz).green());

			match matches.value_of("output") {
				Some(fname) => {
					let f = File::create(fname).unwrap_or_else(|e| fail(format!("Unable to create {}: {}", fname, e)));
					io::write_iq_f32_le(&mut BufWriter::new(f), &samples).unwrap_or_else(|e| fail(format!("Unable to write {}: {}", fname, e)));
				},
				None => {
					let out = SampledOutput{ prn: cfg.prn, chip_shift: cfg.chip_shift, fs_hz: cfg.fs_hz, samples };
					println!("{}", serde_json::to_string_pretty(&out).unwrap());
				}
			}
		},
	}

}
