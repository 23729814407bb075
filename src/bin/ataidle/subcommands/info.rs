use ataidle::Error;
use ataidle::ata::data::id::{Id, Ternary};
use ataidle::channel::PlatformChannel;
use ataidle::misc::{Misc, ACOUSTIC_OFFSET};

use clap::{
	ArgMatches,
	App,
	SubCommand,
};

use serde_json;

use separator::Separatable;

use super::{Subcommand, arg_json, args_address, address};
use crate::die;

fn yes_no(b: bool) -> &'static str {
	if b { "yes" } else { "no" }
}

// drive reports levels on its own scale, show them as they're set
fn acoustic(level: u8) -> i32 {
	level as i32 - ACOUSTIC_OFFSET as i32
}

fn print_feature(name: &str, status: Ternary) {
	print!("{:<22} {}\n", format!("{} Supported:", name), yes_no(status.is_supported()));
	if status.is_supported() {
		print!("{:<22} {}\n", format!("{} Enabled:", name), yes_no(status.is_enabled()));
	}
}

fn print_id(id: &Id) {
	print!("Model:                 {}\n", id.model);
	print!("Serial:                {}\n", id.serial);
	print!("Firmware Rev:          {}\n", id.firmware);
	print!("ATA revision:          {}\n", id.ata_version());
	print!("Geometry:              {} cyls, {} heads, {} spt\n", id.cylinders, id.heads, id.sectors_per_track);
	print!("Capacity:              {} ({} sectors)\n", id.capacity(), id.sectors.separated_string());

	print_feature("SMART", id.smart);
	print_feature("APM", id.apm);
	print_feature("AAC", id.aam);

	if let Some(current) = id.aam_current {
		print!("Current AAC:           {}\n", acoustic(current));
	}
	if let Some(recommended) = id.aam_recommended {
		print!("Vendor Recommends AAC: {}\n", acoustic(recommended));
	}
	if let Some(level) = id.apm_level {
		print!("APM Value:             {}\n", level);
	}

	print!("\n");
	print!("Note: AAC = AutoAcoustic\n");
	print!("      APM = Advanced Power Management\n");
	print!("      SMART = Self-Monitoring, Analysis and Reporting Technology\n");
}

pub struct Info {}
impl Subcommand for Info {
	fn subcommand(&self) -> App<'static, 'static> {
		args_address(SubCommand::with_name("info")
			.about("Prints what the drive reports about itself")
		)
			.arg(arg_json())
	}

	fn run(&self, chan: &PlatformChannel, args: &ArgMatches) {
		let addr = address(chan, args);

		let id = chan.device_info(addr).unwrap_or_else(|err| match err {
			Error::DeviceAbsent(_) => {
				eprint!("Could not get device information: is a device attached?\n");
				::std::process::exit(1);
			},
			err => die(err),
		});

		if args.is_present("json") {
			print!("{}\n", serde_json::to_string(&id).unwrap());
			return;
		}

		print_id(&id);
	}
}
