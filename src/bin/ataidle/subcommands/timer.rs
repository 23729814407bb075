use ataidle::ata::timer::{self, TimerEncoding};
use ataidle::channel::PlatformChannel;
use ataidle::misc::Misc;

use clap::{
	Arg,
	ArgMatches,
	App,
	SubCommand,
};

use super::{Subcommand, args_address, address};
use crate::die;

/// Idle and standby timers only differ in commands sent, so they share the subcommand
#[derive(Debug)]
pub enum Timer {
	Idle,
	Standby,
}

impl Timer {
	fn name(&self) -> &'static str {
		match *self {
			Timer::Idle => "idle",
			Timer::Standby => "standby",
		}
	}
}

impl Subcommand for Timer {
	fn subcommand(&self) -> App<'static, 'static> {
		let about = match *self {
			Timer::Idle => "Sets the idle timer, or puts the drive into idle mode",
			Timer::Standby => "Sets the standby timer, or spins the drive down",
		};

		args_address(SubCommand::with_name(self.name()).about(about))
			.arg(Arg::with_name("minutes")
				.help("Timeout: 0 turns the timer off, then 1 to 20, 21, or multiples of 30 up to 330 minutes")
				.required_unless("now")
				.index(3)
			)
			.arg(Arg::with_name("now")
				.long("now")
				.conflicts_with("minutes")
				.help("Do not wait, enter the mode immediately")
			)
	}

	fn run(&self, chan: &PlatformChannel, args: &ArgMatches) {
		let addr = address(chan, args);

		let minutes = if args.is_present("now") {
			timer::IMMEDIATE
		} else {
			value_t!(args, "minutes", u32).unwrap_or_else(|_| {
				eprint!("invalid {} value\n", self.name());
				::std::process::exit(1);
			})
		};

		let encoding = match *self {
			Timer::Idle => chan.set_idle(addr, minutes),
			Timer::Standby => chan.set_standby(addr, minutes),
		}.unwrap_or_else(|err| die(err));

		match encoding {
			TimerEncoding::Immediate =>
				print!("set {} to {} immediately\n", addr, self.name()),
			e if e.is_disabled() =>
				print!("turned off {} timer on {}\n", self.name(), addr),
			e => {
				// report what the drive was told, e.g. 330 minutes shares its value with 21
				let minutes = e.timeout()
					.map(|timeout| timeout.as_secs() / 60)
					.unwrap_or(minutes as u64);
				print!("set {} to {} after {} minutes\n", addr, self.name(), minutes);
			},
		}
	}
}
