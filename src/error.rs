use std::io;

use crate::channel::DeviceAddress;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		InvalidDuration(minutes: u32) {
			display("cannot encode a timeout of {} minutes: use 0-20, 21, or a multiple of 30 minutes up to 5 hours", minutes)
		}
		InvalidLevel(what: &'static str, value: u32, max: u32) {
			display("invalid {} value {}: must be 0-{}", what, value, max)
		}
		DeviceAbsent(addr: DeviceAddress) {
			display("no device found at {}", addr)
		}
		DeviceUnavailable(path: String, err: io::Error) {
			display("cannot open {}: {}", path, err)
			cause(err)
		}
		CommandFailed(command: &'static str, err: io::Error) {
			display("{} failed: {}", command, err)
			cause(err)
		}
		QueryFailed(what: &'static str, err: io::Error) {
			display("cannot get {}: {}", what, err)
			cause(err)
		}
	}
}
