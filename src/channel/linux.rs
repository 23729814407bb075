/*!
Drives reached through their block device files (`/dev/hda`, `/dev/hdb`, …) and `HDIO_DRIVE_CMD` ioctl.

Linux has no control device that knows about channels, so the address is mapped onto the file name: drive `channel * 2 + device` is the `n`-th letter after the prefix (`/dev/hd` by default, but libata also accepts `HDIO_DRIVE_CMD` on `/dev/sd*`).
Files are opened for every command and closed right after.

This makes discovery rather crude:

- the drive is deemed present if its file can be opened,
- the number of channels is derived from the number of files that can be opened in a row, starting from `a`.
*/

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;

use libc::ioctl;
#[cfg(not(any(target_env = "musl")))]
use libc::c_ulong;
#[cfg(any(target_env = "musl"))]
use libc::c_int;

use crate::ata::RegistersWrite;
use crate::channel::{Channel, DeviceAddress};
use crate::{Direction, Error};

#[cfg(not(any(target_env = "musl")))]
const HDIO_DRIVE_CMD: c_ulong = 0x031f; // linux/hdreg.h:344
#[cfg(any(target_env = "musl"))]
const HDIO_DRIVE_CMD: c_int = 0x031f;

pub const DEFAULT_PREFIX: &str = "/dev/hd";

// one letter per drive
const MAX_DRIVES: u32 = 26;

#[derive(Debug, Clone)]
pub struct DeviceFiles {
	prefix: String,
}

impl DeviceFiles {
	pub fn with_prefix(prefix: &str) -> Self {
		DeviceFiles { prefix: prefix.to_string() }
	}

	/// Returns the name of the device file for the `index`-th drive, if there can be one.
	pub fn drive_path(&self, index: u32) -> Option<String> {
		if index < MAX_DRIVES {
			Some(format!("{}{}", self.prefix, (b'a' + index as u8) as char))
		} else {
			None
		}
	}

	pub fn path(&self, addr: DeviceAddress) -> Option<String> {
		addr.index().and_then(|index| self.drive_path(index))
	}

	fn open_drive(&self, index: u32) -> Result<File, io::Error> {
		let path = self.drive_path(index).ok_or_else(|| io::Error::new(
			io::ErrorKind::NotFound,
			format!("drive #{} is out of {}a..{}z range", index, self.prefix, self.prefix),
		))?;

		// O_NONBLOCK: do not wait for media in removable drives
		OpenOptions::new()
			.read(true)
			.custom_flags(libc::O_NONBLOCK)
			.open(path)
	}

	fn open_addr(&self, addr: DeviceAddress) -> Result<File, io::Error> {
		let index = addr.index().ok_or_else(|| io::Error::new(
			io::ErrorKind::NotFound,
			format!("{} is out of {}a..{}z range", addr, self.prefix, self.prefix),
		))?;
		self.open_drive(index)
	}
}

/// Lays out `HDIO_DRIVE_CMD` argument: four bytes of registers followed by room for one sector of data.
fn drive_cmd_args(dir: Direction, regs: &RegistersWrite) -> [u8; 4+512] {
	let mut data = [0; 4+512];

	data[0] = regs.command;
	// for anything but SMART this goes into the sector count register
	data[1] = regs.sector_count;
	data[2] = regs.features;
	// number of sectors to read
	data[3] = match dir {
		Direction::From => 1,
		Direction::None => 0,
	};
	// HDIO_DRIVE_CMD has no means to pass regs.timeout, driver uses its own

	data
}

impl Channel for DeviceFiles {
	/// There is no control device to open; files are opened on demand, using [`DEFAULT_PREFIX`](constant.DEFAULT_PREFIX.html).
	fn open() -> Result<Self, Error> {
		Ok(DeviceFiles::with_prefix(DEFAULT_PREFIX))
	}

	fn max_channel(&self) -> Result<u32, Error> {
		// stop at the first file that cannot be opened
		let drives = (0..MAX_DRIVES)
			.take_while(|&i| self.open_drive(i).is_ok())
			.count() as u32;

		debug!("found {} consecutive drives starting from {}a", drives, self.prefix);

		// two drives per channel, rounding up
		Ok((drives + 1) / 2)
	}

	fn is_present(&self, addr: DeviceAddress) -> bool {
		self.open_addr(addr).is_ok()
	}

	fn ata_do(&self, addr: DeviceAddress, dir: Direction, regs: &RegistersWrite) -> Result<Vec<u8>, io::Error> {
		let file = self.open_addr(addr)?;

		let mut data = drive_cmd_args(dir, regs);

		unsafe {
			if ioctl(file.as_raw_fd(), HDIO_DRIVE_CMD, data.as_mut_ptr()) == -1 {
				return Err(io::Error::last_os_error());
			}
		}

		/*
		Now, according to linux/Documentation/ioctl/hdio.txt, data contains:
			[
				status, error, nsector, _undefined,
				(nsector * 512 bytes of data returned by the command),
			]
		*/
		match dir {
			Direction::From => Ok(data[4..].to_vec()),
			Direction::None => Ok(vec![]),
		}
		// `file` is closed here, as well as on every early return above
	}

	fn close(&mut self) {
		// nothing to close: files never outlive a command
	}
}
