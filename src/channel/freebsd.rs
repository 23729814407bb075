/*!
Drives reached through ATA control device, `/dev/ata`, and `IOCATA` ioctl.

The control device is opened once, and every request names the channel and the device it is meant for. Besides sending commands to drives, the control device also knows the number of channels and whether there's anything attached to them, so discovery does not touch drives at all.

See `sys/ata.h` and ata(4) for the reference; the structures below mirror ones from `sys/ata.h`.
*/

#![allow(non_camel_case_types)]

use std::fs::{File, OpenOptions};
use std::io;
use std::mem;
use std::os::raw::{c_char, c_int, c_ulong};
use std::os::unix::io::AsRawFd;
use std::ptr;

use libc::ioctl;

use crate::ata::RegistersWrite;
use crate::channel::{Channel, DeviceAddress};
use crate::{Direction, Error};

pub const CONTROL_DEVICE: &str = "/dev/ata";

// ata_cmd.cmd
const ATAGMAXCHANNEL: c_int = 1;
const ATAGPARM: c_int = 2;
const ATAREQUEST: c_int = 5;

// ata_cmd.u.request.flags
const ATA_CMD_CONTROL: c_int = 0x01;
const ATA_CMD_READ: c_int = 0x02;

#[repr(C)]
#[derive(Clone, Copy)]
struct ata_param {
	type_: [c_int; 2], // non-zero if there's a device
	name: [[c_char; 32]; 2],
	params: [[u8; 512]; 2], // struct ata_params
}

#[repr(C)]
#[derive(Clone, Copy)]
struct ata_taskfile {
	command: u8,
	feature: u8,
	lba: u64,
	count: u16,
}

#[repr(C)]
#[derive(Clone, Copy)]
union ata_request_u {
	ata: ata_taskfile,
	atapi: [c_char; 16], // ccb
}

#[repr(C)]
#[derive(Clone, Copy)]
struct ata_request {
	u: ata_request_u,
	data: *mut c_char,
	count: c_int,
	flags: c_int,
	timeout: c_int,
	error: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
union ata_cmd_u {
	maxchan: c_int,
	param: ata_param,
	request: ata_request,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct ata_cmd {
	channel: c_int,
	device: c_int,
	cmd: c_int,
	u: ata_cmd_u,
}

/*
/usr/include/sys/ata.h
#define IOCATA                  _IOWR('a',  1, struct ata_cmd)

/usr/include/sys/ioccom.h
#define      _IOWR(g,n,t)    _IOC(IOC_INOUT, (g), (n), sizeof(t))
#define      _IOC(inout,group,num,len)       ((unsigned long) \
     ((inout) | (((len) & IOCPARM_MASK) << 16) | ((group) << 8) | (num)))
*/
const IOCPARM_MASK: c_ulong = (1 << 13) - 1;
const IOC_OUT: c_ulong = 0x40000000;
const IOC_IN:  c_ulong = 0x80000000;
const IOCATA: c_ulong = IOC_IN | IOC_OUT | ((mem::size_of::<ata_cmd>() as c_ulong & IOCPARM_MASK) << 16) | ((b'a' as c_ulong) << 8) | 1;

/// Handle to `/dev/ata`. Closed on [`close()`](../trait.Channel.html#tymethod.close) or when dropped, whatever happens first.
#[derive(Debug)]
pub struct ControlDevice {
	file: Option<File>,
}

impl ControlDevice {
	fn query(channel: c_int, device: c_int, cmd: c_int) -> ata_cmd {
		// safety: all-zeroes is a valid value for every field, including the null data pointer
		let mut query: ata_cmd = unsafe { mem::zeroed() };
		query.channel = channel;
		query.device = device;
		query.cmd = cmd;
		query
	}

	fn ioctl(&self, cmd: &mut ata_cmd) -> Result<(), io::Error> {
		let file = self.file.as_ref().ok_or_else(|| io::Error::new(
			io::ErrorKind::NotConnected,
			"ATA control device is closed",
		))?;

		unsafe {
			if ioctl(file.as_raw_fd(), IOCATA, cmd as *mut ata_cmd) == -1 {
				return Err(io::Error::last_os_error());
			}
		}
		Ok(())
	}
}

impl Channel for ControlDevice {
	fn open() -> Result<Self, Error> {
		let file = OpenOptions::new()
			.read(true)
			.write(true)
			.open(CONTROL_DEVICE)
			.map_err(|err| Error::DeviceUnavailable(CONTROL_DEVICE.to_string(), err))?;

		Ok(ControlDevice { file: Some(file) })
	}

	fn max_channel(&self) -> Result<u32, Error> {
		let mut query = Self::query(0, 0, ATAGMAXCHANNEL);
		self.ioctl(&mut query)
			.map_err(|err| Error::QueryFailed("maximum channel", err))?;

		let maxchan = unsafe { query.u.maxchan };
		Ok(maxchan.max(0) as u32)
	}

	fn is_present(&self, addr: DeviceAddress) -> bool {
		// -1 asks for both devices on the channel
		let mut query = Self::query(addr.channel() as c_int, -1, ATAGPARM);
		if let Err(err) = self.ioctl(&mut query) {
			debug!("{}: cannot get channel parameters: {}", addr, err);
			return false;
		}

		unsafe { query.u.param.type_[addr.device() as usize] != 0 }
	}

	fn ata_do(&self, addr: DeviceAddress, dir: Direction, regs: &RegistersWrite) -> Result<Vec<u8>, io::Error> {
		let mut data = match dir {
			Direction::From => vec![0; 512],
			Direction::None => vec![],
		};

		let request = ata_request {
			u: ata_request_u { ata: ata_taskfile {
				command: regs.command,
				feature: regs.features,
				lba: 0,
				count: regs.sector_count as u16,
			}},
			data: if data.is_empty() { ptr::null_mut() } else { data.as_mut_ptr() as *mut c_char },
			count: data.len() as c_int,
			flags: match dir {
				Direction::From => ATA_CMD_READ,
				Direction::None => ATA_CMD_CONTROL,
			},
			timeout: regs.timeout as c_int,
			error: 0,
		};

		let mut cmd = ata_cmd {
			channel: addr.channel() as c_int,
			device: addr.device() as c_int,
			cmd: ATAREQUEST,
			u: ata_cmd_u { request },
		};

		self.ioctl(&mut cmd)?;

		// ioctl itself might succeed even if the drive aborted the command
		let error = unsafe { cmd.u.request.error };
		if error != 0 {
			return Err(io::Error::new(
				io::ErrorKind::Other,
				format!("device reported error {:02x}h", error),
			));
		}

		Ok(data)
	}

	fn close(&mut self) {
		// dropping the handle closes the descriptor
		self.file.take();
	}
}
