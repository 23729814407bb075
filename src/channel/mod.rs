/*!
Platform-specific path to send ATA commands to drives.

Drives are addressed by their position, i.e. by the channel (controller port) and by the device on that channel (0 for primary, 1 for secondary), see [`DeviceAddress`](struct.DeviceAddress.html).

Operating systems differ in how they let us reach drives:

* FreeBSD provides single `/dev/ata` control device, and every request carries the channel and the device it is for ([`freebsd::ControlDevice`](freebsd/struct.ControlDevice.html));
* Linux has no such thing, so each drive is reached through its own block device file, opened for the duration of a command ([`linux::DeviceFiles`](linux/struct.DeviceFiles.html)).

Whatever is available on the target OS is exported as [`PlatformChannel`](type.PlatformChannel.html).

## Example

```no_run
use ataidle::ata::CommandKind;
use ataidle::channel::{Channel, DeviceAddress, PlatformChannel};

let chan = PlatformChannel::open().unwrap();
let data = chan.issue(DeviceAddress::new(0, 1).unwrap(), CommandKind::Identify).unwrap();
```
*/

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "linux")]
pub type PlatformChannel = self::linux::DeviceFiles;

#[cfg(target_os = "freebsd")]
pub mod freebsd;
#[cfg(target_os = "freebsd")]
pub type PlatformChannel = self::freebsd::ControlDevice;

use std::fmt;
use std::io;

use crate::ata::{CommandKind, RegistersWrite};
use crate::utils::hexdump;
use crate::{Direction, Error};

/// Position of a drive: channel, and primary (0) or secondary (1) device on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct DeviceAddress {
	channel: u32,
	device: u8,
}

impl DeviceAddress {
	/// Returns `None` if `device` is neither 0 nor 1.
	pub fn new(channel: u32, device: u32) -> Option<Self> {
		if device < 2 {
			Some(DeviceAddress { channel, device: device as u8 })
		} else {
			None
		}
	}

	#[inline]
	pub fn channel(&self) -> u32 { self.channel }

	#[inline]
	pub fn device(&self) -> u8 { self.device }

	/// Drive number if drives were counted sequentially, two per channel. `None` if it does not fit into `u32`.
	#[inline]
	pub fn index(&self) -> Option<u32> {
		self.channel.checked_mul(2)
			.and_then(|i| i.checked_add(self.device as u32))
	}

	/// Addresses of every possible drive on channels `0..channels`
	pub fn all(channels: u32) -> impl Iterator<Item = DeviceAddress> {
		(0..channels).flat_map(|channel| (0..2).map(move |device| DeviceAddress { channel, device }))
	}
}

impl fmt::Display for DeviceAddress {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "chan {}, dev {}", self.channel, self.device)
	}
}

/**
Something that can carry ATA commands to a drive.

Implementors provide the transport ([`ata_do`](#tymethod.ata_do)) and the means of discovery ([`max_channel`](#tymethod.max_channel), [`is_present`](#tymethod.is_present)); commands should be sent with [`issue`](#method.issue), which makes sure the drive is there first.

See [`misc::Misc`](../misc/trait.Misc.html) for higher-level operations built on top of this trait.
*/
pub trait Channel {
	/// Acquires whatever control path the platform offers.
	///
	/// ## Errors
	///
	/// [`Error::DeviceUnavailable`](../enum.Error.html) if the control path cannot be opened.
	fn open() -> Result<Self, Error> where Self: Sized;

	/// Returns the number of channels, i.e. the upper (exclusive) bound for channel numbers.
	fn max_channel(&self) -> Result<u32, Error>;

	/// Checks whether there's a drive at `addr`, without sending anything to the drive itself.
	fn is_present(&self, addr: DeviceAddress) -> bool;

	/// Executes command described by `regs` on the drive at `addr`, returning data it sent back (512 bytes for `Direction::From`, nothing otherwise).
	///
	/// This is raw transport, and it does not check whether the drive is present; use [`issue`](#method.issue) instead.
	fn ata_do(&self, addr: DeviceAddress, dir: Direction, regs: &RegistersWrite) -> Result<Vec<u8>, io::Error>;

	/// Releases the control path. Can be called any number of times.
	fn close(&mut self);

	/// Fails with [`Error::DeviceAbsent`](../enum.Error.html) if there's no drive at `addr`.
	fn require(&self, addr: DeviceAddress) -> Result<(), Error> {
		if self.is_present(addr) {
			Ok(())
		} else {
			Err(Error::DeviceAbsent(addr))
		}
	}

	/// Sends `cmd` to the drive at `addr`.
	///
	/// ## Errors
	///
	/// * [`Error::DeviceAbsent`](../enum.Error.html) if there's no drive at `addr`; nothing is sent in this case,
	/// * [`Error::CommandFailed`](../enum.Error.html) if the transport reports failure.
	fn issue(&self, addr: DeviceAddress, cmd: CommandKind) -> Result<Vec<u8>, Error> {
		self.require(addr)?;
		self.send(addr, cmd)
	}

	/// Same as [`issue`](#method.issue), but skips the presence check; for callers that already did [`require`](#method.require).
	///
	/// ## Errors
	///
	/// [`Error::CommandFailed`](../enum.Error.html) if the transport reports failure.
	fn send(&self, addr: DeviceAddress, cmd: CommandKind) -> Result<Vec<u8>, Error> {
		let regs = cmd.registers();
		info!("{}: issuing {} (command {:02x}h, features {:02x}h, sector count {})",
			addr, cmd.name(), regs.command, regs.features, regs.sector_count,
		);

		let data = self.ata_do(addr, cmd.direction(), &regs)
			.map_err(|err| Error::CommandFailed(cmd.name(), err))?;

		if !data.is_empty() {
			debug!("{}: {} returned {} bytes:{}", addr, cmd.name(), data.len(), hexdump(&data));
		}

		Ok(data)
	}
}
