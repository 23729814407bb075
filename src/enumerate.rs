/*!
Discovery of drives attached to the system.

Every possible address on every channel is probed with IDENTIFY DEVICE; see [`list_devices`](fn.list_devices.html).
*/

use crate::ata::data::id::Id;
use crate::channel::{Channel, DeviceAddress};
use crate::misc::Misc;
use crate::Error;

/// Returns the number of channels the platform knows about.
pub fn max_channel<C: Channel + ?Sized>(chan: &C) -> Result<u32, Error> {
	chan.max_channel()
}

/// Returns identities of all the drives found, in address order.
///
/// Addresses with nothing attached, drives that fail to identify themselves, and drives that send back a blank reply (configuration word set to zero) are omitted. Only the failure to get the number of channels is an error.
pub fn list_devices<C: Channel + ?Sized>(chan: &C) -> Result<Vec<(DeviceAddress, Id)>, Error> {
	let channels = max_channel(chan)?;
	debug!("probing {} channel(s)", channels);

	let mut devices = vec![];
	for addr in DeviceAddress::all(channels) {
		match chan.identify(addr) {
			Ok(id) => if id.is_present() {
				devices.push((addr, id));
			} else {
				info!("{}: blank IDENTIFY reply, skipping", addr);
			},
			Err(Error::DeviceAbsent(_)) => debug!("{}: nothing attached", addr),
			Err(err) => warn!("{}: skipping: {}", addr, err),
		}
	}

	Ok(devices)
}
