use byteorder::{ByteOrder, LittleEndian};

// byte ranges of ASCII fields in IDENTIFY DEVICE data
const SERIAL: (usize, usize) = (20, 40); // words 10-19
const FIRMWARE: (usize, usize) = (46, 54); // words 23-26
const MODEL: (usize, usize) = (54, 94); // words 27-46

/// Swaps bytes of each 16-bit word within `buf[from..to]`.
///
/// ATA strings are sent as words, and each word carries two characters in big-endian order, while the rest of the structure is little-endian.
pub fn byteswap(buf: &mut [u8], from: usize, to: usize) {
	for pair in buf[from..to].chunks_mut(2) {
		if pair.len() == 2 {
			pair.swap(0, 1);
		}
	}
}

/// Drops leading spaces from `buf[from..to]`, shifting the rest of the field to the left and filling the vacated tail with zeroes.
pub fn strpack(buf: &mut [u8], from: usize, to: usize) {
	let field = &mut buf[from..to];
	let skip = field.iter().take_while(|&&c| c == b' ').count();

	field.copy_within(skip.., 0);
	let len = field.len();
	for c in &mut field[len - skip ..] {
		*c = 0;
	}
}

// fields are not guaranteed to be NUL-terminated, and usually are not
fn read_string(buf: &[u8], (from, to): (usize, usize)) -> String {
	let field = &buf[from..to];
	let len = field.iter().position(|&c| c == 0).unwrap_or(field.len());

	let output: String = field[..len].iter().map(|&c| c as char).collect();
	String::from(output.trim_end())
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Ternary {
	Unsupported, Disabled, Enabled
}

impl Ternary {
	pub fn is_supported(&self) -> bool { *self != Ternary::Unsupported }
	pub fn is_enabled(&self) -> bool { *self == Ternary::Enabled }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Id {
	/// General configuration word; 0 means there's no device (or it did not reply)
	pub config: u16,

	pub serial: String,
	pub firmware: String,
	pub model: String,

	pub version_major: u16,
	pub version_minor: u16,

	// CHS geometry, default translation mode
	pub cylinders: u16,
	pub heads: u16,
	pub sectors_per_track: u16,

	/// Total number of user addressable sectors (28-bit LBA)
	pub sectors: u32,

	pub smart: Ternary,
	pub apm: Ternary, // Advanced Power Management
	pub aam: Ternary, // Automatic Acoustic Management

	/// Current APM level, if APM is enabled
	pub apm_level: Option<u16>,
	/// Current acoustic level (raw, 128..=254), if AAM is enabled
	pub aam_current: Option<u8>,
	/// Vendor's recommended acoustic level (raw), if AAM is enabled
	pub aam_recommended: Option<u8>,
}

impl Id {
	pub fn is_present(&self) -> bool {
		self.config != 0
	}

	pub fn capacity_mb(&self) -> u64 {
		(self.sectors as u64 * 512) / 1048576
	}

	/// Capacity in whole megabytes, or in whole gigabytes starting from 1024 MB (e.g. `100MB`, `2GB`).
	pub fn capacity(&self) -> String {
		let mb = self.capacity_mb();
		if mb < 1024 {
			format!("{}MB", mb)
		} else {
			format!("{}GB", mb / 1024)
		}
	}

	/// Newest ATA standard the device claims to support, e.g. `ATA-6`.
	pub fn ata_version(&self) -> String {
		version_string(self.version_major)
	}
}

/// Renders major version word as `ATA-<n>`, `n` being the highest bit set below bit 15.
pub fn version_string(major: u16) -> String {
	if major <= 1 {
		return "unknown/pre ATA-2".to_string();
	}

	// bit 15 is never considered, hence `0xffff` (not reported) still yields ATA-14
	let bit = (0..15).rev()
		.find(|&i| (major >> i) > 0)
		.unwrap_or(0);

	format!("ATA-{}", bit)
}

fn is_set(word: u16, bit: usize) -> bool {
	word & (1<<bit) != 0
}
fn make_ternary(data: &[u16], word_sup: usize, bit_sup: usize, word_enabled: usize, bit_enabled: usize) -> Ternary {
	if !is_set(data[word_sup], bit_sup) {
		Ternary::Unsupported
	} else if is_set(data[word_enabled], bit_enabled) {
		Ternary::Enabled
	} else {
		Ternary::Disabled
	}
}

/// Parses IDENTIFY DEVICE (or IDENTIFY PACKET DEVICE) reply.
///
/// `raw` is expected to be 512 bytes long; shorter buffers are padded with zeroes, extra bytes are ignored.
pub fn parse_id(raw: &[u8]) -> Id {
	let mut buf = [0u8; 512];
	let len = raw.len().min(512);
	buf[..len].copy_from_slice(&raw[..len]);

	let mut data = [0u16; 256];
	LittleEndian::read_u16_into(&buf, &mut data);

	byteswap(&mut buf, SERIAL.0, SERIAL.1);
	byteswap(&mut buf, FIRMWARE.0, FIRMWARE.1);
	byteswap(&mut buf, MODEL.0, MODEL.1);
	// XXX only serial number is known to be padded with leading spaces; model and firmware are left as is
	strpack(&mut buf, SERIAL.0, SERIAL.1);

	let apm = make_ternary(&data, 83, 3, 86, 3);
	let aam = make_ternary(&data, 83, 9, 86, 9);

	// levels are only valid while the feature is enabled
	let apm_enabled = is_set(data[86], 3);
	let aam_enabled = is_set(data[86], 9);

	Id {
		config: data[0],

		serial: read_string(&buf, SERIAL),
		firmware: read_string(&buf, FIRMWARE),
		model: read_string(&buf, MODEL),

		version_major: data[80],
		version_minor: data[81],

		cylinders: data[1],
		heads: data[3],
		sectors_per_track: data[6],

		sectors: ((data[61] as u32) << 16) + (data[60] as u32),

		smart: make_ternary(&data, 82, 0, 85, 0),
		apm,
		aam,

		apm_level: if apm_enabled { Some(data[91]) } else { None },
		aam_current: if aam_enabled { Some((data[94] & 0xff) as u8) } else { None },
		aam_recommended: if aam_enabled { Some((data[94] >> 8) as u8) } else { None },
	}
}
