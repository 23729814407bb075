/// Renders `data` as lines of 16 hex bytes followed by their printable ASCII representation.
///
/// Every line, including the first one, starts with a line break, so the dump can be appended to a log message as is.
pub fn hexdump(data: &[u8]) -> String {
	// 3× len for ' {:02x}'
	// len/16 for \n
	// len/16 for ' ' before ascii
	// 3× len for ascii (░ takes 3 bytes in UTF-8)
	let mut dump = String::with_capacity(6*data.len() + data.len()/8 + 2);

	for line in data.chunks(16) {
		dump.push('\n');
		for byte in line {
			dump.push_str(&format!(" {:02x}", byte));
		}
		// keep ascii column aligned for the last, incomplete line
		for _ in line.len()..16 {
			dump.push_str("   ");
		}
		dump.push(' ');
		dump.extend(line.iter().map(|&c|
			if c >= 0x20 && c < 0x7f {
				c as char
			} else {
				// ' ' and '.' are ambiguous, and a string of '�'s is just unreadable
				'░'
			}
		));
	}
	dump
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty() {
		assert_eq!(hexdump(&[]), "");
	}

	#[test]
	fn lines() {
		let data: Vec<u8> = (0x40..0x52).collect();
		let dump = hexdump(&data);
		let lines: Vec<_> = dump.split('\n').collect();
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0], "");
		assert_eq!(lines[1], " 40 41 42 43 44 45 46 47 48 49 4a 4b 4c 4d 4e 4f @ABCDEFGHIJKLMNO");
		assert_eq!(lines[2], format!(" 50 51{} PQ", "   ".repeat(14)));
	}

	#[test]
	fn unprintable() {
		assert_eq!(hexdump(&[0x00, 0x41, 0x7f]), format!("\n 00 41 7f{} ░A░", "   ".repeat(13)));
	}
}
