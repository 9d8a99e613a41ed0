//! CFF top DICT inspection.

use read_fonts::{FontRef, TableProvider};

/// Two-byte operator `ROS` (12 30), present only in CID-keyed fonts.
const ROS: u16 = 0x0C1E;

/// Whether the font's first CFF top DICT declares a Registry-Ordering-Supplement.
pub fn is_cid_keyed(font: &FontRef) -> bool {
    let Ok(cff) = font.cff() else {
        return false;
    };
    let Ok(top_dict) = cff.top_dicts().get(0) else {
        return false;
    };
    dict_operators(top_dict).contains(&ROS)
}

/// Operators of a DICT, in order. Two-byte operators are `0x0C00 | b1`.
fn dict_operators(data: &[u8]) -> Vec<u16> {
    let mut operators = Vec::new();
    let mut pos = 0;
    while let Some(&b0) = data.get(pos) {
        pos += match b0 {
            12 => {
                let Some(&b1) = data.get(pos + 1) else { break };
                operators.push(0x0C00 | b1 as u16);
                2
            }
            0..=21 => {
                operators.push(b0 as u16);
                1
            }
            28 => 3,
            29 => 5,
            30 => 1 + real_len(&data[pos + 1..]),
            32..=246 => 1,
            247..=254 => 2,
            255 => 5,
            _ => 1,
        };
    }
    operators
}

/// Bytes taken by a packed BCD real, up to and including the terminator nibble.
fn real_len(data: &[u8]) -> usize {
    data.iter()
        .position(|b| b >> 4 == 0xF || b & 0xF == 0xF)
        .map_or(data.len(), |i| i + 1)
}
