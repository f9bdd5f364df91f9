//! Code 128 symbology: character validation, code set B encoding and the
//! module run-lengths a renderer needs to draw the bars.
//!
//! Only code set B is produced. Its value range covers exactly the printable
//! ASCII characters (0x20..=0x7E), which is the supported identifier charset.
//! The tables below are the standard ISO/IEC 15417 element widths: each
//! symbol is six elements (three bars, three spaces, alternating, bar first)
//! summing to eleven modules; the stop symbol carries a seventh element.

/// Element widths for symbol values 0..=105 (0..=102 data, 103..=105 start codes).
const PATTERNS: [[u8; 6]; 106] = [
    [2, 1, 2, 2, 2, 2],
    [2, 2, 2, 1, 2, 2],
    [2, 2, 2, 2, 2, 1],
    [1, 2, 1, 2, 2, 3],
    [1, 2, 1, 3, 2, 2],
    [1, 3, 1, 2, 2, 2],
    [1, 2, 2, 2, 1, 3],
    [1, 2, 2, 3, 1, 2],
    [1, 3, 2, 2, 1, 2],
    [2, 2, 1, 2, 1, 3],
    [2, 2, 1, 3, 1, 2],
    [2, 3, 1, 2, 1, 2],
    [1, 1, 2, 2, 3, 2],
    [1, 2, 2, 1, 3, 2],
    [1, 2, 2, 2, 3, 1],
    [1, 1, 3, 2, 2, 2],
    [1, 2, 3, 1, 2, 2],
    [1, 2, 3, 2, 2, 1],
    [2, 2, 3, 2, 1, 1],
    [2, 2, 1, 1, 3, 2],
    [2, 2, 1, 2, 3, 1],
    [2, 1, 3, 2, 1, 2],
    [2, 2, 3, 1, 1, 2],
    [3, 1, 2, 1, 3, 1],
    [3, 1, 1, 2, 2, 2],
    [3, 2, 1, 1, 2, 2],
    [3, 2, 1, 2, 2, 1],
    [3, 1, 2, 2, 1, 2],
    [3, 2, 2, 1, 1, 2],
    [3, 2, 2, 2, 1, 1],
    [2, 1, 2, 1, 2, 3],
    [2, 1, 2, 3, 2, 1],
    [2, 3, 2, 1, 2, 1],
    [1, 1, 1, 3, 2, 3],
    [1, 3, 1, 1, 2, 3],
    [1, 3, 1, 3, 2, 1],
    [1, 1, 2, 3, 1, 3],
    [1, 3, 2, 1, 1, 3],
    [1, 3, 2, 3, 1, 1],
    [2, 1, 1, 3, 1, 3],
    [2, 3, 1, 1, 1, 3],
    [2, 3, 1, 3, 1, 1],
    [1, 1, 2, 1, 3, 3],
    [1, 1, 2, 3, 3, 1],
    [1, 3, 2, 1, 3, 1],
    [1, 1, 3, 1, 2, 3],
    [1, 1, 3, 3, 2, 1],
    [1, 3, 3, 1, 2, 1],
    [3, 1, 3, 1, 2, 1],
    [2, 1, 1, 3, 3, 1],
    [2, 3, 1, 1, 3, 1],
    [2, 1, 3, 1, 1, 3],
    [2, 1, 3, 3, 1, 1],
    [2, 1, 3, 1, 3, 1],
    [3, 1, 1, 1, 2, 3],
    [3, 1, 1, 3, 2, 1],
    [3, 3, 1, 1, 2, 1],
    [3, 1, 2, 1, 1, 3],
    [3, 1, 2, 3, 1, 1],
    [3, 3, 2, 1, 1, 1],
    [3, 1, 4, 1, 1, 1],
    [2, 2, 1, 4, 1, 1],
    [4, 3, 1, 1, 1, 1],
    [1, 1, 1, 2, 2, 4],
    [1, 1, 1, 4, 2, 2],
    [1, 2, 1, 1, 2, 4],
    [1, 2, 1, 4, 2, 1],
    [1, 4, 1, 1, 2, 2],
    [1, 4, 1, 2, 2, 1],
    [1, 1, 2, 2, 1, 4],
    [1, 1, 2, 4, 1, 2],
    [1, 2, 2, 1, 1, 4],
    [1, 2, 2, 4, 1, 1],
    [1, 4, 2, 1, 1, 2],
    [1, 4, 2, 2, 1, 1],
    [2, 4, 1, 2, 1, 1],
    [2, 2, 1, 1, 1, 4],
    [4, 1, 3, 1, 1, 1],
    [2, 4, 1, 1, 1, 2],
    [1, 3, 4, 1, 1, 1],
    [1, 1, 1, 2, 4, 2],
    [1, 2, 1, 1, 4, 2],
    [1, 2, 1, 2, 4, 1],
    [1, 1, 4, 2, 1, 2],
    [1, 2, 4, 1, 1, 2],
    [1, 2, 4, 2, 1, 1],
    [4, 1, 1, 2, 1, 2],
    [4, 2, 1, 1, 1, 2],
    [4, 2, 1, 2, 1, 1],
    [2, 1, 2, 1, 4, 1],
    [2, 1, 4, 1, 2, 1],
    [4, 1, 2, 1, 2, 1],
    [1, 1, 1, 1, 4, 3],
    [1, 1, 1, 3, 4, 1],
    [1, 3, 1, 1, 4, 1],
    [1, 1, 4, 1, 1, 3],
    [1, 1, 4, 3, 1, 1],
    [4, 1, 1, 1, 1, 3],
    [4, 1, 1, 3, 1, 1],
    [1, 1, 3, 1, 4, 1],
    [1, 1, 4, 1, 3, 1],
    [3, 1, 1, 1, 4, 1],
    [4, 1, 1, 1, 3, 1],
    [2, 1, 1, 4, 1, 2],
    [2, 1, 1, 2, 1, 4],
    [2, 1, 1, 2, 3, 2],
];

/// Stop symbol including the two-module termination bar.
const STOP: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];

const START_B: usize = 104;

/// Symbol value of `ch` in code set B, if representable.
fn symbol_value(ch: char) -> Option<usize> {
    if ch.is_ascii() && (' '..='\x7e').contains(&ch) {
        Some(ch as usize - 32)
    } else {
        None
    }
}

/// Whether `identifier` is non-empty and fully representable in code set B.
pub fn is_supported(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.chars().all(|ch| symbol_value(ch).is_some())
}

/// Encodes `identifier` into alternating module run-lengths, starting with a
/// bar: start B, the payload symbols, the mod-103 check symbol and the stop
/// pattern. Returns `None` when the identifier is empty or contains a
/// character outside code set B.
pub fn module_runs(identifier: &str) -> Option<Vec<u8>> {
    if identifier.is_empty() {
        return None;
    }
    let mut checksum = START_B;
    let mut runs = Vec::with_capacity(6 * (identifier.len() + 2) + 7);
    runs.extend_from_slice(&PATTERNS[START_B]);
    for (position, ch) in identifier.chars().enumerate() {
        let value = symbol_value(ch)?;
        checksum += value * (position + 1);
        runs.extend_from_slice(&PATTERNS[value]);
    }
    runs.extend_from_slice(&PATTERNS[checksum % 103]);
    runs.extend_from_slice(&STOP);
    Some(runs)
}

/// Total module count of an encoded identifier of `len` payload symbols:
/// start + payload + check at eleven modules each, stop at thirteen.
pub fn total_modules(len: usize) -> usize {
    11 * (len + 2) + 13
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_spans_eleven_modules() {
        for pattern in &PATTERNS {
            assert_eq!(pattern.iter().map(|&w| w as usize).sum::<usize>(), 11);
        }
        assert_eq!(STOP.iter().map(|&w| w as usize).sum::<usize>(), 13);
    }

    #[test]
    fn single_character_checksum() {
        // "A" is value 33 in code set B; check symbol is (104 + 33) % 103 = 34.
        let runs = module_runs("A").expect("A is encodable");
        assert_eq!(runs.len(), 6 * 3 + 7);
        assert_eq!(&runs[..6], &PATTERNS[START_B]);
        assert_eq!(&runs[6..12], &PATTERNS[33]);
        assert_eq!(&runs[12..18], &PATTERNS[34]);
        assert_eq!(&runs[18..], &STOP);
    }

    #[test]
    fn module_count_matches_formula() {
        let runs = module_runs("A100").expect("A100 is encodable");
        let modules: usize = runs.iter().map(|&w| w as usize).sum();
        assert_eq!(modules, total_modules(4));
    }

    #[test]
    fn rejects_unsupported_input() {
        assert!(!is_supported(""));
        assert!(!is_supported("café"));
        assert!(!is_supported("tab\there"));
        assert!(module_runs("").is_none());
        assert!(module_runs("né").is_none());
        assert!(is_supported("A-100/b_2 X"));
    }
}
