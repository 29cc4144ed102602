use std::ops::RangeInclusive;

/// Single-code-point emoji above U+186A0, grouped into contiguous runs.
///
/// Skin tone modifiers and regional indicators are left out since they do
/// not render as emoji on their own.
pub const EMOJI_RANGES: &[RangeInclusive<char>] = &[
    '\u{1F300}'..='\u{1F320}',
    '\u{1F32D}'..='\u{1F335}',
    '\u{1F337}'..='\u{1F37C}',
    '\u{1F37E}'..='\u{1F393}',
    '\u{1F3A0}'..='\u{1F3CA}',
    '\u{1F3CF}'..='\u{1F3D3}',
    '\u{1F3E0}'..='\u{1F3F0}',
    '\u{1F3F4}'..='\u{1F3F4}',
    '\u{1F3F8}'..='\u{1F3FA}',
    '\u{1F400}'..='\u{1F43E}',
    '\u{1F440}'..='\u{1F440}',
    '\u{1F442}'..='\u{1F4FC}',
    '\u{1F4FF}'..='\u{1F53D}',
    '\u{1F54B}'..='\u{1F54E}',
    '\u{1F550}'..='\u{1F567}',
    '\u{1F57A}'..='\u{1F57A}',
    '\u{1F595}'..='\u{1F596}',
    '\u{1F5A4}'..='\u{1F5A4}',
    '\u{1F5FB}'..='\u{1F64F}',
    '\u{1F680}'..='\u{1F6C5}',
    '\u{1F6CC}'..='\u{1F6CC}',
    '\u{1F6D0}'..='\u{1F6D2}',
    '\u{1F6D5}'..='\u{1F6D7}',
    '\u{1F6EB}'..='\u{1F6EC}',
    '\u{1F6F4}'..='\u{1F6FC}',
    '\u{1F7E0}'..='\u{1F7EB}',
    '\u{1F90C}'..='\u{1F93A}',
    '\u{1F93C}'..='\u{1F945}',
    '\u{1F947}'..='\u{1F9FF}',
    '\u{1FA70}'..='\u{1FA7C}',
    '\u{1FA80}'..='\u{1FA88}',
    '\u{1FA90}'..='\u{1FABD}',
    '\u{1FABF}'..='\u{1FAC5}',
    '\u{1FACE}'..='\u{1FADB}',
    '\u{1FAE0}'..='\u{1FAE8}',
    '\u{1FAF0}'..='\u{1FAF8}',
];

pub(crate) fn total() -> u32 {
    EMOJI_RANGES.iter().map(range_len).sum()
}

/// The `index`-th emoji across all ranges; indexes past the end wrap around.
pub(crate) fn nth(index: u32) -> char {
    let mut remaining = index % total();
    for range in EMOJI_RANGES {
        let len = range_len(range);
        if remaining < len {
            return char::from_u32(*range.start() as u32 + remaining).unwrap_or(*range.start());
        }
        remaining -= len;
    }
    *EMOJI_RANGES[0].start()
}

/// True when `emoji` is one of the characters the generator can produce.
pub fn contains(emoji: char) -> bool {
    EMOJI_RANGES.iter().any(|range| range.contains(&emoji))
}

fn range_len(range: &RangeInclusive<char>) -> u32 {
    *range.end() as u32 - *range.start() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_sorted_disjoint_and_above_threshold() {
        for pair in EMOJI_RANGES.windows(2) {
            assert!(pair[0].end() < pair[1].start(), "{pair:?}");
        }
        assert!(EMOJI_RANGES.iter().all(|r| *r.start() as u32 > 100_000));
    }

    #[test]
    fn nth_walks_every_entry_once() {
        let all: Vec<char> = (0..total()).map(nth).collect();
        assert_eq!(all.first(), Some(&'\u{1F300}'));
        assert_eq!(all.last(), Some(&'\u{1FAF8}'));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.iter().all(|c| contains(*c)));
    }
}
