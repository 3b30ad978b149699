//! The Bytewords alphabet: 256 four-letter words, indexed 0-255, with
//! the invariant that every word's "minimal" 2-char code (first + last
//! letter) is unique across the table. Used to render arbitrary bytes
//! as human-typable, voice-survivable text.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// The three textual renderings of a byte string as bytewords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Full words joined by a single space.
    Standard,
    /// Full words joined by a hyphen, for use inside a `ur:` URI.
    Uri,
    /// Concatenated 2-char minimal codes, no separator.
    Minimal,
}

pub const BYTEWORDS: [&str; 256] = [
    "able", "acid", "also", "apex", "aqua", "arch", "atom", "aunt",
    "away", "axis", "back", "bald", "barn", "belt", "beta", "bias",
    "blue", "body", "brag", "brew", "bulb", "buzz", "calm", "cash",
    "cats", "chef", "city", "claw", "code", "cola", "cook", "cost",
    "crux", "curl", "cusp", "cyan", "dark", "data", "days", "deli",
    "dice", "diet", "door", "down", "draw", "drop", "drum", "dull",
    "duty", "each", "easy", "echo", "edge", "epic", "even", "exam",
    "exit", "eyes", "face", "fact", "fair", "fern", "figs", "film",
    "fish", "fizz", "flap", "flew", "flux", "foxy", "frog", "fuel",
    "fund", "gala", "game", "gear", "gems", "gift", "girl", "glow",
    "good", "gray", "grim", "guru", "gush", "gyro", "half", "hang",
    "hard", "hawk", "heat", "help", "high", "hill", "holy", "hope",
    "horn", "huts", "iced", "idea", "idle", "inch", "inky", "into",
    "iris", "iron", "item", "jade", "jazz", "join", "jolt", "jowl",
    "judo", "jugs", "jump", "junk", "jury", "keep", "keno", "kept",
    "keys", "kick", "kiln", "king", "kite", "kiwi", "knob", "lamb",
    "lava", "lazy", "leaf", "legs", "liar", "limp", "lion", "list",
    "logo", "loud", "love", "luau", "luck", "lung", "main", "many",
    "math", "maze", "memo", "menu", "meow", "mild", "mint", "miss",
    "monk", "nail", "navy", "need", "next", "noon", "note", "numb",
    "obey", "oboe", "omit", "onyx", "open", "oval", "owls", "paid",
    "part", "peck", "play", "plus", "poem", "pool", "pose", "puff",
    "puma", "purr", "quad", "quiz", "race", "ramp", "real", "redo",
    "rich", "road", "rock", "roof", "ruby", "ruin", "runs", "rust",
    "safe", "saga", "scar", "sets", "silk", "skew", "slot", "soap",
    "solo", "song", "stub", "surf", "swan", "taco", "task", "taxi",
    "tent", "tied", "time", "tiny", "toil", "toys", "trip", "tuna",
    "twin", "ugly", "undo", "unit", "urge", "user", "vast", "very",
    "veto", "vial", "vibe", "view", "visa", "void", "vows", "wall",
    "wand", "warm", "wasp", "wave", "waxy", "webs", "what", "when",
    "whiz", "wolf", "work", "yank", "yawn", "yell", "yoga", "yurt",
    "zaps", "zero", "zinc", "zone", "zoom", "dash", "babi", "babo",
];

fn word_index() -> &'static HashMap<&'static str, u8> {
    static INDEX: OnceLock<HashMap<&'static str, u8>> = OnceLock::new();
    INDEX.get_or_init(|| BYTEWORDS.iter().enumerate().map(|(i, w)| (*w, i as u8)).collect())
}

fn minimal_index() -> &'static HashMap<&'static str, u8> {
    static INDEX: OnceLock<HashMap<&'static str, u8>> = OnceLock::new();
    INDEX.get_or_init(|| {
        BYTEWORDS
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let mut chars = w.chars();
                let first = chars.next().unwrap();
                let last = chars.next_back().unwrap();
                let code: String = [first, last].iter().collect();
                (Box::leak(code.into_boxed_str()) as &'static str, i as u8)
            })
            .collect()
    })
}

pub(crate) fn crc32(data: &[u8]) -> u32 {
    const CRC_32_ISO_HDLC: crc::Algorithm<u32> = crc::CRC_32_ISO_HDLC;
    crc::Crc::<u32>::new(&CRC_32_ISO_HDLC).checksum(data)
}

/// Appends the CRC-32 (big-endian) of `payload` and renders the whole
/// thing as bytewords in the given style.
pub fn encode(payload: &[u8], style: Style) -> String {
    let mut framed = Vec::with_capacity(payload.len() + 4);
    framed.extend_from_slice(payload);
    framed.extend_from_slice(&crc32(payload).to_be_bytes());
    match style {
        Style::Standard => framed.iter().map(|b| BYTEWORDS[*b as usize]).collect::<Vec<_>>().join(" "),
        Style::Uri => framed.iter().map(|b| BYTEWORDS[*b as usize]).collect::<Vec<_>>().join("-"),
        Style::Minimal => {
            let mut out = String::with_capacity(framed.len() * 2);
            for b in &framed {
                let w = BYTEWORDS[*b as usize];
                out.push(w.chars().next().unwrap());
                out.push(w.chars().next_back().unwrap());
            }
            out
        }
    }
}

/// Decodes bytewords text (case-insensitive) back to bytes, verifying
/// and stripping the trailing CRC-32.
pub fn decode(text: &str, style: Style) -> Result<Vec<u8>> {
    let lower = text.to_lowercase();
    let bytes = match style {
        Style::Standard => decode_words(lower.split(' '))?,
        Style::Uri => decode_words(lower.split('-'))?,
        Style::Minimal => decode_minimal(&lower)?,
    };
    if bytes.len() < 4 {
        return Err(Error::BytewordsChecksum);
    }
    let (payload, crc_bytes) = bytes.split_at(bytes.len() - 4);
    let want = u32::from_be_bytes(crc_bytes.try_into().unwrap());
    if crc32(payload) != want {
        return Err(Error::BytewordsChecksum);
    }
    Ok(payload.to_vec())
}

fn decode_words<'a>(words: impl Iterator<Item = &'a str>) -> Result<Vec<u8>> {
    let index = word_index();
    words
        .filter(|w| !w.is_empty())
        .map(|w| index.get(w).copied().ok_or(Error::BytewordsUnknownWord))
        .collect()
}

fn decode_minimal(text: &str) -> Result<Vec<u8>> {
    if text.len() % 2 != 0 {
        return Err(Error::BytewordsUnknownWord);
    }
    let index = minimal_index();
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(2)
        .map(|pair| {
            let code: String = pair.iter().collect();
            index.get(code.as_str()).copied().ok_or(Error::BytewordsUnknownWord)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_invariants_hold() {
        let mut words = BYTEWORDS.to_vec();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), 256);

        let mut codes: Vec<String> = BYTEWORDS
            .iter()
            .map(|w| {
                let mut chars = w.chars();
                let first = chars.next().unwrap();
                let last = chars.next_back().unwrap();
                [first, last].iter().collect()
            })
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 256);
    }

    #[test]
    fn round_trips_through_every_style() {
        let payload = b"hello gordian";
        for style in [Style::Standard, Style::Uri, Style::Minimal] {
            let encoded = encode(payload, style);
            let decoded = decode(&encoded, style).unwrap();
            assert_eq!(decoded, payload);
        }
    }

    #[test]
    fn decode_is_case_insensitive() {
        let payload = b"CASE";
        let encoded = encode(payload, Style::Standard).to_uppercase();
        assert_eq!(decode(&encoded, Style::Standard).unwrap(), payload);
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let mut encoded = encode(b"abc", Style::Minimal);
        encoded.replace_range(0..2, "zz");
        match decode(&encoded, Style::Minimal) {
            Err(Error::BytewordsUnknownWord) | Err(Error::BytewordsChecksum) => {}
            other => panic!("expected a bytewords error, got {other:?}"),
        }
    }
}
