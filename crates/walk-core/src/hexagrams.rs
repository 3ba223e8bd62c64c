//! Static hexagram and trigram reference data.
//!
//! Keys are six-bit strings with the bottom line first. The engine only
//! compares keys; names exist for display collaborators.

/// One of the eight trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigram {
    Heaven,
    Earth,
    Thunder,
    Water,
    Mountain,
    Wind,
    Fire,
    Lake,
}

impl Trigram {
    pub const ALL: [Trigram; 8] = [
        Trigram::Heaven,
        Trigram::Earth,
        Trigram::Thunder,
        Trigram::Water,
        Trigram::Mountain,
        Trigram::Wind,
        Trigram::Fire,
        Trigram::Lake,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Trigram::Heaven => "Heaven",
            Trigram::Earth => "Earth",
            Trigram::Thunder => "Thunder",
            Trigram::Water => "Water",
            Trigram::Mountain => "Mountain",
            Trigram::Wind => "Wind",
            Trigram::Fire => "Fire",
            Trigram::Lake => "Lake",
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            Trigram::Heaven => "乾",
            Trigram::Earth => "坤",
            Trigram::Thunder => "震",
            Trigram::Water => "坎",
            Trigram::Mountain => "艮",
            Trigram::Wind => "巽",
            Trigram::Fire => "離",
            Trigram::Lake => "兌",
        }
    }

    /// Three-bit key, bottom line first.
    pub fn binary(self) -> &'static str {
        match self {
            Trigram::Heaven => "111",
            Trigram::Earth => "000",
            Trigram::Thunder => "100",
            Trigram::Water => "010",
            Trigram::Mountain => "001",
            Trigram::Wind => "011",
            Trigram::Fire => "101",
            Trigram::Lake => "110",
        }
    }
}

/// Reference entry for one hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hexagram {
    /// King Wen number
    pub number: u8,
    pub name: &'static str,
    pub chinese: &'static str,
    /// Six-bit key, bottom line first
    pub binary: &'static str,
    pub lower: Trigram,
    pub upper: Trigram,
}

const fn hexagram(
    number: u8,
    name: &'static str,
    chinese: &'static str,
    binary: &'static str,
    lower: Trigram,
    upper: Trigram,
) -> Hexagram {
    Hexagram {
        number,
        name,
        chinese,
        binary,
        lower,
        upper,
    }
}

use Trigram::{Earth, Fire, Heaven, Lake, Mountain, Thunder, Water, Wind};

/// The 64 hexagrams in King Wen order.
pub const HEXAGRAMS: [Hexagram; 64] = [
    hexagram(1, "Force", "乾", "111111", Heaven, Heaven),
    hexagram(2, "Field", "坤", "000000", Earth, Earth),
    hexagram(3, "Sprouting", "屯", "100010", Thunder, Water),
    hexagram(4, "Enveloping", "蒙", "010001", Water, Mountain),
    hexagram(5, "Attending", "需", "111010", Heaven, Water),
    hexagram(6, "Arguing", "訟", "010111", Water, Heaven),
    hexagram(7, "Leading", "師", "010000", Water, Earth),
    hexagram(8, "Grouping", "比", "000010", Earth, Water),
    hexagram(9, "Small Accumulating", "小畜", "111011", Heaven, Wind),
    hexagram(10, "Treading", "履", "110111", Lake, Heaven),
    hexagram(11, "Pervading", "泰", "111000", Heaven, Earth),
    hexagram(12, "Obstruction", "否", "000111", Earth, Heaven),
    hexagram(13, "Concording People", "同人", "101111", Fire, Heaven),
    hexagram(14, "Great Possessing", "大有", "111101", Heaven, Fire),
    hexagram(15, "Humbling", "謙", "001000", Mountain, Earth),
    hexagram(16, "Providing-For", "豫", "000100", Earth, Thunder),
    hexagram(17, "Following", "隨", "100110", Thunder, Lake),
    hexagram(18, "Corrupting", "蠱", "011001", Wind, Mountain),
    hexagram(19, "Nearing", "臨", "110000", Lake, Earth),
    hexagram(20, "Viewing", "觀", "000011", Earth, Wind),
    hexagram(21, "Gnawing Bite", "噬嗑", "100101", Thunder, Fire),
    hexagram(22, "Adorning", "賁", "101001", Fire, Mountain),
    hexagram(23, "Stripping", "剝", "000001", Earth, Mountain),
    hexagram(24, "Returning", "復", "100000", Thunder, Earth),
    hexagram(25, "Without Embroiling", "無妄", "100111", Thunder, Heaven),
    hexagram(26, "Great Accumulating", "大畜", "111001", Heaven, Mountain),
    hexagram(27, "Swallowing", "頤", "100001", Thunder, Mountain),
    hexagram(28, "Great Exceeding", "大過", "011110", Wind, Lake),
    hexagram(29, "Gorge", "坎", "010010", Water, Water),
    hexagram(30, "Radiance", "離", "101101", Fire, Fire),
    hexagram(31, "Conjoining", "咸", "001110", Mountain, Lake),
    hexagram(32, "Persevering", "恆", "011100", Wind, Thunder),
    hexagram(33, "Retiring", "遯", "001111", Mountain, Heaven),
    hexagram(34, "Great Invigorating", "大壯", "111100", Heaven, Thunder),
    hexagram(35, "Prospering", "晉", "000101", Earth, Fire),
    hexagram(36, "Brightness Hiding", "明夷", "101000", Fire, Earth),
    hexagram(37, "Dwelling People", "家人", "101011", Fire, Wind),
    hexagram(38, "Polarising", "睽", "110101", Lake, Fire),
    hexagram(39, "Limping", "蹇", "001010", Mountain, Water),
    hexagram(40, "Taking-Apart", "解", "010100", Water, Thunder),
    hexagram(41, "Diminishing", "損", "110001", Lake, Mountain),
    hexagram(42, "Augmenting", "益", "100011", Thunder, Wind),
    hexagram(43, "Parting", "夬", "111110", Heaven, Lake),
    hexagram(44, "Coupling", "姤", "011111", Wind, Heaven),
    hexagram(45, "Clustering", "萃", "000110", Earth, Lake),
    hexagram(46, "Ascending", "升", "011000", Wind, Earth),
    hexagram(47, "Confining", "困", "010110", Water, Lake),
    hexagram(48, "Welling", "井", "011010", Wind, Water),
    hexagram(49, "Skinning", "革", "101110", Fire, Lake),
    hexagram(50, "Holding", "鼎", "011101", Wind, Fire),
    hexagram(51, "Shake", "震", "100100", Thunder, Thunder),
    hexagram(52, "Bound", "艮", "001001", Mountain, Mountain),
    hexagram(53, "Infiltrating", "漸", "001011", Mountain, Wind),
    hexagram(54, "Converting The Maiden", "歸妹", "110100", Lake, Thunder),
    hexagram(55, "Abounding", "豐", "101100", Fire, Thunder),
    hexagram(56, "Sojourning", "旅", "001101", Mountain, Fire),
    hexagram(57, "Ground", "巽", "011011", Wind, Wind),
    hexagram(58, "Open", "兌", "110110", Lake, Lake),
    hexagram(59, "Dispersing", "渙", "010011", Water, Wind),
    hexagram(60, "Articulating", "節", "110010", Lake, Water),
    hexagram(61, "Centre Confirming", "中孚", "110011", Lake, Wind),
    hexagram(62, "Small Exceeding", "小過", "001100", Mountain, Thunder),
    hexagram(63, "Already Fording", "既濟", "101010", Fire, Water),
    hexagram(64, "Not-Yet Fording", "未濟", "010101", Water, Fire),
];

/// Looks up a hexagram by its six-bit key.
pub fn by_binary(binary: &str) -> Option<&'static Hexagram> {
    HEXAGRAMS.iter().find(|h| h.binary == binary)
}

/// Looks up a hexagram by King Wen number.
pub fn by_number(number: u8) -> Option<&'static Hexagram> {
    HEXAGRAMS.iter().find(|h| h.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_64_distinct_keys() {
        let keys: HashSet<&str> = HEXAGRAMS.iter().map(|h| h.binary).collect();
        assert_eq!(keys.len(), 64);
        for hexagram in &HEXAGRAMS {
            assert_eq!(hexagram.binary.len(), 6);
            assert!(hexagram.binary.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn test_numbers_cover_king_wen_order() {
        for (i, hexagram) in HEXAGRAMS.iter().enumerate() {
            assert_eq!(hexagram.number as usize, i + 1);
        }
    }

    #[test]
    fn test_binary_halves_match_trigram_pair() {
        for hexagram in &HEXAGRAMS {
            assert_eq!(
                &hexagram.binary[0..3],
                hexagram.lower.binary(),
                "lower trigram mismatch for hexagram {}",
                hexagram.number
            );
            assert_eq!(
                &hexagram.binary[3..6],
                hexagram.upper.binary(),
                "upper trigram mismatch for hexagram {}",
                hexagram.number
            );
        }
    }

    #[test]
    fn test_lookup_by_binary() {
        let force = by_binary("111111").unwrap();
        assert_eq!(force.number, 1);
        assert_eq!(force.name, "Force");

        let pervading = by_binary("111000").unwrap();
        assert_eq!(pervading.number, 11);

        assert!(by_binary("101").is_none());
    }

    #[test]
    fn test_lookup_by_number() {
        assert_eq!(by_number(64).unwrap().name, "Not-Yet Fording");
        assert!(by_number(65).is_none());
    }

    #[test]
    fn test_trigram_binaries_are_distinct() {
        let keys: HashSet<&str> = Trigram::ALL.iter().map(|t| t.binary()).collect();
        assert_eq!(keys.len(), 8);
    }
}
