//! Square vocabulary: validation, parsing and partially specified squares.

use cozy_chess::{File, Rank, Square};

/// True iff `text` is exactly a lowercase file a-h followed by a rank 1-8.
pub fn is_valid_square(text: &str) -> bool {
    parse_square(text).is_some()
}

/// Parse a square name such as "e4". Uppercase files are rejected.
pub fn parse_square(text: &str) -> Option<Square> {
    let mut chars = text.chars();
    let file = parse_file(chars.next()?)?;
    let rank = parse_rank(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Square::new(file, rank))
}

pub fn parse_file(c: char) -> Option<File> {
    match c {
        'a' => Some(File::A),
        'b' => Some(File::B),
        'c' => Some(File::C),
        'd' => Some(File::D),
        'e' => Some(File::E),
        'f' => Some(File::F),
        'g' => Some(File::G),
        'h' => Some(File::H),
        _ => None,
    }
}

pub fn parse_rank(c: char) -> Option<Rank> {
    match c {
        '1' => Some(Rank::First),
        '2' => Some(Rank::Second),
        '3' => Some(Rank::Third),
        '4' => Some(Rank::Fourth),
        '5' => Some(Rank::Fifth),
        '6' => Some(Rank::Sixth),
        '7' => Some(Rank::Seventh),
        '8' => Some(Rank::Eighth),
        _ => None,
    }
}

pub fn file_char(file: File) -> char {
    match file {
        File::A => 'a',
        File::B => 'b',
        File::C => 'c',
        File::D => 'd',
        File::E => 'e',
        File::F => 'f',
        File::G => 'g',
        File::H => 'h',
    }
}

pub fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::First => '1',
        Rank::Second => '2',
        Rank::Third => '3',
        Rank::Fourth => '4',
        Rank::Fifth => '5',
        Rank::Sixth => '6',
        Rank::Seventh => '7',
        Rank::Eighth => '8',
    }
}

pub fn format_square(sq: Square) -> String {
    format!("{}{}", file_char(sq.file()), rank_char(sq.rank()))
}

/// First or last rank, where pawns must promote.
pub fn is_back_rank(sq: Square) -> bool {
    matches!(sq.rank(), Rank::First | Rank::Eighth)
}

/// A square whose file and/or rank may be left open.
///
/// Algebraic notation often names only part of the source square ("Nbd2",
/// "R1a3") or none of it ("e4"); the open components match any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquarePattern {
    pub file: Option<File>,
    pub rank: Option<Rank>,
}

impl SquarePattern {
    /// Matches every square.
    pub const ANY: Self = Self {
        file: None,
        rank: None,
    };

    pub fn new(file: Option<File>, rank: Option<Rank>) -> Self {
        Self { file, rank }
    }

    pub fn exact(sq: Square) -> Self {
        Self {
            file: Some(sq.file()),
            rank: Some(sq.rank()),
        }
    }

    pub fn matches(&self, sq: Square) -> bool {
        self.file.map_or(true, |file| file == sq.file())
            && self.rank.map_or(true, |rank| rank == sq.rank())
    }

    /// The concrete square, when both components are given.
    pub fn square(&self) -> Option<Square> {
        Some(Square::new(self.file?, self.rank?))
    }
}

impl From<Square> for SquarePattern {
    fn from(sq: Square) -> Self {
        Self::exact(sq)
    }
}

impl std::fmt::Display for SquarePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = self.file.map_or('.', file_char);
        let rank = self.rank.map_or('.', rank_char);
        write!(f, "{}{}", file, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_square_names() {
        assert!(is_valid_square("a1"));
        assert!(is_valid_square("h8"));
        assert!(is_valid_square("e4"));
        assert!(!is_valid_square("E4"));
        assert!(!is_valid_square("i1"));
        assert!(!is_valid_square("a9"));
        assert!(!is_valid_square("a0"));
        assert!(!is_valid_square("e44"));
        assert!(!is_valid_square("e"));
        assert!(!is_valid_square(""));
    }

    #[test]
    fn format_round_trips_every_square() {
        for sq in Square::ALL {
            assert_eq!(parse_square(&format_square(sq)), Some(sq));
        }
    }

    #[test]
    fn pattern_with_file_only_matches_whole_file() {
        let pattern = SquarePattern::new(Some(File::B), None);
        assert!(pattern.matches(Square::B1));
        assert!(pattern.matches(Square::B7));
        assert!(!pattern.matches(Square::C1));
        assert_eq!(pattern.to_string(), "b.");
    }

    #[test]
    fn any_pattern_matches_everything() {
        assert!(Square::ALL.iter().all(|sq| SquarePattern::ANY.matches(*sq)));
        assert_eq!(SquarePattern::ANY.square(), None);
        assert_eq!(SquarePattern::exact(Square::E2).square(), Some(Square::E2));
    }

    #[test]
    fn back_ranks() {
        assert!(is_back_rank(Square::E8));
        assert!(is_back_rank(Square::A1));
        assert!(!is_back_rank(Square::E7));
    }
}
