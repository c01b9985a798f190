//! Algebraic notation: castling, pawn moves and piece moves.
//!
//! Each grammar is a separate function with no knowledge of the board.
//! [`parse_algebraic`] runs all of them and keeps every match, since a string
//! such as "bc4" is both a pawn capture and a bishop move until the position
//! says otherwise.

use cozy_chess::Square;

use crate::template::{MoveTemplate, Templates};
use crate::types::PieceKind;
use crate::vocab::{parse_file, parse_rank, SquarePattern};

/// Parse algebraic notation into every structural reading it admits.
///
/// Bare coordinate input ("e2e4", "e7e8q") is left to the UCI parser and
/// yields nothing here.
pub fn parse_algebraic(input: &str) -> Templates {
    if is_bare_coordinates(input) {
        return Templates::new();
    }

    let text: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();

    let mut templates = Templates::new();
    templates.extend(parse_castling(&text));
    templates.extend(parse_pawn(&text));
    templates.extend(parse_piece(&text));
    templates
}

/// `[a-h][1-8][a-h][1-8][rqknb]?`, ignoring surrounding whitespace.
fn is_bare_coordinates(input: &str) -> bool {
    let chars: Vec<char> = input.trim().chars().collect();
    let squares_ok = chars.len() >= 4
        && parse_file(chars[0]).is_some()
        && parse_rank(chars[1]).is_some()
        && parse_file(chars[2]).is_some()
        && parse_rank(chars[3]).is_some();

    match chars.len() {
        4 => squares_ok,
        5 => squares_ok && matches!(chars[4], 'r' | 'q' | 'k' | 'n' | 'b'),
        _ => false,
    }
}

/// Castling shorthand: "O-O", "0-0", "o-o-o".
///
/// The side to move is unknown here, so both kings' paths are produced and
/// the legality check picks the right one.
pub fn parse_castling(text: &str) -> Templates {
    let longest_run = text
        .chars()
        .fold((0usize, 0usize), |(longest, run), c| {
            if matches!(c, 'o' | 'O' | '0') {
                (longest.max(run + 1), run + 1)
            } else {
                (longest, 0)
            }
        })
        .0;

    let (white_to, black_to) = match longest_run {
        0 | 1 => return Templates::new(),
        2 => (Square::G1, Square::G8),
        _ => (Square::C1, Square::C8),
    };

    let mut templates = Templates::new();
    templates.push(MoveTemplate::new(
        PieceKind::King,
        SquarePattern::exact(Square::E1),
        white_to,
    ));
    templates.push(MoveTemplate::new(
        PieceKind::King,
        SquarePattern::exact(Square::E8),
        black_to,
    ));
    templates
}

/// Pawn moves: `[file]? [x]? file rank (e.p.)? (=piece)? [+#]?`.
///
/// A source file equal to the destination file ("bb4") is discarded so that
/// it cannot compete with the bishop reading of the same text.
pub fn parse_pawn(text: &str) -> Option<MoveTemplate> {
    if !text.is_ascii() {
        return None;
    }
    let body = strip_check_marker(text);

    let (body, promotion) = match body.len().checked_sub(2).map(|i| body.split_at(i)) {
        Some((rest, suffix)) if suffix.starts_with('=') => {
            let letter = suffix.chars().nth(1)?;
            (rest, Some(PieceKind::from_promotion_char(letter)?))
        }
        _ => (body, None),
    };

    let body = strip_en_passant_marker(body);
    let (prefix, to) = split_destination(body)?;
    let prefix = prefix.strip_suffix('x').unwrap_or(prefix);

    let from_file = match prefix.len() {
        0 => None,
        1 => Some(parse_file(prefix.chars().next()?)?),
        _ => return None,
    };

    if from_file == Some(to.file()) {
        return None;
    }

    Some(
        MoveTemplate::new(PieceKind::Pawn, SquarePattern::new(from_file, None), to)
            .with_promotion(promotion),
    )
}

/// Piece moves: `letter [file]? [rank]? [x]? file rank [+#]?`.
pub fn parse_piece(text: &str) -> Option<MoveTemplate> {
    if !text.is_ascii() {
        return None;
    }
    let body = strip_check_marker(text);

    let mut chars = body.chars();
    let piece = PieceKind::from_piece_letter(chars.next()?)?;
    let (prefix, to) = split_destination(chars.as_str())?;
    let prefix = prefix.strip_suffix('x').unwrap_or(prefix);

    let mut disambiguation = prefix.chars().peekable();
    let file = disambiguation.next_if(|c| parse_file(*c).is_some()).and_then(parse_file);
    let rank = disambiguation.next_if(|c| parse_rank(*c).is_some()).and_then(parse_rank);
    if disambiguation.next().is_some() {
        return None;
    }

    Some(MoveTemplate::new(piece, SquarePattern::new(file, rank), to))
}

fn strip_check_marker(text: &str) -> &str {
    text.strip_suffix(&['+', '#'][..]).unwrap_or(text)
}

/// Drop a trailing en-passant marker ("ep", "e.p", "ep.", "e.p."); it adds
/// nothing the board does not already know.
fn strip_en_passant_marker(text: &str) -> &str {
    ["e.p.", "e.p", "ep.", "ep"]
        .iter()
        .find_map(|marker| text.strip_suffix(*marker))
        .unwrap_or(text)
}

/// Split off the trailing destination square.
fn split_destination(text: &str) -> Option<(&str, Square)> {
    let split = text.len().checked_sub(2)?;
    let (prefix, square) = text.split_at(split);
    let mut chars = square.chars();
    let file = parse_file(chars.next()?)?;
    let rank = parse_rank(chars.next()?)?;
    Some((prefix, Square::new(file, rank)))
}
