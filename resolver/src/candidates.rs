use crate::san::parse_algebraic;
use crate::template::Templates;
use crate::uci::parse_uci;

/// Every structural reading of `input`: UCI first, then algebraic.
///
/// No de-duplication happens here; identical moves reached through two
/// readings are collapsed after legality filtering.
pub fn parse_move_input(input: &str) -> Templates {
    let mut templates = parse_uci(input);
    templates.extend(parse_algebraic(input));
    tracing::trace!(input, count = templates.len(), "parsed move input");
    templates
}
