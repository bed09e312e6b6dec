//! UI helper functions for terminal output formatting.

use std::io::Write;

use suited_engine::cards::Card;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Space-separated short notation, e.g. `As Kd 7c`.
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use suited_engine::cards::parse_cards;

    #[test]
    fn formats_cards_in_short_notation() {
        let cards = parse_cards("As,Td 7c").unwrap();
        assert_eq!(format_cards(&cards), "As Td 7c");
        assert_eq!(format_cards(&[]), "");
    }

    #[test]
    fn prefixes_errors_and_warnings() {
        let mut buf = Vec::new();
        write_error(&mut buf, "boom").unwrap();
        display_warning(&mut buf, "careful").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error: boom\nWARNING: careful\n");
    }
}
