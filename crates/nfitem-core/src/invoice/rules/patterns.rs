//! Common regex patterns for Brazilian fiscal note extraction.
//!
//! The `regex` crate runs in linear time, so none of these can backtrack
//! catastrophically on long lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Brazilian amount: 1.234,56 / 0,50. No boundary on either side, so
    // "2,500" yields "2,50".
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}"
    ).unwrap();

    // A standalone run of digits (codes, NCM, CFOP, line numbers).
    pub static ref STANDALONE_DIGITS: Regex = Regex::new(
        r"\b\d+\b"
    ).unwrap();

    // Runs of spaces and tabs inside a line.
    pub static ref INLINE_BLANKS: Regex = Regex::new(
        r"[ \t]+"
    ).unwrap();

    // Fiscal note number: "N. 000.123.456 SÉRIE 1"
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)N\.\s*([\d\.]+)\s*SÉRIE"
    ).unwrap();

    // Branch: "FIL 12" or "FILIAL 012"
    pub static ref BRANCH: Regex = Regex::new(
        r"(?i)FIL(?:IAL)?\s*(\d{1,3})"
    ).unwrap();

    // Freight amount in the transport block.
    pub static ref FREIGHT: Regex = Regex::new(
        r"(?i)VALOR DO FRETE\s+([0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2})"
    ).unwrap();
}

/// Build a whole-word matcher for one unit token.
pub fn unit_token_pattern(token: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(token)))
}

/// Build the matcher for the text between two section headers.
///
/// Case-insensitive, `.` spans lines, greedy: first `start` to last `end`.
pub fn section_pattern(start: &str, end: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?is){}(.*){}",
        regex::escape(start),
        regex::escape(end)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_pattern_has_no_trailing_boundary() {
        let found: Vec<&str> = AMOUNT_PATTERN
            .find_iter("2,500 KG 1.234,56 x")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["2,50", "1.234,56"]);
    }

    #[test]
    fn test_unit_token_pattern_is_whole_word() {
        let re = unit_token_pattern("UN").unwrap();
        assert!(re.is_match("10 UN 5,00"));
        assert!(!re.is_match("UNIDADE"));
        assert!(!re.is_match("30UND"));
    }

    #[test]
    fn test_section_pattern() {
        let re = section_pattern("DADOS DOS PRODUTOS/SERVIÇOS", "ICMS RETIDO").unwrap();
        let text = "cab\ndados dos produtos/serviços\nA\nB\nICMS RETIDO x ICMS RETIDO";
        let caps = re.captures(text).unwrap();
        assert_eq!(&caps[1], "\nA\nB\nICMS RETIDO x ");
    }
}
