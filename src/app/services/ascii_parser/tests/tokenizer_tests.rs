//! Tests for line tokenization

use super::super::tokenizer::{fill_missing, sniff_delimiter, split_line};
use crate::app::models::{FileProfile, TokenizeOptions};

const KEEP_ALL: TokenizeOptions = TokenizeOptions {
    remove_empty: false,
    remove_trailing: false,
};

#[test]
fn test_delimiter_priority() {
    assert_eq!(sniff_delimiter("a;b,c\td e"), Some(';'));
    assert_eq!(sniff_delimiter("a,b\td e"), Some(','));
    assert_eq!(sniff_delimiter("a\tb c"), Some('\t'));
    assert_eq!(sniff_delimiter("a b"), Some(' '));
    assert_eq!(sniff_delimiter("abc"), None);
}

#[test]
fn test_token_count_matches_delimiter_count() {
    let cases = [
        "1;2;3;;5",
        "Year,Serial,Time,Temp",
        "a\tb\t\tc",
        "2020  100 12.30",
        "x,",
        ",",
    ];

    for line in cases {
        let delimiter = sniff_delimiter(line).unwrap();
        let expected = line.matches(delimiter).count() + 1;
        assert_eq!(
            split_line(line, KEEP_ALL).len(),
            expected,
            "token count for {:?}",
            line
        );
    }
}

#[test]
fn test_trailing_newline_stripped() {
    assert_eq!(split_line("a,b,c\n", KEEP_ALL), vec!["a", "b", "c"]);
    assert_eq!(split_line("a,b,c\r\n", KEEP_ALL), vec!["a", "b", "c"]);
}

#[test]
fn test_no_delimiter_yields_single_token() {
    assert_eq!(split_line("header\n", KEEP_ALL), vec!["header"]);
    assert!(split_line("\n", KEEP_ALL).is_empty());
    assert!(split_line("", KEEP_ALL).is_empty());
}

#[test]
fn test_remove_trailing_keeps_embedded_empties() {
    let tokens = split_line("2019-06-01 00:30:00,12.3,,0.8,,\n", FileProfile::Csv.options());
    assert_eq!(tokens, vec!["2019-06-01 00:30:00", "12.3", "", "0.8"]);
}

#[test]
fn test_remove_empty_collapses_repeated_separators() {
    let tokens = split_line("2020  100   12.30  15.2 ", FileProfile::Txt.options());
    assert_eq!(tokens, vec!["2020", "100", "12.30", "15.2"]);
}

#[test]
fn test_remove_empty_trims_tokens() {
    let options = TokenizeOptions {
        remove_empty: true,
        remove_trailing: false,
    };
    assert_eq!(split_line("a , b,, c", options), vec!["a", "b", "c"]);
}

#[test]
fn test_both_options_apply_remove_empty_last() {
    let options = TokenizeOptions {
        remove_empty: true,
        remove_trailing: true,
    };
    assert_eq!(split_line("1,,2,,", options), vec!["1", "2"]);
}

#[test]
fn test_fill_missing() {
    let tokens = fill_missing(vec!["1".into(), "".into(), "3".into()]);
    assert_eq!(tokens, vec!["1", "NaN", "3"]);
}

#[test]
fn test_source_line_unchanged() {
    let line = String::from("a;b;c\n");
    let _ = split_line(&line, KEEP_ALL);
    assert_eq!(line, "a;b;c\n");
}
