use super::*;

fn kinds_and_text(source: &str) -> Vec<(TokenKind, String)> {
    Scanner::new(source)
        .scan_all()
        .expect("scan")
        .into_iter()
        .map(|token| (token.kind, token.text))
        .collect()
}

#[test]
fn test_scan_import_declaration() {
    let tokens = kinds_and_text("import { FOO as BAR } from 'my-app/flags';");
    let texts: Vec<&str> = tokens.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["import", "{", "FOO", "as", "BAR", "}", "from", "my-app/flags", ";", ""]
    );
    assert_eq!(tokens[7].0, TokenKind::StringLiteral);
    assert_eq!(tokens.last().map(|(kind, _)| *kind), Some(TokenKind::EndOfFile));
}

#[test]
fn test_scan_prefers_longest_punctuator() {
    let tokens = kinds_and_text("a !== b && c => d");
    let texts: Vec<&str> = tokens.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, vec!["a", "!==", "b", "&&", "c", "=>", "d", ""]);
}

#[test]
fn test_scan_skips_comments_and_tracks_line_breaks() {
    let tokens = Scanner::new("a // trailing\n/* block\n */ b /* inline */ c")
        .scan_all()
        .expect("scan");
    assert_eq!(tokens[0].text, "a");
    assert!(!tokens[0].preceded_by_line_break);
    assert_eq!(tokens[1].text, "b");
    assert!(tokens[1].preceded_by_line_break);
    assert_eq!(tokens[2].text, "c");
    assert!(!tokens[2].preceded_by_line_break);
}

#[test]
fn test_scan_string_escapes() {
    let tokens = kinds_and_text(r#""a\"b\nA\x42" 'it\'s'"#);
    assert_eq!(tokens[0], (TokenKind::StringLiteral, "a\"b\nAB".to_string()));
    assert_eq!(tokens[1], (TokenKind::StringLiteral, "it's".to_string()));
}

#[test]
fn test_scan_unicode_escapes_pair_surrogates() {
    let tokens = kinds_and_text(r#""\uD83D\uDE00" "\u{1F600}" "\u{D83D}\uDE00" "\u00e9""#);
    let texts: Vec<&str> = tokens.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, vec!["\u{1F600}", "\u{1F600}", "\u{1F600}", "\u{e9}", ""]);
}

#[test]
fn test_scan_rejects_unpaired_surrogate_escape() {
    for source in [r#""\uD83D""#, r#""\uDE00""#, r#""\uD83Dx""#, r#""\uD83DA""#] {
        let err = Scanner::new(source).scan_all().unwrap_err();
        assert_eq!(err.message, "Unpaired surrogate escapes are not supported.", "{source}");
        assert_eq!(err.pos, 0);
    }
}

#[test]
fn test_scan_rejects_out_of_range_code_point() {
    let err = Scanner::new(r#""\u{110000}""#).scan_all().unwrap_err();
    assert!(err.message.starts_with("An extended Unicode escape value"));
}

#[test]
fn test_scan_numbers_keep_source_spelling() {
    let tokens = kinds_and_text("42 3.14 0xff 1e10 .5");
    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|(kind, _)| *kind == TokenKind::NumericLiteral)
        .map(|(_, text)| text.as_str())
        .collect();
    assert_eq!(numbers, vec!["42", "3.14", "0xff", "1e10", ".5"]);
}

#[test]
fn test_scan_errors() {
    let err = Scanner::new("'open").scan_all().unwrap_err();
    assert_eq!(err.message, "Unterminated string literal.");
    assert_eq!(err.pos, 0);

    let err = Scanner::new("a /* never closed").scan_all().unwrap_err();
    assert_eq!(err.pos, 2);

    let err = Scanner::new("a # b").scan_all().unwrap_err();
    assert_eq!(err.message, "Invalid character '#'.");
}
