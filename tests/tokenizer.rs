use dryck_lsp::token::extract_reference;
use dryck_lsp::types::ReferenceForm;

// ─── Bare form ──────────────────────────────────────────────────────────────

#[test]
fn test_bare_form_every_column_in_span() {
    let line = "Hello ◊greet today";
    // Span: marker at column 6 through "greet" ending at column 12,
    // inclusive at both edges.
    for column in 6..=12 {
        let token = extract_reference(line, column)
            .unwrap_or_else(|| panic!("no token at column {column}"));
        assert_eq!(token.name, "greet");
        assert_eq!(token.form, ReferenceForm::Bare);
        assert_eq!(token.start, 6);
        assert_eq!(token.end, 12);
    }
}

#[test]
fn test_bare_form_outside_span_returns_none() {
    let line = "Hello ◊greet today";
    assert!(extract_reference(line, 5).is_none());
    assert!(extract_reference(line, 13).is_none());
}

#[test]
fn test_brace_form_stops_at_brace() {
    let line = "◊section{intro}";
    let token = extract_reference(line, 4).expect("token");
    assert_eq!(token.name, "section");
    assert_eq!(token.form, ReferenceForm::Bare);
    // Cursor exactly on the trailing edge (the `{`) still resolves.
    assert!(extract_reference(line, 8).is_some());
    assert!(extract_reference(line, 9).is_none());
}

#[test]
fn test_hyphenated_name() {
    let line = "◊nav-bar here";
    let token = extract_reference(line, 3).expect("token");
    assert_eq!(token.name, "nav-bar");
}

#[test]
fn test_no_marker_returns_none() {
    assert!(extract_reference("plain text", 3).is_none());
}

#[test]
fn test_cursor_past_end_of_line_returns_none() {
    assert!(extract_reference("◊x", 40).is_none());
}

// ─── Colon form ─────────────────────────────────────────────────────────────

#[test]
fn test_colon_form_every_column_in_span() {
    let line = "◊eval: 1 + 2";
    // Span covers the marker and the identifier only; the argument stays
    // outside the token.
    for column in 0..=5 {
        let token = extract_reference(line, column)
            .unwrap_or_else(|| panic!("no token at column {column}"));
        assert_eq!(token.name, "eval");
        assert_eq!(token.form, ReferenceForm::Colon);
        assert_eq!(token.end, 5);
    }
    assert!(extract_reference(line, 6).is_none());
}

#[test]
fn test_colon_form_wins_over_bare_form() {
    // The bare pattern matches a superset of the colon pattern; priority
    // order must still report the colon form here.
    let token = extract_reference("◊foo: bar", 2).expect("token");
    assert_eq!(token.form, ReferenceForm::Colon);
    assert_eq!(token.name, "foo");
}

#[test]
fn test_colon_form_tolerates_whitespace_before_colon() {
    let token = extract_reference("◊wrap : x", 3).expect("token");
    assert_eq!(token.form, ReferenceForm::Colon);
    assert_eq!(token.name, "wrap");
    assert_eq!(token.end, 5);
}

#[test]
fn test_bare_form_when_colon_is_not_adjacent() {
    // The colon is separated by non-whitespace text, so this is not the
    // colon form.
    let token = extract_reference("◊greet is nice: yes", 3).expect("token");
    assert_eq!(token.form, ReferenceForm::Bare);
    assert_eq!(token.name, "greet");
}

// ─── Parenthesized form ─────────────────────────────────────────────────────

#[test]
fn test_paren_form_dotted_name() {
    let line = "see ◊(lib.head) above";
    // Span covers the whole `◊(lib.head)` group, columns 4..=15.
    for column in 4..=15 {
        let token = extract_reference(line, column)
            .unwrap_or_else(|| panic!("no token at column {column}"));
        assert_eq!(token.name, "lib.head");
        assert_eq!(token.form, ReferenceForm::Parenthesized);
    }
    assert!(extract_reference(line, 3).is_none());
    assert!(extract_reference(line, 16).is_none());
}

#[test]
fn test_paren_form_single_segment() {
    let token = extract_reference("◊(header)", 4).expect("token");
    assert_eq!(token.name, "header");
    assert_eq!(token.form, ReferenceForm::Parenthesized);
}

#[test]
fn test_dotted_name_without_parens_splits_at_dot() {
    // Bare identifiers cannot contain dots; only `foo` is a token here.
    let line = "◊foo.bar";
    let token = extract_reference(line, 2).expect("token");
    assert_eq!(token.name, "foo");
    assert!(extract_reference(line, 6).is_none());
}

// ─── Multiple references on one line ────────────────────────────────────────

#[test]
fn test_cursor_picks_the_containing_reference() {
    let line = "◊a and ◊b: x";
    let first = extract_reference(line, 1).expect("token");
    assert_eq!(first.name, "a");
    assert_eq!(first.form, ReferenceForm::Bare);

    let second = extract_reference(line, 8).expect("token");
    assert_eq!(second.name, "b");
    assert_eq!(second.form, ReferenceForm::Colon);
}
