//! Reader tests: atoms, failures, lists and source locations.

use std::io::Write;

use binsexpr::{
    read_file, read_from, read_str, BinArray, BinWord, GenericNode, ReadError, Reader, ReaderConfig,
    SourceSpan, Symbol,
};
use pretty_assertions::assert_eq;

fn read(text: &str) -> Vec<GenericNode> {
    read_str(text, "<string>").unwrap()
}

fn sym(name: &str) -> GenericNode {
    GenericNode::from(Symbol::new(name).unwrap())
}

fn word(width: u32, value: i64) -> GenericNode {
    GenericNode::from(BinWord::new(width, value).unwrap())
}

fn truncated(width: u32, value: i64) -> GenericNode {
    GenericNode::from(BinWord::new_truncating(width, value))
}

fn array(width: u32, values: &[u32]) -> GenericNode {
    GenericNode::from(BinArray::from_values(width, values.iter().copied()).unwrap())
}

fn atom_cases() -> Vec<(&'static str, GenericNode)> {
    vec![
        ("abcDEF", sym("abcDEF")),
        ("-", sym("-")),
        ("@nil", GenericNode::from(())),
        ("@false", GenericNode::from(false)),
        ("@true", GenericNode::from(true)),
        ("0", GenericNode::from(0)),
        ("123", GenericNode::from(123)),
        ("0x123", GenericNode::from(0x123)),
        ("0o123", GenericNode::from(0o123)),
        ("0b101", GenericNode::from(0b101)),
        ("-123", GenericNode::from(-123)),
        ("-0x123", GenericNode::from(-0x123)),
        ("-0o123", GenericNode::from(-0o123)),
        ("-0b101", GenericNode::from(-0b101)),
        ("123456789", GenericNode::from(123456789)),
        ("0o01234567", GenericNode::from(0o1234567)),
        (
            "0x0123456789abcdefABCDEF",
            GenericNode::from(0x0123456789abcdefabcdef_u128),
        ),
        ("12'0x123", word(12, 0x123)),
        ("12'0o1234", word(12, 0o1234)),
        ("12'1234", word(12, 1234)),
        ("3'0b101", word(3, 0b101)),
        ("12'-0x123", truncated(12, -0x123)),
        ("12'-0o1234", truncated(12, -0o1234)),
        ("12'-1234", truncated(12, -1234)),
        ("3'-0b101", truncated(3, -0b101)),
        ("3'0b111", word(3, 0b111)),
        ("3'-0b1000", word(3, 0)),
        ("12'0x()", array(12, &[])),
        ("12'0x(123  456)", array(12, &[0x123, 0x456])),
        ("12'0x(-123 -456)", array(12, &[0xedd, 0xbaa])),
        ("12'0x(fff -1000)", array(12, &[0xfff, 0])),
        ("0'0x()", array(0, &[])),
        ("0'0x(0 0)", array(0, &[0, 0])),
        ("7'\"abc\"", array(7, &[0x61, 0x62, 0x63])),
        ("5'0b(10101 1010)", array(5, &[0x15, 0xa])),
        ("5'(12 0 20 9)", array(5, &[12, 0, 20, 9])),
        ("6'0o(12 23)", array(6, &[0o12, 0o23])),
        ("\"abc\"", GenericNode::from("abc")),
        (
            r#""\a\bcd\e\f\r\n\\\"ghi""#,
            GenericNode::from("\x07\x08cd\x1b\x0c\r\n\\\"ghi"),
        ),
        (
            r#""\x12\u1234\U102345""#,
            GenericNode::from("\x12\u{1234}\u{102345}"),
        ),
        (r#""\x1234""#, GenericNode::from("\x1234")),
        (r#""\u123456""#, GenericNode::from("\u{1234}56")),
        (r#""\U10234567""#, GenericNode::from("\u{102345}67")),
    ]
}

#[test]
fn test_atoms() {
    for (text, expected) in atom_cases() {
        assert_eq!(read(text), vec![expected.clone()], "{text}");
        assert_eq!(read(&format!(" {text} ")), vec![expected.clone()], "{text}");
        let listed = read(&format!("({text})"));
        assert_eq!(listed, vec![GenericNode::from(vec![expected])], "{text}");
    }
}

#[test]
fn test_atom_kinds() {
    assert_eq!(read("12'0x123")[0].kind_name(), "WordNode");
    assert_eq!(read("7'\"abc\"")[0].kind_name(), "ArrayNode");
    assert_eq!(read("123")[0].kind_name(), "IntNode");
    assert_eq!(read("\"123\"")[0].kind_name(), "StringNode");
}

#[test]
fn test_failures() {
    let cases = [
        ("1abc", "no whitespace"),
        ("-1abc", "no whitespace"),
        ("-abc", "no whitespace"),
        ("--", "no whitespace"),
        ("@true@true", "no whitespace"),
        ("@truer", "no whitespace"),
        ("@falser", "no whitespace"),
        ("@dunno", "unknown token"),
        ("@tru", "unknown token"),
        ("0123", "no whitespace"),
        ("123l", "no whitespace"),
        ("3'0b1000", "value out of range"),
        ("3'-0b1001", "value out of range"),
        ("12'0x(-123-456)", "no whitespace"),
        ("12'0x(-1001)", "value out of range"),
        ("12'0x(1000)", "value out of range"),
        ("12'0x(12z)", "no whitespace"),
        ("12'(0123)", "no whitespace"),
        ("12'0x(", "EOF while in BINARRAY state"),
        ("12'0x(123", "EOF while in BINARRAY state"),
        ("12'(@true)", "unknown binarray item"),
        ("12'\"abc", "EOF while in STRING state"),
        ("\"abc", "EOF while in STRING state"),
        ("\"", "EOF while in STRING state"),
        ("6'\"abc\"", "character code out of range"),
        (r#""abc\U123456""#, "not a valid unicode codepoint"),
        (r#""\d""#, "unknown escape"),
        (r#""\x1""#, "unknown escape"),
        (r#""\u123""#, "unknown escape"),
        (r#""\U12345""#, "unknown escape"),
        (r#""\x1z""#, "unknown escape"),
        (r#""\u123z""#, "unknown escape"),
        (r#""\U12345z""#, "unknown escape"),
        ("(", "unmatched opening paren"),
        (")", "unmatched closing paren"),
        ("()()", "no whitespace"),
        ("##", "unclosed S-expr comment"),
        ("(abc ##) def", "unclosed S-expr comment"),
    ];
    for (text, expected) in cases {
        let err = read_str(text, "<string>").unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "{text:?}: {err} does not mention {expected:?}"
        );
    }
}

#[test]
fn test_lists() {
    assert_eq!(
        read("(abc def) ghi"),
        vec![GenericNode::from(vec![sym("abc"), sym("def")]), sym("ghi")]
    );
    assert_eq!(
        read("(abc def (ghi ##jkl) ##(mno ## pqr stq) uvw)"),
        vec![GenericNode::from(vec![
            sym("abc"),
            sym("def"),
            GenericNode::from(vec![sym("ghi")]),
            sym("uvw"),
        ])]
    );
    let text = "
            (abc def (ghi # jkl mno )(
            pqr) # (mno ## pqr stq) uvw)
            )
        ";
    assert_eq!(
        read(text),
        vec![GenericNode::from(vec![
            sym("abc"),
            sym("def"),
            GenericNode::from(vec![sym("ghi"), sym("pqr")]),
        ])]
    );
}

#[test]
fn test_locations() {
    let text = [
        "(abc def # abc",
        "  (ghi 123 12'(12 # meh",
        "     34 # meh",
        "     56)",
        "     \"abc # meh",
        "     def\"",
        "  )",
        ")",
    ]
    .join("\n");
    let nodes = read(&text);
    let span = |l1, c1, l2, c2| Some(SourceSpan::new("<string>", l1, c1, l2, c2));

    let outer = nodes[0].as_list().unwrap();
    assert_eq!(nodes[0].location().cloned(), span(1, 1, 8, 1));
    assert_eq!(outer.items()[0].location().cloned(), span(1, 2, 1, 4));
    assert_eq!(outer.items()[1].location().cloned(), span(1, 6, 1, 8));
    assert_eq!(outer.items()[2].location().cloned(), span(2, 3, 7, 3));

    let inner = outer.items()[2].as_list().unwrap();
    assert_eq!(inner.items()[0].location().cloned(), span(2, 4, 2, 6));
    assert_eq!(inner.items()[1].location().cloned(), span(2, 8, 2, 10));
    assert_eq!(inner.items()[2].location().cloned(), span(2, 12, 4, 8));
    assert_eq!(inner.items()[3].location().cloned(), span(5, 6, 6, 9));
    assert_eq!(inner.items()[3], GenericNode::from("abc # meh\n     def"));
    assert_eq!(
        inner.items()[3].location().map(ToString::to_string),
        Some("<string>:5:6-6:9".to_string())
    );
}

#[test]
fn test_end_to_end() {
    let nodes = read("(abc 12'0x123 \"a\\nb\")");
    assert_eq!(
        nodes,
        vec![GenericNode::from(vec![
            sym("abc"),
            word(12, 0x123),
            GenericNode::from("a\nb"),
        ])]
    );
    assert_eq!(nodes[0].to_string(), "(abc 12'0x123 \"a\\nb\")");
    assert_eq!(read(&nodes[0].to_string()), nodes);
}

#[test]
fn test_reader_line_by_line() {
    let config = ReaderConfig::new("image.flake");
    let mut reader = Reader::with_config(&config);
    assert!(reader.feed_line("abc (def\n").unwrap() == vec![sym("abc")]);
    assert_eq!(reader.depth(), 1);
    let out = reader.feed_line("ghi) \"jkl\n").unwrap();
    assert_eq!(out, vec![GenericNode::from(vec![sym("def"), sym("ghi")])]);
    assert_eq!(
        out[0].location(),
        Some(&SourceSpan::new("image.flake", 1, 5, 2, 4))
    );
    let err = reader.finish().unwrap_err();
    assert!(matches!(err, ReadError::UnexpectedEof { .. }));
    assert_eq!(err.to_string(), "image.flake:2:6: EOF while in STRING state");
}

#[test]
fn test_read_file_and_buffer() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "(abc").unwrap();
    writeln!(file, "  123) @nil").unwrap();
    let nodes = read_file(file.path()).unwrap();
    assert_eq!(
        nodes,
        vec![GenericNode::from(vec![sym("abc"), GenericNode::from(123)]), GenericNode::from(())]
    );
    let filename = file.path().display().to_string();
    assert_eq!(nodes[1].location().map(|l| l.filename.to_string()), Some(filename));

    let nodes = read_from("a\nb c\n".as_bytes(), "<buffer>").unwrap();
    assert_eq!(nodes, vec![sym("a"), sym("b"), sym("c")]);
    assert_eq!(
        nodes[2].location(),
        Some(&SourceSpan::new("<buffer>", 2, 3, 2, 3))
    );
}

#[test]
fn test_read_file_missing() {
    let err = read_file("/nonexistent/input.flake").unwrap_err();
    assert!(matches!(err, binsexpr::Error::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/input.flake"));
}
