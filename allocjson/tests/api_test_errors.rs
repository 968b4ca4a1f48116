// Error handling tests: reported errors and contract violations

mod common;

use allocjson::{AllocatorRef, Array, JsonParser, JsonString, ParseError, Value};
use common::{BumpArena, CountingAllocator};

fn parse_counted(input: &str) -> Result<bool, ParseError> {
    let heap = CountingAllocator::default();
    let result = allocjson::parse_in(input, AllocatorRef::new(&heap)).map(|_| true);
    // Partially built trees are dropped on the error path too
    assert_eq!(heap.live_blocks(), 0, "leak after parsing {input:?}");
    result
}

macro_rules! generate_eof_tests {
    ($($name:ident => $input:expr),* $(,)?) => {
        $(
            paste::paste! {
                #[test_log::test]
                fn [<test_eof_ $name>]() {
                    assert_eq!(
                        parse_counted($input),
                        Err(ParseError::UnexpectedEof),
                        "input {:?} should end early",
                        $input
                    );
                }
            }
        )*
    };
}

generate_eof_tests!(
    empty => "",
    whitespace_only => " \t\r ",
    open_object => "{",
    key_without_colon => r#"{"key""#,
    colon_without_value => r#"{"key": "#,
    object_without_close => r#"{"key": 1"#,
    object_after_comma => r#"{"key": 1, "#,
    open_array => "[",
    array_after_comma => "[1, 2,",
    nested_array => "[[1], [2",
    unterminated_string => r#""abc"#,
    unterminated_key => r#"{"ke"#,
    string_in_array => r#"["abc", "de"#,
    nul_before_close => "[1, 2\0]",
);

#[test_log::test]
#[should_panic(expected = "expected ':' after object key")]
fn test_missing_colon() {
    let _ = parse_counted(r#"{"key" 1}"#);
}

#[test_log::test]
#[should_panic(expected = "expected string to start with '\"' at byte 1, found 'k'")]
fn test_unquoted_key() {
    let _ = parse_counted(r#"{key: 1}"#);
}

#[test_log::test]
#[should_panic(expected = "second decimal point in number")]
fn test_two_decimal_points() {
    let _ = parse_counted("1.2.3");
}

#[test_log::test]
#[should_panic(expected = "second decimal point in number")]
fn test_adjacent_decimal_points() {
    let _ = parse_counted("[1..5]");
}

#[test_log::test]
#[should_panic(expected = "expected digit after '-' at byte 1")]
fn test_lone_minus() {
    let _ = parse_counted("-x");
}

#[test_log::test]
#[should_panic(expected = "malformed literal at byte 0: expected \"true\", found end of input")]
fn test_truncated_keyword() {
    let _ = parse_counted("tru");
}

#[test_log::test]
#[should_panic(expected = "malformed literal at byte 1: expected \"null\", found '1'")]
fn test_misspelled_keyword() {
    let _ = parse_counted("[nul1]");
}

#[test_log::test]
#[should_panic(expected = "unexpected '@' at byte 0")]
fn test_unknown_lookahead() {
    let _ = parse_counted("@");
}

#[test_log::test]
#[should_panic(expected = "nesting deeper than 2 containers")]
fn test_custom_depth_exceeded() {
    let heap = CountingAllocator::default();
    let mut parser = JsonParser::<_, 2>::with_max_depth("[[[1]]]", AllocatorRef::new(&heap));
    let _ = parser.parse();
}

#[test_log::test]
#[should_panic(expected = "nesting deeper than 128 containers")]
fn test_default_depth_exceeded() {
    let input = "[".repeat(allocjson::DEFAULT_MAX_DEPTH + 1);
    let _ = parse_counted(&input);
}

#[test_log::test]
#[should_panic(expected = "allocator could not provide")]
fn test_exhausted_arena() {
    let arena = BumpArena::with_capacity(8);
    let _ = allocjson::parse_in(
        r#"["a string longer than the arena"]"#,
        AllocatorRef::new(&arena),
    );
}

#[test_log::test]
#[should_panic(expected = "expected string value, found integer")]
fn test_wrong_accessor_on_parsed_value() {
    let heap = CountingAllocator::default();
    let root = allocjson::parse_in("[1]", AllocatorRef::new(&heap)).unwrap();
    root[0].get::<JsonString<_>>();
}

#[test_log::test]
#[should_panic(expected = "array index 5 out of range for length 1")]
fn test_index_out_of_range() {
    let heap = CountingAllocator::default();
    let root = allocjson::parse_in("[1]", AllocatorRef::new(&heap)).unwrap();
    let _ = &root[5];
}

#[test_log::test]
fn test_try_get_does_not_fault() {
    let heap = CountingAllocator::default();
    let root = allocjson::parse_in("[1]", AllocatorRef::new(&heap)).unwrap();
    assert!(root.try_get::<Array<_>>().is_some());
    assert!(root[0].try_get::<f64>().is_none());
}

#[test_log::test]
fn test_error_display() {
    assert_eq!(ParseError::UnexpectedEof.to_string(), "unexpected end of input");

    let heap = CountingAllocator::default();
    match JsonParser::from_slice(b"\xc3", AllocatorRef::new(&heap)) {
        Err(err @ ParseError::InvalidUtf8(_)) => {
            assert!(err.to_string().starts_with("Invalid UTF-8"))
        }
        _ => panic!("expected InvalidUtf8"),
    }
}

#[cfg(feature = "int-overflow-double")]
#[test_log::test]
fn test_integer_overflow_becomes_double() {
    let heap = CountingAllocator::default();
    let root = allocjson::parse_in("[99999999999999999999]", AllocatorRef::new(&heap)).unwrap();
    assert_eq!(root[0], Value::Double(1e20));
}

#[cfg(feature = "int-overflow-fault")]
#[test_log::test]
#[should_panic(expected = "does not fit in i64")]
fn test_integer_overflow_faults() {
    let _ = parse_counted("[99999999999999999999]");
}

#[cfg(feature = "strict-separators")]
#[test_log::test]
#[should_panic(expected = "trailing ',' before ']'")]
fn test_strict_trailing_comma() {
    let _ = parse_counted("[1, 2,]");
}

#[cfg(feature = "strict-separators")]
#[test_log::test]
#[should_panic(expected = "expected ',' or '}'")]
fn test_strict_missing_comma() {
    let _ = parse_counted(r#"{"a": 1 "b": 2}"#);
}

#[cfg(feature = "escapes")]
#[test_log::test]
fn test_escapes_decoded() {
    let heap = CountingAllocator::default();
    let root = allocjson::parse_in(r#""say \"hi\"\n\u0041""#, AllocatorRef::new(&heap)).unwrap();
    assert_eq!(root.get::<JsonString<_>>(), "say \"hi\"\n\\u0041");
}

#[cfg(feature = "escapes")]
#[test_log::test]
#[should_panic(expected = "invalid escape sequence")]
fn test_bad_escape() {
    let _ = parse_counted(r#""\q""#);
}

#[cfg(not(feature = "escapes"))]
#[test_log::test]
fn test_backslash_kept_verbatim() {
    let heap = CountingAllocator::default();
    let root = allocjson::parse_in(r#"["a\nb"]"#, AllocatorRef::new(&heap)).unwrap();
    assert_eq!(root[0].get::<JsonString<_>>(), "a\\nb");
}
