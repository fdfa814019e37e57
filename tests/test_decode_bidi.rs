//! Integration tests for operand decoding and right-to-left run assembly.

use std::collections::HashMap;
use std::sync::Arc;

use pdf_textflow::content::Orientations;
use pdf_textflow::fonts::{decode_bytes, ByteEncoding, CharMap, NamedEncoding};
use pdf_textflow::text::{
    show_text, CollectingVisitor, Operand, RtlConfig, TextSink, TextState,
};
use proptest::prelude::*;

fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|unit| unit.to_be_bytes()).collect()
}

fn utf16_state() -> TextState {
    TextState::new(Arc::new(CharMap::new(NamedEncoding::Utf16Be, HashMap::new(), "F1")))
}

/// Sparse table mapping lower-case letters to themselves; every other byte
/// is unmapped. Upper-case letters are substituted by themselves.
fn identity_table_state() -> TextState {
    let table: HashMap<u8, String> = (b'a'..=b'z')
        .map(|b| (b, char::from(b).to_string()))
        .collect();
    let substitutions: HashMap<char, String> =
        ('A'..='Z').map(|ch| (ch, ch.to_string())).collect();
    TextState::new(Arc::new(CharMap::new(
        ByteEncoding::Table(table),
        substitutions,
        "T1",
    )))
}

fn show(sink: &mut TextSink<'_>, state: &mut TextState, bytes: &[u8]) {
    show_text(
        sink,
        state,
        Operand::Bytes(bytes),
        Orientations::ALL,
        &RtlConfig::default(),
        false,
    )
    .expect("decoding should succeed");
}

proptest! {
    #[test]
    fn prop_pure_ltr_is_unchanged(text in "[A-Za-z0-9 .,]{0,40}") {
        let mut state = TextState::default();
        let mut sink = TextSink::new();
        show(&mut sink, &mut state, text.as_bytes());
        prop_assert_eq!(sink.pending(), text.as_str());
        prop_assert_eq!(sink.output(), "");
        prop_assert!(!state.rtl);
    }

    #[test]
    fn prop_ltr_through_sparse_table_is_unchanged(
        operands in proptest::collection::vec("[A-Za-z0-9 .,]{0,12}", 1..6),
    ) {
        let mut state = identity_table_state();
        let mut sink = TextSink::new();
        let mut expected = String::new();
        for operand in &operands {
            show(&mut sink, &mut state, operand.as_bytes());
            expected.push_str(operand);
            prop_assert_eq!(sink.pending(), expected.as_str());
            prop_assert_eq!(sink.output(), "");
            prop_assert!(!state.rtl);
        }
    }

    #[test]
    fn prop_pure_rtl_is_reversed(
        letters in proptest::collection::vec(0x05D0u32..=0x05EA, 1..20),
    ) {
        let text: String = letters.iter().filter_map(|&cp| char::from_u32(cp)).collect();
        let mut state = utf16_state();
        let mut sink = TextSink::new();
        show(&mut sink, &mut state, &utf16(&text));
        let reversed: String = text.chars().rev().collect();
        prop_assert_eq!(sink.pending(), reversed.as_str());
        prop_assert!(state.rtl);
    }

    #[test]
    fn prop_no_characters_lost(text in "[a-c\u{05D0}-\u{05D2} ]{0,30}") {
        let mut state = utf16_state();
        let mut sink = TextSink::new();
        show(&mut sink, &mut state, &utf16(&text));
        let mut got: Vec<char> = sink.output().chars().chain(sink.pending().chars()).collect();
        let mut want: Vec<char> = text.chars().collect();
        got.sort_unstable();
        want.sort_unstable();
        prop_assert_eq!(got, want);
    }
}

#[test]
fn test_mixed_direction_fragments() {
    let mut state = utf16_state();
    let mut visitor = CollectingVisitor::new();
    {
        let mut sink = TextSink::with_visitor(&mut visitor);
        show(&mut sink, &mut state, &utf16("A\u{05D0}B"));
        assert_eq!(sink.output(), "A\u{05D0}");
        assert_eq!(sink.pending(), "B");
        sink.flush("", &state);
    }
    assert_eq!(visitor.texts(), vec!["A", "\u{05D0}", "B"]);
    assert!(visitor.fragments[0].1.rtl);
    assert!(!visitor.fragments[1].1.rtl);
}

#[test]
fn test_flip_with_empty_run_notifies_visitor() {
    let mut state = utf16_state();
    let mut visitor = CollectingVisitor::new();
    {
        let mut sink = TextSink::with_visitor(&mut visitor);
        show(&mut sink, &mut state, &utf16("\u{05D0}"));
        assert_eq!(sink.output(), "");
        assert_eq!(sink.pending(), "\u{05D0}");
    }
    assert_eq!(visitor.texts(), vec![""]);
    assert!(visitor.fragments[0].1.rtl);
}

#[test]
fn test_arabic_words_with_space() {
    // salam alaykum as two words shown left to right in logical order
    let mut state = utf16_state();
    let mut sink = TextSink::new();
    show(
        &mut sink,
        &mut state,
        &utf16("\u{0633}\u{0644}\u{0627}\u{0645} \u{0639}\u{0644}"),
    );
    assert_eq!(sink.pending(), "\u{0644}\u{0639} \u{0645}\u{0627}\u{0644}\u{0633}");
}

#[test]
fn test_punctuation_is_neutral_in_rtl() {
    let mut state = utf16_state();
    let mut sink = TextSink::new();
    show(&mut sink, &mut state, &utf16("\u{05D0}-\u{05D1}"));
    assert_eq!(sink.pending(), "\u{05D1}-\u{05D0}");
    assert_eq!(sink.output(), "");
}

#[test]
fn test_specials_are_neutral() {
    let rtl = RtlConfig::default().with_specials(vec![u32::from('x') as i64]);
    let mut state = TextState::default();
    state.rtl = true;
    let mut sink = TextSink::new();
    show_text(&mut sink, &mut state, Operand::Bytes(b"x"), Orientations::ALL, &rtl, false)
        .unwrap();
    // neutral while in an RTL run: prepended, no flush
    assert!(state.rtl);
    assert_eq!(sink.pending(), "x");
}

#[test]
fn test_utf16_falls_back_to_latin1() {
    let encoding = ByteEncoding::Named(NamedEncoding::Utf16Be);
    // odd length is not UTF-16BE, so Latin-1 takes over
    let decoded = decode_bytes(&[0x00, 0x41, 0x05], &encoding).unwrap();
    assert_eq!(decoded, "\u{0}A\u{5}");

    let decoded = decode_bytes(&[0x00, 0x48, 0x00, 0x69], &encoding).unwrap();
    assert_eq!(decoded, "Hi");
}

#[test]
fn test_unpaired_surrogate_keeps_utf16() {
    let encoding = ByteEncoding::Named(NamedEncoding::Utf16Be);
    let decoded = decode_bytes(&[0x05, 0xD0, 0xD8, 0x00, 0x00, 0x41], &encoding).unwrap();
    assert_eq!(decoded, "\u{05D0}\u{FFFD}A");

    // the Hebrew letters after the bad unit still form a right-to-left run
    let mut state = utf16_state();
    let mut sink = TextSink::new();
    show(&mut sink, &mut state, &[0xD8, 0x00, 0x05, 0xD0, 0x05, 0xD1]);
    assert_eq!(sink.output(), "\u{FFFD}");
    assert_eq!(sink.pending(), "\u{05D1}\u{05D0}");
    assert!(state.rtl);
}

#[test]
fn test_table_encoding_with_unmapped_bytes() {
    let mut table = HashMap::new();
    table.insert(0x01u8, "\u{05E9}".to_string());
    table.insert(0x02u8, "fi".to_string());
    let decoded = decode_bytes(&[0x01, 0x02, b'z'], &ByteEncoding::Table(table)).unwrap();
    assert_eq!(decoded, "\u{05E9}fiz");
}

#[test]
fn test_charmap_description_and_display() {
    let charmap = CharMap::new(NamedEncoding::Latin1, HashMap::new(), "F7")
        .with_description("Helvetica, WinAnsi");
    assert_eq!(charmap.to_string(), "F7");
    assert_eq!(charmap.description(), Some("Helvetica, WinAnsi"));
    assert_eq!("utf-16-be".parse::<NamedEncoding>().unwrap(), NamedEncoding::Utf16Be);
    assert!("koi8-r".parse::<NamedEncoding>().is_err());
}
