//! Printing a node and reading it back yields an equal node.

use binsexpr::{read_str, BinArray, BinWord, GenericNode, Symbol};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = GenericNode> {
    prop_oneof![
        "[a-zA-Z*+=<>!?/$%_][a-zA-Z0-9*+=<>!?/$%_-]{0,8}"
            .prop_map(|name| GenericNode::from(Symbol::new(&name).unwrap())),
        Just(GenericNode::from(())),
        any::<bool>().prop_map(GenericNode::from),
        any::<i128>().prop_map(GenericNode::from),
        (0u32..=70, any::<u64>())
            .prop_map(|(width, value)| GenericNode::from(BinWord::new_truncating(width, value))),
        (0u32..=40, prop::collection::vec(any::<u64>(), 0..5)).prop_map(|(width, values)| {
            let words = values
                .into_iter()
                .map(|value| BinWord::new_truncating(width, value));
            GenericNode::from(BinArray::from_words(width, words).unwrap())
        }),
        any::<String>().prop_map(GenericNode::from),
    ]
}

fn tree() -> impl Strategy<Value = GenericNode> {
    leaf().prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(GenericNode::from)
    })
}

proptest! {
    #[test]
    fn test_print_then_read(node in tree()) {
        let text = node.to_string();
        let read = read_str(&text, "<string>").unwrap();
        prop_assert_eq!(read, vec![node]);
    }
}

#[test]
fn test_fixed_roundtrips() {
    let strings = [
        String::from("abc"),
        String::from("\u{0}00\u{12}34\u{1112}34\u{101010}10"),
        (0u32..0x200).filter_map(char::from_u32).collect::<String>(),
        (0u32..0x110000)
            .step_by(0x100)
            .filter_map(char::from_u32)
            .collect::<String>(),
        (0xffu32..0x110000)
            .step_by(0x100)
            .filter_map(char::from_u32)
            .collect::<String>(),
    ];
    for s in strings {
        let node = GenericNode::from(s);
        assert_eq!(read_str(&node.to_string(), "<string>").unwrap(), vec![node]);
    }

    let values = [
        GenericNode::from(BinWord::new(12, 0x123u32).unwrap()),
        GenericNode::from(BinWord::new(0, 0u32).unwrap()),
        GenericNode::from(BinArray::new(33)),
        GenericNode::from(BinArray::from_values(17, [0u32, 0x1fffd]).unwrap()),
        GenericNode::from(vec![
            GenericNode::from("a"),
            GenericNode::from("b"),
            GenericNode::from(vec!["c", "d", "e"]),
            GenericNode::from(true),
            GenericNode::from(123),
        ]),
    ];
    for node in values {
        assert_eq!(read_str(&node.to_string(), "<string>").unwrap(), vec![node]);
    }
}
