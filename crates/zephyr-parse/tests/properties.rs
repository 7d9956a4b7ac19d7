use proptest::prelude::*;
use text_size::{TextLen as _, TextRange};
use zephyr_parse::{Parser as _, ZephyrParser, parse};
use zephyr_syntax::{NodeTypeId, TokenKind, TreeBuilder, UNIT_SIZE};
use zephyr_tokenizer::tokenize;

fn source() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("let ".to_owned()),
        Just("const ".to_owned()),
        Just("= ".to_owned()),
        Just(";\n".to_owned()),
        Just("// note\n".to_owned()),
        "[a-z_][a-z0-9_]{0,6} ",
        "[0-9]{1,4}(\\.[0-9]{1,2})? ",
        "'[a-z ]{0,5}' ",
        "[+*@#-]{1,2}",
        "\\PC{1,3}",
    ];
    prop::collection::vec(fragment, 0..24).prop_map(|fragments| fragments.concat())
}

proptest! {
    #[test]
    fn root_spans_the_document(text in source()) {
        let tree = parse(&text);
        prop_assert_eq!(tree.root().range(), TextRange::up_to(text.text_len()));
        prop_assert_eq!(tree.root().node_type().id(), NodeTypeId::ROOT);
    }

    #[test]
    fn one_leaf_per_token_in_input_order(text in source()) {
        let tokens = tokenize(&text);
        let tree = TreeBuilder::build(&text, &tokens);
        let records = tree.records().collect::<Vec<_>>();

        prop_assert_eq!(records.len(), tokens.len() + 1);
        for (record, token) in records.iter().zip(&tokens) {
            prop_assert_eq!(record.range(), token.range);
            prop_assert_eq!(record.size, UNIT_SIZE);
            prop_assert_eq!(record.type_id, tree.registry().type_for(token.kind).id());
        }

        let root = records[tokens.len()];
        prop_assert_eq!(root.size, tokens.len() as u32 * UNIT_SIZE + UNIT_SIZE);
    }

    #[test]
    fn unknown_leaves_come_from_error_tokens(text in source()) {
        let tokens = tokenize(&text);
        let tree = parse(&text);

        for (leaf, token) in tree.leaves().zip(&tokens) {
            let unknown = leaf.node_type().id() == NodeTypeId::UNKNOWN;
            prop_assert_eq!(unknown, token.kind == TokenKind::ERROR);
            let unstyled = unknown || token.kind == TokenKind::SEMICOLON;
            prop_assert_eq!(leaf.node_type().style().is_none(), unstyled);
        }
    }

    #[test]
    fn parsing_is_idempotent(text in source()) {
        let parser = ZephyrParser::new();
        let first = parser.parse(text.as_str());
        let second = parser.parse(text.as_str());
        prop_assert_eq!(first.buffer(), second.buffer());
    }
}

#[test]
fn empty_token_stream_yields_single_record() {
    for text in ["", "   ", "// just a comment\n"] {
        let tree = parse(text);
        assert_eq!(tree.len(), 1, "{text:?}");
        assert_eq!(tree.buffer(), [0, 0, text.len() as u32, UNIT_SIZE]);
    }
}
