use expect_test::expect;
use text_size::{TextRange, TextSize};

use crate::SyntaxKind::*;
use crate::{Builder, NodeOrToken, SyntaxKind, SyntaxSet, SyntaxTree};

fn mustache_with_error() -> SyntaxTree {
    let mut builder = Builder::new("{{a}}");
    builder.start_node(TEMPLATE);
    builder.start_node(MUSTACHE);
    builder.token(OPEN, TextSize::new(2));
    builder.start_error("oops");
    builder.finish_node();
    builder.token(ID, TextSize::new(1));
    builder.token(CLOSE, TextSize::new(2));
    builder.finish_node();
    builder.finish_node();
    builder.finish()
}

#[test]
fn debug_tree() {
    let tree = mustache_with_error();
    expect![[r#"
        TEMPLATE@0..5
          MUSTACHE@0..5
            OPEN@0..2 "{{"
            ERROR@2..2 "oops"
            ID@2..3 "a"
            CLOSE@3..5 "}}"
    "#]]
    .assert_eq(&tree.debug_tree());
}

#[test]
fn navigation() {
    let tree = mustache_with_error();
    let root = tree.root();
    assert_eq!(root.kind(), TEMPLATE);
    assert_eq!(root.parent(), None);

    let mustache = root.first_child().unwrap();
    assert_eq!(mustache.kind(), MUSTACHE);
    assert_eq!(mustache.text(), "{{a}}");

    let kinds = mustache.children_with_tokens().map(|it| it.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [OPEN, ERROR, ID, CLOSE]);

    let open = mustache.children_with_tokens().find_map(NodeOrToken::into_token).unwrap();
    assert_eq!(open.kind(), OPEN);
    assert_eq!(open.parent(), mustache);
    let ancestors = open.parent().ancestors().map(|it| it.kind()).collect::<Vec<_>>();
    assert_eq!(ancestors, [MUSTACHE, TEMPLATE]);

    let texts = tree.tokens().map(|it| it.text()).collect::<String>();
    assert_eq!(texts, "{{a}}");
    assert_eq!(root.tokens().count(), 3);
    assert_eq!(root.descendants().count(), 3);
}

#[test]
fn errors_are_collected_in_document_order() {
    let mut builder = Builder::new("ab");
    builder.start_node(TEMPLATE);
    builder.start_error("first");
    builder.token(INVALID, TextSize::new(1));
    builder.finish_node();
    builder.start_error("second");
    builder.token(INVALID, TextSize::new(1));
    builder.finish_node();
    builder.finish_node();
    let tree = builder.finish();

    let errors = tree
        .errors()
        .map(|node| (node.error_message().unwrap(), node.text_range()))
        .collect::<Vec<_>>();
    assert_eq!(
        errors,
        [
            ("first", TextRange::new(TextSize::new(0), TextSize::new(1))),
            ("second", TextRange::new(TextSize::new(1), TextSize::new(2)))
        ]
    );
}

#[test]
#[should_panic(expected = "outside of any node")]
fn token_requires_an_open_node() {
    let mut builder = Builder::new("x");
    builder.token(CONTENT, TextSize::new(1));
}

#[test]
fn syntax_set() {
    const OPENERS: SyntaxSet = SyntaxSet::new([OPEN, OPEN_BLOCK]);

    assert!(OPENERS.contains(OPEN));
    assert!(OPENERS.contains(OPEN_BLOCK));
    assert!(!OPENERS.contains(CLOSE));
    assert!(SyntaxSet::EMPTY.is_empty());

    let set = OPENERS.union(SyntaxSet::new([TOMBSTONE]));
    assert_eq!(set.iter().collect::<Vec<_>>(), [OPEN, OPEN_BLOCK, TOMBSTONE]);
    assert_eq!([CLOSE, ID].into_iter().collect::<SyntaxSet>(), SyntaxSet::new([ID, CLOSE]));
}

#[test]
fn kind_classes() {
    assert!(CONTENT.is_terminal());
    assert!(INVALID.is_terminal());
    assert!(!EOF.is_terminal());
    assert!(!STATEMENTS.is_terminal());
    assert!(WHITESPACE.is_trivia());
    assert_eq!(SyntaxKind::ALL.iter().filter(|kind| kind.is_terminal()).count(), 17);
    assert_eq!(CLOSE.describe(), "`}}`");
}
