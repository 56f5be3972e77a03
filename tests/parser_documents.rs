//! Whole-document parser tests
//!
//! Each test parses a complete pll document and checks the resulting tree shape, the tag
//! mapping, or the reported error.

use pll::pll::ast::{snapshot_forest, Tree, TreeSnapshot};
use pll::pll::config::{Loader, ParserConfig};
use pll::pll::parsing::{parse, parse_with, ParseErrorKind};
use rstest::rstest;

const FRUIT: &str = "
\ttop
\t\tpeach
\t\t\tfuzzy
\t\t\t\t\tnavel
\t\t\tpink
\t\tapple
\t\t\tred
";

#[test]
fn test_fruit_tree_shape() {
    let result = parse(FRUIT).unwrap();
    let top = result.root();

    assert_eq!(top.label(), "top");
    assert_eq!(top.num_children(), 2);
    assert_eq!(top.descendants().count(), 6);

    let peach = top.first_child().unwrap();
    assert_eq!(peach.label(), "peach");
    assert_eq!(peach.num_children(), 2);
    assert_eq!(peach.first_child().unwrap().label(), "fuzzy navel");
}

#[test]
fn test_node_count_matches_structural_lines() {
    let result = parse(FRUIT).unwrap();
    // Seven non-blank lines, one of them a continuation.
    assert_eq!(result.root().following().count(), 6);
}

#[test]
fn test_fruit_tree_snapshot() {
    let result = parse(FRUIT).unwrap();
    let expected = Tree::from_snapshots(&[TreeSnapshot::new("top")
        .with_child(
            TreeSnapshot::new("peach")
                .with_child(TreeSnapshot::new("fuzzy navel"))
                .with_child(TreeSnapshot::new("pink")),
        )
        .with_child(TreeSnapshot::new("apple").with_child(TreeSnapshot::new("red")))]);
    assert_eq!(snapshot_forest(result.tree()), snapshot_forest(&expected));
}

#[rstest]
#[case::tabs_then_spaces("\n\t\tmain\n\t\t\t  peach\n\t\t\tapple\n\t", 3, ParseErrorKind::MixedIndentation)]
#[case::spaces_under_tabs_prefix("\nmain\n   peach\n   apple\n\t", 3, ParseErrorKind::IndentationMismatch { expected_tabs: 0, found: "   ".to_string() })]
#[case::below_prefix("\t\tmain\n\tpeach", 2, ParseErrorKind::IndentationMismatch { expected_tabs: 2, found: "\t".to_string() })]
#[case::empty_mark("main\n\t*\n", 2, ParseErrorKind::EmptyMarkLabel)]
#[case::open_verbatim("main\n\tcode <<<\n\t\tx = 1", 2, ParseErrorKind::UnterminatedVerbatim { expected: 1, read: 0 })]
#[case::second_block_missing("main <<< <<<\n\tone\n\n", 1, ParseErrorKind::UnterminatedVerbatim { expected: 2, read: 1 })]
#[case::bad_verbatim_indent("main <<<\n\t\tone\n\ttwo\n\n", 3, ParseErrorKind::VerbatimIndentation)]
#[case::empty_input("  \n\n# comment only\n", 0, ParseErrorKind::EmptyInput)]
fn test_syntax_errors(#[case] text: &str, #[case] line: usize, #[case] kind: ParseErrorKind) {
    let err = parse(text).unwrap_err();
    assert_eq!(err.kind, kind);
    assert_eq!(err.line, line);
}

#[test]
fn test_error_message_shows_context() {
    let text = "main\n\tpeach\n    apple\n\tpear";
    let err = parse(text).unwrap_err();
    let message = err.with_context(text);
    assert!(message.starts_with("Syntax error at line 3: Invalid indentation"));
    assert!(message.contains(">>   3 |     apple"));
    assert!(message.contains("     2 | →peach"));
}

#[test]
fn test_tagged_subtrees() {
    let text = "
\tApp
\t\ttitle = Turtle Graphics
\t\t*menubar
\t\t\tFile
\t\t\t\tExit
\t\t* layout
\t\t\trow
";
    let result = parse(text).unwrap();
    assert_eq!(result.tag_names(), vec!["menubar", "layout"]);

    let menubar = result.tag("menubar").unwrap();
    assert_eq!(menubar.parent().unwrap().label(), "App");

    let detached = result.tree().subtree(menubar.id());
    assert_eq!(
        snapshot_forest(&detached),
        vec![TreeSnapshot::new("menubar")
            .with_child(TreeSnapshot::new("File").with_child(TreeSnapshot::new("Exit")))]
    );

    let options = result.root().options();
    assert_eq!(options.get("title").map(String::as_str), Some("Turtle Graphics"));
    assert_eq!(options.len(), 1);
}

#[test]
fn test_marked_continuation_tags_extended_node() {
    let result = parse("App\n\tlong\n\t\t\t* label").unwrap();
    let node = result.tag("long label").unwrap();
    assert_eq!(node.label(), "long label");
}

#[test]
fn test_verbatim_heredoc() {
    let text = "
\tbutton
\t\ttext = Run
\t\thandler <<<
\t\t\tdef run(self):
\t\t\t\t# comments are kept here
\t\t\t\tself.go()

\t\tcolor = red
";
    let result = parse(text).unwrap();
    let handler = result
        .root()
        .children()
        .find(|n| n.label() == "handler")
        .unwrap();
    assert_eq!(
        handler.verbatim(),
        ["def run(self):\n\t# comments are kept here\n\tself.go()".to_string()]
    );
    assert_eq!(result.root().options().get("color").unwrap(), "red");
}

#[test]
fn test_synthetic_root_from_loader() {
    let config = Loader::new()
        .set_override("parser.root_label", "Python")
        .unwrap()
        .build()
        .unwrap();
    let result = parse_with("print(1)\nprint(2)", &config.parser).unwrap();
    assert_eq!(result.root().label(), "Python");
    assert_eq!(result.root().num_children(), 2);
}

#[test]
fn test_custom_tokens() {
    let config = ParserConfig {
        mark_token: "@".to_string(),
        verbatim_token: "%%".to_string(),
        comment_char: ';',
        escape_char: '!',
        ..ParserConfig::default()
    };
    let text = "app ; comment\n\t@body %%\n\t\tx # y\n\n\tsemi !; colon";
    let result = parse_with(text, &config).unwrap();
    let body = result.tag("body").unwrap();
    assert_eq!(body.verbatim(), ["x # y".to_string()]);
    assert_eq!(body.next_sibling().unwrap().label(), "semi ; colon");
}

#[test]
fn test_append_forest_grafts_parsed_text() {
    let mut program = parse("main\n\tfirst").unwrap().into_tree();
    let extra = parse("second\n\tnested\nthird").unwrap();
    let main = program.roots()[0];
    let added = program.append_forest(extra.tree(), Some(main));
    assert_eq!(added.len(), 2);
    let labels: Vec<_> = program.node(main).children().map(|n| n.label()).collect();
    assert_eq!(labels, vec!["first", "second", "third"]);
}

#[test]
fn test_option_pattern_from_config_file_text() {
    let config = Loader::new()
        .with_str("[parser]\noption_pattern = '^(\\w+)\\s*:\\s*(.*)$'\n")
        .build()
        .unwrap();
    let text = "Window\n\ttitle: Turtle Graphics\n\twidth = 25";
    let result = parse_with(text, &config.parser).unwrap();
    let options = result.options(result.root_id());
    assert_eq!(options.get("title").map(String::as_str), Some("Turtle Graphics"));
    assert!(!options.contains_key("width"));

    let defaults = parse(text).unwrap();
    assert_eq!(defaults.options(defaults.root_id()), result.root().options_with(&Default::default()));
    assert_eq!(defaults.options(defaults.root_id())["width"], "25");
}
