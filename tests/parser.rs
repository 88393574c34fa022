use css3_syntax::ast::{AtRuleBodyItem, Declaration, RuleOrAtRule};
use css3_syntax::component::Primitive;
use css3_syntax::parser::parse_stylesheet;
use css3_syntax::tokenizer::Token;

fn declaration_value_tokens(decl: &Declaration) -> Vec<String> {
    decl.value
        .iter()
        .filter(|p| !p.is_whitespace())
        .map(|p| match p {
            Primitive::Token(t) => t.to_string(),
            other => format!("{:?}", other),
        })
        .collect()
}

fn only_at_rule(sheet: &css3_syntax::ast::Stylesheet) -> &css3_syntax::ast::AtRule {
    match &sheet.children[0] {
        RuleOrAtRule::AtRule(at_rule) => at_rule,
        other => panic!("expected an at-rule, got {:?}", other),
    }
}

fn only_style_rule(sheet: &css3_syntax::ast::Stylesheet) -> &css3_syntax::ast::StyleRule {
    match &sheet.children[0] {
        RuleOrAtRule::StyleRule(rule) => rule,
        other => panic!("expected a style rule, got {:?}", other),
    }
}

#[test]
fn page_at_rule_scenario() {
    let sheet = parse_stylesheet("@page :left { margin-left: 4cm; margin-right: 3cm; }");
    assert_eq!(sheet.children.len(), 1);
    let at_rule = only_at_rule(&sheet);
    assert_eq!(at_rule.name, "page");
    assert!(at_rule.has_block);

    let decls: Vec<&Declaration> = at_rule
        .block
        .iter()
        .map(|item| match item {
            AtRuleBodyItem::Declaration(d) => d,
            other => panic!("expected only declarations in a page at-rule, got {:?}", other),
        })
        .collect();

    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].name, "margin-left");
    assert_eq!(declaration_value_tokens(decls[0]), vec!["DIM(4, cm)"]);
    assert_eq!(decls[1].name, "margin-right");
    assert_eq!(declaration_value_tokens(decls[1]), vec!["DIM(3, cm)"]);
}

#[test]
fn unterminated_block_does_not_panic() {
    let sheet = parse_stylesheet(".foo { transform: translate(50px");
    assert_eq!(sheet.children.len(), 1);
    let rule = only_style_rule(&sheet);
    // The declaration's value swallowed the unterminated function; no panic,
    // and the declaration was never closed off by a `;` or `}`.
    assert!(rule.declarations.is_empty() || rule.declarations[0].name == "transform");
}

#[test]
fn nested_media_rule() {
    let sheet = parse_stylesheet("@media print { p { color: black; } a { color: blue; } }");
    let at_rule = only_at_rule(&sheet);
    assert_eq!(at_rule.block.len(), 2);
    for item in &at_rule.block {
        assert!(matches!(item, AtRuleBodyItem::StyleRule(_)));
    }
}

#[test]
fn declarations_are_visited_in_source_order() {
    let sheet = parse_stylesheet("p { a: 1; b: 2; c: 3; }");
    let rule = only_style_rule(&sheet);
    let names: Vec<&str> = rule.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn dangling_selector_at_eof_discards_the_whole_rule() {
    // No `{` ever arrives for `div span`, so it contributes nothing.
    let _ = env_logger::try_init();
    let sheet = parse_stylesheet("p { color: red; } div span");
    assert_eq!(sheet.children.len(), 1);
}

#[test]
fn malformed_declaration_warning_is_logged() {
    // Exercises the same recovery path as `malformed_declaration_is_skipped_not_fatal`
    // in src/parser.rs's own unit tests, with logging turned on so the
    // `log::warn!` recovery diagnostic actually runs under a real logger.
    let _ = env_logger::try_init();
    let sheet = parse_stylesheet("p { 123: red; color: blue; }");
    let rule = only_style_rule(&sheet);
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations[0].name, "color");
}

#[test]
fn function_value_is_preserved() {
    let sheet = parse_stylesheet("p { background: url(\"x.png\"); }");
    let rule = only_style_rule(&sheet);
    let value = rule.declarations[0].value.iter().find(|p| !p.is_whitespace()).unwrap();
    match value {
        Primitive::Function { name, arguments } => {
            assert_eq!(name, "url");
            assert_eq!(arguments.len(), 1);
            assert!(matches!(arguments[0][0], Primitive::Token(Token::String(_))));
        }
        other => panic!("expected a function, got {:?}", other),
    }
}
