use roxmltree::{Document, Node};

use css3_syntax::component::consume_component_values;
use css3_syntax::preprocess;
use css3_syntax::selector::{compile_selector, find, selects, Element, Selector};
use css3_syntax::tokenizer::Tokenizer;

#[derive(Clone, Copy)]
struct XmlElement<'a, 'input>(Node<'a, 'input>);

impl<'a, 'input> Element for XmlElement<'a, 'input> {
    type Children = std::vec::IntoIter<XmlElement<'a, 'input>>;

    fn local_name(&self) -> &str {
        self.0.tag_name().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.0.attribute(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent().filter(|n| n.is_element()).map(XmlElement)
    }

    // Computed the way the selector model this is grounded on computes
    // it: by locating this node's index among its parent's element
    // children and taking the one before it.
    fn previous_sibling_element(&self) -> Option<Self> {
        let parent = self.0.parent()?;
        let siblings: Vec<Node> = parent.children().filter(|n| n.is_element()).collect();
        let idx = siblings.iter().position(|n| *n == self.0)?;
        if idx == 0 {
            None
        } else {
            Some(XmlElement(siblings[idx - 1]))
        }
    }

    fn children(&self) -> Self::Children {
        self.0
            .children()
            .filter(|n| n.is_element())
            .map(XmlElement)
            .collect::<Vec<_>>()
            .into_iter()
    }
}

fn compile(src: &str) -> Selector {
    let chars = preprocess(src);
    let tokens: Vec<_> = Tokenizer::new(&chars, false).collect();
    let mut pos = 0;
    let primitives = consume_component_values(&tokens, &mut pos);
    compile_selector(&primitives).unwrap()
}

#[test]
fn descendant_combinator_matches_nested_em() {
    let xml = r#"<h1>This <span class="myclass">headline is <em>very</em> important</span></h1>"#;
    let doc = Document::parse(xml).unwrap();
    let root = XmlElement(doc.root_element());

    let em_selector = compile("h1 em");
    let matches: Vec<_> = find(&em_selector, root).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].local_name(), "em");

    let h2_selector = compile("h2 em");
    assert!(find(&h2_selector, root).next().is_none());
}

#[test]
fn universal_descendant_respects_ancestor_chain() {
    let matching = Document::parse("<div><div><p/></div></div>").unwrap();
    let matching_root = XmlElement(matching.root_element());
    let selector = compile("div * p");
    assert!(find(&selector, matching_root).next().is_some());

    let non_matching = Document::parse("<section><div><p/></div></section>").unwrap();
    let non_matching_root = XmlElement(non_matching.root_element());
    assert!(find(&selector, non_matching_root).next().is_none());
}

#[test]
fn dash_match_vs_exact_match_attribute_operators() {
    let doc = Document::parse(r#"<root><a hreflang="en"/><a hreflang="en-US"/></root>"#).unwrap();
    let root = XmlElement(doc.root_element());

    let dash_match = compile("a[hreflang|='en']");
    assert_eq!(find(&dash_match, root).count(), 2);

    let exact_match = compile("a[hreflang='en']");
    let exact: Vec<_> = find(&exact_match, root).collect();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].attribute("hreflang"), Some("en"));
}

#[test]
fn adjacent_sibling_combinator() {
    let doc = Document::parse(
        r#"<root><math/><p id="yes"/><ul/><p id="no"/></root>"#,
    )
    .unwrap();
    let root = XmlElement(doc.root_element());

    let selector = compile("math + p");
    let matches: Vec<_> = find(&selector, root).collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].attribute("id"), Some("yes"));
}

#[test]
fn find_yields_document_order_and_each_node_once() {
    let doc = Document::parse("<root><p id=\"a\"/><p id=\"b\"/><p id=\"c\"/></root>").unwrap();
    let root = XmlElement(doc.root_element());
    let selector = compile("p");
    let ids: Vec<&str> = find(&selector, root).map(|n| n.attribute("id").unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn selects_requires_both_type_and_attributes() {
    let doc = Document::parse(r#"<a hreflang="en"/>"#).unwrap();
    let root = XmlElement(doc.root_element());
    let selector = compile("a[hreflang='en']");
    assert!(selects(&selector, &root));

    let wrong_type = compile("span[hreflang='en']");
    assert!(!selects(&wrong_type, &root));
}

#[test]
fn node_without_attribute_fails_presence_check() {
    let doc = Document::parse("<a/>").unwrap();
    let root = XmlElement(doc.root_element());
    let selector = compile("a[disabled]");
    assert!(!selects(&selector, &root));
}
