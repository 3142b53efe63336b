//! Corpus tests - run the default pipeline over every SVG in tests/corpus.

use std::fs;
use std::path::Path;

use svgsort::{Element, Node, parse_svg, process_default};

/// Every element, at every depth, has its `defs` children ahead of the rest.
fn assert_defs_first(elem: &Element, file: &str) {
    let first_other = elem
        .children
        .iter()
        .position(|n| !n.is_element_named("defs"))
        .unwrap_or(elem.children.len());
    assert!(
        elem.children[first_other..]
            .iter()
            .all(|n| !n.is_element_named("defs")),
        "{}: <{}> has defs after other children",
        file,
        elem.name.full_name()
    );
    for child in elem.child_elements() {
        assert_defs_first(child, file);
    }
}

fn count_elements(elem: &Element) -> usize {
    1 + elem.child_elements().map(count_elements).sum::<usize>()
}

#[test]
fn test_corpus_processing() {
    let corpus_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus");

    let mut total = 0;
    for entry in fs::read_dir(&corpus_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_none_or(|e| e != "svg") {
            continue;
        }
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path).unwrap();
        total += 1;

        let output = process_default(&content)
            .unwrap_or_else(|e| panic!("{}: processing failed: {}", name, e));

        let before = parse_svg(&content).unwrap();
        let after = parse_svg(&output)
            .unwrap_or_else(|e| panic!("{}: output is not valid SVG: {}", name, e));

        assert_defs_first(&after.root, &name);
        assert_eq!(
            count_elements(&before.root),
            count_elements(&after.root),
            "{}: element count changed",
            name
        );

        let again = process_default(&output).unwrap();
        assert_eq!(output, again, "{}: second run changed the output", name);
    }

    assert!(total > 0, "no corpus files found");
}

#[test]
fn test_gradient_moves_to_front() {
    let svg = fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/gradient-after-shapes.svg"),
    )
    .unwrap();
    let doc = parse_svg(&process_default(&svg).unwrap()).unwrap();
    let names: Vec<_> = doc.root.children.iter().filter_map(Node::name).collect();
    assert_eq!(names, ["defs", "title", "rect", "circle"]);
}

#[test]
fn test_nested_group_defs_and_text_survive() {
    let svg = fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/nested-groups.svg"),
    )
    .unwrap();
    let output = process_default(&svg).unwrap();
    let doc = parse_svg(&output).unwrap();

    let root_names: Vec<_> = doc.root.children.iter().map(Node::name).collect();
    assert_eq!(
        root_names,
        [
            Some("defs".to_string()),
            Some("defs".to_string()),
            None,
            Some("g".to_string()),
            Some("g".to_string()),
        ]
    );

    let icon = doc
        .root
        .child_elements()
        .find(|e| e.get_attr("id") == Some("icon"))
        .unwrap();
    let icon_names: Vec<_> = icon.children.iter().filter_map(Node::name).collect();
    assert_eq!(icon_names, ["defs", "use", "use"]);

    assert!(output.contains("<text x=\"50\" y=\"90\">A &amp; B</text>"));
    assert!(output.contains("<![CDATA["));
}
