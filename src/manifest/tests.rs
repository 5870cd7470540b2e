// pwml-rs: Project Wings Mod Loader - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::dom::{DomError, Document};
use super::{merge, merge_all, merge_files, read_document};
use crate::error::ManifestError;
use std::path::{Path, PathBuf};

const GRAPHICS_A: &str = r#"<?xml version="1.0"?>
<graphics version="2" xmlns:w="urn:wings">
  <sprite name="ship"/>
  <!-- stock -->
  <w:sprite name="pilot">walk.png</w:sprite>
</graphics>
"#;

const GRAPHICS_B: &str = r#"<?xml version="1.0"?>
<other mode="mod">
  <sprite name="laser"/>
</other>
"#;

fn element_names(document: &Document) -> Vec<String> {
    document
        .root()
        .child_elements()
        .map(|e| {
            let name = e.name();
            let attrs = e.attributes();
            match attrs.first() {
                Some((_, value)) => format!("{name}[{value}]"),
                None => name,
            }
        })
        .collect()
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_parse_keeps_root_identity() {
    let doc = Document::parse(GRAPHICS_A).unwrap();
    assert_eq!(doc.root().name(), "graphics");
    assert_eq!(
        doc.root().attributes(),
        vec![
            ("version".to_string(), "2".to_string()),
            ("xmlns:w".to_string(), "urn:wings".to_string()),
        ]
    );
    // sprite, comment, w:sprite
    assert_eq!(doc.root().children().len(), 3);
    assert_eq!(element_names(&doc), vec!["sprite[ship]", "w:sprite[pilot]"]);
}

#[test]
fn test_parse_rejects_malformed_documents() {
    assert!(matches!(Document::parse(""), Err(DomError::NoRoot)));
    assert!(matches!(
        Document::parse("<a/><b/>"),
        Err(DomError::MultipleRoots)
    ));
    assert!(matches!(
        Document::parse("stray<a/>"),
        Err(DomError::StrayText)
    ));
    assert!(Document::parse("<a><b></a>").is_err());
    assert!(Document::parse("<a>").is_err());
}

#[test]
fn test_parse_rejects_bad_attributes_and_entities() {
    for text in [
        "<sounds bad=unquoted><a/></sounds>",
        r#"<sounds a="1" a="2"><a/></sounds>"#,
        "<sounds><a>&undefined;</a></sounds>",
        r#"<sounds><a x="<"/></sounds>"#,
        r#"<sounds><a x="&nope;"/></sounds>"#,
    ] {
        assert!(
            matches!(Document::parse(text), Err(DomError::Syntax { .. })),
            "accepted {text}"
        );
    }
}

#[test]
fn test_merge_files_rejects_duplicate_attribute_fragment() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.xml");
    let b = dir.path().join("b.xml");
    let out = dir.path().join("Sounds.xml");
    write(&a, "<sounds><sound id=\"a\"/></sounds>");
    write(&b, r#"<sounds><sound id="b" id="c"/></sounds>"#);

    assert!(matches!(
        merge_files(&a, &b, &out),
        Err(ManifestError::Parse { .. })
    ));
    assert!(!out.exists());
}

#[test]
fn test_parse_keeps_spaces_in_mixed_content() {
    let doc = Document::parse("<a> x <b/> y </a>").unwrap();
    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("<a> x <b/> y </a>"), "{xml}");
    assert_eq!(Document::parse(&xml).unwrap(), doc);
}

#[test]
fn test_merge_appends_children_in_order() {
    let a = Document::parse(GRAPHICS_A).unwrap();
    let b = Document::parse(GRAPHICS_B).unwrap();

    let merged = merge(&a, &b);

    assert_eq!(merged.root().name(), "graphics");
    assert_eq!(merged.root().attributes(), a.root().attributes());
    assert_eq!(
        element_names(&merged),
        vec!["sprite[ship]", "w:sprite[pilot]", "sprite[laser]"]
    );
    assert_eq!(
        merged.root().children().len(),
        a.root().children().len() + b.root().children().len()
    );
}

#[test]
fn test_merge_redeclares_namespaces_of_b() {
    let a = Document::parse("<s><a/></s>").unwrap();
    let b = Document::parse(r#"<t xmlns:x="urn:x"><x:b/><x:c xmlns:x="urn:own"/></t>"#).unwrap();

    let xml = merge(&a, &b).to_xml().unwrap();

    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<s>\n  <a/>\n  <x:b xmlns:x=\"urn:x\"/>\n  <x:c xmlns:x=\"urn:own\"/>\n</s>\n"
    );
}

#[test]
fn test_merge_skips_namespaces_already_on_a() {
    let a = Document::parse(GRAPHICS_A).unwrap();
    let b = Document::parse(r#"<t xmlns:w="urn:wings"><w:sprite/></t>"#).unwrap();

    let merged = merge(&a, &b);

    let last = merged.root().child_elements().last().unwrap();
    assert_eq!(last.name(), "w:sprite");
    assert!(last.attributes().is_empty());
}

#[test]
fn test_merge_does_not_deduplicate() {
    let a = Document::parse(GRAPHICS_B).unwrap();
    let merged = merge(&a, &a);
    assert_eq!(
        element_names(&merged),
        vec!["sprite[laser]", "sprite[laser]"]
    );
}

#[test]
fn test_to_xml_is_indented_utf8_and_reparses() {
    let merged = merge(
        &Document::parse(GRAPHICS_A).unwrap(),
        &Document::parse(GRAPHICS_B).unwrap(),
    );
    let xml = merged.to_xml().unwrap();

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains("\n  <sprite name=\"laser\"/>"));
    assert!(xml.contains("<w:sprite name=\"pilot\">walk.png</w:sprite>"));
    assert!(xml.contains("<!-- stock -->"));
    assert!(xml.ends_with("</graphics>\n"));

    assert_eq!(Document::parse(&xml).unwrap(), merged);
}

#[test]
fn test_to_xml_preserves_escapes() {
    let doc = Document::parse(r#"<s title="a &amp; b">x &lt; y</s>"#).unwrap();
    let xml = doc.to_xml().unwrap();
    assert!(xml.contains(r#"<s title="a &amp; b">x &lt; y</s>"#));
}

#[test]
fn test_merge_files_writes_destination() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.xml");
    let b = dir.path().join("b.xml");
    let out = dir.path().join("out/Graphics.xml");
    write(&a, GRAPHICS_A);
    write(&b, GRAPHICS_B);

    merge_files(&a, &b, &out).unwrap();

    let merged = read_document(&out).unwrap();
    assert_eq!(merged.root().name(), "graphics");
    assert_eq!(element_names(&merged).len(), 3);
}

#[test]
fn test_merge_files_writes_nothing_on_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.xml");
    let b = dir.path().join("b.xml");
    let out = dir.path().join("Graphics.xml");
    write(&a, GRAPHICS_A);
    write(&b, "<broken>");

    let err = merge_files(&a, &b, &out).unwrap_err();

    assert!(matches!(err, ManifestError::Parse { .. }));
    assert!(!out.exists());
}

#[test]
fn test_merge_all_copies_first_fragment_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let fragment = dir.path().join("mods/a/Sounds.xml");
    let dest = dir.path().join("sound/Sounds.xml");
    write(&fragment, GRAPHICS_B);

    let folded = merge_all(std::slice::from_ref(&fragment), &dest).unwrap();

    assert_eq!(folded, 1);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), GRAPHICS_B);
}

#[test]
fn test_merge_all_folds_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let fragments: Vec<PathBuf> = ["one", "two", "three"]
        .iter()
        .map(|name| {
            let path = dir.path().join(format!("{name}.xml"));
            write(&path, &format!(r#"<sounds from="{name}"><sound id="{name}"/></sounds>"#));
            path
        })
        .collect();
    let dest = dir.path().join("Sounds.xml");

    merge_all(&fragments, &dest).unwrap();

    let merged = read_document(&dest).unwrap();
    assert_eq!(
        merged.root().attributes(),
        vec![("from".to_string(), "one".to_string())]
    );
    assert_eq!(
        element_names(&merged),
        vec!["sound[one]", "sound[two]", "sound[three]"]
    );
}

#[test]
fn test_merge_all_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.xml");
    let bad = dir.path().join("bad.xml");
    let late = dir.path().join("late.xml");
    write(&good, "<sounds><sound id=\"good\"/></sounds>");
    write(&bad, "<sounds><sound></sounds>");
    write(&late, "<sounds><sound id=\"late\"/></sounds>");
    let dest = dir.path().join("Sounds.xml");

    let result = merge_all(&[good.clone(), bad, late], &dest);

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(&dest).unwrap(),
        std::fs::read_to_string(&good).unwrap()
    );
}

#[test]
fn test_merge_all_without_fragments_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("Graphics.xml");
    assert_eq!(merge_all(&[], &dest).unwrap(), 0);
    assert!(!dest.exists());
}
