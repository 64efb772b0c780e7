//! Parse-render-check tests over complete ATF records

use atf2cts::adapters::atf::parse_atf;
use atf2cts::core::export::extract_metadata;
use atf2cts::core::transform::{render_document, RenderOptions};

const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

const LETTER: &str = "&P100001 = Letter to the king
#atf: lang akk
@tablet
@obverse
1. a-na _{d}utu_
#tr.en: to Shamash
#tr.ts: ana Šamaš
2. sza-ru-um
#note: reading -- uncertain
$ rest broken
@reverse
1'. _lugal_-ma
@translation parallel en project
@obverse
1. To Shamash
2. the king <sic>
";

fn render(atf: &str) -> String {
    let doc = parse_atf(atf).unwrap();
    render_document(&doc, &RenderOptions::default()).unwrap()
}

fn divs<'a, 'i>(
    doc: &'a roxmltree::Document<'i>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'i>> {
    doc.descendants().filter(|n| n.has_tag_name((TEI_NS, "div")))
}

#[test]
fn test_rendered_letter_is_well_formed() {
    let xml = render(LETTER);
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let root = doc.root_element();
    assert!(root.has_tag_name((TEI_NS, "TEI")));

    let text = doc
        .descendants()
        .find(|n| n.has_tag_name((TEI_NS, "text")))
        .unwrap();
    assert_eq!(text.attribute("n"), Some("urn:cts:cdli:test.P100001"));
}

#[test]
fn test_edition_structure_and_normalization() {
    let xml = render(LETTER);
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let edition = divs(&doc)
        .find(|n| n.attribute("type") == Some("edition"))
        .unwrap();
    let parts: Vec<&str> = edition
        .descendants()
        .filter(|n| n.has_tag_name((TEI_NS, "div")))
        .filter_map(|n| n.attribute("n"))
        .collect();
    assert_eq!(parts, ["tablet", "obverse", "reverse"]);

    assert!(xml.contains(
        r#"<l n="1">a-na <c type="sign" subtype="logo"><c type="determinative">d</c>utu</c></l>"#
    ));
    assert!(xml.contains(r#"<l n="2">ša-ru-um</l>"#));
    assert!(xml.contains("<!-- Note: reading - - uncertain -->"));
    assert!(xml.contains("<!-- State: rest broken -->"));
}

#[test]
fn test_translations_are_rendered_and_bucketed() {
    let xml = render(LETTER);
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let translations: Vec<_> = divs(&doc)
        .filter(|n| n.attribute("type") == Some("translation"))
        .collect();
    assert_eq!(translations.len(), 3);

    let parallel = translations[0];
    let lines: Vec<String> = parallel
        .descendants()
        .filter(|n| n.has_tag_name((TEI_NS, "l")))
        .map(|n| n.text().unwrap_or_default().to_string())
        .collect();
    assert_eq!(lines, ["To Shamash", "the king <sic>"]);

    let langs: Vec<_> = translations[1..]
        .iter()
        .map(|n| n.attribute(("http://www.w3.org/XML/1998/namespace", "lang")))
        .collect();
    assert_eq!(langs, [Some("en"), Some("akk")]);
    assert!(xml.contains(r#"<l n="1">ana Šamaš</l>"#));
}

#[test]
fn test_metadata_extraction_of_rendered_letter() {
    let rendered = extract_metadata(&render(LETTER)).unwrap();
    assert_eq!(rendered.urn.as_str(), "urn:cts:cdli:test.P100001");
    assert_eq!(rendered.language.as_deref(), Some("akk"));
    assert_eq!(rendered.title, "Letter to the king");
}

#[test]
fn test_custom_textgroup() {
    let doc = parse_atf("&P7 = Seven\n1. a\n").unwrap();
    let xml = render_document(&doc, &RenderOptions::new("urn:cts:cdli:letters", true)).unwrap();
    let rendered = extract_metadata(&xml).unwrap();
    assert_eq!(rendered.urn.as_str(), "urn:cts:cdli:letters.P7");
    assert_eq!(rendered.language, None);
}

#[test]
fn test_unbalanced_logogram_is_not_well_formed() {
    let xml = render("&P8 = Eight\n1. lugal_\n");
    assert!(extract_metadata(&xml).is_err());
}
