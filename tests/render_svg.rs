use syntaxcard::card::{CardView, RenderOptions};
use syntaxcard::model::{Chunk, SyntaxData};
use syntaxcard::render::{card_svg, cards_html};
use syntaxcard::style::StyleTable;

fn chunk(start: usize, end: usize, text: &str, sen: &str, gram: &str, modifier: bool) -> Chunk {
    Chunk {
        start,
        end,
        text: text.into(),
        sen_ele: sen.into(),
        gram_ele: gram.into(),
        modifier,
        rend_type: String::new(),
        explanation: None,
    }
}

fn friend() -> SyntaxData {
    SyntaxData {
        sentence: "I met a friend of mine.".into(),
        translation: "나는 내 친구를 만났다.".into(),
        chunks: vec![
            chunk(0, 1, "I", "s", "", false),
            chunk(2, 5, "met", "v", "", false),
            chunk(6, 22, "a friend of mine", "o", "", false),
            chunk(15, 22, "of mine", "", "전치사구", true),
        ],
    }
}

#[test]
fn svg_contains_labels_tags_and_arrow() {
    let data = friend();
    let view = CardView::render(&data, &RenderOptions::default());
    let styles = StyleTable::default();
    let svg = card_svg(&view, &styles);

    let doc = roxmltree::Document::parse(&svg).expect("well-formed SVG");
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");

    let texts: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text())
        .collect();
    for expected in ["I", "S", "met", "V", "a friend ", "O", "전치사구", "(of mine)", "."] {
        assert!(texts.contains(&expected), "missing text {expected:?} in {texts:?}");
    }

    let polylines = doc.descendants().filter(|n| n.has_tag_name("polyline")).count();
    let polygons = doc.descendants().filter(|n| n.has_tag_name("polygon")).count();
    assert_eq!((polylines, polygons), (1, 1));

    let underlines: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("line")).collect();
    assert_eq!(underlines.len(), 3);
    assert_eq!(underlines[0].attribute("stroke"), Some("#0ea5e9"));
    assert_eq!(underlines[1].attribute("stroke"), Some("#f43f5e"));
}

#[test]
fn text_is_escaped() {
    let data = SyntaxData {
        sentence: "a<b & c".into(),
        translation: String::new(),
        chunks: vec![chunk(0, 3, "a<b", "s", "", false)],
    };
    let view = CardView::render(&data, &RenderOptions::default());
    let svg = card_svg(&view, &StyleTable::default());
    let doc = roxmltree::Document::parse(&svg).expect("escaped SVG parses");
    assert!(doc.descendants().any(|n| n.text() == Some("a<b")));
    assert!(doc.descendants().any(|n| n.text() == Some(" & c")));
}

#[test]
fn html_lists_cards_in_order_with_grammar_point() {
    let first = friend();
    let second = SyntaxData {
        sentence: "She is a doctor.".into(),
        translation: "그녀는 의사이다.".into(),
        chunks: vec![
            chunk(0, 3, "She", "s", "", false),
            chunk(4, 6, "is", "v", "", false),
            chunk(7, 15, "a doctor", "sc", "", false),
        ],
    };
    let options = RenderOptions::default();
    let views = vec![CardView::render(&first, &options), CardView::render(&second, &options)];
    let html = cards_html(&views, &StyleTable::default());

    let a = html.find("I met a friend of mine.").unwrap();
    let b = html.find("She is a doctor.").unwrap();
    assert!(a < b);
    assert!(html.contains("<div class=\"index\">1</div>"));
    assert!(html.contains("<div class=\"index\">2</div>"));
    assert!(html.contains("주요 성분을 확인하세요."));
    assert!(html.contains("be동사 + 보어(SC) 형태로 주어를 설명하거나 정의합니다."));
    assert!(html.contains("나는 내 친구를 만났다."));
    assert_eq!(html.matches("<svg").count(), 2);
}
