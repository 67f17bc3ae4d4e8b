use syntaxcard::classify::classify;
use syntaxcard::containment::resolve_containment;
use syntaxcard::model::{Chunk, SyntaxData};
use syntaxcard::segment::{Run, Segment, build_segments};

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

fn segments_for(data: &SyntaxData) -> Vec<Segment<'_>> {
    let c = classify(&data.chunks);
    let containment = resolve_containment(&c.combined);
    let display = containment.display_chunks(&c.combined);
    build_segments(data, &display, &containment)
}

#[test]
fn the_cat_sat() {
    let data = SyntaxData {
        sentence: "The cat sat.".into(),
        translation: "고양이가 앉았다.".into(),
        chunks: vec![
            chunk(0, 3, "The", "", "det", false),
            chunk(0, 7, "The cat", "s", "", false),
            chunk(8, 11, "sat", "v", "", false),
        ],
    };
    let c = classify(&data.chunks);
    assert_eq!(c.modifiers.len(), 1);
    assert_eq!(c.arrow_bearing().count(), 0);

    let segs = segments_for(&data);
    assert_eq!(segs.len(), 4);
    match &segs[0] {
        Segment::Structural { chunk, runs } => {
            assert_eq!(chunk.tag(), "S");
            assert_eq!(runs, &vec![Run::Text { text: "The cat" }]);
        }
        other => panic!("expected subject, got {:?}", other),
    }
    assert!(matches!(&segs[1], Segment::Modifier { chunk } if chunk.gram_ele == "det"));
    match &segs[2] {
        Segment::Structural { chunk, .. } => assert_eq!(chunk.tag(), "V"),
        other => panic!("expected verb, got {:?}", other),
    }
    assert_eq!(segs[3], Segment::Tail { offset: 11, text: "." });
}

#[test]
fn gaps_between_chunks_are_not_emitted() {
    // Only the remainder after the last chunk is kept; the space between
    // "The cat" and "sat" does not appear anywhere in the output.
    let data = SyntaxData {
        sentence: "The cat sat on it.".into(),
        translation: String::new(),
        chunks: vec![
            chunk(0, 7, "The cat", "s", "", false),
            chunk(8, 11, "sat", "v", "", false),
        ],
    };
    let segs = segments_for(&data);
    let mut text = String::new();
    for seg in &segs {
        match seg {
            Segment::Structural { runs, .. } => {
                for run in runs {
                    if let Run::Text { text: t } = run {
                        text.push_str(t);
                    }
                }
            }
            Segment::Modifier { chunk } => text.push_str(&chunk.text),
            Segment::Tail { text: t, .. } => text.push_str(t),
        }
    }
    assert_eq!(text, "The catsat on it.");
    assert!(text.ends_with(data.tail_from(11)));
}

#[test]
fn nested_modifier_splits_container_text() {
    let data = SyntaxData {
        sentence: "I met a friend of mine.".into(),
        translation: String::new(),
        chunks: vec![
            chunk(0, 1, "I", "s", "", false),
            chunk(2, 5, "met", "v", "", false),
            chunk(6, 22, "a friend of mine", "o", "", false),
            chunk(15, 22, "of mine", "", "전치사구", true),
        ],
    };
    let segs = segments_for(&data);
    assert_eq!(segs.len(), 4);
    match &segs[2] {
        Segment::Structural { chunk, runs } => {
            assert_eq!(chunk.text, "a friend of mine");
            assert_eq!(runs.len(), 2);
            assert_eq!(runs[0], Run::Text { text: "a friend " });
            assert!(matches!(runs[1], Run::Nested { chunk } if chunk.text == "of mine"));
        }
        other => panic!("expected object, got {:?}", other),
    }
    assert_eq!(segs[3], Segment::Tail { offset: 22, text: "." });
}

#[test]
fn no_tail_when_last_chunk_reaches_the_end() {
    let data = SyntaxData {
        sentence: "Run".into(),
        translation: String::new(),
        chunks: vec![chunk(0, 3, "Run", "v", "", false)],
    };
    let segs = segments_for(&data);
    assert_eq!(segs.len(), 1);
}

#[test]
fn empty_chunk_list_emits_whole_sentence() {
    let data = SyntaxData {
        sentence: "Hello there.".into(),
        translation: String::new(),
        chunks: vec![],
    };
    let segs = segments_for(&data);
    assert_eq!(segs, vec![Segment::Tail { offset: 0, text: "Hello there." }]);
}

#[test]
fn tail_starts_at_last_chunk_end_even_when_cursor_moves_back() {
    // The determiner sorts after the subject it sits inside, so the cursor
    // lands on its end and the tail repeats "cat".
    let data = SyntaxData {
        sentence: "The cat.".into(),
        translation: String::new(),
        chunks: vec![
            chunk(0, 7, "The cat", "s", "", false),
            chunk(0, 3, "The", "", "det", false),
        ],
    };
    let segs = segments_for(&data);
    assert_eq!(segs.len(), 3);
    assert!(matches!(&segs[1], Segment::Modifier { chunk } if chunk.gram_ele == "det"));
    assert_eq!(segs[2], Segment::Tail { offset: 3, text: " cat." });
}
