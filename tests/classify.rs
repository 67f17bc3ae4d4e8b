use syntaxcard::classify::classify;
use syntaxcard::model::Chunk;

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

#[test]
fn partitions_into_disjoint_sets() {
    let chunks = vec![
        chunk(8, 11, "sat", "v", "", false),
        chunk(0, 3, "The", "", "det", false),
        chunk(0, 7, "The cat", "s", "", false),
        chunk(4, 7, "cat", "", "", false),
    ];
    let c = classify(&chunks);

    let structural: Vec<&str> = c.structural.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(structural, vec!["The cat", "sat"], "structural sorted by start");
    let modifiers: Vec<&str> = c.modifiers.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(modifiers, vec!["The"]);

    // Untagged chunks belong to neither set.
    assert_eq!(c.combined.len(), 3);
    assert!(c.combined.iter().all(|x| x.text != "cat"));
    for s in &c.structural {
        assert!(!c.modifiers.iter().any(|m| std::ptr::eq(*m, *s)));
    }
}

#[test]
fn combined_is_start_ordered_and_stable() {
    let chunks = vec![
        chunk(5, 9, "m1", "", "adv", true),
        chunk(0, 4, "s", "s", "", false),
        chunk(5, 9, "v", "v", "", false),
        chunk(2, 4, "m0", "", "adj", false),
    ];
    let c = classify(&chunks);
    let starts: Vec<usize> = c.combined.iter().map(|c| c.start).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));

    // On equal starts, structural chunks come first because they are
    // concatenated first and the sort is stable.
    let texts: Vec<&str> = c.combined.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["s", "m0", "v", "m1"]);
}

#[test]
fn empty_input_yields_empty_output() {
    let c = classify(&[]);
    assert!(c.structural.is_empty());
    assert!(c.modifiers.is_empty());
    assert!(c.combined.is_empty());
}

#[test]
fn arrow_bearing_keeps_input_order() {
    let chunks = vec![
        chunk(10, 12, "b", "", "adv", true),
        chunk(0, 2, "a", "", "adj", true),
        chunk(4, 6, "c", "", "det", false),
    ];
    let c = classify(&chunks);
    let arrows: Vec<&str> = c.arrow_bearing().map(|c| c.text.as_str()).collect();
    assert_eq!(arrows, vec!["b", "a"]);
}

#[test]
fn role_lookup_is_case_insensitive() {
    let chunks = vec![chunk(0, 2, "is", "SC", "", false)];
    let c = classify(&chunks);
    assert!(c.has_role("sc"));
    assert!(!c.has_role("o"));
}
