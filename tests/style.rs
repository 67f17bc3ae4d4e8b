use syntaxcard::style::{Rgb, StyleTable, parse_color};

#[test]
fn role_lookup_is_case_insensitive_with_fallback() {
    let styles = StyleTable::default();
    assert_eq!(styles.role("S"), styles.role("s"));
    assert_eq!(styles.role("sc"), styles.role("o"));
    assert_eq!(styles.role("xyz"), styles.fallback);
    assert_eq!(styles.role(""), styles.fallback);
}

#[test]
fn parses_hex_and_named_colors() {
    assert_eq!(parse_color("#2563eb"), Some(Rgb(0x25, 0x63, 0xeb)));
    assert_eq!(parse_color("#fff"), Some(Rgb(255, 255, 255)));
    assert_eq!(parse_color(" Black "), Some(Rgb(0, 0, 0)));
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("#gggggg"), None);
    assert_eq!(parse_color("chartreuse-ish"), None);
    assert_eq!(Rgb(0x0e, 0xa5, 0xe9).to_hex(), "#0ea5e9");
}

#[test]
fn theme_overrides_subset() -> anyhow::Result<()> {
    let mut styles = StyleTable::default();
    let before_v = styles.role("v");
    styles.merge_json(
        r##"{
            "roles": { "S": { "underline": "#000000", "text": "#111111" }, "oc": { "underline": "amber", "text": "amber" } },
            "arrow": "#ff0000"
        }"##,
    )?;
    assert_eq!(styles.role("s").underline, Rgb(0, 0, 0));
    assert_eq!(styles.role("OC").text, Rgb(0xd9, 0x77, 0x06));
    assert_eq!(styles.role("v"), before_v);
    assert_eq!(styles.arrow, Rgb(255, 0, 0));
    Ok(())
}

#[test]
fn theme_rejects_bad_colors_and_unknown_fields() {
    let mut styles = StyleTable::default();
    assert!(styles.merge_json(r#"{ "arrow": "nope" }"#).is_err());
    assert!(styles.merge_json(r##"{ "arrows": "#000000" }"##).is_err());
}
