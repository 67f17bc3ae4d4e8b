//! Serialize laid-out cards to SVG and to a standalone HTML page.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::card::{CardView, GRAMMAR_POINT_BADGE};
use crate::geometry::Vec2f;
use crate::layout::{TextItem, TextRole};
use crate::overlay::{Shape, SvgCanvas};
use crate::style::{Rgb, StyleTable};

const FONT_FAMILY: &str = "Pretendard, 'Noto Sans KR', system-ui, sans-serif";

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn points_attr(points: &[Vec2f]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_color(item: &TextItem, styles: &StyleTable) -> Rgb {
    match &item.role {
        TextRole::ChunkText => styles.chunk_text,
        TextRole::ModifierLabel => styles.modifier_label,
        TextRole::ModifierText | TextRole::Plain => styles.plain_text,
        TextRole::Tag(tag) => styles.role(tag).text,
    }
}

/// Generate a standalone SVG document for one card's diagram area.
pub fn card_svg(view: &CardView<'_, SvgCanvas>, styles: &StyleTable) -> String {
    let mut out = String::with_capacity(2048);
    write_card_svg(&mut out, view, styles, 0);
    out
}

fn write_card_svg(out: &mut String, view: &CardView<'_, SvgCanvas>, styles: &StyleTable, level: usize) {
    let layout = &view.layout;
    let (w, h) = (layout.width, layout.height);

    indent(out, level);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"syntax-diagram\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.2} {h:.2}\">\n"
    ));
    indent(out, level + 1);
    out.push_str(&format!(
        "<rect x=\"0.5\" y=\"0.5\" width=\"{:.2}\" height=\"{:.2}\" rx=\"12\" fill=\"{}\" stroke=\"{}\"/>\n",
        (w - 1.0).max(0.0),
        (h - 1.0).max(0.0),
        styles.background,
        styles.border
    ));

    indent(out, level + 1);
    out.push_str(&format!(
        "<g class=\"segments\" font-family=\"{}\">\n",
        encode_double_quoted_attribute(FONT_FAMILY)
    ));
    for u in &layout.underlines {
        indent(out, level + 2);
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            u.from.x,
            u.from.y,
            u.to.x,
            u.to.y,
            styles.role(&u.tag).underline,
            u.width
        ));
    }
    for t in &layout.texts {
        indent(out, level + 2);
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" xml:space=\"preserve\">{}</text>\n",
            t.origin.x,
            t.origin.y,
            t.font.size,
            if t.font.bold { 600 } else { 400 },
            text_color(t, styles),
            encode_text(&t.text)
        ));
    }
    indent(out, level + 1);
    out.push_str("</g>\n");

    write_overlay(out, &view.canvas, styles, level + 1);

    indent(out, level);
    out.push_str("</svg>\n");
}

fn write_overlay(out: &mut String, canvas: &SvgCanvas, styles: &StyleTable, level: usize) {
    indent(out, level);
    out.push_str(&format!(
        "<g class=\"arrows\" stroke=\"{}\" fill=\"{}\">\n",
        styles.arrow, styles.arrow
    ));
    for shape in &canvas.shapes {
        indent(out, level + 1);
        match shape {
            Shape::Polyline { points, width } => out.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke-width=\"{}\"/>\n",
                points_attr(points),
                width
            )),
            Shape::Polygon { points } => out.push_str(&format!(
                "<polygon points=\"{}\" stroke=\"none\"/>\n",
                points_attr(points)
            )),
        }
    }
    indent(out, level);
    out.push_str("</g>\n");
}

/// Generate an HTML page listing every card in order.
///
/// Cards are numbered from 1. Each shows its sentence, the diagram, the
/// translation and the grammar point note.
pub fn cards_html(views: &[CardView<'_, SvgCanvas>], styles: &StyleTable) -> String {
    let mut out = String::with_capacity(4096 * views.len().max(1));
    out.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n  <title>Syntax cards</title>\n");
    out.push_str("  <style>\n");
    out.push_str(&format!(
        "    body {{ margin: 0; background: #f5f6fb; color: #0f172a; font-family: {FONT_FAMILY}; }}\n"
    ));
    out.push_str("    main { max-width: 64rem; margin: 0 auto; padding: 2rem 1rem; display: flex; flex-direction: column; gap: 1.5rem; }\n");
    out.push_str("    .card { background: #fff; border: 1px solid #e2e8f0; border-radius: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.05); }\n");
    out.push_str("    .card header { display: flex; gap: 1rem; align-items: flex-start; padding: 1rem 1.5rem; border-bottom: 1px solid #f1f5f9; }\n");
    out.push_str("    .index { width: 2rem; height: 2rem; border-radius: 9999px; background: #4f46e5; color: #fff; font-weight: 700; display: flex; align-items: center; justify-content: center; }\n");
    out.push_str("    .sentence { flex: 1; margin: 0; font-size: 17px; font-weight: 600; line-height: 1.75rem; }\n");
    out.push_str("    .body { padding: 1.25rem 1.5rem; display: flex; flex-direction: column; gap: 1rem; }\n");
    out.push_str("    .translation { margin: 0; font-size: 15px; line-height: 1.75rem; color: #334155; }\n");
    out.push_str("    .grammar { display: flex; gap: .75rem; align-items: center; border: 1px solid #e2e8f0; border-radius: .75rem; background: #f5f7fb; padding: .75rem 1rem; }\n");
    out.push_str("    .badge { border-radius: 9999px; background: #eef2ff; color: #4f46e5; padding: .25rem .75rem; font-size: 14px; font-weight: 600; }\n");
    out.push_str("    .grammar p { margin: 0; font-size: 14px; color: #334155; }\n");
    out.push_str("  </style>\n</head>\n<body>\n<main>\n");

    for (i, view) in views.iter().enumerate() {
        write_card_html(&mut out, i + 1, view, styles);
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn write_card_html(out: &mut String, index: usize, view: &CardView<'_, SvgCanvas>, styles: &StyleTable) {
    let data = view.data;
    indent(out, 1);
    out.push_str("<article class=\"card\">\n");
    indent(out, 2);
    out.push_str(&format!(
        "<header><div class=\"index\">{}</div><p class=\"sentence\">{}</p></header>\n",
        index,
        encode_text(&data.sentence)
    ));
    indent(out, 2);
    out.push_str("<div class=\"body\">\n");
    write_card_svg(out, view, styles, 3);
    indent(out, 3);
    out.push_str(&format!(
        "<p class=\"translation\">{}</p>\n",
        encode_text(&data.translation)
    ));
    indent(out, 3);
    out.push_str(&format!(
        "<div class=\"grammar\"><span class=\"badge\">{}</span><p>{}</p></div>\n",
        GRAMMAR_POINT_BADGE,
        encode_text(view.grammar_point())
    ));
    indent(out, 2);
    out.push_str("</div>\n");
    indent(out, 1);
    out.push_str("</article>\n");
}
