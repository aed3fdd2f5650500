//! The pagination state machine: overflow detection, continuation
//! pages, cursor monotonicity, and safe-area containment.

mod common;

use common::{page_config, recording_document, texts_on};
use pdf_compose::backend::Op;
use pdf_compose::{
    HeadingLevel, Heading, ListConfig, ListItem, List, Paragraph, Pt, Table, TextAlignment,
    TextStyle,
};

/// S3: content height 700, twenty 50 pt paragraphs. Fourteen fill the
/// first page exactly; the fifteenth opens page two.
#[test]
fn page_turn_happens_exactly_when_content_runs_out() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let style = TextStyle::new(doc.default_font()).with_size(Pt(10.0));

    for i in 0..20 {
        let paragraph = Paragraph::from_text(format!("p{i}"), style)
            .unwrap()
            .with_line_spacing(5.0); // 10pt * 5.0 = 50pt per paragraph
        doc.add_paragraph(&paragraph);
    }

    assert_eq!(doc.page_count(), 2);
    let backend = doc.finish();
    assert_eq!(texts_on(&backend, 0).len(), 14);
    assert_eq!(texts_on(&backend, 1).len(), 6);
    // the first block of page two starts back at the content top
    assert_eq!(texts_on(&backend, 1)[0].2, Pt(750.0));
}

#[test]
fn cursor_only_moves_down_within_a_page() {
    let mut doc = recording_document(page_config(595.0, 842.0, 50.0));
    let font = doc.default_font();
    let style = TextStyle::new(font).with_size(Pt(12.0));

    let mut last_y = doc.cursor().y;
    let heading = Heading::new("Section", HeadingLevel::H2, font).unwrap();
    let paragraph = Paragraph::from_text("some words to lay out", style).unwrap();
    let list = List::new(ListConfig {
        items: vec![ListItem::plain("first"), ListItem::plain("second")],
        font: Some(font),
        ..ListConfig::default()
    })
    .unwrap();
    let table = Table::new(
        vec![vec!["h".to_string()], vec!["v".to_string()]],
        vec![Pt(120.0)],
        font,
    );

    doc.add_heading(&heading);
    assert!(doc.cursor().y <= last_y);
    last_y = doc.cursor().y;

    doc.add_paragraph(&paragraph);
    assert!(doc.cursor().y <= last_y);
    last_y = doc.cursor().y;

    doc.add_list(&list);
    assert!(doc.cursor().y <= last_y);
    last_y = doc.cursor().y;

    doc.add_table(&table);
    assert!(doc.cursor().y <= last_y);
    assert_eq!(doc.page_count(), 1);
}

/// Property 3: a block taller than the space left is never rendered
/// into it — the page turns first.
#[test]
fn oversized_block_opens_a_new_page_first() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let style = TextStyle::new(doc.default_font()).with_size(Pt(10.0));

    // burn most of the page: 13 * 50 = 650 of 700
    for _ in 0..13 {
        let paragraph = Paragraph::from_text("filler", style)
            .unwrap()
            .with_line_spacing(5.0);
        doc.add_paragraph(&paragraph);
    }
    let bottom = doc.content_area().y1;

    // a table too tall for the 50pt that remain
    let table = Table::new(
        vec![
            vec!["head".to_string()],
            vec!["one".to_string()],
            vec!["two".to_string()],
        ],
        vec![Pt(200.0)],
        doc.default_font(),
    );
    doc.add_table(&table);

    assert_eq!(doc.page_count(), 2);
    let backend = doc.finish();
    // nothing from the table bled onto page one
    for op in &backend.ops {
        if let Op::RectStroked { page, y, .. } = op {
            assert_eq!(*page, 1);
            assert!(*y >= bottom - Pt(1.0));
        }
    }
}

/// Property 1: across a long mixed document, every glyph, rule, and
/// rectangle lands inside the content area (1 pt tolerance).
#[test]
fn everything_stays_inside_the_safe_area() {
    let config = page_config(595.0, 842.0, 60.0);
    let mut doc = recording_document(config);
    let font = doc.default_font();
    let style = TextStyle::new(font).with_size(Pt(11.0));

    for chunk in 0..10 {
        let heading = Heading::new(format!("Chapter {chunk}"), HeadingLevel::H3, font).unwrap();
        doc.add_heading(&heading);

        // short paragraphs keep the paginator's single-line estimate
        // exact
        for _ in 0..4 {
            let paragraph = Paragraph::from_text(lipsum::lipsum(8), style)
                .unwrap()
                .with_alignment(TextAlignment::Justified);
            doc.add_paragraph(&paragraph);
        }

        let table = Table::new(
            vec![
                vec!["name".to_string(), "value".to_string()],
                vec!["alpha".to_string(), lipsum::lipsum(12)],
            ],
            vec![Pt(200.0), Pt(400.0)],
            font,
        );
        doc.add_table(&table);
    }

    assert!(doc.page_count() > 1, "the sweep must cross pages");
    let content = doc.content_area();
    let backend = doc.finish();
    let tolerance = Pt(1.0);

    for op in &backend.ops {
        match op {
            Op::Text { text, x, y, font, size, .. } => {
                let advance = pdf_compose::backend::FontMetrics::text_advance(
                    &backend, *font, *size, text,
                );
                assert!(*x >= content.x1 - tolerance, "text start {x} of {text:?}");
                assert!(*x + advance <= content.x2 + tolerance, "text end of {text:?}");
                assert!(*y >= content.y1 - tolerance, "baseline {y} of {text:?}");
                assert!(*y <= content.y2 + tolerance, "baseline {y} of {text:?}");
            }
            Op::RectStroked { x, y, width, height, .. }
            | Op::RectFilled { x, y, width, height, .. } => {
                assert!(*x >= content.x1 - tolerance);
                assert!(*x + *width <= content.x2 + tolerance);
                assert!(*y >= content.y1 - tolerance);
                assert!(*y + *height <= content.y2 + tolerance);
            }
            Op::Line { x1, x2, y1, y2, .. } => {
                assert!(*x1 >= content.x1 - tolerance && *x2 <= content.x2 + tolerance);
                assert!(*y1 >= content.y1 - tolerance && *y2 <= content.y2 + tolerance);
            }
            _ => {}
        }
    }
}

#[test]
fn explicit_page_breaks_reset_the_cursor() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let style = TextStyle::new(doc.default_font()).with_size(Pt(10.0));
    let paragraph = Paragraph::from_text("text", style).unwrap();

    doc.add_paragraph(&paragraph);
    let after_first = doc.cursor().y;
    doc.add_new_page();

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.cursor().y, Pt(750.0));
    assert!(doc.cursor().y > after_first);
    assert_eq!(doc.cursor().x, Pt(50.0));
}
