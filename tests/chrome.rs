//! Repeating chrome: header and footer bands, logo, and page numbering
//! with correct totals on every page.

mod common;

use common::{page_config, recording_document, texts_on};
use pdf_compose::backend::Op;
use pdf_compose::{
    Config, Logo, LogoStyle, Margins, NumberingFormat, NumberingPosition, PageNumbering,
    PageSection, PageSize, Paragraph, Pt, SafeArea, TextStyle,
};

fn banded_config() -> Config {
    Config {
        page_size: PageSize::new(Pt(400.0), Pt(800.0)),
        safe_area: SafeArea::new(Margins::all(Pt(50.0)))
            .with_header(true)
            .with_footer(true),
        ..Config::default()
    }
}

/// S4: a three-page document with WITH_TOTAL numbering reads
/// "1 de 3", "2 de 3", "3 de 3".
#[test]
fn footer_numbering_carries_final_totals() {
    let mut doc = recording_document(banded_config());
    let font = doc.default_font();
    let numbering = PageNumbering::new(font).with_format(NumberingFormat::WithTotal);
    doc.set_footer(PageSection::new(font).with_page_numbering(numbering));

    doc.add_new_page();
    doc.add_new_page();
    assert_eq!(doc.page_count(), 3);

    let backend = doc.finish();
    for (page, expected) in [(0, "1 de 3"), (1, "2 de 3"), (2, "3 de 3")] {
        let texts = texts_on(&backend, page);
        assert!(
            texts.iter().any(|(t, _, _)| t == expected),
            "page {page} should carry {expected:?}, got {texts:?}"
        );
    }
}

#[test]
fn header_footer_and_logo_repeat_on_every_page() {
    let mut doc = recording_document(banded_config());
    let font = doc.default_font();

    doc.set_header(
        PageSection::new(font)
            .with_left_text("Acme Corp")
            .with_center_text("Annual Report"),
    );
    doc.set_footer(PageSection::new(font).with_center_text("confidential"));
    doc.set_logo(Logo::new("ACME", LogoStyle::new(font)));

    doc.add_new_page();
    doc.add_new_page();

    let backend = doc.finish();
    for page in 0..3 {
        let texts: Vec<String> = texts_on(&backend, page)
            .into_iter()
            .map(|(t, _, _)| t)
            .collect();
        for expected in ["Acme Corp", "Annual Report", "confidential", "ACME"] {
            assert!(
                texts.contains(&expected.to_string()),
                "page {page} misses {expected:?}: {texts:?}"
            );
        }
    }
}

#[test]
fn header_sits_above_the_content_area_and_footer_below() {
    let mut doc = recording_document(banded_config());
    let font = doc.default_font();
    doc.set_header(PageSection::new(font).with_left_text("top"));
    doc.set_footer(PageSection::new(font).with_left_text("bottom"));
    let content = doc.content_area();

    let backend = doc.finish();
    let texts = texts_on(&backend, 0);
    let header_y = texts.iter().find(|(t, _, _)| t == "top").unwrap().2;
    let footer_y = texts.iter().find(|(t, _, _)| t == "bottom").unwrap().2;

    assert!(header_y > content.y2, "header renders in the top band");
    assert_eq!(header_y, Pt(800.0 - 50.0 - 5.0));
    assert!(footer_y < content.y1, "footer renders in the bottom band");
    assert_eq!(footer_y, Pt(50.0));
}

#[test]
fn standalone_numbering_without_a_footer() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let font = doc.default_font();
    doc.set_page_numbering(
        PageNumbering::new(font)
            .with_format(NumberingFormat::DashTotal)
            .with_position(NumberingPosition::Bottom),
    );
    doc.add_new_page();

    let backend = doc.finish();
    let first = texts_on(&backend, 0);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].0, "1 - 2");
    // bottom position: margin_y + font size
    assert_eq!(first[0].2, Pt(30.0 + 10.0));
    assert_eq!(texts_on(&backend, 1)[0].0, "2 - 2");
}

#[test]
fn logo_consumes_content_height() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let font = doc.default_font();
    let top = doc.cursor().y;

    let logo = Logo::new("ACME", LogoStyle::new(font));
    let logo_height = logo.total_height();
    doc.set_logo(logo);
    assert_eq!(doc.cursor().y, top - logo_height);

    // content after the logo starts below it, on every page
    let style = TextStyle::new(font).with_size(Pt(10.0));
    let paragraph = Paragraph::from_text("body", style).unwrap();
    doc.add_paragraph(&paragraph);
    doc.add_new_page();
    assert_eq!(doc.cursor().y, top - logo_height);

    let backend = doc.finish();
    let body = texts_on(&backend, 0)
        .into_iter()
        .find(|(t, _, _)| t == "body")
        .unwrap();
    assert_eq!(body.2, top - logo_height);
}

#[test]
fn logo_rule_spans_the_margins() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let font = doc.default_font();
    doc.set_logo(Logo::new("ACME", LogoStyle::new(font)));

    let backend = doc.finish();
    let rule = backend
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Line { x1, x2, y1, .. } => Some((*x1, *x2, *y1)),
            _ => None,
        })
        .expect("logo separator rule");
    assert_eq!(rule.0, Pt(50.0));
    assert_eq!(rule.1, Pt(350.0));
    // fontSize/2 + 5 below the title baseline
    assert_eq!(rule.2, Pt(750.0 - 6.0 - 5.0));
}
