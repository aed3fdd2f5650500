//! Block-level behaviour observed end to end: table scaling and cell
//! wrap, list nesting and markers, image alignment and captions.

mod common;

use common::{page_config, recording_document, stroked_rects_on, texts_on};
use pdf_compose::backend::Op;
use pdf_compose::{
    HorizontalAlignment, ImageBlock, ListConfig, ListItem, List, Pt, Table,
};

/// S2 / property 8: columns {100,100,100} into 150 pt scale to
/// {50,50,50}, and an over-wide cell word breaks by character, growing
/// the row.
#[test]
fn table_scales_columns_and_wraps_cells() {
    // page 250 - margins 100 = 150pt available
    let mut doc = recording_document(page_config(250.0, 800.0, 50.0));
    let table = Table::new(
        vec![
            vec!["h1".to_string(), "h2".to_string(), "h3".to_string()],
            vec!["aaaaaaaaa".to_string(), "b".to_string(), "c".to_string()],
        ],
        vec![Pt(100.0), Pt(100.0), Pt(100.0)],
        doc.default_font(),
    );

    let measured = table.measure_height(doc.backend(), Pt(150.0));
    doc.add_table(&table);
    let backend = doc.finish();

    let rects = stroked_rects_on(&backend, 0);
    assert_eq!(rects.len(), 6, "two rows of three cells");
    let total: f32 = rects.iter().take(3).map(|(_, _, w, _)| **w).sum();
    assert!((total - 150.0).abs() < 1e-3, "scaled widths sum to the available width");
    for (_, _, width, _) in &rects {
        assert!((**width - 50.0).abs() < 1e-3);
    }

    // "aaaaaaaaa" is 54pt at size 12, the cell fits 40pt: wraps to 2+
    // lines, so the data row is at least 2 * 12 + 20 tall
    let data_row_height = rects[3].3;
    assert!(data_row_height >= Pt(2.0 * 12.0 + 20.0));
    // and the cell text was split, not dropped
    let rejoined: String = texts_on(&backend, 0)
        .iter()
        .map(|(t, _, _)| t.as_str())
        .filter(|t| t.starts_with('a'))
        .collect();
    assert_eq!(rejoined, "aaaaaaaaa");

    // the paginator saw the grown height: 32pt header row + 44pt data row
    assert!((measured - Pt(76.0)).abs() < Pt(1e-3));
}

#[test]
fn header_row_is_filled_and_recoloured() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let table = Table::new(
        vec![vec!["head".to_string()], vec!["data".to_string()]],
        vec![Pt(150.0)],
        doc.default_font(),
    );
    doc.add_table(&table);
    let backend = doc.finish();

    let fills: Vec<_> = backend
        .ops
        .iter()
        .filter(|op| matches!(op, Op::RectFilled { .. }))
        .collect();
    assert_eq!(fills.len(), 1, "only the header row is filled");
}

#[test]
fn disabling_the_header_drops_the_fill() {
    let mut doc = recording_document(page_config(400.0, 800.0, 50.0));
    let table = Table::new(
        vec![vec!["head".to_string()], vec!["data".to_string()]],
        vec![Pt(150.0)],
        doc.default_font(),
    )
    .with_header(false);
    doc.add_table(&table);
    let backend = doc.finish();
    assert!(!backend.ops.iter().any(|op| matches!(op, Op::RectFilled { .. })));
}

/// S5: ordered list with nested children; bullet indents step by 20 pt
/// per level and child numbering restarts.
#[test]
fn nested_ordered_list_markers_and_indents() {
    let mut doc = recording_document(page_config(500.0, 800.0, 50.0));
    let font = doc.default_font();
    let list = List::new(ListConfig {
        items: vec![
            ListItem::plain("A"),
            ListItem::plain("B").with_children(vec![
                ListItem::plain("B.1"),
                ListItem::plain("B.2"),
            ]),
        ],
        ordered: true,
        font: Some(font),
        ..ListConfig::default()
    })
    .unwrap();

    doc.add_list(&list);
    let backend = doc.finish();
    let texts = texts_on(&backend, 0);

    let markers: Vec<_> = texts
        .iter()
        .filter(|(t, _, _)| t.ends_with('.'))
        .collect();
    assert_eq!(
        markers.iter().map(|(t, _, _)| t.as_str()).collect::<Vec<_>>(),
        vec!["1.", "2.", "1.", "2."],
        "child numbering restarts"
    );

    // level 1 markers at margin + 20, level 2 at margin + 40
    assert_eq!(markers[0].1, Pt(70.0));
    assert_eq!(markers[1].1, Pt(70.0));
    assert_eq!(markers[2].1, Pt(90.0));
    assert_eq!(markers[3].1, Pt(90.0));

    // item text sits bullet_spacing right of its marker
    let item_a = texts.iter().find(|(t, _, _)| t == "A").unwrap();
    assert_eq!(item_a.1, Pt(80.0));
    let item_b1 = texts.iter().find(|(t, _, _)| t == "B.1").unwrap();
    assert_eq!(item_b1.1, Pt(100.0));
}

#[test]
fn unordered_list_uses_the_bullet_character() {
    let mut doc = recording_document(page_config(500.0, 800.0, 50.0));
    let list = List::new(ListConfig {
        items: vec![ListItem::plain("only")],
        font: Some(doc.default_font()),
        ..ListConfig::default()
    })
    .unwrap();
    doc.add_list(&list);
    let backend = doc.finish();
    assert!(texts_on(&backend, 0).iter().any(|(t, _, _)| t == "\u{2022}"));
}

/// S6: a 200x100 image asked for width 400 in a 500 pt area, centred:
/// drawn at x + 50 sized 400x200, caption centred to the image window.
#[test]
fn image_centering_and_caption_follow_the_target_window() {
    let mut doc = recording_document(page_config(600.0, 800.0, 50.0));
    let font = doc.default_font();
    let id = doc.backend_mut().add_image(200.0, 100.0);

    let block = ImageBlock::new(doc.backend(), id)
        .with_width(400.0)
        .with_alignment(HorizontalAlignment::Center)
        .with_caption("caption", font);
    doc.add_image(&block);

    let top = Pt(750.0);
    let backend = doc.finish();

    let image = backend
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Image { x, y, width, height, .. } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .expect("image drawn");
    assert_eq!(image.0, Pt(100.0), "centred within the 500pt area");
    assert_eq!(image.1, top - Pt(200.0), "bottom-left origin");
    assert_eq!(image.2, Pt(400.0));
    assert_eq!(image.3, Pt(200.0));

    // caption: 7 glyphs * 5pt = 35pt wide, centred over the 400pt image
    let (caption, cx, cy) = texts_on(&backend, 0)
        .into_iter()
        .find(|(t, _, _)| t == "caption")
        .unwrap();
    assert_eq!(caption, "caption");
    assert!((*cx - (100.0 + (400.0 - 35.0) / 2.0)).abs() < 1e-3);
    assert_eq!(cy, top - Pt(200.0) - Pt(10.0) - Pt(5.0));
}

#[test]
fn rotated_images_transform_about_their_centre() {
    let mut doc = recording_document(page_config(600.0, 800.0, 50.0));
    let id = doc.backend_mut().add_image(100.0, 100.0);
    let block = ImageBlock::new(doc.backend(), id).with_rotation(90.0);
    doc.add_image(&block);

    let backend = doc.finish();
    let matrix = backend
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Transform { matrix, .. } => Some(*matrix),
            _ => None,
        })
        .expect("rotation emits a transform");

    // the pivot (image centre) must be a fixed point of the matrix
    let (cx, cy) = (100.0, 700.0);
    let px = matrix.a * cx + matrix.c * cy + matrix.e;
    let py = matrix.b * cx + matrix.d * cy + matrix.f;
    assert!((px - cx).abs() < 1e-2);
    assert!((py - cy).abs() < 1e-2);
}

#[test]
fn right_aligned_image_touches_the_right_edge() {
    let mut doc = recording_document(page_config(600.0, 800.0, 50.0));
    let id = doc.backend_mut().add_image(100.0, 50.0);
    let block = ImageBlock::new(doc.backend(), id).with_alignment(HorizontalAlignment::Right);
    doc.add_image(&block);

    let backend = doc.finish();
    let image = backend
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Image { x, width, .. } => Some((*x, *width)),
            _ => None,
        })
        .unwrap();
    assert_eq!(*image.0 + *image.1, 550.0, "flush with the content right edge");
}
