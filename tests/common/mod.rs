#![allow(dead_code)]

use pdf_compose::backend::{Op, RecordingBackend};
use pdf_compose::{Config, Document, Margins, PageSize, Pt, SafeArea};

/// A document over the recording backend, for op-log assertions.
pub fn recording_document(config: Config) -> Document<RecordingBackend> {
    Document::with_backend(config, RecordingBackend::new()).expect("valid configuration")
}

/// A config with a custom page and uniform margins, bands disabled.
pub fn page_config(width: f32, height: f32, margin: f32) -> Config {
    Config {
        page_size: PageSize::new(Pt(width), Pt(height)),
        safe_area: SafeArea::new(Margins::all(Pt(margin))),
        ..Config::default()
    }
}

/// Text ops on a page as (text, x, y), in draw order.
pub fn texts_on(backend: &RecordingBackend, page: usize) -> Vec<(String, Pt, Pt)> {
    backend
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Text {
                page: p, text, x, y, ..
            } if *p == page => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect()
}

/// Stroked rectangles on a page as (x, y, width, height).
pub fn stroked_rects_on(backend: &RecordingBackend, page: usize) -> Vec<(Pt, Pt, Pt, Pt)> {
    backend
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::RectStroked {
                page: p,
                x,
                y,
                width,
                height,
                ..
            } if *p == page => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .collect()
}
