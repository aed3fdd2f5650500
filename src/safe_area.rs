use crate::error::Error;
use crate::margins::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// Height of the header band when enabled
pub const HEADER_HEIGHT: Pt = Pt(40.0);
/// Height of the footer band when enabled
pub const FOOTER_HEIGHT: Pt = Pt(40.0);

/// The region of a page that block content may occupy: the page inset by
/// four margins, further reduced by fixed-height header/footer bands when
/// those are enabled.
///
/// The safe area is an immutable value; per-page variations go through
/// building a new one rather than mutating this one in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeArea {
    pub margins: Margins,
    pub has_header: bool,
    pub has_footer: bool,
}

impl Default for SafeArea {
    fn default() -> SafeArea {
        SafeArea {
            margins: Margins::default(),
            has_header: false,
            has_footer: false,
        }
    }
}

impl SafeArea {
    pub fn new(margins: Margins) -> SafeArea {
        SafeArea {
            margins,
            ..SafeArea::default()
        }
    }

    /// Enable or disable the header band
    pub fn with_header(mut self, has_header: bool) -> SafeArea {
        self.has_header = has_header;
        self
    }

    /// Enable or disable the footer band
    pub fn with_footer(mut self, has_footer: bool) -> SafeArea {
        self.has_footer = has_footer;
        self
    }

    /// The rectangle block content may be rendered into: page minus
    /// margins, minus the header/footer bands when enabled.
    pub fn content_area(&self, page: PageSize) -> Rect {
        let extra_top = if self.has_header { HEADER_HEIGHT } else { Pt::ZERO };
        let extra_bottom = if self.has_footer { FOOTER_HEIGHT } else { Pt::ZERO };

        Rect::from_origin(
            self.margins.left,
            self.margins.bottom + extra_bottom,
            page.width - self.margins.left - self.margins.right,
            page.height - self.margins.top - self.margins.bottom - extra_top - extra_bottom,
        )
    }

    /// The header band rectangle, just below the top margin.
    pub fn header_area(&self, page: PageSize) -> Result<Rect, Error> {
        if !self.has_header {
            return Err(Error::HeaderNotEnabled);
        }
        Ok(Rect::from_origin(
            self.margins.left,
            page.height - self.margins.top - HEADER_HEIGHT,
            page.width - self.margins.left - self.margins.right,
            HEADER_HEIGHT,
        ))
    }

    /// The footer band rectangle, just above the bottom margin.
    pub fn footer_area(&self, page: PageSize) -> Result<Rect, Error> {
        if !self.has_footer {
            return Err(Error::FooterNotEnabled);
        }
        Ok(Rect::from_origin(
            self.margins.left,
            self.margins.bottom,
            page.width - self.margins.left - self.margins.right,
            FOOTER_HEIGHT,
        ))
    }

    /// Whether a point lies within the content rectangle.
    pub fn contains(&self, x: Pt, y: Pt, page: PageSize) -> bool {
        self.content_area(page).contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn content_area_without_bands() {
        let area = SafeArea::new(Margins::all(Pt(50.0)));
        let content = area.content_area(pagesize::A4);

        assert_eq!(content.x1, Pt(50.0));
        assert_eq!(content.y1, Pt(50.0));
        assert!((content.width() - (pagesize::A4.width - Pt(100.0))).abs() < Pt(1e-3));
        assert!((content.height() - (pagesize::A4.height - Pt(100.0))).abs() < Pt(1e-3));
    }

    #[test]
    fn bands_shrink_content_area() {
        let plain = SafeArea::new(Margins::all(Pt(50.0)));
        let banded = plain.with_header(true).with_footer(true);
        let content = banded.content_area(pagesize::A4);

        assert_eq!(content.y1, Pt(50.0) + FOOTER_HEIGHT);
        let expected =
            plain.content_area(pagesize::A4).height() - HEADER_HEIGHT - FOOTER_HEIGHT;
        assert!((content.height() - expected).abs() < Pt(1e-3));
        // band rectangles sit between the margins and the content area
        let header = banded.header_area(pagesize::A4).unwrap();
        assert!((header.y2 - (pagesize::A4.height - Pt(50.0))).abs() < Pt(1e-3));
        assert!((header.height() - HEADER_HEIGHT).abs() < Pt(1e-3));
        let footer = banded.footer_area(pagesize::A4).unwrap();
        assert_eq!(footer.y1, Pt(50.0));
        assert_eq!(footer.height(), FOOTER_HEIGHT);
    }

    #[test]
    fn band_areas_require_bands() {
        let area = SafeArea::default();
        assert!(matches!(
            area.header_area(pagesize::A4),
            Err(Error::HeaderNotEnabled)
        ));
        assert!(matches!(
            area.footer_area(pagesize::A4),
            Err(Error::FooterNotEnabled)
        ));
    }

    #[test]
    fn point_containment() {
        let area = SafeArea::new(Margins::all(Pt(50.0)));
        assert!(area.contains(Pt(50.0), Pt(50.0), pagesize::A4));
        assert!(area.contains(Pt(300.0), Pt(400.0), pagesize::A4));
        assert!(!area.contains(Pt(49.0), Pt(400.0), pagesize::A4));
        assert!(!area.contains(Pt(300.0), pagesize::A4.height, pagesize::A4));
    }
}
