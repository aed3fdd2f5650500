use crate::error::Error;
use crate::pagesize::PageSize;
use crate::safe_area::SafeArea;
use crate::units::Pt;

/// The engine's insertion point on the current page.
///
/// A cursor is an immutable value bound to the page geometry it was
/// created with; every move returns a new cursor. The document engine
/// replaces its cursor wholesale on every page turn, so a cursor never
/// outlives the page it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: Pt,
    pub y: Pt,
    pub page: PageSize,
    pub area: SafeArea,
}

impl Cursor {
    /// A cursor at the page origin (0, 0).
    pub fn origin(page: PageSize, area: SafeArea) -> Cursor {
        Cursor {
            x: Pt::ZERO,
            y: Pt::ZERO,
            page,
            area,
        }
    }

    /// A cursor at the top-left corner of the content area, where each
    /// new page starts.
    pub fn content_top_left(page: PageSize, area: SafeArea) -> Cursor {
        let content = area.content_area(page);
        Cursor {
            x: content.x1,
            y: content.y2,
            page,
            area,
        }
    }

    /// Move to an absolute position.
    pub fn move_to(self, x: Pt, y: Pt) -> Cursor {
        Cursor { x, y, ..self }
    }

    /// Move relative to the current position.
    pub fn move_by(self, dx: Pt, dy: Pt) -> Cursor {
        Cursor {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Move to a position expressed as percentages of the content area,
    /// (0, 0) being its lower-left corner and (100, 100) its upper-right.
    pub fn move_to_content_percent(self, px: f32, py: f32) -> Result<Cursor, Error> {
        let content = self.area.content_area(self.page);
        self.move_to_area_percent(content, px, py)
    }

    /// Move to a position expressed as percentages of the header band.
    pub fn move_to_header(self, px: f32, py: f32) -> Result<Cursor, Error> {
        let header = self.area.header_area(self.page)?;
        self.move_to_area_percent(header, px, py)
    }

    /// Move to a position expressed as percentages of the footer band.
    pub fn move_to_footer(self, px: f32, py: f32) -> Result<Cursor, Error> {
        let footer = self.area.footer_area(self.page)?;
        self.move_to_area_percent(footer, px, py)
    }

    fn move_to_area_percent(self, rect: crate::rect::Rect, px: f32, py: f32) -> Result<Cursor, Error> {
        if !(0.0..=100.0).contains(&px) || !(0.0..=100.0).contains(&py) {
            return Err(Error::InvalidPercent(px, py));
        }
        Ok(Cursor {
            x: rect.x1 + rect.width() * (px / 100.0),
            y: rect.y1 + rect.height() * (py / 100.0),
            ..self
        })
    }

    /// Move to the top edge of the content area, keeping x.
    pub fn move_to_top(self) -> Cursor {
        let y = self.area.content_area(self.page).y2;
        Cursor { y, ..self }
    }

    /// Move to the bottom edge of the content area, keeping x.
    pub fn move_to_bottom(self) -> Cursor {
        let y = self.area.content_area(self.page).y1;
        Cursor { y, ..self }
    }

    /// Move to the left edge of the content area, keeping y.
    pub fn move_to_start(self) -> Cursor {
        let x = self.area.content_area(self.page).x1;
        Cursor { x, ..self }
    }

    /// Whether the cursor lies within the content rectangle.
    pub fn is_in_safe_area(&self) -> bool {
        self.area.contains(self.x, self.y, self.page)
    }

    /// Clamp each axis independently to the content rectangle. A cursor
    /// already inside is returned unchanged.
    pub fn ensure_in_safe_area(self) -> Cursor {
        if self.is_in_safe_area() {
            return self;
        }
        let content = self.area.content_area(self.page);
        Cursor {
            x: self.x.max(content.x1).min(content.x2),
            y: self.y.max(content.y1).min(content.y2),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margins::Margins;
    use crate::pagesize;

    fn cursor() -> Cursor {
        Cursor::origin(pagesize::A4, SafeArea::new(Margins::all(Pt(50.0))))
    }

    #[test]
    fn absolute_and_relative_moves() {
        let c = cursor().move_to(Pt(100.0), Pt(200.0)).move_by(Pt(-10.0), Pt(25.0));
        assert_eq!(c.x, Pt(90.0));
        assert_eq!(c.y, Pt(225.0));
    }

    #[test]
    fn percent_moves_span_the_content_area() {
        let content = cursor().area.content_area(pagesize::A4);
        let low = cursor().move_to_content_percent(0.0, 0.0).unwrap();
        assert_eq!((low.x, low.y), (content.x1, content.y1));
        let high = cursor().move_to_content_percent(100.0, 100.0).unwrap();
        assert!((high.x - content.x2).abs() < Pt(1e-3));
        assert!((high.y - content.y2).abs() < Pt(1e-3));
        let mid = cursor().move_to_content_percent(50.0, 50.0).unwrap();
        assert!((mid.x - (content.x1 + content.width() / 2.0)).abs() < Pt(1e-3));
    }

    #[test]
    fn percent_moves_are_idempotent() {
        let once = cursor().move_to_content_percent(37.5, 62.5).unwrap();
        let twice = once.move_to_content_percent(37.5, 62.5).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn percent_moves_validate_range() {
        assert!(matches!(
            cursor().move_to_content_percent(-1.0, 50.0),
            Err(Error::InvalidPercent(..))
        ));
        assert!(matches!(
            cursor().move_to_content_percent(50.0, 100.1),
            Err(Error::InvalidPercent(..))
        ));
    }

    #[test]
    fn band_moves_require_bands() {
        assert!(matches!(
            cursor().move_to_header(50.0, 50.0),
            Err(Error::HeaderNotEnabled)
        ));
        let banded = Cursor::origin(
            pagesize::A4,
            SafeArea::new(Margins::all(Pt(50.0))).with_footer(true),
        );
        let c = banded.move_to_footer(0.0, 0.0).unwrap();
        assert_eq!(c.y, Pt(50.0));
    }

    #[test]
    fn clamping_is_per_axis() {
        let c = cursor().move_to(Pt(-20.0), Pt(400.0)).ensure_in_safe_area();
        assert_eq!(c.x, Pt(50.0));
        assert_eq!(c.y, Pt(400.0));

        let c = cursor()
            .move_to(Pt(100.0), pagesize::A4.height)
            .ensure_in_safe_area();
        assert_eq!(c.x, Pt(100.0));
        assert!((c.y - (pagesize::A4.height - Pt(50.0))).abs() < Pt(1e-3));
    }

    #[test]
    fn top_bottom_start_moves() {
        let content = cursor().area.content_area(pagesize::A4);
        let c = cursor().move_to(Pt(123.0), Pt(17.0));
        assert_eq!(c.move_to_top().y, content.y2);
        assert_eq!(c.move_to_bottom().y, content.y1);
        assert_eq!(c.move_to_start().x, content.x1);
        assert_eq!(c.move_to_top().x, Pt(123.0));
    }
}
