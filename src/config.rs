use crate::error::Error;
use crate::pagesize::{self, PageSize};
use crate::safe_area::SafeArea;
use crate::units::Pt;

/// Engine configuration. Fill in the fields you care about and leave the
/// rest to [`Config::default`]; validation happens once when the
/// configuration is handed to [`Document::new`](crate::Document::new).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub page_size: PageSize,
    pub safe_area: SafeArea,
    /// Raster resolution hint for image pipelines, dots per inch
    pub dpi: u32,
    /// Image compression quality, 0.0..=1.0
    pub compression_quality: f32,
    /// Default font size for raw text written at the cursor
    pub font_size: Pt,
    /// Default line-spacing multiplier
    pub line_spacing: f32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            page_size: pagesize::A4,
            safe_area: SafeArea::default(),
            dpi: 300,
            compression_quality: 0.7,
            font_size: Pt(12.0),
            line_spacing: 1.2,
        }
    }
}

impl Config {
    /// Check every field against its allowed range. The document engine
    /// refuses to start from a configuration that fails here.
    pub fn validate(&self) -> Result<(), Error> {
        let m = self.safe_area.margins;
        if m.left < Pt::ZERO || m.right < Pt::ZERO || m.top < Pt::ZERO || m.bottom < Pt::ZERO {
            return Err(Error::InvalidConfiguration(
                "margins must be non-negative".into(),
            ));
        }
        let content = self.safe_area.content_area(self.page_size);
        if content.width() < Pt::ZERO || content.height() < Pt::ZERO {
            return Err(Error::InvalidConfiguration(format!(
                "margins and bands leave no content area on a {:.0}x{:.0}pt page",
                *self.page_size.width, *self.page_size.height
            )));
        }
        if self.dpi == 0 {
            return Err(Error::InvalidConfiguration("dpi must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.compression_quality) {
            return Err(Error::InvalidConfiguration(
                "compression quality must be within 0.0..=1.0".into(),
            ));
        }
        if self.font_size <= Pt::ZERO {
            return Err(Error::InvalidConfiguration(
                "font size must be positive".into(),
            ));
        }
        if self.line_spacing <= 0.0 {
            return Err(Error::InvalidConfiguration(
                "line spacing must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margins::Margins;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_margins() {
        let config = Config {
            safe_area: SafeArea::new(Margins::trbl(Pt(50.0), Pt(-1.0), Pt(50.0), Pt(50.0))),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_margins_that_swallow_the_page() {
        let config = Config {
            page_size: pagesize::A6,
            safe_area: SafeArea::new(Margins::all(Pt(400.0))),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_scalars() {
        for bad in [
            Config {
                dpi: 0,
                ..Config::default()
            },
            Config {
                compression_quality: 1.5,
                ..Config::default()
            },
            Config {
                font_size: Pt(0.0),
                ..Config::default()
            },
            Config {
                line_spacing: -0.5,
                ..Config::default()
            },
        ] {
            assert!(bad.validate().is_err());
        }
    }
}
