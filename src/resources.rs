use crate::backend::{FontId, ImageId, RenderBackend, STANDARD_FONT_NAMES};
use crate::error::Error;
use std::collections::HashMap;

/// Named font and image handles for one document.
///
/// Seeded with the twelve standard text fonts (the Helvetica, Times, and
/// Courier families); Helvetica is the initial default font. Handles are
/// bound to the backend that registered them and must not cross documents.
pub struct ResourceManager {
    fonts: HashMap<String, FontId>,
    images: HashMap<String, ImageId>,
    default_font: FontId,
}

impl ResourceManager {
    /// Register the standard fonts with the backend and build the
    /// registry around them.
    pub fn standard<B: RenderBackend>(backend: &mut B) -> Result<ResourceManager, Error> {
        let mut fonts = HashMap::new();
        for name in STANDARD_FONT_NAMES.iter().take(12) {
            fonts.insert(name.to_string(), backend.register_font(name)?);
        }
        let default_font = fonts["Helvetica"];
        Ok(ResourceManager {
            fonts,
            images: HashMap::new(),
            default_font,
        })
    }

    /// Look up a registered font by name.
    pub fn font(&self, name: &str) -> Result<FontId, Error> {
        self.fonts
            .get(name)
            .copied()
            .ok_or_else(|| Error::FontNotRegistered(name.to_string()))
    }

    /// Register a font handle under a name, replacing any previous
    /// binding of that name.
    pub fn register_font(&mut self, name: &str, font: FontId) {
        self.fonts.insert(name.to_string(), font);
    }

    /// The current default font.
    pub fn default_font(&self) -> FontId {
        self.default_font
    }

    /// Change the default font to an already-registered name.
    pub fn set_default_font(&mut self, name: &str) -> Result<(), Error> {
        self.default_font = self.font(name)?;
        Ok(())
    }

    /// Look up a registered image by name.
    pub fn image(&self, name: &str) -> Option<ImageId> {
        self.images.get(name).copied()
    }

    /// Register an image handle under a name.
    pub fn register_image(&mut self, name: &str, image: ImageId) {
        self.images.insert(name.to_string(), image);
    }

    /// Drop an image binding. Returns whether the name was bound.
    pub fn remove_image(&mut self, name: &str) -> bool {
        self.images.remove(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RecordingBackend;

    #[test]
    fn seeds_the_twelve_text_fonts() {
        let mut backend = RecordingBackend::new();
        let resources = ResourceManager::standard(&mut backend).unwrap();
        for name in [
            "Helvetica",
            "Helvetica-Bold",
            "Helvetica-Oblique",
            "Helvetica-BoldOblique",
            "Times-Roman",
            "Times-Bold",
            "Times-Italic",
            "Times-BoldItalic",
            "Courier",
            "Courier-Bold",
            "Courier-Oblique",
            "Courier-BoldOblique",
        ] {
            assert!(resources.font(name).is_ok(), "{name} should be seeded");
        }
        assert!(matches!(
            resources.font("Wingdings"),
            Err(Error::FontNotRegistered(_))
        ));
    }

    #[test]
    fn default_font_starts_as_helvetica_and_can_move() {
        let mut backend = RecordingBackend::new();
        let mut resources = ResourceManager::standard(&mut backend).unwrap();
        assert_eq!(resources.default_font(), resources.font("Helvetica").unwrap());

        resources.set_default_font("Times-Roman").unwrap();
        assert_eq!(
            resources.default_font(),
            resources.font("Times-Roman").unwrap()
        );
        assert!(resources.set_default_font("Nope").is_err());
    }

    #[test]
    fn image_registry_round_trip() {
        let mut backend = RecordingBackend::new();
        let mut resources = ResourceManager::standard(&mut backend).unwrap();
        let id = backend.add_image(64.0, 64.0);
        resources.register_image("badge", id);
        assert_eq!(resources.image("badge"), Some(id));
        assert!(resources.remove_image("badge"));
        assert!(!resources.remove_image("badge"));
        assert_eq!(resources.image("badge"), None);
    }
}
