use url::Url;

/// Coarse media type, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Unsupported,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];

/// Server-relative path of a media file attached to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    path: String,
}

impl MediaRef {
    /// Returns `None` for a blank path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return None;
        }
        Some(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let file = self.path.rsplit('/').next()?;
        let (_, ext) = file.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self.extension() {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Image,
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
            _ => MediaKind::Unsupported,
        }
    }

    /// Resolve the path against the file server base URL.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the joined URL is invalid.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(MediaRef::new("/uploads/a.PNG").unwrap().kind(), MediaKind::Image);
        assert_eq!(MediaRef::new("/uploads/clip.webm").unwrap().kind(), MediaKind::Video);
        assert_eq!(MediaRef::new("/uploads/doc.pdf").unwrap().kind(), MediaKind::Unsupported);
        assert_eq!(MediaRef::new("/uploads/noext").unwrap().kind(), MediaKind::Unsupported);
    }

    #[test]
    fn blank_path_is_none() {
        assert!(MediaRef::new("  ").is_none());
    }

    #[test]
    fn resolves_against_base() {
        let base = Url::parse("http://localhost:3000").unwrap();
        let media = MediaRef::new("/uploads/a.png").unwrap();
        assert_eq!(
            media.resolve(&base).unwrap().as_str(),
            "http://localhost:3000/uploads/a.png"
        );
    }
}
