//! ImagePath - Object key for an uploaded image

use uuid::Uuid;

/// Random, collision-resistant object key for an uploaded image.
///
/// The key is a fresh UUID v4 followed by the original file's extension,
/// e.g. `3f0c...e1.png`. A file name without an extension yields a bare
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePath(String);

impl ImagePath {
    /// Generate a new path for an upload named `file_name`
    pub fn generate(file_name: &str) -> Self {
        Self::with_token(Uuid::new_v4(), file_name)
    }

    fn with_token(token: Uuid, file_name: &str) -> Self {
        match extension(file_name) {
            Some(ext) => Self(format!("{}.{}", token, ext)),
            None => Self(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Guess a MIME type from the extension
    pub fn content_type(&self) -> &'static str {
        match self.0.rsplit_once('.').map(|(_, ext)| ext) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            Some("avif") => "image/avif",
            _ => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ImagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_lowercased_extension() {
        let token = Uuid::new_v4();
        let path = ImagePath::with_token(token, "Kenny Omega.PNG");
        assert_eq!(path.as_str(), format!("{}.png", token));
        assert_eq!(path.content_type(), "image/png");
    }

    #[test]
    fn test_missing_extension_yields_bare_token() {
        let token = Uuid::new_v4();
        assert_eq!(ImagePath::with_token(token, "avatar").as_str(), token.to_string());
        assert_eq!(ImagePath::with_token(token, ".hidden").as_str(), token.to_string());
        assert_eq!(ImagePath::with_token(token, "x.").as_str(), token.to_string());
    }

    #[test]
    fn test_directory_components_are_ignored() {
        let token = Uuid::new_v4();
        let path = ImagePath::with_token(token, "../../etc/passwd.d/shadow");
        assert_eq!(path.as_str(), token.to_string());

        let path = ImagePath::with_token(token, "C:\\uploads\\logo.jpeg");
        assert_eq!(path.content_type(), "image/jpeg");
    }

    #[test]
    fn test_generated_paths_differ() {
        assert_ne!(ImagePath::generate("a.png"), ImagePath::generate("a.png"));
    }
}
