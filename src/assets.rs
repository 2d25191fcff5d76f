//! Asset resolution with a documented fallback chain.
//!
//! Fonts and images are addressed by logical name and resolved against an
//! asset directory on every render.  Resolution never fails: a missing font
//! file falls through the substitution table and finally lands on the builtin
//! Helvetica family, and a missing image yields a [`ImageAsset::Missing`]
//! marker that the draw routines turn into a dashed placeholder box.  Every
//! fallback is logged and recorded as a [`RenderWarning`] so callers and tests
//! can observe degraded-mode renders.

use std::env;
use std::path::PathBuf;

use log::warn;

/// What kind of asset a warning refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Font,
    Image,
    Other,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Font => "font",
            AssetKind::Image => "image",
            AssetKind::Other => "other",
        }
    }
}

/// A non-fatal degraded-mode observation collected during a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderWarning {
    /// Logical asset name (e.g. `"cover"`, `"semibold"`).
    pub asset: String,
    pub kind: AssetKind,
    pub message: String,
}

impl RenderWarning {
    pub(crate) fn new(asset: impl Into<String>, kind: AssetKind, message: impl Into<String>) -> Self {
        let warning = Self {
            asset: asset.into(),
            kind,
            message: message.into(),
        };
        warn!(
            "{} asset '{}' degraded: {}",
            warning.kind.as_str(),
            warning.asset,
            warning.message
        );
        warning
    }
}

/// Logical font roles the report draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    Light,
    Regular,
    SemiBold,
    Bold,
}

impl FontRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontRole::Light => "light",
            FontRole::Regular => "regular",
            FontRole::SemiBold => "semibold",
            FontRole::Bold => "bold",
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            FontRole::Light => "Poppins-Light.ttf",
            FontRole::Regular => "Poppins-Regular.ttf",
            FontRole::SemiBold => "Poppins-SemiBold.ttf",
            FontRole::Bold => "Poppins-Bold.ttf",
        }
    }

    /// Substitution table: a missing light face borrows the regular file and a
    /// missing semibold face borrows the bold file, so every role always
    /// resolves to something drawable.
    fn substitute(&self) -> Option<FontRole> {
        match self {
            FontRole::Light => Some(FontRole::Regular),
            FontRole::SemiBold => Some(FontRole::Bold),
            FontRole::Regular | FontRole::Bold => None,
        }
    }

    /// The builtin weight used when no font file resolves at all.
    pub fn fallback_weight(&self) -> FallbackWeight {
        match self {
            FontRole::Light | FontRole::Regular => FallbackWeight::Regular,
            FontRole::SemiBold | FontRole::Bold => FallbackWeight::Bold,
        }
    }
}

/// Weight of the builtin fallback family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackWeight {
    Regular,
    Bold,
}

/// Where a resolved font comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// A font file found in the asset directory.
    File(PathBuf),
    /// The builtin fallback family at the given weight.
    Builtin(FallbackWeight),
}

/// A resolved image, or the marker the placeholder routine draws from.
#[derive(Clone, Debug)]
pub enum ImageAsset {
    Decoded(image::DynamicImage),
    Missing,
}

impl ImageAsset {
    pub fn is_missing(&self) -> bool {
        matches!(self, ImageAsset::Missing)
    }
}

const ASSETS_DIR_ENV: &str = "NOSHOW_REPORT_ASSETS_DIR";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// The process-wide asset lookup.
///
/// The search path is fixed at construction, but file existence is re-checked
/// on every resolution; nothing assumes a prior check remains valid.  The
/// library holds no mutable state, so one instance is safe to share across
/// concurrent renders.
#[derive(Clone, Debug, Default)]
pub struct AssetLibrary {
    root: Option<PathBuf>,
}

impl AssetLibrary {
    /// Locates the asset directory: environment override first, then the
    /// directory next to the running binary, then the crate manifest.
    pub fn discover() -> Self {
        for candidate in Self::candidates() {
            if candidate.is_dir() {
                return Self {
                    root: Some(candidate),
                };
            }
        }
        Self { root: None }
    }

    /// Uses a fixed directory; intended for tests.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// A library that resolves nothing, forcing every fallback path.
    pub fn empty() -> Self {
        Self { root: None }
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = env::var(ASSETS_DIR_ENV) {
            if !path.trim().is_empty() {
                candidates.push(PathBuf::from(path));
            }
        }
        if let Ok(current_exe) = env::current_exe() {
            if let Some(bin_dir) = current_exe.parent() {
                candidates.push(bin_dir.join("assets"));
            }
        }
        candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"));
        candidates
    }

    fn font_file(&self, role: FontRole) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let path = root.join("fonts").join(role.file_name());
        path.is_file().then_some(path)
    }

    /// Resolves a font role, walking the substitution table and recording a
    /// warning for every step that had to fall back.  Never fails.
    pub fn resolve_font(&self, role: FontRole, warnings: &mut Vec<RenderWarning>) -> FontSource {
        if let Some(path) = self.font_file(role) {
            return FontSource::File(path);
        }
        if let Some(substitute) = role.substitute() {
            if let Some(path) = self.font_file(substitute) {
                warnings.push(RenderWarning::new(
                    role.as_str(),
                    AssetKind::Font,
                    format!(
                        "font file {} missing, substituting {}",
                        role.file_name(),
                        substitute.file_name()
                    ),
                ));
                return FontSource::File(path);
            }
        }
        warnings.push(RenderWarning::new(
            role.as_str(),
            AssetKind::Font,
            "no font file found, falling back to the builtin family",
        ));
        FontSource::Builtin(role.fallback_weight())
    }

    fn image_file(&self, name: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| root.join("images").join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    /// Resolves an image by logical name.  A missing or undecodable file
    /// yields [`ImageAsset::Missing`] plus a warning; callers draw a dashed
    /// placeholder in that case, so the page layout never shifts.
    pub fn resolve_image(&self, name: &str, warnings: &mut Vec<RenderWarning>) -> ImageAsset {
        let Some(path) = self.image_file(name) else {
            warnings.push(RenderWarning::new(
                name,
                AssetKind::Image,
                "image file missing, drawing placeholder",
            ));
            return ImageAsset::Missing;
        };
        match image::open(&path) {
            Ok(decoded) => ImageAsset::Decoded(decoded),
            Err(err) => {
                warnings.push(RenderWarning::new(
                    name,
                    AssetKind::Image,
                    format!("failed to decode {}: {}", path.display(), err),
                ));
                ImageAsset::Missing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_resolves_every_role_to_the_builtin_family() {
        let library = AssetLibrary::empty();
        let mut warnings = Vec::new();
        for role in [
            FontRole::Light,
            FontRole::Regular,
            FontRole::SemiBold,
            FontRole::Bold,
        ] {
            let source = library.resolve_font(role, &mut warnings);
            assert_eq!(source, FontSource::Builtin(role.fallback_weight()));
        }
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().all(|w| w.kind == AssetKind::Font));
    }

    #[test]
    fn light_and_semibold_substitute_before_falling_back() {
        assert_eq!(FontRole::Light.substitute(), Some(FontRole::Regular));
        assert_eq!(FontRole::SemiBold.substitute(), Some(FontRole::Bold));
        assert_eq!(FontRole::Regular.substitute(), None);
        assert_eq!(FontRole::Light.fallback_weight(), FallbackWeight::Regular);
        assert_eq!(FontRole::SemiBold.fallback_weight(), FallbackWeight::Bold);
    }

    #[test]
    fn missing_image_yields_placeholder_marker_and_warning() {
        let library = AssetLibrary::empty();
        let mut warnings = Vec::new();
        let asset = library.resolve_image("cover", &mut warnings);
        assert!(asset.is_missing());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].asset, "cover");
        assert_eq!(warnings[0].kind, AssetKind::Image);
    }
}
