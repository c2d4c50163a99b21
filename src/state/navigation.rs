//! Navigation state: decides what a route change means for the gallery.

use log::debug;

/// Side effects owed to a route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteEffects {
    /// Entered the gallery view: issue the foreground fetch.
    pub foreground_fetch: bool,
    /// Left the upload area: drop the persisted search term.
    pub clear_filter: bool,
}

impl RouteEffects {
    pub fn is_empty(&self) -> bool {
        !self.foreground_fetch && !self.clear_filter
    }
}

/// Tracks the current route and turns path changes into [`RouteEffects`].
#[derive(Debug, Clone)]
pub struct NavigationState {
    gallery_path: String,
    upload_prefix: String,
    current_path: Option<String>,
}

impl NavigationState {
    pub fn new(gallery_path: impl Into<String>, upload_prefix: impl Into<String>) -> Self {
        Self {
            gallery_path: gallery_path.into(),
            upload_prefix: upload_prefix.into(),
            current_path: None,
        }
    }

    /// Records `path` as the current route.
    ///
    /// Effects fire only when the path differs from the current one.
    pub fn enter(&mut self, path: &str) -> RouteEffects {
        if self.current_path.as_deref() == Some(path) {
            debug!("Route unchanged: {}", path);
            return RouteEffects::default();
        }

        self.current_path = Some(path.to_string());
        let effects = RouteEffects {
            foreground_fetch: self.is_gallery(path),
            clear_filter: !self.keeps_filter(path),
        };
        debug!("Route changed to {}: {:?}", path, effects);
        effects
    }

    /// Forgets the current route so the next `enter` counts as a change.
    pub fn reset(&mut self) {
        self.current_path = None;
    }

    /// Returns the current route.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn is_gallery(&self, path: &str) -> bool {
        path == self.gallery_path
    }

    /// Whether the search term survives on `path`.
    pub fn keeps_filter(&self, path: &str) -> bool {
        path.starts_with(&self.upload_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn navigation() -> NavigationState {
        NavigationState::new("/photos", "/upload")
    }

    #[rstest]
    #[case("/photos", true, true)]
    #[case("/upload", false, false)]
    #[case("/upload/42", false, false)]
    #[case("/", false, true)]
    #[case("/photos/7", false, true)]
    fn route_effects(#[case] path: &str, #[case] fetch: bool, #[case] clear: bool) {
        let effects = navigation().enter(path);
        assert_eq!(effects.foreground_fetch, fetch);
        assert_eq!(effects.clear_filter, clear);
    }

    #[test]
    fn repeated_path_has_no_effects() {
        let mut nav = navigation();
        assert!(!nav.enter("/photos").is_empty());
        assert!(nav.enter("/photos").is_empty());
        assert_eq!(nav.current_path(), Some("/photos"));
    }

    #[test]
    fn reset_makes_same_path_a_change_again() {
        let mut nav = navigation();
        nav.enter("/photos");
        nav.reset();
        assert_eq!(nav.current_path(), None);
        assert!(nav.enter("/photos").foreground_fetch);
    }

    #[test]
    fn returning_to_gallery_fetches_again() {
        let mut nav = navigation();
        nav.enter("/photos");
        nav.enter("/upload");
        assert!(nav.enter("/photos").foreground_fetch);
    }
}
