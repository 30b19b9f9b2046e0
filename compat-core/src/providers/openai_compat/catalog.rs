//! Session model selection and the cached model catalog

/// Current model plus the lazily loaded list of models the endpoint serves
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    current_model: String,
    available: Vec<String>,
    loaded: bool,
}

impl ModelCatalog {
    /// Fresh catalog: nothing loaded, `current_model` selected
    pub fn new(current_model: impl Into<String>) -> Self {
        Self {
            current_model: current_model.into(),
            available: Vec::new(),
            loaded: false,
        }
    }

    /// Currently selected model
    pub fn current(&self) -> &str {
        &self.current_model
    }

    /// Whether a listing has been stored
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Stored listing, in server order
    pub fn models(&self) -> &[String] {
        &self.available
    }

    /// Whether `name` appears in the stored listing
    pub fn contains(&self, name: &str) -> bool {
        self.available.iter().any(|m| m == name)
    }

    /// Store a listing and mark the catalog loaded
    pub fn replace(&mut self, models: Vec<String>) {
        self.available = models;
        self.loaded = true;
    }

    /// Switch the current model
    ///
    /// Once loaded, only listed models are accepted. Before that any
    /// non-empty name is accepted unverified. Returns whether it switched.
    pub fn select(&mut self, name: &str) -> bool {
        let accepted = if self.loaded {
            self.contains(name)
        } else {
            !name.is_empty()
        };

        if accepted {
            self.current_model = name.to_string();
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_catalog_is_unloaded() {
        let catalog = ModelCatalog::new("default");
        assert_eq!(catalog.current(), "default");
        assert!(!catalog.is_loaded());
        assert!(catalog.models().is_empty());
    }

    #[test]
    fn test_select_before_load_is_optimistic() {
        let mut catalog = ModelCatalog::new("default");
        assert!(catalog.select("gpt-x"));
        assert_eq!(catalog.current(), "gpt-x");
        assert!(!catalog.select(""));
        assert_eq!(catalog.current(), "gpt-x");
    }

    #[test]
    fn test_select_after_load_is_validated() {
        let mut catalog = ModelCatalog::new("default");
        catalog.replace(vec!["a".into(), "b".into()]);
        assert!(catalog.is_loaded());
        assert!(!catalog.select("gpt-x"));
        assert_eq!(catalog.current(), "default");
        assert!(catalog.select("b"));
        assert_eq!(catalog.current(), "b");
    }

    #[test]
    fn test_loaded_empty_rejects_everything() {
        let mut catalog = ModelCatalog::new("default");
        catalog.replace(Vec::new());
        assert!(!catalog.select("default"));
        assert!(!catalog.select(""));
    }
}
