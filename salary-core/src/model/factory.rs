use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use super::artifact::{ModelArtifact, ModelError, SalaryModel};
use super::linear::{LinearModelFactory, ScaledLinearModelFactory};

/// One implementation per model kind. Each kind exports a unit struct that
/// implements this trait and is registered with a [`ModelRegistry`].
pub trait ModelFactory: Send + Sync {
    /// Unique, lowercase identifier matched against [`ModelArtifact::kind`].
    fn kind(&self) -> &'static str;

    /// Interpret the artifact's parameters and return a ready-to-use model.
    fn build(
        &self,
        artifact: &ModelArtifact,
    ) -> Result<Box<dyn SalaryModel>, ModelError>;
}

/// Registry of [`ModelFactory`] instances, keyed by model kind.
///
/// Typical lifetime:
/// 1. Create with `ModelRegistry::with_builtin_kinds()` (or `new()` and
///    `register` by hand).
/// 2. Call `load` once per session to obtain the model.
pub struct ModelRegistry {
    factories: HashMap<&'static str, Box<dyn ModelFactory>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every kind this crate knows how to evaluate.
    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(LinearModelFactory));
        registry.register(Box::new(ScaledLinearModelFactory));
        registry
    }

    /// Register a factory. A factory with the same kind is replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn ModelFactory>,
    ) {
        self.factories.insert(factory.kind(), factory);
    }

    /// Names of every registered kind, sorted alphabetically.
    pub fn available_kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.factories.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Dispatch to the factory that matches `artifact.kind`.
    ///
    /// # Errors
    /// * [`ModelError::UnknownKind`] – no factory is registered for the kind.
    /// * Any error the chosen factory returns.
    pub fn build(
        &self,
        artifact: &ModelArtifact,
    ) -> Result<Box<dyn SalaryModel>, ModelError> {
        let factory = self
            .factories
            .get(artifact.kind.as_str())
            .ok_or_else(|| ModelError::UnknownKind {
                kind: artifact.kind.clone(),
                available: self.available_kinds(),
            })?;

        debug!(kind = %artifact.kind, "building model");
        factory.build(artifact)
    }

    /// Read a JSON artifact from disk and build it.
    pub fn load(
        &self,
        path: &Path,
    ) -> Result<Box<dyn SalaryModel>, ModelError> {
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = ModelArtifact::from_reader(BufReader::new(file))?;
        let model = self.build(&artifact)?;

        info!(path = %path.display(), kind = model.kind(), "loaded salary model");
        Ok(model)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::FEATURE_COUNT;

    #[derive(Debug)]
    struct ConstantModel(f64);

    impl SalaryModel for ConstantModel {
        fn kind(&self) -> &'static str {
            "constant"
        }

        fn features(&self) -> &[String] {
            &[]
        }

        fn predict_log(
            &self,
            _row: &[f64; FEATURE_COUNT],
        ) -> f64 {
            self.0
        }
    }

    struct ConstantFactory {
        called: Arc<AtomicBool>,
    }

    impl ModelFactory for ConstantFactory {
        fn kind(&self) -> &'static str {
            "constant"
        }

        fn build(
            &self,
            _artifact: &ModelArtifact,
        ) -> Result<Box<dyn SalaryModel>, ModelError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(ConstantModel(1.0)))
        }
    }

    fn artifact(kind: &str) -> ModelArtifact {
        ModelArtifact {
            kind: kind.to_string(),
            features: Vec::new(),
            description: None,
            params: Default::default(),
        }
    }

    #[test]
    fn new_registry_is_empty() {
        assert!(ModelRegistry::new().available_kinds().is_empty());
    }

    #[test]
    fn builtin_kinds_are_sorted() {
        let registry = ModelRegistry::with_builtin_kinds();

        assert_eq!(registry.available_kinds(), vec!["linear", "scaled-linear"]);
    }

    #[test]
    fn build_routes_to_matching_factory() {
        let called = Arc::new(AtomicBool::new(false));
        let mut registry = ModelRegistry::new();
        registry.register(Box::new(ConstantFactory {
            called: called.clone(),
        }));

        let model = registry.build(&artifact("constant")).expect("should build");

        assert!(called.load(Ordering::SeqCst));
        assert_eq!(model.predict_log(&[0.0; FEATURE_COUNT]), 1.0);
    }

    #[test]
    fn build_unknown_kind_lists_available() {
        let registry = ModelRegistry::with_builtin_kinds();

        match registry.build(&artifact("gradient-boosting")) {
            Err(ModelError::UnknownKind { kind, available }) => {
                assert_eq!(kind, "gradient-boosting");
                assert_eq!(available, vec!["linear", "scaled-linear"]);
            }
            other => panic!("expected UnknownKind, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let registry = ModelRegistry::with_builtin_kinds();

        let err = registry
            .load(Path::new("/this/path/does/not/exist.json"))
            .expect_err("missing file");

        assert!(matches!(err, ModelError::Io { .. }));
    }
}
