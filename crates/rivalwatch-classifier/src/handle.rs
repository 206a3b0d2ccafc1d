use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::{Classifier, NaiveBayesModel};

/// The process-wide classifier, or the reason it could not be loaded.
///
/// An `Unavailable` handle puts the monitor into degraded mode: every job
/// fails fast without fetching anything.
#[derive(Clone)]
pub enum ModelHandle {
    Ready(Arc<dyn Classifier>),
    Unavailable(Arc<str>),
}

impl ModelHandle {
    /// Load the model artifact at `path`. Never fails; a load error is logged
    /// and turned into [`ModelHandle::Unavailable`].
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match NaiveBayesModel::load(path) {
            Ok(model) => {
                tracing::info!(
                    path = %path.display(),
                    classes = model.classes().len(),
                    vocabulary = model.vocabulary_len(),
                    "classifier: model loaded"
                );
                Self::Ready(Arc::new(model))
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "classifier: model unavailable, jobs will fail until restart"
                );
                Self::Unavailable(Arc::from(e.to_string()))
            }
        }
    }

    #[must_use]
    pub fn ready(classifier: impl Classifier + 'static) -> Self {
        Self::Ready(Arc::new(classifier))
    }

    #[must_use]
    pub fn unavailable(reason: impl Into<Arc<str>>) -> Self {
        Self::Unavailable(reason.into())
    }

    #[must_use]
    pub fn classifier(&self) -> Option<&Arc<dyn Classifier>> {
        match self {
            Self::Ready(classifier) => Some(classifier),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("ModelHandle::Ready"),
            Self::Unavailable(reason) => f
                .debug_tuple("ModelHandle::Unavailable")
                .field(reason)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivalwatch_core::Category;

    struct Fixed(&'static str);

    impl Classifier for Fixed {
        fn predict_label(&self, _text: &str) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn load_missing_file_is_unavailable() {
        let handle = ModelHandle::load("/nonexistent/text_classifier.json");
        assert!(!handle.is_ready());
        assert!(handle.classifier().is_none());
        match handle {
            ModelHandle::Unavailable(reason) => assert!(reason.contains("text_classifier.json")),
            ModelHandle::Ready(_) => panic!("expected Unavailable"),
        }
    }

    #[test]
    fn ready_handle_exposes_classifier() {
        let handle = ModelHandle::ready(Fixed("hiring"));
        let classifier = handle.classifier().expect("ready handle");
        assert_eq!(classifier.predict("anything"), Category::Hiring);
    }

    #[test]
    fn debug_does_not_require_classifier_debug() {
        assert_eq!(format!("{:?}", ModelHandle::ready(Fixed("NEWS"))), "ModelHandle::Ready");
        assert!(format!("{:?}", ModelHandle::unavailable("gone")).contains("gone"));
    }
}
