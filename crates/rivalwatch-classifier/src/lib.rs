//! Text classification for scraped competitor content.
//!
//! The model is a TF-IDF + multinomial naive Bayes pipeline exported to JSON
//! ahead of time. It is loaded once at startup into a [`ModelHandle`] and
//! shared read-only by every pipeline job.

pub mod error;
pub mod handle;
pub mod model;

mod tokenize;

use rivalwatch_core::Category;

pub use error::ClassifierError;
pub use handle::ModelHandle;
pub use model::NaiveBayesModel;

/// Maps page text to a category label.
pub trait Classifier: Send + Sync {
    /// The raw label the model predicts for `text`.
    fn predict_label(&self, text: &str) -> String;

    /// The predicted label as a [`Category`]; labels outside the taxonomy
    /// become [`Category::Unknown`].
    fn predict(&self, text: &str) -> Category {
        Category::from_label(&self.predict_label(text))
    }
}
