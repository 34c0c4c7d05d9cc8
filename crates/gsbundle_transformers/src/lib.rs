//! gsbundle_transformers: Text transformations applied to the artifact.
//!
//! Transforms run on the concatenated output, after the declaration gate:
//! - ES5 downleveling of array-destructured callback parameters, for the
//!   legacy Rhino runtime

mod destructuring;

pub use destructuring::DestructuringDownlevel;

/// A transformer that rewrites artifact text.
pub trait Transformer {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Transform the text, returning the new text and the number of rewrites.
    fn transform(&self, text: &str) -> Transformed;
}

/// The result of a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub rewrites: usize,
}

impl Transformed {
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            rewrites: 0,
        }
    }
}

/// Run transformers in order, summing rewrites.
pub fn apply_all(transformers: &[&dyn Transformer], text: &str) -> Transformed {
    let mut result = Transformed::unchanged(text);
    for transformer in transformers {
        let next = transformer.transform(&result.text);
        tracing::debug!(transformer = transformer.name(), rewrites = next.rewrites, "applied transform");
        result = Transformed {
            text: next.text,
            rewrites: result.rewrites + next.rewrites,
        };
    }
    result
}
