//! Pluggable word segmentation of recovered plaintexts

use log::warn;

/// Inserts word boundaries into a run-on plaintext.
///
/// Implementations may only add or remove whitespace. When that cannot be
/// guaranteed they should return the input unchanged.
pub trait Segmenter {
    fn segment(&self, text: &str) -> String;
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> String,
{
    fn segment(&self, text: &str) -> String {
        self(text)
    }
}

/// Whether candidate plaintexts are segmented before scoring.
#[derive(Default)]
pub enum Segmentation {
    #[default]
    Disabled,
    Enabled(Box<dyn Segmenter>),
}

impl Segmentation {
    pub fn enabled<S: Segmenter + 'static>(segmenter: S) -> Self {
        Segmentation::Enabled(Box::new(segmenter))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Segmentation::Enabled(_))
    }

    /// Segments `text`, or `None` when disabled.
    ///
    /// Output that changes anything other than whitespace is discarded and
    /// `None` is returned, so the raw text gets scored instead.
    pub fn apply(&self, text: &str) -> Option<String> {
        let Segmentation::Enabled(segmenter) = self else {
            return None;
        };

        let segmented = segmenter.segment(text);
        if differs_only_in_whitespace(text, &segmented) {
            Some(segmented)
        } else {
            warn!("segmenter altered non-whitespace characters, scoring raw text");
            None
        }
    }
}

impl std::fmt::Debug for Segmentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segmentation::Disabled => f.write_str("Disabled"),
            Segmentation::Enabled(_) => f.write_str("Enabled(..)"),
        }
    }
}

/// True when `a` and `b` are equal after dropping all whitespace.
pub fn differs_only_in_whitespace(a: &str, b: &str) -> bool {
    a.chars()
        .filter(|c| !c.is_whitespace())
        .eq(b.chars().filter(|c| !c.is_whitespace()))
}
