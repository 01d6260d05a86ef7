//! Input checks that run before anything reaches the store.

use crate::error::{Error, Result};

/// Longest accepted post body, in characters.
pub const MAX_POST_LEN: usize = 140;

/// What a forbidden word is replaced with.
pub const MASK: &str = "****";

/// Masks forbidden words in post bodies.
///
/// Each word is matched in its lowercase and capitalized spelling, anywhere
/// in the text.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    words: Vec<String>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(["kerfuffle", "sharbert", "fornax"])
    }
}

impl ContentFilter {
    /// Filter for the given words.
    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut forms = Vec::new();
        for word in words {
            let lower = word.as_ref().to_lowercase();
            if lower.is_empty() {
                continue;
            }
            let capitalized = capitalize(&lower);
            if capitalized != lower {
                forms.push(capitalized);
            }
            forms.push(lower);
        }
        Self { words: forms }
    }

    /// `text` with every forbidden word replaced by [`MASK`].
    pub fn clean(&self, text: &str) -> String {
        self.words
            .iter()
            .fold(text.to_owned(), |acc, word| acc.replace(word.as_str(), MASK))
    }

    /// Check the length limit, mask forbidden words, and check the limit
    /// again since a short word grows under [`MASK`].
    pub fn validate_post(&self, body: &str) -> Result<String> {
        check_len(body)?;
        let cleaned = self.clean(body);
        check_len(&cleaned)?;
        Ok(cleaned)
    }
}

/// [`ContentFilter::validate_post`] with the default word list.
pub fn validate_post(body: &str) -> Result<String> {
    ContentFilter::default().validate_post(body)
}

fn check_len(body: &str) -> Result<()> {
    if body.chars().count() > MAX_POST_LEN {
        return Err(Error::Validation("Chirp is too long".into()));
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
