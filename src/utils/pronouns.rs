/// Pronoun lookup for announcement text
use crate::models::Gender;

/// Grammatical form of the pronoun
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PronounForm {
    Subject,
    Possessive,
}

/// Resolve the pronoun for an optional gender tag. Defaults to they/their.
pub fn resolve(gender: Option<Gender>, form: PronounForm) -> &'static str {
    match (gender, form) {
        (Some(Gender::Male), PronounForm::Subject) => "he",
        (Some(Gender::Male), PronounForm::Possessive) => "his",
        (Some(Gender::Female), PronounForm::Subject) => "she",
        (Some(Gender::Female), PronounForm::Possessive) => "her",
        (_, PronounForm::Subject) => "they",
        (_, PronounForm::Possessive) => "their",
    }
}
