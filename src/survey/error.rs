//! Error types for survey resolution and drafts

use super::draft::DraftField;

/// Errors raised by the option resolver and the draft it drives
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    /// The form type identifier names no known form family
    #[error("invalid form type: {0}")]
    InvalidFormType(String),

    /// The heading is not one of the family's declared headings
    #[error("heading {heading:?} is not valid for {form_type}")]
    UnresolvableHeading { form_type: String, heading: String },

    /// Submission attempted before a heading was selected
    #[error("a heading must be selected before submitting")]
    HeadingNotChosen,

    /// The draft was already submitted or abandoned
    #[error("draft is closed")]
    DraftClosed,

    /// The field is derived and cannot be edited directly
    #[error("{0} is read-only")]
    ReadOnlyField(&'static str),

    /// The value is not among the field's resolved options
    #[error("{value:?} is not a valid option for {}", .field.label())]
    NotAnOption { field: DraftField, value: String },
}
