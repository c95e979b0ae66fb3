//! Factory UX survey forms
//!
//! Static option policies per form family, the pure resolver that derives
//! dependent options from a heading, and the draft that keeps a submission
//! consistent with both.

mod draft;
mod error;
mod policy;
mod resolver;

pub use draft::{DraftField, FormValues, SurveyDraft};
pub use error::SurveyError;
pub use policy::{FormType, MaterialCodeMode};
pub use resolver::resolve_material_code_mode;

#[cfg(test)]
pub use draft::DraftPhase;
