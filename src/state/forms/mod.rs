//! Form domain layer
//!
//! Field-level bindings for the survey and lead intake forms.

#![allow(dead_code)]

mod field;
mod form_state;

pub use form_state::{DetailedLeadForm, InitialLeadForm, SurveyForm};
