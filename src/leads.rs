//! Lead intake rules

use crate::state::{Company, InitialLead, Lead, LeadDetails};
use chrono::NaiveDate;

/// Indian states followed by union territories
pub const INDIAN_STATES: [&str; 36] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Lead validation and lookup failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("state is required")]
    MissingState,

    #[error("place is required")]
    MissingPlace,

    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("company name is required")]
    MissingCompany,

    #[error("business potential must be a number, got {0:?}")]
    InvalidBusinessPotential(String),

    #[error("lead {0} not found")]
    NotFound(String),

    #[error("lead {0} already exists")]
    AlreadyExists(String),
}

/// Lead number after the highest existing one
///
/// Numbers not in the `LEAD-NNN` form are ignored.
pub fn next_lead_number<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|lead_no| lead_no.strip_prefix("LEAD-")?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("LEAD-{:03}", highest + 1)
}

/// Date as shown on lead records (DD-MM-YYYY)
pub fn format_lead_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

pub fn today() -> String {
    format_lead_date(chrono::Local::now().date_naive())
}

/// Digits, optionally followed by a dot and more digits
pub fn is_valid_business_potential(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_initial(initial: &InitialLead) -> Result<(), LeadError> {
    if initial.state.trim().is_empty() {
        return Err(LeadError::MissingState);
    }
    if !INDIAN_STATES.contains(&initial.state.as_str()) {
        return Err(LeadError::UnknownState(initial.state.clone()));
    }
    if initial.place.trim().is_empty() {
        return Err(LeadError::MissingPlace);
    }
    Ok(())
}

pub fn validate_details(details: &LeadDetails) -> Result<(), LeadError> {
    if details.company.name().trim().is_empty() {
        return Err(LeadError::MissingCompany);
    }
    if !is_valid_business_potential(&details.business_potential) {
        return Err(LeadError::InvalidBusinessPotential(
            details.business_potential.clone(),
        ));
    }
    Ok(())
}

/// Distinct company names across leads, in first-seen order
pub fn company_options(leads: &[Lead]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for lead in leads {
        let name = lead.company_name();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Pick an existing company when the name matches one, otherwise a new one
pub fn company_from_name(name: &str, known: &[String]) -> Company {
    if known.iter().any(|k| k == name) {
        Company::Existing(name.to_string())
    } else {
        Company::New(name.to_string())
    }
}
