//! Persisted record definitions

use crate::survey::{FormType, FormValues, SurveyError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fresh identifier for a form record
pub fn new_record_id() -> String {
    format!("form-{}", Uuid::new_v4())
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

/// Logged-in user, passed explicitly to anything that attributes a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

/// Company a lead is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Company {
    /// Not seen before, entered by hand
    New(String),
    /// Picked from companies on earlier leads
    Existing(String),
}

impl Company {
    pub fn name(&self) -> &str {
        match self {
            Self::New(name) | Self::Existing(name) => name,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

impl Default for Company {
    fn default() -> Self {
        Self::New(String::new())
    }
}

/// First step of lead intake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialLead {
    pub lead_no: String,
    pub date: String,
    pub state: String,
    pub place: String,
    pub employee_name: String,
}

/// Second step of lead intake
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDetails {
    pub company: Company,
    pub customer_details: String,
    pub field_observation: String,
    pub discussion: String,
    pub insights: String,
    pub remarks: String,
    /// Value in crore, empty or a plain decimal
    pub business_potential: String,
}

/// Complete lead record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub lead_no: String,
    pub date: String,
    pub state: String,
    pub place: String,
    pub employee_name: String,
    pub company: Company,
    pub customer_details: String,
    pub field_observation: String,
    pub discussion: String,
    pub insights: String,
    pub remarks: String,
    pub business_potential: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
}

impl Lead {
    pub fn from_parts(
        initial: InitialLead,
        details: LeadDetails,
        session: &Session,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            lead_no: initial.lead_no,
            date: initial.date,
            state: initial.state,
            place: initial.place,
            employee_name: initial.employee_name,
            company: details.company,
            customer_details: details.customer_details,
            field_observation: details.field_observation,
            discussion: details.discussion,
            insights: details.insights,
            remarks: details.remarks,
            business_potential: details.business_potential,
            submitted_by: session.username.clone(),
            submitted_at,
        }
    }

    pub fn initial(&self) -> InitialLead {
        InitialLead {
            lead_no: self.lead_no.clone(),
            date: self.date.clone(),
            state: self.state.clone(),
            place: self.place.clone(),
            employee_name: self.employee_name.clone(),
        }
    }

    pub fn details(&self) -> LeadDetails {
        LeadDetails {
            company: self.company.clone(),
            customer_details: self.customer_details.clone(),
            field_observation: self.field_observation.clone(),
            discussion: self.discussion.clone(),
            insights: self.insights.clone(),
            remarks: self.remarks.clone(),
            business_potential: self.business_potential.clone(),
        }
    }

    pub fn company_name(&self) -> &str {
        self.company.name()
    }
}

/// Saved Factory UX survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub id: String,
    pub form_type: FormType,
    pub lead_id: String,
    #[serde(flatten)]
    pub values: FormValues,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
}

/// Factory OS form family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFormType {
    Knowledge,
    Asstmate,
    Digiveu,
    Documate,
    Visitmate,
    Sitemate,
    Lotomate,
    Ert,
}

/// Subjects offered on the knowledge form
pub const SUBJECT_OPTIONS: [&str; 6] = [
    "Training",
    "Consulting",
    "Support",
    "Implementation",
    "Audit",
    "Review",
];

impl OsFormType {
    pub const ALL: [OsFormType; 8] = [
        OsFormType::Knowledge,
        OsFormType::Asstmate,
        OsFormType::Digiveu,
        OsFormType::Documate,
        OsFormType::Visitmate,
        OsFormType::Sitemate,
        OsFormType::Lotomate,
        OsFormType::Ert,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Asstmate => "asstmate",
            Self::Digiveu => "digiveu",
            Self::Documate => "documate",
            Self::Visitmate => "visitmate",
            Self::Sitemate => "sitemate",
            Self::Lotomate => "lotomate",
            Self::Ert => "ert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge",
            Self::Asstmate => "Asstmate",
            Self::Digiveu => "Digiveu",
            Self::Documate => "Documate",
            Self::Visitmate => "Visitmate",
            Self::Sitemate => "Sitemate",
            Self::Lotomate => "LOTOmate",
            Self::Ert => "ERT",
        }
    }

    /// Only the knowledge form carries contact and subject fields
    pub fn is_detailed(&self) -> bool {
        matches!(self, Self::Knowledge)
    }
}

impl FromStr for OsFormType {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| SurveyError::InvalidFormType(s.to_string()))
    }
}

impl fmt::Display for OsFormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Fields entered on a Factory OS form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsFormInput {
    pub company_name: String,
    pub contact_person: String,
    pub subject: Option<String>,
    pub mail_content: String,
    pub notes: String,
}

/// Saved Factory OS form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsSubmission {
    pub id: String,
    pub form_type: OsFormType,
    pub lead_id: String,
    #[serde(flatten)]
    pub input: OsFormInput,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
}

/// Machine safety observation for a lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyNote {
    pub id: String,
    pub lead_id: String,
    pub safety_notes: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
}
