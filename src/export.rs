//! Flat export records for leads and survey submissions
//!
//! Each record is an ordered list of string cells matching its header row.
//! Writing them to a spreadsheet is left to the caller.

use crate::state::{Lead, SurveySubmission};
use crate::survey::DraftField;

pub const LEAD_HEADERS: [&str; 12] = [
    "Lead No",
    "Date",
    "State",
    "Place",
    "Employee Name",
    "Company Name",
    "Customer Details",
    "Field Observation",
    "Discussion",
    "Insights",
    "Remarks",
    "Business Potential Value (in CR)",
];

/// Form Type and Lead ID, then one column per draft field
pub fn survey_headers() -> Vec<&'static str> {
    ["Form Type", "Lead ID"]
        .into_iter()
        .chain(DraftField::ALL.iter().map(|f| f.label()))
        .collect()
}

pub fn lead_export_record(lead: &Lead) -> Vec<String> {
    vec![
        lead.lead_no.clone(),
        lead.date.clone(),
        lead.state.clone(),
        lead.place.clone(),
        lead.employee_name.clone(),
        lead.company_name().to_string(),
        lead.customer_details.clone(),
        lead.field_observation.clone(),
        lead.discussion.clone(),
        lead.insights.clone(),
        lead.remarks.clone(),
        lead.business_potential.clone(),
    ]
}

pub fn survey_export_record(submission: &SurveySubmission) -> Vec<String> {
    let mut record = vec![submission.form_type.label(), submission.lead_id.clone()];
    record.extend(
        DraftField::ALL
            .iter()
            .map(|&field| submission.values.get(field).to_string()),
    );
    record
}

/// Join cells with tabs for terminal output
pub fn to_tsv_line(cells: &[impl AsRef<str>]) -> String {
    cells
        .iter()
        .map(|cell| cell.as_ref().replace(['\t', '\n'], " "))
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Company, InitialLead, LeadDetails, Session};
    use crate::survey::{FormType, FormValues};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lead_record_matches_headers() {
        let initial = InitialLead {
            lead_no: "LEAD-007".into(),
            date: "05-05-2025".into(),
            state: "Assam".into(),
            place: "Guwahati".into(),
            employee_name: "joy".into(),
        };
        let details = LeadDetails {
            company: Company::New("Brahma Tea".into()),
            remarks: "revisit".into(),
            business_potential: "0.75".into(),
            ..Default::default()
        };
        let session = Session {
            username: "joy".into(),
        };
        let lead = Lead::from_parts(initial, details, &session, Utc::now());

        let record = lead_export_record(&lead);
        assert_eq!(record.len(), LEAD_HEADERS.len());
        assert_eq!(record[0], "LEAD-007");
        assert_eq!(record[5], "Brahma Tea");
        assert_eq!(record[6], "");
        assert_eq!(record[10], "revisit");
        assert_eq!(record[11], "0.75");
    }

    #[test]
    fn test_survey_record_keeps_empty_cells() {
        let submission = SurveySubmission {
            id: "form-1".into(),
            form_type: FormType::ProductiveWorkplace,
            lead_id: "LEAD-002".into(),
            values: FormValues {
                heading: "Process Flow Diagram".into(),
                subheading: "P&ID".into(),
                audit_category: "Process Audit".into(),
                ..Default::default()
            },
            submitted_by: "joy".into(),
            submitted_at: Utc::now(),
        };

        let record = survey_export_record(&submission);
        assert_eq!(record.len(), survey_headers().len());
        assert_eq!(
            record,
            vec![
                "Productive Workplace",
                "LEAD-002",
                "Process Flow Diagram",
                "P&ID",
                "Process Audit",
                "",
                "",
                "",
                "",
                "",
                "",
                "0.00",
            ]
        );
    }

    #[test]
    fn test_survey_headers() {
        let headers = survey_headers();
        assert_eq!(headers[0], "Form Type");
        assert_eq!(headers[3], "Sub-heading");
        assert_eq!(headers[11], "Total Amount");
    }

    #[test]
    fn test_tsv_line_flattens_separators() {
        assert_eq!(to_tsv_line(&["a\tb", "c\nd", ""]), "a b\tc d\t");
    }
}
