//! Form state management and form structs

use super::field::{FieldValue, FormField};
use crate::leads::{self, LeadError, INDIAN_STATES};
use crate::state::{Company, InitialLead, Lead, LeadDetails};
use crate::survey::{DraftField, FormType, FormValues, SurveyDraft, SurveyError};

/// Company select entry that switches to a typed-in name
pub const NEW_COMPANY: &str = "New";

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

// Factory UX survey form

/// Field view over a [`SurveyDraft`]
///
/// All edits go through the draft so the cascade runs; the field list is
/// rebuilt from the draft after every change.
#[derive(Debug, Clone)]
pub struct SurveyForm {
    draft: SurveyDraft,
    fields: Vec<FormField>,
    active_field_index: usize,
}

impl SurveyForm {
    pub fn new(form_type: FormType) -> Self {
        Self::from_draft(SurveyDraft::new(form_type))
    }

    /// Open a form for a form type identifier
    pub fn open(form_type: &str) -> Result<Self, SurveyError> {
        SurveyDraft::open(form_type).map(Self::from_draft)
    }

    fn from_draft(draft: SurveyDraft) -> Self {
        let mut form = Self {
            draft,
            fields: Vec::new(),
            active_field_index: 0,
        };
        form.refresh();
        form
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    pub fn form_type(&self) -> FormType {
        self.draft.form_type()
    }

    pub fn values(&self) -> &FormValues {
        self.draft.values()
    }

    pub fn active_draft_field(&self) -> DraftField {
        DraftField::ALL
            .get(self.active_field_index)
            .copied()
            .unwrap_or(DraftField::TotalAmount)
    }

    /// Set a field by identity
    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), SurveyError> {
        let result = self.draft.set_field(field, value);
        self.refresh();
        result
    }

    /// Move the active select field to its next option
    pub fn select_next_option(&mut self) -> Result<(), SurveyError> {
        self.cycle_option(FormField::next_option)
    }

    /// Move the active select field to its previous option
    pub fn select_prev_option(&mut self) -> Result<(), SurveyError> {
        self.cycle_option(FormField::prev_option)
    }

    /// Type into the active text field
    pub fn push_char(&mut self, c: char) -> Result<(), SurveyError> {
        self.edit_text(|s| s.push(c))
    }

    pub fn pop_char(&mut self) -> Result<(), SurveyError> {
        self.edit_text(|s| {
            s.pop();
        })
    }

    pub fn validate_for_submit(&self) -> Result<(), SurveyError> {
        self.draft.validate_for_submit()
    }

    pub fn mark_submitted(&mut self) -> Result<FormValues, SurveyError> {
        self.draft.mark_submitted()
    }

    pub fn abandon(&mut self) {
        self.draft.abandon();
    }

    fn cycle_option(
        &mut self,
        pick: impl Fn(&FormField) -> Option<&str>,
    ) -> Result<(), SurveyError> {
        let field = self.active_draft_field();
        let Some(current) = self.fields.get(self.active_field_index) else {
            return Ok(());
        };
        if !current.is_select() {
            return Ok(());
        }
        if current.read_only {
            return Err(SurveyError::ReadOnlyField(field.label()));
        }
        let picked = pick(current).map(str::to_string);
        match picked {
            Some(value) => self.set(field, &value),
            None => Ok(()),
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), SurveyError> {
        let field = self.active_draft_field();
        let Some(current) = self.fields.get(self.active_field_index) else {
            return Ok(());
        };
        if current.read_only {
            return Err(SurveyError::ReadOnlyField(field.label()));
        }
        if current.is_select() {
            return Ok(());
        }
        let mut value = current.as_text().to_string();
        edit(&mut value);
        self.set(field, &value)
    }

    fn refresh(&mut self) {
        self.fields = DraftField::ALL
            .iter()
            .map(|&field| self.build_field(field))
            .collect();
    }

    fn build_field(&self, field: DraftField) -> FormField {
        let value = self.draft.values().get(field).to_string();
        let form_field = if self.draft.is_select(field) {
            FormField::select(field.name(), field.label(), self.draft.options_for(field), value)
        } else {
            FormField::text_with_value(field.name(), field.label(), value, false)
        };
        if self.draft.is_read_only(field) {
            form_field.locked()
        } else {
            form_field
        }
    }
}

impl Form for SurveyForm {
    fn field_count(&self) -> usize {
        DraftField::ALL.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(DraftField::ALL.len() - 1);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

// Lead intake, first step
#[derive(Debug, Clone)]
pub struct InitialLeadForm {
    pub lead_no: FormField,
    pub date: FormField,
    pub state: FormField,
    pub place: FormField,
    pub employee_name: FormField,
    active_field_index: usize,
}

impl InitialLeadForm {
    pub fn new(lead_no: String, date: String, employee_name: String) -> Self {
        Self {
            lead_no: FormField::text_with_value("lead_no", "Lead No", lead_no, false).locked(),
            date: FormField::text_with_value("date", "Date", date, false).locked(),
            state: FormField::select(
                "state",
                "State",
                INDIAN_STATES.iter().map(|s| s.to_string()).collect(),
                String::new(),
            ),
            place: FormField::text("place", "Place", false),
            employee_name: FormField::text_with_value(
                "employee_name",
                "Employee Name",
                employee_name,
                false,
            )
            .locked(),
            active_field_index: 2,
        }
    }

    pub fn from_initial(initial: &InitialLead) -> Self {
        let mut form = Self::new(
            initial.lead_no.clone(),
            initial.date.clone(),
            initial.employee_name.clone(),
        );
        form.state.set_text(initial.state.clone());
        form.place.set_text(initial.place.clone());
        form
    }

    /// Validated first-step values
    pub fn to_initial(&self) -> Result<InitialLead, LeadError> {
        let initial = InitialLead {
            lead_no: self.lead_no.as_text().to_string(),
            date: self.date.as_text().to_string(),
            state: self.state.as_text().to_string(),
            place: self.place.as_text().trim().to_string(),
            employee_name: self.employee_name.as_text().to_string(),
        };
        leads::validate_initial(&initial)?;
        Ok(initial)
    }
}

impl Form for InitialLeadForm {
    fn field_count(&self) -> usize {
        5
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(4);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.lead_no),
            1 => Some(&self.date),
            2 => Some(&self.state),
            3 => Some(&self.place),
            4 => Some(&self.employee_name),
            _ => None,
        }
    }
}

// Lead intake, second step
#[derive(Debug, Clone)]
pub struct DetailedLeadForm {
    pub initial: InitialLead,
    pub company: FormField,
    pub new_company_name: FormField,
    pub customer_details: FormField,
    pub field_observation: FormField,
    pub discussion: FormField,
    pub insights: FormField,
    pub remarks: FormField,
    pub business_potential: FormField,
    active_field_index: usize,
}

impl DetailedLeadForm {
    pub fn new(initial: InitialLead, known_companies: Vec<String>) -> Self {
        let mut options = known_companies;
        options.push(NEW_COMPANY.to_string());
        Self {
            initial,
            company: FormField::select("company_name", "Company Name", options, String::new()),
            new_company_name: FormField::text("new_company_name", "New Company Name", false),
            customer_details: FormField::text("customer_details", "Customer Details", true),
            field_observation: FormField::text("field_observation", "Field Observation", true),
            discussion: FormField::text("discussion", "Discussion", true),
            insights: FormField::text("insights", "Insights", true),
            remarks: FormField::text("remarks", "Remarks", true),
            business_potential: FormField::text(
                "business_potential",
                "Business Potential Value (in CR)",
                false,
            ),
            active_field_index: 0,
        }
    }

    /// Form pre-filled from a saved lead, for editing
    pub fn from_lead(lead: &Lead, known_companies: Vec<String>) -> Self {
        let mut form = Self::new(lead.initial(), known_companies);
        form.apply_details(lead.details());
        form
    }

    /// Overwrite every detail field
    pub fn apply_details(&mut self, details: LeadDetails) {
        self.set_company(&details.company);
        self.customer_details.set_text(details.customer_details);
        self.field_observation.set_text(details.field_observation);
        self.discussion.set_text(details.discussion);
        self.insights.set_text(details.insights);
        self.remarks.set_text(details.remarks);
        self.business_potential.set_text(details.business_potential);
    }

    /// Pick a known company by name, or switch to a new one
    pub fn set_company_name(&mut self, name: &str) {
        let known: Vec<String> = self
            .company
            .options()
            .iter()
            .filter(|o| *o != NEW_COMPANY)
            .cloned()
            .collect();
        self.set_company(&leads::company_from_name(name, &known));
    }

    fn set_company(&mut self, company: &Company) {
        match company {
            Company::New(name) => {
                self.company.set_text(NEW_COMPANY.to_string());
                self.new_company_name.set_text(name.clone());
            }
            Company::Existing(name) => {
                if let FieldValue::Select { options, .. } = &mut self.company.value {
                    if !options.contains(name) {
                        options.insert(options.len() - 1, name.clone());
                    }
                }
                self.company.set_text(name.clone());
                self.new_company_name.clear();
            }
        }
    }

    pub fn is_new_company(&self) -> bool {
        self.company.as_text() == NEW_COMPANY
    }

    /// Type into the active field; business potential only takes numeric input
    pub fn input_char(&mut self, c: char) {
        if self.active_field_index == 7 {
            let mut candidate = self.business_potential.as_text().to_string();
            candidate.push(c);
            if !leads::is_valid_business_potential(&candidate) {
                return;
            }
        }
        self.get_active_field_mut().push_char(c);
    }

    pub fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.company,
            1 => &mut self.new_company_name,
            2 => &mut self.customer_details,
            3 => &mut self.field_observation,
            4 => &mut self.discussion,
            5 => &mut self.insights,
            6 => &mut self.remarks,
            _ => &mut self.business_potential,
        }
    }

    /// Validated second-step values
    pub fn to_details(&self) -> Result<LeadDetails, LeadError> {
        let company = if self.is_new_company() {
            Company::New(self.new_company_name.as_text().trim().to_string())
        } else {
            Company::Existing(self.company.as_text().to_string())
        };
        let details = LeadDetails {
            company,
            customer_details: self.customer_details.as_text().to_string(),
            field_observation: self.field_observation.as_text().to_string(),
            discussion: self.discussion.as_text().to_string(),
            insights: self.insights.as_text().to_string(),
            remarks: self.remarks.as_text().to_string(),
            business_potential: self.business_potential.as_text().to_string(),
        };
        leads::validate_details(&details)?;
        Ok(details)
    }
}

impl Form for DetailedLeadForm {
    fn field_count(&self) -> usize {
        8
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(7);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.company),
            1 => Some(&self.new_company_name),
            2 => Some(&self.customer_details),
            3 => Some(&self.field_observation),
            4 => Some(&self.discussion),
            5 => Some(&self.insights),
            6 => Some(&self.remarks),
            7 => Some(&self.business_potential),
            _ => None,
        }
    }
}
