//! Application core: lead lifecycle, survey submission and listings

use crate::auth;
use crate::leads::{self, LeadError};
use crate::state::{
    new_record_id, DetailedLeadForm, InitialLead, InitialLeadForm, Lead, OsFormInput, OsFormType,
    OsSubmission, SafetyNote, Session, SurveyForm, SurveySubmission, User, SUBJECT_OPTIONS,
};
use crate::store::StoreClientTrait;
use crate::survey::{FormType, SurveyError};
use anyhow::{bail, Result};
use chrono::Utc;

/// Main application struct
pub struct App<S: StoreClientTrait> {
    /// Record store backing every operation
    store: S,
}

impl<S: StoreClientTrait> App<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn signup(&mut self, username: &str, password: &str, confirm: &str) -> Result<User> {
        auth::signup(&mut self.store, username, password, confirm).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        auth::login(&mut self.store, username, password).await
    }

    // Leads

    /// Lead number the next saved lead will get
    pub async fn next_lead_number(&mut self) -> Result<String> {
        let leads = self.store.list_leads().await?;
        Ok(leads::next_lead_number(
            leads.iter().map(|lead| lead.lead_no.as_str()),
        ))
    }

    /// First lead step, pre-filled with number, date and employee
    pub async fn start_lead(&mut self, session: &Session) -> Result<InitialLeadForm> {
        let lead_no = self.next_lead_number().await?;
        Ok(InitialLeadForm::new(
            lead_no,
            leads::today(),
            session.username.clone(),
        ))
    }

    /// Second lead step, offering companies from earlier leads
    pub async fn detail_lead(&mut self, initial: InitialLead) -> Result<DetailedLeadForm> {
        let companies = self.company_options().await?;
        Ok(DetailedLeadForm::new(initial, companies))
    }

    /// Validate both steps and persist a new lead
    ///
    /// Never replaces an existing lead; that is what `update_lead` is for.
    pub async fn complete_lead(
        &mut self,
        session: &Session,
        initial: &InitialLeadForm,
        detailed: &DetailedLeadForm,
    ) -> Result<Lead> {
        let initial = initial.to_initial()?;
        let details = detailed.to_details()?;
        if self.store.get_lead(&initial.lead_no).await?.is_some() {
            return Err(LeadError::AlreadyExists(initial.lead_no).into());
        }
        let lead = Lead::from_parts(initial, details, session, Utc::now());
        self.store.save_lead(lead.clone()).await?;
        tracing::info!(
            lead_no = %lead.lead_no,
            company = %lead.company_name(),
            new_company = lead.company.is_new(),
            "lead saved"
        );
        Ok(lead)
    }

    /// Detail form for an existing lead
    pub async fn edit_lead(&mut self, lead_no: &str) -> Result<DetailedLeadForm> {
        let lead = self.get_lead(lead_no).await?;
        let companies = self.company_options().await?;
        Ok(DetailedLeadForm::from_lead(&lead, companies))
    }

    /// Replace the details of an existing lead, keeping its first step
    pub async fn update_lead(&mut self, form: &DetailedLeadForm) -> Result<Lead> {
        let mut lead = self.get_lead(&form.initial.lead_no).await?;
        let details = form.to_details()?;
        lead.company = details.company;
        lead.customer_details = details.customer_details;
        lead.field_observation = details.field_observation;
        lead.discussion = details.discussion;
        lead.insights = details.insights;
        lead.remarks = details.remarks;
        lead.business_potential = details.business_potential;
        self.store.save_lead(lead.clone()).await?;
        tracing::info!(lead_no = %lead.lead_no, "lead updated");
        Ok(lead)
    }

    pub async fn list_leads(&mut self) -> Result<Vec<Lead>> {
        self.store.list_leads().await
    }

    pub async fn get_lead(&mut self, lead_no: &str) -> Result<Lead> {
        match self.store.get_lead(lead_no).await? {
            Some(lead) => Ok(lead),
            None => Err(LeadError::NotFound(lead_no.to_string()).into()),
        }
    }

    /// Delete a lead; its submissions are kept
    pub async fn delete_lead(&mut self, lead_no: &str) -> Result<()> {
        if !self.store.delete_lead(lead_no).await? {
            return Err(LeadError::NotFound(lead_no.to_string()).into());
        }
        tracing::info!(lead_no, "lead deleted");
        Ok(())
    }

    pub async fn company_options(&mut self) -> Result<Vec<String>> {
        let leads = self.store.list_leads().await?;
        Ok(leads::company_options(&leads))
    }

    // Factory UX surveys

    pub fn open_survey(&self, form_type: &str) -> Result<SurveyForm, SurveyError> {
        SurveyForm::open(form_type)
    }

    /// Persist a survey against a lead
    ///
    /// The form is only marked submitted once the store has accepted the
    /// record; on any error it stays open for another attempt.
    pub async fn submit_survey(
        &mut self,
        session: &Session,
        lead_no: &str,
        form: &mut SurveyForm,
    ) -> Result<SurveySubmission> {
        form.validate_for_submit()?;
        self.get_lead(lead_no).await?;

        let submission = SurveySubmission {
            id: new_record_id(),
            form_type: form.form_type(),
            lead_id: lead_no.to_string(),
            values: form.values().clone(),
            submitted_by: session.username.clone(),
            submitted_at: Utc::now(),
        };
        self.store.create_submission(submission.clone()).await?;
        form.mark_submitted()?;

        tracing::info!(
            id = %submission.id,
            form_type = %submission.form_type,
            lead_no,
            "survey submitted"
        );
        Ok(submission)
    }

    /// Submissions for a lead, optionally limited to one form family
    pub async fn list_submissions(
        &mut self,
        lead_no: &str,
        form_type: Option<FormType>,
    ) -> Result<Vec<SurveySubmission>> {
        let submissions = self.store.list_submissions().await?;
        Ok(submissions
            .into_iter()
            .filter(|s| s.lead_id == lead_no)
            .filter(|s| form_type.map_or(true, |t| s.form_type == t))
            .collect())
    }

    pub async fn delete_submission(&mut self, id: &str) -> Result<()> {
        if !self.store.delete_submission(id).await? {
            bail!("submission {id} not found");
        }
        tracing::info!(id, "survey submission deleted");
        Ok(())
    }

    /// Form families that have submissions for a lead, in first-seen order
    pub async fn submission_form_types(&mut self, lead_no: &str) -> Result<Vec<FormType>> {
        let mut form_types = Vec::new();
        for submission in self.list_submissions(lead_no, None).await? {
            if !form_types.contains(&submission.form_type) {
                form_types.push(submission.form_type);
            }
        }
        Ok(form_types)
    }

    // Factory OS forms and machine safety notes

    pub async fn submit_os_form(
        &mut self,
        session: &Session,
        lead_no: &str,
        form_type: OsFormType,
        mut input: OsFormInput,
    ) -> Result<OsSubmission> {
        self.get_lead(lead_no).await?;

        if form_type.is_detailed() {
            if let Some(subject) = &input.subject {
                if !SUBJECT_OPTIONS.contains(&subject.as_str()) {
                    bail!("unknown subject {subject:?}");
                }
            }
        } else {
            if !input.company_name.is_empty()
                || !input.contact_person.is_empty()
                || input.subject.is_some()
                || !input.mail_content.is_empty()
            {
                tracing::warn!(%form_type, "only notes are kept for this form");
            }
            input = OsFormInput {
                notes: input.notes,
                ..Default::default()
            };
        }

        let submission = OsSubmission {
            id: new_record_id(),
            form_type,
            lead_id: lead_no.to_string(),
            input,
            submitted_by: session.username.clone(),
            submitted_at: Utc::now(),
        };
        self.store.create_os_submission(submission.clone()).await?;
        tracing::info!(id = %submission.id, %form_type, lead_no, "factory OS form submitted");
        Ok(submission)
    }

    pub async fn list_os_submissions(&mut self, lead_no: &str) -> Result<Vec<OsSubmission>> {
        let submissions = self.store.list_os_submissions().await?;
        Ok(submissions
            .into_iter()
            .filter(|s| s.lead_id == lead_no)
            .collect())
    }

    pub async fn submit_safety_note(
        &mut self,
        session: &Session,
        lead_no: &str,
        notes: &str,
    ) -> Result<SafetyNote> {
        if notes.trim().is_empty() {
            bail!("safety notes are empty");
        }
        self.get_lead(lead_no).await?;

        let note = SafetyNote {
            id: new_record_id(),
            lead_id: lead_no.to_string(),
            safety_notes: notes.to_string(),
            submitted_by: session.username.clone(),
            submitted_at: Utc::now(),
        };
        self.store.create_safety_note(note.clone()).await?;
        tracing::info!(id = %note.id, lead_no, "safety note saved");
        Ok(note)
    }

    pub async fn list_safety_notes(&mut self, lead_no: &str) -> Result<Vec<SafetyNote>> {
        let notes = self.store.list_safety_notes().await?;
        Ok(notes.into_iter().filter(|n| n.lead_id == lead_no).collect())
    }
}
