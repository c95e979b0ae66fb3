//! Trait abstraction for the record store to enable mocking in tests

use crate::state::{Lead, OsSubmission, SafetyNote, SurveySubmission, User};
use anyhow::Result;
use async_trait::async_trait;

/// Keyed record store operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreClientTrait: Send + Sync {
    /// List registered users
    async fn list_users(&mut self) -> Result<Vec<User>>;

    /// Add a user
    async fn create_user(&mut self, user: User) -> Result<()>;

    /// List all leads in creation order
    async fn list_leads(&mut self) -> Result<Vec<Lead>>;

    /// Get a lead by its lead number
    async fn get_lead(&mut self, lead_no: &str) -> Result<Option<Lead>>;

    /// Insert a lead, or replace the one with the same lead number
    async fn save_lead(&mut self, lead: Lead) -> Result<()>;

    /// Delete a lead, returning whether it existed
    async fn delete_lead(&mut self, lead_no: &str) -> Result<bool>;

    /// List Factory UX survey submissions
    async fn list_submissions(&mut self) -> Result<Vec<SurveySubmission>>;

    /// Add a survey submission
    async fn create_submission(&mut self, submission: SurveySubmission) -> Result<()>;

    /// Delete a survey submission, returning whether it existed
    async fn delete_submission(&mut self, id: &str) -> Result<bool>;

    /// List Factory OS submissions
    async fn list_os_submissions(&mut self) -> Result<Vec<OsSubmission>>;

    /// Add a Factory OS submission
    async fn create_os_submission(&mut self, submission: OsSubmission) -> Result<()>;

    /// List machine safety notes
    async fn list_safety_notes(&mut self) -> Result<Vec<SafetyNote>>;

    /// Add a machine safety note
    async fn create_safety_note(&mut self, note: SafetyNote) -> Result<()>;
}
