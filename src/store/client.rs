//! JSON file backed record store
//!
//! Each collection is one pretty-printed JSON array in the data directory.
//! Writes go to a sibling temp file that is renamed over the original, so a
//! crash mid-write leaves the previous contents intact.

use super::traits::StoreClientTrait;
use crate::state::{Lead, OsSubmission, SafetyNote, SurveySubmission, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const USERS: &str = "users.json";
const LEADS: &str = "leads.json";
const SUBMISSIONS: &str = "ux_form_submissions.json";
const OS_SUBMISSIONS: &str = "factory_os_forms.json";
const SAFETY_NOTES: &str = "machine_safety_forms.json";

/// Store keeping one JSON document per collection
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create data directory {}", root.display()))?;
        tracing::debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.root.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn write_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let path = self.root.join(name);
        let tmp = self.root.join(format!("{name}.tmp"));
        let content = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    async fn append<T: Serialize + DeserializeOwned>(&self, name: &str, item: T) -> Result<()> {
        let mut items: Vec<T> = self.read_collection(name).await?;
        items.push(item);
        self.write_collection(name, &items).await
    }
}

#[async_trait]
impl StoreClientTrait for FileStore {
    async fn list_users(&mut self) -> Result<Vec<User>> {
        self.read_collection(USERS).await
    }

    async fn create_user(&mut self, user: User) -> Result<()> {
        self.append(USERS, user).await
    }

    async fn list_leads(&mut self) -> Result<Vec<Lead>> {
        self.read_collection(LEADS).await
    }

    async fn get_lead(&mut self, lead_no: &str) -> Result<Option<Lead>> {
        let leads: Vec<Lead> = self.read_collection(LEADS).await?;
        Ok(leads.into_iter().find(|lead| lead.lead_no == lead_no))
    }

    async fn save_lead(&mut self, lead: Lead) -> Result<()> {
        let mut leads: Vec<Lead> = self.read_collection(LEADS).await?;
        match leads.iter_mut().find(|l| l.lead_no == lead.lead_no) {
            Some(existing) => *existing = lead,
            None => leads.push(lead),
        }
        self.write_collection(LEADS, &leads).await
    }

    async fn delete_lead(&mut self, lead_no: &str) -> Result<bool> {
        let mut leads: Vec<Lead> = self.read_collection(LEADS).await?;
        let before = leads.len();
        leads.retain(|lead| lead.lead_no != lead_no);
        if leads.len() == before {
            return Ok(false);
        }
        self.write_collection(LEADS, &leads).await?;
        Ok(true)
    }

    async fn list_submissions(&mut self) -> Result<Vec<SurveySubmission>> {
        self.read_collection(SUBMISSIONS).await
    }

    async fn create_submission(&mut self, submission: SurveySubmission) -> Result<()> {
        self.append(SUBMISSIONS, submission).await
    }

    async fn delete_submission(&mut self, id: &str) -> Result<bool> {
        let mut submissions: Vec<SurveySubmission> = self.read_collection(SUBMISSIONS).await?;
        let before = submissions.len();
        submissions.retain(|s| s.id != id);
        if submissions.len() == before {
            return Ok(false);
        }
        self.write_collection(SUBMISSIONS, &submissions).await?;
        Ok(true)
    }

    async fn list_os_submissions(&mut self) -> Result<Vec<OsSubmission>> {
        self.read_collection(OS_SUBMISSIONS).await
    }

    async fn create_os_submission(&mut self, submission: OsSubmission) -> Result<()> {
        self.append(OS_SUBMISSIONS, submission).await
    }

    async fn list_safety_notes(&mut self) -> Result<Vec<SafetyNote>> {
        self.read_collection(SAFETY_NOTES).await
    }

    async fn create_safety_note(&mut self, note: SafetyNote) -> Result<()> {
        self.append(SAFETY_NOTES, note).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Company, InitialLead, LeadDetails, OsFormInput, OsFormType, Session};
    use crate::survey::{FormType, FormValues};
    use chrono::Utc;
    use tempfile::TempDir;

    async fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("data")).await.unwrap();
        (dir, store)
    }

    fn lead(lead_no: &str, place: &str) -> Lead {
        let initial = InitialLead {
            lead_no: lead_no.to_string(),
            date: "02-02-2025".to_string(),
            state: "Punjab".to_string(),
            place: place.to_string(),
            employee_name: "kabir".to_string(),
        };
        let details = LeadDetails {
            company: Company::New("Acme".into()),
            ..Default::default()
        };
        let session = Session {
            username: "kabir".to_string(),
        };
        Lead::from_parts(initial, details, &session, Utc::now())
    }

    fn submission(id: &str) -> SurveySubmission {
        SurveySubmission {
            id: id.to_string(),
            form_type: FormType::ChangeRx,
            lead_id: "LEAD-001".to_string(),
            values: FormValues::default(),
            submitted_by: "kabir".to_string(),
            submitted_at: Utc::now(),
        }
    }

    mod collections {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_missing_files_read_as_empty() {
            let (_dir, mut store) = store().await;
            assert!(store.list_users().await.unwrap().is_empty());
            assert!(store.list_leads().await.unwrap().is_empty());
            assert!(store.list_submissions().await.unwrap().is_empty());
            assert!(store.list_os_submissions().await.unwrap().is_empty());
            assert!(store.list_safety_notes().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_corrupt_file_is_an_error() {
            let (_dir, mut store) = store().await;
            tokio::fs::write(store.root().join(LEADS), "{not json")
                .await
                .unwrap();
            let err = store.list_leads().await.unwrap_err();
            assert!(err.to_string().contains("Failed to parse"));
        }

        #[tokio::test]
        async fn test_users_persist_across_reopen() {
            let (_dir, mut store) = store().await;
            store
                .create_user(User {
                    username: "kabir".into(),
                    password: "pw".into(),
                })
                .await
                .unwrap();

            let mut reopened = FileStore::open(store.root()).await.unwrap();
            let users = reopened.list_users().await.unwrap();
            assert_eq!(users.len(), 1);
            assert_eq!(users[0].username, "kabir");
        }

        #[tokio::test]
        async fn test_no_temp_file_left_behind() {
            let (_dir, mut store) = store().await;
            store.create_submission(submission("form-1")).await.unwrap();
            assert!(store.root().join(SUBMISSIONS).exists());
            assert!(!store.root().join(format!("{SUBMISSIONS}.tmp")).exists());
        }
    }

    mod leads {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_save_lead_upserts_by_number() {
            let (_dir, mut store) = store().await;
            store.save_lead(lead("LEAD-001", "Amritsar")).await.unwrap();
            store.save_lead(lead("LEAD-002", "Ludhiana")).await.unwrap();
            store.save_lead(lead("LEAD-001", "Jalandhar")).await.unwrap();

            let leads = store.list_leads().await.unwrap();
            assert_eq!(leads.len(), 2);
            assert_eq!(leads[0].lead_no, "LEAD-001");
            assert_eq!(leads[0].place, "Jalandhar");
            assert_eq!(leads[1].place, "Ludhiana");
        }

        #[tokio::test]
        async fn test_get_lead() {
            let (_dir, mut store) = store().await;
            store.save_lead(lead("LEAD-001", "Amritsar")).await.unwrap();
            let found = store.get_lead("LEAD-001").await.unwrap().unwrap();
            assert_eq!(found.place, "Amritsar");
            assert!(store.get_lead("LEAD-404").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_delete_lead() {
            let (_dir, mut store) = store().await;
            store.save_lead(lead("LEAD-001", "Amritsar")).await.unwrap();
            assert!(store.delete_lead("LEAD-001").await.unwrap());
            assert!(!store.delete_lead("LEAD-001").await.unwrap());
            assert!(store.list_leads().await.unwrap().is_empty());
        }
    }

    mod submissions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_submissions_append_and_delete() {
            let (_dir, mut store) = store().await;
            store.create_submission(submission("form-1")).await.unwrap();
            store.create_submission(submission("form-2")).await.unwrap();
            assert!(store.delete_submission("form-1").await.unwrap());
            assert!(!store.delete_submission("form-9").await.unwrap());

            let remaining = store.list_submissions().await.unwrap();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].id, "form-2");
        }

        #[tokio::test]
        async fn test_os_and_safety_records_round_trip() {
            let (_dir, mut store) = store().await;
            let os = OsSubmission {
                id: "form-os".into(),
                form_type: OsFormType::Knowledge,
                lead_id: "LEAD-001".into(),
                input: OsFormInput {
                    company_name: "Acme".into(),
                    subject: Some("Audit".into()),
                    ..Default::default()
                },
                submitted_by: "kabir".into(),
                submitted_at: Utc::now(),
            };
            let note = SafetyNote {
                id: "form-safety".into(),
                lead_id: "LEAD-001".into(),
                safety_notes: "guard missing on press 4".into(),
                submitted_by: "kabir".into(),
                submitted_at: Utc::now(),
            };
            store.create_os_submission(os.clone()).await.unwrap();
            store.create_safety_note(note.clone()).await.unwrap();

            assert_eq!(store.list_os_submissions().await.unwrap(), vec![os]);
            assert_eq!(store.list_safety_notes().await.unwrap(), vec![note]);
        }
    }
}
