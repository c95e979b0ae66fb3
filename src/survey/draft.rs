//! In-progress survey submission

use super::error::SurveyError;
use super::policy::{FormType, MaterialCodeMode, OptionPolicy};
use super::resolver::{
    compute_total_amount, get_policy, resolve_audit_category, resolve_subheadings, Resolution,
};
use serde::{Deserialize, Serialize};

/// The ten values a survey submission carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub heading: String,
    pub subheading: String,
    pub audit_category: String,
    pub material_code: String,
    pub hsn_code: String,
    pub height: String,
    pub uom: String,
    pub quantity: String,
    pub price: String,
    pub total_amount: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            heading: String::new(),
            subheading: String::new(),
            audit_category: String::new(),
            material_code: String::new(),
            hsn_code: String::new(),
            height: String::new(),
            uom: String::new(),
            quantity: String::new(),
            price: String::new(),
            total_amount: compute_total_amount("", ""),
        }
    }
}

impl FormValues {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Heading => &self.heading,
            DraftField::Subheading => &self.subheading,
            DraftField::AuditCategory => &self.audit_category,
            DraftField::MaterialCode => &self.material_code,
            DraftField::HsnCode => &self.hsn_code,
            DraftField::Height => &self.height,
            DraftField::Uom => &self.uom,
            DraftField::Quantity => &self.quantity,
            DraftField::Price => &self.price,
            DraftField::TotalAmount => &self.total_amount,
        }
    }
}

/// Addressable draft fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Heading,
    Subheading,
    AuditCategory,
    MaterialCode,
    HsnCode,
    Height,
    Uom,
    Quantity,
    Price,
    TotalAmount,
}

impl DraftField {
    pub const ALL: [DraftField; 10] = [
        DraftField::Heading,
        DraftField::Subheading,
        DraftField::AuditCategory,
        DraftField::MaterialCode,
        DraftField::HsnCode,
        DraftField::Height,
        DraftField::Uom,
        DraftField::Quantity,
        DraftField::Price,
        DraftField::TotalAmount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Subheading => "subheading",
            Self::AuditCategory => "audit_category",
            Self::MaterialCode => "material_code",
            Self::HsnCode => "hsn_code",
            Self::Height => "height",
            Self::Uom => "uom",
            Self::Quantity => "quantity",
            Self::Price => "price",
            Self::TotalAmount => "total_amount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Subheading => "Sub-heading",
            Self::AuditCategory => "Audit Category",
            Self::MaterialCode => "Material Code",
            Self::HsnCode => "HSN Code",
            Self::Height => "Height",
            Self::Uom => "UOM",
            Self::Quantity => "Quantity",
            Self::Price => "Price",
            Self::TotalAmount => "Total Amount",
        }
    }
}

/// Lifecycle of one open form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftPhase {
    #[default]
    Unselected,
    HeadingChosen,
    Submitted,
    Abandoned,
}

impl DraftPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted | Self::Abandoned)
    }
}

/// Draft submission bound to one form family's policy
///
/// Every mutation keeps the dependent fields consistent with the policy's
/// resolution for the current heading.
#[derive(Debug, Clone)]
pub struct SurveyDraft {
    policy: &'static OptionPolicy,
    values: FormValues,
    phase: DraftPhase,
    subheadings: Resolution,
    audit_categories: Resolution,
}

impl SurveyDraft {
    pub fn new(form_type: FormType) -> Self {
        Self::with_policy(form_type.policy())
    }

    /// Open a draft for a form type identifier
    pub fn open(form_type: &str) -> Result<Self, SurveyError> {
        get_policy(form_type)
            .map(Self::with_policy)
            .ok_or_else(|| SurveyError::InvalidFormType(form_type.to_string()))
    }

    fn with_policy(policy: &'static OptionPolicy) -> Self {
        Self {
            policy,
            values: FormValues::default(),
            phase: DraftPhase::Unselected,
            subheadings: Resolution::default(),
            audit_categories: Resolution::default(),
        }
    }

    pub fn form_type(&self) -> FormType {
        self.policy.form_type
    }

    pub fn policy(&self) -> &'static OptionPolicy {
        self.policy
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    #[cfg(test)]
    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn subheadings(&self) -> &Resolution {
        &self.subheadings
    }

    pub fn audit_categories(&self) -> &Resolution {
        &self.audit_categories
    }

    pub fn material_code_mode(&self) -> MaterialCodeMode {
        self.policy.material_code_mode
    }

    /// Options a select field offers right now (empty for free text fields)
    pub fn options_for(&self, field: DraftField) -> Vec<String> {
        match field {
            DraftField::Heading => self
                .policy
                .heading_options
                .iter()
                .map(|s| s.to_string())
                .collect(),
            DraftField::Subheading => self.subheadings.options.clone(),
            DraftField::AuditCategory => self.audit_categories.options.clone(),
            DraftField::MaterialCode => self
                .material_code_mode()
                .options()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether the field is presented as a selection
    pub fn is_select(&self, field: DraftField) -> bool {
        match field {
            DraftField::Heading | DraftField::Subheading | DraftField::AuditCategory => true,
            DraftField::MaterialCode => !self.material_code_mode().is_free_text(),
            _ => false,
        }
    }

    /// Whether the user may change the field
    pub fn is_read_only(&self, field: DraftField) -> bool {
        match field {
            DraftField::Subheading => self.subheadings.forced.is_some(),
            DraftField::AuditCategory => self.audit_categories.forced.is_some(),
            DraftField::TotalAmount => true,
            _ => false,
        }
    }

    /// Select a heading and re-run the dependent cascade
    pub fn set_heading(&mut self, heading: &str) -> Result<(), SurveyError> {
        self.ensure_open()?;

        if !heading.is_empty() && !self.policy.has_heading(heading) {
            tracing::warn!(
                form_type = %self.form_type(),
                heading,
                "heading outside declared options, dependent fields cleared"
            );
        }

        self.values.heading = heading.to_string();
        self.phase = if heading.is_empty() {
            DraftPhase::Unselected
        } else {
            DraftPhase::HeadingChosen
        };

        self.subheadings = resolve_subheadings(self.policy, heading);
        reconcile(&mut self.values.subheading, &self.subheadings);

        self.audit_categories = resolve_audit_category(self.policy, heading);
        reconcile(&mut self.values.audit_category, &self.audit_categories);

        if let MaterialCodeMode::FixedOptions(codes) = self.material_code_mode() {
            if !codes.contains(&self.values.material_code.as_str()) {
                self.values.material_code.clear();
            }
        }

        tracing::debug!(
            form_type = %self.form_type(),
            heading,
            subheading = %self.values.subheading,
            audit_category = %self.values.audit_category,
            "resolved dependent fields"
        );
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: &str) -> Result<(), SurveyError> {
        self.ensure_open()?;
        self.values.quantity = quantity.to_string();
        self.recompute_total();
        Ok(())
    }

    pub fn set_price(&mut self, price: &str) -> Result<(), SurveyError> {
        self.ensure_open()?;
        self.values.price = price.to_string();
        self.recompute_total();
        Ok(())
    }

    /// Set any field, enforcing option sets and read-only rules
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), SurveyError> {
        self.ensure_open()?;

        match field {
            DraftField::Heading => return self.set_heading(value),
            DraftField::Quantity => return self.set_quantity(value),
            DraftField::Price => return self.set_price(value),
            DraftField::TotalAmount => return Err(SurveyError::ReadOnlyField(field.label())),
            _ => {}
        }

        // A forced value may be re-submitted unchanged, nothing else
        if self.is_read_only(field) && self.values.get(field) != value {
            return Err(SurveyError::ReadOnlyField(field.label()));
        }
        if self.is_select(field)
            && !value.is_empty()
            && !self.options_for(field).iter().any(|o| o == value)
        {
            return Err(SurveyError::NotAnOption {
                field,
                value: value.to_string(),
            });
        }

        let slot = match field {
            DraftField::Subheading => &mut self.values.subheading,
            DraftField::AuditCategory => &mut self.values.audit_category,
            DraftField::MaterialCode => &mut self.values.material_code,
            DraftField::HsnCode => &mut self.values.hsn_code,
            DraftField::Height => &mut self.values.height,
            DraftField::Uom => &mut self.values.uom,
            DraftField::Heading
            | DraftField::Quantity
            | DraftField::Price
            | DraftField::TotalAmount => unreachable!("handled above"),
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Check the draft can be persisted
    pub fn validate_for_submit(&self) -> Result<(), SurveyError> {
        self.ensure_open()?;
        if self.values.heading.is_empty() {
            return Err(SurveyError::HeadingNotChosen);
        }
        if !self.policy.has_heading(&self.values.heading) {
            return Err(SurveyError::UnresolvableHeading {
                form_type: self.form_type().to_string(),
                heading: self.values.heading.clone(),
            });
        }
        Ok(())
    }

    /// Close the draft as submitted, returning its final values
    pub fn mark_submitted(&mut self) -> Result<FormValues, SurveyError> {
        self.validate_for_submit()?;
        self.phase = DraftPhase::Submitted;
        Ok(self.values.clone())
    }

    /// Close the draft without saving
    pub fn abandon(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = DraftPhase::Abandoned;
        }
    }

    fn ensure_open(&self) -> Result<(), SurveyError> {
        if self.phase.is_terminal() {
            Err(SurveyError::DraftClosed)
        } else {
            Ok(())
        }
    }

    fn recompute_total(&mut self) {
        self.values.total_amount = compute_total_amount(&self.values.quantity, &self.values.price);
    }
}

/// Bring a dependent value back in line with a fresh resolution
fn reconcile(current: &mut String, resolution: &Resolution) {
    match &resolution.forced {
        Some(forced) => *current = forced.clone(),
        None if !resolution.contains(current) => current.clear(),
        None => {}
    }
}
