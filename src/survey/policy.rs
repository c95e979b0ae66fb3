//! Option policies for the Factory UX form families
//!
//! Each family is described by one static [`OptionPolicy`]. The three rule
//! axes (subheading, audit category, material code) are closed enums, so a
//! family that forgets an axis fails to compile instead of resolving to
//! nothing at runtime.

use super::error::SurveyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Factory UX form family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    InventoryMatrix,
    ChangeRx,
    OrganizedWorkplace,
    MatrixDisplay,
    ProductiveWorkplace,
    SafeWorkplace,
}

impl FormType {
    /// All families in menu order
    pub const ALL: [FormType; 6] = [
        FormType::InventoryMatrix,
        FormType::ChangeRx,
        FormType::OrganizedWorkplace,
        FormType::MatrixDisplay,
        FormType::ProductiveWorkplace,
        FormType::SafeWorkplace,
    ];

    /// Kebab-case identifier used in commands and stored records
    pub fn id(&self) -> &'static str {
        match self {
            Self::InventoryMatrix => "inventory-matrix",
            Self::ChangeRx => "change-rx",
            Self::OrganizedWorkplace => "organized-workplace",
            Self::MatrixDisplay => "matrix-display",
            Self::ProductiveWorkplace => "productive-workplace",
            Self::SafeWorkplace => "safe-workplace",
        }
    }

    /// Human readable name, e.g. "Change Rx"
    pub fn label(&self) -> String {
        format_form_type(self.id())
    }

    /// The static policy for this family
    pub fn policy(&self) -> &'static OptionPolicy {
        match self {
            Self::InventoryMatrix => &INVENTORY_MATRIX,
            Self::ChangeRx => &CHANGE_RX,
            Self::OrganizedWorkplace => &ORGANIZED_WORKPLACE,
            Self::MatrixDisplay => &MATRIX_DISPLAY,
            Self::ProductiveWorkplace => &PRODUCTIVE_WORKPLACE,
            Self::SafeWorkplace => &SAFE_WORKPLACE,
        }
    }
}

impl FromStr for FormType {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| SurveyError::InvalidFormType(s.to_string()))
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Convert a kebab-case identifier to a display name
pub fn format_form_type(form_type: &str) -> String {
    form_type
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a heading determines its subheading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubheadingRule {
    /// Subheading equals heading
    Identity,
    /// Heading maps to exactly one subheading; unmapped headings pass through
    FixedMap(&'static [(&'static str, &'static str)]),
    /// Heading maps to a candidate list; unlisted headings offer only themselves
    DynamicOptions(&'static [(&'static str, &'static [&'static str])]),
}

/// How a heading determines its audit category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCategoryRule {
    /// Fixed short list, first entry is forced
    Constant(&'static [&'static str]),
    /// A single category derived from the heading
    DerivedFromHeading {
        matches: &'static [(&'static str, &'static str)],
        otherwise: &'static str,
    },
    /// Selectable list with no default
    FixedOptions(&'static [&'static str]),
}

/// How the material code is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialCodeMode {
    FixedOptions(&'static [&'static str]),
    FreeText,
}

impl MaterialCodeMode {
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::FreeText)
    }

    /// Selectable codes (empty in free text mode)
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::FixedOptions(codes) => codes,
            Self::FreeText => &[],
        }
    }
}

/// Immutable option policy for one form family
#[derive(Debug, PartialEq, Eq)]
pub struct OptionPolicy {
    pub form_type: FormType,
    pub heading_options: &'static [&'static str],
    pub subheading_rule: SubheadingRule,
    pub audit_category_rule: AuditCategoryRule,
    pub material_code_mode: MaterialCodeMode,
}

impl OptionPolicy {
    /// Whether `heading` is one of this family's declared headings
    pub fn has_heading(&self, heading: &str) -> bool {
        self.heading_options.contains(&heading)
    }
}

const PROCESS_AUDIT: &str = "Process Audit";
const SAFETY_AUDIT: &str = "Safety Audit";
const PERIPHERY: &str = "Periphery";

pub static INVENTORY_MATRIX: OptionPolicy = OptionPolicy {
    form_type: FormType::InventoryMatrix,
    heading_options: &[
        "Rack ID",
        "Warehouse Layout",
        "Warehouse Load Capacity",
        "Experience Center",
        "QR Load of Material Tracking",
    ],
    subheading_rule: SubheadingRule::Identity,
    audit_category_rule: AuditCategoryRule::Constant(&[PROCESS_AUDIT]),
    material_code_mode: MaterialCodeMode::FixedOptions(&["E-327", "E-627", "E-425-P"]),
};

pub static CHANGE_RX: OptionPolicy = OptionPolicy {
    form_type: FormType::ChangeRx,
    heading_options: &[
        "LOGO",
        "Milestones",
        "Safety Park",
        "Experience",
        "DOJO Board",
        "Wall Graphics",
        "Glass Graphics",
        "Decorative Sign",
        "Policy",
        "Large Customized",
        "Employee Engagement Signs",
        "Employee of the Month",
        "Leadership Communication",
        "New Initiatives",
        "Motivational Signs",
        "Employee Engagement",
    ],
    subheading_rule: SubheadingRule::Identity,
    audit_category_rule: AuditCategoryRule::FixedOptions(&["Aesthetic Audit", PERIPHERY]),
    material_code_mode: MaterialCodeMode::FixedOptions(&[
        "E-318", "E-323", "E-314", "E-215", "E-421", "E-423-A4", "E-423-A3", "E-622-B",
    ]),
};

pub static MATRIX_DISPLAY: OptionPolicy = OptionPolicy {
    form_type: FormType::MatrixDisplay,
    heading_options: &[
        "GMP Score Board",
        "LTIFER Display",
        "DWN",
        "KPIs",
        "Q Cube",
        "PDSCQM",
        "HR Corner",
        "R&R",
    ],
    subheading_rule: SubheadingRule::Identity,
    audit_category_rule: AuditCategoryRule::DerivedFromHeading {
        matches: &[("LTIFER Display", SAFETY_AUDIT)],
        otherwise: PROCESS_AUDIT,
    },
    material_code_mode: MaterialCodeMode::FixedOptions(&[
        "E-314", "E-622-B", "E-421", "E-421-M", "E-318", "E-412-P", "E-323",
    ]),
};

pub static PRODUCTIVE_WORKPLACE: OptionPolicy = OptionPolicy {
    form_type: FormType::ProductiveWorkplace,
    heading_options: &[
        "Pipe Marking",
        "Valve/Pressure Joints",
        "Visual SOP",
        "SOP",
        "Know Your Equipment",
        "Process Flow Diagram",
        "5S Floor Marking",
        "Process Checklist/Attention Point",
        "Waste Management Instruction",
        "Line Diagram",
        "OPL",
        "TPM",
        "AM",
        "I Maintain This Area",
        "KANBAN",
        "KAIZEN",
        "CLIT Display",
        "Lubrication Guide",
    ],
    subheading_rule: SubheadingRule::FixedMap(&[
        ("Pipe Marking", "Pipe Marking"),
        ("Valve/Pressure Joints", "Energy Tag"),
        ("Visual SOP", "Visual SOP"),
        ("Know Your Equipment", "Know Your Equipment"),
        ("Process Flow Diagram", "P&ID"),
    ]),
    audit_category_rule: AuditCategoryRule::Constant(&[PROCESS_AUDIT]),
    material_code_mode: MaterialCodeMode::FixedOptions(&["E-314", "E-622-P", "E-421-P", "E-421"]),
};

pub static SAFE_WORKPLACE: OptionPolicy = OptionPolicy {
    form_type: FormType::SafeWorkplace,
    heading_options: &[
        "Pollution Control Display",
        "DO's & Don'ts",
        "Large Customized Safety Signage",
        "Points of Hazards",
        "Emergency Evacuation Plans",
        "Emergency Response Team",
        "SIS",
        "GHS",
        "GHS Label",
        "NFPA",
        "Visual SDS",
        "Q Sign",
        "Single Line Diagram",
        "Safety Static Display",
        "Life Saving Rule",
        "IRC",
        "PPE Matrix",
    ],
    subheading_rule: SubheadingRule::Identity,
    audit_category_rule: AuditCategoryRule::FixedOptions(&[
        PERIPHERY,
        PROCESS_AUDIT,
        SAFETY_AUDIT,
        "Emergency Evacuation Audit",
    ]),
    material_code_mode: MaterialCodeMode::FreeText,
};

pub static ORGANIZED_WORKPLACE: OptionPolicy = OptionPolicy {
    form_type: FormType::OrganizedWorkplace,
    heading_options: &[
        "Pylons",
        "Plant Layouts",
        "Indoor Navigation",
        "Equipment ID",
        "Large Navigation Signs",
    ],
    subheading_rule: SubheadingRule::DynamicOptions(&[
        (
            "Pylons",
            &[
                "Navigation Gateway Pylon",
                "Navigation Jumbo Pylon",
                "Destination Pylon",
                "Wayfinding Pylon",
                "Others",
            ],
        ),
        (
            "Plant Layouts",
            &[
                "General Plant Layout",
                "Traffic Layout",
                "GMP Layout",
                "Housekeeping Layout",
                "Fire Layout",
            ],
        ),
        (
            "Indoor Navigation",
            &["Desk ID", "Section ID", "Cabin", "Flow Directory"],
        ),
    ]),
    audit_category_rule: AuditCategoryRule::FixedOptions(&[PERIPHERY, PROCESS_AUDIT]),
    material_code_mode: MaterialCodeMode::FreeText,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for form_type in FormType::ALL {
            assert_eq!(form_type.id().parse::<FormType>(), Ok(form_type));
        }
    }

    #[test]
    fn test_unknown_id_is_invalid_form_type() {
        let err = "not-a-real-type".parse::<FormType>().unwrap_err();
        assert_eq!(
            err,
            SurveyError::InvalidFormType("not-a-real-type".to_string())
        );
    }

    #[test]
    fn test_id_parsing_is_case_sensitive() {
        assert!("Change-Rx".parse::<FormType>().is_err());
    }

    #[test]
    fn test_policy_form_type_matches_key() {
        for form_type in FormType::ALL {
            assert_eq!(form_type.policy().form_type, form_type);
        }
    }

    #[test]
    fn test_format_form_type() {
        assert_eq!(format_form_type("change-rx"), "Change Rx");
        assert_eq!(format_form_type("organized-workplace"), "Organized Workplace");
        assert_eq!(format_form_type("single"), "Single");
        assert_eq!(format_form_type(""), "");
    }

    #[test]
    fn test_label_uses_display_format() {
        assert_eq!(FormType::MatrixDisplay.label(), "Matrix Display");
    }

    #[test]
    fn test_serde_uses_kebab_ids() {
        let json = serde_json::to_string(&FormType::ProductiveWorkplace).unwrap();
        assert_eq!(json, "\"productive-workplace\"");
        let parsed: FormType = serde_json::from_str("\"safe-workplace\"").unwrap();
        assert_eq!(parsed, FormType::SafeWorkplace);
    }

    #[test]
    fn test_free_text_families() {
        let free_text: Vec<_> = FormType::ALL
            .into_iter()
            .filter(|t| t.policy().material_code_mode.is_free_text())
            .collect();
        assert_eq!(
            free_text,
            vec![FormType::OrganizedWorkplace, FormType::SafeWorkplace]
        );
    }

    #[test]
    fn test_free_text_mode_has_no_options() {
        assert!(MaterialCodeMode::FreeText.options().is_empty());
    }

    #[test]
    fn test_heading_options_have_no_duplicates() {
        for form_type in FormType::ALL {
            let headings = form_type.policy().heading_options;
            for (i, heading) in headings.iter().enumerate() {
                assert!(
                    !headings[i + 1..].contains(heading),
                    "{heading} duplicated in {form_type}"
                );
            }
        }
    }

    #[test]
    fn test_has_heading() {
        assert!(MATRIX_DISPLAY.has_heading("R&R"));
        assert!(!MATRIX_DISPLAY.has_heading("Pylons"));
    }
}
