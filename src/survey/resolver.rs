//! Form option resolution
//!
//! Pure functions that turn a policy and the current heading into the legal
//! option sets of the dependent fields. Nothing here holds state, so the same
//! `(policy, heading)` pair always resolves to the same result.

use super::error::SurveyError;
use super::policy::{AuditCategoryRule, FormType, MaterialCodeMode, OptionPolicy, SubheadingRule};

/// Options offered for a dependent field, plus the value forced onto it (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    pub options: Vec<String>,
    pub forced: Option<String>,
}

impl Resolution {
    /// A single option that is also forced
    fn single(value: &str) -> Self {
        Self {
            options: vec![value.to_string()],
            forced: Some(value.to_string()),
        }
    }

    /// A list the user chooses from, nothing forced
    fn choice(options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|s| s.to_string()).collect(),
            forced: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// Look up the policy for a form type identifier
///
/// Unknown identifiers return `None`; callers must stop there rather than
/// fall back to some other family.
pub fn get_policy(form_type: &str) -> Option<&'static OptionPolicy> {
    form_type.parse::<FormType>().ok().map(|t| t.policy())
}

/// Resolve the subheading options for `heading`
pub fn resolve_subheadings(policy: &OptionPolicy, heading: &str) -> Resolution {
    if !policy.has_heading(heading) {
        return Resolution::default();
    }

    match policy.subheading_rule {
        SubheadingRule::Identity => Resolution::single(heading),
        SubheadingRule::FixedMap(mapping) => {
            let subheading = lookup(mapping, heading).unwrap_or(heading);
            Resolution::single(subheading)
        }
        SubheadingRule::DynamicOptions(table) => match lookup(table, heading) {
            Some([only]) => Resolution::single(only),
            Some(candidates) => Resolution::choice(candidates),
            None => Resolution::single(heading),
        },
    }
}

/// Resolve the audit category options for `heading`
pub fn resolve_audit_category(policy: &OptionPolicy, heading: &str) -> Resolution {
    if !policy.has_heading(heading) {
        return Resolution::default();
    }

    match policy.audit_category_rule {
        AuditCategoryRule::Constant(categories) => Resolution {
            options: categories.iter().map(|s| s.to_string()).collect(),
            forced: categories.first().map(|s| s.to_string()),
        },
        AuditCategoryRule::DerivedFromHeading { matches, otherwise } => {
            Resolution::single(lookup(matches, heading).unwrap_or(otherwise))
        }
        AuditCategoryRule::FixedOptions(categories) => Resolution::choice(categories),
    }
}

/// Material code entry mode for a form type identifier
pub fn resolve_material_code_mode(form_type: &str) -> Result<MaterialCodeMode, SurveyError> {
    get_policy(form_type)
        .map(|policy| policy.material_code_mode)
        .ok_or_else(|| SurveyError::InvalidFormType(form_type.to_string()))
}

/// `quantity * price` formatted with two fraction digits
///
/// Unparseable input and overflowing products count as zero so a total can
/// always be shown. Half cents round away from zero.
pub fn compute_total_amount(quantity: &str, price: &str) -> String {
    let total = parse_decimal(quantity) * parse_decimal(price);
    if !total.is_finite() {
        return "0.00".to_string();
    }
    let cents = (total * 100.0).round();
    // Avoid rendering "-0.00"
    let cents = if cents == 0.0 { 0.0 } else { cents };
    format!("{:.2}", cents / 100.0)
}

fn lookup<V: Copy>(table: &[(&str, V)], key: &str) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Parse the longest leading decimal number in `raw`, or 0
///
/// Mirrors how browsers read numeric form input: leading whitespace is
/// skipped and trailing garbage ignored ("12kg" reads as 12).
fn parse_decimal(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_at = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_at(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_at(end + 1);
        let frac_digits = frac_end - end - 1;
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_at(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::policy::{
        CHANGE_RX, INVENTORY_MATRIX, MATRIX_DISPLAY, ORGANIZED_WORKPLACE, PRODUCTIVE_WORKPLACE,
        SAFE_WORKPLACE,
    };

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    mod policy_lookup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_known_ids_resolve() {
            for form_type in FormType::ALL {
                let policy = get_policy(form_type.id()).unwrap();
                assert_eq!(policy.form_type, form_type);
            }
        }

        #[test]
        fn test_unknown_id_is_not_found() {
            assert!(get_policy("not-a-real-type").is_none());
            assert!(get_policy("").is_none());
        }

        #[test]
        fn test_material_code_mode_by_identity() {
            assert_eq!(
                resolve_material_code_mode("safe-workplace"),
                Ok(MaterialCodeMode::FreeText)
            );
            assert_eq!(
                resolve_material_code_mode("organized-workplace"),
                Ok(MaterialCodeMode::FreeText)
            );
            assert_eq!(
                resolve_material_code_mode("inventory-matrix"),
                Ok(MaterialCodeMode::FixedOptions(&["E-327", "E-627", "E-425-P"]))
            );
        }

        #[test]
        fn test_material_code_mode_unknown_type() {
            assert_eq!(
                resolve_material_code_mode("bogus"),
                Err(SurveyError::InvalidFormType("bogus".to_string()))
            );
        }
    }

    mod subheadings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_every_declared_heading_has_options() {
            for form_type in FormType::ALL {
                let policy = form_type.policy();
                for heading in policy.heading_options {
                    let resolution = resolve_subheadings(policy, heading);
                    assert!(
                        !resolution.is_empty(),
                        "{form_type}: {heading} resolved to no subheadings"
                    );
                }
            }
        }

        #[test]
        fn test_identity_families_force_heading() {
            for policy in [&INVENTORY_MATRIX, &CHANGE_RX, &MATRIX_DISPLAY, &SAFE_WORKPLACE] {
                for heading in policy.heading_options {
                    let resolution = resolve_subheadings(policy, heading);
                    assert_eq!(resolution.forced.as_deref(), Some(*heading));
                    assert_eq!(resolution.options, strings(&[*heading]));
                }
            }
        }

        #[test]
        fn test_fixed_map_uses_mapping() {
            let resolution = resolve_subheadings(&PRODUCTIVE_WORKPLACE, "Valve/Pressure Joints");
            assert_eq!(resolution.forced.as_deref(), Some("Energy Tag"));
            assert_eq!(resolution.options, strings(&["Energy Tag"]));

            let resolution = resolve_subheadings(&PRODUCTIVE_WORKPLACE, "Process Flow Diagram");
            assert_eq!(resolution.forced.as_deref(), Some("P&ID"));
        }

        #[test]
        fn test_fixed_map_passes_through_unmapped_headings() {
            let SubheadingRule::FixedMap(mapping) = PRODUCTIVE_WORKPLACE.subheading_rule else {
                panic!("productive workplace should use a fixed map");
            };
            for heading in PRODUCTIVE_WORKPLACE.heading_options {
                let expected = mapping
                    .iter()
                    .find(|(k, _)| k == heading)
                    .map(|(_, v)| *v)
                    .unwrap_or(*heading);
                let resolution = resolve_subheadings(&PRODUCTIVE_WORKPLACE, heading);
                assert_eq!(resolution.forced.as_deref(), Some(expected));
            }
            let resolution = resolve_subheadings(&PRODUCTIVE_WORKPLACE, "KAIZEN");
            assert_eq!(resolution.forced.as_deref(), Some("KAIZEN"));
        }

        #[test]
        fn test_pylons_offer_choice_without_forcing() {
            let resolution = resolve_subheadings(&ORGANIZED_WORKPLACE, "Pylons");
            assert_eq!(
                resolution.options,
                strings(&[
                    "Navigation Gateway Pylon",
                    "Navigation Jumbo Pylon",
                    "Destination Pylon",
                    "Wayfinding Pylon",
                    "Others",
                ])
            );
            assert_eq!(resolution.forced, None);
        }

        #[test]
        fn test_indoor_navigation_candidates() {
            let resolution = resolve_subheadings(&ORGANIZED_WORKPLACE, "Indoor Navigation");
            assert_eq!(
                resolution.options,
                strings(&["Desk ID", "Section ID", "Cabin", "Flow Directory"])
            );
            assert_eq!(resolution.forced, None);
        }

        #[test]
        fn test_dynamic_without_candidates_passes_through() {
            let resolution = resolve_subheadings(&ORGANIZED_WORKPLACE, "Equipment ID");
            assert_eq!(resolution, Resolution::single("Equipment ID"));
        }

        #[test]
        fn test_undeclared_heading_resolves_empty() {
            let resolution = resolve_subheadings(&ORGANIZED_WORKPLACE, "GMP Score Board");
            assert!(resolution.is_empty());
            assert_eq!(resolution.forced, None);
            assert!(resolve_subheadings(&CHANGE_RX, "").is_empty());
        }

        #[test]
        fn test_resolution_is_idempotent() {
            for form_type in FormType::ALL {
                let policy = form_type.policy();
                for heading in policy.heading_options {
                    assert_eq!(
                        resolve_subheadings(policy, heading),
                        resolve_subheadings(policy, heading)
                    );
                    assert_eq!(
                        resolve_audit_category(policy, heading),
                        resolve_audit_category(policy, heading)
                    );
                }
            }
        }
    }

    mod audit_categories {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_matrix_display_derives_from_heading() {
            let resolution = resolve_audit_category(&MATRIX_DISPLAY, "LTIFER Display");
            assert_eq!(resolution.options, strings(&["Safety Audit"]));
            assert_eq!(resolution.forced.as_deref(), Some("Safety Audit"));

            let resolution = resolve_audit_category(&MATRIX_DISPLAY, "GMP Score Board");
            assert_eq!(resolution.options, strings(&["Process Audit"]));
            assert_eq!(resolution.forced.as_deref(), Some("Process Audit"));
        }

        #[test]
        fn test_derived_offers_exactly_one_category() {
            for heading in MATRIX_DISPLAY.heading_options {
                let resolution = resolve_audit_category(&MATRIX_DISPLAY, heading);
                let expected = if *heading == "LTIFER Display" {
                    "Safety Audit"
                } else {
                    "Process Audit"
                };
                assert_eq!(resolution.options, strings(&[expected]));
            }
        }

        #[test]
        fn test_constant_forces_first() {
            let resolution = resolve_audit_category(&INVENTORY_MATRIX, "Rack ID");
            assert_eq!(resolution, Resolution::single("Process Audit"));
        }

        #[test]
        fn test_fixed_options_force_nothing() {
            let resolution = resolve_audit_category(&CHANGE_RX, "LOGO");
            assert_eq!(resolution.options, strings(&["Aesthetic Audit", "Periphery"]));
            assert_eq!(resolution.forced, None);

            let resolution = resolve_audit_category(&SAFE_WORKPLACE, "GHS");
            assert_eq!(resolution.options.len(), 4);
            assert_eq!(resolution.forced, None);
        }

        #[test]
        fn test_undeclared_heading_resolves_empty() {
            assert!(resolve_audit_category(&MATRIX_DISPLAY, "Pylons").is_empty());
        }
    }

    mod totals {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_basic_multiplication() {
            assert_eq!(compute_total_amount("3", "2.5"), "7.50");
            assert_eq!(compute_total_amount("10", "99.99"), "999.90");
        }

        #[test]
        fn test_empty_and_invalid_are_zero() {
            assert_eq!(compute_total_amount("", "5"), "0.00");
            assert_eq!(compute_total_amount("abc", "2"), "0.00");
            assert_eq!(compute_total_amount("4", ""), "0.00");
            assert_eq!(compute_total_amount(".", "-"), "0.00");
        }

        #[test]
        fn test_leading_number_prefix_is_used() {
            assert_eq!(compute_total_amount("12kg", "2"), "24.00");
            assert_eq!(compute_total_amount("  3", "1.5e1"), "45.00");
            assert_eq!(compute_total_amount("2e", "3"), "6.00");
            assert_eq!(compute_total_amount(".5", "4."), "2.00");
        }

        #[test]
        fn test_rounds_to_two_digits() {
            assert_eq!(compute_total_amount("2", "0.126"), "0.25");
            assert_eq!(compute_total_amount("3", "0.3333"), "1.00");
        }

        #[test]
        fn test_half_cents_round_up() {
            assert_eq!(compute_total_amount("0.5", "0.25"), "0.13");
            assert_eq!(compute_total_amount("1.5", "0.75"), "1.13");
            assert_eq!(compute_total_amount("-0.5", "0.25"), "-0.13");
        }

        #[test]
        fn test_negative_zero_is_not_rendered() {
            assert_eq!(compute_total_amount("-0", "5"), "0.00");
            assert_eq!(compute_total_amount("-2", "0"), "0.00");
        }

        #[test]
        fn test_negative_values_multiply() {
            assert_eq!(compute_total_amount("-2", "3"), "-6.00");
        }

        #[test]
        fn test_non_finite_is_zero() {
            assert_eq!(compute_total_amount("1e400", "1"), "0.00");
            assert_eq!(compute_total_amount("inf", "1"), "0.00");
        }

        #[test]
        fn test_overflowing_product_is_zero() {
            assert_eq!(compute_total_amount("1e200", "1e200"), "0.00");
            assert_eq!(compute_total_amount("-1e200", "1e200"), "0.00");
        }
    }
}
