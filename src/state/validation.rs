//! Step validators and rejection diagnostics
//!
//! Each step has one pure predicate over the form state plus the tax-ID
//! format discriminator. When a predicate fails, `diagnose` walks the step's
//! sub-conditions in a fixed priority order to pick the message shown to the
//! applicant.

use super::forms::codec::{self, TaxIdFormat, CNIC_LEN, NTN_LEN};
use super::forms::{all_addresses_filled, filled_address_count, ContactRole, FormState};
use super::wizard::Step;
use thiserror::Error;

/// Why a step (or the final submission) was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("Please fill all required fields (*) correctly before proceeding.")]
    FormatNotSelected,
    #[error("Please complete the NTN field in format: AB12345-6")]
    NtnIncomplete,
    #[error("Please complete the CNIC field in format: 12345-1234567-1")]
    CnicIncomplete,
    #[error("Please enter a valid telephone number (e.g., 923001234567)")]
    InvalidTelephone,
    #[error("Please enter a valid email address (e.g., example@company.com)")]
    InvalidEmail,
    #[error("Please enter a complete website URL (e.g.,www.example.com)")]
    IncompleteWebsite,
    #[error("Please enter at least one GLN address or select \"No\" if GLN is not required.")]
    GlnAddressOrOptOut,
    #[error("Please enter at least one GLN address.")]
    GlnAddressMissing,
    #[error("Please select whether you require GTINs.")]
    GtinsNotChosen,
    #[error("Please enter GTIN8 information.")]
    Gtin8Missing,
    #[error("Please select at least one product category.")]
    NoCategories,
    #[error("Please select the required number of Global Trade Item Numbers (GTINs).")]
    NoFeeSelected,
    #[error("Please enter your full name.")]
    NameMissing,
    #[error("Please upload your signature.")]
    SignatureMissing,
    #[error("Please agree to the terms and conditions.")]
    TermsNotAccepted,
    #[error("Please fill all required fields correctly before proceeding.")]
    Incomplete,
    #[error("Please fill all required fields correctly.")]
    SubmissionIncomplete,
}

type Validator = fn(&FormState, Option<TaxIdFormat>) -> bool;

/// Indexed by `Step::index`
const VALIDATORS: [Validator; 7] = [
    company_info,
    gln_billing,
    ceo_contact,
    key_contact,
    accounts_contact,
    products,
    declaration,
];

/// Whether `step` may be left forward
pub fn validate(step: Step, state: &FormState, format: Option<TaxIdFormat>) -> bool {
    VALIDATORS[step.index()](state, format)
}

fn company_info(state: &FormState, format: Option<TaxIdFormat>) -> bool {
    let tax_id_valid = format.is_some_and(|f| !state.ntn.is_empty() && f.is_complete(&state.ntn));

    !state.form_name.is_empty()
        && !state.company_name.is_empty()
        && !state.street_address.is_empty()
        && !state.city.is_empty()
        && !state.province.is_empty()
        && !state.post_code.is_empty()
        && codec::is_valid_telephone(&state.telephone)
        && codec::is_valid_email(&state.email)
        && !state.no_of_employees.is_empty()
        && tax_id_valid
        && codec::is_valid_website(&state.website)
}

/// `glnRequired || (addresses filled && GTINs chosen && GTIN-8 satisfied)`.
/// GLN opt-in short-circuits the rest; see DESIGN.md before changing.
fn gln_billing(state: &FormState, _format: Option<TaxIdFormat>) -> bool {
    state.gln_required
        || (all_addresses_filled(&state.gln_addresses)
            && !state.gtins_required.is_empty()
            && gtin8_satisfied(state))
}

fn ceo_contact(state: &FormState, _format: Option<TaxIdFormat>) -> bool {
    state.contact(ContactRole::Ceo).is_complete()
}

fn key_contact(state: &FormState, _format: Option<TaxIdFormat>) -> bool {
    state.contact(ContactRole::KeyContact).is_complete()
}

fn accounts_contact(state: &FormState, _format: Option<TaxIdFormat>) -> bool {
    state.contact(ContactRole::AccountsContact).is_complete()
}

/// The fee table may be skipped only on the GTIN-8 path
fn products(state: &FormState, _format: Option<TaxIdFormat>) -> bool {
    let fees_valid = state.gtin8_required() || !state.selected_fees.is_empty();
    !state.selected_categories.is_empty() && gtin8_satisfied(state) && fees_valid
}

fn declaration(state: &FormState, _format: Option<TaxIdFormat>) -> bool {
    !state.user_name.is_empty() && state.uploaded_image.is_some() && state.agree_terms
}

fn gtin8_satisfied(state: &FormState) -> bool {
    !state.gtin8_required() || !state.gtin8.is_empty()
}

/// Most specific reason `step` failed validation
pub fn diagnose(step: Step, state: &FormState, format: Option<TaxIdFormat>) -> StepError {
    let specific = match step {
        Step::CompanyInfo => diagnose_company_info(state, format),
        Step::GlnBilling => diagnose_gln_billing(state),
        Step::Products => diagnose_products(state),
        Step::Declaration => diagnose_declaration(state),
        Step::CeoContact | Step::KeyContact | Step::AccountsContact => None,
    };
    specific.unwrap_or(StepError::Incomplete)
}

/// Reason the final submission was refused
pub fn diagnose_submission(state: &FormState) -> StepError {
    diagnose_declaration(state).unwrap_or(StepError::SubmissionIncomplete)
}

fn diagnose_company_info(state: &FormState, format: Option<TaxIdFormat>) -> Option<StepError> {
    let Some(format) = format else {
        return Some(StepError::FormatNotSelected);
    };
    match format {
        TaxIdFormat::Ntn if state.ntn.len() != NTN_LEN => return Some(StepError::NtnIncomplete),
        TaxIdFormat::Cnic if state.ntn.len() != CNIC_LEN => {
            return Some(StepError::CnicIncomplete)
        }
        _ => {}
    }
    if state.telephone.len() < 7 {
        return Some(StepError::InvalidTelephone);
    }
    if !codec::is_valid_email(&state.email) {
        return Some(StepError::InvalidEmail);
    }
    if !state.website.is_empty() && state.website.len() <= 8 {
        return Some(StepError::IncompleteWebsite);
    }
    if state.gln_required && filled_address_count(&state.gln_addresses) == 0 {
        return Some(StepError::GlnAddressOrOptOut);
    }
    None
}

fn diagnose_gln_billing(state: &FormState) -> Option<StepError> {
    if state.gtins_required.is_empty() {
        return Some(StepError::GtinsNotChosen);
    }
    if state.gtin8_required() && state.gtin8.is_empty() {
        return Some(StepError::Gtin8Missing);
    }
    if state.gln_required && filled_address_count(&state.gln_addresses) == 0 {
        return Some(StepError::GlnAddressMissing);
    }
    None
}

fn diagnose_products(state: &FormState) -> Option<StepError> {
    if state.selected_categories.is_empty() {
        Some(StepError::NoCategories)
    } else if state.gtin8_required() && state.gtin8.is_empty() {
        Some(StepError::Gtin8Missing)
    } else if !state.gtin8_required() && state.selected_fees.is_empty() {
        Some(StepError::NoFeeSelected)
    } else {
        None
    }
}

fn diagnose_declaration(state: &FormState) -> Option<StepError> {
    if state.user_name.is_empty() {
        Some(StepError::NameMissing)
    } else if state.uploaded_image.is_none() {
        Some(StepError::SignatureMissing)
    } else if !state.agree_terms {
        Some(StepError::TermsNotAccepted)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fees::FeeTier;
    use crate::state::forms::{ContactInfo, YesNo, ADDRESS_SENTINEL};

    fn company_info_state() -> FormState {
        FormState {
            company_name: "Acme".to_string(),
            street_address: "1 Main Road".to_string(),
            city: "Karachi".to_string(),
            province: "Sindh".to_string(),
            post_code: "75500".to_string(),
            telephone: "923001234567".to_string(),
            email: "a@b.com".to_string(),
            ntn: "AB12345-6".to_string(),
            no_of_employees: "10".to_string(),
            ..Default::default()
        }
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            designation: "Manager".to_string(),
            first_name: "Sara".to_string(),
            last_name: "Khan".to_string(),
            email: "sara@acme.pk".to_string(),
            telephone: "03001234567".to_string(),
            ..Default::default()
        }
    }

    mod company_info {
        use super::*;

        #[test]
        fn test_complete_ntn_passes() {
            let state = company_info_state();
            assert!(validate(Step::CompanyInfo, &state, Some(TaxIdFormat::Ntn)));
        }

        #[test]
        fn test_complete_cnic_passes() {
            let state = FormState {
                ntn: "12345-1234567-1".to_string(),
                ..company_info_state()
            };
            assert!(validate(Step::CompanyInfo, &state, Some(TaxIdFormat::Cnic)));
            assert!(!validate(Step::CompanyInfo, &state, Some(TaxIdFormat::Ntn)));
        }

        #[test]
        fn test_missing_format_is_reported_first() {
            let state = FormState {
                telephone: String::new(),
                email: String::new(),
                ..company_info_state()
            };
            assert!(!validate(Step::CompanyInfo, &state, None));
            assert_eq!(
                diagnose(Step::CompanyInfo, &state, None),
                StepError::FormatNotSelected
            );
        }

        #[test]
        fn test_short_tax_id_reported_per_format() {
            let state = FormState {
                ntn: "AB123".to_string(),
                ..company_info_state()
            };
            assert_eq!(
                diagnose(Step::CompanyInfo, &state, Some(TaxIdFormat::Ntn)),
                StepError::NtnIncomplete
            );
            assert_eq!(
                diagnose(Step::CompanyInfo, &state, Some(TaxIdFormat::Cnic)),
                StepError::CnicIncomplete
            );
        }

        #[test]
        fn test_priority_telephone_then_email_then_website() {
            let mut state = FormState {
                telephone: "92300".to_string(),
                email: "nope".to_string(),
                website: "www.".to_string(),
                ..company_info_state()
            };
            let format = Some(TaxIdFormat::Ntn);
            assert_eq!(diagnose(Step::CompanyInfo, &state, format), StepError::InvalidTelephone);
            state.telephone = "923001234567".to_string();
            assert_eq!(diagnose(Step::CompanyInfo, &state, format), StepError::InvalidEmail);
            state.email = "info@acme.pk".to_string();
            assert_eq!(diagnose(Step::CompanyInfo, &state, format), StepError::IncompleteWebsite);
            state.website = "www.acme.pk".to_string();
            assert!(validate(Step::CompanyInfo, &state, format));
        }

        #[test]
        fn test_missing_city_falls_back_to_generic() {
            let state = FormState {
                city: String::new(),
                ..company_info_state()
            };
            assert!(!validate(Step::CompanyInfo, &state, Some(TaxIdFormat::Ntn)));
            assert_eq!(
                diagnose(Step::CompanyInfo, &state, Some(TaxIdFormat::Ntn)),
                StepError::Incomplete
            );
        }

        #[test]
        fn test_gln_opt_in_without_addresses_is_named() {
            let state = FormState {
                city: String::new(),
                gln_required: true,
                gln_addresses: vec![String::new()],
                ..company_info_state()
            };
            assert_eq!(
                diagnose(Step::CompanyInfo, &state, Some(TaxIdFormat::Ntn)),
                StepError::GlnAddressOrOptOut
            );
        }
    }

    mod gln_billing {
        use super::*;

        #[test]
        fn test_defaults_pass() {
            assert!(validate(Step::GlnBilling, &FormState::default(), None));
        }

        #[test]
        fn test_gln_opt_in_short_circuits_everything() {
            let state = FormState {
                gln_required: true,
                gln_addresses: vec![String::new()],
                gtins_required: String::new(),
                gtin8s_required: YesNo::Yes,
                ..Default::default()
            };
            assert!(validate(Step::GlnBilling, &state, None));
        }

        #[test]
        fn test_blank_address_fails_without_opt_in() {
            let state = FormState {
                gln_addresses: vec![String::new()],
                ..Default::default()
            };
            assert!(!validate(Step::GlnBilling, &state, None));
            assert_eq!(diagnose(Step::GlnBilling, &state, None), StepError::Incomplete);
        }

        #[test]
        fn test_sentinel_counts_as_filled() {
            let state = FormState {
                gln_addresses: vec![ADDRESS_SENTINEL.to_string()],
                ..Default::default()
            };
            assert!(validate(Step::GlnBilling, &state, None));
        }

        #[test]
        fn test_gtin8_requires_count() {
            let state = FormState {
                gtin8s_required: YesNo::Yes,
                ..Default::default()
            };
            assert!(!validate(Step::GlnBilling, &state, None));
            assert_eq!(diagnose(Step::GlnBilling, &state, None), StepError::Gtin8Missing);
        }

        #[test]
        fn test_gtins_message_outranks_gln_message() {
            let state = FormState {
                gln_required: true,
                gtins_required: String::new(),
                ..Default::default()
            };
            assert_eq!(diagnose(Step::GlnBilling, &state, None), StepError::GtinsNotChosen);
            let state = FormState {
                gln_required: true,
                gln_addresses: vec![" ".to_string()],
                ..Default::default()
            };
            assert_eq!(diagnose(Step::GlnBilling, &state, None), StepError::GlnAddressMissing);
        }
    }

    mod contacts {
        use super::*;

        #[test]
        fn test_each_contact_validated_independently() {
            let state = FormState {
                ceo: ContactInfo {
                    designation: "CEO".to_string(),
                    ..contact()
                },
                ..Default::default()
            };
            assert!(validate(Step::CeoContact, &state, None));
            assert!(!validate(Step::KeyContact, &state, None));
            assert!(!validate(Step::AccountsContact, &state, None));
            assert_eq!(diagnose(Step::KeyContact, &state, None), StepError::Incomplete);
        }

        #[test]
        fn test_default_designation_blank_for_key_contact() {
            let state = FormState {
                key_contact: ContactInfo {
                    designation: String::new(),
                    ..contact()
                },
                ..Default::default()
            };
            assert!(!validate(Step::KeyContact, &state, None));
        }
    }

    mod products {
        use super::*;

        #[test]
        fn test_categories_reported_before_fees() {
            let state = FormState::default();
            assert!(!validate(Step::Products, &state, None));
            assert_eq!(diagnose(Step::Products, &state, None), StepError::NoCategories);
        }

        #[test]
        fn test_fees_required_off_the_gtin8_path() {
            let state = FormState {
                selected_categories: vec!["Tea".to_string()],
                ..Default::default()
            };
            assert_eq!(diagnose(Step::Products, &state, None), StepError::NoFeeSelected);
            let state = FormState {
                selected_fees: vec![FeeTier::Gtins100],
                ..state
            };
            assert!(validate(Step::Products, &state, None));
        }

        #[test]
        fn test_gtin8_path_skips_fees() {
            let state = FormState {
                selected_categories: vec!["Tea".to_string()],
                gtin8s_required: YesNo::Yes,
                ..Default::default()
            };
            assert_eq!(diagnose(Step::Products, &state, None), StepError::Gtin8Missing);
            let state = FormState {
                gtin8: "10".to_string(),
                ..state
            };
            assert!(validate(Step::Products, &state, None));
        }
    }

    mod declaration {
        use super::*;

        #[test]
        fn test_priority_name_signature_terms() {
            let mut state = FormState::default();
            assert_eq!(diagnose(Step::Declaration, &state, None), StepError::NameMissing);
            state.user_name = "Ali Raza".to_string();
            assert_eq!(diagnose(Step::Declaration, &state, None), StepError::SignatureMissing);
            state.uploaded_image = Some("data:image/png;base64,AA==".to_string());
            assert_eq!(diagnose(Step::Declaration, &state, None), StepError::TermsNotAccepted);
            state.agree_terms = true;
            assert!(validate(Step::Declaration, &state, None));
        }

        #[test]
        fn test_submission_fallback_message() {
            let state = FormState {
                user_name: "Ali".to_string(),
                uploaded_image: Some("data:image/png;base64,AA==".to_string()),
                agree_terms: true,
                ..Default::default()
            };
            assert_eq!(diagnose_submission(&state), StepError::SubmissionIncomplete);
            assert_eq!(
                StepError::SubmissionIncomplete.to_string(),
                "Please fill all required fields correctly."
            );
        }
    }
}
