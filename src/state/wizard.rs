//! Step sequencer and submission gate
//!
//! `Wizard` owns the session's `FormStore` together with the transient
//! controller state (current step, tax-ID format, error flag, pending
//! notification, fee highlight). Every mutation the UI performs goes through
//! here so that codecs and policies are applied in one place.

use super::fees::{FeeError, FeeTier, FeeTransition};
use super::forms::codec::{self, TaxIdFormat};
use super::forms::{
    normalize, visible_fields, BillingChoice, ContactField, ContactRole, FieldId, FormPatch,
    FormState, FormStore, Title, YesNo, CATEGORIES, CEO_DESIGNATIONS, PROVINCES,
};
use super::notification::Notification;
use super::validation::{self, StepError};
use uuid::Uuid;

/// Message shown once an application has been handed off
pub const SUBMITTED_MESSAGE: &str = "Further details are in the email.";

/// The seven wizard screens in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    CompanyInfo,
    GlnBilling,
    CeoContact,
    KeyContact,
    AccountsContact,
    Products,
    Declaration,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::CompanyInfo,
        Step::GlnBilling,
        Step::CeoContact,
        Step::KeyContact,
        Step::AccountsContact,
        Step::Products,
        Step::Declaration,
    ];

    /// Zero-based position
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// One-based number shown in the progress bar
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyInfo => "Company Info",
            Self::GlnBilling => "GLN & Billing",
            Self::CeoContact => "CEO Contact",
            Self::KeyContact => "Key Contact",
            Self::AccountsContact => "Accounts",
            Self::Products => "Products",
            Self::Declaration => "Declaration",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::CompanyInfo => "Company Information",
            Self::GlnBilling => "GLN & Billing Information",
            Self::CeoContact => "CEO / Managing Director Details",
            Self::KeyContact => "Key Contact Details",
            Self::AccountsContact => "Accounts Contact Details",
            Self::Products => "Product Categories & Fees",
            Self::Declaration => "Declaration",
        }
    }

    /// Following step, saturating at the last
    pub fn next(&self) -> Self {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Self::Declaration)
    }

    /// Preceding step, saturating at the first
    pub fn prev(&self) -> Self {
        self.index()
            .checked_sub(1)
            .map_or(Self::CompanyInfo, |index| Self::ALL[index])
    }

    pub fn is_last(&self) -> bool {
        *self == Self::Declaration
    }

    /// Contact record edited on this step, if any
    pub fn contact_role(&self) -> Option<ContactRole> {
        match self {
            Self::CeoContact => Some(ContactRole::Ceo),
            Self::KeyContact => Some(ContactRole::KeyContact),
            Self::AccountsContact => Some(ContactRole::AccountsContact),
            _ => None,
        }
    }
}

/// An accepted application ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub payload: FormState,
}

/// Wizard controller for one applicant session
#[derive(Debug, Default)]
pub struct Wizard {
    store: FormStore,
    step: Step,
    tax_format: Option<TaxIdFormat>,
    show_errors: bool,
    notification: Option<Notification>,
    fee_transition: Option<FeeTransition>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        self.store.get()
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn tax_format(&self) -> Option<TaxIdFormat> {
        self.tax_format
    }

    /// Set after a rejected advance; gates inline hints
    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn fee_transition(&self) -> Option<&FeeTransition> {
        self.fee_transition.as_ref()
    }

    pub fn visible_fields(&self) -> Vec<FieldId> {
        visible_fields(self.step, self.form(), self.tax_format)
    }

    /// Validate the current step and move forward
    ///
    /// On the last step a passing validation leaves the wizard where it is.
    pub fn advance(&mut self) -> Result<Step, StepError> {
        if !validation::validate(self.step, self.form(), self.tax_format) {
            let error = validation::diagnose(self.step, self.form(), self.tax_format);
            tracing::info!(step = self.step.number(), reason = %error, "Step rejected");
            self.show_errors = true;
            self.notification = Some(Notification::error(error.to_string()));
            return Err(error);
        }
        let from = self.step;
        self.step = self.step.next();
        self.show_errors = false;
        tracing::info!(from = from.number(), to = self.step.number(), "Step advanced");
        Ok(self.step)
    }

    /// Move back one step without validating
    pub fn retreat(&mut self) -> Step {
        self.step = self.step.prev();
        tracing::debug!(to = self.step.number(), "Step retreated");
        self.step
    }

    /// Check the declaration and hand back the payload for delivery
    ///
    /// Only the declaration step is re-validated. On success the success
    /// notification is raised immediately and the wizard starts over.
    pub fn submit(&mut self) -> Result<Submission, StepError> {
        if !validation::validate(Step::Declaration, self.form(), self.tax_format) {
            let error = validation::diagnose_submission(self.form());
            tracing::info!(reason = %error, "Submission rejected");
            self.show_errors = true;
            self.notification = Some(Notification::error(error.to_string()));
            return Err(error);
        }
        let submission = Submission {
            id: Uuid::new_v4(),
            payload: self.store.snapshot(),
        };
        tracing::info!(
            id = %submission.id,
            company = %submission.payload.company_name,
            "Application submitted"
        );
        self.notification = Some(Notification::success(SUBMITTED_MESSAGE));
        self.store.reset();
        self.step = Step::CompanyInfo;
        self.show_errors = false;
        self.fee_transition = None;
        Ok(submission)
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Drop the fee highlight once it has run its course
    pub fn tick(&mut self) {
        if self.fee_transition.as_ref().is_some_and(FeeTransition::is_expired) {
            self.fee_transition = None;
        }
    }

    /// Text an input currently shows
    pub fn display_text(&self, field: FieldId) -> Option<String> {
        match field {
            FieldId::Telephone => {
                Some(codec::telephone_display(&self.form().telephone).to_string())
            }
            _ => self.form().text_of(field).map(str::to_string),
        }
    }

    /// Replace a text field's value, applying its codec
    pub fn edit_text(&mut self, field: FieldId, raw: &str) -> bool {
        self.store.edit_text(field, raw, self.tax_format)
    }

    pub fn push_char(&mut self, field: FieldId, c: char) -> bool {
        let Some(current) = self.display_text(field) else {
            return false;
        };
        let format = self.tax_format;
        let value = codec::push_char(&current, c, |raw| normalize(field, &current, raw, format));
        self.edit_text(field, &value)
    }

    pub fn pop_char(&mut self, field: FieldId) -> bool {
        let Some(current) = self.display_text(field) else {
            return false;
        };
        let format = self.tax_format;
        let value = codec::pop_char(&current, |raw| normalize(field, &current, raw, format));
        self.edit_text(field, &value)
    }

    /// Choosing a format discards any identifier typed under the old one
    pub fn select_tax_format(&mut self, format: TaxIdFormat) {
        self.tax_format = Some(format);
        self.store.clear_tax_id();
    }

    /// Current option of a selector, for display
    pub fn choice_value(&self, field: FieldId) -> Option<String> {
        let form = self.form();
        let value = match field {
            FieldId::Province => form.province.clone(),
            FieldId::TaxFormat => self.tax_format.map(|f| f.label()).unwrap_or("").to_string(),
            FieldId::HasWebsite => yes_no_label(!form.website.is_empty()).to_string(),
            FieldId::GlnRequired => yes_no_label(form.gln_required).to_string(),
            FieldId::BillingRequired => {
                yes_no_label(form.billing_required == BillingChoice::Yes).to_string()
            }
            FieldId::Gtin8Required => yes_no_label(form.gtin8_required()).to_string(),
            FieldId::Contact(role, ContactField::Title) => {
                form.contact(role).title.label().to_string()
            }
            FieldId::Contact(ContactRole::Ceo, ContactField::Designation) => {
                form.ceo.designation.clone()
            }
            _ => return None,
        };
        Some(value)
    }

    /// Step a selector to its next (or previous) option
    pub fn cycle_choice(&mut self, field: FieldId, forward: bool) -> bool {
        match field {
            FieldId::Province => {
                let province =
                    cycle(&PROVINCES, &self.form().province.as_str(), forward).to_string();
                self.store.set(FormPatch {
                    province: Some(province),
                    ..Default::default()
                });
            }
            FieldId::TaxFormat => {
                let formats = [TaxIdFormat::Ntn, TaxIdFormat::Cnic];
                let current = self.tax_format.unwrap_or(TaxIdFormat::Cnic);
                let format = match self.tax_format {
                    Some(_) => cycle(&formats, &current, forward),
                    None => TaxIdFormat::Ntn,
                };
                self.select_tax_format(format);
            }
            FieldId::HasWebsite => {
                let has_website = self.form().website.is_empty();
                self.store.set_has_website(has_website);
            }
            FieldId::GlnRequired => {
                let required = !self.form().gln_required;
                self.store.set_gln_required(required);
            }
            FieldId::BillingRequired => {
                let choice = match self.form().billing_required {
                    BillingChoice::Yes => BillingChoice::No,
                    BillingChoice::No => BillingChoice::Yes,
                };
                self.store.set_billing_required(choice);
            }
            FieldId::Gtin8Required => {
                let choice = if self.form().gtin8_required() {
                    YesNo::No
                } else {
                    YesNo::Yes
                };
                self.store.set(FormPatch {
                    gtin8s_required: Some(choice),
                    ..Default::default()
                });
            }
            FieldId::Contact(role, ContactField::Title) => {
                let title = cycle(&Title::ALL, &self.form().contact(role).title, forward);
                return self.store.set_sub_field(role, ContactField::Title, title.label());
            }
            FieldId::Contact(ContactRole::Ceo, ContactField::Designation) => {
                let current = self.form().ceo.designation.as_str();
                let designation = cycle(&CEO_DESIGNATIONS, &current, forward).to_string();
                return self
                    .store
                    .set_sub_field(ContactRole::Ceo, ContactField::Designation, &designation);
            }
            FieldId::AgreeTerms => {
                let agreed = !self.form().agree_terms;
                self.store.set(FormPatch {
                    agree_terms: Some(agreed),
                    ..Default::default()
                });
            }
            _ => return false,
        }
        true
    }

    /// Flip the category at `index` in the catalogue
    pub fn toggle_category(&mut self, index: usize) -> bool {
        CATEGORIES
            .get(index)
            .is_some_and(|category| self.store.toggle_category(category))
    }

    /// Apply the fee policy and start the row highlight
    pub fn toggle_fee(&mut self, tier: FeeTier) -> Result<(), FeeError> {
        self.store.toggle_fee(tier)?;
        self.fee_transition = Some(FeeTransition::new(tier));
        Ok(())
    }

    pub fn add_gln_address(&mut self) -> bool {
        self.store.add_gln_address()
    }

    pub fn remove_gln_address(&mut self, index: usize) -> bool {
        self.store.remove_gln_address(index)
    }

    pub fn set_signature(&mut self, data_url: String) {
        self.store.set_signature(data_url);
    }

    /// Place the wizard on `step` without validating the ones before it
    #[cfg(test)]
    pub(crate) fn jump_to(&mut self, step: Step) {
        self.step = step;
    }
}

fn yes_no_label(yes: bool) -> &'static str {
    if yes {
        "Yes"
    } else {
        "No"
    }
}

/// Neighbour of `current` in `options`, wrapping; unknown values start at the first option
fn cycle<T: PartialEq + Copy>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let next = match options.iter().position(|o| o == current) {
        Some(position) if forward => (position + 1) % len,
        Some(position) => (position + len - 1) % len,
        None => 0,
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::notification::NotificationKind;

    /// Fill step 1 the way an applicant would, key by key
    fn fill_company_info(wizard: &mut Wizard) {
        let typed = [
            (FieldId::CompanyName, "acme"),
            (FieldId::StreetAddress, "1 Main Road"),
            (FieldId::City, "karachi"),
            (FieldId::PostCode, "75500"),
            (FieldId::Telephone, "3001234567"),
            (FieldId::Email, "a@b.com"),
            (FieldId::NoOfEmployees, "10"),
        ];
        for (field, text) in typed {
            for c in text.chars() {
                wizard.push_char(field, c);
            }
        }
        wizard.cycle_choice(FieldId::Province, true);
        wizard.cycle_choice(FieldId::TaxFormat, true);
        for c in "ab123456".chars() {
            wizard.push_char(FieldId::TaxId, c);
        }
    }

    fn fill_contact(wizard: &mut Wizard, role: ContactRole) {
        let store = wizard.store_mut();
        store.set_sub_field(role, ContactField::Designation, "Director");
        store.set_sub_field(role, ContactField::FirstName, "Sara");
        store.set_sub_field(role, ContactField::LastName, "Khan");
        store.set_sub_field(role, ContactField::Email, "sara@acme.pk");
        store.set_sub_field(role, ContactField::Telephone, "03001234567");
    }

    fn fill_declaration(wizard: &mut Wizard) {
        wizard.edit_text(FieldId::UserName, "Sara Khan");
        wizard.set_signature("data:image/png;base64,iVBORw0KGgo=".to_string());
    }

    mod steps {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_step_order_saturates() {
            assert_eq!(Step::CompanyInfo.prev(), Step::CompanyInfo);
            assert_eq!(Step::Declaration.next(), Step::Declaration);
            assert_eq!(Step::Products.next(), Step::Declaration);
            assert_eq!(Step::GlnBilling.prev(), Step::CompanyInfo);
            let numbers: Vec<usize> = Step::ALL.iter().map(Step::number).collect();
            assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        }

        #[test]
        fn test_retreat_never_validates() {
            let mut wizard = Wizard::new();
            wizard.step = Step::Products;
            assert_eq!(wizard.retreat(), Step::AccountsContact);
            assert!(wizard.notification().is_none());
            wizard.step = Step::CompanyInfo;
            assert_eq!(wizard.retreat(), Step::CompanyInfo);
        }

        #[test]
        fn test_valid_last_step_stays_put() {
            let mut wizard = Wizard::new();
            wizard.step = Step::Declaration;
            fill_declaration(&mut wizard);
            wizard.cycle_choice(FieldId::AgreeTerms, true);
            assert_eq!(wizard.advance(), Ok(Step::Declaration));
            assert!(wizard.notification().is_none());
        }
    }

    mod scenarios {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_company_info_advances() {
            let mut wizard = Wizard::new();
            fill_company_info(&mut wizard);
            assert_eq!(wizard.form().company_name, "Acme");
            assert_eq!(wizard.form().telephone, "923001234567");
            assert_eq!(wizard.form().ntn, "AB12345-6");
            assert_eq!(wizard.form().province, "Sindh");
            assert_eq!(wizard.advance(), Ok(Step::GlnBilling));
            assert!(!wizard.show_errors());
        }

        #[test]
        fn test_missing_format_blocks_advance() {
            let mut wizard = Wizard::new();
            fill_company_info(&mut wizard);
            wizard.tax_format = None;
            let error = wizard.advance().unwrap_err();
            assert_eq!(
                error.to_string(),
                "Please fill all required fields (*) correctly before proceeding."
            );
            assert_eq!(wizard.step(), Step::CompanyInfo);
            assert!(wizard.show_errors());
            let notification = wizard.notification().unwrap();
            assert_eq!(notification.kind, NotificationKind::Error);
            assert_eq!(notification.message, error.to_string());
        }

        #[test]
        fn test_categories_checked_before_fees() {
            let mut wizard = Wizard::new();
            wizard.step = Step::Products;
            assert_eq!(wizard.advance(), Err(StepError::NoCategories));
            assert_eq!(
                wizard.notification().unwrap().message,
                "Please select at least one product category."
            );
        }

        #[test]
        fn test_unaccepted_terms_block_submit_without_reset() {
            let mut wizard = Wizard::new();
            wizard.step = Step::Declaration;
            fill_declaration(&mut wizard);
            let before = wizard.form().clone();
            assert_eq!(wizard.submit(), Err(StepError::TermsNotAccepted));
            assert_eq!(wizard.form(), &before);
            assert_eq!(wizard.step(), Step::Declaration);
        }

        #[test]
        fn test_full_traversal_submits_and_resets() {
            let mut wizard = Wizard::new();
            fill_company_info(&mut wizard);
            assert_eq!(wizard.advance(), Ok(Step::GlnBilling));

            wizard.cycle_choice(FieldId::GlnRequired, true);
            wizard.edit_text(FieldId::GlnAddress(0), "Plot 1, Korangi");
            assert_eq!(wizard.advance(), Ok(Step::CeoContact));

            for role in [ContactRole::Ceo, ContactRole::KeyContact, ContactRole::AccountsContact] {
                fill_contact(&mut wizard, role);
                assert!(wizard.advance().is_ok());
            }
            assert_eq!(wizard.step(), Step::Products);

            assert!(wizard.toggle_category(24));
            wizard.toggle_fee(FeeTier::Gtins100).unwrap();
            assert_eq!(wizard.advance(), Ok(Step::Declaration));

            fill_declaration(&mut wizard);
            wizard.cycle_choice(FieldId::AgreeTerms, true);
            let submission = wizard.submit().unwrap();

            assert_eq!(submission.payload.selected_categories, vec!["Tea".to_string()]);
            assert_eq!(submission.payload.selected_fees, vec![FeeTier::Gtins100]);
            assert_eq!(submission.payload.gln_addresses, vec!["Plot 1, Korangi".to_string()]);
            let notification = wizard.notification().unwrap();
            assert_eq!(notification.kind, NotificationKind::Success);
            assert_eq!(notification.message, SUBMITTED_MESSAGE);
            assert_eq!(wizard.form(), &FormState::default());
            assert_eq!(wizard.step(), Step::CompanyInfo);
            assert_eq!(wizard.tax_format(), Some(TaxIdFormat::Ntn));
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_telephone_starts_from_prefix() {
            let mut wizard = Wizard::new();
            assert_eq!(wizard.display_text(FieldId::Telephone).as_deref(), Some("92"));
            wizard.push_char(FieldId::Telephone, '3');
            assert_eq!(wizard.form().telephone, "923");
            wizard.pop_char(FieldId::Telephone);
            wizard.pop_char(FieldId::Telephone);
            assert_eq!(wizard.form().telephone, "92");
        }

        #[test]
        fn test_backspace_removes_auto_separator_with_digit() {
            let mut wizard = Wizard::new();
            wizard.select_tax_format(TaxIdFormat::Cnic);
            for c in "123456".chars() {
                wizard.push_char(FieldId::TaxId, c);
            }
            assert_eq!(wizard.form().ntn, "12345-6");
            wizard.pop_char(FieldId::TaxId);
            assert_eq!(wizard.form().ntn, "12345");
        }

        #[test]
        fn test_switching_format_clears_identifier() {
            let mut wizard = Wizard::new();
            wizard.select_tax_format(TaxIdFormat::Ntn);
            wizard.edit_text(FieldId::TaxId, "AB12345-6");
            wizard.cycle_choice(FieldId::TaxFormat, true);
            assert_eq!(wizard.tax_format(), Some(TaxIdFormat::Cnic));
            assert_eq!(wizard.form().ntn, "");
        }

        #[test]
        fn test_selectors_cycle_and_wrap() {
            let mut wizard = Wizard::new();
            let title = FieldId::Contact(ContactRole::KeyContact, ContactField::Title);
            wizard.cycle_choice(title, false);
            assert_eq!(wizard.choice_value(title).as_deref(), Some("Dr."));
            let designation = FieldId::Contact(ContactRole::Ceo, ContactField::Designation);
            wizard.cycle_choice(designation, true);
            assert_eq!(wizard.form().ceo.designation, "Managing Director");
            wizard.cycle_choice(FieldId::HasWebsite, true);
            assert_eq!(wizard.form().website, "www.");
            wizard.cycle_choice(FieldId::HasWebsite, true);
            assert_eq!(wizard.form().website, "");
            assert!(!wizard.cycle_choice(FieldId::City, true));
        }

        #[test]
        fn test_gtin8_toggle_locks_fee_tiers() {
            let mut wizard = Wizard::new();
            wizard.cycle_choice(FieldId::Gtin8Required, true);
            assert_eq!(wizard.form().gtin8s_required, YesNo::Yes);
            assert_eq!(
                wizard.toggle_fee(FeeTier::Gtins10),
                Err(FeeError::TierDisabled(FeeTier::Gtins10))
            );
            assert!(wizard.fee_transition().is_none());
            assert_eq!(wizard.toggle_fee(FeeTier::Gtins500), Ok(()));
            assert_eq!(wizard.fee_transition().map(|t| t.tier), Some(FeeTier::Gtins500));
        }

        #[test]
        fn test_out_of_range_category_is_ignored() {
            let mut wizard = Wizard::new();
            assert!(!wizard.toggle_category(CATEGORIES.len()));
            assert!(wizard.form().selected_categories.is_empty());
        }
    }
}
