//! Form state aggregate and store
//!
//! `FormState` is the single aggregate collected across all wizard steps and
//! is also the JSON payload handed to the intake endpoint, so its serde
//! shape is the wire format.

use super::codec::{self, TaxIdFormat};
use super::field::FieldId;
use crate::state::fees::{self, FeeError, FeeTier};
use serde::{Deserialize, Serialize};

/// Placeholder meaning "explicitly not applicable"; never a real address
pub const ADDRESS_SENTINEL: &str = "-";

/// Upper bound on GLN and billing address entries
pub const MAX_ADDRESSES: usize = 20;

/// Product categories offered on the products step
pub const CATEGORIES: [&str; 30] = [
    "Agricultural",
    "Bakery Products",
    "Beverages",
    "Building Materials",
    "Chemicals",
    "Cigarettes",
    "Cleaning Products",
    "Computer Software",
    "Detergents",
    "Eggs",
    "Electric Heaters",
    "Equipment's",
    "Food",
    "Fruit Juices",
    "Confectionery",
    "Sea Foods",
    "Snack Foods",
    "Dairy Products",
    "Industrial Goods",
    "Mineral water",
    "Paper & Stationery",
    "Perfume & Cosmetics",
    "Soaps",
    "Sports Goods",
    "Tea",
    "Tissue Papers",
    "Toiletries",
    "Rice",
    "Toys",
    "Fruits and Vegetables Export",
];

pub const PROVINCES: [&str; 4] = ["Sindh", "Punjab", "Khyber Pakhtunkhwa", "Balochistan"];

pub const CEO_DESIGNATIONS: [&str; 3] = ["CEO", "Managing Director", "Proprietor"];

/// Honorific on a contact record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Title {
    #[default]
    #[serde(rename = "Mr.")]
    Mr,
    #[serde(rename = "Mrs.")]
    Mrs,
    #[serde(rename = "Ms.")]
    Ms,
    #[serde(rename = "Dr.")]
    Dr,
}

impl Title {
    pub const ALL: [Title; 4] = [Title::Mr, Title::Mrs, Title::Ms, Title::Dr];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mr => "Mr.",
            Self::Mrs => "Mrs.",
            Self::Ms => "Ms.",
            Self::Dr => "Dr.",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Billing address selector, serialized capitalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BillingChoice {
    Yes,
    #[default]
    No,
}

/// GTIN-8 selector, serialized lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        *self == Self::Yes
    }
}

/// One of the three contact people
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRole {
    Ceo,
    KeyContact,
    AccountsContact,
}

/// Field of a `ContactInfo` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Designation,
    Title,
    FirstName,
    LastName,
    Email,
    Telephone,
}

impl ContactField {
    pub const ALL: [ContactField; 6] = [
        ContactField::Designation,
        ContactField::Title,
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Telephone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Designation => "Designation",
            Self::Title => "Title",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Telephone => "Mobile or Telephone Number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub designation: String,
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
}

impl ContactInfo {
    fn with_designation(designation: &str) -> Self {
        Self {
            designation: designation.to_string(),
            ..Default::default()
        }
    }

    /// All six fields present
    pub fn is_complete(&self) -> bool {
        !self.designation.is_empty()
            && !self.title.label().is_empty()
            && !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.email.is_empty()
            && !self.telephone.is_empty()
    }

    pub fn text(&self, field: ContactField) -> &str {
        match field {
            ContactField::Designation => &self.designation,
            ContactField::Title => self.title.label(),
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Telephone => &self.telephone,
        }
    }
}

/// Everything the applicant has entered so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub form_name: String,
    pub company_name: String,
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub telephone: String,
    pub email: String,
    pub ntn: String,
    pub company_reg_no: String,
    pub no_of_employees: String,
    pub website: String,
    pub gln_required: bool,
    pub gln_addresses: Vec<String>,
    pub billing_required: BillingChoice,
    pub billing_addresses: Vec<String>,
    pub ceo: ContactInfo,
    pub key_contact: ContactInfo,
    pub accounts_contact: ContactInfo,
    pub selected_categories: Vec<String>,
    pub selected_typeof_product: Vec<String>,
    #[serde(rename = "GTINsRequired")]
    pub gtins_required: String,
    #[serde(rename = "GTIN8sRequired")]
    pub gtin8s_required: YesNo,
    #[serde(rename = "GTIN8")]
    pub gtin8: String,
    pub user_name: String,
    pub agree_terms: bool,
    pub uploaded_image: Option<String>,
    pub selected_fees: Vec<FeeTier>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            form_name: "General Form".to_string(),
            company_name: String::new(),
            street_address: String::new(),
            city: String::new(),
            province: String::new(),
            post_code: String::new(),
            telephone: String::new(),
            email: String::new(),
            ntn: String::new(),
            company_reg_no: String::new(),
            no_of_employees: String::new(),
            website: String::new(),
            gln_required: false,
            gln_addresses: Vec::new(),
            billing_required: BillingChoice::No,
            billing_addresses: Vec::new(),
            ceo: ContactInfo::with_designation("CEO"),
            key_contact: ContactInfo::default(),
            accounts_contact: ContactInfo::default(),
            selected_categories: Vec::new(),
            selected_typeof_product: Vec::new(),
            gtins_required: "10".to_string(),
            gtin8s_required: YesNo::No,
            gtin8: String::new(),
            user_name: String::new(),
            agree_terms: false,
            uploaded_image: None,
            selected_fees: Vec::new(),
        }
    }
}

impl FormState {
    pub fn contact(&self, role: ContactRole) -> &ContactInfo {
        match role {
            ContactRole::Ceo => &self.ceo,
            ContactRole::KeyContact => &self.key_contact,
            ContactRole::AccountsContact => &self.accounts_contact,
        }
    }

    pub fn contact_mut(&mut self, role: ContactRole) -> &mut ContactInfo {
        match role {
            ContactRole::Ceo => &mut self.ceo,
            ContactRole::KeyContact => &mut self.key_contact,
            ContactRole::AccountsContact => &mut self.accounts_contact,
        }
    }

    pub fn gtin8_required(&self) -> bool {
        self.gtin8s_required.is_yes()
    }

    /// Current text of a free-text field, `None` for selectors and lists
    pub fn text_of(&self, field: FieldId) -> Option<&str> {
        let value = match field {
            FieldId::CompanyName => &self.company_name,
            FieldId::StreetAddress => &self.street_address,
            FieldId::City => &self.city,
            FieldId::PostCode => &self.post_code,
            FieldId::Telephone => &self.telephone,
            FieldId::Email => &self.email,
            FieldId::TaxId => &self.ntn,
            FieldId::CompanyRegNo => &self.company_reg_no,
            FieldId::NoOfEmployees => &self.no_of_employees,
            FieldId::Website => &self.website,
            FieldId::GlnAddress(index) => return real_addresses(&self.gln_addresses).nth(index),
            FieldId::BillingAddress => {
                return Some(real_addresses(&self.billing_addresses).next().unwrap_or(""))
            }
            FieldId::Contact(_, ContactField::Title) => return None,
            FieldId::Contact(ContactRole::Ceo, ContactField::Designation) => return None,
            FieldId::Contact(role, field) => return Some(self.contact(role).text(field)),
            FieldId::Gtin8 => &self.gtin8,
            FieldId::UserName => &self.user_name,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Canonical value of `raw` typed into a text field currently holding `current`
pub fn normalize(field: FieldId, current: &str, raw: &str, format: Option<TaxIdFormat>) -> String {
    match field {
        FieldId::CompanyName => codec::company_name(raw),
        FieldId::City => codec::city(raw),
        FieldId::PostCode => codec::postal_code(current, raw),
        FieldId::NoOfEmployees | FieldId::Gtin8 => codec::digits_only(current, raw),
        FieldId::Telephone => codec::telephone(raw),
        FieldId::TaxId => codec::tax_id(raw, format),
        _ => raw.to_string(),
    }
}

/// Addresses with the sentinel filtered out
pub fn real_addresses(addresses: &[String]) -> impl Iterator<Item = &str> {
    addresses
        .iter()
        .map(String::as_str)
        .filter(|a| *a != ADDRESS_SENTINEL)
}

/// Number of real, non-blank addresses
pub fn filled_address_count(addresses: &[String]) -> usize {
    real_addresses(addresses)
        .filter(|a| !a.trim().is_empty())
        .count()
}

/// Whether every real address has content
pub fn all_addresses_filled(addresses: &[String]) -> bool {
    real_addresses(addresses).all(|a| !a.is_empty())
}

/// Partial update shallow-merged into the aggregate
///
/// Address lists and the fee selection are not patchable; they change only
/// through the store helpers that enforce the address cap and fee policy.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub company_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub post_code: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub ntn: Option<String>,
    pub company_reg_no: Option<String>,
    pub no_of_employees: Option<String>,
    pub website: Option<String>,
    pub gln_required: Option<bool>,
    pub billing_required: Option<BillingChoice>,
    pub ceo: Option<ContactInfo>,
    pub key_contact: Option<ContactInfo>,
    pub accounts_contact: Option<ContactInfo>,
    pub selected_categories: Option<Vec<String>>,
    pub gtins_required: Option<String>,
    pub gtin8s_required: Option<YesNo>,
    pub gtin8: Option<String>,
    pub user_name: Option<String>,
    pub agree_terms: Option<bool>,
    pub uploaded_image: Option<Option<String>>,
}

impl FormPatch {
    fn apply(self, state: &mut FormState) {
        fn merge<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        merge(&mut state.company_name, self.company_name);
        merge(&mut state.street_address, self.street_address);
        merge(&mut state.city, self.city);
        merge(&mut state.province, self.province);
        merge(&mut state.post_code, self.post_code);
        merge(&mut state.telephone, self.telephone);
        merge(&mut state.email, self.email);
        merge(&mut state.ntn, self.ntn);
        merge(&mut state.company_reg_no, self.company_reg_no);
        merge(&mut state.no_of_employees, self.no_of_employees);
        merge(&mut state.website, self.website);
        merge(&mut state.gln_required, self.gln_required);
        merge(&mut state.billing_required, self.billing_required);
        merge(&mut state.ceo, self.ceo);
        merge(&mut state.key_contact, self.key_contact);
        merge(&mut state.accounts_contact, self.accounts_contact);
        merge(&mut state.selected_categories, self.selected_categories);
        merge(&mut state.gtins_required, self.gtins_required);
        merge(&mut state.gtin8s_required, self.gtin8s_required);
        merge(&mut state.gtin8, self.gtin8);
        merge(&mut state.user_name, self.user_name);
        merge(&mut state.agree_terms, self.agree_terms);
        merge(&mut state.uploaded_image, self.uploaded_image);
    }
}

/// Owner of the one `FormState` of a session
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    state: FormState,
}

impl FormStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &FormState {
        &self.state
    }

    pub fn snapshot(&self) -> FormState {
        self.state.clone()
    }

    pub fn set(&mut self, patch: FormPatch) {
        patch.apply(&mut self.state);
    }

    /// Update one field of a contact record. Returns false for an unknown title.
    pub fn set_sub_field(&mut self, role: ContactRole, field: ContactField, value: &str) -> bool {
        let contact = self.state.contact_mut(role);
        match field {
            ContactField::Designation => contact.designation = value.to_string(),
            ContactField::Title => match Title::from_label(value) {
                Some(title) => contact.title = title,
                None => return false,
            },
            ContactField::FirstName => contact.first_name = value.to_string(),
            ContactField::LastName => contact.last_name = value.to_string(),
            ContactField::Email => contact.email = value.to_string(),
            ContactField::Telephone => contact.telephone = value.to_string(),
        }
        true
    }

    pub fn reset(&mut self) {
        self.state = FormState::default();
    }

    /// Run `raw` through the field's codec and store it
    ///
    /// Returns false when `field` is not a free-text field.
    pub fn edit_text(&mut self, field: FieldId, raw: &str, format: Option<TaxIdFormat>) -> bool {
        let Some(current) = self.state.text_of(field) else {
            return false;
        };
        let value = normalize(field, current, raw, format);
        let state = &mut self.state;
        match field {
            FieldId::CompanyName => state.company_name = value,
            FieldId::StreetAddress => state.street_address = value,
            FieldId::City => state.city = value,
            FieldId::PostCode => state.post_code = value,
            FieldId::Telephone => state.telephone = value,
            FieldId::Email => state.email = value,
            FieldId::TaxId => state.ntn = value,
            FieldId::CompanyRegNo => state.company_reg_no = value,
            FieldId::NoOfEmployees => state.no_of_employees = value,
            FieldId::Website => state.website = value,
            FieldId::GlnAddress(index) => return self.set_gln_address(index, &value),
            FieldId::BillingAddress => self.set_billing_address(&value),
            FieldId::Contact(role, field) => return self.set_sub_field(role, field, &value),
            FieldId::Gtin8 => state.gtin8 = value,
            FieldId::UserName => state.user_name = value,
            _ => return false,
        }
        true
    }

    /// Selecting a format invalidates whatever identifier was typed before
    pub fn clear_tax_id(&mut self) {
        self.state.ntn.clear();
    }

    pub fn set_has_website(&mut self, has_website: bool) {
        self.state.website = codec::website_toggle(has_website);
    }

    pub fn set_gln_required(&mut self, required: bool) {
        let state = &mut self.state;
        state.gln_required = required;
        state.gln_addresses = if required {
            reopen_addresses(std::mem::take(&mut state.gln_addresses))
        } else {
            vec![ADDRESS_SENTINEL.to_string()]
        };
    }

    pub fn set_billing_required(&mut self, choice: BillingChoice) {
        let state = &mut self.state;
        state.billing_required = choice;
        state.billing_addresses = match choice {
            BillingChoice::Yes => reopen_addresses(std::mem::take(&mut state.billing_addresses)),
            BillingChoice::No => vec![ADDRESS_SENTINEL.to_string()],
        };
    }

    /// Append an empty GLN address slot; false once the cap is reached
    pub fn add_gln_address(&mut self) -> bool {
        if self.state.gln_addresses.len() >= MAX_ADDRESSES {
            return false;
        }
        self.state.gln_addresses.push(String::new());
        true
    }

    /// Remove the `index`-th real GLN address
    pub fn remove_gln_address(&mut self, index: usize) -> bool {
        match real_index(&self.state.gln_addresses, index) {
            Some(position) => {
                self.state.gln_addresses.remove(position);
                true
            }
            None => false,
        }
    }

    /// Overwrite the `index`-th real GLN address
    pub fn set_gln_address(&mut self, index: usize, value: &str) -> bool {
        match real_index(&self.state.gln_addresses, index) {
            Some(position) => {
                self.state.gln_addresses[position] = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_billing_address(&mut self, value: &str) {
        self.state.billing_addresses = vec![value.to_string()];
    }

    /// Flip membership of a category; labels outside the catalogue are ignored
    pub fn toggle_category(&mut self, category: &str) -> bool {
        if !CATEGORIES.contains(&category) {
            return false;
        }
        let selected = &mut self.state.selected_categories;
        match selected.iter().position(|c| c == category) {
            Some(position) => {
                selected.remove(position);
            }
            None => selected.push(category.to_string()),
        }
        true
    }

    /// Toggle a fee tier under the radio policy and the GTIN-8 carve-out
    pub fn toggle_fee(&mut self, tier: FeeTier) -> Result<(), FeeError> {
        let gtin8_required = self.state.gtin8_required();
        fees::toggle_fee(&mut self.state.selected_fees, tier, gtin8_required)
    }

    pub fn set_signature(&mut self, data_url: String) {
        self.state.uploaded_image = Some(data_url);
    }
}

/// "Yes" on an address section: start from one blank entry unless real ones exist
fn reopen_addresses(addresses: Vec<String>) -> Vec<String> {
    if addresses.first().map_or(true, |a| a == ADDRESS_SENTINEL) {
        vec![String::new()]
    } else {
        addresses
    }
}

/// Position in the raw list of the `index`-th non-sentinel entry
fn real_index(addresses: &[String], index: usize) -> Option<usize> {
    addresses
        .iter()
        .enumerate()
        .filter(|(_, a)| *a != ADDRESS_SENTINEL)
        .nth(index)
        .map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_store() -> FormStore {
        let mut store = FormStore::new();
        store.set(FormPatch {
            company_name: Some("Acme".to_string()),
            telephone: Some("923001234567".to_string()),
            selected_categories: Some(vec!["Tea".to_string()]),
            agree_terms: Some(true),
            uploaded_image: Some(Some("data:image/png;base64,AAAA".to_string())),
            ..Default::default()
        });
        store.toggle_fee(FeeTier::Gtins10).unwrap();
        store.set_gln_required(true);
        store.set_gln_address(0, "Plot 1, Karachi");
        store.set_sub_field(ContactRole::KeyContact, ContactField::FirstName, "Sara");
        store
    }

    mod defaults {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_values() {
            let state = FormState::default();
            assert_eq!(state.form_name, "General Form");
            assert_eq!(state.ceo.designation, "CEO");
            assert_eq!(state.ceo.title, Title::Mr);
            assert_eq!(state.key_contact.designation, "");
            assert_eq!(state.gtins_required, "10");
            assert_eq!(state.gtin8s_required, YesNo::No);
            assert_eq!(state.billing_required, BillingChoice::No);
            assert!(state.uploaded_image.is_none());
            assert!(state.selected_fees.is_empty());
        }

        #[test]
        fn test_reset_restores_defaults() {
            let mut store = filled_store();
            assert_ne!(store.get(), &FormState::default());
            store.reset();
            assert_eq!(store.get(), &FormState::default());
        }
    }

    mod patching {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_merges_only_given_fields() {
            let mut store = FormStore::new();
            store.set(FormPatch {
                city: Some("Lahore".to_string()),
                ..Default::default()
            });
            store.set(FormPatch {
                email: Some("info@acme.pk".to_string()),
                ..Default::default()
            });
            assert_eq!(store.get().city, "Lahore");
            assert_eq!(store.get().email, "info@acme.pk");
            assert_eq!(store.get().company_name, "");
        }

        #[test]
        fn test_set_sub_field_touches_one_contact() {
            let mut store = FormStore::new();
            assert!(store.set_sub_field(ContactRole::AccountsContact, ContactField::Email, "a@b.com"));
            assert!(store.set_sub_field(ContactRole::AccountsContact, ContactField::Title, "Dr."));
            assert_eq!(store.get().accounts_contact.email, "a@b.com");
            assert_eq!(store.get().accounts_contact.title, Title::Dr);
            assert_eq!(store.get().ceo, FormState::default().ceo);
        }

        #[test]
        fn test_set_sub_field_rejects_unknown_title() {
            let mut store = FormStore::new();
            assert!(!store.set_sub_field(ContactRole::Ceo, ContactField::Title, "Sir"));
            assert_eq!(store.get().ceo.title, Title::Mr);
        }

        #[test]
        fn test_edit_text_applies_codecs() {
            let mut store = FormStore::new();
            store.edit_text(FieldId::City, "kARACHI1", None);
            store.edit_text(FieldId::Telephone, "0300", None);
            store.edit_text(FieldId::TaxId, "ab123456", Some(TaxIdFormat::Ntn));
            store.edit_text(FieldId::PostCode, "75", None);
            store.edit_text(FieldId::PostCode, "75x", None);
            assert_eq!(store.get().city, "Karachi");
            assert_eq!(store.get().telephone, "92");
            assert_eq!(store.get().ntn, "AB12345-6");
            assert_eq!(store.get().post_code, "75");
        }

        #[test]
        fn test_normalize_is_pure() {
            assert_eq!(normalize(FieldId::Gtin8, "12", "12a", None), "12");
            assert_eq!(normalize(FieldId::Email, "", "A@B.com", None), "A@B.com");
            assert_eq!(
                normalize(FieldId::TaxId, "", "1234567", Some(TaxIdFormat::Cnic)),
                "12345-67"
            );
        }

        #[test]
        fn test_patch_leaves_fees_and_addresses_alone() {
            let mut store = FormStore::new();
            store.set_gln_required(true);
            store.toggle_fee(FeeTier::Gtins100).unwrap();
            store.set(FormPatch {
                company_name: Some("Acme".to_string()),
                gln_required: Some(true),
                billing_required: Some(BillingChoice::Yes),
                ..Default::default()
            });
            assert_eq!(store.get().selected_fees, vec![FeeTier::Gtins100]);
            assert_eq!(store.get().gln_addresses, vec![String::new()]);
            assert_eq!(store.get().billing_addresses, Vec::<String>::new());
        }

        #[test]
        fn test_store_fee_toggle_keeps_one_tier() {
            let mut store = FormStore::new();
            store.toggle_fee(FeeTier::Gtins10).unwrap();
            store.toggle_fee(FeeTier::Gtins1000).unwrap();
            assert_eq!(store.get().selected_fees, vec![FeeTier::Gtins1000]);

            store.set(FormPatch {
                gtin8s_required: Some(YesNo::Yes),
                ..Default::default()
            });
            assert!(store.toggle_fee(FeeTier::Gtins300).is_err());
            store.toggle_fee(FeeTier::Gtins500).unwrap();
            assert_eq!(store.get().selected_fees, vec![FeeTier::Gtins500]);
        }

        #[test]
        fn test_edit_text_refuses_selectors() {
            let mut store = FormStore::new();
            assert!(!store.edit_text(FieldId::Province, "Sindh", None));
            assert!(!store.edit_text(FieldId::Contact(ContactRole::Ceo, ContactField::Title), "Dr.", None));
        }
    }

    mod addresses {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_gln_no_writes_sentinel() {
            let mut store = FormStore::new();
            store.set_gln_required(false);
            assert_eq!(store.get().gln_addresses, vec!["-".to_string()]);
            assert_eq!(filled_address_count(&store.get().gln_addresses), 0);
        }

        #[test]
        fn test_gln_yes_replaces_sentinel_with_blank() {
            let mut store = FormStore::new();
            store.set_gln_required(false);
            store.set_gln_required(true);
            assert_eq!(store.get().gln_addresses, vec![String::new()]);
        }

        #[test]
        fn test_gln_yes_keeps_real_addresses() {
            let mut store = filled_store();
            store.set_gln_required(true);
            assert_eq!(store.get().gln_addresses, vec!["Plot 1, Karachi".to_string()]);
        }

        #[test]
        fn test_add_is_capped() {
            let mut store = FormStore::new();
            for _ in 0..MAX_ADDRESSES {
                assert!(store.add_gln_address());
            }
            assert!(!store.add_gln_address());
            assert_eq!(store.get().gln_addresses.len(), MAX_ADDRESSES);
        }

        #[test]
        fn test_indices_skip_sentinel() {
            let mut store = FormStore::new();
            store.state.gln_addresses = vec!["-".into(), "A".into(), "-".into(), "B".into()];
            assert!(store.set_gln_address(1, "B2"));
            assert!(store.remove_gln_address(0));
            assert_eq!(
                store.get().gln_addresses,
                vec!["-".to_string(), "-".to_string(), "B2".to_string()]
            );
            assert!(!store.set_gln_address(5, "x"));
        }

        #[test]
        fn test_sentinel_ignored_by_counts_and_fill_checks() {
            let addresses: Vec<String> = vec!["-".into(), "Plot 2".into(), "-".into(), " ".into()];
            assert_eq!(filled_address_count(&addresses), 1);
            assert!(all_addresses_filled(&addresses));
            let with_blank: Vec<String> = vec!["-".into(), "".into()];
            assert!(!all_addresses_filled(&with_blank));
            assert_eq!(real_addresses(&with_blank).count(), 1);
        }

        #[test]
        fn test_billing_yes_no() {
            let mut store = FormStore::new();
            store.set_billing_required(BillingChoice::Yes);
            assert_eq!(store.get().billing_addresses, vec![String::new()]);
            store.set_billing_address("Head office");
            store.set_billing_required(BillingChoice::No);
            assert_eq!(store.get().billing_addresses, vec!["-".to_string()]);
            assert_eq!(store.get().text_of(FieldId::BillingAddress), Some(""));
        }
    }

    mod categories {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_toggle_category_flips_membership() {
            let mut store = FormStore::new();
            assert!(store.toggle_category("Tea"));
            assert!(store.toggle_category("Rice"));
            assert!(store.toggle_category("Tea"));
            assert_eq!(store.get().selected_categories, vec!["Rice".to_string()]);
        }

        #[test]
        fn test_unknown_category_is_ignored() {
            let mut store = FormStore::new();
            assert!(!store.toggle_category("Spaceships"));
            assert!(store.get().selected_categories.is_empty());
        }
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_serializes_with_intake_keys() {
            let json = serde_json::to_value(filled_store().snapshot()).unwrap();
            assert_eq!(json["formName"], "General Form");
            assert_eq!(json["companyName"], "Acme");
            assert_eq!(json["GTINsRequired"], "10");
            assert_eq!(json["GTIN8sRequired"], "no");
            assert_eq!(json["GTIN8"], "");
            assert_eq!(json["billingRequired"], "No");
            assert_eq!(json["glnRequired"], true);
            assert_eq!(json["ceo"]["title"], "Mr.");
            assert_eq!(json["keyContact"]["firstName"], "Sara");
            assert_eq!(json["selectedFees"][0], "10 GTINs");
            assert!(json.get("selectedTypeofProduct").is_some());
        }

        #[test]
        fn test_empty_signature_serializes_as_null() {
            let json = serde_json::to_value(FormState::default()).unwrap();
            assert!(json["uploadedImage"].is_null());
        }
    }
}
