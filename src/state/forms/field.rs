//! Form field catalogue

use super::codec::TaxIdFormat;
use super::form_state::{real_addresses, BillingChoice, ContactField, ContactRole, FormState, MAX_ADDRESSES};
use crate::state::wizard::Step;

/// Every input the wizard can focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    CompanyName,
    StreetAddress,
    City,
    Province,
    PostCode,
    Telephone,
    Email,
    TaxFormat,
    TaxId,
    CompanyRegNo,
    NoOfEmployees,
    HasWebsite,
    Website,
    GlnRequired,
    /// Index among the real (non-sentinel) GLN addresses
    GlnAddress(usize),
    AddGlnAddress,
    BillingRequired,
    BillingAddress,
    Contact(ContactRole, ContactField),
    Categories,
    Gtin8Required,
    Gtin8,
    Fees,
    AgreeTerms,
    UserName,
    Signature,
}

/// How a field takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Typed text run through a codec
    Text,
    /// Typed text spanning several lines
    Multiline,
    /// One of a fixed set of options, cycled with arrow keys
    Choice,
    /// Single on/off box
    Checkbox,
    /// Multi-select list with its own cursor
    Checklist,
    /// Fee tier rows with radio semantics
    FeeTable,
    /// Path to a file read on Enter
    FilePath,
    /// Press Enter to act
    Button,
}

impl FieldId {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Province
            | Self::TaxFormat
            | Self::HasWebsite
            | Self::GlnRequired
            | Self::BillingRequired
            | Self::Gtin8Required
            | Self::Contact(_, ContactField::Title)
            | Self::Contact(ContactRole::Ceo, ContactField::Designation) => FieldKind::Choice,
            Self::GlnAddress(_) | Self::BillingAddress => FieldKind::Multiline,
            Self::AgreeTerms => FieldKind::Checkbox,
            Self::Categories => FieldKind::Checklist,
            Self::Fees => FieldKind::FeeTable,
            Self::Signature => FieldKind::FilePath,
            Self::AddGlnAddress => FieldKind::Button,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            Self::CompanyRegNo | Self::HasWebsite | Self::Website | Self::AddGlnAddress
        )
    }

    pub fn label(&self) -> String {
        let label = match self {
            Self::CompanyName => "Company Name",
            Self::StreetAddress => "Street Address",
            Self::City => "City",
            Self::Province => "State/Province",
            Self::PostCode => "Postal Code",
            Self::Telephone => "Telephone (Including City Codes)",
            Self::Email => "Company Email",
            Self::TaxFormat => "Select whether you're entering",
            Self::TaxId => "NTN / CNIC",
            Self::CompanyRegNo => "SECP Company Registration Number",
            Self::NoOfEmployees => "Number of Employees",
            Self::HasWebsite => "Do you have a website?",
            Self::Website => "Website",
            Self::GlnRequired => "Do you require GLN?",
            Self::GlnAddress(index) => return format!("GLN Address {}", index + 1),
            Self::AddGlnAddress => "+ Add Address",
            Self::BillingRequired => "Do you require a separate Billing Address?",
            Self::BillingAddress => "Full Billing Address",
            Self::Contact(_, field) => field.label(),
            Self::Categories => "Product Categories",
            Self::Gtin8Required => "Do you require GTIN-8?",
            Self::Gtin8 => "Number of GTIN-8s (minimum 10)",
            Self::Fees => "Annual Fee",
            Self::AgreeTerms => "I agree to all terms and conditions",
            Self::UserName => "Authorized Person Full Name",
            Self::Signature => "Signature Image (path)",
        };
        if self.is_required() {
            format!("{label} *")
        } else {
            label.to_string()
        }
    }
}

/// Inputs shown on `step`, in focus order
///
/// Follow-up inputs appear only once the answer that asks for them is given.
pub fn visible_fields(step: Step, state: &FormState, format: Option<TaxIdFormat>) -> Vec<FieldId> {
    let mut fields = Vec::new();
    match step {
        Step::CompanyInfo => {
            fields.extend([
                FieldId::CompanyName,
                FieldId::StreetAddress,
                FieldId::City,
                FieldId::Province,
                FieldId::PostCode,
                FieldId::Telephone,
                FieldId::Email,
                FieldId::TaxFormat,
            ]);
            if format.is_some() {
                fields.push(FieldId::TaxId);
            }
            fields.extend([FieldId::CompanyRegNo, FieldId::NoOfEmployees, FieldId::HasWebsite]);
            if !state.website.is_empty() {
                fields.push(FieldId::Website);
            }
        }
        Step::GlnBilling => {
            fields.push(FieldId::GlnRequired);
            if state.gln_required {
                let count = real_addresses(&state.gln_addresses).count();
                fields.extend((0..count).map(FieldId::GlnAddress));
                if state.gln_addresses.len() < MAX_ADDRESSES {
                    fields.push(FieldId::AddGlnAddress);
                }
            }
            fields.push(FieldId::BillingRequired);
            if state.billing_required == BillingChoice::Yes {
                fields.push(FieldId::BillingAddress);
            }
        }
        Step::CeoContact | Step::KeyContact | Step::AccountsContact => {
            let role = step.contact_role().unwrap_or(ContactRole::Ceo);
            fields.extend(ContactField::ALL.map(|field| FieldId::Contact(role, field)));
        }
        Step::Products => {
            fields.extend([FieldId::Categories, FieldId::Gtin8Required]);
            if state.gtin8_required() {
                fields.push(FieldId::Gtin8);
            }
            fields.push(FieldId::Fees);
        }
        Step::Declaration => {
            fields.extend([FieldId::AgreeTerms, FieldId::UserName, FieldId::Signature]);
        }
    }
    fields
}
