//! Form domain layer
//!
//! Field codecs, the collected form aggregate and its store, and the
//! catalogue of inputs the wizard can focus.

pub mod codec;
mod field;
mod form_state;

pub use codec::TaxIdFormat;
pub use field::{visible_fields, FieldId, FieldKind};
pub use form_state::{
    all_addresses_filled, filled_address_count, normalize, real_addresses, BillingChoice,
    ContactField, ContactInfo, ContactRole, FormPatch, FormState, FormStore, Title, YesNo,
    ADDRESS_SENTINEL, CATEGORIES, CEO_DESIGNATIONS, MAX_ADDRESSES, PROVINCES,
};
