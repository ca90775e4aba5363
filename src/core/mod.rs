//! Catalogue model and the diff/merge engine.
//!
//! - `catalogue`: messages of one locale, grouped by domain
//! - `bag`: one catalogue per locale
//! - `operation`: presence-based diff, intersection, merge and force mirror

pub mod bag;
pub mod catalogue;
pub mod operation;

pub use bag::CatalogueBag;
pub use catalogue::{Catalogue, Domains, INTL_DOMAIN_SUFFIX, Messages};
