//! Diff and merge operations between two catalogue bags.
//!
//! Comparisons are presence-based: a message is identified by its
//! (locale, domain, key) triple and its text is never compared. This is what
//! keeps an additive pull from overwriting local translations, and a
//! new-only push from re-sending messages that already exist remotely.

use super::{bag::CatalogueBag, catalogue::Catalogue};

/// Messages of `source` that `reference` does not know about.
///
/// A message is kept iff `reference` has no catalogue for its locale, or that
/// catalogue lacks its domain, or that domain lacks its key. When both sides
/// hold the key with different texts the message is dropped: the reference
/// side wins. Text from `source` is copied verbatim.
pub fn diff(source: &CatalogueBag, reference: &CatalogueBag) -> CatalogueBag {
    select(source, reference, false)
}

/// Messages of `source` whose key also exists in `reference`, with the text
/// of `source`.
pub fn intersect(source: &CatalogueBag, reference: &CatalogueBag) -> CatalogueBag {
    select(source, reference, true)
}

fn select(source: &CatalogueBag, reference: &CatalogueBag, present: bool) -> CatalogueBag {
    let mut result = CatalogueBag::new();

    for catalogue in source.catalogues() {
        let known = reference.catalogue(catalogue.locale());
        let mut selected = Catalogue::new(catalogue.locale());

        for (domain, messages) in catalogue.all() {
            let kept = messages.iter().filter(|(key, _)| {
                let in_reference = known.is_some_and(|c| c.has(key, domain));
                in_reference == present
            });
            selected.add(kept.map(|(k, v)| (k.clone(), v.clone())), domain);
        }

        if !selected.is_empty() {
            result.add_catalogue(selected);
        }
    }

    result
}

/// Structurally merge `delta` into `destination`.
///
/// Merging the same delta twice leaves the same content as merging it once.
pub fn merge(destination: &mut CatalogueBag, delta: &CatalogueBag) {
    for catalogue in delta.catalogues() {
        destination.add_catalogue(catalogue.clone());
    }
}

/// The full mirror of `remote`, for force mode.
///
/// Each catalogue has its messages rebalanced towards intl domains so ICU
/// content is not duplicated into the legacy domain.
pub fn target(remote: &CatalogueBag) -> CatalogueBag {
    remote
        .catalogues()
        .iter()
        .map(|catalogue| {
            let mut mirrored = catalogue.clone();
            mirrored.move_messages_to_intl_domains_if_possible();
            mirrored
        })
        .collect()
}
