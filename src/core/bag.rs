use std::collections::BTreeSet;

use super::catalogue::{Catalogue, Domains};
use super::operation;

/// A collection of catalogues, one per locale.
///
/// Catalogues keep the order in which their locale was first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueBag {
    catalogues: Vec<Catalogue>,
}

impl CatalogueBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalogue, merging it into the existing one for the same locale.
    ///
    /// On key collision the added catalogue wins.
    pub fn add_catalogue(&mut self, catalogue: Catalogue) {
        match self.catalogue_mut(catalogue.locale()) {
            Some(existing) => existing.merge(catalogue),
            None => self.catalogues.push(catalogue),
        }
    }

    pub fn catalogue(&self, locale: &str) -> Option<&Catalogue> {
        self.catalogues.iter().find(|c| c.locale() == locale)
    }

    pub fn catalogue_mut(&mut self, locale: &str) -> Option<&mut Catalogue> {
        self.catalogues.iter_mut().find(|c| c.locale() == locale)
    }

    pub fn catalogues(&self) -> &[Catalogue] {
        &self.catalogues
    }

    pub fn into_catalogues(self) -> Vec<Catalogue> {
        self.catalogues
    }

    pub fn locales(&self) -> Vec<&str> {
        self.catalogues.iter().map(Catalogue::locale).collect()
    }

    /// Union of the domains of every catalogue.
    pub fn domains(&self) -> BTreeSet<&str> {
        self.catalogues
            .iter()
            .flat_map(|c| c.domains())
            .collect()
    }

    /// Nested locale -> domain -> key -> text view, in locale insertion order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Domains)> {
        self.catalogues.iter().map(|c| (c.locale(), c.all()))
    }

    /// Messages of `self` whose key is absent from `reference`.
    ///
    /// See [`operation::diff`].
    pub fn diff(&self, reference: &CatalogueBag) -> CatalogueBag {
        operation::diff(self, reference)
    }

    /// Messages of `self` whose key also exists in `reference`.
    pub fn intersect(&self, reference: &CatalogueBag) -> CatalogueBag {
        operation::intersect(self, reference)
    }

    /// Keep only the listed domains. An empty list keeps everything.
    pub fn retain_domains<S: AsRef<str>>(&mut self, domains: &[S]) {
        if domains.is_empty() {
            return;
        }
        self.catalogues = std::mem::take(&mut self.catalogues)
            .into_iter()
            .map(|catalogue| {
                let mut scoped = Catalogue::new(catalogue.locale());
                for (domain, messages) in catalogue.all() {
                    if domains.iter().any(|d| d.as_ref() == domain) {
                        scoped.add(messages.clone(), domain);
                    }
                }
                scoped
            })
            .collect();
    }

    /// Number of messages across all catalogues.
    pub fn len(&self) -> usize {
        self.catalogues.iter().map(Catalogue::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogues.iter().all(Catalogue::is_empty)
    }
}

impl FromIterator<Catalogue> for CatalogueBag {
    fn from_iter<T: IntoIterator<Item = Catalogue>>(iter: T) -> Self {
        let mut bag = Self::new();
        for catalogue in iter {
            bag.add_catalogue(catalogue);
        }
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_catalogue_same_locale_merges_domains() {
        let mut bag = CatalogueBag::new();
        bag.add_catalogue(Catalogue::with_messages("en", "messages", [("a", "A")]));
        bag.add_catalogue(Catalogue::with_messages("en", "validators", [("b", "B")]));

        assert_eq!(bag.catalogues().len(), 1);
        let en = bag.catalogue("en").unwrap();
        assert_eq!(en.domains(), vec!["messages", "validators"]);
    }

    #[test]
    fn test_add_catalogue_later_addition_wins() {
        let mut bag = CatalogueBag::new();
        bag.add_catalogue(Catalogue::with_messages("en", "messages", [("a", "first")]));
        bag.add_catalogue(Catalogue::with_messages("en", "messages", [("a", "second")]));

        assert_eq!(bag.catalogue("en").unwrap().get("a", "messages"), "second");
    }

    #[test]
    fn test_catalogues_keep_first_seen_order() {
        let bag: CatalogueBag = [
            Catalogue::with_messages("fr", "messages", [("a", "A")]),
            Catalogue::with_messages("en", "messages", [("a", "A")]),
            Catalogue::with_messages("fr", "validators", [("b", "B")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(bag.locales(), vec!["fr", "en"]);
    }

    #[test]
    fn test_missing_locale_is_none() {
        let bag = CatalogueBag::new();
        assert!(bag.catalogue("en").is_none());
    }

    #[test]
    fn test_domains_union() {
        let bag: CatalogueBag = [
            Catalogue::with_messages("en", "messages", [("a", "A")]),
            Catalogue::with_messages("fr", "validators", [("b", "B")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            bag.domains().into_iter().collect::<Vec<_>>(),
            vec!["messages", "validators"]
        );
    }

    #[test]
    fn test_retain_domains() {
        let mut bag: CatalogueBag = [
            Catalogue::with_messages("en", "messages", [("a", "A")]),
            Catalogue::with_messages("en", "validators", [("b", "B")]),
        ]
        .into_iter()
        .collect();

        bag.retain_domains(&["messages"]);

        assert_eq!(bag.domains().into_iter().collect::<Vec<_>>(), vec!["messages"]);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_all_nested_view() {
        let bag: CatalogueBag = [Catalogue::with_messages("en", "messages", [("a", "A")])]
            .into_iter()
            .collect();

        let all: Vec<_> = bag.all().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, "en");
        assert_eq!(all[0].1["messages"]["a"], "A");
    }
}
