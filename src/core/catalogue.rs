use std::collections::BTreeMap;

/// Suffix marking the ICU MessageFormat variant of a domain.
///
/// `messages+intl-icu` holds the ICU-formatted counterpart of `messages`.
pub const INTL_DOMAIN_SUFFIX: &str = "+intl-icu";

/// Messages of one domain, keyed by message id.
pub type Messages = BTreeMap<String, String>;

/// All domains of one catalogue.
pub type Domains = BTreeMap<String, Messages>;

static NO_MESSAGES: Messages = BTreeMap::new();

/// All translated messages of a single locale, grouped by domain.
///
/// Domains and keys iterate in sorted order. Empty domains are never kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    locale: String,
    domains: Domains,
}

impl Catalogue {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            domains: Domains::new(),
        }
    }

    /// Build a catalogue from a single domain's messages.
    pub fn with_messages<K, V>(
        locale: impl Into<String>,
        domain: &str,
        messages: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalogue = Self::new(locale);
        catalogue.add(messages, domain);
        catalogue
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Get the text of a message, or `""` when the key is missing.
    pub fn get(&self, key: &str, domain: &str) -> &str {
        self.domains
            .get(domain)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>, domain: &str) {
        self.domains
            .entry(domain.to_string())
            .or_default()
            .insert(key.into(), text.into());
    }

    pub fn has(&self, key: &str, domain: &str) -> bool {
        self.domains
            .get(domain)
            .is_some_and(|messages| messages.contains_key(key))
    }

    /// Remove a message. The domain disappears once its last message is gone.
    pub fn remove(&mut self, key: &str, domain: &str) -> Option<String> {
        let messages = self.domains.get_mut(domain)?;
        let removed = messages.remove(key);
        if messages.is_empty() {
            self.domains.remove(domain);
        }
        removed
    }

    /// Upsert many messages into one domain.
    pub fn add<K, V>(&mut self, messages: impl IntoIterator<Item = (K, V)>, domain: &str)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut messages = messages.into_iter().peekable();
        if messages.peek().is_none() {
            return;
        }
        let target = self.domains.entry(domain.to_string()).or_default();
        for (key, text) in messages {
            target.insert(key.into(), text.into());
        }
    }

    /// The full domain -> key -> text structure.
    pub fn all(&self) -> &Domains {
        &self.domains
    }

    /// The messages of one domain; empty when the domain is absent.
    pub fn all_in(&self, domain: &str) -> &Messages {
        self.domains.get(domain).unwrap_or(&NO_MESSAGES)
    }

    /// Names of the non-empty domains.
    pub fn domains(&self) -> Vec<&str> {
        self.domains
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(domain, _)| domain.as_str())
            .collect()
    }

    /// Merge every entry of `other` into `self`, overwriting on collision.
    ///
    /// The locale of `other` is not checked.
    pub fn add_catalogue(&mut self, other: &Catalogue) {
        for (domain, messages) in &other.domains {
            self.add(messages.iter().map(|(k, v)| (k.clone(), v.clone())), domain);
        }
    }

    /// Owned variant of [`Catalogue::add_catalogue`].
    pub fn merge(&mut self, other: Catalogue) {
        for (domain, messages) in other.domains {
            match self.domains.get_mut(&domain) {
                Some(target) => target.extend(messages),
                None if !messages.is_empty() => {
                    self.domains.insert(domain, messages);
                }
                None => {}
            }
        }
    }

    pub fn is_intl_domain(domain: &str) -> bool {
        domain.len() > INTL_DOMAIN_SUFFIX.len() && domain.ends_with(INTL_DOMAIN_SUFFIX)
    }

    /// `messages` -> `messages+intl-icu`. Intl domains map to themselves.
    pub fn intl_domain(domain: &str) -> String {
        if Self::is_intl_domain(domain) {
            domain.to_string()
        } else {
            format!("{}{}", domain, INTL_DOMAIN_SUFFIX)
        }
    }

    /// `messages+intl-icu` -> `messages`. Base domains map to themselves.
    pub fn base_domain(domain: &str) -> &str {
        if Self::is_intl_domain(domain) {
            &domain[..domain.len() - INTL_DOMAIN_SUFFIX.len()]
        } else {
            domain
        }
    }

    /// Whether the ICU sibling of `domain` holds any message.
    pub fn intl_domain_exists(&self, domain: &str) -> bool {
        !Self::is_intl_domain(domain)
            && self
                .domains
                .get(&Self::intl_domain(domain))
                .is_some_and(|messages| !messages.is_empty())
    }

    /// Drop base-domain copies of messages already provided by the intl sibling.
    ///
    /// The intl domain stays the single home of such messages. Nothing is
    /// translated or rewritten.
    pub fn move_messages_to_intl_domains_if_possible(&mut self) {
        let base_domains: Vec<String> = self
            .domains
            .keys()
            .filter(|domain| self.intl_domain_exists(domain))
            .cloned()
            .collect();

        for domain in base_domains {
            let intl = Self::intl_domain(&domain);
            let duplicated: Vec<String> = self
                .all_in(&domain)
                .keys()
                .filter(|key| self.has(key, &intl))
                .cloned()
                .collect();
            for key in duplicated {
                self.remove(&key, &domain);
            }
        }
    }

    /// Total number of messages across domains.
    pub fn len(&self) -> usize {
        self.domains.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.values().all(BTreeMap::is_empty)
    }
}
