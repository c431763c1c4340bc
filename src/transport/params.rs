use std::collections::BTreeMap;

use crate::domain::{AccountId, ExtraParams};

/// Flat query-string parameters for one request.
///
/// Built from the caller's passthrough parameters, then overlaid with the operation's
/// own fields. Absent fields are never written, so no key ever carries an empty value
/// on behalf of an omitted field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of the caller's passthrough parameters.
    pub fn from_extra(extra: &ExtraParams) -> Self {
        Self(
            extra
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        )
    }

    /// Passthrough parameters plus the account scope of a provider-id address.
    ///
    /// The account id is written last so a passthrough `account_id` cannot replace it.
    pub fn provider_scoped(extra: &ExtraParams, account_id: &AccountId) -> Self {
        let mut params = Self::from_extra(extra);
        params.set(AccountId::FIELD, account_id.as_str());
        params
    }

    /// Set `key` unconditionally, replacing any passthrough value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Set `key` when the value is present and non-empty.
    pub fn set_text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|it| !it.is_empty()) {
            self.set(key, value);
        }
    }

    /// Set `key` to the decimal form of a present, non-zero count.
    pub fn set_count(&mut self, key: &str, value: Option<u32>) {
        if let Some(value) = value.filter(|it| *it != 0) {
            self.set(key, value.to_string());
        }
    }

    /// Set `key` to `"true"`/`"false"`; `Some(false)` is sent.
    pub fn set_flag(&mut self, key: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.set(key, if value { "true" } else { "false" });
        }
    }

    pub fn set_account(&mut self, account_id: Option<&AccountId>) {
        if let Some(account_id) = account_id {
            self.set(AccountId::FIELD, account_id.as_str());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
