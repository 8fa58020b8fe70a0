//! Contact record and the document that carries it.
//!
//! # Design
//! Every field is optional: the endpoint is a static mock and records with
//! missing keys must still render. Display helpers produce the row text a
//! table cell shows, so every host formats contacts identically.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Prefix the mock endpoint puts in front of every address.
pub const EMAIL_PREFIX: &str = "devnull+";

/// One contact as returned by the endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Unix timestamp, seconds.
    pub date_update: Option<i64>,
}

/// Top-level shape of the contacts response.
///
/// `result: None` (key absent or `null`) and `result: Some(vec![])` are
/// different outcomes and are kept apart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactsDocument {
    pub total: Option<i64>,
    pub result: Option<Vec<Contact>>,
}

impl Contact {
    /// The email without a leading `devnull+`.
    ///
    /// Only the prefix goes. The first app build removed every occurrence of
    /// `devnull+`, so `x.devnull+@host` used to display as `x.@host`; it is
    /// now shown unchanged.
    pub fn clean_email(&self) -> Option<String> {
        self.email.as_deref().map(|email| {
            email
                .strip_prefix(EMAIL_PREFIX)
                .unwrap_or(email)
                .to_string()
        })
    }

    /// `date_update` as a medium date and time in the host's timezone.
    pub fn formatted_date_update(&self) -> Option<String> {
        self.formatted_date_update_in(&Local)
    }

    /// `date_update` as a medium date and time in `tz`, e.g.
    /// `Jul 17, 2023 at 1:24:05 PM`.
    pub fn formatted_date_update_in<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let utc = DateTime::from_timestamp(self.date_update?, 0)?;
        Some(
            utc.with_timezone(tz)
                .format("%b %-d, %Y at %-I:%M:%S %p")
                .to_string(),
        )
    }

    pub fn display_name(&self) -> String {
        format!(
            "Name: {} {}",
            self.first_name.as_deref().unwrap_or("first name not found"),
            self.last_name.as_deref().unwrap_or("last name not found"),
        )
    }

    pub fn display_id(&self) -> String {
        format!("ID: {}", self.id.unwrap_or(0))
    }

    pub fn display_email(&self) -> String {
        format!(
            "Email: {}",
            self.clean_email().as_deref().unwrap_or("email not found")
        )
    }

    pub fn display_date_update(&self) -> String {
        self.display_date_update_in(&Local)
    }

    pub fn display_date_update_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "Last Updated: {}",
            self.formatted_date_update_in(tz)
                .as_deref()
                .unwrap_or("not found")
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn sample() -> Contact {
        Contact {
            id: Some(7),
            email: Some("devnull+anna.k@enkod.ru".to_string()),
            first_name: Some("Anna".to_string()),
            last_name: Some("Karpova".to_string()),
            date_update: Some(1_689_600_245),
        }
    }

    #[test]
    fn decodes_camel_case_keys() {
        let contact: Contact = serde_json::from_str(
            r#"{"id":1,"email":"a@b.c","firstName":"A","lastName":"B","dateUpdate":10}"#,
        )
        .unwrap();
        assert_eq!(contact.id, Some(1));
        assert_eq!(contact.first_name.as_deref(), Some("A"));
        assert_eq!(contact.last_name.as_deref(), Some("B"));
        assert_eq!(contact.date_update, Some(10));
    }

    #[test]
    fn missing_and_null_fields_are_tolerated() {
        let contact: Contact =
            serde_json::from_str(r#"{"email":null,"nickname":"ignored"}"#).unwrap();
        assert_eq!(contact, Contact::default());
    }

    #[test]
    fn document_keeps_absent_and_empty_result_apart() {
        let absent: ContactsDocument = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert!(absent.result.is_none());

        let empty: ContactsDocument = serde_json::from_str(r#"{"total":0,"result":[]}"#).unwrap();
        assert_eq!(empty.result, Some(Vec::new()));
    }

    #[test]
    fn clean_email_strips_leading_prefix_only() {
        assert_eq!(sample().clean_email().as_deref(), Some("anna.k@enkod.ru"));

        let plain = Contact {
            email: Some("plain@enkod.ru".to_string()),
            ..Contact::default()
        };
        assert_eq!(plain.clean_email().as_deref(), Some("plain@enkod.ru"));

        let inner = Contact {
            email: Some("x.devnull+@enkod.ru".to_string()),
            ..Contact::default()
        };
        assert_eq!(inner.clean_email().as_deref(), Some("x.devnull+@enkod.ru"));

        assert!(Contact::default().clean_email().is_none());
    }

    #[test]
    fn formats_date_in_given_timezone() {
        let contact = sample();
        assert_eq!(
            contact.formatted_date_update_in(&Utc).as_deref(),
            Some("Jul 17, 2023 at 1:24:05 PM")
        );
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(
            contact.formatted_date_update_in(&moscow).as_deref(),
            Some("Jul 17, 2023 at 4:24:05 PM")
        );
    }

    #[test]
    fn unrepresentable_timestamp_has_no_date() {
        let contact = Contact {
            date_update: Some(i64::MAX),
            ..Contact::default()
        };
        assert!(contact.formatted_date_update_in(&Utc).is_none());
        assert!(Contact::default().formatted_date_update().is_none());
    }

    #[test]
    fn row_text_with_all_fields() {
        let contact = sample();
        assert_eq!(contact.display_name(), "Name: Anna Karpova");
        assert_eq!(contact.display_id(), "ID: 7");
        assert_eq!(contact.display_email(), "Email: anna.k@enkod.ru");
        assert_eq!(
            contact.display_date_update_in(&Utc),
            "Last Updated: Jul 17, 2023 at 1:24:05 PM"
        );
    }

    #[test]
    fn row_text_with_missing_fields() {
        let contact = Contact::default();
        assert_eq!(
            contact.display_name(),
            "Name: first name not found last name not found"
        );
        assert_eq!(contact.display_id(), "ID: 0");
        assert_eq!(contact.display_email(), "Email: email not found");
        assert_eq!(contact.display_date_update(), "Last Updated: not found");
    }
}
