//! Input sanitization gate.
//!
//! Every mutation payload goes through [`Sanitize::sanitized`] before it is
//! sent: string fields lose script/style blocks and markup, then the shared
//! required-field and validator rules run. A rejected payload is never sent.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use domain::{
    BulkDelete, CreateAccount, CreateAppointment, CreatePayment, CreateProperty, RequiredFields,
    UpdateAccount, UpdateAppointment, UpdatePayment, UpdateProperty,
};

use crate::error::{ClientError, ClientResult};

static BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
        .expect("block pattern compiles")
});

/// A tag opens with a letter, `/` or `!` right after `<`; a bare `<` is text.
static TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)</?[A-Za-z!][^>]*>").expect("tag pattern compiles"));

/// Remove script/style blocks and every remaining tag, then trim.
pub fn strip_markup(input: &str) -> String {
    let without_blocks = BLOCKS.replace_all(input, "");
    TAGS.replace_all(&without_blocks, "").trim().to_string()
}

/// Clean an identifier passed outside a payload.
pub fn sanitize_id(id: &str) -> ClientResult<String> {
    let id = strip_markup(id);
    if id.is_empty() {
        return Err(ClientError::MissingFields(vec!["id"]));
    }
    Ok(id)
}

fn clean_text(field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        *value = strip_markup(value);
    }
}

fn clean_list(field: &mut Option<Vec<String>>) {
    if let Some(values) = field.as_mut() {
        for value in values.iter_mut() {
            *value = strip_markup(value);
        }
    }
}

pub trait Sanitize: RequiredFields + Validate + Sized {
    /// Strip markup from every string field.
    fn clean(self) -> Self;

    fn sanitized(self) -> ClientResult<Self> {
        let cleaned = self.clean();

        let missing = cleaned.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::MissingFields(missing));
        }

        cleaned.validate()?;
        Ok(cleaned)
    }
}

macro_rules! sanitize {
    ($payload:ty => [$($text:ident),*] $(, lists [$($list:ident),*])?) => {
        impl Sanitize for $payload {
            fn clean(mut self) -> Self {
                $(clean_text(&mut self.$text);)*
                $($(clean_list(&mut self.$list);)*)?
                self
            }
        }
    };
}

sanitize!(CreateProperty => [category, location, status, price, agent], lists [property_pics]);
sanitize!(
    UpdateProperty => [id, category, location, status, price, user, appointment_id, agent],
    lists [property_pics]
);
sanitize!(CreateAppointment => [user, description, property]);
sanitize!(UpdateAppointment => [id, user, description, property]);
sanitize!(CreatePayment => [property, appointment, user]);
sanitize!(UpdatePayment => [id, property, appointment, user]);
sanitize!(CreateAccount => [name, email, address, contact_number]);
sanitize!(UpdateAccount => [id, name, email, address, contact_number]);

impl Sanitize for BulkDelete {
    fn clean(mut self) -> Self {
        self.ids = self
            .ids
            .iter()
            .map(|id| strip_markup(id))
            .filter(|id| !id.is_empty())
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;

    #[test]
    fn test_strip_markup_removes_blocks_and_tags() {
        assert_eq!(
            strip_markup("  <b>Sea</b> view<script>alert('x')</script><STYLE>p{}</STYLE> "),
            "Sea view"
        );
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("a<!-- note -->b</p>"), "ab");
    }

    #[test]
    fn test_strip_markup_keeps_comparison_text() {
        assert_eq!(strip_markup("3 < 4 and 5 > 2"), "3 < 4 and 5 > 2");
        assert_eq!(strip_markup("x<5 or y>2"), "x<5 or y>2");

        let payload = CreateAppointment {
            user: Some("client-1".into()),
            description: Some("Budget < 5M, needs > 2 bedrooms".into()),
            ..Default::default()
        }
        .clean();
        assert_eq!(
            payload.description.as_deref(),
            Some("Budget < 5M, needs > 2 bedrooms")
        );
    }

    #[test]
    fn test_sanitized_payload_keeps_clean_values() {
        let payload = CreateAccount {
            name: Some("<i>Ana</i> Cruz".into()),
            email: Some(" ana@example.com ".into()),
            role: Some(Role::Client),
            ..Default::default()
        }
        .sanitized()
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Ana Cruz"));
        assert_eq!(payload.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_markup_only_field_counts_as_missing() {
        let err = UpdateProperty {
            id: Some("<script>p1</script>".into()),
            ..Default::default()
        }
        .sanitized()
        .unwrap_err();

        assert!(matches!(err, ClientError::MissingFields(fields) if fields == vec!["id"]));
    }

    #[test]
    fn test_validator_rules_apply_after_cleaning() {
        let err = CreatePayment {
            property: Some("prop-1".into()),
            amount: Some(-5.0),
            status: Some(domain::PaymentStatus::Pending),
            ..Default::default()
        }
        .sanitized()
        .unwrap_err();

        assert_eq!(err.user_message(), "Amount cannot be negative");
    }

    #[test]
    fn test_blank_id_is_rejected() {
        assert!(sanitize_id("  ").is_err());
        assert_eq!(sanitize_id(" p1 ").unwrap(), "p1");
    }
}
