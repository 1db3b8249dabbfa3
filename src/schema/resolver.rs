//! Mode to schema resolution

use serde::{Deserialize, Serialize};

use super::field::{FieldDescriptor, Validator};
use super::mode::{FormMode, SchemaError};
use super::names;

/// Tunable thresholds applied while building a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRules {
    /// Minimum password length for new accounts
    pub password_min_length: usize,
    /// Exact digit count of the tax identifier (last four of the SSN)
    pub tax_id_digits: usize,
}

impl Default for SchemaRules {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            tax_id_digits: 4,
        }
    }
}

/// Ordered fields and rules for one [`FormMode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    mode: FormMode,
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in display order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Resolve the schema for `mode` with default rules
pub fn resolve(mode: FormMode) -> FormSchema {
    resolve_with(mode, &SchemaRules::default())
}

/// Resolve the schema for a mode given as a route slug (`sign-in`, `sign-up`)
pub fn resolve_str(mode: &str) -> Result<FormSchema, SchemaError> {
    Ok(resolve(mode.parse()?))
}

/// Resolve the schema for `mode` with explicit rules
///
/// Sign-up places the identity and address fields ahead of the
/// email/password pair shared with sign-in.
pub fn resolve_with(mode: FormMode, rules: &SchemaRules) -> FormSchema {
    let mut fields = match mode {
        FormMode::SignIn => Vec::with_capacity(2),
        FormMode::SignUp => identity_fields(rules),
    };
    fields.extend(credential_fields(mode, rules));
    FormSchema { mode, fields }
}

fn identity_fields(rules: &SchemaRules) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text(names::FIRST_NAME, "First Name", "Enter your first name"),
        FieldDescriptor::text(names::LAST_NAME, "Last Name", "Enter your last name"),
        FieldDescriptor::text(names::ADDRESS1, "Address", "Enter your specific address"),
        FieldDescriptor::text(names::CITY, "City", "Enter your city"),
        FieldDescriptor::text(names::STATE, "State", "ex: NY"),
        FieldDescriptor::text(names::POSTAL_CODE, "Postal Code", "ex: 11101"),
        FieldDescriptor::date(names::DATE_OF_BIRTH, "Date of Birth", "YYYY-MM-DD"),
        FieldDescriptor::numeric_id(names::SSN, "SSN", "ex: 1234", rules.tax_id_digits),
    ]
}

fn credential_fields(mode: FormMode, rules: &SchemaRules) -> Vec<FieldDescriptor> {
    let email = FieldDescriptor::email(names::EMAIL, "Email", "Enter your email");
    let password = FieldDescriptor::password(names::PASSWORD, "Password", "Enter your password");
    // existing passwords predate the length policy
    let password = match mode {
        FormMode::SignIn => password,
        FormMode::SignUp => {
            password.with_validator(Validator::MinLength(rules.password_min_length))
        }
    };
    vec![email, password]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InputKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_is_deterministic() {
        for mode in [FormMode::SignIn, FormMode::SignUp] {
            assert_eq!(resolve(mode), resolve(mode));
        }
    }

    #[test]
    fn test_sign_in_fields() {
        let schema = resolve(FormMode::SignIn);
        assert_eq!(schema.mode(), FormMode::SignIn);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["email", "password"]);
    }

    #[test]
    fn test_sign_up_field_order() {
        let schema = resolve(FormMode::SignUp);
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec![
                "firstName",
                "lastName",
                "address1",
                "city",
                "state",
                "postalCode",
                "dateOfBirth",
                "ssn",
                "email",
                "password",
            ]
        );
    }

    #[test]
    fn test_sign_in_is_strict_subset_of_sign_up() {
        let sign_in: HashSet<_> = resolve(FormMode::SignIn).names().collect();
        let sign_up: HashSet<_> = resolve(FormMode::SignUp).names().collect();
        assert!(sign_in.is_subset(&sign_up));
        assert!(sign_in.len() < sign_up.len());
    }

    #[test]
    fn test_exactly_one_email_and_password() {
        for mode in [FormMode::SignIn, FormMode::SignUp] {
            let schema = resolve(mode);
            let count = |kind: InputKind| {
                schema
                    .fields()
                    .iter()
                    .filter(|field| field.input_kind == kind)
                    .count()
            };
            assert_eq!(count(InputKind::Email), 1, "{mode}");
            assert_eq!(count(InputKind::Password), 1, "{mode}");
        }
    }

    #[test]
    fn test_every_field_is_required() {
        for mode in [FormMode::SignIn, FormMode::SignUp] {
            for field in resolve(mode).fields() {
                assert!(field.required, "{}", field.name);
                assert_eq!(field.validators.first(), Some(&Validator::Required));
            }
        }
    }

    #[test]
    fn test_password_policy_only_on_sign_up() {
        let sign_in = resolve(FormMode::SignIn);
        let sign_up = resolve(FormMode::SignUp);
        assert_eq!(sign_in.field("password").unwrap().validate("secret1"), None);
        assert_eq!(
            sign_up.field("password").unwrap().validate("secret1"),
            Some("minimum length")
        );
    }

    #[test]
    fn test_rules_are_applied() {
        let rules = SchemaRules {
            password_min_length: 12,
            tax_id_digits: 9,
        };
        let schema = resolve_with(FormMode::SignUp, &rules);
        assert_eq!(
            schema.field("password").unwrap().validate("eleven-char"),
            Some("minimum length")
        );
        assert_eq!(schema.field("ssn").unwrap().validate("123456789"), None);
        assert_eq!(schema.field("ssn").unwrap().validate("1234"), Some("invalid identifier"));
    }

    #[test]
    fn test_resolve_str() {
        assert_eq!(resolve_str("sign-up").unwrap(), resolve(FormMode::SignUp));
        assert_eq!(
            resolve_str("register"),
            Err(SchemaError::InvalidMode("register".to_string()))
        );
    }

    #[test]
    fn test_field_lookup() {
        let schema = resolve(FormMode::SignIn);
        assert!(schema.contains("email"));
        assert!(!schema.contains("ssn"));
        assert_eq!(schema.len(), 2);
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_rules_deserialize_with_defaults() {
        let rules: SchemaRules = serde_json::from_str(r#"{"tax_id_digits": 9}"#).unwrap();
        assert_eq!(rules.password_min_length, 8);
        assert_eq!(rules.tax_id_digits, 9);
    }
}
