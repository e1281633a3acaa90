use super::signup::EMAIL;
use super::Fields;
use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Set(String),
    /// Prepended to whatever the field holds when the patch is applied.
    Prefix(String),
}

/// Partial update of a signup record, applied in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupPatch {
    updates: Vec<(String, FieldUpdate)>,
}

impl SignupPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.updates
            .push((field.into(), FieldUpdate::Set(value.into())));
        self
    }

    pub fn prefix(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.updates
            .push((field.into(), FieldUpdate::Prefix(value.into())));
        self
    }

    pub fn updates(&self) -> impl Iterator<Item = (&str, &FieldUpdate)> {
        self.updates
            .iter()
            .map(|(field, update)| (field.as_str(), update))
    }

    /// The key column is immutable.
    pub fn merge_into(&self, fields: &mut Fields) -> Result<(), Error> {
        for (field, update) in self.updates() {
            if field == EMAIL {
                return Err(Error::invalid_input_error().with_message("email cannot be updated"));
            }

            let value = match update {
                FieldUpdate::Set(value) => value.clone(),
                FieldUpdate::Prefix(prefix) => {
                    let current = fields.get(field).map(String::as_str).unwrap_or_default();
                    format!("{}{}", prefix, current)
                }
            };

            fields.insert(field.into(), value);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_applies_to_current_value() {
        let mut fields = Fields::new();
        fields.insert("note".into(), "b".into());

        SignupPatch::new()
            .prefix("note", "a")
            .prefix("missing", "x")
            .merge_into(&mut fields)
            .unwrap();

        assert_eq!(fields["note"], "ab");
        assert_eq!(fields["missing"], "x");
    }

    #[test]
    fn email_is_immutable() {
        let mut fields = Fields::new();
        fields.insert("email".into(), "a@x.com".into());

        let err = SignupPatch::new()
            .set("email", "b@x.com")
            .merge_into(&mut fields)
            .unwrap_err();

        assert!(err.is_invalid_input_error());
        assert_eq!(fields["email"], "a@x.com");
    }
}
