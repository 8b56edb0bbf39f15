//! Field-level input checks shared by the record drafts.

/// One or more request fields failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidFields {
    pub message: String,
    pub fields: Vec<String>,
}

impl InvalidFields {
    pub fn new(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            message: message.into(),
            fields,
        }
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self::new(message, vec![field.to_string()])
    }
}

/// Accumulates missing required fields while a draft is being checked.
#[derive(Debug, Default)]
pub(crate) struct FieldCheck {
    missing: Vec<String>,
    invalid: Vec<(String, String)>,
}

impl FieldCheck {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Required text: present and non-blank after trimming.
    pub(crate) fn required_text(&mut self, field: &str, value: Option<String>) -> String {
        match non_blank(value) {
            Some(v) => v,
            None => {
                self.missing.push(field.to_string());
                String::new()
            }
        }
    }

    pub(crate) fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(field.to_string());
        }
        value
    }

    /// Optional text on an update: absent keeps the old value, blank is rejected.
    pub(crate) fn supplied_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = value?;
        match non_blank(Some(value)) {
            Some(v) => Some(v),
            None => {
                self.invalid
                    .push((field.to_string(), format!("{} cannot be empty", field)));
                None
            }
        }
    }

    pub(crate) fn invalid(&mut self, field: &str, message: impl Into<String>) {
        self.invalid.push((field.to_string(), message.into()));
    }

    pub(crate) fn finish(self) -> Result<(), InvalidFields> {
        if !self.missing.is_empty() {
            let message = format!("Missing required fields: {}", self.missing.join(", "));
            let mut fields = self.missing;
            fields.extend(self.invalid.into_iter().map(|(field, _)| field));
            return Err(InvalidFields::new(message, fields));
        }
        if !self.invalid.is_empty() {
            let message = self
                .invalid
                .iter()
                .map(|(_, msg)| msg.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            let fields = self.invalid.into_iter().map(|(field, _)| field).collect();
            return Err(InvalidFields::new(message, fields));
        }
        Ok(())
    }
}

/// Trimmed value, `None` when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_listed_in_order() {
        let mut check = FieldCheck::new();
        let name = check.required_text("name", Some("  Ada ".to_string()));
        check.required_text("email", None);
        check.required_text("course", Some("   ".to_string()));
        let err = check.finish().unwrap_err();

        assert_eq!(name, "Ada");
        assert_eq!(err.fields, vec!["email", "course"]);
        assert_eq!(err.message, "Missing required fields: email, course");
    }

    #[test]
    fn test_supplied_blank_is_invalid_but_absent_is_fine() {
        let mut check = FieldCheck::new();
        assert_eq!(check.supplied_text("name", None), None);
        assert_eq!(check.supplied_text("email", Some("".to_string())), None);
        let err = check.finish().unwrap_err();
        assert_eq!(err.fields, vec!["email"]);
        assert_eq!(err.message, "email cannot be empty");
    }

    #[test]
    fn test_clean_check_passes() {
        let mut check = FieldCheck::new();
        check.required("student_id", Some(1));
        assert!(check.finish().is_ok());
    }

    #[test]
    fn test_invalid_fields_display_is_message() {
        let err = InvalidFields::single("credits", "Credits must be a positive number");
        assert_eq!(err.to_string(), "Credits must be a positive number");

        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
        assert_eq!(source.to_string(), err.message);
    }
}
