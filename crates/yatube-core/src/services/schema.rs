//! Statically declared form schema for the post authoring form.
//!
//! The field list is spelled out here instead of being reflected off the
//! entity, and is consumed by both the authoring service (validation)
//! and any client that wants to render the form.

/// What widget/value a field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Reference to a group by id.
    GroupRef,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::GroupRef => "group",
        }
    }
}

/// One declared form field.
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Field-level check over the raw string value; returns the error
    /// message on failure.
    pub validate: fn(&str) -> Option<&'static str>,
}

/// The post authoring form: text (required) plus an optional group.
pub fn post_form() -> &'static [FieldSpec] {
    const FIELDS: &[FieldSpec] = &[
        FieldSpec {
            name: "text",
            kind: FieldKind::Text,
            required: true,
            validate: non_blank,
        },
        FieldSpec {
            name: "group",
            kind: FieldKind::GroupRef,
            required: false,
            validate: accept,
        },
    ];
    FIELDS
}

fn non_blank(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some("The post text must not be empty.")
    } else {
        None
    }
}

fn accept(_value: &str) -> Option<&'static str> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_rejects_blank_values() {
        let text = post_form().iter().find(|f| f.name == "text").unwrap();
        assert!(text.required);
        assert!((text.validate)("").is_some());
        assert!((text.validate)("   \n\t").is_some());
        assert!((text.validate)("hello").is_none());
    }

    #[test]
    fn group_field_is_optional() {
        let group = post_form().iter().find(|f| f.name == "group").unwrap();
        assert!(!group.required);
        assert_eq!(group.kind.as_str(), "group");
    }
}
