//! Host page markup for the signup form.

use crate::dom::{Document, DomError};
use crate::rules::RuleTable;
use crate::widgets::STRENGTH_CONTAINER_ID;

pub const FORM_SUCCESS_ID: &str = "form-success";

#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    /// Adds an empty `#password-strength` container after `password-error`.
    pub with_strength_container: bool,
}

/// Builds a page holding one `input` and one `{slug}-error` element per rule,
/// inside a `form`, followed by `#form-success`.
pub fn signup_form(rules: &RuleTable, options: PageOptions) -> Result<Document, DomError> {
    let mut doc = Document::new();
    let form = doc.create_element("form");
    doc.append_child(doc.root(), form)?;

    for rule in rules {
        let input = doc.create_element("input");
        doc.set_id(input, rule.field_id());
        doc.append_child(form, input)?;

        let error = doc.create_element("div");
        doc.set_id(error, &rule.error_id());
        doc.set_class_name(error, "error");
        doc.append_child(form, error)?;

        if options.with_strength_container && rule.field_id() == "password" {
            let container = doc.create_element("div");
            doc.set_id(container, STRENGTH_CONTAINER_ID);
            doc.append_child(form, container)?;
        }
    }

    let success = doc.create_element("div");
    doc.set_id(success, FORM_SUCCESS_ID);
    doc.append_child(doc.root(), success)?;

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_form_has_every_element() {
        let doc = signup_form(&RuleTable::standard(), PageOptions::default()).unwrap();
        for id in [
            "name",
            "name-error",
            "email",
            "email-error",
            "password",
            "password-error",
            "phone number",
            "phone-number-error",
            "address",
            "address-error",
            FORM_SUCCESS_ID,
        ] {
            assert!(doc.get_element_by_id(id).is_some(), "missing #{id}");
        }
        assert!(doc.first_by_tag("form").is_some());
        assert!(doc.get_element_by_id(STRENGTH_CONTAINER_ID).is_none());
    }

    #[test]
    fn test_signup_form_with_strength_container() {
        let options = PageOptions {
            with_strength_container: true,
        };
        let doc = signup_form(&RuleTable::standard(), options).unwrap();
        let error = doc.get_element_by_id("password-error").unwrap();
        assert_eq!(
            doc.next_sibling(error),
            doc.get_element_by_id(STRENGTH_CONTAINER_ID)
        );
    }
}
