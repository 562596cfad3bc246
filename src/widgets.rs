//! Strength indicator nodes: a text label and a meter holding a fill bar.

use crate::dom::{Document, DomError, NodeId};
use crate::strength::{NEUTRAL_COLOR, StrengthResult};

/// Optional container that, when present, hosts the indicator.
pub const STRENGTH_CONTAINER_ID: &str = "password-strength";

pub const TEXT_CLASS: &str = "strength-text";
pub const METER_CLASS: &str = "strength-meter";
pub const BAR_CLASS: &str = "strength-bar";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthWidgets {
    text: NodeId,
    meter: NodeId,
    bar: NodeId,
}

impl StrengthWidgets {
    /// Finds or creates the indicator nodes.
    ///
    /// Inside `#password-strength` when the page provides it, otherwise as the
    /// siblings right after `password_error` (label first, then meter).
    /// Calling it again returns the same nodes.
    pub fn ensure(doc: &mut Document, password_error: NodeId) -> Result<Self, DomError> {
        if let Some(container) = doc.get_element_by_id(STRENGTH_CONTAINER_ID) {
            return Self::ensure_in_container(doc, container);
        }

        let parent = doc
            .parent(password_error)
            .ok_or(DomError::Detached(password_error))?;
        let existing_text = doc
            .children(parent)
            .iter()
            .copied()
            .find(|&n| doc.has_class(n, TEXT_CLASS));

        let text = match existing_text {
            Some(text) => text,
            None => {
                let text = new_with_class(doc, TEXT_CLASS);
                doc.insert_after(password_error, text)?;
                text
            }
        };
        let meter = match doc.next_sibling(text).filter(|&n| doc.has_class(n, METER_CLASS)) {
            Some(meter) => meter,
            None => {
                let meter = new_with_class(doc, METER_CLASS);
                doc.insert_after(text, meter)?;
                meter
            }
        };
        let bar = ensure_bar(doc, meter)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "strength indicator attached after password error node ({})",
            if existing_text.is_some() { "reused" } else { "created" }
        );

        Ok(Self { text, meter, bar })
    }

    fn ensure_in_container(doc: &mut Document, container: NodeId) -> Result<Self, DomError> {
        let text = match doc.find_by_class(container, TEXT_CLASS) {
            Some(text) => text,
            None => {
                let text = new_with_class(doc, TEXT_CLASS);
                doc.append_child(container, text)?;
                text
            }
        };
        let meter = match doc.find_by_class(container, METER_CLASS) {
            Some(meter) => meter,
            None => {
                let meter = new_with_class(doc, METER_CLASS);
                doc.append_child(container, meter)?;
                meter
            }
        };
        let bar = ensure_bar(doc, meter)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("strength indicator bound to #{}", STRENGTH_CONTAINER_ID);

        Ok(Self { text, meter, bar })
    }

    pub fn text(&self) -> NodeId {
        self.text
    }

    pub fn meter(&self) -> NodeId {
        self.meter
    }

    pub fn bar(&self) -> NodeId {
        self.bar
    }

    /// Shows `strength`, or the empty state when `None`.
    pub fn render(&self, doc: &mut Document, strength: Option<&StrengthResult>) {
        match strength {
            Some(result) => {
                doc.set_text(self.text, &result.display_text());
                doc.set_style(self.bar, "width", result.width());
                doc.set_style(self.bar, "background", result.color);
                doc.add_class(self.meter, ACTIVE_CLASS);
                doc.add_class(self.text, ACTIVE_CLASS);
            }
            None => {
                doc.set_text(self.text, "");
                doc.set_style(self.bar, "width", "0");
                doc.set_style(self.bar, "background", NEUTRAL_COLOR);
                doc.remove_class(self.meter, ACTIVE_CLASS);
                doc.remove_class(self.text, ACTIVE_CLASS);
            }
        }
    }

    pub fn clear(&self, doc: &mut Document) {
        self.render(doc, None);
    }
}

fn new_with_class(doc: &mut Document, class: &str) -> NodeId {
    let node = doc.create_element("div");
    doc.set_class_name(node, class);
    node
}

fn ensure_bar(doc: &mut Document, meter: NodeId) -> Result<NodeId, DomError> {
    if let Some(bar) = doc.find_by_class(meter, BAR_CLASS) {
        return Ok(bar);
    }
    let bar = new_with_class(doc, BAR_CLASS);
    doc.append_child(meter, bar)?;
    Ok(bar)
}
