// src/extractors/values.rs
//! Walks category groupings of the parsed export and reads property values.

use roxmltree::{Document, Node};

use super::normalize::{decode_entities, dedup_preserving_order};

// --- Element and attribute names of the export format ---
pub const GROUPING_TAG: &str = "CATEGORY";
pub const MARKER_ATTR: &str = "DESCRIPTION";
pub const PROPERTY_TAG: &str = "PROPERTY";
pub const PROPERTY_NAME_ATTR: &str = "NAME";
pub const VALUE_ATTR: &str = "VALUE";

/// Read-only view over one parsed document.
#[derive(Clone, Copy)]
pub struct ValueExtractor<'a, 'input> {
    document: &'a Document<'input>,
}

impl<'a, 'input> ValueExtractor<'a, 'input> {
    pub fn new(document: &'a Document<'input>) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a Document<'input> {
        self.document
    }

    /// Every grouping element whose marker attribute equals `marker`.
    pub fn groupings(&self, marker: &'a str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        self.document.descendants().filter(move |node| {
            node.has_tag_name(GROUPING_TAG) && node.attribute(MARKER_ATTR) == Some(marker)
        })
    }

    pub fn has_grouping(&self, marker: &str) -> bool {
        self.document.descendants().any(|node| {
            node.has_tag_name(GROUPING_TAG) && node.attribute(MARKER_ATTR) == Some(marker)
        })
    }

    /// Ordered, duplicate-free values of `property` under every grouping
    /// marked `locator`. A missing grouping or property yields an empty list.
    pub fn values_for(&self, locator: &'a str, property: &str) -> Vec<String> {
        let values = dedup_preserving_order(self.positional_values_for(locator, property));
        tracing::trace!("{} / {}: {} value(s)", locator, property, values.len());
        values
    }

    /// Values in document order with repeats kept, for properties that are
    /// paired with other properties by position.
    pub fn positional_values_for(&self, locator: &'a str, property: &str) -> Vec<String> {
        self.groupings(locator)
            .flat_map(|grouping| grouping.descendants())
            .filter(|node| {
                node.has_tag_name(PROPERTY_TAG) && node.attribute(PROPERTY_NAME_ATTR) == Some(property)
            })
            .flat_map(property_values)
            .collect()
    }
}

/// Values of one property element: its child elements, or the property
/// itself when it carries the value inline.
fn property_values(property: Node<'_, '_>) -> Vec<String> {
    let children: Vec<Node> = property.children().filter(Node::is_element).collect();
    if children.is_empty() {
        return node_value(property).into_iter().collect();
    }
    children.into_iter().filter_map(node_value).collect()
}

fn node_value(node: Node<'_, '_>) -> Option<String> {
    let raw = node.attribute(VALUE_ATTR).or_else(|| node.text())?;
    let decoded = decode_entities(raw.trim());
    let value = decoded.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<LISTING>
        <CATEGORY DESCRIPTION="LINE_A">
            <PROPERTY NAME="Door Model">
                <VALUE>Shaker</VALUE>
                <VALUE>Flat</VALUE>
                <VALUE>Shaker</VALUE>
                <VALUE>   </VALUE>
            </PROPERTY>
            <ITEM>
                <PROPERTY NAME="Door Model"><VALUE VALUE="Flat"/><VALUE VALUE="Slatted"/></PROPERTY>
            </ITEM>
            <PROPERTY NAME="Profile" VALUE="Aluminium &amp;gt; Slim"/>
        </CATEGORY>
        <CATEGORY DESCRIPTION="LINE_A">
            <PROPERTY NAME="Door Model"><VALUE>Glass</VALUE></PROPERTY>
        </CATEGORY>
        <CATEGORY DESCRIPTION="LINE_B">
            <PROPERTY NAME="Door Model"><VALUE>Other</VALUE></PROPERTY>
        </CATEGORY>
    </LISTING>"#;

    #[test]
    fn values_are_ordered_and_unique() {
        let doc = Document::parse(DOC).unwrap();
        let values = ValueExtractor::new(&doc).values_for("LINE_A", "Door Model");
        assert_eq!(values, vec!["Shaker", "Flat", "Slatted", "Glass"]);
    }

    #[test]
    fn positional_values_keep_repeats() {
        let doc = Document::parse(DOC).unwrap();
        let values = ValueExtractor::new(&doc).positional_values_for("LINE_A", "Door Model");
        assert_eq!(values, vec!["Shaker", "Flat", "Shaker", "Flat", "Slatted", "Glass"]);
    }

    #[test]
    fn absent_property_or_grouping_is_empty() {
        let doc = Document::parse(DOC).unwrap();
        let extractor = ValueExtractor::new(&doc);
        assert!(extractor.values_for("LINE_A", "Hinge").is_empty());
        assert!(extractor.values_for("SPECIAL_FINISH", "Door Model").is_empty());
    }

    #[test]
    fn inline_value_is_entity_decoded() {
        let doc = Document::parse(DOC).unwrap();
        let values = ValueExtractor::new(&doc).values_for("LINE_A", "Profile");
        assert_eq!(values, vec!["Aluminium > Slim"]);
    }

    #[test]
    fn grouping_lookup_matches_marker_exactly() {
        let doc = Document::parse(DOC).unwrap();
        let extractor = ValueExtractor::new(&doc);
        assert!(extractor.has_grouping("LINE_B"));
        assert!(!extractor.has_grouping("LINE_B_BODY"));
        assert_eq!(extractor.groupings("LINE_A").count(), 2);
    }
}
