//! Attribute sets shared between kinds

use k8_tf_schema::{Attribute, AttributeType, Validator};

pub(crate) const LABEL_SELECTOR_OPERATORS: &[&str] = &["In", "NotIn", "Exists", "DoesNotExist"];

pub(crate) fn string_map() -> AttributeType {
    AttributeType::map(AttributeType::String)
}

pub(crate) fn string_list() -> AttributeType {
    AttributeType::list(AttributeType::String)
}

/// `matchLabels` / `matchExpressions`
pub(crate) fn label_selector() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::optional("match_labels", string_map())
            .description("Map of label key and value pairs; all must match.")
            .validator(Validator::LabelKeys)
            .validator(Validator::LabelValues),
        Attribute::optional(
            "match_expressions",
            AttributeType::ObjectList(vec![
                Attribute::required("key", AttributeType::String)
                    .description("The label key that the selector applies to."),
                Attribute::required("operator", AttributeType::String)
                    .description("Relationship of the key to the set of values.")
                    .validator(Validator::one_of(LABEL_SELECTOR_OPERATORS)),
                Attribute::optional("values", string_list()),
            ]),
        )
        .description("List of label selector requirements, ANDed together."),
    ])
}

pub(crate) fn object_reference() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::optional("api_version", AttributeType::String)
            .description("API version of the referent."),
        Attribute::optional("field_path", AttributeType::String)
            .description("Piece of an object instead of an entire object, e.g. `spec.containers{name}`."),
        Attribute::optional("kind", AttributeType::String).description("Kind of the referent."),
        Attribute::optional("name", AttributeType::String).description("Name of the referent."),
        Attribute::optional("namespace", AttributeType::String)
            .description("Namespace of the referent."),
        Attribute::optional("resource_version", AttributeType::String),
        Attribute::optional("uid", AttributeType::String),
    ])
}

/// labels and annotations propagated to created objects
pub(crate) fn template_metadata() -> AttributeType {
    AttributeType::Object(vec![
        Attribute::optional("labels", string_map())
            .validator(Validator::LabelKeys)
            .validator(Validator::LabelValues),
        Attribute::optional("annotations", string_map()).validator(Validator::AnnotationKeys),
    ])
}
