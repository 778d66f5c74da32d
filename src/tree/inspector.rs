//! Read-only queries over [`ConstructTreeEntity`] values
//!
//! Missing attributes resolve to defaults instead of errors: the tree shape
//! evolves with the CDK version that produced it.

use super::ConstructTreeEntity;
use crate::constants::tree::{
    HIDDEN_CONSTRUCT_IDS, PROPS_ATTRIBUTE, RESOURCE_CHILD, STATE_MACHINE_TYPE, TYPE_ATTRIBUTE,
};
use serde_json::{Map, Value};

/// CloudFormation type of the construct, or `default` when absent.
pub fn get_type_attribute_or_default(construct: &ConstructTreeEntity, default: &str) -> String {
    construct
        .attribute(TYPE_ATTRIBUTE)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// CloudFormation properties of the construct, when it declares any.
pub fn get_properties(construct: &ConstructTreeEntity) -> Option<&Map<String, Value>> {
    construct.attribute(PROPS_ATTRIBUTE).and_then(Value::as_object)
}

/// Default inclusion predicate: hides the bookkeeping `Tree` and `Default`
/// constructs unless they carry attributes.
pub fn include_construct_in_tree(construct: &ConstructTreeEntity) -> bool {
    !(HIDDEN_CONSTRUCT_IDS.contains(&construct.id.as_str()) && construct.attributes.is_none())
}

/// Label shown for a construct. `Resource` says nothing on its own, so typed
/// resources named that way also show their CloudFormation type.
pub fn get_display_label(construct: &ConstructTreeEntity) -> String {
    let r#type = get_type_attribute_or_default(construct, "");
    if construct.id == RESOURCE_CHILD && !r#type.is_empty() {
        format!("{} ({})", construct.id, r#type)
    } else {
        construct.id.clone()
    }
}

/// A construct is a state machine when its `Resource` child is a Step
/// Functions state machine.
pub fn is_state_machine(construct: &ConstructTreeEntity) -> bool {
    construct
        .child(RESOURCE_CHILD)
        .is_some_and(|resource| get_type_attribute_or_default(resource, "") == STATE_MACHINE_TYPE)
}
