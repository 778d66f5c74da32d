//! Display nodes over a construct tree
//!
//! Nodes borrow the entities they describe and never mutate them. A node's
//! identity is its parent's identity joined with its own label, so two
//! siblings sharing a label share an id; the tree does not deduplicate them.

use super::inspector::{
    get_display_label, get_properties, get_type_attribute_or_default, include_construct_in_tree,
    is_state_machine,
};
use super::{ConstructTree, ConstructTreeEntity};
use crate::constants::tree::{
    APP_CONTEXT_VALUE, CONSTRUCT_CONTEXT_VALUE, ID_SEPARATOR, STATE_MACHINE_CONTEXT_VALUE,
};
use serde_json::{Map, Value};

/// Decides whether a child construct is shown.
pub type InclusionPredicate = dyn Fn(&ConstructTreeEntity) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsibleState {
    None,
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIcon {
    Cdk,
    CloudFormation,
}

fn join_id(parent_id: &str, label: &str) -> String {
    format!("{parent_id}{ID_SEPARATOR}{label}")
}

/// Construct nodes for the included children of `entity`.
fn construct_children<'a>(
    parent_id: &str,
    entity: &'a ConstructTreeEntity,
    include: &InclusionPredicate,
) -> Vec<ConstructNode<'a>> {
    let Some(children) = &entity.children else {
        return Vec::new();
    };

    children
        .values()
        .filter(|child| include(*child))
        .map(|child| {
            let collapsible_state = if child.children.is_some() || child.attributes.is_some() {
                CollapsibleState::Collapsed
            } else {
                CollapsibleState::None
            };
            ConstructNode::new(parent_id, get_display_label(child), collapsible_state, child)
        })
        .collect()
}

/// A CDK app: the root of one construct tree.
#[derive(Debug)]
pub struct AppNode<'a> {
    pub id: String,
    pub label: String,
    tree: &'a ConstructTree,
}

impl<'a> AppNode<'a> {
    pub fn new(label: &str, tree: &'a ConstructTree) -> Self {
        Self { id: label.to_string(), label: label.to_string(), tree }
    }

    pub fn context_value(&self) -> &'static str {
        APP_CONTEXT_VALUE
    }

    pub fn children(&self) -> Vec<ConstructNode<'a>> {
        self.children_with(&include_construct_in_tree)
    }

    pub fn children_with(&self, include: &InclusionPredicate) -> Vec<ConstructNode<'a>> {
        construct_children(&self.id, &self.tree.tree, include)
    }
}

/// A construct of the tree.
#[derive(Debug, Clone)]
pub struct ConstructNode<'a> {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    pub collapsible_state: CollapsibleState,
    pub icon: NodeIcon,
    pub context_value: &'static str,
    pub construct: &'a ConstructTreeEntity,
    r#type: String,
}

impl<'a> ConstructNode<'a> {
    pub fn new(
        parent_id: &str,
        label: String,
        collapsible_state: CollapsibleState,
        construct: &'a ConstructTreeEntity,
    ) -> Self {
        let r#type = get_type_attribute_or_default(construct, "");
        let context_value = if is_state_machine(construct) {
            STATE_MACHINE_CONTEXT_VALUE
        } else {
            CONSTRUCT_CONTEXT_VALUE
        };
        let icon = if r#type.is_empty() { NodeIcon::Cdk } else { NodeIcon::CloudFormation };
        let tooltip = if r#type.is_empty() { construct.path.clone() } else { r#type.clone() };

        Self {
            id: join_id(parent_id, &label),
            label,
            tooltip,
            collapsible_state,
            icon,
            context_value,
            construct,
            r#type,
        }
    }

    /// CloudFormation type, empty for constructs without one.
    pub fn construct_type(&self) -> &str {
        &self.r#type
    }

    pub fn is_state_machine(&self) -> bool {
        self.context_value == STATE_MACHINE_CONTEXT_VALUE
    }

    pub fn children(&self) -> Vec<TreeNode<'a>> {
        self.children_with(&include_construct_in_tree)
    }

    /// Property nodes first, then the child constructs accepted by `include`.
    pub fn children_with(&self, include: &InclusionPredicate) -> Vec<TreeNode<'a>> {
        let mut nodes: Vec<TreeNode<'a>> = get_properties(self.construct)
            .map(|properties| generate_property_nodes(&self.id, properties))
            .unwrap_or_default()
            .into_iter()
            .map(TreeNode::Property)
            .collect();

        nodes.extend(
            construct_children(&self.id, self.construct, include)
                .into_iter()
                .map(TreeNode::Construct),
        );
        nodes
    }
}

/// One CloudFormation property. Objects and arrays expand into their entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub id: String,
    pub key: String,
    pub label: String,
    pub value: Value,
    pub collapsible_state: CollapsibleState,
}

impl PropertyNode {
    pub fn new(parent_id: &str, key: &str, value: Value) -> Self {
        let (label, collapsible_state) = match &value {
            Value::Object(_) | Value::Array(_) => (key.to_string(), CollapsibleState::Collapsed),
            Value::String(text) => (format!("{key}: {text}"), CollapsibleState::None),
            scalar => (format!("{key}: {scalar}"), CollapsibleState::None),
        };
        Self { id: join_id(parent_id, key), key: key.to_string(), label, value, collapsible_state }
    }

    pub fn children(&self) -> Vec<PropertyNode> {
        match &self.value {
            Value::Object(properties) => generate_property_nodes(&self.id, properties),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| PropertyNode::new(&self.id, &index.to_string(), item.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// One property node per key, in declaration order.
pub fn generate_property_nodes(
    parent_id: &str,
    properties: &Map<String, Value>,
) -> Vec<PropertyNode> {
    properties
        .iter()
        .map(|(key, value)| PropertyNode::new(parent_id, key, value.clone()))
        .collect()
}

/// Either kind of child a construct node can produce.
#[derive(Debug, Clone)]
pub enum TreeNode<'a> {
    Property(PropertyNode),
    Construct(ConstructNode<'a>),
}

impl<'a> TreeNode<'a> {
    pub fn id(&self) -> &str {
        match self {
            TreeNode::Property(node) => &node.id,
            TreeNode::Construct(node) => &node.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TreeNode::Property(node) => &node.label,
            TreeNode::Construct(node) => &node.label,
        }
    }

    pub fn collapsible_state(&self) -> CollapsibleState {
        match self {
            TreeNode::Property(node) => node.collapsible_state,
            TreeNode::Construct(node) => node.collapsible_state,
        }
    }

    pub fn children_with(&self, include: &InclusionPredicate) -> Vec<TreeNode<'a>> {
        match self {
            TreeNode::Property(node) => {
                node.children().into_iter().map(TreeNode::Property).collect()
            }
            TreeNode::Construct(node) => node.children_with(include),
        }
    }
}
