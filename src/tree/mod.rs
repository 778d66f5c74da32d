//! Construct tree explorer
//!
//! A CDK app describes its constructs in a `tree.json` file. This module loads
//! that description and exposes it as lazily expanded display nodes: a node
//! only builds its children when asked for them.

use crate::{
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    ioutils::read_from,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub mod inspector;
pub mod node;

pub use node::{
    AppNode, CollapsibleState, ConstructNode, InclusionPredicate, NodeIcon, PropertyNode, TreeNode,
};

/// One construct of the tree. Children are keyed by construct id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructTreeEntity {
    pub id: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<IndexMap<String, ConstructTreeEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, Value>>,
}

impl ConstructTreeEntity {
    pub fn child(&self, id: &str) -> Option<&ConstructTreeEntity> {
        self.children.as_ref()?.get(id)
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.as_ref()?.get(key)
    }
}

/// Top level of `tree.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructTree {
    pub version: String,
    pub tree: ConstructTreeEntity,
}

impl ConstructTree {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Loads a construct tree from a file, or from stdin when `path` is `-`.
pub fn load_tree(path: &Path) -> Result<ConstructTree> {
    if path.as_os_str() == STDIN_INDICATOR {
        return ConstructTree::from_json(&read_from(std::io::stdin())?);
    }
    if !path.is_file() {
        return Err(Error::TreeFileDoesNotExistError { tree_file: path.display().to_string() });
    }

    log::debug!("Loading construct tree from '{}'", path.display());
    ConstructTree::from_json(&std::fs::read_to_string(path)?)
}
