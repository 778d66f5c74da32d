//! Plain-text rendering of a construct tree

use crate::tree::{AppNode, CollapsibleState, InclusionPredicate, NodeIcon, TreeNode};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Rendering options for [`render_app`].
pub struct RenderOptions<'p> {
    /// Deepest level expanded, the app being level 0.
    pub max_depth: Option<usize>,
    pub include: &'p InclusionPredicate,
}

fn marker(node: &TreeNode) -> &'static str {
    match node {
        TreeNode::Construct(construct) if construct.is_state_machine() => "[state machine] ",
        TreeNode::Construct(construct) if construct.icon == NodeIcon::CloudFormation => "[cfn] ",
        _ => "",
    }
}

fn render_node(out: &mut String, node: &TreeNode, depth: usize, options: &RenderOptions) {
    let expand = options.max_depth.map_or(true, |max| depth < max);
    let folded = node.collapsible_state() == CollapsibleState::Collapsed && !expand;
    let _ = writeln!(
        out,
        "{}{}{}{}",
        INDENT.repeat(depth),
        marker(node),
        node.label(),
        if folded { " ..." } else { "" }
    );

    if expand {
        for child in node.children_with(options.include) {
            render_node(out, &child, depth + 1, options);
        }
    }
}

/// Renders the app and its descendants, one indented line per node.
pub fn render_app(app: &AppNode, options: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", app.label);
    if options.max_depth == Some(0) {
        return out;
    }
    for construct in app.children_with(options.include) {
        render_node(&mut out, &TreeNode::Construct(construct), 1, options);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{inspector::include_construct_in_tree, ConstructTree};

    const TREE: &str = r#"{
        "version": "tree-0.1",
        "tree": {
            "id": "App", "path": "",
            "children": {
                "Tree": {"id": "Tree", "path": "Tree"},
                "Stack": {
                    "id": "Stack", "path": "Stack",
                    "children": {
                        "Flow": {
                            "id": "Flow", "path": "Stack/Flow",
                            "children": {
                                "Resource": {
                                    "id": "Resource", "path": "Stack/Flow/Resource",
                                    "attributes": {
                                        "aws:cdk:cloudformation:type": "AWS::StepFunctions::StateMachine",
                                        "aws:cdk:cloudformation:props": {"roleArn": "arn"}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }"#;

    #[test]
    fn renders_filtered_tree_with_markers() {
        let tree = ConstructTree::from_json(TREE).unwrap();
        let app = AppNode::new("my-app", &tree);
        let options = RenderOptions { max_depth: None, include: &include_construct_in_tree };
        let rendered = render_app(&app, &options);
        assert_eq!(
            rendered,
            "my-app\n  Stack\n    [state machine] Flow\n      \
             [cfn] Resource (AWS::StepFunctions::StateMachine)\n        roleArn: arn\n"
        );
    }

    #[test]
    fn depth_limit_folds_expandable_nodes() {
        let tree = ConstructTree::from_json(TREE).unwrap();
        let app = AppNode::new("my-app", &tree);
        let options = RenderOptions { max_depth: Some(1), include: &|_| true };
        assert_eq!(render_app(&app, &options), "my-app\n  Tree\n  Stack ...\n");
    }
}
