//! Exports a [`DecisionTree`] as nested XML.
//!
//! The walk is iterative: a stack holds the nodes still to be printed,
//! interleaved with markers that close an internal node once all of its
//! children have been printed.
use std::path::Path;
use std::fs;

use crate::error::{Id3Error, Result};
use super::dtree::DecisionTree;
use super::node::*;


const DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n";


enum Frame {
    /// A node reached through the `value`'th slot of its parent.
    Visit { node: NodeId, value: usize },
    /// Closes the most recently opened internal node.
    Close,
}


impl DecisionTree {
    /// Writes the tree as an XML string.
    /// Every node is annotated with its class counts, its entropy,
    /// and the parent's attribute value that leads to it.
    ///
    /// Fails if the schema has no attribute names,
    /// or if a node's class counts do not match its examples.
    /// An all-zero count is an error except on the empty leaf
    /// of a value no example took, which is written as `classes=""`.
    pub fn to_xml(&self) -> Result<String> {
        if !self.schema().has_names() {
            return Err(Id3Error::MissingAttributeNames);
        }

        let mut xml = String::from(DECLARATION);
        let root = self.root();
        xml.push_str(&self.open_tag(root, 0, 0)?);
        xml.push('\n');

        let mut stack = Vec::new();
        push_children(&mut stack, self.children(root));
        let mut depth = 1_usize;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Close => {
                    depth -= 1;
                    indent(&mut xml, depth);
                    xml.push_str("</node>\n");
                },
                Frame::Visit { node: id, value } => {
                    xml.push_str(&self.open_tag(id, value, depth)?);
                    match self.node(id) {
                        Node::Internal(node) => {
                            xml.push('\n');
                            depth += 1;
                            stack.push(Frame::Close);
                            push_children(&mut stack, node.children());
                        },
                        Node::Leaf(leaf) => {
                            let label = self.schema().classes()
                                .get(leaf.class)
                                .ok_or_else(|| Id3Error::CorruptedNode {
                                    node: id.0,
                                    reason: format!("predicts class #{}", leaf.class),
                                })?;
                            xml.push_str(&escape(label));
                            xml.push_str("</node>\n");
                        },
                    }
                },
            }
        }
        xml.push_str("</tree>");

        Ok(xml)
    }


    /// Writes the XML form of the tree to `path`.
    pub fn to_xml_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        fs::write(path, self.to_xml()?)
            .map_err(|source| {
                let path = path.to_path_buf();
                Id3Error::Io { path, source }
            })
    }


    /// Returns the indented opening tag of `id`.
    /// `value` is the slot of `id` in its parent; ignored for the root.
    fn open_tag(&self, id: NodeId, value: usize, depth: usize)
        -> Result<String>
    {
        let node = self.node(id);
        let mut tag = String::new();
        indent(&mut tag, depth);

        tag.push_str(if node.parent().is_none() { "<tree" } else { "<node" });
        tag.push_str(&format!(
            " classes=\"{}\" entropy=\"{}\"",
            self.class_counts(id)?,
            format_entropy(node.entropy()),
        ));

        if let Some(parent) = node.parent() {
            let Node::Internal(parent) = self.node(parent) else {
                let reason = "its parent is a leaf".to_string();
                return Err(Id3Error::CorruptedNode { node: id.0, reason });
            };
            let attribute = &self.schema().attributes()[parent.attribute];
            let name = attribute.name()
                .ok_or(Id3Error::MissingAttributeNames)?;
            tag.push_str(&format!(
                " {name}=\"{}\"", escape(&attribute.values()[value])
            ));
        }
        tag.push('>');

        Ok(tag)
    }


    /// Returns `label:count` for every class reaching `id`,
    /// separated by commas.
    fn class_counts(&self, id: NodeId) -> Result<String> {
        let node = self.node(id);
        let classes = self.schema().classes();
        let distribution = node.distribution();
        let size = node.chosen_ones().len();
        let total = distribution.iter().sum::<usize>();

        let corrupted = |reason: String| {
            Id3Error::CorruptedNode { node: id.0, reason }
        };
        if distribution.len() != classes.len() {
            return Err(corrupted(format!(
                "{} class counts for {} classes",
                distribution.len(), classes.len()
            )));
        }
        if total != size {
            return Err(corrupted(format!(
                "class counts sum to {total}, but {size} examples reach it"
            )));
        }
        // Only the leaf of an unseen attribute value may be empty.
        if total == 0 && !node.is_leaf() {
            return Err(corrupted("an internal node without examples".into()));
        }

        let counts = classes.iter()
            .zip(distribution)
            .filter(|&(_, &count)| count > 0)
            .map(|(label, count)| format!("{}:{count}", escape(label)))
            .collect::<Vec<_>>();
        Ok(counts.join(","))
    }
}


/// Pushes `children` in ascending slot order,
/// so they are popped in descending order.
fn push_children(stack: &mut Vec<Frame>, children: &[NodeId]) {
    for (value, &node) in children.iter().enumerate() {
        stack.push(Frame::Visit { node, value });
    }
}


#[inline]
fn indent(xml: &mut String, depth: usize) {
    xml.extend(std::iter::repeat('\t').take(depth));
}


fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}


/// Formats a value with the fewest digits that read back to it.
/// Magnitudes in `[1e-3, 1e7)` use plain notation,
/// others use the `d.dddE-n` form (`0.5`, `1.0`, `1.0E-4`).
pub(crate) fn format_entropy(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }

    let repr = format!("{value:e}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            format!("{mantissa}E{exponent}")
        },
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => repr,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Id3Builder, Schema, TrainingTable};

    #[test]
    fn test_format_entropy() {
        assert_eq!(format_entropy(0.0), "0.0");
        assert_eq!(format_entropy(1.0), "1.0");
        assert_eq!(format_entropy(0.5), "0.5");
        assert_eq!(format_entropy(0.25), "0.25");
        assert_eq!(format_entropy(0.001), "0.001");
        assert_eq!(format_entropy(1e-4), "1.0E-4");
        assert_eq!(format_entropy(2.5e-5), "2.5E-5");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_missing_names() {
        let schema = Schema::new(["a", "b"], vec![vec!["x", "y"]]).unwrap();
        let table = TrainingTable::new(&schema, vec![vec![0, 0], vec![1, 1]])
            .unwrap();
        let tree = Id3Builder::new(&schema, &table).build().unwrap();
        assert!(matches!(tree.to_xml(), Err(Id3Error::MissingAttributeNames)));
    }

    #[test]
    fn test_two_classes_nested() {
        let schema = Schema::new(["no", "yes"], vec![vec!["x", "y"]; 2])
            .unwrap()
            .attribute_names(["a", "b"])
            .unwrap();
        let rows = vec![
            vec![0, 0, 0],
            vec![0, 1, 1],
            vec![1, 0, 1],
            vec![1, 1, 1],
        ];
        let table = TrainingTable::new(&schema, rows).unwrap();
        let tree = Id3Builder::new(&schema, &table).build().unwrap();

        let xml = tree.to_xml().unwrap();
        let ent = format_entropy(tree.node(tree.root()).entropy());
        let expected = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
            <tree classes=\"no:1,yes:3\" entropy=\"{ent}\">\n\
            \t<node classes=\"yes:2\" entropy=\"0.0\" a=\"y\">yes</node>\n\
            \t<node classes=\"no:1,yes:1\" entropy=\"1.0\" a=\"x\">\n\
            \t\t<node classes=\"yes:1\" entropy=\"0.0\" b=\"y\">yes</node>\n\
            \t\t<node classes=\"no:1\" entropy=\"0.0\" b=\"x\">no</node>\n\
            \t</node>\n\
            </tree>"
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_corrupted_distribution() {
        let schema = Schema::new(["no", "yes"], vec![vec!["x", "y"]])
            .unwrap()
            .attribute_names(["a"])
            .unwrap();
        let rows = vec![vec![0, 0], vec![1, 1]];
        let table = TrainingTable::new(&schema, rows).unwrap();
        let tree = Id3Builder::new(&schema, &table).build().unwrap();

        let mut json: serde_json::Value =
            serde_json::from_str(&tree.to_json().unwrap()).unwrap();
        // Zero out the class counts of the root.
        json["nodes"][0]["Internal"]["stats"]["distribution"] =
            serde_json::json!([0, 0]);
        let tree = DecisionTree::from_json(&json.to_string()).unwrap();

        assert!(matches!(
            tree.to_xml(),
            Err(Id3Error::CorruptedNode { node: 0, .. })
        ));
    }

    #[test]
    fn test_internal_node_without_examples() {
        let schema = Schema::new(["no", "yes"], vec![vec!["x", "y"]; 2])
            .unwrap()
            .attribute_names(["a", "b"])
            .unwrap();
        let rows = vec![
            vec![0, 0, 0],
            vec![0, 1, 1],
            vec![1, 0, 1],
        ];
        let table = TrainingTable::new(&schema, rows).unwrap();
        let tree = Id3Builder::new(&schema, &table).build().unwrap();
        assert!(!tree.node(NodeId(1)).is_leaf());

        let mut json: serde_json::Value =
            serde_json::from_str(&tree.to_json().unwrap()).unwrap();
        // Empty the subset of the inner node, keeping the counts consistent.
        let stats = &mut json["nodes"][1]["Internal"]["stats"];
        stats["chosen_ones"] = serde_json::json!([]);
        stats["distribution"] = serde_json::json!([0, 0]);
        let tree = DecisionTree::from_json(&json.to_string()).unwrap();

        assert!(matches!(
            tree.to_xml(),
            Err(Id3Error::CorruptedNode { node: 1, .. })
        ));
    }
}
