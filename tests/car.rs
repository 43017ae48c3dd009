use id3tree::prelude::*;
use id3tree::Node;

use std::path::PathBuf;


fn dataset() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/dataset/car_sample.data");
    path
}


fn car_tree() -> (Schema, TrainingTable, DecisionTree) {
    let schema = Schema::car();
    let table = DataReader::default()
        .file(dataset())
        .read(&schema)
        .unwrap();
    let tree = Id3Builder::new(&schema, &table)
        .build()
        .unwrap();
    (schema, table, tree)
}


#[test]
fn reads_car_sample() {
    let (_, table, _) = car_tree();
    assert_eq!(table.len(), 24);
    // low,low,3,4,small,high,good
    assert_eq!(table.row(23), &[3, 3, 1, 1, 0, 2, 2]);
}


#[test]
fn reproduces_training_examples() {
    let (_, table, tree) = car_tree();
    let report = tree.check(&table);
    println!("{report}");

    assert!(report.is_consistent(), "mismatches: {:?}", report.mismatches);
    assert_eq!(report.n_correct, 24);
    assert_eq!(tree.predict_all(&table).len(), 24);
}


#[test]
fn root_splits_on_doors() {
    let (schema, _, tree) = car_tree();
    let root = tree.node(tree.root());
    assert_eq!(root.distribution(), &[10, 8, 2, 4]);

    match root {
        Node::Internal(node) => {
            let name = schema.attributes()[node.attribute()].name();
            assert_eq!(name, Some("doors"));
            assert_eq!(node.children().len(), 4);
        },
        Node::Leaf(_) => panic!("the root must split"),
    }
    assert_eq!(tree.len(), 28);
    assert_eq!(tree.n_leaves(), 21);
}


#[test]
fn every_split_partitions_its_examples() {
    let (_, _, tree) = car_tree();

    for (id, node) in tree.nodes() {
        let Node::Internal(inner) = node else { continue; };

        let mut union = Vec::new();
        for &child in inner.children() {
            let child = tree.node(child);
            assert_eq!(child.parent(), Some(id));
            union.extend_from_slice(child.chosen_ones());
        }
        union.sort_unstable();
        let mut own = node.chosen_ones().to_vec();
        own.sort_unstable();
        assert_eq!(union, own, "children of {id:?} do not partition it");
    }
}


#[test]
fn leaves_are_pure() {
    let (_, _, tree) = car_tree();
    for (_, node) in tree.nodes() {
        let classes = node.distribution()
            .iter()
            .filter(|&&count| count > 0)
            .count();
        if node.is_leaf() {
            assert_eq!(node.entropy(), 0.0);
            assert!(classes <= 1);
        } else {
            assert!(node.entropy() > 0.0);
            assert!(classes >= 2);
        }
    }
}


#[test]
fn xml_export_is_deterministic() {
    let (_, _, tree) = car_tree();
    let first = tree.to_xml().unwrap();
    let second = tree.to_xml().unwrap();
    assert_eq!(first, second);

    let mut lines = first.lines();
    assert_eq!(
        lines.next(),
        Some("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>")
    );
    assert_eq!(
        lines.next(),
        Some("<tree classes=\"unacc:10,acc:8,good:2,vgood:4\" \
              entropy=\"0.8920795639257109\">")
    );
    // The last slot of the root is printed first.
    assert!(
        lines.next().is_some_and(|line| line.starts_with("\t<node ")
            && line.contains("doors=\"5more\"")),
    );
    assert!(first.ends_with("</tree>"));

    let opened = first.matches("<node ").count();
    let closed = first.matches("</node>").count();
    assert_eq!(opened, tree.len() - 1);
    assert_eq!(opened, closed);
}


#[test]
fn xml_and_json_files() {
    let (_, table, tree) = car_tree();
    let dir = std::env::temp_dir();
    let xml_path = dir.join(format!("id3tree_car_{}.xml", std::process::id()));
    let json_path = dir.join(format!("id3tree_car_{}.json", std::process::id()));

    tree.to_xml_file(&xml_path).unwrap();
    let xml = std::fs::read_to_string(&xml_path).unwrap();
    assert_eq!(xml, tree.to_xml().unwrap());

    tree.to_json_file(&json_path).unwrap();
    let restored = DecisionTree::from_json_file(&json_path).unwrap();
    assert_eq!(restored, tree);
    assert!(restored.check(&table).is_consistent());

    let _ = std::fs::remove_file(xml_path);
    let _ = std::fs::remove_file(json_path);
}
