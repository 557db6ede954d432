//! Integration tests for DAG -> tree decompression

use std::collections::HashSet;

use rstest::rstest;

use treedag::codec::{read_dag, read_tree, tree_tokens, write_tree};
use treedag::domain::{decompress, BackReferenceError, DagArena, TreeArena};
use treedag::util::testing;

fn dag(input: &str) -> DagArena {
    testing::init_test_setup();
    read_dag(input).expect("valid DAG")
}

fn distinct_nodes(tree: &TreeArena) -> usize {
    tree.iter().map(|(idx, _)| idx).collect::<HashSet<_>>().len()
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn given_reference_to_earlier_leaf_when_decompressing_then_leaf_is_copied() {
    let result = decompress(&dag("5\n3\n0\n0\n-2\n")).unwrap();
    assert_eq!(write_tree(&result.tree), "5\n3\n0\n0\n3\n0\n0\n");
    assert_eq!(result.stats.back_references, 1);
    assert_eq!(result.stats.tree_nodes, 3);
}

#[rstest]
#[case::empty("0", vec![0])]
#[case::repeated_pair("1 2 3 0 0 0 -2", vec![1, 2, 3, 0, 0, 0, 2, 3, 0, 0, 0])]
#[case::reference_to_nested_leaf("4 2 2 0 0 0 -3", vec![4, 2, 2, 0, 0, 0, 2, 0, 0])]
#[case::reference_to_right_grandchild("7 1 0 9 0 0 -3", vec![7, 1, 0, 9, 0, 0, 9, 0, 0])]
fn given_dag_when_decompressing_then_emits_expected_tree(
    #[case] input: &str,
    #[case] expected: Vec<i64>,
) {
    let result = decompress(&dag(input)).unwrap();
    assert_eq!(tree_tokens(&result.tree), expected);
}

#[test]
fn given_dag_without_references_when_decompressing_then_same_as_reading_tree() {
    let text = "8 4 2 0 0 1 0 0 6 0 7 0 0";
    let result = decompress(&dag(text)).unwrap();
    assert_eq!(result.tree, read_tree(text).unwrap());
    assert_eq!(result.catalog.len(), 6);
}

// ============================================================
// Ownership of copies
// ============================================================

#[test]
fn given_entry_referenced_twice_when_decompressing_then_every_node_is_distinct() {
    // 1( 2(3, 4), 5(-2, -2) ): both references copy the subtree 2(3, 4)
    let result = decompress(&dag("1 2 3 0 0 4 0 0 5 -2 -2")).unwrap();
    assert_eq!(result.tree.len(), 11);
    assert_eq!(distinct_nodes(&result.tree), 11);
}

#[test]
fn given_two_copies_when_one_is_mutated_then_other_unchanged() {
    let mut result = decompress(&dag("1 2 3 0 0 4 0 0 5 -2 -2")).unwrap();
    let tree = &mut result.tree;
    let five = tree.get_node(tree.root().unwrap()).unwrap().right.unwrap();
    let (first_copy, second_copy) = {
        let node = tree.get_node(five).unwrap();
        (node.left.unwrap(), node.right.unwrap())
    };

    let leaf = tree.get_node(first_copy).unwrap().left.unwrap();
    tree.get_node_mut(leaf).unwrap().value = 42;

    let second: Vec<i64> = tree.iter_from(Some(second_copy)).map(|(_, n)| n.value).collect();
    assert_eq!(second, vec![2, 3, 4]);
    let original = result.catalog.get(1).unwrap();
    let source: Vec<i64> = result.tree.iter_from(Some(original)).map(|(_, n)| n.value).collect();
    assert_eq!(source, vec![2, 3, 4]);
}

#[test]
fn given_two_copies_when_one_is_removed_then_other_survives() {
    let mut result = decompress(&dag("1 2 3 0 0 4 0 0 5 -2 -2")).unwrap();
    let tree = &mut result.tree;
    let five = tree.get_node(tree.root().unwrap()).unwrap().right.unwrap();
    let first_copy = tree.get_node(five).unwrap().left.unwrap();

    assert_eq!(tree.remove_subtree(first_copy), 3);
    assert_eq!(tree_tokens(tree), vec![1, 2, 3, 0, 0, 4, 0, 0, 5, 0, 2, 3, 0, 0, 4, 0, 0]);
}

// ============================================================
// Invalid back-references
// ============================================================

#[rstest]
#[case::past_catalog("5 3 0 0 -3", BackReferenceError::OutOfRange { position: 2, cataloged: 2 })]
#[case::forward_reference("5 -2 3 0 0", BackReferenceError::OutOfRange { position: 1, cataloged: 1 })]
#[case::root_references_itself("5 -1 0", BackReferenceError::Unfinished { position: 0 })]
#[case::parent_reference("5 3 0 -2 0", BackReferenceError::Unfinished { position: 1 })]
fn given_invalid_reference_when_decompressing_then_error(
    #[case] input: &str,
    #[case] expected: BackReferenceError,
) {
    assert_eq!(decompress(&dag(input)).unwrap_err(), expected);
}

#[test]
fn given_reference_to_finished_sibling_of_ancestor_when_decompressing_then_allowed() {
    // 1( 2(3, -), 4(-3, -) ): -3 points at the completed leaf 3
    let result = decompress(&dag("1 2 3 0 0 0 4 -3 0")).unwrap();
    assert_eq!(tree_tokens(&result.tree), vec![1, 2, 3, 0, 0, 0, 4, 3, 0, 0, 0]);
}
