use cmdtree::{CommandSpec, DotWriter, Invocation, Router};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;

fn sample_router() -> Router {
    let mut router = Router::new();
    router
        .register_all(
            ["say hi", "say bye", "sayone"]
                .into_iter()
                .map(|p| CommandSpec::new(p, |_: &Invocation<'_>| {})),
        )
        .unwrap();
    router
}

#[test]
fn test_directed_graph_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commands.dot");

    let router = sample_router();
    let file = BufWriter::new(File::create(&path).unwrap());
    let mut dot = DotWriter::new(file, true).unwrap();
    router.write_graph(&mut dot).unwrap();
    dot.finish().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    // Ids follow creation order: say=1, hi=2, bye=3, sayone=4.
    assert_eq!(
        text,
        "digraph {\n\
         \"/#0\" [label=\"/\"]\n\
         \"/#0\" -> \"say#1\"\n\
         \"say#1\" [label=\"say\"]\n\
         \"say#1\" -> \"bye#3\"\n\
         \"bye#3\" [label=\"bye\"]\n\
         \"say#1\" -> \"hi#2\"\n\
         \"hi#2\" [label=\"hi\"]\n\
         \"/#0\" -> \"sayone#4\"\n\
         \"sayone#4\" [label=\"sayone\"]\n\
         }\n"
    );
}

#[test]
fn test_undirected_graph() {
    let router = sample_router();
    let mut dot = DotWriter::new(Vec::new(), false).unwrap();
    router.write_graph(&mut dot).unwrap();
    let text = String::from_utf8(dot.finish().unwrap()).unwrap();

    assert!(text.starts_with("graph {\n"));
    assert!(text.contains("\"say#1\" -- \"hi#2\""));
    assert!(!text.contains("->"));
}

#[test]
fn test_one_label_per_node_and_one_edge_per_child() {
    let router = sample_router();
    let mut dot = DotWriter::new(Vec::new(), true).unwrap();
    router.write_graph(&mut dot).unwrap();
    let text = String::from_utf8(dot.finish().unwrap()).unwrap();

    let labels = text.lines().filter(|l| l.contains("[label=")).count();
    let edges = text.lines().filter(|l| l.contains(" -> ")).count();
    assert_eq!(labels, router.tree().node_count());
    assert_eq!(edges, router.tree().node_count() - 1);
}

#[test]
fn test_node_keys_are_unique() {
    // "x1" gets id 1 and "x" id 11, so plain concatenation would collide.
    let mut router = Router::new();
    router
        .register_all(
            ["x1", "a", "b", "c", "d", "e", "f", "g", "h", "i", "x"]
                .into_iter()
                .map(|p| CommandSpec::new(p, |_: &Invocation<'_>| {})),
        )
        .unwrap();

    let mut dot = DotWriter::new(Vec::new(), true).unwrap();
    router.write_graph(&mut dot).unwrap();
    let text = String::from_utf8(dot.finish().unwrap()).unwrap();

    let keys: Vec<&str> = text
        .lines()
        .filter(|l| l.contains("[label="))
        .filter_map(|l| l.split('"').nth(1))
        .collect();
    let unique: HashSet<&str> = keys.iter().copied().collect();
    assert_eq!(keys.len(), 12);
    assert_eq!(unique.len(), keys.len());
    assert!(keys.contains(&"x1#1"));
    assert!(keys.contains(&"x#11"));
}
