//! Property tests: presence, idempotence, adjacency completeness and DOT
//! quoting round-trips.

use proptest::prelude::*;

use progress_graph::graph::{edge_handle, parse_node_rows};
use progress_graph::{compute_graph, GraphConfig, RawRow};

/// Read one double-quoted DOT string starting at `input[0]` the way the
/// Graphviz lexer does: `\"` becomes `"`, `\\` is kept as two characters,
/// backslash-newline is a continuation and any other backslash is literal.
/// Returns the lexed text and the rest of the input.
fn lex_quoted(input: &str) -> Option<(String, &str)> {
    let mut chars = input.char_indices().peekable();
    if chars.next()?.1 != '"' {
        return None;
    }
    let mut out = String::new();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Some((out, &input[idx + 1..])),
            '\\' => match chars.peek().map(|&(_, c)| c) {
                Some('"') => {
                    chars.next();
                    out.push('"');
                }
                Some('\\') => {
                    chars.next();
                    out.push_str("\\\\");
                }
                Some('\n') => {
                    chars.next();
                }
                _ => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    None
}

/// Map a lexed DOT string back to the sheet id it was written from.
fn decode(lexed: &str) -> String {
    let mut out = String::new();
    let mut chars = lexed.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn read_quoted(input: &str) -> Option<(String, &str)> {
    lex_quoted(input).map(|(lexed, rest)| (decode(&lexed), rest))
}

/// Lexed tokens of node statements, in order.
fn node_tokens(dot: &str) -> Vec<String> {
    dot.lines()
        .map(str::trim_start)
        .filter_map(|line| {
            let (token, rest) = lex_quoted(line)?;
            rest.trim_start().starts_with('[').then_some(token)
        })
        .collect()
}

/// Lexed (source, target) tokens of edge statements, in order.
fn edge_tokens(dot: &str) -> Vec<(String, String)> {
    dot.lines()
        .map(str::trim_start)
        .filter_map(|line| {
            let (source, rest) = lex_quoted(line)?;
            let rest = rest.trim_start().strip_prefix("->")?.trim_start();
            let (target, _) = lex_quoted(rest)?;
            Some((source, target))
        })
        .collect()
}

/// Node ids declared by node statements, in order.
fn declared_nodes(dot: &str) -> Vec<String> {
    dot.lines()
        .map(str::trim_start)
        .filter_map(|line| {
            let (id, rest) = read_quoted(line)?;
            rest.trim_start().starts_with('[').then_some(id)
        })
        .collect()
}

/// (source, target) pairs of edge statements, in order.
fn declared_edges(dot: &str) -> Vec<(String, String)> {
    dot.lines()
        .map(str::trim_start)
        .filter_map(|line| {
            let (source, rest) = read_quoted(line)?;
            let rest = rest.trim_start().strip_prefix("->")?.trim_start();
            let (target, _) = read_quoted(rest)?;
            Some((source, target))
        })
        .collect()
}

fn identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9]{0,6}",
        "[0-9][A-Za-z0-9 _-]{0,6}[A-Za-z0-9]",
        "[ -~]{1,12}",
        "[\\p{Han}a-z \"]{1,6}",
        "[a-z\\\\\"\r\n\t ]{1,8}",
    ]
    .prop_filter("trimmed, non-empty", |s| !s.trim().is_empty() && s.trim() == s)
}

fn status() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ToDo".to_string()),
        Just("InProgress".to_string()),
        Just("Done".to_string()),
        Just(String::new()),
        "[a-zA-Z]{1,10}",
    ]
}

fn node_row() -> impl Strategy<Value = RawRow> {
    (identifier(), "[ -~]{0,10}", status(), "[ -~]{0,10}").prop_map(|(id, label, status, prompt)| {
        vec![id, label, String::new(), status, prompt]
    })
}

fn edge_row() -> impl Strategy<Value = RawRow> {
    (identifier(), identifier()).prop_map(|(s, t)| vec![s, t])
}

proptest! {
    #[test]
    fn accepted_nodes_appear_exactly_once(
        nodes in prop::collection::vec(node_row(), 0..12),
    ) {
        let response = compute_graph(&nodes, &[], &GraphConfig::default());
        let accepted = parse_node_rows(&nodes);
        let declared = declared_nodes(&response.graph_text);

        prop_assert_eq!(response.node_details.len(), accepted.len());
        prop_assert_eq!(declared.len(), accepted.len());
        for node in &accepted {
            prop_assert_eq!(response.node_details.iter().filter(|d| d.id == node.id).count(), 1);
            prop_assert_eq!(declared.iter().filter(|id| **id == node.id).count(), 1);
        }
    }

    #[test]
    fn compute_graph_is_idempotent(
        nodes in prop::collection::vec(node_row(), 0..10),
        edges in prop::collection::vec(edge_row(), 0..10),
    ) {
        let config = GraphConfig::default();
        let first = compute_graph(&nodes, &edges, &config);
        let second = compute_graph(&nodes, &edges, &config);
        prop_assert_eq!(&first.graph_text, &second.graph_text);
        prop_assert_eq!(&first.adjacency, &second.adjacency);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_parsed_node_has_an_adjacency_key(
        nodes in prop::collection::vec(node_row(), 0..10),
        edges in prop::collection::vec(edge_row(), 0..10),
    ) {
        let response = compute_graph(&nodes, &edges, &GraphConfig::default());
        for detail in &response.node_details {
            prop_assert!(response.adjacency.contains(&detail.id));
        }
        for edge in &response.edge_details {
            prop_assert!(response.adjacency.contains(&edge.source));
        }
    }

    #[test]
    fn quoted_ids_round_trip(source in identifier(), target in identifier()) {
        let nodes = vec![
            vec![source.clone(), "source".to_string()],
            vec![target.clone(), "target".to_string()],
        ];
        let edges = vec![vec![source.clone(), target.clone()]];
        let response = compute_graph(&nodes, &edges, &GraphConfig::default());

        let declared = declared_nodes(&response.graph_text);
        prop_assert!(declared.contains(&source));
        prop_assert!(declared.contains(&target));
        prop_assert_eq!(
            declared_edges(&response.graph_text),
            vec![(source.clone(), target.clone())]
        );

        // Same lexed token in node and edge statements.
        let tokens = node_tokens(&response.graph_text);
        let (edge_source, edge_target) = edge_tokens(&response.graph_text).remove(0);
        prop_assert!(tokens.contains(&edge_source));
        prop_assert!(tokens.contains(&edge_target));
        if source != target {
            prop_assert_ne!(&tokens[0], &tokens[1]);
        }
    }

    #[test]
    fn edge_handles_are_injective(
        a in identifier(), b in identifier(), c in identifier(), d in identifier(),
    ) {
        prop_assume!((a.as_str(), b.as_str()) != (c.as_str(), d.as_str()));
        prop_assert_ne!(edge_handle(&a, &b), edge_handle(&c, &d));
    }
}

#[test]
fn awkward_ids_round_trip() {
    let ids = [
        "two words",
        "say \"hi\"",
        "9lives",
        "a-b",
        "back\\slash",
        "節點 1",
        "a\rb",
        "ab",
        "a\\rb",
        "tab\there",
        "line\nbreak",
        "trailing\\",
    ];
    let nodes: Vec<RawRow> = ids
        .iter()
        .map(|id| vec![id.to_string(), "label".to_string()])
        .collect();
    let edges: Vec<RawRow> = ids
        .windows(2)
        .map(|pair| vec![pair[0].to_string(), pair[1].to_string()])
        .collect();

    let response = compute_graph(&nodes, &edges, &GraphConfig::default());

    assert_eq!(declared_nodes(&response.graph_text), ids);
    let expected: Vec<(String, String)> = ids
        .windows(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect();
    assert_eq!(declared_edges(&response.graph_text), expected);

    let tokens = node_tokens(&response.graph_text);
    for (i, token) in tokens.iter().enumerate() {
        assert!(!tokens[i + 1..].contains(token), "token {:?} repeats", token);
    }
}
