#![allow(dead_code)]

use asexp::Sexp;
use graph_io_gml::parse_gml;
use graph_similarity::LabeledGraph;
use std::fs::File;
use std::io::Read;

pub type NamedGraph = LabeledGraph<String, String>;

fn convert_name(s: Option<&Sexp>) -> Option<String> {
    s.and_then(|se| se.get_str().map(|name| name.to_string()))
}

fn convert_label(w: Option<&Sexp>) -> Option<String> {
    match w {
        Some(s) => s.get_str().map(|label| label.to_string()),
        None => {
            // unlabeled edge
            Some(String::new())
        }
    }
}

/// Loads a GML file whose node weights are vertex names and whose edge
/// weights are edge labels.
pub fn load_graph(graph_file: &str, multiedged: bool) -> NamedGraph {
    let graph_str = {
        let mut graph_file = File::open(graph_file).unwrap();
        let mut graph_str = String::new();
        let _ = graph_file.read_to_string(&mut graph_str).unwrap();
        graph_str
    };

    let graph = parse_gml(&graph_str, &convert_name, &convert_label).unwrap();

    LabeledGraph::from_petgraph(&graph, multiedged)
}

pub fn named_graph(edges: &[(&str, &str)]) -> NamedGraph {
    let mut g = LabeledGraph::new_directed();
    for &(s, t) in edges {
        g.add_edge(s.to_string(), t.to_string(), String::new());
    }
    g
}

/// Straightforward SimRank over string keys, iterated until no score moves
/// by more than `eps`.
pub fn reference_simrank(g: &NamedGraph, c: f64, eps: f64) -> std::collections::HashMap<(String, String), f64> {
    use graph_similarity::GraphView;
    use std::collections::HashMap;

    let vertices = g.vertices();
    let mut sim: HashMap<(String, String), f64> = HashMap::new();
    for a in &vertices {
        for b in &vertices {
            sim.insert((a.clone(), b.clone()), if a == b { 1.0 } else { 0.0 });
        }
    }

    loop {
        let mut next = HashMap::new();
        let mut delta = 0.0f64;
        for a in &vertices {
            for b in &vertices {
                let score = if a == b {
                    1.0
                } else {
                    let pa = g.predecessors(a);
                    let pb = g.predecessors(b);
                    if pa.is_empty() || pb.is_empty() {
                        0.0
                    } else {
                        let mut sum = 0.0;
                        for p in &pa {
                            for q in &pb {
                                sum += sim[&(p.clone(), q.clone())];
                            }
                        }
                        c * sum / (pa.len() * pb.len()) as f64
                    }
                };
                delta = delta.max((score - sim[&(a.clone(), b.clone())]).abs());
                next.insert((a.clone(), b.clone()), score);
            }
        }
        sim = next;
        if delta < eps {
            return sim;
        }
    }
}
