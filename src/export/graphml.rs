//! GraphML export: the generic attributed-graph interchange file.
//!
//! ```text
//! KnowledgeGraph → write_graphml() → <graphml> with typed <key> declarations
//!   → loadable by networkx, igraph, Gephi, yEd
//! ```
//!
//! Node ids are `{node_type}:{key}`; the bare natural key is kept as the
//! `key` attribute, so the file lines up with `id_maps.json`.
//! Boolean attributes are written as 0/1 integers.

use std::io::Write;

use indexmap::IndexMap;

use crate::graph::KnowledgeGraph;
use crate::model::*;
use crate::Result;

const HEADER: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Domain {
    Node,
    Edge,
}

impl Domain {
    fn as_str(&self) -> &'static str {
        match self {
            Domain::Node => "node",
            Domain::Edge => "edge",
        }
    }
}

/// Attribute keys in first-seen order, one table per domain:
/// name → (key id, attr.type). Key ids are numbered across both domains.
#[derive(Default)]
struct KeyRegistry {
    node: IndexMap<String, (String, &'static str)>,
    edge: IndexMap<String, (String, &'static str)>,
}

impl KeyRegistry {
    fn table(&self, domain: Domain) -> &IndexMap<String, (String, &'static str)> {
        match domain {
            Domain::Node => &self.node,
            Domain::Edge => &self.edge,
        }
    }

    fn observe(&mut self, domain: Domain, props: &PropertyMap) {
        for (name, value) in props {
            if self.table(domain).contains_key(name.as_str()) {
                continue;
            }
            let id = format!("d{}", self.node.len() + self.edge.len());
            let table = match domain {
                Domain::Node => &mut self.node,
                Domain::Edge => &mut self.edge,
            };
            table.insert(name.clone(), (id, value.type_name()));
        }
    }

    fn id(&self, domain: Domain, name: &str) -> Option<&str> {
        self.table(domain).get(name).map(|(id, _)| id.as_str())
    }

    /// (domain, name, key id, attr.type), node keys first.
    fn declarations(&self) -> impl Iterator<Item = (Domain, &str, &str, &'static str)> + '_ {
        let node = self.node.iter().map(|(n, (id, ty))| (Domain::Node, n.as_str(), id.as_str(), *ty));
        let edge = self.edge.iter().map(|(n, (id, ty))| (Domain::Edge, n.as_str(), id.as_str(), *ty));
        node.chain(edge)
    }
}

/// GraphML id of a node: `{node_type}:{key}`. Keys are only unique within
/// a type, so the bare key would collide across types.
pub fn node_id(node: &Node) -> String {
    format!("{}:{}", node.node_type(), node.key)
}

fn node_props(node: &Node) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("key".into(), Value::from(node.key.as_str()));
    props.extend(node.properties());
    coerce_bools(props)
}

fn edge_props(graph: &KnowledgeGraph, edge: &Edge) -> PropertyMap {
    let mut props = PropertyMap::new();
    props.insert("relation".into(), Value::from(edge.relation.as_str()));
    if let Some(attrs) = graph.edge_attrs(edge.id) {
        props.extend(attrs.properties());
    }
    coerce_bools(props)
}

fn coerce_bools(props: PropertyMap) -> PropertyMap {
    props.into_iter().map(|(k, v)| (k, v.bool_as_int())).collect()
}

/// Write the whole graph as GraphML.
pub fn write_graphml(graph: &KnowledgeGraph, writer: &mut dyn Write) -> Result<()> {
    let nodes: Vec<(&Node, PropertyMap)> = graph.all_nodes().map(|n| (n, node_props(n))).collect();
    let edges: Vec<(&Edge, PropertyMap)> = graph
        .edges()
        .iter()
        .map(|e| (e, edge_props(graph, e)))
        .collect();

    let mut registry = KeyRegistry::default();
    for (_, props) in &nodes {
        registry.observe(Domain::Node, props);
    }
    for (_, props) in &edges {
        registry.observe(Domain::Edge, props);
    }

    writeln!(writer, "{HEADER}")?;
    for (domain, name, id, ty) in registry.declarations() {
        writeln!(
            writer,
            "  <key id=\"{}\" for=\"{}\" attr.name=\"{}\" attr.type=\"{}\" />",
            id,
            domain.as_str(),
            escape(name),
            ty
        )?;
    }
    writeln!(writer, "  <graph edgedefault=\"directed\">")?;

    for (node, props) in &nodes {
        writeln!(writer, "    <node id=\"{}\">", escape(&node_id(node)))?;
        write_data(writer, &registry, Domain::Node, props)?;
        writeln!(writer, "    </node>")?;
    }

    for (edge, props) in &edges {
        let (Some(src), Some(dst)) = (graph.get_node(edge.src), graph.get_node(edge.dst)) else {
            continue;
        };
        writeln!(
            writer,
            "    <edge source=\"{}\" target=\"{}\" id=\"{}\">",
            escape(&node_id(src)),
            escape(&node_id(dst)),
            edge.id
        )?;
        write_data(writer, &registry, Domain::Edge, props)?;
        writeln!(writer, "    </edge>")?;
    }

    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

fn write_data(
    writer: &mut dyn Write,
    registry: &KeyRegistry,
    domain: Domain,
    props: &PropertyMap,
) -> Result<()> {
    for (name, value) in props {
        if let Some(id) = registry.id(domain, name) {
            writeln!(writer, "      <data key=\"{}\">{}</data>", id, escape(&value.to_string()))?;
        }
    }
    Ok(())
}

/// XML-escape text and attribute content.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("A & B <x> \"q\" 'a'"), "A &amp; B &lt;x&gt; &quot;q&quot; &apos;a&apos;");
        assert_eq!(escape("China -> Germany"), "China -&gt; Germany");
    }

    #[test]
    fn test_bools_written_as_ints() {
        let mut g = KnowledgeGraph::new();
        let s = g.upsert_node("SUP-0001", "Acme", NodeAttrs::Supplier(SupplierAttrs::default()));
        let c = g.upsert_node("CMP-0001", "RES-1", NodeAttrs::Component(ComponentAttrs::default()));
        g.add_edge(
            Relation::Supplies,
            s,
            c,
            Some(EdgeAttrs::Supplies { is_primary: true, unit_price_usd: 12.5 }),
        );

        let mut buf = Vec::new();
        write_graphml(&g, &mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.contains("attr.name=\"is_primary\" attr.type=\"long\""));
        assert!(!xml.contains("boolean"));
        assert!(xml.contains("<edge source=\"supplier:SUP-0001\" target=\"component:CMP-0001\" id=\"0\">"));
        assert!(xml.contains(">supplies</data>"));
        assert!(xml.contains(">12.5</data>"));
        assert_eq!(xml.matches("<node id=").count(), 2);
    }

    #[test]
    fn test_node_and_edge_keys_are_separate() {
        let mut registry = KeyRegistry::default();
        let mut props = PropertyMap::new();
        props.insert("label".into(), Value::from("x"));
        registry.observe(Domain::Node, &props);
        registry.observe(Domain::Edge, &props);
        assert_eq!(registry.id(Domain::Node, "label"), Some("d0"));
        assert_eq!(registry.id(Domain::Edge, "label"), Some("d1"));
        assert_eq!(registry.id(Domain::Edge, "missing"), None);
    }

    #[test]
    fn test_same_key_in_two_types_gets_distinct_ids() {
        let mut g = KnowledgeGraph::new();
        let s = g.upsert_node("X-1", "Acme", NodeAttrs::Supplier(SupplierAttrs::default()));
        let k = g.upsert_node("X-1", "X-1", NodeAttrs::Contract(ContractAttrs::default()));
        g.add_edge(Relation::SignedWith, k, s, None);

        let mut buf = Vec::new();
        write_graphml(&g, &mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();

        assert!(xml.contains("<node id=\"supplier:X-1\">"));
        assert!(xml.contains("<node id=\"contract:X-1\">"));
        assert!(xml.contains("<edge source=\"contract:X-1\" target=\"supplier:X-1\" id=\"0\">"));
        assert_eq!(xml.matches(">X-1</data>").count(), 3);
    }
}
