//! Arena-allocated HTML tree.
//!
//! html5ever parses into this arena through [`super::tree_sink::ArenaSink`].
//! The history extractor only reads it: tag names, attributes, text and
//! parent/first-child/next-sibling links.

use html5ever::{LocalName, QualName};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Sentinel value for no node.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
    Doctype,
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena with its tree links.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
///
/// Nodes live in one vector; links are indices into it. Node 0 is always
/// the document.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: ArenaNodeId,
}

impl ArenaDom {
    /// Create a DOM holding only the document node.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: ArenaNodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(ArenaNodeData::Document));
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> ArenaNodeId {
        self.document
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Element { name, attrs }))
    }

    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Text(text)))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Comment(text)))
    }

    pub fn create_doctype(&mut self) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Doctype))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let last_child = self.last_child(parent);

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last_child;
            node.next_sibling = ArenaNodeId::NONE;
        }

        if let Some(last) = self.get_mut(last_child) {
            last.next_sibling = child;
        }

        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = child;
            }
            node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Unlink `target` from its parent and siblings.
    pub fn detach(&mut self, target: ArenaNodeId) {
        let Some((parent, prev, next)) = self
            .get(target)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = next;
        }

        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Append text, merging into a trailing text node when there is one.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last_child = self.last_child(parent);

        if let Some(last) = self.get_mut(last_child)
            && let ArenaNodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    /// Insert text before `sibling`, merging into a preceding text node.
    pub fn insert_text_before(&mut self, sibling: ArenaNodeId, text: &str) {
        let prev = self.get(sibling).map_or(ArenaNodeId::NONE, |n| n.prev_sibling);

        if let Some(node) = self.get_mut(prev)
            && let ArenaNodeData::Text(existing) = &mut node.data
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.insert_before(sibling, node);
    }

    pub fn first_child(&self, id: ArenaNodeId) -> ArenaNodeId {
        self.get(id).map_or(ArenaNodeId::NONE, |n| n.first_child)
    }

    fn last_child(&self, id: ArenaNodeId) -> ArenaNodeId {
        self.get(id).map_or(ArenaNodeId::NONE, |n| n.last_child)
    }

    pub fn next_sibling(&self, id: ArenaNodeId) -> ArenaNodeId {
        self.get(id).map_or(ArenaNodeId::NONE, |n| n.next_sibling)
    }

    pub fn parent(&self, id: ArenaNodeId) -> ArenaNodeId {
        self.get(id).map_or(ArenaNodeId::NONE, |n| n.parent)
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        ChildrenIter {
            dom: self,
            current: self.first_child(parent),
        }
    }

    /// Find the first node matching a predicate, depth-first in document order.
    pub fn find<F>(&self, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaDom, ArenaNodeId) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if predicate(self, id) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.dom.next_sibling(id);
        Some(id)
    }
}

/// Element and text accessors.
impl ArenaDom {
    /// Element's local name (tag).
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Check if node is an element with the given tag.
    pub fn is_tag(&self, id: ArenaNodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|name| name.as_ref() == tag)
    }

    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn is_text(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Text(_)))
    }

    /// Text of a text node.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Short human-readable description of a node for error messages.
    pub fn describe(&self, id: ArenaNodeId) -> String {
        match self.get(id).map(|n| &n.data) {
            None => "nothing".to_string(),
            Some(ArenaNodeData::Document) => "document".to_string(),
            Some(ArenaNodeData::Element { name, .. }) => format!("<{}>", name.local),
            Some(ArenaNodeData::Text(_)) => "text".to_string(),
            Some(ArenaNodeData::Comment(_)) => "comment".to_string(),
            Some(ArenaNodeData::Doctype) => "doctype".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use html5ever::ns;

    use super::*;

    fn qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    #[test]
    fn test_append_links_siblings() {
        let mut dom = ArenaDom::new();

        let tr = dom.create_element(qname("tr"), vec![]);
        let td1 = dom.create_element(qname("td"), vec![]);
        let td2 = dom.create_element(qname("td"), vec![]);

        dom.append(dom.document(), tr);
        dom.append(tr, td1);
        dom.append(tr, td2);

        assert_eq!(dom.first_child(tr), td1);
        assert_eq!(dom.next_sibling(td1), td2);
        assert!(dom.next_sibling(td2).is_none());
        assert_eq!(dom.parent(td2), tr);
        assert_eq!(dom.children(tr).collect::<Vec<_>>(), vec![td1, td2]);
    }

    #[test]
    fn test_detach_middle_child() {
        let mut dom = ArenaDom::new();

        let tr = dom.create_element(qname("tr"), vec![]);
        let cells: Vec<_> = (0..3)
            .map(|_| dom.create_element(qname("td"), vec![]))
            .collect();
        dom.append(dom.document(), tr);
        for &td in &cells {
            dom.append(tr, td);
        }

        dom.detach(cells[1]);

        assert_eq!(dom.children(tr).collect::<Vec<_>>(), vec![cells[0], cells[2]]);
        assert!(dom.parent(cells[1]).is_none());
    }

    #[test]
    fn test_text_merging() {
        let mut dom = ArenaDom::new();

        let label = dom.create_element(qname("label"), vec![]);
        dom.append(dom.document(), label);

        dom.append_text(label, "Forced ");
        dom.append_text(label, "Quick Sell");

        let children: Vec<_> = dom.children(label).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("Forced Quick Sell"));
    }

    #[test]
    fn test_insert_text_before_merges_backwards() {
        let mut dom = ArenaDom::new();

        let div = dom.create_element(qname("div"), vec![]);
        let table = dom.create_element(qname("table"), vec![]);
        dom.append(dom.document(), div);
        dom.append(div, table);

        dom.insert_text_before(table, "stray ");
        dom.insert_text_before(table, "text");

        let children: Vec<_> = dom.children(div).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(dom.text_content(children[0]), Some("stray text"));
        assert_eq!(children[1], table);
    }

    #[test]
    fn test_attr_and_tag() {
        let mut dom = ArenaDom::new();

        let a = dom.create_element(
            qname("a"),
            vec![Attribute {
                name: qname("name"),
                value: "History".to_string(),
            }],
        );
        dom.append(dom.document(), a);

        assert!(dom.is_tag(a, "a"));
        assert!(!dom.is_tag(a, "table"));
        assert_eq!(dom.get_attr(a, "name"), Some("History"));
        assert_eq!(dom.get_attr(a, "href"), None);
        assert_eq!(dom.describe(a), "<a>");
        assert_eq!(dom.describe(ArenaNodeId::NONE), "nothing");
    }
}
