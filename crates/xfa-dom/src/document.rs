//! Form document
//!
//! The [`Document`] owns the node arena and serializes every structural
//! mutation. All operations take node handles; a stale handle is reported
//! as [`DomError::StaleNode`] by mutators and as "absent" by queries.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::DocumentConfig;
use crate::element::{ElementKind, PacketType};
use crate::error::{DomError, DomResult};
use crate::hash::name_hash;
use crate::map_module::{MapKey, MapValue};
use crate::node::{Node, XmlHandle};
use crate::object::{ObjectFlags, ObjectType};
use crate::observer::{DocumentObserver, NoopObserver};
use crate::tree::NodeTree;
use crate::attribute::Attribute;
use crate::NodeId;

/// Relative position for [`Document::node_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeItem {
    Parent,
    FirstChild,
    NextSibling,
    PrevSibling,
}

/// A form document: node arena, configuration and observer
pub struct Document {
    tree: NodeTree,
    config: DocumentConfig,
    observer: Box<dyn DocumentObserver>,
    root: Option<NodeId>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with the default configuration
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            tree: NodeTree::with_capacity(config.initial_capacity),
            config,
            observer: Box::new(NoopObserver),
            root: None,
        }
    }

    /// Create a document that reports changes to `observer`
    pub fn with_observer(config: DocumentConfig, observer: impl DocumentObserver + 'static) -> Self {
        let mut doc = Self::with_config(config);
        doc.observer = Box::new(observer);
        doc
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DocumentConfig {
        &mut self.config
    }

    /// Document root (normally the `xfa` model node)
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) -> DomResult<()> {
        self.live(root)?;
        self.root = Some(root);
        Ok(())
    }

    /// Model node of a packet: the root itself or one of its children
    pub fn packet_root(&self, packet: PacketType) -> Option<NodeId> {
        let root = self.root?;
        let is_model = |id: NodeId| {
            self.tree
                .get(id)
                .is_some_and(|node| node.packet == packet && node.object_type.is_model_node())
        };
        if is_model(root) {
            return Some(root);
        }
        self.tree.children(root).iter().copied().find(|&child| is_model(child))
    }

    /// The `data` node under the datasets model
    pub fn data_root(&self) -> Option<NodeId> {
        let datasets = self.packet_root(PacketType::Datasets)?;
        self.first_child_by_class(datasets, ElementKind::Data)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.contains(id)
    }

    pub(crate) fn live(&self, id: NodeId) -> DomResult<&Node> {
        self.tree.get(id).ok_or(DomError::StaleNode(id))
    }

    pub(crate) fn live_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.tree.get_mut(id).ok_or(DomError::StaleNode(id))
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create a detached node with the element's default category
    pub fn create_node(&mut self, element: ElementKind, packet: PacketType) -> NodeId {
        self.create_node_with(
            element.default_object_type(),
            element,
            packet,
            ObjectFlags::INITIALIZED,
        )
    }

    pub fn create_node_with(
        &mut self,
        object_type: ObjectType,
        element: ElementKind,
        packet: PacketType,
        flags: ObjectFlags,
    ) -> NodeId {
        let id = self.tree.alloc(Node::new(object_type, element, packet, flags));
        trace!(?id, element = element.name(), packet = packet.name(), "node created");
        id
    }

    /// Create a detached node in the same packet as `node`
    pub fn create_same_packet_node(&mut self, node: NodeId, element: ElementKind) -> DomResult<NodeId> {
        let packet = self.live(node)?.packet;
        Ok(self.create_node(element, packet))
    }

    /// Create a detached node carrying a `name` attribute
    pub fn create_named_node(&mut self, element: ElementKind, packet: PacketType, name: &str) -> NodeId {
        let id = self.create_node(element, packet);
        if let Some(node) = self.tree.get_mut(id) {
            node.map_mut()
                .insert(MapKey::Attribute(Attribute::Name), MapValue::String(name.to_string()));
            node.name_hash = name_hash(name);
        }
        id
    }

    // ========================================================================
    // Structure
    // ========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.is_ancestor(ancestor, node)
    }

    /// Insert `child` before `before`, or at the tail when `before` is `None`.
    ///
    /// Fails without changing the tree if a handle is stale, `child` already
    /// has a parent, `before` is not a child of `parent`, or the insertion
    /// would create a cycle.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) -> DomResult<()> {
        let index = match before {
            None => self.live(parent)?.children.len(),
            Some(before) => {
                let position = self.live(parent)?.children.iter().position(|&c| c == before);
                match position {
                    Some(position) => position,
                    None => {
                        warn!(?parent, ?before, "insert before a node that is not a child");
                        return Err(DomError::NotAChild { parent, child: before });
                    }
                }
            }
        };
        self.insert_checked(parent, child, index)
    }

    /// Insert `child` at `index`, clamped to `[0, len]`
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) -> DomResult<()> {
        let len = self.live(parent)?.children.len();
        self.insert_checked(parent, child, index.min(len))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_child(parent, child, None)
    }

    fn insert_checked(&mut self, parent: NodeId, child: NodeId, index: usize) -> DomResult<()> {
        self.live(parent)?;
        if self.live(child)?.parent.is_some() {
            return Err(DomError::AlreadyAttached(child));
        }
        if self.tree.is_ancestor(child, parent) {
            warn!(?parent, ?child, "insertion would create a cycle");
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.tree.link(parent, child, index);
        self.live_mut(child)?.flags.remove(ObjectFlags::HAS_REMOVED);
        self.observer.child_added(parent, child);
        debug!(?parent, ?child, index, "child inserted");
        Ok(())
    }

    /// Detach `child` from `parent`, keeping its subtree intact
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId, notify: bool) -> DomResult<()> {
        self.live(parent)?;
        if self.live(child)?.parent != Some(parent) {
            warn!(?parent, ?child, "remove of a node that is not a child");
            return Err(DomError::NotAChild { parent, child });
        }

        self.tree.unlink(child);
        self.live_mut(child)?.flags.insert(ObjectFlags::HAS_REMOVED);
        if notify {
            self.observer.child_removed(parent, child);
        }
        debug!(?parent, ?child, "child removed");
        Ok(())
    }

    /// Detach `node` from whatever parent it has, if any
    pub fn detach(&mut self, node: NodeId) -> DomResult<()> {
        match self.live(node)?.parent {
            Some(parent) => self.remove_child(parent, node, true),
            None => Ok(()),
        }
    }

    /// Destroy `id` and its whole subtree.
    ///
    /// The node is detached first. Bindings touching any destroyed node are
    /// dissolved and owned markup handles are handed to the observer.
    pub fn destroy_node(&mut self, id: NodeId) -> DomResult<()> {
        self.live(id)?;
        self.detach(id)?;

        let doomed = self.tree.descendants(id);
        for &node in &doomed {
            self.release_bindings(node);
        }
        for &node in doomed.iter().rev() {
            if let Some(removed) = self.tree.free(node) {
                if let (Some(handle), true) = (removed.xml, removed.owns_xml()) {
                    self.observer.markup_released(node, handle);
                }
                self.observer.node_destroyed(node);
            }
        }
        debug!(?id, count = doomed.len(), "subtree destroyed");
        Ok(())
    }

    /// Copy `id` (and with `recursive`, its children in order) into a new
    /// detached node.
    ///
    /// The attribute store is copied entry by entry: owned blobs are
    /// duplicated, shared blobs alias. Linkage, bindings, the template link
    /// and the markup handle are not copied.
    pub fn clone_node(&mut self, id: NodeId, recursive: bool) -> DomResult<NodeId> {
        let source = self.live(id)?;
        let mut copy = Node::new(source.object_type, source.element, source.packet, ObjectFlags::INITIALIZED);
        copy.map = source.map.clone();
        let children = if recursive { source.children.clone() } else { Vec::new() };

        // the source may have inherited its name through the template link,
        // which the copy does not keep
        let clone = self.tree.alloc(copy);
        self.refresh_name_hash(clone);
        for child in children {
            let child_clone = self.clone_node(child, true)?;
            self.tree.link(clone, child_clone, usize::MAX);
        }
        trace!(source = ?id, ?clone, recursive, "node cloned");
        Ok(clone)
    }

    /// Instantiate a template node into the form packet.
    ///
    /// The copy links back to `template` and shares (does not own) its
    /// markup handle. No attributes are copied; unset reads on the form node
    /// fall through to the template.
    ///
    /// The form node inherits the template's name; renaming the template
    /// later rehashes every form node still linked to it.
    pub fn clone_template_to_form(&mut self, template: NodeId, recursive: bool) -> DomResult<NodeId> {
        let source = self.live(template)?;
        let mut copy = Node::new(source.object_type, source.element, PacketType::Form, ObjectFlags::INITIALIZED);
        copy.xml = source.xml;
        copy.aux = Some(template);
        let children = if recursive { source.children.clone() } else { Vec::new() };

        let form = self.tree.alloc(copy);
        self.refresh_name_hash(form);
        for child in children {
            let child_form = self.clone_template_to_form(child, true)?;
            self.tree.link(form, child_form, usize::MAX);
        }
        Ok(form)
    }

    // ========================================================================
    // Flags and markup
    // ========================================================================

    pub fn set_flag(&mut self, id: NodeId, flag: ObjectFlags, notify: bool) -> DomResult<()> {
        let node = self.live_mut(id)?;
        let old = node.flags;
        node.flags.insert(flag);
        let new = node.flags;
        if notify && old != new {
            self.observer.flag_changed(id, old, new);
        }
        Ok(())
    }

    pub fn clear_flag(&mut self, id: NodeId, flag: ObjectFlags) -> DomResult<()> {
        self.live_mut(id)?.flags.remove(flag);
        Ok(())
    }

    pub fn has_flag(&self, id: NodeId, flag: ObjectFlags) -> bool {
        self.tree.get(id).is_some_and(|node| node.flags.contains(flag))
    }

    /// Attach a markup handle; with `owns`, the node releases it on destruction
    pub fn set_xml_node(&mut self, id: NodeId, handle: Option<XmlHandle>, owns: bool) -> DomResult<()> {
        let node = self.live_mut(id)?;
        let previous = node.xml.take().filter(|_| node.owns_xml());
        node.xml = handle;
        if owns && handle.is_some() {
            node.flags.insert(ObjectFlags::OWN_XML_NODE);
        } else {
            node.flags.remove(ObjectFlags::OWN_XML_NODE);
        }
        if let Some(previous) = previous {
            if Some(previous) != handle {
                self.observer.markup_released(id, previous);
            }
        }
        Ok(())
    }

    pub fn xml_node(&self, id: NodeId) -> Option<XmlHandle> {
        self.tree.get(id)?.xml
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Relative node, optionally restricted to one category.
    ///
    /// With a filter, `Parent` walks up to the nearest matching ancestor and
    /// sibling/child lookups skip non-matching nodes.
    pub fn node_item(&self, id: NodeId, item: NodeItem, filter: Option<ObjectType>) -> Option<NodeId> {
        let matches = |candidate: &NodeId| {
            filter.is_none_or(|wanted| {
                self.tree.get(*candidate).is_some_and(|node| node.object_type == wanted)
            })
        };
        match item {
            NodeItem::Parent => {
                let mut current = self.tree.parent(id);
                while let Some(parent) = current {
                    if matches(&parent) {
                        return Some(parent);
                    }
                    current = self.tree.parent(parent);
                }
                None
            }
            NodeItem::FirstChild => self.tree.children(id).iter().copied().find(matches),
            NodeItem::NextSibling => {
                let parent = self.tree.parent(id)?;
                let index = self.tree.child_index(id)?;
                self.tree.children(parent)[index + 1..].iter().copied().find(matches)
            }
            NodeItem::PrevSibling => {
                let parent = self.tree.parent(id)?;
                let index = self.tree.child_index(id)?;
                self.tree.children(parent)[..index].iter().rev().copied().find(matches)
            }
        }
    }

    pub fn name_hash(&self, id: NodeId) -> u32 {
        self.tree.get(id).map_or(0, |node| node.name_hash)
    }

    /// First child whose name hashes to `hash`; anonymous nodes never match
    pub fn first_child_by_name(&self, parent: NodeId, hash: u32) -> Option<NodeId> {
        if hash == 0 {
            return None;
        }
        self.tree
            .children(parent)
            .iter()
            .copied()
            .find(|&child| self.name_hash(child) == hash)
    }

    pub fn first_child_by_name_str(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.first_child_by_name(parent, name_hash(name))
    }

    pub fn first_child_by_class(&self, parent: NodeId, element: ElementKind) -> Option<NodeId> {
        self.tree
            .children(parent)
            .iter()
            .copied()
            .find(|&child| self.element_of(child) == Some(element))
    }

    pub fn next_same_name_sibling(&self, id: NodeId) -> Option<NodeId> {
        let hash = self.name_hash(id);
        if hash == 0 {
            return None;
        }
        let parent = self.tree.parent(id)?;
        let index = self.tree.child_index(id)?;
        self.tree.children(parent)[index + 1..]
            .iter()
            .copied()
            .find(|&sibling| self.name_hash(sibling) == hash)
    }

    pub fn next_same_class_sibling(&self, id: NodeId) -> Option<NodeId> {
        let element = self.element_of(id)?;
        let parent = self.tree.parent(id)?;
        let index = self.tree.child_index(id)?;
        self.tree.children(parent)[index + 1..]
            .iter()
            .copied()
            .find(|&sibling| self.element_of(sibling) == Some(element))
    }

    /// Rank of `id` among its same-named siblings (0 for a root)
    pub fn same_name_index(&self, id: NodeId) -> usize {
        let hash = self.name_hash(id);
        self.rank_among_siblings(id, |doc, sibling| doc.name_hash(sibling) == hash)
    }

    /// Rank of `id` among its same-class siblings (0 for a root)
    pub fn same_class_index(&self, id: NodeId) -> usize {
        let element = self.element_of(id);
        self.rank_among_siblings(id, |doc, sibling| doc.element_of(sibling) == element)
    }

    fn rank_among_siblings(&self, id: NodeId, same: impl Fn(&Self, NodeId) -> bool) -> usize {
        let Some(parent) = self.tree.parent(id) else {
            return 0;
        };
        self.tree
            .children(parent)
            .iter()
            .take_while(|&&sibling| sibling != id)
            .filter(|&&sibling| same(self, sibling))
            .count()
    }

    /// Number of children, optionally of one element kind
    pub fn count_children(&self, id: NodeId, element: Option<ElementKind>) -> usize {
        self.tree
            .children(id)
            .iter()
            .filter(|&&child| element.is_none_or(|e| self.element_of(child) == Some(e)))
            .count()
    }

    /// `index`-th child, optionally counting only one element kind
    pub fn child(&self, id: NodeId, index: usize, element: Option<ElementKind>) -> Option<NodeId> {
        self.tree
            .children(id)
            .iter()
            .copied()
            .filter(|&child| element.is_none_or(|e| self.element_of(child) == Some(e)))
            .nth(index)
    }

    /// Model node of the packet `id` belongs to
    pub fn model_node(&self, id: NodeId) -> Option<NodeId> {
        let packet = self.tree.get(id)?.packet;
        let mut current = Some(id);
        while let Some(node) = current {
            let entry = self.tree.get(node)?;
            if entry.object_type.is_model_node() && entry.packet == packet {
                return Some(node);
            }
            current = entry.parent;
        }
        self.packet_root(packet)
    }

    pub fn element_of(&self, id: NodeId) -> Option<ElementKind> {
        self.tree.get(id).map(|node| node.element)
    }

    // ========================================================================
    // Map module
    // ========================================================================

    /// Store `value` under `key`, returning the replaced value
    pub fn set_map_value(
        &mut self,
        id: NodeId,
        key: MapKey,
        value: MapValue,
        notify: bool,
    ) -> DomResult<Option<MapValue>> {
        let renamed = key == MapKey::Attribute(Attribute::Name);
        let notified = notify.then(|| key.clone());
        let previous = self.live_mut(id)?.map_mut().insert(key, value);
        if renamed {
            self.refresh_name_hashes(id);
        }
        if let Some(key) = notified {
            self.observer.attribute_changed(id, &key);
        }
        Ok(previous)
    }

    /// Look up `key` locally, then (with `proto`) on the template node
    pub fn try_map_value(&self, id: NodeId, key: &MapKey, proto: bool) -> Option<&MapValue> {
        let node = self.tree.get(id)?;
        if let Some(value) = node.map().and_then(|map| map.get(key)) {
            return Some(value);
        }
        if !proto || !self.config.inherit_from_template {
            return None;
        }
        self.tree.get(node.aux?)?.map()?.get(key)
    }

    pub fn has_map_key(&self, id: NodeId, key: &MapKey, proto: bool) -> bool {
        self.try_map_value(id, key, proto).is_some()
    }

    pub fn remove_map_key(&mut self, id: NodeId, key: &MapKey, notify: bool) -> DomResult<Option<MapValue>> {
        let node = self.live_mut(id)?;
        let removed = node.map.as_mut().and_then(|map| map.remove(key));
        if *key == MapKey::Attribute(Attribute::Name) {
            self.refresh_name_hashes(id);
        }
        if notify && removed.is_some() {
            self.observer.attribute_changed(id, key);
        }
        Ok(removed)
    }

    /// Drop the whole attribute store of `id`
    pub fn remove_all_map_keys(&mut self, id: NodeId) -> DomResult<()> {
        self.live_mut(id)?.map = None;
        self.refresh_name_hashes(id);
        Ok(())
    }

    /// Copy every entry of `src` into `dst`; `use_src` lets `src` win conflicts
    pub fn merge_all_data(&mut self, src: NodeId, dst: NodeId, use_src: bool) -> DomResult<()> {
        let Some(source) = self.live(src)?.map.clone() else {
            self.live(dst)?;
            return Ok(());
        };
        self.live_mut(dst)?.map_mut().merge_from(&source, use_src);
        self.refresh_name_hashes(dst);
        Ok(())
    }

    /// Move the entry under `key` from `src` to `dst`.
    ///
    /// With `recursive`, children are paired positionally and the entry is
    /// moved between each pair as well.
    pub fn move_map_entry(&mut self, src: NodeId, dst: NodeId, key: &MapKey, recursive: bool) -> DomResult<()> {
        let value = self.live_mut(src)?.map.as_mut().and_then(|map| map.remove(key));
        self.live(dst)?;
        if let Some(value) = value {
            self.live_mut(dst)?.map_mut().insert(key.clone(), value);
        }
        if *key == MapKey::Attribute(Attribute::Name) {
            self.refresh_name_hashes(src);
            self.refresh_name_hashes(dst);
        }
        if recursive {
            let pairs: Vec<(NodeId, NodeId)> = self
                .tree
                .children(src)
                .iter()
                .copied()
                .zip(self.tree.children(dst).iter().copied())
                .collect();
            for (src_child, dst_child) in pairs {
                self.move_map_entry(src_child, dst_child, key, true)?;
            }
        }
        Ok(())
    }

    /// Recompute the name hash from the (possibly inherited) name
    pub(crate) fn refresh_name_hash(&mut self, id: NodeId) {
        let hash = self
            .try_map_value(id, &MapKey::Attribute(Attribute::Name), true)
            .and_then(MapValue::as_str)
            .map_or(0, name_hash);
        if let Some(node) = self.tree.get_mut(id) {
            node.name_hash = hash;
        }
    }

    /// Rehash `id` and, for a template node, every form node inheriting its name
    fn refresh_name_hashes(&mut self, id: NodeId) {
        self.refresh_name_hash(id);
        if self.tree.get(id).is_some_and(|node| node.packet() == PacketType::Template) {
            for form in self.form_nodes_of(id) {
                self.refresh_name_hash(form);
            }
        }
    }

        pub(crate) fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }
}
