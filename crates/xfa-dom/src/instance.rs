//! Instance management for repeated subforms
//!
//! A repeated subform is represented in the form packet by an instance
//! manager node named `_<name>`, followed by the live instances as its
//! immediate same-named siblings. The manager's aux slot points at the
//! template subform that new instances are cloned from; its `occur` child
//! bounds the instance count.

use tracing::{debug, warn};

use crate::attribute::{AttrEnum, Attribute};
use crate::document::Document;
use crate::element::{ElementKind, PacketType};
use crate::error::{DomError, DomResult};
use crate::hash::name_hash;
use crate::object::ObjectFlags;
use crate::NodeId;

/// Occurrence bounds of a repeated subform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurBounds {
    pub min: usize,
    /// `None` when unbounded (`max="-1"`)
    pub max: Option<usize>,
    pub initial: usize,
}

impl Default for OccurBounds {
    fn default() -> Self {
        Self { min: 1, max: Some(1), initial: 1 }
    }
}

impl OccurBounds {
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    fn violation(&self, requested: usize) -> DomError {
        DomError::OccurrenceViolation { requested, min: self.min, max: self.max }
    }
}

impl Document {
    /// Create `_<name>` under `form_parent` to manage instances of
    /// `template`. No instances are created.
    pub fn create_instance_manager(&mut self, form_parent: NodeId, template: NodeId) -> DomResult<NodeId> {
        self.live(form_parent)?;
        self.live(template)?;
        let manager_name = format!("_{}", self.name(template));

        let manager = self.create_named_node(ElementKind::InstanceManager, PacketType::Form, &manager_name);
        self.set_template_node(manager, Some(template))?;
        if let Some(occur) = self.first_child_by_class(template, ElementKind::Occur) {
            let occur_form = self.clone_template_to_form(occur, false)?;
            self.append_child(manager, occur_form)?;
        }
        self.append_child(form_parent, manager)?;
        debug!(?manager, name = %manager_name, "instance manager created");
        Ok(manager)
    }

    fn check_manager(&self, manager: NodeId) -> DomResult<()> {
        if self.live(manager)?.element() != ElementKind::InstanceManager {
            return Err(DomError::NotInstanceManager(manager));
        }
        Ok(())
    }

    /// Instance manager governing a subform instance
    pub fn instance_manager_of(&self, instance: NodeId) -> Option<NodeId> {
        let name = self.name(instance);
        if name.is_empty() {
            return None;
        }
        let wanted = name_hash(&format!("_{name}"));
        let parent = self.parent(instance)?;
        let index = self.tree().child_index(instance)?;
        self.children(parent)[..index]
            .iter()
            .rev()
            .copied()
            .find(|&sibling| {
                self.element_of(sibling) == Some(ElementKind::InstanceManager)
                    && self.name_hash(sibling) == wanted
            })
    }

    /// Live instances of `manager`, in document order
    pub fn instances(&self, manager: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(stripped) = self.name(manager).strip_prefix('_') else {
            return out;
        };
        let wanted = name_hash(stripped);
        if wanted == 0 {
            return out;
        }
        let Some(parent) = self.parent(manager) else {
            return out;
        };
        let Some(index) = self.tree().child_index(manager) else {
            return out;
        };
        for &sibling in &self.children(parent)[index + 1..] {
            match self.element_of(sibling) {
                Some(ElementKind::InstanceManager) => break,
                Some(element) if element.is_repeatable() => {
                    if self.name_hash(sibling) != wanted {
                        break;
                    }
                    out.push(sibling);
                }
                _ => continue,
            }
        }
        out
    }

    pub fn instance_count(&self, manager: NodeId) -> usize {
        self.instances(manager).len()
    }

    pub fn instance(&self, manager: NodeId, index: usize) -> Option<NodeId> {
        self.instances(manager).get(index).copied()
    }

    /// Position of `instance` among its manager's instances
    pub fn instance_index(&self, instance: NodeId) -> Option<usize> {
        let manager = self.instance_manager_of(instance)?;
        self.instances(manager).iter().position(|&i| i == instance)
    }

    pub fn occur_node(&self, manager: NodeId) -> Option<NodeId> {
        self.first_child_by_class(manager, ElementKind::Occur)
    }

    /// Occurrence bounds; defaults to exactly one instance without an occur node
    pub fn occur_bounds(&self, manager: NodeId) -> OccurBounds {
        let Some(occur) = self.occur_node(manager) else {
            return OccurBounds::default();
        };
        let min = self.integer(occur, Attribute::Min).max(0) as usize;
        let max = match self.integer(occur, Attribute::Max) {
            value if value < 0 => None,
            value => Some(value as usize),
        };
        let initial = self.integer(occur, Attribute::Initial).max(0) as usize;
        OccurBounds { min, max, initial }
    }

    // ========================================================================
    // Instance count mutation
    // ========================================================================

    /// Grow or shrink to exactly `count` instances.
    ///
    /// Shrinking removes trailing instances; growing appends new ones.
    pub fn set_instances(&mut self, manager: NodeId, count: usize) -> DomResult<()> {
        self.check_manager(manager)?;
        self.check_occurrence(manager, count)?;

        let mut current = self.instance_count(manager);
        while current > count {
            current -= 1;
            if let Some(last) = self.instance(manager, current) {
                self.remove_instance_node(last)?;
            }
        }
        while current < count {
            self.create_instance(manager, current)?;
            current += 1;
        }
        debug!(?manager, count, "instance count set");
        Ok(())
    }

    /// Append one instance
    pub fn add_instance(&mut self, manager: NodeId) -> DomResult<NodeId> {
        self.check_manager(manager)?;
        let count = self.instance_count(manager);
        self.check_occurrence(manager, count + 1)?;
        self.create_instance(manager, count)
    }

    /// Insert one instance at `index` (`index == count` appends)
    pub fn insert_instance(&mut self, manager: NodeId, index: usize) -> DomResult<NodeId> {
        self.check_manager(manager)?;
        let count = self.instance_count(manager);
        if index > count {
            return Err(DomError::InstanceOutOfRange { index, count });
        }
        self.check_occurrence(manager, count + 1)?;
        self.create_instance(manager, index)
    }

    pub fn remove_instance(&mut self, manager: NodeId, index: usize) -> DomResult<()> {
        self.check_manager(manager)?;
        let instances = self.instances(manager);
        let count = instances.len();
        let Some(&instance) = instances.get(index) else {
            return Err(DomError::InstanceOutOfRange { index, count });
        };
        self.check_occurrence(manager, count - 1)?;
        self.remove_instance_node(instance)
    }

    /// Move the instance at `from` so that it ends up at position `to`.
    ///
    /// All other instances keep their relative order.
    pub fn move_instance(&mut self, manager: NodeId, to: usize, from: usize) -> DomResult<()> {
        self.check_manager(manager)?;
        let instances = self.instances(manager);
        let count = instances.len();
        for index in [to, from] {
            if index >= count {
                return Err(DomError::InstanceOutOfRange { index, count });
            }
        }
        if to == from {
            return Ok(());
        }

        let moving = instances[from];
        let Some(parent) = self.parent(manager) else {
            return Err(DomError::NotInstanceManager(manager));
        };
        self.remove_child(parent, moving, false)?;
        let remaining: Vec<NodeId> = instances.into_iter().filter(|&i| i != moving).collect();
        match remaining.get(to) {
            Some(&before) => self.insert_child(parent, moving, Some(before))?,
            None => {
                let anchor = remaining.last().copied().unwrap_or(manager);
                let position = self.tree().child_index(anchor).map_or(0, |i| i + 1);
                self.insert_child_at(parent, position, moving)?;
            }
        }
        debug!(?manager, from, to, "instance moved");
        Ok(())
    }

    fn check_occurrence(&self, manager: NodeId, requested: usize) -> DomResult<()> {
        if !self.config().enforce_occurrence {
            return Ok(());
        }
        let bounds = self.occur_bounds(manager);
        if bounds.contains(requested) {
            Ok(())
        } else {
            warn!(?manager, requested, ?bounds, "instance count outside occurrence bounds");
            Err(bounds.violation(requested))
        }
    }

    fn create_instance(&mut self, manager: NodeId, index: usize) -> DomResult<NodeId> {
        let template = self
            .template_node(manager)
            .ok_or(DomError::MissingInstanceTemplate(manager))?;
        let parent = self.parent(manager).ok_or(DomError::NotInstanceManager(manager))?;
        let instances = self.instances(manager);

        let instance = self.clone_template_to_form(template, true)?;
        let displaced = match instances.get(index) {
            Some(&before) => {
                self.insert_child(parent, instance, Some(before))?;
                self.bind_data(before)
            }
            None => {
                let anchor = instances.last().copied().unwrap_or(manager);
                let position = self.tree().child_index(anchor).map_or(0, |i| i + 1);
                self.insert_child_at(parent, position, instance)?;
                None
            }
        };
        self.bind_instance(instance, displaced)?;
        Ok(instance)
    }

    /// Detach an instance, dissolve its data bindings, drop data nodes no
    /// longer backing any form node, then destroy the instance subtree
    fn remove_instance_node(&mut self, instance: NodeId) -> DomResult<()> {
        if let Some(parent) = self.parent(instance) {
            self.remove_child(parent, instance, true)?;
        }

        let mut orphaned = Vec::new();
        for form in self.tree().descendants(instance) {
            if let Some(data) = self.bind_data(form) {
                self.remove_bind_item(data, form)?;
                orphaned.push(data);
            }
        }
        for data in orphaned {
            if self.contains(data) && self.bind_items(data).is_empty() {
                self.destroy_node(data)?;
            }
        }
        self.destroy_node(instance)
    }

    // ========================================================================
    // Data binding of new instances
    // ========================================================================

    /// Bind a new instance under the nearest bound ancestor's data.
    ///
    /// An instance inserted in front of a bound one gets a fresh data group
    /// placed in front of the displaced instance's group.
    fn bind_instance(&mut self, instance: NodeId, displaced: Option<NodeId>) -> DomResult<()> {
        let Some(scope) = self.nearest_bound_scope(instance) else {
            return Ok(());
        };
        let displaced = displaced.filter(|&data| {
            self.parent(data) == Some(scope)
                && self.config().create_data_on_bind
                && self.name_hash(instance) != 0
                && !self.has_flag(instance, ObjectFlags::SKIP_DATA_BINDING)
                && self.bind_match(instance) != AttrEnum::None
        });
        if let Some(displaced) = displaced {
            let name = self.name(instance).to_string();
            let data = self.create_named_node(ElementKind::DataGroup, PacketType::Datasets, &name);
            self.insert_child(scope, data, Some(displaced))?;
            self.add_bind_item(data, instance)?;
            return self.bind_children(instance, data);
        }
        let rank = self.instance_index(instance).unwrap_or(0);
        self.bind_form_subtree(instance, scope, rank)
    }

    fn nearest_bound_scope(&self, form: NodeId) -> Option<NodeId> {
        let mut current = self.parent(form);
        while let Some(ancestor) = current {
            if let Some(data) = self.bind_data(ancestor) {
                return Some(data);
            }
            current = self.parent(ancestor);
        }
        self.data_root()
    }

    fn bind_form_subtree(&mut self, form: NodeId, scope: NodeId, rank: usize) -> DomResult<()> {
        if self.has_flag(form, ObjectFlags::SKIP_DATA_BINDING) {
            return Ok(());
        }
        let data_element = match self.element_of(form) {
            Some(ElementKind::Subform | ElementKind::SubformSet | ElementKind::ExclGroup) => {
                Some(ElementKind::DataGroup)
            }
            Some(ElementKind::Field) => Some(ElementKind::DataValue),
            _ => None,
        };
        let Some(data_element) = data_element else {
            return Ok(());
        };

        let mut child_scope = scope;
        if self.name_hash(form) != 0 && self.bind_match(form) != AttrEnum::None {
            if let Some(data) = self.find_or_create_data(scope, form, data_element, rank)? {
                if self.bind_data(form) != Some(data) {
                    self.add_bind_item(data, form)?;
                }
                child_scope = data;
            }
        }

        if data_element == ElementKind::DataGroup {
            self.bind_children(form, child_scope)?;
        }
        Ok(())
    }

    fn bind_children(&mut self, form: NodeId, scope: NodeId) -> DomResult<()> {
        let children = self.children(form).to_vec();
        for child in children {
            if self.element_of(child) == Some(ElementKind::InstanceManager) {
                continue;
            }
            let rank = self.same_name_index(child);
            self.bind_form_subtree(child, scope, rank)?;
        }
        Ok(())
    }

    fn bind_match(&self, form: NodeId) -> AttrEnum {
        self.template_node(form)
            .and_then(|template| self.first_child_by_class(template, ElementKind::Bind))
            .and_then(|bind| self.enum_value(bind, Attribute::Match))
            .unwrap_or(AttrEnum::Once)
    }

    fn find_or_create_data(
        &mut self,
        scope: NodeId,
        form: NodeId,
        element: ElementKind,
        rank: usize,
    ) -> DomResult<Option<NodeId>> {
        let hash = self.name_hash(form);
        let existing = self
            .children(scope)
            .iter()
            .copied()
            .filter(|&child| self.element_of(child) == Some(element) && self.name_hash(child) == hash)
            .nth(rank);
        if existing.is_some() || !self.config().create_data_on_bind {
            return Ok(existing);
        }

        let name = self.name(form).to_string();
        let data = self.create_named_node(element, PacketType::Datasets, &name);
        self.append_child(scope, data)?;
        Ok(Some(data))
    }
}
