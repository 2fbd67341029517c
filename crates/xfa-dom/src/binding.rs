//! Template, form and data associations
//!
//! A form node points back at the template node it was instantiated from
//! through the aux slot. A data node keeps the list of form nodes it backs,
//! and each of those form nodes points at the data node. Both directions
//! are updated together.

use tracing::{trace, warn};

use crate::document::Document;
use crate::element::PacketType;
use crate::error::{DomError, DomResult};
use crate::node::Binding;
use crate::object::ObjectFlags;
use crate::NodeId;

impl Document {
    // ========================================================================
    // Aux cross references
    // ========================================================================

    /// Template node a form node was instantiated from
    pub fn template_node(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if node.packet() == PacketType::Datasets {
            return None;
        }
        node.aux.filter(|&aux| self.contains(aux))
    }

    pub fn set_template_node(&mut self, id: NodeId, template: Option<NodeId>) -> DomResult<()> {
        if let Some(template) = template {
            self.live(template)?;
        }
        self.live_mut(id)?.aux = template;
        self.refresh_name_hash(id);
        Ok(())
    }

    /// Schema node describing a data node
    pub fn data_description_node(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if node.packet() != PacketType::Datasets {
            return None;
        }
        node.aux.filter(|&aux| self.contains(aux))
    }

    pub fn set_data_description_node(&mut self, id: NodeId, description: Option<NodeId>) -> DomResult<()> {
        if let Some(description) = description {
            self.live(description)?;
        }
        self.live_mut(id)?.aux = description;
        Ok(())
    }

    /// Every form node instantiated from `template`, in slot order
    pub fn form_nodes_of(&self, template: NodeId) -> Vec<NodeId> {
        self.tree()
            .iter()
            .filter(|(_, node)| node.packet() == PacketType::Form && node.aux == Some(template))
            .map(|(id, _)| id)
            .collect()
    }

    // ========================================================================
    // Data binding
    // ========================================================================

    /// Data node a form node is bound to
    pub fn bind_data(&self, form: NodeId) -> Option<NodeId> {
        self.node(form)?.bound_data().filter(|&data| self.contains(data))
    }

    /// Bind `form` to `data`, or unbind it with `None`
    pub fn set_bind_data(&mut self, form: NodeId, data: Option<NodeId>) -> DomResult<()> {
        match data {
            Some(data) => {
                if self.bind_data(form) == Some(data) {
                    return Ok(());
                }
                self.add_bind_item(data, form)
            }
            None => match self.live(form)?.bound_data() {
                Some(old) => self.remove_bind_item(old, form),
                None => Ok(()),
            },
        }
    }

    /// Register `form` as backed by `data`.
    ///
    /// A form node already bound elsewhere is moved over. Registering the
    /// same form node twice fails and leaves the list unchanged.
    pub fn add_bind_item(&mut self, data: NodeId, form: NodeId) -> DomResult<()> {
        self.live(data)?;
        let previous = self.live(form)?.bound_data();
        if self.has_bind_item(data, form) {
            warn!(?data, ?form, "duplicate bind item");
            return Err(DomError::DuplicateBinding { data, form });
        }
        if let Some(previous) = previous {
            self.detach_form(previous, form);
        }

        let node = self.live_mut(data)?;
        match &mut node.binding {
            Binding::FormItems(forms) => forms.push(form),
            binding => *binding = Binding::FormItems(vec![form]),
        }
        self.live_mut(form)?.binding = Binding::Data(data);
        self.update_bind_flag(data);
        trace!(?data, ?form, "bind item added");
        Ok(())
    }

    pub fn remove_bind_item(&mut self, data: NodeId, form: NodeId) -> DomResult<()> {
        self.live(data)?;
        if !self.has_bind_item(data, form) {
            return Err(DomError::NotBound { data, form });
        }
        self.detach_form(data, form);
        if let Some(node) = self.tree_mut().get_mut(form) {
            if node.binding == Binding::Data(data) {
                node.binding = Binding::None;
            }
        }
        Ok(())
    }

    /// Form nodes backed by `data`, in registration order
    pub fn bind_items(&self, data: NodeId) -> &[NodeId] {
        self.node(data).map_or(&[], |node| node.bound_forms())
    }

    pub fn has_bind_item(&self, data: NodeId, form: NodeId) -> bool {
        self.bind_items(data).contains(&form)
    }

    fn detach_form(&mut self, data: NodeId, form: NodeId) {
        let Some(node) = self.tree_mut().get_mut(data) else {
            return;
        };
        if let Binding::FormItems(forms) = &mut node.binding {
            forms.retain(|&f| f != form);
            if forms.is_empty() {
                node.binding = Binding::None;
            }
        }
        self.update_bind_flag(data);
    }

    fn update_bind_flag(&mut self, data: NodeId) {
        if let Some(node) = self.tree_mut().get_mut(data) {
            if node.bound_forms().len() > 1 {
                node.flags.insert(ObjectFlags::BIND_FORM_ITEMS);
            } else {
                node.flags.remove(ObjectFlags::BIND_FORM_ITEMS);
            }
        }
    }

    /// Dissolve every binding `id` takes part in
    pub(crate) fn release_bindings(&mut self, id: NodeId) {
        let Some(node) = self.tree_mut().get_mut(id) else {
            return;
        };
        match std::mem::take(&mut node.binding) {
            Binding::None => {}
            Binding::Data(data) => self.detach_form(data, id),
            Binding::FormItems(forms) => {
                node.flags.remove(ObjectFlags::BIND_FORM_ITEMS);
                for form in forms {
                    if let Some(form_node) = self.tree_mut().get_mut(form) {
                        if form_node.binding == Binding::Data(id) {
                            form_node.binding = Binding::None;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn triple(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let template = doc.create_named_node(ElementKind::Field, PacketType::Template, "amount");
        let form = doc.clone_template_to_form(template, false).unwrap();
        let data = doc.create_named_node(ElementKind::DataValue, PacketType::Datasets, "amount");
        (template, form, data)
    }

    #[test]
    fn test_duplicate_bind_item_rejected() {
        let mut doc = Document::new();
        let (_, form, data) = triple(&mut doc);

        doc.add_bind_item(data, form).unwrap();
        assert_eq!(doc.add_bind_item(data, form), Err(DomError::DuplicateBinding { data, form }));
        assert_eq!(doc.bind_items(data), &[form]);
        assert_eq!(doc.bind_data(form), Some(data));
    }

    #[test]
    fn test_bind_form_items_flag_tracks_multiplicity() {
        let mut doc = Document::new();
        let (template, first, data) = triple(&mut doc);
        let second = doc.clone_template_to_form(template, false).unwrap();

        doc.add_bind_item(data, first).unwrap();
        assert!(!doc.has_flag(data, ObjectFlags::BIND_FORM_ITEMS));
        doc.add_bind_item(data, second).unwrap();
        assert!(doc.has_flag(data, ObjectFlags::BIND_FORM_ITEMS));
        doc.remove_bind_item(data, first).unwrap();
        assert!(!doc.has_flag(data, ObjectFlags::BIND_FORM_ITEMS));
        assert_eq!(doc.bind_data(first), None);
    }

    #[test]
    fn test_rebinding_moves_form() {
        let mut doc = Document::new();
        let (_, form, data) = triple(&mut doc);
        let other = doc.create_named_node(ElementKind::DataValue, PacketType::Datasets, "amount");

        doc.set_bind_data(form, Some(data)).unwrap();
        doc.set_bind_data(form, Some(other)).unwrap();
        assert!(doc.bind_items(data).is_empty());
        assert_eq!(doc.bind_items(other), &[form]);

        doc.set_bind_data(form, None).unwrap();
        assert!(doc.bind_items(other).is_empty());
        assert_eq!(doc.bind_data(form), None);
    }

    #[test]
    fn test_destroying_data_unbinds_forms() {
        let mut doc = Document::new();
        let (template, form, data) = triple(&mut doc);
        doc.add_bind_item(data, form).unwrap();

        doc.destroy_node(data).unwrap();
        assert_eq!(doc.bind_data(form), None);
        assert_eq!(doc.template_node(form), Some(template));
        assert_eq!(doc.form_nodes_of(template), vec![form]);
    }
}
