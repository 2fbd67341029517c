//! Typed attribute API
//!
//! Reads resolve in three steps: the node's own store, then its template
//! node's store (one hop, when inheritance applies), then the element's
//! attribute-table default (when `use_default` is set).

use crate::attribute::{self, AttrDefault, AttrEnum, Attribute, AttributeType, MeasureUnit, Measurement};
use crate::document::{Document, NodeItem};
use crate::element::ElementKind;
use crate::error::{DomError, DomResult};
use crate::map_module::{Blob, MapKey, MapValue, Scalar, UserKey};
use crate::NodeId;

impl Document {
    fn table_default(&self, id: NodeId, attr: Attribute) -> Option<AttrDefault> {
        let element = self.element_of(id)?;
        attribute::lookup(element, attr).map(|data| data.default)
    }

    fn try_scalar(&self, id: NodeId, attr: Attribute) -> Option<Scalar> {
        self.try_map_value(id, &MapKey::Attribute(attr), true)
            .and_then(MapValue::as_scalar)
    }

    fn set_scalar(&mut self, id: NodeId, attr: Attribute, value: Scalar, notify: bool) -> DomResult<()> {
        self.set_map_value(id, MapKey::Attribute(attr), MapValue::Scalar(value), notify)?;
        Ok(())
    }

    // ========================================================================
    // CData
    // ========================================================================

    pub fn set_cdata(&mut self, id: NodeId, attr: Attribute, value: &str, notify: bool) -> DomResult<()> {
        self.set_map_value(id, MapKey::Attribute(attr), MapValue::String(value.to_string()), notify)?;
        Ok(())
    }

    pub fn try_cdata(&self, id: NodeId, attr: Attribute, use_default: bool, proto: bool) -> Option<&str> {
        if let Some(value) = self
            .try_map_value(id, &MapKey::Attribute(attr), proto)
            .and_then(MapValue::as_str)
        {
            return Some(value);
        }
        match self.table_default(id, attr).filter(|_| use_default)? {
            AttrDefault::CData(value) => Some(value),
            _ => None,
        }
    }

    /// Character data with defaults; empty when unset
    pub fn cdata(&self, id: NodeId, attr: Attribute) -> &str {
        self.try_cdata(id, attr, true, true).unwrap_or("")
    }

    /// The node's (possibly inherited) name
    pub fn name(&self, id: NodeId) -> &str {
        self.cdata(id, Attribute::Name)
    }

    // ========================================================================
    // Boolean / Integer / Enum / Measure
    // ========================================================================

    pub fn set_boolean(&mut self, id: NodeId, attr: Attribute, value: bool, notify: bool) -> DomResult<()> {
        self.set_scalar(id, attr, Scalar::Boolean(value), notify)
    }

    pub fn try_boolean(&self, id: NodeId, attr: Attribute, use_default: bool) -> Option<bool> {
        if let Some(Scalar::Boolean(value)) = self.try_scalar(id, attr) {
            return Some(value);
        }
        match self.table_default(id, attr).filter(|_| use_default)? {
            AttrDefault::Boolean(value) => Some(value),
            _ => None,
        }
    }

    pub fn boolean(&self, id: NodeId, attr: Attribute) -> bool {
        self.try_boolean(id, attr, true).unwrap_or(false)
    }

    pub fn set_integer(&mut self, id: NodeId, attr: Attribute, value: i32, notify: bool) -> DomResult<()> {
        self.set_scalar(id, attr, Scalar::Integer(value), notify)
    }

    pub fn try_integer(&self, id: NodeId, attr: Attribute, use_default: bool) -> Option<i32> {
        if let Some(Scalar::Integer(value)) = self.try_scalar(id, attr) {
            return Some(value);
        }
        match self.table_default(id, attr).filter(|_| use_default)? {
            AttrDefault::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, id: NodeId, attr: Attribute) -> i32 {
        self.try_integer(id, attr, true).unwrap_or(0)
    }

    /// Store an enumerated value; it must be one the attribute permits
    pub fn set_enum(&mut self, id: NodeId, attr: Attribute, value: AttrEnum, notify: bool) -> DomResult<()> {
        if !attr.enum_values().contains(&value) {
            return Err(DomError::InvalidAttributeValue {
                attribute: attr.name().to_string(),
                value: value.name().to_string(),
            });
        }
        self.set_scalar(id, attr, Scalar::Enum(value), notify)
    }

    pub fn try_enum(&self, id: NodeId, attr: Attribute, use_default: bool) -> Option<AttrEnum> {
        if let Some(Scalar::Enum(value)) = self.try_scalar(id, attr) {
            return Some(value);
        }
        match self.table_default(id, attr).filter(|_| use_default)? {
            AttrDefault::Enum(value) => Some(value),
            _ => None,
        }
    }

    pub fn enum_value(&self, id: NodeId, attr: Attribute) -> Option<AttrEnum> {
        self.try_enum(id, attr, true)
    }

    pub fn set_measure(&mut self, id: NodeId, attr: Attribute, value: Measurement, notify: bool) -> DomResult<()> {
        self.set_scalar(id, attr, Scalar::Measure(value), notify)
    }

    pub fn try_measure(&self, id: NodeId, attr: Attribute, use_default: bool) -> Option<Measurement> {
        if let Some(Scalar::Measure(value)) = self.try_scalar(id, attr) {
            return Some(value);
        }
        match self.table_default(id, attr).filter(|_| use_default)? {
            AttrDefault::Measure(value) => Some(value),
            _ => None,
        }
    }

    pub fn measure(&self, id: NodeId, attr: Attribute) -> Measurement {
        self.try_measure(id, attr, true)
            .unwrap_or(Measurement::new(0.0, MeasureUnit::In))
    }

    // ========================================================================
    // Name-keyed access
    // ========================================================================

    /// Set an attribute from its markup text.
    ///
    /// Known attributes are parsed into their declared type; unknown names
    /// are kept verbatim as custom attributes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str, notify: bool) -> DomResult<()> {
        let Some(attr) = Attribute::from_name(name) else {
            self.set_map_value(id, MapKey::Custom(name.into()), MapValue::String(value.to_string()), notify)?;
            return Ok(());
        };
        let invalid = || DomError::InvalidAttributeValue {
            attribute: name.to_string(),
            value: value.to_string(),
        };
        match attr.attr_type() {
            AttributeType::CData => self.set_cdata(id, attr, value, notify),
            AttributeType::Boolean => {
                let parsed = match value {
                    "1" | "true" => true,
                    "0" | "false" => false,
                    _ => return Err(invalid()),
                };
                self.set_boolean(id, attr, parsed, notify)
            }
            AttributeType::Integer => {
                let parsed = value.trim().parse().map_err(|_| invalid())?;
                self.set_integer(id, attr, parsed, notify)
            }
            AttributeType::Enum => {
                let parsed = AttrEnum::from_name(value)
                    .filter(|v| attr.enum_values().contains(v))
                    .ok_or_else(invalid)?;
                self.set_enum(id, attr, parsed, notify)
            }
            AttributeType::Measure => {
                let parsed = Measurement::parse(value).ok_or_else(invalid)?;
                self.set_measure(id, attr, parsed, notify)
            }
        }
    }

    /// Markup text of an attribute, inherited and (with `use_default`)
    /// defaulted
    pub fn attribute(&self, id: NodeId, name: &str, use_default: bool) -> Option<String> {
        let Some(attr) = Attribute::from_name(name) else {
            return self
                .try_map_value(id, &MapKey::Custom(name.into()), true)
                .and_then(MapValue::to_text);
        };
        if let Some(text) = self
            .try_map_value(id, &MapKey::Attribute(attr), true)
            .and_then(MapValue::to_text)
        {
            return Some(text);
        }
        match self.table_default(id, attr).filter(|_| use_default)? {
            AttrDefault::None => None,
            AttrDefault::CData(value) => Some(value.to_string()),
            AttrDefault::Boolean(value) => Some(Scalar::Boolean(value).to_string()),
            AttrDefault::Integer(value) => Some(value.to_string()),
            AttrDefault::Enum(value) => Some(value.name().to_string()),
            AttrDefault::Measure(value) => Some(value.to_string()),
        }
    }

    /// Remove a locally stored attribute, reporting whether one existed
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        let key = match Attribute::from_name(name) {
            Some(attr) => MapKey::Attribute(attr),
            None => MapKey::Custom(name.into()),
        };
        Ok(self.remove_map_key(id, &key, true)?.is_some())
    }

    /// Whether the attribute is stored locally, or with `can_inherit` on the
    /// template node
    pub fn has_attribute(&self, id: NodeId, attr: Attribute, can_inherit: bool) -> bool {
        self.has_map_key(id, &MapKey::Attribute(attr), can_inherit)
    }

    // ========================================================================
    // User data
    // ========================================================================

    pub fn set_user_data(&mut self, id: NodeId, key: UserKey, blob: Blob) -> DomResult<()> {
        self.set_map_value(id, MapKey::User(key), MapValue::Blob(blob), false)?;
        Ok(())
    }

    /// Host data stored on this node (never inherited)
    pub fn user_data(&self, id: NodeId, key: UserKey) -> Option<&Blob> {
        self.try_map_value(id, &MapKey::User(key), false)
            .and_then(MapValue::as_blob)
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Node holding the character content of `id`: the node itself for
    /// content-bearing categories, `value/<first child>` for containers
    pub fn content_node(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id)?;
        if node.object_type().has_content() {
            return Some(id);
        }
        if node.object_type().is_container_node() {
            let value = self.first_child_by_class(id, ElementKind::Value)?;
            return self.node_item(value, NodeItem::FirstChild, None);
        }
        None
    }

    fn ensure_content_node(&mut self, id: NodeId) -> DomResult<NodeId> {
        if let Some(target) = self.content_node(id) {
            return Ok(target);
        }
        if !self.live(id)?.object_type().is_container_node() {
            return Ok(id);
        }
        let value = match self.first_child_by_class(id, ElementKind::Value) {
            Some(value) => value,
            None => {
                let value = self.create_same_packet_node(id, ElementKind::Value)?;
                self.append_child(id, value)?;
                value
            }
        };
        let text = self.create_same_packet_node(id, ElementKind::Text)?;
        self.append_child(value, text)?;
        Ok(text)
    }

    /// Set character content, creating `value/text` under a container
    /// that has none yet
    pub fn set_content(&mut self, id: NodeId, content: &str, notify: bool) -> DomResult<()> {
        let target = self.ensure_content_node(id)?;
        self.set_cdata(target, Attribute::Value, content, notify)
    }

    pub fn try_content(&self, id: NodeId, proto: bool) -> Option<&str> {
        let target = self.content_node(id)?;
        self.try_cdata(target, Attribute::Value, false, proto)
    }

    pub fn content(&self, id: NodeId) -> &str {
        self.try_content(id, true).unwrap_or("")
    }
}
