//! Element kinds and packets

use serde::Serialize;

use crate::attribute::{self, AttributeData};
use crate::hash::name_hash;
use crate::object::ObjectType;

/// Form element tag a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Unknown,
    Xfa,
    Config,
    Present,
    PickTrayByPdfSize,
    Template,
    Form,
    Datasets,
    Data,
    DataGroup,
    DataValue,
    Subform,
    SubformSet,
    Area,
    PageSet,
    PageArea,
    ContentArea,
    Field,
    Draw,
    ExclGroup,
    InstanceManager,
    Occur,
    Bind,
    Value,
    Text,
    Integer,
    Decimal,
    Float,
    Items,
    Caption,
    Script,
    Variables,
    Desc,
    Proto,
    Packet,
}

impl ElementKind {
    /// Every known element, in declaration order
    pub const ALL: [ElementKind; 35] = [
        ElementKind::Unknown,
        ElementKind::Xfa,
        ElementKind::Config,
        ElementKind::Present,
        ElementKind::PickTrayByPdfSize,
        ElementKind::Template,
        ElementKind::Form,
        ElementKind::Datasets,
        ElementKind::Data,
        ElementKind::DataGroup,
        ElementKind::DataValue,
        ElementKind::Subform,
        ElementKind::SubformSet,
        ElementKind::Area,
        ElementKind::PageSet,
        ElementKind::PageArea,
        ElementKind::ContentArea,
        ElementKind::Field,
        ElementKind::Draw,
        ElementKind::ExclGroup,
        ElementKind::InstanceManager,
        ElementKind::Occur,
        ElementKind::Bind,
        ElementKind::Value,
        ElementKind::Text,
        ElementKind::Integer,
        ElementKind::Decimal,
        ElementKind::Float,
        ElementKind::Items,
        ElementKind::Caption,
        ElementKind::Script,
        ElementKind::Variables,
        ElementKind::Desc,
        ElementKind::Proto,
        ElementKind::Packet,
    ];

    /// Script class name, as spelled in markup
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Unknown => "unknown",
            ElementKind::Xfa => "xfa",
            ElementKind::Config => "config",
            ElementKind::Present => "present",
            ElementKind::PickTrayByPdfSize => "pickTrayByPDFSize",
            ElementKind::Template => "template",
            ElementKind::Form => "form",
            ElementKind::Datasets => "datasets",
            ElementKind::Data => "data",
            ElementKind::DataGroup => "dataGroup",
            ElementKind::DataValue => "dataValue",
            ElementKind::Subform => "subform",
            ElementKind::SubformSet => "subformSet",
            ElementKind::Area => "area",
            ElementKind::PageSet => "pageSet",
            ElementKind::PageArea => "pageArea",
            ElementKind::ContentArea => "contentArea",
            ElementKind::Field => "field",
            ElementKind::Draw => "draw",
            ElementKind::ExclGroup => "exclGroup",
            ElementKind::InstanceManager => "instanceManager",
            ElementKind::Occur => "occur",
            ElementKind::Bind => "bind",
            ElementKind::Value => "value",
            ElementKind::Text => "text",
            ElementKind::Integer => "integer",
            ElementKind::Decimal => "decimal",
            ElementKind::Float => "float",
            ElementKind::Items => "items",
            ElementKind::Caption => "caption",
            ElementKind::Script => "script",
            ElementKind::Variables => "variables",
            ElementKind::Desc => "desc",
            ElementKind::Proto => "proto",
            ElementKind::Packet => "packet",
        }
    }

    /// Look up an element by class name (case-sensitive)
    pub fn from_name(name: &str) -> Option<ElementKind> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| *kind != ElementKind::Unknown && kind.name() == name)
    }

    /// Hash of the class name, used by `#class` lookups
    pub fn class_hash(self) -> u32 {
        name_hash(self.name())
    }

    /// Category a freshly created node of this kind receives
    pub const fn default_object_type(self) -> ObjectType {
        match self {
            ElementKind::Xfa
            | ElementKind::Config
            | ElementKind::Template
            | ElementKind::Form
            | ElementKind::Datasets => ObjectType::ModelNode,

            ElementKind::Subform
            | ElementKind::SubformSet
            | ElementKind::Area
            | ElementKind::PageSet
            | ElementKind::PageArea
            | ElementKind::ContentArea
            | ElementKind::Field
            | ElementKind::Draw
            | ElementKind::ExclGroup => ObjectType::ContainerNode,

            ElementKind::DataValue | ElementKind::Packet => ObjectType::NodeC,

            ElementKind::Text
            | ElementKind::Integer
            | ElementKind::Decimal
            | ElementKind::Float
            | ElementKind::Script
            | ElementKind::PickTrayByPdfSize => ObjectType::ContentNode,

            _ => ObjectType::Node,
        }
    }

    /// Static attribute table of this element
    pub fn attribute_data(self) -> &'static [AttributeData] {
        attribute::table_for(self)
    }

    /// Whether instances of this element are repeatable under an instance manager
    pub const fn is_repeatable(self) -> bool {
        matches!(self, ElementKind::Subform | ElementKind::SubformSet)
    }
}

/// Logical document section a node was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PacketType {
    Unknown,
    Xdp,
    Config,
    Template,
    Datasets,
    Form,
    LocaleSet,
    ConnectionSet,
    SourceSet,
    Xdc,
    Pdf,
    Xfdf,
    Xmpmeta,
    Signature,
    Stylesheet,
    User,
}

impl PacketType {
    pub const fn name(self) -> &'static str {
        match self {
            PacketType::Unknown => "",
            PacketType::Xdp => "xdp",
            PacketType::Config => "config",
            PacketType::Template => "template",
            PacketType::Datasets => "datasets",
            PacketType::Form => "form",
            PacketType::LocaleSet => "localeSet",
            PacketType::ConnectionSet => "connectionSet",
            PacketType::SourceSet => "sourceSet",
            PacketType::Xdc => "xdc",
            PacketType::Pdf => "pdf",
            PacketType::Xfdf => "xfdf",
            PacketType::Xmpmeta => "xmpmeta",
            PacketType::Signature => "signature",
            PacketType::Stylesheet => "stylesheet",
            PacketType::User => "user",
        }
    }

    /// Model element rooting this packet, if it has one in this core
    pub const fn model_element(self) -> Option<ElementKind> {
        match self {
            PacketType::Xdp => Some(ElementKind::Xfa),
            PacketType::Config => Some(ElementKind::Config),
            PacketType::Template => Some(ElementKind::Template),
            PacketType::Datasets => Some(ElementKind::Datasets),
            PacketType::Form => Some(ElementKind::Form),
            _ => None,
        }
    }

    /// Namespace URI of the packet's markup; empty when it has none here
    pub const fn namespace(self) -> &'static str {
        match self {
            PacketType::Xdp => "http://ns.adobe.com/xdp/",
            PacketType::Config => "http://www.xfa.org/schema/xci/3.0/",
            PacketType::Template => "http://www.xfa.org/schema/xfa-template/3.3/",
            PacketType::Datasets => "http://www.xfa.org/schema/xfa-data/1.0/",
            PacketType::Form => "http://www.xfa.org/schema/xfa-form/2.8/",
            PacketType::LocaleSet => "http://www.xfa.org/schema/xfa-locale-set/2.7/",
            PacketType::ConnectionSet => "http://www.xfa.org/schema/xfa-connection-set/2.8/",
            PacketType::SourceSet => "http://www.xfa.org/schema/xfa-source-set/2.8/",
            PacketType::Xdc => "http://www.xfa.org/schema/xdc/1.0/",
            PacketType::Xfdf => "http://ns.adobe.com/xfdf/",
            PacketType::Xmpmeta => "http://ns.adobe.com/xmpmeta/",
            PacketType::Signature => "http://www.w3.org/2000/09/xmldsig#",
            PacketType::Stylesheet => "http://www.w3.org/1999/XSL/Transform",
            PacketType::Unknown | PacketType::Pdf | PacketType::User => "",
        }
    }
}
