//! Attribute identifiers, enumerated values and measurements
//!
//! Each element carries a static table of the attributes it understands
//! together with their defaults. The tables drive default substitution in
//! the typed attribute API and the generic attribute projection used by
//! scripting.

use std::fmt;

use crate::element::ElementKind;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    CData,
    Boolean,
    Integer,
    Enum,
    Measure,
}

/// Known attribute identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Name,
    Desc,
    Lock,
    Min,
    Max,
    Initial,
    Presence,
    Access,
    Layout,
    Locale,
    Ns,
    ContentType,
    Id,
    Use,
    Usehref,
    Relevant,
    Ref,
    Match,
    X,
    Y,
    W,
    H,
    Value,
    MaxChars,
    AllowMacro,
}

impl Attribute {
    pub const ALL: [Attribute; 25] = [
        Attribute::Name,
        Attribute::Desc,
        Attribute::Lock,
        Attribute::Min,
        Attribute::Max,
        Attribute::Initial,
        Attribute::Presence,
        Attribute::Access,
        Attribute::Layout,
        Attribute::Locale,
        Attribute::Ns,
        Attribute::ContentType,
        Attribute::Id,
        Attribute::Use,
        Attribute::Usehref,
        Attribute::Relevant,
        Attribute::Ref,
        Attribute::Match,
        Attribute::X,
        Attribute::Y,
        Attribute::W,
        Attribute::H,
        Attribute::Value,
        Attribute::MaxChars,
        Attribute::AllowMacro,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Desc => "desc",
            Attribute::Lock => "lock",
            Attribute::Min => "min",
            Attribute::Max => "max",
            Attribute::Initial => "initial",
            Attribute::Presence => "presence",
            Attribute::Access => "access",
            Attribute::Layout => "layout",
            Attribute::Locale => "locale",
            Attribute::Ns => "ns",
            Attribute::ContentType => "contentType",
            Attribute::Id => "id",
            Attribute::Use => "use",
            Attribute::Usehref => "usehref",
            Attribute::Relevant => "relevant",
            Attribute::Ref => "ref",
            Attribute::Match => "match",
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::W => "w",
            Attribute::H => "h",
            Attribute::Value => "value",
            Attribute::MaxChars => "maxChars",
            Attribute::AllowMacro => "allowMacro",
        }
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Self::ALL.iter().copied().find(|attr| attr.name() == name)
    }

    pub const fn attr_type(self) -> AttributeType {
        match self {
            Attribute::Lock
            | Attribute::Min
            | Attribute::Max
            | Attribute::Initial
            | Attribute::MaxChars => AttributeType::Integer,
            Attribute::Presence | Attribute::Access | Attribute::Layout | Attribute::Match => {
                AttributeType::Enum
            }
            Attribute::X | Attribute::Y | Attribute::W | Attribute::H => AttributeType::Measure,
            Attribute::AllowMacro => AttributeType::Boolean,
            _ => AttributeType::CData,
        }
    }

    /// Permitted values of an enumerated attribute (empty for other types)
    pub const fn enum_values(self) -> &'static [AttrEnum] {
        match self {
            Attribute::Presence => &[
                AttrEnum::Visible,
                AttrEnum::Hidden,
                AttrEnum::Invisible,
                AttrEnum::Inactive,
            ],
            Attribute::Access => &[
                AttrEnum::Open,
                AttrEnum::Protected,
                AttrEnum::ReadOnly,
                AttrEnum::NonInteractive,
            ],
            Attribute::Layout => &[
                AttrEnum::Position,
                AttrEnum::Tb,
                AttrEnum::LrTb,
                AttrEnum::RlTb,
                AttrEnum::Row,
                AttrEnum::Table,
            ],
            Attribute::Match => &[
                AttrEnum::Once,
                AttrEnum::None,
                AttrEnum::Global,
                AttrEnum::DataRef,
            ],
            _ => &[],
        }
    }
}

/// Enumerated attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrEnum {
    Visible,
    Hidden,
    Invisible,
    Inactive,
    Open,
    Protected,
    ReadOnly,
    NonInteractive,
    Position,
    Tb,
    LrTb,
    RlTb,
    Row,
    Table,
    Once,
    None,
    Global,
    DataRef,
}

impl AttrEnum {
    const ALL: [AttrEnum; 18] = [
        AttrEnum::Visible,
        AttrEnum::Hidden,
        AttrEnum::Invisible,
        AttrEnum::Inactive,
        AttrEnum::Open,
        AttrEnum::Protected,
        AttrEnum::ReadOnly,
        AttrEnum::NonInteractive,
        AttrEnum::Position,
        AttrEnum::Tb,
        AttrEnum::LrTb,
        AttrEnum::RlTb,
        AttrEnum::Row,
        AttrEnum::Table,
        AttrEnum::Once,
        AttrEnum::None,
        AttrEnum::Global,
        AttrEnum::DataRef,
    ];

    /// Markup spelling
    pub const fn name(self) -> &'static str {
        match self {
            AttrEnum::Visible => "visible",
            AttrEnum::Hidden => "hidden",
            AttrEnum::Invisible => "invisible",
            AttrEnum::Inactive => "inactive",
            AttrEnum::Open => "open",
            AttrEnum::Protected => "protected",
            AttrEnum::ReadOnly => "readOnly",
            AttrEnum::NonInteractive => "nonInteractive",
            AttrEnum::Position => "position",
            AttrEnum::Tb => "tb",
            AttrEnum::LrTb => "lr-tb",
            AttrEnum::RlTb => "rl-tb",
            AttrEnum::Row => "row",
            AttrEnum::Table => "table",
            AttrEnum::Once => "once",
            AttrEnum::None => "none",
            AttrEnum::Global => "global",
            AttrEnum::DataRef => "dataRef",
        }
    }

    pub fn from_name(name: &str) -> Option<AttrEnum> {
        Self::ALL.iter().copied().find(|value| value.name() == name)
    }
}

/// Unit of a [`Measurement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureUnit {
    In,
    Cm,
    Mm,
    Pt,
    Em,
    Percent,
}

impl MeasureUnit {
    pub const fn suffix(self) -> &'static str {
        match self {
            MeasureUnit::In => "in",
            MeasureUnit::Cm => "cm",
            MeasureUnit::Mm => "mm",
            MeasureUnit::Pt => "pt",
            MeasureUnit::Em => "em",
            MeasureUnit::Percent => "%",
        }
    }
}

/// Length with a unit, e.g. `0.25in` or `10mm`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: f32,
    pub unit: MeasureUnit,
}

impl Measurement {
    pub const fn new(value: f32, unit: MeasureUnit) -> Self {
        Self { value, unit }
    }

    /// Parse `<number><unit>`; a bare number is in inches
    pub fn parse(text: &str) -> Option<Measurement> {
        let text = text.trim();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(text.len());
        let (number, suffix) = text.split_at(split);
        let value: f32 = number.parse().ok()?;
        let unit = match suffix.trim() {
            "" | "in" => MeasureUnit::In,
            "cm" => MeasureUnit::Cm,
            "mm" => MeasureUnit::Mm,
            "pt" => MeasureUnit::Pt,
            "em" => MeasureUnit::Em,
            "%" => MeasureUnit::Percent,
            _ => return None,
        };
        Some(Measurement { value, unit })
    }

    /// Absolute length in points; relative units have none
    pub fn to_points(self) -> Option<f32> {
        match self.unit {
            MeasureUnit::In => Some(self.value * 72.0),
            MeasureUnit::Cm => Some(self.value * 72.0 / 2.54),
            MeasureUnit::Mm => Some(self.value * 72.0 / 25.4),
            MeasureUnit::Pt => Some(self.value),
            MeasureUnit::Em | MeasureUnit::Percent => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Default value in an element's attribute table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrDefault {
    /// No default; reads without a stored value report absent
    None,
    CData(&'static str),
    Boolean(bool),
    Integer(i32),
    Enum(AttrEnum),
    Measure(Measurement),
}

/// One row of an element's attribute table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeData {
    pub attribute: Attribute,
    pub default: AttrDefault,
}

const fn row(attribute: Attribute, default: AttrDefault) -> AttributeData {
    AttributeData { attribute, default }
}

const ZERO_IN: AttrDefault = AttrDefault::Measure(Measurement::new(0.0, MeasureUnit::In));

static COMMON: [AttributeData; 4] = [
    row(Attribute::Name, AttrDefault::CData("")),
    row(Attribute::Id, AttrDefault::None),
    row(Attribute::Use, AttrDefault::None),
    row(Attribute::Usehref, AttrDefault::None),
];

static PICK_TRAY_BY_PDF_SIZE: [AttributeData; 2] = [
    row(Attribute::Desc, AttrDefault::None),
    row(Attribute::Lock, AttrDefault::Integer(0)),
];

static OCCUR: [AttributeData; 6] = [
    row(Attribute::Min, AttrDefault::Integer(1)),
    row(Attribute::Max, AttrDefault::Integer(1)),
    row(Attribute::Initial, AttrDefault::Integer(1)),
    row(Attribute::Id, AttrDefault::None),
    row(Attribute::Use, AttrDefault::None),
    row(Attribute::Usehref, AttrDefault::None),
];

static BIND: [AttributeData; 5] = [
    row(Attribute::Match, AttrDefault::Enum(AttrEnum::Once)),
    row(Attribute::Ref, AttrDefault::None),
    row(Attribute::Id, AttrDefault::None),
    row(Attribute::Use, AttrDefault::None),
    row(Attribute::Usehref, AttrDefault::None),
];

static CONTAINER: [AttributeData; 15] = [
    row(Attribute::Name, AttrDefault::CData("")),
    row(Attribute::Presence, AttrDefault::Enum(AttrEnum::Visible)),
    row(Attribute::Access, AttrDefault::Enum(AttrEnum::Open)),
    row(Attribute::Layout, AttrDefault::Enum(AttrEnum::Position)),
    row(Attribute::X, ZERO_IN),
    row(Attribute::Y, ZERO_IN),
    row(Attribute::W, ZERO_IN),
    row(Attribute::H, ZERO_IN),
    row(Attribute::Locale, AttrDefault::None),
    row(Attribute::Relevant, AttrDefault::None),
    row(Attribute::Id, AttrDefault::None),
    row(Attribute::Use, AttrDefault::None),
    row(Attribute::Usehref, AttrDefault::None),
    row(Attribute::Desc, AttrDefault::None),
    row(Attribute::AllowMacro, AttrDefault::Boolean(false)),
];

static DATA: [AttributeData; 3] = [
    row(Attribute::Name, AttrDefault::CData("")),
    row(Attribute::Ns, AttrDefault::None),
    row(Attribute::ContentType, AttrDefault::None),
];

static TEXT: [AttributeData; 5] = [
    row(Attribute::Name, AttrDefault::CData("")),
    row(Attribute::MaxChars, AttrDefault::Integer(0)),
    row(Attribute::Id, AttrDefault::None),
    row(Attribute::Use, AttrDefault::None),
    row(Attribute::Usehref, AttrDefault::None),
];

pub(crate) fn table_for(kind: ElementKind) -> &'static [AttributeData] {
    match kind {
        ElementKind::PickTrayByPdfSize => &PICK_TRAY_BY_PDF_SIZE,
        ElementKind::Occur => &OCCUR,
        ElementKind::Bind => &BIND,
        ElementKind::Subform
        | ElementKind::SubformSet
        | ElementKind::Area
        | ElementKind::PageSet
        | ElementKind::PageArea
        | ElementKind::ContentArea
        | ElementKind::Field
        | ElementKind::Draw
        | ElementKind::ExclGroup => &CONTAINER,
        ElementKind::DataGroup | ElementKind::DataValue => &DATA,
        ElementKind::Text => &TEXT,
        _ => &COMMON,
    }
}

/// Table row for `attribute` on `kind`, if the element declares it
pub(crate) fn lookup(kind: ElementKind, attribute: Attribute) -> Option<&'static AttributeData> {
    table_for(kind).iter().find(|data| data.attribute == attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_tray_table() {
        let table = ElementKind::PickTrayByPdfSize.attribute_data();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].attribute, Attribute::Desc);
        assert_eq!(table[0].default, AttrDefault::None);
        assert_eq!(table[1].default, AttrDefault::Integer(0));
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(AttrEnum::from_name("lr-tb"), Some(AttrEnum::LrTb));
        assert_eq!(AttrEnum::from_name("readOnly"), Some(AttrEnum::ReadOnly));
        assert_eq!(AttrEnum::from_name("ReadOnly"), None);
        assert!(Attribute::Presence.enum_values().contains(&AttrEnum::Hidden));
        assert!(Attribute::Name.enum_values().is_empty());
    }

    #[test]
    fn test_measurement_parse() {
        assert_eq!(Measurement::parse("10mm"), Some(Measurement::new(10.0, MeasureUnit::Mm)));
        assert_eq!(Measurement::parse("1.5"), Some(Measurement::new(1.5, MeasureUnit::In)));
        assert_eq!(Measurement::parse(" 50% "), Some(Measurement::new(50.0, MeasureUnit::Percent)));
        assert_eq!(Measurement::parse("3furlongs"), None);
        assert_eq!(Measurement::parse("mm"), None);
    }

    #[test]
    fn test_measurement_format_and_points() {
        let m = Measurement::new(0.25, MeasureUnit::In);
        assert_eq!(m.to_string(), "0.25in");
        assert_eq!(m.to_points(), Some(18.0));
        assert_eq!(Measurement::new(2.0, MeasureUnit::Em).to_points(), None);
    }

    #[test]
    fn test_attribute_types() {
        assert_eq!(Attribute::from_name("maxChars"), Some(Attribute::MaxChars));
        assert_eq!(Attribute::MaxChars.attr_type(), AttributeType::Integer);
        assert_eq!(Attribute::W.attr_type(), AttributeType::Measure);
        assert_eq!(Attribute::Match.attr_type(), AttributeType::Enum);
        assert_eq!(Attribute::Ref.attr_type(), AttributeType::CData);
        assert_eq!(Attribute::AllowMacro.attr_type(), AttributeType::Boolean);
    }
}
