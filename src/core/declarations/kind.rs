//! Raw kind tags understood by the decoder.
//!
//! Every tag resolves to exactly one [`DeclarationKind`] through a single
//! lookup, so the same tag always decodes to the same declaration variant.

/// Prefix shared by all declaration kind tags.
pub const DECLARATION_TAG_PREFIX: &str = "source.lang.swift.decl.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Struct,
    Enum,
    Class,
    Extension,
    Protocol,
    EnumCase,
    EnumElement,
    Function,
    InstanceProperty,
    Parameter,
    /// A declaration tag without a dedicated variant.
    Other,
    /// A tag outside the declaration namespace, or no tag at all.
    NonDeclaration,
}

const KIND_TABLE: &[(&str, DeclarationKind)] = &[
    ("source.lang.swift.decl.struct", DeclarationKind::Struct),
    ("source.lang.swift.decl.enum", DeclarationKind::Enum),
    ("source.lang.swift.decl.class", DeclarationKind::Class),
    ("source.lang.swift.decl.extension", DeclarationKind::Extension),
    ("source.lang.swift.decl.extension.struct", DeclarationKind::Extension),
    ("source.lang.swift.decl.extension.enum", DeclarationKind::Extension),
    ("source.lang.swift.decl.extension.class", DeclarationKind::Extension),
    ("source.lang.swift.decl.extension.protocol", DeclarationKind::Extension),
    ("source.lang.swift.decl.protocol", DeclarationKind::Protocol),
    ("source.lang.swift.decl.enumcase", DeclarationKind::EnumCase),
    ("source.lang.swift.decl.enumelement", DeclarationKind::EnumElement),
    ("source.lang.swift.decl.function.free", DeclarationKind::Function),
    ("source.lang.swift.decl.function.method.instance", DeclarationKind::Function),
    ("source.lang.swift.decl.function.method.static", DeclarationKind::Function),
    ("source.lang.swift.decl.function.method.class", DeclarationKind::Function),
    ("source.lang.swift.decl.var.instance", DeclarationKind::InstanceProperty),
    ("source.lang.swift.decl.var.parameter", DeclarationKind::Parameter),
];

impl DeclarationKind {
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return DeclarationKind::NonDeclaration;
        };

        KIND_TABLE
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, kind)| *kind)
            .unwrap_or_else(|| {
                if tag.starts_with(DECLARATION_TAG_PREFIX) {
                    DeclarationKind::Other
                } else {
                    DeclarationKind::NonDeclaration
                }
            })
    }
}
