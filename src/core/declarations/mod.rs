//! Typed declaration tree decoded from structure exports.
//!
//! Each source unit decodes into one [`DeclarationTree`]: an arena of
//! [`Declaration`] nodes addressed by [`DeclId`]. Parents own the id lists of
//! their members; members hold a non-owning parent id that is assigned once,
//! when the member is inserted.
//!
//! ## Module Structure
//!
//! - `accessibility`: Five-level access ordering
//! - `case_elements`: Labelled-name parsing and case parameter reconstruction
//! - `decode`: Raw node to declaration decoding (kind-table dispatch)
//! - `error`: Decoding and reconstruction errors
//! - `kind`: Raw kind tags understood by the decoder
//! - `tree`: The arena, ancestor queries and qualified names

pub mod accessibility;
pub mod case_elements;
pub mod decode;
pub mod error;
pub mod kind;
pub mod tree;

use std::fmt;

pub use accessibility::Accessibility;
pub use case_elements::LabelledName;
pub use error::{DecodeError, NodePath, ReconstructionError, TreeWarning};
pub use kind::DeclarationKind;
pub use tree::{Ancestors, DeclId, DeclarationNode, DeclarationTree};

/// The kind of a nominal type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Struct,
    Enum,
    Class,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Class => write!(f, "class"),
        }
    }
}

/// One named alternative of a `case` declaration.
///
/// The element's parameters are not stored here: they follow the owning case
/// as siblings in the enclosing member list and are resolved on demand by
/// [`DeclarationTree::case_parameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseElement {
    /// Base name, e.g. `greeting` for `greeting(name:)`.
    pub name: String,
    /// Name as exported, including argument labels.
    pub labelled_name: String,
    pub parameter_count: usize,
}

/// A parameter of a function or case element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The argument label, or `None` for positional parameters.
    pub name: Option<String>,
    pub argument_type: String,
}

/// A decoded declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `struct`, `enum` or `class`.
    Type {
        kind: TypeKind,
        name: String,
        /// Names of the inherited types and protocols, as written.
        interfaces: Vec<String>,
        accessibility: Accessibility,
        members: Vec<DeclId>,
    },
    Extension {
        extended_type: String,
        interfaces: Vec<String>,
        /// Present only when the extension carries an access modifier.
        accessibility: Option<Accessibility>,
        members: Vec<DeclId>,
    },
    /// A protocol.
    Interface {
        name: String,
        accessibility: Accessibility,
        members: Vec<DeclId>,
    },
    /// A `case` declaration introducing one or more elements.
    Case { elements: Vec<DeclId> },
    CaseElement(CaseElement),
    Function {
        name: String,
        accessibility: Accessibility,
    },
    /// An instance property.
    Property {
        name: String,
        /// `None` when the type is inferred.
        value_type: Option<String>,
    },
    Parameter(Parameter),
    /// A declaration kind recognised but not handled here.
    Other { name: Option<String>, kind: String },
    /// A node outside the declaration namespace (expressions, statements, ...).
    NonDeclaration { kind: Option<String> },
}

impl Declaration {
    /// The ids owned by this declaration: members of scoping declarations and
    /// elements of cases.
    pub fn members(&self) -> &[DeclId] {
        match self {
            Declaration::Type { members, .. }
            | Declaration::Extension { members, .. }
            | Declaration::Interface { members, .. } => members,
            Declaration::Case { elements } => elements,
            _ => &[],
        }
    }

    pub(crate) fn members_mut(&mut self) -> Option<&mut Vec<DeclId>> {
        match self {
            Declaration::Type { members, .. }
            | Declaration::Extension { members, .. }
            | Declaration::Interface { members, .. } => Some(members),
            Declaration::Case { elements } => Some(elements),
            _ => None,
        }
    }

    /// The name this declaration contributes to qualified paths.
    ///
    /// Extensions contribute the name of the extended type; cases are unnamed.
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Type { name, .. }
            | Declaration::Interface { name, .. }
            | Declaration::Function { name, .. }
            | Declaration::Property { name, .. } => Some(name),
            Declaration::Extension { extended_type, .. } => Some(extended_type),
            Declaration::CaseElement(element) => Some(&element.name),
            Declaration::Parameter(parameter) => parameter.name.as_deref(),
            Declaration::Other { name, .. } => name.as_deref(),
            Declaration::Case { .. } | Declaration::NonDeclaration { .. } => None,
        }
    }

    /// The accessibility gate of scoping declarations, if they carry one.
    pub fn accessibility(&self) -> Option<Accessibility> {
        match self {
            Declaration::Type { accessibility, .. }
            | Declaration::Interface { accessibility, .. }
            | Declaration::Function { accessibility, .. } => Some(*accessibility),
            Declaration::Extension { accessibility, .. } => *accessibility,
            _ => None,
        }
    }

    /// Whether the declaration introduces a scope whose name qualifies its members.
    pub fn is_scoping(&self) -> bool {
        matches!(
            self,
            Declaration::Type { .. } | Declaration::Extension { .. } | Declaration::Interface { .. }
        )
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Declaration::Parameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn as_case_element(&self) -> Option<&CaseElement> {
        match self {
            Declaration::CaseElement(element) => Some(element),
            _ => None,
        }
    }

    /// A short description of the variant, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Declaration::Type { kind, name, .. } => format!("{} {}", kind, name),
            Declaration::Extension { extended_type, .. } => {
                format!("extension {}", extended_type)
            }
            Declaration::Interface { name, .. } => format!("protocol {}", name),
            Declaration::Case { .. } => "case".to_string(),
            Declaration::CaseElement(element) => format!("case element {}", element.name),
            Declaration::Function { name, .. } => format!("function {}", name),
            Declaration::Property { name, .. } => format!("property {}", name),
            Declaration::Parameter(parameter) => format!(
                "parameter {}",
                parameter.name.as_deref().unwrap_or("(no name)")
            ),
            Declaration::Other { name, kind } => {
                format!("{} of kind {}", name.as_deref().unwrap_or("(no name)"), kind)
            }
            Declaration::NonDeclaration { kind } => {
                format!("non-declaration of kind {}", kind.as_deref().unwrap_or("(no kind)"))
            }
        }
    }
}
