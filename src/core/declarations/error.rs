use std::fmt;

/// Position of a node in the export, as the chain of `key.substructure` indices
/// leading to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        let segments: Vec<String> = self
            .0
            .iter()
            .map(|index| format!("substructure/{}", index))
            .collect();
        write!(f, "{}", segments.join("/"))
    }
}

/// A case element's parameter slice does not consist of parameter declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionError {
    /// Labelled name of the element, e.g. `greeting(name:)`.
    pub element: String,
    /// Index of the offending parameter within the element.
    pub parameter_index: usize,
    /// What was found instead, or `None` when the member list ended early.
    pub found: Option<String>,
    pub case_path: NodePath,
}

impl fmt::Display for ReconstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parameter declaration expected for parameter {} of case {} at {}; got {} instead",
            self.parameter_index,
            self.element,
            self.case_path,
            self.found.as_deref().unwrap_or("end of member list")
        )
    }
}

impl std::error::Error for ReconstructionError {}

/// Error decoding a structure export into a declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field required for the node's kind is absent.
    MissingField {
        field: &'static str,
        kind: String,
        path: NodePath,
    },
    UnknownAccessibility { tag: String, path: NodePath },
    /// A parameter has no type name. Never degraded: case reconstruction
    /// depends on every parameter slot.
    MissingParameterType { name: Option<String>, path: NodePath },
    /// A case element without a base name. Never degraded: a placeholder has
    /// no parameter count, which would shift the slices of later elements.
    MalformedCaseElement { name: Option<String>, path: NodePath },
    Reconstruction(ReconstructionError),
    /// The export carries an error-severity diagnostic.
    Diagnostic {
        description: String,
        line: Option<usize>,
        column: Option<usize>,
    },
}

impl DecodeError {
    /// Whether a member failing with this error can be degraded in place
    /// instead of aborting its enclosing declaration.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            DecodeError::MissingField { .. }
                | DecodeError::UnknownAccessibility { .. }
        )
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingField { field, kind, path } => {
                write!(f, "missing '{}' for declaration of kind {} at {}", field, kind, path)
            }
            DecodeError::UnknownAccessibility { tag, path } => {
                write!(f, "unknown accessibility '{}' at {}", tag, path)
            }
            DecodeError::MissingParameterType { name, path } => write!(
                f,
                "missing type name for parameter {} at {}",
                name.as_deref().unwrap_or("(no name)"),
                path
            ),
            DecodeError::MalformedCaseElement { name, path } => write!(
                f,
                "nonempty name expected for case element {} at {}",
                name.as_deref().unwrap_or("(no name)"),
                path
            ),
            DecodeError::Reconstruction(err) => write!(f, "{}", err),
            DecodeError::Diagnostic {
                description,
                line,
                column,
            } => match (line, column) {
                (Some(line), Some(column)) => write!(f, "{}:{}: {}", line, column, description),
                (Some(line), None) => write!(f, "{}: {}", line, description),
                _ => write!(f, "{}", description),
            },
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<ReconstructionError> for DecodeError {
    fn from(err: ReconstructionError) -> Self {
        DecodeError::Reconstruction(err)
    }
}

/// A non-fatal observation recorded while building a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeWarning {
    /// A malformed member was kept as an unsupported declaration.
    DegradedMember { path: NodePath, reason: String },
    /// Two elements of one type share a base name.
    DuplicateCaseName { type_name: String, name: String },
}

impl fmt::Display for TreeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeWarning::DegradedMember { path, reason } => {
                write!(f, "ignored malformed member at {}: {}", path, reason)
            }
            TreeWarning::DuplicateCaseName { type_name, name } => {
                write!(f, "case '{}' is declared more than once in {}", name, type_name)
            }
        }
    }
}
