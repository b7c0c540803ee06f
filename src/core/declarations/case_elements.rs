//! Case-element reconstruction.
//!
//! The export lists `case a(x: Int, y: Int), b(Int)` as one case node whose
//! children are the elements by labelled name (`a(x:y:)`, `b(_:)`). The
//! elements' parameter nodes are not nested under the case: they follow it as
//! siblings in the enclosing member list, concatenated across all elements.
//! Slices are therefore resolved against the fully decoded member list.

use super::{Declaration, DeclId, DeclarationTree, Parameter, ReconstructionError};

/// A case element name split into base name and parameter count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledName {
    pub base_name: String,
    pub parameter_count: usize,
}

impl LabelledName {
    /// Parse a labelled element name such as `greeting(name:)`.
    ///
    /// The base name is everything before the first `(`; the parameter count is
    /// the number of `:` after it. Names without parentheses have no parameters.
    pub fn parse(labelled_name: &str) -> Self {
        match labelled_name.split_once('(') {
            Some((base, suffix)) => Self {
                base_name: base.to_string(),
                parameter_count: suffix.matches(':').count(),
            },
            None => Self {
                base_name: labelled_name.to_string(),
                parameter_count: 0,
            },
        }
    }
}

impl DeclarationTree {
    /// The element ids of a case declaration, in declaration order.
    pub fn case_elements(&self, case: DeclId) -> Vec<DeclId> {
        match self.get(case) {
            Declaration::Case { elements } => elements
                .iter()
                .copied()
                .filter(|element| self.get(*element).as_case_element().is_some())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Every case element declared directly by a type, across all its case members.
    pub fn elements_of(&self, type_id: DeclId) -> Vec<DeclId> {
        self.members(type_id)
            .iter()
            .filter(|member| matches!(self.get(**member), Declaration::Case { .. }))
            .flat_map(|case| self.case_elements(*case))
            .collect()
    }

    /// Resolve the parameters of a case element.
    ///
    /// The slice starts right after the owning case in the enclosing member
    /// list, offset by the parameter counts of the elements preceding this one
    /// in the same case. Every slot must hold a parameter declaration.
    pub fn case_parameters(&self, element: DeclId) -> Result<Vec<&Parameter>, ReconstructionError> {
        let Some(case_element) = self.get(element).as_case_element() else {
            return Ok(Vec::new());
        };
        if case_element.parameter_count == 0 {
            return Ok(Vec::new());
        }

        let Some(case) = self.parent(element) else {
            return Ok(Vec::new());
        };
        let Declaration::Case { elements } = self.get(case) else {
            return Ok(Vec::new());
        };
        let Some(scope) = self.parent(case) else {
            return Ok(Vec::new());
        };
        let members = self.members(scope);

        let (Some(element_index), Some(case_index)) = (
            elements.iter().position(|candidate| *candidate == element),
            members.iter().position(|candidate| *candidate == case),
        ) else {
            return Ok(Vec::new());
        };

        let preceding_parameters: usize = elements[..element_index]
            .iter()
            .filter_map(|preceding| self.get(*preceding).as_case_element())
            .map(|preceding| preceding.parameter_count)
            .sum();
        let start = case_index + 1 + preceding_parameters;

        (0..case_element.parameter_count)
            .map(|parameter_index| {
                let slot = members.get(start + parameter_index);
                match slot.map(|id| self.get(*id)) {
                    Some(Declaration::Parameter(parameter)) => Ok(parameter),
                    other => Err(ReconstructionError {
                        element: case_element.labelled_name.clone(),
                        parameter_index,
                        found: other.map(Declaration::describe),
                        case_path: self.node(case).path.clone(),
                    }),
                }
            })
            .collect()
    }

    /// Resolve every case element's parameters once, failing on the first
    /// malformed slice.
    pub fn validate_case_parameters(&self) -> Result<(), ReconstructionError> {
        for (id, node) in self.iter() {
            if node.declaration.as_case_element().is_some() {
                self.case_parameters(id)?;
            }
        }
        Ok(())
    }
}
