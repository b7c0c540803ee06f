//! Conformance source for types adopting the marker protocol.

use super::GeneratedSource;
use crate::core::declarations::{DeclId, DeclarationTree, ReconstructionError, TypeKind};
use crate::core::entries::extractor::stored_properties;
use crate::core::entries::{Conformance, Extractor};
use crate::core::parsers::strings::quote;

/// The generated extension for one conforming type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConformance {
    /// Unshortened qualified name of the conforming type, e.g. `Login.Message`.
    pub type_name: String,
    pub identifier: GeneratedSource,
    pub arguments: GeneratedSource,
}

impl GeneratedConformance {
    /// `extension <type> { var identifier ... var arguments ... }`
    pub fn source(&self) -> GeneratedSource {
        GeneratedSource::block(
            format!("extension {} {{", self.type_name),
            vec![
                GeneratedSource::block(
                    "var identifier: String {",
                    vec![self.identifier.clone()],
                    "}",
                ),
                GeneratedSource::blank(),
                GeneratedSource::block(
                    "var arguments: [CVarArg] {",
                    vec![self.arguments.clone()],
                    "}",
                ),
            ],
            "}",
        )
    }

    /// File name used when conformances are written one per file.
    pub fn file_name(&self) -> String {
        format!("{}.quill.swift", self.type_name)
    }
}

/// Builds [`GeneratedConformance`]s from the entries an [`Extractor`] derives.
#[derive(Debug, Clone, Copy)]
pub struct ConformanceGenerator<'a> {
    extractor: Extractor<'a>,
}

impl<'a> ConformanceGenerator<'a> {
    pub fn new(extractor: Extractor<'a>) -> Self {
        Self { extractor }
    }

    /// Conformance sources for every marker conformance in the tree, in pre-order.
    pub fn generate_all(
        &self,
        tree: &DeclarationTree,
    ) -> Result<Vec<GeneratedConformance>, ReconstructionError> {
        self.extractor
            .conformances(tree)
            .iter()
            .map(|conformance| self.generate(tree, conformance))
            .collect()
    }

    pub fn generate(
        &self,
        tree: &DeclarationTree,
        conformance: &Conformance,
    ) -> Result<GeneratedConformance, ReconstructionError> {
        let type_id = conformance.implementing_type;
        let type_name = tree.qualified_name(type_id);
        let entries = self.extractor.entries_for(tree, conformance)?;

        let (identifier, arguments) = match tree.type_kind(type_id) {
            Some(TypeKind::Enum) => {
                let elements = tree.elements_of(type_id);
                let mut identifier_cases = Vec::with_capacity(elements.len());
                let mut argument_cases = Vec::with_capacity(elements.len());
                let mut any_parameters = false;

                for (element, entry) in elements.iter().zip(&entries) {
                    let name = element_name(tree, *element);
                    identifier_cases.push(GeneratedSource::line(format!(
                        "case .{}:\treturn {}",
                        name,
                        quote(&entry.table_identifier())
                    )));

                    let bindings = parameter_bindings(tree, *element)?;
                    any_parameters |= !bindings.is_empty();
                    argument_cases.push(argument_case(&name, &bindings));
                }

                let identifier = GeneratedSource::block("switch self {", identifier_cases, "}");
                let arguments = if any_parameters {
                    GeneratedSource::block("switch self {", argument_cases, "}")
                } else {
                    GeneratedSource::line("return []")
                };
                (identifier, arguments)
            }
            Some(TypeKind::Struct | TypeKind::Class) => {
                let identifier = entries
                    .first()
                    .map(|entry| entry.table_identifier())
                    .unwrap_or_else(|| self.extractor.entry_name(tree, type_id));
                let properties: Vec<&str> = stored_properties(tree, type_id)
                    .into_iter()
                    .map(|(name, _)| name)
                    .collect();
                (
                    GeneratedSource::line(format!("return {}", quote(&identifier))),
                    GeneratedSource::line(format!("return [{}]", properties.join(", "))),
                )
            }
            None => (
                GeneratedSource::line(format!(
                    "return {}",
                    quote(&self.extractor.entry_name(tree, type_id))
                )),
                GeneratedSource::line("return []"),
            ),
        };

        Ok(GeneratedConformance {
            type_name,
            identifier,
            arguments,
        })
    }
}

fn element_name(tree: &DeclarationTree, element: DeclId) -> String {
    tree.get(element)
        .as_case_element()
        .map(|element| element.name.clone())
        .unwrap_or_default()
}

/// A binding per associated value: `(label, variable)`.
///
/// Labelled values bind to a variable of the same name; positional values
/// bind to `v<position>`.
fn parameter_bindings(
    tree: &DeclarationTree,
    element: DeclId,
) -> Result<Vec<(Option<String>, String)>, ReconstructionError> {
    Ok(tree
        .case_parameters(element)?
        .into_iter()
        .enumerate()
        .map(|(position, parameter)| match &parameter.name {
            Some(label) => (Some(label.clone()), label.clone()),
            None => (None, format!("v{}", position)),
        })
        .collect())
}

fn argument_case(name: &str, bindings: &[(Option<String>, String)]) -> GeneratedSource {
    if bindings.is_empty() {
        return GeneratedSource::line(format!("case .{}:\treturn []", name));
    }
    let patterns: Vec<String> = bindings
        .iter()
        .map(|(label, variable)| match label {
            Some(label) => format!("{}: let {}", label, variable),
            None => format!("let {}", variable),
        })
        .collect();
    let variables: Vec<&str> = bindings.iter().map(|(_, variable)| variable.as_str()).collect();
    GeneratedSource::line(format!(
        "case .{}({}):\treturn [{}]",
        name,
        patterns.join(", "),
        variables.join(", ")
    ))
}
