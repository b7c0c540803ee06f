//! Raw node to declaration decoding.
//!
//! The raw kind tag is read once and dispatched through [`DeclarationKind`].
//! Children are decoded recursively with their order preserved, since case
//! reconstruction relies on sibling positions.

use std::collections::HashSet;

use super::{
    Accessibility, CaseElement, DeclId, Declaration, DeclarationKind, DeclarationTree,
    DecodeError, LabelledName, NodePath, Parameter, TreeWarning, TypeKind,
};
use crate::core::parsers::structure::{RawNode, StructureExport};

impl DeclarationTree {
    /// Decode a structure export into a declaration tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the export carries an error diagnostic, a root
    /// declaration, a case element or a parameter is malformed, or a case element's parameter
    /// slice cannot be reconstructed. Other malformed members are kept as
    /// [`Declaration::Other`] and reported through [`DeclarationTree::warnings`].
    pub fn decode(export: &StructureExport) -> Result<Self, DecodeError> {
        if let Some(diagnostic) = export.diagnostics.iter().find(|d| d.is_error()) {
            return Err(DecodeError::Diagnostic {
                description: diagnostic.description.clone(),
                line: diagnostic.line,
                column: diagnostic.column,
            });
        }

        let mut decoder = Decoder::default();
        for (index, raw) in export.substructure.iter().enumerate() {
            let id = decoder.decode_node(raw, None, NodePath::root().child(index))?;
            decoder.tree.push_root(id);
        }

        let mut tree = decoder.tree;
        tree.validate_case_parameters()?;
        warn_duplicate_case_names(&mut tree);
        Ok(tree)
    }
}

#[derive(Default)]
struct Decoder {
    tree: DeclarationTree,
}

impl Decoder {
    fn decode_node(
        &mut self,
        raw: &RawNode,
        parent: Option<DeclId>,
        path: NodePath,
    ) -> Result<DeclId, DecodeError> {
        match DeclarationKind::from_tag(raw.kind.as_deref()) {
            DeclarationKind::Struct => self.decode_type(raw, TypeKind::Struct, parent, path),
            DeclarationKind::Enum => self.decode_type(raw, TypeKind::Enum, parent, path),
            DeclarationKind::Class => self.decode_type(raw, TypeKind::Class, parent, path),
            DeclarationKind::Extension => {
                let extended_type = required_name(raw, &path)?;
                let accessibility = optional_accessibility(raw, &path)?;
                let interfaces = raw.inherited_type_names();
                self.decode_scope(raw, parent, path, |members| Declaration::Extension {
                    extended_type,
                    interfaces,
                    accessibility,
                    members,
                })
            }
            DeclarationKind::Protocol => {
                let name = required_name(raw, &path)?;
                let accessibility = required_accessibility(raw, &path)?;
                self.decode_scope(raw, parent, path, |members| Declaration::Interface {
                    name,
                    accessibility,
                    members,
                })
            }
            DeclarationKind::EnumCase => {
                self.decode_scope(raw, parent, path, |elements| Declaration::Case { elements })
            }
            DeclarationKind::EnumElement => {
                let labelled_name = raw.name.clone().unwrap_or_default();
                let LabelledName {
                    base_name,
                    parameter_count,
                } = LabelledName::parse(&labelled_name);
                if base_name.is_empty() {
                    return Err(DecodeError::MalformedCaseElement {
                        name: raw.name.clone(),
                        path,
                    });
                }
                let element = CaseElement {
                    name: base_name,
                    labelled_name,
                    parameter_count,
                };
                Ok(self
                    .tree
                    .insert(parent, path, Declaration::CaseElement(element)))
            }
            DeclarationKind::Function => {
                let name = required_name(raw, &path)?;
                let accessibility = required_accessibility(raw, &path)?;
                Ok(self.tree.insert(
                    parent,
                    path,
                    Declaration::Function {
                        name,
                        accessibility,
                    },
                ))
            }
            DeclarationKind::InstanceProperty => {
                let name = required_name(raw, &path)?;
                Ok(self.tree.insert(
                    parent,
                    path,
                    Declaration::Property {
                        name,
                        value_type: raw.type_name.clone(),
                    },
                ))
            }
            DeclarationKind::Parameter => {
                let Some(argument_type) = raw.type_name.clone() else {
                    return Err(DecodeError::MissingParameterType {
                        name: raw.name.clone(),
                        path,
                    });
                };
                let parameter = Parameter {
                    name: raw.name.clone(),
                    argument_type,
                };
                Ok(self
                    .tree
                    .insert(parent, path, Declaration::Parameter(parameter)))
            }
            DeclarationKind::Other => Ok(self.tree.insert(
                parent,
                path,
                Declaration::Other {
                    name: raw.name.clone(),
                    kind: kind_label(raw),
                },
            )),
            DeclarationKind::NonDeclaration => Ok(self.tree.insert(
                parent,
                path,
                Declaration::NonDeclaration {
                    kind: raw.kind.clone(),
                },
            )),
        }
    }

    fn decode_type(
        &mut self,
        raw: &RawNode,
        kind: TypeKind,
        parent: Option<DeclId>,
        path: NodePath,
    ) -> Result<DeclId, DecodeError> {
        let name = required_name(raw, &path)?;
        let accessibility = required_accessibility(raw, &path)?;
        let interfaces = raw.inherited_type_names();
        self.decode_scope(raw, parent, path, |members| Declaration::Type {
            kind,
            name,
            interfaces,
            accessibility,
            members,
        })
    }

    /// Insert a scoping declaration before its members so that each member can
    /// record its parent on insertion.
    fn decode_scope(
        &mut self,
        raw: &RawNode,
        parent: Option<DeclId>,
        path: NodePath,
        build: impl FnOnce(Vec<DeclId>) -> Declaration,
    ) -> Result<DeclId, DecodeError> {
        let placeholder = Declaration::NonDeclaration { kind: None };
        let id = self.tree.insert(parent, path.clone(), placeholder);
        let members = self.decode_members(raw, id, &path)?;
        self.tree.complete(id, build(members));
        Ok(id)
    }

    fn decode_members(
        &mut self,
        raw: &RawNode,
        parent: DeclId,
        path: &NodePath,
    ) -> Result<Vec<DeclId>, DecodeError> {
        let mut members = Vec::with_capacity(raw.substructure.len());

        for (index, child) in raw.substructure.iter().enumerate() {
            let child_path = path.child(index);
            let mark = self.tree.len();

            match self.decode_node(child, Some(parent), child_path.clone()) {
                Ok(id) => members.push(id),
                Err(err) if err.is_degradable() => {
                    // Keep the slot so that sibling positions stay intact.
                    self.tree.rollback(mark);
                    self.tree.warn(TreeWarning::DegradedMember {
                        path: child_path.clone(),
                        reason: err.to_string(),
                    });
                    let degraded = Declaration::Other {
                        name: child.name.clone(),
                        kind: kind_label(child),
                    };
                    members.push(self.tree.insert(Some(parent), child_path, degraded));
                }
                Err(err) => return Err(err),
            }
        }

        Ok(members)
    }
}

fn kind_label(raw: &RawNode) -> String {
    raw.kind.clone().unwrap_or_else(|| "(no kind)".to_string())
}

fn required_name(raw: &RawNode, path: &NodePath) -> Result<String, DecodeError> {
    raw.name.clone().ok_or_else(|| DecodeError::MissingField {
        field: "key.name",
        kind: kind_label(raw),
        path: path.clone(),
    })
}

fn required_accessibility(raw: &RawNode, path: &NodePath) -> Result<Accessibility, DecodeError> {
    optional_accessibility(raw, path)?.ok_or_else(|| DecodeError::MissingField {
        field: "key.accessibility",
        kind: kind_label(raw),
        path: path.clone(),
    })
}

fn optional_accessibility(
    raw: &RawNode,
    path: &NodePath,
) -> Result<Option<Accessibility>, DecodeError> {
    raw.accessibility
        .as_deref()
        .map(|tag| {
            Accessibility::from_tag(tag).ok_or_else(|| DecodeError::UnknownAccessibility {
                tag: tag.to_string(),
                path: path.clone(),
            })
        })
        .transpose()
}

fn warn_duplicate_case_names(tree: &mut DeclarationTree) {
    let enums: Vec<DeclId> = tree
        .iter()
        .filter(|(_, node)| {
            matches!(
                node.declaration,
                Declaration::Type {
                    kind: TypeKind::Enum,
                    ..
                }
            )
        })
        .map(|(id, _)| id)
        .collect();

    let mut warnings = Vec::new();
    for enum_id in enums {
        let mut seen = HashSet::new();
        for element in tree.elements_of(enum_id) {
            let Some(case_element) = tree.get(element).as_case_element() else {
                continue;
            };
            if !seen.insert(case_element.name.clone()) {
                warnings.push(TreeWarning::DuplicateCaseName {
                    type_name: tree.qualified_name(enum_id),
                    name: case_element.name.clone(),
                });
            }
        }
    }

    for warning in warnings {
        tree.warn(warning);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::core::declarations::ReconstructionError;

    const ENUM: &str = "source.lang.swift.decl.enum";
    const STRUCT: &str = "source.lang.swift.decl.struct";
    const CASE: &str = "source.lang.swift.decl.enumcase";
    const ELEMENT: &str = "source.lang.swift.decl.enumelement";
    const PARAMETER: &str = "source.lang.swift.decl.var.parameter";
    const PROPERTY: &str = "source.lang.swift.decl.var.instance";
    const INTERNAL: &str = "source.lang.swift.accessibility.internal";

    fn export(substructure: Value) -> StructureExport {
        serde_json::from_value(json!({ "key.substructure": substructure })).unwrap()
    }

    fn decode(substructure: Value) -> Result<DeclarationTree, DecodeError> {
        DeclarationTree::decode(&export(substructure))
    }

    fn element(name: &str) -> Value {
        json!({ "key.kind": ELEMENT, "key.name": name })
    }

    fn parameter(name: Option<&str>, type_name: &str) -> Value {
        match name {
            Some(name) => json!({ "key.kind": PARAMETER, "key.name": name, "key.typename": type_name }),
            None => json!({ "key.kind": PARAMETER, "key.typename": type_name }),
        }
    }

    fn enumeration(name: &str, members: Value) -> Value {
        json!({
            "key.kind": ENUM,
            "key.name": name,
            "key.accessibility": INTERNAL,
            "key.inheritedtypes": [{ "key.name": "LocalisableString" }],
            "key.substructure": members
        })
    }

    fn parameter_summary(tree: &DeclarationTree, element: DeclId) -> Vec<(Option<String>, String)> {
        tree.case_parameters(element)
            .unwrap()
            .into_iter()
            .map(|p| (p.name.clone(), p.argument_type.clone()))
            .collect()
    }

    #[test]
    fn test_reconstructs_case_parameters_from_siblings() {
        let tree = decode(json!([enumeration(
            "Event",
            json!([
                { "key.kind": CASE, "key.substructure": [element("a(x:y:)"), element("b(_:)")] },
                parameter(Some("x"), "Int"),
                parameter(Some("y"), "Int"),
                parameter(None, "Int"),
                { "key.kind": CASE, "key.substructure": [element("c")] }
            ])
        )]))
        .unwrap();

        let event = tree.type_named("Event").unwrap();
        let elements = tree.elements_of(event);
        assert_eq!(elements.len(), 3);

        assert_eq!(
            parameter_summary(&tree, elements[0]),
            vec![
                (Some("x".to_string()), "Int".to_string()),
                (Some("y".to_string()), "Int".to_string())
            ]
        );
        assert_eq!(
            parameter_summary(&tree, elements[1]),
            vec![(None, "Int".to_string())]
        );
        assert!(parameter_summary(&tree, elements[2]).is_empty());
    }

    #[test]
    fn test_element_without_parentheses_consumes_nothing() {
        let tree = decode(json!([enumeration(
            "Message",
            json!([
                { "key.kind": CASE, "key.substructure": [element("welcome"), element("greeting(name:)")] },
                parameter(Some("name"), "String")
            ])
        )]))
        .unwrap();

        let message = tree.type_named("Message").unwrap();
        let elements = tree.elements_of(message);
        assert!(parameter_summary(&tree, elements[0]).is_empty());
        assert_eq!(
            parameter_summary(&tree, elements[1]),
            vec![(Some("name".to_string()), "String".to_string())]
        );
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let members = json!([
            enumeration(
                "Message",
                json!([
                    { "key.kind": CASE, "key.substructure": [element("greeting(name:)")] },
                    parameter(Some("name"), "String")
                ])
            ),
            { "key.kind": "source.lang.swift.decl.typealias", "key.name": "Alias" }
        ]);

        assert_eq!(decode(members.clone()).unwrap(), decode(members).unwrap());
    }

    #[test]
    fn test_parents_are_assigned() {
        let tree = decode(json!([enumeration(
            "Message",
            json!([{ "key.kind": CASE, "key.substructure": [element("welcome")] }])
        )]))
        .unwrap();

        let message = tree.type_named("Message").unwrap();
        assert_eq!(tree.roots(), &[message]);
        assert_eq!(tree.parent(message), None);

        let case = tree.members(message)[0];
        assert_eq!(tree.parent(case), Some(message));
        let welcome = tree.case_elements(case)[0];
        assert_eq!(tree.parent(welcome), Some(case));
        assert_eq!(tree.qualified_name(welcome), "Message.welcome");
    }

    #[test]
    fn test_unknown_and_missing_kinds() {
        let tree = decode(json!([
            { "key.kind": "source.lang.swift.decl.typealias", "key.name": "Alias" },
            { "key.kind": "source.lang.swift.expr.call", "key.name": "print" },
            { "key.name": "nothing" }
        ]))
        .unwrap();

        let roots = tree.roots();
        assert_eq!(
            tree.get(roots[0]),
            &Declaration::Other {
                name: Some("Alias".to_string()),
                kind: "source.lang.swift.decl.typealias".to_string()
            }
        );
        assert_eq!(
            tree.get(roots[1]),
            &Declaration::NonDeclaration {
                kind: Some("source.lang.swift.expr.call".to_string())
            }
        );
        assert_eq!(tree.get(roots[2]), &Declaration::NonDeclaration { kind: None });
    }

    #[test]
    fn test_parameter_without_type_is_fatal() {
        let err = decode(json!([enumeration(
            "Message",
            json!([
                { "key.kind": CASE, "key.substructure": [element("greeting(name:)")] },
                { "key.kind": PARAMETER, "key.name": "name" }
            ])
        )]))
        .unwrap_err();

        assert!(matches!(err, DecodeError::MissingParameterType { .. }));
        assert!(err.to_string().contains("substructure/0/substructure/1"));
    }

    #[test]
    fn test_malformed_member_is_degraded() {
        let tree = decode(json!([{
            "key.kind": STRUCT,
            "key.name": "Banner",
            "key.accessibility": INTERNAL,
            "key.substructure": [
                { "key.kind": PROPERTY, "key.typename": "String" },
                { "key.kind": PROPERTY, "key.name": "title", "key.typename": "String" }
            ]
        }]))
        .unwrap();

        let banner = tree.type_named("Banner").unwrap();
        let members = tree.members(banner);
        assert_eq!(members.len(), 2);
        assert!(matches!(tree.get(members[0]), Declaration::Other { name: None, .. }));
        assert_eq!(
            tree.get(members[1]),
            &Declaration::Property {
                name: "title".to_string(),
                value_type: Some("String".to_string())
            }
        );
        assert_eq!(tree.warnings().len(), 1);
        assert!(matches!(tree.warnings()[0], TreeWarning::DegradedMember { .. }));
    }

    #[test]
    fn test_malformed_case_element_is_fatal() {
        let err = decode(json!([enumeration(
            "Message",
            json!([
                { "key.kind": CASE, "key.substructure": [element("(x:)"), element("b(_:)")] },
                parameter(Some("x"), "Int"),
                parameter(None, "String")
            ])
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedCaseElement { name: Some(ref name), .. } if name == "(x:)"
        ));

        let err = decode(json!([enumeration(
            "Message",
            json!([
                { "key.kind": CASE, "key.substructure": [{ "key.kind": ELEMENT }, element("b(_:)")] },
                parameter(None, "String")
            ])
        )]))
        .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedCaseElement { name: None, .. }));
    }

    #[test]
    fn test_malformed_root_is_fatal() {
        let err = decode(json!([{ "key.kind": ENUM, "key.accessibility": INTERNAL }])).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "key.name", .. }));
    }

    #[test]
    fn test_missing_parameter_slot_is_reconstruction_error() {
        let err = decode(json!([enumeration(
            "Message",
            json!([
                { "key.kind": CASE, "key.substructure": [element("pair(_:_:)")] },
                parameter(None, "Int"),
                { "key.kind": PROPERTY, "key.name": "count", "key.typename": "Int" }
            ])
        )]))
        .unwrap_err();

        let DecodeError::Reconstruction(err) = err else {
            panic!("expected reconstruction error, got {err:?}");
        };
        assert_eq!(err.element, "pair(_:_:)");
        assert_eq!(err.parameter_index, 1);
        assert_eq!(err.found.as_deref(), Some("property count"));
    }

    #[test]
    fn test_truncated_member_list_is_reconstruction_error() {
        let err = decode(json!([enumeration(
            "Message",
            json!([{ "key.kind": CASE, "key.substructure": [element("greeting(name:)")] }])
        )]))
        .unwrap_err();

        assert!(matches!(
            err,
            DecodeError::Reconstruction(ReconstructionError { found: None, .. })
        ));
    }

    #[test]
    fn test_error_diagnostic_aborts() {
        let export: StructureExport = serde_json::from_value(json!({
            "key.diagnostics": [{
                "key.severity": "source.diagnostic.severity.error",
                "key.description": "expected '}' in enum",
                "key.line": 4,
                "key.column": 1
            }],
            "key.substructure": []
        }))
        .unwrap();

        let err = DeclarationTree::decode(&export).unwrap_err();
        assert_eq!(err.to_string(), "4:1: expected '}' in enum");
    }

    #[test]
    fn test_warning_diagnostic_does_not_abort() {
        let export: StructureExport = serde_json::from_value(json!({
            "key.diagnostics": [{
                "key.severity": "source.diagnostic.severity.warning",
                "key.description": "will never be executed"
            }],
            "key.substructure": [enumeration("Message", json!([]))]
        }))
        .unwrap();

        assert!(DeclarationTree::decode(&export).is_ok());
    }

    #[test]
    fn test_duplicate_case_names_warn() {
        let tree = decode(json!([enumeration(
            "Message",
            json!([
                { "key.kind": CASE, "key.substructure": [element("welcome")] },
                { "key.kind": CASE, "key.substructure": [element("welcome")] }
            ])
        )]))
        .unwrap();

        assert_eq!(
            tree.warnings(),
            &[TreeWarning::DuplicateCaseName {
                type_name: "Message".to_string(),
                name: "welcome".to_string()
            }]
        );
    }
}
