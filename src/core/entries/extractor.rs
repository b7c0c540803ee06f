//! Accessibility-gated extraction of localizable entries.

use super::{Conformance, EntryParameter, LocalizableEntry, ShorteningRules};
use crate::core::declarations::{
    Accessibility, DeclId, Declaration, DeclarationTree, ReconstructionError, TypeKind,
};

/// Finds marker conformances in a tree and derives their entries.
///
/// The walk is pre-order. A type, protocol or extension less visible than
/// `internal` is skipped together with everything nested in it, so a public
/// type inside a private one is unreachable.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    marker_interface: &'a str,
    shortening: &'a ShorteningRules,
}

impl<'a> Extractor<'a> {
    pub fn new(marker_interface: &'a str, shortening: &'a ShorteningRules) -> Self {
        Self {
            marker_interface,
            shortening,
        }
    }

    pub fn marker_interface(&self) -> &str {
        self.marker_interface
    }

    /// Types declaring conformance to the marker protocol, in pre-order.
    pub fn conformances(&self, tree: &DeclarationTree) -> Vec<Conformance> {
        let mut conformances = Vec::new();
        for root in tree.roots() {
            self.visit(tree, *root, &mut conformances);
        }
        conformances
    }

    fn visit(&self, tree: &DeclarationTree, id: DeclId, conformances: &mut Vec<Conformance>) {
        let declaration = tree.get(id);
        if !declaration.is_scoping() {
            return;
        }
        if declaration
            .accessibility()
            .is_some_and(|level| level < Accessibility::Internal)
        {
            return;
        }

        if self.declares_marker(declaration) {
            conformances.push(Conformance {
                implementing_type: id,
                interface_name: self.marker_interface.to_string(),
            });
        }

        for member in declaration.members() {
            self.visit(tree, *member, conformances);
        }
    }

    fn declares_marker(&self, declaration: &Declaration) -> bool {
        match declaration {
            Declaration::Type { interfaces, .. } => interfaces
                .iter()
                .any(|interface| interface == self.marker_interface),
            _ => false,
        }
    }

    /// All entries of a tree: for each conformance in pre-order, its own entries.
    pub fn entries(&self, tree: &DeclarationTree) -> Result<Vec<LocalizableEntry>, ReconstructionError> {
        let mut entries = Vec::new();
        for conformance in self.conformances(tree) {
            entries.extend(self.entries_for(tree, &conformance)?);
        }
        Ok(entries)
    }

    /// Entries of one conforming type.
    ///
    /// Enumerations yield one entry per case element with one parameter per
    /// associated value; structures and classes yield a single entry with one
    /// parameter per stored property.
    pub fn entries_for(
        &self,
        tree: &DeclarationTree,
        conformance: &Conformance,
    ) -> Result<Vec<LocalizableEntry>, ReconstructionError> {
        let type_id = conformance.implementing_type;
        match tree.type_kind(type_id) {
            Some(TypeKind::Enum) => tree
                .elements_of(type_id)
                .into_iter()
                .map(|element| -> Result<LocalizableEntry, ReconstructionError> {
                    let parameters = tree
                        .case_parameters(element)?
                        .into_iter()
                        .map(|parameter| {
                            EntryParameter::new(
                                parameter.name.clone(),
                                Some(parameter.argument_type.as_str()),
                            )
                        })
                        .collect();
                    Ok(LocalizableEntry {
                        name: self.entry_name(tree, element),
                        parameters,
                    })
                })
                .collect(),
            Some(TypeKind::Struct | TypeKind::Class) => {
                let parameters = stored_properties(tree, type_id)
                    .into_iter()
                    .map(|(name, value_type)| {
                        EntryParameter::new(Some(name.to_string()), value_type)
                    })
                    .collect();
                Ok(vec![LocalizableEntry {
                    name: self.entry_name(tree, type_id),
                    parameters,
                }])
            }
            None => Ok(Vec::new()),
        }
    }

    /// The shortened qualified name of a declaration.
    pub fn entry_name(&self, tree: &DeclarationTree, id: DeclId) -> String {
        self.shortening.apply(&tree.qualified_name(id))
    }
}

/// Names and value types of a type's direct property members.
pub fn stored_properties(tree: &DeclarationTree, type_id: DeclId) -> Vec<(&str, Option<&str>)> {
    tree.members(type_id)
        .iter()
        .filter_map(|member| match tree.get(*member) {
            Declaration::Property { name, value_type } => {
                Some((name.as_str(), value_type.as_deref()))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::core::entries::{DEFAULT_MARKER_INTERFACE, PlaceholderKind};
    use crate::core::parsers::structure::StructureExport;

    fn tree(substructure: Value) -> DeclarationTree {
        let export: StructureExport =
            serde_json::from_value(json!({ "key.substructure": substructure })).unwrap();
        DeclarationTree::decode(&export).unwrap()
    }

    fn access(level: &str) -> String {
        format!("source.lang.swift.accessibility.{}", level)
    }

    fn message_enum(access_level: &str) -> Value {
        json!({
            "key.kind": "source.lang.swift.decl.enum",
            "key.name": "Message",
            "key.accessibility": access(access_level),
            "key.inheritedtypes": [{ "key.name": "LocalisableString" }],
            "key.substructure": [
                {
                    "key.kind": "source.lang.swift.decl.enumcase",
                    "key.substructure": [{ "key.kind": "source.lang.swift.decl.enumelement", "key.name": "welcome" }]
                },
                {
                    "key.kind": "source.lang.swift.decl.enumcase",
                    "key.substructure": [{ "key.kind": "source.lang.swift.decl.enumelement", "key.name": "greeting(name:)" }]
                },
                { "key.kind": "source.lang.swift.decl.var.parameter", "key.name": "name", "key.typename": "String" }
            ]
        })
    }

    fn container(kind: &str, name: &str, access_level: &str, members: Value) -> Value {
        json!({
            "key.kind": format!("source.lang.swift.decl.{}", kind),
            "key.name": name,
            "key.accessibility": access(access_level),
            "key.substructure": members
        })
    }

    fn identifiers(tree: &DeclarationTree) -> Vec<String> {
        let rules = ShorteningRules::default();
        Extractor::new(DEFAULT_MARKER_INTERFACE, &rules)
            .entries(tree)
            .unwrap()
            .iter()
            .map(LocalizableEntry::table_identifier)
            .collect()
    }

    #[test]
    fn test_enum_entries_in_declaration_order() {
        let tree = tree(json!([message_enum("internal")]));
        assert_eq!(
            identifiers(&tree),
            vec!["Message.welcome", "Message.greeting(name: %@)"]
        );
    }

    #[test]
    fn test_private_container_hides_public_nested_enum() {
        let tree = tree(json!([container(
            "struct",
            "Screen",
            "private",
            json!([message_enum("public")])
        )]));
        assert!(identifiers(&tree).is_empty());
    }

    #[test]
    fn test_internal_container_exposes_nested_enum() {
        let tree = tree(json!([container(
            "struct",
            "Screen",
            "internal",
            json!([message_enum("public")])
        )]));
        assert_eq!(
            identifiers(&tree),
            vec!["Screen.Message.welcome", "Screen.Message.greeting(name: %@)"]
        );
    }

    #[test]
    fn test_fileprivate_enum_is_skipped() {
        let tree = tree(json!([message_enum("fileprivate")]));
        assert!(identifiers(&tree).is_empty());
    }

    #[test]
    fn test_shortening_applies_to_container_path() {
        let tree = tree(json!([container(
            "class",
            "LoginViewController",
            "open",
            json!([message_enum("internal")])
        )]));
        assert_eq!(
            identifiers(&tree),
            vec!["Login.Message.welcome", "Login.Message.greeting(name: %@)"]
        );
    }

    #[test]
    fn test_extension_contributes_extended_type_name() {
        let tree = tree(json!([{
            "key.kind": "source.lang.swift.decl.extension",
            "key.name": "Settings",
            "key.substructure": [message_enum("internal")]
        }]));
        assert_eq!(identifiers(&tree)[0], "Settings.Message.welcome");
    }

    #[test]
    fn test_private_extension_is_skipped() {
        let tree = tree(json!([{
            "key.kind": "source.lang.swift.decl.extension",
            "key.name": "Settings",
            "key.accessibility": access("private"),
            "key.substructure": [message_enum("internal")]
        }]));
        assert!(identifiers(&tree).is_empty());
    }

    #[test]
    fn test_struct_entry_uses_stored_properties() {
        let tree = tree(json!([{
            "key.kind": "source.lang.swift.decl.struct",
            "key.name": "Score",
            "key.accessibility": access("internal"),
            "key.inheritedtypes": [{ "key.name": "LocalisableString" }],
            "key.substructure": [
                { "key.kind": "source.lang.swift.decl.var.instance", "key.name": "player", "key.typename": "String" },
                { "key.kind": "source.lang.swift.decl.var.instance", "key.name": "points", "key.typename": "Int" },
                { "key.kind": "source.lang.swift.decl.var.instance", "key.name": "inferred" },
                {
                    "key.kind": "source.lang.swift.decl.function.method.instance",
                    "key.name": "reset()",
                    "key.accessibility": access("internal")
                }
            ]
        }]));

        let rules = ShorteningRules::default();
        let entries = Extractor::new(DEFAULT_MARKER_INTERFACE, &rules)
            .entries(&tree)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].parameters[1].placeholder, PlaceholderKind::Integer);
        assert_eq!(
            entries[0].table_identifier(),
            "Score(player: %@, points: %ld, inferred: %@)"
        );
    }

    #[test]
    fn test_nested_conformers_follow_their_container() {
        let mut outer = message_enum("internal");
        outer["key.name"] = json!("Outer");
        outer["key.substructure"]
            .as_array_mut()
            .unwrap()
            .push(message_enum("internal"));
        let tree = tree(json!([outer]));

        assert_eq!(
            identifiers(&tree),
            vec![
                "Outer.welcome",
                "Outer.greeting(name: %@)",
                "Outer.Message.welcome",
                "Outer.Message.greeting(name: %@)"
            ]
        );
    }

    #[test]
    fn test_configurable_marker() {
        let tree = tree(json!([message_enum("internal")]));
        let rules = ShorteningRules::default();
        let extractor = Extractor::new("Translatable", &rules);
        assert!(extractor.conformances(&tree).is_empty());
    }

    #[test]
    fn test_conformance_records_marker_name() {
        let tree = tree(json!([message_enum("internal")]));
        let rules = ShorteningRules::default();
        let conformances = Extractor::new(DEFAULT_MARKER_INTERFACE, &rules).conformances(&tree);
        assert_eq!(
            conformances,
            vec![Conformance {
                implementing_type: tree.type_named("Message").unwrap(),
                interface_name: DEFAULT_MARKER_INTERFACE.to_string()
            }]
        );
    }
}
