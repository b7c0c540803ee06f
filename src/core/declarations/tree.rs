use super::{Declaration, NodePath, TreeWarning, TypeKind};

/// Index of a node in its [`DeclarationTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(usize);

impl DeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    pub declaration: Declaration,
    /// Non-owning back-reference, `None` for root-level declarations.
    pub parent: Option<DeclId>,
    /// Where the node sits in the export.
    pub path: NodePath,
}

/// The declarations of one source unit.
///
/// Nodes are stored in insertion order and a parent is always inserted before
/// its members, so every parent id is smaller than the ids it owns and
/// ancestor chains are finite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationTree {
    nodes: Vec<DeclarationNode>,
    roots: Vec<DeclId>,
    warnings: Vec<TreeWarning>,
}

impl DeclarationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root-level declarations in source order.
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: DeclId) -> &DeclarationNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.nodes[id.0].declaration
    }

    pub fn parent(&self, id: DeclId) -> Option<DeclId> {
        self.nodes[id.0].parent
    }

    pub fn members(&self, id: DeclId) -> &[DeclId] {
        self.get(id).members()
    }

    /// Ancestors of `id`, starting with its parent and ending with a root.
    pub fn ancestors(&self, id: DeclId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Names of the enclosing scopes followed by the declaration's own name.
    pub fn qualified_name_path(&self, id: DeclId) -> Vec<&str> {
        let mut path: Vec<&str> = self
            .ancestors(id)
            .filter(|ancestor| self.get(*ancestor).is_scoping())
            .filter_map(|ancestor| self.get(ancestor).name())
            .collect();
        path.reverse();
        if let Some(name) = self.get(id).name() {
            path.push(name);
        }
        path
    }

    /// The declaration's fully qualified name within its module, e.g.
    /// `LoginViewController.Message.welcome`.
    pub fn qualified_name(&self, id: DeclId) -> String {
        self.qualified_name_path(id).join(".")
    }

    /// All nodes in insertion (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &DeclarationNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (DeclId(index), node))
    }

    /// Warnings recorded while the tree was decoded.
    pub fn warnings(&self) -> &[TreeWarning] {
        &self.warnings
    }

    /// The first type declaration with the given name, searching every level.
    pub fn type_named(&self, name: &str) -> Option<DeclId> {
        self.iter()
            .find(|(_, node)| {
                matches!(&node.declaration, Declaration::Type { name: n, .. } if n == name)
            })
            .map(|(id, _)| id)
    }

    /// The kind of a type declaration, or `None` for other declarations.
    pub fn type_kind(&self, id: DeclId) -> Option<TypeKind> {
        match self.get(id) {
            Declaration::Type { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Appends a node and records it with its parent.
    ///
    /// The parent assignment happens here, once; it is never changed afterwards.
    pub(crate) fn insert(
        &mut self,
        parent: Option<DeclId>,
        path: NodePath,
        declaration: Declaration,
    ) -> DeclId {
        let id = DeclId(self.nodes.len());
        debug_assert!(parent.is_none_or(|p| p.0 < id.0));
        self.nodes.push(DeclarationNode {
            declaration,
            parent,
            path,
        });
        id
    }

    /// Replaces the placeholder declaration of a node inserted before its members.
    pub(crate) fn complete(&mut self, id: DeclId, declaration: Declaration) {
        self.nodes[id.0].declaration = declaration;
    }

    /// Drops every node inserted at or after `len`.
    pub(crate) fn rollback(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub(crate) fn push_root(&mut self, id: DeclId) {
        self.roots.push(id);
    }

    pub(crate) fn warn(&mut self, warning: TreeWarning) {
        self.warnings.push(warning);
    }
}

/// Iterator over the ancestors of a declaration.
pub struct Ancestors<'a> {
    tree: &'a DeclarationTree,
    next: Option<DeclId>,
}

impl Iterator for Ancestors<'_> {
    type Item = DeclId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
