//! Parsed-module ("pymod") data structures for fortbind.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the front-end's block dump
//! - **Analysis layer**: arena-indexed tree for efficient scope traversal
//!
//! The Fortran front-end hands us a nested list of block records (modules,
//! programs, routines, type definitions) as JSON. `parse_pymod` reads that
//! dump verbatim; `ModuleTree::from_raw` flattens it into an arena of
//! [`Block`] records addressed by [`BlockId`], with non-owning parent
//! links. The tree is read-only after construction.

use indexmap::IndexMap;

#[cfg(test)]
mod lib_tests;

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw block record as dumped by the Fortran front-end.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawBlock {
    pub block: String,
    pub name: String,
    /// Declared variables, in declaration order.
    #[serde(default)]
    pub vars: IndexMap<String, RawVar>,
    /// Dummy argument names, in positional order (routines only).
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub body: Vec<RawBlock>,
}

/// Raw variable declaration attached to a block.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawVar {
    pub typespec: String,
    #[serde(default)]
    pub kindselector: Option<RawKindSelector>,
    /// Type name for `typespec == "type"` declarations.
    #[serde(default)]
    pub typename: Option<String>,
    #[serde(default)]
    pub intent: Vec<String>,
    #[serde(default)]
    pub dimension: Vec<String>,
}

/// Kind selector, e.g. the `c_int` in `integer(kind=c_int)`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawKindSelector {
    pub kind: String,
}

/// Parse a front-end block dump into raw blocks.
pub fn parse_pymod(json: &str) -> Result<Vec<RawBlock>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Common Types
// ============================================================================

/// Index of a block in a [`ModuleTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Block classification.
///
/// Canonical enumeration of the block kinds the front-end produces.
/// Unrecognized block strings map to `Unknown` rather than failing the
/// whole dump; downstream passes only ever select specific kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockKind {
    Module,
    Program,
    Subroutine,
    Function,
    Interface,
    /// Derived-type definition (`type :: name ... end type`).
    Type,
    BlockData,
    Unknown,
}

impl BlockKind {
    /// Convert from the front-end's block string.
    pub fn from_block_str(s: &str) -> Self {
        match s {
            "module" => Self::Module,
            "program" => Self::Program,
            "subroutine" => Self::Subroutine,
            "function" => Self::Function,
            "interface" => Self::Interface,
            "type" => Self::Type,
            "block data" => Self::BlockData,
            _ => Self::Unknown,
        }
    }

    /// Whether this block defines a derived type.
    pub fn is_type_def(self) -> bool {
        matches!(self, Self::Type)
    }

    /// Whether this block is a callable routine.
    pub fn is_routine(self) -> bool {
        matches!(self, Self::Subroutine | Self::Function)
    }
}

/// Declared type of a variable or derived-type field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Integer { kind: Option<String> },
    Real { kind: Option<String> },
    Logical { kind: Option<String> },
    Character,
    /// Reference to a user-defined derived type.
    Derived { typename: String },
    /// Typespec string the analysis layer does not model.
    Unknown { typespec: String },
}

impl TypeSpec {
    fn from_raw(raw: &RawVar) -> Self {
        let kind = raw.kindselector.as_ref().map(|k| k.kind.clone());
        match raw.typespec.as_str() {
            "integer" => Self::Integer { kind },
            "real" => Self::Real { kind },
            "logical" => Self::Logical { kind },
            "character" => Self::Character,
            "type" => Self::Derived {
                typename: raw.typename.clone().unwrap_or_default(),
            },
            other => Self::Unknown {
                typespec: other.to_string(),
            },
        }
    }

    /// The declared kind tag, when one was given.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Integer { kind } | Self::Real { kind } | Self::Logical { kind } => {
                kind.as_deref()
            }
            _ => None,
        }
    }

    /// The referenced derived-type name, for `Derived` specs.
    pub fn derived_name(&self) -> Option<&str> {
        match self {
            Self::Derived { typename } => Some(typename),
            _ => None,
        }
    }

    /// Display string for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Integer { kind: Some(k) }
            | Self::Real { kind: Some(k) }
            | Self::Logical { kind: Some(k) } => k.clone(),
            Self::Integer { kind: None } => "integer".to_string(),
            Self::Real { kind: None } => "real".to_string(),
            Self::Logical { kind: None } => "logical".to_string(),
            Self::Character => "character".to_string(),
            Self::Derived { typename } => format!("type({typename})"),
            Self::Unknown { typespec } => typespec.clone(),
        }
    }
}

/// Declared data-flow direction of a dummy argument.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Intent {
    #[default]
    Unspecified,
    In,
    Out,
    InOut,
}

impl Intent {
    /// Convert from the front-end's intent attribute list.
    pub fn from_attrs(attrs: &[String]) -> Self {
        let has = |s: &str| attrs.iter().any(|a| a == s);
        if has("inout") || (has("in") && has("out")) {
            Self::InOut
        } else if has("out") {
            Self::Out
        } else if has("in") {
            Self::In
        } else {
            Self::Unspecified
        }
    }

    /// Whether data flows back to the caller (`out` or `inout`).
    pub fn is_returnable(self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }
}

// ============================================================================
// Analysis Layer
// ============================================================================

/// Analyzed variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub typespec: TypeSpec,
    pub intent: Intent,
    pub dimension: Vec<String>,
}

impl Var {
    fn from_raw(raw: &RawVar) -> Self {
        Self {
            typespec: TypeSpec::from_raw(raw),
            intent: Intent::from_attrs(&raw.intent),
            dimension: raw.dimension.clone(),
        }
    }

    /// Whether the declaration carries a dimension attribute.
    pub fn is_array(&self) -> bool {
        !self.dimension.is_empty()
    }
}

/// One block in the flattened module tree.
///
/// `vars` preserves declaration order; for type-definition blocks that
/// order is definitive for struct layout and must never be re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub name: String,
    pub vars: IndexMap<String, Var>,
    pub args: Vec<String>,
    pub body: Vec<BlockId>,
    /// Enclosing block, for scope lookup only (non-owning).
    pub parent: Option<BlockId>,
}

impl Block {
    /// Look up a declared variable by name.
    pub fn var(&self, name: &str) -> Option<&Var> {
        self.vars.get(name)
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

/// Flattened, arena-indexed module tree.
///
/// Blocks are stored in pre-order (a block precedes its body). All
/// accessors take `&self`; nothing in this crate mutates a constructed
/// tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTree {
    blocks: Vec<Block>,
    roots: Vec<BlockId>,
}

impl ModuleTree {
    /// Flatten raw front-end blocks into an arena.
    pub fn from_raw(raw: &[RawBlock]) -> Self {
        let mut tree = Self {
            blocks: Vec::new(),
            roots: Vec::new(),
        };
        for block in raw {
            let id = tree.insert(block, None);
            tree.roots.push(id);
        }
        tree
    }

    /// Parse and flatten a front-end JSON dump in one step.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_raw(&parse_pymod(json)?))
    }

    fn insert(&mut self, raw: &RawBlock, parent: Option<BlockId>) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block {
            kind: BlockKind::from_block_str(&raw.block),
            name: raw.name.clone(),
            vars: raw
                .vars
                .iter()
                .map(|(name, var)| (name.clone(), Var::from_raw(var)))
                .collect(),
            args: raw.args.clone(),
            body: Vec::new(),
            parent,
        });
        let body: Vec<BlockId> = raw
            .body
            .iter()
            .map(|child| self.insert(child, Some(id)))
            .collect();
        self.blocks[id.index()].body = body;
        id
    }

    /// Top-level blocks of the dump, in source order.
    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    pub fn get(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.blocks[id.index()].parent
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (BlockId(i as u32), b))
    }

    /// Routine view over a block, if it is a subroutine or function.
    pub fn routine(&self, id: BlockId) -> Option<Routine<'_>> {
        self.get(id).kind.is_routine().then_some(Routine { tree: self, id })
    }
}

/// Read-only view over a routine block and its dummy arguments.
#[derive(Clone, Copy)]
pub struct Routine<'a> {
    tree: &'a ModuleTree,
    id: BlockId,
}

impl<'a> Routine<'a> {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.tree.get(self.id).name
    }

    /// Enclosing module or program block.
    pub fn parent(&self) -> Option<BlockId> {
        self.tree.parent(self.id)
    }

    /// Dummy argument names in positional order.
    pub fn args(&self) -> &'a [String] {
        &self.tree.get(self.id).args
    }

    /// Declaration for one dummy argument, if the front-end supplied it.
    pub fn var(&self, name: &str) -> Option<&'a Var> {
        self.tree.get(self.id).var(name)
    }
}
