//! Domain entities: the branching proof tree as read from a willow file

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Statement text closing a branch (contradiction found).
pub const CLOSED_TERMINATOR: &str = "×";
/// Statement text marking a branch as open (fully decomposed, no contradiction).
pub const OPEN_TERMINATOR: &str = "◯";
/// Both reserved terminal markers.
pub const TERMINATORS: [&str; 2] = [CLOSED_TERMINATOR, OPEN_TERMINATOR];

/// One branch of a truth tree: a run of statements that may fork into sub-branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub children: Vec<Branch>,
}

impl Branch {
    pub fn new(statements: Vec<Statement>, children: Vec<Branch>) -> Self {
        Self {
            statements,
            children,
        }
    }

    /// A branch without sub-branches.
    pub fn leaf(statements: Vec<Statement>) -> Self {
        Self::new(statements, Vec::new())
    }

    /// Number of statements in this branch and all of its descendant branches.
    ///
    /// This is the number of identifiers the subtree occupies once flattened.
    pub fn size(&self) -> usize {
        self.statements.len() + self.children.iter().map(Branch::size).sum::<usize>()
    }

    pub fn is_hollow(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of branch levels, counting this one. Hollow subtrees do not count.
    pub fn depth(&self) -> usize {
        if self.size() == 0 {
            return 0;
        }
        1 + self.children.iter().map(Branch::depth).max().unwrap_or(0)
    }

    /// Number of non-hollow branches in the subtree.
    pub fn branch_count(&self) -> usize {
        let own = usize::from(!self.is_hollow());
        own + self.children.iter().map(Branch::branch_count).sum::<usize>()
    }

    /// Number of non-hollow branches without non-hollow sub-branches.
    pub fn leaf_count(&self) -> usize {
        if self.is_hollow() {
            return 0;
        }
        let below: usize = self.children.iter().map(Branch::leaf_count).sum();
        below.max(1)
    }
}

/// A single line of the proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStatement")]
pub struct Statement {
    #[serde(rename = "str")]
    pub text: String,
    pub premise: bool,
    pub references: Vec<Reference>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            premise: false,
            references: Vec::new(),
        }
    }

    pub fn premise(text: impl Into<String>) -> Self {
        Self {
            premise: true,
            ..Self::new(text)
        }
    }

    pub fn with_references(mut self, references: Vec<Reference>) -> Self {
        self.references = references;
        self
    }

    /// Closed and open markers never make their references antecedents.
    pub fn is_terminator(&self) -> bool {
        TERMINATORS.contains(&self.text.as_str())
    }
}

/// Willow files store statements either as bare strings or as full objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatement {
    Bare(String),
    Full {
        #[serde(rename = "str")]
        text: String,
        #[serde(default)]
        premise: bool,
        #[serde(default)]
        references: Vec<Reference>,
    },
}

impl From<RawStatement> for Statement {
    fn from(raw: RawStatement) -> Self {
        match raw {
            RawStatement::Bare(text) => Statement::new(text),
            RawStatement::Full {
                text,
                premise,
                references,
            } => Statement {
                text,
                premise,
                references,
            },
        }
    }
}

/// Symbolic address of a statement: branch path from the root plus offset within that branch.
///
/// Serialized the way willow stores it: a JSON document embedded in a string,
/// e.g. `"{\"branches\":[1,0],\"offset\":2}"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReference", into = "String")]
pub struct Reference {
    pub branches: Vec<usize>,
    pub offset: usize,
}

impl Reference {
    pub fn new(branches: Vec<usize>, offset: usize) -> Self {
        Self { branches, offset }
    }

    /// Reference into the root branch.
    pub fn root(offset: usize) -> Self {
        Self::new(Vec::new(), offset)
    }

    /// Compact JSON form, identical to what the willow editor writes.
    pub fn encode(&self) -> String {
        format!(
            r#"{{"branches":[{}],"offset":{}}}"#,
            self.branches.iter().join(","),
            self.offset
        )
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Reference> for String {
    fn from(reference: Reference) -> Self {
        reference.encode()
    }
}

#[derive(Deserialize)]
struct ReferenceFields {
    #[serde(default)]
    branches: Vec<usize>,
    offset: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Encoded(String),
    Inline(ReferenceFields),
}

impl TryFrom<RawReference> for Reference {
    type Error = String;

    fn try_from(raw: RawReference) -> Result<Self, Self::Error> {
        let fields = match raw {
            RawReference::Encoded(text) => serde_json::from_str::<ReferenceFields>(&text)
                .map_err(|e| format!("invalid reference {:?}: {}", text, e))?,
            RawReference::Inline(fields) => fields,
        };
        Ok(Reference::new(fields.branches, fields.offset))
    }
}
