//! Project records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::Expression;

/// Identifier of a [`Project`].
pub type ProjectId = Uuid;

/// A named grouping of expressions.
///
/// A project does not own the lifecycle of its expressions; removing a project
/// only removes its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Engine-assigned identifier (nil until created).
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Linked expressions, populated by hierarchy reads.
    #[serde(default)]
    pub expressions: Vec<Expression>,
}

impl Project {
    /// Create an unsaved project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            expressions: Vec::new(),
        }
    }

    /// Add an expression to create or link alongside the project.
    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expressions.push(expression);
        self
    }
}
