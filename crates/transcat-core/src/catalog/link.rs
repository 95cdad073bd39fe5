use tracing::debug;
use transcat_proto::{ExpressionId, ProjectId};

use super::Catalog;
use crate::error::Result;
use crate::schema::tables::{self, expression, project_expression};
use crate::schema::ExpressionRow;
use crate::sql::{Condition, Delete, Insert, Select};

impl Catalog {
    /// Link an expression to a project. Linking an existing pair does nothing.
    pub fn link_project(&self, project_id: ProjectId, expression_id: ExpressionId) -> Result<()> {
        let project = self.project_row(project_id)?;
        let expression = self.expression_row(expression_id)?;
        self.link_rows(project.id, expression.id)
    }

    /// Remove the link between an expression and a project. Unlinking a pair
    /// that is not linked does nothing.
    pub fn unlink_project(&self, project_id: ProjectId, expression_id: ExpressionId) -> Result<()> {
        let project = self.project_row(project_id)?;
        let expression = self.expression_row(expression_id)?;
        self.unlink_rows(project.id, expression.id)
    }

    pub(super) fn link_rows(&self, project_row: i64, expression_row: i64) -> Result<()> {
        if self.is_linked(project_row, expression_row)? {
            return Ok(());
        }

        let statement = Insert::new(&tables::PROJECT_EXPRESSION)
            .value(project_expression::PROJECT_ID, project_row)
            .value(project_expression::EXPRESSION_ID, expression_row)
            .build();
        self.store.execute(&statement, "link expression")?;
        debug!(project_row, expression_row, "Linked expression to project");
        Ok(())
    }

    pub(super) fn unlink_rows(&self, project_row: i64, expression_row: i64) -> Result<()> {
        if !self.is_linked(project_row, expression_row)? {
            return Ok(());
        }

        let statement = Delete::new(&tables::PROJECT_EXPRESSION)
            .filter(link_condition(project_row, expression_row))
            .build();
        self.store.execute(&statement, "unlink expression")?;
        debug!(project_row, expression_row, "Unlinked expression from project");
        Ok(())
    }

    /// Expressions linked to a project, in expression insertion order.
    pub(super) fn linked_expression_rows(&self, project_row: i64) -> Result<Vec<ExpressionRow>> {
        self.store.select(
            Select::new(&tables::EXPRESSION)
                .join(
                    &tables::PROJECT_EXPRESSION,
                    expression::ID,
                    project_expression::EXPRESSION_ID,
                )
                .filter(Condition::eq(project_expression::PROJECT_ID, project_row))
                .order_by(expression::ID),
            "list project expressions",
        )
    }

    fn is_linked(&self, project_row: i64, expression_row: i64) -> Result<bool> {
        let statement = Select::new(&tables::PROJECT_EXPRESSION)
            .only(&[project_expression::PROJECT_ID])
            .filter(link_condition(project_row, expression_row))
            .limit(1)
            .build();
        self.store.exists(&statement, "check link")
    }
}

fn link_condition(project_row: i64, expression_row: i64) -> Condition {
    Condition::and([
        Condition::eq(project_expression::PROJECT_ID, project_row),
        Condition::eq(project_expression::EXPRESSION_ID, expression_row),
    ])
}
