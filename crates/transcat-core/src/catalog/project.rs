use tracing::debug;
use transcat_proto::{Project, ProjectId, ProjectQuery, ProjectUpdate, Uuid};

use super::Catalog;
use crate::error::{Error, Result};
use crate::schema::tables::{self, expression, project, project_expression};
use crate::schema::{ExpressionRow, ProjectRow};
use crate::sql::{Condition, Delete, Insert, Select};

impl Catalog {
    /// Every project, without expressions.
    pub fn projects(&self) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> = self
            .store
            .select(Select::new(&tables::PROJECT).order_by(project::ID), "list projects")?;
        rows.into_iter().map(ProjectRow::into_project).collect()
    }

    /// Projects matching a query.
    ///
    /// [`ProjectQuery::Hierarchy`] returns every project with its expressions
    /// and their translations. The other variants return shallow records.
    pub fn projects_matching(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        match query {
            ProjectQuery::Hierarchy => {
                let rows: Vec<ProjectRow> = self
                    .store
                    .select(Select::new(&tables::PROJECT).order_by(project::ID), "list projects")?;
                rows.into_iter().map(|row| self.project_hierarchy(row)).collect()
            }
            ProjectQuery::PrimaryKey(key) => self
                .find::<ProjectRow>(project::ID, *key, "find project")?
                .map(ProjectRow::into_project)
                .into_iter()
                .collect(),
            ProjectQuery::Id(id) => self
                .find::<ProjectRow>(project::UUID, *id, "find project")?
                .map(ProjectRow::into_project)
                .into_iter()
                .collect(),
            ProjectQuery::Named(name) => {
                let rows: Vec<ProjectRow> = self.store.select(
                    Select::new(&tables::PROJECT)
                        .filter(Condition::contains(project::NAME, name))
                        .order_by(project::ID),
                    "find projects by name",
                )?;
                rows.into_iter().map(ProjectRow::into_project).collect()
            }
        }
    }

    /// A single project, without expressions.
    pub fn project(&self, id: ProjectId) -> Result<Project> {
        self.project_row(id)?.into_project()
    }

    /// The single project identified by a query.
    ///
    /// Only [`ProjectQuery::PrimaryKey`] and [`ProjectQuery::Id`] identify a
    /// single project.
    pub fn project_matching(&self, query: &ProjectQuery) -> Result<Project> {
        match query {
            ProjectQuery::PrimaryKey(key) => self
                .find::<ProjectRow>(project::ID, *key, "find project")?
                .ok_or(Error::UnknownPrimaryKey {
                    table: project::TABLE,
                    key: *key,
                })?
                .into_project(),
            ProjectQuery::Id(id) => self.project(*id),
            ProjectQuery::Hierarchy | ProjectQuery::Named(_) => Err(Error::InvalidQuery(format!(
                "{query:?} does not identify a single project"
            ))),
        }
    }

    /// Create a project and its nested expressions.
    ///
    /// Nested expressions whose identifier already exists are linked as they
    /// are; the rest are created with the configured options and linked.
    /// Returns the new project identifier.
    pub fn create_project(&self, project: &Project) -> Result<ProjectId> {
        if project.name.is_empty() {
            return Err(Error::InvalidAction("project name is empty".into()));
        }
        if !project.id.is_nil() && self.uuid_exists(&tables::PROJECT, project::UUID, project.id)? {
            return Err(Error::ExistingProjectWithId(project.id));
        }

        let id = Uuid::new_v4();
        self.store.transaction(|store| {
            let statement = Insert::new(&tables::PROJECT)
                .value(project::UUID, id)
                .value(project::NAME, project.name.as_str())
                .build();
            store.execute(&statement, "insert project")?;
            let project_row = store.last_insert_rowid();

            for nested in &project.expressions {
                let existing = if nested.id.is_nil() {
                    None
                } else {
                    self.find::<ExpressionRow>(expression::UUID, nested.id, "find expression")?
                };

                let expression_row = match existing {
                    Some(row) => row.id,
                    None => {
                        let created = self.create_expression_with(nested, self.create_options())?;
                        self.expression_row(created)?.id
                    }
                };
                self.link_rows(project_row, expression_row)?;
            }
            Ok(())
        })?;

        debug!(project = %id, expressions = project.expressions.len(), "Created project");
        Ok(id)
    }

    /// Apply a single change to a project.
    pub fn update_project(&self, id: ProjectId, update: ProjectUpdate) -> Result<()> {
        let row = self.project_row(id)?;
        match update {
            ProjectUpdate::Name(name) => {
                if name.is_empty() {
                    return Err(Error::InvalidAction("project name is empty".into()));
                }
                if name != row.name {
                    self.update_column(&tables::PROJECT, project::ID, row.id, project::NAME, name)?;
                    debug!(project = %id, "Renamed project");
                }
                Ok(())
            }
            ProjectUpdate::LinkExpression(expression_id) => {
                let expression = self.expression_row(expression_id)?;
                self.link_rows(row.id, expression.id)
            }
            ProjectUpdate::UnlinkExpression(expression_id) => {
                let expression = self.expression_row(expression_id)?;
                self.unlink_rows(row.id, expression.id)
            }
        }
    }

    /// Remove a project and its links. Linked expressions are kept.
    pub fn delete_project(&self, id: ProjectId) -> Result<()> {
        let row = self.project_row(id)?;
        self.store.transaction(|store| {
            let links = Delete::new(&tables::PROJECT_EXPRESSION)
                .filter(Condition::eq(project_expression::PROJECT_ID, row.id))
                .build();
            let unlinked = store.execute(&links, "delete project links")?;

            let project = Delete::new(&tables::PROJECT)
                .filter(Condition::eq(project::ID, row.id))
                .build();
            store.execute(&project, "delete project")?;

            debug!(project = %id, unlinked, "Deleted project");
            Ok(())
        })
    }

    fn project_hierarchy(&self, row: ProjectRow) -> Result<Project> {
        let expressions = self
            .linked_expression_rows(row.id)?
            .into_iter()
            .map(|expression| {
                let translations = self.translations_of(&expression)?;
                expression.into_expression_with(translations)
            })
            .collect::<Result<Vec<_>>>()?;
        row.into_project_with(expressions)
    }
}
