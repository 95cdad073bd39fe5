//! Update descriptors.
//!
//! Every variant changes one field, or one link, of a single record.

use serde::{Deserialize, Serialize};

use crate::expression::ExpressionId;
use crate::locale::{LanguageCode, RegionCode, ScriptCode};
use crate::project::ProjectId;

/// Changes to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectUpdate {
    /// Rename.
    Name(String),
    /// Link an expression to the project.
    LinkExpression(ExpressionId),
    /// Remove the link to an expression.
    UnlinkExpression(ExpressionId),
}

/// Changes to an expression.
///
/// `Context(None)` and `Feature(None)` clear the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionUpdate {
    /// Change the unique key.
    Key(String),
    /// Rename.
    Name(String),
    /// Change the default language.
    DefaultLanguage(LanguageCode),
    /// Set or clear the translator context.
    Context(Option<String>),
    /// Set or clear the feature tag.
    Feature(Option<String>),
    /// Link the expression to a project.
    LinkProject(ProjectId),
    /// Remove the link to a project.
    UnlinkProject(ProjectId),
}

/// Changes to a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationUpdate {
    /// Change the language.
    Language(LanguageCode),
    /// Set or clear the script.
    Script(Option<ScriptCode>),
    /// Set or clear the region.
    Region(Option<RegionCode>),
    /// Change the translated text.
    Value(String),
}
