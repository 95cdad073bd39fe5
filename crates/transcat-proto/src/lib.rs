//! Transcat protocol types.
//!
//! This crate defines the records stored by the Transcat catalog and the
//! typed descriptors callers use to query and update them.
//!
//! # Modules
//!
//! - [`locale`] - Language, script, and region codes
//! - [`project`], [`expression`], [`translation`] - Entity records
//! - [`query`] - Per-entity lookup descriptors and locale resolution
//! - [`update`] - Per-entity update descriptors
//! - [`error`] - Locale parsing errors

pub mod error;
pub mod expression;
pub mod locale;
pub mod project;
pub mod query;
pub mod translation;
pub mod update;

pub use error::LocaleError;
pub use expression::{Expression, ExpressionId};
pub use locale::{LanguageCode, Locale, RegionCode, ScriptCode};
pub use project::{Project, ProjectId};
pub use query::{ExpressionQuery, LocaleResolution, ProjectQuery, TranslationQuery};
pub use translation::{Translation, TranslationId};
pub use update::{ExpressionUpdate, ProjectUpdate, TranslationUpdate};

/// Re-export of the identifier type used by every record.
pub use uuid::Uuid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_builder() {
        let expression = Expression::new("greeting", "Greeting", LanguageCode::en())
            .with_context("Shown on the home screen")
            .with_feature("onboarding")
            .with_translation(Translation::new(Uuid::nil(), LanguageCode::en(), "Hello"));

        assert!(expression.id.is_nil());
        assert_eq!(expression.translations.len(), 1);
        assert!(expression.shallow().translations.is_empty());
        assert_eq!(expression.shallow().feature.as_deref(), Some("onboarding"));
    }

    #[test]
    fn test_translation_locale() {
        let translation = Translation::new(Uuid::nil(), "en".parse().unwrap(), "Colour")
            .with_region("GB".parse().unwrap());

        let locale = translation.locale();
        assert_eq!(locale.identifier(), "en_GB");
        assert!(translation.matches_locale(&locale));
        assert!(!translation.matches_locale(&locale.base()));
    }

    #[test]
    fn test_record_json() {
        let project = Project::new("Mobile")
            .with_expression(Expression::new("ok", "OK", LanguageCode::en()));

        let json = serde_json::to_string(&project).unwrap();
        let decoded: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, project);
    }
}
