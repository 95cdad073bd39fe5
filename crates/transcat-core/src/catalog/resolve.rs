use tracing::debug;
use transcat_proto::{Expression, LocaleResolution};

use super::Catalog;
use crate::error::Result;
use crate::schema::tables::{self, expression};
use crate::schema::ExpressionRow;
use crate::sql::Select;

impl Catalog {
    /// The best translations of every expression for a locale.
    ///
    /// An expression with translations in exactly the requested locale gets
    /// those. Otherwise, when fallback is allowed and the locale has a script
    /// or region, it gets its base-language translations. Expressions with
    /// neither are left out. Each returned expression carries only the
    /// translations chosen for it, and results are ordered by name then key.
    pub fn resolve(&self, resolution: &LocaleResolution) -> Result<Vec<Expression>> {
        let locale = &resolution.locale;
        let base = locale.base();

        let rows: Vec<ExpressionRow> = self.store.select(
            Select::new(&tables::EXPRESSION)
                .order_by(expression::NAME)
                .order_by(expression::KEY),
            "list expressions for export",
        )?;

        let mut resolved = Vec::new();
        let mut fell_back = 0;
        for row in rows {
            let mut chosen = self.translation_rows_with_locale(row.id, locale)?;
            if chosen.is_empty() && resolution.fallback && !locale.is_base() {
                chosen = self.translation_rows_with_locale(row.id, &base)?;
                if !chosen.is_empty() {
                    fell_back += 1;
                }
            }
            if chosen.is_empty() {
                continue;
            }

            let owner = row.uuid()?;
            let translations = chosen
                .into_iter()
                .map(|t| t.into_translation(owner))
                .collect::<Result<Vec<_>>>()?;
            resolved.push(row.into_expression_with(translations)?);
        }

        debug!(
            locale = %locale,
            fallback = resolution.fallback,
            resolved = resolved.len(),
            fell_back,
            "Resolved expressions for locale"
        );
        Ok(resolved)
    }

    /// [`Catalog::resolve`] for the configured default locale.
    pub fn resolve_default(&self, fallback: bool) -> Result<Vec<Expression>> {
        let resolution = LocaleResolution::new(self.config.default_locale()).with_fallback(fallback);
        self.resolve(&resolution)
    }
}
