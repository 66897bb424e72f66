use revisent_core::ImpactFactor;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::impact;
use crate::services::{SharedConfig, open_db};
use revisent_db::Db;

#[derive(Clone)]
pub struct ImpactService {
    config: SharedConfig,
}

impl ImpactService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn list_factors(&self) -> Result<Vec<ImpactFactor>> {
        Ok(self.db()?.list_impact_factors()?)
    }

    pub fn replace_factors(&self, factors: &[ImpactFactor]) -> Result<usize> {
        if let Some(factor) = factors
            .iter()
            .find(|factor| !factor.kg_co2e_per_item.is_finite())
        {
            return Err(AppError::InvalidInput(format!(
                "impact factor for {} must be a finite number",
                factor.category.as_str()
            )));
        }
        let mut db = self.db()?;
        let updated = db.replace_impact_factors(factors)?;
        if let Err(err) =
            impact::write_impact_defaults(&self.config.impact_defaults_path, factors)
        {
            warn!(error = %err, "failed to update impact defaults");
        }
        Ok(updated)
    }
}
