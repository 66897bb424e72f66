use rusqlite::params;
use revisent_core::{Category, ImpactFactor};
use tracing::warn;

use crate::Db;
use crate::error::Result;

impl Db {
    pub fn list_impact_factors(&self) -> Result<Vec<ImpactFactor>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT category, kg_co2e_per_item
            FROM impact_factor
            ORDER BY category ASC
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut factors = Vec::with_capacity(rows.len());
        for (category, kg_co2e_per_item) in rows {
            match Category::parse(&category) {
                Some(category) => factors.push(ImpactFactor {
                    category,
                    kg_co2e_per_item,
                }),
                None => warn!(category = %category, "skipping impact factor for unknown category"),
            }
        }
        Ok(factors)
    }

    pub fn replace_impact_factors(&mut self, factors: &[ImpactFactor]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM impact_factor", [])?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO impact_factor (category, kg_co2e_per_item)
                VALUES (?1, ?2)
                ON CONFLICT(category) DO UPDATE SET kg_co2e_per_item = excluded.kg_co2e_per_item
                "#,
            )?;
            for factor in factors {
                stmt.execute(params![factor.category.as_str(), factor.kg_co2e_per_item])?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }
}
