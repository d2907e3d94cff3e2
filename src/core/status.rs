use crate::config::{SeederConfig, ServiceTarget};
use crate::domain::ports::DatabaseGateway;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub target: ServiceTarget,
    pub table: &'static str,
    pub count: std::result::Result<i64, String>,
}

/// Counts rows of the status table of each database that has one. Each
/// target is queried independently.
pub async fn status_overview<G: DatabaseGateway + ?Sized>(
    gateway: &G,
    config: &SeederConfig,
) -> Vec<StatusRow> {
    let mut rows = Vec::new();
    for target in ServiceTarget::ALL {
        let Some(table) = target.status_table() else {
            continue;
        };
        let count = gateway
            .count_rows(config.database_url(target), table)
            .await
            .map_err(|e| e.to_string());
        if let Err(e) = &count {
            tracing::debug!("Status query on {} failed: {}", target, e);
        }
        rows.push(StatusRow {
            target,
            table,
            count,
        });
    }
    rows
}

pub fn render_status<W: Write>(rows: &[StatusRow], out: &mut W) -> std::io::Result<()> {
    writeln!(out, "========== STATUS DASHBOARD ==========")?;
    writeln!(out, "|   Database         |   Table         |   Count   |")?;
    writeln!(out, "---------------------------------------------------")?;
    for row in rows {
        match &row.count {
            Ok(count) => writeln!(
                out,
                "| {:<17} | {:<14} | {:>8}   |",
                row.target.db_name(),
                row.table,
                count
            )?,
            Err(e) => {
                writeln!(
                    out,
                    "| {:<17} | {:<14} | ERROR    |",
                    row.target.db_name(),
                    row.table
                )?;
                writeln!(out, "  [ERROR] {}", e)?;
            }
        }
    }
    writeln!(out, "=====================================")?;
    Ok(())
}
