use crate::availability::parse_slot_list;
use crate::catalog::SlotCatalog;
use crate::config::ScheduleConfig;
use crate::model::{AssignmentMap, Member};
use crate::projection::ScheduleView;
use crate::restriction::RestrictionSet;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Charge et valide la configuration JSON.
pub fn load_config_json<P: AsRef<Path>>(path: P) -> anyhow::Result<ScheduleConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let config: ScheduleConfig =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Import de membres depuis CSV: header `name,busy_slots` (ids séparés par des virgules)
pub fn import_members_csv<P: AsRef<Path>>(
    path: P,
    catalog: &SlotCatalog,
    restrictions: &RestrictionSet,
) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid member row (empty name)");
        }
        let busy = parse_slot_list(rec.get(1).unwrap_or(""));
        for id in busy.iter().filter(|id| !catalog.contains(id)) {
            tracing::warn!(member = name, slot = %id, "ignoring busy slot outside the catalog");
        }
        out.push(Member::from_busy(name, busy, catalog, restrictions));
    }
    Ok(out)
}

/// Export JSON de la vue, écrit de manière atomique.
pub fn export_view_json<P: AsRef<Path>>(path: P, view: &ScheduleView) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(view)?;
    let mut tmp = NamedTempFile::new_in(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
    )
    .with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export CSV du planning: header `slot_id,day,time,display,members`
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    catalog: &SlotCatalog,
    assignments: &AssignmentMap,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["slot_id", "day", "time", "display", "members"])?;
    for slot in catalog.iter() {
        let members = assignments.roster(&slot.id).join(";");
        w.write_record([
            slot.id.as_str(),
            slot.day.as_str(),
            slot.time_id.as_str(),
            slot.display.as_str(),
            members.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
