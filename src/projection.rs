//! Vues dérivées du planning : grille calendrier, total d'heures, heure régulière suggérée.
//!
//! Fonction pure de `{membres, planning}` : toujours recalculée, jamais corrigée en place.

use crate::catalog::SlotCatalog;
use crate::model::{AssignmentMap, Member, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    /// jour → `HHMM` → membres ; entièrement peuplée
    pub calendar: BTreeMap<Weekday, BTreeMap<String, Vec<String>>>,
    /// membre → heures (demi-heures × 0.5)
    pub hours: BTreeMap<String, f64>,
    /// membre → `HHMM` le plus fréquent ; absent si aucune affectation
    pub consistent_time: BTreeMap<String, String>,
    pub has_any_assignment: bool,
}

impl ScheduleView {
    pub fn roster(&self, day: Weekday, time_id: &str) -> &[String] {
        self.calendar
            .get(&day)
            .and_then(|times| times.get(time_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn hours_for(&self, member: &str) -> Option<f64> {
        self.hours.get(member).copied()
    }

    /// Libellé 12 h de l'heure suggérée.
    pub fn suggestion_label<'a>(&self, member: &str, catalog: &'a SlotCatalog) -> Option<&'a str> {
        let time_id = self.consistent_time.get(member)?;
        catalog.display_for_time(time_id)
    }
}

pub fn project(assignments: &AssignmentMap, catalog: &SlotCatalog, members: &[Member]) -> ScheduleView {
    let mut calendar: BTreeMap<Weekday, BTreeMap<String, Vec<String>>> = BTreeMap::new();
    for slot in catalog.iter() {
        calendar
            .entry(slot.day)
            .or_default()
            .insert(slot.time_id.clone(), assignments.roster(&slot.id).to_vec());
    }

    let time_order = catalog.time_ids();
    let mut hours = BTreeMap::new();
    let mut consistent_time = BTreeMap::new();

    for member in members {
        let mut per_time: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total = 0usize;
        for slot in catalog.iter() {
            if assignments.contains(&slot.id, &member.name) {
                total += 1;
                *per_time.entry(slot.time_id.as_str()).or_default() += 1;
            }
        }
        hours.insert(member.name.clone(), total as f64 * 0.5);

        // égalité : la première heure du catalogue l'emporte
        let mut best: Option<(&str, usize)> = None;
        for time_id in &time_order {
            let count = per_time.get(time_id).copied().unwrap_or(0);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((*time_id, count));
            }
        }
        if let Some((time_id, _)) = best {
            consistent_time.insert(member.name.clone(), time_id.to_string());
        }
    }

    ScheduleView {
        calendar,
        hours,
        consistent_time,
        has_any_assignment: assignments.has_any_assignment(),
    }
}
