use super::tiebreak::{Picker, TieBreak};
use super::Scheduler;
use crate::catalog::SlotCatalog;
use crate::config::ScheduleConfig;
use crate::model::{AssignmentMap, Member};
use crate::restriction::RestrictionSet;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
struct Load {
    half_slots: usize,
    worked: [bool; 5],
}

/// Remplissage glouton, créneau par créneau, dans l'ordre du catalogue.
///
/// Un créneau sans candidat éligible reste incomplet : ce n'est pas une erreur.
/// Le résultat remplace intégralement le planning précédent.
pub fn assign(
    catalog: &SlotCatalog,
    restrictions: &RestrictionSet,
    members: &[Member],
    config: &ScheduleConfig,
    tie_break: TieBreak,
) -> AssignmentMap {
    let mut assignments = AssignmentMap::empty_for(catalog.iter());
    if members.is_empty() {
        return assignments;
    }

    let max_half_slots = config.max_half_slots();
    let mut loads: HashMap<&str, Load> = members
        .iter()
        .map(|m| (m.name.as_str(), Load::default()))
        .collect();
    let mut picker = Picker::new(tie_break);
    let mut under_filled = 0usize;

    for (index, slot) in catalog.iter().enumerate() {
        if restrictions.contains(&slot.id) {
            continue;
        }

        let anchor: Option<String> = if config.overlap_active() {
            catalog
                .previous_same_day(index)
                .and_then(|prev| assignments.roster(&prev.id).first().cloned())
        } else {
            None
        };

        while assignments.roster(&slot.id).len() < config.people_per_shift {
            let eligible: Vec<(&Member, (bool, usize, bool))> = members
                .iter()
                .filter(|m| m.is_available(&slot.id))
                .filter(|m| loads[m.name.as_str()].half_slots < max_half_slots)
                .filter(|m| !assignments.contains(&slot.id, &m.name))
                .map(|m| {
                    let load = loads[m.name.as_str()];
                    let is_anchor = anchor.as_deref() == Some(m.name.as_str());
                    (m, (load.worked[slot.day.index()], load.half_slots, is_anchor))
                })
                .collect();

            let Some(best) = eligible.iter().map(|(_, key)| *key).min() else {
                break;
            };
            let tied: Vec<&Member> = eligible
                .iter()
                .filter(|(_, key)| *key == best)
                .map(|(m, _)| *m)
                .collect();
            let chosen = picker.pick(&tied);

            assignments.roster_mut(&slot.id).push(chosen.name.clone());
            if let Some(load) = loads.get_mut(chosen.name.as_str()) {
                load.half_slots += 1;
                load.worked[slot.day.index()] = true;
            }
        }

        let filled = assignments.roster(&slot.id).len();
        if filled < config.people_per_shift {
            under_filled += 1;
            tracing::debug!(slot = %slot.id, filled, wanted = config.people_per_shift, "slot under-filled");
        }
    }

    tracing::info!(
        slots = catalog.len(),
        restricted = restrictions.len(),
        under_filled,
        members = members.len(),
        "schedule generated"
    );
    assignments
}

pub(super) fn run(scheduler: &mut Scheduler, tie_break: TieBreak) {
    let fresh = assign(
        &scheduler.catalog,
        &scheduler.restrictions,
        &scheduler.members,
        &scheduler.config,
        tie_break,
    );
    scheduler.assignments = fresh;
}
