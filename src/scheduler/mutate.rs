use super::{OverrideError, Scheduler};
use crate::model::{Member, SlotId};

fn find_member<'a>(scheduler: &'a Scheduler, name: &str) -> Result<&'a Member, OverrideError> {
    scheduler
        .members
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| OverrideError::UnknownMember(name.to_string()))
}

fn ensure_slot(scheduler: &Scheduler, slot: &SlotId) -> Result<(), OverrideError> {
    if scheduler.catalog.contains(slot) {
        Ok(())
    } else {
        Err(OverrideError::UnknownSlot(slot.as_str().to_string()))
    }
}

/// Vérifie que `member` peut légalement travailler sur `slot`.
fn ensure_workable(scheduler: &Scheduler, member: &Member, slot: &SlotId) -> Result<(), OverrideError> {
    if scheduler.restrictions.contains(slot) {
        return Err(OverrideError::RestrictedSlot(slot.clone()));
    }
    if !member.is_available(slot) {
        return Err(OverrideError::Unavailable {
            member: member.name.clone(),
            slot: slot.clone(),
        });
    }
    Ok(())
}

/// Heures et taille de roster projetées, comparées après insertion.
fn ensure_capacity(
    scheduler: &Scheduler,
    member: &str,
    projected_half_slots: usize,
    projected_roster_len: usize,
) -> Result<(), OverrideError> {
    if projected_half_slots > scheduler.config.max_half_slots() {
        return Err(OverrideError::ExceedsMaxHours {
            member: member.to_string(),
            limit: scheduler.config.max_hours_limit,
        });
    }
    if projected_roster_len > scheduler.config.people_per_shift {
        return Err(OverrideError::SlotFull {
            capacity: scheduler.config.people_per_shift,
        });
    }
    Ok(())
}

pub(super) fn move_member(
    scheduler: &mut Scheduler,
    name: &str,
    from: &SlotId,
    to: &SlotId,
) -> Result<(), OverrideError> {
    let member = find_member(scheduler, name)?;
    ensure_slot(scheduler, from)?;
    ensure_slot(scheduler, to)?;
    if from == to {
        return Err(OverrideError::SameSlot);
    }
    if !scheduler.assignments.contains(from, name) {
        return Err(OverrideError::NotInSlot {
            member: name.to_string(),
            slot: from.clone(),
        });
    }
    ensure_workable(scheduler, member, to)?;

    let already_in_target = scheduler.assignments.contains(to, name);
    let current = scheduler.assignments.half_slots_for(name);
    let projected = current - 1 + usize::from(!already_in_target);
    let target_len = scheduler.assignments.roster(to).len() + usize::from(!already_in_target);
    ensure_capacity(scheduler, name, projected, target_len)?;

    scheduler.assignments.roster_mut(from).retain(|n| n != name);
    let target = scheduler.assignments.roster_mut(to);
    if !already_in_target {
        target.push(name.to_string());
    }
    Ok(())
}

pub(super) fn add_person(
    scheduler: &mut Scheduler,
    name: &str,
    slot: &SlotId,
) -> Result<(), OverrideError> {
    let member = find_member(scheduler, name)?;
    ensure_slot(scheduler, slot)?;
    ensure_workable(scheduler, member, slot)?;
    if scheduler.assignments.contains(slot, name) {
        return Err(OverrideError::AlreadyAssigned(name.to_string()));
    }

    let projected = scheduler.assignments.half_slots_for(name) + 1;
    let roster_len = scheduler.assignments.roster(slot).len() + 1;
    ensure_capacity(scheduler, name, projected, roster_len)?;

    scheduler.assignments.roster_mut(slot).push(name.to_string());
    Ok(())
}

pub(super) fn remove_person(scheduler: &mut Scheduler, name: &str, slot: &SlotId) -> bool {
    if !scheduler.assignments.contains(slot, name) {
        return false;
    }
    scheduler.assignments.roster_mut(slot).retain(|n| n != name);
    true
}

pub(super) fn remove_member(scheduler: &mut Scheduler, name: &str) -> bool {
    let before = scheduler.members.len();
    scheduler.members.retain(|m| m.name != name);
    let stripped = scheduler.assignments.strip_member(name);
    before != scheduler.members.len() || stripped > 0
}
