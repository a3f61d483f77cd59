mod assignment;
mod mutate;
mod tiebreak;
mod types;

pub use assignment::assign;
pub use tiebreak::TieBreak;
pub use types::{OverrideError, SchedError};

use crate::catalog::SlotCatalog;
use crate::config::ScheduleConfig;
use crate::model::{AssignmentMap, Member, SlotId};
use crate::projection::{project, ScheduleView};
use crate::restriction::RestrictionSet;

/// Scheduler : seul propriétaire des membres et du planning d'une session.
///
/// La configuration, le catalogue et les restrictions sont figés à la création.
#[derive(Debug)]
pub struct Scheduler {
    config: ScheduleConfig,
    catalog: SlotCatalog,
    restrictions: RestrictionSet,
    members: Vec<Member>,
    assignments: AssignmentMap,
}

impl Scheduler {
    /// Valide la configuration puis prépare un planning vide.
    pub fn new(config: ScheduleConfig) -> Result<Self, SchedError> {
        config.validate()?;
        let catalog = SlotCatalog::generate(config.shift_start_hour, config.shift_end_hour);
        let restrictions = RestrictionSet::compute(config.include_devotional, config.meeting.as_ref());
        let assignments = AssignmentMap::empty_for(catalog.iter());
        Ok(Self {
            config,
            catalog,
            restrictions,
            members: Vec::new(),
            assignments,
        })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }
    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }
    pub fn restrictions(&self) -> &RestrictionSet {
        &self.restrictions
    }
    pub fn members(&self) -> &[Member] {
        &self.members
    }
    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    pub fn find_member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Inscrit un membre à partir de ses créneaux occupés.
    pub fn add_member<N, I>(&mut self, name: N, busy: I) -> Result<&Member, SchedError>
    where
        N: Into<String>,
        I: IntoIterator<Item = SlotId>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchedError::EmptyMemberName);
        }
        if self.find_member(&name).is_some() {
            tracing::warn!(member = %name, "member name already registered");
        }
        let member = Member::from_busy(name, busy, &self.catalog, &self.restrictions);
        self.push_member(member)
    }

    /// Inscrit un membre déjà construit ; sa disponibilité est refiltrée.
    pub fn add_people(&mut self, people: Vec<Member>) -> Result<(), SchedError> {
        for member in people {
            self.push_member(member)?;
        }
        Ok(())
    }

    fn push_member(&mut self, mut member: Member) -> Result<&Member, SchedError> {
        if member.name.trim().is_empty() {
            return Err(SchedError::EmptyMemberName);
        }
        member
            .availability
            .retain(|id| self.catalog.contains(id) && !self.restrictions.contains(id));
        tracing::debug!(member = %member.name, available = member.availability.len(), "member added");
        self.members.push(member);
        Ok(&self.members[self.members.len() - 1])
    }

    /// Relance le moteur ; les modifications manuelles précédentes sont perdues.
    pub fn generate(&mut self, tie_break: TieBreak) {
        assignment::run(self, tie_break)
    }

    pub fn move_member(&mut self, name: &str, from: &SlotId, to: &SlotId) -> Result<(), OverrideError> {
        mutate::move_member(self, name, from, to)
            .inspect_err(|err| tracing::debug!(member = name, %from, %to, %err, "move rejected"))
    }

    pub fn add_person(&mut self, name: &str, slot: &SlotId) -> Result<(), OverrideError> {
        mutate::add_person(self, name, slot)
            .inspect_err(|err| tracing::debug!(member = name, %slot, %err, "add rejected"))
    }

    /// Idempotent ; renvoie `true` si le membre était présent.
    pub fn remove_person(&mut self, name: &str, slot: &SlotId) -> bool {
        mutate::remove_person(self, name, slot)
    }

    pub fn remove_member(&mut self, name: &str) -> bool {
        mutate::remove_member(self, name)
    }

    /// Vue dérivée, recalculée à chaque appel.
    pub fn view(&self) -> ScheduleView {
        project(&self.assignments, &self.catalog, &self.members)
    }

    /// Créneaux non restreints dont le roster est incomplet.
    pub fn under_filled(&self) -> Vec<SlotId> {
        self.catalog
            .iter()
            .filter(|s| !self.restrictions.contains(&s.id))
            .filter(|s| self.assignments.roster(&s.id).len() < self.config.people_per_shift)
            .map(|s| s.id.clone())
            .collect()
    }
}
