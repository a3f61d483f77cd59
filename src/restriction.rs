use crate::config::{hhmm_from_minutes, MeetingWindow};
use crate::model::SlotId;
use std::collections::BTreeSet;

/// Créneaux du culte du mardi, 11:00–12:00.
pub const DEVOTIONAL_SLOTS: [&str; 2] = ["tue-1100", "tue-1130"];

/// Créneaux bloqués pour tous les membres.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestrictionSet {
    ids: BTreeSet<SlotId>,
}

impl RestrictionSet {
    /// Suppose une réunion déjà validée (début < fin, dans la plage horaire).
    pub fn compute(include_devotional: bool, meeting: Option<&MeetingWindow>) -> Self {
        let mut ids = BTreeSet::new();
        if include_devotional {
            ids.extend(DEVOTIONAL_SLOTS.iter().map(SlotId::new));
        }
        if let Some(meeting) = meeting {
            if let Ok((start, end)) = meeting.bounds_minutes() {
                for minutes in (start..end).step_by(30) {
                    if let Some(hhmm) = hhmm_from_minutes(minutes) {
                        ids.insert(SlotId::from_parts(meeting.day, &hhmm));
                    }
                }
            }
        }
        Self { ids }
    }

    pub fn contains(&self, id: &SlotId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
