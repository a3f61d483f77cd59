use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Jour ouvré (lundi → vendredi)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Identifiant fort pour Slot, de la forme `"{jour}-{HHMM}"`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn from_parts(day: Weekday, time_id: &str) -> Self {
        Self(format!("{}-{}", day.as_str(), time_id))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Créneau réservable de 30 minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub day: Weekday,
    /// Heure seule, `HHMM`
    pub time_id: String,
    pub start: NaiveTime,
    /// Libellé 12 h (`9:00 AM`, `12:30 PM`)
    pub display: String,
}

impl Slot {
    pub fn new(day: Weekday, start: NaiveTime) -> Self {
        let time_id = time_id_of(start);
        Self {
            id: SlotId::from_parts(day, &time_id),
            day,
            time_id,
            start,
            display: display_label(start),
        }
    }
}

pub(crate) fn time_id_of(t: NaiveTime) -> String {
    t.format("%H%M").to_string()
}

pub(crate) fn display_label(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Membre de l'équipe. Le nom sert de clé (unicité non imposée).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Créneaux libres, hors restrictions globales
    #[serde(default)]
    pub availability: BTreeSet<SlotId>,
}

impl Member {
    pub fn new<N: Into<String>>(name: N, availability: BTreeSet<SlotId>) -> Self {
        Self {
            name: name.into(),
            availability,
        }
    }

    pub fn is_available(&self, slot: &SlotId) -> bool {
        self.availability.contains(slot)
    }
}

/// Affectations : créneau → membres, dans l'ordre d'affectation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentMap(BTreeMap<SlotId, Vec<String>>);

impl AssignmentMap {
    /// Une entrée vide par créneau du catalogue.
    pub fn empty_for<'a, I>(slots: I) -> Self
    where
        I: IntoIterator<Item = &'a Slot>,
    {
        Self(slots.into_iter().map(|s| (s.id.clone(), Vec::new())).collect())
    }

    pub fn roster(&self, slot: &SlotId) -> &[String] {
        self.0.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn roster_mut(&mut self, slot: &SlotId) -> &mut Vec<String> {
        self.0.entry(slot.clone()).or_default()
    }

    pub fn contains(&self, slot: &SlotId, member: &str) -> bool {
        self.roster(slot).iter().any(|n| n == member)
    }

    /// Nombre de demi-heures affectées à `member`.
    pub fn half_slots_for(&self, member: &str) -> usize {
        self.0
            .values()
            .filter(|roster| roster.iter().any(|n| n == member))
            .count()
    }

    pub fn has_any_assignment(&self) -> bool {
        self.0.values().any(|roster| !roster.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotId, &Vec<String>)> {
        self.0.iter()
    }

    pub(crate) fn strip_member(&mut self, member: &str) -> usize {
        let mut removed = 0;
        for roster in self.0.values_mut() {
            let before = roster.len();
            roster.retain(|n| n != member);
            removed += before - roster.len();
        }
        removed
    }
}
