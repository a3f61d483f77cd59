use crate::config::hhmm_from_minutes;
use crate::model::{display_label, Slot, SlotId, Weekday};
use chrono::NaiveTime;

/// Univers ordonné des créneaux réservables (lundi → vendredi, puis heure croissante).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
}

impl SlotCatalog {
    /// Deux créneaux (`:00`, `:30`) par heure de `[start_hour, end_hour)`, pour chaque jour.
    pub fn generate(start_hour: u32, end_hour: u32) -> Self {
        let mut slots = Vec::new();
        for day in Weekday::ALL {
            for hour in start_hour..end_hour {
                for minute in [0, 30] {
                    if let Some(start) = NaiveTime::from_hms_opt(hour, minute, 0) {
                        slots.push(Slot::new(day, start));
                    }
                }
            }
        }
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn get(&self, id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Créneau immédiatement précédent, le même jour.
    pub fn previous_same_day(&self, index: usize) -> Option<&Slot> {
        let current = self.slots.get(index)?;
        let prev = self.slots.get(index.checked_sub(1)?)?;
        (prev.day == current.day).then_some(prev)
    }

    /// Heures (`HHMM`) distinctes, dans l'ordre du catalogue.
    pub fn time_ids(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for slot in &self.slots {
            if !out.contains(&slot.time_id.as_str()) {
                out.push(&slot.time_id);
            }
        }
        out
    }

    pub fn display_for_time(&self, time_id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.time_id == time_id)
            .map(|s| s.display.as_str())
    }
}

/// Bornes proposées pour une réunion : chaque demi-heure de `start_hour:00`
/// à `end_hour:00` inclus, avec son libellé 12 h.
pub fn time_options(start_hour: u32, end_hour: u32) -> Vec<(String, String)> {
    (start_hour * 60..=end_hour * 60)
        .step_by(30)
        .filter_map(|minutes| {
            let hhmm = hhmm_from_minutes(minutes)?;
            let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)?;
            Some((hhmm, display_label(time)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_day_major() {
        let catalog = SlotCatalog::generate(9, 11);
        assert_eq!(catalog.len(), 20);
        let ids: Vec<&str> = catalog.iter().take(5).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["mon-0900", "mon-0930", "mon-1000", "mon-1030", "tue-0900"]);
    }

    #[test]
    fn previous_slot_stops_at_day_boundary() {
        let catalog = SlotCatalog::generate(9, 10);
        // mon-0900, mon-0930, tue-0900, ...
        assert_eq!(catalog.previous_same_day(1).map(|s| s.id.as_str()), Some("mon-0900"));
        assert!(catalog.previous_same_day(2).is_none());
        assert!(catalog.previous_same_day(0).is_none());
    }

    #[test]
    fn time_options_include_end_bound() {
        let opts = time_options(11, 13);
        let values: Vec<&str> = opts.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(values, ["1100", "1130", "1200", "1230", "1300"]);
        assert_eq!(opts[2].1, "12:00 PM");
    }
}
