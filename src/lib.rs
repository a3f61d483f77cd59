#![forbid(unsafe_code)]
//! Semainier — remplissage d'un planning hebdomadaire par demi-heures.
//!
//! - Catalogue de créneaux lundi → vendredi, restrictions globales (culte, réunion).
//! - Moteur glouton : disponibilités, plafond d'heures, effectif par créneau, équité.
//! - Modifications manuelles validées (déplacer, ajouter, retirer).
//! - Vues dérivées recalculées à chaque changement.

pub mod availability;
pub mod catalog;
pub mod config;
pub mod io;
pub mod model;
pub mod projection;
pub mod restriction;
pub mod scheduler;

pub use catalog::{time_options, SlotCatalog};
pub use config::{ConfigError, MeetingWindow, ScheduleConfig};
pub use model::{AssignmentMap, Member, Slot, SlotId, Weekday};
pub use projection::{project, ScheduleView};
pub use restriction::RestrictionSet;
pub use scheduler::{assign, OverrideError, SchedError, Scheduler, TieBreak};
