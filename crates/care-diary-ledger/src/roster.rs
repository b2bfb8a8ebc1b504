//! Resident roster: who lives in which room

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::collection::{Collection, ROOM_DEPARTED, ROOM_ON_HOLD};
use crate::error::LedgerResult;
use crate::storage;

/// A registered resident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    /// Full name, as written in the shift log
    pub name: String,
    /// Room number, `退所` or `保留`
    pub room: String,
    /// Date of birth
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Gender as recorded by the facility
    #[serde(default)]
    pub gender: Option<String>,
}

impl Resident {
    /// Resident occupies a numbered room
    pub fn is_active(&self) -> bool {
        self.room != ROOM_DEPARTED && self.room != ROOM_ON_HOLD
    }
}

/// One line of the printed roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSlot<'a> {
    /// A numbered room and its occupant, if any
    Room(String, Option<&'a Resident>),
    /// A resident waiting for a room
    OnHold(&'a Resident),
}

/// The facility's resident directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    residents: Vec<Resident>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a roster from JSON; a missing file is an empty roster
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save the roster as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LedgerResult<()> {
        storage::write_json(path.as_ref(), self)
    }

    /// All residents in registration order
    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    /// Find a resident by name
    pub fn get(&self, name: &str) -> Option<&Resident> {
        self.residents.iter().find(|r| r.name == name)
    }

    /// Room of a resident
    pub fn room_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|r| r.room.as_str())
    }

    /// Record book a resident's entries go to
    pub fn collection_of(&self, name: &str) -> Collection {
        Collection::for_room(self.room_of(name))
    }

    /// Register or update a resident
    ///
    /// A known name has its room, birthday and gender replaced. A new resident
    /// moving into a room held by another active resident puts that occupant on
    /// hold; the displaced name is returned.
    pub fn upsert(&mut self, resident: Resident) -> Option<String> {
        if let Some(existing) = self.residents.iter_mut().find(|r| r.name == resident.name) {
            *existing = resident;
            return None;
        }

        let displaced = if resident.is_active() {
            self.residents
                .iter_mut()
                .find(|r| r.is_active() && r.room == resident.room)
                .map(|occupant| {
                    occupant.room = ROOM_ON_HOLD.into();
                    tracing::info!(name = %occupant.name, "room taken over, resident put on hold");
                    occupant.name.clone()
                })
        } else {
            None
        };

        self.residents.push(resident);
        displaced
    }

    /// Roster lines: rooms 201-225 and 301-325 in order, then on-hold residents by name
    pub fn ordered(&self) -> Vec<RosterSlot<'_>> {
        let rooms = (201..=225).chain(301..=325).map(|n: u32| n.to_string());

        let mut slots: Vec<RosterSlot<'_>> = rooms
            .map(|room| {
                let occupant = self
                    .residents
                    .iter()
                    .find(|r| r.is_active() && r.room == room);
                RosterSlot::Room(room, occupant)
            })
            .collect();

        let mut on_hold: Vec<&Resident> = self
            .residents
            .iter()
            .filter(|r| r.room == ROOM_ON_HOLD)
            .collect();
        on_hold.sort_by(|a, b| a.name.cmp(&b.name));
        slots.extend(on_hold.into_iter().map(RosterSlot::OnHold));

        slots
    }
}
