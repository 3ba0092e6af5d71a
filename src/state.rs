//! Session state: where the player is, what they have achieved, what they carry

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

/// Story milestones the player can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    HasPuppy,
    WhiteRoomExitOpen,
    SmallKeyholeRevealed,
    HasSmallKey,
    FossilNoteFound,
    GalleryNoteFound,
    YardNoteFound,
    GardenNoteFound,
    WorkshopNoteFound,
    HasKeyring,
    HasDogToy,
    HasSnowglobe,
    HasTeleGem,
    DiscoveredLab,
    Injured,
    Dead,
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Current room plus the milestones reached so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub location: String,
    milestones: BTreeSet<Milestone>,
}

impl PlayerState {
    pub fn new(location: impl Into<String>) -> Self {
        PlayerState {
            location: location.into(),
            milestones: BTreeSet::new(),
        }
    }

    pub fn has(&self, milestone: Milestone) -> bool {
        self.milestones.contains(&milestone)
    }

    /// Record a milestone; returns true the first time it is reached
    pub fn achieve(&mut self, milestone: Milestone) -> bool {
        self.milestones.insert(milestone)
    }

    pub fn milestones(&self) -> impl Iterator<Item = Milestone> + '_ {
        self.milestones.iter().copied()
    }

    pub fn is_dead(&self) -> bool {
        self.has(Milestone::Dead)
    }
}

/// Ordered bag of item names; duplicates allowed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self, item: &str) {
        self.items.push(item.to_string());
    }

    /// Remove the first entry with this name; false when it isn't carried
    ///
    /// `take x` then `drop x` gives back the same items and counts, but when
    /// `x` was already carried the earlier copy goes, so the order can shift.
    pub fn drop_item(&mut self, item: &str) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Everything that belongs to one playthrough
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub player: PlayerState,
    pub inventory: Inventory,
    quit_requested: bool,
}

impl Session {
    pub fn new(start_room: impl Into<String>) -> Self {
        Session {
            player: PlayerState::new(start_room),
            inventory: Inventory::new(),
            quit_requested: false,
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
