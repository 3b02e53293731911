//! Character roster for the wish demos
//!
//! Holds the fixed cast of three characters, each with a biggest wish and a
//! one-way `fulfilled` flag. The roster is owned by a single demo window and
//! only ever mutated through `fulfill`.

/// Stable identifier for a character.
pub type CharacterId = u32;

/// One character on the shrine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Unique, stable identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: &'static str,
    /// The biggest wish, shown verbatim on the card.
    pub wish: &'static str,
    /// One-way flag: flips to true exactly once, never back.
    pub fulfilled: bool,
}

/// The fixed cast: (id, name, biggest wish).
const INITIAL_CAST: &[(CharacterId, &str, &str)] = &[
    (1, "Luna", "To be free from her curse"),
    (2, "Mira", "To find true love"),
    (3, "Selene", "To see the stars one last time"),
];

/// The character list for one demo window.
#[derive(Debug, Clone)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            characters: INITIAL_CAST
                .iter()
                .map(|&(id, name, wish)| Character {
                    id,
                    name,
                    wish,
                    fulfilled: false,
                })
                .collect(),
        }
    }
}

impl Roster {
    /// Create the initial cast with no wishes fulfilled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a character by id.
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Identifier of the character at a display slot, if the slot exists.
    pub fn id_at(&self, slot: usize) -> Option<CharacterId> {
        self.characters.get(slot).map(|c| c.id)
    }

    /// Display slot of a character, the inverse of `id_at`.
    pub fn slot_of(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    /// Whether `id` names a character whose wish has been fulfilled.
    /// Unknown ids report false.
    pub fn is_fulfilled(&self, id: CharacterId) -> bool {
        self.get(id).map(|c| c.fulfilled).unwrap_or(false)
    }

    /// Whether `id` may become the target of a new hold session: the
    /// character must exist and must not be fulfilled yet.
    pub fn is_eligible(&self, id: CharacterId) -> bool {
        self.get(id).map(|c| !c.fulfilled).unwrap_or(false)
    }

    /// Fulfill a character's wish.
    ///
    /// One-way: returns true only when the flag newly flipped, false for
    /// unknown ids and for characters already fulfilled.
    pub fn fulfill(&mut self, id: CharacterId) -> bool {
        match self.characters.iter_mut().find(|c| c.id == id) {
            Some(c) if !c.fulfilled => {
                c.fulfilled = true;
                true
            }
            _ => false,
        }
    }

    /// Characters in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Number of characters in the cast.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// How many wishes have been fulfilled so far.
    pub fn fulfilled_count(&self) -> usize {
        self.characters.iter().filter(|c| c.fulfilled).count()
    }

    /// Whether every wish on the roster has been fulfilled.
    pub fn all_fulfilled(&self) -> bool {
        self.characters.iter().all(|c| c.fulfilled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_cast() {
        let roster = Roster::new();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.fulfilled_count(), 0);
        assert!(!roster.all_fulfilled());

        let luna = roster.get(1).unwrap();
        assert_eq!(luna.name, "Luna");
        assert_eq!(luna.wish, "To be free from her curse");
        assert!(!luna.fulfilled);

        assert_eq!(roster.get(2).unwrap().name, "Mira");
        assert_eq!(roster.get(3).unwrap().name, "Selene");
    }

    #[test]
    fn test_slot_lookup() {
        let roster = Roster::new();
        assert_eq!(roster.id_at(0), Some(1));
        assert_eq!(roster.id_at(2), Some(3));
        assert_eq!(roster.id_at(3), None);

        assert_eq!(roster.slot_of(1), Some(0));
        assert_eq!(roster.slot_of(3), Some(2));
        assert_eq!(roster.slot_of(9), None);
    }

    #[test]
    fn test_fulfill_is_one_way() {
        let mut roster = Roster::new();
        assert!(roster.fulfill(2));
        assert!(roster.is_fulfilled(2));
        assert!(!roster.is_eligible(2));

        // A second fulfill reports no change and the flag stays set.
        assert!(!roster.fulfill(2));
        assert!(roster.is_fulfilled(2));
        assert_eq!(roster.fulfilled_count(), 1);
    }

    #[test]
    fn test_unknown_ids() {
        let mut roster = Roster::new();
        assert!(roster.get(9).is_none());
        assert!(!roster.is_fulfilled(9));
        assert!(!roster.is_eligible(9));
        assert!(!roster.fulfill(9));
        assert_eq!(roster.fulfilled_count(), 0);
    }

    #[test]
    fn test_all_fulfilled() {
        let mut roster = Roster::new();
        roster.fulfill(1);
        roster.fulfill(2);
        assert!(!roster.all_fulfilled());
        roster.fulfill(3);
        assert!(roster.all_fulfilled());
        assert_eq!(roster.fulfilled_count(), 3);
    }
}
