use crate::objectmon::ObjectmonInst;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const PARTY_LIMIT: usize = 6;
pub const BOX_COUNT: usize = 12;
pub const BOX_CAPACITY: usize = 30;

/// Item ids the prototype actually stocks.
pub const ITEM_OIL_CAN: u16 = 1;
pub const ITEM_CAPSULE: u16 = 3;

pub const STARTING_MONEY: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub map: String,
    pub x: i32,
    pub y: i32,
    pub facing: Facing,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            map: "StarterTown".to_string(),
            x: 5,
            y: 5,
            facing: Facing::Down,
        }
    }
}

/// Item storage, split into the four pockets the bag screen presents:
/// general items, key items, capture capsules, and fusion parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    pub items: HashMap<u16, u16>,
    pub key_items: HashMap<u16, bool>,
    pub capsules: HashMap<u16, u16>,
    pub fusion_parts: HashMap<u16, u16>,
}

impl Bag {
    pub fn add_item(&mut self, item_id: u16, count: u16) {
        *self.items.entry(item_id).or_insert(0) += count;
    }

    pub fn add_capsules(&mut self, capsule_id: u16, count: u16) {
        *self.capsules.entry(capsule_id).or_insert(0) += count;
    }

    pub fn capsule_count(&self, capsule_id: u16) -> u16 {
        self.capsules.get(&capsule_id).copied().unwrap_or(0)
    }

    /// Key items are owned or not; there is no count to track.
    pub fn grant_key_item(&mut self, item_id: u16) {
        self.key_items.insert(item_id, true);
    }

    pub fn has_key_item(&self, item_id: u16) -> bool {
        self.key_items.get(&item_id).copied().unwrap_or(false)
    }

    pub fn add_fusion_parts(&mut self, part_id: u16, count: u16) {
        *self.fusion_parts.entry(part_id).or_insert(0) += count;
    }

    pub fn fusion_part_count(&self, part_id: u16) -> u16 {
        self.fusion_parts.get(&part_id).copied().unwrap_or(0)
    }

    /// Spends one capsule. Returns false (touching nothing) if none remain.
    pub fn use_capsule(&mut self, capsule_id: u16) -> bool {
        match self.capsules.get_mut(&capsule_id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Which species the player has encountered and which they own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objectdex {
    seen: HashSet<u16>,
    caught: HashSet<u16>,
}

impl Objectdex {
    pub fn mark_seen(&mut self, dex_number: u16) {
        self.seen.insert(dex_number);
    }

    /// Caught implies seen.
    pub fn mark_caught(&mut self, dex_number: u16) {
        self.seen.insert(dex_number);
        self.caught.insert(dex_number);
    }

    pub fn has_seen(&self, dex_number: u16) -> bool {
        self.seen.contains(&dex_number)
    }

    pub fn has_caught(&self, dex_number: u16) -> bool {
        self.caught.contains(&dex_number)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn caught_count(&self) -> usize {
        self.caught.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSpeed {
    Slow,
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStyle {
    Shift,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundMode {
    Mono,
    Stereo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub text_speed: TextSpeed,
    pub battle_style: BattleStyle,
    pub sound: SoundMode,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            text_speed: TextSpeed::Medium,
            battle_style: BattleStyle::Set,
            sound: SoundMode::Stereo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub id: u16,
    pub money: u32,
    pub badges: [bool; 8],
    pub position: Position,
    pub party: Vec<ObjectmonInst>,
    pub boxes: Vec<Vec<ObjectmonInst>>,
    pub bag: Bag,
    pub objectdex: Objectdex,
    pub settings: Settings,
}

impl Player {
    /// A fresh player with the standard starting kit: some money, a few oil
    /// cans, a stack of capsules, and empty storage.
    pub fn new(name: impl Into<String>, id: u16) -> Self {
        let mut bag = Bag::default();
        bag.add_item(ITEM_OIL_CAN, 5);
        bag.add_capsules(ITEM_CAPSULE, 10);
        Player {
            name: name.into(),
            id,
            money: STARTING_MONEY,
            badges: [false; 8],
            position: Position::default(),
            party: Vec::new(),
            boxes: vec![Vec::new(); BOX_COUNT],
            bag,
            objectdex: Objectdex::default(),
            settings: Settings::default(),
        }
    }

    /// Adds to the party, overflowing into the first box with room. Returns
    /// true if the creature landed in the party.
    pub fn add_objectmon(&mut self, inst: ObjectmonInst) -> bool {
        self.objectdex.mark_caught(inst.species.id());
        if self.party.len() < PARTY_LIMIT {
            self.party.push(inst);
            return true;
        }
        for box_ in self.boxes.iter_mut() {
            if box_.len() < BOX_CAPACITY {
                box_.push(inst);
                return false;
            }
        }
        // Every box is full; the last one stretches rather than losing the
        // creature.
        if let Some(last) = self.boxes.last_mut() {
            last.push(inst);
        }
        false
    }

    pub fn has_usable_objectmon(&self) -> bool {
        self.party.iter().any(|inst| !inst.is_fainted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn mint(species_id: u16) -> ObjectmonInst {
        let mut rng = GameRng::scripted(vec![10; 8]);
        ObjectmonInst::from_species_id(species_id, 5, None, &mut rng).unwrap()
    }

    #[test]
    fn new_player_gets_the_starting_kit() {
        let player = Player::new("Casey", 12345);
        assert_eq!(player.money, STARTING_MONEY);
        assert_eq!(player.bag.capsule_count(ITEM_CAPSULE), 10);
        assert_eq!(player.bag.items.get(&ITEM_OIL_CAN), Some(&5));
        assert_eq!(player.boxes.len(), BOX_COUNT);
        assert!(player.badges.iter().all(|earned| !earned));
        assert!(player.party.is_empty());
    }

    #[test]
    fn key_items_and_fusion_parts_have_their_own_pockets() {
        let mut bag = Bag::default();
        bag.grant_key_item(7);
        bag.add_fusion_parts(2, 3);
        assert!(bag.has_key_item(7));
        assert!(!bag.has_key_item(8));
        assert_eq!(bag.fusion_part_count(2), 3);
        assert!(bag.items.is_empty());
    }

    #[test]
    fn default_settings_match_the_options_menu() {
        let settings = Settings::default();
        assert_eq!(settings.text_speed, TextSpeed::Medium);
        assert_eq!(settings.battle_style, BattleStyle::Set);
        assert_eq!(settings.sound, SoundMode::Stereo);
    }

    #[test]
    fn capsules_cannot_go_negative() {
        let mut bag = Bag::default();
        bag.add_capsules(ITEM_CAPSULE, 1);
        assert!(bag.use_capsule(ITEM_CAPSULE));
        assert!(!bag.use_capsule(ITEM_CAPSULE));
        assert_eq!(bag.capsule_count(ITEM_CAPSULE), 0);
    }

    #[test]
    fn party_overflow_goes_to_the_first_open_box() {
        let mut player = Player::new("Casey", 1);
        for _ in 0..PARTY_LIMIT {
            assert!(player.add_objectmon(mint(1)));
        }
        assert!(!player.add_objectmon(mint(2)));
        assert_eq!(player.party.len(), PARTY_LIMIT);
        assert_eq!(player.boxes[0].len(), 1);
    }

    #[test]
    fn catching_updates_the_dex() {
        let mut player = Player::new("Casey", 1);
        assert!(!player.objectdex.has_seen(2));
        player.add_objectmon(mint(2));
        assert!(player.objectdex.has_seen(2));
        assert!(player.objectdex.has_caught(2));
        assert_eq!(player.objectdex.caught_count(), 1);
    }
}
