//! Narrative rule book
//!
//! `examine`, `sit`, `jump` and `poke` have no general behaviour; each room
//! reacts in its own scripted way. Those reactions live in a declarative
//! table: a rule names a verb, the rooms it applies to and the milestones it
//! needs, and carries the lines to print. Lines have their own guards and
//! effects so one rule can cover "describe the shelf, then mention each item
//! not yet bought".
//!
//! The first matching rule in book order wins, so room-specific rules come
//! before the catch-all for each verb.

use crate::command::NarrativeVerb;
use crate::error::GameError;
use crate::rng::GameRng;
use crate::state::{Milestone, PlayerState};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const GAME_OVER_MARKER: &str = "*** GAME OVER ***";

/// Emitted when a custom book has no rule for the situation
pub const NOTHING_HAPPENS: &str = "Nothing happens.";

/// Line text: fixed, or one picked at random each time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Fixed(String),
    OneOf(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Line {
    pub text: Text,
    #[serde(default)]
    pub requires: Vec<Milestone>,
    #[serde(default)]
    pub lacks: Vec<Milestone>,
    #[serde(default)]
    pub sets: Vec<Milestone>,
    #[serde(default)]
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    pub verb: NarrativeVerb,
    /// Rooms this rule applies in; empty means anywhere
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default)]
    pub requires: Vec<Milestone>,
    #[serde(default)]
    pub lacks: Vec<Milestone>,
    #[serde(rename = "line", default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleBook {
    #[serde(rename = "rule", default)]
    rules: Vec<Rule>,
}

fn guard_holds(requires: &[Milestone], lacks: &[Milestone], player: &PlayerState) -> bool {
    requires.iter().all(|m| player.has(*m)) && !lacks.iter().any(|m| player.has(*m))
}

impl Line {
    pub fn say(text: impl Into<String>) -> Self {
        Line {
            text: Text::Fixed(text.into()),
            requires: Vec::new(),
            lacks: Vec::new(),
            sets: Vec::new(),
            game_over: false,
        }
    }

    pub fn one_of<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Line {
            text: Text::OneOf(choices.into_iter().map(Into::into).collect()),
            ..Line::say("")
        }
    }

    pub fn requires(mut self, milestone: Milestone) -> Self {
        self.requires.push(milestone);
        self
    }

    pub fn lacks(mut self, milestone: Milestone) -> Self {
        self.lacks.push(milestone);
        self
    }

    pub fn sets(mut self, milestone: Milestone) -> Self {
        self.sets.push(milestone);
        self
    }

    pub fn game_over(mut self) -> Self {
        self.game_over = true;
        self
    }

    fn render(&self, rng: &mut GameRng) -> Option<String> {
        match &self.text {
            Text::Fixed(text) => Some(text.clone()),
            Text::OneOf(choices) if choices.is_empty() => None,
            Text::OneOf(choices) => Some(choices[rng.pick(choices.len())].clone()),
        }
    }
}

impl Rule {
    pub fn new(verb: NarrativeVerb) -> Self {
        Rule {
            verb,
            rooms: Vec::new(),
            requires: Vec::new(),
            lacks: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn in_rooms(mut self, rooms: &[&str]) -> Self {
        self.rooms.extend(rooms.iter().map(|r| r.to_string()));
        self
    }

    pub fn requires(mut self, milestone: Milestone) -> Self {
        self.requires.push(milestone);
        self
    }

    pub fn lacks(mut self, milestone: Milestone) -> Self {
        self.lacks.push(milestone);
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn matches(&self, verb: NarrativeVerb, player: &PlayerState) -> bool {
        self.verb == verb
            && (self.rooms.is_empty() || self.rooms.iter().any(|r| *r == player.location))
            && guard_holds(&self.requires, &self.lacks, player)
    }
}

impl RuleBook {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleBook { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, GameError> {
        toml::from_str(source).map_err(|e| GameError::Toml {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read a `[[rule]]` TOML file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let origin = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| GameError::Io {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        let book = Self::from_toml_str(&source, &origin)?;
        info!("Loaded {} narrative rules from {}", book.rules.len(), origin);
        Ok(book)
    }

    /// Run the first matching rule, applying its effects; returns the lines to print
    pub fn apply(
        &self,
        verb: NarrativeVerb,
        player: &mut PlayerState,
        rng: &mut GameRng,
    ) -> Vec<String> {
        let Some((index, rule)) = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(verb, player))
        else {
            debug!("No narrative rule for '{}' in '{}'", verb, player.location);
            return vec![NOTHING_HAPPENS.to_string()];
        };
        debug!(
            "Narrative rule #{} fired for '{}' in '{}'",
            index, verb, player.location
        );

        let mut out = Vec::new();
        for line in &rule.lines {
            if !guard_holds(&line.requires, &line.lacks, player) {
                continue;
            }
            if let Some(text) = line.render(rng) {
                out.push(text);
            }
            for milestone in &line.sets {
                if player.achieve(*milestone) {
                    debug!("Milestone reached: {}", milestone);
                }
            }
            if line.game_over {
                player.achieve(Milestone::Dead);
                out.push(GAME_OVER_MARKER.to_string());
            }
        }
        out
    }

    /// The scripted content of Escape the Complex
    pub fn escape_the_complex() -> Self {
        use Milestone::*;
        use NarrativeVerb::*;

        RuleBook::new(vec![
            // sit
            Rule::new(Sit)
                .in_rooms(&["white room"])
                .line(Line::say("You sit on the bench gingerly. It creaks, but holds up. The old wood is a bit splintery, though. Probably best not to stay sat for too long."))
                .line(
                    Line::say("Digger barks, scrabbling at the crumbling stone leg of the bench. You get up and look where he's trying to dig, and spot a tiny keyhole.")
                        .requires(HasPuppy)
                        .sets(SmallKeyholeRevealed),
                ),
            Rule::new(Sit)
                .in_rooms(&["blue corridor"])
                .line(Line::say("You sit down on one of the cushioned benches. It's nice to take a break after all the exploring you've been doing.")),
            Rule::new(Sit)
                .in_rooms(&["cafe"])
                .line(Line::say("You pull out one of the chairs and sit for a minute.")),
            Rule::new(Sit)
                .in_rooms(&["garden"])
                .line(Line::say("The wrought iron bench doesn't look all that comfy, but it's better than the damp grass. Barely.")),
            Rule::new(Sit)
                .in_rooms(&["bathroom"])
                .line(Line::say("You sit on one of the toilets. Hey, when the lid's down, it's a chair!")),
            Rule::new(Sit)
                .line(Line::say("There are no seats here, but you're exhausted enough to sit on the floor for a moment.")),

            // jump
            Rule::new(Jump)
                .in_rooms(&["white room"])
                .line(
                    Line::say("You jump as high as you can, and spot a button near the ceiling. You press it quickly, and a hidden door opens in the east wall.")
                        .sets(WhiteRoomExitOpen),
                ),
            Rule::new(Jump)
                .in_rooms(&["hidden store"])
                .line(
                    Line::say("As you jump, you spot a tiny key on one of the high shelves. You jump up again and grab it.\nThere's a scratched up tag attached to it with the words 'white room - exit' written on.")
                        .sets(HasSmallKey),
                ),
            Rule::new(Jump)
                .in_rooms(&["cleaners' store", "secret lab"])
                .line(Line::say("You can't jump here, the ceiling is too low.")),
            Rule::new(Jump)
                .in_rooms(&["fossil exhibit"])
                .lacks(FossilNoteFound)
                .line(
                    Line::say("You spot a note stuck to the triceratops skull. You carefully reach up and take it.")
                        .sets(FossilNoteFound),
                ),
            Rule::new(Jump)
                .in_rooms(&["garden"])
                .lacks(GardenNoteFound)
                .line(
                    Line::say("There's a note pinned high up on one of the trees. You stand on an upturned flowerpot to grab it.")
                        .sets(GardenNoteFound),
                ),
            Rule::new(Jump)
                .line(Line::say("You jump, but nothing unusual happens.")),

            // examine
            Rule::new(Examine)
                .in_rooms(&["gift shop"])
                .line(Line::say("You look at the things on the shelves."))
                .line(Line::say("A plain leather keyring catches your eye.").lacks(HasKeyring))
                .line(Line::say("There's a squeaky dog toy sitting alone in a battered box.").lacks(HasDogToy))
                .line(
                    Line::say("A small snowglobe sparkles away on a corner shelf. The little cottage inside reminds you of home, somehow.")
                        .lacks(HasSnowglobe),
                ),
            Rule::new(Examine)
                .in_rooms(&["art gallery"])
                .line(Line::say("You take a good look at some of the paintings. They're even creepier up close."))
                .line(
                    Line::say("One of the surreal landscapes has a note tucked into the frame. You take it gently, trying to avoid disturbing the artwork.")
                        .lacks(GalleryNoteFound)
                        .sets(GalleryNoteFound),
                ),
            Rule::new(Examine)
                .in_rooms(&["yard"])
                .line(Line::say("The junk piles seem even more rusty and decrepit the closer you look at them. Who dumped all this mess here, anyway?"))
                .line(
                    Line::say("You spot a slightly damp note under a big stone beside one pile. Careful not to nudge the teetering junk, you take the note.")
                        .lacks(YardNoteFound)
                        .sets(YardNoteFound),
                ),
            Rule::new(Examine)
                .in_rooms(&["observatory"])
                .line(
                    Line::say("You go and take a better look at those mechanisms. Most seem to operate the big telescope, but one isn't connected to anything you can see. It's missing its lever... maybe the caretaker knows something about it?")
                        .lacks(DiscoveredLab),
                ),
            Rule::new(Examine)
                .in_rooms(&["fossil exhibit"])
                .line(Line::one_of(FOSSIL_FACTS.iter().map(|fact| format!("A nearby sign reads: {}", fact)))),
            Rule::new(Examine)
                .in_rooms(&["secret room"])
                .line(Line::say("On closer inspection, the pedestals each have small gems set into the top. Red, blue, yellow, purple, orange and white. One is empty, with a divot where a gem might be placed."))
                .line(Line::say("The green gem you picked up might fit there.").requires(HasTeleGem)),
            Rule::new(Examine)
                .in_rooms(&["workshop"])
                .line(Line::say("Several design sketches are strewn across the workbench. Most are beyond you, but a few look interesting: a simple birdhouse, a tall bookshelf, and a handcart. You could probably make those, looking at the careful detail put into the drawings.")),
            Rule::new(Examine)
                .line(Line::say("There's nothing interesting enough to examine here.")),

            // poke
            Rule::new(Poke)
                .in_rooms(&["secret lab"])
                .line(Line::say("You poke some of the equipment on the bench, wondering what it does. Something starts reacting violently..."))
                .line(Line::say("The lab explodes in a chain reaction, and you perish in the destruction.").game_over()),
            Rule::new(Poke)
                .in_rooms(&["yard"])
                .line(
                    Line::say("You prod at the heaps of junk. Something dislodges, causing a small collapse. You jump back but get a cut on your arm.")
                        .sets(Injured),
                ),
            Rule::new(Poke)
                .in_rooms(&["gift shop"])
                .line(Line::say("You poke at the little trinkets on the shelves. A couple of them fall off and roll around the floor.")),
            Rule::new(Poke)
                .in_rooms(&["fossil exhibit"])
                .line(Line::say("You poke some of the fossil displays. It's great fun, until the jawbone falls off a skeleton. You wedge it back in place and stop touching the exhibits.")),
            Rule::new(Poke)
                .in_rooms(&["workshop"])
                .line(
                    Line::say("You poke the things on the workbench. One of the half-built whatnots slides across, revealing a scrap of paper underneath it. You take the note.")
                        .sets(WorkshopNoteFound),
                ),
            Rule::new(Poke)
                .line(Line::say("You walk around the room poking things. Nothing interesting happens.")),
        ])
    }
}

const FOSSIL_FACTS: &[&str] = &[
    "The word 'fossil' comes from the Latin 'fossilis', meaning 'dug up.'",
    "Most fossils form in sedimentary rock, created by layers of sediment compressing over time.",
    "Fossilization can take thousands to millions of years.",
    "Paleontologists use brushes and chisels to carefully excavate fossils.",
    "The first dinosaur fossil was discovered in 1824 by English geologist William Buckland.",
    "The 'Bone Wars' was a rivalry between paleontologists Marsh and Cope in the late 1800s.",
    "Not all organisms fossilize \u{2014} soft-bodied ones rarely do.",
    "Transitional fossils show intermediate stages between species, like Tiktaalik.",
];

lazy_static! {
    pub static ref DEFAULT_RULES: RuleBook = RuleBook::escape_the_complex();
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn run(verb: NarrativeVerb, player: &mut PlayerState) -> Vec<String> {
        let mut rng = GameRng::new_predictable(1);
        DEFAULT_RULES.apply(verb, player, &mut rng)
    }

    #[test]
    fn jump_in_white_room_opens_exit_every_time() {
        let mut player = PlayerState::new("white room");
        let first = run(NarrativeVerb::Jump, &mut player);
        assert!(player.has(Milestone::WhiteRoomExitOpen));
        let second = run(NarrativeVerb::Jump, &mut player);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert!(first[0].contains("hidden door opens in the east wall"));
        assert_eq!(player.milestones().count(), 1);
    }

    #[test]
    fn one_shot_notes_fall_through_to_the_catch_all() {
        let mut player = PlayerState::new("fossil exhibit");
        let first = run(NarrativeVerb::Jump, &mut player);
        assert!(first[0].contains("triceratops"));
        assert!(player.has(Milestone::FossilNoteFound));
        let second = run(NarrativeVerb::Jump, &mut player);
        assert_eq!(second, vec!["You jump, but nothing unusual happens."]);
    }

    #[test]
    fn sit_with_puppy_reveals_keyhole() {
        let mut player = PlayerState::new("white room");
        assert_eq!(run(NarrativeVerb::Sit, &mut player).len(), 1);
        assert!(!player.has(Milestone::SmallKeyholeRevealed));

        player.achieve(Milestone::HasPuppy);
        let lines = run(NarrativeVerb::Sit, &mut player);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Digger barks"));
        assert!(player.has(Milestone::SmallKeyholeRevealed));
    }

    #[test]
    fn gift_shop_lists_only_items_not_owned() {
        let mut player = PlayerState::new("gift shop");
        assert_eq!(run(NarrativeVerb::Examine, &mut player).len(), 4);
        player.achieve(Milestone::HasKeyring);
        player.achieve(Milestone::HasSnowglobe);
        let lines = run(NarrativeVerb::Examine, &mut player);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("dog toy"));
    }

    #[test]
    fn gallery_note_is_found_once() {
        let mut player = PlayerState::new("art gallery");
        assert_eq!(run(NarrativeVerb::Examine, &mut player).len(), 2);
        assert!(player.has(Milestone::GalleryNoteFound));
        assert_eq!(run(NarrativeVerb::Examine, &mut player).len(), 1);
    }

    #[test]
    fn fossil_sign_picks_a_known_fact() {
        let mut player = PlayerState::new("fossil exhibit");
        let lines = run(NarrativeVerb::Examine, &mut player);
        assert_eq!(lines.len(), 1);
        let fact = lines[0].trim_start_matches("A nearby sign reads: ");
        assert!(FOSSIL_FACTS.contains(&fact));
    }

    #[test]
    fn poking_the_lab_is_fatal() {
        let mut player = PlayerState::new("secret lab");
        let lines = run(NarrativeVerb::Poke, &mut player);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], GAME_OVER_MARKER);
        assert!(player.is_dead());
    }

    #[test]
    fn unknown_rooms_get_the_generic_response() {
        let mut player = PlayerState::new("broom cupboard");
        assert_eq!(
            run(NarrativeVerb::Poke, &mut player),
            vec!["You walk around the room poking things. Nothing interesting happens."]
        );
        assert_eq!(player.milestones().count(), 0);
    }

    #[test]
    fn toml_rule_book_loads_and_applies() {
        let source = r#"
            [[rule]]
            verb = "jump"
            rooms = ["attic"]
            lacks = ["injured"]

            [[rule.line]]
            text = "You bang your head on a rafter."
            sets = ["injured"]

            [[rule]]
            verb = "sit"

            [[rule.line]]
            text = ["You sit.", "You sit down."]
        "#;
        let book = RuleBook::from_toml_str(source, "rules.toml").unwrap();
        assert_eq!(book.rules().len(), 2);

        let mut rng = GameRng::new_predictable(3);
        let mut player = PlayerState::new("attic");
        let lines = book.apply(NarrativeVerb::Jump, &mut player, &mut rng);
        assert_eq!(lines, vec!["You bang your head on a rafter."]);
        assert!(player.has(Milestone::Injured));

        // guard now fails and there is no catch-all for jump
        let lines = book.apply(NarrativeVerb::Jump, &mut player, &mut rng);
        assert_eq!(lines, vec![NOTHING_HAPPENS]);

        let lines = book.apply(NarrativeVerb::Sit, &mut player, &mut rng);
        assert!(lines[0].starts_with("You sit"));
    }

    #[test]
    fn bad_milestone_names_are_rejected() {
        let source = r#"
            [[rule]]
            verb = "poke"
            requires = ["has_jetpack"]
        "#;
        assert!(matches!(
            RuleBook::from_toml_str(source, "bad.toml"),
            Err(GameError::Toml { .. })
        ));
    }
}
