//! Command interpreter
//!
//! Takes one line of player input at a time, dispatches it on the verb and
//! writes the response to a [`GameDisplay`]. Each command runs to
//! completion and always ends with a blank separator line. All mutable game
//! state lives in the [`Session`]; the rooms and the rule book are read-only.

use crate::command::{expand_direction, Command, NarrativeVerb, Verb};
use crate::config::Config;
use crate::display::{DisplayError, GameDisplay};
use crate::error::GameError;
use crate::narrative::{RuleBook, DEFAULT_RULES};
use crate::rng::GameRng;
use crate::room::RoomGraph;
use crate::state::Session;
use log::{debug, error, info};

pub const WELCOME: &str = "Welcome to Escape the Complex!";
pub const PROMPT_HINT: &str = "Type a command, or 'help' for a list of commands.";
pub const UNKNOWN_COMMAND: &str =
    "Sorry, that doesn't work :( You can see the list of valid commands by entering 'help'.";
pub const BLOCKED_EXIT: &str = "You can't go that way.";
pub const LOST_IN_VOID: &str = "You're lost in the void. (Room not found!)";
pub const GO_WHERE: &str = "Go where?";
pub const EMPTY_INVENTORY: &str = "You're not carrying anything.";
pub const TAKE_WHAT: &str = "Take what?";
pub const LEAVE_WHAT: &str = "Leave what?";
pub const NOT_CARRIED: &str = "You don't have that.";
pub const FAREWELL: &str = "You sit down and wait. Maybe someone else will find the way out.";

pub struct Interpreter {
    rooms: RoomGraph,
    rules: RuleBook,
    rng: GameRng,
    pub session: Session,
}

impl Interpreter {
    /// Start a session in `start_room`, or in the first room when None
    pub fn new(rooms: RoomGraph, start_room: Option<&str>) -> Result<Self, GameError> {
        let start = match start_room {
            Some(id) if rooms.contains(id) => id.to_string(),
            Some(id) => return Err(GameError::UnknownStartRoom(id.to_string())),
            None => rooms.start_room().ok_or(GameError::NoRooms)?.id.clone(),
        };
        info!("New session starting in '{}'", start);

        Ok(Interpreter {
            rooms,
            rules: DEFAULT_RULES.clone(),
            rng: GameRng::new_uniform(),
            session: Session::new(start),
        })
    }

    /// Load rooms and rule book named by `config` and open a session
    ///
    /// A failure is logged and reported once on `display` as a warning
    /// line; the caller decides whether to exit.
    pub fn load(config: &Config, display: &mut dyn GameDisplay) -> Result<Self, GameError> {
        match Self::load_quietly(config) {
            Ok(interpreter) => Ok(interpreter),
            Err(e) => {
                error!("{}", e);
                let warning = match e.path() {
                    Some(path) => format!("\u{26a0}\u{fe0f} Could not load {}", path),
                    None => format!("\u{26a0}\u{fe0f} {}", e),
                };
                display.print_line(&warning)?;
                display.force_refresh()?;
                Err(e)
            }
        }
    }

    fn load_quietly(config: &Config) -> Result<Self, GameError> {
        let rooms = RoomGraph::load(&config.rooms)?;
        let rules = match &config.narrative {
            Some(path) => Some(RuleBook::load(path)?),
            None => None,
        };

        let mut interpreter = Interpreter::new(rooms, config.start_room.as_deref())?
            .with_rng(GameRng::from_seed(config.seed));
        if let Some(rules) = rules {
            interpreter = interpreter.with_rules(rules);
        }
        Ok(interpreter)
    }

    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn location(&self) -> &str {
        &self.session.player.location
    }

    pub fn is_finished(&self) -> bool {
        self.session.quit_requested()
    }

    /// Greet the player and show the starting room with its intro
    pub fn start(&mut self, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        display.print_line(WELCOME)?;
        display.blank_line()?;
        self.describe_current(display, true)?;
        display.blank_line()?;
        display.print_line(PROMPT_HINT)?;
        display.blank_line()?;
        display.force_refresh()
    }

    /// Run one line of input; blank lines are ignored
    pub fn execute(&mut self, input: &str, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        let Some(command) = Command::parse(input) else {
            return Ok(());
        };

        display.print_input_echo(&command.raw)?;
        self.dispatch(&command, display)?;
        display.blank_line()?;

        debug!("You are currently in: {}", self.session.player.location);
        display.force_refresh()
    }

    fn dispatch(&mut self, command: &Command, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        debug!("Dispatching {:?} with argument '{}'", command.verb, command.arg);

        match &command.verb {
            Verb::Look => self.describe_current(display, false),
            Verb::Go => self.go(expand_direction(&command.arg), display),
            Verb::Move(direction) => self.go(direction, display),
            Verb::Inventory => self.show_inventory(display),
            Verb::Take => self.take(&command.arg, display),
            Verb::Drop => self.drop_item(&command.arg, display),
            Verb::Narrative(verb) => self.narrate(*verb, display),
            Verb::Help => display.show_help(true),
            Verb::Clear => display.clear_screen(),
            Verb::Quit => {
                self.session.request_quit();
                display.print_line(FAREWELL)
            }
            Verb::Unknown(word) => {
                debug!("Unknown verb '{}'", word);
                display.print_line(UNKNOWN_COMMAND)
            }
        }
    }

    fn describe_current(&self, display: &mut dyn GameDisplay, show_intro: bool) -> Result<(), DisplayError> {
        match self.rooms.get(&self.session.player.location) {
            Some(room) => {
                for line in room.describe(show_intro) {
                    display.print_line(&line)?;
                }
                Ok(())
            }
            None => display.print_line(LOST_IN_VOID),
        }
    }

    fn go(&mut self, direction: &str, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        if direction.is_empty() {
            return display.print_line(GO_WHERE);
        }

        let Some(here) = self.rooms.get(&self.session.player.location) else {
            return display.print_line(LOST_IN_VOID);
        };
        let Some(target) = here.exit(direction) else {
            debug!("No exit '{}' from '{}'", direction, here.id);
            return display.print_line(BLOCKED_EXIT);
        };
        let Some(next) = self.rooms.get(target) else {
            debug!("Exit '{}' from '{}' leads to missing room '{}'", direction, here.id, target);
            return display.print_line(LOST_IN_VOID);
        };

        debug!("Moving {} from '{}' to '{}'", direction, here.id, next.id);
        self.session.player.location = next.id.clone();
        for line in next.describe(true) {
            display.print_line(&line)?;
        }
        Ok(())
    }

    fn show_inventory(&self, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        let inventory = &self.session.inventory;
        if inventory.is_empty() {
            display.print_line(EMPTY_INVENTORY)
        } else {
            display.print_line(&format!("You're carrying: {}", inventory.items().join(", ")))
        }
    }

    fn take(&mut self, item: &str, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        if item.is_empty() {
            return display.print_line(TAKE_WHAT);
        }
        self.session.inventory.take(item);
        display.print_line(&format!("You take the {}.", item))
    }

    fn drop_item(&mut self, item: &str, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        if item.is_empty() {
            return display.print_line(LEAVE_WHAT);
        }
        if self.session.inventory.drop_item(item) {
            display.print_line(&format!("You leave the {} behind.", item))
        } else {
            display.print_line(NOT_CARRIED)
        }
    }

    fn narrate(&mut self, verb: NarrativeVerb, display: &mut dyn GameDisplay) -> Result<(), DisplayError> {
        let lines = self
            .rules
            .apply(verb, &mut self.session.player, &mut self.rng);
        for line in lines {
            display.print_line(&line)?;
        }
        Ok(())
    }
}
