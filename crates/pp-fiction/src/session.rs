//! Interactive session management.

use std::sync::Arc;

use pp_core::catalog::{Challenge, ChallengeKind, DialogueNode, Location, Npc};
use pp_core::{Action, Catalog, GameState, HelpMode, Setting, TextSpeed, reduce};

use crate::config::SessionConfig;
use crate::dialogue::{Conversation, Reply};
use crate::error::{FictionError, FictionResult};
use crate::evaluator;
use crate::message::{Message, MessageKind, MessageLog, Notification};
use crate::narrator;
use crate::parser::{Command, closest, parse_command};
use crate::schedule::Scheduler;

/// The challenge the player is currently attempting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChallenge {
    /// Challenge id.
    pub id: String,
    /// Hints revealed so far.
    pub hints_shown: usize,
}

/// A follow-up that fires after a delay.
#[derive(Debug, Clone, PartialEq)]
enum Deferred {
    IntroJourney,
    IntroLook,
    Arrival {
        location: String,
    },
    ChallengeDetail {
        location: String,
        challenge: String,
    },
    CastResolution {
        location: String,
        challenge: String,
    },
    AnswerVerdict {
        location: String,
        challenge: String,
        choice: String,
    },
    CodeVerdict {
        location: String,
        challenge: String,
        correct: bool,
    },
    ResponseOptions {
        location: String,
        npc: String,
        node: String,
    },
    DialogueLine {
        location: String,
        npc: String,
        node: String,
    },
}

/// A single player's game: state, message log and pending follow-ups.
///
/// All input goes through [`submit`](Self::submit). Player mistakes never
/// surface as `Err`; they become log messages. Deferred messages appear
/// only when the front end calls [`advance`](Self::advance).
pub struct Session {
    catalog: Arc<Catalog>,
    config: SessionConfig,
    state: GameState,
    log: MessageLog,
    scheduler: Scheduler<Deferred>,
    notifications: Vec<Notification>,
    active_challenge: Option<ActiveChallenge>,
    conversation: Option<Conversation>,
    finished: bool,
}

impl Session {
    /// Create a session with a fresh game state.
    ///
    /// Fails if the configured start location is not in the catalog.
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> FictionResult<Self> {
        let state = initial_state(&catalog, &config)?;
        Ok(Self {
            catalog,
            config,
            state,
            log: MessageLog::new(),
            scheduler: Scheduler::new(),
            notifications: Vec::new(),
            active_challenge: None,
            conversation: None,
            finished: false,
        })
    }

    /// The content catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The full message log.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// The challenge being attempted, if any.
    pub fn active_challenge(&self) -> Option<&ActiveChallenge> {
        self.active_challenge.as_ref()
    }

    /// The open conversation, if any.
    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    /// Whether the player has quit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Milliseconds until the next deferred message, if any is pending.
    pub fn pending_delay(&self) -> Option<u64> {
        self.scheduler.until_next()
    }

    /// Messages appended since the previous call.
    pub fn take_output(&mut self) -> Vec<Message> {
        self.log.drain_new()
    }

    /// Notifications raised since the previous call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Name the player and play the welcome sequence.
    pub fn start(&mut self, name: &str) {
        self.dispatch(Action::SetPlayerName(name.to_string()));
        for msg in narrator::welcome(self.catalog.title()) {
            self.log.append(msg);
        }
        let delays = self.config.delays;
        self.defer(delays.intro_journey, Deferred::IntroJourney);
        self.defer(delays.intro_look, Deferred::IntroLook);
        tracing::info!(player = %name, "session started");
    }

    /// Return to the initial state, dropping the log and every pending
    /// follow-up.
    pub fn reset(&mut self) {
        if let Ok(state) = initial_state(&self.catalog, &self.config) {
            self.state = state;
        }
        self.log.clear();
        self.scheduler.clear();
        self.notifications.clear();
        self.active_challenge = None;
        self.conversation = None;
        self.finished = false;
        tracing::debug!("session reset");
    }

    /// Move the clock forward by `ms` and fire everything that became due.
    pub fn advance(&mut self, ms: u64) {
        for event in self.scheduler.advance(ms) {
            self.fire(event);
        }
    }

    /// Fire every pending follow-up, however far ahead.
    pub fn flush(&mut self) {
        while let Some(delay) = self.scheduler.until_next() {
            self.advance(delay);
        }
    }

    /// Process one line of player input.
    pub fn submit(&mut self, input: &str) {
        self.log.push(MessageKind::PlayerInput, format!("> {input}"));
        let command = parse_command(input);
        tracing::debug!(?command, "command parsed");
        if let Err(e) = self.execute(command) {
            tracing::debug!(error = %e, "command rejected");
            self.log.push(e.kind(), e.to_string());
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> FictionResult<()> {
        match command {
            Command::Move { direction } => self.do_move(&direction),
            Command::Look => self.do_look(),
            Command::Help => {
                self.emit(narrator::help(self.state.settings.help_mode));
                Ok(())
            }
            Command::Status => {
                self.emit(narrator::status(&self.state));
                Ok(())
            }
            Command::Inventory => {
                self.emit(narrator::inventory(&self.state));
                Ok(())
            }
            Command::Concepts => {
                self.emit(narrator::concepts(&self.state, &self.catalog));
                Ok(())
            }
            Command::Clear => {
                let echo = self
                    .log
                    .last()
                    .filter(|m| m.kind == MessageKind::PlayerInput)
                    .cloned();
                self.log.clear();
                if let Some(echo) = echo {
                    self.log.append(echo);
                }
                self.log.push(MessageKind::System, "Terminal cleared.");
                Ok(())
            }
            Command::Challenge { id } => self.do_challenge(&id),
            Command::Cast { spell } => self.do_cast(&spell),
            Command::Talk { npc } => self.do_talk(&npc),
            Command::Answer { choice } => self.do_answer(&choice),
            Command::Submit { code } => self.do_submit(&code),
            Command::Reply { option } => self.do_reply(&option),
            Command::Hint => self.do_hint(),
            Command::Set { setting, value } => self.do_set(&setting, value.as_deref()),
            Command::Reset => {
                let name = self.state.player.name.clone();
                self.reset();
                self.start(&name);
                Ok(())
            }
            Command::Quit => {
                self.finished = true;
                self.log.push(
                    MessageKind::System,
                    "You close your spellbook. The Pythonic Path will await your return.",
                );
                Ok(())
            }
            Command::Unknown { .. } => Err(FictionError::UnknownCommand),
        }
    }

    fn do_move(&mut self, direction: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let here = self.current_location(&catalog)?;
        let conn = here
            .exit(direction)
            .ok_or_else(|| FictionError::NoExit(direction.to_string()))?;
        let target = catalog
            .location(&conn.location_id)
            .ok_or_else(|| FictionError::UnknownLocation(conn.location_id.clone()))?;

        let first_visit = !self.state.progress.has_visited(&target.id);
        self.dispatch(Action::MovePlayer(target.id.clone()));
        self.active_challenge = None;
        self.conversation = None;

        if first_visit {
            self.log.push(
                MessageKind::Narration,
                format!("You travel {direction} and discover a new area..."),
            );
            self.defer(
                self.config.delays.first_visit,
                Deferred::Arrival {
                    location: target.id.clone(),
                },
            );
        } else {
            self.log.push(
                MessageKind::Narration,
                format!("You travel {direction} to {}.", target.name),
            );
        }
        tracing::debug!(to = %target.id, first_visit, "player moved");
        Ok(())
    }

    fn do_look(&mut self) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let here = self.current_location(&catalog)?;
        self.emit(narrator::look(here, &self.state, &catalog));
        Ok(())
    }

    fn do_challenge(&mut self, id: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let here = self.current_location(&catalog)?;
        let challenge = here
            .challenge(id)
            .ok_or_else(|| FictionError::ChallengeNotHere {
                id: id.to_string(),
                suggestion: closest(id, here.challenges.iter().map(|c| c.id.as_str())),
            })?;
        if self.state.progress.has_completed(&challenge.id) {
            return Err(FictionError::AlreadyCompleted(challenge.name.clone()));
        }

        self.emit(narrator::challenge_intro(challenge));
        let hints_shown = match &challenge.kind {
            ChallengeKind::Command { hints, .. } if !hints.is_empty() => 1,
            _ => 0,
        };
        self.active_challenge = Some(ActiveChallenge {
            id: challenge.id.clone(),
            hints_shown,
        });
        self.defer(
            self.config.delays.challenge_detail,
            Deferred::ChallengeDetail {
                location: here.id.clone(),
                challenge: challenge.id.clone(),
            },
        );
        Ok(())
    }

    fn do_cast(&mut self, spell_id: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let inventory = &self.state.player.inventory;
        let Some(spell) = inventory.spell(spell_id).filter(|s| s.unlocked) else {
            if catalog.spell(spell_id).is_some() {
                return Err(FictionError::SpellLocked);
            }
            let known = inventory.spells.iter().map(|s| s.id.as_str());
            return Err(FictionError::UnknownSpell(closest(spell_id, known)));
        };

        let lines = vec![
            Message::new(MessageKind::Spell, format!("You cast {}!", spell.name)),
            Message::new(MessageKind::Spell, format!("Effect: {}", spell.effect)),
            Message::new(MessageKind::Code, format!("Code: {}", spell.code)),
        ];
        self.emit(lines);

        let location = self.state.player.current_location.clone();
        let command = format!("cast {spell_id}");
        if let Some(challenge) =
            evaluator::command_challenge(&catalog, &location, &self.state.progress, &command)
        {
            self.defer(
                self.config.delays.cast_resolution,
                Deferred::CastResolution {
                    location,
                    challenge: challenge.id.clone(),
                },
            );
        }
        Ok(())
    }

    fn do_talk(&mut self, npc_id: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let here = self.current_location(&catalog)?;
        let npc = here.npc(npc_id).ok_or_else(|| FictionError::NpcNotHere {
            id: npc_id.to_string(),
            suggestion: closest(npc_id, here.npcs.iter().map(|n| n.id.as_str())),
        })?;

        let conversation = Conversation::start(npc);
        let node = conversation
            .node(npc)
            .ok_or(FictionError::NoConversation)?;
        self.log.append(narrator::dialogue_line(npc, node));

        if node.is_terminal() {
            self.conversation = None;
        } else {
            self.conversation = Some(conversation);
            self.defer(
                self.config.delays.talk_options,
                Deferred::ResponseOptions {
                    location: here.id.clone(),
                    npc: npc.id.clone(),
                    node: node.id.clone(),
                },
            );
        }
        Ok(())
    }

    fn do_answer(&mut self, key: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let (location, challenge) = self.active(&catalog)?;
        let choice = evaluator::judge_choice(challenge, key)?;

        self.log.push(
            MessageKind::PlayerInput,
            format!("You selected: \"{}\"", choice.text),
        );
        self.defer(
            self.config.delays.answer_verdict,
            Deferred::AnswerVerdict {
                location: location.id.clone(),
                challenge: challenge.id.clone(),
                choice: choice.id.clone(),
            },
        );
        Ok(())
    }

    fn do_submit(&mut self, code: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let (location, challenge) = self.active(&catalog)?;
        let correct = evaluator::judge_code(challenge, code)?;

        self.log.push(MessageKind::PlayerInput, "You submitted:");
        self.log.push(MessageKind::Code, code);
        self.defer(
            self.config.delays.answer_verdict,
            Deferred::CodeVerdict {
                location: location.id.clone(),
                challenge: challenge.id.clone(),
                correct,
            },
        );
        Ok(())
    }

    fn do_reply(&mut self, key: &str) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let conversation = self
            .conversation
            .clone()
            .ok_or(FictionError::NoConversation)?;
        let here = self.current_location(&catalog)?;
        let npc = here
            .npc(&conversation.npc_id)
            .ok_or(FictionError::NoConversation)?;

        match conversation.choose(npc, key)? {
            Reply::Continue {
                response,
                node,
                next,
            } => {
                self.log.push(
                    MessageKind::PlayerInput,
                    format!("You selected: \"{}\"", response.text),
                );
                self.conversation = next;
                self.defer(
                    self.config.delays.dialogue_reply,
                    Deferred::DialogueLine {
                        location: here.id.clone(),
                        npc: npc.id.clone(),
                        node: node.id.clone(),
                    },
                );
            }
            Reply::End { response } => {
                self.log.push(
                    MessageKind::PlayerInput,
                    format!("You selected: \"{}\"", response.text),
                );
                self.conversation = None;
            }
        }
        Ok(())
    }

    fn do_hint(&mut self) -> FictionResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let (_, challenge) = self.active(&catalog)?;
        let shown = self.active_challenge.as_ref().map_or(0, |a| a.hints_shown);
        let hint = challenge
            .kind
            .hints()
            .get(shown)
            .ok_or(FictionError::NoMoreHints)?;
        self.log.push(MessageKind::System, format!("Hint: {hint}"));
        if let Some(active) = self.active_challenge.as_mut() {
            active.hints_shown += 1;
        }
        Ok(())
    }

    fn do_set(&mut self, setting: &str, value: Option<&str>) -> FictionResult<()> {
        let (setting, confirmation) = match setting {
            "speed" => {
                let value = value.ok_or(FictionError::MissingArgument(
                    "set speed slow|normal|fast|instant",
                ))?;
                let speed: TextSpeed = value.parse().map_err(FictionError::InvalidSetting)?;
                (
                    Setting::TextSpeed(speed),
                    format!("Text speed set to {speed}."),
                )
            }
            "sound" => {
                let on = match value {
                    Some("on" | "true") => true,
                    Some("off" | "false") => false,
                    Some(other) => {
                        return Err(FictionError::InvalidSetting(format!(
                            "unknown sound setting '{other}' (expected on or off)"
                        )));
                    }
                    None => return Err(FictionError::MissingArgument("set sound on|off")),
                };
                let label = if on { "on" } else { "off" };
                (Setting::Sound(on), format!("Sound turned {label}."))
            }
            "help" => {
                let value = value.ok_or(FictionError::MissingArgument(
                    "set help minimal|detailed",
                ))?;
                let mode: HelpMode = value.parse().map_err(FictionError::InvalidSetting)?;
                (Setting::HelpMode(mode), format!("Help mode set to {mode}."))
            }
            other => {
                return Err(FictionError::InvalidSetting(format!(
                    "unknown setting '{other}' (expected speed, sound or help)"
                )));
            }
        };
        self.dispatch(Action::ToggleSetting(setting));
        self.log.push(MessageKind::System, confirmation);
        Ok(())
    }

    fn fire(&mut self, event: Deferred) {
        let catalog = Arc::clone(&self.catalog);
        match event {
            Deferred::IntroJourney => self.log.append(narrator::intro_journey()),
            Deferred::IntroLook => {
                if let Some(here) = catalog.location(&self.state.player.current_location) {
                    self.emit(narrator::look(here, &self.state, &catalog));
                }
                self.log
                    .push(MessageKind::System, "Type 'help' for a list of commands.");
            }
            Deferred::Arrival { location } => {
                if let Some(loc) = catalog.location(&location) {
                    self.log
                        .push(MessageKind::Narration, format!("# {}", loc.name));
                    self.log.push(MessageKind::Narration, &loc.description);
                }
            }
            Deferred::ChallengeDetail {
                location,
                challenge,
            } => {
                if let Some(c) = find_challenge(&catalog, &location, &challenge) {
                    self.emit(narrator::challenge_detail(c));
                }
            }
            Deferred::CastResolution {
                location,
                challenge,
            } => {
                if let Some(c) = self.unresolved(&catalog, &location, &challenge) {
                    self.log
                        .push(MessageKind::Success, "The spell worked perfectly!");
                    self.grant(c, &catalog);
                }
            }
            Deferred::AnswerVerdict {
                location,
                challenge,
                choice,
            } => {
                let Some(c) = self.unresolved(&catalog, &location, &challenge) else {
                    return;
                };
                let Some(choice) = c.choice(&choice) else {
                    return;
                };
                if choice.is_correct {
                    self.log.push(MessageKind::Success, "Correct answer!");
                    self.log.push(MessageKind::Concept, &choice.explanation);
                    self.grant(c, &catalog);
                } else {
                    self.log.push(MessageKind::Error, "That's not correct.");
                    self.log.push(MessageKind::Concept, &choice.explanation);
                }
            }
            Deferred::CodeVerdict {
                location,
                challenge,
                correct,
            } => {
                let Some(c) = self.unresolved(&catalog, &location, &challenge) else {
                    return;
                };
                if correct {
                    self.log
                        .push(MessageKind::Success, "Your code runs perfectly!");
                    self.grant(c, &catalog);
                } else {
                    self.log
                        .push(MessageKind::Error, "That's not quite right.");
                    self.reveal_next_hint(c);
                }
            }
            Deferred::ResponseOptions {
                location,
                npc,
                node,
            } => {
                if let Some((_, node)) = find_node(&catalog, &location, &npc, &node) {
                    self.emit(narrator::response_prompt(node));
                }
            }
            Deferred::DialogueLine {
                location,
                npc,
                node,
            } => {
                if let Some((npc, node)) = find_node(&catalog, &location, &npc, &node) {
                    self.log.append(narrator::dialogue_line(npc, node));
                    if !node.is_terminal() {
                        self.emit(narrator::response_prompt(node));
                    }
                }
            }
        }
    }

    /// Apply the rewards of a correct resolution.
    fn grant(&mut self, challenge: &Challenge, catalog: &Catalog) {
        let rewards = evaluator::rewards(challenge, &self.state, catalog);
        let level_before = self.state.player.stats.level;
        for action in rewards.actions {
            self.dispatch(action);
        }

        if let Some(spell) = rewards.spell {
            self.notifications.push(Notification::new(
                "New Spell Learned!",
                format!("You've unlocked the {} spell.", spell.name),
            ));
        }
        if let Some(concept) = rewards.concept {
            self.log.push(
                MessageKind::Concept,
                format!("You've gained deeper understanding of: {}", concept.name),
            );
        }

        let level = self.state.player.stats.level;
        if level > level_before {
            self.log
                .push(MessageKind::Success, format!("You reached level {level}!"));
            self.notifications.push(Notification::new(
                "Level Up!",
                format!("You are now a level {level} Pythonista."),
            ));
        }

        if self
            .active_challenge
            .as_ref()
            .is_some_and(|a| a.id == challenge.id)
        {
            self.active_challenge = None;
        }
        tracing::debug!(challenge = %challenge.id, "challenge completed");
    }

    fn reveal_next_hint(&mut self, challenge: &Challenge) {
        let Some(active) = self
            .active_challenge
            .as_mut()
            .filter(|a| a.id == challenge.id)
        else {
            return;
        };
        if let Some(hint) = challenge.kind.hints().get(active.hints_shown) {
            active.hints_shown += 1;
            self.log.push(MessageKind::System, format!("Hint: {hint}"));
        }
    }

    /// A challenge that still awaits resolution; `None` drops a stale
    /// follow-up.
    fn unresolved<'a>(
        &self,
        catalog: &'a Catalog,
        location: &str,
        challenge: &str,
    ) -> Option<&'a Challenge> {
        if self.state.progress.has_completed(challenge) {
            tracing::debug!(%challenge, "stale resolution dropped");
            return None;
        }
        find_challenge(catalog, location, challenge)
    }

    fn active<'a>(&self, catalog: &'a Catalog) -> FictionResult<(&'a Location, &'a Challenge)> {
        let active = self
            .active_challenge
            .as_ref()
            .ok_or(FictionError::NoActiveChallenge)?;
        let here = self.current_location(catalog)?;
        let challenge = here
            .challenge(&active.id)
            .ok_or(FictionError::NoActiveChallenge)?;
        Ok((here, challenge))
    }

    fn current_location<'a>(&self, catalog: &'a Catalog) -> FictionResult<&'a Location> {
        let id = &self.state.player.current_location;
        catalog
            .location(id)
            .ok_or_else(|| FictionError::UnknownLocation(id.clone()))
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, &action, &self.catalog);
    }

    fn defer(&mut self, base_ms: u64, event: Deferred) {
        let delay = self.state.settings.text_speed.scale(base_ms);
        self.scheduler.schedule(delay, event);
    }

    fn emit(&mut self, messages: Vec<Message>) {
        for msg in messages {
            self.log.append(msg);
        }
    }
}

fn initial_state(catalog: &Catalog, config: &SessionConfig) -> FictionResult<GameState> {
    let start = config
        .start_location
        .as_deref()
        .unwrap_or(catalog.start_location());
    if catalog.location(start).is_none() {
        return Err(FictionError::UnknownLocation(start.to_string()));
    }
    let state = GameState::new(start);
    Ok(reduce(
        &state,
        &Action::ToggleSetting(Setting::TextSpeed(config.text_speed)),
        catalog,
    ))
}

fn find_challenge<'a>(catalog: &'a Catalog, location: &str, id: &str) -> Option<&'a Challenge> {
    catalog.location(location).and_then(|l| l.challenge(id))
}

fn find_node<'a>(
    catalog: &'a Catalog,
    location: &str,
    npc: &str,
    node: &str,
) -> Option<(&'a Npc, &'a DialogueNode)> {
    let npc = catalog.location(location)?.npc(npc)?;
    Some((npc, npc.node(node)?))
}
