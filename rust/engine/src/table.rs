//! Seating and action serialization around the pure betting engine.
//!
//! A [`Table`] owns its roster and the authoritative [`HandState`]. Wrapped in
//! a [`SharedTable`] it handles one action at a time; a [`TableRegistry`]
//! keeps any number of independent tables side by side.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::engine::{self, Engine, MAX_PLAYERS, MIN_PLAYERS};
use crate::errors::GameError;
use crate::game::{Blinds, HandState};
use crate::player::{Chips, PlayerAction, SeatedPlayer};
use crate::pot::HandResult;
use crate::rules::LegalAction;

pub type TableId = String;
pub type SharedTable = Arc<Mutex<Table>>;

fn default_max_seats() -> usize {
    MAX_PLAYERS
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub blinds: Blinds,
    #[serde(default = "default_max_seats")]
    pub max_seats: usize,
    /// Deck seed for replays; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TableConfig {
    pub fn new(blinds: Blinds) -> Self {
        Self {
            blinds,
            max_seats: MAX_PLAYERS,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.blinds.validate()?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_seats) {
            return Err(GameError::InvalidConfig(format!(
                "max_seats must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.max_seats
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Table {
    id: TableId,
    config: TableConfig,
    roster: Vec<SeatedPlayer>,
    engine: Engine,
    hand: Option<HandState>,
    last_result: Option<HandResult>,
}

impl Table {
    pub fn new(id: impl Into<TableId>, config: TableConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            id: id.into(),
            config,
            roster: Vec::new(),
            engine: Engine::new(config.seed, config.blinds)?,
            hand: None,
            last_result: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn config(&self) -> TableConfig {
        self.config
    }
    pub fn roster(&self) -> &[SeatedPlayer] {
        &self.roster
    }

    pub fn stack_of(&self, player_id: &str) -> Option<Chips> {
        self.roster
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.stack)
    }

    pub fn hand_in_progress(&self) -> bool {
        self.hand.as_ref().is_some_and(|h| !h.is_complete())
    }

    /// Adds a player to the roster; they are dealt in from the next hand.
    pub fn seat_player(&mut self, id: &str, stack: Chips) -> Result<usize, GameError> {
        if self.roster.iter().any(|p| p.id == id) {
            return Err(GameError::SeatTaken(id.to_string()));
        }
        if self.roster.len() >= self.config.max_seats {
            return Err(GameError::TableFull(self.config.max_seats));
        }
        self.roster.push(SeatedPlayer::new(id, stack));
        tracing::info!(table_id = %self.id, player_id = id, stack, "player seated");
        Ok(self.roster.len() - 1)
    }

    pub fn remove_player(&mut self, id: &str) -> Result<SeatedPlayer, GameError> {
        if self.hand_in_progress() {
            return Err(GameError::HandInProgress);
        }
        let index = self
            .roster
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| GameError::PlayerNotFound(id.to_string()))?;
        let removed = self.roster.remove(index);

        // keep the button on the same neighbour after the seats shift down
        if let Some(prev) = self.engine.previous_dealer() {
            let len = self.roster.len();
            let moved = if len == 0 {
                None
            } else if index <= prev {
                Some((prev + len - 1) % len)
            } else {
                Some(prev)
            };
            self.engine.set_previous_dealer(moved);
        }
        tracing::info!(table_id = %self.id, player_id = id, stack = removed.stack, "player left");
        Ok(removed)
    }

    pub fn start_hand(&mut self) -> Result<HandState, GameError> {
        if self.hand_in_progress() {
            return Err(GameError::HandInProgress);
        }
        let state = self.engine.start_hand(&self.roster)?;
        self.install(state.clone());
        Ok(state)
    }

    /// Applies `action` for `player_id` to the hand in progress.
    pub fn act(&mut self, player_id: &str, action: PlayerAction) -> Result<HandState, GameError> {
        let hand = self
            .hand
            .as_ref()
            .filter(|h| !h.is_complete())
            .ok_or(GameError::NoHandInProgress)?;
        let seat = hand
            .seats()
            .iter()
            .position(|s| s.player_id() == player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;

        match engine::apply_action(hand, seat, action) {
            Ok(next) => {
                self.install(next.clone());
                Ok(next)
            }
            Err(err) => {
                tracing::warn!(
                    table_id = %self.id,
                    player_id,
                    action = ?action,
                    error = %err,
                    "action rejected"
                );
                Err(err)
            }
        }
    }

    pub fn legal_actions(&self, player_id: &str) -> Vec<LegalAction> {
        let Some(hand) = self.hand.as_ref() else {
            return Vec::new();
        };
        match hand.seats().iter().position(|s| s.player_id() == player_id) {
            Some(seat) => engine::legal_actions(hand, seat),
            None => Vec::new(),
        }
    }

    /// The current (or last finished) hand.
    pub fn snapshot(&self) -> Option<HandState> {
        self.hand.clone()
    }

    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }

    fn install(&mut self, state: HandState) {
        if state.is_complete() {
            for seat in state.seats() {
                if let Some(p) = self.roster.iter_mut().find(|p| p.id == seat.player_id()) {
                    p.stack = seat.stack();
                }
            }
            self.last_result = state.result().cloned();
        }
        self.hand = Some(state);
    }
}

#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: RwLock<HashMap<TableId, SharedTable>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, id: &str, config: TableConfig) -> Result<SharedTable, GameError> {
        let table = Arc::new(Mutex::new(Table::new(id, config)?));
        let mut guard = self
            .tables
            .write()
            .map_err(|_| GameError::StoragePoisoned)?;
        if guard.contains_key(id) {
            return Err(GameError::InvalidConfig(format!(
                "table {} already exists",
                id
            )));
        }
        guard.insert(id.to_string(), Arc::clone(&table));
        tracing::debug!(table_id = id, "table created");
        Ok(table)
    }

    pub fn get(&self, id: &str) -> Result<SharedTable, GameError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| GameError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::TableNotFound(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> Result<SharedTable, GameError> {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| GameError::StoragePoisoned)?;
        guard
            .remove(id)
            .ok_or_else(|| GameError::TableNotFound(id.to_string()))
    }

    pub fn ids(&self) -> Vec<TableId> {
        match self.tables.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Runs `f` with exclusive access to one table.
    pub fn with_table<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Table) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let table = self.get(id)?;
        let mut guard = table.lock().map_err(|_| GameError::StoragePoisoned)?;
        f(&mut guard)
    }
}
