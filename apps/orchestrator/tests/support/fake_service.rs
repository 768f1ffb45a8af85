//! In-memory game service with deterministic combat and a call log.

use std::sync::Mutex;

use async_trait::async_trait;
use orchestrator::client::{AttackOutcome, GameService, NewGameRequest, ServiceError};
use orchestrator::domain::connectivity::is_connected;
use orchestrator::domain::{continent_bonus, GameSnapshot, LegalAction, Phase, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetState,
    Reinforce { territory: String, armies: u32 },
    Attack { from: String, to: String, dice: u32 },
    Fortify { from: String, to: String, armies: u32 },
    MoveArmies { from: String, to: String, armies: u32 },
    TradeCards { indices: Vec<usize> },
    AdvancePhase,
    NewGame,
}

struct Inner {
    initial: GameSnapshot,
    state: GameSnapshot,
    calls: Vec<Call>,
    failing_fetches: u32,
    fail_forever: bool,
    ignore_advance: bool,
    move_after_conquest: bool,
}

pub struct FakeGameService {
    inner: Mutex<Inner>,
}

fn rejected(operation: &'static str, detail: impl Into<String>) -> ServiceError {
    ServiceError::Rejected {
        operation,
        status: 400,
        detail: detail.into(),
    }
}

impl FakeGameService {
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: initial.clone(),
                initial,
                calls: Vec::new(),
                failing_fetches: 0,
                fail_forever: false,
                ignore_advance: false,
                move_after_conquest: false,
            }),
        }
    }

    /// The next `n` state fetches fail with a transport error.
    pub fn fail_fetches(self, n: u32) -> Self {
        self.inner.lock().unwrap().failing_fetches = n;
        self
    }

    pub fn unreachable(self) -> Self {
        self.inner.lock().unwrap().fail_forever = true;
        self
    }

    /// Accepts `advance_phase` but never moves.
    pub fn frozen(self) -> Self {
        self.inner.lock().unwrap().ignore_advance = true;
        self
    }

    /// A conquest enters MoveArmies and publishes the move bounds as a hint
    /// instead of finishing the move inside `attack`.
    pub fn with_move_phase(self) -> Self {
        self.inner.lock().unwrap().move_after_conquest = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::GetState)
            .collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.inner.lock().unwrap().state.clone()
    }

    fn with_state<T>(
        &self,
        call: Call,
        f: impl FnOnce(&mut GameSnapshot, bool) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.fail_forever {
            return Err(ServiceError::Transport("connection refused".into()));
        }
        let move_after_conquest = inner.move_after_conquest;
        f(&mut inner.state, move_after_conquest)
    }
}

fn check_turn(
    state: &GameSnapshot,
    player: PlayerId,
    phase: Phase,
    operation: &'static str,
) -> Result<String, ServiceError> {
    let current = state
        .active_player()
        .ok_or_else(|| rejected(operation, "no active player"))?;
    if current.id != player {
        return Err(rejected(operation, "not your turn"));
    }
    if state.phase != phase {
        return Err(rejected(operation, format!("not in {phase} phase")));
    }
    Ok(current.name.clone())
}

fn owned_by(state: &GameSnapshot, territory: &str, player: &str) -> bool {
    state
        .territory(territory)
        .is_some_and(|t| t.is_owned_by(player))
}

fn shift_armies(state: &mut GameSnapshot, from: &str, to: &str, armies: u32) {
    if let Some(t) = state.territories.get_mut(from) {
        t.armies -= armies;
    }
    if let Some(t) = state.territories.get_mut(to) {
        t.armies += armies;
    }
}

/// Moves to the next phase; after Fortify the next living player starts
/// reinforcing with `max(3, territories / 3)` plus continent bonuses.
fn advance(state: &mut GameSnapshot) {
    state.phase = match state.phase {
        Phase::Reinforce => Phase::Attack,
        Phase::Attack | Phase::MoveArmies => Phase::Fortify,
        Phase::Fortify => {
            end_turn(state);
            return;
        }
    };
    state.reinforcement_armies = 0;
}

fn end_turn(state: &mut GameSnapshot) {
    let mut order: Vec<(PlayerId, String)> = state
        .players
        .values()
        .map(|p| (p.id, p.name.clone()))
        .collect();
    order.sort();
    let at = order
        .iter()
        .position(|(_, name)| *name == state.current_player)
        .unwrap_or(0);
    for step in 1..=order.len() {
        let (_, name) = &order[(at + step) % order.len()];
        let Some(next) = state.players.get(name) else {
            continue;
        };
        if next.is_eliminated() {
            continue;
        }
        let pool = (next.territories.len() as u32 / 3).max(3) + continent_bonus(state, next);
        if (at + step) >= order.len() {
            state.turn += 1;
        }
        state.current_player = name.clone();
        state.phase = Phase::Reinforce;
        state.reinforcement_armies = pool;
        return;
    }
}

fn conquer(state: &mut GameSnapshot, attacker: &str, from: &str, to: &str, moved: u32) {
    let defender = state.owner_of(to).map(str::to_string);
    if let Some(t) = state.territories.get_mut(to) {
        t.owner = Some(attacker.to_string());
        t.armies = 0;
    }
    shift_armies(state, from, to, moved);
    if let Some(defender) = defender.and_then(|d| state.players.get_mut(&d)) {
        defender.territories.retain(|t| t != to);
    }
    if let Some(player) = state.players.get_mut(attacker) {
        player.territories.push(to.to_string());
    }

    let alive: Vec<String> = state
        .players
        .values()
        .filter(|p| !p.is_eliminated())
        .map(|p| p.name.clone())
        .collect();
    if alive.len() == 1 {
        state.game_over = true;
        state.winner = alive.into_iter().next();
    }
}

#[async_trait]
impl GameService for FakeGameService {
    async fn get_state(&self) -> Result<GameSnapshot, ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::GetState);
        if inner.fail_forever {
            return Err(ServiceError::Transport("connection refused".into()));
        }
        if inner.failing_fetches > 0 {
            inner.failing_fetches -= 1;
            return Err(ServiceError::Transport("connection reset".into()));
        }
        Ok(inner.state.clone())
    }

    async fn reinforce(
        &self,
        player: PlayerId,
        territory: &str,
        armies: u32,
    ) -> Result<(), ServiceError> {
        let call = Call::Reinforce {
            territory: territory.into(),
            armies,
        };
        self.with_state(call, |state, _| {
            let name = check_turn(state, player, Phase::Reinforce, "reinforce")?;
            if !owned_by(state, territory, &name) {
                return Err(rejected("reinforce", "territory not owned"));
            }
            if armies == 0 || armies > state.reinforcement_armies {
                return Err(rejected("reinforce", "not enough armies"));
            }
            state.reinforcement_armies -= armies;
            if let Some(t) = state.territories.get_mut(territory) {
                t.armies += armies;
            }
            Ok(())
        })
    }

    async fn attack(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        _armies: u32,
        dice: u32,
    ) -> Result<AttackOutcome, ServiceError> {
        let call = Call::Attack {
            from: from.into(),
            to: to.into(),
            dice,
        };
        self.with_state(call, |state, move_after_conquest| {
            let name = check_turn(state, player, Phase::Attack, "attack")?;
            if !owned_by(state, from, &name) || owned_by(state, to, &name) {
                return Err(rejected("attack", "bad attack"));
            }
            let attacking = state.armies_in(from);
            if dice == 0 || dice > 3 || dice >= attacking {
                return Err(rejected("attack", "bad dice"));
            }
            // Each die removes one defender; attacker never loses.
            let defending = state.armies_in(to);
            let losses = dice.min(defending);
            if let Some(t) = state.territories.get_mut(to) {
                t.armies -= losses;
            }
            let conquered = losses == defending;
            if conquered {
                conquer(state, &name, from, to, dice);
                if move_after_conquest && !state.game_over {
                    state.phase = Phase::MoveArmies;
                    state.possible_actions = vec![LegalAction::MoveArmies {
                        from: from.to_string(),
                        to: to.to_string(),
                        min_armies: 1,
                        max_armies: state.armies_in(from) - 1,
                    }];
                }
            }
            Ok(AttackOutcome {
                conquered,
                ..AttackOutcome::default()
            })
        })
    }

    async fn fortify(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
    ) -> Result<(), ServiceError> {
        let call = Call::Fortify {
            from: from.into(),
            to: to.into(),
            armies,
        };
        self.with_state(call, |state, _| {
            let name = check_turn(state, player, Phase::Fortify, "fortify")?;
            let connected = state
                .player(&name)
                .is_some_and(|p| is_connected(state, p, from, to));
            if !connected || armies >= state.armies_in(from) {
                return Err(rejected("fortify", "cannot fortify"));
            }
            shift_armies(state, from, to, armies);
            // One fortification ends the turn.
            end_turn(state);
            Ok(())
        })
    }

    async fn move_armies(
        &self,
        player: PlayerId,
        from: &str,
        to: &str,
        armies: u32,
    ) -> Result<(), ServiceError> {
        let call = Call::MoveArmies {
            from: from.into(),
            to: to.into(),
            armies,
        };
        self.with_state(call, |state, _| {
            check_turn(state, player, Phase::MoveArmies, "move_armies")?;
            if armies >= state.armies_in(from) {
                return Err(rejected("move_armies", "not enough armies"));
            }
            shift_armies(state, from, to, armies);
            state.phase = Phase::Attack;
            state.possible_actions.clear();
            Ok(())
        })
    }

    async fn trade_cards(&self, player: PlayerId, indices: &[usize]) -> Result<(), ServiceError> {
        let call = Call::TradeCards {
            indices: indices.to_vec(),
        };
        self.with_state(call, |state, _| {
            let name = check_turn(state, player, Phase::Reinforce, "trade_cards")?;
            let Some(current) = state.players.get_mut(&name) else {
                return Err(rejected("trade_cards", "unknown player"));
            };
            if indices.iter().any(|&i| i >= current.cards.len()) {
                return Err(rejected("trade_cards", "bad card index"));
            }
            let mut sorted = indices.to_vec();
            sorted.sort_unstable();
            for index in sorted.into_iter().rev() {
                current.cards.remove(index);
            }
            state.reinforcement_armies += 4;
            Ok(())
        })
    }

    async fn advance_phase(&self) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::AdvancePhase);
        if inner.fail_forever {
            return Err(ServiceError::Transport("connection refused".into()));
        }
        if !inner.ignore_advance {
            advance(&mut inner.state);
        }
        Ok(())
    }

    async fn new_game(&self, _request: &NewGameRequest) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::NewGame);
        if inner.fail_forever {
            return Err(ServiceError::Transport("connection refused".into()));
        }
        inner.state = inner.initial.clone();
        Ok(())
    }
}
