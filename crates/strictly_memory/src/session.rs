//! Game session: one game from deal to final score.
//!
//! The session owns the board, scores, current player, move history, and
//! the turn engine. It is the only way to mutate a board, one pick at a
//! time, and it becomes read-only once every pair has been found.

use super::contracts::{Contract, GameNotOver, TurnContract};
use super::{
    Board, BoardSnapshot, ContractError, DeckBuilder, EntropyShuffle, GameConfig, Move, Outcome,
    PickError, PickOutcome, Player, Position, Scoreboard, SeededShuffle, SetupError, Shuffle,
    Symbol, TurnEngine, TurnError, TurnPolicy, TurnReport, TurnState,
};
use tracing::{debug, info, instrument, warn};

/// A two-player memory game in progress (or finished).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) board: Board,
    pub(crate) scores: Scoreboard,
    current_player: Player,
    is_over: bool,
    history: Vec<Move>,
    engine: TurnEngine,
    policy: TurnPolicy,
}

impl GameSession {
    /// Starts a game on the given board with the default turn policy.
    pub fn new(board: Board) -> Self {
        Self::with_policy(board, TurnPolicy::default())
    }

    /// Starts a game on the given board.
    ///
    /// Every card starts face down; `Player::One` moves first.
    #[instrument(skip(board), fields(dimensions = %board.dimensions()))]
    pub fn with_policy(board: Board, policy: TurnPolicy) -> Self {
        let board = board.face_down_copy();
        info!("New game session");
        Self {
            board,
            scores: Scoreboard::default(),
            current_player: Player::One,
            is_over: false,
            history: Vec::new(),
            engine: TurnEngine::new(),
            policy,
        }
    }

    /// Deals a new game from a configuration.
    ///
    /// Uses the configured seed if present, otherwise a fresh random one.
    #[instrument(skip(config), fields(rows = *config.rows(), columns = *config.columns()))]
    pub fn from_config(config: &GameConfig) -> Result<Self, SetupError> {
        match config.seed() {
            Some(seed) => Self::from_config_with(config, &mut SeededShuffle::new(*seed)),
            None => Self::from_config_with(config, &mut EntropyShuffle::new()),
        }
    }

    /// Deals a new game from a configuration and an explicit shuffle.
    pub fn from_config_with(config: &GameConfig, shuffler: &mut impl Shuffle) -> Result<Self, SetupError> {
        let (rows, columns) = (*config.rows(), *config.columns());
        let deck = DeckBuilder::new(config.alphabet().clone()).build(rows, columns, shuffler)?;
        let board = Board::construct(rows, columns, deck)?;
        Ok(Self::with_policy(board, *config.turn_policy()))
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only visibility view for renderers.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Current scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// True once every pair is matched. Never resets.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Completed turns, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// State of the in-flight turn.
    pub fn turn_state(&self) -> TurnState {
        self.engine.state()
    }

    /// The first pick of the in-flight turn, if any.
    pub fn pending_pick(&self) -> Option<Position> {
        self.engine.pending_pick()
    }

    /// The turn-advance rule.
    pub fn policy(&self) -> TurnPolicy {
        self.policy
    }

    /// Final result, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over.then(|| self.scores.outcome())
    }

    /// Picks one card for the current player.
    ///
    /// The first pick of a turn reveals a card. The second pick reveals
    /// another, resolves the turn, records it, and advances play.
    ///
    /// # Errors
    ///
    /// Rejected picks ([`PickError`]) change nothing; retry the same step.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn pick(&mut self, position: Position) -> Result<PickOutcome, TurnError> {
        TurnContract::pre(self, &position)?;

        match self.engine.state() {
            TurnState::AwaitingFirstPick => {
                let symbol = self.engine.pick_first(&mut self.board, position)?;
                Ok(PickOutcome::FirstRevealed { position, symbol })
            }
            TurnState::AwaitingSecondPick { .. } => {
                #[cfg(debug_assertions)]
                let before = self.clone();

                self.engine.pick_second(&mut self.board, position)?;
                let report = self.complete_turn()?;

                #[cfg(debug_assertions)]
                TurnContract::post(&before, self)?;

                Ok(PickOutcome::TurnCompleted(report))
            }
            state => Err(ContractError::UnexpectedState(state).into()),
        }
    }

    /// Plays a whole turn.
    ///
    /// Unlike two calls to [`pick`](Self::pick), this is all-or-nothing: a
    /// repeated position is rejected before anything is revealed, and a
    /// rejected second pick flips the first card back down.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn play_turn(&mut self, first: Position, second: Position) -> Result<TurnReport, TurnError> {
        if self.engine.state() != TurnState::AwaitingFirstPick {
            return Err(ContractError::UnexpectedState(self.engine.state()).into());
        }
        GameNotOver::check(self)?;
        if first == second {
            return Err(PickError::DuplicatePick(second).into());
        }

        self.pick(first)?;
        match self.pick(second) {
            Ok(PickOutcome::TurnCompleted(report)) => Ok(report),
            Ok(PickOutcome::FirstRevealed { .. }) => {
                Err(ContractError::UnexpectedState(self.engine.state()).into())
            }
            Err(err) => {
                if err.is_recoverable() {
                    debug!(%err, "Second pick rejected, rolling back first");
                    self.engine.abandon(&mut self.board)?;
                }
                Err(err)
            }
        }
    }

    /// Cancels a pending first pick, flipping it back down.
    #[instrument(skip(self))]
    pub fn abandon_pick(&mut self) -> Result<(), TurnError> {
        Ok(self.engine.abandon(&mut self.board)?)
    }

    /// Rebuilds a session by replaying recorded moves on a fresh copy of `board`.
    ///
    /// Every move must re-apply with the same player, positions, and match
    /// result.
    #[instrument(skip(board, moves), fields(moves = moves.len()))]
    pub fn replay(board: &Board, policy: TurnPolicy, moves: &[Move]) -> Result<Self, TurnError> {
        let mut game = Self::with_policy(board.face_down_copy(), policy);

        for (turn, recorded) in moves.iter().enumerate() {
            if recorded.player() != game.current_player {
                warn!(turn, expected = %game.current_player, "Replay player mismatch");
                return Err(ContractError::ReplayDiverged(turn).into());
            }
            let report = game
                .play_turn(recorded.first(), recorded.second())
                .map_err(|err| {
                    warn!(turn, %err, "Replay move rejected");
                    ContractError::ReplayDiverged(turn)
                })?;
            if report.played() != recorded {
                warn!(turn, "Replay match result mismatch");
                return Err(ContractError::ReplayDiverged(turn).into());
            }
        }

        Ok(game)
    }

    /// Replays this session's own history from a face-down board.
    pub fn replay_history(&self) -> Result<Self, TurnError> {
        Self::replay(&self.board, self.policy, &self.history)
    }

    fn symbol_at(&self, pos: Position) -> Result<Symbol, ContractError> {
        self.board
            .card(pos)
            .map(|card| card.symbol())
            .ok_or(ContractError::UnknownPosition(pos))
    }

    /// `Resolving -> TurnComplete -> AwaitingFirstPick`, with bookkeeping.
    fn complete_turn(&mut self) -> Result<TurnReport, TurnError> {
        let player = self.current_player;
        let played = self.engine.resolve(&mut self.board, player)?;
        let symbols = (self.symbol_at(played.first())?, self.symbol_at(played.second())?);

        if played.is_match() {
            self.scores.award(player);
        }
        self.history.push(played);
        self.engine.reset()?;

        if self.board.all_matched() {
            self.is_over = true;
            info!(
                player1 = self.scores.get(Player::One),
                player2 = self.scores.get(Player::Two),
                turns = self.history.len(),
                "Game over"
            );
        } else {
            self.current_player = self.policy.next_player(player, played.is_match());
        }

        info!(%played, next = %self.current_player, "Turn complete");
        Ok(TurnReport::new(played, symbols, self.current_player, self.is_over))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoShuffle;

    fn game(layout: &str, rows: usize, columns: usize) -> GameSession {
        let board = Board::construct(rows, columns, layout.chars().map(Symbol::new).collect()).unwrap();
        GameSession::new(board)
    }

    #[test]
    fn test_new_session_state() {
        let game = game("ABAB", 2, 2);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.scores().total(), 0);
        assert!(!game.is_over());
        assert!(game.move_history().is_empty());
        assert_eq!(game.turn_state(), TurnState::AwaitingFirstPick);
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_stepwise_turn() {
        let mut game = game("ABAB", 2, 2);
        let first = game.pick(Position::new(0, 0)).unwrap();
        assert_eq!(
            first,
            PickOutcome::FirstRevealed {
                position: Position::new(0, 0),
                symbol: Symbol::new('A')
            }
        );
        assert_eq!(game.pending_pick(), Some(Position::new(0, 0)));

        let PickOutcome::TurnCompleted(report) = game.pick(Position::new(1, 0)).unwrap() else {
            panic!("Second pick should complete the turn");
        };
        assert!(report.played().is_match());
        assert_eq!(*report.symbols(), (Symbol::new('A'), Symbol::new('A')));
        assert_eq!(*report.next_player(), Player::Two);
        assert_eq!(game.scores().get(Player::One), 1);
    }

    #[test]
    fn test_rejected_second_pick_keeps_turn_open() {
        let mut game = game("ABAB", 2, 2);
        game.pick(Position::new(0, 0)).unwrap();
        let err = game.pick(Position::new(9, 9)).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(game.pending_pick(), Some(Position::new(0, 0)));
        assert!(game.pick(Position::new(0, 1)).is_ok());
        assert_eq!(game.move_history().len(), 1);
    }

    #[test]
    fn test_play_turn_rolls_back_on_rejected_second_pick() {
        let mut game = game("ABAB", 2, 2);
        let before = game.clone();
        let err = game
            .play_turn(Position::new(0, 0), Position::new(2, 0))
            .unwrap_err();
        assert_eq!(err, PickError::OutOfBounds(Position::new(2, 0)).into());
        assert_eq!(game, before);
    }

    #[test]
    fn test_abandon_pick() {
        let mut game = game("ABAB", 2, 2);
        game.pick(Position::new(0, 1)).unwrap();
        game.abandon_pick().unwrap();
        assert_eq!(game.turn_state(), TurnState::AwaitingFirstPick);
        assert!(!game.board().card(Position::new(0, 1)).unwrap().is_revealed());
        assert!(game.abandon_pick().is_err());
    }

    #[test]
    fn test_extra_turn_policy() {
        let board = Board::construct(2, 4, "ABCDABCD".chars().map(Symbol::new).collect()).unwrap();
        let mut game = GameSession::with_policy(board, TurnPolicy::ExtraTurnOnMatch);

        game.play_turn(Position::new(0, 0), Position::new(1, 0)).unwrap();
        assert_eq!(game.current_player(), Player::One);

        game.play_turn(Position::new(0, 1), Position::new(0, 2)).unwrap();
        assert_eq!(game.current_player(), Player::Two);
    }

    #[test]
    fn test_from_config_with_explicit_shuffle() {
        let config = GameConfig::new(2, 3);
        let game = GameSession::from_config_with(&config, &mut NoShuffle).unwrap();
        let layout: String = game.board().symbols().iter().map(|s| s.as_char()).collect();
        assert_eq!(layout, "AABBCC");
    }

    #[test]
    fn test_from_config_rejects_odd_board() {
        let config = GameConfig::new(3, 3).with_seed(1);
        assert_eq!(
            GameSession::from_config(&config),
            Err(SetupError::InvalidBoardSize { rows: 3, columns: 3 })
        );
    }

    #[test]
    fn test_replay_history_reproduces_session() {
        let mut game = game("ABCDABCD", 2, 4);
        game.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();
        game.play_turn(Position::new(0, 2), Position::new(1, 2)).unwrap();
        game.play_turn(Position::new(0, 3), Position::new(1, 0)).unwrap();

        let replayed = game.replay_history().unwrap();
        assert_eq!(replayed, game);
    }

    #[test]
    fn test_replay_detects_tampered_history() {
        let mut game = game("ABAB", 2, 2);
        game.play_turn(Position::new(0, 0), Position::new(0, 1)).unwrap();

        let forged = [Move::new(Player::One, Position::new(0, 0), Position::new(0, 1), true)];
        assert_eq!(
            GameSession::replay(game.board(), game.policy(), &forged),
            Err(ContractError::ReplayDiverged(0).into())
        );

        let wrong_player = [Move::new(Player::Two, Position::new(0, 0), Position::new(0, 1), false)];
        assert_eq!(
            GameSession::replay(game.board(), game.policy(), &wrong_player),
            Err(ContractError::ReplayDiverged(0).into())
        );
    }
}
