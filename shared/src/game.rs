//! Guessing game: one session per play-through, from mode selection to game over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ColorRecord, LIGHT_TAG};
use crate::colors::{Hsl, format_hsl};
use crate::fuzzy::{
    Closeness, HslHint, colors_close_enough, generate_hint, generate_hsl_hint, names_close_enough,
};
use crate::rng::Rng;
use crate::storage::{self, KeyValueStore};

pub const STARTING_LIVES: u32 = 3;
pub const STARTING_HINTS: u32 = 3;
/// Lives and hints granted when [`DebugOptions::unlimited`] is set.
pub const DEBUG_ALLOWANCE: u32 = 999;
/// Choices offered on the new-game screen.
pub const COLOR_COUNT_OPTIONS: [ColorCount; 4] = [
    ColorCount::Limited(10),
    ColorCount::Limited(20),
    ColorCount::Limited(50),
    ColorCount::All,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    #[default]
    Menu,
    NewGame,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Name the color shown.
    #[default]
    Nametags,
    /// Dial in the HSL of the keyword shown.
    Sliders,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nametags => "nametags",
            Self::Sliders => "sliders",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuessResult {
    Correct,
    CloseEnough,
    Partial,
    Incorrect,
}

impl GuessResult {
    pub fn headline(self) -> &'static str {
        match self {
            Self::Correct => "Correct!",
            Self::CloseEnough => "Close enough!",
            Self::Partial => "Partial credit!",
            Self::Incorrect => "Incorrect!",
        }
    }
}

pub fn points_for(result: GuessResult) -> f64 {
    match result {
        GuessResult::Correct | GuessResult::CloseEnough => 1.0,
        GuessResult::Partial => 0.5,
        GuessResult::Incorrect => 0.0,
    }
}

/// A name for nametags rounds, an HSL triple for sliders rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Guess {
    Name(String),
    Hsl(Hsl),
}

impl Guess {
    fn mode(&self) -> GameMode {
        match self {
            Self::Name(_) => GameMode::Nametags,
            Self::Hsl(_) => GameMode::Sliders,
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Hsl(hsl) => f.write_str(&format_hsl(hsl)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessAndResult {
    pub guess: Guess,
    pub result: GuessResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCount {
    Limited(usize),
    All,
}

impl Default for ColorCount {
    fn default() -> Self {
        Self::Limited(10)
    }
}

impl fmt::Display for ColorCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::All => f.write_str("all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Name(String),
    Hsl(HslHint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugOptions {
    pub unlimited: bool,
}

impl DebugOptions {
    fn allowance(self, normal: u32) -> u32 {
        if self.unlimited { DEBUG_ALLOWANCE } else { normal }
    }
}

/// Best score per mode. Only ever raised.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub nametags: f64,
    pub sliders: f64,
}

impl HighScores {
    pub fn get(&self, mode: GameMode) -> f64 {
        match mode {
            GameMode::Nametags => self.nametags,
            GameMode::Sliders => self.sliders,
        }
    }

    /// Raise the score for `mode` if `score` beats it. Returns whether it changed.
    pub fn record(&mut self, mode: GameMode, score: f64) -> bool {
        let slot = match mode {
            GameMode::Nametags => &mut self.nametags,
            GameMode::Sliders => &mut self.sliders,
        };
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.nametags, self.sliders]
            .iter()
            .all(|score| score.is_finite() && *score >= 0.0)
    }
}

/// The last guess next to the right answer, shown after each round.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub result: GuessResult,
    pub guess: String,
    pub actual: String,
}

impl Feedback {
    pub fn message(&self) -> String {
        match self.result {
            GuessResult::Correct => format!("The color was {}.", self.actual),
            _ => format!(
                "You guessed {}; the correct answer was {}.",
                self.guess, self.actual
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub guess: String,
    pub actual: String,
    pub points: f64,
    pub result: GuessResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOverReport {
    pub headline: String,
    pub correct_percent: u32,
    pub high_score: Option<String>,
    pub followup: &'static str,
    pub suggestion: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub state: GameState,
    pub mode: GameMode,
    pub set: Vec<ColorRecord>,
    pub index: usize,
    pub score: f64,
    pub lives: u32,
    pub hints: u32,
    pub guesses: Vec<GuessAndResult>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            state: GameState::Menu,
            mode: GameMode::Nametags,
            set: Vec::new(),
            index: 0,
            score: 0.0,
            lives: STARTING_LIVES,
            hints: STARTING_HINTS,
            guesses: Vec::new(),
        }
    }
}

impl GameSession {
    pub fn start_new_game(&mut self, debug: DebugOptions) {
        *self = Self {
            state: GameState::NewGame,
            mode: self.mode,
            lives: debug.allowance(STARTING_LIVES),
            hints: debug.allowance(STARTING_HINTS),
            ..Self::default()
        };
    }

    /// Deal the rounds for `mode` and start playing.
    ///
    /// A limited count skips near-white colors (tagged `light`); `All` deals the whole
    /// catalog. Ignored unless a new game has been started.
    pub fn select_mode(
        &mut self,
        mode: GameMode,
        count: ColorCount,
        catalog: &[ColorRecord],
        rng: &mut Rng,
    ) -> bool {
        if self.state != GameState::NewGame {
            return false;
        }

        let mut set: Vec<ColorRecord> = match count {
            ColorCount::All => catalog.to_vec(),
            ColorCount::Limited(_) => catalog
                .iter()
                .filter(|color| !color.has_tag(LIGHT_TAG))
                .cloned()
                .collect(),
        };
        rng.shuffle(&mut set);
        if let ColorCount::Limited(n) = count {
            set.truncate(n);
        }

        self.mode = mode;
        self.state = if set.is_empty() {
            GameState::GameOver
        } else {
            GameState::Playing
        };
        self.set = set;
        true
    }

    pub fn current_color(&self) -> Option<&ColorRecord> {
        if self.state != GameState::Playing {
            return None;
        }
        self.set.get(self.index)
    }

    fn is_current(&self, keyword: &str) -> bool {
        self.current_color()
            .is_some_and(|color| color.keyword == keyword)
    }

    /// Score a guess for the round showing `keyword`.
    ///
    /// Returns `None` (and changes nothing) if `keyword` is not the current round or
    /// the guess kind does not match the session mode. Only an incorrect guess costs
    /// a life.
    pub fn guess(&mut self, keyword: &str, guess: Guess) -> Option<GuessResult> {
        if !self.is_current(keyword) || guess.mode() != self.mode {
            return None;
        }
        let color = &self.set[self.index];
        let result = evaluate(color, &guess);

        self.score += points_for(result);
        if result == GuessResult::Incorrect {
            self.lives = self.lives.saturating_sub(1);
        }
        self.index += 1;
        self.guesses.push(GuessAndResult { guess, result });

        if self.index == self.set.len() || self.lives == 0 {
            self.state = GameState::GameOver;
        }
        Some(result)
    }

    /// Spend a hint on the round showing `keyword`. No-op when out of hints.
    pub fn use_hint(&mut self, keyword: &str, rng: &mut Rng) -> Option<Hint> {
        if self.hints == 0 || !self.is_current(keyword) {
            return None;
        }
        let color = &self.set[self.index];
        let hint = match self.mode {
            GameMode::Nametags => Hint::Name(generate_hint(&color.keyword, rng)),
            GameMode::Sliders => Hint::Hsl(generate_hsl_hint(color, rng)),
        };
        self.hints -= 1;
        Some(hint)
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        let last = self.guesses.last()?;
        let color = self.set.get(self.guesses.len() - 1)?;
        Some(Feedback {
            result: last.result,
            guess: last.guess.to_string(),
            actual: self.answer_text(color),
        })
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        self.guesses
            .iter()
            .zip(&self.set)
            .map(|(entry, color)| SummaryRow {
                guess: entry.guess.to_string(),
                actual: self.answer_text(color),
                points: points_for(entry.result),
                result: entry.result,
            })
            .collect()
    }

    fn answer_text(&self, color: &ColorRecord) -> String {
        match self.mode {
            GameMode::Nametags => color.keyword.clone(),
            GameMode::Sliders => format_hsl(&color.hsl),
        }
    }

    pub fn correct_percent(&self) -> u32 {
        if self.index == 0 {
            return 0;
        }
        (self.score / self.index as f64 * 100.0).round() as u32
    }

    pub fn game_over_report(&self, high_score: f64) -> GameOverReport {
        let percent = self.correct_percent();
        let opener = if self.lives == 0 { "Game over!" } else { "Nice job!" };
        let followup = match percent {
            0..=9 => "Keep practicing to improve! Remember to use your hints if you need them.",
            10..=49 => "Keep practicing to improve!",
            50..=79 => "You're starting to get them now!",
            80..=94 => "You have a great color memory!",
            _ => "You're a true color master!",
        };
        let suggestion = if percent < 50 && self.set.len() > 20 {
            Some("Try adjusting the number of colors down while you're building your memory.")
        } else if percent > 75 && self.set.len() <= 20 {
            Some("Try adding more colors to further challenge yourself.")
        } else {
            None
        };

        GameOverReport {
            headline: format!(
                "{opener} You got {} / {} ({percent}%) correct.",
                self.score,
                self.set.len()
            ),
            correct_percent: percent,
            high_score: (high_score > 0.0).then(|| format!("Your high score is {high_score}.")),
            followup,
            suggestion,
        }
    }

    /// Structural check applied to sessions read back from storage.
    pub fn is_valid(&self) -> bool {
        self.guesses.len() == self.index
            && self.index <= self.set.len()
            && self.score.is_finite()
            && self.score >= 0.0
            && self.guesses.iter().all(|g| g.guess.mode() == self.mode)
            && (self.state != GameState::Playing || self.index < self.set.len())
    }

    /// Complete every remaining round as correct.
    #[cfg(any(test, feature = "debug-tools"))]
    pub fn insta_win(&mut self, score: Option<f64>) {
        if !matches!(self.state, GameState::Playing | GameState::GameOver) {
            return;
        }
        let total = self.set.len();
        for color in &self.set[self.index..] {
            let guess = match self.mode {
                GameMode::Nametags => Guess::Name(color.keyword.clone()),
                GameMode::Sliders => Guess::Hsl(color.hsl),
            };
            self.guesses.push(GuessAndResult {
                guess,
                result: GuessResult::Correct,
            });
        }
        self.index = total;
        self.score = score.filter(|s| *s > 0.0).unwrap_or(total as f64);
        if self.score <= total as f64 - 3.0 {
            self.lives = 0;
        }
        self.state = GameState::GameOver;
    }
}

fn evaluate(color: &ColorRecord, guess: &Guess) -> GuessResult {
    match guess {
        Guess::Name(name) => {
            if *name == color.keyword {
                GuessResult::Correct
            } else if names_close_enough(name, &color.keyword) {
                GuessResult::CloseEnough
            } else {
                GuessResult::Incorrect
            }
        }
        Guess::Hsl(hsl) => {
            if *hsl == color.hsl {
                GuessResult::Correct
            } else if colors_close_enough(hsl, &color.hsl, Closeness::All) {
                GuessResult::CloseEnough
            } else if colors_close_enough(hsl, &color.hsl, Closeness::Any) {
                GuessResult::Partial
            } else {
                GuessResult::Incorrect
            }
        }
    }
}

/// Session plus high scores, persisted through `S` after every change.
pub struct Game<S: KeyValueStore> {
    session: GameSession,
    high_scores: HighScores,
    store: S,
    rng: Rng,
    debug: DebugOptions,
}

impl<S: KeyValueStore> Game<S> {
    /// Resume a stored session that was mid-game or finished; anything else starts at the menu.
    pub fn restore(store: S, rng: Rng, debug: DebugOptions) -> Self {
        let stored = storage::load_session(&store);
        let session = match stored.state {
            GameState::Playing | GameState::GameOver => stored,
            _ => GameSession::default(),
        };
        let high_scores = storage::load_high_scores(&store);
        Self {
            session,
            high_scores,
            store,
            rng,
            debug,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn start_new_game(&mut self) {
        self.session.start_new_game(self.debug);
        self.persist();
    }

    pub fn select_mode(&mut self, mode: GameMode, count: ColorCount, catalog: &[ColorRecord]) {
        if self.session.select_mode(mode, count, catalog, &mut self.rng) {
            self.persist();
            if self.session.state == GameState::GameOver {
                self.finish();
            }
        }
    }

    pub fn guess(&mut self, keyword: &str, guess: Guess) -> Option<GuessResult> {
        let result = self.session.guess(keyword, guess)?;
        self.persist();
        if self.session.state == GameState::GameOver {
            self.finish();
        }
        Some(result)
    }

    pub fn use_hint(&mut self, keyword: &str) -> Option<Hint> {
        let hint = self.session.use_hint(keyword, &mut self.rng)?;
        self.persist();
        Some(hint)
    }

    pub fn game_over_report(&self) -> GameOverReport {
        self.session
            .game_over_report(self.high_scores.get(self.session.mode))
    }

    #[cfg(any(test, feature = "debug-tools"))]
    pub fn insta_win(&mut self, score: Option<f64>) {
        self.session.insta_win(score);
        self.persist();
        if self.session.state == GameState::GameOver {
            self.finish();
        }
    }

    fn persist(&mut self) {
        storage::save_session(&mut self.store, &self.session);
    }

    fn finish(&mut self) {
        let mode = self.session.mode;
        if self.high_scores.record(mode, self.session.score) {
            tracing::info!(%mode, score = self.session.score, "new high score");
            storage::save_high_scores(&mut self.store, &self.high_scores);
        }
    }
}
