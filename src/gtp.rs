//! Go Text Protocol (GTP) front end.
//!
//! GTP is a text-based protocol for communicating with Go programs. This
//! module speaks GTP version 2 over any `BufRead`/`Write` pair so the rules
//! engine can sit behind a graphical interface such as Sabaki or GoGui.
//! Moves generated by `genmove` are random legal moves.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Resize (1 to 25) and clear the board
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Record komi (reported back by `get_komi`)
//! - `get_komi`
//! - `rules [<name>]` - Report or change the ruleset; clears the board
//! - `play <color> <vertex>` - Play a move for the player to move
//! - `genmove <color>` - Play a random legal move
//! - `captures <color>` - Stones captured by a color
//! - `showboard` - Print the board
//!
//! ## Example
//!
//! ```
//! use go_rules::gtp::GtpEngine;
//! use go_rules::ruleset::Ruleset;
//!
//! let mut engine = GtpEngine::new(Ruleset::Japanese, 9, 1);
//! let mut out = Vec::new();
//! engine.run("play b E5\nshowboard\nquit\n".as_bytes(), &mut out).unwrap();
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use fastrand::Rng;
use tracing::{debug, warn};

use crate::color::Color;
use crate::constants::MAX_GTP_SIZE;
use crate::coordinate::parse_vertex;
use crate::game::Game;
use crate::playout::choose_random_move;
use crate::ruleset::Ruleset;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "genmove",
    "get_komi",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "rules",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
    komi: f32,
    rng: Rng,
}

impl GtpEngine {
    /// Create an engine with a `size` x `size` board.
    ///
    /// `size` is clamped to `1..=25`, the range GTP vertices can address.
    pub fn new(ruleset: Ruleset, size: usize, seed: u64) -> Self {
        let size = size.clamp(1, MAX_GTP_SIZE);
        Self {
            game: Self::fresh(ruleset, size),
            komi: ruleset.effective_komi(),
            rng: Rng::with_seed(seed),
        }
    }

    fn fresh(ruleset: Ruleset, size: usize) -> Game {
        Game::new(ruleset, size, size).expect("board size is clamped to a positive value")
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading GTP command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                debug!(%command, %message, "GTP command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("writing GTP response")?;
            output.flush().context("flushing GTP response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (1..=MAX_GTP_SIZE).contains(&size) => {
                        self.game = Self::fresh(self.game.ruleset(), size);
                        (true, String::new())
                    }
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.game = Self::fresh(self.game.ruleset(), self.game.width());
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.komi = komi;
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "get_komi" => (true, self.komi.to_string()),

            "rules" => match args.first() {
                None => (true, self.game.ruleset().to_string()),
                Some(name) => match name.parse::<Ruleset>() {
                    Ok(ruleset) => {
                        self.game = Self::fresh(ruleset, self.game.width());
                        self.komi = ruleset.effective_komi();
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                },
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let color = match args[0].parse::<Color>() {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };
                if color != self.game.player_to_move() {
                    return (false, format!("illegal move: it is {}'s turn", self.game.player_to_move()));
                }

                if args[1].eq_ignore_ascii_case("pass") {
                    self.game.pass();
                    return (true, String::new());
                }

                let at = match parse_vertex(args[1], self.game.height()) {
                    Ok(at) => at,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.play(at) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let color = match args.first().map(|a| a.parse::<Color>()) {
                    Some(Ok(c)) => c,
                    Some(Err(e)) => return (false, e.to_string()),
                    None => return (false, "missing argument".to_string()),
                };
                if color != self.game.player_to_move() {
                    return (false, format!("it is {}'s turn", self.game.player_to_move()));
                }

                let Some(at) = choose_random_move(&self.game, &mut self.rng) else {
                    self.game.pass();
                    return (true, "pass".to_string());
                };
                match self.game.play(at) {
                    Ok(_) => match at.to_vertex(self.game.height()) {
                        Some(vertex) => (true, vertex),
                        None => (false, "move has no vertex".to_string()),
                    },
                    Err(e) => {
                        warn!(%at, %e, "generated move was rejected");
                        (false, e.to_string())
                    }
                }
            }

            "captures" => match args.first().map(|a| a.parse::<Color>()) {
                Some(Ok(c)) => (true, self.game.captures(c).to_string()),
                Some(Err(e)) => (false, e.to_string()),
                None => (false, "missing argument".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game)),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
