// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sample types registered by the demo: config records and a small
//! tic-tac-toe object graph.

use std::fmt;
use std::sync::OnceLock;
use typeforge::{DeclaredKind, HashMapTypeRegistry, RegistryError, TypeDescriptorBuilder};

// ============================================================================
// Config records
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GameConfig {
    pub release_year: i32,
    pub game_name: String,
    pub price: f64,
    pub character_names: Vec<String>,
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameConfig {{ releaseYear={}, gameName='{}', price={}, characterNames={:?} }}",
            self.release_year, self.game_name, self.price, self.character_names
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserInterfaceConfig {
    pub title_color: String,
    pub footer_text: String,
    pub title_font_size: i16,
    pub footer_font_size: i16,
    pub title_fonts: Vec<String>,
    pub title_font_sizes: Vec<i16>,
}

impl Default for UserInterfaceConfig {
    fn default() -> Self {
        Self {
            title_color: "#000000".into(),
            footer_text: String::new(),
            title_font_size: 12,
            footer_font_size: 10,
            title_fonts: Vec::new(),
            title_font_sizes: Vec::new(),
        }
    }
}

impl fmt::Display for UserInterfaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UserInterfaceConfig {{ titleColor='{}', footerText='{}', titleFontSize={}, \
             footerFontSize={}, titleFonts={:?}, titleFontSizes={:?} }}",
            self.title_color,
            self.footer_text,
            self.title_font_size,
            self.footer_font_size,
            self.title_fonts,
            self.title_font_sizes
        )
    }
}

/// Web server settings, built with explicit constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfiguration {
    pub port: i32,
    pub greeting_message: String,
}

impl fmt::Display for ServerConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServerConfiguration {{ port={}, greetingMessage='{}' }}",
            self.port, self.greeting_message
        )
    }
}

// ============================================================================
// Tic-tac-toe graph
// ============================================================================

pub const BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    X,
    O,
}

impl Sign {
    fn symbol(self) -> char {
        match self {
            Sign::X => 'X',
            Sign::O => 'O',
        }
    }
}

#[derive(Debug)]
pub struct Board {
    cells: [[Option<Sign>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    fn free_cells(&self) -> Vec<(usize, usize)> {
        let mut free = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_none() {
                    free.push((row, col));
                }
            }
        }
        free
    }

    fn place(&mut self, (row, col): (usize, usize), sign: Sign) {
        self.cells[row][col] = Some(sign);
    }

    fn winner(&self) -> Option<Sign> {
        let c = &self.cells;
        let mut lines: Vec<[Option<Sign>; BOARD_SIZE]> = Vec::with_capacity(2 * BOARD_SIZE + 2);
        lines.extend(c.iter().copied());
        lines.extend((0..BOARD_SIZE).map(|col| c.map(|row| row[col])));
        lines.push([c[0][0], c[1][1], c[2][2]]);
        lines.push([c[0][2], c[1][1], c[2][0]]);

        lines.into_iter().find_map(|line| match line {
            [Some(a), Some(b), Some(c)] if a == b && b == c => Some(a),
            _ => None,
        })
    }
}

#[derive(Debug, Default)]
pub struct BoardPrinter;

impl BoardPrinter {
    fn print(&self, board: &Board) {
        for row in &board.cells {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or('.', Sign::symbol).to_string())
                .collect();
            println!(" {}", line.join(" | "));
        }
        println!();
    }
}

/// Scripted move source standing in for a keyboard.
#[derive(Debug, Default)]
pub struct InputProvider;

impl InputProvider {
    fn choose(&self, board: &Board) -> Option<(usize, usize)> {
        board.free_cells().into_iter().next()
    }
}

#[derive(Debug)]
pub struct HumanPlayer {
    input: InputProvider,
}

impl HumanPlayer {
    fn next_move(&self, board: &Board) -> Option<(usize, usize)> {
        self.input.choose(board)
    }
}

#[derive(Debug, Default)]
pub struct ComputerPlayer;

impl ComputerPlayer {
    fn next_move(&self, board: &Board) -> Option<(usize, usize)> {
        let free = board.free_cells();
        // Prefer the centre, then the last free cell.
        free.iter()
            .copied()
            .find(|&cell| cell == (1, 1))
            .or_else(|| free.last().copied())
    }
}

#[derive(Debug)]
pub struct TicTacToeGame {
    board: Board,
    printer: BoardPrinter,
    human: HumanPlayer,
    computer: ComputerPlayer,
}

impl TicTacToeGame {
    /// Play one scripted match to the end and return the winner.
    pub fn start(&mut self) -> Option<Sign> {
        println!("Starting tic-tac-toe");
        let mut turn = Sign::X;
        loop {
            let choice = match turn {
                Sign::X => self.human.next_move(&self.board),
                Sign::O => self.computer.next_move(&self.board),
            };
            let cell = match choice {
                Some(cell) => cell,
                None => {
                    println!("Draw");
                    return None;
                }
            };

            self.board.place(cell, turn);
            println!("{} plays ({}, {})", turn.symbol(), cell.0, cell.1);
            self.printer.print(&self.board);

            if let Some(winner) = self.board.winner() {
                println!("{} wins", winner.symbol());
                return Some(winner);
            }
            turn = match turn {
                Sign::X => Sign::O,
                Sign::O => Sign::X,
            };
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

static REGISTRY: OnceLock<Result<HashMapTypeRegistry, RegistryError>> = OnceLock::new();

/// Registry holding every sample type, built on first use.
pub fn registry() -> Result<&'static HashMapTypeRegistry, RegistryError> {
    REGISTRY
        .get_or_init(build_registry)
        .as_ref()
        .map_err(Clone::clone)
}

fn build_registry() -> Result<HashMapTypeRegistry, RegistryError> {
    let mut registry = HashMapTypeRegistry::new();

    registry.register(
        TypeDescriptorBuilder::<GameConfig>::new()
            .constructor(GameConfig::default)
            .field("releaseYear", DeclaredKind::I32, |c: &mut GameConfig, v: i32| {
                c.release_year = v
            })
            .getter(|c: &GameConfig| c.release_year)
            .field(
                "gameName",
                DeclaredKind::String,
                |c: &mut GameConfig, v: String| c.game_name = v,
            )
            .getter(|c: &GameConfig| c.game_name.clone())
            .field("price", DeclaredKind::F64, |c: &mut GameConfig, v: f64| {
                c.price = v
            })
            .getter(|c: &GameConfig| c.price)
            .array_field(
                "characterNames",
                DeclaredKind::String,
                |c: &mut GameConfig, v: Vec<String>| c.character_names = v,
            )
            .getter(|c: &GameConfig| c.character_names.clone())
            .build()?,
    )?;

    registry.register(
        TypeDescriptorBuilder::<UserInterfaceConfig>::new()
            .constructor(UserInterfaceConfig::default)
            .field(
                "titleColor",
                DeclaredKind::String,
                |c: &mut UserInterfaceConfig, v: String| c.title_color = v,
            )
            .getter(|c: &UserInterfaceConfig| c.title_color.clone())
            .field(
                "footerText",
                DeclaredKind::String,
                |c: &mut UserInterfaceConfig, v: String| c.footer_text = v,
            )
            .getter(|c: &UserInterfaceConfig| c.footer_text.clone())
            .field(
                "titleFontSize",
                DeclaredKind::I16,
                |c: &mut UserInterfaceConfig, v: i16| c.title_font_size = v,
            )
            .getter(|c: &UserInterfaceConfig| c.title_font_size)
            .field(
                "footerFontSize",
                DeclaredKind::I16,
                |c: &mut UserInterfaceConfig, v: i16| c.footer_font_size = v,
            )
            .getter(|c: &UserInterfaceConfig| c.footer_font_size)
            .array_field(
                "titleFonts",
                DeclaredKind::String,
                |c: &mut UserInterfaceConfig, v: Vec<String>| c.title_fonts = v,
            )
            .getter(|c: &UserInterfaceConfig| c.title_fonts.clone())
            .array_field(
                "titleFontSizes",
                DeclaredKind::I16,
                |c: &mut UserInterfaceConfig, v: Vec<i16>| c.title_font_sizes = v,
            )
            .getter(|c: &UserInterfaceConfig| c.title_font_sizes.clone())
            .build()?,
    )?;

    registry.register(
        TypeDescriptorBuilder::<ServerConfiguration>::new()
            .constructor2(|port: i32, greeting_message: String| ServerConfiguration {
                port,
                greeting_message,
            })
            .constructor1(|port: i32| ServerConfiguration {
                port,
                greeting_message: "Welcome!".into(),
            })
            .field("port", DeclaredKind::I32, |c: &mut ServerConfiguration, v: i32| {
                c.port = v
            })
            .getter(|c: &ServerConfiguration| c.port)
            .field(
                "greetingMessage",
                DeclaredKind::String,
                |c: &mut ServerConfiguration, v: String| c.greeting_message = v,
            )
            .getter(|c: &ServerConfiguration| c.greeting_message.clone())
            .build()?,
    )?;

    registry.register(
        TypeDescriptorBuilder::<Board>::new()
            .constructor(Board::new)
            .build()?,
    )?;
    registry.register(
        TypeDescriptorBuilder::<BoardPrinter>::new()
            .constructor(BoardPrinter::default)
            .build()?,
    )?;
    registry.register(
        TypeDescriptorBuilder::<InputProvider>::new()
            .constructor(InputProvider::default)
            .build()?,
    )?;
    registry.register(
        TypeDescriptorBuilder::<HumanPlayer>::new()
            .constructor1(|input: InputProvider| HumanPlayer { input })
            .build()?,
    )?;
    registry.register(
        TypeDescriptorBuilder::<ComputerPlayer>::new()
            .constructor(ComputerPlayer::default)
            .build()?,
    )?;
    registry.register(
        TypeDescriptorBuilder::<TicTacToeGame>::new()
            .constructor4(
                |board: Board, printer: BoardPrinter, human: HumanPlayer, computer: ComputerPlayer| {
                    TicTacToeGame {
                        board,
                        printer,
                        human,
                        computer,
                    }
                },
            )
            .build()?,
    )?;

    Ok(registry)
}
