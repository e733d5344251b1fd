// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Context, Result, bail};
use crossterm::{
    queue,
    style::{self, StyledContent, Stylize},
};
use std::{fmt, io};
use tokio::io::{AsyncBufReadExt, BufReader};

use holdem_core::{Action, ActionRequest, Chips, SeatCards, SeatId, TableEvent, TableSnapshot};
use holdem_table::Table;

/// How events are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Human readable text.
    Text,
    /// One JSON object per line.
    Json,
}

/// A command typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Send an action to the table.
    Action(Action),
    /// Leave the game.
    Quit,
}

/// Parses a user command.
pub fn parse_intent(line: &str) -> Result<Intent> {
    let mut words = line.split_whitespace();
    let command = words.next().map(str::to_ascii_lowercase);

    let intent = match command.as_deref() {
        Some("f" | "fold") => Intent::Action(Action::Fold),
        Some("k" | "check") => Intent::Action(Action::Check),
        Some("c" | "call") => Intent::Action(Action::Call),
        Some("a" | "allin" | "all-in") => Intent::Action(Action::AllIn),
        Some("q" | "quit") => Intent::Quit,
        Some("r" | "raise") => {
            let Some(amount) = words.next() else {
                bail!("Missing raise amount");
            };

            let amount = amount
                .replace(',', "")
                .parse::<u32>()
                .with_context(|| format!("Invalid raise amount {amount}"))?;
            Intent::Action(Action::Raise(Chips::new(amount)))
        }
        Some(command) => bail!("Unknown command {command}"),
        None => bail!("Empty command"),
    };

    if words.next().is_some() {
        bail!("Too many arguments");
    }

    Ok(intent)
}

/// Runs the terminal loop until the game ends or the user quits.
pub async fn run(mut table: Table, output: Output) -> Result<()> {
    let mut stdout = io::stdout();
    let mut screen = Screen::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut pending: Option<ActionRequest> = None;

    loop {
        tokio::select! {
            // We have received an event from the table.
            event = table.next_event() => {
                let Some(event) = event else {
                    break;
                };

                match output {
                    Output::Json => print_json(&mut stdout, &event)?,
                    Output::Text => screen.handle_event(&mut stdout, &event)?,
                }

                match event {
                    TableEvent::ActionRequest(req) => {
                        if !stdin_open {
                            table.quit().await;
                            break;
                        }

                        pending = Some(req);
                    }
                    TableEvent::EndGame { .. } => break,
                    _ => {}
                }
            }
            // We have received a line from the user.
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match parse_intent(&line) {
                    Ok(Intent::Quit) => {
                        table.quit().await;
                        break;
                    }
                    Ok(Intent::Action(action)) => {
                        if pending.take().is_some() {
                            table.act(action).await?;
                        } else {
                            print_error(&mut stdout, "Wait for your turn")?;
                        }
                    }
                    Err(err) => print_error(&mut stdout, err)?,
                },
                None => {
                    // Nobody can answer a pending request.
                    stdin_open = false;
                    if pending.is_some() {
                        table.quit().await;
                        break;
                    }
                }
            },
        }
    }

    Ok(())
}

/// Keeps the last table update for rendering.
#[derive(Debug, Default)]
struct Screen {
    snapshot: Option<TableSnapshot>,
}

impl Screen {
    fn handle_event(&mut self, w: &mut impl io::Write, event: &TableEvent) -> Result<()> {
        match event {
            TableEvent::StartHand { hand, dealer } => {
                let text = format!("=== Hand {hand}, dealer {} ===", self.seat_name(*dealer));
                print_line(w, text.bold())?;
            }
            TableEvent::GameUpdate(snapshot) => {
                self.snapshot = Some(snapshot.clone());
            }
            TableEvent::Acted { name, action, .. } => {
                print_line(w, format!("{name} {action}").stylize())?;
            }
            TableEvent::ActionRequest(req) => {
                if let Some(snapshot) = &self.snapshot {
                    print_table(w, snapshot)?;
                }

                print_line(w, request_prompt(req).yellow())?;
            }
            TableEvent::EndHand { board, payoffs } => {
                let board = board.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                print_line(w, format!("Board: {}", board.join(" ")).bold())?;

                for payoff in payoffs {
                    let text = match payoff.rank {
                        Some(rank) => {
                            let cards = payoff.cards.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                            format!(
                                "{} wins {} with {rank} {}",
                                payoff.name,
                                payoff.chips,
                                cards.join(" ")
                            )
                        }
                        None => format!("{} wins {}", payoff.name, payoff.chips),
                    };
                    print_line(w, text.green())?;
                }
            }
            TableEvent::EndGame { name, chips, .. } => {
                let text = format!("{name} wins the game with {chips} chips");
                print_line(w, text.bold().green())?;
            }
            TableEvent::Error(msg) => print_error(w, msg)?,
        }

        w.flush()?;
        Ok(())
    }

    fn seat_name(&self, seat: SeatId) -> String {
        self.snapshot
            .as_ref()
            .and_then(|s| s.seat(seat))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("Seat {seat}"))
    }
}

fn print_table(w: &mut impl io::Write, snapshot: &TableSnapshot) -> Result<()> {
    let board = if snapshot.board.is_empty() {
        "-".to_string()
    } else {
        let cards = snapshot.board.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        cards.join(" ")
    };

    let text = format!(
        "{} | Board: {board} | Pot: {} | Bet: {}",
        snapshot.round, snapshot.pot, snapshot.current_bet
    );
    print_line(w, text.bold())?;

    for seat in &snapshot.seats {
        let active = if snapshot.active == Some(seat.seat) { ">" } else { " " };
        let button = if seat.has_button { "D" } else { " " };
        let bet = if seat.bet.is_zero() {
            String::new()
        } else {
            seat.bet.to_string()
        };

        let cards = match seat.cards {
            SeatCards::None => String::new(),
            SeatCards::Covered => "▒▒ ▒▒".to_string(),
            SeatCards::Cards(c1, c2) => format!("{c1} {c2}"),
        };

        let text = format!(
            "{active}{button} {:<10.10}|{:>10}|{:<7}|{:>8}| {cards}",
            seat.name,
            seat.chips.to_string(),
            seat.action.label(),
            bet
        );

        let text = if !seat.in_hand() {
            text.dark_grey()
        } else if snapshot.viewer == Some(seat.seat) {
            text.green()
        } else {
            text.dark_green()
        };
        print_line(w, text)?;
    }

    Ok(())
}

fn request_prompt(req: &ActionRequest) -> String {
    let mut options = vec!["f fold".to_string()];

    if req.can_check() {
        options.push("k check".to_string());
    }

    if req.can_call() {
        options.push(format!("c call {}", req.to_call));
    }

    if req.can_raise() {
        options.push(format!(
            "r <total> raise {}..{}",
            req.min_raise.min(req.max_bet),
            req.max_bet
        ));
    }

    if req.can_all_in() {
        options.push("a all-in".to_string());
    }

    options.push("q quit".to_string());
    format!("Your turn: {}", options.join(", "))
}

fn print_json(w: &mut impl io::Write, event: &TableEvent) -> Result<()> {
    let line = serde_json::to_string(event)?;
    writeln!(w, "{line}")?;
    w.flush()?;
    Ok(())
}

fn print_error(w: &mut impl io::Write, msg: impl fmt::Display) -> Result<()> {
    print_line(w, msg.to_string().red())?;
    w.flush()?;
    Ok(())
}

fn print_line<D: fmt::Display>(w: &mut impl io::Write, content: StyledContent<D>) -> Result<()> {
    queue!(w, style::PrintStyledContent(content), style::Print("\n"))?;
    Ok(())
}
