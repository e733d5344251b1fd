// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table driver task.
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::{ops::Range, time::Duration};
use tokio::{sync::mpsc, time};

use holdem_bot::{Personality, Strategy, think_time};
use holdem_core::{Action, ActionRequest, SeatId, TableEvent};

use crate::{Config, TableError};

mod player;
pub use player::Seat;

pub mod pots;

mod state;
pub use state::{State, Step};

/// A running table.
///
/// The table runs in a tokio task that sends [TableEvent]s and waits for the
/// human seat actions.
#[derive(Debug)]
pub struct Table {
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<TableCommand>,
    /// Channel for receiving table events.
    events_rx: mpsc::Receiver<TableEvent>,
}

/// Command for the table task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// An action from the human seat.
    Action(Action),
    /// Stop the table.
    Quit,
}

impl Table {
    /// Spawns a table task, must be called from a tokio runtime.
    ///
    /// The factory creates the strategy for each AI seat from the seat
    /// personality.
    pub fn spawn<F, S>(config: Config, mut factory: F) -> Result<Self, TableError>
    where
        F: FnMut(SeatId, Personality) -> S,
        S: Strategy,
    {
        let state = State::from_config(&config)?;

        let strategies = (0..config.seats)
            .map(|idx| {
                let seat = SeatId::new(idx);
                state
                    .seat_info(seat)
                    .and_then(|s| s.personality)
                    .map(|p| Box::new(factory(seat, p)) as Box<dyn Strategy>)
            })
            .collect::<Vec<_>>();

        let human = (0..config.seats)
            .map(SeatId::new)
            .find(|&seat| state.seat_info(seat).is_some_and(|s| s.is_human));

        // The think delays use their own generator so that a seeded table
        // deals the same cards whatever the delays.
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };

        let (commands_tx, commands_rx) = mpsc::channel(128);
        let (events_tx, events_rx) = mpsc::channel(128);

        let mut task = TableTask {
            state,
            strategies,
            human,
            think_delay: config.think_delay,
            hand_delay: config.hand_delay,
            rng,
            commands_rx,
            events_tx,
        };

        tokio::spawn(async move {
            match task.run().await {
                Ok(()) | Err(TableError::Closed) => {}
                Err(err) => {
                    error!("Table error {err}");
                    let _ = task.events_tx.send(TableEvent::Error(err.to_string())).await;
                }
            }

            info!("Table task stopped");
        });

        Ok(Self {
            commands_tx,
            events_rx,
        })
    }

    /// Receives the next table event, none when the table has stopped.
    pub async fn next_event(&mut self) -> Option<TableEvent> {
        self.events_rx.recv().await
    }

    /// Sends an action for the human seat.
    pub async fn act(&self, action: Action) -> Result<(), TableError> {
        self.commands_tx
            .send(TableCommand::Action(action))
            .await
            .map_err(|_| TableError::Closed)
    }

    /// Stops the table.
    pub async fn quit(&self) {
        let _ = self.commands_tx.send(TableCommand::Quit).await;
    }
}

struct TableTask {
    /// The table state machine.
    state: State,
    /// Strategies for the AI seats, none for the human seat.
    strategies: Vec<Option<Box<dyn Strategy>>>,
    /// The human seat if any.
    human: Option<SeatId>,
    /// Range for AI seats think time.
    think_delay: Range<Duration>,
    /// Pause between hands.
    hand_delay: Duration,
    /// Generator for think times.
    rng: StdRng,
    /// Channel for receiving table commands.
    commands_rx: mpsc::Receiver<TableCommand>,
    /// Channel for sending events.
    events_tx: mpsc::Sender<TableEvent>,
}

impl TableTask {
    async fn run(&mut self) -> Result<(), TableError> {
        loop {
            let mut step = self.state.start_hand()?;

            if !matches!(step, Step::GameOver { .. }) {
                self.send(TableEvent::StartHand {
                    hand: self.state.hand(),
                    dealer: self.state.dealer(),
                })
                .await?;
                self.send_update().await?;
            }

            loop {
                match step {
                    Step::AwaitingAction { seat, request } => {
                        let Some(next) = self.play_turn(seat, request).await? else {
                            return Ok(());
                        };
                        step = next;
                    }
                    Step::HandEnded(result) => {
                        self.send_update().await?;
                        self.send(TableEvent::EndHand {
                            board: result.board,
                            payoffs: result.payoffs,
                        })
                        .await?;
                        break;
                    }
                    Step::GameOver { winner } => {
                        self.send_update().await?;
                        let (name, chips) = self
                            .state
                            .seat_info(winner)
                            .map(|s| (s.name.clone(), s.chips))
                            .unwrap_or_default();
                        return self
                            .send(TableEvent::EndGame {
                                winner,
                                name,
                                chips,
                            })
                            .await;
                    }
                }
            }

            if !self.pause(self.hand_delay).await {
                return Ok(());
            }
        }
    }

    /// Gets an action for the acting seat and applies it.
    ///
    /// Returns none if the table must stop.
    async fn play_turn(
        &mut self,
        seat: SeatId,
        request: ActionRequest,
    ) -> Result<Option<Step>, TableError> {
        let idx = seat.index();
        let is_ai = self.strategies.get(idx).is_some_and(Option::is_some);

        let step = if is_ai {
            let delay = think_time(&mut self.rng, self.think_delay.clone());
            if !self.pause(delay).await {
                return Ok(None);
            }

            let view = self.state.snapshot(Some(seat));
            let action = match self.strategies[idx].as_mut() {
                Some(strategy) => strategy.execute(&request, &view),
                None => Action::Fold,
            };

            let (action, step) = match self.state.act(seat, action) {
                Ok(step) => (action, step),
                Err(err) if err.is_rejected_action() => {
                    warn!("Seat {seat} action {action} rejected: {err}");
                    let fallback = if request.can_check() {
                        Action::Check
                    } else {
                        Action::Fold
                    };
                    (fallback, self.state.act(seat, fallback)?)
                }
                Err(err) => return Err(err),
            };

            self.send_acted(seat, action).await?;
            step
        } else {
            loop {
                self.send(TableEvent::ActionRequest(request.clone())).await?;

                let action = match self.commands_rx.recv().await {
                    Some(TableCommand::Action(action)) => request.clamp(action),
                    Some(TableCommand::Quit) | None => return Ok(None),
                };

                match self.state.act(seat, action) {
                    Ok(step) => {
                        self.send_acted(seat, action).await?;
                        break step;
                    }
                    Err(err) if err.is_rejected_action() => {
                        debug!("Rejected action {action}: {err}");
                        self.send(TableEvent::Error(err.to_string())).await?;
                    }
                    Err(err) => return Err(err),
                }
            }
        };

        if let Step::AwaitingAction { .. } = step {
            self.send_update().await?;
        }

        Ok(Some(step))
    }

    /// Waits for the given time, returns false if the table must stop.
    async fn pause(&mut self, delay: Duration) -> bool {
        let sleep = time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                res = self.commands_rx.recv() => match res {
                    Some(TableCommand::Action(action)) => {
                        debug!("Ignoring action {action} while no action is requested");
                    }
                    Some(TableCommand::Quit) | None => return false,
                },
            }
        }
    }

    async fn send_acted(&self, seat: SeatId, action: Action) -> Result<(), TableError> {
        let name = self
            .state
            .seat_info(seat)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        self.send(TableEvent::Acted { seat, name, action }).await
    }

    async fn send_update(&self) -> Result<(), TableError> {
        self.send(TableEvent::GameUpdate(self.state.snapshot(self.human)))
            .await
    }

    async fn send(&self, event: TableEvent) -> Result<(), TableError> {
        self.events_tx
            .send(event)
            .await
            .map_err(|_| TableError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_bot::PassiveBot;
    use holdem_core::{Chips, TableSnapshot};

    struct Shove;

    impl Strategy for Shove {
        fn execute(&mut self, req: &ActionRequest, _view: &TableSnapshot) -> Action {
            if req.can_all_in() {
                Action::AllIn
            } else {
                Action::Check
            }
        }
    }

    fn config(seats: usize, human: bool) -> Config {
        Config {
            seats,
            human,
            chips: Chips::new(100),
            seed: Some(42),
            think_delay: Duration::ZERO..Duration::ZERO,
            hand_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn ai_table_plays_to_the_end() {
        let mut table = Table::spawn(config(3, false), |_, _| Shove).unwrap();

        let mut hands = 0;
        let mut end_hands = 0;
        loop {
            match table.next_event().await {
                Some(TableEvent::StartHand { hand, .. }) => {
                    hands += 1;
                    assert_eq!(hand, hands);
                }
                Some(TableEvent::EndHand { payoffs, .. }) => {
                    end_hands += 1;
                    assert!(!payoffs.is_empty());
                }
                Some(TableEvent::ActionRequest(_)) => panic!("No human seat"),
                Some(TableEvent::Error(err)) => panic!("Unexpected error {err}"),
                Some(TableEvent::EndGame { chips, name, .. }) => {
                    assert_eq!(chips, Chips::new(300));
                    assert!(name.starts_with("Player"));
                    break;
                }
                Some(_) => {}
                None => panic!("Table closed before the end of the game"),
            }
        }

        assert!(hands > 0);
        assert_eq!(hands, end_hands);

        // The task stops after the game ends.
        assert!(table.next_event().await.is_none());
    }

    #[tokio::test]
    async fn human_action_is_validated() {
        let mut table = Table::spawn(config(2, true), |_, _| Shove).unwrap();

        // Heads up the human seat is the small blind and acts first.
        let request = loop {
            match table.next_event().await {
                Some(TableEvent::ActionRequest(req)) => break req,
                Some(TableEvent::StartHand { hand, dealer }) => {
                    assert_eq!(hand, 1);
                    assert_eq!(dealer, SeatId::new(1));
                }
                Some(TableEvent::GameUpdate(snapshot)) => {
                    assert_eq!(snapshot.viewer, Some(SeatId::new(0)));
                    assert!(snapshot.seats[0].hole_cards().is_some());
                    assert!(snapshot.seats[1].hole_cards().is_none());
                }
                event => panic!("Unexpected event {event:?}"),
            }
        };
        assert_eq!(request.seat, SeatId::new(0));
        assert_eq!(request.to_call, Chips::new(10));

        // Cannot check with chips to call, the request is sent again.
        table.act(Action::Check).await.unwrap();
        assert!(matches!(table.next_event().await, Some(TableEvent::Error(_))));
        assert!(matches!(
            table.next_event().await,
            Some(TableEvent::ActionRequest(_))
        ));

        table.act(Action::Fold).await.unwrap();
        match table.next_event().await {
            Some(TableEvent::Acted { seat, name, action }) => {
                assert_eq!(seat, SeatId::new(0));
                assert_eq!(name, "You");
                assert_eq!(action, Action::Fold);
            }
            event => panic!("Unexpected event {event:?}"),
        }

        let payoffs = loop {
            match table.next_event().await {
                Some(TableEvent::EndHand { payoffs, .. }) => break payoffs,
                Some(TableEvent::GameUpdate(_)) => {}
                event => panic!("Unexpected event {event:?}"),
            }
        };
        assert_eq!(payoffs.len(), 1);
        assert_eq!(payoffs[0].seat, SeatId::new(1));
        assert_eq!(payoffs[0].chips, Chips::new(30));

        table.quit().await;
        while table.next_event().await.is_some() {}
    }

    #[tokio::test]
    async fn free_call_is_applied_as_check() {
        let mut table = Table::spawn(config(3, true), |_, _| PassiveBot).unwrap();

        // Both AI seats limp and the human big blind has the option.
        let request = loop {
            match table.next_event().await {
                Some(TableEvent::ActionRequest(req)) => break req,
                Some(TableEvent::Error(err)) => panic!("Unexpected error {err}"),
                Some(_) => {}
                None => panic!("Table closed"),
            }
        };
        assert!(request.can_check());

        table.act(Action::Call).await.unwrap();
        match table.next_event().await {
            Some(TableEvent::Acted { seat, action, .. }) => {
                assert_eq!(seat, SeatId::new(0));
                assert_eq!(action, Action::Check);
            }
            event => panic!("Unexpected event {event:?}"),
        }

        table.quit().await;
        while table.next_event().await.is_some() {}
    }
}
