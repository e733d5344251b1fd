// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards and deck definitions.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Poker card.
///
/// Cards are immutable values, a card displays and parses as a two characters
/// string with the rank followed by the suit:
///
/// ```
/// # use holdem_cards::{Card, Rank, Suit};
/// let card = "TD".parse::<Card>().unwrap();
/// assert_eq!(card, Card::new(Rank::Ten, Suit::Diamonds));
/// assert_eq!(card.to_string(), "TD");
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// The card numeric value from 0 (deuce) to 12 (ace).
    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

/// Error returned when parsing cards, ranks or suits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid card '{0}'")]
pub struct ParseCardError(String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());

        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => {
                let rank = Rank::from_char(r).ok_or_else(err)?;
                let suit = Suit::from_char(c).ok_or_else(err)?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(err()),
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank numeric value from 0 (deuce) to 12 (ace).
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the rank for a value in 0..=12.
    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ranks().nth(value as usize)
    }

    fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The suit symbol used by terminal views.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'C' | '♣' => Some(Suit::Clubs),
            'D' | '♦' => Some(Suit::Diamonds),
            'H' | '♥' => Some(Suit::Hearts),
            'S' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// A cards Deck.
///
/// Cards are dealt from the top of the deck that is the end of the cards
/// vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the deck in place using Fisher-Yates.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Deals a card from the top of the deck.
    ///
    /// Panics if the deck is empty, a hand never uses more than 23 cards so
    /// running out of cards is a broken invariant.
    pub fn deal(&mut self) -> Card {
        match self.cards.pop() {
            Some(card) => card,
            None => panic!("Deck exhausted"),
        }
    }

    /// Deals `n` cards from the top of the deck.
    ///
    /// Panics if the deck has fewer than `n` cards.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        assert!(
            n <= self.cards.len(),
            "Deck exhausted: requested {n} cards with {} left",
            self.cards.len()
        );

        (0..n).map(|_| self.deal()).collect()
    }

    /// Discards the top card.
    pub fn burn(&mut self) {
        let _ = self.deal();
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl From<Vec<Card>> for Deck {
    /// Creates a deck that deals the given cards from the last one.
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn deal_full_deck_is_unique() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new_and_shuffled(&mut rng);
        assert_eq!(deck.count(), Deck::SIZE);

        let mut cards = HashSet::default();
        while !deck.is_empty() {
            cards.insert(deck.deal());
        }

        // Each rank and suit pair appears exactly once.
        assert_eq!(cards.len(), Deck::SIZE);
        for s in Suit::suits() {
            for r in Rank::ranks() {
                assert!(cards.contains(&Card::new(r, s)));
            }
        }
    }

    #[test]
    fn shuffle_is_seeded() {
        let d1 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(42));
        let d2 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(42));
        let d3 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(43));

        let c1 = d1.into_iter().collect::<Vec<_>>();
        let c2 = d2.into_iter().collect::<Vec<_>>();
        let c3 = d3.into_iter().collect::<Vec<_>>();
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
    }

    #[test]
    fn deal_pops_from_top() {
        let mut deck = Deck::default();
        // The default deck ends with the spades.
        assert_eq!(deck.deal(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(
            deck.deal_n(2),
            vec![
                Card::new(Rank::King, Suit::Spades),
                Card::new(Rank::Queen, Suit::Spades)
            ]
        );
        deck.burn();
        assert_eq!(deck.deal(), Card::new(Rank::Ten, Suit::Spades));
        assert_eq!(deck.count(), Deck::SIZE - 5);
    }

    #[test]
    #[should_panic(expected = "Deck exhausted")]
    fn deal_from_empty_deck_panics() {
        let mut deck = Deck::default();
        deck.deal_n(Deck::SIZE);
        deck.deal();
    }

    #[test]
    fn deck_remove() {
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Diamonds));
        deck.remove(Card::new(Rank::King, Suit::Diamonds));
        assert_eq!(deck.count(), 50);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");
    }

    #[test]
    fn card_from_str() {
        assert_eq!("AH".parse(), Ok(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!("2c".parse(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));
        assert_eq!("J♠".parse(), Ok(Card::new(Rank::Jack, Suit::Spades)));
        assert!("1H".parse::<Card>().is_err());
        assert!("AHX".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());

        let err = "ZZ".parse::<Card>().unwrap_err();
        assert_eq!(err.to_string(), "invalid card 'ZZ'");
    }

    #[test]
    fn rank_values() {
        assert_eq!(Rank::Deuce.value(), 0);
        assert_eq!(Rank::Ace.value(), 12);
        assert_eq!(Rank::from_value(3), Some(Rank::Five));
        assert_eq!(Rank::from_value(13), None);
    }
}
