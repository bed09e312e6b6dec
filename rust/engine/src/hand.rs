use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{all_suits, Card, Rank, Suit};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High card",
            Category::OnePair => "One pair",
            Category::TwoPair => "Two pair",
            Category::ThreeOfAKind => "Three of a kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full house",
            Category::FourOfAKind => "Four of a kind",
            Category::StraightFlush => "Straight flush",
            Category::RoyalFlush => "Royal flush",
        }
    }
}

/// The best five-card hand found in a set of cards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    /// The five cards making the hand, most significant first.
    pub cards: [Card; 5],
    // kickers: ordered high -> low for tiebreaks; the wheel's ace counts as 1
    pub kickers: [u8; 5],
}

impl HandStrength {
    fn new(category: Category, cards: [Card; 5]) -> Self {
        let mut kickers = [0u8; 5];
        for (k, c) in kickers.iter_mut().zip(cards.iter()) {
            *k = c.rank.value();
        }
        HandStrength {
            category,
            cards,
            kickers,
        }
    }

    fn wheel(category: Category, cards: [Card; 5]) -> Self {
        let mut hs = HandStrength::new(category, cards);
        hs.kickers[4] = 1;
        hs
    }

    /// Human-readable summary such as `"Full house, Kings over Twos"`.
    pub fn describe(&self) -> String {
        let top = self.cards[0].rank;
        match self.category {
            Category::RoyalFlush => format!("Royal flush in {}", suit_name(self.cards[0].suit)),
            Category::StraightFlush => format!("Straight flush, {} high", rank_name(top)),
            Category::FourOfAKind => format!("Four of a kind, {}", rank_plural(top)),
            Category::FullHouse => format!(
                "Full house, {} over {}",
                rank_plural(top),
                rank_plural(self.cards[3].rank)
            ),
            Category::Flush => format!("Flush, {} high", rank_name(top)),
            Category::Straight => format!("Straight, {} high", rank_name(top)),
            Category::ThreeOfAKind => format!("Three of a kind, {}", rank_plural(top)),
            Category::TwoPair => format!(
                "Two pair, {} and {}",
                rank_plural(top),
                rank_plural(self.cards[2].rank)
            ),
            Category::OnePair => format!("Pair of {}", rank_plural(top)),
            Category::HighCard => format!("High card {}", rank_name(top)),
        }
    }
}

/// Evaluates the best five-card hand among `cards`.
///
/// Duplicate cards are collapsed first; fewer than five distinct cards is an
/// [`GameError::InvalidHand`]. Categories are checked from strongest to
/// weakest and the first match is returned, so a seven-card set holding both a
/// straight and a flush reports the flush.
///
/// # Examples
///
/// ```
/// use suited_engine::cards::parse_cards;
/// use suited_engine::hand::{evaluate_hand, Category};
///
/// let cards = parse_cards("As Ks Qs Js Ts 2d 3c").unwrap();
/// let strength = evaluate_hand(&cards).unwrap();
/// assert_eq!(strength.category, Category::RoyalFlush);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandStrength, GameError> {
    let mut sorted = cards.to_vec();
    sorted.sort_unstable_by(by_rank_desc);
    sorted.dedup();
    if sorted.len() < 5 {
        return Err(GameError::InvalidHand {
            distinct: sorted.len(),
        });
    }
    let groups = rank_groups(&sorted);

    if let Some(hs) = straight_flush(&sorted) {
        return Ok(hs);
    }
    if let Some(hs) = four_of_a_kind(&sorted, &groups) {
        return Ok(hs);
    }
    if let Some(hs) = full_house(&groups) {
        return Ok(hs);
    }
    if let Some(hs) = flush(&sorted) {
        return Ok(hs);
    }
    if let Some(hs) = straight(&sorted, Category::Straight) {
        return Ok(hs);
    }
    if let Some(hs) = three_of_a_kind(&sorted, &groups) {
        return Ok(hs);
    }
    if let Some(hs) = two_pair(&sorted, &groups) {
        return Ok(hs);
    }
    if let Some(hs) = one_pair(&sorted, &groups) {
        return Ok(hs);
    }
    Ok(HandStrength::new(Category::HighCard, take_five(&sorted)))
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn by_rank_desc(a: &Card, b: &Card) -> Ordering {
    b.rank.cmp(&a.rank).then(a.suit.cmp(&b.suit))
}

// Cards of equal rank, highest rank first. Input is sorted by rank descending.
fn rank_groups(sorted: &[Card]) -> Vec<Vec<Card>> {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for &c in sorted {
        match groups.last_mut() {
            Some(g) if g[0].rank == c.rank => g.push(c),
            _ => groups.push(vec![c]),
        }
    }
    groups
}

fn take_five(cards: &[Card]) -> [Card; 5] {
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn kickers_excluding(sorted: &[Card], used: &[Card], n: usize) -> Vec<Card> {
    sorted
        .iter()
        .filter(|c| !used.contains(c))
        .take(n)
        .copied()
        .collect()
}

fn assemble(category: Category, parts: Vec<Card>) -> Option<HandStrength> {
    if parts.len() < 5 {
        return None;
    }
    Some(HandStrength::new(category, take_five(&parts)))
}

/// Finds the highest five-rank run; `sorted` is by rank descending.
fn straight(sorted: &[Card], category: Category) -> Option<HandStrength> {
    let mut distinct: Vec<Card> = Vec::with_capacity(sorted.len());
    for &c in sorted {
        if distinct.last().is_none_or(|last: &Card| last.rank != c.rank) {
            distinct.push(c);
        }
    }
    for window in distinct.windows(5) {
        let consecutive = window
            .windows(2)
            .all(|pair| pair[0].rank.value() == pair[1].rank.value() + 1);
        if consecutive {
            return Some(HandStrength::new(category, take_five(window)));
        }
    }
    // A-5-4-3-2: the one place the ace ranks below the two
    let find = |r: Rank| distinct.iter().find(|c| c.rank == r).copied();
    let wheel = [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    let cards: Option<Vec<Card>> = wheel.iter().map(|&r| find(r)).collect();
    cards.map(|cards| HandStrength::wheel(category, take_five(&cards)))
}

fn suited(sorted: &[Card], suit: Suit) -> Vec<Card> {
    sorted.iter().filter(|c| c.suit == suit).copied().collect()
}

fn straight_flush(sorted: &[Card]) -> Option<HandStrength> {
    all_suits()
        .into_iter()
        .map(|s| suited(sorted, s))
        .filter(|cards| cards.len() >= 5)
        .filter_map(|cards| straight(&cards, Category::StraightFlush))
        .max_by(compare_hands)
        .map(|hs| {
            if hs.kickers[0] == Rank::Ace.value() {
                HandStrength {
                    category: Category::RoyalFlush,
                    ..hs
                }
            } else {
                hs
            }
        })
}

fn four_of_a_kind(sorted: &[Card], groups: &[Vec<Card>]) -> Option<HandStrength> {
    let quad = groups.iter().find(|g| g.len() == 4)?;
    let mut parts = quad.clone();
    parts.extend(kickers_excluding(sorted, quad, 1));
    assemble(Category::FourOfAKind, parts)
}

fn full_house(groups: &[Vec<Card>]) -> Option<HandStrength> {
    let trips = groups.iter().find(|g| g.len() >= 3)?;
    let pair = groups
        .iter()
        .find(|g| g.len() >= 2 && g[0].rank != trips[0].rank)?;
    let mut parts: Vec<Card> = trips[..3].to_vec();
    parts.extend_from_slice(&pair[..2]);
    assemble(Category::FullHouse, parts)
}

fn flush(sorted: &[Card]) -> Option<HandStrength> {
    all_suits()
        .into_iter()
        .map(|s| suited(sorted, s))
        .filter(|cards| cards.len() >= 5)
        .map(|cards| HandStrength::new(Category::Flush, take_five(&cards)))
        .max_by(compare_hands)
}

fn three_of_a_kind(sorted: &[Card], groups: &[Vec<Card>]) -> Option<HandStrength> {
    let trips = groups.iter().find(|g| g.len() == 3)?;
    let mut parts = trips.clone();
    parts.extend(kickers_excluding(sorted, trips, 2));
    assemble(Category::ThreeOfAKind, parts)
}

fn two_pair(sorted: &[Card], groups: &[Vec<Card>]) -> Option<HandStrength> {
    let mut pairs = groups.iter().filter(|g| g.len() >= 2);
    let high = pairs.next()?;
    let low = pairs.next()?;
    let mut parts: Vec<Card> = high[..2].to_vec();
    parts.extend_from_slice(&low[..2]);
    let used = parts.clone();
    parts.extend(kickers_excluding(sorted, &used, 1));
    assemble(Category::TwoPair, parts)
}

fn one_pair(sorted: &[Card], groups: &[Vec<Card>]) -> Option<HandStrength> {
    let pair = groups.iter().find(|g| g.len() == 2)?;
    let mut parts = pair.clone();
    parts.extend(kickers_excluding(sorted, pair, 3));
    assemble(Category::OnePair, parts)
}

fn rank_name(r: Rank) -> &'static str {
    match r {
        Rank::Two => "Two",
        Rank::Three => "Three",
        Rank::Four => "Four",
        Rank::Five => "Five",
        Rank::Six => "Six",
        Rank::Seven => "Seven",
        Rank::Eight => "Eight",
        Rank::Nine => "Nine",
        Rank::Ten => "Ten",
        Rank::Jack => "Jack",
        Rank::Queen => "Queen",
        Rank::King => "King",
        Rank::Ace => "Ace",
    }
}

fn rank_plural(r: Rank) -> String {
    match r {
        Rank::Six => "Sixes".to_string(),
        other => format!("{}s", rank_name(other)),
    }
}

fn suit_name(s: Suit) -> &'static str {
    match s {
        Suit::Hearts => "Hearts",
        Suit::Diamonds => "Diamonds",
        Suit::Clubs => "Clubs",
        Suit::Spades => "Spades",
    }
}
