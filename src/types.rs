/// The two kinds of virtual payment card the listing serves.
///
/// A card's kind is a pure function of its identifier: even ids are burner
/// cards, odd ids are subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardType {
    Burner,
    Subscription,
}

impl CardType {
    pub fn from_id(id: u32) -> Self {
        if id % 2 == 0 {
            Self::Burner
        } else {
            Self::Subscription
        }
    }

    /// Lowercase wire/filter value (`"burner"` / `"subscription"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Burner => "burner",
            Self::Subscription => "subscription",
        }
    }

    /// Human-facing label for the card badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Burner => "Burner",
            Self::Subscription => "Subscription",
        }
    }
}

/// The listing's tab selector.
///
/// All three tabs currently map to the same generation scenario; selecting
/// one (even the already-active one) resets the session and refetches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tab {
    #[default]
    Your,
    All,
    Blocked,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Your => "Your Cards",
            Self::All => "All Cards",
            Self::Blocked => "Blocked Cards",
        }
    }
}

/// Fetch state of the pagination controller.
///
/// `Exhausted` is terminal until the next reset (tab or filter change).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Exhausted,
}

/// A synthetic card record.
///
/// `expiry` is only meaningful for burner cards and `limit` only for
/// subscriptions, but both are populated for every record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub card_type: CardType,
    /// Date string one year ahead of generation time, `M/D/YYYY`.
    pub expiry: String,
    pub limit: u32,
    pub owner_id: u32,
}

impl Card {
    pub fn is_burner(&self) -> bool {
        self.card_type == CardType::Burner
    }

    /// The secondary line a card row renders: expiry for burner cards,
    /// spending limit for subscriptions.
    pub fn detail(&self) -> String {
        match self.card_type {
            CardType::Burner => format!("Expires on: {}", self.expiry),
            CardType::Subscription => format!("Limit: {}", self.limit),
        }
    }
}
