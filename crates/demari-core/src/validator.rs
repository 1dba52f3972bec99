// Bet number input validation.
//
// Each of the five number slots is edited keystroke by keystroke. Raw text is
// normalized into a value in [0, 50] (0 meaning "unset"), values that cannot
// become a legal number are rejected before they are committed, and a
// duplicate flag tracks repeated numbers. The whole form is held in a
// `BetDraft` that is replaced with a new value on every edit.

use rand::Rng;

use crate::bet::{NewBet, MAX_NUMBER, MIN_NUMBER, NUMBERS_PER_BET};
use crate::tax_id;

/// Number of editable number slots in the bet form.
pub const SLOT_COUNT: usize = NUMBERS_PER_BET;

/// Longest slot text accepted; every legal number has at most two digits.
const MAX_SLOT_DIGITS: usize = 2;

// ---------------------------------------------------------------------------
// Slot normalization
// ---------------------------------------------------------------------------

/// Result of normalizing one keystroke's worth of slot text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotInput {
    /// The slot takes this (non-zero) value.
    Committed(u8),
    /// The slot becomes unset (0).
    Cleared,
    /// The text can only grow into a number above 50; keep the old value.
    Rejected,
}

/// Normalize raw slot text.
///
/// Non-digits are stripped and the text is truncated to two digits. A
/// two-digit text whose first digit is 5 or more overflows the range unless
/// it is exactly `"50"`, so it is rejected as soon as the second digit is
/// typed (51-59, 60-99).
pub fn normalize_slot_input(raw: &str) -> SlotInput {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_SLOT_DIGITS)
        .collect();

    let Some(first) = digits.chars().next() else {
        return SlotInput::Cleared;
    };

    let first_digit = first.to_digit(10).unwrap_or(0);
    if first_digit >= 5 && digits.len() > 1 && digits != "50" {
        return SlotInput::Rejected;
    }

    match digits.parse::<u8>().unwrap_or(0) {
        0 => SlotInput::Cleared,
        value => SlotInput::Committed(value),
    }
}

// ---------------------------------------------------------------------------
// Duplicate detection
// ---------------------------------------------------------------------------

/// How the duplicate flag is recomputed after a slot edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateCheck {
    /// Check only the value just committed against the other slots as they
    /// were before the edit. Earlier duplicates elsewhere in the set are not
    /// re-examined, so the flag can lag one edit behind the slots.
    #[default]
    LastEdit,
    /// Re-examine the whole set after every edit.
    Strict,
}

/// True if any non-zero value appears in more than one slot.
fn has_duplicates(numbers: &[u8]) -> bool {
    numbers
        .iter()
        .enumerate()
        .filter(|(_, n)| **n != 0)
        .any(|(i, n)| numbers[i + 1..].contains(n))
}

// ---------------------------------------------------------------------------
// Surprise numbers
// ---------------------------------------------------------------------------

/// Draw five distinct numbers uniformly from [1, 50] by rejection sampling.
pub fn surprise_numbers<R: Rng + ?Sized>(rng: &mut R) -> [u8; SLOT_COUNT] {
    let mut picked = [0u8; SLOT_COUNT];
    let mut accepted = 0;
    while accepted < SLOT_COUNT {
        let candidate = rng.gen_range(MIN_NUMBER..=MAX_NUMBER);
        if !picked[..accepted].contains(&candidate) {
            picked[accepted] = candidate;
            accepted += 1;
        }
    }
    picked
}

// ---------------------------------------------------------------------------
// BetDraft
// ---------------------------------------------------------------------------

/// The bet form's complete state.
///
/// Every `with_*` method returns a new draft; the receiver is never modified.
/// This keeps the duplicate flag and the slots it was computed from in one
/// value, so they can never be observed out of step with each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetDraft {
    bettor_name: String,
    tax_id: String,
    numbers: [u8; SLOT_COUNT],
    duplicate: bool,
    surprise: bool,
    duplicate_check: DuplicateCheck,
}

impl BetDraft {
    pub fn new(duplicate_check: DuplicateCheck) -> Self {
        BetDraft {
            duplicate_check,
            ..BetDraft::default()
        }
    }

    pub fn bettor_name(&self) -> &str {
        &self.bettor_name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn numbers(&self) -> [u8; SLOT_COUNT] {
        self.numbers
    }

    /// Value of a single slot (0 when unset or out of range).
    pub fn slot(&self, index: usize) -> u8 {
        self.numbers.get(index).copied().unwrap_or(0)
    }

    /// Text shown in a slot's input box: empty for an unset slot.
    pub fn slot_text(&self, index: usize) -> String {
        match self.slot(index) {
            0 => String::new(),
            n => n.to_string(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }

    pub fn is_surprise(&self) -> bool {
        self.surprise
    }

    pub fn duplicate_check(&self) -> DuplicateCheck {
        self.duplicate_check
    }

    pub fn with_bettor_name(&self, name: &str) -> Self {
        BetDraft {
            bettor_name: name.to_string(),
            ..self.clone()
        }
    }

    /// Replace the tax id with the masked form of `raw`.
    pub fn with_tax_id_input(&self, raw: &str) -> Self {
        BetDraft {
            tax_id: tax_id::mask_tax_id(raw),
            ..self.clone()
        }
    }

    /// Apply new raw text to slot `index`.
    ///
    /// Slots are read-only while surprise mode is on, and an out-of-range
    /// index leaves the draft unchanged. Clearing a slot does not touch the
    /// duplicate flag under `DuplicateCheck::LastEdit`.
    pub fn with_slot_input(&self, index: usize, raw: &str) -> Self {
        let mut next = self.clone();
        if self.surprise || index >= SLOT_COUNT {
            return next;
        }

        match normalize_slot_input(raw) {
            SlotInput::Rejected => {}
            SlotInput::Cleared => {
                next.numbers[index] = 0;
                if self.duplicate_check == DuplicateCheck::Strict {
                    next.duplicate = has_duplicates(&next.numbers);
                }
            }
            SlotInput::Committed(value) => {
                next.numbers[index] = value;
                next.duplicate = match self.duplicate_check {
                    DuplicateCheck::LastEdit => self
                        .numbers
                        .iter()
                        .enumerate()
                        .any(|(i, &n)| i != index && n == value),
                    DuplicateCheck::Strict => has_duplicates(&next.numbers),
                };
            }
        }
        next
    }

    /// Toggle surprise mode.
    ///
    /// Turning it on installs five fresh random numbers and clears the
    /// duplicate flag. Turning it off leaves those numbers in the slots for
    /// manual editing.
    pub fn with_surprise<R: Rng + ?Sized>(&self, on: bool, rng: &mut R) -> Self {
        let mut next = self.clone();
        if on && !self.surprise {
            next.numbers = surprise_numbers(rng);
            next.duplicate = false;
        }
        next.surprise = on;
        next
    }

    /// Every slot holds a distinct number in [1, 50], or surprise mode is on.
    pub fn all_numbers_are_valid(&self) -> bool {
        if self.surprise {
            return true;
        }
        self.numbers
            .iter()
            .all(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n))
            && !self.duplicate
    }

    pub fn tax_id_is_complete(&self) -> bool {
        tax_id::is_complete(&self.tax_id)
    }

    /// True when the draft may be submitted.
    pub fn is_ready(&self) -> bool {
        !self.bettor_name.trim().is_empty() && self.tax_id_is_complete() && self.all_numbers_are_valid()
    }

    /// Build the request body, or `None` if the draft is not ready.
    ///
    /// Surprise bets go out with no numbers; the backend picks them.
    pub fn to_new_bet(&self) -> Option<NewBet> {
        if !self.is_ready() {
            return None;
        }
        let numbers = if self.surprise {
            Vec::new()
        } else {
            self.numbers.to_vec()
        };
        Some(NewBet {
            bettor_name: self.bettor_name.trim().to_string(),
            tax_id: self.tax_id.clone(),
            numbers,
            is_surprise: self.surprise,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
