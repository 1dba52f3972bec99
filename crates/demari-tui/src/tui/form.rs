// Bet form state: the draft being edited plus which field has focus.
//
// Every edit replaces `draft` with the value returned by the `BetDraft`
// builder methods; the form itself only tracks focus and whether a
// submission is in flight.

use demari_core::validator::{BetDraft, DuplicateCheck, SLOT_COUNT};

/// Focusable fields, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    TaxId,
    Slot(usize),
    Surprise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetForm {
    pub draft: BetDraft,
    pub focus: FormField,
    /// Set between pressing Enter and hearing back from the backend.
    pub submitting: bool,
}

impl BetForm {
    pub fn new(duplicate_check: DuplicateCheck) -> Self {
        BetForm {
            draft: BetDraft::new(duplicate_check),
            focus: FormField::Name,
            submitting: false,
        }
    }

    /// Whether Enter would submit right now.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.draft.is_ready()
    }

    /// Move focus forward, skipping the number slots while surprise is on.
    pub fn focus_next(&mut self) {
        let fields = self.focus_order();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    /// Move focus backward, skipping the number slots while surprise is on.
    pub fn focus_prev(&mut self) {
        let fields = self.focus_order();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    /// Focus lands on a slot that was just disabled; park it on the toggle.
    pub fn settle_focus(&mut self) {
        if self.draft.is_surprise() && matches!(self.focus, FormField::Slot(_)) {
            self.focus = FormField::Surprise;
        }
    }

    fn focus_order(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Name, FormField::TaxId];
        if !self.draft.is_surprise() {
            fields.extend((0..SLOT_COUNT).map(FormField::Slot));
        }
        fields.push(FormField::Surprise);
        fields
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
