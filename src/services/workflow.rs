use std::mem;

use chrono::NaiveDate;

use crate::models::{Booking, CampsiteCandidate};

/// The two actions that gather a reason instead of a campsite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonAction {
    Reject,
    Cancel,
}

impl ReasonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonAction::Reject => "reject",
            ReasonAction::Cancel => "cancel",
        }
    }
}

/// A fully validated dispatch, produced only by `begin_submit`. Holding one
/// of these means every required input was present.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Approve {
        booking_id: String,
        campsite_id: String,
        notes: Option<String>,
    },
    Reject { booking_id: String, reason: String },
    Cancel { booking_id: String, reason: String },
}

impl SubmitRequest {
    pub fn booking_id(&self) -> &str {
        match self {
            SubmitRequest::Approve { booking_id, .. }
            | SubmitRequest::Reject { booking_id, .. }
            | SubmitRequest::Cancel { booking_id, .. } => booking_id,
        }
    }
}

/// One dialog workflow per view. A single enum value means two dialogs
/// cannot be open at once and a second submit cannot start while one is in
/// flight.
#[derive(Debug, PartialEq, Default)]
pub enum ActionWorkflow {
    #[default]
    Closed,
    /// Approve flow, waiting for the availability query keyed to the
    /// target booking's dates.
    LoadingCampsites {
        booking_id: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    /// Approve flow, candidates on screen. An empty candidate list with no
    /// error is the "no campsites available" outcome, not a failure.
    SelectingCampsite {
        booking_id: String,
        candidates: Vec<CampsiteCandidate>,
        selected: Option<String>,
        notes: String,
        error: Option<String>,
    },
    /// Reject/cancel flow, gathering the mandatory reason.
    ReasonEntry {
        booking_id: String,
        action: ReasonAction,
        reason: String,
        error: Option<String>,
    },
    /// Dispatch in flight. Keeps the dialog it came from so a failure can
    /// restore it, entered inputs intact, with the error surfaced.
    Submitting {
        request: SubmitRequest,
        dialog: Box<ActionWorkflow>,
    },
}

impl ActionWorkflow {
    /// Open the approve flow for a booking; the caller is expected to run
    /// the availability query for the returned date range and feed the
    /// result to `candidates_loaded` or `load_failed`.
    pub fn open_approve(booking: &Booking) -> Self {
        ActionWorkflow::LoadingCampsites {
            booking_id: booking.booking_id.clone(),
            start_date: booking.start_date,
            end_date: booking.end_date,
        }
    }

    pub fn open_reason(booking_id: &str, action: ReasonAction) -> Self {
        ActionWorkflow::ReasonEntry {
            booking_id: booking_id.to_string(),
            action,
            reason: String::new(),
            error: None,
        }
    }

    pub fn candidates_loaded(&mut self, candidates: Vec<CampsiteCandidate>) {
        if let ActionWorkflow::LoadingCampsites { booking_id, .. } = self {
            *self = ActionWorkflow::SelectingCampsite {
                booking_id: mem::take(booking_id),
                candidates,
                selected: None,
                notes: String::new(),
                error: None,
            };
        }
    }

    /// The availability query itself failed. Stays in the approve dialog
    /// with no candidates and the error on display, so the operator can
    /// close and retry.
    pub fn load_failed(&mut self, error: String) {
        if let ActionWorkflow::LoadingCampsites { booking_id, .. } = self {
            *self = ActionWorkflow::SelectingCampsite {
                booking_id: mem::take(booking_id),
                candidates: Vec::new(),
                selected: None,
                notes: String::new(),
                error: Some(error),
            };
        }
    }

    /// Select a campsite by id; only ids present in the candidate list are
    /// accepted.
    pub fn select_campsite(&mut self, campsite_id: &str) -> bool {
        if let ActionWorkflow::SelectingCampsite {
            candidates,
            selected,
            ..
        } = self
        {
            if candidates.iter().any(|c| c.campsite_id == campsite_id) {
                *selected = Some(campsite_id.to_string());
                return true;
            }
        }
        false
    }

    pub fn set_notes(&mut self, value: &str) {
        if let ActionWorkflow::SelectingCampsite { notes, .. } = self {
            *notes = value.to_string();
        }
    }

    pub fn set_reason(&mut self, value: &str) {
        if let ActionWorkflow::ReasonEntry { reason, .. } = self {
            *reason = value.to_string();
        }
    }

    /// Submit gating: approve needs a selected campsite, reject/cancel
    /// need a non-empty trimmed reason, and nothing can be submitted while
    /// a dispatch is already in flight.
    pub fn can_submit(&self) -> bool {
        match self {
            ActionWorkflow::SelectingCampsite { selected, .. } => selected.is_some(),
            ActionWorkflow::ReasonEntry { reason, .. } => !reason.trim().is_empty(),
            _ => false,
        }
    }

    /// Move to `Submitting` and hand the caller the validated request to
    /// dispatch. Returns `None` (and stays put) when gating fails.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.can_submit() {
            return None;
        }
        let dialog = mem::take(self);
        let request = match &dialog {
            ActionWorkflow::SelectingCampsite {
                booking_id,
                selected: Some(campsite_id),
                notes,
                ..
            } => Some(SubmitRequest::Approve {
                booking_id: booking_id.clone(),
                campsite_id: campsite_id.clone(),
                notes: {
                    let trimmed = notes.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                },
            }),
            ActionWorkflow::ReasonEntry {
                booking_id,
                action,
                reason,
                ..
            } => {
                let reason = reason.trim().to_string();
                Some(match action {
                    ReasonAction::Reject => SubmitRequest::Reject {
                        booking_id: booking_id.clone(),
                        reason,
                    },
                    ReasonAction::Cancel => SubmitRequest::Cancel {
                        booking_id: booking_id.clone(),
                        reason,
                    },
                })
            }
            _ => None,
        };
        let request = match request {
            Some(request) => request,
            None => {
                // can_submit already filtered these out; put the state back.
                *self = dialog;
                return None;
            }
        };
        *self = ActionWorkflow::Submitting {
            request: request.clone(),
            dialog: Box::new(dialog),
        };
        Some(request)
    }

    pub fn submit_succeeded(&mut self) {
        if matches!(self, ActionWorkflow::Submitting { .. }) {
            *self = ActionWorkflow::Closed;
        }
    }

    /// Restore the dialog the submit came from, entered inputs intact,
    /// with the failure on display.
    pub fn submit_failed(&mut self, message: String) {
        if let ActionWorkflow::Submitting { dialog, .. } = self {
            let mut restored = mem::take(dialog.as_mut());
            match &mut restored {
                ActionWorkflow::SelectingCampsite { error, .. }
                | ActionWorkflow::ReasonEntry { error, .. } => *error = Some(message),
                _ => {}
            }
            *self = restored;
        }
    }

    /// Closing a dialog before submit discards everything entered; no side
    /// effects. Ignored while a dispatch is in flight.
    pub fn close(&mut self) {
        if !matches!(self, ActionWorkflow::Submitting { .. }) {
            *self = ActionWorkflow::Closed;
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ActionWorkflow::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ActionWorkflow::Submitting { .. })
    }

    /// True only for the distinct "query succeeded, nothing free" outcome.
    pub fn no_availability(&self) -> bool {
        matches!(
            self,
            ActionWorkflow::SelectingCampsite {
                candidates,
                error: None,
                ..
            } if candidates.is_empty()
        )
    }
}
