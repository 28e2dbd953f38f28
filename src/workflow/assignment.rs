use crate::api::engineer::EngineerApi;
use crate::api::ApiError;
use crate::domain::Id;
use crate::domain::Ticket;
use crate::domain::assignment::{AssignmentState, DeclineReason, EngineerDashboard, EngineerStats};
use crate::domain::slot::{SlotError, SlotGrid, SlotSelection};
use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Clone, Debug)]
pub struct Assignment {
    pub ticket: Ticket,
    pub state: AssignmentState,
}

#[derive(Default)]
struct Board {
    assignments: Vec<Assignment>,
    active_tickets: Vec<Ticket>,
    stats: EngineerStats,
    decline_reasons: Vec<DeclineReason>,
    resolved: HashMap<Id, AssignmentState>,
}

impl Board {
    fn state_of(&self, ticket_id: &Id) -> Option<AssignmentState> {
        self.resolved.get(ticket_id).copied().or_else(|| {
            self.assignments
                .iter()
                .find(|assignment| &assignment.ticket.id == ticket_id)
                .map(|assignment| assignment.state)
        })
    }

    fn apply(&mut self, dashboard: EngineerDashboard) {
        let resolved = &self.resolved;
        self.assignments = dashboard
            .pending_assignments
            .into_iter()
            .filter(|ticket| !resolved.contains_key(&ticket.id))
            .map(|ticket| Assignment {
                ticket,
                state: AssignmentState::PendingAcceptance,
            })
            .collect();
        self.active_tickets = dashboard.active_tickets;
        self.stats = dashboard.stats;
    }
}

/// Triage of newly assigned tickets: accept, decline with a reason, or
/// accept with a proposed new time. Every successful action re-fetches the
/// dashboard; a failed one leaves the assignment pending.
///
/// Actions take `&self` so they can run concurrently; a second action on a
/// ticket whose first action is still in flight is rejected.
pub struct AssignmentWorkflow<A: EngineerApi> {
    api: A,
    board: RwLock<Board>,
    in_flight: Mutex<HashSet<Id>>,
}

impl<A: EngineerApi> AssignmentWorkflow<A> {
    pub fn new(api: A) -> Self {
        AssignmentWorkflow {
            api,
            board: RwLock::new(Board::default()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn board(&self) -> RwLockReadGuard<'_, Board> {
        self.board.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn board_mut(&self) -> RwLockWriteGuard<'_, Board> {
        self.board.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pending(&self) -> Vec<Assignment> {
        self.board()
            .assignments
            .iter()
            .filter(|assignment| assignment.state == AssignmentState::PendingAcceptance)
            .cloned()
            .collect()
    }

    pub fn active_tickets(&self) -> Vec<Ticket> {
        self.board().active_tickets.clone()
    }

    pub fn stats(&self) -> EngineerStats {
        self.board().stats.clone()
    }

    pub fn decline_reasons(&self) -> Vec<DeclineReason> {
        self.board().decline_reasons.clone()
    }

    pub fn state_of(&self, ticket_id: &Id) -> Option<AssignmentState> {
        self.board().state_of(ticket_id)
    }

    /// Fetches the dashboard and the decline reasons in parallel.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), WorkflowError> {
        let (dashboard, reasons) = futures::try_join!(self.api.dashboard(), self.api.decline_reasons())?;
        let mut board = self.board_mut();
        board.decline_reasons = reasons;
        board.apply(dashboard);
        Ok(())
    }

    /// The action already went through, so a failed re-fetch only leaves the
    /// lists stale.
    async fn refresh(&self) {
        match self.api.dashboard().await {
            Ok(dashboard) => self.board_mut().apply(dashboard),
            Err(err) => warn!("⚠️ Unable to refresh the dashboard: {}", err),
        }
    }

    #[instrument(skip(self), fields(ticket_id = %ticket_id))]
    pub async fn accept(&self, ticket_id: &Id) -> Result<(), WorkflowError> {
        self.ensure_pending(ticket_id)?;
        let result = self.guarded(ticket_id, self.api.accept(ticket_id)).await;
        self.finish(ticket_id, result, AssignmentState::Accepted).await
    }

    #[instrument(skip(self, detail), fields(ticket_id = %ticket_id))]
    pub async fn decline(&self, ticket_id: &Id, reason_code: &str, detail: Option<&str>) -> Result<(), WorkflowError> {
        self.ensure_pending(ticket_id)?;

        let requires_detail = self
            .board()
            .decline_reasons
            .iter()
            .find(|reason| reason.code == reason_code)
            .map(|reason| reason.requires_detail);
        let Some(requires_detail) = requires_detail else {
            return Err(WorkflowError::UnknownDeclineReason {
                code: reason_code.to_string(),
            });
        };

        let detail = detail.map(str::trim).filter(|detail| !detail.is_empty());
        if requires_detail && detail.is_none() {
            return Err(WorkflowError::DetailRequired {
                code: reason_code.to_string(),
            });
        }

        let result = self.guarded(ticket_id, self.api.decline(ticket_id, reason_code, detail)).await;
        self.finish(ticket_id, result, AssignmentState::Declined).await
    }

    #[instrument(skip(self))]
    pub async fn slots(&self, date: NaiveDate) -> Result<SlotGrid, WorkflowError> {
        Ok(self.api.available_slots(date).await?)
    }

    /// Accepts the ticket and proposes the one-hour window starting at
    /// `start`, which must be an open slot of `grid`.
    #[instrument(skip(self, grid, notes), fields(ticket_id = %ticket_id, date = %grid.date))]
    pub async fn reschedule(
        &self,
        ticket_id: &Id,
        grid: &SlotGrid,
        start: NaiveTime,
        notes: Option<&str>,
    ) -> Result<SlotSelection, WorkflowError> {
        self.ensure_pending(ticket_id)?;
        let selection = grid.select(start)?;
        let notes = notes.map(str::trim).filter(|notes| !notes.is_empty());

        let result = self.guarded(ticket_id, self.api.reschedule(ticket_id, &selection, notes)).await;
        self.finish(ticket_id, result, AssignmentState::Rescheduled).await?;
        Ok(selection)
    }

    fn ensure_pending(&self, ticket_id: &Id) -> Result<(), WorkflowError> {
        match self.state_of(ticket_id) {
            Some(state) if state.is_terminal() => Err(WorkflowError::AlreadyResolved {
                ticket_id: ticket_id.clone(),
                state,
            }),
            Some(_) => Ok(()),
            None => Err(WorkflowError::UnknownTicket {
                ticket_id: ticket_id.clone(),
            }),
        }
    }

    /// Runs `action` unless another action for the same ticket is in flight.
    async fn guarded<F>(&self, ticket_id: &Id, action: F) -> Result<(), WorkflowError>
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if !in_flight.insert(ticket_id.clone()) {
                return Err(WorkflowError::InFlight {
                    ticket_id: ticket_id.clone(),
                });
            }
        }

        let result = action.await;

        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(ticket_id);
        Ok(result?)
    }

    async fn finish(
        &self,
        ticket_id: &Id,
        result: Result<(), WorkflowError>,
        state: AssignmentState,
    ) -> Result<(), WorkflowError> {
        if let Err(err) = result {
            warn!("⚠️ Unable to mark ticket '{}' as {}: {}", ticket_id, state, err);
            return Err(err);
        }

        info!("🟢 Ticket '{}' {}", ticket_id, state);
        {
            let mut board = self.board_mut();
            board.resolved.insert(ticket_id.clone(), state);
            if let Some(assignment) = board.assignments.iter_mut().find(|assignment| &assignment.ticket.id == ticket_id) {
                assignment.state = state;
            }
        }
        self.refresh().await;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Slot(#[from] SlotError),
    #[error("ticket '{ticket_id}' is not assigned to you")]
    UnknownTicket { ticket_id: Id },
    #[error("ticket '{ticket_id}' is already {state}")]
    AlreadyResolved { ticket_id: Id, state: AssignmentState },
    #[error("an action for ticket '{ticket_id}' is already in progress")]
    InFlight { ticket_id: Id },
    #[error("unknown decline reason '{code}'")]
    UnknownDeclineReason { code: String },
    #[error("decline reason '{code}' needs a detail")]
    DetailRequired { code: String },
}

impl WorkflowError {
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Api(err) => err.user_message(),
            err => err.to_string(),
        }
    }
}
