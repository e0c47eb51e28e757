// Application state and orchestration logic.
//
// The controller owns the session: the input assembler, the current report,
// the loading flag and the error banner. It applies user commands, launches
// at most one analysis request at a time and pushes a fresh snapshot to the
// TUI after every change.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use gaffer_api::AnalysisService;
use gaffer_core::assembler::InputAssembler;

use crate::protocol::{
    AnalysisOutcome, AppSnapshot, MatchEdit, ReceivedReport, ServiceStatus, SquadEdit, TabId,
    UiUpdate, UserCommand, MISSING_MATCH_DATA,
};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub assembler: InputAssembler,
    /// Last successful report. Replaced only by the next success.
    pub report: Option<ReceivedReport>,
    pub loading: bool,
    pub error: Option<String>,
    pub service: ServiceStatus,
    pub active_tab: TabId,
    client: Arc<dyn AnalysisService>,
    /// Spawned request tasks report back on this sender.
    outcome_tx: mpsc::Sender<AnalysisOutcome>,
    request_task: Option<tokio::task::JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        assembler: InputAssembler,
        client: Arc<dyn AnalysisService>,
        outcome_tx: mpsc::Sender<AnalysisOutcome>,
    ) -> Self {
        AppState {
            assembler,
            report: None,
            loading: false,
            error: None,
            service: ServiceStatus::Unknown,
            active_tab: TabId::Match,
            client,
            outcome_tx,
            request_task: None,
        }
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            tier: self.assembler.tier(),
            match_input: self.assembler.match_input().clone(),
            match_entered: self.assembler.has_match_data(),
            squad: self.assembler.squad().to_vec(),
            max_players: self.assembler.max_players(),
            report: self.report.clone(),
            loading: self.loading,
            error: self.error.clone(),
            service: self.service,
        }
    }

    /// Probe the service in the background; the result arrives as
    /// `AnalysisOutcome::Health`.
    pub fn spawn_health_check(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = client.health().await;
            let _ = tx.send(AnalysisOutcome::Health(result)).await;
        });
    }

    /// Start an analysis request from the current payload.
    ///
    /// Returns the tab the view should switch to, if any. A request already
    /// in flight makes this a no-op.
    pub fn start_analysis(&mut self) -> Option<TabId> {
        if self.loading {
            debug!("analysis already in flight, ignoring request");
            return None;
        }

        let Some(payload) = self.assembler.payload().cloned() else {
            info!("analysis requested without match data");
            self.error = Some(MISSING_MATCH_DATA.to_string());
            self.active_tab = TabId::Match;
            return Some(TabId::Match);
        };

        info!(
            tier = %payload.tier,
            players = self.assembler.squad().len(),
            "starting analysis"
        );
        self.error = None;
        self.loading = true;

        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        self.request_task = Some(tokio::spawn(async move {
            let outcome = match client.analyse(&payload).await {
                Ok(report) => AnalysisOutcome::Completed(report),
                Err(e) => AnalysisOutcome::Failed(e),
            };
            let _ = tx.send(outcome).await;
        }));
        None
    }

    /// Fold a finished request into the session. Returns the tab to switch
    /// to, if any.
    pub fn handle_outcome(&mut self, outcome: AnalysisOutcome) -> Option<TabId> {
        match outcome {
            AnalysisOutcome::Completed(report) => {
                info!(
                    formation = %report.recommended_formation,
                    "analysis complete for {} vs {}",
                    report.team_name,
                    report.opponent_name
                );
                self.loading = false;
                self.request_task = None;
                self.error = None;
                self.report = Some(ReceivedReport {
                    report,
                    received_at: Local::now(),
                });
                self.active_tab = TabId::Report;
                Some(TabId::Report)
            }
            AnalysisOutcome::Failed(e) => {
                warn!("analysis failed: {}", e);
                self.loading = false;
                self.request_task = None;
                self.error = Some(e.to_string());
                None
            }
            AnalysisOutcome::Health(Ok(())) => {
                info!("analysis service is reachable");
                self.service = ServiceStatus::Online;
                None
            }
            AnalysisOutcome::Health(Err(e)) => {
                warn!("analysis service health check failed: {}", e);
                self.service = ServiceStatus::Offline;
                None
            }
        }
    }

    pub fn apply_match_edit(&mut self, edit: MatchEdit) {
        let a = &mut self.assembler;
        match edit {
            MatchEdit::Name { side, name } => a.set_name(side, name),
            MatchEdit::Result { side, index, result } => a.set_result(side, index, result),
            MatchEdit::Goals { field, value } => a.set_goals(field, value),
            MatchEdit::Stat { field, value } => a.set_stat(field, value),
            MatchEdit::StepStat { field, steps } => a.step_stat(field, steps),
            MatchEdit::Confirm => a.confirm_match(),
        }
    }

    pub fn apply_squad_edit(&mut self, edit: SquadEdit) {
        let a = &mut self.assembler;
        let applied = match edit {
            SquadEdit::SetCount(n) => {
                a.set_player_count(n);
                true
            }
            SquadEdit::Rename { index, name } => a.edit_player(index, |p| p.name = name).is_some(),
            SquadEdit::SetPosition { index, position } => {
                a.edit_player(index, |p| p.set_position(position)).is_some()
            }
            SquadEdit::SetSpecific { index, specific } => {
                match a.edit_player(index, |p| p.set_specific_position(specific)) {
                    Some(Ok(())) => true,
                    Some(Err(e)) => {
                        warn!("rejected specific position for player {}: {}", index, e);
                        true
                    }
                    None => false,
                }
            }
            SquadEdit::SetSecondary { index, secondary } => {
                match a.edit_player(index, |p| p.set_secondary_position(secondary)) {
                    Some(Ok(())) => true,
                    Some(Err(e)) => {
                        warn!("rejected secondary position for player {}: {}", index, e);
                        true
                    }
                    None => false,
                }
            }
            SquadEdit::SetFitness { index, fitness } => {
                a.edit_player(index, |p| p.set_fitness(fitness)).is_some()
            }
            SquadEdit::SetAvailable { index, available } => {
                a.edit_player(index, |p| p.available = available).is_some()
            }
            SquadEdit::Remove(index) => a.remove_player(index).is_some(),
        };
        if !applied {
            debug!("squad edit targeted a missing player");
        }
    }

    pub fn cancel_request(&mut self) {
        if let Some(handle) = self.request_task.take() {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the controller until the user quits or the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut outcome_rx: mpsc::Receiver<AnalysisOutcome>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // AppState holds a sender, so this channel never closes while
            // the loop runs.
            Some(outcome) = outcome_rx.recv() => {
                let tab = state.handle_outcome(outcome);
                if let Some(tab) = tab {
                    let _ = ui_tx.send(UiUpdate::SwitchTab(tab)).await;
                }
                send_snapshot(&state, &ui_tx).await;
            }
        }
    }

    state.cancel_request();
    info!("Application event loop exiting");
    Ok(())
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SwitchTab(tab) => {
            state.active_tab = tab;
            debug!("Switched to tab: {:?}", tab);
            return;
        }
        UserCommand::SetTier(tier) => {
            info!("Data tier set to {}", tier);
            state.assembler.set_tier(tier);
        }
        UserCommand::EditMatch(edit) => state.apply_match_edit(edit),
        UserCommand::EditSquad(edit) => state.apply_squad_edit(edit),
        UserCommand::Analyse => {
            if let Some(tab) = state.start_analysis() {
                let _ = ui_tx.send(UiUpdate::SwitchTab(tab)).await;
            }
        }
        UserCommand::DismissError => {
            state.error = None;
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
    send_snapshot(state, ui_tx).await;
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
