use tracing::{debug, warn};

use crate::analysis::{
    ANALYSIS_FAILED_MESSAGE, AnalysisMode, AnalysisRequest, AnalysisResult, BrandData,
    CompetitorData, ValidationError, YouTubeData,
};

use super::events::RequestTicket;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardStatus {
    Idle,
    Loading {
        ticket: RequestTicket,
        label: String,
    },
    Error {
        message: String,
    },
    Ready {
        result: AnalysisResult,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Inputs were valid; the request must be sent to the worker.
    Dispatch {
        ticket: RequestTicket,
        request: AnalysisRequest,
    },
    Rejected(ValidationError),
    /// A request is already loading.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

/// What the central panel should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardView<'a> {
    Welcome,
    Loading,
    Error(&'a str),
    Brand { data: &'a BrandData, label: &'a str },
    Youtube { data: &'a YouTubeData, label: &'a str },
    Competitor { data: &'a CompetitorData },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardController {
    mode: AnalysisMode,
    primary_input: String,
    secondary_input: String,
    status: DashboardStatus,
    next_ticket_id: u64,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardController {
    pub fn new() -> Self {
        Self {
            mode: AnalysisMode::default(),
            primary_input: String::new(),
            secondary_input: String::new(),
            status: DashboardStatus::Idle,
            next_ticket_id: 1,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn status(&self) -> &DashboardStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, DashboardStatus::Loading { .. })
    }

    pub fn primary_input(&self) -> &str {
        &self.primary_input
    }

    pub fn secondary_input(&self) -> &str {
        &self.secondary_input
    }

    pub fn primary_input_mut(&mut self) -> &mut String {
        &mut self.primary_input
    }

    pub fn secondary_input_mut(&mut self) -> &mut String {
        &mut self.secondary_input
    }

    pub fn set_primary_input(&mut self, value: impl Into<String>) {
        self.primary_input = value.into();
    }

    pub fn set_secondary_input(&mut self, value: impl Into<String>) {
        self.secondary_input = value.into();
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.status {
            DashboardStatus::Ready { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn result_label(&self) -> Option<&str> {
        match &self.status {
            DashboardStatus::Ready { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Switches mode and clears inputs and any result. A request still in
    /// flight loses its ticket, so its response is discarded on arrival.
    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if let DashboardStatus::Loading { ticket, .. } = &self.status {
            debug!(ticket = ticket.id, from = %self.mode, to = %mode, "mode switched while loading");
        }
        self.mode = mode;
        self.primary_input.clear();
        self.secondary_input.clear();
        self.status = DashboardStatus::Idle;
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_loading() {
            return SubmitOutcome::Busy;
        }

        let request =
            match AnalysisRequest::from_inputs(self.mode, &self.primary_input, &self.secondary_input)
            {
                Ok(request) => request,
                Err(error) => {
                    self.status = DashboardStatus::Error {
                        message: error.to_string(),
                    };
                    return SubmitOutcome::Rejected(error);
                }
            };

        let ticket = RequestTicket {
            id: self.next_ticket_id,
            mode: self.mode,
        };
        self.next_ticket_id = self.next_ticket_id.saturating_add(1);
        self.status = DashboardStatus::Loading {
            ticket,
            label: request.label(),
        };

        SubmitOutcome::Dispatch { ticket, request }
    }

    /// Applies a settled request. Only the ticket currently loading is
    /// accepted; anything else is stale.
    pub fn apply_result(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, String>,
    ) -> ApplyOutcome {
        let label = match &self.status {
            DashboardStatus::Loading {
                ticket: pending,
                label,
            } if *pending == ticket && ticket.mode == self.mode => label.clone(),
            _ => {
                debug!(ticket = ticket.id, mode = %ticket.mode, "discarding stale analysis result");
                return ApplyOutcome::Stale;
            }
        };

        self.status = match outcome {
            Ok(result) if result.mode() == ticket.mode => DashboardStatus::Ready { result, label },
            Ok(result) => {
                warn!(
                    ticket = ticket.id,
                    expected = %ticket.mode,
                    actual = %result.mode(),
                    "analysis result mode does not match request"
                );
                failure_status()
            }
            Err(error) => {
                warn!(ticket = ticket.id, mode = %ticket.mode, error = %error, "analysis failed");
                failure_status()
            }
        };
        ApplyOutcome::Applied
    }

    pub fn view(&self) -> DashboardView<'_> {
        match &self.status {
            DashboardStatus::Idle => DashboardView::Welcome,
            DashboardStatus::Loading { .. } => DashboardView::Loading,
            DashboardStatus::Error { message } => DashboardView::Error(message),
            DashboardStatus::Ready { result, label } => match result {
                AnalysisResult::Brand(data) => DashboardView::Brand { data, label },
                AnalysisResult::Youtube(data) => DashboardView::Youtube { data, label },
                AnalysisResult::Competitor(data) => DashboardView::Competitor { data },
            },
        }
    }
}

fn failure_status() -> DashboardStatus {
    DashboardStatus::Error {
        message: ANALYSIS_FAILED_MESSAGE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::{
        AnalysisMode, AnalysisRequest, AnalysisResult, BrandData, Sentiment, TopThemes,
        ValidationError,
    };

    use super::*;

    fn brand_result() -> AnalysisResult {
        AnalysisResult::Brand(BrandData {
            sentiment: Sentiment {
                positive: 60.0,
                negative: 30.0,
                neutral: 10.0,
            },
            word_cloud: Vec::new(),
            top_themes: TopThemes::default(),
            sample_posts: Vec::new(),
        })
    }

    fn dispatch(controller: &mut DashboardController) -> (RequestTicket, AnalysisRequest) {
        match controller.submit() {
            SubmitOutcome::Dispatch { ticket, request } => (ticket, request),
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn starts_idle_on_welcome_view() {
        let controller = DashboardController::new();
        assert_eq!(controller.mode(), AnalysisMode::Brand);
        assert_eq!(controller.view(), DashboardView::Welcome);
    }

    #[test]
    fn empty_primary_input_is_rejected_without_dispatch() {
        let mut controller = DashboardController::new();

        let outcome = controller.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::MissingPrimaryInput)
        );
        assert_eq!(
            controller.view(),
            DashboardView::Error("Please provide a topic or link to analyze.")
        );
    }

    #[test]
    fn competitor_mode_rejects_missing_competitor() {
        let mut controller = DashboardController::new();
        controller.set_mode(AnalysisMode::Competitor);
        controller.set_primary_input("@Nike");

        assert_eq!(
            controller.submit(),
            SubmitOutcome::Rejected(ValidationError::MissingCompetitor)
        );
        assert!(matches!(controller.status(), DashboardStatus::Error { .. }));
    }

    #[test]
    fn valid_submit_enters_loading_and_blocks_resubmission() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("Starlight Coffee");

        let (ticket, request) = dispatch(&mut controller);
        assert_eq!(ticket.mode, AnalysisMode::Brand);
        assert_eq!(
            request,
            AnalysisRequest::Brand {
                topic: "Starlight Coffee".to_owned()
            }
        );
        assert!(controller.is_loading());
        assert_eq!(controller.view(), DashboardView::Loading);
        assert_eq!(controller.submit(), SubmitOutcome::Busy);
    }

    #[test]
    fn successful_result_becomes_ready_with_label() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("Starlight Coffee");
        let (ticket, _) = dispatch(&mut controller);

        assert_eq!(
            controller.apply_result(ticket, Ok(brand_result())),
            ApplyOutcome::Applied
        );
        assert_eq!(controller.result_label(), Some("Starlight Coffee"));
        assert!(matches!(
            controller.view(),
            DashboardView::Brand {
                label: "Starlight Coffee",
                ..
            }
        ));
    }

    #[test]
    fn competitor_label_uses_both_inputs() {
        let mut controller = DashboardController::new();
        controller.set_mode(AnalysisMode::Competitor);
        controller.set_primary_input("@Nike");
        controller.set_secondary_input("@Adidas");
        dispatch(&mut controller);

        let DashboardStatus::Loading { label, .. } = controller.status() else {
            panic!("expected loading status");
        };
        assert_eq!(label, "@Nike vs @Adidas");
    }

    #[test]
    fn failure_shows_generic_message() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("Starlight Coffee");
        let (ticket, _) = dispatch(&mut controller);

        controller.apply_result(ticket, Err("provider returned HTTP 500".to_owned()));
        assert_eq!(
            controller.view(),
            DashboardView::Error(ANALYSIS_FAILED_MESSAGE)
        );
        assert!(!controller.is_loading());
    }

    #[test]
    fn result_with_wrong_mode_is_treated_as_failure() {
        let mut controller = DashboardController::new();
        controller.set_mode(AnalysisMode::Youtube);
        controller.set_primary_input("https://youtu.be/abc");
        let (ticket, _) = dispatch(&mut controller);

        controller.apply_result(ticket, Ok(brand_result()));
        assert_eq!(
            controller.view(),
            DashboardView::Error(ANALYSIS_FAILED_MESSAGE)
        );
    }

    #[test]
    fn switching_mode_while_ready_clears_result_and_inputs() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("Starlight Coffee");
        let (ticket, _) = dispatch(&mut controller);
        controller.apply_result(ticket, Ok(brand_result()));

        controller.set_mode(AnalysisMode::Youtube);
        assert_eq!(controller.result(), None);
        assert_eq!(controller.primary_input(), "");
        assert_eq!(controller.secondary_input(), "");
        assert_eq!(controller.view(), DashboardView::Welcome);
    }

    #[test]
    fn reselecting_current_mode_still_resets() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("Starlight Coffee");
        let (ticket, _) = dispatch(&mut controller);
        controller.apply_result(ticket, Ok(brand_result()));

        controller.set_mode(AnalysisMode::Brand);
        assert_eq!(controller.mode(), AnalysisMode::Brand);
        assert_eq!(controller.result(), None);
        assert_eq!(controller.primary_input(), "");
        assert_eq!(controller.view(), DashboardView::Welcome);

        controller.submit();
        controller.set_mode(AnalysisMode::Brand);
        assert_eq!(controller.view(), DashboardView::Welcome);
    }

    #[test]
    fn response_after_mode_switch_is_discarded() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("Starlight Coffee");
        let (stale_ticket, _) = dispatch(&mut controller);

        controller.set_mode(AnalysisMode::Youtube);
        assert_eq!(
            controller.apply_result(stale_ticket, Ok(brand_result())),
            ApplyOutcome::Stale
        );
        assert_eq!(controller.view(), DashboardView::Welcome);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_request() {
        let mut controller = DashboardController::new();
        controller.set_primary_input("First");
        let (first, _) = dispatch(&mut controller);

        controller.set_mode(AnalysisMode::Brand);
        controller.set_primary_input("Second");
        let (second, _) = dispatch(&mut controller);
        assert_ne!(first, second);

        assert_eq!(
            controller.apply_result(first, Ok(brand_result())),
            ApplyOutcome::Stale
        );
        assert!(controller.is_loading());

        assert_eq!(
            controller.apply_result(second, Ok(brand_result())),
            ApplyOutcome::Applied
        );
        assert_eq!(controller.result_label(), Some("Second"));
    }
}
