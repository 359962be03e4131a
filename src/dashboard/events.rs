use crate::analysis::{AnalysisMode, AnalysisRequest, AnalysisResult};

/// Identifies one submission. Results carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: u64,
    pub mode: AnalysisMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    Analyze {
        ticket: RequestTicket,
        request: AnalysisRequest,
    },
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    AnalysisCompleted {
        ticket: RequestTicket,
        result: AnalysisResult,
    },
    AnalysisFailed {
        ticket: RequestTicket,
        error: String,
    },
}

impl DashboardEvent {
    pub fn ticket(&self) -> RequestTicket {
        match self {
            Self::AnalysisCompleted { ticket, .. } | Self::AnalysisFailed { ticket, .. } => *ticket,
        }
    }

    pub fn into_outcome(self) -> (RequestTicket, Result<AnalysisResult, String>) {
        match self {
            Self::AnalysisCompleted { ticket, result } => (ticket, Ok(result)),
            Self::AnalysisFailed { ticket, error } => (ticket, Err(error)),
        }
    }
}
