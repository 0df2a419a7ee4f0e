use crate::domain::{AuthToken, NoteId, NotePatch, NoteUpdate, POOL_SIZE};
use crate::notes_client::NotesClient;
use crate::session::{SessionContext, SetupError};
use reqwest::StatusCode;

/// One of the four checks run against every pooled note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudCase {
    Read,
    FullUpdate,
    PartialUpdate,
    Delete,
}

impl CrudCase {
    /// Execution order. Delete comes last so that no other case
    /// ever targets a note that is already gone.
    pub const ALL: [CrudCase; 4] = [
        CrudCase::Read,
        CrudCase::FullUpdate,
        CrudCase::PartialUpdate,
        CrudCase::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CrudCase::Read => "get_note_by_id",
            CrudCase::FullUpdate => "update_note_by_id",
            CrudCase::PartialUpdate => "partial_update_note_by_id",
            CrudCase::Delete => "delete_note_by_id",
        }
    }

    pub fn expected_status(&self) -> StatusCode {
        StatusCode::OK
    }

    /// Issues the single request this case consists of.
    pub async fn execute(
        &self,
        client: &NotesClient,
        token: &AuthToken,
        note_id: &NoteId,
    ) -> Result<StatusCode, reqwest::Error> {
        let response = match self {
            CrudCase::Read => client.get_note(token, note_id).await?,
            CrudCase::FullUpdate => {
                client
                    .update_note(token, note_id, &NoteUpdate::default())
                    .await?
            }
            CrudCase::PartialUpdate => {
                client
                    .patch_note(token, note_id, &NotePatch::default())
                    .await?
            }
            CrudCase::Delete => client.delete_note(token, note_id).await?,
        };
        Ok(response.status())
    }
}

impl std::fmt::Display for CrudCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    /// The call went through but returned the wrong status.
    Failed { expected: u16, actual: u16 },
    /// The call never produced a status (network error, timeout).
    Errored(String),
    /// Session setup failed, so the case never ran.
    Skipped(String),
}

impl CaseOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CaseOutcome::Passed => "PASSED",
            CaseOutcome::Failed { .. } => "FAILED",
            CaseOutcome::Errored(_) => "ERROR",
            CaseOutcome::Skipped(_) => "SKIPPED",
        }
    }
}

/// Result of one case against one pool index.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub case: CrudCase,
    pub index: usize,
    pub note_id: Option<NoteId>,
    pub outcome: CaseOutcome,
}

impl CaseReport {
    /// Test-instance style name, e.g. `delete_note_by_id[3]`.
    pub fn name(&self) -> String {
        format!("{}[{}]", self.case, self.index)
    }
}

#[derive(Debug)]
pub struct SuiteReport {
    pub setup_error: Option<SetupError>,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Failed { .. }))
    }

    pub fn errored(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Errored(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Skipped(_)))
    }

    pub fn is_success(&self) -> bool {
        self.setup_error.is_none()
            && self
                .cases
                .iter()
                .all(|c| c.outcome == CaseOutcome::Passed)
    }

    pub fn find(&self, case: CrudCase, index: usize) -> Option<&CaseReport> {
        self.cases
            .iter()
            .find(|report| report.case == case && report.index == index)
    }

    fn count(&self, predicate: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases.iter().filter(|c| predicate(&c.outcome)).count()
    }
}

#[tracing::instrument(
    name = "Running verification case",
    skip(client, token, note_id),
    fields(note_id = %note_id)
)]
pub async fn run_case(
    case: CrudCase,
    client: &NotesClient,
    token: &AuthToken,
    note_id: &NoteId,
) -> CaseOutcome {
    let expected = case.expected_status();
    match case.execute(client, token, note_id).await {
        Ok(actual) if actual == expected => CaseOutcome::Passed,
        Ok(actual) => {
            tracing::warn!(
                expected = expected.as_u16(),
                actual = actual.as_u16(),
                "Unexpected status"
            );
            CaseOutcome::Failed {
                expected: expected.as_u16(),
                actual: actual.as_u16(),
            }
        }
        Err(e) => {
            tracing::error!("Request failed: {:?}", e);
            CaseOutcome::Errored(e.to_string())
        }
    }
}

/// Runs every case once per pooled note, in [`CrudCase::ALL`] order.
pub async fn run_verification(
    client: &NotesClient,
    session: &SessionContext,
) -> Vec<CaseReport> {
    let mut reports = Vec::with_capacity(CrudCase::ALL.len() * POOL_SIZE);
    for case in CrudCase::ALL {
        for index in 0..POOL_SIZE {
            let Some(note_id) = session.notes.select(index) else {
                break;
            };
            let outcome = run_case(case, client, &session.token, note_id).await;
            reports.push(CaseReport {
                case,
                index,
                note_id: Some(note_id.clone()),
                outcome,
            });
        }
    }
    reports
}

/// Establishes a session and verifies it.
/// A setup failure marks every case instance as skipped.
#[tracing::instrument(
    name = "Running notes suite",
    skip_all,
    fields(base_url = %client.base_url())
)]
pub async fn run_suite(client: &NotesClient) -> SuiteReport {
    match SessionContext::establish(client).await {
        Ok(session) => SuiteReport {
            setup_error: None,
            cases: run_verification(client, &session).await,
        },
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Session setup failed");
            let reason = e.to_string();
            let cases = CrudCase::ALL
                .into_iter()
                .flat_map(|case| {
                    let reason = reason.clone();
                    (0..POOL_SIZE).map(move |index| CaseReport {
                        case,
                        index,
                        note_id: None,
                        outcome: CaseOutcome::Skipped(reason.clone()),
                    })
                })
                .collect();
            SuiteReport {
                setup_error: Some(e),
                cases,
            }
        }
    }
}
