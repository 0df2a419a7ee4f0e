use anyhow::Context;
use notes_e2e::configuration::get_configuration;
use notes_e2e::telemetry::{get_subscriber, init_subscriber};
use notes_e2e::verification::{CaseOutcome, run_suite};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("notes_e2e".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let client = configuration.notes_api.client();

    let report = run_suite(&client).await;

    for case in &report.cases {
        match &case.outcome {
            CaseOutcome::Passed => tracing::info!(case = %case.name(), "{}", case.outcome.label()),
            CaseOutcome::Failed { expected, actual } => tracing::error!(
                case = %case.name(),
                expected,
                actual,
                "{}",
                case.outcome.label()
            ),
            CaseOutcome::Errored(reason) | CaseOutcome::Skipped(reason) => tracing::error!(
                case = %case.name(),
                reason = %reason,
                "{}",
                case.outcome.label()
            ),
        }
    }
    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        errored = report.errored(),
        skipped = report.skipped(),
        "Notes suite finished"
    );

    let total = report.cases.len();
    let not_passed = total - report.passed();
    if let Some(e) = report.setup_error {
        return Err(anyhow::Error::new(e).context("Session setup failed."));
    }
    anyhow::ensure!(
        not_passed == 0,
        "{} of {} verification cases did not pass.",
        not_passed,
        total
    );
    Ok(())
}
