//! Campus Connect
//!
//! Main application entry point: loads configuration, warms the collection
//! caches and reports what the dashboards would show.

use anyhow::Context;
use chrono::Utc;
use tracing::{error, info, warn};

use campus_connect::{
    config::Settings,
    state::AppContext,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", campus_connect::info());

    let context = AppContext::from_settings(settings)?;

    match context.warm_up(false).await {
        Ok(report) => info!(events = report.events, clubs = report.clubs, "Caches ready"),
        Err(e) => {
            error!(
                error = %e,
                severity = %e.severity(),
                recoverable = e.is_recoverable(),
                "Failed to warm caches: {}",
                e.user_message()
            );
            return Err(e.into());
        }
    }

    let health = context.health();
    for issue in health.get_issues() {
        warn!("{}", issue);
    }

    let now = Utc::now();
    let catalog = context.catalog().event_stats(now).await?;
    info!(
        total = catalog.total_events,
        upcoming = catalog.upcoming_events,
        clubs = catalog.active_clubs,
        "Event catalog"
    );

    let admin = context.admin().stats().await?;
    info!(
        pending = admin.pending_events,
        approved = admin.approved_events,
        rejected = admin.rejected_events,
        registrations = admin.total_registrations,
        "Approval queue"
    );

    info!("{} has finished.", campus_connect::NAME);
    Ok(())
}
