use tokio::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conference_booking::{
    config::Config,
    console::{ConsoleSession, Output},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Лог оператора идёт в stderr без времени и уровня: "Booking System: ..."
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_level(false)
                .with_target(false),
        )
        .init();

    info!(
        conference = %config.conference_name,
        tickets = config.conference_tickets,
        "Starting booking application"
    );

    let output = Output::stdout();
    let state = AppState::new(config, output.clone());

    let mut session = ConsoleSession::new(&state, BufReader::new(io::stdin()), output);
    let outcome = session.run().await?;
    info!(?outcome, "Session finished");

    Ok(())
}
