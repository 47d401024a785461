use intel_client::{
    controllers::{BallChaser, ChaserConfig},
    Session,
};
use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reference client: answers the host on stdout, diagnostics go to stderr.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("started");

    let mut session = Session::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        BallChaser::new(ChaserConfig::default()),
    );
    match session.run().await {
        Ok(_) => ExitCode::SUCCESS,
        // already logged by the session
        Err(_) => ExitCode::FAILURE,
    }
}
