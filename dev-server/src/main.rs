//! Development server for the catalog client
//!
//! Serves the mock api seeded with the fixture catalog, so the client can be
//! run against something without a real backend.
//!
//! Binds to `IP_ADDRESS`:`PORT` (default 127.0.0.1:3001, which matches the
//! client's default `UPNEXT_API_URL`).
//!
//! Usage: cargo run -p dev-server

use actix_web::web;
use anyhow::Result;
use mock_api::{Config, MockStore, Seed, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // silently ignore a missing .env file
    let _ = dotenvy::dotenv();

    let subscriber = telemetry::get_subscriber("info".into());
    telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting catalog development server");

    let seed = test_helpers::mock::seed();
    print_summary(&seed);

    let mut config = Config::from_env()?;
    let store = web::Data::new(MockStore::new(seed));
    let server = mock_api::build(&mut config, store)?;

    info!("🎯 Development server ready!");
    info!("   API: http://{}:{}/api", config.ip, config.port);
    info!(
        "   Client: UPNEXT_API_URL=http://{}:{}/api",
        config.ip, config.port
    );
    info!("👋 Press Ctrl+C to shutdown");

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                telemetry::log_error(e);
                anyhow::bail!("Development server stopped unexpectedly");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutting down development server");
        }
    }
    Ok(())
}

fn print_summary(seed: &Seed) {
    info!("📊 Fixture catalog:");
    info!("   {} institutions", seed.institutions.len());
    for program in &seed.programs {
        info!(
            "   program {}: {} ({}, {})",
            program.id, program.title, program.level, program.format
        );
    }
    for user in &seed.users {
        info!("   user {}: {}", user.id, user.name);
    }
}
