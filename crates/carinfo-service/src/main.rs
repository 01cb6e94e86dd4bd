//! `carinfod` – CarInfo battery telemetry daemon.
//!
//! The process entry point for the CarInfo stack.  It:
//!
//! 1. Initialises structured logging from `RUST_LOG`
//!    (`CARINFO_LOG_FORMAT=json` switches to newline-delimited JSON).
//! 2. Loads `~/.carinfo/config.toml`, falling back to defaults.
//! 3. Wires the simulated battery sensor into a
//!    [`BatteryInfoPublisher`] and registers it with the middleware runtime.
//! 4. Refreshes and publishes on a fixed interval until **Ctrl-C**.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use carinfo_hal::SimBatterySensor;
use carinfo_middleware::{Attribute, Runtime};
use carinfo_service::config;
use carinfo_service::publisher::BatteryInfoPublisher;

#[tokio::main]
async fn main() {
    // ── Structured logging ────────────────────────────────────────────────
    // Initialise tracing-subscriber using RUST_LOG (defaults to "info").
    // Set CARINFO_LOG_FORMAT=json to emit newline-delimited JSON logs
    // suitable for log aggregators.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("CARINFO_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    // ── Configuration ─────────────────────────────────────────────────────
    let (cfg, load_error) = config::load_or_default();
    if let Some(e) = load_error {
        warn!(error = %e, "config unreadable, using defaults");
    }
    info!(
        domain = %cfg.domain,
        instance = %cfg.instance,
        publish_period_ms = cfg.publish_period_ms,
        "carinfod starting"
    );

    // ── Wiring ────────────────────────────────────────────────────────────
    let runtime = Arc::new(Runtime::new());
    let battery = Attribute::new("battery");
    let sensor = SimBatterySensor::new(&cfg.sensor_id);
    let publisher = Arc::new(BatteryInfoPublisher::new(Box::new(sensor), battery));

    if !Arc::clone(&publisher).register_service(&runtime, &cfg.domain, &cfg.instance) {
        error!(
            domain = %cfg.domain,
            instance = %cfg.instance,
            "service registration failed"
        );
        std::process::exit(1);
    }

    // ── Publish loop ──────────────────────────────────────────────────────
    let mut ticker = tokio::time::interval(Duration::from_millis(cfg.publish_period_ms.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Ctrl-C received, shutting down");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = publisher.refresh() {
                    warn!(error = %e, "sensor refresh failed, skipping publish");
                    continue;
                }
                let notified = publisher.publish_from_sensor();
                if let Some(reading) = publisher.battery() {
                    if reading.is_critical() {
                        error!(level = reading.level, "battery critically low");
                    } else if reading.is_low() {
                        warn!(level = reading.level, "battery low");
                    }
                    debug!(
                        level = reading.level,
                        voltage = reading.voltage,
                        current = reading.current,
                        consumption = reading.consumption,
                        notified,
                        "published battery reading"
                    );
                }
            }
        }
    }

    runtime.unregister_service(&cfg.domain, &cfg.instance);
    info!("carinfod stopped");
}
