pub mod config;
pub mod console;
pub mod models;
pub mod services;

use std::sync::Arc;

use console::Output;
use services::{Ledger, Notifier};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub ledger: Arc<Ledger>,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: config::Config, output: Output) -> Self {
        let ledger = Arc::new(Ledger::new(config.conference_tickets));
        let notifier = Notifier::new(config.confirmation_delay(), output);
        Self {
            config,
            ledger,
            notifier,
        }
    }
}
