#![doc(test(attr(deny(warnings))))]

//! Client core for a budget tracker: ledger models, the derived-state
//! engines over them, and a cached store that delegates persistence to a
//! remote REST service.

pub mod api;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget tracker core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
