#![allow(dead_code)]

use std::sync::Arc;
use chrono::{DateTime, Utc};
use gatehouse::notify::MemoryNotifier;
use gatehouse::store::memory::MemoryStore;
use gatehouse::utils::config::Configuration;
use gatehouse::utils::context::ServiceContext;

pub const STRONG_PWD: &str = "Str0ng!Pass1";

///
/// Everything a test needs - the context under test plus direct handles to the
/// in-memory collaborators so assertions can peek behind the service layer.
///
pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<MemoryNotifier>,
}

///
/// The default configuration with the hash cost wound down so tests stay quick.
///
pub fn test_config() -> Configuration {
    Configuration {
        pbkdf2_rounds: 25,
        ..Configuration::default()
    }
}

pub fn start_gatehouse(config: Configuration) -> TestContext {
    gatehouse::init_tracing();

    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = ServiceContext::new(config, store.clone(), notifier.clone())
        .expect("the service context should build");

    TestContext { ctx: Arc::new(ctx), store, notifier }
}

///
/// Fix the service clock - tests travel through lockout and reset windows rather
/// than sleeping through them.
///
pub fn set_time(ctx: &ServiceContext, rfc3339: &str) {
    let fixed: DateTime<Utc> = rfc3339.parse().expect("test date wont parse");
    ctx.set_now(Some(fixed));
}
