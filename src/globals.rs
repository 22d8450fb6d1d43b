use once_cell::sync::OnceCell;

use crate::config::CoreConfig;
use crate::domains::core::AccessCore;
use crate::errors::{ServiceError, ServiceResult};

// The one constructed core behind the C interface. Rust callers build and
// own their own `AccessCore` instead.
static ACCESS_CORE: OnceCell<AccessCore> = OnceCell::new();

/// Builds the process-wide core from `config`. A second call keeps the
/// first core and returns a configuration error.
pub fn initialize(config: CoreConfig) -> ServiceResult<()> {
    init_logging();

    let core = AccessCore::from_config(config)?;
    ACCESS_CORE.set(core).map_err(|_| {
        log::warn!("Access core already initialized; ignoring new configuration");
        ServiceError::Configuration("Access core is already initialized".to_string())
    })?;

    log::info!(
        "Access core initialized ({} permission entries)",
        get_core()?.permissions().table().len()
    );
    Ok(())
}

pub fn get_core() -> ServiceResult<&'static AccessCore> {
    ACCESS_CORE.get().ok_or(ServiceError::NotInitialized)
}

pub fn is_initialized() -> bool {
    ACCESS_CORE.get().is_some()
}

fn init_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    // The host may have installed a logger already
    let _ = env_logger::Builder::from_env(env).try_init();
}
