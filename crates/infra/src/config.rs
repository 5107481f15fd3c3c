use remindbot_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code external schedulers must present to trigger a reminder dispatch
    pub dispatch_secret_code: String,
    /// Port for the application to run on
    pub port: usize,
}

impl Config {
    pub fn new() -> Self {
        let dispatch_secret_code = match std::env::var("REMINDBOT_DISPATCH_SECRET")
            .ok()
            .filter(|code| !code.is_empty())
        {
            Some(code) => code,
            None => {
                info!("Did not find REMINDBOT_DISPATCH_SECRET environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for dispatching reminders was generated and set to: {}",
                    code
                );
                code
            }
        };
        let default_port = 5000;
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };
        Self {
            dispatch_secret_code,
            port,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
