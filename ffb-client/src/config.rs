use anyhow::Context as _;
use api::GameId;
use getset::Getters;

const DEFAULT_LOG: &str = "ffb_client=debug,ffb_replay=debug";

/// Runtime settings, read from the environment (and `.env` if present).
///
/// - `FFB_LOG`: tracing filter directives
/// - `FFB_COACH_NAME`: name this client announces itself with
/// - `FFB_GAME_ID`: game to spectate when none is given on the command line
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct ClientConfig {
    log: String,
    coach_name: Option<String>,
    game_id: Option<GameId>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log: DEFAULT_LOG.to_string(),
            coach_name: None,
            game_id: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let game_id = match non_empty("FFB_GAME_ID") {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<GameId>()
                    .with_context(|| format!("FFB_GAME_ID={value:?} is not a game id"))?,
            ),
            None => None,
        };
        Ok(Self {
            log: non_empty("FFB_LOG").unwrap_or_else(|| DEFAULT_LOG.to_string()),
            coach_name: non_empty("FFB_COACH_NAME"),
            game_id,
        })
    }
}
