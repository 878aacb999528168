use crate::{derive_api_data, GameData, GameId, ModelChange, ProtocolError, Report};

derive_api_data! {

/// Messages the server pushes to the client.
#[serde(tag = "netCommandId", rename_all = "camelCase")]
pub enum NetCommand {
    ServerVersion(ServerVersion),
    ServerTalk(ServerTalk),
    ServerSound(ServerSound),
    ServerJoin(ServerJoin),
    ServerLeave(ServerLeave),
    ServerGameState(ServerGameState),
    ServerModelSync(ServerModelSync),
    #[serde(other)]
    Unknown,
}

#[serde(rename_all = "camelCase")]
pub struct ServerVersion {
    pub server_version: String,
    #[serde(default)]
    pub client_version: Option<String>,
}

pub struct ServerTalk {
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub talks: Vec<String>,
}

pub struct ServerSound {
    pub sound: String,
}

#[serde(rename_all = "camelCase")]
pub struct ServerJoin {
    pub coach: String,
    pub client_mode: String,
}

#[serde(rename_all = "camelCase")]
pub struct ServerLeave {
    pub coach: String,
    pub client_mode: String,
}

pub struct ServerGameState {
    pub game: GameData,
}

#[serde(rename_all = "camelCase")]
pub struct ServerModelSync {
    #[serde(default)]
    pub model_change_list: ModelChangeList,
    #[serde(default)]
    pub report_list: ReportList,
    #[serde(default)]
    pub sound: Option<String>,
}

#[derive(Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelChangeList {
    #[serde(default)]
    pub model_change_array: Vec<ModelChange>,
}

#[derive(Default)]
pub struct ReportList {
    #[serde(default)]
    pub reports: Vec<Report>,
}

/// Messages the client sends to the server.
#[serde(tag = "netCommandId", rename_all = "camelCase")]
pub enum ClientCommand {
    ClientJoin(ClientJoin),
}

#[serde(rename_all = "camelCase")]
pub struct ClientJoin {
    pub client_mode: String,
    pub game_id: GameId,
    #[serde(default)]
    pub coach: Option<String>,
}

}

impl NetCommand {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}

impl ClientCommand {
    pub fn spectate(game_id: GameId, coach: Option<String>) -> Self {
        ClientCommand::ClientJoin(ClientJoin {
            client_mode: "spectator".to_string(),
            game_id,
            coach,
        })
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, check, let_assert};

    #[test]
    fn decodes_talk() {
        let json = r#"{"netCommandId":"serverTalk","coach":"Alice","talks":["hi","gl"]}"#;
        let_assert!(Ok(NetCommand::ServerTalk(talk)) = NetCommand::from_json(json));
        check!(talk.coach == "Alice");
        check!(talk.talks == vec!["hi", "gl"]);
    }

    #[test]
    fn decodes_model_sync_with_mixed_changes() {
        let json = r#"{
            "netCommandId": "serverModelSync",
            "modelChangeList": {"modelChangeArray": [
                {"modelChangeId": "gameSetHalf", "modelChangeValue": 2},
                {"modelChangeId": "somethingElse", "modelChangeValue": 1}
            ]},
            "reportList": {"reports": [{"reportId": "inducementsBought", "teamId": "th", "gold": 50000}]},
            "sound": "block"
        }"#;
        let_assert!(Ok(NetCommand::ServerModelSync(sync)) = NetCommand::from_json(json));
        let changes = &sync.model_change_list.model_change_array;
        check!(changes.len() == 2);
        assert!(let ModelChange::GameSetHalf(_) = &changes[0]);
        assert!(let ModelChange::Unknown = &changes[1]);
        check!(sync.report_list.reports.len() == 1);
        check!(sync.sound.as_deref() == Some("block"));
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let json = r#"{"netCommandId":"serverPing","timestamp":1}"#;
        let_assert!(Ok(NetCommand::Unknown) = NetCommand::from_json(json));
    }

    #[test]
    fn malformed_command_is_decode_error() {
        let_assert!(Err(ProtocolError::Decode(_)) = NetCommand::from_json("{not json"));
    }

    #[test]
    fn spectate_request_encodes_tag() {
        let_assert!(Ok(json) = ClientCommand::spectate(GameId(42), None).to_json());
        check!(json.contains(r#""netCommandId":"clientJoin""#));
        check!(json.contains(r#""gameId":42"#));
        check!(json.contains(r#""clientMode":"spectator""#));
    }
}
