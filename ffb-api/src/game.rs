use ffb_core::{Coordinate, Gender, PlayerState};

use crate::derive_api_data;

derive_api_data! {
    #[derive(Copy, PartialEq, Eq, Hash, Default)]
    #[derive(derive_more::Display, derive_more::FromStr)]
    #[serde(transparent)]
    pub struct GameId(pub i64);

    #[derive(Copy, PartialEq, Eq, Hash)]
    #[serde(rename_all = "lowercase")]
    pub enum Side {
        Home,
        Away,
    }
}

derive_api_data! {
    /// Full state of a game, enough to rebuild the model from nothing.
    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct GameData {
        pub half: i32,
        pub turn_mode: String,
        pub home_playing: bool,
        pub team_home: TeamData,
        pub team_away: TeamData,
        pub turn_data_home: TurnData,
        pub turn_data_away: TurnData,
        pub field_model: FieldModelData,
        pub game_result: GameResultData,
        pub acting_player: ActingPlayerData,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct TeamData {
        pub team_id: String,
        pub team_name: String,
        pub coach: String,
        pub fan_factor: i32,
        pub roster: RosterData,
        pub player_array: Vec<PlayerData>,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct RosterData {
        pub roster_id: Option<String>,
        pub position_array: Vec<RosterPositionData>,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct RosterPositionData {
        pub position_id: String,
        pub shorthand: String,
        pub position_name: String,
        pub url_icon_set: Option<String>,
        pub url_portrait: Option<String>,
        pub skill_array: Option<Vec<SkillData>>,
    }

    #[derive(Default)]
    pub struct SkillData {
        pub key: String,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct PlayerData {
        pub player_id: String,
        pub player_name: String,
        pub player_gender: Option<Gender>,
        pub position_id: String,
        pub movement: i32,
        pub strength: i32,
        pub agility: i32,
        pub armour: i32,
        pub url_portrait: Option<String>,
        pub skill_array: Option<Vec<SkillData>>,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct TurnData {
        pub turn_nr: i32,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct FieldModelData {
        pub ball_coordinate: Option<Coordinate>,
        pub ball_in_play: bool,
        pub ball_moving: bool,
        pub player_data_array: Vec<FieldPlayerData>,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct FieldPlayerData {
        pub player_id: String,
        pub player_coordinate: Option<Coordinate>,
        pub player_state: PlayerState,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct GameResultData {
        pub team_result_home: TeamResultData,
        pub team_result_away: TeamResultData,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct TeamResultData {
        pub score: i32,
        pub fame: i32,
        pub player_results: Vec<PlayerResultData>,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct PlayerResultData {
        pub player_id: String,
        pub current_spps: i32,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ActingPlayerData {
        pub player_id: Option<String>,
        pub current_move: i32,
        pub player_action: Option<String>,
        pub going_for_it: bool,
        pub has_blocked: bool,
    }
}

impl SkillData {
    pub fn keys(skills: &Option<Vec<SkillData>>) -> impl Iterator<Item = String> + '_ {
        skills.iter().flatten().map(|skill| skill.key.clone())
    }
}
