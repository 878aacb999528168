use ffb_core::{
    overlay::{Direction, PushbackSquare, TrackNumber},
    Coordinate, PlayerState,
};
use strum::EnumDiscriminants;

use crate::{derive_api_data, impl_payloads, DialogParameter, Side};

derive_api_data! {
    /// An incremental change to the game model. Kinds this client does not
    /// know decode to [`ModelChange::Unknown`].
    #[derive(EnumDiscriminants)]
    #[strum_discriminants(name(ModelChangeKind), derive(Hash))]
    #[serde(tag = "modelChangeId", rename_all = "camelCase")]
    pub enum ModelChange {
        PlayerSetCoordinate(PlayerSetCoordinate),
        PlayerSetState(PlayerSetState),
        PlayerResultSetCurrentSpps(PlayerResultSetCurrentSpps),
        FieldModelSetBallCoordinate(FieldModelSetBallCoordinate),
        FieldModelSetBallInPlay(FieldModelSetBallInPlay),
        FieldModelSetBallMoving(FieldModelSetBallMoving),
        FieldModelAddPushbackSquare(FieldModelAddPushbackSquare),
        FieldModelRemovePushbackSquare(FieldModelRemovePushbackSquare),
        FieldModelAddTrackNumber(FieldModelAddTrackNumber),
        FieldModelRemoveTrackNumber(FieldModelRemoveTrackNumber),
        ActingPlayerSetPlayerId(ActingPlayerSetPlayerId),
        ActingPlayerSetCurrentMove(ActingPlayerSetCurrentMove),
        ActingPlayerSetPlayerAction(ActingPlayerSetPlayerAction),
        ActingPlayerSetGoingForIt(ActingPlayerSetGoingForIt),
        ActingPlayerSetHasBlocked(ActingPlayerSetHasBlocked),
        GameSetHalf(GameSetHalf),
        GameSetHomePlaying(GameSetHomePlaying),
        GameSetTurnMode(GameSetTurnMode),
        TurnDataSetTurnNr(TurnDataSetTurnNr),
        GameResultSetScore(GameResultSetScore),
        GameSetDialogParameter(GameSetDialogParameter),
        #[serde(other)]
        Unknown,
    }

    pub struct PlayerSetCoordinate {
        #[serde(rename = "modelChangeKey")]
        pub player_id: String,
        #[serde(rename = "modelChangeValue")]
        pub coordinate: Option<Coordinate>,
    }
    pub struct PlayerSetState {
        #[serde(rename = "modelChangeKey")]
        pub player_id: String,
        #[serde(rename = "modelChangeValue")]
        pub state: PlayerState,
    }
    pub struct PlayerResultSetCurrentSpps {
        #[serde(rename = "modelChangeKey")]
        pub player_id: String,
        #[serde(rename = "modelChangeValue")]
        pub spps: i32,
    }

    pub struct FieldModelSetBallCoordinate {
        #[serde(rename = "modelChangeValue")]
        pub coordinate: Option<Coordinate>,
    }
    pub struct FieldModelSetBallInPlay {
        #[serde(rename = "modelChangeValue")]
        pub in_play: bool,
    }
    pub struct FieldModelSetBallMoving {
        #[serde(rename = "modelChangeValue")]
        pub moving: bool,
    }
    pub struct FieldModelAddPushbackSquare {
        #[serde(rename = "modelChangeValue")]
        pub square: PushbackSquareData,
    }
    pub struct FieldModelRemovePushbackSquare {
        #[serde(rename = "modelChangeValue")]
        pub square: PushbackSquareData,
    }
    pub struct FieldModelAddTrackNumber {
        #[serde(rename = "modelChangeValue")]
        pub track_number: TrackNumberData,
    }
    pub struct FieldModelRemoveTrackNumber {
        #[serde(rename = "modelChangeValue")]
        pub track_number: TrackNumberData,
    }

    pub struct ActingPlayerSetPlayerId {
        #[serde(rename = "modelChangeValue")]
        pub player_id: Option<String>,
    }
    pub struct ActingPlayerSetCurrentMove {
        #[serde(rename = "modelChangeValue")]
        pub current_move: i32,
    }
    pub struct ActingPlayerSetPlayerAction {
        #[serde(rename = "modelChangeValue")]
        pub player_action: Option<String>,
    }
    pub struct ActingPlayerSetGoingForIt {
        #[serde(rename = "modelChangeValue")]
        pub going_for_it: bool,
    }
    pub struct ActingPlayerSetHasBlocked {
        #[serde(rename = "modelChangeValue")]
        pub has_blocked: bool,
    }

    pub struct GameSetHalf {
        #[serde(rename = "modelChangeValue")]
        pub half: i32,
    }
    pub struct GameSetHomePlaying {
        #[serde(rename = "modelChangeValue")]
        pub home_playing: bool,
    }
    pub struct GameSetTurnMode {
        #[serde(rename = "modelChangeValue")]
        pub turn_mode: String,
    }
    pub struct TurnDataSetTurnNr {
        #[serde(rename = "modelChangeKey")]
        pub side: Side,
        #[serde(rename = "modelChangeValue")]
        pub turn_nr: i32,
    }
    pub struct GameResultSetScore {
        #[serde(rename = "modelChangeKey")]
        pub side: Side,
        #[serde(rename = "modelChangeValue")]
        pub score: i32,
    }
    pub struct GameSetDialogParameter {
        #[serde(rename = "modelChangeValue")]
        pub dialog: Option<DialogParameter>,
    }

    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct PushbackSquareData {
        pub coordinate: Coordinate,
        pub direction: String,
        pub selected: bool,
        pub locked: bool,
        pub home_choice: bool,
    }
    #[derive(Default)]
    #[serde(rename_all = "camelCase", default)]
    pub struct TrackNumberData {
        pub coordinate: Coordinate,
        pub number: i32,
    }
}

impl_payloads! {
    ModelChange => ModelChangeKind {
        PlayerSetCoordinate,
        PlayerSetState,
        PlayerResultSetCurrentSpps,
        FieldModelSetBallCoordinate,
        FieldModelSetBallInPlay,
        FieldModelSetBallMoving,
        FieldModelAddPushbackSquare,
        FieldModelRemovePushbackSquare,
        FieldModelAddTrackNumber,
        FieldModelRemoveTrackNumber,
        ActingPlayerSetPlayerId,
        ActingPlayerSetCurrentMove,
        ActingPlayerSetPlayerAction,
        ActingPlayerSetGoingForIt,
        ActingPlayerSetHasBlocked,
        GameSetHalf,
        GameSetHomePlaying,
        GameSetTurnMode,
        TurnDataSetTurnNr,
        GameResultSetScore,
        GameSetDialogParameter,
    }
}

impl From<&PushbackSquareData> for PushbackSquare {
    fn from(data: &PushbackSquareData) -> Self {
        PushbackSquare {
            coordinate: data.coordinate,
            direction: Direction::from_tag(&data.direction).unwrap_or_default(),
            selected: data.selected,
            locked: data.locked,
            home_choice: data.home_choice,
        }
    }
}

impl From<&TrackNumberData> for TrackNumber {
    fn from(data: &TrackNumberData) -> Self {
        TrackNumber {
            coordinate: data.coordinate,
            number: data.number,
        }
    }
}
