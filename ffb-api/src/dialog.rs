use strum::EnumDiscriminants;

use crate::{derive_api_data, impl_payloads};

derive_api_data! {
    /// Parameters of the dialog the server currently shows the acting coach.
    #[derive(EnumDiscriminants)]
    #[strum_discriminants(name(DialogKind), derive(Hash))]
    #[serde(tag = "dialogId", rename_all = "camelCase")]
    pub enum DialogParameter {
        BlockRoll(BlockRoll),
        #[serde(other)]
        Unknown,
    }

    #[serde(rename_all = "camelCase")]
    pub struct BlockRoll {
        #[serde(default)]
        pub choosing_team_id: Option<String>,
        #[serde(default)]
        pub nr_of_dice: i32,
        #[serde(default)]
        pub block_roll: Vec<i32>,
    }
}

impl_payloads! {
    DialogParameter => DialogKind {
        BlockRoll,
    }
}
