use api::{BlockRoll, GameSetDialogParameter};
use ffb_core::{Core, Result};

use crate::dispatch::DIALOGS;

pub(super) fn set_dialog_parameter(core: &mut Core, change: &GameSetDialogParameter) -> Result<()> {
    match &change.dialog {
        Some(dialog) => DIALOGS.dispatch(core, dialog).map(|_| ()),
        None => Ok(()),
    }
}

/// Closes the previous dice run, then lays out the new roll in order.
pub(super) fn block_roll(core: &mut Core, dialog: &BlockRoll) -> Result<()> {
    core.add_block_die(0);
    for &roll in &dialog.block_roll {
        core.add_block_die(roll);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use api::{DialogParameter, ModelChange};
    use assert2::{check, let_assert};
    use ffb_core::overlay::BlockDieFace;

    use super::*;
    use crate::dispatch::ApplyChange;

    fn block_roll_change(rolls: Vec<i32>) -> ModelChange {
        GameSetDialogParameter {
            dialog: Some(DialogParameter::BlockRoll(BlockRoll {
                choosing_team_id: Some("th".to_string()),
                nr_of_dice: rolls.len() as i32,
                block_roll: rolls,
            })),
        }
        .into()
    }

    fn active_faces(core: &Core) -> Vec<BlockDieFace> {
        core.block_dice()
            .iter()
            .filter(|die| die.read().active)
            .map(|die| die.read().roll)
            .collect()
    }

    #[test]
    fn block_roll_starts_a_new_run() {
        let mut core = Core::new();
        let_assert!(Ok(()) = core.apply_change(&block_roll_change(vec![6, 2])));
        check!(active_faces(&core) == vec![BlockDieFace::Pow, BlockDieFace::BothDown]);
        check!(core.block_dice().len() == 3);

        let_assert!(Ok(()) = core.apply_change(&block_roll_change(vec![1])));
        check!(active_faces(&core) == vec![BlockDieFace::Skull]);
        check!(core.block_dice().len() == 5);
    }

    #[test]
    fn cleared_or_unknown_dialog_changes_nothing() {
        let mut core = Core::new();
        let change = ModelChange::from(GameSetDialogParameter { dialog: None });
        let_assert!(Ok(()) = core.apply_change(&change));
        let change = ModelChange::from(GameSetDialogParameter {
            dialog: Some(DialogParameter::Unknown),
        });
        let_assert!(Ok(()) = core.apply_change(&change));
        check!(core.block_dice().is_empty());
    }
}
