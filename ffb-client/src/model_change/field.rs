use api::{
    FieldModelAddPushbackSquare, FieldModelAddTrackNumber, FieldModelRemovePushbackSquare,
    FieldModelRemoveTrackNumber, FieldModelSetBallCoordinate, FieldModelSetBallInPlay,
    FieldModelSetBallMoving,
};
use ffb_core::{Core, Result};

pub(super) fn set_ball_coordinate(core: &mut Core, change: &FieldModelSetBallCoordinate) -> Result<()> {
    core.ball_mut().coordinate = change.coordinate;
    Ok(())
}

pub(super) fn set_ball_in_play(core: &mut Core, change: &FieldModelSetBallInPlay) -> Result<()> {
    core.ball_mut().in_play = change.in_play;
    Ok(())
}

pub(super) fn set_ball_moving(core: &mut Core, change: &FieldModelSetBallMoving) -> Result<()> {
    core.ball_mut().moving = change.moving;
    Ok(())
}

pub(super) fn add_pushback_square(core: &mut Core, change: &FieldModelAddPushbackSquare) -> Result<()> {
    core.add_pushback_square((&change.square).into());
    Ok(())
}

pub(super) fn remove_pushback_square(
    core: &mut Core,
    change: &FieldModelRemovePushbackSquare,
) -> Result<()> {
    core.remove_pushback_square(change.square.coordinate);
    Ok(())
}

pub(super) fn add_track_number(core: &mut Core, change: &FieldModelAddTrackNumber) -> Result<()> {
    core.add_track_number((&change.track_number).into());
    Ok(())
}

pub(super) fn remove_track_number(core: &mut Core, change: &FieldModelRemoveTrackNumber) -> Result<()> {
    core.remove_track_number(change.track_number.coordinate);
    Ok(())
}
