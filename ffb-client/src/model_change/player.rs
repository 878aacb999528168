use api::{PlayerResultSetCurrentSpps, PlayerSetCoordinate, PlayerSetState};
use ffb_core::{Core, Result};

pub(super) fn set_coordinate(core: &mut Core, change: &PlayerSetCoordinate) -> Result<()> {
    core.player_mut(&change.player_id)?
        .set_coordinate(change.coordinate);
    Ok(())
}

pub(super) fn set_state(core: &mut Core, change: &PlayerSetState) -> Result<()> {
    core.player_mut(&change.player_id)?.set_state(change.state);
    Ok(())
}

pub(super) fn set_current_spps(core: &mut Core, change: &PlayerResultSetCurrentSpps) -> Result<()> {
    core.player_mut(&change.player_id)?.set_spp(change.spps);
    Ok(())
}
