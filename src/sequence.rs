use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Item;

/// Bumps an entity sequence and returns the new id. Ids start at 1; the
/// sequence itself holds the last id issued, which doubles as the entity count.
pub fn next_id(storage: &mut dyn Storage, seq: &Item<u64>) -> StdResult<u64> {
    let id = seq.may_load(storage)?.unwrap_or_default() + 1;
    seq.save(storage, &id)?;
    Ok(id)
}

pub fn count(storage: &dyn Storage, seq: &Item<u64>) -> StdResult<u64> {
    Ok(seq.may_load(storage)?.unwrap_or_default())
}
