//! Tick array addresses.
use crate::constants::*;
use crate::tick::get_start_tick_index;
use anchor_lang::prelude::*;

/// Derives the tick array PDA for `start_tick_index`.
///
/// Seeds are `b"tick_array"`, the pool key and the start index as a decimal string.
pub fn get_tick_array_address(program_id: &Pubkey, globalpool: &Pubkey, start_tick_index: i32) -> Pubkey {
    let start = start_tick_index.to_string();
    Pubkey::find_program_address(
        &[TICK_ARRAY_SEED, globalpool.as_ref(), start.as_bytes()],
        program_id,
    )
    .0
}

/// Start indices of the tick arrays a swap from `tick_current_index` may traverse,
/// in trade direction.
///
/// The first array holds the current tick (shifted up by one spacing for B→A). The
/// list stops early at the arrays holding `MIN_TICK_INDEX` / `MAX_TICK_INDEX`.
pub fn get_tick_array_start_indexes_for_swap(
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> Vec<i32> {
    if tick_spacing == 0 {
        return Vec::new();
    }
    let shift = if a_to_b { 0 } else { tick_spacing as i32 };
    let min_start = get_start_tick_index(MIN_TICK_INDEX, tick_spacing, 0);
    let max_start = get_start_tick_index(MAX_TICK_INDEX, tick_spacing, 0);

    let mut starts = Vec::with_capacity(MAX_SWAP_TICK_ARRAYS);
    let mut offset = 0;
    while starts.len() < MAX_SWAP_TICK_ARRAYS {
        let start = get_start_tick_index(
            tick_current_index.saturating_add(shift),
            tick_spacing,
            offset,
        );
        if start < min_start || start > max_start {
            break;
        }
        starts.push(start);
        offset = if a_to_b { offset - 1 } else { offset + 1 };
    }
    starts
}

/// Addresses of the tick arrays a swap needs, in the order `simulate_swap` expects.
pub fn get_tick_array_addresses_for_swap(
    program_id: &Pubkey,
    globalpool: &Pubkey,
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> Vec<Pubkey> {
    get_tick_array_start_indexes_for_swap(tick_current_index, tick_spacing, a_to_b)
        .into_iter()
        .map(|start| get_tick_array_address(program_id, globalpool, start))
        .collect()
}
