//! Directional view over the tick arrays a swap may traverse.
//!
//! The sequence holds at most `MAX_SWAP_TICK_ARRAYS` snapshots: the array containing
//! the pool's current tick followed by its neighbours in trade direction. Snapshots
//! are never mutated; ticks crossed during a simulated swap are tracked in a working
//! overlay so later reads see the flipped fee-growth-outside values.
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::tick::{Tick, TickArray};
use anchor_lang::prelude::*;
use log::debug;
use std::collections::BTreeMap;

/// Outcome of a next-initialized-tick search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSearch {
    /// An initialized tick, to be crossed if the price reaches it
    Initialized { array_index: usize, tick_index: i32 },
    /// No initialized tick remains in the sequence; the swap may move at most to
    /// `boundary_tick_index`
    Exhausted { array_index: usize, boundary_tick_index: i32 },
}

impl TickSearch {
    pub fn tick_index(&self) -> i32 {
        match *self {
            TickSearch::Initialized { tick_index, .. } => tick_index,
            TickSearch::Exhausted {
                boundary_tick_index,
                ..
            } => boundary_tick_index,
        }
    }

    pub fn array_index(&self) -> usize {
        match *self {
            TickSearch::Initialized { array_index, .. } => array_index,
            TickSearch::Exhausted { array_index, .. } => array_index,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, TickSearch::Initialized { .. })
    }
}

/// A tick crossed during a simulated swap, with the values the program would write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossedTick {
    pub tick_index: i32,
    pub liquidity_net: i128,
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
}

pub struct TickArraySequence<'a> {
    arrays: Vec<&'a TickArray>,
    touched: Vec<bool>,
    tick_spacing: u16,
    a_to_b: bool,
    /// Working copies of crossed ticks
    working_ticks: BTreeMap<i32, Tick>,
    /// Whether a tick's outside values currently describe the opposite side from
    /// its snapshot; toggled on every crossing
    outside_flipped: BTreeMap<i32, bool>,
}

impl<'a> TickArraySequence<'a> {
    /// Builds the sequence for a swap.
    ///
    /// The first supplied array heads the sequence. The remaining arrays are ordered
    /// in trade direction (descending start index for A→B, ascending for B→A) and
    /// appended while each one starts exactly where the previous one ends; arrays
    /// behind the head or past a gap are ignored. Every supplied array must belong to
    /// the head's pool and start on a valid array boundary.
    ///
    /// # Arguments
    /// * `tick_arrays` - Snapshots supplied by the caller, head first
    /// * `tick_spacing` - The pool's tick spacing
    /// * `a_to_b` - Trade direction
    pub fn new(tick_arrays: &'a [TickArray], tick_spacing: u16, a_to_b: bool) -> Result<Self> {
        require!(tick_spacing > 0, ErrorCode::InvalidTickSpacing);
        let (head, rest) = tick_arrays
            .split_first()
            .ok_or(error!(ErrorCode::InvalidStartingTickArray))?;
        head.check_start_tick_index(tick_spacing)?;
        for array in rest {
            require_keys_eq!(
                array.globalpool,
                head.globalpool,
                ErrorCode::TickArrayPoolMismatch
            );
            array.check_start_tick_index(tick_spacing)?;
        }

        let mut candidates: Vec<&TickArray> = rest.iter().collect();
        candidates.sort_by_key(|array| array.start_tick_index);
        if a_to_b {
            candidates.reverse();
        }

        let ticks_in_array = TickArray::ticks_in_array(tick_spacing);
        let mut arrays = vec![head];
        for array in candidates {
            if arrays.len() == MAX_SWAP_TICK_ARRAYS {
                break;
            }
            let last_start = arrays[arrays.len() - 1].start_tick_index;
            let expected = if a_to_b {
                last_start - ticks_in_array
            } else {
                last_start + ticks_in_array
            };
            let is_ahead = if a_to_b {
                array.start_tick_index < expected
            } else {
                array.start_tick_index > expected
            };
            if array.start_tick_index == expected {
                arrays.push(array);
            } else if is_ahead {
                debug!(
                    "tick array sequence stops at {}: next supplied array starts at {}",
                    last_start, array.start_tick_index
                );
                break;
            }
        }

        Ok(TickArraySequence {
            touched: vec![false; arrays.len()],
            arrays,
            tick_spacing,
            a_to_b,
            working_ticks: BTreeMap::new(),
            outside_flipped: BTreeMap::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Whether the head array holds the pool's current tick.
    ///
    /// B→A swaps search from one spacing above the current tick, so the check is
    /// shifted by one spacing in that direction.
    pub fn is_valid_tick_array_0(&self, tick_current_index: i32) -> bool {
        let shift = if self.a_to_b {
            0
        } else {
            self.tick_spacing as i32
        };
        self.arrays[0].check_in_array_bounds(tick_current_index + shift, self.tick_spacing)
    }

    /// Finds the next initialized tick from `tick_index` in trade direction.
    ///
    /// The search scans across the arrays of the sequence, marking each scanned array
    /// as touched. When none remains it reports the furthest tick the sequence can
    /// reach: `MIN_TICK_INDEX` / `MAX_TICK_INDEX` at the protocol extremes, otherwise
    /// the edge of the last array.
    ///
    /// # Returns
    /// * `Err(TooManyTickArraysTraversed)` if `tick_index` lies beyond every array
    pub fn find_next_initialized_tick(&mut self, tick_index: i32) -> Result<TickSearch> {
        let tick_spacing = self.tick_spacing;
        let a_to_b = self.a_to_b;
        let ticks_in_array = TickArray::ticks_in_array(tick_spacing);

        let mut array_index = self
            .arrays
            .iter()
            .position(|array| array.in_search_range(tick_index, tick_spacing, !a_to_b))
            .ok_or(error!(ErrorCode::TooManyTickArraysTraversed))?;
        let mut search_index = tick_index;

        loop {
            let array = self.arrays[array_index];
            self.touched[array_index] = true;

            if let Some(next) = array.get_next_init_tick_index(search_index, tick_spacing, a_to_b)? {
                return Ok(TickSearch::Initialized {
                    array_index,
                    tick_index: next,
                });
            }

            if a_to_b && array.is_min_tick_array() {
                return Ok(TickSearch::Exhausted {
                    array_index,
                    boundary_tick_index: MIN_TICK_INDEX,
                });
            }
            if !a_to_b && array.is_max_tick_array(tick_spacing) {
                return Ok(TickSearch::Exhausted {
                    array_index,
                    boundary_tick_index: MAX_TICK_INDEX,
                });
            }

            if array_index + 1 == self.arrays.len() {
                let boundary_tick_index = if a_to_b {
                    array.start_tick_index
                } else {
                    array.start_tick_index + ticks_in_array - 1
                };
                return Ok(TickSearch::Exhausted {
                    array_index,
                    boundary_tick_index,
                });
            }

            // Continue from the edge of the next array.
            search_index = if a_to_b {
                array.start_tick_index - 1
            } else {
                array.start_tick_index + ticks_in_array - 1
            };
            array_index += 1;
        }
    }

    /// Current view of the tick at `tick_index`, including crossings made so far.
    pub fn get_tick(&self, tick_index: i32) -> Result<Tick> {
        if let Some(tick) = self.working_ticks.get(&tick_index) {
            return Ok(*tick);
        }
        let array = self
            .arrays
            .iter()
            .find(|array| array.check_in_array_bounds(tick_index, self.tick_spacing))
            .ok_or(error!(ErrorCode::TickArrayIndexOutOfBounds))?;
        Ok(*array.get_tick(tick_index, self.tick_spacing)?)
    }

    /// Crosses the tick at `tick_index`, flipping its fee-growth-outside values
    /// against the given global fee growth.
    pub fn cross_tick(
        &mut self,
        tick_index: i32,
        fee_growth_global_a: u128,
        fee_growth_global_b: u128,
    ) -> Result<CrossedTick> {
        let mut tick = self.get_tick(tick_index)?;
        tick.flip_fee_growth_outside(fee_growth_global_a, fee_growth_global_b);

        let flipped = self.outside_flipped.entry(tick_index).or_insert(false);
        *flipped = !*flipped;
        self.working_ticks.insert(tick_index, tick);

        Ok(CrossedTick {
            tick_index,
            liquidity_net: tick.liquidity_net,
            fee_growth_outside_a: tick.fee_growth_outside_a,
            fee_growth_outside_b: tick.fee_growth_outside_b,
        })
    }

    /// True when the tick was crossed an odd number of times in this simulation.
    pub fn is_outside_flipped(&self, tick_index: i32) -> bool {
        self.outside_flipped.get(&tick_index).copied().unwrap_or(false)
    }

    pub fn get_num_of_touched_arrays(&self) -> usize {
        self.touched.iter().filter(|touched| **touched).count()
    }

    /// Addresses of the touched arrays in traversal order, exactly `array_count` long
    /// unless nothing was touched.
    ///
    /// A swap instruction always takes a fixed number of tick array accounts, so a
    /// shorter list is padded by repeating the last touched array.
    pub fn get_touched_arrays(&self, array_count: usize) -> Vec<Pubkey> {
        let mut result: Vec<Pubkey> = self
            .arrays
            .iter()
            .zip(self.touched.iter())
            .filter(|(_, touched)| **touched)
            .map(|(array, _)| array.address)
            .collect();

        if let Some(last) = result.last().copied() {
            result.resize(array_count, last);
        }
        result
    }
}
