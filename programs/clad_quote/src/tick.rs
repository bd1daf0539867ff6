//! Tick and tick-array snapshots.
//!
//! The price range of a Globalpool is divided into ticks, and ticks are stored on
//! chain in fixed-size tick arrays of `TICK_ARRAY_SIZE` records spaced `tick_spacing`
//! apart. A tick array starting at `s` covers `[s, s + TICK_ARRAY_SIZE * tick_spacing)`,
//! so a tick on an array boundary belongs to the array that starts there.
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::account_data;
use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

/// Snapshot of a single tick record.
///
/// Only initialized ticks carry meaningful liquidity and fee-growth values; crossing
/// an uninitialized tick leaves the swap state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    pub initialized: bool,
    /// Liquidity added when the price crosses this tick upward
    pub liquidity_net: i128,
    /// Sum of the magnitudes of all position deltas referencing this tick
    pub liquidity_gross: u128,
    /// Liquidity lent to trade positions through this tick
    pub liquidity_borrowed: u128,
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
}

impl Tick {
    /// Re-measures the fee-growth-outside values from the other side of the tick.
    ///
    /// `outside' = global - outside`, wrapping like every fee-growth accumulator.
    pub fn flip_fee_growth_outside(&mut self, fee_growth_global_a: u128, fee_growth_global_b: u128) {
        self.fee_growth_outside_a = fee_growth_global_a.wrapping_sub(self.fee_growth_outside_a);
        self.fee_growth_outside_b = fee_growth_global_b.wrapping_sub(self.fee_growth_outside_b);
    }
}

/// On-chain layout of one tick record (packed, 81 bytes).
#[derive(Copy, Clone, Pod, Zeroable)]
#[repr(C, packed)]
struct TickRaw {
    initialized: u8,
    liquidity_net: i128,
    liquidity_gross: u128,
    liquidity_borrowed: u128,
    fee_growth_outside_a: u128,
    fee_growth_outside_b: u128,
}

impl From<TickRaw> for Tick {
    fn from(raw: TickRaw) -> Self {
        Tick {
            initialized: raw.initialized != 0,
            liquidity_net: raw.liquidity_net,
            liquidity_gross: raw.liquidity_gross,
            liquidity_borrowed: raw.liquidity_borrowed,
            fee_growth_outside_a: raw.fee_growth_outside_a,
            fee_growth_outside_b: raw.fee_growth_outside_b,
        }
    }
}

/// On-chain layout of a tick array account body, after the discriminator.
#[derive(Copy, Clone, Pod, Zeroable)]
#[repr(C, packed)]
struct TickArrayRaw {
    start_tick_index: i32,
    ticks: [TickRaw; TICK_ARRAY_SIZE_USIZE],
    globalpool: [u8; 32],
}

/// Snapshot of a tick array account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickArray {
    /// Address of the account the snapshot was read from
    pub address: Pubkey,
    pub globalpool: Pubkey,
    pub start_tick_index: i32,
    pub ticks: [Tick; TICK_ARRAY_SIZE_USIZE],
}

impl TickArray {
    /// Size of the account body: start index, packed ticks and the pool key.
    pub const LEN: usize = std::mem::size_of::<TickArrayRaw>();

    /// Creates an array with every tick uninitialized.
    pub fn new(address: Pubkey, globalpool: Pubkey, start_tick_index: i32) -> Self {
        TickArray {
            address,
            globalpool,
            start_tick_index,
            ticks: [Tick::default(); TICK_ARRAY_SIZE_USIZE],
        }
    }

    /// Decodes a tick array from raw account bytes.
    ///
    /// # Arguments
    /// * `address` - The account address the bytes were fetched from
    /// * `data` - Full account data, including the 8-byte discriminator
    pub fn try_deserialize(address: Pubkey, data: &[u8]) -> Result<Self> {
        let body = account_data(data, TICK_ARRAY_ACCOUNT_NAME, Self::LEN)?;
        let raw: TickArrayRaw = bytemuck::try_pod_read_unaligned(&body[..Self::LEN])
            .map_err(|_| error!(ErrorCode::AccountDecodeFailed))?;

        let raw_ticks = raw.ticks;
        let mut ticks = [Tick::default(); TICK_ARRAY_SIZE_USIZE];
        for (tick, raw_tick) in ticks.iter_mut().zip(raw_ticks) {
            *tick = Tick::from(raw_tick);
        }

        Ok(TickArray {
            address,
            globalpool: Pubkey::new_from_array(raw.globalpool),
            start_tick_index: raw.start_tick_index,
            ticks,
        })
    }

    /// Encodes the snapshot in the on-chain account layout, discriminator included.
    pub fn to_account_data(&self) -> Vec<u8> {
        let mut raw = TickArrayRaw::zeroed();
        raw.start_tick_index = self.start_tick_index;
        raw.globalpool = self.globalpool.to_bytes();
        let mut raw_ticks = raw.ticks;
        for (raw_tick, tick) in raw_ticks.iter_mut().zip(self.ticks.iter()) {
            *raw_tick = TickRaw {
                initialized: tick.initialized as u8,
                liquidity_net: tick.liquidity_net,
                liquidity_gross: tick.liquidity_gross,
                liquidity_borrowed: tick.liquidity_borrowed,
                fee_growth_outside_a: tick.fee_growth_outside_a,
                fee_growth_outside_b: tick.fee_growth_outside_b,
            };
        }
        raw.ticks = raw_ticks;

        let mut data = crate::state::account_discriminator(TICK_ARRAY_ACCOUNT_NAME).to_vec();
        data.extend_from_slice(bytemuck::bytes_of(&raw));
        data
    }

    /// Number of tick indices covered by one array.
    #[inline]
    pub fn ticks_in_array(tick_spacing: u16) -> i32 {
        TICK_ARRAY_SIZE * tick_spacing as i32
    }

    /// True if this array contains `MIN_TICK_INDEX`.
    pub fn is_min_tick_array(&self) -> bool {
        self.start_tick_index <= MIN_TICK_INDEX
    }

    /// True if this array contains `MAX_TICK_INDEX`.
    pub fn is_max_tick_array(&self, tick_spacing: u16) -> bool {
        self.start_tick_index as i64 + Self::ticks_in_array(tick_spacing) as i64
            > MAX_TICK_INDEX as i64
    }

    /// Checks the start index is a multiple of the array width and lies between the
    /// arrays holding `MIN_TICK_INDEX` and `MAX_TICK_INDEX`.
    ///
    /// Decoding accepts any start index; arrays must pass this before a swap
    /// searches them.
    pub fn check_start_tick_index(&self, tick_spacing: u16) -> Result<()> {
        if tick_spacing == 0 {
            return err!(ErrorCode::InvalidTickSpacing);
        }
        let min_start = get_start_tick_index(MIN_TICK_INDEX, tick_spacing, 0);
        let max_start = get_start_tick_index(MAX_TICK_INDEX, tick_spacing, 0);
        require!(
            self.start_tick_index % Self::ticks_in_array(tick_spacing) == 0
                && (min_start..=max_start).contains(&self.start_tick_index),
            ErrorCode::InvalidTickArrayStartIndex
        );
        Ok(())
    }

    /// Whether `tick_index` lies in `[start, start + ticks_in_array)`, optionally
    /// shifted down by one spacing.
    ///
    /// B→A searches start one spacing above the current tick, so their search range
    /// is shifted: the current tick may sit one spacing below the array.
    pub fn in_search_range(&self, tick_index: i32, tick_spacing: u16, shifted: bool) -> bool {
        let mut lower = self.start_tick_index as i64;
        let mut upper = lower + Self::ticks_in_array(tick_spacing) as i64;
        if shifted {
            lower -= tick_spacing as i64;
            upper -= tick_spacing as i64;
        }
        (lower..upper).contains(&(tick_index as i64))
    }

    /// Whether `tick_index` lies in this array.
    pub fn check_in_array_bounds(&self, tick_index: i32, tick_spacing: u16) -> bool {
        self.in_search_range(tick_index, tick_spacing, false)
    }

    /// Floor offset of `tick_index` from the array start, in tick spacings.
    fn tick_offset(&self, tick_index: i32, tick_spacing: u16) -> Result<isize> {
        if tick_spacing == 0 {
            return err!(ErrorCode::InvalidTickSpacing);
        }
        Ok((tick_index - self.start_tick_index).div_euclid(tick_spacing as i32) as isize)
    }

    /// Finds the next initialized tick in this array in the swap direction.
    ///
    /// A→B searches include the record at `tick_index`'s offset and move down; B→A
    /// searches start at the following record and move up.
    ///
    /// # Returns
    /// * `Ok(Some(tick))` - The next initialized tick index
    /// * `Ok(None)` - The array holds no initialized tick in that direction
    pub fn get_next_init_tick_index(
        &self,
        tick_index: i32,
        tick_spacing: u16,
        a_to_b: bool,
    ) -> Result<Option<i32>> {
        if !self.in_search_range(tick_index, tick_spacing, !a_to_b) {
            return err!(ErrorCode::TickArrayIndexOutOfBounds);
        }

        let mut curr_offset = self.tick_offset(tick_index, tick_spacing)?;
        if !a_to_b {
            curr_offset += 1;
        }

        while (0..TICK_ARRAY_SIZE as isize).contains(&curr_offset) {
            if self.ticks[curr_offset as usize].initialized {
                return Ok(Some(
                    self.start_tick_index + curr_offset as i32 * tick_spacing as i32,
                ));
            }
            curr_offset = if a_to_b { curr_offset - 1 } else { curr_offset + 1 };
        }

        Ok(None)
    }

    /// Returns the tick record at `tick_index`.
    ///
    /// The index must be in this array and a multiple of the tick spacing.
    pub fn get_tick(&self, tick_index: i32, tick_spacing: u16) -> Result<&Tick> {
        let offset = self.tick_slot(tick_index, tick_spacing)?;
        Ok(&self.ticks[offset])
    }

    /// Mutable access for building fixtures.
    pub fn get_tick_mut(&mut self, tick_index: i32, tick_spacing: u16) -> Result<&mut Tick> {
        let offset = self.tick_slot(tick_index, tick_spacing)?;
        Ok(&mut self.ticks[offset])
    }

    fn tick_slot(&self, tick_index: i32, tick_spacing: u16) -> Result<usize> {
        if tick_spacing == 0 {
            return err!(ErrorCode::InvalidTickSpacing);
        }
        if !self.check_in_array_bounds(tick_index, tick_spacing)
            || tick_index % tick_spacing as i32 != 0
        {
            return err!(ErrorCode::TickArrayIndexOutOfBounds);
        }
        Ok(self.tick_offset(tick_index, tick_spacing)? as usize)
    }
}

/// Start index of the tick array containing `tick_index`, moved by `offset` arrays.
///
/// # Example
///
/// ```
/// use clad_quote::tick::get_start_tick_index;
/// assert_eq!(get_start_tick_index(0, 64, 0), 0);
/// assert_eq!(get_start_tick_index(-1, 64, 0), -5632);
/// assert_eq!(get_start_tick_index(100, 64, 1), 5632);
/// ```
pub fn get_start_tick_index(tick_index: i32, tick_spacing: u16, offset: i32) -> i32 {
    let ticks_in_array = TickArray::ticks_in_array(tick_spacing);
    let real_index = tick_index.div_euclid(ticks_in_array);
    (real_index + offset) * ticks_in_array
}
