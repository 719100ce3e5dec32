//! Order packet codec and synthetic book generation.
//!
//! An order is a 49-bit payload, assembled from the LSB:
//! bits 0..32 stock id, bit 32 order side (0 = buy, 1 = sell), bits 33..41
//! quantity, bits 41..49 value. On the wire the payload is bit-stuffed: a 0 is
//! inserted after every run of five consecutive 1s, so six consecutive 1s never
//! occur inside a packet.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Unstuffed payload width in bits.
pub const PAYLOAD_BITS: u32 = 49;

const STOCK_ID_BITS: u32 = 32;
const SIDE_SHIFT: u32 = 32;
const QUANTITY_SHIFT: u32 = 33;
const VALUE_SHIFT: u32 = 41;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Order {
    pub stock_id: u32,
    pub side: Side,
    pub quantity: u8,
    pub value: u8,
}

impl Order {
    /// Pack into the 49-bit layout and apply bit stuffing.
    pub fn encode(&self) -> u64 {
        let mut payload = 0_u64;
        payload |= u64::from(self.stock_id);
        payload |= u64::from(matches!(self.side, Side::Sell)) << SIDE_SHIFT;
        payload |= u64::from(self.quantity) << QUANTITY_SHIFT;
        payload |= u64::from(self.value) << VALUE_SHIFT;
        stuff_bits(payload)
    }

    /// Remove bit stuffing and unpack the 49-bit layout.
    pub fn decode(packet: u64) -> Self {
        let mut payload = unstuff_bits(packet);

        let stock_id = (payload & u64::from(u32::MAX)) as u32;
        payload >>= STOCK_ID_BITS;

        let side = if payload & 1 == 1 { Side::Sell } else { Side::Buy };
        payload >>= 1;

        let quantity = (payload & 0xFF) as u8;
        payload >>= 8;

        let value = (payload & 0xFF) as u8;

        Self { stock_id, side, quantity, value }
    }
}

/// Insert a 0 after every run of five consecutive 1s in the 49-bit payload.
///
/// Worst case adds 9 bits, so the stuffed packet always fits in a `u64`.
pub fn stuff_bits(payload: u64) -> u64 {
    let mut stuffed = 0_u64;
    let mut out_pos = 0_u32;
    let mut consecutive_ones = 0_u32;

    for in_pos in 0..PAYLOAD_BITS {
        let bit = (payload >> in_pos) & 1;

        if bit == 1 {
            stuffed |= 1 << out_pos;
            consecutive_ones += 1;
        } else {
            consecutive_ones = 0;
        }
        out_pos += 1;

        if consecutive_ones == 5 {
            // stuffed 0 is the next output bit; leaving it cleared suffices
            out_pos += 1;
            consecutive_ones = 0;
        }
    }

    stuffed
}

/// Strip stuffed 0 bits, recovering the 49-bit payload.
pub fn unstuff_bits(packet: u64) -> u64 {
    let mut payload = 0_u64;
    let mut out_pos = 0_u32;
    let mut consecutive_ones = 0_u32;

    let mut in_pos = 0_u32;
    while in_pos < u64::BITS && out_pos < PAYLOAD_BITS {
        let bit = (packet >> in_pos) & 1;

        if bit == 1 {
            consecutive_ones += 1;
            payload |= 1 << out_pos;
            out_pos += 1;

            if consecutive_ones == 5 {
                consecutive_ones = 0;
                // skip the stuffed 0 that follows the run
                in_pos += 2;
                continue;
            }
        } else {
            consecutive_ones = 0;
            out_pos += 1;
        }

        in_pos += 1;
    }

    payload
}

/// Generate a deterministic synthetic order book of encoded packets.
///
/// Stock ids are drawn from `1..=min(len / 10, 1000)`, sides uniformly, and
/// quantity and value from `1..=100`, matching the distribution the sweep
/// constants assume.
pub fn generate_order_book(len: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_stock_id = (len / 10).clamp(1, 1000) as u32;

    (0..len)
        .map(|_| {
            let order = Order {
                stock_id: rng.gen_range(1..=max_stock_id),
                side: if rng.gen::<bool>() { Side::Sell } else { Side::Buy },
                quantity: rng.gen_range(1..=100),
                value: rng.gen_range(1..=100),
            };
            order.encode()
        })
        .collect()
}
