//! Deterministic tick fingerprint generator used for cross-host comparison.

use cheat_core::{
    ArCode, ArEntry, CodeStore, CollectedReports, GuestMemory, MainRam, MAIN_RAM_START,
};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn code(name: &str, ops: &[(u32, u32)]) -> ArCode {
    ArCode {
        name: name.into(),
        active: true,
        user_defined: false,
        ops: ops.iter().map(|&(a, v)| ArEntry::new(a, v)).collect(),
    }
}

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let mut ram = MainRam::new();
    ram.write_u16(0x8020_0000, 0x1234);
    for (i, byte) in [0xDE, 0xAD, 0xBE, 0xEF, 0xCA].iter().enumerate() {
        ram.write_u8(0x8040_0000 + i as u32, *byte);
    }

    let store = CodeStore::new();
    store.set_cheats_enabled(true);
    store.apply_codes(&[
        // Byte fill across an 11-byte span.
        code("fill", &[(0x0010_0000, 0x0000_0AFF)]),
        // Half-word conditional gating a word write.
        code(
            "gate",
            &[(0x0A20_0000, 0x0000_1234), (0x0430_0000, 0xCAFE_BABE)],
        ),
        // Composite copy of the seeded bytes.
        code("copy", &[(0, 0x8650_0000), (0x0040_0000, 0x0000_0005)]),
        // Strided fill walking up from the copy destination.
        code("slide", &[(0, 0x8051_0000), (0x0000_0010, 0x0104_0002)]),
    ]);

    let mut reports = CollectedReports::new();
    store.run_all_active(&mut ram, &mut reports);

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    for addr in (0..0x0060_0000).step_by(4) {
        let word = ram.read_u32(MAIN_RAM_START + addr);
        if word != 0 {
            hash_bytes(&mut hash, &addr.to_le_bytes());
            hash_bytes(&mut hash, &word.to_le_bytes());
        }
    }
    hash_bytes(&mut hash, &[store.active_codes().len() as u8]);
    hash_bytes(&mut hash, &[reports.errors.len() as u8]);

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
