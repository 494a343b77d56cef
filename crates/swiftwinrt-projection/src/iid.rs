//! Interface identifier literals

use swiftwinrt_metadata::Guid;

/// Render a GUID as a Swift `IID(...)` initializer
///
/// Fields are uppercase hex padded to twice their byte width. The clock
/// sequence bytes `d`, `e` form one 16-bit group and the node bytes `f`
/// through `k` one 48-bit group, both big-endian.
pub fn to_iid_initializer(guid: &Guid) -> String {
    let (a, b, c, rest) = guid.as_fields();
    let clock_seq = u16::from_be_bytes([rest[0], rest[1]]);
    let node = rest[2..]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    format!(
        "IID(0x{:08X}, 0x{:04X}, 0x{:04X}, 0x{:04X}, 0x{:012X})",
        a, b, c, clock_seq, node
    )
}
