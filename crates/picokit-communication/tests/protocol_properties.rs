use picokit_communication::{format_command, parse_reply, Command};
use proptest::prelude::*;

proptest! {
    // Every valid (address, axis, value) triple serializes to the exact
    // wire grammar: "{addr}>{axis}{mnemonic}{value}\r".
    #[test]
    fn format_grammar_with_axis_and_value(
        address in 1u8..=2,
        axis in 1u8..=4,
        value in any::<i32>(),
    ) {
        let value_str = value.to_string();
        let cmd = format_command(Command::MoveAbsolute, address, Some(axis), Some(&value_str))
            .unwrap();
        prop_assert_eq!(cmd, format!("{}>{}PA{}\r", address, axis, value));
    }

    // Omitting the axis drops the axis digit; omitting the value drops
    // the value segment.
    #[test]
    fn format_grammar_without_axis(address in 1u8..=2, value in 0u8..=2) {
        let value_str = value.to_string();
        let cmd = format_command(Command::ScanBus, address, None, Some(&value_str)).unwrap();
        prop_assert_eq!(cmd, format!("{}>SC{}\r", address, value));
    }

    #[test]
    fn format_grammar_without_value(address in 1u8..=2, axis in 1u8..=4) {
        let cmd = format_command(Command::QueryPosition, address, Some(axis), None).unwrap();
        prop_assert_eq!(cmd, format!("{}>{}TP?\r", address, axis));
    }

    // Addresses and axes outside their domains always fail, for every
    // command in the table.
    #[test]
    fn format_rejects_bad_addresses(address in 3u8.., axis in 1u8..=4) {
        for command in Command::ALL {
            prop_assert!(format_command(command, address, Some(axis), None).is_err());
        }
    }

    #[test]
    fn format_rejects_bad_axes(address in 1u8..=2, axis in 5u8..) {
        for command in Command::ALL {
            prop_assert!(format_command(command, address, Some(axis), None).is_err());
        }
    }

    // Round trip: any printable-ASCII payload echoed back under the wire
    // framing parses to itself.
    #[test]
    fn parse_reply_round_trip(
        address in 1u8..=2,
        payload in "[ -~]*[!-~]",
    ) {
        let raw = format!("{}>{}\r\n", address, payload);
        prop_assert_eq!(parse_reply(raw.as_bytes()).unwrap(), payload);
    }
}
