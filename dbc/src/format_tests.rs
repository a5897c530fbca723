use super::format::*;
use super::*;

#[test]
fn floats() {
    assert_eq!(format_float(1.0), "1");
    assert_eq!(format_float(0.1), "0.1");
    assert_eq!(format_float(0.5), "0.5");
    assert_eq!(format_float(-40.0), "-40");
    assert_eq!(format_float(0.0), "0");
    assert_eq!(format_float(-0.0), "0");
    assert_eq!(format_float(0.03125), "0.03125");
    assert_eq!(format_float(1.1), "1.1");
    assert_eq!(format_float(65535.0), "65535");

    // Never exponent notation
    assert_eq!(format_float(1e21), "1000000000000000000000");
    assert_eq!(format_float(1e-7), "0.0000001");

    // Shortest representation that reads back exactly
    for v in [0.1, 0.2 + 0.1, 1.0 / 3.0, 123.456, -9.81, f64::MAX, f64::MIN_POSITIVE] {
        assert_eq!(format_float(v).parse::<f64>().unwrap(), v);
    }
}

#[test]
fn uints() {
    assert_eq!(format_uint(0u32), "0");
    assert_eq!(format_uint(100u32), "100");
    assert_eq!(format_uint(0x1FFF_FFFFu32), "536870911");
    assert_eq!(format_uint(u64::MAX), "18446744073709551615");
}

#[test]
fn plain_strings() {
    for policy in [StringPolicy::Escape, StringPolicy::Reject] {
        assert_eq!(format_string("unit", "", policy).unwrap(), r#""""#);
        assert_eq!(format_string("unit", "km/h", policy).unwrap(), r#""km/h""#);
        assert_eq!(
            format_string("label", "Überdruck °C", policy).unwrap(),
            "\"Überdruck °C\""
        );
    }
}

#[test]
fn escaped_strings() {
    assert_eq!(
        format_string("comment", r#"say "hi""#, StringPolicy::Escape).unwrap(),
        r#""say \"hi\"""#
    );
    assert_eq!(
        format_string("comment", r"C:\dbc", StringPolicy::Escape).unwrap(),
        r#""C:\\dbc""#
    );
}

#[test]
fn rejected_strings() {
    assert!(matches!(
        format_string("comment", r#"say "hi""#, StringPolicy::Reject),
        Err(Error::InvalidString {
            field: "comment",
            ..
        })
    ));
    assert!(format_string("comment", r"a\b", StringPolicy::Reject).is_err());

    // Control characters fail under every policy
    for policy in [StringPolicy::Escape, StringPolicy::Reject] {
        assert!(format_string("comment", "line\nbreak", policy).is_err());
        assert!(format_string("comment", "tab\there", policy).is_err());
        assert!(format_string("comment", "nul\0", policy).is_err());
    }
}

#[test]
fn policy_names() {
    assert_eq!("escape".parse::<StringPolicy>(), Ok(StringPolicy::Escape));
    assert_eq!("reject".parse::<StringPolicy>(), Ok(StringPolicy::Reject));
    assert!("strict".parse::<StringPolicy>().is_err());
    assert_eq!(StringPolicy::default(), StringPolicy::Escape);
}
