mod _fixtures;

use std::sync::Arc;
use std::thread;

use _fixtures::{
    bond, cash, cash_schema, hex_bytes, holding, registry, sample_transfer, Transfer, BOND, CASH,
    HOLDING, TRANSFER,
};
use insta::assert_snapshot;
use rpp_witness::{
    CodecConfig, DecodingError, EncodingError, Error, Schema, SchemaError, TypeRegistry, TypeTag,
    Witness,
};

#[test]
fn union_variants_of_different_sizes_encode_to_equal_lengths() {
    _fixtures::init_tracing();
    let with_cash = holding("bob", "Cash", cash(10, "EUR"));
    let with_bond = holding("bob", "Bond", bond("ACME", 5, 2030));

    let cash_bytes = registry().encode("Holding", &with_cash, CodecConfig::BYTES).unwrap();
    let bond_bytes = registry().encode("Holding", &with_bond, CodecConfig::BYTES).unwrap();
    assert_eq!(cash_bytes.len(), 48);
    assert_eq!(bond_bytes.len(), 48);

    assert_snapshot!(hex_bytes(&cash_bytes), @"00000003626f62ffffffffff00000010000000000000000a000000034555520000000000000000000000000000000000");
    assert_snapshot!(hex_bytes(&bond_bytes), @"00000003626f62ffffffffff000000110000000441434d45ffffffffffffffffffffffff0000000500000000000007ee");

    assert_eq!(
        registry().decode("Holding", &cash_bytes, CodecConfig::BYTES).unwrap(),
        with_cash
    );
    assert_eq!(
        registry().decode("Holding", &bond_bytes, CodecConfig::BYTES).unwrap(),
        with_bond
    );
}

#[test]
fn equal_lengths_hold_in_bits_too() {
    let codec = registry().codec("Holding", CodecConfig::BITS).unwrap();
    for value in [
        holding("", "Cash", cash(-1, "")),
        holding("carol", "Bond", bond("", 0, 0)),
    ] {
        let bits = codec.encode(&value).unwrap();
        assert_eq!(bits.len(), 384);
        assert_eq!(codec.decode(&bits).unwrap(), value);
    }
}

#[test]
fn union_padding_must_be_zero() {
    let mut bytes = registry()
        .encode("Holding", &holding("bob", "Cash", cash(10, "EUR")), CodecConfig::BYTES)
        .unwrap();
    bytes[47] = 1;
    let err = registry()
        .decode("Holding", &bytes, CodecConfig::BYTES)
        .expect_err("dirty union padding");
    assert!(matches!(
        err,
        Error::Decoding(DecodingError::CorruptPadding { ref path }) if path == "Holding.asset.Cash"
    ));
}

#[test]
fn tampered_bit_encodings_are_rejected() {
    let bits = registry()
        .encode("Holding", &holding("bob", "Cash", cash(10, "EUR")), CodecConfig::BITS)
        .unwrap();

    let mut not_a_bit = bits.clone();
    not_a_bit[100] = 2;
    assert_eq!(
        registry().decode("Holding", &not_a_bit, CodecConfig::BITS),
        Err(Error::Decoding(DecodingError::InvalidBit {
            path: "Holding.asset".into(),
            value: 2
        }))
    );

    // Cash (0x10) and Bond (0x11) differ in the last tag bit only.
    let mut retagged = bits;
    assert_eq!(retagged[127], 0);
    retagged[127] = 1;
    assert_eq!(
        registry().decode("Holding", &retagged, CodecConfig::BITS),
        Err(Error::Decoding(DecodingError::CorruptPadding {
            path: "Holding.asset.Bond.issuer".into()
        }))
    );
}

#[test]
fn unknown_or_foreign_tags_are_rejected() {
    let bytes = registry()
        .encode("Holding", &holding("bob", "Cash", cash(10, "EUR")), CodecConfig::BYTES)
        .unwrap();
    for tag in [0x99u8, HOLDING.0 as u8] {
        let mut tampered = bytes.clone();
        tampered[15] = tag;
        let err = registry()
            .decode("Holding", &tampered, CodecConfig::BYTES)
            .expect_err("tag outside the union");
        assert_eq!(
            err,
            Error::Decoding(DecodingError::UnknownTag {
                path: "Holding.asset".into(),
                tag: u32::from(tag)
            })
        );
    }
}

#[test]
fn only_declared_variants_are_encodable() {
    let value = holding("bob", "Transfer", sample_transfer().to_value());
    let err = registry()
        .encode("Holding", &value, CodecConfig::BYTES)
        .expect_err("Transfer is not an Asset");
    assert_eq!(
        err,
        EncodingError::NotAVariant {
            path: "Holding.asset".into(),
            name: "Transfer".into()
        }
    );
}

#[test]
fn tags_and_names_are_bijective() {
    let registry = registry();
    assert_eq!(registry.len(), 4);
    for (name, tag) in [("Cash", CASH), ("Bond", BOND), ("Holding", HOLDING), ("Transfer", TRANSFER)] {
        let by_name = registry.lookup(name).unwrap();
        assert_eq!(by_name.tag(), tag);
        assert_eq!(registry.lookup_tag(tag).unwrap().name(), name);
    }
    assert_eq!(
        registry.tags().collect::<Vec<_>>(),
        vec![CASH, BOND, HOLDING, TRANSFER]
    );
    assert_eq!(TypeTag(0x20).to_string(), "0x00000020");
}

#[test]
fn unknown_lookups_fail_loudly() {
    assert_eq!(
        registry().lookup("Stock").map(|entry| entry.tag()),
        Err(EncodingError::UnregisteredType {
            name: "Stock".into()
        })
    );
    assert_eq!(
        registry().lookup_tag(TypeTag(0xdead)).map(|entry| entry.tag()),
        Err(DecodingError::UnknownTag {
            path: "type_tag".into(),
            tag: 0xdead
        })
    );
    let err = registry().lookup_tag(TypeTag(9)).map(|entry| entry.tag()).unwrap_err();
    assert_snapshot!(err.to_string(), @"unknown type tag 9 at `type_tag`");
    assert!(matches!(
        registry().decode("Stock", &[], CodecConfig::BYTES),
        Err(Error::Encoding(EncodingError::UnregisteredType { .. }))
    ));
}

#[test]
fn registration_fails_fast() {
    let mut builder = TypeRegistry::builder();
    builder.register("Cash", CASH, cash_schema()).unwrap();

    assert_eq!(
        builder.register("Cash", TypeTag(99), cash_schema()).err(),
        Some(SchemaError::DuplicateType {
            name: "Cash".into()
        })
    );
    assert_eq!(
        builder.register("Coin", CASH, cash_schema()).err(),
        Some(SchemaError::DuplicateTag {
            tag: CASH.0,
            name: "Coin".into(),
            existing: "Cash".into()
        })
    );
    assert_eq!(
        builder
            .register("Blob", TypeTag(98), Schema::unbounded_list(Schema::byte()))
            .err(),
        Some(SchemaError::MissingCapacity {
            path: "Blob".into()
        })
    );
    assert_eq!(builder.len(), 1);
    assert_eq!(builder.seal().unwrap().len(), 1);
}

#[test]
fn seal_rejects_unions_over_missing_types() {
    let mut builder = TypeRegistry::builder();
    builder
        .register("Holding", HOLDING, _fixtures::holding_schema())
        .unwrap()
        .register("Cash", CASH, cash_schema())
        .unwrap();
    assert_eq!(
        builder.seal().err(),
        Some(SchemaError::UnknownType {
            path: "Holding.asset.Bond".into(),
            name: "Bond".into()
        })
    );
}

#[test]
fn typed_witnesses_round_trip() {
    let transfer = sample_transfer();
    for config in [CodecConfig::BYTES, CodecConfig::BITS] {
        let bytes = registry().encode_witness(&transfer, config).unwrap();
        assert_eq!(bytes.len(), registry().lookup("Transfer").unwrap().static_size(config.representation));
        let back: Transfer = registry().decode_witness(&bytes, config).unwrap();
        assert_eq!(back, transfer);
    }

    let too_many_hops = Transfer {
        hops: vec![1, 2, 3, 4, 5],
        ..sample_transfer()
    };
    assert!(matches!(
        registry().encode_witness(&too_many_hops, CodecConfig::BYTES),
        Err(EncodingError::CapacityExceeded { ref path, actual: 5, allowed: 4 }) if path == "Transfer.hops"
    ));
}

#[test]
fn sealed_registry_is_shared_across_threads() {
    let registry = Arc::new(registry().clone());
    let handles: Vec<_> = (0..4i64)
        .map(|n| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let value = holding("t", "Cash", cash(n, "USD"));
                let bytes = registry.encode("Holding", &value, CodecConfig::BYTES).unwrap();
                (value, registry.decode("Holding", &bytes, CodecConfig::BYTES).unwrap())
            })
        })
        .collect();
    for handle in handles {
        let (value, decoded) = handle.join().unwrap();
        assert_eq!(value, decoded);
    }
}
