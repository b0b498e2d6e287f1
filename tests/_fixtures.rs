#![allow(dead_code)]
#![allow(unused_imports)]

use once_cell::sync::Lazy;
use rpp_witness::schema::mismatch;
use rpp_witness::{
    Charset, CodecConfig, DecodingError, Schema, TypeRegistry, TypeTag, Value, Witness,
};

pub const CASH: TypeTag = TypeTag(0x10);
pub const BOND: TypeTag = TypeTag(0x11);
pub const HOLDING: TypeTag = TypeTag(0x20);
pub const TRANSFER: TypeTag = TypeTag(0x30);

/// `Cash { amount: Long, currency: ASCII(3) }`: 15 bytes, 120 bits.
pub fn cash_schema() -> Schema {
    Schema::structure("Cash")
        .field("amount", Schema::long())
        .field("currency", Schema::text(Charset::Ascii, 3))
        .build()
}

/// `Bond { issuer: UTF-8(16), coupon: Int, maturity: Long }`: 32 bytes, 256 bits.
pub fn bond_schema() -> Schema {
    Schema::structure("Bond")
        .field("issuer", Schema::text(Charset::Utf8, 16))
        .field("coupon", Schema::int())
        .field("maturity", Schema::long())
        .build()
}

/// `Holding { owner: UTF-8(8), asset: Cash | Bond }`: 48 bytes, 384 bits.
pub fn holding_schema() -> Schema {
    Schema::structure("Holding")
        .field("owner", Schema::text(Charset::Utf8, 8))
        .field("asset", Schema::union("Asset", ["Cash", "Bond"]))
        .build()
}

pub fn cash(amount: i64, currency: &str) -> Value {
    Value::Struct(vec![Value::Long(amount), Value::text(currency)])
}

pub fn bond(issuer: &str, coupon: i32, maturity: i64) -> Value {
    Value::Struct(vec![
        Value::text(issuer),
        Value::Int(coupon),
        Value::Long(maturity),
    ])
}

pub fn holding(owner: &str, asset_type: &str, asset: Value) -> Value {
    Value::Struct(vec![Value::text(owner), Value::variant(asset_type, asset)])
}

/// Typed witness registered through [`Witness`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub sender: String,
    pub amount: i64,
    pub memo: Option<String>,
    pub hops: Vec<i32>,
}

impl Witness for Transfer {
    const TYPE_NAME: &'static str = "Transfer";

    fn schema() -> Schema {
        Schema::structure(Self::TYPE_NAME)
            .field("sender", Schema::text(Charset::Utf8, 16))
            .field("amount", Schema::long())
            .field("memo", Schema::optional(Schema::text(Charset::Ascii, 8)))
            .field("hops", Schema::list(Schema::int(), 4))
            .build()
    }

    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::text(self.sender.clone()),
            Value::Long(self.amount),
            Value::Optional(self.memo.clone().map(|memo| Box::new(Value::Text(memo)))),
            Value::from(self.hops.clone()),
        ])
    }

    fn from_value(value: Value) -> Result<Self, DecodingError> {
        let fields = match value {
            Value::Struct(fields) => fields,
            other => return Err(mismatch("Transfer", "Struct", &other)),
        };
        match <[Value; 4]>::try_from(fields) {
            Ok([Value::Text(sender), Value::Long(amount), Value::Optional(memo), Value::List(hops)]) => {
                let memo = match memo.map(|inner| *inner) {
                    None => None,
                    Some(Value::Text(text)) => Some(text),
                    Some(other) => return Err(mismatch("Transfer.memo", "Text", &other)),
                };
                let hops = hops
                    .into_iter()
                    .map(|hop| match hop {
                        Value::Int(hop) => Ok(hop),
                        other => Err(mismatch("Transfer.hops[]", "Int", &other)),
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Transfer {
                    sender,
                    amount,
                    memo,
                    hops,
                })
            }
            _ => Err(DecodingError::TypeMismatch {
                path: "Transfer".into(),
                expected: "Struct(Text, Long, Optional, List)",
                found: "Struct",
            }),
        }
    }
}

pub fn sample_transfer() -> Transfer {
    Transfer {
        sender: "alice".into(),
        amount: 250,
        memo: Some("rent".into()),
        hops: vec![3, 1],
    }
}

pub static REGISTRY: Lazy<TypeRegistry> = Lazy::new(|| {
    let mut builder = TypeRegistry::builder();
    builder
        .register("Holding", HOLDING, holding_schema())
        .expect("register Holding")
        .register("Cash", CASH, cash_schema())
        .expect("register Cash")
        .register("Bond", BOND, bond_schema())
        .expect("register Bond")
        .register_witness::<Transfer>(TRANSFER)
        .expect("register Transfer");
    builder.seal().expect("fixture registry seals")
});

pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}

pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use core::fmt::Write;
        let _ = write!(&mut out, "{:02x}", byte);
    }
    out
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
