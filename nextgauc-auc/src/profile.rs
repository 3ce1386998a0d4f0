//! Conversion of YAML subscriber profiles into engine records

use nextgauc_common::{decode_hex, decode_hex_array, AuthType, Error, OpType, SubscriberConfig};

use crate::types::{GsmAuthData, OperatorKey, SubscriberAuthData, UmtsAuthData};

fn operator_key(op_type: OpType, value: [u8; 16]) -> OperatorKey {
    match op_type {
        OpType::Op => OperatorKey::Op(value),
        OpType::Opc => OperatorKey::Opc(value),
    }
}

impl TryFrom<&SubscriberConfig> for SubscriberAuthData {
    type Error = Error;

    fn try_from(config: &SubscriberConfig) -> Result<Self, Self::Error> {
        config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        let op = config
            .op
            .as_deref()
            .map(|s| decode_hex_array::<16>("op", s))
            .transpose()?
            .map(|v| operator_key(config.op_type, v));

        match config.auth_type {
            AuthType::Gsm => {
                let ki = decode_hex(&config.key)?;
                let mut gsm = GsmAuthData::new(&ki).map_err(|e| Error::Config(e.to_string()))?;
                gsm.op = op;
                Ok(SubscriberAuthData::gsm(config.algo, gsm))
            }
            AuthType::Umts => {
                if config.algo.is_gsm_only() {
                    return Err(Error::Config(format!(
                        "{} cannot be used with UMTS subscribers",
                        config.algo
                    )));
                }
                let k = decode_hex_array::<16>("key", &config.key)?;
                let amf = decode_hex_array::<2>("amf", &config.amf)?;
                // XOR ignores the operator value
                let opc = op.unwrap_or(OperatorKey::Opc([0; 16]));
                let umts = UmtsAuthData::new(k, opc)
                    .with_amf(amf)
                    .with_sqn(config.sqn)
                    .with_ind(config.ind_bitlen, config.ind);
                Ok(SubscriberAuthData::umts(config.algo, umts))
            }
            AuthType::None => Err(Error::Config("auth_type must be gsm or umts".into())),
        }
    }
}
