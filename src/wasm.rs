use std::collections::HashMap;

use serde::Serialize;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use crate::decoder::transaction::decode_transaction;
use crate::programs::Program;
use crate::programs::pump_fun::{BondingCurveLayout, decode_bonding_curve_payload_with};
use crate::types::{RawTransaction, parse_pubkey};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

/// Amounts are `u64`, so anything past 2^53 becomes a `BigInt` instead of a lossy number.
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible()
        .serialize_large_number_types_as_bigints(true);
    match value.serialize(&serializer) {
        Ok(js) => js,
        Err(e) => error_result(&format!("failed to serialize result: {e}")),
    }
}

fn error_result(msg: &str) -> JsValue {
    match serde_json::to_string(&serde_json::json!({ "error": msg })) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

/// Known programs with their ids.
#[wasm_bindgen]
pub fn known_programs() -> JsValue {
    let result: Vec<serde_json::Value> = Program::iter()
        .map(|p| {
            serde_json::json!({
                "id": p.as_ref(),
                "programId": p.program_id_str(),
            })
        })
        .collect();
    to_js(&result)
}

/// Decode one flattened transaction row (see [`RawTransaction`]).
///
/// `tables_json` maps base58 lookup table addresses to base58 account data.
#[wasm_bindgen]
pub fn decode_transaction_json(tx_json: &str, tables_json: &str) -> JsValue {
    let raw = match RawTransaction::from_json(tx_json) {
        Ok(raw) => raw,
        Err(e) => return error_result(&e.to_string()),
    };
    let envelope = match raw.into_envelope() {
        Ok(envelope) => envelope,
        Err(e) => return error_result(&e.to_string()),
    };

    let encoded_tables: HashMap<String, String> = if tables_json.trim().is_empty() {
        HashMap::new()
    } else {
        match serde_json::from_str(tables_json) {
            Ok(tables) => tables,
            Err(_) => return error_result("Expected an object of table address to base58 data"),
        }
    };

    let mut tables = HashMap::with_capacity(encoded_tables.len());
    for (address, data) in &encoded_tables {
        let key = match parse_pubkey(address) {
            Ok(key) => key,
            Err(e) => return error_result(&e.to_string()),
        };
        match bs58::decode(data).into_vec() {
            Ok(bytes) => {
                tables.insert(key, bytes);
            }
            Err(e) => return error_result(&format!("invalid table data for {address}: {e}")),
        }
    }

    match decode_transaction(&envelope, &tables) {
        Ok(decoded) => to_js(&decoded),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Decode a base58 bonding-curve payload. `layout` is `"anchor"` (default) or `"bare"`.
#[wasm_bindgen]
pub fn decode_bonding_curve(encoded: &str, layout: Option<String>) -> JsValue {
    let layout = match layout.as_deref() {
        None => BondingCurveLayout::default(),
        Some(s) => match s.parse::<BondingCurveLayout>() {
            Ok(layout) => layout,
            Err(_) => return error_result(&format!("Unknown layout \"{s}\"")),
        },
    };

    match decode_bonding_curve_payload_with(encoded, layout) {
        Ok(payload) => to_js(&payload),
        Err(e) => error_result(&e.to_string()),
    }
}
