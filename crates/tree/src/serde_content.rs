use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::{Error as DeError, Visitor};
use serde::{Deserializer, Serializer};

const B64_PREFIX: &str = "b64:";

/// Serialises file bytes as a string, keeping UTF-8 text readable and
/// falling back to base64 for binary payloads.
/// 若內容為 UTF-8 文字則直接輸出；否則（如 PNG）以 base64 保存。
pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&encode(bytes))
}

/// Restores bytes produced by [`serialize`].
/// 從上述序列化結果還原位元組。
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ContentVisitor;

    impl<'de> Visitor<'de> for ContentVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a UTF-8 or base64 encoded content string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            decode(v).map_err(E::custom)
        }

        fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
        where
            E: DeError,
        {
            Ok(v.to_vec())
        }
    }

    deserializer.deserialize_any(ContentVisitor)
}

fn encode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        // Text that itself starts with the prefix is encoded so decoding stays unambiguous.
        Ok(text) if !text.starts_with(B64_PREFIX) => text.to_string(),
        _ => format!("{B64_PREFIX}{}", BASE64.encode(bytes)),
    }
}

fn decode(text: &str) -> Result<Vec<u8>, String> {
    match text.strip_prefix(B64_PREFIX) {
        Some(rest) => BASE64
            .decode(rest.as_bytes())
            .map_err(|err| format!("invalid base64 content payload: {err}")),
        None => Ok(text.as_bytes().to_vec()),
    }
}
