use chardetng::EncodingDetector;
use encoding_rs::{Encoding, BIG5, GBK, SHIFT_JIS, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

use crate::error::EditorError;

/// 文字內容的行尾樣式。 / Line ending style of a text payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// The style of the first line break in `text`; `Lf` when there is none.
    fn detect(text: &str) -> Self {
        match text.find(['\r', '\n']) {
            Some(at) if text[at..].starts_with("\r\n") => LineEnding::CrLf,
            Some(at) if text[at..].starts_with('\r') => LineEnding::Cr,
            _ => LineEnding::Lf,
        }
    }

    fn restore(self, text: &str) -> String {
        let text = normalize_newlines(text);
        match self {
            LineEnding::Lf => text,
            LineEnding::CrLf => text.replace('\n', "\r\n"),
            LineEnding::Cr => text.replace('\n', "\r"),
        }
    }
}

/// 解碼後的文字與寫回原格式所需的資訊。 / Decoded text plus what is needed to write it back unchanged in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Contents with line endings normalised to `\n`.
    pub text: String,
    pub encoding: &'static Encoding,
    pub has_bom: bool,
    pub line_ending: LineEnding,
}

impl DecodedText {
    /// 以原本的編碼、BOM 與行尾寫出 `text`。 / Encodes `text` with this payload's encoding, BOM and line ending.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, EditorError> {
        let text = self.line_ending.restore(text);
        let mut bytes = Vec::with_capacity(text.len() + 3);
        if self.has_bom {
            bytes.extend_from_slice(bom(self.encoding));
        }
        // encoding_rs only encodes UTF-16 as UTF-8, so those two are written by hand.
        if self.encoding == UTF_16LE {
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        } else if self.encoding == UTF_16BE {
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        } else {
            let (encoded, _, unmappable) = self.encoding.encode(&text);
            if unmappable {
                return Err(EditorError::Unrepresentable(self.encoding.name()));
            }
            bytes.extend_from_slice(&encoded);
        }
        Ok(bytes)
    }
}

/// 解碼檔案位元組：先看 BOM，再試 UTF-8，最後交給 chardetng。 /
/// Decodes file bytes: BOM first, then plain UTF-8, then legacy detection.
pub fn decode(bytes: &[u8]) -> Result<DecodedText, EditorError> {
    let (encoding, body, has_bom) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..], true),
        None => (sniff(bytes)?, bytes, false),
    };
    let (raw, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        return Err(EditorError::InvalidEncoding);
    }
    Ok(DecodedText {
        line_ending: LineEnding::detect(&raw),
        text: normalize_newlines(&raw),
        encoding,
        has_bom,
    })
}

fn sniff(bytes: &[u8]) -> Result<&'static Encoding, EditorError> {
    if std::str::from_utf8(bytes).is_ok() {
        return Ok(UTF_8);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, true);
    // Only these legacy encodings are accepted from detection.
    if [WINDOWS_1252, SHIFT_JIS, GBK, BIG5].contains(&guess) {
        Ok(guess)
    } else {
        Err(EditorError::InvalidEncoding)
    }
}

fn bom(encoding: &'static Encoding) -> &'static [u8] {
    if encoding == UTF_16LE {
        b"\xFF\xFE"
    } else if encoding == UTF_16BE {
        b"\xFE\xFF"
    } else if encoding == UTF_8 {
        b"\xEF\xBB\xBF"
    } else {
        b""
    }
}

pub(crate) fn normalize_newlines(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}
