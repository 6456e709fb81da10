//! Field Element Canonicalization
//!
//! 문자열/정수 값을 StarkNet 필드 요소(Felt)로 변환하는 규칙을 제공합니다.
//! 서명 해시는 이 규칙 위에서 계산되므로 서버 측 구현과 비트 단위로 일치해야
//! 합니다.
//!
//! # 변환 규칙
//!
//! - `0x` 접두사 문자열: 16진수 정수로 파싱
//! - 순수 숫자 문자열: 10진수 정수로 파싱
//! - 그 외 문자열: 최대 31바이트 short string 인코딩 (빅엔디언 바이트 패킹)
//!
//! # 참조
//!
//! - [Cairo short strings](https://docs.starknet.io/documentation/architecture_and_concepts/Smart_Contracts/strings/)

use crate::errors::{SigningError, SigningResult};
use starknet_types_core::felt::Felt;

/// short string 최대 길이 (바이트)
pub const SHORT_STRING_MAX_BYTES: usize = 31;

/// 문자열을 short string으로 인코딩
///
/// 원시 바이트를 빅엔디언 정수로 패킹합니다. 31바이트를 넘거나 빈 문자열이면
/// 인코딩이 정의되지 않으므로 거부합니다.
///
/// # Arguments
///
/// * `s` - 인코딩할 문자열 (1~31바이트)
///
/// # Returns
///
/// Felt 값
pub fn encode_short_string(s: &str) -> SigningResult<Felt> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(SigningError::EncodingError {
            message: "cannot encode empty string".to_string(),
        });
    }
    if bytes.len() > SHORT_STRING_MAX_BYTES {
        return Err(SigningError::EncodingError {
            message: format!("string exceeds {SHORT_STRING_MAX_BYTES} bytes: {s:?}"),
        });
    }

    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(Felt::from_bytes_be(&padded))
}

/// 문자열 값을 Felt로 정규화
///
/// 숫자 문자열은 정수로, 그 외는 short string으로 인코딩합니다. 빈 문자열은
/// 여기서 처리하지 않습니다. 빈 값이 가능한 필드는 페이로드 인코더가 직접
/// 규칙을 정합니다.
pub fn to_felt(value: &str) -> SigningResult<Felt> {
    if value.is_empty() {
        return Err(SigningError::EncodingError {
            message: "empty string has no canonical felt encoding".to_string(),
        });
    }

    if value.starts_with("0x") || value.starts_with("0X") {
        return felt_from_hex(value);
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        // 10진수 파싱, 자릿수 제한 없이 mod P로 환원
        let ten = Felt::from(10u64);
        let parsed = value.bytes().fold(Felt::ZERO, |acc, digit| {
            acc * ten + Felt::from(u64::from(digit - b'0'))
        });
        return Ok(parsed);
    }

    encode_short_string(value)
}

/// 16진수 문자열을 Felt로 파싱 (홀수 자리 처리 포함)
pub fn felt_from_hex(hex_str: &str) -> SigningResult<Felt> {
    let hex_str = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);

    // 홀수 길이면 앞에 0을 추가
    let hex_str = if hex_str.len() % 2 != 0 {
        format!("0{hex_str}")
    } else {
        hex_str.to_string()
    };

    let bytes = hex::decode(&hex_str).map_err(|e| SigningError::EncodingError {
        message: format!("invalid hex: {e}"),
    })?;

    if bytes.len() > 32 {
        return Err(SigningError::EncodingError {
            message: format!("hex value too large: {} bytes", bytes.len()),
        });
    }

    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(Felt::from_bytes_be(&padded))
}

/// Felt를 16진수 문자열로 변환 (0x 접두사, 앞자리 0 제거)
pub fn felt_to_hex(felt: &Felt) -> String {
    let encoded = hex::encode(felt.to_bytes_be());
    let trimmed = encoded.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{trimmed}")
    }
}
